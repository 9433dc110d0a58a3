/// `a·x + b·y = c` 형태의 직선 계수 한 줄.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRow {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineRow {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

/// 행렬식이 이 값(계수 크기 대비) 이하이면 특이 행렬로 본다.
const SINGULAR_TOL: f64 = 1e-12;

/// 두 직선의 교점을 크라머 공식으로 구한다.
/// 행렬식이 수치적으로 0이면(평행 또는 일치) `None`을 반환한다.
pub fn solve_2x2(first: LineRow, second: LineRow) -> Option<(f64, f64)> {
    let det = first.a * second.b - first.b * second.a;
    let scale = first.a.abs().max(first.b.abs()) * second.a.abs().max(second.b.abs());
    if !det.is_finite() || scale == 0.0 || det.abs() <= SINGULAR_TOL * scale {
        return None;
    }
    let x = (first.c * second.b - first.b * second.c) / det;
    let y = (first.a * second.c - first.c * second.a) / det;
    if x.is_finite() && y.is_finite() {
        Some((x, y))
    } else {
        None
    }
}
