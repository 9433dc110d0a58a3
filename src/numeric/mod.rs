//! 조작선 교점 계산과 평형 데이터 보간에 쓰는 수치 도구.

pub mod linear;
pub mod pchip;

pub use linear::{solve_2x2, LineRow};
pub use pchip::Pchip;

/// `[start, end]`를 `count`개 점으로 균등 분할한다.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
