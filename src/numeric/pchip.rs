//! 형상 보존 구간 3차 에르미트 보간(PCHIP, Fritsch–Carlson 방식).
//!
//! 각 구간의 기울기를 가중 조화평균으로 잡아 데이터가 단조이면 보간 곡선도
//! 단조를 유지하고 오버슈트가 없다. 1차 도함수는 연속이다. 데이터 범위 밖은
//! 양 끝 구간의 3차식을 그대로 연장해 외삽한다.

use crate::errors::{DistillationError, DistillationResult};

/// 단조 보간기. 생성 시 노드 기울기를 미리 계산해 둔다.
#[derive(Debug, Clone, PartialEq)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    /// 엄밀히 증가하는 `x`와 같은 길이의 `y`로 보간기를 만든다.
    pub fn new(x: &[f64], y: &[f64]) -> DistillationResult<Self> {
        if x.len() != y.len() {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "x({})와 y({})의 길이가 다릅니다",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(DistillationError::InvalidEquilibriumData(
                "데이터 점이 2개 이상 필요합니다".into(),
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(DistillationError::InvalidEquilibriumData(
                "유한하지 않은 값이 포함되어 있습니다".into(),
            ));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "보간 기준 좌표가 {}번째 점에서 증가하지 않습니다",
                i + 1
            )));
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let m: Vec<f64> = y
            .windows(2)
            .zip(&h)
            .map(|(w, hk)| (w[1] - w[0]) / hk)
            .collect();

        let slopes = node_slopes(&h, &m);
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }

    /// 보간값을 계산한다. 범위 밖은 끝 구간 다항식으로 외삽한다.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.x.len();
        // t가 속한 구간 [x_k, x_{k+1}]; 범위 밖이면 첫/마지막 구간
        let k = self
            .x
            .partition_point(|&xi| xi <= t)
            .saturating_sub(1)
            .min(n - 2);

        let h = self.x[k + 1] - self.x[k];
        let s = (t - self.x[k]) / h;
        let one_minus = 1.0 - s;
        let h00 = (1.0 + 2.0 * s) * one_minus * one_minus;
        let h10 = s * one_minus * one_minus;
        let h01 = s * s * (3.0 - 2.0 * s);
        let h11 = s * s * (s - 1.0);

        h00 * self.y[k] + h10 * h * self.slopes[k] + h01 * self.y[k + 1] + h11 * h * self.slopes[k + 1]
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

fn node_slopes(h: &[f64], m: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    if n == 2 {
        return vec![m[0], m[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (m0, m1) = (m[k - 1], m[k]);
        if sign(m0) != sign(m1) || m0 == 0.0 || m1 == 0.0 {
            d[k] = 0.0;
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
    }
    d[0] = edge_slope(h[0], h[1], m[0], m[1]);
    d[n - 1] = edge_slope(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// 끝점 기울기: 세 점 비중심 차분에 단조성 보정을 적용한다.
fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reproduces_nodes() {
        let x = [0.0, 0.1, 0.3, 0.6, 1.0];
        let y = [0.0, 0.3, 0.55, 0.8, 1.0];
        let p = Pchip::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_relative_eq!(p.eval(*xi), *yi, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_points_is_linear() {
        let p = Pchip::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
        assert_relative_eq!(p.eval(0.25), 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.eval(1.5), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn no_overshoot_on_step_like_data() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 0.0, 1.0, 1.0, 1.0];
        let p = Pchip::new(&x, &y).unwrap();
        let mut prev = f64::NEG_INFINITY;
        for i in 0..=400 {
            let t = 4.0 * i as f64 / 400.0;
            let v = p.eval(t);
            assert!((-1e-12..=1.0 + 1e-12).contains(&v), "overshoot at {t}: {v}");
            assert!(v >= prev - 1e-12, "not monotone at {t}");
            prev = v;
        }
    }

    #[test]
    fn flat_segment_gives_zero_slope() {
        let p = Pchip::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 1.0, 2.0]).unwrap();
        assert_relative_eq!(p.eval(1.5), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Pchip::new(&[0.0, 1.0], &[0.0]).is_err());
        assert!(Pchip::new(&[0.0], &[0.0]).is_err());
        assert!(Pchip::new(&[0.0, 0.0, 1.0], &[0.0, 0.5, 1.0]).is_err());
        assert!(Pchip::new(&[0.0, f64::NAN], &[0.0, 1.0]).is_err());
    }
}
