use crate::errors::{DistillationError, DistillationResult};
use crate::numeric::Pchip;

use super::Equilibrium;

/// 실측 기액평형 데이터로 정의한 비이상계 평형선.
///
/// 같은 점 쌍으로 두 개의 PCHIP 보간기를 만든다. 정방향은 x 기준, 역방향은
/// 좌표를 바꾼 y 기준이다. 따라서 y 데이터가 엄밀히 증가해야 역함수가 정의된다.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalEquilibrium {
    forward: Pchip,
    inverse: Pchip,
}

impl EmpiricalEquilibrium {
    pub fn new(x_samples: &[f64], y_samples: &[f64]) -> DistillationResult<Self> {
        if x_samples.len() != y_samples.len() {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "x({})와 y({}) 데이터 개수가 다릅니다",
                x_samples.len(),
                y_samples.len()
            )));
        }
        if x_samples.len() < 2 {
            return Err(DistillationError::InvalidEquilibriumData(
                "평형 데이터 점이 2개 이상 필요합니다".into(),
            ));
        }
        if let Some(v) = x_samples
            .iter()
            .chain(y_samples)
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "몰분율은 0~1 범위여야 합니다 (값: {v})"
            )));
        }
        if let Some(i) = y_samples.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "y 데이터는 엄밀히 단조 증가해야 역함수가 존재합니다 ({}번째 점)",
                i + 2
            )));
        }
        if let Some(i) = x_samples.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DistillationError::InvalidEquilibriumData(format!(
                "x 데이터는 엄밀히 단조 증가해야 합니다 ({}번째 점)",
                i + 2
            )));
        }

        Ok(Self {
            forward: Pchip::new(x_samples, y_samples)?,
            inverse: Pchip::new(y_samples, x_samples)?,
        })
    }

    pub fn x_samples(&self) -> &[f64] {
        self.forward.x()
    }

    pub fn y_samples(&self) -> &[f64] {
        self.forward.y()
    }
}

impl Equilibrium for EmpiricalEquilibrium {
    fn forward(&self, x: f64) -> DistillationResult<f64> {
        Ok(self.forward.eval(x))
    }

    fn inverse(&self, y: f64) -> DistillationResult<f64> {
        Ok(self.inverse.eval(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_monotone_y() {
        let err = EmpiricalEquilibrium::new(&[0.0, 0.2, 0.5, 1.0], &[0.0, 0.5, 0.4, 1.0])
            .unwrap_err();
        assert!(matches!(err, DistillationError::InvalidEquilibriumData(_)));
    }

    #[test]
    fn rejects_length_mismatch_and_short_data() {
        assert!(EmpiricalEquilibrium::new(&[0.0, 1.0], &[0.0, 0.5, 1.0]).is_err());
        assert!(EmpiricalEquilibrium::new(&[0.5], &[0.5]).is_err());
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        assert!(EmpiricalEquilibrium::new(&[0.0, 1.2], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn samples_are_exact() {
        let x = [0.0, 0.1, 0.4, 0.8, 1.0];
        let y = [0.0, 0.25, 0.6, 0.9, 1.0];
        let eq = EmpiricalEquilibrium::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((eq.forward(*xi).unwrap() - yi).abs() < 1e-12);
            assert!((eq.inverse(*yi).unwrap() - xi).abs() < 1e-12);
        }
    }
}
