use crate::errors::{check_positive, DistillationError, DistillationResult};

use super::Equilibrium;

/// 역함수 분모 `y·α − y − α`가 이보다 작으면 발산으로 판단한다.
const DENOMINATOR_EPS: f64 = 1e-12;

/// 상대휘발도 α가 일정한 이상계 평형선.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeVolatility {
    alpha: f64,
}

impl RelativeVolatility {
    /// α는 유한한 양수여야 한다.
    pub fn new(alpha: f64) -> DistillationResult<Self> {
        let alpha = check_positive("alpha", alpha)?;
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Equilibrium for RelativeVolatility {
    /// y = α·x / (1 + (α−1)·x)
    fn forward(&self, x: f64) -> DistillationResult<f64> {
        Ok(self.alpha * x / (1.0 + (self.alpha - 1.0) * x))
    }

    /// x = −y / (y·α − y − α)
    fn inverse(&self, y: f64) -> DistillationResult<f64> {
        let denominator = y * self.alpha - y - self.alpha;
        if denominator.abs() < DENOMINATOR_EPS {
            return Err(DistillationError::NumericOverflow { y });
        }
        let x = -y / denominator;
        if !x.is_finite() {
            return Err(DistillationError::NumericOverflow { y });
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forward_known_value() {
        let eq = RelativeVolatility::new(2.5).unwrap();
        // 2.5·0.5 / (1 + 1.5·0.5) = 1.25 / 1.75
        assert_relative_eq!(eq.forward(0.5).unwrap(), 1.25 / 1.75, epsilon = 1e-15);
        assert_relative_eq!(eq.forward(0.0).unwrap(), 0.0);
        assert_relative_eq!(eq.forward(1.0).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn inverse_undoes_forward() {
        for alpha in [0.4, 1.3, 2.5, 8.0] {
            let eq = RelativeVolatility::new(alpha).unwrap();
            for i in 1..100 {
                let x = i as f64 / 100.0;
                let back = eq.inverse(eq.forward(x).unwrap()).unwrap();
                assert_relative_eq!(back, x, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rejects_non_positive_alpha() {
        assert!(matches!(
            RelativeVolatility::new(0.0),
            Err(DistillationError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(RelativeVolatility::new(-1.0).is_err());
        assert!(RelativeVolatility::new(f64::INFINITY).is_err());
    }

    #[test]
    fn singular_denominator_is_overflow() {
        // y = α/(α−1) 에서 분모가 0이 된다
        let eq = RelativeVolatility::new(2.0).unwrap();
        assert_eq!(
            eq.inverse(2.0),
            Err(DistillationError::NumericOverflow { y: 2.0 })
        );
    }
}
