//! 기액평형선 y = f(x)와 역함수 x = f⁻¹(y).
//!
//! 상대휘발도 일정(이상계)과 실측 데이터 보간(비이상계) 두 가지를 제공한다.
//! 계단 작도기는 [`Equilibrium`] 트레이트만 보고 동작한다.

pub mod empirical;
pub mod ideal;

pub use empirical::EmpiricalEquilibrium;
pub use ideal::RelativeVolatility;

use crate::errors::DistillationResult;

/// 평형선 계산 능력.
pub trait Equilibrium {
    /// 액상 조성 x에서 기상 조성 y.
    fn forward(&self, x: f64) -> DistillationResult<f64>;

    /// 기상 조성 y에서 액상 조성 x.
    fn inverse(&self, y: f64) -> DistillationResult<f64>;

    /// 배열 입력에 대해 원소별로 [`Equilibrium::forward`]를 적용한다.
    fn forward_many(&self, xs: &[f64]) -> DistillationResult<Vec<f64>> {
        xs.iter().map(|&x| self.forward(x)).collect()
    }

    /// 배열 입력에 대해 원소별로 [`Equilibrium::inverse`]를 적용한다.
    fn inverse_many(&self, ys: &[f64]) -> DistillationResult<Vec<f64>> {
        ys.iter().map(|&y| self.inverse(y)).collect()
    }
}

/// 두 평형 모델을 묶은 태그 열거형. 입력 형태에 따라 런타임에 고를 때 쓴다.
#[derive(Debug, Clone, PartialEq)]
pub enum EquilibriumModel {
    Ideal(RelativeVolatility),
    Empirical(EmpiricalEquilibrium),
}

impl EquilibriumModel {
    pub fn ideal(alpha: f64) -> DistillationResult<Self> {
        Ok(Self::Ideal(RelativeVolatility::new(alpha)?))
    }

    pub fn empirical(x_samples: &[f64], y_samples: &[f64]) -> DistillationResult<Self> {
        Ok(Self::Empirical(EmpiricalEquilibrium::new(
            x_samples, y_samples,
        )?))
    }
}

impl Equilibrium for EquilibriumModel {
    fn forward(&self, x: f64) -> DistillationResult<f64> {
        match self {
            EquilibriumModel::Ideal(m) => m.forward(x),
            EquilibriumModel::Empirical(m) => m.forward(x),
        }
    }

    fn inverse(&self, y: f64) -> DistillationResult<f64> {
        match self {
            EquilibriumModel::Ideal(m) => m.inverse(y),
            EquilibriumModel::Empirical(m) => m.inverse(y),
        }
    }
}

impl<E: Equilibrium + ?Sized> Equilibrium for &E {
    fn forward(&self, x: f64) -> DistillationResult<f64> {
        (**self).forward(x)
    }

    fn inverse(&self, y: f64) -> DistillationResult<f64> {
        (**self).inverse(y)
    }
}
