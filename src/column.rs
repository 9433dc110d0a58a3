use serde::{Deserialize, Serialize};

use crate::errors::{check_fraction, check_positive, DistillationError, DistillationResult};

/// 유한 환류 운전 조건.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefluxSpec {
    /// 환류비 R (> 0)
    pub reflux_ratio: f64,
    /// 진료 열상태 q. 포화액 진료는 1.
    pub q: f64,
    /// 진료 중 경성분 몰분율 z_F
    pub z_f: f64,
}

/// 검증을 마친 정류탑 사양. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    x_d: f64,
    x_w: f64,
    reflux: Option<RefluxSpec>,
}

impl ColumnSpec {
    /// 전환류 조건. 탑정/탑저 조성만 필요하다.
    pub fn total_reflux(x_d: f64, x_w: f64) -> DistillationResult<Self> {
        let (x_d, x_w) = check_products(x_d, x_w)?;
        Ok(Self {
            x_d,
            x_w,
            reflux: None,
        })
    }

    /// 유한 환류 조건.
    pub fn finite_reflux(x_d: f64, x_w: f64, reflux: RefluxSpec) -> DistillationResult<Self> {
        let (x_d, x_w) = check_products(x_d, x_w)?;
        check_positive("reflux_ratio", reflux.reflux_ratio)?;
        check_fraction("z_f", reflux.z_f)?;
        if !reflux.q.is_finite() {
            return Err(DistillationError::InvalidParameter {
                name: "q",
                value: reflux.q,
                reason: "유한한 값이어야 합니다",
            });
        }
        Ok(Self {
            x_d,
            x_w,
            reflux: Some(reflux),
        })
    }

    pub fn x_d(&self) -> f64 {
        self.x_d
    }

    pub fn x_w(&self) -> f64 {
        self.x_w
    }

    /// 전환류면 `None`.
    pub fn reflux(&self) -> Option<RefluxSpec> {
        self.reflux
    }

    pub fn is_total_reflux(&self) -> bool {
        self.reflux.is_none()
    }
}

fn check_products(x_d: f64, x_w: f64) -> DistillationResult<(f64, f64)> {
    let x_d = check_fraction("x_d", x_d)?;
    let x_w = check_fraction("x_w", x_w)?;
    if x_d <= x_w {
        return Err(DistillationError::InvalidParameter {
            name: "x_d",
            value: x_d,
            reason: "탑정 조성은 탑저 조성 x_w보다 커야 합니다",
        });
    }
    Ok((x_d, x_w))
}
