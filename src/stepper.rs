//! McCabe–Thiele 계단 작도.
//!
//! (x_D, x_D)에서 시작해 평형선 역함수로 수평 이동하고 조작선으로 수직 이동하기를
//! x ≤ x_W가 될 때까지 반복한다. 마지막 단은 x_W를 넘어가므로 마지막 두 조성
//! 사이를 선형 보간해 소수 단수를 얻는다.
//!
//! 종료 조건: x_D > x_W이고 (x_W, x_D)에서 평형 역함수가 y 감소에 따라 x를
//! 엄밀히 감소시켜야 한다. 평형선이 비단조이거나 조작선과 만나면(핀치) 계단이
//! 진행하지 않으므로 `max_stages`에서 [`DistillationError::StageLimitExceeded`]로
//! 끊는다.

use log::{debug, info, warn};

use crate::column::ColumnSpec;
use crate::equilibrium::Equilibrium;
use crate::errors::{DistillationError, DistillationResult};
use crate::operating_lines::{OperatingLine, OperatingLines, Section, TotalReflux};

/// 반복 한도 기본값.
pub const DEFAULT_MAX_STAGES: usize = 10_000;

/// 계단 궤적. `x[i]`, `y[i]`가 i번째 꼭짓점이며 첫 점은 (x_D, x_D)이다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl StageTrace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) 꼭짓점 순회.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// 계단 작도 한 번의 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRun {
    /// 소수 보정한 이론 단수
    pub plates: f64,
    /// x ≤ x_W에 도달할 때까지 그린 정수 단수
    pub full_steps: usize,
    /// 정류부에서 회수부로 넘어간 단(최적 진료단). 전환류는 `None`.
    pub feed_plate: Option<usize>,
    /// 마지막 점을 대각선으로 옮기기 전, 조작선 위의 y
    pub final_operating_y: f64,
    pub trace: StageTrace,
}

/// 평형선 `E`와 조작선 `L`에 대해 계단을 그린다.
#[derive(Debug, Clone)]
pub struct StageStepper<E, L> {
    equilibrium: E,
    lines: L,
    x_d: f64,
    x_w: f64,
    max_stages: usize,
}

impl<E: Equilibrium> StageStepper<E, TotalReflux> {
    /// 전환류 작도기. 사양에 환류 조건이 있어도 x_D, x_W만 사용한다.
    pub fn total_reflux(equilibrium: E, spec: &ColumnSpec) -> Self {
        Self {
            equilibrium,
            lines: TotalReflux,
            x_d: spec.x_d(),
            x_w: spec.x_w(),
            max_stages: DEFAULT_MAX_STAGES,
        }
    }

    /// 소수 이론 단수.
    pub fn compute_plate_count(&self) -> DistillationResult<f64> {
        Ok(self.run()?.plates)
    }
}

impl<E: Equilibrium> StageStepper<E, OperatingLines> {
    /// 유한 환류 작도기. 조작선 교점을 여기서 구한다.
    pub fn finite_reflux(equilibrium: E, spec: &ColumnSpec) -> DistillationResult<Self> {
        let lines = OperatingLines::new(spec)?;
        Ok(Self {
            equilibrium,
            lines,
            x_d: spec.x_d(),
            x_w: spec.x_w(),
            max_stages: DEFAULT_MAX_STAGES,
        })
    }

    /// (소수 이론 단수, 최적 진료단).
    pub fn compute_plate_count(&self) -> DistillationResult<(f64, usize)> {
        let run = self.run()?;
        let feed_plate = run.feed_plate.ok_or_else(|| {
            DistillationError::DegenerateGeometry("회수부에 진입하지 않았습니다".into())
        })?;
        Ok((run.plates, feed_plate))
    }

    pub fn operating_lines(&self) -> &OperatingLines {
        &self.lines
    }
}

impl<E: Equilibrium, L: OperatingLine> StageStepper<E, L> {
    /// 반복 한도를 바꾼다. 0은 허용하지 않는다.
    pub fn with_max_stages(mut self, max_stages: usize) -> DistillationResult<Self> {
        if max_stages == 0 {
            return Err(DistillationError::InvalidParameter {
                name: "max_stages",
                value: 0.0,
                reason: "1 이상이어야 합니다",
            });
        }
        self.max_stages = max_stages;
        Ok(self)
    }

    pub fn equilibrium(&self) -> &E {
        &self.equilibrium
    }

    pub fn max_stages(&self) -> usize {
        self.max_stages
    }

    /// 계단을 처음부터 그린다. 호출마다 새 궤적을 만들므로 결과는 항상 같다.
    pub fn run(&self) -> DistillationResult<StageRun> {
        let mut trace = StageTrace {
            x: vec![self.x_d],
            y: vec![self.x_d],
        };
        let switch_x = self.lines.switch_x();
        let mut section = Section::Rectifying;
        let mut feed_plate = None;
        let mut plate = 0usize;
        let (mut x_last, mut y_last) = (self.x_d, self.x_d);

        while x_last > self.x_w {
            if plate >= self.max_stages {
                warn!(
                    "{}단 안에 x_W = {}에 도달하지 못함 (x = {x_last:.6}), 핀치 가능성",
                    self.max_stages, self.x_w
                );
                return Err(DistillationError::StageLimitExceeded {
                    limit: self.max_stages,
                    last_x: x_last,
                });
            }
            plate += 1;

            let x_next = self.equilibrium.inverse(y_last)?;
            if !x_next.is_finite() {
                return Err(DistillationError::NumericOverflow { y: y_last });
            }
            if section == Section::Rectifying {
                if let Some(sx) = switch_x {
                    if x_next <= sx {
                        section = Section::Stripping;
                        feed_plate = Some(plate);
                    }
                }
            }
            let y_next = self.lines.vapor_composition(x_next, section);
            debug!("plate {plate}: x = {x_next:.6}, y = {y_next:.6} ({section:?})");

            trace.x.push(x_next);
            trace.y.push(y_next);
            x_last = x_next;
            y_last = y_next;
        }

        // 탑저 점은 대각선 위에 둔다. 단수 보정은 x만 쓰므로 영향이 없다.
        let final_operating_y = y_last;
        if let Some(y) = trace.y.last_mut() {
            *y = x_last;
        }

        let n = trace.x.len();
        let x_prev = trace.x[n - 2];
        let plates = plate as f64 - (x_last - self.x_w) / (x_last - x_prev);
        info!(
            "이론 단수 {plates:.4} ({plate}단 작도), 진료단 {:?}",
            feed_plate
        );

        Ok(StageRun {
            plates,
            full_steps: plate,
            feed_plate,
            final_operating_y,
            trace,
        })
    }
}
