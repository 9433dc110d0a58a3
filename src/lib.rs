//! McCabe-Thiele 도해법으로 2성분 증류탑의 이론 단수를 계산한다.
//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod column;
pub mod config;
pub mod data_import;
pub mod diagram;
pub mod equilibrium;
pub mod errors;
pub mod numeric;
pub mod operating_lines;
pub mod stepper;
pub mod ui_cli;

pub use column::{ColumnSpec, RefluxSpec};
pub use equilibrium::{EmpiricalEquilibrium, Equilibrium, EquilibriumModel, RelativeVolatility};
pub use errors::{DistillationError, DistillationResult};
pub use operating_lines::{FeedLine, OperatingLine, OperatingLines, Section, TotalReflux};
pub use stepper::{StageRun, StageStepper, StageTrace, DEFAULT_MAX_STAGES};
