use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::column::{ColumnSpec, RefluxSpec};
use crate::config::{Config, ConfigError, DisplaySettings};
use crate::data_import;
use crate::equilibrium::EquilibriumModel;
use crate::errors::DistillationError;
use crate::stepper::{StageStepper, StageTrace};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("단수 계산 오류: {0}")]
    Distillation(#[from] DistillationError),
    #[error("데이터 파일 {} 읽기 실패: {source}", .path.display())]
    DataFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 표준 입력이 닫힘 (EOF)
    #[error("입력이 끝났습니다")]
    InputClosed,
}

/// 평형선 입력 방식.
#[derive(Debug, Clone, PartialEq)]
pub enum EquilibriumSource {
    /// 상대휘발도 일정
    Ideal { alpha: f64 },
    /// 실측 데이터 파일 (.toml 또는 x y 표)
    DataFile(PathBuf),
}

/// 평형 모델과 함께 데이터 파일에서 나온 경고를 돌려준다.
pub fn load_equilibrium(
    source: &EquilibriumSource,
) -> Result<(EquilibriumModel, Vec<String>), AppError> {
    match source {
        EquilibriumSource::Ideal { alpha } => Ok((EquilibriumModel::ideal(*alpha)?, Vec::new())),
        EquilibriumSource::DataFile(path) => load_data_file(path),
    }
}

fn load_data_file(path: &Path) -> Result<(EquilibriumModel, Vec<String>), AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::DataFile {
        path: path.to_path_buf(),
        source,
    })?;
    let data = data_import::parse_by_extension(path, &text)?;
    let warnings: Vec<String> = data
        .missing_endpoints()
        .into_iter()
        .map(|(x, y)| format!("평형 데이터에 끝점 ({x}, {y})이 없습니다. 범위 밖은 외삽됩니다."))
        .collect();
    for w in &warnings {
        warn!("{}: {w}", path.display());
    }
    Ok((data.into_model()?, warnings))
}

/// 한 번의 단수 계산 결과.
#[derive(Debug, Clone)]
pub struct CalculationReport {
    /// 소수 이론 단수
    pub plates: f64,
    /// 정수 작도 단수
    pub full_steps: usize,
    /// 최적 진료단 (유한 환류)
    pub feed_plate: Option<usize>,
    /// 정류 조작선과 q선의 교점 (유한 환류)
    pub intersection: Option<(f64, f64)>,
    pub trace: StageTrace,
    /// 경고/주의 메시지
    pub warnings: Vec<String>,
}

/// 전환류 최소 이론 단수를 계산한다.
pub fn run_total_reflux(
    model: &EquilibriumModel,
    x_d: f64,
    x_w: f64,
    max_stages: usize,
) -> Result<CalculationReport, AppError> {
    let spec = ColumnSpec::total_reflux(x_d, x_w)?;
    let run = StageStepper::total_reflux(model, &spec)
        .with_max_stages(max_stages)?
        .run()?;
    Ok(CalculationReport {
        plates: run.plates,
        full_steps: run.full_steps,
        feed_plate: None,
        intersection: None,
        trace: run.trace,
        warnings: Vec::new(),
    })
}

/// 유한 환류 이론 단수와 최적 진료단을 계산한다.
pub fn run_finite_reflux(
    model: &EquilibriumModel,
    x_d: f64,
    x_w: f64,
    reflux: RefluxSpec,
    max_stages: usize,
) -> Result<CalculationReport, AppError> {
    let spec = ColumnSpec::finite_reflux(x_d, x_w, reflux)?;
    let stepper = StageStepper::finite_reflux(model, &spec)?.with_max_stages(max_stages)?;
    let run = stepper.run()?;
    Ok(CalculationReport {
        plates: run.plates,
        full_steps: run.full_steps,
        feed_plate: run.feed_plate,
        intersection: Some(stepper.operating_lines().intersection()),
        trace: run.trace,
        warnings: Vec::new(),
    })
}

/// 결과를 표준 출력에 쓴다.
pub fn print_report(report: &CalculationReport, display: &DisplaySettings) {
    let p = display.precision;
    for w in &report.warnings {
        println!("주의: {w}");
    }
    if let Some((x, y)) = report.intersection {
        println!("조작선 교점: ({x:.p$}, {y:.p$})");
    }
    println!(
        "이론 단수: {:.p$} (작도 {}단)",
        report.plates, report.full_steps
    );
    if let Some(feed) = report.feed_plate {
        println!("최적 진료단: {feed}");
    }
    if display.show_trace {
        println!("{:>5} {:>12} {:>12}", "점", "x", "y");
        for (i, (x, y)) in report.trace.points().enumerate() {
            println!("{i:>5} {x:>12.p$} {y:>12.p$}");
        }
    }
}

/// 메뉴 한 번의 처리 결과를 정리한다.
///
/// 입력 데이터나 계산 조건이 잘못된 경우는 메시지를 돌려주어 메뉴로 돌아가게 하고,
/// 설정 저장 실패, 콘솔 입출력 오류, 입력 종료는 그대로 전파한다.
pub fn settle_outcome(outcome: Result<(), AppError>) -> Result<Option<String>, AppError> {
    match outcome {
        Ok(()) => Ok(None),
        Err(err @ (AppError::Distillation(_) | AppError::DataFile { .. })) => {
            Ok(Some(err.to_string()))
        }
        Err(err) => Err(err),
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config) -> Result<(), AppError> {
    loop {
        let choice = match ui_cli::main_menu() {
            Ok(choice) => choice,
            Err(AppError::InputClosed) => MenuChoice::Exit,
            Err(err) => return Err(err),
        };
        let outcome = match choice {
            MenuChoice::TotalReflux => ui_cli::handle_total_reflux(config),
            MenuChoice::FiniteReflux => ui_cli::handle_finite_reflux(config),
            MenuChoice::Settings => ui_cli::handle_settings(config)
                .and_then(|()| config.save().map_err(AppError::from)),
            MenuChoice::Exit => break,
        };
        match settle_outcome(outcome) {
            Ok(Some(msg)) => println!("계산 실패: {msg}"),
            Ok(None) => {}
            // 입력 도중 EOF면 지금까지의 설정을 저장하고 끝낸다
            Err(AppError::InputClosed) => break,
            Err(err) => return Err(err),
        }
    }
    config.save()?;
    println!("프로그램을 종료합니다.");
    Ok(())
}
