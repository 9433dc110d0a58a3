use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mccabe_thiele_toolbox::app::{self, AppError, EquilibriumSource};
use mccabe_thiele_toolbox::column::RefluxSpec;
use mccabe_thiele_toolbox::config;

/// McCabe-Thiele 이론 단수 계산기. 하위 명령 없이 실행하면 대화형 메뉴를 띄운다.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// 계단 좌표표를 함께 출력
    #[arg(long, global = true)]
    trace: bool,
    /// 반복 한도 (config.toml 값을 덮어씀)
    #[arg(long, global = true)]
    max_stages: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 전환류 최소 이론 단수
    Total {
        #[command(flatten)]
        equilibrium: EquilibriumArgs,
        #[arg(long)]
        x_d: f64,
        #[arg(long)]
        x_w: f64,
    },
    /// 유한 환류 이론 단수와 최적 진료단
    Finite {
        #[command(flatten)]
        equilibrium: EquilibriumArgs,
        /// 진료 열상태 (포화액 = 1)
        #[arg(long, allow_hyphen_values = true)]
        q: f64,
        /// 환류비
        #[arg(long)]
        reflux: f64,
        #[arg(long)]
        z_f: f64,
        #[arg(long)]
        x_d: f64,
        #[arg(long)]
        x_w: f64,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct EquilibriumArgs {
    /// 상대휘발도 (이상계)
    #[arg(long)]
    alpha: Option<f64>,
    /// 실측 평형 데이터 파일 (.toml 또는 x y 표)
    #[arg(long)]
    data: Option<PathBuf>,
}

impl EquilibriumArgs {
    fn source(&self) -> EquilibriumSource {
        match (&self.data, self.alpha) {
            (Some(path), _) => EquilibriumSource::DataFile(path.clone()),
            (None, Some(alpha)) => EquilibriumSource::Ideal { alpha },
            // group(required)이 둘 중 하나를 보장한다
            (None, None) => EquilibriumSource::Ideal { alpha: f64::NAN },
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청한 계산 또는 대화형 메뉴를 실행한다.
fn main() {
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default()?;
    if let Some(n) = cli.max_stages {
        cfg.solver.max_stages = n;
    }
    if cli.trace {
        cfg.display.show_trace = true;
    }

    let Some(command) = cli.command else {
        return app::run(&mut cfg);
    };

    let report = match command {
        Command::Total {
            equilibrium,
            x_d,
            x_w,
        } => {
            let (model, warnings) = app::load_equilibrium(&equilibrium.source())?;
            let mut report = app::run_total_reflux(&model, x_d, x_w, cfg.solver.max_stages)?;
            report.warnings.extend(warnings);
            report
        }
        Command::Finite {
            equilibrium,
            q,
            reflux,
            z_f,
            x_d,
            x_w,
        } => {
            let (model, warnings) = app::load_equilibrium(&equilibrium.source())?;
            let spec = RefluxSpec {
                reflux_ratio: reflux,
                q,
                z_f,
            };
            let mut report =
                app::run_finite_reflux(&model, x_d, x_w, spec, cfg.solver.max_stages)?;
            report.warnings.extend(warnings);
            report
        }
    };
    app::print_report(&report, &cfg.display);
    Ok(())
}
