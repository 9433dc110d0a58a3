use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{self, AppError, EquilibriumSource};
use crate::column::RefluxSpec;
use crate::config::Config;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TotalReflux,
    FiniteReflux,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    main_menu_from(&mut io::stdin().lock())
}

fn main_menu_from<R: BufRead>(input: &mut R) -> Result<MenuChoice, AppError> {
    println!("\n=== McCabe-Thiele 이론 단수 ===");
    println!("1) 전환류 (최소 단수)");
    println!("2) 유한 환류 (단수 + 진료단)");
    println!("3) 설정");
    println!("0) 종료");
    loop {
        let sel = read_line_from(input, "메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::TotalReflux),
            "2" => return Ok(MenuChoice::FiniteReflux),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 전환류 메뉴를 처리한다.
pub fn handle_total_reflux(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 전환류 --");
    let source = read_equilibrium_source(cfg)?;
    let x_d = read_f64_or("탑정 조성 x_D", cfg.defaults.x_d)?;
    let x_w = read_f64_or("탑저 조성 x_W", cfg.defaults.x_w)?;

    let (model, warnings) = app::load_equilibrium(&source)?;
    let mut report = app::run_total_reflux(&model, x_d, x_w, cfg.solver.max_stages)?;
    report.warnings.extend(warnings);
    app::print_report(&report, &cfg.display);

    cfg.defaults.x_d = x_d;
    cfg.defaults.x_w = x_w;
    Ok(())
}

/// 유한 환류 메뉴를 처리한다.
pub fn handle_finite_reflux(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 유한 환류 --");
    let source = read_equilibrium_source(cfg)?;
    let q = read_f64_or("진료 열상태 q (포화액=1)", cfg.defaults.q)?;
    let reflux_ratio = read_f64_or("환류비 R", cfg.defaults.reflux_ratio)?;
    let z_f = read_f64_or("진료 조성 z_F", cfg.defaults.z_f)?;
    let x_d = read_f64_or("탑정 조성 x_D", cfg.defaults.x_d)?;
    let x_w = read_f64_or("탑저 조성 x_W", cfg.defaults.x_w)?;
    let reflux = RefluxSpec {
        reflux_ratio,
        q,
        z_f,
    };

    let (model, warnings) = app::load_equilibrium(&source)?;
    let mut report = app::run_finite_reflux(&model, x_d, x_w, reflux, cfg.solver.max_stages)?;
    report.warnings.extend(warnings);
    app::print_report(&report, &cfg.display);

    cfg.defaults.q = q;
    cfg.defaults.reflux_ratio = reflux_ratio;
    cfg.defaults.z_f = z_f;
    cfg.defaults.x_d = x_d;
    cfg.defaults.x_w = x_w;
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 설정 --");
    println!("현재 반복 한도: {}단", cfg.solver.max_stages);
    println!("현재 소수점 자릿수: {}", cfg.display.precision);
    println!(
        "계단 좌표 출력: {}",
        if cfg.display.show_trace { "예" } else { "아니오" }
    );
    println!("1) 반복 한도  2) 소수점 자릿수  3) 계단 좌표 출력 전환");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    match sel.trim() {
        "" => {}
        "1" => match read_usize("새 반복 한도: ")? {
            0 => println!("1 이상이어야 하므로 변경하지 않습니다."),
            n => cfg.solver.max_stages = n,
        },
        "2" => cfg.display.precision = read_usize("새 자릿수: ")?.min(12),
        "3" => cfg.display.show_trace = !cfg.display.show_trace,
        _ => println!("잘못된 입력이므로 변경하지 않습니다."),
    }
    Ok(())
}

fn read_equilibrium_source(cfg: &Config) -> Result<EquilibriumSource, AppError> {
    println!("평형선: 1=상대휘발도(이상계) 2=실측 데이터 파일(비이상계)");
    let sel = read_line("선택: ")?;
    if sel.trim() == "2" {
        let path = read_data_path(&mut io::stdin().lock())?;
        return Ok(EquilibriumSource::DataFile(path));
    }
    let alpha = read_f64_or("상대휘발도 α", cfg.defaults.alpha)?;
    Ok(EquilibriumSource::Ideal { alpha })
}

/// 열 수 있는 파일 경로를 받을 때까지 다시 묻는다.
fn read_data_path<R: BufRead>(input: &mut R) -> Result<PathBuf, AppError> {
    loop {
        let line = read_line_from(input, "데이터 파일 경로: ")?;
        let path = PathBuf::from(line.trim());
        match File::open(&path) {
            Ok(_) => return Ok(path),
            Err(e) => println!("파일을 열 수 없습니다 ({}): {e}", path.display()),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 0바이트를 읽으면(EOF) `InputClosed`를 돌려준다.
fn read_line_from<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

/// 빈 입력이면 기본값을 쓴다.
fn read_f64_or(label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_usize(prompt: &str) -> Result<usize, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<usize>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("0 이상의 정수를 입력하세요."),
        }
    }
}
