use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::column::RefluxSpec;
use crate::stepper::DEFAULT_MAX_STAGES;

const CONFIG_PATH: &str = "config.toml";

/// 계단 작도 반복 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// 이 단수를 넘으면 핀치로 보고 중단한다.
    pub max_stages: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_stages: DEFAULT_MAX_STAGES,
        }
    }
}

/// 결과 표시 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 소수점 자릿수
    pub precision: usize,
    /// 계단 좌표표 출력 여부
    pub show_trace: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            precision: 4,
            show_trace: false,
        }
    }
}

/// 대화형 입력의 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultColumn {
    pub alpha: f64,
    pub q: f64,
    pub reflux_ratio: f64,
    pub z_f: f64,
    pub x_d: f64,
    pub x_w: f64,
}

impl Default for DefaultColumn {
    fn default() -> Self {
        Self {
            alpha: 2.5,
            q: 1.0,
            reflux_ratio: 2.0,
            z_f: 0.5,
            x_d: 0.95,
            x_w: 0.05,
        }
    }
}

impl DefaultColumn {
    pub fn reflux(&self) -> RefluxSpec {
        RefluxSpec {
            reflux_ratio: self.reflux_ratio,
            q: self.q,
            z_f: self.z_f,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverSettings,
    pub display: DisplaySettings,
    pub defaults: DefaultColumn,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_from(Path::new(CONFIG_PATH))
}

/// 지정한 경로에서 설정을 로드한다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_or_default_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self, Path::new(CONFIG_PATH))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
