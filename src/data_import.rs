//! 실측 기액평형 데이터 읽기.
//!
//! 두 가지 형식을 받는다.
//! - 표 형식: 한 행에 `x y` (공백, 탭 또는 쉼표 구분). 빈 줄과 `#` 주석은 건너뛴다.
//! - TOML: `x = [...]`, `y = [...]`

use serde::{Deserialize, Serialize};

use crate::equilibrium::{EmpiricalEquilibrium, EquilibriumModel};
use crate::errors::{DistillationError, DistillationResult};

/// 끝점 검사 허용오차.
const ENDPOINT_TOL: f64 = 1e-9;

/// 파싱만 마친 평형 데이터. 검증은 모델 생성 시 한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl EquilibriumData {
    /// (0,0), (1,1) 끝점 중 빠진 것을 돌려준다.
    pub fn missing_endpoints(&self) -> Vec<(f64, f64)> {
        let has = |px: f64, py: f64| {
            self.x
                .iter()
                .zip(&self.y)
                .any(|(x, y)| (x - px).abs() < ENDPOINT_TOL && (y - py).abs() < ENDPOINT_TOL)
        };
        [(0.0, 0.0), (1.0, 1.0)]
            .into_iter()
            .filter(|&(px, py)| !has(px, py))
            .collect()
    }

    pub fn to_equilibrium(&self) -> DistillationResult<EmpiricalEquilibrium> {
        EmpiricalEquilibrium::new(&self.x, &self.y)
    }

    pub fn into_model(self) -> DistillationResult<EquilibriumModel> {
        Ok(EquilibriumModel::Empirical(self.to_equilibrium()?))
    }
}

/// 표 형식 텍스트를 읽는다.
pub fn parse_table(text: &str) -> DistillationResult<EquilibriumData> {
    let mut data = EquilibriumData::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let fields: Vec<&str> = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() != 2 {
            return Err(DistillationError::DataImport {
                line,
                message: format!("x, y 두 값이 필요합니다 ({}개 발견)", fields.len()),
            });
        }
        let x = parse_number(fields[0], line)?;
        let y = parse_number(fields[1], line)?;
        data.x.push(x);
        data.y.push(y);
    }
    if data.x.is_empty() {
        return Err(DistillationError::DataImport {
            line: 0,
            message: "데이터 행이 없습니다".into(),
        });
    }
    Ok(data)
}

/// TOML 텍스트를 읽는다.
pub fn from_toml(text: &str) -> DistillationResult<EquilibriumData> {
    toml::from_str(text).map_err(|e| DistillationError::DataImport {
        line: 0,
        message: e.to_string(),
    })
}

/// 확장자가 `.toml`이면 TOML, 아니면 표 형식으로 읽는다.
pub fn parse_by_extension(path: &std::path::Path, text: &str) -> DistillationResult<EquilibriumData> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => from_toml(text),
        _ => parse_table(text),
    }
}

fn parse_number(field: &str, line: usize) -> DistillationResult<f64> {
    field.parse::<f64>().map_err(|_| DistillationError::DataImport {
        line,
        message: format!("숫자가 아닙니다: {field}"),
    })
}
