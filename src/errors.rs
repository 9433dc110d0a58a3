use thiserror::Error;

/// 단수 계산 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistillationError {
    /// 정의역을 벗어난 스칼라 입력
    #[error("잘못된 입력 {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// 실측 평형 데이터 오류 (길이 불일치, 단조 증가 위반 등)
    #[error("평형 데이터 오류: {0}")]
    InvalidEquilibriumData(String),
    /// 정류 조작선과 q선이 평행하거나 교점이 유효 구간 밖에 있음
    #[error("조작선 교점을 정할 수 없습니다: {0}")]
    DegenerateGeometry(String),
    /// 평형 역함수 분모가 0에 가까움
    #[error("평형 역함수 계산 중 수치 발산 (y = {y})")]
    NumericOverflow { y: f64 },
    /// 계단 작도가 반복 한도를 넘음 (핀치 또는 비단조 평형선)
    #[error("{limit}단을 넘도록 x_W에 도달하지 못했습니다 (마지막 x = {last_x})")]
    StageLimitExceeded { limit: usize, last_x: f64 },
    /// 평형 데이터 파일 파싱 오류
    #[error("데이터 파일 {line}행: {message}")]
    DataImport { line: usize, message: String },
}

/// Convenience type for `Result<T, DistillationError>`.
pub type DistillationResult<T> = Result<T, DistillationError>;

/// 값이 열린 구간 (0, 1)에 있는 몰분율인지 검사한다.
pub(crate) fn check_fraction(name: &'static str, value: f64) -> DistillationResult<f64> {
    if !value.is_finite() {
        return Err(DistillationError::InvalidParameter {
            name,
            value,
            reason: "유한한 값이어야 합니다",
        });
    }
    if value <= 0.0 || value >= 1.0 {
        return Err(DistillationError::InvalidParameter {
            name,
            value,
            reason: "0과 1 사이(양 끝 제외)여야 합니다",
        });
    }
    Ok(value)
}

/// 값이 유한한 양수인지 검사한다.
pub(crate) fn check_positive(name: &'static str, value: f64) -> DistillationResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DistillationError::InvalidParameter {
            name,
            value,
            reason: "0보다 큰 유한한 값이어야 합니다",
        });
    }
    Ok(value)
}
