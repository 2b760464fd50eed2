//! 기저 평가기 오류 타입

use std::error::Error;
use std::fmt;

/// 기저 평가 연산의 오류
#[derive(Debug, Clone, PartialEq)]
pub enum BasisError {
    /// 그리드/스플라인 구간 구성 오류 (생성 시점, 재시도 불가)
    Configuration(String),
    /// 배치 차원 또는 행렬 폭 불일치
    ShapeMismatch(String),
    /// 0 이하의 스케일 등 물리적으로 허용되지 않는 값
    Domain(String),
}

impl fmt::Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            BasisError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            BasisError::Domain(msg) => write!(f, "Domain error: {}", msg),
        }
    }
}

impl Error for BasisError {}

pub type BasisResult<T> = Result<T, BasisError>;
