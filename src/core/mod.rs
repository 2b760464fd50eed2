//! # 기저 분해 핵심 모듈
//!
//! 재결합 소스 함수 근사를 위한 진동 기저, 감쇠 포락선, 스플라인 잔차

pub mod assembly;
pub mod basis;
pub mod config;
pub mod error;
pub mod math;
pub mod spline;

// 주요 타입들 재수출
pub use assembly::*;
pub use basis::*;
pub use config::{EvaluatorConfig, LossWeightConfig};
pub use error::{BasisError, BasisResult};
pub use math::*;
pub use spline::*;
