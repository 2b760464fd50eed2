//! # 성분 조립
//!
//! 평가기 출력을 합산하고 기준 곡선과 비교하는 수치 도구

pub mod combine;
pub mod loss;

pub use combine::{combine, reduced_output};
pub use loss::{truncated_mse, weighted_mse, LossWeights};
