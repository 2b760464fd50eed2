//! 재결합 소스 함수 기저 분해 라이브러리
//!
//! 파수 그리드 위에서 감쇠된 cos/sin 분기와 로그 공간 스플라인 잔차를 계산한다.
//! 계수와 위상은 외부 모델이 공급하며, 이 크레이트는 미분이나 학습을 다루지 않는다.

pub mod core;

// 핵심 모듈들 재수출
pub use crate::core::{
    // 평가기
    BasisEvaluator, SampleBatch, BasisComponents, Component,
    // 구성 및 오류
    EvaluatorConfig, LossWeightConfig, BasisError, BasisResult,
    // 조립
    LossWeights, combine, reduced_output, truncated_mse, weighted_mse,
};
