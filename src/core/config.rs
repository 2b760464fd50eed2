//! # 평가기 구성 설정
//!
//! 스플라인 제어점 개수, 스플라인 구간, 손실 가중치 등 생성 시점에 고정되는 값들

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{BasisError, BasisResult};

/// 기본 스플라인 제어점 개수
pub const DEFAULT_SPLINE_POINTS: usize = 12;
/// 스플라인 구간 상한 (k 단위)
pub const DEFAULT_SPLINE_UPPER: f64 = 0.6;
/// 구간 경계를 부동소수점 반올림에서 보호하는 상대 여유
pub const DEFAULT_RANGE_RTOL: f64 = 1e-4;
/// 제어점 분포의 거듭제곱 지수
pub const DEFAULT_SPLINE_POWER: f64 = 3.0;

/// 기저 평가기 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// 스플라인 제어점 개수
    pub n_spline_points: usize,
    /// 스플라인 구간 하한 (None이면 그리드 최솟값)
    pub spline_lower: Option<f64>,
    /// 스플라인 구간 상한
    pub spline_upper: f64,
    /// 제어점 그리드의 상대 여유 ε
    pub range_rtol: f64,
    /// powerspace 지수
    pub spline_power: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            n_spline_points: DEFAULT_SPLINE_POINTS,
            spline_lower: None,
            spline_upper: DEFAULT_SPLINE_UPPER,
            range_rtol: DEFAULT_RANGE_RTOL,
            spline_power: DEFAULT_SPLINE_POWER,
        }
    }
}

impl EvaluatorConfig {
    /// 새 구성 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 제어점 개수 설정
    pub fn with_spline_points(mut self, n: usize) -> Self {
        self.n_spline_points = n;
        self
    }

    /// 스플라인 구간 설정
    pub fn with_spline_range(mut self, lower: f64, upper: f64) -> Self {
        self.spline_lower = Some(lower);
        self.spline_upper = upper;
        self
    }

    /// 스플라인 구간 상한만 설정
    pub fn with_spline_upper(mut self, upper: f64) -> Self {
        self.spline_upper = upper;
        self
    }

    /// 상대 여유 설정
    pub fn with_range_rtol(mut self, rtol: f64) -> Self {
        self.range_rtol = rtol;
        self
    }

    /// 구성 값 검증 (그리드와 무관한 항목만)
    pub fn validate(&self) -> BasisResult<()> {
        if self.n_spline_points < 2 {
            return Err(BasisError::Configuration(format!(
                "at least 2 spline points required, got {}",
                self.n_spline_points
            )));
        }
        if !(self.spline_upper.is_finite() && self.spline_upper > 0.0) {
            return Err(BasisError::Configuration(format!(
                "spline upper bound must be positive, got {}",
                self.spline_upper
            )));
        }
        if let Some(lower) = self.spline_lower {
            if !(lower.is_finite() && lower > 0.0 && lower < self.spline_upper) {
                return Err(BasisError::Configuration(format!(
                    "spline range ({}, {}) is not a positive increasing interval",
                    lower, self.spline_upper
                )));
            }
        }
        if !(self.range_rtol >= 0.0 && self.range_rtol < 1.0) {
            return Err(BasisError::Configuration(format!(
                "range rtol must lie in [0, 1), got {}",
                self.range_rtol
            )));
        }
        if !(self.spline_power.is_finite() && self.spline_power > 0.0) {
            return Err(BasisError::Configuration(format!(
                "spline power must be positive, got {}",
                self.spline_power
            )));
        }
        Ok(())
    }

    /// JSON 문자열에서 구성 로드
    pub fn from_json_str(json: &str) -> BasisResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BasisError::Configuration(format!("invalid evaluator config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// JSON 파일에서 구성 로드
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> BasisResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            BasisError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}

/// 손실 가중치 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossWeightConfig {
    /// 이 값보다 작은 k에 가중치 증폭 적용
    pub low_k_threshold: f64,
    /// 저파수 증폭 배율
    pub low_k_boost: f64,
}

impl Default for LossWeightConfig {
    fn default() -> Self {
        Self {
            low_k_threshold: 5e-3,
            low_k_boost: 10.0,
        }
    }
}

impl LossWeightConfig {
    pub fn validate(&self) -> BasisResult<()> {
        if !self.low_k_threshold.is_finite() {
            return Err(BasisError::Configuration(format!(
                "low-k threshold must be finite, got {}",
                self.low_k_threshold
            )));
        }
        if !(self.low_k_boost.is_finite() && self.low_k_boost > 0.0) {
            return Err(BasisError::Configuration(format!(
                "low-k boost must be positive, got {}",
                self.low_k_boost
            )));
        }
        Ok(())
    }
}
