//! 손실 가중치와 오차 척도

use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};

use crate::core::config::LossWeightConfig;
use crate::core::error::{BasisError, BasisResult};

/// 그리드 점별 손실 가중치
///
/// 저파수 구간을 증폭한 뒤 합이 그리드 크기가 되도록 재조정한다.
#[derive(Debug, Clone, PartialEq)]
pub struct LossWeights {
    weights: Array1<f64>,
}

impl LossWeights {
    pub fn for_grid(k: ArrayView1<f64>) -> BasisResult<Self> {
        Self::with_config(k, &LossWeightConfig::default())
    }

    pub fn with_config(k: ArrayView1<f64>, config: &LossWeightConfig) -> BasisResult<Self> {
        config.validate()?;
        if k.is_empty() {
            return Err(BasisError::Configuration("loss weights need a non-empty grid".to_string()));
        }
        let raw = k.mapv(|v| {
            if v < config.low_k_threshold {
                config.low_k_boost
            } else {
                1.0
            }
        });
        let scale = k.len() as f64 / raw.sum();
        Ok(Self { weights: raw * scale })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// 가중 평균 제곱 오차 (샘플, 그리드 전체 평균)
    pub fn weighted_mse(
        &self,
        prediction: ArrayView2<f64>,
        truth: ArrayView2<f64>,
    ) -> BasisResult<f64> {
        weighted_mse(self.weights.view(), prediction, truth)
    }
}

fn check_pair(prediction: &ArrayView2<f64>, truth: &ArrayView2<f64>) -> BasisResult<()> {
    if prediction.dim() != truth.dim() {
        return Err(BasisError::ShapeMismatch(format!(
            "prediction has shape {:?} but truth has {:?}",
            prediction.dim(),
            truth.dim()
        )));
    }
    Ok(())
}

/// `k >= k_min`인 열만 사용하는 평균 제곱 오차
pub fn truncated_mse(
    k: ArrayView1<f64>,
    k_min: f64,
    prediction: ArrayView2<f64>,
    truth: ArrayView2<f64>,
) -> BasisResult<f64> {
    check_pair(&prediction, &truth)?;
    if !k_min.is_finite() {
        return Err(BasisError::Domain(format!("k_min must be finite, got {}", k_min)));
    }
    if prediction.ncols() != k.len() {
        return Err(BasisError::ShapeMismatch(format!(
            "prediction has {} columns but grid has {} points",
            prediction.ncols(),
            k.len()
        )));
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for (col, (p, t)) in prediction
        .axis_iter(Axis(1))
        .zip(truth.axis_iter(Axis(1)))
        .enumerate()
    {
        if k[col] < k_min {
            continue;
        }
        Zip::from(&p).and(&t).for_each(|a, b| sum += (a - b) * (a - b));
        count += p.len();
    }

    if count == 0 {
        return Err(BasisError::Domain(format!(
            "no grid point at or above k_min = {}",
            k_min
        )));
    }
    Ok(sum / count as f64)
}

/// 그리드 가중치를 곱한 평균 제곱 오차
pub fn weighted_mse(
    weights: ArrayView1<f64>,
    prediction: ArrayView2<f64>,
    truth: ArrayView2<f64>,
) -> BasisResult<f64> {
    check_pair(&prediction, &truth)?;
    if prediction.ncols() != weights.len() {
        return Err(BasisError::ShapeMismatch(format!(
            "prediction has {} columns but there are {} weights",
            prediction.ncols(),
            weights.len()
        )));
    }
    if prediction.is_empty() {
        return Err(BasisError::Domain("weighted MSE of an empty batch".to_string()));
    }

    let diff = &prediction - &truth;
    let weighted = (&diff * &diff) * &weights;
    Ok(weighted.sum() / weighted.len() as f64)
}
