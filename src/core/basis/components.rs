//! 평가 결과: 합산되지 않은 세 성분 곡선

use ndarray::{stack, Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::core::error::{BasisError, BasisResult};

/// 성분 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// cos 분기 × coeff0 × 감쇠
    Cosine,
    /// sin 분기 × coeff1 × 감쇠
    Sine,
    /// 스플라인 잔차
    Spline,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Cosine, Component::Sine, Component::Spline];
}

/// B×N_k 성분 곡선 세 개
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisComponents {
    pub cosine: Array2<f64>,
    pub sine: Array2<f64>,
    pub spline: Array2<f64>,
}

impl BasisComponents {
    pub(crate) fn zeros(batch: usize, n_k: usize) -> Self {
        Self {
            cosine: Array2::zeros((batch, n_k)),
            sine: Array2::zeros((batch, n_k)),
            spline: Array2::zeros((batch, n_k)),
        }
    }

    /// (배치 크기, 그리드 크기)
    pub fn dim(&self) -> (usize, usize) {
        self.cosine.dim()
    }

    pub fn get(&self, component: Component) -> &Array2<f64> {
        match component {
            Component::Cosine => &self.cosine,
            Component::Sine => &self.sine,
            Component::Spline => &self.spline,
        }
    }

    /// `[cosine, sine, spline]` 순서의 (3, B, N_k) 스택
    pub fn stack(&self) -> BasisResult<Array3<f64>> {
        stack(
            Axis(0),
            &[self.cosine.view(), self.sine.view(), self.spline.view()],
        )
        .map_err(|e| BasisError::ShapeMismatch(e.to_string()))
    }

    /// 성분 합 (B×N_k)
    pub fn sum(&self) -> Array2<f64> {
        &self.cosine + &self.sine + &self.spline
    }
}
