//! 샘플 배치 입력

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::core::error::{BasisError, BasisResult};

/// 위상 개수 (코사인 3 + 사인 2)
pub const N_PHASES: usize = 5;
/// 계수 개수 (코사인, 사인)
pub const N_COEFFICIENTS: usize = 2;

/// 위상 열 인덱스
pub mod phase {
    pub const COS_OFFSET: usize = 0;
    pub const COS_R_S_SHIFT: usize = 1;
    pub const COS_K2: usize = 2;
    pub const SIN_R_S_SHIFT: usize = 3;
    pub const SIN_K2: usize = 4;
}

/// 한 번의 평가 호출에 전달되는 B개 샘플의 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBatch {
    r_s: Array1<f64>,
    k_d: Array1<f64>,
    delta_k_d: Array1<f64>,
    phases: Array2<f64>,
    coefficients: Array2<f64>,
    spline_values: Array2<f64>,
}

impl SampleBatch {
    /// 배치 차원과 고정 폭을 검사해 생성
    ///
    /// 스플라인 제어값의 폭은 평가기 구성에 따라 달라지므로 평가 시점에 검사한다.
    pub fn new(
        r_s: Array1<f64>,
        k_d: Array1<f64>,
        delta_k_d: Array1<f64>,
        phases: Array2<f64>,
        coefficients: Array2<f64>,
        spline_values: Array2<f64>,
    ) -> BasisResult<Self> {
        let batch = Self {
            r_s,
            k_d,
            delta_k_d,
            phases,
            coefficients,
            spline_values,
        };
        batch.check_shapes()?;
        Ok(batch)
    }

    /// 단일 샘플 배치
    pub fn single(
        r_s: f64,
        k_d: f64,
        delta_k_d: f64,
        phases: [f64; N_PHASES],
        coefficients: [f64; N_COEFFICIENTS],
        spline_values: &[f64],
    ) -> BasisResult<Self> {
        let phases = Array2::from_shape_vec((1, N_PHASES), phases.to_vec())
            .map_err(|e| BasisError::ShapeMismatch(e.to_string()))?;
        let coefficients = Array2::from_shape_vec((1, N_COEFFICIENTS), coefficients.to_vec())
            .map_err(|e| BasisError::ShapeMismatch(e.to_string()))?;
        let spline_values = Array2::from_shape_vec((1, spline_values.len()), spline_values.to_vec())
            .map_err(|e| BasisError::ShapeMismatch(e.to_string()))?;
        Self::new(
            Array1::from_elem(1, r_s),
            Array1::from_elem(1, k_d),
            Array1::from_elem(1, delta_k_d),
            phases,
            coefficients,
            spline_values,
        )
    }

    pub(crate) fn check_shapes(&self) -> BasisResult<()> {
        let b = self.r_s.len();
        let lengths = [
            ("k_d", self.k_d.len()),
            ("delta_k_d", self.delta_k_d.len()),
            ("phases", self.phases.nrows()),
            ("coefficients", self.coefficients.nrows()),
            ("spline_values", self.spline_values.nrows()),
        ];
        for (name, len) in lengths {
            if len != b {
                return Err(BasisError::ShapeMismatch(format!(
                    "{} has batch size {} but r_s has {}",
                    name, len, b
                )));
            }
        }
        if self.phases.ncols() != N_PHASES {
            return Err(BasisError::ShapeMismatch(format!(
                "phases must have {} columns, got {}",
                N_PHASES,
                self.phases.ncols()
            )));
        }
        if self.coefficients.ncols() != N_COEFFICIENTS {
            return Err(BasisError::ShapeMismatch(format!(
                "coefficients must have {} columns, got {}",
                N_COEFFICIENTS,
                self.coefficients.ncols()
            )));
        }
        Ok(())
    }

    /// 0 이하 (또는 NaN) 스케일 검사
    pub(crate) fn check_domain(&self) -> BasisResult<()> {
        if let Some((i, v)) = self.k_d.iter().enumerate().find(|(_, v)| !(**v > 0.0)) {
            return Err(BasisError::Domain(format!(
                "damping scale k_d must be positive, sample {} has {}",
                i, v
            )));
        }
        if let Some((i, v)) = self.r_s.iter().enumerate().find(|(_, v)| !(**v > 0.0)) {
            return Err(BasisError::Domain(format!(
                "propagation distance r_s must be positive, sample {} has {}",
                i, v
            )));
        }
        Ok(())
    }

    /// 샘플 개수
    pub fn len(&self) -> usize {
        self.r_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r_s.is_empty()
    }

    pub fn r_s(&self) -> ArrayView1<f64> {
        self.r_s.view()
    }

    pub fn k_d(&self) -> ArrayView1<f64> {
        self.k_d.view()
    }

    pub fn delta_k_d(&self) -> ArrayView1<f64> {
        self.delta_k_d.view()
    }

    pub fn phases(&self) -> ArrayView2<f64> {
        self.phases.view()
    }

    pub fn coefficients(&self) -> ArrayView2<f64> {
        self.coefficients.view()
    }

    pub fn spline_values(&self) -> ArrayView2<f64> {
        self.spline_values.view()
    }

    /// 샘플 `b`의 위상 행
    pub fn phases_row(&self, b: usize) -> ArrayView1<f64> {
        self.phases.row(b)
    }

    /// 샘플 `b`의 계수 행
    pub fn coefficients_row(&self, b: usize) -> ArrayView1<f64> {
        self.coefficients.row(b)
    }
}
