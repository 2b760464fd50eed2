//! 성분 합산과 축약 출력

use ndarray::{s, Array1, Array2, ArrayView2};

use crate::core::basis::BasisComponents;
use crate::core::error::{BasisError, BasisResult};

/// 세 성분과 (선택적) 학습된 보정항을 더한 최종 곡선
pub fn combine(
    components: &BasisComponents,
    correction: Option<ArrayView2<f64>>,
) -> BasisResult<Array2<f64>> {
    let mut total = components.sum();
    if let Some(correction) = correction {
        if correction.dim() != total.dim() {
            return Err(BasisError::ShapeMismatch(format!(
                "correction has shape {:?} but components have {:?}",
                correction.dim(),
                total.dim()
            )));
        }
        total += &correction;
    }
    Ok(total)
}

/// `result[:, k_min_idx..] * output_normalization`을 행 우선으로 평탄화
pub fn reduced_output(
    result: ArrayView2<f64>,
    k_min_idx: usize,
    output_normalization: f64,
) -> BasisResult<Array1<f64>> {
    if k_min_idx > result.ncols() {
        return Err(BasisError::ShapeMismatch(format!(
            "k_min index {} exceeds grid size {}",
            k_min_idx,
            result.ncols()
        )));
    }
    let tail = result.slice(s![.., k_min_idx..]);
    Ok(tail.iter().map(|v| v * output_normalization).collect())
}
