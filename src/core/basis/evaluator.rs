//! # 기저 분해 평가기
//!
//! 파수 그리드 k 위에서 세 개의 후보 곡선을 만든다.
//!
//! ```text
//! cos 분기:  cos(φ0 + k r_s (1+φ1) + k² φ2) / N_cos(0)
//! sin 분기:  sin(k r_s (1+φ3) + k² φ4) / (k r_s N_cos(0))
//! 감쇠:      exp(-(k/k_D)² (1+δk_D)²)
//! 스플라인:  log k 공간의 자연 3차 스플라인, [k_lo, k_hi] 밖에서는 0
//! ```
//!
//! 생성 후에는 불변이므로 여러 스레드에서 잠금 없이 공유할 수 있다.

use std::ops::Range;

use log::{debug, trace};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};
use rayon::prelude::*;

use super::batch::{phase, SampleBatch};
use super::components::BasisComponents;
use crate::core::config::EvaluatorConfig;
use crate::core::error::{BasisError, BasisResult};
use crate::core::math::{powerspace, validate_grid, NormalizationTable};
use crate::core::spline::{NaturalSplineKnots, SplineArena, SplineStencil};

/// sinc 테일러 전개로 전환하는 인자 크기
const SINC_SERIES_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct BasisEvaluator {
    k: Array1<f64>,
    config: EvaluatorConfig,
    spline_range: (f64, f64),
    k_spline: Array1<f64>,
    knots: NaturalSplineKnots,
    norms: NormalizationTable,
    cos_norm: f64,
    spline_columns: Range<usize>,
    stencil: SplineStencil,
}

impl BasisEvaluator {
    /// 기본 구성(제어점 12개, 상한 0.6)으로 생성
    pub fn with_defaults(k: Array1<f64>) -> BasisResult<Self> {
        Self::new(k, EvaluatorConfig::default())
    }

    pub fn new(k: Array1<f64>, config: EvaluatorConfig) -> BasisResult<Self> {
        config.validate()?;
        validate_grid(&k)?;

        let k_min = k[0];
        let k_max = k[k.len() - 1];
        let lo = config.spline_lower.unwrap_or(k_min);
        let hi = config.spline_upper;
        if lo >= hi {
            return Err(BasisError::Configuration(format!(
                "spline range ({}, {}) is empty",
                lo, hi
            )));
        }
        if lo < k_min || lo > k_max {
            return Err(BasisError::Configuration(format!(
                "spline lower bound {} lies outside grid [{}, {}]",
                lo, k_min, k_max
            )));
        }

        let rtol = config.range_rtol;
        let k_spline = powerspace(
            (1.0 - rtol) * lo,
            (1.0 + rtol) * hi,
            config.spline_power,
            config.n_spline_points,
        )?;
        let first = k_spline[0];
        let last = k_spline[k_spline.len() - 1];
        if !(first <= lo && last >= hi) {
            return Err(BasisError::Configuration(format!(
                "spline grid [{}, {}] does not bracket range [{}, {}]",
                first, last, lo, hi
            )));
        }
        let knots = NaturalSplineKnots::new(k_spline.mapv(f64::ln))?;

        let norms = NormalizationTable::new()?;
        let cos_norm = norms.cos(0).ok_or_else(|| {
            BasisError::Configuration("cosine normalization for power 0 missing".to_string())
        })?;

        // k는 증가하므로 마스크는 연속 구간
        let start = k.iter().take_while(|&&v| v < lo).count();
        let end = k.iter().take_while(|&&v| v <= hi).count().max(start);
        let spline_columns = start..end;
        let log_k_masked = k.slice(s![spline_columns.clone()]).mapv(f64::ln);
        let stencil = SplineStencil::new(&knots, log_k_masked.view())?;

        debug!(
            "basis evaluator: {} grid points in [{:.3e}, {:.3e}], spline range [{:.3e}, {:.3e}] covers columns {:?}",
            k.len(),
            k_min,
            k_max,
            lo,
            hi,
            spline_columns
        );
        debug!("spline control grid: {:?}", k_spline.as_slice());

        Ok(Self {
            k,
            config,
            spline_range: (lo, hi),
            k_spline,
            knots,
            norms,
            cos_norm,
            spline_columns,
            stencil,
        })
    }

    /// 배치 평가. 세 성분을 합산하지 않고 반환한다.
    pub fn evaluate(&self, batch: &SampleBatch) -> BasisResult<BasisComponents> {
        batch.check_shapes()?;
        if batch.spline_values().ncols() != self.knots.len() {
            return Err(BasisError::ShapeMismatch(format!(
                "spline_values must have {} columns, got {}",
                self.knots.len(),
                batch.spline_values().ncols()
            )));
        }
        batch.check_domain()?;

        let arena = SplineArena::fit(&self.knots, batch.spline_values())?;
        let mut out = BasisComponents::zeros(batch.len(), self.k.len());
        let BasisComponents {
            cosine,
            sine,
            spline,
        } = &mut out;

        cosine
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(sine.axis_iter_mut(Axis(0)))
            .zip(spline.axis_iter_mut(Axis(0)))
            .enumerate()
            .try_for_each(|(b, ((cos_row, sin_row), spline_row))| -> BasisResult<()> {
                self.evaluate_branches(batch, b, cos_row, sin_row);
                self.stencil.apply_into(
                    &arena,
                    b,
                    spline_row.slice_move(s![self.spline_columns.clone()]),
                )
            })?;

        trace!("evaluated {} samples on {} grid points", batch.len(), self.k.len());
        Ok(out)
    }

    /// 한 샘플의 cos/sin 분기 (계수와 감쇠 포함)
    fn evaluate_branches(
        &self,
        batch: &SampleBatch,
        b: usize,
        cos_row: ArrayViewMut1<f64>,
        sin_row: ArrayViewMut1<f64>,
    ) {
        let r_s = batch.r_s()[b];
        let k_d = batch.k_d()[b];
        let delta = batch.delta_k_d()[b];
        let phases = batch.phases_row(b);
        let coefficients = batch.coefficients_row(b);

        let phi0 = phases[phase::COS_OFFSET];
        let phi1 = phases[phase::COS_R_S_SHIFT];
        let phi2 = phases[phase::COS_K2];
        let phi3 = phases[phase::SIN_R_S_SHIFT];
        let phi4 = phases[phase::SIN_K2];
        let c_cos = coefficients[0];
        let c_sin = coefficients[1];

        Zip::from(cos_row)
            .and(sin_row)
            .and(&self.k)
            .for_each(|c, s, &k| {
                let kr = k * r_s;
                let k2 = k * k;
                let envelope = damping(k, k_d, delta);

                let arg_cos = phi0 + kr * (1.0 + phi1) + k2 * phi2;
                *c = arg_cos.cos() / self.cos_norm * c_cos * envelope;

                // sin(arg)/(k r_s) = sinc(arg) * arg/(k r_s)
                let arg_sin = kr * (1.0 + phi3) + k2 * phi4;
                let ratio = (1.0 + phi3) + k * phi4 / r_s;
                *s = sinc(arg_sin) * ratio / self.cos_norm * c_sin * envelope;
            });
    }

    /// 파수 그리드
    pub fn grid(&self) -> &Array1<f64> {
        &self.k
    }

    /// 스플라인 제어점 (k 단위)
    pub fn spline_grid(&self) -> &Array1<f64> {
        &self.k_spline
    }

    /// 스플라인 매듭 (log k)
    pub fn spline_knots(&self) -> &NaturalSplineKnots {
        &self.knots
    }

    /// 공칭 스플라인 구간 (k_lo, k_hi)
    pub fn spline_range(&self) -> (f64, f64) {
        self.spline_range
    }

    /// 스플라인 잔차가 0이 아닐 수 있는 그리드 열 구간
    pub fn spline_columns(&self) -> Range<usize> {
        self.spline_columns.clone()
    }

    pub fn n_spline_points(&self) -> usize {
        self.knots.len()
    }

    pub fn normalization(&self) -> &NormalizationTable {
        &self.norms
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// 이 평가기의 그리드에 대한 감쇠 포락선
    pub fn damping_envelope(
        &self,
        k_d: ArrayView1<f64>,
        delta_k_d: ArrayView1<f64>,
    ) -> BasisResult<Array2<f64>> {
        damping_envelope(self.k.view(), k_d, delta_k_d)
    }
}

/// 감쇠 포락선 `exp(-(k/k_d)² (1+δ)²)` (B×N_k)
pub fn damping_envelope(
    k: ArrayView1<f64>,
    k_d: ArrayView1<f64>,
    delta_k_d: ArrayView1<f64>,
) -> BasisResult<Array2<f64>> {
    if k_d.len() != delta_k_d.len() {
        return Err(BasisError::ShapeMismatch(format!(
            "k_d has batch size {} but delta_k_d has {}",
            k_d.len(),
            delta_k_d.len()
        )));
    }
    if let Some(v) = k_d.iter().find(|v| !(**v > 0.0)) {
        return Err(BasisError::Domain(format!(
            "damping scale k_d must be positive, got {}",
            v
        )));
    }

    Ok(Array2::from_shape_fn((k_d.len(), k.len()), |(b, i)| {
        damping(k[i], k_d[b], delta_k_d[b])
    }))
}

#[inline(always)]
fn damping(k: f64, k_d: f64, delta: f64) -> f64 {
    // (k/k_d)(1+δ)를 먼저 곱해 k_d -> 0, δ = -1에서 inf * 0을 피한다
    let scaled = k * (1.0 + delta) / k_d;
    (-(scaled * scaled)).exp()
}

#[inline(always)]
fn sinc(x: f64) -> f64 {
    if x.abs() < SINC_SERIES_THRESHOLD {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}
