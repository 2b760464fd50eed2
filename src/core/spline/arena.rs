//! 샘플별 스플라인 아레나
//!
//! 배치의 모든 샘플 스플라인을 두 개의 연속 B×n 배열(제어값, 2계 도함수)에 담는다.
//! 샘플마다 스플라인 객체를 만들지 않고 행 인덱스로 접근한다.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use super::knots::NaturalSplineKnots;
use crate::core::error::{BasisError, BasisResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SplineArena {
    values: Array2<f64>,
    second_derivatives: Array2<f64>,
}

impl SplineArena {
    /// 공유 매듭에 대해 B×n 제어값 행렬을 적합
    pub fn fit(knots: &NaturalSplineKnots, values: ArrayView2<f64>) -> BasisResult<Self> {
        if values.ncols() != knots.len() {
            return Err(BasisError::ShapeMismatch(format!(
                "spline values have {} columns but there are {} knots",
                values.ncols(),
                knots.len()
            )));
        }

        let values = values.to_owned();
        let mut second_derivatives = Array2::zeros(values.raw_dim());

        second_derivatives
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(values.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(m, y)| knots.solve_into(y, m));

        Ok(Self {
            values,
            second_derivatives,
        })
    }

    /// 샘플 개수
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn second_derivatives(&self) -> &Array2<f64> {
        &self.second_derivatives
    }

    /// 한 샘플의 (제어값, 2계 도함수) 행
    pub fn row(&self, sample: usize) -> (ArrayView1<f64>, ArrayView1<f64>) {
        (
            self.values.row(sample),
            self.second_derivatives.row(sample),
        )
    }

    /// 한 샘플 스플라인을 임의의 점에서 평가
    pub fn value_at(&self, knots: &NaturalSplineKnots, sample: usize, x: f64) -> f64 {
        let (y, m) = self.row(sample);
        knots.weights(knots.interval(x), x).apply(&y, &m)
    }
}

/// 고정된 평가점 집합에 대한 보간 계획
#[derive(Debug, Clone, PartialEq)]
pub struct SplineStencil {
    weights: Vec<super::knots::CubicWeights>,
}

impl SplineStencil {
    /// 평가점이 모두 매듭 범위 안에 있어야 한다
    pub fn new(knots: &NaturalSplineKnots, points: ArrayView1<f64>) -> BasisResult<Self> {
        let (lo, hi) = knots.span();
        let weights = points
            .iter()
            .map(|&x| {
                if x < lo || x > hi || x.is_nan() {
                    return Err(BasisError::Configuration(format!(
                        "spline evaluation point {} lies outside knot span [{}, {}]",
                        x, lo, hi
                    )));
                }
                Ok(knots.weights(knots.interval(x), x))
            })
            .collect::<BasisResult<Vec<_>>>()?;
        Ok(Self { weights })
    }

    /// 평가점 개수
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// 아레나의 한 행을 평가해 `out`에 기록
    ///
    /// `out` 길이는 평가점 개수와 같아야 한다.
    pub fn apply_into(
        &self,
        arena: &SplineArena,
        sample: usize,
        mut out: ArrayViewMut1<f64>,
    ) -> BasisResult<()> {
        if out.len() != self.weights.len() {
            return Err(BasisError::ShapeMismatch(format!(
                "stencil has {} points but output slot has {}",
                self.weights.len(),
                out.len()
            )));
        }
        if sample >= arena.len() {
            return Err(BasisError::ShapeMismatch(format!(
                "sample {} out of range for arena of {} samples",
                sample,
                arena.len()
            )));
        }
        let (y, m) = arena.row(sample);
        for (slot, w) in out.iter_mut().zip(&self.weights) {
            *slot = w.apply(&y, &m);
        }
        Ok(())
    }
}
