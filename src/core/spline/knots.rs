//! 자연 3차 스플라인 매듭과 삼중대각 분해
//!
//! 자연 경계조건(M_0 = M_{n-1} = 0)에서 2계 도함수 M_i는
//! ```text
//! h_{i-1} M_{i-1} + 2(h_{i-1} + h_i) M_i + h_i M_{i+1}
//!     = 6 [ (y_{i+1} - y_i)/h_i - (y_i - y_{i-1})/h_{i-1} ]
//! ```
//! 를 만족한다. 좌변 행렬은 매듭에만 의존하므로 Thomas 분해를 한 번만 계산하고
//! 샘플마다 우변 소거만 수행한다.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

use crate::core::error::{BasisError, BasisResult};

/// 공유 매듭 + 미리 계산된 Thomas 분해
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalSplineKnots {
    x: Array1<f64>,
    /// 구간 폭 h_i
    h: Array1<f64>,
    /// 내부 행 j의 하부 대각 원소
    sub: Vec<f64>,
    /// 소거 후 상부 대각 c'_j
    upper: Vec<f64>,
    /// 소거 후 피벗
    pivot: Vec<f64>,
}

impl NaturalSplineKnots {
    /// 엄격히 증가하는 매듭으로 생성
    pub fn new(x: Array1<f64>) -> BasisResult<Self> {
        let n = x.len();
        if n < 2 {
            return Err(BasisError::Configuration(format!(
                "natural spline needs at least 2 knots, got {}",
                n
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(BasisError::Configuration("spline knots must be finite".to_string()));
        }
        let h: Array1<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
        if let Some(i) = h.iter().position(|&d| d <= 0.0) {
            return Err(BasisError::Configuration(format!(
                "spline knots must be strictly increasing at index {}",
                i + 1
            )));
        }

        // 내부 미지수 m = n - 2개
        let m = n.saturating_sub(2);
        let mut sub = Vec::with_capacity(m);
        let mut upper = Vec::with_capacity(m);
        let mut pivot = Vec::with_capacity(m);
        for j in 0..m {
            let a = h[j];
            let b = 2.0 * (h[j] + h[j + 1]);
            let c = h[j + 1];
            let p = if j == 0 { b } else { b - a * upper[j - 1] };
            sub.push(a);
            pivot.push(p);
            upper.push(c / p);
        }

        Ok(Self { x, h, sub, upper, pivot })
    }

    /// 매듭 개수
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// 매듭 좌표
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// 매듭 범위
    pub fn span(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// 한 샘플의 2계 도함수를 `out`에 기록 (할당 없음)
    ///
    /// `out`의 내부 원소를 소거 중간값 저장소로 재사용한다.
    pub fn solve_into(&self, y: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
        let n = self.x.len();
        debug_assert_eq!(y.len(), n);
        debug_assert_eq!(out.len(), n);

        out[0] = 0.0;
        out[n - 1] = 0.0;

        let m = n.saturating_sub(2);
        // 전진 소거: out[j + 1] = d'_j
        for j in 0..m {
            let i = j + 1;
            let rhs = 6.0
                * ((y[i + 1] - y[i]) / self.h[i] - (y[i] - y[i - 1]) / self.h[i - 1]);
            let prev = if j == 0 { 0.0 } else { out[i - 1] };
            out[i] = (rhs - self.sub[j] * prev) / self.pivot[j];
        }
        // 후진 대입
        for j in (0..m.saturating_sub(1)).rev() {
            let i = j + 1;
            out[i] -= self.upper[j] * out[i + 1];
        }
    }

    /// `x`를 포함하는 구간의 왼쪽 매듭 인덱스 (바깥이면 양 끝 구간)
    pub fn interval(&self, x: f64) -> usize {
        let n = self.x.len();
        match self.x.as_slice().map(|s| s.partition_point(|&v| v <= x)) {
            Some(0) => 0,
            Some(i) if i >= n => n - 2,
            Some(i) => i - 1,
            None => {
                let i = self.x.iter().take_while(|&&v| v <= x).count();
                i.clamp(1, n - 1) - 1
            }
        }
    }

    /// 구간 `lo`에서의 3차 가중치 (A, B, (A³-A)h²/6, (B³-B)h²/6)
    pub fn weights(&self, lo: usize, x: f64) -> CubicWeights {
        let h = self.h[lo];
        let a = (self.x[lo + 1] - x) / h;
        let b = (x - self.x[lo]) / h;
        let h2 = h * h / 6.0;
        CubicWeights {
            lo,
            a,
            b,
            a_curv: (a * a * a - a) * h2,
            b_curv: (b * b * b - b) * h2,
        }
    }
}

/// 한 평가점에서의 3차 보간 가중치
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicWeights {
    pub lo: usize,
    pub a: f64,
    pub b: f64,
    pub a_curv: f64,
    pub b_curv: f64,
}

impl CubicWeights {
    /// 제어값 y와 2계 도함수 m에 적용
    #[inline(always)]
    pub fn apply(&self, y: &ArrayView1<f64>, m: &ArrayView1<f64>) -> f64 {
        let hi = self.lo + 1;
        self.a * y[self.lo] + self.b * y[hi] + self.a_curv * m[self.lo] + self.b_curv * m[hi]
    }
}
