//! 진동 기저 함수의 정규화 상수
//!
//! 포락선 `k^n * trig(k r_s) * exp(-(k/k_D)^2)`는 초기 시간 슬라이스에서 최대이고,
//! 그 최댓값은 해석적으로 `k_D^n (n/2)^(n/2) exp(-n/2)`이다.

use crate::core::error::{BasisError, BasisResult};

/// 초기 시간 슬라이스의 특성 감쇠 스케일 k_D
pub const INITIAL_DAMPING_SCALE: f64 = 0.3;

/// n = -1 사인 기저의 경험적 상한. sin(k r_s)/k는 작은 k에서 r_s로 포화된다.
pub const SIN_INVERSE_K_NORM: f64 = 500.0;

/// 사인 분기가 사용하는 거듭제곱
pub const SIN_POWERS: [i32; 4] = [-1, 0, 1, 2];
/// 코사인 분기가 사용하는 거듭제곱
pub const COS_POWERS: [i32; 1] = [0];

/// 코사인 기저 정규화 상수 (n >= 0)
///
/// `0^0 = 1` 규약을 따르므로 `norm_cos(0) == 1.0`이다.
pub fn norm_cos(n: i32) -> BasisResult<f64> {
    if n < 0 {
        return Err(BasisError::Domain(format!(
            "cosine normalization is defined for n >= 0, got {}",
            n
        )));
    }
    let n = n as f64;
    let half = n / 2.0;
    // f64::powf(0.0, 0.0) == 1.0
    Ok(INITIAL_DAMPING_SCALE.powf(n) * half.powf(half) * (-half).exp())
}

/// 사인 기저 정규화 상수
pub fn norm_sin(n: i32) -> BasisResult<f64> {
    if n == -1 {
        Ok(SIN_INVERSE_K_NORM)
    } else {
        norm_cos(n)
    }
}

/// 생성 시점에 미리 계산된 정규화 상수 표
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationTable {
    cos: Vec<(i32, f64)>,
    sin: Vec<(i32, f64)>,
}

impl NormalizationTable {
    /// 기본 거듭제곱 집합에 대한 표 생성
    pub fn new() -> BasisResult<Self> {
        Self::with_powers(&COS_POWERS, &SIN_POWERS)
    }

    /// 지정된 거듭제곱 집합에 대한 표 생성
    pub fn with_powers(cos_powers: &[i32], sin_powers: &[i32]) -> BasisResult<Self> {
        let cos = cos_powers
            .iter()
            .map(|&n| -> BasisResult<(i32, f64)> {
                Ok((n, checked_positive("cos", n, norm_cos(n)?)?))
            })
            .collect::<BasisResult<Vec<_>>>()?;
        let sin = sin_powers
            .iter()
            .map(|&n| -> BasisResult<(i32, f64)> {
                Ok((n, checked_positive("sin", n, norm_sin(n)?)?))
            })
            .collect::<BasisResult<Vec<_>>>()?;
        Ok(Self { cos, sin })
    }

    /// 코사인 정규화 상수 조회
    pub fn cos(&self, n: i32) -> Option<f64> {
        lookup(&self.cos, n)
    }

    /// 사인 정규화 상수 조회
    pub fn sin(&self, n: i32) -> Option<f64> {
        lookup(&self.sin, n)
    }

    pub fn cos_entries(&self) -> &[(i32, f64)] {
        &self.cos
    }

    pub fn sin_entries(&self) -> &[(i32, f64)] {
        &self.sin
    }
}

fn lookup(entries: &[(i32, f64)], n: i32) -> Option<f64> {
    entries.iter().find(|(power, _)| *power == n).map(|(_, value)| *value)
}

fn checked_positive(branch: &str, n: i32, value: f64) -> BasisResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BasisError::Configuration(format!(
            "{} normalization for power {} must be positive, got {}",
            branch, n, value
        )))
    }
}
