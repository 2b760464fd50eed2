//! 파수 그리드 생성 함수

use ndarray::Array1;

use crate::core::error::{BasisError, BasisResult};

/// 거듭제곱 간격 그리드
///
/// `start^(1/power)`와 `stop^(1/power)` 사이를 선형 분할한 뒤 `power`승 한다.
/// power = 3이면 제어점이 `start` 쪽에 몰린다.
pub fn powerspace(start: f64, stop: f64, power: f64, num: usize) -> BasisResult<Array1<f64>> {
    if !(start >= 0.0 && stop >= 0.0 && start.is_finite() && stop.is_finite()) {
        return Err(BasisError::Configuration(format!(
            "powerspace bounds must be finite and non-negative, got ({}, {})",
            start, stop
        )));
    }
    if !(power.is_finite() && power > 0.0) {
        return Err(BasisError::Configuration(format!(
            "powerspace power must be positive, got {}",
            power
        )));
    }

    let inv = 1.0 / power;
    let lo = start.powf(inv);
    let hi = stop.powf(inv);

    Ok(Array1::linspace(lo, hi, num).mapv(|t| t.powf(power)))
}

/// 로그 균등 그리드 (양 끝점 고정)
pub fn logspace(start: f64, stop: f64, num: usize) -> BasisResult<Array1<f64>> {
    if !(start > 0.0 && stop > start && stop.is_finite()) {
        return Err(BasisError::Configuration(format!(
            "logspace requires 0 < start < stop, got ({}, {})",
            start, stop
        )));
    }
    if num < 2 {
        return Err(BasisError::Configuration(format!(
            "logspace requires at least 2 points, got {}",
            num
        )));
    }

    let mut grid = Array1::linspace(start.ln(), stop.ln(), num).mapv(f64::exp);
    // exp(ln(x))의 반올림 오차 제거
    grid[0] = start;
    grid[num - 1] = stop;
    Ok(grid)
}

/// 그리드가 양수이고 엄격히 증가하는지 검사
pub fn validate_grid(k: &Array1<f64>) -> BasisResult<()> {
    if k.len() < 2 {
        return Err(BasisError::Configuration(format!(
            "wavenumber grid needs at least 2 points, got {}",
            k.len()
        )));
    }
    for (i, &value) in k.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(BasisError::Configuration(format!(
                "wavenumber grid must be positive and finite, k[{}] = {}",
                i, value
            )));
        }
    }
    for i in 1..k.len() {
        if k[i] <= k[i - 1] {
            return Err(BasisError::Configuration(format!(
                "wavenumber grid must be strictly increasing at index {} ({} <= {})",
                i, k[i], k[i - 1]
            )));
        }
    }
    Ok(())
}
