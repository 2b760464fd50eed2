use crate::core::error::BasisError;
use crate::core::math::normalization::*;
use approx::assert_relative_eq;

#[test]
fn norm_cos_영차_테스트() {
    // 0.3^0 * 0^0 * exp(0) = 1 (0^0 = 1 규약)
    assert_eq!(norm_cos(0).unwrap(), 1.0);
}

#[test]
fn norm_cos_양수_테스트() {
    for n in 0..20 {
        let value = norm_cos(n).unwrap();
        assert!(value > 0.0 && value.is_finite(), "norm_cos({}) = {}", n, value);
    }
}

#[test]
fn norm_cos_해석적_값_테스트() {
    // n = 2: 0.09 * 1 * e^-1
    assert_relative_eq!(norm_cos(2).unwrap(), 0.09 * (-1.0f64).exp(), max_relative = 1e-14);
    // n = 1: 0.3 * sqrt(0.5) * e^-0.5
    assert_relative_eq!(
        norm_cos(1).unwrap(),
        0.3 * 0.5f64.sqrt() * (-0.5f64).exp(),
        max_relative = 1e-14
    );
}

#[test]
fn norm_cos_음수_거부_테스트() {
    assert!(matches!(norm_cos(-1), Err(BasisError::Domain(_))));
}

#[test]
fn norm_sin_특수값_테스트() {
    assert_eq!(norm_sin(-1).unwrap(), 500.0);
    for n in 0..10 {
        assert_eq!(norm_sin(n), norm_cos(n));
    }
    assert_eq!(norm_sin(-2), norm_cos(-2));
}

#[test]
fn 정규화_표_테스트() {
    let table = NormalizationTable::new().unwrap();

    assert_eq!(table.cos(0), Some(1.0));
    assert_eq!(table.cos(1), None);
    assert_eq!(table.sin(-1), Some(500.0));
    for &n in &[0, 1, 2] {
        assert_eq!(table.sin(n), norm_cos(n).ok());
    }
    assert!(table.sin_entries().iter().all(|(_, v)| *v > 0.0));
}

#[test]
fn 정규화_표_결정성_테스트() {
    let a = NormalizationTable::new().unwrap();
    let b = NormalizationTable::new().unwrap();
    assert_eq!(a, b);
}

#[test]
fn 정규화_표_음수_코사인_거부_테스트() {
    assert!(NormalizationTable::with_powers(&[-1], &[0]).is_err());
}
