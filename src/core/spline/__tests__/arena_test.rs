use crate::core::error::BasisError;
use crate::core::spline::*;
use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn log_knots() -> NaturalSplineKnots {
    let x: Array1<f64> = array![1e-4, 1e-3, 5e-3, 2e-2, 0.1, 0.3, 0.6].mapv(f64::ln);
    NaturalSplineKnots::new(x).unwrap()
}

#[test]
fn 아레나_개별_적합_일치_테스트() {
    let knots = log_knots();
    let mut rng = StdRng::seed_from_u64(7);
    let values = Array2::from_shape_fn((5, knots.len()), |_| rng.gen_range(-1.0..1.0));

    let arena = SplineArena::fit(&knots, values.view()).unwrap();
    assert_eq!(arena.len(), 5);

    for b in 0..5 {
        let mut expected = Array1::zeros(knots.len());
        knots.solve_into(values.row(b), expected.view_mut());
        assert_eq!(arena.second_derivatives().row(b), expected);
    }
}

#[test]
fn 아레나_매듭_통과_테스트() {
    let knots = log_knots();
    let mut rng = StdRng::seed_from_u64(11);
    let values = Array2::from_shape_fn((3, knots.len()), |_| rng.gen_range(-5.0..5.0));
    let arena = SplineArena::fit(&knots, values.view()).unwrap();

    for b in 0..3 {
        for (i, &x) in knots.x().iter().enumerate() {
            assert_abs_diff_eq!(arena.value_at(&knots, b, x), values[[b, i]], epsilon = 1e-10);
        }
    }
}

#[test]
fn 상수_제어값_테스트() {
    let knots = log_knots();
    let values = Array2::from_elem((2, knots.len()), 0.25);
    let arena = SplineArena::fit(&knots, values.view()).unwrap();

    for x in Array1::linspace(knots.span().0, knots.span().1, 50).iter() {
        assert_abs_diff_eq!(arena.value_at(&knots, 1, *x), 0.25, epsilon = 1e-12);
    }
}

#[test]
fn 아레나_폭_불일치_테스트() {
    let knots = log_knots();
    let values = Array2::zeros((2, knots.len() + 1));
    assert!(matches!(
        SplineArena::fit(&knots, values.view()),
        Err(BasisError::ShapeMismatch(_))
    ));
}

#[test]
fn 빈_배치_테스트() {
    let knots = log_knots();
    let values = Array2::zeros((0, knots.len()));
    let arena = SplineArena::fit(&knots, values.view()).unwrap();
    assert!(arena.is_empty());
}

#[test]
fn 스텐실_직접평가_일치_테스트() {
    let knots = log_knots();
    let mut rng = StdRng::seed_from_u64(3);
    let values = Array2::from_shape_fn((4, knots.len()), |_| rng.gen_range(-1.0..1.0));
    let arena = SplineArena::fit(&knots, values.view()).unwrap();

    let (lo, hi) = knots.span();
    let mut points = Array1::linspace(lo, hi, 33);
    // linspace 끝점은 hi보다 1 ulp 클 수 있다
    points[32] = hi;
    let stencil = SplineStencil::new(&knots, points.view()).unwrap();
    assert_eq!(stencil.len(), 33);

    for b in 0..4 {
        let mut out = Array1::zeros(33);
        stencil.apply_into(&arena, b, out.view_mut()).unwrap();
        for (i, &x) in points.iter().enumerate() {
            assert_abs_diff_eq!(out[i], arena.value_at(&knots, b, x), epsilon = 1e-14);
        }
    }
}

#[test]
fn 스텐실_범위_밖_거부_테스트() {
    let knots = log_knots();
    let (lo, hi) = knots.span();

    assert!(matches!(
        SplineStencil::new(&knots, array![lo - 1e-3].view()),
        Err(BasisError::Configuration(_))
    ));
    assert!(matches!(
        SplineStencil::new(&knots, array![hi + 1e-3].view()),
        Err(BasisError::Configuration(_))
    ));
    assert!(SplineStencil::new(&knots, array![lo, hi].view()).is_ok());
}

#[test]
fn 스텐실_출력_길이_불일치_테스트() {
    let knots = log_knots();
    let values = Array2::zeros((2, knots.len()));
    let arena = SplineArena::fit(&knots, values.view()).unwrap();
    let (lo, hi) = knots.span();
    let stencil = SplineStencil::new(&knots, array![lo, 0.5 * (lo + hi), hi].view()).unwrap();

    let mut short = Array1::zeros(2);
    assert!(matches!(
        stencil.apply_into(&arena, 0, short.view_mut()),
        Err(BasisError::ShapeMismatch(_))
    ));
    let mut long = Array1::zeros(4);
    assert!(matches!(
        stencil.apply_into(&arena, 0, long.view_mut()),
        Err(BasisError::ShapeMismatch(_))
    ));
    let mut out = Array1::zeros(3);
    assert!(matches!(
        stencil.apply_into(&arena, 2, out.view_mut()),
        Err(BasisError::ShapeMismatch(_))
    ));
    assert!(stencil.apply_into(&arena, 1, out.view_mut()).is_ok());
}
