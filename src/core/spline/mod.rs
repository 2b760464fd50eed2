//! # 로그 파수 공간의 자연 3차 스플라인

pub mod arena;
pub mod knots;

pub use arena::{SplineArena, SplineStencil};
pub use knots::{CubicWeights, NaturalSplineKnots};

#[cfg(test)]
mod __tests__;
