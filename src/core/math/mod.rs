pub mod grid;
pub mod normalization;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

// 재수출
pub use grid::*;
pub use normalization::*;
