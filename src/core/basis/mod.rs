pub mod batch;
pub mod components;
pub mod evaluator;

pub use batch::{SampleBatch, N_COEFFICIENTS, N_PHASES};
pub use components::{BasisComponents, Component};
pub use evaluator::{damping_envelope, BasisEvaluator};
