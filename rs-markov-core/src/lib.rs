//! Character-level Markov text generation.
//!
//! This crate provides:
//! - A fixed-order k-gram frequency model built over a circular text
//! - Weighted discrete sampling with a floating-point rounding guard
//! - Trajectory generation from a seed window, with an injected random source
//!
//! Reading the corpus and printing the result are left to the caller
//! (see the `rs-markov` binary).

/// Model configuration and generation parameters.
pub mod config;

/// Crate-wide error type.
pub mod error;

/// K-gram models and trajectory generation.
pub mod model;

/// Discrete (weighted) sampling.
pub mod sampling;

pub use config::{GenerationConfig, ModelConfig};
pub use error::{MarkovError, Result};
pub use model::alphabet::Alphabet;
pub use model::frequency_model::FrequencyModel;
pub use model::generator::{TrajectoryGenerator, generate};
pub use model::summary::{ContextSummary, ModelSummary};
