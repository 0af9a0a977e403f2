//! Top-level module for the k-gram Markov model.
//!
//! This module provides:
//! - The symbol range shared by a model and its predictions (`Alphabet`)
//! - Fixed-order frequency statistics over a circular text (`FrequencyModel`)
//! - Per-k-gram statistics (`Context`, internal)
//! - Trajectory generation by sliding a window over predictions (`TrajectoryGenerator`)

/// Fixed finite symbol range.
pub mod alphabet;

/// Fixed-order k-gram frequency model.
///
/// Handles circular k-gram counting, frequency queries and weighted
/// prediction of the next symbol.
pub mod frequency_model;

/// High-level trajectory generation over a `FrequencyModel`.
pub mod generator;

/// Serializable diagnostic view of a model.
pub mod summary;

/// Occurrence count and follower vector of a single k-gram.
///
/// Not exposed publicly.
mod context;
