//! Shared primitives for the Vireo speech-recognition ecosystem.
//!
//! `vireo-core` provides the foundation the engine crates build on:
//!
//! - **Error types** — [`VireoError`] and [`Result`] for structured error handling
//! - **Log-space arithmetic** — stable log-sum-exp reductions and
//!   epsilon-floored logarithms for probability computations

pub mod error;
pub mod logspace;

pub use error::{Result, VireoError};
