//! # Tenor Math
//!
//! Numerical building blocks for the Tenor term-structure toolkit.
//!
//! This crate provides:
//!
//! - **Solvers**: Derivative-free root finding (quasi-Newton, Brent, Bisection, Hybrid)
//! - **Statistics**: Log returns and unbiased sample covariance over row-ordered samples
//! - **Linear Algebra**: Symmetric eigen decomposition with reproducible ordering
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every routine is a pure function of its inputs
//! - **Bounded**: Every iterative routine runs under an explicit iteration budget
//! - **Explicit failure**: Domain problems are reported as [`MathError`], never as NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod linear_algebra;
pub mod solvers;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{symmetric_eigen, EigenDecomposition, EigenOrdering};
    pub use crate::solvers::{
        bisection, brent, hybrid, newton_numerical, SolverConfig, SolverKind, SolverResult,
    };
    pub use crate::statistics::{log_returns, sample_covariance};
}

pub use error::{MathError, MathResult};
