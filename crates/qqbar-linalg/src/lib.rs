//! # qqbar-linalg
//!
//! Exact linear algebra for the algebraic-number engine.
//!
//! This crate provides:
//! - Dense row-major matrices over any ring
//! - Characteristic polynomials (Faddeev–LeVerrier)
//! - LLL reduction of rational lattice bases
//! - Integer-relation search on numerical approximations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod charpoly;
pub mod dense_matrix;
pub mod lll;
pub mod relation;

pub use charpoly::charpoly;
pub use dense_matrix::DenseMatrix;
pub use lll::{lll_reduce, LllResult};
pub use relation::integer_relation;

#[cfg(test)]
mod proptests;
