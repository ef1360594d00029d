//! Truncated power series for the qqbar workspace.
//!
//! This crate provides:
//! - [`PowerSeries`]: a series over a field, truncated to a fixed number
//!   of terms, with exact ring operations
//! - Reciprocal, derivative, integral and exponential
//! - Hadamard (coefficient-wise) product and the Borel transform pair
//!
//! # Key algorithms
//!
//! - Reciprocal: coefficient recurrence from `f·g = 1`
//! - Exponential: coefficient recurrence from `g' = f'·g`
//!
//! All operations are exact; the truncation order of a result is the
//! smaller order of its operands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ops;
pub mod power_series;

#[cfg(test)]
mod proptests;

pub use power_series::PowerSeries;
