//! # qqbar-poly
//!
//! Dense univariate polynomial arithmetic for the qqbar workspace.
//!
//! This crate provides:
//! - `DensePoly<R>` over any ring, with Karatsuba multiplication and
//!   composition
//! - Division with remainder over a field
//! - The integer toolkit used for minimal polynomials: content, primitive
//!   part, exact division, pseudo-remainders, primitive PRS gcd, affine
//!   substitution, cyclotomic polynomials and coefficient heights
//!
//! ## Algorithm Selection
//!
//! Multiplication switches from schoolbook to Karatsuba once both
//! operands have at least 32 coefficients.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense;
pub mod integer;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
