//! # qqbar-algebraic
//!
//! Exact arithmetic on the field of algebraic numbers.
//!
//! An [`AlgebraicNumber`] is a minimal polynomial together with a complex
//! box isolating one of its roots. Every operation returns a value in the
//! same canonical form, proven correct by interval Newton iteration.
//!
//! This crate provides:
//! - Construction from rationals, real/imaginary pairs, roots of unity,
//!   user-supplied enclosures, polynomial roots and matrix eigenvalues
//! - Field arithmetic through composed polynomials and root selection
//! - Exact comparison of real parts, imaginary parts and magnitudes
//! - Powers, principal roots and root-of-unity detection
//! - Recognition of algebraic numbers from numeric enclosures
//!
//! ## Example
//!
//! ```rust,ignore
//! use qqbar_algebraic::AlgebraicNumber;
//! use qqbar_integers::Rational;
//!
//! let r2 = AlgebraicNumber::sqrt(&Rational::from_i64(2, 1))?;
//! let s = &r2 + &r2;
//! assert_eq!(s.poly().to_string(), "x^2 - 8");
//! ```
//!
//! ## Precision
//!
//! Working precision is internal. Operations start at
//! [`QqbarConfig::default_prec`] and double until the answer is proven;
//! they fail with [`QqbarError::NoConvergence`] only past
//! [`QqbarConfig::max_prec`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]

pub mod algebraic;
pub mod compare;
pub mod composed;
pub mod config;
pub mod error;
pub mod guess;
mod ops;
mod pow;
pub mod refine;
pub mod roots;
pub mod scalar;
pub mod select;
mod unary;

pub use algebraic::AlgebraicNumber;
pub use compare::{
    compare_abs_imag, compare_abs_real, compare_imag, compare_magnitude, compare_real, equal, sgn_im, sgn_re,
};
pub use composed::{composed_op, power_poly, power_sums};
pub use config::QqbarConfig;
pub use error::{QqbarError, Result};
pub use guess::{evaluate_poly, guess};
pub use refine::{refine, validate_existence_and_uniqueness, validate_uniqueness};
pub use roots::{eigenvalues, roots, roots_batch};
pub use scalar::scalar_op;
pub use select::{binary_op, BinaryOp};

#[cfg(test)]
mod proptests;
