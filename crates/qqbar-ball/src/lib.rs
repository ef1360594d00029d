//! # qqbar-ball
//!
//! Rigorous numerics for the algebraic-number engine.
//!
//! This crate provides:
//! - Dyadic numbers with directed rounding
//! - Real balls (midpoint-radius intervals) and complex rectangles
//! - π, arctangent, sine, cosine and `n`-th roots with guaranteed
//!   enclosures
//! - Certified isolation of all complex roots of a squarefree integer
//!   polynomial
//!
//! ## Enclosure Semantics
//!
//! Every operation returns a ball that contains the exact result for
//! every choice of inputs in the argument balls. Precision arguments are
//! targets in bits; they control the size of midpoint rounding errors but
//! never affect correctness.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]

pub mod complex;
pub mod dyadic;
mod elementary;
pub mod real;
pub mod roots;

pub use complex::ComplexBall;
pub use dyadic::{Dyadic, Round};
pub use real::RealBall;
pub use roots::isolate_roots;

#[cfg(test)]
mod proptests;
