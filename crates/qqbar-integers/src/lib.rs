//! # qqbar-integers
//!
//! Arbitrary precision integer and rational arithmetic for the qqbar engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) with floor division,
//!   power-of-two scaling and exact integer roots
//! - Arbitrary precision rationals (`Rational`) with floor/ceiling and
//!   exact rational roots
//!
//! Both types are exact: every operation either returns the mathematically
//! correct value or panics on a domain error (division by zero).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
