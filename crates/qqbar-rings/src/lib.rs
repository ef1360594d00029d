//! # qqbar-rings
//!
//! Algebraic structure traits for the qqbar workspace.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `EuclideanDomain`, `Field`, `OrderedRing`
//! - Concrete implementations: Z, Q
//!
//! Algebraic numbers implement the same traits in `qqbar-algebraic`,
//! so generic polynomial and matrix code runs over them unchanged.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── CommutativeRing
//!       └── IntegralDomain
//!            └── EuclideanDomain
//!                 └── Field
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integers;
pub mod rationals;
pub mod traits;

pub use integers::Z;
pub use rationals::Q;
pub use traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, OrderedRing, Ring};
