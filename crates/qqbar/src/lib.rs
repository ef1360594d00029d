//! # qqbar
//!
//! Exact computation in the field of algebraic numbers.
//!
//! Each number is stored as its minimal polynomial over the integers and a
//! complex ball that isolates one root. Arithmetic, comparison and root
//! extraction always return that canonical form, and every numeric step is
//! certified with ball arithmetic.
//!
//! ## Crates
//!
//! - [`integers`]: arbitrary-precision integers and rationals
//! - [`rings`]: ring and field traits with the `Z` and `Q` wrappers
//! - [`poly`]: dense univariate polynomials
//! - [`series`]: truncated power series
//! - [`factor`]: squarefree decomposition and factorisation over `Z`
//! - [`linalg`]: exact matrices, characteristic polynomials and LLL
//! - [`ball`]: real and complex ball arithmetic, root isolation
//! - [`algebraic`]: the algebraic number engine
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use qqbar::prelude::*;
//!
//! let r2 = AlgebraicNumber::sqrt(&Rational::from_i64(2, 1))?;
//! let r3 = AlgebraicNumber::sqrt(&Rational::from_i64(3, 1))?;
//! let s = &r2 + &r3;
//! assert_eq!(s.poly().to_string(), "x^4 - 10*x^2 + 1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use qqbar_algebraic as algebraic;
pub use qqbar_ball as ball;
pub use qqbar_factor as factor;
pub use qqbar_integers as integers;
pub use qqbar_linalg as linalg;
pub use qqbar_poly as poly;
pub use qqbar_rings as rings;
pub use qqbar_series as series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use qqbar_algebraic::{
        compare_abs_imag, compare_abs_real, compare_imag, compare_magnitude, compare_real, eigenvalues, guess,
        roots, AlgebraicNumber, BinaryOp, QqbarConfig, QqbarError,
    };
    pub use qqbar_ball::{ComplexBall, RealBall};
    pub use qqbar_integers::{Integer, Rational};
    pub use qqbar_linalg::DenseMatrix;
    pub use qqbar_poly::DensePoly;
    pub use qqbar_rings::{Field, Ring, Q, Z};
}
