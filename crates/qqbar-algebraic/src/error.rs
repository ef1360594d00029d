//! Errors reported by the engine.

use thiserror::Error;

/// Errors from fallible algebraic-number operations.
///
/// Insufficient precision is never reported: every operation retries at
/// higher precision internally and fails only at the configured ceiling.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QqbarError {
    /// A divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A root of index zero was requested.
    #[error("zeroth root")]
    ZeroRoot,

    /// Zero was raised to a negative power.
    #[error("zero raised to a negative power")]
    ZeroToNegativePower,

    /// An exponent was irrational.
    #[error("exponent is not rational")]
    NonRationalExponent,

    /// The zero polynomial has no isolated roots.
    #[error("roots of the zero polynomial")]
    ZeroPolynomial,

    /// A supplied enclosure did not isolate a unique root.
    #[error("enclosure does not isolate a root")]
    InvalidEnclosure,

    /// A polynomial would exceed the configured degree limit.
    #[error("degree {degree} exceeds the limit {limit}")]
    DegreeLimit {
        /// Degree that was needed.
        degree: usize,
        /// Configured limit.
        limit: usize,
    },

    /// An operation reached the precision ceiling or round limit.
    #[error("{operation} did not converge at {prec} bits")]
    NoConvergence {
        /// The operation that gave up.
        operation: &'static str,
        /// Precision reached.
        prec: u32,
    },

    /// A matrix operation needed a square matrix.
    #[error("matrix is not square")]
    DimensionMismatch,
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, QqbarError>;
