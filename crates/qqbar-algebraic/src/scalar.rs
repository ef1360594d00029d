//! Affine maps `(a·x + b)/c` with rational `a`, `b`, `c`, and the
//! reciprocal.
//!
//! Both are bijections on the roots of the minimal polynomial, so the new
//! minimal polynomial comes from a substitution and only the enclosure
//! needs a fresh uniqueness proof.

use log::debug;
use num_traits::{One, Zero};
use qqbar_ball::ComplexBall;
use qqbar_integers::{Integer, Rational};
use qqbar_poly::integer::{compose_affine, primitive_part};
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::algebraic::AlgebraicNumber;
use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::refine::{refine, validate_uniqueness};

/// Computes `(a·x + b)/c`.
///
/// # Errors
///
/// `DivisionByZero` if `c` is zero; `NoConvergence` at the precision
/// ceiling.
pub fn scalar_op(x: &AlgebraicNumber, a: &Rational, b: &Rational, c: &Rational) -> Result<AlgebraicNumber> {
    if c.is_zero() {
        return Err(QqbarError::DivisionByZero);
    }
    if a.is_zero() {
        return Ok(AlgebraicNumber::from_rational(&(b / c)));
    }
    if let Some(q) = x.to_rational() {
        return Ok(AlgebraicNumber::from_rational(&(&(&(a * &q) + b) / c)));
    }
    if a.is_one() && b.is_zero() && c.is_one() {
        return Ok(x.clone());
    }

    // clear denominators: (A·x + B)/C with integers A, B, C
    let l = a.denominator().lcm(&b.denominator()).lcm(&c.denominator());
    let scale = |q: &Rational| q.numerator() * (&l / &q.denominator());
    let (ai, bi, ci) = (scale(a), scale(b), scale(c));
    let poly = compose_affine(&x.poly, &ai, &bi, &ci);

    let (a_ball, b_ball) = (ComplexBall::from_integer(&ai), ComplexBall::from_integer(&bi));
    let c_ball = ComplexBall::from_integer(&ci);
    transform(x, poly, "affine map", |z, prec| {
        z.mul(&a_ball, prec).add(&b_ball, prec).div(&c_ball, prec)
    })
}

/// Computes `1/x`.
///
/// # Errors
///
/// `DivisionByZero` for zero; `NoConvergence` at the precision ceiling.
pub fn inv(x: &AlgebraicNumber) -> Result<AlgebraicNumber> {
    if x.is_zero() {
        return Err(QqbarError::DivisionByZero);
    }
    if let Some(q) = x.to_rational() {
        return Ok(AlgebraicNumber::from_rational(&q.recip()));
    }
    let poly = primitive_part(&x.poly.reverse());
    transform(x, poly, "reciprocal", |z, prec| ComplexBall::one().div(z, prec))
}

/// Maps the enclosure of `x` through `map` at doubling precision until
/// the image passes a uniqueness proof for `poly`.
fn transform(
    x: &AlgebraicNumber,
    poly: DensePoly<Z>,
    operation: &'static str,
    map: impl Fn(&ComplexBall, u32) -> Option<ComplexBall>,
) -> Result<AlgebraicNumber> {
    let config = QqbarConfig::global();
    let mut prec = config.default_prec;
    loop {
        let z = refine(&x.poly, &x.enclosure, prec)?;
        if let Some(w) = map(&z, prec) {
            if let Some(tight) = validate_uniqueness(&poly, &w, prec) {
                return Ok(AlgebraicNumber::from_parts(poly, tight));
            }
        }
        prec = prec.saturating_mul(2);
        if prec > config.max_prec {
            return Err(QqbarError::NoConvergence { operation, prec });
        }
        debug!("{operation}: raising precision to {prec}");
    }
}

/// `x · 2^k`.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn mul_2exp(x: &AlgebraicNumber, k: i64) -> Result<AlgebraicNumber> {
    let shift = usize::try_from(k.unsigned_abs()).unwrap_or(usize::MAX);
    let power = Rational::from_integer(Integer::power_of_two(shift));
    if k >= 0 {
        scalar_op(x, &power, &Rational::zero(), &Rational::one())
    } else {
        scalar_op(x, &Rational::one(), &Rational::zero(), &power)
    }
}
