//! Recognising algebraic numbers from numeric data, and exact polynomial
//! evaluation.

use log::debug;
use num_traits::Zero;
use qqbar_ball::ComplexBall;
use qqbar_factor::irreducible_factors;
use qqbar_integers::Rational;
use qqbar_linalg::integer_relation;
use qqbar_poly::integer::{height_bits, primitive_part, to_rational_coeffs};
use qqbar_poly::DensePoly;
use qqbar_rings::{Q, Z};

use crate::algebraic::AlgebraicNumber;
use crate::error::Result;
use crate::select::{binary_op, BinaryOp};

/// Cap on the bits handed to the relation search.
const MAX_RELATION_BITS: i64 = 4096;

/// Looks for an algebraic number of degree at most `max_deg` with
/// coefficients of at most `max_bits` bits inside `ball`.
///
/// Best effort: a returned value is proven to be the unique root of its
/// minimal polynomial in `ball`, but `None` does not mean no such number
/// exists.
#[must_use]
pub fn guess(ball: &ComplexBall, max_deg: usize, max_bits: usize) -> Option<AlgebraicNumber> {
    let accuracy = ball.rel_accuracy_bits().clamp(16, MAX_RELATION_BITS);
    // leave slack for the rounding of the powers
    let bits = usize::try_from(accuracy - 8).ok()?;
    let re = ball.re().mid().to_rational();
    let im = ball.im().mid().to_rational();

    let mut powers = vec![(Q(Rational::from_i64(1, 1)), Q(Rational::zero()))];
    for degree in 1..=max_deg {
        let (a, b) = powers[degree - 1].clone();
        powers.push((
            Q(&(&a.0 * &re) - &(&b.0 * &im)),
            Q(&(&a.0 * &im) + &(&b.0 * &re)),
        ));
        let Some(relation) = integer_relation(&powers, bits) else {
            continue;
        };
        let poly = primitive_part(&DensePoly::new(relation.into_iter().map(Z).collect()));
        if poly.degree() == 0 || height_bits(&poly) > max_bits {
            continue;
        }
        for f in irreducible_factors(&poly) {
            if let Ok(x) = AlgebraicNumber::from_enclosure(&f, ball) {
                debug!("recognised a root of {f} at degree {degree}");
                return Some(x);
            }
        }
    }
    None
}

/// Evaluates a rational polynomial at `x` exactly.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn evaluate_poly(p: &DensePoly<Q>, x: &AlgebraicNumber) -> Result<AlgebraicNumber> {
    // x is a root of its minimal polynomial, so only p mod P matters
    let reduced = if p.degree() >= x.degree() && !p.is_zero() {
        p.rem(&to_rational_coeffs(&x.poly))
    } else {
        p.clone()
    };
    let mut acc = AlgebraicNumber::zero();
    for c in reduced.coeffs().iter().rev() {
        acc = binary_op(&acc, x, BinaryOp::Mul)?;
        acc = binary_op(&acc, &AlgebraicNumber::from_rational(&c.0), BinaryOp::Add)?;
    }
    Ok(acc)
}
