//! Enclosure refinement and uniqueness proofs.
//!
//! All proofs use the interval Newton operator
//! `N(B) = m − P(m) / P'(B)` with `m` the midpoint of the box `B`. Every
//! root of `P` in `B` lies in `N(B)`; if `N(B) ⊆ B` then `B` holds exactly
//! one root. Boxes with an exactly zero imaginary part are real segments,
//! and the proof then speaks about real roots on the segment.

use log::{debug, trace};
use qqbar_ball::{isolate_roots, ComplexBall, Dyadic, RealBall};
use qqbar_integers::Rational;
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};

/// Returns true if `z` carries at least `prec` correct bits.
pub(crate) fn is_accurate(z: &ComplexBall, prec: u32) -> bool {
    z.rel_accuracy_bits() >= i64::from(prec)
}

/// The root `−p₀/p₁` of a linear polynomial.
pub(crate) fn rational_root(poly: &DensePoly<Z>) -> Rational {
    Rational::new(-poly.coeff(0).0, poly.coeff(1).0)
}

/// A real ball around a rational.
pub(crate) fn rational_ball(q: &Rational, prec: u32) -> ComplexBall {
    ComplexBall::from_real(RealBall::from_rational(q, prec))
}

fn midpoint(z: &ComplexBall) -> ComplexBall {
    ComplexBall::new(
        RealBall::exact(z.re().mid().clone()),
        RealBall::exact(z.im().mid().clone()),
    )
}

/// Intersection of two boxes, or `None` if they are disjoint.
pub(crate) fn intersect(a: &ComplexBall, b: &ComplexBall) -> Option<ComplexBall> {
    let re = a.re().intersection(b.re())?;
    if a.is_real() && b.is_real() {
        return Some(ComplexBall::from_real(re));
    }
    Some(ComplexBall::new(re, a.im().intersection(b.im())?))
}

/// One interval Newton step, or `None` if `P'` may vanish on `z`.
#[must_use]
pub fn newton_step(poly: &DensePoly<Z>, deriv: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Option<ComplexBall> {
    let m = midpoint(z);
    let value = m.eval_poly(poly, prec);
    let slope = z.eval_poly(deriv, prec);
    let quotient = value.div(&slope, prec)?;
    Some(m.sub(&quotient, prec))
}

/// Tightens an isolating enclosure of a root of the irreducible `poly`
/// until it carries `prec` correct bits.
///
/// # Errors
///
/// `NoConvergence` if `prec` exceeds the configured ceiling or the round
/// limit is reached.
pub fn refine(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Result<ComplexBall> {
    if is_accurate(z, prec) {
        return Ok(z.clone());
    }
    if poly.degree() > 1 && prec > QqbarConfig::global().max_prec {
        return Err(QqbarError::NoConvergence {
            operation: "refinement",
            prec,
        });
    }
    refine_unbounded(poly, z, prec)
}

/// [`refine`] without the precision ceiling, for decisions that have
/// their own proof of termination.
pub(crate) fn refine_unbounded(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Result<ComplexBall> {
    if poly.degree() == 1 {
        return Ok(rational_ball(&rational_root(poly), prec));
    }
    let config = QqbarConfig::global();
    let deriv = poly.derivative();
    let mut z = z.clone();
    let mut stalls = 0;
    for round in 0..config.max_refine_rounds {
        if is_accurate(&z, prec) {
            return Ok(z);
        }
        let accuracy = u32::try_from(z.rel_accuracy_bits().max(16)).unwrap_or(prec);
        let wp = accuracy.saturating_mul(2).saturating_add(32).min(prec + 64);

        let next = newton_step(poly, &deriv, &z, wp).and_then(|t| intersect(&z, &t));
        match next {
            Some(t) if t.rel_accuracy_bits() > z.rel_accuracy_bits() => {
                trace!("Newton round {round}: {} bits at {wp}", t.rel_accuracy_bits());
                z = t;
                stalls = 0;
            }
            _ => {
                stalls += 1;
                if stalls >= config.slow_convergence_rounds {
                    let fallback = wp.max(prec).saturating_add(32);
                    debug!("refinement stalled at {wp} bits, recomputing roots at {fallback}");
                    if let Some(t) = reanchor(poly, &z, fallback) {
                        z = intersect(&z, &t).unwrap_or(t);
                    }
                    stalls = 0;
                }
            }
        }
    }
    Err(QqbarError::NoConvergence {
        operation: "refinement",
        prec,
    })
}

/// Recomputes all roots of `poly` and returns the single certified
/// enclosure meeting `z`.
pub(crate) fn reanchor(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Option<ComplexBall> {
    let ceiling = QqbarConfig::global().max_prec.max(prec);
    let mut p = prec;
    while p <= ceiling {
        if let Some(roots) = isolate_roots(poly, p) {
            let mut hits = roots.into_iter().filter(|r| r.overlaps(z));
            if let (Some(hit), None) = (hits.next(), hits.next()) {
                return Some(hit);
            }
        }
        p = p.saturating_mul(2);
    }
    None
}

/// Extra bits for the Newton image, so that its rounding stays well inside
/// an inflation of `2^-prec` relative to the box.
const GUARD_BITS: u32 = 32;

fn inflation(z: &ComplexBall, prec: u32) -> Dyadic {
    let rad = z.re().rad().max(z.im().rad()).clone();
    let mag = z.re().mid().mag().max(z.im().mid().mag());
    let mag = if mag == i64::MIN { 0 } else { mag };
    &rad + &Dyadic::new(1.into(), mag - i64::from(prec))
}

/// Proves that a slight inflation of `z` holds exactly one root of
/// `poly`. Meant for boxes already believed to enclose one.
///
/// Succeeds iff the Newton image of the inflated box lies strictly inside
/// it; the image is returned as the new, tighter enclosure. Inflation is
/// about the midpoint, so a box symmetric about an axis stays symmetric.
#[must_use]
pub fn validate_uniqueness(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Option<ComplexBall> {
    let eps = inflation(z, prec);
    let b = if z.is_real() { z.inflate_real(&eps) } else { z.inflate(&eps) };
    let t = newton_step(poly, &poly.derivative(), &b, prec.saturating_add(GUARD_BITS))?;
    b.contains_interior(&t).then_some(t)
}

/// Proves, with no prior knowledge, that `z` holds exactly one root of
/// `poly`. Succeeds iff the Newton image is contained in `z`.
#[must_use]
pub fn validate_existence_and_uniqueness(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Option<ComplexBall> {
    let t = newton_step(poly, &poly.derivative(), z, prec)?;
    z.contains(&t).then_some(t)
}

/// Brings an isolating enclosure into canonical form: a root that is real
/// gets an exactly zero imaginary part.
///
/// A unique root in a box symmetric about the real axis equals its own
/// conjugate, so a uniqueness proof on `z ∪ conj(z)` shows the root is
/// real. Otherwise `z` is refined until its imaginary part excludes zero.
pub(crate) fn settle(poly: &DensePoly<Z>, z: &ComplexBall, prec: u32) -> Result<ComplexBall> {
    let ceiling = QqbarConfig::global().max_prec;
    let mut z = z.clone();
    let mut prec = prec;
    loop {
        if z.is_real() || !z.im().contains_zero() {
            return Ok(z);
        }
        let mirror = z.union(&z.conj());
        if let Some(t) = validate_uniqueness(poly, &mirror, prec) {
            return Ok(ComplexBall::from_real(t.re().clone()));
        }
        prec = prec.saturating_mul(2);
        if prec > ceiling {
            return Err(QqbarError::NoConvergence {
                operation: "real root detection",
                prec,
            });
        }
        z = refine(poly, &z, prec)?;
    }
}
