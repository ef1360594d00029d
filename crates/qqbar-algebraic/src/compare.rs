//! Equality, ordering and signs.
//!
//! Every decision starts from the cheap evidence: distinct minimal
//! polynomials, disjoint enclosures or rational values. Otherwise both
//! enclosures are refined until they separate. Past the cutoff precision
//! the question is answered exactly from the sign of a difference.

use std::cmp::Ordering;

use log::debug;
use num_traits::One;
use qqbar_ball::{ComplexBall, Dyadic, RealBall};
use qqbar_integers::Integer;
use qqbar_poly::integer::height_bits;
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::algebraic::AlgebraicNumber;
use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::refine::{refine_unbounded, validate_uniqueness};
use crate::select::{binary_op, BinaryOp};

/// Returns true if `x` and `y` are the same number.
///
/// Always decided: two enclosures of roots of the same irreducible
/// polynomial either separate or shrink below the root separation bound.
///
/// # Errors
///
/// `NoConvergence` only if Newton refinement exhausts its round limit.
pub fn equal(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<bool> {
    if x.poly != y.poly || x.is_real() != y.is_real() {
        return Ok(false);
    }
    if x.is_rational() {
        return Ok(true);
    }
    same_root(x, &y.enclosure)
}

/// An exponent `s` such that distinct roots of the squarefree `poly` lie
/// more than `2^-s` apart, from Mahler's bound
/// `sep > √3 · d^(−(d+2)/2) · ‖P‖₂^(1−d)` with `‖P‖₂ ≤ √(d+1) · H`.
pub(crate) fn separation_exp(poly: &DensePoly<Z>) -> i64 {
    let d = poly.degree();
    let bits = |n: usize| i64::try_from(usize::BITS - n.leading_zeros()).unwrap_or(i64::MAX);
    let d_i = i64::try_from(d).unwrap_or(i64::MAX);
    let norm_bits = i64::try_from(height_bits(poly)).unwrap_or(i64::MAX) + (bits(d + 1) + 1) / 2;
    ((d_i + 2) * bits(d) + 1) / 2 + (d_i - 1) * norm_bits + 1
}

/// Returns true if `z` is too small to hold two roots `2^-s` apart.
fn below_separation(z: &ComplexBall, s: i64) -> bool {
    // the diameter is at most 2·(rad re + rad im)
    let spread = z.re().rad() + z.im().rad();
    spread < Dyadic::new(Integer::one(), -s - 1)
}

/// Decides whether the root of `x.poly` enclosed by `other` is `x`.
fn same_root(x: &AlgebraicNumber, other: &ComplexBall) -> Result<bool> {
    let separation = separation_exp(&x.poly);
    let mut prec = QqbarConfig::global().default_prec;
    let mut a = x.enclosure.clone();
    let mut b = other.clone();
    loop {
        if !a.overlaps(&b) {
            return Ok(false);
        }
        // both boxes hold a root, and an isolating box around them holds one
        let joint = a.union(&b);
        if below_separation(&joint, separation) || validate_uniqueness(&x.poly, &joint, prec).is_some() {
            return Ok(true);
        }
        prec = prec.saturating_mul(2);
        debug!("equality undecided, refining to {prec} bits (separation 2^-{separation})");
        a = refine_unbounded(&x.poly, &a, prec)?;
        b = refine_unbounded(&x.poly, &b, prec)?;
    }
}

/// A real quantity derived from an algebraic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Re,
    Im,
    AbsRe,
    AbsIm,
    Abs2,
}

impl Part {
    fn ball(self, z: &ComplexBall, prec: u32) -> RealBall {
        match self {
            Self::Re => z.re().clone(),
            Self::Im => z.im().clone(),
            Self::AbsRe => z.re().abs(),
            Self::AbsIm => z.im().abs(),
            Self::Abs2 => z.abs2(prec),
        }
    }

    fn exact(self, x: &AlgebraicNumber) -> Result<AlgebraicNumber> {
        match self {
            Self::Re => x.re(),
            Self::Im => x.im(),
            Self::AbsRe => x.re()?.abs(),
            Self::AbsIm => x.im()?.abs(),
            Self::Abs2 => x.abs2(),
        }
    }

    /// True if the part is unchanged under complex conjugation.
    fn conjugation_invariant(self) -> bool {
        self != Self::Im
    }

    fn name(self) -> &'static str {
        match self {
            Self::Re => "real part comparison",
            Self::Im => "imaginary part comparison",
            Self::AbsRe => "absolute real part comparison",
            Self::AbsIm => "absolute imaginary part comparison",
            Self::Abs2 => "magnitude comparison",
        }
    }
}

fn order(a: &RealBall, b: &RealBall) -> Option<Ordering> {
    if a.upper() < b.lower() {
        Some(Ordering::Less)
    } else if a.lower() > b.upper() {
        Some(Ordering::Greater)
    } else if a.is_exact() && b.is_exact() && a.mid() == b.mid() {
        Some(Ordering::Equal)
    } else {
        None
    }
}

fn compare_part(x: &AlgebraicNumber, y: &AlgebraicNumber, part: Part) -> Result<Ordering> {
    if let (Some(p), Some(q)) = (x.to_rational(), y.to_rational()) {
        return Ok(match part {
            Part::Re => p.cmp(&q),
            Part::AbsRe => p.abs().cmp(&q.abs()),
            Part::Abs2 => (&p * &p).cmp(&(&q * &q)),
            Part::Im | Part::AbsIm => Ordering::Equal,
        });
    }
    let config = QqbarConfig::global();
    let prec = config.default_prec;
    if let Some(ord) = order(&part.ball(&x.enclosure, prec), &part.ball(&y.enclosure, prec)) {
        return Ok(ord);
    }
    if x.poly == y.poly && !x.is_rational() {
        if equal(x, y)? {
            return Ok(Ordering::Equal);
        }
        if part.conjugation_invariant() && !x.is_real() && same_root(x, &y.enclosure.conj())? {
            return Ok(Ordering::Equal);
        }
    }

    let cutoff = config.compare_cutoff();
    let mut prec = prec;
    while prec <= cutoff {
        let a = part.ball(&x.numerical_value(prec)?, prec);
        let b = part.ball(&y.numerical_value(prec)?, prec);
        if let Some(ord) = order(&a, &b) {
            return Ok(ord);
        }
        prec = prec.saturating_mul(2);
    }

    debug!("{}: numeric cutoff reached, comparing exactly", part.name());
    let d = binary_op(&part.exact(x)?, &part.exact(y)?, BinaryOp::Sub)?;
    Ok(sgn_re(&d)?.cmp(&0))
}

/// Orders the real parts.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn compare_real(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    compare_part(x, y, Part::Re)
}

/// Orders the imaginary parts.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn compare_imag(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    compare_part(x, y, Part::Im)
}

/// Orders `|re(x)|` and `|re(y)|`.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn compare_abs_real(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    compare_part(x, y, Part::AbsRe)
}

/// Orders `|im(x)|` and `|im(y)|`.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn compare_abs_imag(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    compare_part(x, y, Part::AbsIm)
}

/// Orders `|x|` and `|y|`.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn compare_magnitude(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    compare_part(x, y, Part::Abs2)
}

fn refine_sign(x: &AlgebraicNumber, part: fn(&ComplexBall) -> &RealBall, operation: &'static str) -> Result<i8> {
    let config = QqbarConfig::global();
    let mut prec = config.default_prec;
    loop {
        if let Some(s) = part(&x.numerical_value(prec)?).sign() {
            return Ok(s);
        }
        prec = prec.saturating_mul(2);
        if prec > config.max_prec {
            return Err(QqbarError::NoConvergence { operation, prec });
        }
    }
}

/// Sign of the real part.
///
/// A root with zero real part is a root of an even minimal polynomial
/// whose mirror image `−conj(x)` is a root too, so a uniqueness proof on
/// a box symmetric about the imaginary axis decides zero.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn sgn_re(x: &AlgebraicNumber) -> Result<i8> {
    if let Some(q) = x.to_rational() {
        return Ok(q.signum());
    }
    if let Some(s) = x.enclosure.re().sign() {
        return Ok(s);
    }
    if x.is_real() || !x.poly.is_even() {
        return refine_sign(x, ComplexBall::re, "sign of real part");
    }
    let config = QqbarConfig::global();
    let mut prec = config.default_prec;
    loop {
        let z = x.numerical_value(prec)?;
        if let Some(s) = z.re().sign() {
            return Ok(s);
        }
        let mirror = z.union(&ComplexBall::new(z.re().neg(), z.im().clone()));
        if validate_uniqueness(&x.poly, &mirror, prec).is_some() {
            return Ok(0);
        }
        prec = prec.saturating_mul(2);
        if prec > config.max_prec {
            return Err(QqbarError::NoConvergence {
                operation: "sign of real part",
                prec,
            });
        }
    }
}

/// Sign of the imaginary part.
///
/// # Errors
///
/// `NoConvergence` at the precision ceiling.
pub fn sgn_im(x: &AlgebraicNumber) -> Result<i8> {
    if x.is_real() {
        return Ok(0);
    }
    refine_sign(x, ComplexBall::im, "sign of imaginary part")
}

impl PartialEq for AlgebraicNumber {
    /// # Panics
    ///
    /// Panics if Newton refinement exhausts its round limit.
    fn eq(&self, other: &Self) -> bool {
        match equal(self, other) {
            Ok(b) => b,
            Err(e) => panic!("algebraic equality undecided: {e}"),
        }
    }
}

impl Eq for AlgebraicNumber {}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_integers::Rational;

    fn sqrt(n: i64) -> AlgebraicNumber {
        AlgebraicNumber::sqrt(&Rational::from_i64(n, 1)).unwrap()
    }

    fn complex(re: i64, im: i64) -> AlgebraicNumber {
        AlgebraicNumber::from_re_im(&Rational::from_i64(re, 1), &Rational::from_i64(im, 1)).unwrap()
    }

    #[test]
    fn test_equality() {
        assert!(equal(&sqrt(2), &sqrt(2)).unwrap());
        assert!(!equal(&sqrt(2), &sqrt(3)).unwrap());
        assert!(!equal(&sqrt(2), &sqrt(2).neg()).unwrap());
        assert!(!equal(&complex(0, 1), &complex(0, -1)).unwrap());
        assert_eq!(sqrt(8), binary_op(&sqrt(2), &sqrt(2), BinaryOp::Add).unwrap());
    }

    #[test]
    fn test_equality_of_differently_built_values() {
        let (a, b, c) = (sqrt(2), sqrt(3), sqrt(5));
        let left = binary_op(&binary_op(&a, &b, BinaryOp::Mul).unwrap(), &c, BinaryOp::Mul).unwrap();
        let right = binary_op(&a, &binary_op(&b, &c, BinaryOp::Mul).unwrap(), BinaryOp::Mul).unwrap();
        assert!(equal(&left, &right).unwrap());
        assert_eq!(left, sqrt(30));

        // (x + y) − y comes back as x
        let s = binary_op(&a, &b, BinaryOp::Add).unwrap();
        assert_eq!(binary_op(&s, &b, BinaryOp::Sub).unwrap(), a);

        // a wide user box around √2 against the canonical √2
        let wide = ComplexBall::from_real(RealBall::from_i64(3).mul_2exp(-1).inflate(&Dyadic::new(Integer::one(), -3)));
        let x = AlgebraicNumber::from_enclosure(a.poly(), &wide).unwrap();
        assert!(equal(&x, &a).unwrap());
    }

    #[test]
    fn test_separation_bound() {
        // roots ±√2 are 2√2 apart
        let p = sqrt(2).poly().clone();
        let s = separation_exp(&p);
        assert!(s >= 0);
        let tiny = ComplexBall::from_real(RealBall::one().inflate(&Dyadic::new(Integer::one(), -s - 4)));
        assert!(below_separation(&tiny, s));
        let big = ComplexBall::from_real(RealBall::one().inflate(&Dyadic::one()));
        assert!(!below_separation(&big, s));
        // heavier polynomials need more bits
        let q = qqbar_poly::integer::from_i64s(&[-1_000_001, 0, 0, 0, 1]);
        assert!(separation_exp(&q) > s);
    }

    #[test]
    fn test_real_ordering() {
        assert_eq!(compare_real(&sqrt(2), &sqrt(3)).unwrap(), Ordering::Less);
        assert_eq!(compare_real(&sqrt(3), &sqrt(2)).unwrap(), Ordering::Greater);
        let half = AlgebraicNumber::from_rational(&Rational::from_i64(1, 2));
        assert_eq!(compare_real(&half, &sqrt(2)).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_conjugates_share_real_part() {
        let w = binary_op(&sqrt(2), &AlgebraicNumber::i(), BinaryOp::Add).unwrap();
        let v = w.conj();
        assert_eq!(compare_real(&w, &v).unwrap(), Ordering::Equal);
        assert_eq!(compare_imag(&w, &v).unwrap(), Ordering::Greater);
        assert_eq!(compare_magnitude(&w, &v).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_absolute_comparisons() {
        let a = complex(-3, 1);
        let b = complex(2, -5);
        assert_eq!(compare_abs_real(&a, &b).unwrap(), Ordering::Greater);
        assert_eq!(compare_abs_imag(&a, &b).unwrap(), Ordering::Less);
        assert_eq!(compare_magnitude(&a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_equal_real_parts_need_exact_path() {
        // √2 + i and √2 − 2i have different minimal polynomials
        let a = binary_op(&sqrt(2), &AlgebraicNumber::i(), BinaryOp::Add).unwrap();
        let b = binary_op(&sqrt(2), &complex(0, -2), BinaryOp::Add).unwrap();
        assert_eq!(compare_real(&a, &b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_signs() {
        assert_eq!(sgn_re(&sqrt(2).neg()).unwrap(), -1);
        assert_eq!(sgn_re(&AlgebraicNumber::i()).unwrap(), 0);
        let i_sqrt2 = binary_op(&AlgebraicNumber::i(), &sqrt(2), BinaryOp::Mul).unwrap();
        assert_eq!(sgn_re(&i_sqrt2).unwrap(), 0);
        assert_eq!(sgn_im(&i_sqrt2).unwrap(), 1);
        assert_eq!(sgn_im(&sqrt(2)).unwrap(), 0);
        assert_eq!(sgn_im(&complex(1, -1)).unwrap(), -1);
    }
}
