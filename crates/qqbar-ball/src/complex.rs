//! Complex balls: rectangles `re + i·im` with real-ball parts.

use std::fmt;

use num_traits::Zero;
use qqbar_integers::{Integer, Rational};
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::dyadic::Dyadic;
use crate::real::RealBall;

/// A complex rectangle `[re] + i·[im]`.
///
/// An imaginary part that is exactly zero marks a ball known to be real;
/// arithmetic keeps it exact whenever both operands are real.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ComplexBall {
    re: RealBall,
    im: RealBall,
}

impl ComplexBall {
    /// Creates a ball from its parts.
    #[must_use]
    pub fn new(re: RealBall, im: RealBall) -> Self {
        Self { re, im }
    }

    /// A real ball with an exact zero imaginary part.
    #[must_use]
    pub fn from_real(re: RealBall) -> Self {
        Self {
            re,
            im: RealBall::zero(),
        }
    }

    /// Exact zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_real(RealBall::zero())
    }

    /// Exact one.
    #[must_use]
    pub fn one() -> Self {
        Self::from_real(RealBall::one())
    }

    /// Exact `i`.
    #[must_use]
    pub fn i() -> Self {
        Self::new(RealBall::zero(), RealBall::one())
    }

    /// An exact integer.
    #[must_use]
    pub fn from_integer(n: &Integer) -> Self {
        Self::from_real(RealBall::from_integer(n))
    }

    /// Encloses `re + i·im` at `prec` bits.
    #[must_use]
    pub fn from_rationals(re: &Rational, im: &Rational, prec: u32) -> Self {
        Self::new(RealBall::from_rational(re, prec), RealBall::from_rational(im, prec))
    }

    /// Real part.
    #[must_use]
    pub fn re(&self) -> &RealBall {
        &self.re
    }

    /// Imaginary part.
    #[must_use]
    pub fn im(&self) -> &RealBall {
        &self.im
    }

    /// Returns true if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Returns true if both parts are exact.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.re.is_exact() && self.im.is_exact()
    }

    /// Returns true for the exact zero ball.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Returns true if zero lies in the rectangle.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.re.contains_zero() && self.im.contains_zero()
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.re.neg(), self.im.neg())
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), self.im.neg())
    }

    /// Multiplication by `2^k`.
    #[must_use]
    pub fn mul_2exp(&self, k: i64) -> Self {
        Self::new(self.re.mul_2exp(k), self.im.mul_2exp(k))
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Self, prec: u32) -> Self {
        Self::new(self.re.add(&other.re, prec), self.im.add(&other.im, prec))
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Self, prec: u32) -> Self {
        Self::new(self.re.sub(&other.re, prec), self.im.sub(&other.im, prec))
    }

    /// Product.
    #[must_use]
    pub fn mul(&self, other: &Self, prec: u32) -> Self {
        if self.is_real() {
            return other.mul_real(&self.re, prec);
        }
        if other.is_real() {
            return self.mul_real(&other.re, prec);
        }
        let re = self.re.mul(&other.re, prec).sub(&self.im.mul(&other.im, prec), prec);
        let im = self.re.mul(&other.im, prec).add(&self.im.mul(&other.re, prec), prec);
        Self::new(re, im)
    }

    /// Product with a real ball.
    #[must_use]
    pub fn mul_real(&self, x: &RealBall, prec: u32) -> Self {
        let im = if self.im.is_zero() {
            RealBall::zero()
        } else {
            self.im.mul(x, prec)
        };
        Self::new(self.re.mul(x, prec), im)
    }

    /// Square.
    #[must_use]
    pub fn sqr(&self, prec: u32) -> Self {
        if self.is_real() {
            return Self::from_real(self.re.sqr(prec));
        }
        let re = self.re.sqr(prec).sub(&self.im.sqr(prec), prec);
        let im = self.re.mul(&self.im, prec).mul_2exp(1);
        Self::new(re, im)
    }

    /// `self^n` by repeated squaring.
    #[must_use]
    pub fn pow_ui(&self, n: u32, prec: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut e = n;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base, prec);
            }
            e >>= 1;
            if e > 0 {
                base = base.sqr(prec);
            }
        }
        result
    }

    /// `|z|²`.
    #[must_use]
    pub fn abs2(&self, prec: u32) -> RealBall {
        self.re.sqr(prec).add(&self.im.sqr(prec), prec)
    }

    /// `|z|`.
    #[must_use]
    pub fn abs(&self, prec: u32) -> RealBall {
        if self.is_real() {
            return self.re.abs();
        }
        // abs2 is non-negative on the true values, so a root always exists
        self.abs2(prec)
            .sqrt(prec)
            .unwrap_or_else(|| RealBall::from_bounds(&Dyadic::zero(), &self.mag_upper()))
    }

    /// An upper bound for `|z|` over the rectangle.
    #[must_use]
    pub fn mag_upper(&self) -> Dyadic {
        &self.re.mag_upper() + &self.im.mag_upper()
    }

    /// Reciprocal, or `None` if the rectangle contains zero.
    #[must_use]
    pub fn inv(&self, prec: u32) -> Option<Self> {
        if self.is_real() {
            return self.re.inv(prec).map(Self::from_real);
        }
        let d = self.abs2(prec).inv(prec)?;
        Some(self.conj().mul_real(&d, prec))
    }

    /// Quotient, or `None` if the divisor contains zero.
    #[must_use]
    pub fn div(&self, other: &Self, prec: u32) -> Option<Self> {
        if other.is_real() {
            let inv = other.re.inv(prec)?;
            return Some(self.mul_real(&inv, prec));
        }
        other.inv(prec).map(|inv| self.mul(&inv, prec))
    }

    /// Returns true if `other` lies inside `self`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.re.contains(&other.re) && self.im.contains(&other.im)
    }

    /// Returns true if `other` lies in the interior of `self`. A real
    /// ball's interior is taken along the real axis only.
    #[must_use]
    pub fn contains_interior(&self, other: &Self) -> bool {
        if self.is_real() && other.is_real() {
            return self.re.contains_interior(&other.re);
        }
        self.re.contains_interior(&other.re) && self.im.contains_interior(&other.im)
    }

    /// Returns true if the rectangles intersect.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.re.overlaps(&other.re) && self.im.overlaps(&other.im)
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let im = if self.is_real() && other.is_real() {
            RealBall::zero()
        } else {
            self.im.union(&other.im)
        };
        Self::new(self.re.union(&other.re), im)
    }

    /// Widens both parts by `eps`.
    #[must_use]
    pub fn inflate(&self, eps: &Dyadic) -> Self {
        Self::new(self.re.inflate(eps), self.im.inflate(eps))
    }

    /// Widens the real part only.
    #[must_use]
    pub fn inflate_real(&self, eps: &Dyadic) -> Self {
        Self::new(self.re.inflate(eps), self.im.clone())
    }

    /// Approximate number of correct bits relative to `|z|`.
    #[must_use]
    pub fn rel_accuracy_bits(&self) -> i64 {
        let mid = self.re.mid().mag().max(self.im.mid().mag());
        let rad = self.re.rad().mag().max(self.im.rad().mag());
        match (mid, rad) {
            (_, i64::MIN) => i64::MAX,
            (i64::MIN, r) => r.saturating_neg(),
            (m, r) => m - r,
        }
    }

    /// Evaluates an integer polynomial by Horner's rule.
    #[must_use]
    pub fn eval_poly(&self, poly: &DensePoly<Z>, prec: u32) -> Self {
        let mut acc = Self::zero();
        for c in poly.coeffs().iter().rev() {
            acc = acc.mul(self, prec).add(&Self::from_integer(&c.0), prec);
        }
        acc
    }

    /// Principal argument, or `None` when the rectangle meets the
    /// non-positive real axis in a way that makes the branch ambiguous.
    #[must_use]
    pub fn arg(&self, prec: u32) -> Option<RealBall> {
        if self.re.is_positive() {
            let t = self.im.div(&self.re, prec + 8)?;
            return Some(t.atan(prec));
        }
        let half_pi = RealBall::pi(prec + 8).mul_2exp(-1);
        if self.im.is_positive() || self.im.is_negative() {
            let t = self.re.div(&self.im, prec + 8)?.atan(prec + 8);
            let base = if self.im.is_positive() { half_pi } else { half_pi.neg() };
            return Some(base.sub(&t, prec));
        }
        if self.is_real() && self.re.is_negative() {
            return Some(RealBall::pi(prec));
        }
        None
    }

    /// Principal `n`-th root `|z|^(1/n) · e^(i·arg(z)/n)`.
    ///
    /// Non-negative real input gives a real root. `None` if the argument
    /// cannot be decided.
    #[must_use]
    pub fn root_ui(&self, n: u32, prec: u32) -> Option<Self> {
        if n == 1 || self.is_zero() {
            return Some(self.clone());
        }
        if self.is_real() && self.re.is_nonnegative() {
            return self.re.root_ui(n, prec).map(Self::from_real);
        }
        let w = prec + 16;
        let theta = self.arg(w)?;
        let modulus = self.abs(w).root_ui(n, w)?;
        let angle = theta.mul(&RealBall::from_rational(&Rational::from_i64(1, i64::from(n)), w), w);
        let (s, c) = angle.sin_cos(w);
        Some(Self::new(modulus.mul(&c, prec), modulus.mul(&s, prec)))
    }

    /// `e^(2πi·p/q)`, exact for `±1` and `±i`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn root_of_unity(p: i64, q: u64, prec: u32) -> Self {
        assert!(q > 0, "root of unity of order zero");
        let q_int = Integer::from(q);
        let r = Integer::new(p).mul_2exp(2).div_rem_floor(&q_int).1;
        if r.is_zero() {
            // 4p/q is an integer: one of 1, i, −1, −i
            let quarter = Integer::new(p).mul_2exp(2).div_floor(&q_int);
            let k = quarter.div_rem_floor(&Integer::new(4)).1.to_i64().unwrap_or(0);
            return match k {
                0 => Self::one(),
                1 => Self::i(),
                2 => Self::one().neg(),
                _ => Self::i().neg(),
            };
        }
        let w = prec + 16;
        let turn = Rational::new(Integer::new(p).mul_2exp(1), q_int);
        let angle = RealBall::pi(w).mul(&RealBall::from_rational(&turn, w), w);
        let (s, c) = angle.sin_cos(prec);
        Self::new(c, s)
    }
}

impl fmt::Debug for ComplexBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}i", self.re, self.im)
    }
}

impl fmt::Display for ComplexBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            return write!(f, "{}", self.re);
        }
        write!(f, "{} + {}i", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_poly::integer::from_i64s;

    fn c(re: i64, im: i64) -> ComplexBall {
        ComplexBall::new(RealBall::from_i64(re), RealBall::from_i64(im))
    }

    #[test]
    fn test_exact_arithmetic() {
        let prec = 64;
        let a = c(1, 2);
        let b = c(3, -1);
        assert_eq!(a.mul(&b, prec), c(5, 5));
        assert_eq!(a.sqr(prec), c(-3, 4));
        assert_eq!(a.pow_ui(3, prec), c(-11, -2));
        let quotient = a.div(&b, prec).unwrap();
        assert!(quotient.re().contains_rational(&Rational::from_i64(1, 10)));
        assert!(quotient.im().contains_rational(&Rational::from_i64(7, 10)));
    }

    #[test]
    fn test_real_flag_is_preserved() {
        let prec = 64;
        let x = ComplexBall::from_real(RealBall::from_rational(&Rational::from_i64(1, 3), prec));
        assert!(x.mul(&x, prec).is_real());
        assert!(x.inv(prec).unwrap().is_real());
        assert!(x.add(&ComplexBall::one(), prec).is_real());
        assert!(!x.mul(&ComplexBall::i(), prec).is_real());
    }

    #[test]
    fn test_eval_poly() {
        // x² + 1 at i is zero
        let p = from_i64s(&[1, 0, 1]);
        assert!(ComplexBall::i().eval_poly(&p, 64).is_zero());
        let q = from_i64s(&[-2, 0, 1]);
        assert_eq!(c(3, 0).eval_poly(&q, 64), c(7, 0));
    }

    #[test]
    fn test_arg_quadrants() {
        let prec = 96;
        let pi = RealBall::pi(prec);
        assert!(c(1, 1).arg(prec).unwrap().overlaps(&pi.mul_2exp(-2)));
        assert!(c(0, 1).arg(prec).unwrap().overlaps(&pi.mul_2exp(-1)));
        assert!(c(-1, 0).arg(prec).unwrap().overlaps(&pi));
        let third = c(-1, -1).arg(prec).unwrap();
        assert!(third.overlaps(&pi.mul(&RealBall::from_rational(&Rational::from_i64(-3, 4), prec), prec)));
        assert!(ComplexBall::zero().arg(prec).is_none());
    }

    #[test]
    fn test_principal_roots() {
        let prec = 96;
        // √(−4) = 2i
        let r = c(-4, 0).root_ui(2, prec).unwrap();
        assert!(r.re().contains_zero() && r.im().contains(&RealBall::from_i64(2)));
        // ∛8 = 2 stays real
        let r = c(8, 0).root_ui(3, prec).unwrap();
        assert!(r.is_real() && r.re().contains(&RealBall::from_i64(2)));
        // (1 + i)^2 = 2i, so √(2i) = 1 + i
        let r = c(0, 2).root_ui(2, prec).unwrap();
        assert!(r.re().contains(&RealBall::one()) && r.im().contains(&RealBall::one()));
    }

    #[test]
    fn test_roots_of_unity() {
        let prec = 80;
        assert_eq!(ComplexBall::root_of_unity(1, 4, prec), ComplexBall::i());
        assert_eq!(ComplexBall::root_of_unity(3, 6, prec), c(-1, 0));
        assert_eq!(ComplexBall::root_of_unity(-5, 5, prec), ComplexBall::one());
        let w = ComplexBall::root_of_unity(1, 3, prec);
        assert!(w.pow_ui(3, prec).contains(&ComplexBall::one()));
        assert!(w.re().contains_rational(&Rational::from_i64(-1, 2)));
    }
}
