//! Real balls `[mid ± rad]`.
//!
//! Every operation returns a ball containing all results for all inputs
//! in the argument balls. Midpoints are rounded to the working precision
//! and the rounding error is added to the radius; radii are kept to a few
//! bits and always rounded up.

use std::fmt;

use qqbar_integers::{Integer, Rational};

use crate::dyadic::{Dyadic, Round};

/// Mantissa bits kept in radii.
pub(crate) const RAD_PREC: u32 = 30;

/// A closed real interval in midpoint-radius form.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct RealBall {
    mid: Dyadic,
    rad: Dyadic,
}

impl RealBall {
    /// Creates `[mid ± |rad|]`, rounding the radius up.
    #[must_use]
    pub fn new(mid: Dyadic, rad: Dyadic) -> Self {
        Self {
            mid,
            rad: rad.abs().round(RAD_PREC, Round::Up),
        }
    }

    /// The exact ball `[x ± 0]`.
    #[must_use]
    pub fn exact(x: Dyadic) -> Self {
        Self {
            mid: x,
            rad: Dyadic::zero(),
        }
    }

    /// The exact zero ball.
    #[must_use]
    pub fn zero() -> Self {
        Self::exact(Dyadic::zero())
    }

    /// The exact one ball.
    #[must_use]
    pub fn one() -> Self {
        Self::exact(Dyadic::one())
    }

    /// An exact integer ball.
    #[must_use]
    pub fn from_integer(n: &Integer) -> Self {
        Self::exact(Dyadic::from_integer(n.clone()))
    }

    /// An exact machine-integer ball.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self::exact(Dyadic::from_i64(n))
    }

    /// Encloses a rational at `prec` bits.
    #[must_use]
    pub fn from_rational(q: &Rational, prec: u32) -> Self {
        let mid = Dyadic::from_rational(q, prec, Round::Nearest);
        let err = (q - &mid.to_rational()).abs();
        Self::new(mid, Dyadic::from_rational(&err, RAD_PREC, Round::Up))
    }

    /// The smallest ball containing `[lo, hi]`.
    #[must_use]
    pub fn from_bounds(lo: &Dyadic, hi: &Dyadic) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self::new((lo + hi).mul_2exp(-1), (hi - lo).mul_2exp(-1))
    }

    /// Rounds an exact midpoint to `prec` bits and widens `rad` by the
    /// rounding error.
    pub(crate) fn rounded(mid: &Dyadic, rad: &Dyadic, prec: u32) -> Self {
        let (mid, err) = mid.round_with_error(prec);
        Self::new(mid, rad + &err)
    }

    /// The midpoint.
    #[must_use]
    pub fn mid(&self) -> &Dyadic {
        &self.mid
    }

    /// The radius.
    #[must_use]
    pub fn rad(&self) -> &Dyadic {
        &self.rad
    }

    /// The lower endpoint.
    #[must_use]
    pub fn lower(&self) -> Dyadic {
        &self.mid - &self.rad
    }

    /// The upper endpoint.
    #[must_use]
    pub fn upper(&self) -> Dyadic {
        &self.mid + &self.rad
    }

    /// Upper bound for `|x|` over the ball.
    #[must_use]
    pub fn mag_upper(&self) -> Dyadic {
        &self.mid.abs() + &self.rad
    }

    /// Lower bound for `|x|` over the ball.
    #[must_use]
    pub fn mag_lower(&self) -> Dyadic {
        let m = &self.mid.abs() - &self.rad;
        if m.is_negative() {
            Dyadic::zero()
        } else {
            m
        }
    }

    /// Returns true if the radius is zero.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.rad.is_zero()
    }

    /// Returns true for the exact zero ball.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_exact() && self.mid.is_zero()
    }

    /// Returns true if zero lies in the ball.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.mid.abs() <= self.rad
    }

    /// Returns true if every point is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.lower().is_positive()
    }

    /// Returns true if every point is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.upper().is_negative()
    }

    /// Returns true if every point is non-negative.
    #[must_use]
    pub fn is_nonnegative(&self) -> bool {
        !self.lower().is_negative()
    }

    /// Sign of every point: `Some(±1)`, `Some(0)` only for the exact
    /// zero ball, `None` if the sign varies.
    #[must_use]
    pub fn sign(&self) -> Option<i8> {
        if self.is_zero() {
            Some(0)
        } else if self.is_positive() {
            Some(1)
        } else if self.is_negative() {
            Some(-1)
        } else {
            None
        }
    }

    /// Negation (exact).
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            mid: -&self.mid,
            rad: self.rad.clone(),
        }
    }

    /// Multiplication by `2^k` (exact).
    #[must_use]
    pub fn mul_2exp(&self, k: i64) -> Self {
        Self {
            mid: self.mid.mul_2exp(k),
            rad: self.rad.mul_2exp(k),
        }
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Self, prec: u32) -> Self {
        Self::rounded(&(&self.mid + &other.mid), &(&self.rad + &other.rad), prec)
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Self, prec: u32) -> Self {
        Self::rounded(&(&self.mid - &other.mid), &(&self.rad + &other.rad), prec)
    }

    /// Product.
    #[must_use]
    pub fn mul(&self, other: &Self, prec: u32) -> Self {
        let rad = &(&(&self.mid.abs() * &other.rad) + &(&other.mid.abs() * &self.rad)) + &(&self.rad * &other.rad);
        Self::rounded(&(&self.mid * &other.mid), &rad, prec)
    }

    /// Square.
    #[must_use]
    pub fn sqr(&self, prec: u32) -> Self {
        if self.contains_zero() && !self.is_zero() {
            let hi = self.mag_upper();
            let (top, err) = (&hi * &hi).round_with_error(prec);
            return Self::from_bounds(&Dyadic::zero(), &(&top + &err));
        }
        let rad = &(&self.mid.abs() * &self.rad).mul_2exp(1) + &(&self.rad * &self.rad);
        Self::rounded(&(&self.mid * &self.mid), &rad, prec)
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

    /// Reciprocal, or `None` if the ball contains zero.
    #[must_use]
    pub fn inv(&self, prec: u32) -> Option<Self> {
        if self.contains_zero() {
            return None;
        }
        let m_abs = self.mid.abs();
        let mid = Dyadic::one().div(&self.mid, prec, Round::Nearest)?;
        // |1/m − mid| = |1 − m·mid| / |m|
        let residual = (&Dyadic::one() - &(&self.mid * &mid)).abs();
        let rounding = residual.div(&m_abs, RAD_PREC, Round::Up)?;
        // sup |1/x − 1/m| over |x − m| ≤ r is r / (|m| (|m| − r)).
        let spread = self.rad.div(&(&m_abs * &(&m_abs - &self.rad)), RAD_PREC, Round::Up)?;
        Some(Self::new(mid, (&rounding + &spread).round(RAD_PREC, Round::Up)))
    }

    /// Quotient, or `None` if the divisor contains zero.
    #[must_use]
    pub fn div(&self, other: &Self, prec: u32) -> Option<Self> {
        other.inv(prec).map(|inv| self.mul(&inv, prec))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_nonnegative() {
            self.clone()
        } else if !self.upper().is_positive() {
            self.neg()
        } else {
            Self::from_bounds(&Dyadic::zero(), &self.mag_upper())
        }
    }

    /// Returns true if `other ⊆ self`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.lower() <= other.lower() && other.upper() <= self.upper()
    }

    /// Returns true if `other` lies in the interior of `self`.
    #[must_use]
    pub fn contains_interior(&self, other: &Self) -> bool {
        self.lower() < other.lower() && other.upper() < self.upper()
    }

    /// Returns true if the rational `q` lies in the ball.
    #[must_use]
    pub fn contains_rational(&self, q: &Rational) -> bool {
        (q - &self.mid.to_rational()).abs() <= self.rad.to_rational()
    }

    /// Returns true if the balls intersect.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower() <= other.upper() && other.lower() <= self.upper()
    }

    /// Smallest ball containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let lo = self.lower().min(other.lower());
        let hi = self.upper().max(other.upper());
        Self::from_bounds(&lo, &hi)
    }

    /// Intersection, or `None` if the balls are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lo = self.lower().max(other.lower());
        let hi = self.upper().min(other.upper());
        (lo <= hi).then(|| Self::from_bounds(&lo, &hi))
    }

    /// Widens the radius by `|eps|`.
    #[must_use]
    pub fn inflate(&self, eps: &Dyadic) -> Self {
        Self::new(self.mid.clone(), &self.rad + &eps.abs())
    }

    /// Approximate number of correct bits relative to the midpoint.
    ///
    /// `i64::MAX` for exact balls.
    #[must_use]
    pub fn rel_accuracy_bits(&self) -> i64 {
        if self.rad.is_zero() {
            return i64::MAX;
        }
        if self.mid.is_zero() {
            return self.rad.mag().saturating_neg();
        }
        self.mid.mag() - self.rad.mag()
    }

    /// Integer floor bounds `(⌊lower⌋, ⌊upper⌋)`.
    #[must_use]
    pub fn floor_bounds(&self) -> (Integer, Integer) {
        (self.lower().floor(), self.upper().floor())
    }
}

impl fmt::Debug for RealBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?} +/- {:?}]", self.mid, self.rad)
    }
}

impl fmt::Display for RealBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rad.is_zero() {
            write!(f, "{}", self.mid.to_f64())
        } else {
            write!(f, "[{} +/- {:.2e}]", self.mid.to_f64(), self.rad.to_f64())
        }
    }
}
