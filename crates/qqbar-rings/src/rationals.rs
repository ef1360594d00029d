//! The field of rational numbers Q.

use crate::integers::Z;
use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, OrderedRing, Ring};
use qqbar_integers::{Integer, Rational};

/// The field of rational numbers.
///
/// Power series and linear algebra over Q carry the exact parts of the
/// algebraic-number engine.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(pub Rational);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        Self(Rational::from_i64(num, den))
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(Rational::from(n))
    }

    /// Creates a rational from an integer ring element.
    #[must_use]
    pub fn from_z(n: &Z) -> Self {
        Self(Rational::from_integer(n.0.clone()))
    }

    /// Creates `num / den` from integers.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    #[must_use]
    pub fn from_parts(num: Integer, den: Integer) -> Self {
        Self(Rational::new(num, den))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numer(&self) -> Integer {
        self.0.numerator()
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denom(&self) -> Integer {
        self.0.denominator()
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Self(<Rational as num_traits::Zero>::zero())
    }

    fn one() -> Self {
        Self(<Rational as num_traits::One>::one())
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(&self.0)
    }

    fn is_one(&self) -> bool {
        num_traits::One::is_one(&self.0)
    }

    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        Self(&self.0 * &Rational::from(n))
    }
}

impl CommutativeRing for Q {}
impl IntegralDomain for Q {}

impl EuclideanDomain for Q {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (Self(&self.0 / &other.0), Self::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() && other.is_zero() {
            Self::zero()
        } else {
            Self::one()
        }
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.recip()))
        }
    }
}

impl OrderedRing for Q {
    fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    fn signum(&self) -> i8 {
        self.0.signum()
    }
}

impl std::ops::Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<Rational> for Q {
    fn from(value: Rational) -> Self {
        Self(value)
    }
}

impl From<Z> for Q {
    fn from(value: Z) -> Self {
        Self(Rational::from_integer(value.0))
    }
}

impl std::fmt::Display for Q {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_laws() {
        let a = Q::new(2, 3);
        let b = Q::new(3, 4);

        assert_eq!(a.clone() + b.clone(), Q::new(17, 12));
        assert_eq!(a * b, Q::new(1, 2));
    }

    #[test]
    fn test_inverse() {
        let a = Q::new(-3, 5);
        assert_eq!(a.inv(), Some(Q::new(-5, 3)));
        assert_eq!(Q::zero().inv(), None);
    }

    #[test]
    fn test_parts() {
        let a = Q::from_parts(Integer::new(6), Integer::new(-4));
        assert_eq!(a.numer(), Integer::new(-3));
        assert_eq!(a.denom(), Integer::new(2));
        assert_eq!(Q::from(Z::new(5)), Q::from_integer(5));
    }
}
