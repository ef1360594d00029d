//! Algebraic structure traits.
//!
//! Polynomials, power series and matrices in this workspace are generic
//! over these traits. Exact numeric types implement them directly.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A ring is a set with addition and multiplication operations.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Returns the image of the integer `n` in this ring.
    fn from_i64(n: i64) -> Self {
        Self::one().mul_by_scalar(n)
    }

    /// Computes `n * self` by double-and-add.
    fn mul_by_scalar(&self, n: i64) -> Self {
        let mut result = Self::zero();
        let mut base = self.clone();
        let mut k = n.unsigned_abs();

        while k > 0 {
            if k & 1 == 1 {
                result = result + base.clone();
            }
            k >>= 1;
            if k > 0 {
                base = base.clone() + base;
            }
        }

        if n < 0 {
            -result
        } else {
            result
        }
    }

    /// Computes self^n for non-negative n.
    fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            exp >>= 1;
            if exp > 0 {
                base = base.clone() * base;
            }
        }

        result
    }
}

/// A commutative ring where multiplication is commutative.
pub trait CommutativeRing: Ring {}

/// An integral domain is a commutative ring with no zero divisors.
///
/// If a * b = 0, then a = 0 or b = 0.
pub trait IntegralDomain: CommutativeRing {}

/// A Euclidean domain supports division with remainder.
///
/// For any a, b with b ≠ 0, there exist q, r such that:
/// - a = b*q + r
/// - Either r = 0 or φ(r) < φ(b) for some Euclidean function φ
pub trait EuclideanDomain: IntegralDomain {
    /// Computes the quotient and remainder of division.
    ///
    /// # Panics
    ///
    /// May panic if `other` is zero.
    fn div_rem(&self, other: &Self) -> (Self, Self);

    /// Computes the quotient of division.
    fn div(&self, other: &Self) -> Self {
        self.div_rem(other).0
    }

    /// Computes the remainder of division.
    fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Computes the greatest common divisor.
    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();

        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }

        a
    }

    /// Computes the least common multiple.
    fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        self.div(&g) * other.clone()
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: EuclideanDomain {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element, or returns `None` for a zero divisor.
    fn checked_div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self.clone() * inv)
    }
}

/// Rings carrying a total order compatible with addition.
pub trait OrderedRing: Ring + Ord {
    /// Returns the absolute value.
    fn abs(&self) -> Self;

    /// Returns the sign: -1, 0, or 1.
    fn signum(&self) -> i8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Q, Z};

    #[test]
    fn test_scalar_multiple_by_doubling() {
        assert_eq!(Z::new(7).mul_by_scalar(13), Z::new(91));
        assert_eq!(Z::new(7).mul_by_scalar(-4), Z::new(-28));
        assert!(Z::new(7).mul_by_scalar(0).is_zero());
        assert_eq!(Q::from_i64(-3), Q::new(-3, 1));
    }

    #[test]
    fn test_pow() {
        assert_eq!(Z::new(3).pow(5), Z::new(243));
        assert!(Z::new(3).pow(0).is_one());
        assert_eq!(Q::new(2, 3).pow(3), Q::new(8, 27));
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(Q::new(1, 2).checked_div(&Q::new(1, 3)), Some(Q::new(3, 2)));
        assert_eq!(Q::new(1, 2).checked_div(&Q::zero()), None);
    }
}
