//! The ring of integers Z.

use crate::traits::{CommutativeRing, EuclideanDomain, IntegralDomain, OrderedRing, Ring};
use qqbar_integers::Integer;

/// The ring of integers.
///
/// Coefficient ring of minimal polynomials. Wraps
/// `qqbar_integers::Integer` and implements the algebraic traits with
/// floor division as the Euclidean division.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Z(pub Integer);

impl Z {
    /// Creates a new integer.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(Integer::new(value))
    }

    /// Exact division; returns `None` when `other` does not divide `self`.
    #[must_use]
    pub fn div_exact(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let (q, r) = self.0.div_rem_floor(&other.0);
        if num_traits::Zero::is_zero(&r) {
            Some(Self(q))
        } else {
            None
        }
    }
}

impl Ring for Z {
    fn zero() -> Self {
        Self(<Integer as num_traits::Zero>::zero())
    }

    fn one() -> Self {
        Self(<Integer as num_traits::One>::one())
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(&self.0)
    }

    fn is_one(&self) -> bool {
        num_traits::One::is_one(&self.0)
    }

    fn from_i64(n: i64) -> Self {
        Self::new(n)
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        Self(&self.0 * &Integer::new(n))
    }

    fn pow(&self, n: u32) -> Self {
        Self(self.0.pow(n))
    }
}

impl CommutativeRing for Z {}
impl IntegralDomain for Z {}

impl EuclideanDomain for Z {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        let (q, r) = self.0.div_rem_floor(&other.0);
        (Self(q), Self(r))
    }

    fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }

    fn lcm(&self, other: &Self) -> Self {
        Self(self.0.lcm(&other.0))
    }
}

impl OrderedRing for Z {
    fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    fn signum(&self) -> i8 {
        self.0.signum()
    }
}

impl std::ops::Add for Z {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Z {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Z {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Z {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Z {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Integer> for Z {
    fn from(value: Integer) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Z {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
