//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::IBig` with the
//! operations needed by polynomial arithmetic and ball arithmetic:
//! floor division, scaling by powers of two and exact integer roots.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates an integer from a string in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if this integer is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Returns the number of bits of the absolute value (0 for zero).
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Returns true if the integer is even.
    #[must_use]
    pub fn is_even(&self) -> bool {
        !self.0.bit(0)
    }

    /// Greatest common divisor, non-negative; `gcd(0, 0) = 0`.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Self::zero(),
            (true, false) => other.abs(),
            (false, true) => self.abs(),
            (false, false) => Self(IBig::from(self.0.clone().gcd(other.0.clone()))),
        }
    }

    /// Computes the least common multiple (always non-negative).
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Attempts to convert to a u64.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Returns `2^k`.
    #[must_use]
    pub fn power_of_two(k: usize) -> Self {
        Self(IBig::ONE << k)
    }

    /// Computes `self * 2^k`.
    #[must_use]
    pub fn mul_2exp(&self, k: usize) -> Self {
        Self(&self.0 << k)
    }

    /// Computes `floor(self / 2^k)`.
    #[must_use]
    pub fn fdiv_2exp(&self, k: usize) -> Self {
        if k == 0 {
            return self.clone();
        }
        if self.is_negative() {
            // floor(-a / 2^k) = -ceil(a / 2^k)
            let a = -self;
            -a.cdiv_2exp(k)
        } else {
            Self(&self.0 >> k)
        }
    }

    /// Computes `ceil(self / 2^k)`.
    #[must_use]
    pub fn cdiv_2exp(&self, k: usize) -> Self {
        if k == 0 {
            return self.clone();
        }
        if self.is_negative() {
            let a = -self;
            -a.fdiv_2exp(k)
        } else {
            let bias = Self::power_of_two(k) - Self::one();
            Self(&(&self.0 + &bias.0) >> k)
        }
    }

    /// Returns the number of trailing zero bits (`None` for zero).
    #[must_use]
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.0.trailing_zeros()
    }

    /// Floor division: returns `(q, r)` with `self = q * other + r` and
    /// `r` having the sign of `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_rem_floor(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by zero");
        let q = Self(&self.0 / &other.0);
        let r = Self(&self.0 % &other.0);
        if !r.is_zero() && (r.is_negative() != other.is_negative()) {
            (q - Self::one(), r + other)
        } else {
            (q, r)
        }
    }

    /// Floor division `floor(self / other)`.
    #[must_use]
    pub fn div_floor(&self, other: &Self) -> Self {
        self.div_rem_floor(other).0
    }

    /// Ceiling division `ceil(self / other)`.
    #[must_use]
    pub fn div_ceil(&self, other: &Self) -> Self {
        -(-self).div_floor(other)
    }

    /// Returns `floor(self^(1/n))` for a non-negative integer.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative or `n` is zero.
    #[must_use]
    pub fn floor_root(&self, n: u32) -> Self {
        assert!(n > 0, "zeroth root");
        assert!(!self.is_negative(), "root of a negative integer");
        if self.is_zero() || self.is_one() || n == 1 {
            return self.clone();
        }

        let n_int = Self::from(n);
        let bits = self.bit_len();
        // Start above the true root: 2^ceil(bits / n) > self^(1/n).
        let mut x = Self::power_of_two(bits.div_ceil(n as usize));
        loop {
            let x_pow = x.pow(n - 1);
            let y = (Self::from(n - 1) * &x + self.div_floor(&x_pow)).div_floor(&n_int);
            if y >= x {
                return x;
            }
            x = y;
        }
    }

    /// Returns `floor(sqrt(self))` for a non-negative integer.
    #[must_use]
    pub fn sqrt_floor(&self) -> Self {
        self.floor_root(2)
    }

    /// Returns `ceil(self^(1/n))` for a non-negative integer.
    #[must_use]
    pub fn ceil_root(&self, n: u32) -> Self {
        let r = self.floor_root(n);
        if &r.pow(n) == self {
            r
        } else {
            r + Self::one()
        }
    }

    /// Returns the exact `n`-th root if `self` is a perfect `n`-th power.
    ///
    /// Negative integers have a root only for odd `n`.
    #[must_use]
    pub fn exact_root(&self, n: u32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        if self.is_negative() {
            if n % 2 == 0 {
                return None;
            }
            return (-self).exact_root(n).map(|r| -r);
        }
        let r = self.floor_root(n);
        if &r.pow(n) == self {
            Some(r)
        } else {
            None
        }
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Arithmetic operations
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: &Integer) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: &Integer) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: &Integer) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

/// Truncating division, as for primitive integers.
impl Div for Integer {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Integer> for Integer {
    type Output = Self;

    fn div(self, rhs: &Integer) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &Integer {
    type Output = Integer;

    fn div(self, rhs: Self) -> Self::Output {
        Integer(&self.0 / &rhs.0)
    }
}

impl Rem for Integer {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Rem for &Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        Integer(&self.0 % &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!((a.clone() + b.clone()).to_i64(), Some(13));
        assert_eq!((a.clone() - b.clone()).to_i64(), Some(7));
        assert_eq!((a.clone() * b.clone()).to_i64(), Some(30));
        assert_eq!((a.clone() / b.clone()).to_i64(), Some(3));
        assert_eq!((a % b).to_i64(), Some(1));
    }

    #[test]
    fn test_gcd() {
        let a = Integer::new(48);
        let b = Integer::new(18);
        assert_eq!(a.gcd(&b).to_i64(), Some(6));
        assert_eq!(Integer::new(-12).gcd(&Integer::new(8)), Integer::new(4));
    }

    #[test]
    fn test_gcd_with_zero() {
        assert_eq!(Integer::zero().gcd(&Integer::zero()), Integer::zero());
        assert_eq!(Integer::zero().gcd(&Integer::new(-7)), Integer::new(7));
        assert_eq!(Integer::new(5).gcd(&Integer::zero()), Integer::new(5));
        assert_eq!(Integer::zero().lcm(&Integer::zero()), Integer::zero());
    }

    #[test]
    fn test_large_numbers() {
        let a = Integer::from_str_radix("123456789012345678901234567890", 10).unwrap();
        let b = Integer::from_str_radix("987654321098765432109876543210", 10).unwrap();
        let sum = a + b;
        assert_eq!(sum.to_string(), "1111111110111111111011111111100");
    }

    #[test]
    fn test_floor_division() {
        let (q, r) = Integer::new(-7).div_rem_floor(&Integer::new(2));
        assert_eq!(q, Integer::new(-4));
        assert_eq!(r, Integer::new(1));

        let (q, r) = Integer::new(7).div_rem_floor(&Integer::new(-2));
        assert_eq!(q, Integer::new(-4));
        assert_eq!(r, Integer::new(-1));

        assert_eq!(Integer::new(7).div_ceil(&Integer::new(2)), Integer::new(4));
        assert_eq!(Integer::new(-7).div_ceil(&Integer::new(2)), Integer::new(-3));
    }

    #[test]
    fn test_power_of_two_scaling() {
        assert_eq!(Integer::new(5).mul_2exp(3), Integer::new(40));
        assert_eq!(Integer::new(41).fdiv_2exp(3), Integer::new(5));
        assert_eq!(Integer::new(41).cdiv_2exp(3), Integer::new(6));
        assert_eq!(Integer::new(-41).fdiv_2exp(3), Integer::new(-6));
        assert_eq!(Integer::new(-41).cdiv_2exp(3), Integer::new(-5));
        assert_eq!(Integer::new(40).cdiv_2exp(3), Integer::new(5));
    }

    #[test]
    fn test_integer_roots() {
        assert_eq!(Integer::new(80).sqrt_floor(), Integer::new(8));
        assert_eq!(Integer::new(81).sqrt_floor(), Integer::new(9));
        assert_eq!(Integer::new(26).floor_root(3), Integer::new(2));
        assert_eq!(Integer::new(27).floor_root(3), Integer::new(3));
        assert_eq!(Integer::new(28).ceil_root(3), Integer::new(4));
        assert_eq!(Integer::new(-8).exact_root(3), Some(Integer::new(-2)));
        assert_eq!(Integer::new(-8).exact_root(2), None);
        assert_eq!(Integer::new(10).exact_root(2), None);

        let big = Integer::new(3).pow(200);
        assert_eq!(big.floor_root(4), Integer::new(3).pow(50));
    }
}
