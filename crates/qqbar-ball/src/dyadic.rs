//! Dyadic numbers `m · 2^e`.
//!
//! Ball midpoints and radii are dyadic: sums and products are exact, and
//! every other operation rounds to a requested number of mantissa bits in
//! an explicit direction.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use qqbar_integers::{Integer, Rational};

/// Rounding direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Round {
    /// Toward −∞.
    Down,
    /// Toward +∞.
    Up,
    /// To nearest, ties toward +∞.
    Nearest,
}

/// An exact number `mantissa · 2^exponent`.
///
/// Normalised: the mantissa is odd, or zero with exponent zero.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Dyadic {
    man: Integer,
    exp: i64,
}

fn shift(k: i64) -> usize {
    usize::try_from(k).unwrap_or(usize::MAX)
}

fn signed_bits(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn div_round(num: &Integer, den: &Integer, mode: Round) -> Integer {
    match mode {
        Round::Down => num.div_floor(den),
        Round::Up => num.div_ceil(den),
        Round::Nearest => (num.mul_2exp(1) + den).div_floor(&den.mul_2exp(1)),
    }
}

impl Dyadic {
    /// Creates `man · 2^exp`.
    #[must_use]
    pub fn new(man: Integer, exp: i64) -> Self {
        match man.trailing_zeros() {
            None => Self::zero(),
            Some(0) => Self { man, exp },
            Some(tz) => Self {
                man: man.fdiv_2exp(tz),
                exp: exp + signed_bits(tz),
            },
        }
    }

    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            man: Integer::zero(),
            exp: 0,
        }
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self {
            man: Integer::one(),
            exp: 0,
        }
    }

    /// An integer as a dyadic number.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self::new(n, 0)
    }

    /// A machine integer as a dyadic number.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self::new(Integer::new(n), 0)
    }

    /// Converts a finite `f64` exactly.
    #[must_use]
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        let bits = x.to_bits();
        let negative = bits >> 63 == 1;
        let biased = i64::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
        let frac = bits & ((1u64 << 52) - 1);
        let (man, exp) = if biased == 0 {
            (frac, -1074)
        } else {
            (frac | (1u64 << 52), biased - 1075)
        };
        let man = Integer::from(man);
        Some(Self::new(if negative { -man } else { man }, exp))
    }

    /// The odd mantissa.
    #[must_use]
    pub fn mantissa(&self) -> &Integer {
        &self.man
    }

    /// The binary exponent.
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exp
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.man.is_zero()
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.man.signum()
    }

    /// Returns true if strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.man.is_negative()
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.man.is_positive()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            man: self.man.abs(),
            exp: self.exp,
        }
    }

    /// Computes `self · 2^k` exactly.
    #[must_use]
    pub fn mul_2exp(&self, k: i64) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            man: self.man.clone(),
            exp: self.exp + k,
        }
    }

    /// The magnitude exponent `m` with `2^(m−1) ≤ |self| < 2^m`.
    ///
    /// `i64::MIN` for zero.
    #[must_use]
    pub fn mag(&self) -> i64 {
        if self.is_zero() {
            i64::MIN
        } else {
            self.exp + signed_bits(self.man.bit_len())
        }
    }

    /// Converts to an exact rational.
    #[must_use]
    pub fn to_rational(&self) -> Rational {
        Rational::from_integer(self.man.clone()).mul_2exp(self.exp)
    }

    /// Rounds a rational to `prec` significant bits.
    #[must_use]
    pub fn from_rational(q: &Rational, prec: u32, mode: Round) -> Self {
        let num = q.numerator();
        if num.is_zero() {
            return Self::zero();
        }
        let den = q.denominator();
        let k = i64::from(prec) + signed_bits(den.bit_len()) - signed_bits(num.bit_len()) + 1;
        let m = if k >= 0 {
            div_round(&num.mul_2exp(shift(k)), &den, mode)
        } else {
            div_round(&num, &den.mul_2exp(shift(-k)), mode)
        };
        Self::new(m, -k)
    }

    /// Rounds to at most `prec` mantissa bits.
    #[must_use]
    pub fn round(&self, prec: u32, mode: Round) -> Self {
        let bits = self.man.bit_len();
        let prec = prec.max(1) as usize;
        if bits <= prec {
            return self.clone();
        }
        let s = bits - prec;
        let man = match mode {
            Round::Down => self.man.fdiv_2exp(s),
            Round::Up => self.man.cdiv_2exp(s),
            Round::Nearest => (&self.man + &Integer::power_of_two(s - 1)).fdiv_2exp(s),
        };
        Self::new(man, self.exp + signed_bits(s))
    }

    /// Rounds to nearest at `prec` bits, returning the rounded value and
    /// the exact rounding error `|self − rounded|`.
    #[must_use]
    pub fn round_with_error(&self, prec: u32) -> (Self, Self) {
        let rounded = self.round(prec, Round::Nearest);
        let err = (self - &rounded).abs();
        (rounded, err)
    }

    /// Divides, rounding the quotient to `prec` bits. `None` for a zero
    /// divisor.
    #[must_use]
    pub fn div(&self, other: &Self, prec: u32, mode: Round) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Self::zero());
        }
        // the divisor mantissa must be positive for directed rounding
        let (num, den) = if other.is_negative() {
            (-&self.man, -&other.man)
        } else {
            (self.man.clone(), other.man.clone())
        };
        let k = i64::from(prec.max(1)) + signed_bits(den.bit_len()) - signed_bits(num.bit_len()) + 1;
        let m = if k >= 0 {
            div_round(&num.mul_2exp(shift(k)), &den, mode)
        } else {
            div_round(&num, &den.mul_2exp(shift(-k)), mode)
        };
        Some(Self::new(m, self.exp - other.exp - k))
    }

    /// Largest integer not above `self`.
    #[must_use]
    pub fn floor(&self) -> Integer {
        if self.exp >= 0 {
            self.man.mul_2exp(shift(self.exp))
        } else {
            self.man.fdiv_2exp(shift(-self.exp))
        }
    }

    /// Smallest integer not below `self`.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        if self.exp >= 0 {
            self.man.mul_2exp(shift(self.exp))
        } else {
            self.man.cdiv_2exp(shift(-self.exp))
        }
    }

    /// Nearest `f64`, saturating to infinity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let s = self.man.bit_len().saturating_sub(62);
        let top = self.man.fdiv_2exp(s).to_i64().unwrap_or(0) as f64;
        let e = (self.exp + signed_bits(s)).clamp(-2200, 2200);
        // two steps keep 2^e representable
        let half = i32::try_from(e / 2).unwrap_or(0);
        let rest = i32::try_from(e - e / 2).unwrap_or(0);
        top * 2f64.powi(half) * 2f64.powi(rest)
    }
}

impl PartialOrd for Dyadic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dyadic {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.signum().cmp(&other.signum()) {
            Ordering::Equal => (self - other).signum().cmp(&0),
            unequal => unequal,
        }
    }
}

impl Add for &Dyadic {
    type Output = Dyadic;

    fn add(self, other: &Dyadic) -> Dyadic {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let e = self.exp.min(other.exp);
        let a = self.man.mul_2exp(shift(self.exp - e));
        let b = other.man.mul_2exp(shift(other.exp - e));
        Dyadic::new(a + b, e)
    }
}

impl Add for Dyadic {
    type Output = Dyadic;

    fn add(self, other: Dyadic) -> Dyadic {
        &self + &other
    }
}

impl Sub for &Dyadic {
    type Output = Dyadic;

    fn sub(self, other: &Dyadic) -> Dyadic {
        self + &(-other)
    }
}

impl Sub for Dyadic {
    type Output = Dyadic;

    fn sub(self, other: Dyadic) -> Dyadic {
        &self - &other
    }
}

impl Mul for &Dyadic {
    type Output = Dyadic;

    fn mul(self, other: &Dyadic) -> Dyadic {
        Dyadic::new(&self.man * &other.man, self.exp + other.exp)
    }
}

impl Mul for Dyadic {
    type Output = Dyadic;

    fn mul(self, other: Dyadic) -> Dyadic {
        &self * &other
    }
}

impl Neg for &Dyadic {
    type Output = Dyadic;

    fn neg(self) -> Dyadic {
        Dyadic {
            man: -&self.man,
            exp: self.exp,
        }
    }
}

impl Neg for Dyadic {
    type Output = Dyadic;

    fn neg(self) -> Dyadic {
        -&self
    }
}

impl fmt::Debug for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*2^{}", self.man, self.exp)
    }
}

impl fmt::Display for Dyadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
