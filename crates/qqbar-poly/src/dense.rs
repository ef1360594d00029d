//! Dense univariate polynomials.
//!
//! Coefficients are kept in ascending degree order and normalised so the
//! leading coefficient is non-zero (the zero polynomial is `[0]`).

use std::fmt;

use qqbar_rings::traits::{Field, Ring};

/// Operand length (in coefficients) at which Karatsuba takes over.
const KARATSUBA_THRESHOLD: usize = 32;

/// A dense univariate polynomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DensePoly<R: Ring> {
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients in ascending order.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(R::is_zero) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }
        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree (0 for constants, including zero).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true if this is a constant polynomial.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients in ascending order.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Consumes the polynomial and returns its coefficients.
    #[must_use]
    pub fn into_coeffs(self) -> Vec<R> {
        self.coeffs
    }

    /// Applies `f` to every coefficient.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, f: impl Fn(&R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().map(f).collect())
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (long, short) = if self.coeffs.len() >= other.coeffs.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = long.coeffs.clone();
        for (r, c) in result.iter_mut().zip(&short.coeffs) {
            *r = r.clone() + c.clone();
        }
        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self::new(mul_slices(&self.coeffs, &other.coeffs))
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c.mul_by_scalar(i as i64))
                .collect(),
        )
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }

        result
    }

    /// Computes `self(other(x))` by Horner's rule.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = result.mul(other).add(&Self::constant(c.clone()));
        }
        result
    }

    /// Returns the reversal `x^deg · self(1/x)`.
    ///
    /// Trailing zero coefficients of `self` lower the degree of the result.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.coeffs.iter().rev().cloned().collect())
    }

    /// Returns `self(-x)`.
    #[must_use]
    pub fn negate_variable(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
                .collect(),
        )
    }

    /// Returns `self(x^n)`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn inflate(&self, n: usize) -> Self {
        assert!(n > 0, "inflation by zero");
        let mut coeffs = vec![R::zero(); self.degree() * n + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * n] = c.clone();
        }
        Self::new(coeffs)
    }

    /// Returns true if only even powers of x occur.
    #[must_use]
    pub fn is_even(&self) -> bool {
        self.coeffs.iter().skip(1).step_by(2).all(R::is_zero)
    }

    /// Returns true if only odd powers of x occur.
    #[must_use]
    pub fn is_odd(&self) -> bool {
        self.coeffs.iter().step_by(2).all(R::is_zero)
    }

    /// Number of leading-order zero coefficients, i.e. the multiplicity
    /// of the root 0. The zero polynomial reports 0.
    #[must_use]
    pub fn valuation(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        self.coeffs.iter().take_while(|c| c.is_zero()).count()
    }
}

impl<F: Field> DensePoly<F> {
    /// Divides by `other`, returning (quotient, remainder).
    ///
    /// # Panics
    ///
    /// Panics if `other` is the zero polynomial.
    #[must_use]
    pub fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by zero polynomial");
        if self.degree() < other.degree() {
            return (Self::zero(), self.clone());
        }

        let Some(lead_inv) = other.leading_coeff().inv() else {
            unreachable!("non-zero leading coefficient over a field");
        };
        let m = other.coeffs.len();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![F::zero(); rem.len() - m + 1];

        for k in (0..quot.len()).rev() {
            let c = rem[k + m - 1].clone() * lead_inv.clone();
            if c.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                rem[k + j] = rem[k + j].clone() - c.clone() * b.clone();
            }
            quot[k] = c;
        }

        rem.truncate(m - 1);
        (Self::new(quot), Self::new(rem))
    }

    /// Returns the remainder of division by `other`.
    #[must_use]
    pub fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Scales to leading coefficient 1 (zero stays zero).
    #[must_use]
    pub fn monic(&self) -> Self {
        match self.leading_coeff().inv() {
            Some(inv) if !self.is_zero() => self.scale(&inv),
            _ => self.clone(),
        }
    }

    /// Monic greatest common divisor by the Euclidean algorithm.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }
}

fn mul_slices<R: Ring>(a: &[R], b: &[R]) -> Vec<R> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    if a.len() < KARATSUBA_THRESHOLD || b.len() < KARATSUBA_THRESHOLD {
        return mul_schoolbook(a, b);
    }
    mul_karatsuba(a, b)
}

fn mul_schoolbook<R: Ring>(a: &[R], b: &[R]) -> Vec<R> {
    let mut result = vec![R::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (j, y) in b.iter().enumerate() {
            result[i + j] = result[i + j].clone() + x.clone() * y.clone();
        }
    }
    result
}

/// Splits both operands at `half` coefficients:
/// `a·b = z2·x^(2h) + ((a0+a1)(b0+b1) − z0 − z2)·x^h + z0`.
fn mul_karatsuba<R: Ring>(a: &[R], b: &[R]) -> Vec<R> {
    let half = a.len().max(b.len()).div_ceil(2);
    let split = |s: &[R]| -> (Vec<R>, Vec<R>) {
        if s.len() <= half {
            (s.to_vec(), Vec::new())
        } else {
            (s[..half].to_vec(), s[half..].to_vec())
        }
    };
    let (a0, a1) = split(a);
    let (b0, b1) = split(b);

    let z0 = mul_slices(&a0, &b0);
    let z2 = mul_slices(&a1, &b1);
    let z1 = mul_slices(&add_slices(&a0, &a1), &add_slices(&b0, &b1));

    // Padded sums may carry zero coefficients past the true product length.
    let len = (a.len() + b.len() - 1)
        .max(z0.len() + half)
        .max(z1.len() + half)
        .max(z2.len() + 2 * half);
    let mut result = vec![R::zero(); len];
    for (i, c) in z0.iter().enumerate() {
        result[i] = result[i].clone() + c.clone();
        result[i + half] = result[i + half].clone() - c.clone();
    }
    for (i, c) in z2.iter().enumerate() {
        result[i + 2 * half] = result[i + 2 * half].clone() + c.clone();
        result[i + half] = result[i + half].clone() - c.clone();
    }
    for (i, c) in z1.iter().enumerate() {
        result[i + half] = result[i + half].clone() + c.clone();
    }
    result.truncate(a.len() + b.len() - 1);
    result
}

fn add_slices<R: Ring>(a: &[R], b: &[R]) -> Vec<R> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => x.clone() + y.clone(),
            (Some(x), None) | (None, Some(x)) => x.clone(),
            (None, None) => R::zero(),
        })
        .collect()
}

/// Prints in descending order, e.g. `x^2 - 2`.
impl<R: Ring + fmt::Display> fmt::Display for DensePoly<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let text = c.to_string();
            let (negative, magnitude) = match text.strip_prefix('-') {
                Some(rest) => (true, rest.to_string()),
                None => (false, text),
            };
            if first {
                if negative {
                    write!(f, "-")?;
                }
            } else if negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;

            let unit = magnitude == "1";
            match i {
                0 => write!(f, "{magnitude}")?,
                1 if unit => write!(f, "x")?,
                1 => write!(f, "{magnitude}*x")?,
                _ if unit => write!(f, "x^{i}")?,
                _ => write!(f, "{magnitude}*x^{i}")?,
            }
        }
        Ok(())
    }
}
