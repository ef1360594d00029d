//! Polynomials over the prime field F_p with a runtime modulus.
//!
//! Coefficients are `u64` residues in `[0, p)`; products go through
//! `u128`, so any prime below 2^63 is supported.

use num_traits::Zero;
use qqbar_integers::Integer;
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

/// A polynomial over F_p, coefficients ascending, no trailing zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModPoly {
    p: u64,
    coeffs: Vec<u64>,
}

fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(p)) as u64
}

fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    let s = a + b;
    if s >= p {
        s - p
    } else {
        s
    }
}

fn sub_mod(a: u64, b: u64, p: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a + (p - b)
    }
}

/// `a^e mod p`.
#[must_use]
pub fn pow_mod_u64(mut a: u64, mut e: u64, p: u64) -> u64 {
    let mut result = 1 % p;
    a %= p;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, a, p);
        }
        a = mul_mod(a, a, p);
        e >>= 1;
    }
    result
}

/// Inverse of a non-zero residue modulo the prime `p`.
#[must_use]
pub fn inv_mod_u64(a: u64, p: u64) -> u64 {
    pow_mod_u64(a, p - 2, p)
}

/// Reduces an integer into `[0, p)`.
#[must_use]
pub fn reduce_integer(c: &Integer, p: u64) -> u64 {
    let (_, r) = c.div_rem_floor(&Integer::from(p));
    r.to_u64().unwrap_or(0)
}

impl ModPoly {
    /// Creates a polynomial, reducing and trimming the coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<u64>, p: u64) -> Self {
        for c in &mut coeffs {
            *c %= p;
        }
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Self { p, coeffs }
    }

    /// Reduces an integer polynomial modulo `p`.
    #[must_use]
    pub fn from_z(f: &DensePoly<Z>, p: u64) -> Self {
        Self::new(f.coeffs().iter().map(|c| reduce_integer(&c.0, p)).collect(), p)
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero(p: u64) -> Self {
        Self {
            p,
            coeffs: Vec::new(),
        }
    }

    /// The constant polynomial 1.
    #[must_use]
    pub fn one(p: u64) -> Self {
        Self::new(vec![1], p)
    }

    /// The polynomial x.
    #[must_use]
    pub fn x(p: u64) -> Self {
        Self::new(vec![0, 1], p)
    }

    /// The modulus.
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Coefficients in ascending order (empty for zero).
    #[must_use]
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree; zero for constants and for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Leading coefficient (zero for the zero polynomial).
    #[must_use]
    pub fn leading_coeff(&self) -> u64 {
        self.coeffs.last().copied().unwrap_or(0)
    }

    /// Lifts the residues to an integer polynomial with coefficients in `[0, p)`.
    #[must_use]
    pub fn to_z(&self) -> DensePoly<Z> {
        DensePoly::new(self.coeffs.iter().map(|&c| Z(Integer::from(c))).collect())
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| add_mod(self.coeff(i), other.coeff(i), self.p))
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| sub_mod(self.coeff(i), other.coeff(i), self.p))
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.p);
        }
        let mut result = vec![0u64; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                result[i + j] = add_mod(result[i + j], mul_mod(a, b, self.p), self.p);
            }
        }
        Self::new(result, self.p)
    }

    /// Multiplies by a residue.
    #[must_use]
    pub fn scale(&self, c: u64) -> Self {
        Self::new(
            self.coeffs.iter().map(|&a| mul_mod(a, c, self.p)).collect(),
            self.p,
        )
    }

    /// Division with remainder.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by zero polynomial");
        let p = self.p;
        if self.coeffs.len() < other.coeffs.len() {
            return (Self::zero(p), self.clone());
        }
        let m = other.coeffs.len();
        let lead_inv = inv_mod_u64(other.leading_coeff(), p);
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0u64; rem.len() - m + 1];

        for k in (0..quot.len()).rev() {
            let c = mul_mod(rem[k + m - 1], lead_inv, p);
            if c == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                rem[k + j] = sub_mod(rem[k + j], mul_mod(c, b, p), p);
            }
            quot[k] = c;
        }
        rem.truncate(m - 1);
        (Self::new(quot, p), Self::new(rem, p))
    }

    /// Remainder modulo `other`.
    #[must_use]
    pub fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Scales to a monic polynomial (zero stays zero).
    #[must_use]
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        self.scale(inv_mod_u64(self.leading_coeff(), self.p))
    }

    /// Monic gcd.
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

    /// Extended gcd: `(g, s, t)` with `s·self + t·other = g`, `g` monic.
    #[must_use]
    pub fn ext_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let p = self.p;
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(p), Self::zero(p));
        let (mut t0, mut t1) = (Self::zero(p), Self::one(p));

        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            let s = s0.sub(&q.mul(&s1));
            let t = t0.sub(&q.mul(&t1));
            r0 = std::mem::replace(&mut r1, r);
            s0 = std::mem::replace(&mut s1, s);
            t0 = std::mem::replace(&mut t1, t);
        }

        if r0.is_zero() {
            return (r0, s0, t0);
        }
        let inv = inv_mod_u64(r0.leading_coeff(), p);
        (r0.scale(inv), s0.scale(inv), t0.scale(inv))
    }

    /// `self^e mod m`.
    #[must_use]
    pub fn pow_mod(&self, mut e: u64, m: &Self) -> Self {
        let mut result = Self::one(self.p).rem(m);
        let mut base = self.rem(m);
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base).rem(m);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base).rem(m);
            }
        }
        result
    }

    /// Formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| mul_mod(c, (i as u64) % self.p, self.p))
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Returns true if `gcd(self, self') = 1`.
    #[must_use]
    pub fn is_squarefree(&self) -> bool {
        let d = self.derivative();
        !d.is_zero() && self.gcd(&d).degree() == 0
    }

    fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }
}

/// Tests primality of a small integer by trial division.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Symmetric residue of `c` modulo `m`, in `(-m/2, m/2]`.
#[must_use]
pub fn symmetric_mod(c: &Integer, m: &Integer) -> Integer {
    let (_, r) = c.div_rem_floor(m);
    if r.mul_2exp(1) > *m {
        r - m
    } else {
        r
    }
}

/// Reduces every coefficient into `[0, m)`.
#[must_use]
pub fn reduce_poly(f: &DensePoly<Z>, m: &Integer) -> DensePoly<Z> {
    DensePoly::new(f.coeffs().iter().map(|c| Z(c.0.div_rem_floor(m).1)).collect())
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) = 1`.
#[must_use]
pub fn inv_mod_integer(a: &Integer, m: &Integer) -> Option<Integer> {
    let (mut r0, mut r1) = (a.div_rem_floor(m).1, m.clone());
    let (mut s0, mut s1) = (Integer::from(1), Integer::zero());
    while !r1.is_zero() {
        let (q, r) = r0.div_rem_floor(&r1);
        let s = &s0 - &(&q * &s1);
        r0 = std::mem::replace(&mut r1, r);
        s0 = std::mem::replace(&mut s1, s);
    }
    if r0 == Integer::from(1) {
        Some(s0.div_rem_floor(m).1)
    } else {
        None
    }
}
