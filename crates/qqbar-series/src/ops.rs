//! Arithmetic operations on power series.
//!
//! Ring operations work over any ring; reciprocal, integral, exponential
//! and the Borel pair need division and are defined over a field.

use qqbar_rings::traits::{Field, Ring};

use crate::power_series::PowerSeries;

impl<R: Ring> PowerSeries<R> {
    /// Adds two power series.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let precision = self.precision().min(other.precision());
        Self::from_coeffs(
            (0..precision)
                .map(|n| self.coeff(n) + other.coeff(n))
                .collect(),
        )
    }

    /// Subtracts two power series.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let precision = self.precision().min(other.precision());
        Self::from_coeffs(
            (0..precision)
                .map(|n| self.coeff(n) - other.coeff(n))
                .collect(),
        )
    }

    /// Negates a power series.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::from_coeffs(self.coeffs().iter().map(|c| -c.clone()).collect())
    }

    /// Scales a power series by a constant.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        Self::from_coeffs(self.coeffs().iter().map(|a| a.clone() * c.clone()).collect())
    }

    /// Multiplies two power series (Cauchy product).
    ///
    /// (f * g)_n = Σᵢ f_i * g_{n-i}
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let precision = self.precision().min(other.precision());
        let a = self.coeffs();
        let b = other.coeffs();
        let mut result = vec![R::zero(); precision];
        for (i, x) in a.iter().enumerate().take(precision) {
            if x.is_zero() {
                continue;
            }
            for (j, y) in b.iter().enumerate().take(precision - i) {
                result[i + j] = result[i + j].clone() + x.clone() * y.clone();
            }
        }
        Self::from_coeffs(result)
    }

    /// Hadamard product: `(f ⊙ g)_n = f_n · g_n`.
    #[must_use]
    pub fn hadamard(&self, other: &Self) -> Self {
        let precision = self.precision().min(other.precision());
        Self::from_coeffs(
            (0..precision)
                .map(|n| self.coeff(n) * other.coeff(n))
                .collect(),
        )
    }

    /// Computes the formal derivative.
    ///
    /// (f')_n = (n+1) * f_{n+1}; the precision drops by one.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs()
                .iter()
                .enumerate()
                .skip(1)
                .map(|(n, c)| c.mul_by_scalar(n as i64))
                .collect(),
        )
    }
}

impl<F: Field> PowerSeries<F> {
    /// Reciprocal `1/f`, or `None` if `f(0) = 0`.
    ///
    /// From `f·g = 1`: `g_n = −(1/f_0) Σ_{i=1..n} f_i g_{n−i}`.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let f0_inv = self.coeff(0).inv()?;
        let precision = self.precision();
        let mut g: Vec<F> = Vec::with_capacity(precision);

        for n in 0..precision {
            if n == 0 {
                g.push(f0_inv.clone());
                continue;
            }
            let mut sum = F::zero();
            for i in 1..=n {
                let fi = self.coeff(i);
                if !fi.is_zero() {
                    sum = sum + fi * g[n - i].clone();
                }
            }
            g.push(-(sum * f0_inv.clone()));
        }

        Some(Self::from_coeffs(g))
    }

    /// Quotient `f/g`, or `None` if `g(0) = 0`.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        Some(self.mul(&other.inverse()?))
    }

    /// Antiderivative with zero constant term; the precision grows by one.
    #[must_use]
    pub fn integral(&self) -> Self {
        let mut coeffs = Vec::with_capacity(self.precision() + 1);
        coeffs.push(F::zero());
        for (n, c) in self.coeffs().iter().enumerate() {
            coeffs.push(c.clone() * inv_int::<F>(n + 1));
        }
        Self::from_coeffs(coeffs)
    }

    /// Exponential `exp(f)`, or `None` if `f(0) ≠ 0`.
    ///
    /// From `g' = f'·g`: `n·g_n = Σ_{k=1..n} k·f_k·g_{n−k}`.
    #[must_use]
    pub fn exp(&self) -> Option<Self> {
        if !self.coeff(0).is_zero() {
            return None;
        }
        let precision = self.precision();
        let mut g: Vec<F> = Vec::with_capacity(precision);

        for n in 0..precision {
            if n == 0 {
                g.push(F::one());
                continue;
            }
            let mut sum = F::zero();
            for k in 1..=n {
                let fk = self.coeff(k);
                if !fk.is_zero() {
                    sum = sum + fk.mul_by_scalar(k as i64) * g[n - k].clone();
                }
            }
            g.push(sum * inv_int::<F>(n));
        }

        Some(Self::from_coeffs(g))
    }

    /// Borel transform: `a_n ↦ a_n / n!`.
    #[must_use]
    pub fn borel(&self) -> Self {
        let mut fact_inv = F::one();
        let mut coeffs = Vec::with_capacity(self.precision());
        for (n, c) in self.coeffs().iter().enumerate() {
            if n > 0 {
                fact_inv = fact_inv * inv_int::<F>(n);
            }
            coeffs.push(c.clone() * fact_inv.clone());
        }
        Self::from_coeffs(coeffs)
    }

    /// Inverse Borel transform: `a_n ↦ a_n · n!`.
    #[must_use]
    pub fn inverse_borel(&self) -> Self {
        let mut fact = F::one();
        let mut coeffs = Vec::with_capacity(self.precision());
        for (n, c) in self.coeffs().iter().enumerate() {
            if n > 0 {
                fact = fact.mul_by_scalar(n as i64);
            }
            coeffs.push(c.clone() * fact.clone());
        }
        Self::from_coeffs(coeffs)
    }
}

fn inv_int<F: Field>(n: usize) -> F {
    match F::from_i64(n as i64).inv() {
        Some(inv) => inv,
        None => unreachable!("positive integers are units in characteristic zero"),
    }
}
