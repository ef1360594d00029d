//! The truncated power series type.

use qqbar_poly::DensePoly;
use qqbar_rings::traits::Ring;

/// A power series `Σ a_n x^n` known modulo `x^precision`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerSeries<R: Ring> {
    coeffs: Vec<R>,
}

impl<R: Ring> PowerSeries<R> {
    /// Creates a series from its first coefficients.
    ///
    /// The precision is the number of coefficients given.
    #[must_use]
    pub fn from_coeffs(coeffs: Vec<R>) -> Self {
        Self { coeffs }
    }

    /// Truncates a polynomial to `precision` terms.
    #[must_use]
    pub fn from_poly(p: &DensePoly<R>, precision: usize) -> Self {
        Self::from_coeffs((0..precision).map(|i| p.coeff(i)).collect())
    }

    /// The zero series.
    #[must_use]
    pub fn zero(precision: usize) -> Self {
        Self::from_coeffs(vec![R::zero(); precision])
    }

    /// The constant series `c`.
    #[must_use]
    pub fn constant(c: R, precision: usize) -> Self {
        let mut coeffs = vec![R::zero(); precision];
        if let Some(first) = coeffs.first_mut() {
            *first = c;
        }
        Self::from_coeffs(coeffs)
    }

    /// Number of known coefficients.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.coeffs.len()
    }

    /// Coefficient of `x^n` (zero past the precision).
    #[must_use]
    pub fn coeff(&self, n: usize) -> R {
        self.coeffs.get(n).cloned().unwrap_or_else(R::zero)
    }

    /// The known coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Converts the known part to a polynomial.
    #[must_use]
    pub fn to_poly(&self) -> DensePoly<R> {
        DensePoly::new(self.coeffs.clone())
    }

    /// Changes the precision, padding with zeros or dropping terms.
    #[must_use]
    pub fn truncate(&self, precision: usize) -> Self {
        Self::from_coeffs((0..precision).map(|i| self.coeff(i)).collect())
    }
}
