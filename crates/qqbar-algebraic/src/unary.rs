//! Unary operations: negation, conjugation, parts, absolute value and
//! signs.

use num_traits::{One, Zero};
use qqbar_integers::Rational;
use qqbar_poly::integer::primitive_part;

use crate::algebraic::AlgebraicNumber;
use crate::compare::{sgn_im, sgn_re};
use crate::error::Result;
use crate::scalar::{self, scalar_op};
use crate::select::{binary_op, BinaryOp};

impl AlgebraicNumber {
    /// `−x`.
    #[must_use]
    pub fn neg(&self) -> Self {
        if let Some(q) = self.to_rational() {
            return Self::from_rational(&-q);
        }
        Self::from_parts(primitive_part(&self.poly.negate_variable()), self.enclosure.neg())
    }

    /// The complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        if self.is_real() {
            return self.clone();
        }
        Self::from_parts(self.poly.clone(), self.enclosure.conj())
    }

    /// The real part `(x + conj(x))/2`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn re(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(self.clone());
        }
        let sum = binary_op(self, &self.conj(), BinaryOp::Add)?;
        scalar_op(&sum, &Rational::from_i64(1, 2), &Rational::zero(), &Rational::one())
    }

    /// The imaginary part `(x − conj(x))/(2i)`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn im(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(Self::zero());
        }
        // i·(x − conj x) = −2·im(x)
        let diff = binary_op(self, &self.conj(), BinaryOp::Sub)?;
        let rotated = binary_op(&diff, &Self::i(), BinaryOp::Mul)?;
        scalar_op(&rotated, &Rational::from_i64(-1, 2), &Rational::zero(), &Rational::one())
    }

    /// `|x|²`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn abs2(&self) -> Result<Self> {
        if self.is_real() {
            return self.pow_ui(2);
        }
        binary_op(self, &self.conj(), BinaryOp::Mul)
    }

    /// `|x|`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn abs(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(if sgn_re(self)? < 0 { self.neg() } else { self.clone() });
        }
        self.abs2()?.root_ui(2)
    }

    /// `x/|x|`, or zero for zero.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn sgn(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if self.is_real() {
            return Ok(Self::from_i64(i64::from(sgn_re(self)?)));
        }
        binary_op(self, &self.abs()?, BinaryOp::Div)
    }

    /// The sign of the real part, or of the imaginary part when the real
    /// part is zero; zero only for zero.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn csgn(&self) -> Result<i8> {
        match sgn_re(self)? {
            0 => sgn_im(self),
            s => Ok(s),
        }
    }

    /// `1/x`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for zero; `NoConvergence` at the precision
    /// ceiling.
    pub fn inv(&self) -> Result<Self> {
        scalar::inv(self)
    }

    /// `x · 2^k`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn mul_2exp(&self, k: i64) -> Result<Self> {
        scalar::mul_2exp(self, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_poly::integer::from_i64s;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_negation() {
        let phi = AlgebraicNumber::phi();
        let m = phi.neg();
        assert_eq!(m.poly(), &from_i64s(&[-1, 1, 1]));
        assert!(m.enclosure().re().is_negative());
        assert_eq!(m.neg(), phi);
    }

    #[test]
    fn test_parts_of_gaussian_rational() {
        let z = AlgebraicNumber::from_re_im(&q(3, 2), &q(-5, 1)).unwrap();
        assert_eq!(z.re().unwrap().to_rational(), Some(q(3, 2)));
        assert_eq!(z.im().unwrap().to_rational(), Some(q(-5, 1)));
        assert_eq!(z.abs2().unwrap().to_rational(), Some(q(109, 4)));
        assert_eq!(z.csgn().unwrap(), 1);
        assert_eq!(z.conj().im().unwrap().to_rational(), Some(q(5, 1)));
    }

    #[test]
    fn test_absolute_value() {
        let z = AlgebraicNumber::from_re_im(&q(3, 1), &q(4, 1)).unwrap();
        assert_eq!(z.abs().unwrap().to_rational(), Some(q(5, 1)));
        let w = AlgebraicNumber::from_re_im(&q(1, 1), &q(1, 1)).unwrap();
        let r = w.abs().unwrap();
        assert_eq!(r.poly(), &from_i64s(&[-2, 0, 1]));
        assert!(r.enclosure().re().is_positive());
        let m = AlgebraicNumber::phi().neg().abs().unwrap();
        assert_eq!(m, AlgebraicNumber::phi());
    }

    #[test]
    fn test_sign() {
        let z = AlgebraicNumber::from_re_im(&q(0, 1), &q(-7, 1)).unwrap();
        assert_eq!(z.sgn().unwrap(), AlgebraicNumber::i().neg());
        assert_eq!(z.csgn().unwrap(), -1);
        assert_eq!(AlgebraicNumber::phi().neg().sgn().unwrap().to_rational(), Some(q(-1, 1)));
        assert!(AlgebraicNumber::zero().sgn().unwrap().is_zero());
    }
}
