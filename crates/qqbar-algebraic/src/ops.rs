//! Operator and ring-trait integration.
//!
//! The operators panic where the fallible API returns an error, the way
//! `Rational` division panics on a zero divisor.

use std::ops::{Add, Div, Mul, Neg, Sub};

use qqbar_rings::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

use crate::algebraic::AlgebraicNumber;
use crate::error::Result;
use crate::select::{binary_op, BinaryOp};

fn checked(result: Result<AlgebraicNumber>, operation: &str) -> AlgebraicNumber {
    match result {
        Ok(x) => x,
        Err(e) => panic!("algebraic {operation} failed: {e}"),
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr, $name:literal) => {
        impl $trait for &AlgebraicNumber {
            type Output = AlgebraicNumber;

            fn $method(self, rhs: Self) -> AlgebraicNumber {
                checked(binary_op(self, rhs, $op), $name)
            }
        }

        impl $trait<&AlgebraicNumber> for AlgebraicNumber {
            type Output = AlgebraicNumber;

            fn $method(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
                checked(binary_op(&self, rhs, $op), $name)
            }
        }

        impl $trait for AlgebraicNumber {
            type Output = AlgebraicNumber;

            fn $method(self, rhs: Self) -> AlgebraicNumber {
                checked(binary_op(&self, &rhs, $op), $name)
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add, "addition");
impl_binary_op!(Sub, sub, BinaryOp::Sub, "subtraction");
impl_binary_op!(Mul, mul, BinaryOp::Mul, "multiplication");
impl_binary_op!(Div, div, BinaryOp::Div, "division");

impl Neg for AlgebraicNumber {
    type Output = Self;

    fn neg(self) -> Self {
        AlgebraicNumber::neg(&self)
    }
}

impl Neg for &AlgebraicNumber {
    type Output = AlgebraicNumber;

    fn neg(self) -> AlgebraicNumber {
        AlgebraicNumber::neg(self)
    }
}

impl Ring for AlgebraicNumber {
    fn zero() -> Self {
        AlgebraicNumber::zero()
    }

    fn one() -> Self {
        AlgebraicNumber::one()
    }

    fn is_zero(&self) -> bool {
        AlgebraicNumber::is_zero(self)
    }

    fn is_one(&self) -> bool {
        AlgebraicNumber::is_one(self)
    }

    fn from_i64(n: i64) -> Self {
        AlgebraicNumber::from_i64(n)
    }

    fn pow(&self, n: u32) -> Self {
        checked(self.pow_ui(n), "power")
    }
}

impl CommutativeRing for AlgebraicNumber {}
impl IntegralDomain for AlgebraicNumber {}

impl EuclideanDomain for AlgebraicNumber {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (self / other, AlgebraicNumber::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if AlgebraicNumber::is_zero(self) && AlgebraicNumber::is_zero(other) {
            AlgebraicNumber::zero()
        } else {
            AlgebraicNumber::one()
        }
    }
}

impl Field for AlgebraicNumber {
    fn inv(&self) -> Option<Self> {
        AlgebraicNumber::inv(self).ok()
    }
}
