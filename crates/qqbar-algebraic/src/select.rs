//! Binary arithmetic and root selection.
//!
//! The result of `x ∘ y` is a root of the composed polynomial. Its
//! irreducible factors are filtered against a ball enclosure of `x ∘ y`
//! at increasing precision until exactly one factor remains and a
//! uniqueness proof pins the root.

use log::debug;
use num_traits::{One, Zero};
use qqbar_ball::ComplexBall;
use qqbar_factor::irreducible_factors;
use qqbar_integers::Rational;
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::algebraic::AlgebraicNumber;
use crate::compare::equal;
use crate::composed::composed_op;
use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::guess::guess;
use crate::refine::{rational_root, settle, validate_uniqueness};
use crate::scalar::{inv, scalar_op};

/// A field operation on two algebraic numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `x + y`
    Add,
    /// `x − y`
    Sub,
    /// `x · y`
    Mul,
    /// `x / y`
    Div,
}

impl BinaryOp {
    /// Applies the operation in ball arithmetic; `None` for a quotient by
    /// a ball containing zero.
    #[must_use]
    pub fn apply(self, a: &ComplexBall, b: &ComplexBall, prec: u32) -> Option<ComplexBall> {
        match self {
            Self::Add => Some(a.add(b, prec)),
            Self::Sub => Some(a.sub(b, prec)),
            Self::Mul => Some(a.mul(b, prec)),
            Self::Div => a.div(b, prec),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division",
        }
    }
}

/// Computes `x ∘ y` exactly.
///
/// # Errors
///
/// `DivisionByZero` for a quotient by zero; `DegreeLimit` if the composed
/// polynomial is too large; `NoConvergence` at the precision ceiling.
pub fn binary_op(x: &AlgebraicNumber, y: &AlgebraicNumber, op: BinaryOp) -> Result<AlgebraicNumber> {
    if op == BinaryOp::Div && y.is_zero() {
        return Err(QqbarError::DivisionByZero);
    }
    let one = Rational::one();
    let zero = Rational::zero();
    if let Some(q) = y.to_rational() {
        return match op {
            BinaryOp::Add => scalar_op(x, &one, &q, &one),
            BinaryOp::Sub => scalar_op(x, &one, &-&q, &one),
            BinaryOp::Mul => scalar_op(x, &q, &zero, &one),
            BinaryOp::Div => scalar_op(x, &one, &zero, &q),
        };
    }
    if let Some(p) = x.to_rational() {
        return match op {
            BinaryOp::Add => scalar_op(y, &one, &p, &one),
            BinaryOp::Sub => scalar_op(y, &-&one, &p, &one),
            BinaryOp::Mul => scalar_op(y, &p, &zero, &one),
            BinaryOp::Div => scalar_op(&inv(y)?, &p, &zero, &one),
        };
    }
    if x.poly == y.poly && equal(x, y)? {
        match op {
            BinaryOp::Add => return scalar_op(x, &Rational::from_i64(2, 1), &zero, &one),
            BinaryOp::Sub => return Ok(AlgebraicNumber::zero()),
            BinaryOp::Div => return Ok(AlgebraicNumber::one()),
            BinaryOp::Mul => {}
        }
    }

    let config = QqbarConfig::global();
    if x.degree() == y.degree() && x.degree() >= config.guess_min_degree {
        if let Some(r) = guess_rational(x, y, op)? {
            return Ok(r);
        }
    }

    let h = composed_op(&x.poly, &y.poly, op)?;
    debug!("{}: composed polynomial of degree {}", op.name(), h.degree());
    select_root(&irreducible_factors(&h), op.name(), |prec| {
        let a = x.numerical_value(prec)?;
        let b = y.numerical_value(prec)?;
        Ok(op.apply(&a, &b, prec))
    })
}

/// Tries to recognise `x ∘ y` as a rational and proves the guess by
/// undoing the operation.
fn guess_rational(x: &AlgebraicNumber, y: &AlgebraicNumber, op: BinaryOp) -> Result<Option<AlgebraicNumber>> {
    let prec = QqbarConfig::global().default_prec;
    let (a, b) = (x.numerical_value(prec)?, y.numerical_value(prec)?);
    let Some(w) = op.apply(&a, &b, prec) else {
        return Ok(None);
    };
    let Some(candidate) = guess(&w, 1, QqbarConfig::global().guess_max_bits) else {
        return Ok(None);
    };
    let undone = match op {
        BinaryOp::Add => binary_op(&candidate, y, BinaryOp::Sub)?,
        BinaryOp::Sub => binary_op(&candidate, y, BinaryOp::Add)?,
        BinaryOp::Mul => binary_op(&candidate, y, BinaryOp::Div)?,
        BinaryOp::Div => binary_op(&candidate, y, BinaryOp::Mul)?,
    };
    if equal(&undone, x)? {
        debug!("{}: result recognised as {candidate}", op.name());
        return Ok(Some(candidate));
    }
    Ok(None)
}

/// Picks the factor holding the value enclosed by `eval(prec)`.
///
/// `eval` returns a ball around the target, or `None` when the ball
/// arithmetic could not produce one at this precision. The target must
/// be a root of the product of `factors`.
pub(crate) fn select_root(
    factors: &[DensePoly<Z>],
    operation: &'static str,
    eval: impl Fn(u32) -> Result<Option<ComplexBall>>,
) -> Result<AlgebraicNumber> {
    let config = QqbarConfig::global();
    let mut prec = config.default_prec;
    loop {
        if let Some(w) = eval(prec)? {
            let mut candidates = factors.iter().filter(|f| may_vanish(f, &w, prec));
            if let (Some(f), None) = (candidates.next(), candidates.next()) {
                if f.degree() == 1 {
                    return Ok(AlgebraicNumber::from_rational(&rational_root(f)));
                }
                if let Some(t) = validate_uniqueness(f, &w, prec) {
                    let z = settle(f, &t, prec)?;
                    return Ok(AlgebraicNumber::from_parts(f.clone(), z));
                }
            }
        }
        prec = prec.saturating_mul(2);
        if prec > config.max_prec {
            return Err(QqbarError::NoConvergence { operation, prec });
        }
        debug!("{operation}: {} candidate factors, raising precision to {prec}", factors.len());
    }
}

fn may_vanish(f: &DensePoly<Z>, w: &ComplexBall, prec: u32) -> bool {
    if f.degree() == 1 {
        return w.re().contains_rational(&rational_root(f)) && w.im().contains_zero();
    }
    w.eval_poly(f, prec).contains_zero()
}
