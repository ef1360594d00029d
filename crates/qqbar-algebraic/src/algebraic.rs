//! The algebraic-number type.

use std::fmt;

use num_traits::{One, Zero};
use qqbar_ball::{ComplexBall, RealBall};
use qqbar_factor::irreducible_factors;
use qqbar_integers::{Integer, Rational};
use qqbar_poly::integer::{from_i64s, height, height_bits, linear_from_rational};
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::refine::{rational_ball, rational_root, refine, settle, validate_existence_and_uniqueness};
use crate::scalar::scalar_op;

/// An algebraic number `(P, z)`: a root of the primitive irreducible
/// integer polynomial `P` (positive leading coefficient), singled out by
/// the complex box `z` that contains no other root of `P`.
///
/// Rationals are the degree-1 case `q·x − p` for `p/q`. A real number
/// always carries a box with an exactly zero imaginary part. Equality is
/// semantic: two values are equal when they share `P` and their boxes
/// denote the same root.
#[derive(Clone, Debug)]
pub struct AlgebraicNumber {
    pub(crate) poly: DensePoly<Z>,
    pub(crate) enclosure: ComplexBall,
}

impl AlgebraicNumber {
    /// Assembles a value from a minimal polynomial and an isolating
    /// enclosure already proven to be canonical.
    pub(crate) fn from_parts(poly: DensePoly<Z>, enclosure: ComplexBall) -> Self {
        Self { poly, enclosure }
    }

    /// An integer.
    #[must_use]
    pub fn from_integer(n: &Integer) -> Self {
        Self::from_rational(&Rational::from_integer(n.clone()))
    }

    /// A machine integer.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self::from_integer(&Integer::new(n))
    }

    /// A rational number.
    #[must_use]
    pub fn from_rational(q: &Rational) -> Self {
        let prec = QqbarConfig::global().default_prec;
        Self::from_parts(linear_from_rational(q), rational_ball(q, prec))
    }

    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self::from_parts(from_i64s(&[1, 0, 1]), ComplexBall::i())
    }

    /// The golden ratio `(1 + √5)/2`.
    #[must_use]
    pub fn phi() -> Self {
        let prec = QqbarConfig::global().default_prec;
        let five = RealBall::from_i64(5);
        // √5 exists, and the other root −0.618… is far from the ball
        let root = five.sqrt(prec).unwrap_or_else(|| RealBall::from_i64(2));
        let ball = root.add(&RealBall::one(), prec).mul_2exp(-1);
        Self::from_parts(from_i64s(&[-1, -1, 1]), ComplexBall::from_real(ball))
    }

    /// The principal square root of a rational.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn sqrt(q: &Rational) -> Result<Self> {
        Self::from_rational(q).root_ui(2)
    }

    /// `re + i·im`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn from_re_im(re: &Rational, im: &Rational) -> Result<Self> {
        if im.is_zero() {
            return Ok(Self::from_rational(re));
        }
        scalar_op(&Self::i(), im, re, &Rational::one())
    }

    /// The root of `poly` inside a user-supplied box.
    ///
    /// `poly` need not be irreducible or primitive; the value gets the
    /// irreducible factor that has a root in `ball`.
    ///
    /// # Errors
    ///
    /// `ZeroPolynomial` for the zero polynomial; `InvalidEnclosure` unless
    /// exactly one root of `poly` can be proven to lie in `ball`.
    pub fn from_enclosure(poly: &DensePoly<Z>, ball: &ComplexBall) -> Result<Self> {
        if poly.is_zero() {
            return Err(QqbarError::ZeroPolynomial);
        }
        // work a little past the accuracy of the box so that rounding
        // stays below its width
        let config = QqbarConfig::global();
        let prec = u32::try_from(ball.rel_accuracy_bits().saturating_add(32))
            .map_or(config.default_prec, |p| p.clamp(config.default_prec, config.max_prec));
        let mut found = None;
        for f in irreducible_factors(poly) {
            let hit = if f.degree() == 1 {
                let q = rational_root(&f);
                (ball.re().contains_rational(&q) && ball.im().contains_zero()).then(|| rational_ball(&q, prec))
            } else if ball.eval_poly(&f, prec).contains_zero() {
                Some(validate_existence_and_uniqueness(&f, ball, prec).ok_or(QqbarError::InvalidEnclosure)?)
            } else {
                None
            };
            if let Some(z) = hit {
                if found.is_some() {
                    return Err(QqbarError::InvalidEnclosure);
                }
                found = Some((f, z));
            }
        }
        let (f, z) = found.ok_or(QqbarError::InvalidEnclosure)?;
        if f.degree() == 1 {
            return Ok(Self::from_rational(&rational_root(&f)));
        }
        let z = settle(&f, &z, prec)?;
        Ok(Self::from_parts(f, z))
    }

    /// Degree of the minimal polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    /// The minimal polynomial.
    #[must_use]
    pub fn poly(&self) -> &DensePoly<Z> {
        &self.poly
    }

    /// The current isolating enclosure.
    #[must_use]
    pub fn enclosure(&self) -> &ComplexBall {
        &self.enclosure
    }

    /// Largest absolute coefficient of the minimal polynomial.
    #[must_use]
    pub fn height(&self) -> Integer {
        height(&self.poly)
    }

    /// Bit length of the height.
    #[must_use]
    pub fn height_bits(&self) -> usize {
        height_bits(&self.poly)
    }

    /// Returns true for rationals.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    /// Returns true for integers.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_rational() && self.poly.coeff(1).0.is_one()
    }

    /// Returns true if the minimal polynomial is monic.
    #[must_use]
    pub fn is_algebraic_integer(&self) -> bool {
        self.poly.leading_coeff().0.is_one()
    }

    /// Returns true for real numbers.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.enclosure.is_real()
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_rational() && self.poly.coeff(0).0.is_zero()
    }

    /// Returns true for one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_integer() && self.poly.coeff(0).0 == Integer::new(-1)
    }

    /// The exact value of a rational.
    #[must_use]
    pub fn to_rational(&self) -> Option<Rational> {
        self.is_rational().then(|| rational_root(&self.poly))
    }

    /// Leading coefficient of the minimal polynomial: the least positive
    /// integer `d` for which `d·x` is an algebraic integer when `x` is
    /// rational.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        self.poly.leading_coeff().0.clone()
    }

    /// An enclosure with at least `prec` correct bits.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn numerical_value(&self, prec: u32) -> Result<ComplexBall> {
        refine(&self.poly, &self.enclosure, prec)
    }

    /// Tightens the stored enclosure to `prec` correct bits.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn tighten(&mut self, prec: u32) -> Result<()> {
        self.enclosure = refine(&self.poly, &self.enclosure, prec)?;
        Ok(())
    }

    /// `⌊re(x)⌋`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn floor(&self) -> Result<Integer> {
        self.real_part_bound(Rational::floor)
    }

    /// `⌈re(x)⌉`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn ceil(&self) -> Result<Integer> {
        self.real_part_bound(Rational::ceil)
    }

    fn real_part_bound(&self, round: fn(&Rational) -> Integer) -> Result<Integer> {
        let re = if self.is_real() { self.clone() } else { self.re()? };
        if let Some(q) = re.to_rational() {
            return Ok(round(&q));
        }
        // an irrational real part is never an integer, so the bounds meet
        let config = QqbarConfig::global();
        let mut prec = config.default_prec;
        loop {
            let z = re.numerical_value(prec)?;
            let lo = round(&z.re().lower().to_rational());
            let hi = round(&z.re().upper().to_rational());
            if lo == hi {
                return Ok(lo);
            }
            prec = prec.saturating_mul(2);
            if prec > config.max_prec {
                return Err(QqbarError::NoConvergence {
                    operation: "floor",
                    prec,
                });
            }
        }
    }
}

impl fmt::Display for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = self.to_rational() {
            return write!(f, "{q}");
        }
        let re = self.enclosure.re().mid().to_f64();
        let im = self.enclosure.im().mid().to_f64();
        write!(f, "Root of {} near ", self.poly)?;
        if self.is_real() {
            write!(f, "{re}")
        } else if im < 0.0 {
            write!(f, "{re} - {}i", -im)
        } else {
            write!(f, "{re} + {im}i")
        }
    }
}

impl From<i64> for AlgebraicNumber {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<Integer> for AlgebraicNumber {
    fn from(n: Integer) -> Self {
        Self::from_integer(&n)
    }
}

impl From<Rational> for AlgebraicNumber {
    fn from(q: Rational) -> Self {
        Self::from_rational(&q)
    }
}

impl From<&Rational> for AlgebraicNumber {
    fn from(q: &Rational) -> Self {
        Self::from_rational(q)
    }
}
