//! Powers, principal roots and roots of unity.

use log::debug;
use num_traits::{One, Zero};
use qqbar_ball::ComplexBall;
use qqbar_factor::irreducible_factors;
use qqbar_integers::{Integer, Rational};
use qqbar_linalg::{charpoly, DenseMatrix};
use qqbar_poly::integer::{cyclotomic, euler_phi, from_rational_coeffs, primitive_part, to_rational_coeffs};
use qqbar_poly::DensePoly;
use qqbar_rings::{Q, Z};

use crate::algebraic::AlgebraicNumber;
use crate::compare::sgn_re;
use crate::composed::power_poly;
use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::refine::validate_uniqueness;
use crate::select::select_root;

impl AlgebraicNumber {
    /// `x^n`.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn pow_ui(&self, n: u32) -> Result<Self> {
        match n {
            0 => return Ok(Self::one()),
            1 => return Ok(self.clone()),
            _ => {}
        }
        if let Some(q) = self.to_rational() {
            return Ok(Self::from_rational(&q.pow(n)));
        }
        let order = self.degree().saturating_mul(n as usize);
        let h = if order > QqbarConfig::global().max_power_sum_order {
            self.power_charpoly(n)
        } else {
            power_poly(&self.poly, n as usize)
        };
        select_root(&irreducible_factors(&h), "power", |prec| {
            Ok(Some(self.numerical_value(prec)?.pow_ui(n, prec)))
        })
    }

    /// The characteristic polynomial of `x^n` over `Q(x)`, of degree
    /// `deg x` for every `n`.
    ///
    /// `x^n = r(x)` with `r = t^n mod P`; multiplication by `r(x)` on the
    /// basis `1, x, …, x^(d−1)` has the wanted characteristic polynomial.
    fn power_charpoly(&self, n: u32) -> DensePoly<Z> {
        let d = self.degree();
        debug!("power {n} of a degree {d} number through its multiplication matrix");
        let modulus = to_rational_coeffs(&self.poly);
        let mut row = power_residue(&modulus, n);
        let mut rows: Vec<Vec<Q>> = Vec::with_capacity(d);
        for _ in 0..d {
            rows.push((0..d).map(|i| row.coeff(i)).collect());
            row = row.shift(1).rem(&modulus);
        }
        // the transpose has the same characteristic polynomial
        primitive_part(&from_rational_coeffs(&charpoly(&DenseMatrix::from_rows(rows))))
    }

    /// `x^n` for a signed exponent.
    ///
    /// # Errors
    ///
    /// `ZeroToNegativePower` for zero to a negative power;
    /// `NoConvergence` at the precision ceiling.
    pub fn pow_si(&self, n: i32) -> Result<Self> {
        if n >= 0 {
            return self.pow_ui(n.unsigned_abs());
        }
        if self.is_zero() {
            return Err(QqbarError::ZeroToNegativePower);
        }
        self.inv()?.pow_ui(n.unsigned_abs())
    }

    /// The principal `n`-th root `|x|^(1/n)·e^(i·arg(x)/n)` with
    /// `arg(x) ∈ (−π, π]`.
    ///
    /// # Errors
    ///
    /// `ZeroRoot` for `n = 0`; `DegreeLimit` if `n · deg x` exceeds the
    /// composed-degree limit; `NoConvergence` at the precision ceiling.
    pub fn root_ui(&self, n: u32) -> Result<Self> {
        match n {
            0 => return Err(QqbarError::ZeroRoot),
            1 => return Ok(self.clone()),
            _ => {}
        }
        if self.is_zero() || self.is_one() {
            return Ok(self.clone());
        }
        if let Some(q) = self.to_rational() {
            if !q.is_negative() {
                if let Some(r) = q.exact_root(n) {
                    return Ok(Self::from_rational(&r));
                }
            }
        }

        let degree = self.degree().saturating_mul(n as usize);
        let limit = QqbarConfig::global().max_composed_degree;
        if degree > limit {
            return Err(QqbarError::DegreeLimit { degree, limit });
        }

        let lifted = self.poly.inflate(n as usize);
        let on_branch_cut = self.is_real() && sgn_re(self)? < 0;
        select_root(&irreducible_factors(&lifted), "principal root", |prec| {
            let z = self.numerical_value(prec)?;
            if !on_branch_cut {
                return Ok(z.root_ui(n, prec));
            }
            // arg x = π, so the root is |x|^(1/n)·e^(iπ/n)
            let Some(modulus) = z.re().neg().root_ui(n, prec) else {
                return Ok(None);
            };
            let rotation = ComplexBall::root_of_unity(1, 2 * u64::from(n), prec);
            Ok(Some(rotation.mul_real(&modulus, prec)))
        })
    }

    /// `x^e` for a rational exponent `e = p/q`, taken as the `p`-th power
    /// of the principal `q`-th root.
    ///
    /// # Errors
    ///
    /// `ZeroToNegativePower` for zero to a negative power; `DegreeLimit`
    /// if `p` or `q` does not fit in 32 bits; `NoConvergence` at the
    /// precision ceiling.
    pub fn pow_rational(&self, e: &Rational) -> Result<Self> {
        let too_large = || QqbarError::DegreeLimit {
            degree: usize::MAX,
            limit: QqbarConfig::global().max_power_sum_order,
        };
        let q = e
            .denominator()
            .to_u64()
            .and_then(|d| u32::try_from(d).ok())
            .ok_or_else(too_large)?;
        let p = e
            .numerator()
            .to_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(too_large)?;
        if self.is_zero() {
            return match p.signum() {
                0 => Ok(Self::one()),
                1 => Ok(Self::zero()),
                _ => Err(QqbarError::ZeroToNegativePower),
            };
        }
        self.root_ui(q)?.pow_si(p)
    }

    /// `x^e` for an algebraic exponent, which must be rational.
    ///
    /// # Errors
    ///
    /// `NonRationalExponent` for an irrational exponent, and anything
    /// [`Self::pow_rational`] returns.
    pub fn pow(&self, e: &Self) -> Result<Self> {
        let r = e.to_rational().ok_or(QqbarError::NonRationalExponent)?;
        self.pow_rational(&r)
    }

    /// `e^(2πi·p/q)`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for `q = 0`; `DegreeLimit` if the reduced order has
    /// `φ(q)` above the composed-degree limit; `NoConvergence` at the
    /// precision ceiling.
    pub fn root_of_unity(p: i64, q: u64) -> Result<Self> {
        if q == 0 {
            return Err(QqbarError::DivisionByZero);
        }
        let q_int = Integer::from(q);
        let p_red = Integer::new(p).div_rem_floor(&q_int).1;
        let g = p_red.gcd(&q_int);
        let (p, q) = if p_red.is_zero() {
            (Integer::zero(), Integer::one())
        } else {
            (&p_red / &g, &q_int / &g)
        };
        // both fit: 0 ≤ p < q ≤ the original q
        let (p, q) = (p.to_i64().unwrap_or(0), q.to_u64().unwrap_or(1));
        match q {
            1 => return Ok(Self::one()),
            2 => return Ok(Self::from_i64(-1)),
            _ => {}
        }

        let config = QqbarConfig::global();
        let limit = config.max_composed_degree;
        let too_large = QqbarError::DegreeLimit {
            degree: usize::MAX,
            limit,
        };
        let order = usize::try_from(q).map_err(|_| too_large.clone())?;
        // φ(q) ≥ √(q/2)
        if order / 2 > limit.saturating_mul(limit) {
            return Err(too_large);
        }
        let degree = euler_phi(order);
        if degree > limit {
            return Err(QqbarError::DegreeLimit { degree, limit });
        }
        let poly = cyclotomic(order);
        let mut prec = config.default_prec;
        loop {
            let ball = ComplexBall::root_of_unity(p, q, prec);
            if let Some(z) = validate_uniqueness(&poly, &ball, prec) {
                return Ok(Self::from_parts(poly, z));
            }
            prec = prec.saturating_mul(2);
            if prec > config.max_prec {
                return Err(QqbarError::NoConvergence {
                    operation: "root of unity",
                    prec,
                });
            }
        }
    }

    /// `e^(πi·p/q)`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for `q = 0`; `NoConvergence` at the precision
    /// ceiling.
    pub fn exp_pi_i(p: i64, q: u64) -> Result<Self> {
        let doubled = q.checked_mul(2).ok_or(QqbarError::DegreeLimit {
            degree: usize::MAX,
            limit: QqbarConfig::global().max_composed_degree,
        })?;
        Self::root_of_unity(p, doubled)
    }

    /// If `x = e^(2πi·p/q)` in lowest terms with `0 ≤ p < q`, returns
    /// `(p, q)`. Best effort: `None` also when the exponent cannot be
    /// pinned below the precision ceiling.
    #[must_use]
    pub fn is_root_of_unity(&self) -> Option<(i64, u64)> {
        if let Some(r) = self.to_rational() {
            return if r.is_one() {
                Some((0, 1))
            } else if r == Rational::from_i64(-1, 1) {
                Some((1, 2))
            } else {
                None
            };
        }
        let d = self.degree();
        if self.is_real() || !self.is_algebraic_integer() || d % 2 == 1 {
            return None;
        }
        // φ(q) ≥ √(q/2), so q ≤ 2d²
        let q = (3..=2 * d * d + 2).find(|&q| euler_phi(q) == d && cyclotomic(q) == self.poly)?;
        let q_u64 = u64::try_from(q).ok()?;
        let q_i64 = i64::try_from(q).ok()?;

        let config = QqbarConfig::global();
        let mut prec = config.default_prec;
        while prec <= config.max_prec {
            let z = self.numerical_value(prec).ok()?;
            let mut hits = (1..q_i64)
                .filter(|&p| Integer::new(p).gcd(&Integer::new(q_i64)).is_one())
                .filter(|&p| ComplexBall::root_of_unity(p, q_u64, prec).overlaps(&z));
            if let (Some(p), None) = (hits.next(), hits.next()) {
                return Some((p, q_u64));
            }
            prec = prec.saturating_mul(2);
        }
        None
    }
}

/// `t^n mod p` by repeated squaring.
fn power_residue(p: &DensePoly<Q>, n: u32) -> DensePoly<Q> {
    let mut result = DensePoly::one();
    let mut base = DensePoly::x().rem(p);
    let mut e = n;
    while e > 0 {
        if e & 1 == 1 {
            result = result.mul(&base).rem(p);
        }
        e >>= 1;
        if e > 0 {
            base = base.mul(&base).rem(p);
        }
    }
    result
}
