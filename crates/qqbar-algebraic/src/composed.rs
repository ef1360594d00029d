//! Composed polynomials via power sums.
//!
//! For `a` with roots `αᵢ` and `b` with roots `βⱼ`, the composed
//! polynomial `∏ (x − αᵢ ∘ βⱼ)` has power sums that follow from those of
//! `a` and `b`:
//!
//! - product: `S_k(αβ) = S_k(α)·S_k(β)`, a Hadamard product;
//! - sum: `S_k(α+β)/k! = Σ S_i(α)/i! · S_{k−i}(β)/(k−i)!`, a Cauchy
//!   product under the Borel transform.
//!
//! Power sums come from `−x·rev'(x)/rev(x)` where `rev` is the reversed
//! polynomial, and the polynomial comes back through
//! `rev_h = exp(−Σ S_k x^k / k)`. Everything is exact over `Q`.

use qqbar_integers::Integer;
use qqbar_poly::integer::{from_rational_coeffs, primitive_part, to_rational_coeffs};
use qqbar_poly::DensePoly;
use qqbar_rings::{Ring, Q, Z};
use qqbar_series::PowerSeries;

use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::select::BinaryOp;

/// Power sums `S_0, …, S_{len−1}` of the roots of `p`, with
/// multiplicity.
///
/// # Panics
///
/// Panics if `p` is constant.
#[must_use]
pub fn power_sums(p: &DensePoly<Z>, len: usize) -> Vec<Q> {
    assert!(p.degree() > 0, "power sums of a constant");
    let rev = PowerSeries::from_poly(&to_rational_coeffs(&p.reverse()), len + 1);
    // rev(0) is the leading coefficient of p; a root at zero only drops
    // the top of rev and contributes nothing to S_k for k ≥ 1
    let log_deriv = match rev.derivative().div(&rev) {
        Some(s) => s,
        None => unreachable!("reversed polynomial has a nonzero constant term"),
    };
    let mut sums = Vec::with_capacity(len);
    sums.push(Q::from_z(&Z(Integer::from(p.degree()))));
    sums.extend((1..len).map(|k| -log_deriv.coeff(k - 1)));
    sums.truncate(len);
    sums
}

/// The primitive polynomial of degree `degree` whose roots have the
/// power sums `sums` (which must hold `S_0, …, S_degree`).
#[must_use]
pub fn from_power_sums(sums: &[Q], degree: usize) -> DensePoly<Z> {
    // Σ_{k≥1} S_k x^(k−1), integrated to Σ S_k x^k / k
    let shifted = PowerSeries::from_coeffs(
        (1..=degree)
            .map(|k| sums.get(k).cloned().unwrap_or_else(Q::zero))
            .collect(),
    );
    let log_rev = shifted.integral().neg();
    let rev = match log_rev.exp() {
        Some(s) => s,
        None => unreachable!("logarithm has a zero constant term"),
    };
    let mut coeffs = rev.coeffs().to_vec();
    coeffs.resize(degree + 1, Q::zero());
    coeffs.reverse();
    primitive_part(&from_rational_coeffs(&DensePoly::new(coeffs)))
}

/// The polynomial whose roots are `α ∘ β` over all roots `α` of `a` and
/// `β` of `b`, with multiplicity. The result need not be irreducible.
///
/// # Errors
///
/// `DegreeLimit` past the configured degree ceiling; `DivisionByZero`
/// for a quotient by a polynomial with root zero.
pub fn composed_op(a: &DensePoly<Z>, b: &DensePoly<Z>, op: BinaryOp) -> Result<DensePoly<Z>> {
    let degree = a.degree() * b.degree();
    let limit = QqbarConfig::global().max_composed_degree;
    if degree > limit {
        return Err(QqbarError::DegreeLimit { degree, limit });
    }
    let b = match op {
        BinaryOp::Add | BinaryOp::Mul => b.clone(),
        BinaryOp::Sub => b.negate_variable(),
        BinaryOp::Div => {
            if b.coeff(0).is_zero() {
                return Err(QqbarError::DivisionByZero);
            }
            b.reverse()
        }
    };

    let len = degree + 1;
    let sa = PowerSeries::from_coeffs(power_sums(a, len));
    let sb = PowerSeries::from_coeffs(power_sums(&b, len));
    let sums = match op {
        BinaryOp::Mul | BinaryOp::Div => sa.hadamard(&sb),
        BinaryOp::Add | BinaryOp::Sub => sa.borel().mul(&sb.borel()).inverse_borel(),
    };
    Ok(from_power_sums(sums.coeffs(), degree))
}

/// The polynomial whose roots are the `n`-th powers of the roots of `p`.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn power_poly(p: &DensePoly<Z>, n: usize) -> DensePoly<Z> {
    assert!(n > 0, "zeroth power");
    let d = p.degree();
    let sums = power_sums(p, d * n + 1);
    let strided: Vec<Q> = sums.into_iter().step_by(n).collect();
    from_power_sums(&strided, d)
}
