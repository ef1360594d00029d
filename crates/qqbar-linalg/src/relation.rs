//! Integer-relation search by lattice reduction.
//!
//! Given approximations `x_1, …, x_n` of real or complex numbers, looks for
//! small integers `c_i`, not all zero, with `Σ c_i x_i ≈ 0`. The values are
//! scaled by `2^bits`, rounded, and appended to the identity lattice; a
//! relation shows up as a reduced vector whose appended coordinates are
//! small.
//!
//! A returned relation is only a candidate: callers verify it exactly.

use log::debug;
use qqbar_integers::{Integer, Rational};
use qqbar_rings::traits::Ring;
use qqbar_rings::Q;

use crate::lll::lll_reduce;
use crate::DenseMatrix;

/// Searches for an integer relation among `values`, given as
/// `(real part, imaginary part)` approximations accurate to about `bits`
/// bits.
///
/// Returns the coefficients normalised so that the first non-zero one is
/// positive, or `None` when no plausible relation is found.
#[must_use]
pub fn integer_relation(values: &[(Q, Q)], bits: usize) -> Option<Vec<Integer>> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let complex = values.iter().any(|(_, im)| !im.is_zero());
    let extra = if complex { 2 } else { 1 };

    let scale = Rational::from_integer(Integer::power_of_two(bits));
    let scaled = |x: &Q| Q(Rational::from_integer(round(&(&x.0 * &scale))));

    let mut basis = DenseMatrix::<Q>::zeros(n, n + extra);
    for (i, (re, im)) in values.iter().enumerate() {
        basis[(i, i)] = Q::one();
        basis[(i, n)] = scaled(re);
        if complex {
            basis[(i, n + 1)] = scaled(im);
        }
    }

    let reduced = lll_reduce(&basis, &Q::new(99, 100)).basis;
    let relation = reduced.rows().find_map(|row| accept(row, n))?;
    debug!("integer relation of length {n} found at {bits} bits");
    Some(relation)
}

/// Accepts a reduced row when its residual coordinates are within the
/// rounding error a true relation would produce.
fn accept(row: &[Q], n: usize) -> Option<Vec<Integer>> {
    let coeffs: Vec<Integer> = row[..n]
        .iter()
        .map(|c| c.0.to_integer())
        .collect::<Option<_>>()?;
    if coeffs.iter().all(num_traits::Zero::is_zero) {
        return None;
    }

    let weight = coeffs
        .iter()
        .fold(Integer::new(1), |acc, c| acc + c.abs());
    let tolerance = Rational::from_integer(weight.mul_2exp(2));
    if row[n..].iter().any(|r| r.0.abs() > tolerance) {
        return None;
    }

    let first_negative = coeffs
        .iter()
        .find(|c| !num_traits::Zero::is_zero(*c))
        .is_some_and(Integer::is_negative);
    Some(if first_negative {
        coeffs.into_iter().map(|c| -c).collect()
    } else {
        coeffs
    })
}

fn round(x: &Rational) -> Integer {
    (x + &Rational::from_i64(1, 2)).floor()
}
