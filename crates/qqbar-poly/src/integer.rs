//! Integer-polynomial toolkit.
//!
//! Minimal polynomials live in `Z[x]` and are kept primitive with a
//! positive leading coefficient. These helpers keep every intermediate
//! result in `Z[x]`, clearing denominators instead of passing through
//! `Q[x]`.

use num_traits::{One, Zero};
use qqbar_integers::{Integer, Rational};
use qqbar_rings::traits::Ring;
use qqbar_rings::{Q, Z};

use crate::dense::DensePoly;

/// Builds a polynomial from small integer coefficients (ascending).
#[must_use]
pub fn from_i64s(coeffs: &[i64]) -> DensePoly<Z> {
    DensePoly::new(coeffs.iter().map(|&c| Z::new(c)).collect())
}

/// Gcd of all coefficients (non-negative; zero for the zero polynomial).
#[must_use]
pub fn content(p: &DensePoly<Z>) -> Integer {
    let mut g = Integer::zero();
    for c in p.coeffs() {
        g = g.gcd(&c.0);
        if g.is_one() {
            break;
        }
    }
    g
}

/// Divides out the content and makes the leading coefficient positive.
#[must_use]
pub fn primitive_part(p: &DensePoly<Z>) -> DensePoly<Z> {
    if p.is_zero() {
        return p.clone();
    }
    let mut c = content(p);
    if p.leading_coeff().0.is_negative() {
        c = -c;
    }
    if c.is_one() {
        return p.clone();
    }
    DensePoly::new(p.coeffs().iter().map(|x| Z(&x.0 / &c)).collect())
}

/// Exact division in `Z[x]`; `None` when `b` does not divide `a`.
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn div_exact(a: &DensePoly<Z>, b: &DensePoly<Z>) -> Option<DensePoly<Z>> {
    assert!(!b.is_zero(), "division by zero polynomial");
    if a.is_zero() {
        return Some(DensePoly::zero());
    }
    if a.degree() < b.degree() {
        return None;
    }

    let m = b.coeffs().len();
    let lead = b.leading_coeff();
    let mut rem = a.coeffs().to_vec();
    let mut quot = vec![Z::zero(); rem.len() - m + 1];

    for k in (0..quot.len()).rev() {
        let top = &rem[k + m - 1];
        if top.is_zero() {
            continue;
        }
        let c = top.div_exact(lead)?;
        for (j, bj) in b.coeffs().iter().enumerate() {
            rem[k + j] = rem[k + j].clone() - c.clone() * bj.clone();
        }
        quot[k] = c;
    }

    if rem.iter().all(|c| c.is_zero()) {
        Some(DensePoly::new(quot))
    } else {
        None
    }
}

/// Pseudo-remainder `lc(b)^(deg a - deg b + 1) · a mod b`.
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn pseudo_rem(a: &DensePoly<Z>, b: &DensePoly<Z>) -> DensePoly<Z> {
    assert!(!b.is_zero(), "division by zero polynomial");
    if a.degree() < b.degree() {
        return a.clone();
    }

    let m = b.coeffs().len();
    let lead = b.leading_coeff().clone();
    let mut rem = a.coeffs().to_vec();
    let steps = rem.len() - m + 1;

    for k in (0..steps).rev() {
        let top = rem[k + m - 1].clone();
        for r in &mut rem {
            *r = r.clone() * lead.clone();
        }
        if top.is_zero() {
            continue;
        }
        for (j, bj) in b.coeffs().iter().enumerate() {
            rem[k + j] = rem[k + j].clone() - top.clone() * bj.clone();
        }
    }

    rem.truncate(m - 1);
    DensePoly::new(rem)
}

/// Greatest common divisor in `Z[x]` via the primitive PRS.
///
/// The result has a positive leading coefficient; `gcd(0, 0) = 0`.
#[must_use]
pub fn gcd(a: &DensePoly<Z>, b: &DensePoly<Z>) -> DensePoly<Z> {
    if a.is_zero() {
        return primitive_part(b).scale(&Z(content(b)));
    }
    if b.is_zero() {
        return primitive_part(a).scale(&Z(content(a)));
    }

    let c = content(a).gcd(&content(b));
    let (mut p, mut q) = if a.degree() >= b.degree() {
        (primitive_part(a), primitive_part(b))
    } else {
        (primitive_part(b), primitive_part(a))
    };

    while !q.is_zero() {
        let r = pseudo_rem(&p, &q);
        p = q;
        q = primitive_part(&r);
    }

    primitive_part(&p).scale(&Z(c))
}

/// Substitutes `x = (c·y − b)/a` and clears denominators.
///
/// The roots of the result are exactly `(a·r + b)/c` for the roots `r`
/// of `p`. The result is primitive with a positive leading coefficient.
///
/// # Panics
///
/// Panics if `a` or `c` is zero.
#[must_use]
pub fn compose_affine(p: &DensePoly<Z>, a: &Integer, b: &Integer, c: &Integer) -> DensePoly<Z> {
    assert!(!a.is_zero() && !c.is_zero(), "degenerate affine map");
    let d = p.degree();
    let lin = DensePoly::new(vec![Z(-b), Z(c.clone())]);

    // Horner in (c·y − b) with coefficient p_k·a^(d−k).
    let mut result = DensePoly::zero();
    let mut a_pow = Integer::one();
    let mut scaled = Vec::with_capacity(d + 1);
    for coeff in p.coeffs().iter().rev() {
        scaled.push(Z(&coeff.0 * &a_pow));
        a_pow = a_pow * a;
    }
    for s in scaled {
        result = result.mul(&lin).add(&DensePoly::constant(s));
    }
    primitive_part(&result)
}

/// Largest absolute value of a coefficient.
#[must_use]
pub fn height(p: &DensePoly<Z>) -> Integer {
    p.coeffs()
        .iter()
        .map(|c| c.0.abs())
        .max()
        .unwrap_or_else(Integer::zero)
}

/// Bit length of the height.
#[must_use]
pub fn height_bits(p: &DensePoly<Z>) -> usize {
    height(p).bit_len()
}

/// Evaluates at a rational point exactly.
#[must_use]
pub fn eval_rational(p: &DensePoly<Z>, x: &Rational) -> Rational {
    let mut acc = Rational::zero();
    for c in p.coeffs().iter().rev() {
        acc = acc * x + Rational::from(&c.0);
    }
    acc
}

/// Scales a rational polynomial by the lcm of its denominators.
#[must_use]
pub fn from_rational_coeffs(p: &DensePoly<Q>) -> DensePoly<Z> {
    let den = p
        .coeffs()
        .iter()
        .fold(Integer::one(), |acc, c| acc.lcm(&c.denom()));
    DensePoly::new(
        p.coeffs()
            .iter()
            .map(|c| Z(c.numer() * (&den / &c.denom())))
            .collect(),
    )
}

/// Views an integer polynomial over `Q`.
#[must_use]
pub fn to_rational_coeffs(p: &DensePoly<Z>) -> DensePoly<Q> {
    p.map_coeffs(Q::from_z)
}

/// The primitive polynomial `q·x − p` of a rational `p/q`.
#[must_use]
pub fn linear_from_rational(r: &Rational) -> DensePoly<Z> {
    DensePoly::new(vec![Z(-r.numerator()), Z(r.denominator())])
}

/// The `n`-th cyclotomic polynomial `Φ_n`.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn cyclotomic(n: usize) -> DensePoly<Z> {
    assert!(n > 0, "cyclotomic index must be positive");

    // Φ_n = Π_{d | n} (x^d − 1)^μ(n/d)
    let mut num = DensePoly::one();
    let mut den = DensePoly::one();
    for d in (1..=n).filter(|d| n % d == 0) {
        let factor = DensePoly::monomial(Z::one(), d).sub(&DensePoly::one());
        match moebius(n / d) {
            1 => num = num.mul(&factor),
            -1 => den = den.mul(&factor),
            _ => {}
        }
    }
    match div_exact(&num, &den) {
        Some(q) => q,
        None => unreachable!("cyclotomic product divides exactly"),
    }
}

/// Euler's totient.
#[must_use]
pub fn euler_phi(mut n: usize) -> usize {
    let mut result = n;
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            while n % p == 0 {
                n /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if n > 1 {
        result -= result / n;
    }
    result
}

fn moebius(mut n: usize) -> i8 {
    let mut sign = 1;
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            n /= p;
            if n % p == 0 {
                return 0;
            }
            sign = -sign;
        }
        p += 1;
    }
    if n > 1 {
        sign = -sign;
    }
    sign
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_and_primitive_part() {
        let p = from_i64s(&[6, -4, -2]);
        assert_eq!(content(&p), Integer::new(2));
        assert_eq!(primitive_part(&p), from_i64s(&[-3, 2, 1]));
    }

    #[test]
    fn test_content_with_zero_coefficients() {
        // the derivative of x² − 2 is 2x
        assert_eq!(content(&from_i64s(&[0, 2])), Integer::new(2));
        assert_eq!(primitive_part(&from_i64s(&[0, -2])), from_i64s(&[0, 1]));
        assert_eq!(content(&from_i64s(&[0, 0, 3, 0, -6])), Integer::new(3));
        assert!(content(&DensePoly::zero()).is_zero());
    }

    #[test]
    fn test_div_exact() {
        let a = from_i64s(&[-1, 0, 0, 1]);
        let b = from_i64s(&[-1, 1]);
        assert_eq!(div_exact(&a, &b), Some(from_i64s(&[1, 1, 1])));
        assert_eq!(div_exact(&a, &from_i64s(&[1, 1])), None);
        assert_eq!(div_exact(&from_i64s(&[1, 2]), &from_i64s(&[0, 2])), None);
    }

    #[test]
    fn test_gcd() {
        // (x - 1)(x + 2) and (x - 1)(2x + 3)
        let a = from_i64s(&[-2, 1, 1]);
        let b = from_i64s(&[-3, 1, 2]);
        assert_eq!(gcd(&a, &b), from_i64s(&[-1, 1]));
        assert_eq!(gcd(&a.scale(&Z::new(4)), &b.scale(&Z::new(6))), from_i64s(&[-2, 2]));
        assert!(gcd(&from_i64s(&[1, 1]), &from_i64s(&[-1, 1])).is_constant());
    }

    #[test]
    fn test_compose_affine() {
        // roots of x^2 - 2 are ±√2; roots of the result are 2·(±√2) + 1
        let p = from_i64s(&[-2, 0, 1]);
        let q = compose_affine(&p, &Integer::new(2), &Integer::new(1), &Integer::new(1));
        // (y - 1)^2 - 8 = y^2 - 2y - 7
        assert_eq!(q, from_i64s(&[-7, -2, 1]));

        // (√2)/3: 9y^2 - 2
        let q = compose_affine(&p, &Integer::new(1), &Integer::new(0), &Integer::new(3));
        assert_eq!(q, from_i64s(&[-2, 0, 9]));
    }

    #[test]
    fn test_cyclotomic() {
        assert_eq!(cyclotomic(1), from_i64s(&[-1, 1]));
        assert_eq!(cyclotomic(4), from_i64s(&[1, 0, 1]));
        assert_eq!(cyclotomic(6), from_i64s(&[1, -1, 1]));
        assert_eq!(cyclotomic(12), from_i64s(&[1, 0, -1, 0, 1]));
        assert_eq!(cyclotomic(15).degree(), euler_phi(15));
    }

    #[test]
    fn test_rational_helpers() {
        let q = DensePoly::new(vec![Q::new(1, 2), Q::new(-1, 3), Q::from_integer(1)]);
        assert_eq!(from_rational_coeffs(&q), from_i64s(&[3, -2, 6]));
        assert_eq!(
            eval_rational(&from_i64s(&[-2, 0, 1]), &Rational::from_i64(3, 2)),
            Rational::from_i64(1, 4)
        );
        assert_eq!(
            linear_from_rational(&Rational::from_i64(-3, 4)),
            from_i64s(&[3, 4])
        );
        assert_eq!(height_bits(&from_i64s(&[-9, 1])), 4);
    }
}
