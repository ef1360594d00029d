//! Hensel lifting for polynomial factorization.
//!
//! Lifts a factorization modulo p to a factorization modulo p^k.
//! Uses quadratic Hensel lifting which doubles precision each iteration,
//! arranged as a binary factor tree so any number of coprime factors can
//! be lifted together.

use num_traits::{One, Zero};
use qqbar_integers::Integer;
use qqbar_poly::DensePoly;
use qqbar_rings::traits::Ring;
use qqbar_rings::Z;

use crate::modular::{inv_mod_integer, reduce_poly, ModPoly};

/// Result of Hensel lifting.
#[derive(Clone, Debug)]
pub struct HenselLiftResult {
    /// Monic lifted factors with coefficients in `[0, p^k)`.
    pub factors: Vec<DensePoly<Z>>,
    /// The prime used.
    pub prime: u64,
    /// The final modulus p^k.
    pub modulus: Integer,
}

/// Lifts `f ≡ lc(f) · Π factors (mod p)` to the same identity modulo `p^k`.
///
/// `factors_mod_p` must be monic, pairwise coprime, and `p` must not
/// divide the leading coefficient of `f`.
#[must_use]
pub fn hensel_lift(f: &DensePoly<Z>, factors_mod_p: &[ModPoly], p: u64, k: u32) -> HenselLiftResult {
    let modulus = Integer::from(p).pow(k);
    let mut factors = Vec::with_capacity(factors_mod_p.len());
    if !factors_mod_p.is_empty() {
        lift_tree(f, factors_mod_p, p, &modulus, &mut factors);
    }
    HenselLiftResult {
        factors,
        prime: p,
        modulus,
    }
}

fn lift_tree(f: &DensePoly<Z>, factors: &[ModPoly], p: u64, target: &Integer, out: &mut Vec<DensePoly<Z>>) {
    if factors.len() == 1 {
        out.push(make_monic_mod(f, target));
        return;
    }

    let mid = factors.len() / 2;
    let (left, right) = factors.split_at(mid);
    let prod = |fs: &[ModPoly]| fs.iter().fold(ModPoly::one(p), |acc, g| acc.mul(g));

    let lc_p = ModPoly::from_z(&DensePoly::constant(f.leading_coeff().clone()), p);
    let g0 = prod(left).mul(&lc_p);
    let h0 = prod(right);
    let (_, s0, t0) = g0.ext_gcd(&h0);

    let mut m = Integer::from(p);
    let mut g = g0.to_z();
    let mut h = h0.to_z();
    let mut s = s0.to_z();
    let mut t = t0.to_z();

    while m < *target {
        (g, h, s, t) = hensel_step(&m, f, &g, &h, &s, &t);
        m = &m * &m;
    }

    let g = reduce_poly(&g, target);
    let h = reduce_poly(&h, target);
    lift_tree(&g, left, p, target, out);
    lift_tree(&h, right, p, target, out);
}

/// One quadratic Hensel step (von zur Gathen–Gerhard, Algorithm 15.10).
///
/// From `f ≡ g·h`, `s·g + t·h ≡ 1 (mod m)` with `h` monic, returns the
/// corresponding quadruple modulo `m²`.
fn hensel_step(
    m: &Integer,
    f: &DensePoly<Z>,
    g: &DensePoly<Z>,
    h: &DensePoly<Z>,
    s: &DensePoly<Z>,
    t: &DensePoly<Z>,
) -> (DensePoly<Z>, DensePoly<Z>, DensePoly<Z>, DensePoly<Z>) {
    let m2 = m * m;
    let red = |p: &DensePoly<Z>| reduce_poly(p, &m2);

    let e = red(&f.sub(&g.mul(h)));
    let (q, r) = div_rem_monic(&red(&s.mul(&e)), h, &m2);
    let g_new = red(&g.add(&t.mul(&e)).add(&q.mul(g)));
    let h_new = red(&h.add(&r));

    let b = red(&s.mul(&g_new).add(&t.mul(&h_new)).sub(&DensePoly::one()));
    let (c, d) = div_rem_monic(&red(&s.mul(&b)), &h_new, &m2);
    let s_new = red(&s.sub(&d));
    let t_new = red(&t.sub(&t.mul(&b)).sub(&c.mul(&g_new)));

    (g_new, h_new, s_new, t_new)
}

/// Division by a monic polynomial with coefficients reduced modulo `m`.
fn div_rem_monic(a: &DensePoly<Z>, h: &DensePoly<Z>, m: &Integer) -> (DensePoly<Z>, DensePoly<Z>) {
    if a.degree() < h.degree() || a.is_zero() {
        return (DensePoly::zero(), a.clone());
    }
    let n = h.coeffs().len();
    let mut rem = a.coeffs().to_vec();
    let mut quot = vec![Z::zero(); rem.len() - n + 1];

    for k in (0..quot.len()).rev() {
        let c = rem[k + n - 1].0.div_rem_floor(m).1;
        if c.is_zero() {
            continue;
        }
        for (j, hj) in h.coeffs().iter().enumerate() {
            rem[k + j] = Z((&rem[k + j].0 - &(&c * &hj.0)).div_rem_floor(m).1);
        }
        quot[k] = Z(c);
    }

    rem.truncate(n - 1);
    (reduce_poly(&DensePoly::new(quot), m), reduce_poly(&DensePoly::new(rem), m))
}

fn make_monic_mod(f: &DensePoly<Z>, m: &Integer) -> DensePoly<Z> {
    let lead = &f.leading_coeff().0;
    if lead.is_one() {
        return reduce_poly(f, m);
    }
    match inv_mod_integer(lead, m) {
        Some(inv) => reduce_poly(&f.scale(&Z(inv)), m),
        None => unreachable!("leading coefficient is a unit modulo p^k"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modular::symmetric_mod;
    use qqbar_poly::integer::from_i64s;

    fn symmetric(f: &DensePoly<Z>, m: &Integer) -> DensePoly<Z> {
        DensePoly::new(f.coeffs().iter().map(|c| Z(symmetric_mod(&c.0, m))).collect())
    }

    #[test]
    fn test_lift_recovers_integer_factors() {
        // (x - 3)(x + 5)(x^2 + 2) with factors taken modulo 7
        let f = from_i64s(&[-3, 1])
            .mul(&from_i64s(&[5, 1]))
            .mul(&from_i64s(&[2, 0, 1]));
        let p = 7;
        let mod_factors = vec![
            ModPoly::from_z(&from_i64s(&[-3, 1]), p),
            ModPoly::from_z(&from_i64s(&[5, 1]), p),
            ModPoly::from_z(&from_i64s(&[2, 0, 1]), p),
        ];
        let lifted = hensel_lift(&f, &mod_factors, p, 6);
        let m = &lifted.modulus;

        assert_eq!(symmetric(&lifted.factors[0], m), from_i64s(&[-3, 1]));
        assert_eq!(symmetric(&lifted.factors[1], m), from_i64s(&[5, 1]));
        assert_eq!(symmetric(&lifted.factors[2], m), from_i64s(&[2, 0, 1]));
    }

    #[test]
    fn test_lift_with_leading_coefficient() {
        // (2x + 1)(3x - 1) = 6x^2 + x - 1; monic factors mod 5
        let f = from_i64s(&[-1, 1, 6]);
        let p = 5;
        let a = ModPoly::from_z(&from_i64s(&[1, 2]), p).monic();
        let b = ModPoly::from_z(&from_i64s(&[-1, 3]), p).monic();
        let lifted = hensel_lift(&f, &[a, b], p, 8);
        let m = &lifted.modulus;

        let product = lifted.factors[0]
            .mul(&lifted.factors[1])
            .scale(&Z::new(6));
        assert_eq!(reduce_poly(&product, m), reduce_poly(&f, m));
        assert!(lifted.factors.iter().all(|g| g.leading_coeff().is_one()));
    }
}
