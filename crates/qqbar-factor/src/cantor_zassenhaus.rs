//! Cantor-Zassenhaus factorisation over F_p for odd primes p.
//!
//! Distinct-degree factorisation splits a squarefree polynomial into
//! products of irreducibles of equal degree; the randomised equal-degree
//! step then splits those products. Randomness comes from a seeded
//! `ChaCha8Rng`, so results are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::modular::ModPoly;

/// Seed of the equal-degree splitting generator.
const SPLIT_SEED: u64 = 0x5eed_ca27;

/// Factors a squarefree polynomial over F_p into monic irreducibles.
///
/// The modulus must be an odd prime. Factors are sorted by degree, then
/// by coefficients.
#[must_use]
pub fn cantor_zassenhaus_factor(f: &ModPoly) -> Vec<ModPoly> {
    if f.degree() == 0 {
        return Vec::new();
    }
    let f = f.monic();
    if f.degree() == 1 {
        return vec![f];
    }

    let mut rng = ChaCha8Rng::seed_from_u64(SPLIT_SEED ^ f.modulus());
    let mut factors = Vec::new();
    for (d, part) in distinct_degree_factorization(&f) {
        if part.degree() == d {
            factors.push(part);
        } else {
            equal_degree_factorization(&part, d, &mut rng, &mut factors);
        }
    }
    factors.sort_by(|a, b| {
        a.degree()
            .cmp(&b.degree())
            .then_with(|| a.coeffs().cmp(b.coeffs()))
    });
    factors
}

/// Splits a monic squarefree `f` into `(d, product of all degree-d factors)`.
fn distinct_degree_factorization(f: &ModPoly) -> Vec<(usize, ModPoly)> {
    let p = f.modulus();
    let x = ModPoly::x(p);
    let mut result = Vec::new();
    let mut h = f.clone();
    let mut x_pow = x.clone();
    let mut d = 0;

    while h.degree() >= 2 * (d + 1) {
        d += 1;
        // x^(p^d) mod h
        x_pow = x_pow.pow_mod(p, &h);
        let g = h.gcd(&x_pow.sub(&x));
        if g.degree() > 0 {
            h = h.div_rem(&g).0;
            x_pow = x_pow.rem(&h);
            result.push((d, g));
        }
    }

    if h.degree() > 0 {
        result.push((h.degree(), h));
    }
    result
}

/// Splits a product of degree-`d` irreducibles, pushing the pieces to `out`.
fn equal_degree_factorization(f: &ModPoly, d: usize, rng: &mut ChaCha8Rng, out: &mut Vec<ModPoly>) {
    if f.degree() == d {
        out.push(f.monic());
        return;
    }

    loop {
        if let Some(g) = try_split(f, d, rng) {
            let h = f.div_rem(&g).0;
            equal_degree_factorization(&g, d, rng, out);
            equal_degree_factorization(&h.monic(), d, rng, out);
            return;
        }
    }
}

/// One splitting attempt: `gcd(f, a^((p^d − 1)/2) − 1)` for a random `a`.
fn try_split(f: &ModPoly, d: usize, rng: &mut ChaCha8Rng) -> Option<ModPoly> {
    let p = f.modulus();
    let n = f.degree();
    let a = ModPoly::new((0..n).map(|_| rng.gen_range(0..p)).collect(), p);
    if a.degree() == 0 {
        return None;
    }

    let g = f.gcd(&a);
    if g.degree() > 0 && g.degree() < n {
        return Some(g);
    }

    // (p^d − 1)/2 = (1 + p + … + p^(d−1))·(p − 1)/2, so raise the norm
    // a·a^p·…·a^(p^(d−1)) to (p − 1)/2.
    let mut frob = a.rem(f);
    let mut norm = frob.clone();
    for _ in 1..d {
        frob = frob.pow_mod(p, f);
        norm = norm.mul(&frob).rem(f);
    }
    let b = norm.pow_mod((p - 1) / 2, f).sub(&ModPoly::one(p));
    let g = f.gcd(&b);
    (g.degree() > 0 && g.degree() < n).then_some(g)
}
