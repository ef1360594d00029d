//! Zassenhaus factorisation of univariate polynomials over Z.
//!
//! Each squarefree part is factored modulo a well-chosen prime, the
//! modular factors are Hensel-lifted past a coefficient bound for the true
//! factors, and the lifted factors are recombined by exhaustive subset
//! search with exact trial division.

use log::trace;
use num_traits::{One, Zero};
use rayon::prelude::*;
use qqbar_integers::Integer;
use qqbar_poly::integer::{div_exact, primitive_part};
use qqbar_poly::DensePoly;
use qqbar_rings::traits::Ring;
use qqbar_rings::Z;

use crate::cantor_zassenhaus::cantor_zassenhaus_factor;
use crate::hensel::hensel_lift;
use crate::modular::{is_prime, symmetric_mod, ModPoly};
use crate::squarefree::squarefree_factorization;

/// Number of usable primes tried before picking the best one.
const TRIAL_PRIMES: usize = 4;

/// A complete factorisation `content · Π factor^multiplicity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    /// Signed content.
    pub content: Z,
    /// Distinct irreducible primitive factors with positive leading
    /// coefficient, each with its multiplicity; sorted by degree, then
    /// coefficients.
    pub factors: Vec<(DensePoly<Z>, usize)>,
}

impl Factorization {
    /// Multiplies the factorisation back out.
    #[must_use]
    pub fn to_polynomial(&self) -> DensePoly<Z> {
        self.factors.iter().fold(
            DensePoly::constant(self.content.clone()),
            |acc, (f, e)| acc.mul(&f.pow(*e as u32)),
        )
    }
}

/// Factors a polynomial over Z into irreducibles.
///
/// The zero polynomial and constants have no factors.
#[must_use]
pub fn factor(f: &DensePoly<Z>) -> Factorization {
    let sf = squarefree_factorization(f);
    let mut factors = Vec::new();
    for part in &sf.factors {
        for g in factor_squarefree(&part.factor) {
            factors.push((g, part.multiplicity));
        }
    }
    factors.sort_by(|(a, _), (b, _)| compare_polys(a, b));
    Factorization {
        content: sf.content,
        factors,
    }
}

/// Distinct irreducible primitive factors of positive degree.
#[must_use]
pub fn irreducible_factors(f: &DensePoly<Z>) -> Vec<DensePoly<Z>> {
    factor(f).factors.into_iter().map(|(g, _)| g).collect()
}

/// Returns true if `f` has positive degree and no non-trivial factor
/// of positive degree (content is ignored).
#[must_use]
pub fn is_irreducible(f: &DensePoly<Z>) -> bool {
    let fac = factor(f);
    fac.factors.len() == 1 && fac.factors[0].1 == 1
}

/// Factors independent polynomials in parallel.
#[must_use]
pub fn factor_batch(polys: &[DensePoly<Z>]) -> Vec<Factorization> {
    polys.par_iter().map(factor).collect()
}

fn compare_polys(a: &DensePoly<Z>, b: &DensePoly<Z>) -> std::cmp::Ordering {
    a.degree()
        .cmp(&b.degree())
        .then_with(|| a.coeffs().iter().rev().cmp(b.coeffs().iter().rev()))
}

/// Factors a primitive squarefree polynomial with positive leading
/// coefficient.
fn factor_squarefree(f: &DensePoly<Z>) -> Vec<DensePoly<Z>> {
    let n = f.degree();
    if n <= 1 {
        return vec![f.clone()];
    }

    // x^k · g: peel off the root at zero first.
    let v = f.valuation();
    if v > 0 {
        let g = DensePoly::new(f.coeffs()[v..].to_vec());
        let mut out = vec![DensePoly::x()];
        out.extend(factor_squarefree(&g));
        return out;
    }

    let (p, modular) = choose_prime(f);
    trace!("degree {n}: {} modular factors mod {p}", modular.len());
    if modular.len() <= 1 {
        return vec![f.clone()];
    }

    let bound = factor_coefficient_bound(f);
    let mut k = 1u32;
    let mut modulus = Integer::from(p);
    while modulus <= bound.mul_2exp(1) {
        modulus = &modulus * &Integer::from(p);
        k += 1;
    }

    let lifted = hensel_lift(f, &modular, p, k);
    recombine(f, lifted.factors, &lifted.modulus)
}

/// Tries primes in increasing order, keeping the one with the fewest
/// modular factors among the first few that keep `f` squarefree.
fn choose_prime(f: &DensePoly<Z>) -> (u64, Vec<ModPoly>) {
    let lead = &f.leading_coeff().0;
    let candidates: Vec<u64> = (3u64..)
        .filter(|&p| is_prime(p))
        .filter(|&p| !(lead % &Integer::from(p)).is_zero())
        .filter(|&p| ModPoly::from_z(f, p).is_squarefree())
        .take(TRIAL_PRIMES)
        .collect();

    candidates
        .par_iter()
        .map(|&p| (p, cantor_zassenhaus_factor(&ModPoly::from_z(f, p))))
        .min_by_key(|(p, fs)| (fs.len(), *p))
        .unwrap_or_else(|| unreachable!("a squarefree polynomial has good primes"))
}

/// `|lc| · 2^n · ‖f‖₂`, bounding the coefficients of `lc(f)/lc(g) · g`
/// for any factor `g` of `f` (Landau–Mignotte).
fn factor_coefficient_bound(f: &DensePoly<Z>) -> Integer {
    let norm_sq = f
        .coeffs()
        .iter()
        .fold(Integer::zero(), |acc, c| acc + &c.0 * &c.0);
    let norm = norm_sq.sqrt_floor() + Integer::one();
    (f.leading_coeff().0.abs() * norm).mul_2exp(f.degree())
}

/// Zassenhaus recombination of monic lifted factors modulo `m`.
fn recombine(f: &DensePoly<Z>, mut modular: Vec<DensePoly<Z>>, m: &Integer) -> Vec<DensePoly<Z>> {
    let mut found = Vec::new();
    let mut rest = f.clone();
    let mut size = 1;

    'sizes: while 2 * size <= modular.len() {
        let lc = rest.leading_coeff().clone();
        for subset in Combinations::new(modular.len(), size) {
            // Constant-term pre-check before forming the full product.
            if !rest.coeff(0).is_zero() {
                let c0 = subset
                    .iter()
                    .fold(lc.0.clone(), |acc, &i| symmetric_mod(&(acc * &modular[i].coeff(0).0), m));
                if c0.is_zero() || !(&(&rest.coeff(0).0 * &lc.0) % &c0).is_zero() {
                    continue;
                }
            }

            let candidate = subset.iter().fold(DensePoly::constant(lc.clone()), |acc, &i| {
                symmetric(&acc.mul(&modular[i]), m)
            });
            let candidate = primitive_part(&candidate);
            if let Some(quotient) = div_exact(&rest, &candidate) {
                trace!("recombined factor of degree {}", candidate.degree());
                found.push(candidate);
                rest = primitive_part(&quotient);
                let mut idx = 0;
                modular.retain(|_| {
                    let keep = !subset.contains(&idx);
                    idx += 1;
                    keep
                });
                continue 'sizes;
            }
        }
        size += 1;
    }

    if rest.degree() > 0 {
        found.push(rest);
    }
    found
}

fn symmetric(f: &DensePoly<Z>, m: &Integer) -> DensePoly<Z> {
    DensePoly::new(f.coeffs().iter().map(|c| Z(symmetric_mod(&c.0, m))).collect())
}

/// Lexicographic enumeration of `k`-subsets of `0..n`.
struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (k <= n).then(|| (0..k).collect()),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let k = current.len();
        let mut next = current.clone();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if next[i] < self.n - k + i {
                next[i] += 1;
                for j in i + 1..k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                break;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_poly::integer::from_i64s;

    #[test]
    fn test_combinations() {
        let all: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec![0, 1]);
        assert_eq!(all[5], vec![2, 3]);
        assert_eq!(Combinations::new(3, 0).count(), 1);
    }

    #[test]
    fn test_factor_with_multiplicities() {
        // 3 (x^2 - 2)^2 (x + 1) x
        let f = from_i64s(&[-2, 0, 1])
            .pow(2)
            .mul(&from_i64s(&[1, 1]))
            .mul(&from_i64s(&[0, 1]))
            .scale(&Z::new(3));
        let fac = factor(&f);
        assert_eq!(fac.content, Z::new(3));
        assert_eq!(
            fac.factors,
            vec![
                (from_i64s(&[0, 1]), 1),
                (from_i64s(&[1, 1]), 1),
                (from_i64s(&[-2, 0, 1]), 2),
            ]
        );
        assert_eq!(fac.to_polynomial(), f);
    }

    #[test]
    fn test_swinnerton_dyer_is_irreducible() {
        // Minimal polynomial of √2 + √3 splits modulo every prime.
        let f = from_i64s(&[1, 0, -10, 0, 1]);
        assert!(is_irreducible(&f));
    }

    #[test]
    fn test_non_monic_factors() {
        // (2x + 1)(3x^2 - 5)(x^3 + x + 1)
        let a = from_i64s(&[1, 2]);
        let b = from_i64s(&[-5, 0, 3]);
        let c = from_i64s(&[1, 1, 0, 1]);
        let f = a.mul(&b).mul(&c);
        let mut got = irreducible_factors(&f);
        got.sort_by(compare_polys);
        assert_eq!(got, vec![a, b, c]);
    }

    #[test]
    fn test_cyclotomic_splits_completely() {
        // x^12 - 1 = Π_{d | 12} Φ_d
        let f = from_i64s(&[-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(irreducible_factors(&f).len(), 6);
    }

    #[test]
    fn test_batch() {
        let polys = vec![from_i64s(&[-2, 0, 1]), from_i64s(&[-4, 0, 1])];
        let out = factor_batch(&polys);
        assert_eq!(out[0].factors.len(), 1);
        assert_eq!(out[1].factors.len(), 2);
    }
}
