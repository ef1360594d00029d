//! Complex root isolation for squarefree integer polynomials.
//!
//! Approximations come from the Aberth–Ehrlich iteration, run in rounded
//! dyadic arithmetic on a doubling precision ladder. They are then
//! certified with Weierstrass corrections: for approximations `z_j` of the
//! roots of a degree-`n` polynomial `P` with leading coefficient `a`, put
//! `W_j = P(z_j) / (a · ∏_{k≠j} (z_j − z_k))`. The discs `|z − z_j| ≤ n|W_j|`
//! contain all roots, and a connected component made of `m` discs holds
//! exactly `m` of them, so pairwise disjoint discs isolate every root.

use log::{debug, trace};
use num_traits::Zero;
use qqbar_integers::{Integer, Rational};
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

use crate::complex::ComplexBall;
use crate::dyadic::{Dyadic, Round};
use crate::real::{RealBall, RAD_PREC};

const START_PREC: u32 = 64;
const MAX_ATTEMPTS: usize = 4;

/// Encloses every root of a squarefree polynomial in a ball.
///
/// Roots whose enclosure can be proven real come back with an exactly
/// zero imaginary part. The balls are pairwise disjoint. Returns `None`
/// for the zero polynomial or if certification fails at every precision
/// tried, which for squarefree input only happens when roots are closer
/// than the working precision can separate.
#[must_use]
pub fn isolate_roots(poly: &DensePoly<Z>, prec: u32) -> Option<Vec<ComplexBall>> {
    if poly.is_zero() {
        return None;
    }
    let coeffs: Vec<Integer> = poly.coeffs().iter().map(|c| c.0.clone()).collect();
    let n = poly.degree();
    match n {
        0 => return Some(Vec::new()),
        1 => {
            let root = Rational::new(-coeffs[0].clone(), coeffs[1].clone());
            return Some(vec![ComplexBall::from_real(RealBall::from_rational(&root, prec))]);
        }
        _ => {}
    }

    let deriv: Vec<Integer> = coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| c * &Integer::from(i))
        .collect();
    let bound = root_bound_exp(&coeffs);
    let mut z = initial_points(&coeffs, bound);
    let mut work = START_PREC.min(prec);
    let mut target = prec + 16;
    let mut cap = 50 + 5 * n;

    for attempt in 0..MAX_ATTEMPTS {
        loop {
            let converged = aberth(&coeffs, &deriv, &mut z, work, cap, bound);
            cap = 20;
            if work >= target {
                if !converged {
                    trace!("Aberth iteration unconverged at {work} bits");
                }
                break;
            }
            work = work.saturating_mul(2).min(target);
        }
        if let Some(balls) = certify(poly, &z, target) {
            debug!("isolated {n} roots at {target} bits (attempt {attempt})");
            return Some(balls);
        }
        target = target.saturating_mul(2);
        work = target;
    }
    debug!("failed to isolate roots of a degree {n} polynomial");
    None
}

/// A complex point with dyadic coordinates and rounded arithmetic.
#[derive(Clone, Debug, Default)]
struct Point {
    re: Dyadic,
    im: Dyadic,
}

fn rnd(x: &Dyadic, prec: u32) -> Dyadic {
    x.round(prec, Round::Nearest)
}

impl Point {
    fn new(re: Dyadic, im: Dyadic) -> Self {
        Self { re, im }
    }

    fn one() -> Self {
        Self::new(Dyadic::one(), Dyadic::zero())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    fn mag(&self) -> i64 {
        self.re.mag().max(self.im.mag())
    }

    fn add(&self, o: &Self, prec: u32) -> Self {
        Self::new(rnd(&(&self.re + &o.re), prec), rnd(&(&self.im + &o.im), prec))
    }

    fn sub(&self, o: &Self, prec: u32) -> Self {
        Self::new(rnd(&(&self.re - &o.re), prec), rnd(&(&self.im - &o.im), prec))
    }

    fn mul(&self, o: &Self, prec: u32) -> Self {
        let re = &(&self.re * &o.re) - &(&self.im * &o.im);
        let im = &(&self.re * &o.im) + &(&self.im * &o.re);
        Self::new(rnd(&re, prec), rnd(&im, prec))
    }

    fn div(&self, o: &Self, prec: u32) -> Option<Self> {
        let den = &(&o.re * &o.re) + &(&o.im * &o.im);
        let re = &(&self.re * &o.re) + &(&self.im * &o.im);
        let im = &(&self.im * &o.re) - &(&self.re * &o.im);
        Some(Self::new(
            re.div(&den, prec, Round::Nearest)?,
            im.div(&den, prec, Round::Nearest)?,
        ))
    }

    /// Rescales by a power of two so that `mag() ≤ bound`.
    fn clamp_mag(self, bound: i64) -> Self {
        let mag = self.mag();
        if self.is_zero() || mag <= bound {
            return self;
        }
        Self::new(self.re.mul_2exp(bound - mag), self.im.mul_2exp(bound - mag))
    }

    fn to_ball(&self) -> ComplexBall {
        ComplexBall::new(RealBall::exact(self.re.clone()), RealBall::exact(self.im.clone()))
    }
}

fn eval(coeffs: &[Integer], z: &Point, prec: u32) -> Point {
    coeffs.iter().rev().fold(Point::default(), |acc, c| {
        let t = acc.mul(z, prec);
        Point::new(rnd(&(&t.re + &Dyadic::from_integer(c.clone())), prec), t.im)
    })
}

/// An exponent `k` with every root inside `|z| < 2^k`, by a
/// Fujiwara-style bound.
fn root_bound_exp(coeffs: &[Integer]) -> i64 {
    let n = coeffs.len() - 1;
    let lc_bits = signed(coeffs[n].bit_len());
    (1..=n)
        .filter(|&i| !coeffs[n - i].is_zero())
        .map(|i| {
            let diff = signed(coeffs[n - i].bit_len()) - lc_bits + 1;
            let i = signed(i);
            (diff + i - 1).div_euclid(i)
        })
        .max()
        .unwrap_or(0)
        + 1
}

/// Points spread on a circle of radius `2^k` enclosing all roots, with an
/// offset angle to break symmetry.
fn initial_points(coeffs: &[Integer], k: i64) -> Vec<Point> {
    let n = coeffs.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let step = std::f64::consts::TAU / n as f64;
    (0..n)
        .map(|j| {
            #[allow(clippy::cast_precision_loss)]
            let theta = step * j as f64 + 0.4;
            let re = Dyadic::from_f64(theta.cos()).unwrap_or_default().mul_2exp(k);
            let im = Dyadic::from_f64(theta.sin()).unwrap_or_default().mul_2exp(k);
            Point::new(re, im)
        })
        .collect()
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Runs up to `cap` Gauss–Seidel Aberth sweeps at `prec` bits. Returns
/// true once every correction is below the working precision.
///
/// An iterate thrown outside the disc `|z| < 2^bound`, which holds every
/// root, is pulled back to magnitude about `2^bound` along the same ray.
fn aberth(coeffs: &[Integer], deriv: &[Integer], z: &mut [Point], prec: u32, cap: usize, bound: i64) -> bool {
    let n = z.len();
    let threshold = i64::from(prec) - 8;
    for _ in 0..cap {
        let mut converged = true;
        for j in 0..n {
            let f = eval(coeffs, &z[j], prec);
            if f.is_zero() {
                continue;
            }
            let df = eval(deriv, &z[j], prec);
            let Some(ratio) = f.div(&df, prec) else {
                // critical point: push off it
                let nudge = Dyadic::new(Integer::from(1), -i64::from(prec / 4));
                z[j] = Point::new(&z[j].re + &nudge, &z[j].im + &nudge);
                converged = false;
                continue;
            };

            let mut sum = Point::default();
            for k in (0..n).filter(|&k| k != j) {
                if let Some(inv) = Point::one().div(&z[j].sub(&z[k], prec), prec) {
                    sum = sum.add(&inv, prec);
                }
            }
            let denom = Point::one().sub(&ratio.mul(&sum, prec), prec);
            let step = ratio.div(&denom, prec).unwrap_or(ratio);

            let scale = z[j].mag().max(0);
            if !step.is_zero() && step.mag() > scale - threshold {
                converged = false;
            }
            z[j] = z[j].sub(&step, prec).clamp_mag(bound);
        }
        if converged {
            return true;
        }
    }
    false
}

/// Turns approximations into certified, pairwise disjoint enclosures.
fn certify(poly: &DensePoly<Z>, z: &[Point], prec: u32) -> Option<Vec<ComplexBall>> {
    let n = z.len();
    let lc = ComplexBall::from_integer(&poly.leading_coeff().0);
    let centers: Vec<ComplexBall> = z.iter().map(Point::to_ball).collect();
    let degree = Dyadic::from_integer(Integer::from(n));

    let mut boxes = Vec::with_capacity(n);
    for (j, c) in centers.iter().enumerate() {
        let value = c.eval_poly(poly, prec);
        let mut denom = lc.clone();
        for (k, other) in centers.iter().enumerate() {
            if k != j {
                denom = denom.mul(&c.sub(other, prec), prec);
            }
        }
        let w = value.div(&denom, prec)?;
        let r = (&w.mag_upper() * &degree).round(RAD_PREC, Round::Up);
        boxes.push(c.inflate(&r));
    }

    for j in 0..n {
        for k in j + 1..n {
            if boxes[j].overlaps(&boxes[k]) {
                trace!("enclosures {j} and {k} overlap at {prec} bits");
                return None;
            }
        }
    }

    // Integer coefficients make the root set closed under conjugation. A
    // box whose mirror image meets no other box holds a root equal to its
    // own conjugate.
    let mut result = Vec::with_capacity(n);
    for (j, b) in boxes.iter().enumerate() {
        let mirror = b.conj();
        let alone = boxes
            .iter()
            .enumerate()
            .all(|(k, other)| k == j || !mirror.overlaps(other));
        if alone {
            result.push(ComplexBall::from_real(b.re().clone()));
        } else if b.im().contains_zero() {
            return None;
        } else {
            result.push(b.clone());
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_poly::integer::{cyclotomic, from_i64s};

    fn check_roots(p: &DensePoly<Z>, prec: u32) -> Vec<ComplexBall> {
        let roots = isolate_roots(p, prec).unwrap();
        assert_eq!(roots.len(), p.degree());
        for r in &roots {
            assert!(r.eval_poly(p, prec).contains_zero());
        }
        roots
    }

    fn real_count(roots: &[ComplexBall]) -> usize {
        roots.iter().filter(|r| r.is_real()).count()
    }

    #[test]
    fn test_quadratics() {
        let roots = check_roots(&from_i64s(&[-2, 0, 1]), 64);
        assert_eq!(real_count(&roots), 2);
        let roots = check_roots(&from_i64s(&[1, 0, 1]), 64);
        assert_eq!(real_count(&roots), 0);
        assert!(roots.iter().any(|r| r.contains(&ComplexBall::i())));
    }

    #[test]
    fn test_cubic_with_complex_pair() {
        let roots = check_roots(&from_i64s(&[-2, 0, 0, 1]), 128);
        assert_eq!(real_count(&roots), 1);
        let real = roots.iter().find(|r| r.is_real()).unwrap();
        let cube_root = RealBall::from_i64(2).root_ui(3, 128).unwrap();
        assert!(real.re().overlaps(&cube_root));
        assert!(real.rel_accuracy_bits() >= 100);
    }

    #[test]
    fn test_cyclotomic_and_integer_roots() {
        let roots = check_roots(&cyclotomic(5), 64);
        assert_eq!(real_count(&roots), 0);

        // (x − 1)(x − 2)(x − 3)(x − 4)(x − 5)
        let p = from_i64s(&[-120, 274, -225, 85, -15, 1]);
        let roots = check_roots(&p, 64);
        assert_eq!(real_count(&roots), 5);
        for k in 1..=5 {
            assert!(roots.iter().any(|r| r.re().contains(&RealBall::from_i64(k))));
        }
    }

    #[test]
    fn test_low_degrees() {
        assert_eq!(isolate_roots(&from_i64s(&[7]), 64), Some(Vec::new()));
        let root = isolate_roots(&from_i64s(&[1, 3]), 64).unwrap();
        assert!(root[0].re().contains_rational(&Rational::from_i64(-1, 3)));
        assert!(isolate_roots(&DensePoly::zero(), 64).is_none());
    }

    #[test]
    fn test_trinomial() {
        // x⁵ − x − 1 has a single real root near 1.1673
        let roots = check_roots(&from_i64s(&[-1, -1, 0, 0, 0, 1]), 96);
        assert_eq!(real_count(&roots), 1);
        let real = roots.iter().find(|r| r.is_real()).unwrap();
        assert!((real.re().mid().to_f64() - 1.167_303_978_261_418_7).abs() < 1e-12);
    }

    #[test]
    fn test_plastic_cubic() {
        // x³ − x − 1: one real root near 1.3247 and a complex pair
        let roots = check_roots(&from_i64s(&[-1, -1, 0, 1]), 128);
        assert_eq!(real_count(&roots), 1);
        let real = roots.iter().find(|r| r.is_real()).unwrap();
        assert!((real.re().mid().to_f64() - 1.324_717_957_244_746).abs() < 1e-12);
        let pair: Vec<_> = roots.iter().filter(|r| !r.is_real()).collect();
        assert!(pair[0].conj().overlaps(pair[1]));
    }

    #[test]
    fn test_runaway_iterate_is_pulled_back() {
        let far = Point::new(Dyadic::new(Integer::from(3), 1 << 40), Dyadic::new(Integer::from(-1), 1 << 39));
        let near = far.clamp_mag(4);
        assert_eq!(near.mag(), 4);
        assert!(near.re.is_positive() && near.im.is_negative());
        let inside = Point::new(Dyadic::one(), Dyadic::zero()).clamp_mag(4);
        assert_eq!(inside.re, Dyadic::one());
    }

    #[test]
    fn test_bound_covers_roots() {
        // roots 1..5 need |z| < 2^k with k ≥ 3
        let coeffs: Vec<Integer> = [-120, 274, -225, 85, -15, 1].iter().map(|&c| Integer::new(c)).collect();
        assert!(root_bound_exp(&coeffs) >= 3);
    }
}
