//! Elementary functions on real balls.
//!
//! Series are summed in fixed point: an integer `X` stands for `X · 2^−w`.
//! Each kernel returns its value together with a bound on the error in
//! units of `2^−w`. The functions then evaluate at the midpoint and add
//! the input radius, since `atan`, `sin` and `cos` are 1-Lipschitz.

use num_traits::{One, Zero};
use qqbar_integers::{Integer, Rational};

use crate::dyadic::{Dyadic, Round};
use crate::real::RealBall;

/// Extra working bits for a target precision.
pub(crate) fn guard_bits(prec: u32) -> u32 {
    2 * (u32::BITS - prec.leading_zeros()) + 12
}

fn ulps(n: u64) -> Integer {
    Integer::from(n)
}

fn fixed(q: &Rational, w: u32) -> Integer {
    q.mul_2exp(i64::from(w)).floor()
}

fn to_ball(value: &Integer, err: &Integer, w: u32) -> RealBall {
    let e = -i64::from(w);
    RealBall::new(Dyadic::new(value.clone(), e), Dyadic::new(err.clone(), e))
}

/// `atan(x)` for rational `0 ≤ x ≤ 1`, by Euler's series
/// `atan x = Σ (2n)!! / (2n+1)!! · x·y^n / (1 + x²)`, `y = x²/(1 + x²)`.
fn atan_kernel(x: &Rational, w: u32) -> (Integer, Integer) {
    let one = Rational::one();
    let denom = &one + &(x * x);
    let y = fixed(&(&(x * x) / &denom), w);
    let mut term = fixed(&(x / &denom), w);
    let mut sum = term.clone();
    let scale = Integer::power_of_two(w as usize);
    let mut n: u64 = 1;
    loop {
        let num = &(&term * &y) * &Integer::from(2 * n);
        term = num.div_floor(&(&Integer::from(2 * n + 1) * &scale));
        if term.is_zero() {
            break;
        }
        sum = sum + &term;
        n += 1;
    }
    // term n is off by at most 2n + 1 ulps; the tail after the last
    // non-zero term is at most twice that bound.
    (sum, ulps(n * n + 4 * n + 2))
}

/// `(π, err)` in fixed point at `w` bits, by Machin's formula.
fn pi_kernel(w: u32) -> (Integer, Integer) {
    let (a, ea) = atan_kernel(&Rational::from_i64(1, 5), w);
    let (b, eb) = atan_kernel(&Rational::from_i64(1, 239), w);
    let value = a.mul_2exp(4) - b.mul_2exp(2);
    let err = ea.mul_2exp(4) + eb.mul_2exp(2);
    (value, err)
}

/// `sin(r)` (odd) or `cos(r)` (even) for rational `0 ≤ r ≤ 1` by Taylor
/// series.
fn sin_cos_kernel(r: &Rational, w: u32, cosine: bool) -> (Integer, Integer) {
    let scale = Integer::power_of_two(w as usize);
    let x = fixed(r, w);
    let x2 = (&x * &x).fdiv_2exp(w as usize);
    let mut term = if cosine { scale.clone() } else { x };
    let mut sum = term.clone();
    let mut n: u64 = 1;
    loop {
        let (a, b) = if cosine { (2 * n - 1, 2 * n) } else { (2 * n, 2 * n + 1) };
        term = (&term * &x2).div_floor(&(&Integer::from(a * b) * &scale));
        if term.is_zero() {
            break;
        }
        if n % 2 == 1 {
            sum = sum - &term;
        } else {
            sum = sum + &term;
        }
        n += 1;
    }
    // at most 3 ulps per term and for the alternating tail
    (sum, ulps(3 * n + 8))
}

impl RealBall {
    /// An enclosure of π.
    #[must_use]
    pub fn pi(prec: u32) -> Self {
        let w = prec + guard_bits(prec);
        let (value, err) = pi_kernel(w);
        let ball = to_ball(&value, &err, w);
        Self::rounded(ball.mid(), ball.rad(), prec)
    }

    /// Arctangent.
    #[must_use]
    pub fn atan(&self, prec: u32) -> Self {
        let w = prec + guard_bits(prec);
        let m = self.mid().to_rational();
        let negative = m.is_negative();
        let m = m.abs();

        let value = if m <= Rational::one() {
            let (a, ea) = atan_kernel(&m, w);
            to_ball(&a, &ea, w)
        } else {
            // atan m = π/2 − atan(1/m)
            let (a, ea) = atan_kernel(&m.recip(), w);
            let (p, ep) = pi_kernel(w + 1);
            let half_pi = to_ball(&p, &ep, w + 1);
            half_pi.sub(&to_ball(&a, &ea, w), w)
        };
        let value = if negative { value.neg() } else { value };
        Self::rounded(value.mid(), &(value.rad() + self.rad()), prec)
    }

    /// Sine and cosine.
    #[must_use]
    pub fn sin_cos(&self, prec: u32) -> (Self, Self) {
        // k = round(mid / (π/2)) from a rough π; any k gives a valid
        // reduction, a good one keeps |r| ≤ 1.
        let rough = Rational::new(Integer::new(884_279_719_003_555), Integer::power_of_two(48));
        let quadrants = &self.mid().to_rational() / &(&rough / &Rational::from_i64(2, 1));
        let k = (&quadrants + &Rational::from_i64(1, 2)).floor();

        let w = prec + guard_bits(prec) + u32::try_from(k.bit_len()).unwrap_or(1 << 20);
        let half_pi = Self::pi(w).mul_2exp(-1);
        let r = self.sub(&half_pi.mul(&Self::from_integer(&k), w), w);

        let rm = r.mid().to_rational();
        let negative = rm.is_negative();
        let rm = rm.abs();
        let (s, es) = sin_cos_kernel(&rm, w, false);
        let (c, ec) = sin_cos_kernel(&rm, w, true);
        let s = to_ball(&s, &es, w);
        let s = if negative { s.neg() } else { s };
        let c = to_ball(&c, &ec, w);

        let quadrant = k.div_rem_floor(&Integer::new(4)).1.to_i64().unwrap_or(0);
        let (sin, cos) = match quadrant {
            0 => (s, c),
            1 => (c, s.neg()),
            2 => (s.neg(), c.neg()),
            _ => (c.neg(), s),
        };
        let spread = r.rad();
        (
            Self::rounded(sin.mid(), &(sin.rad() + spread), prec),
            Self::rounded(cos.mid(), &(cos.rad() + spread), prec),
        )
    }

    /// Sine.
    #[must_use]
    pub fn sin(&self, prec: u32) -> Self {
        self.sin_cos(prec).0
    }

    /// Cosine.
    #[must_use]
    pub fn cos(&self, prec: u32) -> Self {
        self.sin_cos(prec).1
    }

    /// Square root, or `None` if the ball is entirely negative. Negative
    /// parts of a ball straddling zero are ignored.
    #[must_use]
    pub fn sqrt(&self, prec: u32) -> Option<Self> {
        self.root_ui(2, prec)
    }

    /// Real `n`-th root. For even `n` the negative part of the ball is
    /// ignored and `None` is returned if nothing remains.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn root_ui(&self, n: u32, prec: u32) -> Option<Self> {
        assert!(n > 0, "zeroth root");
        if n == 1 {
            return Some(self.clone());
        }
        let mut lo = self.lower();
        let hi = self.upper();
        if n % 2 == 0 {
            if hi.is_negative() {
                return None;
            }
            if lo.is_negative() {
                lo = Dyadic::zero();
            }
        }

        let mag = self.mag_lower().mag();
        let small = if mag == i64::MIN { 0 } else { (-mag).max(0) / i64::from(n) };
        let w = prec + guard_bits(prec) + u32::try_from(small).unwrap_or(0);
        let lo_root = root_bound(&lo, n, w, Round::Down);
        let hi_root = root_bound(&hi, n, w, Round::Up);
        let ball = Self::from_bounds(&lo_root, &hi_root);
        Some(Self::rounded(ball.mid(), ball.rad(), prec))
    }
}

/// Directed `x^(1/n)` at `w` fractional bits; odd `n` for negative `x`.
fn root_bound(x: &Dyadic, n: u32, w: u32, mode: Round) -> Dyadic {
    if x.is_zero() {
        return Dyadic::zero();
    }
    let e = -i64::from(w);
    let scaled = x.abs().mul_2exp(i64::from(n) * i64::from(w));
    // For negative x the root is −|x|^(1/n), so the rounding flips.
    let up = (mode == Round::Up) != x.is_negative();
    let r = if up {
        scaled.ceil().ceil_root(n)
    } else {
        scaled.floor().floor_root(n)
    };
    let r = Dyadic::new(r, e);
    if x.is_negative() {
        -r
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(x: &RealBall) -> f64 {
        x.mid().to_f64()
    }

    #[test]
    fn test_pi_digits() {
        let pi = RealBall::pi(200);
        // 355/113 is not π, 3.14159265358979 bracket is
        assert!(!pi.contains_rational(&Rational::from_i64(355, 113)));
        let lo = Rational::from_i64(314_159_265_358_979, 100_000_000_000_000);
        let hi = Rational::from_i64(314_159_265_358_980, 100_000_000_000_000);
        assert!(lo < pi.lower().to_rational() && pi.upper().to_rational() < hi);
        assert!(pi.rel_accuracy_bits() >= 195);
    }

    #[test]
    fn test_atan_values() {
        let prec = 128;
        let one = RealBall::one();
        let quarter_pi = RealBall::pi(prec).mul_2exp(-2);
        assert!(one.atan(prec).overlaps(&quarter_pi));
        let big = RealBall::from_i64(1_000_000).atan(prec);
        assert!((approx(&big) - (std::f64::consts::FRAC_PI_2 - 1e-6)).abs() < 1e-12);
        let neg = RealBall::from_rational(&Rational::from_i64(-1, 3), prec).atan(prec);
        assert!((approx(&neg) + (1.0f64 / 3.0).atan()).abs() < 1e-15);
    }

    #[test]
    fn test_sin_cos_identities() {
        let prec = 128;
        for x in [-7i64, -1, 0, 2, 3, 100] {
            let b = RealBall::from_i64(x);
            let (s, c) = b.sin_cos(prec);
            let one = s.sqr(prec).add(&c.sqr(prec), prec);
            assert!(one.contains(&RealBall::one()));
            #[allow(clippy::cast_precision_loss)]
            let xf = x as f64;
            assert!((approx(&s) - xf.sin()).abs() < 1e-14);
            assert!((approx(&c) - xf.cos()).abs() < 1e-14);
        }
        let (s, c) = RealBall::pi(prec).sin_cos(prec);
        assert!(s.contains_zero());
        assert!(c.contains(&RealBall::from_i64(-1)));
    }

    #[test]
    fn test_roots() {
        let prec = 100;
        let two = RealBall::from_i64(2);
        let r = two.sqrt(prec).unwrap();
        assert!(r.sqr(prec).contains(&two));
        assert!(r.rel_accuracy_bits() >= 95);

        let cube = RealBall::from_i64(-27).root_ui(3, prec).unwrap();
        assert!(cube.contains(&RealBall::from_i64(-3)));
        assert!(RealBall::from_i64(-4).sqrt(prec).is_none());

        let tiny = RealBall::exact(Dyadic::new(Integer::one(), -200));
        let root = RealBall::exact(Dyadic::new(Integer::one(), -100));
        assert!(tiny.sqrt(prec).unwrap().contains(&root));
    }
}
