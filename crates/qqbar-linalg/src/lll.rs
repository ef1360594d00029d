//! LLL (Lenstra-Lenstra-Lovász) lattice reduction algorithm.
//!
//! LLL produces a reduced basis for a lattice, where:
//! - The first vector is within `2^((n−1)/2)` of the shortest vector
//! - Successive vectors are reasonably orthogonal
//!
//! All arithmetic is exact over Q. Gram–Schmidt data is computed once and
//! then updated incrementally on size reductions and swaps.

use log::trace;
use qqbar_integers::Rational;
use qqbar_rings::traits::{Field, Ring};
use qqbar_rings::Q;

use crate::DenseMatrix;

/// Result of LLL reduction.
#[derive(Clone, Debug)]
pub struct LllResult {
    /// The reduced basis as a matrix (rows are basis vectors).
    pub basis: DenseMatrix<Q>,
    /// Number of row swaps performed.
    pub swaps: usize,
}

/// Performs LLL reduction on the rows of `basis`.
///
/// `delta` is the Lovász parameter, in `(1/4, 1)`; `3/4` is the classical
/// choice and values close to 1 give shorter vectors.
#[must_use]
pub fn lll_reduce(basis: &DenseMatrix<Q>, delta: &Q) -> LllResult {
    let n = basis.num_rows();
    let mut b = basis.clone();
    let mut swaps = 0;
    if n < 2 {
        return LllResult { basis: b, swaps };
    }

    let mut gs = GramSchmidt::compute(&b);
    let mut k = 1;
    while k < n {
        size_reduce(&mut b, &mut gs, k, k - 1);
        if gs.lovasz(k, delta) {
            for j in (0..k - 1).rev() {
                size_reduce(&mut b, &mut gs, k, j);
            }
            k += 1;
        } else {
            b.swap_rows(k - 1, k);
            gs.swap(&b, k);
            swaps += 1;
            k = (k - 1).max(1);
        }
    }

    trace!("LLL on {n} vectors: {swaps} swaps");
    LllResult { basis: b, swaps }
}

/// Squared Euclidean norm of a vector.
#[must_use]
pub fn norm_squared(v: &[Q]) -> Q {
    v.iter().fold(Q::zero(), |acc, x| acc + x.clone() * x.clone())
}

/// Gram–Schmidt coefficients `μ[i][j]` for `j < i` and the squared norms
/// `B[i] = ‖b*_i‖²`.
struct GramSchmidt {
    mu: DenseMatrix<Q>,
    norms: Vec<Q>,
}

impl GramSchmidt {
    fn compute(b: &DenseMatrix<Q>) -> Self {
        let n = b.num_rows();
        let mut mu = DenseMatrix::zeros(n, n);
        let mut norms: Vec<Q> = Vec::with_capacity(n);
        let mut stars: Vec<Vec<Q>> = Vec::with_capacity(n);

        for i in 0..n {
            let mut v = b.row(i).to_vec();
            for j in 0..i {
                let Some(inv) = norms[j].inv() else {
                    continue;
                };
                let m = dot(b.row(i), &stars[j]) * inv;
                for (x, s) in v.iter_mut().zip(&stars[j]) {
                    *x = x.clone() - m.clone() * s.clone();
                }
                mu[(i, j)] = m;
            }
            norms.push(norm_squared(&v));
            stars.push(v);
        }

        Self { mu, norms }
    }

    fn lovasz(&self, k: usize, delta: &Q) -> bool {
        let m = self.mu[(k, k - 1)].clone();
        self.norms[k] >= (delta.clone() - m.clone() * m) * self.norms[k - 1].clone()
    }

    /// Updates the data after rows `k − 1` and `k` of `b` were swapped.
    fn swap(&mut self, b: &DenseMatrix<Q>, k: usize) {
        let n = self.norms.len();
        let m = self.mu[(k, k - 1)].clone();
        let big = self.norms[k].clone() + m.clone() * m.clone() * self.norms[k - 1].clone();
        let Some(big_inv) = big.inv() else {
            *self = Self::compute(b);
            return;
        };

        let new_m = m.clone() * self.norms[k - 1].clone() * big_inv.clone();
        self.norms[k] = self.norms[k - 1].clone() * self.norms[k].clone() * big_inv;
        self.norms[k - 1] = big;
        self.mu[(k, k - 1)] = new_m.clone();

        for j in 0..k - 1 {
            let tmp = self.mu[(k - 1, j)].clone();
            self.mu[(k - 1, j)] = self.mu[(k, j)].clone();
            self.mu[(k, j)] = tmp;
        }
        for i in k + 1..n {
            let t = self.mu[(i, k)].clone();
            self.mu[(i, k)] = self.mu[(i, k - 1)].clone() - m.clone() * t.clone();
            self.mu[(i, k - 1)] = t + new_m.clone() * self.mu[(i, k)].clone();
        }
    }
}

/// Makes `|μ[k][j]| ≤ 1/2` by subtracting an integer multiple of `b_j`.
fn size_reduce(b: &mut DenseMatrix<Q>, gs: &mut GramSchmidt, k: usize, j: usize) {
    let m = gs.mu[(k, j)].clone();
    if is_size_reduced(&m) {
        return;
    }
    let r = nearest_integer(&m);
    b.add_scaled_row(k, j, &-r.clone());
    gs.mu[(k, j)] = m - r.clone();
    for l in 0..j {
        gs.mu[(k, l)] = gs.mu[(k, l)].clone() - r.clone() * gs.mu[(j, l)].clone();
    }
}

fn dot(a: &[Q], b: &[Q]) -> Q {
    a.iter()
        .zip(b)
        .fold(Q::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
}

fn is_size_reduced(mu: &Q) -> bool {
    let half = Q::new(1, 2);
    *mu <= half && -mu.clone() <= half
}

/// `⌊q + 1/2⌋`.
fn nearest_integer(q: &Q) -> Q {
    let shifted = q.0.clone() + Rational::from_i64(1, 2);
    Q(Rational::from_integer(shifted.floor()))
}
