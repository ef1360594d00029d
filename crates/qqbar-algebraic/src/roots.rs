//! All roots of an integer polynomial, and matrix eigenvalues.

use std::cmp::Ordering;

use log::debug;
use qqbar_ball::{isolate_roots, ComplexBall};
use qqbar_factor::factor;
use qqbar_linalg::{charpoly, DenseMatrix};
use qqbar_poly::integer::from_rational_coeffs;
use qqbar_poly::DensePoly;
use qqbar_rings::{Q, Z};
use rayon::prelude::*;

use crate::algebraic::AlgebraicNumber;
use crate::compare::{compare_abs_imag, compare_real, sgn_im};
use crate::config::QqbarConfig;
use crate::error::{QqbarError, Result};
use crate::refine::{rational_root, settle, validate_uniqueness};

/// Every root of `poly`, in canonical order; a root of multiplicity `m`
/// appears `m` times when `with_multiplicity` is set.
///
/// # Errors
///
/// `ZeroPolynomial` for the zero polynomial; `NoConvergence` at the
/// precision ceiling.
pub fn roots(poly: &DensePoly<Z>, with_multiplicity: bool) -> Result<Vec<AlgebraicNumber>> {
    if poly.is_zero() {
        return Err(QqbarError::ZeroPolynomial);
    }
    let mut all = Vec::with_capacity(poly.degree());
    for (f, multiplicity) in factor(poly).factors {
        let copies = if with_multiplicity { multiplicity } else { 1 };
        for root in irreducible_roots(&f)? {
            all.extend(std::iter::repeat(root).take(copies));
        }
    }
    sort_canonical(&mut all)?;
    Ok(all)
}

/// Roots of an irreducible primitive polynomial.
fn irreducible_roots(f: &DensePoly<Z>) -> Result<Vec<AlgebraicNumber>> {
    if f.degree() == 1 {
        return Ok(vec![AlgebraicNumber::from_rational(&rational_root(f))]);
    }
    let config = QqbarConfig::global();
    let mut prec = config.default_prec;
    loop {
        if let Some(boxes) = isolate_roots(f, prec) {
            let proven: Option<Vec<_>> = boxes.iter().map(|b| validate_uniqueness(f, b, prec)).collect();
            // deg f disjoint boxes, one root each, account for every root
            if let Some(proven) = proven.filter(|zs| zs.len() == f.degree() && pairwise_disjoint(zs)) {
                return proven
                    .into_iter()
                    .map(|z| Ok(AlgebraicNumber::from_parts(f.clone(), settle(f, &z, prec)?)))
                    .collect();
            }
        }
        prec = prec.saturating_mul(2);
        if prec > config.max_prec {
            return Err(QqbarError::NoConvergence {
                operation: "root isolation",
                prec,
            });
        }
        debug!("root isolation of degree {}: raising precision to {prec}", f.degree());
    }
}

fn pairwise_disjoint(boxes: &[ComplexBall]) -> bool {
    boxes
        .iter()
        .enumerate()
        .all(|(i, a)| boxes[i + 1..].iter().all(|b| !a.overlaps(b)))
}

/// Real roots first in ascending order, then complex roots by real part,
/// absolute imaginary part, and positive imaginary part first.
fn canonical_order(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<Ordering> {
    match (x.is_real(), y.is_real()) {
        (true, false) => return Ok(Ordering::Less),
        (false, true) => return Ok(Ordering::Greater),
        (true, true) => return compare_real(x, y),
        (false, false) => {}
    }
    let by_re = compare_real(x, y)?;
    if by_re != Ordering::Equal {
        return Ok(by_re);
    }
    let by_im = compare_abs_imag(x, y)?;
    if by_im != Ordering::Equal {
        return Ok(by_im);
    }
    Ok(sgn_im(y)?.cmp(&sgn_im(x)?))
}

/// Stable insertion sort in canonical order; the first comparison error
/// aborts the sort.
pub(crate) fn sort_canonical(values: &mut [AlgebraicNumber]) -> Result<()> {
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && canonical_order(&values[j - 1], &values[j])? == Ordering::Greater {
            values.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

/// Roots of many polynomials in parallel.
#[must_use]
pub fn roots_batch(polys: &[DensePoly<Z>], with_multiplicity: bool) -> Vec<Result<Vec<AlgebraicNumber>>> {
    polys.par_iter().map(|p| roots(p, with_multiplicity)).collect()
}

/// Eigenvalues of a rational matrix with algebraic multiplicity, in
/// canonical order.
///
/// # Errors
///
/// `DimensionMismatch` for a non-square matrix; `NoConvergence` at the
/// precision ceiling.
pub fn eigenvalues(m: &DenseMatrix<Q>) -> Result<Vec<AlgebraicNumber>> {
    if !m.is_square() {
        return Err(QqbarError::DimensionMismatch);
    }
    roots(&from_rational_coeffs(&charpoly(m)), true)
}

impl AlgebraicNumber {
    /// The distinct roots of `poly` in canonical order.
    ///
    /// # Errors
    ///
    /// `ZeroPolynomial` for the zero polynomial; `NoConvergence` at the
    /// precision ceiling.
    pub fn roots_of(poly: &DensePoly<Z>) -> Result<Vec<Self>> {
        roots(poly, false)
    }

    /// All roots of the minimal polynomial, `x` included, in canonical
    /// order.
    ///
    /// # Errors
    ///
    /// `NoConvergence` at the precision ceiling.
    pub fn conjugates(&self) -> Result<Vec<Self>> {
        let mut all = irreducible_roots(&self.poly)?;
        sort_canonical(&mut all)?;
        Ok(all)
    }
}
