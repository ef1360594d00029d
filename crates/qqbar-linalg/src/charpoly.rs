//! Characteristic polynomials by the Faddeev–LeVerrier recurrence.
//!
//! `M_1 = I`, `M_k = A·M_{k−1} + c_{n−k+1}·I` and
//! `c_{n−k} = −tr(A·M_k) / k`. Needs division by `1..=n`, so the
//! coefficient field must have characteristic zero.

use qqbar_poly::DensePoly;
use qqbar_rings::traits::{EuclideanDomain, Field};

use crate::DenseMatrix;

/// Returns `det(x·I − A)`, a monic polynomial of degree `n`.
///
/// # Panics
///
/// Panics if `a` is not square.
#[must_use]
pub fn charpoly<F: Field + Send + Sync>(a: &DenseMatrix<F>) -> DensePoly<F> {
    assert!(a.is_square(), "characteristic polynomial of a non-square matrix");
    let n = a.num_rows();
    let mut coeffs = vec![F::zero(); n + 1];
    coeffs[n] = F::one();

    // A·M_{k−1}, starting from M_0 = 0.
    let mut am = DenseMatrix::<F>::zeros(n, n);
    for k in 1..=n {
        let mut m = am;
        for i in 0..n {
            m[(i, i)] = m[(i, i)].clone() + coeffs[n - k + 1].clone();
        }
        am = a.mm_parallel(&m);
        let k_f = F::from_i64(i64::try_from(k).unwrap_or(i64::MAX));
        coeffs[n - k] = -EuclideanDomain::div(&am.trace(), &k_f);
    }

    DensePoly::new(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_rings::traits::Ring;
    use qqbar_rings::Q;

    fn qm(rows: &[&[i64]]) -> DenseMatrix<Q> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| Q::from_integer(x)).collect()).collect())
    }

    fn qp(c: &[i64]) -> DensePoly<Q> {
        DensePoly::new(c.iter().map(|&x| Q::from_integer(x)).collect())
    }

    #[test]
    fn test_two_by_two() {
        // x^2 - 5x - 2
        assert_eq!(charpoly(&qm(&[&[1, 2], &[3, 4]])), qp(&[-2, -5, 1]));
    }

    #[test]
    fn test_companion_matrix() {
        // companion of x^3 - 2x + 5
        let a = qm(&[&[0, 0, -5], &[1, 0, 2], &[0, 1, 0]]);
        assert_eq!(charpoly(&a), qp(&[5, -2, 0, 1]));
    }

    #[test]
    fn test_triangular_matrix() {
        // eigenvalues are the diagonal: (x − 2)(x + 1)(x − 3)(x − 1)
        let a = qm(&[&[2, -1, 0, 3], &[0, -1, 1, 0], &[0, 0, 3, 1], &[0, 0, 0, 1]]);
        let p = charpoly(&a);
        assert_eq!(p, qp(&[-6, 5, 5, -5, 1]));
        assert_eq!(p.coeff(3), -a.trace());
    }

    #[test]
    fn test_empty_matrix() {
        let a = DenseMatrix::<Q>::zeros(0, 0);
        assert!(charpoly(&a).coeff(0).is_one());
    }
}
