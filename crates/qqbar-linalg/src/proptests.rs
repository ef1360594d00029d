//! Property-based tests for exact linear algebra.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::lll::{lll_reduce, norm_squared};
    use crate::{charpoly, DenseMatrix};
    use qqbar_poly::DensePoly;
    use qqbar_rings::Q;

    fn square(n: usize) -> impl Strategy<Value = DenseMatrix<Q>> {
        proptest::collection::vec(proptest::collection::vec(-9i64..10, n), n)
            .prop_map(|rows| DenseMatrix::from_rows(rows.into_iter().map(|r| r.into_iter().map(Q::from_integer).collect()).collect()))
    }

    fn dot(u: &[Q], v: &[Q]) -> Q {
        u.iter().zip(v).fold(Q::from_integer(0), |acc, (a, b)| acc + a.clone() * b.clone())
    }

    /// `±det(B·Bᵀ)`, the squared lattice volume up to sign.
    fn gram_volume(b: &DenseMatrix<Q>) -> Q {
        let rows: Vec<Vec<Q>> = b.rows().map(|u| b.rows().map(|v| dot(u, v)).collect()).collect();
        charpoly(&DenseMatrix::from_rows(rows)).coeff(0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn cayley_hamilton(a in square(4)) {
            let n = a.num_rows();
            let mut acc = DenseMatrix::<Q>::zeros(n, n);
            for c in charpoly(&a).coeffs().iter().rev() {
                acc = acc.mm(&a);
                for i in 0..n {
                    acc[(i, i)] = acc[(i, i)].clone() + c.clone();
                }
            }
            prop_assert_eq!(acc, DenseMatrix::zeros(n, n));
        }

        #[test]
        fn companion_matrix_recovers_cubic(c in proptest::collection::vec(-20i64..21, 3)) {
            let q = |x: i64| Q::from_integer(x);
            let companion = DenseMatrix::from_rows(vec![
                vec![q(0), q(0), q(-c[0])],
                vec![q(1), q(0), q(-c[1])],
                vec![q(0), q(1), q(-c[2])],
            ]);
            let expected = DensePoly::new(vec![q(c[0]), q(c[1]), q(c[2]), q(1)]);
            prop_assert_eq!(charpoly(&companion), expected);
        }

        #[test]
        fn lll_preserves_volume(a in square(3)) {
            let volume = gram_volume(&a);
            prop_assume!(volume != Q::from_integer(0));
            let reduced = lll_reduce(&a, &Q::new(3, 4)).basis;
            prop_assert_eq!(gram_volume(&reduced), volume);
            let shortest_input = a.rows().map(norm_squared).min().unwrap();
            prop_assert!(norm_squared(reduced.row(0)) <= shortest_input * Q::from_integer(4));
        }
    }
}
