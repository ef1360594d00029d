//! Property-based tests for algebraic-number arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use qqbar_integers::Rational;

    use crate::compare::{compare_real, sgn_im, sgn_re};
    use crate::scalar::scalar_op;
    use crate::select::{binary_op, BinaryOp};
    use crate::AlgebraicNumber;

    fn small_rational() -> impl Strategy<Value = Rational> {
        (-12i64..12, 1i64..6).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Quadratic irrationals, Gaussian rationals and low-order roots of
    // unity; all of degree at most 2.
    fn small_algebraic() -> impl Strategy<Value = AlgebraicNumber> {
        prop_oneof![
            small_rational().prop_map(|q| AlgebraicNumber::from_rational(&q)),
            (1i64..20).prop_map(|n| AlgebraicNumber::sqrt(&Rational::from_i64(n, 1)).unwrap()),
            (small_rational(), small_rational())
                .prop_map(|(a, b)| AlgebraicNumber::from_re_im(&a, &b).unwrap()),
            (0i64..6, prop::sample::select(vec![3u64, 4, 6])).prop_map(|(p, q)| AlgebraicNumber::root_of_unity(p, q).unwrap()),
        ]
    }

    fn add(x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
        binary_op(x, y, BinaryOp::Add).unwrap()
    }

    fn mul(x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
        binary_op(x, y, BinaryOp::Mul).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn addition_is_associative(a in small_algebraic(), b in small_algebraic(), c in small_algebraic()) {
            prop_assert_eq!(add(&add(&a, &b), &c), add(&a, &add(&b, &c)));
        }

        #[test]
        fn multiplication_is_associative(a in small_algebraic(), b in small_algebraic(), c in small_algebraic()) {
            prop_assert_eq!(mul(&mul(&a, &b), &c), mul(&a, &mul(&b, &c)));
        }

        #[test]
        fn subtraction_undoes_addition(a in small_algebraic(), b in small_algebraic()) {
            let s = add(&a, &b);
            prop_assert_eq!(binary_op(&s, &b, BinaryOp::Sub).unwrap(), a);
        }

        #[test]
        fn division_undoes_multiplication(a in small_algebraic(), b in small_algebraic()) {
            prop_assume!(!b.is_zero());
            let p = mul(&a, &b);
            prop_assert_eq!(binary_op(&p, &b, BinaryOp::Div).unwrap(), a);
        }

        #[test]
        fn principal_root_powers_back(x in small_algebraic(), n in 1u32..4) {
            let r = x.root_ui(n).unwrap();
            prop_assert_eq!(r.pow_ui(n).unwrap(), x);
        }

        #[test]
        fn rotation_swaps_signs(x in small_algebraic()) {
            let ix = mul(&AlgebraicNumber::i(), &x);
            prop_assert_eq!(sgn_re(&x).unwrap(), sgn_im(&ix).unwrap());
        }

        #[test]
        fn conjugates_sum_to_trace(x in small_algebraic()) {
            let d = x.degree();
            let trace = Rational::new(-x.poly().coeff(d - 1).0, x.poly().coeff(d).0);
            let total = x
                .conjugates()
                .unwrap()
                .iter()
                .fold(AlgebraicNumber::zero(), |acc, c| add(&acc, c));
            prop_assert_eq!(total.to_rational(), Some(trace));
        }

        #[test]
        fn real_order_matches_sign_of_difference(x in small_algebraic(), y in small_algebraic()) {
            let d = binary_op(&x.re().unwrap(), &y.re().unwrap(), BinaryOp::Sub).unwrap();
            prop_assert_eq!(compare_real(&x, &y).unwrap(), sgn_re(&d).unwrap().cmp(&0));
        }

        #[test]
        fn affine_map_inverts(x in small_algebraic(), a in small_rational(), b in small_rational()) {
            prop_assume!(!num_traits::Zero::is_zero(&a));
            let one = Rational::from_i64(1, 1);
            let y = scalar_op(&x, &a, &b, &one).unwrap();
            // x = (y − b)/a
            let back = scalar_op(&y, &one, &-&b, &a).unwrap();
            prop_assert_eq!(back, x);
        }
    }
}
