//! Property-based tests for truncated series.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::PowerSeries;
    use qqbar_rings::traits::Ring;
    use qqbar_rings::Q;

    const PRECISION: usize = 7;

    fn series() -> impl Strategy<Value = PowerSeries<Q>> {
        proptest::collection::vec((-20i64..20, 1i64..5), PRECISION)
            .prop_map(|c| PowerSeries::from_coeffs(c.into_iter().map(|(n, d)| Q::new(n, d)).collect()))
    }

    fn without_constant(f: PowerSeries<Q>) -> PowerSeries<Q> {
        let mut c = f.coeffs().to_vec();
        c[0] = Q::zero();
        PowerSeries::from_coeffs(c)
    }

    proptest! {
        #[test]
        fn inverse_is_reciprocal(f in series()) {
            prop_assume!(!f.coeff(0).is_zero());
            let g = f.inverse().unwrap();
            prop_assert_eq!(f.mul(&g), PowerSeries::constant(Q::one(), PRECISION));
        }

        #[test]
        fn exp_turns_sum_into_product(f in series(), g in series()) {
            let f = without_constant(f);
            let g = without_constant(g);
            let lhs = f.add(&g).exp().unwrap();
            let rhs = f.exp().unwrap().mul(&g.exp().unwrap());
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn borel_roundtrip(f in series()) {
            prop_assert_eq!(f.borel().inverse_borel(), f);
        }

        #[test]
        fn integral_then_derivative(f in series()) {
            prop_assert_eq!(f.integral().derivative(), f);
        }
    }
}
