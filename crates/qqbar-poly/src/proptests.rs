//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::dense::DensePoly;
    use crate::integer;
    use qqbar_integers::{Integer, Rational};
    use qqbar_rings::{Q, Z};

    fn small_coeff() -> impl Strategy<Value = Q> {
        (-100i64..100i64).prop_map(Q::from_integer)
    }

    fn small_poly() -> impl Strategy<Value = DensePoly<Q>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn int_poly() -> impl Strategy<Value = DensePoly<Z>> {
        proptest::collection::vec(-20i64..20i64, 1..=5).prop_map(|c| integer::from_i64s(&c))
    }

    fn nonzero_int_poly() -> impl Strategy<Value = DensePoly<Z>> {
        int_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in small_coeff()) {
            prop_assert_eq!(a.mul(&b).eval(&x), a.eval(&x) * b.eval(&x));
        }

        #[test]
        fn field_division_identity(a in small_poly(), b in small_poly()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b);
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn div_exact_inverts_mul(a in int_poly(), b in nonzero_int_poly()) {
            let product = a.mul(&b);
            prop_assert_eq!(integer::div_exact(&product, &b), Some(a));
        }

        #[test]
        fn gcd_divides_both(a in nonzero_int_poly(), b in nonzero_int_poly(), c in nonzero_int_poly()) {
            let x = a.mul(&c);
            let y = b.mul(&c);
            let g = integer::gcd(&x, &y);
            prop_assert!(integer::div_exact(&x, &g).is_some());
            prop_assert!(integer::div_exact(&y, &g).is_some());
            // the common factor survives up to content
            prop_assert!(integer::div_exact(&g, &integer::primitive_part(&c)).is_some());
        }

        #[test]
        fn compose_affine_maps_rational_roots(
            r in -10i64..10,
            a in prop_oneof![-5i64..=-1, 1i64..=5],
            b in -5i64..5,
            c in prop_oneof![-5i64..=-1, 1i64..=5],
            rest in nonzero_int_poly()
        ) {
            let p = integer::from_i64s(&[-r, 1]).mul(&rest);
            let q = integer::compose_affine(&p, &Integer::new(a), &Integer::new(b), &Integer::new(c));
            let image = Rational::from_i64(a * r + b, c);
            prop_assert!(num_traits::Zero::is_zero(&integer::eval_rational(&q, &image)));
            prop_assert_eq!(q.degree(), p.degree());
        }
    }
}
