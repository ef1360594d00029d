//! Property-based tests for factorisation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{factor, squarefree_factorization};
    use qqbar_poly::integer::{div_exact, from_i64s};
    use qqbar_poly::DensePoly;
    use qqbar_rings::Z;

    fn small_poly() -> impl Strategy<Value = DensePoly<Z>> {
        proptest::collection::vec(-6i64..6, 2..=4)
            .prop_map(|c| from_i64s(&c))
            .prop_filter("positive degree", |p| p.degree() > 0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn factorisation_multiplies_back(a in small_poly(), b in small_poly(), c in small_poly()) {
            let f = a.mul(&b).mul(&c);
            let fac = factor(&f);
            prop_assert_eq!(fac.to_polynomial(), f.clone());
            for (g, _) in &fac.factors {
                prop_assert!(g.degree() > 0);
                prop_assert!(div_exact(&f, g).is_some());
            }
        }

        #[test]
        fn squarefree_parts_are_coprime(a in small_poly(), b in small_poly()) {
            let f = a.mul(&a).mul(&b);
            let sf = squarefree_factorization(&f);
            prop_assert_eq!(sf.to_polynomial(), f);
            for (i, x) in sf.factors.iter().enumerate() {
                for y in &sf.factors[i + 1..] {
                    prop_assert_eq!(qqbar_poly::integer::gcd(&x.factor, &y.factor).degree(), 0);
                }
            }
        }
    }
}
