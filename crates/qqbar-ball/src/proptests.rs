//! Property-based tests for ball arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use qqbar_integers::Rational;

    use crate::{ComplexBall, Dyadic, RealBall, Round};

    fn rational() -> impl Strategy<Value = Rational> {
        (-1000i64..1000, 1i64..200).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn directed_rounding_brackets(q in rational(), prec in 2u32..80) {
            let lo = Dyadic::from_rational(&q, prec, Round::Down);
            let hi = Dyadic::from_rational(&q, prec, Round::Up);
            prop_assert!(lo.to_rational() <= q && q <= hi.to_rational());
        }

        #[test]
        fn real_arithmetic_encloses(a in rational(), b in rational()) {
            let prec = 40;
            let x = RealBall::from_rational(&a, prec);
            let y = RealBall::from_rational(&b, prec);
            prop_assert!(x.add(&y, prec).contains_rational(&(&a + &b)));
            prop_assert!(x.sub(&y, prec).contains_rational(&(&a - &b)));
            prop_assert!(x.mul(&y, prec).contains_rational(&(&a * &b)));
            if let Some(q) = x.div(&y, prec) {
                prop_assert!(q.contains_rational(&(&a / &b)));
            }
        }

        #[test]
        fn complex_product_encloses(a in rational(), b in rational(), c in rational(), d in rational()) {
            let prec = 48;
            let z = ComplexBall::from_rationals(&a, &b, prec);
            let w = ComplexBall::from_rationals(&c, &d, prec);
            let p = z.mul(&w, prec);
            prop_assert!(p.re().contains_rational(&(&(&a * &c) - &(&b * &d))));
            prop_assert!(p.im().contains_rational(&(&(&a * &d) + &(&b * &c))));
        }

        #[test]
        fn pythagorean_identity(n in -500i64..500) {
            let prec = 64;
            let x = RealBall::from_rational(&Rational::from_i64(n, 7), prec);
            let (s, c) = x.sin_cos(prec);
            prop_assert!(s.sqr(prec).add(&c.sqr(prec), prec).contains(&RealBall::one()));
        }

        #[test]
        fn square_root_squares_back(n in 1i64..100_000) {
            let prec = 64;
            let x = RealBall::from_i64(n);
            let r = x.sqrt(prec).unwrap();
            prop_assert!(r.sqr(prec).contains(&x));
        }
    }
}
