//! Property-based tests for exact integer and rational arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!((&a % &g).is_zero());
            prop_assert!((&b % &g).is_zero());
            prop_assert!(!g.is_negative());
        }

        #[test]
        fn floor_division_identity(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let (q, r) = a.div_rem_floor(&b);
            prop_assert_eq!(&q * &b + &r, a);
            prop_assert!(r.abs() < b.abs());
            prop_assert!(r.is_zero() || r.is_negative() == b.is_negative());
        }

        #[test]
        fn shift_division_brackets_value(a in small_int(), k in 0usize..12) {
            let a = Integer::new(a);
            let lo = a.fdiv_2exp(k).mul_2exp(k);
            let hi = a.cdiv_2exp(k).mul_2exp(k);
            prop_assert!(lo <= a && a <= hi);
            prop_assert!(&hi - &lo <= Integer::power_of_two(k));
        }

        #[test]
        fn floor_root_brackets_value(a in 0u64..u64::MAX, n in 1u32..7) {
            let a = Integer::from(a);
            let r = a.floor_root(n);
            prop_assert!(r.pow(n) <= a);
            prop_assert!((r + Integer::one()).pow(n) > a);
        }

        #[test]
        fn exact_root_of_power(a in small_int(), n in 1u32..6) {
            let a = Integer::new(a);
            let p = a.pow(n);
            let r = p.exact_root(n).expect("perfect power has a root");
            prop_assert_eq!(r.pow(n), p);
        }

        #[test]
        fn rational_distributive(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int(),
            num_c in small_int(),
            den_c in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let c = Rational::from_i64(num_c, den_c);
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!((a.clone() * a.recip()).is_one());
        }

        #[test]
        fn rational_floor_ceil_bracket(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let f = Rational::from_integer(a.floor());
            let c = Rational::from_integer(a.ceil());
            prop_assert!(f <= a && a <= c);
            prop_assert!(&c - &f <= Rational::one());
        }
    }
}
