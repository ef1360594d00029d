//! End-to-end scenarios through the public API.

use std::cmp::Ordering;

use qqbar_algebraic::{
    binary_op, compare_magnitude, compare_real, eigenvalues, guess, refine, roots, AlgebraicNumber, BinaryOp,
    QqbarError,
};
use qqbar_ball::{ComplexBall, Dyadic, RealBall, Round};
use qqbar_integers::{Integer, Rational};
use qqbar_linalg::DenseMatrix;
use qqbar_poly::integer::{cyclotomic, from_i64s};
use qqbar_rings::Q;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn q(n: i64, d: i64) -> Rational {
    Rational::from_i64(n, d)
}

fn sqrt(n: i64) -> AlgebraicNumber {
    AlgebraicNumber::sqrt(&q(n, 1)).unwrap()
}

#[test]
fn sum_of_equal_square_roots() {
    init();
    let s = &sqrt(2) + &sqrt(2);
    assert_eq!(s.poly(), &from_i64s(&[-8, 0, 1]));
    assert_eq!(s.poly().to_string(), "x^2 - 8");
    assert!(s.enclosure().re().is_positive());
    assert_eq!(s, sqrt(8));
}

#[test]
fn gaussian_product_is_rational() {
    init();
    let a = AlgebraicNumber::from_re_im(&q(1, 1), &q(1, 1)).unwrap();
    let b = AlgebraicNumber::from_re_im(&q(1, 1), &q(-1, 1)).unwrap();
    let p = &a * &b;
    assert!(p.is_integer());
    assert_eq!(p, AlgebraicNumber::from_i64(2));
}

#[test]
fn fifth_root_of_unity_to_the_fifth() {
    init();
    let z = AlgebraicNumber::root_of_unity(1, 5).unwrap();
    assert_eq!(z.poly(), &cyclotomic(5));
    assert!(z.pow_ui(5).unwrap().is_one());
    // the other powers stay primitive
    for k in 1..5 {
        assert_eq!(z.pow_ui(k).unwrap().is_root_of_unity().map(|(_, n)| n), Some(5));
    }
}

#[test]
fn cube_root_of_eight() {
    init();
    let r = AlgebraicNumber::from_i64(8).root_ui(3).unwrap();
    assert_eq!(r.to_rational(), Some(q(2, 1)));
}

#[test]
fn square_roots_are_ordered() {
    init();
    assert_eq!(compare_real(&sqrt(2), &sqrt(3)).unwrap(), Ordering::Less);
    assert_eq!(compare_magnitude(&sqrt(3), &sqrt(2).neg()).unwrap(), Ordering::Greater);
}

#[test]
fn nested_radical_denests() {
    init();
    // √(3 + 2√2) = 1 + √2
    let inner = &AlgebraicNumber::from_i64(3) + &(&AlgebraicNumber::from_i64(2) * &sqrt(2));
    let root = inner.root_ui(2).unwrap();
    let expected = &AlgebraicNumber::one() + &sqrt(2);
    assert_eq!(root, expected);
    assert_eq!(root.poly(), &from_i64s(&[-1, -2, 1]));
}

#[test]
fn golden_ratio_identities() {
    init();
    let phi = AlgebraicNumber::phi();
    // φ² = φ + 1 and 1/φ = φ − 1
    assert_eq!(phi.pow_ui(2).unwrap(), &phi + &AlgebraicNumber::one());
    assert_eq!(phi.inv().unwrap(), &phi - &AlgebraicNumber::one());
    assert_eq!(phi.floor().unwrap(), Integer::new(1));
    assert_eq!(phi.ceil().unwrap(), Integer::new(2));
}

#[test]
fn quintic_roots_with_multiplicity() {
    init();
    // (x⁵ − x − 1)(x − 1)²
    let p = from_i64s(&[-1, -1, 0, 0, 0, 1]).mul(&from_i64s(&[-1, 1]).pow(2));
    let all = roots(&p, true).unwrap();
    assert_eq!(all.len(), 7);
    let real: Vec<_> = all.iter().filter(|r| r.is_real()).collect();
    assert_eq!(real.len(), 3);
    assert!(real[0].is_one() && real[1].is_one());
    assert_eq!(real[2].degree(), 5);
}

#[test]
fn companion_matrix_eigenvalues() {
    init();
    // companion matrix of x³ − 2
    let z = Q::from_integer(0);
    let one = Q::from_integer(1);
    let m = DenseMatrix::from_rows(vec![
        vec![z.clone(), z.clone(), Q::from_integer(2)],
        vec![one.clone(), z.clone(), z.clone()],
        vec![z.clone(), one, z],
    ]);
    let ev = eigenvalues(&m).unwrap();
    assert_eq!(ev.len(), 3);
    assert_eq!(ev[0], AlgebraicNumber::from_i64(2).root_ui(3).unwrap());
    for e in &ev {
        assert_eq!(e.pow_ui(3).unwrap().to_rational(), Some(q(2, 1)));
    }
}

#[test]
fn guessing_recovers_a_sum() {
    init();
    let s = &sqrt(2) + &sqrt(3);
    let ball = s.numerical_value(400).unwrap();
    let g = guess(&ball, 4, 16).unwrap();
    assert_eq!(g, s);
}

#[test]
fn domain_errors_are_reported() {
    init();
    let zero = AlgebraicNumber::zero();
    assert_eq!(
        binary_op(&sqrt(2), &zero, BinaryOp::Div).unwrap_err(),
        QqbarError::DivisionByZero
    );
    assert_eq!(sqrt(2).root_ui(0).unwrap_err(), QqbarError::ZeroRoot);
    assert_eq!(zero.pow_si(-3).unwrap_err(), QqbarError::ZeroToNegativePower);
    assert_eq!(sqrt(2).pow(&sqrt(3)).unwrap_err(), QqbarError::NonRationalExponent);
}

#[test]
fn display_formats() {
    init();
    assert_eq!(AlgebraicNumber::from_rational(&q(-3, 4)).to_string(), "-3/4");
    assert!(sqrt(2).to_string().starts_with("Root of x^2 - 2 near 1.41421"));
}

#[test]
fn conjugate_quartics_multiply_to_one() {
    init();
    // √2 + √3 and √3 − √2 share the minimal polynomial x⁴ − 10x² + 1
    let x = &sqrt(2) + &sqrt(3);
    let y = &sqrt(3) - &sqrt(2);
    assert_eq!(x.poly(), y.poly());
    let p = &x * &y;
    assert_eq!(p.to_rational(), Some(q(1, 1)));
    assert_eq!(binary_op(&x, &y, BinaryOp::Add).unwrap(), &AlgebraicNumber::from_i64(2) * &sqrt(3));
}

#[test]
fn refinement_recovers_from_a_wide_seed() {
    init();
    // the box around the real root of x³ − x − 1 also spans both critical
    // points, so interval Newton cannot start
    let p = from_i64s(&[-1, -1, 0, 1]);
    let lo = Dyadic::from_rational(&q(-1, 5), 64, Round::Down);
    let hi = Dyadic::from_i64(2);
    let seed = ComplexBall::from_real(RealBall::from_bounds(&lo, &hi));
    let tight = refine(&p, &seed, 200).unwrap();
    assert!(tight.is_real());
    assert!(tight.rel_accuracy_bits() >= 200);
    assert!((tight.re().mid().to_f64() - 1.324_717_957_244_746).abs() < 1e-15);
}

#[test]
fn principal_roots_of_negative_numbers() {
    init();
    let i = AlgebraicNumber::from_i64(-1).root_ui(2).unwrap();
    assert_eq!(i, AlgebraicNumber::i());
    let c = AlgebraicNumber::from_i64(-8).root_ui(3).unwrap();
    // 1 + i√3
    let expected = &AlgebraicNumber::one() + &(&AlgebraicNumber::i() * &sqrt(3));
    assert_eq!(c, expected);
    // (−27)^(2/3) = 9·e^(2πi/3)
    let w = AlgebraicNumber::from_i64(-27).pow_rational(&q(2, 3)).unwrap();
    assert_eq!(w.re().unwrap().to_rational(), Some(q(-9, 2)));
    assert!(w.enclosure().im().is_positive());
}

#[test]
fn large_power_keeps_degree() {
    init();
    // 2^(1/33) raised past the power-sum limit
    let x = AlgebraicNumber::from_i64(2).root_ui(33).unwrap();
    let y = x.pow_ui(70).unwrap();
    assert_eq!(y.degree(), 33);
    assert_eq!(y, &AlgebraicNumber::from_i64(4) * &x.pow_ui(4).unwrap());
}
