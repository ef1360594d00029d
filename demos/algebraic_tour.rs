//! Algebraic Number Tour
//!
//! Walks through exact arithmetic, comparison, powers and root finding on
//! algebraic numbers.
//!
//! Run with: cargo run -p qqbar --example algebraic_tour

use qqbar::algebraic::{binary_op, compare_real, eigenvalues, guess, roots, AlgebraicNumber, BinaryOp};
use qqbar::integers::Rational;
use qqbar::linalg::DenseMatrix;
use qqbar::poly::integer::from_i64s;
use qqbar::rings::Q;
use std::time::Instant;

fn q(n: i64, d: i64) -> Rational {
    Rational::from_i64(n, d)
}

fn sqrt(n: i64) -> AlgebraicNumber {
    AlgebraicNumber::sqrt(&q(n, 1)).unwrap()
}

fn main() {
    println!("Exact algebraic numbers\n");

    example_1_arithmetic();
    example_2_comparison();
    example_3_powers_and_roots();
    example_4_polynomial_roots();
    example_5_eigenvalues();
    example_6_recognition();
}

/// Example 1: Field arithmetic
fn example_1_arithmetic() {
    println!("Example 1: Field arithmetic");

    let s = &sqrt(2) + &sqrt(3);
    println!("  √2 + √3          = {s}");
    println!("  minimal poly     = {}", s.poly());

    let d = &sqrt(2) + &sqrt(2);
    println!("  √2 + √2          = {d}  ({})", d.poly());

    let a = AlgebraicNumber::from_re_im(&q(1, 1), &q(1, 1)).unwrap();
    let b = a.conj();
    println!("  (1+i)(1-i)       = {}", &a * &b);

    let phi = AlgebraicNumber::phi();
    println!("  1/φ              = {}", phi.inv().unwrap());
    println!();
}

/// Example 2: Exact comparison
fn example_2_comparison() {
    println!("Example 2: Comparison");

    let x = &sqrt(2) + &sqrt(3);
    let y = binary_op(&sqrt(5), &AlgebraicNumber::from_rational(&q(11, 12)), BinaryOp::Add).unwrap();
    println!("  √2 + √3 vs √5 + 11/12: {:?}", compare_real(&x, &y).unwrap());

    let z = AlgebraicNumber::root_of_unity(1, 8).unwrap();
    let w = AlgebraicNumber::from_re_im(&q(0, 1), &q(1, 1)).unwrap();
    let zw = &z * &w;
    println!("  Re(e^(πi/4)) vs Re(i·e^(πi/4)): {:?}", compare_real(&z, &zw).unwrap());
    println!("  e^(πi/4)^8 == 1: {}", z.pow_ui(8).unwrap().is_one());
    println!();
}

/// Example 3: Powers and principal roots
fn example_3_powers_and_roots() {
    println!("Example 3: Powers and roots");

    let r = AlgebraicNumber::from_i64(-8).root_ui(3).unwrap();
    println!("  ∛(-8)            = {r}");
    println!("  minimal poly     = {}", r.poly());

    let inner = &AlgebraicNumber::from_i64(3) + &(&AlgebraicNumber::from_i64(2) * &sqrt(2));
    println!("  √(3 + 2√2)       = {}", inner.root_ui(2).unwrap());

    let t = AlgebraicNumber::from_i64(2).pow_rational(&q(3, 4)).unwrap();
    println!("  2^(3/4)          = {t}");

    let z = AlgebraicNumber::root_of_unity(3, 10).unwrap();
    println!("  e^(3πi/5) order  = {:?}", z.is_root_of_unity());
    println!();
}

/// Example 4: Roots of a polynomial
fn example_4_polynomial_roots() {
    println!("Example 4: Roots of x^5 - x - 1");

    let p = from_i64s(&[-1, -1, 0, 0, 0, 1]);
    let start = Instant::now();
    let rs = roots(&p, false).unwrap();
    let elapsed = start.elapsed();

    for r in &rs {
        println!("  {r}");
    }
    println!("  ({} roots in {elapsed:?})", rs.len());
    println!();
}

/// Example 5: Eigenvalues of a rational matrix
fn example_5_eigenvalues() {
    println!("Example 5: Eigenvalues of [[0, -1], [1, 0]]");

    let m = DenseMatrix::from_rows(vec![
        vec![Q::from_integer(0), Q::from_integer(-1)],
        vec![Q::from_integer(1), Q::from_integer(0)],
    ]);
    for e in eigenvalues(&m).unwrap() {
        println!("  {e}");
    }
    println!();
}

/// Example 6: Recognising a number from a numeric enclosure
fn example_6_recognition() {
    println!("Example 6: Recognition");

    let s = &sqrt(2) + &sqrt(3);
    let ball = s.numerical_value(300).unwrap();
    match guess(&ball, 4, 16) {
        Some(g) => println!("  recovered {} from {ball}", g.poly()),
        None => println!("  no small-height match"),
    }
}
