//! Squarefree factorization of polynomials.
//!
//! Produces a factorization where each factor is squarefree
//! (no repeated roots), using Yun's algorithm with primitive gcds so that
//! every intermediate polynomial stays in `Z[x]`.

use qqbar_poly::integer::{content, div_exact, gcd, primitive_part};
use qqbar_poly::DensePoly;
use qqbar_rings::Z;

/// A squarefree factor with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor {
    /// The squarefree polynomial (primitive, positive leading coefficient).
    pub factor: DensePoly<Z>,
    /// The multiplicity (power) of this factor.
    pub multiplicity: usize,
}

/// Result of squarefree factorization.
#[derive(Clone, Debug)]
pub struct SquarefreeFactorization {
    /// Signed content of the input.
    pub content: Z,
    /// Pairwise coprime squarefree factors, increasing multiplicity.
    pub factors: Vec<SquarefreeFactor>,
}

impl SquarefreeFactorization {
    /// Reconstructs the original polynomial from factorization.
    #[must_use]
    pub fn to_polynomial(&self) -> DensePoly<Z> {
        self.factors.iter().fold(
            DensePoly::constant(self.content.clone()),
            |acc, sf| acc.mul(&sf.factor.pow(sf.multiplicity as u32)),
        )
    }
}

/// Computes the squarefree factorization of a polynomial over Z.
#[must_use]
pub fn squarefree_factorization(f: &DensePoly<Z>) -> SquarefreeFactorization {
    if f.degree() == 0 {
        return SquarefreeFactorization {
            content: f.coeff(0),
            factors: Vec::new(),
        };
    }

    let mut c = content(f);
    if f.leading_coeff().0.is_negative() {
        c = -c;
    }
    let f = primitive_part(f);

    let mut factors = Vec::new();
    let df = f.derivative();
    let g = gcd(&f, &df);
    let (Some(mut a), Some(mut b)) = (div_exact(&f, &g), div_exact(&df, &g)) else {
        unreachable!("gcd divides its arguments");
    };
    let mut cur = b.sub(&a.derivative());
    let mut multiplicity = 1;

    while a.degree() > 0 {
        let d = gcd(&a, &cur);
        if d.degree() > 0 {
            factors.push(SquarefreeFactor {
                factor: d.clone(),
                multiplicity,
            });
        }
        let (Some(next_a), Some(next_b)) = (div_exact(&a, &d), div_exact(&cur, &d)) else {
            unreachable!("gcd divides its arguments");
        };
        a = next_a;
        b = next_b;
        cur = b.sub(&a.derivative());
        multiplicity += 1;
    }

    SquarefreeFactorization {
        content: Z(c),
        factors,
    }
}

/// The squarefree part: product of the distinct primitive factors.
#[must_use]
pub fn squarefree_part(f: &DensePoly<Z>) -> DensePoly<Z> {
    squarefree_factorization(f)
        .factors
        .iter()
        .fold(DensePoly::one(), |acc, sf| acc.mul(&sf.factor))
}

/// Returns true if `f` has no repeated factor of positive degree.
#[must_use]
pub fn is_squarefree(f: &DensePoly<Z>) -> bool {
    f.degree() == 0 || gcd(f, &f.derivative()).degree() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_poly::integer::from_i64s;

    #[test]
    fn test_repeated_factors() {
        // -2 (x - 1)^2 (x + 2)^3
        let f = from_i64s(&[-1, 1])
            .pow(2)
            .mul(&from_i64s(&[2, 1]).pow(3))
            .scale(&Z::new(-2));
        let sf = squarefree_factorization(&f);

        assert_eq!(sf.content, Z::new(-2));
        assert_eq!(
            sf.factors,
            vec![
                SquarefreeFactor {
                    factor: from_i64s(&[-1, 1]),
                    multiplicity: 2
                },
                SquarefreeFactor {
                    factor: from_i64s(&[2, 1]),
                    multiplicity: 3
                },
            ]
        );
        assert_eq!(sf.to_polynomial(), f);
    }

    #[test]
    fn test_squarefree_input() {
        let f = from_i64s(&[-2, 0, 3]);
        let sf = squarefree_factorization(&f);
        assert_eq!(sf.factors.len(), 1);
        assert_eq!(sf.factors[0].multiplicity, 1);
        assert!(is_squarefree(&f));
        assert!(!is_squarefree(&from_i64s(&[1, 2, 1])));
        assert_eq!(squarefree_part(&from_i64s(&[0, 0, 1, 1])), from_i64s(&[0, 1, 1]));
    }
}
