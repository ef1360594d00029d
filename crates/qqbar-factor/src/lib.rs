//! Polynomial factorisation over Z for the qqbar workspace.
//!
//! This crate provides:
//! - **Squarefree decomposition** (Yun) in `Z[x]`
//! - **Cantor-Zassenhaus**: distinct- and equal-degree factorisation over F_p
//! - **Hensel lifting**: multifactor quadratic lifting from F_p to Z/p^k
//! - **Zassenhaus recombination**: exhaustive subset search for true factors
//!
//! # Parallelism
//!
//! Trial primes are factored in parallel with rayon, and
//! [`factor_batch`] factors independent polynomials in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cantor_zassenhaus;
pub mod hensel;
pub mod modular;
pub mod squarefree;
pub mod univariate;

#[cfg(test)]
mod proptests;

pub use cantor_zassenhaus::cantor_zassenhaus_factor;
pub use hensel::hensel_lift;
pub use modular::ModPoly;
pub use squarefree::{squarefree_factorization, SquarefreeFactor, SquarefreeFactorization};
pub use univariate::{factor, factor_batch, irreducible_factors, is_irreducible, Factorization};
