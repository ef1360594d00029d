//! Dense matrix implementation for small matrices.
//!
//! Matrices in this workspace are small: companion-style inputs to
//! eigenvalue computations and lattice bases of a few dozen rows.

use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use qqbar_rings::traits::Ring;

/// Size from which products are computed row-parallel.
const PARALLEL_THRESHOLD: usize = 24;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    data: Vec<R>,
    num_rows: usize,
    num_cols: usize,
}

impl<R: Ring> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from its rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == num_cols), "ragged rows");
        Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[R]> {
        (0..self.num_rows).map(move |i| self.row(i))
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);
        let data = (0..self.num_rows)
            .flat_map(|i| (0..other.num_cols).map(move |j| self.dot_col(i, other, j)))
            .collect();
        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }

    fn dot_col(&self, i: usize, other: &Self, j: usize) -> R {
        self.row(i)
            .iter()
            .enumerate()
            .fold(R::zero(), |acc, (k, a)| acc + a.clone() * other[(k, j)].clone())
    }

    /// Sum of the diagonal entries.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn trace(&self) -> R {
        assert!(self.is_square());
        (0..self.num_rows).fold(R::zero(), |acc, i| acc + self[(i, i)].clone())
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for k in 0..self.num_cols {
            self.data.swap(i * self.num_cols + k, j * self.num_cols + k);
        }
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &R) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * scale.clone();
            self[(target, k)] = self[(target, k)].clone() + val;
        }
    }
}

impl<R: Ring + Send + Sync> DenseMatrix<R> {
    /// Matrix-matrix multiply, row-parallel above a small size.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm_parallel(&self, other: &Self) -> Self {
        if self.num_rows < PARALLEL_THRESHOLD {
            return self.mm(other);
        }
        assert_eq!(self.num_cols, other.num_rows);
        let data: Vec<R> = (0..self.num_rows)
            .into_par_iter()
            .flat_map_iter(|i| (0..other.num_cols).map(move |j| self.dot_col(i, other, j)))
            .collect();
        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qqbar_rings::Z;

    fn zm(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| Z::new(x)).collect()).collect())
    }

    #[test]
    fn test_shape_and_trace() {
        let m = zm(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(m.num_rows(), 3);
        assert!(m.is_square());
        assert_eq!(m[(2, 1)], Z::new(8));
        assert_eq!(m.trace(), Z::new(15));
        assert!(!DenseMatrix::<Z>::zeros(2, 3).is_square());
    }

    #[test]
    fn test_mm() {
        let a = zm(&[&[1, 2], &[3, 4]]);
        let b = zm(&[&[5, 6], &[7, 8]]);
        assert_eq!(a.mm(&b), zm(&[&[19, 22], &[43, 50]]));
        assert_eq!(a.mm_parallel(&b), a.mm(&b));
    }

    #[test]
    fn test_parallel_product_matches_serial() {
        let n = PARALLEL_THRESHOLD + 3;
        let entry = |i: usize, j: usize| Z::new(i64::try_from((i * 7 + j * 3) % 11).unwrap() - 5);
        let a = DenseMatrix::from_rows((0..n).map(|i| (0..n).map(|j| entry(i, j)).collect()).collect());
        let b = DenseMatrix::from_rows((0..n).map(|i| (0..n).map(|j| entry(j, i)).collect()).collect());
        assert_eq!(a.mm_parallel(&b), a.mm(&b));
    }

    #[test]
    fn test_row_operations() {
        let mut m = zm(&[&[1, 2], &[3, 4]]);
        m.swap_rows(0, 1);
        assert_eq!(m.row(0), &[Z::new(3), Z::new(4)]);
        m.add_scaled_row(1, 0, &Z::new(-2));
        assert_eq!(m, zm(&[&[3, 4], &[-5, -6]]));
        assert_eq!(m.rows().count(), 2);
    }
}
