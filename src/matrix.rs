use crate::error::{check_len, LayerError, Result};

use rand::distributions::Distribution;
use rand::Rng;
use std::ops::{Index, IndexMut};

/// A dense matrix of `f64`, stored row-major.
///
/// Layer weights use one row per input unit and one column per output unit,
/// so `m[(j, i)]` connects input `j` to output `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from nested rows, which must all have the same length.
    pub fn from_rows<T: AsRef<[f64]>>(rows: &[T]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            check_len("matrix row", cols, row.as_ref().len())?;
            data.extend_from_slice(row.as_ref());
        }
        Ok(Mat {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Replaces every element with a fresh sample from `distribution`.
    pub fn fill_random<D, R>(&mut self, distribution: D, rng: &mut R)
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        for x in &mut self.data {
            *x = distribution.sample(rng);
        }
    }

    /// Adds `rate * delta / n` to every element, in that order.
    pub fn apply_delta(
        &mut self,
        rate: f64,
        delta: &Mat,
        n: f64,
    ) -> Result<()> {
        if (self.rows, self.cols) != (delta.rows, delta.cols) {
            return Err(LayerError::ShapeMismatch {
                what: "matrix delta",
                expected: self.data.len(),
                actual: delta.data.len(),
            });
        }
        for (x, d) in self.data.iter_mut().zip(&delta.data) {
            *x += rate * d / n;
        }
        Ok(())
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for x in &mut self.data {
            *x *= factor;
        }
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}
