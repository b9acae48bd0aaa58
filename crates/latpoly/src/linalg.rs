//! Exact integer linear algebra for small square matrices.
//!
//! Determinants use fraction-free Bareiss elimination, so every intermediate
//! value is an integer and every division is exact. The inverse is returned as
//! the pair `(adj(M), det(M))`, i.e. `M^{-1} = adj(M) / det(M)` without ever
//! leaving the integers. Overflow is reported, never wrapped.
//!
//! Sizes here are `dimension + 1` at most, so cofactor expansion of the
//! adjugate (one Bareiss run per entry) is cheap enough.

use crate::error::LinalgError;
use crate::space::{self, minus, mul, LatticeInt};

/// Dense row-major integer matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntMatrix<I: LatticeInt> {
    data: Vec<I>,
    rows: usize,
    cols: usize,
}

/// `M^{-1} = adjugate / det`, with `det != 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactInverse<I: LatticeInt> {
    pub adjugate: IntMatrix<I>,
    pub det: I,
}

impl<I: LatticeInt> IntMatrix<I> {
    /// Zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![I::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Matrix with entry `(r, c) = f(r, c)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> I) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> &I {
        &self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: I) {
        self.data[r * self.cols + c] = v;
    }

    /// Column `c` as a vector.
    pub fn column(&self, c: usize) -> Vec<I> {
        (0..self.rows).map(|r| self.get(r, c).clone()).collect()
    }

    /// Matrix with row `skip_r` and column `skip_c` removed.
    pub fn minor(&self, skip_r: usize, skip_c: usize) -> Self {
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != skip_r) {
            for c in (0..self.cols).filter(|&c| c != skip_c) {
                data.push(self.get(r, c).clone());
            }
        }
        Self {
            data,
            rows: self.rows - 1,
            cols: self.cols - 1,
        }
    }

    /// Determinant by Bareiss elimination.
    pub fn determinant(&self) -> Result<I, LinalgError> {
        self.ensure_square()?;
        let n = self.rows;
        if n == 0 {
            return Ok(I::one());
        }
        let mut m = self.clone();
        let mut negate = false;
        let mut prev = I::one();
        for k in 0..n - 1 {
            if m.get(k, k).is_zero() {
                let Some(pivot) = (k + 1..n).find(|&r| !m.get(r, k).is_zero()) else {
                    return Ok(I::zero());
                };
                m.swap_rows(k, pivot);
                negate = !negate;
            }
            let mkk = m.get(k, k).clone();
            for i in k + 1..n {
                let mik = m.get(i, k).clone();
                for j in k + 1..n {
                    let num = minus(&mul(m.get(i, j), &mkk)?, &mul(&mik, m.get(k, j))?)?;
                    // Bareiss: the division by the previous pivot is exact.
                    m.set(i, j, num / prev.clone());
                }
                m.set(i, k, I::zero());
            }
            prev = mkk;
        }
        let det = m.get(n - 1, n - 1).clone();
        if negate {
            space::negate(&det)
        } else {
            Ok(det)
        }
    }

    /// Classical adjugate `adj(M)`, so that `M · adj(M) = det(M) · Id`.
    pub fn adjugate(&self) -> Result<Self, LinalgError> {
        self.ensure_square()?;
        let n = self.rows;
        if n == 1 {
            return Ok(Self::from_fn(1, 1, |_, _| I::one()));
        }
        let mut out = Self::zeros(n, n);
        for r in 0..n {
            for c in 0..n {
                // adj(M)[r][c] = (-1)^(r+c) det(minor(M, c, r))
                let cof = self.minor(c, r).determinant()?;
                let cof = if (r + c) % 2 == 0 {
                    cof
                } else {
                    space::negate(&cof)?
                };
                out.set(r, c, cof);
            }
        }
        Ok(out)
    }

    /// Exact inverse as `(adjugate, det)`; `Err(Singular)` when `det == 0`.
    pub fn inverse(&self) -> Result<ExactInverse<I>, LinalgError> {
        let det = self.determinant()?;
        if det.is_zero() {
            return Err(LinalgError::Singular);
        }
        Ok(ExactInverse {
            adjugate: self.adjugate()?,
            det,
        })
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    fn ensure_square(&self) -> Result<(), LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Divide every entry by the gcd of all entries (exact); zero rows untouched.
pub fn normalize_row<I: LatticeInt>(row: &mut [I]) {
    let g = row.iter().fold(I::zero(), |g, x| g.gcd(x));
    if g.is_zero() || g.is_one() {
        return;
    }
    for x in row.iter_mut() {
        *x = x.clone() / g.clone();
    }
}
