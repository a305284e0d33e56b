use itertools::Itertools;
use pyo3::prelude::*;
use std::fmt;
use std::ops;
use thiserror::Error;

// Absolute tolerance used by matrix equality.
pub const EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix dimensions must be at least 1x1")]
    InvalidDimension,
    #[error("matrix dimensions are not compatible")]
    DimensionMismatch,
    #[error("matrix is not square")]
    NotSquare,
    #[error("matrix is singular")]
    SingularMatrix,
    #[error("index out of range")]
    IndexOutOfRange,
}

// Dense row-major matrix over f64. `cells` always holds exactly
// `rows * cols` elements and both dimensions stay >= 1.
#[pyclass]
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

// --------------------------------------------------
//                      MATH
// --------------------------------------------------

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension);
        }
        Ok(Matrix {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        })
    }

    pub fn identity(n: usize) -> Result<Matrix, MatrixError> {
        if n == 0 {
            return Err(MatrixError::InvalidDimension);
        }
        Ok(Matrix {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { 1.0 } else { 0.0 }))
                .collect(),
        })
    }

    // Short rows are padded with zeros up to the longest one.
    pub fn from_list(lines: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let rows = lines.len();
        let cols = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension);
        }
        Ok(Matrix {
            rows,
            cols,
            cells: lines
                .into_iter()
                .flat_map(|line| {
                    let padding = cols - line.len();
                    line.into_iter().chain(std::iter::repeat_n(0.0, padding))
                })
                .collect(),
        })
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfRange);
        }
        Ok(self.at(row, col))
    }

    // The reference points straight into the backing storage.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfRange);
        }
        let index = row * self.cols + col;
        Ok(&mut self.cells[index])
    }

    pub fn approx_eq(&self, rhs: &Matrix) -> bool {
        self.rows == rhs.rows
            && self.cols == rhs.cols
            && self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .all(|(a, b)| (a - b).abs() < EPSILON)
    }

    // Shape is checked first, the receiver is untouched on error.
    pub fn add_matrix(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(MatrixError::DimensionMismatch);
        }
        for (cell, value) in self.cells.iter_mut().zip(rhs.cells.iter()) {
            *cell += value;
        }
        Ok(())
    }

    pub fn sub_matrix(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(MatrixError::DimensionMismatch);
        }
        for (cell, value) in self.cells.iter_mut().zip(rhs.cells.iter()) {
            *cell -= value;
        }
        Ok(())
    }

    pub fn mul_number(&mut self, number: f64) {
        for cell in self.cells.iter_mut() {
            *cell *= number;
        }
    }

    // The product is built in a fresh buffer before replacing `self`,
    // so multiplying a matrix by a clone of itself stays correct.
    pub fn mul_matrix(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch);
        }
        let lhs = &*self;
        let cells: Vec<f64> = (0..lhs.rows)
            .flat_map(|i| {
                (0..rhs.cols)
                    .map(move |j| (0..lhs.cols).map(|k| lhs.at(i, k) * rhs.at(k, j)).sum())
            })
            .collect();
        let rows = self.rows;
        *self = Matrix {
            rows,
            cols: rhs.cols,
            cells,
        };
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    // Gaussian elimination on a working copy: pick a nonzero pivot
    // (swapping rows negates the result), fold the pivot into the
    // running product, normalize the pivot row, eliminate below.
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        if self.rows != self.cols {
            return Err(MatrixError::NotSquare);
        }
        let mut tmp = self.clone();
        let n = tmp.rows;
        let mut result = 1.0;
        for i in 0..n {
            if tmp.at(i, i) == 0.0 {
                match (i + 1..n).find(|&j| tmp.at(j, i) != 0.0) {
                    Some(j) => {
                        for k in 0..n {
                            tmp.cells.swap(i * n + k, j * n + k);
                        }
                        result = -result;
                    }
                    None => return Ok(0.0),
                }
            }
            let pivot = tmp.at(i, i);
            result *= pivot;
            for k in i..n {
                tmp.cells[i * n + k] /= pivot;
            }
            for j in i + 1..n {
                let factor = tmp.at(j, i);
                for k in i..n {
                    tmp.cells[j * n + k] -= tmp.at(i, k) * factor;
                }
            }
        }
        Ok(result)
    }

    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfRange);
        }
        if self.rows < 2 || self.cols < 2 {
            return Err(MatrixError::InvalidDimension);
        }
        Ok(Matrix {
            rows: self.rows - 1,
            cols: self.cols - 1,
            cells: (0..self.rows)
                .filter(|&r| r != row)
                .flat_map(|r| {
                    (0..self.cols)
                        .filter(move |&c| c != col)
                        .map(move |c| self.at(r, c))
                })
                .collect(),
        })
    }

    // Matrix of cofactors. The 1x1 case is [[1]] so that the 1x1
    // inverse comes out as [[1/a]].
    pub fn complements(&self) -> Result<Matrix, MatrixError> {
        if self.rows != self.cols {
            return Err(MatrixError::NotSquare);
        }
        if self.rows == 1 {
            return Ok(Matrix {
                rows: 1,
                cols: 1,
                cells: vec![1.0],
            });
        }
        let mut result = Matrix::new(self.rows, self.cols)?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let det = self.minor(i, j)?.determinant()?;
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                result.cells[i * result.cols + j] = sign * det;
            }
        }
        Ok(result)
    }

    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        let determinant = self.determinant()?;
        if determinant == 0.0 {
            return Err(MatrixError::SingularMatrix);
        }
        let mut result = self.complements()?.transpose();
        result.mul_number(1.0 / determinant);
        Ok(result)
    }

    // Grow with zero rows at the bottom, shrink by dropping them.
    pub fn set_rows(&mut self, rows: usize) -> Result<(), MatrixError> {
        let mut result = Matrix::new(rows, self.cols)?;
        for row in 0..rows.min(self.rows) {
            for col in 0..self.cols {
                result.cells[row * result.cols + col] = self.at(row, col);
            }
        }
        *self = result;
        Ok(())
    }

    pub fn set_cols(&mut self, cols: usize) -> Result<(), MatrixError> {
        let mut result = Matrix::new(self.rows, cols)?;
        for row in 0..self.rows {
            for col in 0..cols.min(self.cols) {
                result.cells[row * cols + col] = self.at(row, col);
            }
        }
        *self = result;
        Ok(())
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }
}

// --------------------------------------------------
//                      RUST
// --------------------------------------------------

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix {
            rows: 1,
            cols: 1,
            cells: vec![0.0],
        }
    }
}

impl PartialEq for Matrix {
    fn eq(&self, rhs: &Matrix) -> bool {
        self.approx_eq(rhs)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.cols) {
            writeln!(f, "{}", line.iter().join("\t"))?;
        }
        Ok(())
    }
}

impl ops::Add<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn add(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut result = self.clone();
        result.add_matrix(rhs)?;
        Ok(result)
    }
}

impl ops::Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn sub(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut result = self.clone();
        result.sub_matrix(rhs)?;
        Ok(result)
    }
}

impl ops::Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut result = self.clone();
        result.mul_matrix(rhs)?;
        Ok(result)
    }
}

impl ops::Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        let mut result = self.clone();
        result.mul_number(rhs);
        result
    }
}

impl ops::Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
