use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyType;
use std::ops::{Add, Mul, Sub};

use crate::matrix::matrix::{Matrix, MatrixError};

// --------------------------------------------------
//                      PYTHON
// --------------------------------------------------

fn to_py_err(error: MatrixError) -> PyErr {
    match error {
        MatrixError::IndexOutOfRange => PyIndexError::new_err(error.to_string()),
        _ => PyValueError::new_err(error.to_string()),
    }
}

// Python indices are signed, anything negative is already out of range.
fn to_indices(index: (isize, isize)) -> Result<(usize, usize), MatrixError> {
    match (usize::try_from(index.0), usize::try_from(index.1)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(MatrixError::IndexOutOfRange),
    }
}

#[pymethods]
impl Matrix {
    #[new]
    #[pyo3(signature = (rows=1, cols=1))]
    fn py_new(rows: isize, cols: isize) -> PyResult<Matrix> {
        if rows < 1 || cols < 1 {
            return Err(to_py_err(MatrixError::InvalidDimension));
        }
        Matrix::new(rows as usize, cols as usize).map_err(to_py_err)
    }

    #[classmethod]
    #[pyo3(name = "from_list")]
    fn py_from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Matrix> {
        Matrix::from_list(lines).map_err(to_py_err)
    }

    #[pyo3(name = "to_list")]
    fn py_to_list(&self) -> Vec<Vec<f64>> {
        self.to_list()
    }

    #[getter(rows)]
    fn py_rows(&self) -> usize {
        self.rows()
    }

    #[getter(cols)]
    fn py_cols(&self) -> usize {
        self.cols()
    }

    #[getter(T)]
    fn py_transpose(&self) -> Matrix {
        self.transpose()
    }

    fn __str__(&self) -> String {
        self.to_string()
    }

    fn __eq__(&self, rhs: &Matrix) -> bool {
        self == rhs
    }

    fn __add__(&self, rhs: &Matrix) -> PyResult<Matrix> {
        match self.add(rhs) {
            Ok(result) => Ok(result),
            Err(error) => Err(to_py_err(error)),
        }
    }

    fn __sub__(&self, rhs: &Matrix) -> PyResult<Matrix> {
        match self.sub(rhs) {
            Ok(result) => Ok(result),
            Err(error) => Err(to_py_err(error)),
        }
    }

    fn __mul__(&self, rhs: &Matrix) -> PyResult<Matrix> {
        match self.mul(rhs) {
            Ok(result) => Ok(result),
            Err(error) => Err(to_py_err(error)),
        }
    }

    fn __getitem__(&self, index: (isize, isize)) -> PyResult<f64> {
        let (row, col) = to_indices(index).map_err(to_py_err)?;
        self.get(row, col).map_err(to_py_err)
    }

    fn __setitem__(&mut self, index: (isize, isize), value: f64) -> PyResult<()> {
        let (row, col) = to_indices(index).map_err(to_py_err)?;
        *self.get_mut(row, col).map_err(to_py_err)? = value;
        Ok(())
    }

    #[pyo3(name = "add_matrix")]
    fn py_add_matrix(&mut self, rhs: &Matrix) -> PyResult<()> {
        self.add_matrix(rhs).map_err(to_py_err)
    }

    #[pyo3(name = "sub_matrix")]
    fn py_sub_matrix(&mut self, rhs: &Matrix) -> PyResult<()> {
        self.sub_matrix(rhs).map_err(to_py_err)
    }

    #[pyo3(name = "mul_number")]
    fn py_mul_number(&mut self, number: f64) {
        self.mul_number(number);
    }

    #[pyo3(name = "mul_matrix")]
    fn py_mul_matrix(&mut self, rhs: &Matrix) -> PyResult<()> {
        self.mul_matrix(rhs).map_err(to_py_err)
    }

    #[pyo3(name = "minor")]
    fn py_minor(&self, row: isize, col: isize) -> PyResult<Matrix> {
        let (row, col) = to_indices((row, col)).map_err(to_py_err)?;
        self.minor(row, col).map_err(to_py_err)
    }

    #[pyo3(name = "complements")]
    fn py_complements(&self) -> PyResult<Matrix> {
        self.complements().map_err(to_py_err)
    }

    #[pyo3(name = "determinant")]
    fn py_determinant(&self) -> PyResult<f64> {
        self.determinant().map_err(to_py_err)
    }

    #[pyo3(name = "inverse")]
    fn py_inverse(&self) -> PyResult<Matrix> {
        self.inverse().map_err(to_py_err)
    }

    #[pyo3(name = "set_rows")]
    fn py_set_rows(&mut self, rows: isize) -> PyResult<()> {
        if rows < 1 {
            return Err(to_py_err(MatrixError::InvalidDimension));
        }
        self.set_rows(rows as usize).map_err(to_py_err)
    }

    #[pyo3(name = "set_cols")]
    fn py_set_cols(&mut self, cols: isize) -> PyResult<()> {
        if cols < 1 {
            return Err(to_py_err(MatrixError::InvalidDimension));
        }
        self.set_cols(cols as usize).map_err(to_py_err)
    }
}
