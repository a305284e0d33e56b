use pyo3::prelude::*;

pub mod matrix {
    pub mod matrix;
    pub mod matrix_py;
}

/// A Python module implemented in Rust.
#[pymodule]
fn rust_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix::Matrix>()?;
    Ok(())
}
