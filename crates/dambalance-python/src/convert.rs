use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2};
use pyo3::prelude::*;

use dambalance_core::balance::constants::RECORD_SIZE;
use dambalance_core::{BalanceError, ForcingSeries, RunOutput};

use crate::errors::to_py_err;

fn not_contiguous() -> BalanceError {
    BalanceError::MalformedForcing {
        row: 0,
        reason: "forcing must be a C-contiguous 2-D array".to_string(),
    }
}

/// Validate that a 2-D numpy array is C-contiguous and return its buffer.
///
/// Fails with `MalformedForcingError`.
pub fn contiguous_slice2<'py>(arr: &'py PyReadonlyArray2<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice().map_err(|_| to_py_err(not_contiguous()))
}

/// Read a `(n_days, >= 4)` forcing table.
pub fn forcing_from_array(arr: &PyReadonlyArray2<'_, f64>) -> PyResult<ForcingSeries> {
    let n_cols = arr.as_array().ncols();
    let data = contiguous_slice2(arr)?;
    ForcingSeries::from_row_major(data, n_cols).map_err(to_py_err)
}

/// Lay the reported records out as an `(n_days, 8)` array.
pub fn records_to_array<'py>(
    py: Python<'py>,
    output: &RunOutput,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let flat: Vec<f64> = output.to_rows().into_iter().flatten().collect();
    PyArray1::from_vec(py, flat).reshape([output.len(), RECORD_SIZE])
}
