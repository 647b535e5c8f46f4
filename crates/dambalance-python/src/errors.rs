//! One Python exception class per `BalanceError` variant.
//!
//! All of them subclass `ValueError`, so callers catching the builtin keep working.
use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use dambalance_core::BalanceError;

create_exception!(_core, InvalidGeometryError, PyValueError);
create_exception!(_core, InvalidVolumeError, PyValueError);
create_exception!(_core, InvalidDepthError, PyValueError);
create_exception!(_core, InvalidConfigError, PyValueError);
create_exception!(_core, MalformedForcingError, PyValueError);

pub fn to_py_err(err: BalanceError) -> PyErr {
    let msg = err.to_string();
    match err {
        BalanceError::InvalidGeometry { .. } => InvalidGeometryError::new_err(msg),
        BalanceError::InvalidVolume { .. } => InvalidVolumeError::new_err(msg),
        BalanceError::InvalidDepth { .. } => InvalidDepthError::new_err(msg),
        BalanceError::InvalidConfig(_) => InvalidConfigError::new_err(msg),
        BalanceError::MalformedForcing { .. } => MalformedForcingError::new_err(msg),
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("InvalidGeometryError", py.get_type::<InvalidGeometryError>())?;
    m.add("InvalidVolumeError", py.get_type::<InvalidVolumeError>())?;
    m.add("InvalidDepthError", py.get_type::<InvalidDepthError>())?;
    m.add("InvalidConfigError", py.get_type::<InvalidConfigError>())?;
    m.add("MalformedForcingError", py.get_type::<MalformedForcingError>())?;
    Ok(())
}
