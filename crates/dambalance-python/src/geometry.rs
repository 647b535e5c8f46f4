use pyo3::prelude::*;

use crate::errors::to_py_err;

use dambalance_core::geometry;

#[pyfunction]
fn solve_depth(base: f64, slope: f64, volume: f64) -> PyResult<f64> {
    geometry::solve_depth(base, slope, volume).map_err(to_py_err)
}

#[pyfunction]
fn surface_area(base: f64, slope: f64, depth: f64) -> PyResult<f64> {
    geometry::surface_area(base, slope, depth).map_err(to_py_err)
}

#[pyfunction]
fn wetted_surface_area(base: f64, slope: f64, depth: f64) -> PyResult<f64> {
    geometry::wetted_surface_area(base, slope, depth).map_err(to_py_err)
}

#[pyfunction]
fn volume_at_depth(base: f64, slope: f64, depth: f64) -> PyResult<f64> {
    geometry::volume_at_depth(base, slope, depth).map_err(to_py_err)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "geometry")?;
    m.add_function(wrap_pyfunction!(solve_depth, &m)?)?;
    m.add_function(wrap_pyfunction!(surface_area, &m)?)?;
    m.add_function(wrap_pyfunction!(wetted_surface_area, &m)?)?;
    m.add_function(wrap_pyfunction!(volume_at_depth, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
