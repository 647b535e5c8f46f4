use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{forcing_from_array, records_to_array};
use crate::errors::to_py_err;

use dambalance_core::balance::run::step;
use dambalance_core::{
    run_dam, run_lake, BasinConfig, BasinGeometry, DailyForcing, FractionMode, LakeConfig,
    LakeOptions,
};

fn fractions(exact: bool) -> FractionMode {
    if exact {
        FractionMode::Exact
    } else {
        FractionMode::Legacy
    }
}

fn lake_config(
    capacity_volume: f64,
    initial_volume: f64,
    slope: f64,
    base: f64,
    leaky: bool,
    evaporation_reduction_pct: f64,
    exact: bool,
) -> LakeConfig {
    let basin = BasinConfig::new(capacity_volume, initial_volume, slope, base)
        .with_fractions(fractions(exact));
    LakeConfig::new(basin, LakeOptions::new(leaky, evaporation_reduction_pct))
}

// ---------------------------------------------------------------------------
// Array-returning runs
// ---------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (forcing, capacity_volume, initial_volume, slope, base, exact=false))]
fn dam_run<'py>(
    py: Python<'py>,
    forcing: PyReadonlyArray2<'py, f64>,
    capacity_volume: f64,
    initial_volume: f64,
    slope: f64,
    base: f64,
    exact: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let config = BasinConfig::new(capacity_volume, initial_volume, slope, base)
        .with_fractions(fractions(exact));
    let series = forcing_from_array(&forcing)?;
    let output = run_dam(&config, &series).map_err(to_py_err)?;
    records_to_array(py, &output)
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(signature = (
    forcing, capacity_volume, initial_volume, slope, base,
    leaky=false, evaporation_reduction_pct=0.0, exact=false,
))]
fn lake_run<'py>(
    py: Python<'py>,
    forcing: PyReadonlyArray2<'py, f64>,
    capacity_volume: f64,
    initial_volume: f64,
    slope: f64,
    base: f64,
    leaky: bool,
    evaporation_reduction_pct: f64,
    exact: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let config = lake_config(
        capacity_volume,
        initial_volume,
        slope,
        base,
        leaky,
        evaporation_reduction_pct,
        exact,
    );
    let series = forcing_from_array(&forcing)?;
    let output = run_lake(&config, &series).map_err(to_py_err)?;
    records_to_array(py, &output)
}

// ---------------------------------------------------------------------------
// Dict-returning functions
// ---------------------------------------------------------------------------

/// Lake run as named numpy columns, including the unclamped balance terms.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(signature = (
    forcing, capacity_volume, initial_volume, slope, base,
    leaky=false, evaporation_reduction_pct=0.0, exact=false,
))]
fn lake_run_columns<'py>(
    py: Python<'py>,
    forcing: PyReadonlyArray2<'py, f64>,
    capacity_volume: f64,
    initial_volume: f64,
    slope: f64,
    base: f64,
    leaky: bool,
    evaporation_reduction_pct: f64,
    exact: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let config = lake_config(
        capacity_volume,
        initial_volume,
        slope,
        base,
        leaky,
        evaporation_reduction_pct,
        exact,
    );
    let series = forcing_from_array(&forcing)?;
    let output = run_lake(&config, &series).map_err(to_py_err)?;

    let columns = output.to_columns();
    let dict = timeseries_to_dict!(
        py, columns,
        day, start_volume, end_volume, depth, surface_area, inflow, evaporation, outflow,
    );
    let terms = output.terms;
    dict.set_item("direct_rain", numpy::PyArray1::from_vec(py, terms.direct_rain))?;
    dict.set_item("seepage", numpy::PyArray1::from_vec(py, terms.seepage))?;
    dict.set_item("next_volume", numpy::PyArray1::from_vec(py, terms.next_volume))?;
    Ok(dict)
}

/// One unclamped balance step from `volume`.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(signature = (
    volume, rainfall_depth, evaporation_depth, inflow_volume, outflow_volume, slope, base,
    leaky=false, evaporation_reduction_pct=0.0, exact=false,
))]
fn lake_step<'py>(
    py: Python<'py>,
    volume: f64,
    rainfall_depth: f64,
    evaporation_depth: f64,
    inflow_volume: f64,
    outflow_volume: f64,
    slope: f64,
    base: f64,
    leaky: bool,
    evaporation_reduction_pct: f64,
    exact: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let geometry = BasinGeometry::new(base, slope)
        .map_err(to_py_err)?
        .with_fractions(fractions(exact));
    let forcing = DailyForcing::from_row(
        &[rainfall_depth, evaporation_depth, inflow_volume, outflow_volume],
        0,
    )
    .map_err(to_py_err)?;
    let options = LakeOptions::new(leaky, evaporation_reduction_pct);

    let terms = step(volume, &forcing, &geometry, &options).map_err(to_py_err)?;

    let dict = terms_to_dict!(
        py, terms,
        depth, surface_area, evaporation, inflow, outflow, direct_rain, seepage, next_volume,
    );
    Ok(dict)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "balance")?;
    m.add_function(wrap_pyfunction!(dam_run, &m)?)?;
    m.add_function(wrap_pyfunction!(lake_run, &m)?)?;
    m.add_function(wrap_pyfunction!(lake_run_columns, &m)?)?;
    m.add_function(wrap_pyfunction!(lake_step, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
