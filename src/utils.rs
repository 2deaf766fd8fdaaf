//! Python-side argument extraction for the vine bindings.
//!
//! Each helper accepts the loosest reasonable Python input (numpy arrays,
//! pandas objects exposing `to_numpy`, or nested sequences) and returns the
//! owned ndarray type the Rust API expects. Ragged rows and negative labels
//! are reported as `ValueError`; unknown family names surface through the
//! copula error conversion.
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::{
    copula::{errors::CopulaError, family::CopulaFamily},
    vine::core::options::EvalOptions,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array2 → PyArray2
    PyArrayMethods, // .readonly()
    PyReadonlyArray2,
};

/// Stack equal-length rows into a matrix; `[]` becomes a `0×0` matrix.
#[cfg(feature = "python-bindings")]
fn rows_to_array2<T: Clone>(rows: Vec<Vec<T>>, what: &str) -> PyResult<Array2<T>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().position(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err(format!(
            "{what} must be rectangular: row {bad} has {} entries, expected {n_cols}",
            rows[bad].len()
        )));
    }
    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("{what}: {e}")))
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let matrix = rows_to_array2(rows, "data")?;
    Ok(matrix.into_pyarray(py).readonly())
}

/// Structure array from a 2-D integer array or nested sequence.
#[cfg(feature = "python-bindings")]
pub fn extract_structure(raw: &Bound<'_, PyAny>) -> PyResult<Array2<usize>> {
    let signed: Array2<i64> = match raw.extract::<numpy::PyReadonlyArray2<i64>>() {
        Ok(arr_ro) => arr_ro.as_array().to_owned(),
        Err(_) => {
            let rows: Vec<Vec<i64>> = raw.extract().map_err(|_| {
                PyTypeError::new_err("structure must be a 2-D integer array or nested sequence")
            })?;
            rows_to_array2(rows, "structure")?
        }
    };

    if let Some(((row, col), label)) = signed.indexed_iter().find(|(_, v)| **v < 0) {
        return Err(PyValueError::new_err(format!(
            "structure labels must be non-negative; found {label} at ({row}, {col})"
        )));
    }
    Ok(signed.mapv(|v| v as usize))
}

/// Family grid: each cell is `None` or a family name such as `"gaussian"`.
#[cfg(feature = "python-bindings")]
pub fn extract_family_grid(raw: &Bound<'_, PyAny>) -> PyResult<Array2<Option<CopulaFamily>>> {
    let rows: Vec<Vec<Option<String>>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("families must be a nested sequence of family names or None")
    })?;
    let parsed = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|name| name.parse::<CopulaFamily>()).transpose())
                .collect::<Result<Vec<_>, CopulaError>>()
        })
        .collect::<Result<Vec<_>, CopulaError>>()?;
    rows_to_array2(parsed, "families")
}

/// Parameter grid: each cell is `None`, a single float, or a sequence of
/// floats.
#[cfg(feature = "python-bindings")]
pub fn extract_parameter_grid(raw: &Bound<'_, PyAny>) -> PyResult<Array2<Vec<f64>>> {
    let rows: Vec<Vec<Bound<'_, PyAny>>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("params must be a nested sequence of floats, sequences, or None")
    })?;
    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::with_capacity(row.len());
        for cell in row {
            let values = if cell.is_none() {
                Vec::new()
            } else if let Ok(single) = cell.extract::<f64>() {
                vec![single]
            } else {
                cell.extract::<Vec<f64>>().map_err(|_| {
                    PyTypeError::new_err("each parameter cell must be None, a float, or floats")
                })?
            };
            cells.push(values);
        }
        parsed.push(cells);
    }
    rows_to_array2(parsed, "params")
}

#[cfg(feature = "python-bindings")]
pub fn extract_eval_options(
    transform_floor: Option<f64>, parallel: Option<bool>, min_rows_per_task: Option<usize>,
) -> PyResult<EvalOptions> {
    let defaults = EvalOptions::default();
    // EvalOptions::new -> VineResult<EvalOptions> -> PyErr
    let opts = EvalOptions::new(
        transform_floor.unwrap_or(defaults.transform_floor()),
        parallel.unwrap_or(defaults.parallel()),
        min_rows_per_task.unwrap_or(defaults.min_rows_per_task()),
    )?;
    Ok(opts)
}
