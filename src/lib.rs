//! rust_vines — regular-vine copula densities with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! vine density evaluation to Python via the `_rust_vines` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing class, function and submodule used by the `rust_vines`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`copula` and `vine`) as the public crate
//!   surface.
//! - Define the `RVine` `#[pyclass]`, the `vine_density` `#[pyfunction]` and
//!   the `#[pymodule]` initializer for the `_rust_vines` extension.
//! - Register the `vines` submodule under `rust_vines` so that dot-notation
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, argument conversion, and error mapping.
//! - Once Python inputs convert into Rust types, the invariants documented in
//!   `vine::core` and `copula` are assumed to hold.
//!
//! Conventions
//! -----------
//! - Structure labels are 0-based on both sides of the boundary.
//! - Family cells are family names (`"gaussian"`, `"clayton"`, ...) or `None`;
//!   parameter cells are a float, a sequence of floats, or `None`.
//! - Core errors (`VineError`, `CopulaError`) surface as `ValueError`; wrongly
//!   typed arguments surface as `TypeError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`vine::RVineCopula`] or
//!   [`vine::vine_density`] and can ignore the PyO3 items.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the integration and property tests under `tests/`.

pub mod copula;
pub mod utils;
pub mod vine;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{
        extract_eval_options, extract_f64_matrix, extract_family_grid, extract_parameter_grid,
        extract_structure,
    },
    vine::models::rvine::RVineCopula,
};

/// RVine — Python-facing wrapper around [`RVineCopula`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `RVine(structure, families, params, transform_floor=1e-10, parallel=True,
/// min_rows_per_task=1024)`:
/// - `structure`: `d×d` integer array-like, upper-triangular structure array.
/// - `families`: `(d−1)×(d−1)` nested sequence of family names or `None`.
/// - `params`: `(d−1)×(d−1)` nested sequence of parameter cells.
/// - `transform_floor`, `parallel`, `min_rows_per_task`: evaluation options.
///
/// Notes
/// -----
/// - The full vine definition is validated in the constructor; evaluation
///   methods only check the observations.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_vines.vines")]
pub struct RVine {
    inner: RVineCopula,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl RVine {
    #[new]
    #[pyo3(
        signature = (
            structure,
            families,
            params,
            transform_floor = None,
            parallel = None,
            min_rows_per_task = None,
        ),
        text_signature = "(structure, families, params, /, transform_floor=1e-10, \
                          parallel=True, min_rows_per_task=1024)"
    )]
    pub fn new<'py>(
        structure: &Bound<'py, PyAny>, families: &Bound<'py, PyAny>, params: &Bound<'py, PyAny>,
        transform_floor: Option<f64>, parallel: Option<bool>, min_rows_per_task: Option<usize>,
    ) -> PyResult<Self> {
        let structure = extract_structure(structure)?;
        let families = extract_family_grid(families)?;
        let params = extract_parameter_grid(params)?;
        let options = extract_eval_options(transform_floor, parallel, min_rows_per_task)?;
        let inner = RVineCopula::new(structure.view(), families.view(), params.view(), options)?;
        Ok(RVine { inner })
    }

    #[pyo3(text_signature = "(self, data, /)")]
    pub fn density<'py>(
        &self, py: Python<'py>, data: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let data = extract_f64_matrix(py, data)?;
        let density = self.inner.density(data.as_array())?;
        Ok(density.into_pyarray(py))
    }

    #[pyo3(text_signature = "(self, data, /)")]
    pub fn log_density<'py>(
        &self, py: Python<'py>, data: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let data = extract_f64_matrix(py, data)?;
        let log_density = self.inner.log_density(data.as_array())?;
        Ok(log_density.into_pyarray(py))
    }

    #[pyo3(text_signature = "(self, data, /)")]
    pub fn log_likelihood<'py>(&self, py: Python<'py>, data: &Bound<'py, PyAny>) -> PyResult<f64> {
        let data = extract_f64_matrix(py, data)?;
        Ok(self.inner.log_likelihood(data.as_array())?)
    }

    #[getter]
    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    /// `(label, family, parameters)` for every edge, tree by tree.
    #[getter]
    pub fn edges(&self) -> Vec<(String, String, Vec<f64>)> {
        self.inner
            .edges()
            .into_iter()
            .map(|(label, pair)| (label.to_string(), pair.family().to_string(), pair.parameters()))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("RVine(dim={}, edges={})", self.inner.dim(), self.inner.edges().len())
    }
}

/// One-shot density evaluation with default options.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(data, structure, families, params, /)")]
pub fn vine_density<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, structure: &Bound<'py, PyAny>,
    families: &Bound<'py, PyAny>, params: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let structure = extract_structure(structure)?;
    let families = extract_family_grid(families)?;
    let params = extract_parameter_grid(params)?;
    let data = extract_f64_matrix(py, data)?;
    let density = crate::vine::models::rvine::vine_density(
        data.as_array(),
        structure.view(),
        families.view(),
        params.view(),
    )?;
    Ok(density.into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_vines<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let vines_mod = PyModule::new(_py, "vines")?;
    vines(_py, m, &vines_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_vines.vines", vines_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn vines<'py>(
    _py: Python, rust_vines: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<RVine>()?;
    m.add_function(wrap_pyfunction!(vine_density, m)?)?;
    rust_vines.add_submodule(m)?;
    Ok(())
}
