//! rust_hts — hierarchical time series structures with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! hierarchy construction to Python via the `_rust_hts` extension module. When
//! the `python-bindings` feature is enabled, this module defines the
//! Python-facing `Hts` class and the `get_nodes` helper.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`hierarchy`) as the public crate surface.
//! - Define the `#[pyclass]` wrapper, the `#[pyfunction]` helpers, and the
//!   `#[pymodule]` initializer for the `_rust_hts` Python extension.
//! - Register the `hierarchy` submodule under `rust_hts` so that dot-notation
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All structural work is implemented in [`hierarchy`]; this file performs
//!   only FFI glue and error mapping.
//! - Python callers see the same validation as Rust callers: errors raised by
//!   the core constructors are mapped to `TypeError` (input type) or
//!   `ValueError` (structure, format) with the core message.
//!
//! Conventions
//! -----------
//! - Matrices cross the boundary as numpy arrays; per-level data (nodes,
//!   labels) cross as dicts keyed `"Level i"`.
//! - Group-matrix ids stay 1-based on the Python side.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`hierarchy`] and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_hts` and may wrap `Hts` in a
//!   thin pure-Python facade.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`.

pub mod hierarchy;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    hierarchy::{errors::HtsError, models::hts::Hts},
    utils::build_hts,
};

/// Hts — Python-facing wrapper for a hierarchical time series.
///
/// Purpose
/// -------
/// Expose [`Hts`] construction and its derived views to Python callers while
/// preserving the core invariants and error handling.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Hts(y, nodes=None, bnames=None, characters=None, sep=None, time=None)`:
/// - `y`: 2-D array-like, rows = time points, columns = bottom series.
/// - `nodes`: sequence of levels; each level an int or a sequence of child counts.
/// - `bnames`: bottom-series names; defaults to DataFrame columns when present.
/// - `characters`: fixed segment widths (int or sequence of ints).
/// - `sep`: segment separator.
/// - `time`: 1-D strictly increasing time index.
///
/// Fields
/// ------
/// - `inner`: [`Hts`]
///   Fully validated hierarchy.
///
/// Notes
/// -----
/// - `characters` and `sep` are mutually exclusive; when either is given,
///   `nodes` is ignored and the structure is inferred from the names.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Hts", module = "rust_hts.hierarchy", frozen)]
pub struct PyHts {
    pub inner: Hts,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyHts {
    #[new]
    #[pyo3(
        signature = (y, nodes = None, bnames = None, characters = None, sep = None, time = None),
        text_signature = "(y, /, nodes=None, bnames=None, characters=None, sep=None, time=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, y: &Bound<'py, PyAny>, nodes: Option<&Bound<'py, PyAny>>,
        bnames: Option<&Bound<'py, PyAny>>, characters: Option<&Bound<'py, PyAny>>,
        sep: Option<String>, time: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Self> {
        let inner = build_hts(py, y, nodes, bnames, characters, sep, time)?;
        Ok(PyHts { inner })
    }

    /// Bottom series in tree order, shape `(T, N)`.
    #[getter]
    pub fn bts<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.bts().values().clone().into_pyarray(py)
    }

    #[getter]
    pub fn bnames(&self) -> Vec<String> {
        self.inner.labels().bottom().to_vec()
    }

    #[getter]
    pub fn time<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.bts().time().clone().into_pyarray(py)
    }

    /// Child counts keyed `"Level 1"` .. `"Level K"`.
    #[getter]
    pub fn nodes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (name, counts) in self.inner.nodes().named() {
            dict.set_item(name, counts.to_vec())?;
        }
        Ok(dict)
    }

    /// Node labels keyed `"Level 0"` .. `"Level K"`.
    #[getter]
    pub fn labels<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (name, labels) in self.inner.labels().named() {
            dict.set_item(name, labels.to_vec())?;
        }
        Ok(dict)
    }

    /// Input column of each stored bottom series.
    #[getter]
    pub fn index(&self) -> Vec<usize> {
        self.inner.index().to_vec()
    }

    /// Group matrix, shape `(K + 1, N)`, 1-based node ids.
    #[getter]
    pub fn gmatrix<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<i64>> {
        self.inner.group_matrix().matrix().mapv(|id| id as i64).into_pyarray(py)
    }

    /// Reciprocal number of bottom series under every node.
    #[getter]
    pub fn inv_s<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.scaling_vector().into_pyarray(py)
    }

    /// Dense 0/1 summing matrix, one row per node.
    #[getter]
    pub fn smatrix<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.summing_matrix().into_pyarray(py)
    }

    /// Series of every node at the requested levels (all levels by default)
    /// and their labels.
    #[pyo3(signature = (levels = None))]
    pub fn aggts<'py>(
        &self, py: Python<'py>, levels: Option<Vec<usize>>,
    ) -> PyResult<(Bound<'py, PyArray2<f64>>, Vec<String>)> {
        let series = match levels {
            Some(levels) => self.inner.aggregate(&levels)?,
            None => self.inner.all_series(),
        };
        Ok((series.values.into_pyarray(py), series.names))
    }

    /// New hierarchy restricted to observations with `start <= time <= end`.
    #[pyo3(signature = (start = None, end = None))]
    pub fn window(&self, start: Option<f64>, end: Option<f64>) -> PyResult<PyHts> {
        Ok(PyHts { inner: self.inner.window(start, end)? })
    }

    pub fn __repr__(&self) -> String {
        let summary = self.inner.summary();
        format!(
            "Hts(levels={}, node_counts={:?}, observations={})",
            summary.n_levels, summary.node_counts, summary.n_obs
        )
    }
}

/// Child counts of a hierarchy, keyed `"Level 1"` .. `"Level K"`.
///
/// Errors
/// ------
/// - `TypeError` (`InputTypeError`) when `obj` is not an `Hts`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
pub fn get_nodes<'py>(py: Python<'py>, obj: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyDict>> {
    match obj.downcast::<PyHts>() {
        Ok(hts) => hts.get().nodes(py),
        Err(_) => {
            let found = obj
                .get_type()
                .name()
                .map(|name| name.to_string())
                .unwrap_or_else(|_| "<unknown>".to_string());
            Err(HtsError::NotHierarchical { found }.into())
        }
    }
}

/// _rust_hts — PyO3 module initializer for the Python extension.
///
/// Key behaviors
/// -------------
/// - Create the `hierarchy` submodule holding `Hts` and `get_nodes`.
/// - Attach it to `_rust_hts` and register it in `sys.modules` so it is
///   importable via the dotted path `rust_hts.hierarchy`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_hts<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let hierarchy_mod = PyModule::new(_py, "hierarchy")?;
    hierarchy(_py, m, &hierarchy_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_hts.hierarchy", hierarchy_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn hierarchy<'py>(
    _py: Python, rust_hts: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyHts>()?;
    m.add_function(wrap_pyfunction!(get_nodes, m)?)?;
    rust_hts.add_submodule(m)?;
    Ok(())
}
