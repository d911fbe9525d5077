//! Conversion helpers shared by the Python bindings.
//!
//! Every helper accepts the loosely typed objects Python callers pass around
//! (numpy arrays, pandas objects, nested sequences) and returns owned
//! `ndarray` / `Vec` values ready for the core constructors. Errors are raised
//! as `TypeError` for unusable containers, matching the `InputTypeError`
//! family of [`HtsError`](crate::hierarchy::errors::HtsError).
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::hierarchy::models::hts::Hts;

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "InputTypeError: expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Bottom-series matrix (rows = time, columns = series) from a 2-D numpy
/// array, a pandas DataFrame, or a sequence of rows.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method0("to_numpy") {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "InputTypeError: expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of rows",
        )
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyTypeError::new_err("InputTypeError: rows of y must all have the same length"));
    }
    Array2::from_shape_vec((rows.len(), n_cols), rows.into_iter().flatten().collect())
        .map_err(|e| PyTypeError::new_err(format!("InputTypeError: {e}")))
}

/// Series names from `bnames`, or from the columns of a pandas DataFrame `y`.
#[cfg(feature = "python-bindings")]
pub fn extract_names<'py>(
    y: &Bound<'py, PyAny>, bnames: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Vec<String>>> {
    match bnames {
        Some(obj) => obj.extract::<Vec<String>>().map(Some).map_err(|_| {
            PyTypeError::new_err("InputTypeError: bnames must be a sequence of str")
        }),
        None => Ok(y
            .getattr("columns")
            .ok()
            .and_then(|cols| cols.call_method0("tolist").ok())
            .and_then(|cols| cols.extract::<Vec<String>>().ok())),
    }
}

/// Branching specification from a sequence whose items are either an int
/// (a single-node level, e.g. the root) or a sequence of ints.
#[cfg(feature = "python-bindings")]
pub fn extract_nodes<'py>(raw_nodes: &Bound<'py, PyAny>) -> PyResult<Vec<Vec<usize>>> {
    let items: Vec<Bound<'py, PyAny>> = raw_nodes.extract().map_err(|_| {
        PyTypeError::new_err("InputTypeError: nodes must be a sequence of levels")
    })?;
    items
        .iter()
        .map(|item| {
            if let Ok(count) = item.extract::<usize>() {
                return Ok(vec![count]);
            }
            item.extract::<Vec<usize>>().map_err(|_| {
                PyTypeError::new_err(
                    "InputTypeError: each level of nodes must be an int or a sequence of ints",
                )
            })
        })
        .collect()
}

/// Optional time index aligned with the rows of `y`.
#[cfg(feature = "python-bindings")]
pub fn extract_time<'py>(
    py: Python<'py>, time: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Array1<f64>>> {
    time.map(|obj| extract_f64_array(py, obj).map(|arr| arr.as_array().to_owned())).transpose()
}

/// Assemble an [`Hts`] from Python-side constructor arguments.
#[cfg(feature = "python-bindings")]
pub fn build_hts<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, nodes: Option<&Bound<'py, PyAny>>,
    bnames: Option<&Bound<'py, PyAny>>, characters: Option<&Bound<'py, PyAny>>,
    sep: Option<String>, time: Option<&Bound<'py, PyAny>>,
) -> PyResult<Hts> {
    use crate::hierarchy::core::{data::BottomSeries, mode::InferenceMode};

    let values = extract_f64_matrix(y)?;
    let names = extract_names(y, bnames)?;
    let time = extract_time(py, time)?;
    let nodes = nodes.map(extract_nodes).transpose()?;
    let characters = characters
        .map(|obj| {
            obj.extract::<usize>().map(|w| vec![w]).or_else(|_| obj.extract::<Vec<usize>>())
        })
        .transpose()
        .map_err(|_| {
            PyTypeError::new_err("InputTypeError: characters must be an int or a sequence of ints")
        })?;

    let mode = InferenceMode::from_options(nodes, characters, sep)?;
    let bts = BottomSeries::new(values, names, time)?;
    Ok(Hts::new(bts, mode)?)
}
