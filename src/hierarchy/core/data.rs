//! Bottom-level series container for hierarchical time series.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the bottom-level series of a
//! hierarchy: a dense observation matrix, optional series names, and an
//! aligned time index.
//!
//! Key behaviors
//! -------------
//! - [`BottomSeries::new`] enforces the data invariants once, so hierarchy
//!   construction and aggregation can assume clean input.
//! - Column reordering ([`BottomSeries::select_columns`]) and time windowing
//!   ([`BottomSeries::window`]) return new validated containers.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least two series (columns) and at least one observation (row).
//! - All values are finite; missing values are not supported.
//! - When present, `names` holds one entry per column.
//! - The time index holds one finite entry per row and is strictly
//!   increasing.
//!
//! Conventions
//! -----------
//! - `values` is laid out as rows = time points, columns = series.
//! - Without an explicit time index, observations are indexed `0, 1, …, T-1`.
//! - Frequency and calendar semantics are out of scope; the time index is
//!   an ordered numeric key only.
use ndarray::{Array1, Array2, Axis};

use crate::hierarchy::errors::{HtsError, HtsResult};

/// `BottomSeries` — validated bottom-level observation matrix.
///
/// Fields
/// ------
/// - `values`: `Array2<f64>`
///   Observations, shape `(T, N)`.
/// - `names`: `Option<Vec<String>>`
///   Series names, one per column, when known.
/// - `time`: `Array1<f64>`
///   Time index, one strictly increasing entry per row.
///
/// Performance
/// -----------
/// - Validation is a single O(T × N) scan.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomSeries {
    values: Array2<f64>,
    names: Option<Vec<String>>,
    time: Array1<f64>,
}

impl BottomSeries {
    /// Construct a validated [`BottomSeries`].
    ///
    /// Parameters
    /// ----------
    /// - `values`: `Array2<f64>`
    ///   Observations, rows = time points, columns = series.
    /// - `names`: `Option<Vec<String>>`
    ///   Optional series names, one per column.
    /// - `time`: `Option<Array1<f64>>`
    ///   Optional time index; defaults to `0..T`.
    ///
    /// Errors
    /// ------
    /// - `HtsError::TooFewSeries { found }` when there are fewer than 2 columns.
    /// - `HtsError::NoObservations` when there are no rows.
    /// - `HtsError::NonFiniteValue { row, col, value }` for the first NaN/±inf.
    /// - `HtsError::NameCountMismatch { expected, found }` for a wrong name count.
    /// - `HtsError::TimeIndexMismatch { expected, found }` for a wrong index length.
    /// - `HtsError::InvalidTimeIndex { index, value }` for a non-finite or
    ///   non-increasing time entry.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_hts::hierarchy::core::data::BottomSeries;
    /// let bts = BottomSeries::new(array![[1.0, 2.0], [3.0, 4.0]], None, None).unwrap();
    /// assert_eq!(bts.n_series(), 2);
    /// assert_eq!(bts.time().to_vec(), vec![0.0, 1.0]);
    /// ```
    pub fn new(
        values: Array2<f64>, names: Option<Vec<String>>, time: Option<Array1<f64>>,
    ) -> HtsResult<Self> {
        let (n_obs, n_series) = values.dim();
        if n_series < 2 {
            return Err(HtsError::TooFewSeries { found: n_series });
        }
        if n_obs == 0 {
            return Err(HtsError::NoObservations);
        }

        for ((row, col), &value) in values.indexed_iter() {
            if !value.is_finite() {
                return Err(HtsError::NonFiniteValue { row, col, value });
            }
        }

        if let Some(names) = &names {
            if names.len() != n_series {
                return Err(HtsError::NameCountMismatch { expected: n_series, found: names.len() });
            }
        }

        let time = match time {
            Some(time) => {
                validate_time_index(&time, n_obs)?;
                time
            }
            None => Array1::from_iter((0..n_obs).map(|t| t as f64)),
        };

        Ok(BottomSeries { values, names, time })
    }

    /// Observations, rows = time points, columns = series.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Series names, when known.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Time index, one entry per observation.
    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// Number of series (columns).
    pub fn n_series(&self) -> usize {
        self.values.ncols()
    }

    /// Number of observations (rows).
    pub fn n_obs(&self) -> usize {
        self.values.nrows()
    }

    /// Replace the series names. Caller guarantees one name per column.
    pub(crate) fn with_names(mut self, names: Vec<String>) -> Self {
        debug_assert_eq!(names.len(), self.n_series());
        self.names = Some(names);
        self
    }

    /// Reorder columns so that column `k` of the result is column `index[k]`
    /// of `self`. Names follow their columns.
    ///
    /// Panics
    /// ------
    /// - If any entry of `index` is `>= self.n_series()`.
    pub fn select_columns(&self, index: &[usize]) -> Self {
        let values = self.values.select(Axis(1), index);
        let names = self
            .names
            .as_ref()
            .map(|names| index.iter().map(|&i| names[i].clone()).collect::<Vec<String>>());
        BottomSeries { values, names, time: self.time.clone() }
    }

    /// Keep observations whose time index lies in `[start, end]`.
    ///
    /// Parameters
    /// ----------
    /// - `start`, `end`: `Option<f64>`
    ///   Inclusive bounds; `None` leaves that side open.
    ///
    /// Errors
    /// ------
    /// - `HtsError::EmptyWindow { start, end }` when no observation falls
    ///   inside the bounds.
    pub fn window(&self, start: Option<f64>, end: Option<f64>) -> HtsResult<Self> {
        let rows: Vec<usize> = self
            .time
            .iter()
            .enumerate()
            .filter(|&(_, &t)| start.is_none_or(|s| t >= s) && end.is_none_or(|e| t <= e))
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            return Err(HtsError::EmptyWindow { start, end });
        }

        Ok(BottomSeries {
            values: self.values.select(Axis(0), &rows),
            names: self.names.clone(),
            time: self.time.select(Axis(0), &rows),
        })
    }
}

fn validate_time_index(time: &Array1<f64>, n_obs: usize) -> HtsResult<()> {
    if time.len() != n_obs {
        return Err(HtsError::TimeIndexMismatch { expected: n_obs, found: time.len() });
    }
    for (index, &value) in time.iter().enumerate() {
        if !value.is_finite() || (index > 0 && value <= time[index - 1]) {
            return Err(HtsError::InvalidTimeIndex { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction invariants of `BottomSeries::new`.
    // - Column reordering and time windowing.
    // -------------------------------------------------------------------------

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify a valid matrix with names and a time index is accepted as-is.
    //
    // Given
    // -----
    // - 2 × 3 finite matrix, three names, time [2000, 2001].
    //
    // Expect
    // ------
    // - `Ok`, with values, names, and time preserved.
    fn bottom_series_new_accepts_valid_input() {
        let values = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        let bts = BottomSeries::new(
            values.clone(),
            Some(names(&["a", "b", "c"])),
            Some(array![2000.0, 2001.0]),
        )
        .unwrap();

        assert_eq!(bts.values(), &values);
        assert_eq!(bts.names().unwrap(), &["a", "b", "c"]);
        assert_eq!(bts.time(), &array![2000.0, 2001.0]);
        assert_eq!((bts.n_obs(), bts.n_series()), (2, 3));
    }

    #[test]
    // Purpose
    // -------
    // Ensure each construction invariant is enforced.
    //
    // Expect
    // ------
    // - One column → `TooFewSeries`; no rows → `NoObservations`;
    //   NaN → `NonFiniteValue`; wrong name/time lengths and a
    //   non-increasing time index are rejected.
    fn bottom_series_new_rejects_invalid_input() {
        assert_eq!(
            BottomSeries::new(array![[1.0], [2.0]], None, None).unwrap_err(),
            HtsError::TooFewSeries { found: 1 }
        );
        assert_eq!(
            BottomSeries::new(Array2::zeros((0, 2)), None, None).unwrap_err(),
            HtsError::NoObservations
        );
        assert!(matches!(
            BottomSeries::new(array![[1.0, f64::NAN]], None, None).unwrap_err(),
            HtsError::NonFiniteValue { row: 0, col: 1, .. }
        ));
        assert_eq!(
            BottomSeries::new(array![[1.0, 2.0]], Some(names(&["a"])), None).unwrap_err(),
            HtsError::NameCountMismatch { expected: 2, found: 1 }
        );
        assert_eq!(
            BottomSeries::new(array![[1.0, 2.0]], None, Some(array![0.0, 1.0])).unwrap_err(),
            HtsError::TimeIndexMismatch { expected: 1, found: 2 }
        );
        assert_eq!(
            BottomSeries::new(array![[1.0, 2.0], [3.0, 4.0]], None, Some(array![1.0, 1.0]))
                .unwrap_err(),
            HtsError::InvalidTimeIndex { index: 1, value: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify column selection moves values and names together.
    //
    // Given
    // -----
    // - Columns a, b, c and index [2, 0, 1].
    //
    // Expect
    // ------
    // - Columns c, a, b in that order.
    fn select_columns_reorders_values_and_names() {
        let bts = BottomSeries::new(
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            Some(names(&["a", "b", "c"])),
            None,
        )
        .unwrap();

        let reordered = bts.select_columns(&[2, 0, 1]);

        assert_eq!(reordered.values(), &array![[3.0, 1.0, 2.0], [6.0, 4.0, 5.0]]);
        assert_eq!(reordered.names().unwrap(), &["c", "a", "b"]);
    }

    #[test]
    // Purpose
    // -------
    // Verify time windows are inclusive and an empty window is rejected.
    //
    // Given
    // -----
    // - Four observations at times 0..3.
    //
    // Expect
    // ------
    // - `[1, 2]` keeps rows 1 and 2; `[10, None]` fails with `EmptyWindow`.
    fn window_selects_inclusive_range() {
        let bts =
            BottomSeries::new(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]], None, None)
                .unwrap();

        let sub = bts.window(Some(1.0), Some(2.0)).unwrap();

        assert_eq!(sub.values(), &array![[3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(sub.time(), &array![1.0, 2.0]);
        assert_eq!(
            bts.window(Some(10.0), None).unwrap_err(),
            HtsError::EmptyWindow { start: Some(10.0), end: None }
        );
    }
}
