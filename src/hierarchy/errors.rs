//! hierarchy::errors — error type and Python bridge for hierarchy construction.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`HtsError`], and result alias, [`HtsResult`],
//! for every fallible step of building a hierarchical time series: input
//! container checks, branching-structure validation, and name parsing for
//! automatic tree inference.
//!
//! Key behaviors
//! -------------
//! - Group variants into three families reported by [`HtsError::kind`]:
//!   input-type problems, structural inconsistencies, and malformed names.
//! - Attach enough payload to every variant (level, expected vs. found
//!   counts, offending name or position) to diagnose a malformed hierarchy
//!   from the message alone.
//! - Convert into `PyErr` when the `python-bindings` feature is enabled:
//!   input-type errors become `TypeError`, all others `ValueError`.
//!
//! Conventions
//! -----------
//! - Levels are numbered from 0 (the root, "Total") to K (the bottom level).
//! - Row and column positions in payloads are 0-based.
//!
//! Testing notes
//! -------------
//! - Unit tests verify family classification and that `Display` messages
//!   embed their payloads.
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyTypeError, PyValueError},
};

/// Crate-wide result alias for hierarchy operations.
pub type HtsResult<T> = Result<T, HtsError>;

/// Error family of an [`HtsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtsErrorKind {
    /// Wrong container shape/content, or a non-hierarchy object where one is required.
    InputType,
    /// Branching specification inconsistent with itself or with the bottom series.
    Structure,
    /// Bottom-series names unusable for the requested inference mode.
    Format,
}

/// Unified error type for hierarchical time-series construction.
#[derive(Debug, Clone, PartialEq)]
pub enum HtsError {
    // ---- Input type ----
    /// The bottom matrix has no observations.
    NoObservations,

    /// A bottom-series value is NaN/±inf.
    NonFiniteValue { row: usize, col: usize, value: f64 },

    /// Number of names differs from the number of bottom series.
    NameCountMismatch { expected: usize, found: usize },

    /// Time index length differs from the number of observations.
    TimeIndexMismatch { expected: usize, found: usize },

    /// Time index must be finite and strictly increasing.
    InvalidTimeIndex { index: usize, value: f64 },

    /// A time window selected no observations.
    EmptyWindow { start: Option<f64>, end: Option<f64> },

    /// A hierarchy-only accessor received something else.
    NotHierarchical { found: String },

    // ---- Structure ----
    /// A hierarchy needs at least two bottom series.
    TooFewSeries { found: usize },

    /// The branching specification has no levels.
    EmptyNodes,

    /// A level of the branching specification has no entries.
    EmptyLevel { level: usize },

    /// Child counts must be strictly positive.
    ZeroChildCount { level: usize, position: usize },

    /// The first level must describe exactly one (root) node.
    RootNotSingle { found: usize },

    /// Sum of the last level differs from the number of bottom series.
    TerminalMismatch { expected: usize, found: usize },

    /// Children declared at `level` do not match the node count of `level + 1`.
    LevelMismatch { level: usize, expected: usize, found: usize },

    /// Two bottom series share the same full hierarchical path.
    DuplicatePath { path: String, first: usize, second: usize },

    /// Requested level does not exist.
    LevelOutOfRange { level: usize, max: usize },

    // ---- Format ----
    /// Name-based inference requires bottom-series names.
    MissingNames,

    /// More than one inference mode was requested.
    ConflictingModes,

    /// Fixed-width segments must be non-empty and positive.
    InvalidWidths { reason: &'static str },

    /// The separator must be a non-empty string.
    EmptySeparator,

    /// A bottom-series name is empty.
    EmptyName { index: usize },

    /// Fixed-width inference requires names of one common length.
    UnequalNameLengths { expected: usize, index: usize, found: usize },

    /// A name does not contain the separator.
    MissingSeparator { name: String, separator: String },

    /// A name contains the separator a different number of times than the first name.
    InconsistentSeparatorCount { name: String, expected: usize, found: usize },
}

impl HtsError {
    /// Family this error belongs to.
    pub fn kind(&self) -> HtsErrorKind {
        match self {
            HtsError::NoObservations
            | HtsError::NonFiniteValue { .. }
            | HtsError::NameCountMismatch { .. }
            | HtsError::TimeIndexMismatch { .. }
            | HtsError::InvalidTimeIndex { .. }
            | HtsError::EmptyWindow { .. }
            | HtsError::NotHierarchical { .. } => HtsErrorKind::InputType,

            HtsError::TooFewSeries { .. }
            | HtsError::EmptyNodes
            | HtsError::EmptyLevel { .. }
            | HtsError::ZeroChildCount { .. }
            | HtsError::RootNotSingle { .. }
            | HtsError::TerminalMismatch { .. }
            | HtsError::LevelMismatch { .. }
            | HtsError::DuplicatePath { .. }
            | HtsError::LevelOutOfRange { .. } => HtsErrorKind::Structure,

            HtsError::MissingNames
            | HtsError::ConflictingModes
            | HtsError::InvalidWidths { .. }
            | HtsError::EmptySeparator
            | HtsError::EmptyName { .. }
            | HtsError::UnequalNameLengths { .. }
            | HtsError::MissingSeparator { .. }
            | HtsError::InconsistentSeparatorCount { .. } => HtsErrorKind::Format,
        }
    }
}

impl std::error::Error for HtsError {}

impl std::fmt::Display for HtsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input type ----
            HtsError::NoObservations => {
                write!(f, "Bottom series contain no observations.")
            }
            HtsError::NonFiniteValue { row, col, value } => {
                write!(f, "Value at observation {row} of series {col} is non-finite: {value}")
            }
            HtsError::NameCountMismatch { expected, found } => {
                write!(f, "Expected {expected} bottom series names, got {found}.")
            }
            HtsError::TimeIndexMismatch { expected, found } => {
                write!(f, "Time index has {found} entries but there are {expected} observations.")
            }
            HtsError::InvalidTimeIndex { index, value } => {
                write!(
                    f,
                    "Time index must be finite and strictly increasing; entry {index} is {value}."
                )
            }
            HtsError::EmptyWindow { start, end } => {
                write!(f, "Window [{start:?}, {end:?}] selects no observations.")
            }
            HtsError::NotHierarchical { found } => {
                write!(f, "Expected a hierarchical time series object, got {found}.")
            }
            // ---- Structure ----
            HtsError::TooFewSeries { found } => {
                write!(f, "A hierarchy needs at least 2 bottom series, got {found}.")
            }
            HtsError::EmptyNodes => write!(f, "Branching specification has no levels."),
            HtsError::EmptyLevel { level } => {
                write!(f, "Branching specification for level {level} is empty.")
            }
            HtsError::ZeroChildCount { level, position } => {
                write!(f, "Node {position} at level {level} has zero children.")
            }
            HtsError::RootNotSingle { found } => {
                write!(f, "The root node cannot be empty: level 0 must hold 1 node, got {found}.")
            }
            HtsError::TerminalMismatch { expected, found } => {
                write!(
                    f,
                    "Terminal node count mismatch: nodes imply {expected} bottom series, {found} given."
                )
            }
            HtsError::LevelMismatch { level, expected, found } => {
                write!(
                    f,
                    "Level {level} declares {expected} children but level {} has {found} nodes.",
                    level + 1
                )
            }
            HtsError::DuplicatePath { path, first, second } => {
                write!(
                    f,
                    "Bottom series {first} and {second} share the hierarchical path '{path}'."
                )
            }
            HtsError::LevelOutOfRange { level, max } => {
                write!(f, "Level {level} is out of range; the deepest level is {max}.")
            }
            // ---- Format ----
            HtsError::MissingNames => {
                write!(f, "Name-based inference requires bottom series names.")
            }
            HtsError::ConflictingModes => {
                write!(f, "Fixed widths and a separator are mutually exclusive.")
            }
            HtsError::InvalidWidths { reason } => {
                write!(f, "Invalid fixed-width segments: {reason}")
            }
            HtsError::EmptySeparator => write!(f, "Separator must not be empty."),
            HtsError::EmptyName { index } => {
                write!(f, "Bottom series name at position {index} is empty.")
            }
            HtsError::UnequalNameLengths { expected, index, found } => {
                write!(
                    f,
                    "Fixed-width names must share one length: expected {expected}, name {index} has {found}."
                )
            }
            HtsError::MissingSeparator { name, separator } => {
                write!(f, "Name '{name}' does not contain separator '{separator}'.")
            }
            HtsError::InconsistentSeparatorCount { name, expected, found } => {
                write!(
                    f,
                    "Name '{name}' contains the separator {found} times, expected {expected}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<HtsError> for PyErr {
    fn from(err: HtsError) -> PyErr {
        match err.kind() {
            HtsErrorKind::InputType => PyTypeError::new_err(format!("InputTypeError: {err}")),
            HtsErrorKind::Structure => PyValueError::new_err(format!("StructureError: {err}")),
            HtsErrorKind::Format => PyValueError::new_err(format!("FormatError: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Family classification via `HtsError::kind`.
    // - Embedding of payload values into `Display` messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<HtsError> for PyErr` conversion, which needs the Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that representative variants land in the documented families.
    //
    // Given
    // -----
    // - One variant from each family.
    //
    // Expect
    // ------
    // - `kind()` returns InputType, Structure, and Format respectively.
    fn hts_error_kind_classifies_each_family() {
        assert_eq!(HtsError::NoObservations.kind(), HtsErrorKind::InputType);
        assert_eq!(
            HtsError::TerminalMismatch { expected: 5, found: 6 }.kind(),
            HtsErrorKind::Structure
        );
        assert_eq!(HtsError::EmptySeparator.kind(), HtsErrorKind::Format);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the terminal mismatch message reports expected and given counts.
    //
    // Given
    // -----
    // - `TerminalMismatch { expected: 5, found: 6 }`.
    //
    // Expect
    // ------
    // - Message contains both "5" and "6".
    fn terminal_mismatch_display_includes_counts() {
        let msg = HtsError::TerminalMismatch { expected: 5, found: 6 }.to_string();

        assert!(msg.contains('5') && msg.contains('6'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the level mismatch message names both levels of the offending pair.
    //
    // Given
    // -----
    // - `LevelMismatch { level: 1, expected: 4, found: 3 }`.
    //
    // Expect
    // ------
    // - Message mentions "Level 1" and "level 2".
    fn level_mismatch_display_names_level_pair() {
        let msg = HtsError::LevelMismatch { level: 1, expected: 4, found: 3 }.to_string();

        assert!(msg.contains("Level 1"), "Got: {msg}");
        assert!(msg.contains("level 2"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure separator errors quote the offending name.
    //
    // Given
    // -----
    // - `MissingSeparator { name: "VICMELB", separator: "_" }`.
    //
    // Expect
    // ------
    // - Message contains the name.
    fn missing_separator_display_includes_name() {
        let err = HtsError::MissingSeparator { name: "VICMELB".into(), separator: "_".into() };

        assert!(err.to_string().contains("VICMELB"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-hierarchy object passed to a hierarchy accessor is an
    // input-type error that names what was received.
    //
    // Given
    // -----
    // - `NotHierarchical { found: "list" }`.
    //
    // Expect
    // ------
    // - `kind()` is `InputType`; the message mentions "list".
    fn not_hierarchical_is_input_type_error() {
        let err = HtsError::NotHierarchical { found: "list".into() };

        assert_eq!(err.kind(), HtsErrorKind::InputType);
        assert!(err.to_string().contains("list"), "Got: {err}");
    }
}
