//! How a hierarchy's structure is obtained.
//!
//! - [`InferenceMode::Explicit`] takes a branching specification as given
//!   (or the flat default when `None`) and labels nodes alphabetically.
//! - [`InferenceMode::FixedWidth`] and [`InferenceMode::Separated`] parse the
//!   bottom-series names and infer both structure and labels from them.
//!
//! The mode is chosen once per construction call; there is no global default.
use crate::hierarchy::errors::{HtsError, HtsResult};

/// Source of a hierarchy's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceMode {
    /// Child counts per level, root first; `None` means one root over all series.
    Explicit(Option<Vec<Vec<usize>>>),
    /// Segment widths (in characters) of fixed-width names.
    FixedWidth(Vec<usize>),
    /// Separator between name segments.
    Separated(String),
}

impl InferenceMode {
    /// Pick a mode from optional, mutually exclusive arguments.
    ///
    /// Parameters
    /// ----------
    /// - `nodes`: explicit child counts, used only when no name parsing is requested.
    /// - `characters`: fixed segment widths.
    /// - `separator`: segment separator.
    ///
    /// Errors
    /// ------
    /// - `HtsError::ConflictingModes` when both `characters` and `separator`
    ///   are supplied.
    pub fn from_options(
        nodes: Option<Vec<Vec<usize>>>, characters: Option<Vec<usize>>, separator: Option<String>,
    ) -> HtsResult<Self> {
        match (characters, separator) {
            (Some(_), Some(_)) => Err(HtsError::ConflictingModes),
            (Some(widths), None) => Ok(InferenceMode::FixedWidth(widths)),
            (None, Some(sep)) => Ok(InferenceMode::Separated(sep)),
            (None, None) => Ok(InferenceMode::Explicit(nodes)),
        }
    }

    /// Whether structure is read from the bottom-series names.
    pub fn infers_from_names(&self) -> bool {
        !matches!(self, InferenceMode::Explicit(_))
    }
}

impl Default for InferenceMode {
    fn default() -> Self {
        InferenceMode::Explicit(None)
    }
}
