//! hierarchy — hierarchical time series: structure, labels, and aggregation.
//!
//! Purpose
//! -------
//! Provide a cohesive layer for collections of time series organised as a
//! tree, where every internal node is the sum of its children. This is the
//! main entry point of the crate and the surface the Python bindings wrap.
//!
//! Key behaviors
//! -------------
//! - Collect structural building blocks in [`core`]: bottom-series data,
//!   branching specifications, name tokenization, tree inference, labels,
//!   and the group / scaling / summing matrices.
//! - Expose the hierarchy object [`Hts`] in [`models`], including
//!   aggregation to any level and time windowing.
//! - Centralize error types in [`errors`] (`HtsError`, `HtsErrorKind`, and
//!   the `HtsResult` alias) so callers see one error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`Hts`] always satisfies: a single root; per-level child
//!   counts consistent with the next level's node count; a bottom node count
//!   equal to the number of bottom series; labels matching node counts.
//! - Bottom series are stored in tree order, so the group matrix and the
//!   bottom-series columns line up one to one.
//!
//! Conventions
//! -----------
//! - Level 0 is the root (`"Total"`), level K the bottom series.
//! - Group-matrix entries are 1-based node ids within their level.
//! - Nodes inside a level are ordered tree-consistently: grouped under their
//!   parent, parents in level order.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::array;
//! use rust_hts::hierarchy::prelude::*;
//!
//! let y = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
//! let bts = BottomSeries::new(y, None, None).unwrap();
//! let hts = Hts::new(bts, InferenceMode::Explicit(Some(vec![vec![2], vec![2, 1]]))).unwrap();
//! assert_eq!(hts.node_counts(), vec![1, 2, 3]);
//! ```

pub mod core;
pub mod errors;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{BottomSeries, GroupMatrix, InferenceMode, LabelSet, Nodes, TokenTable};
pub use self::errors::{HtsError, HtsErrorKind, HtsResult};
pub use self::models::{Hts, HtsSummary, LevelSeries};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hts::hierarchy::prelude::*;
//
// to import the everyday hierarchy surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{HtsError, HtsErrorKind, HtsResult};
    pub use super::models::prelude::*;
}
