//! hierarchy::core — structural building blocks for hierarchical time series.
//!
//! Purpose
//! -------
//! Collect the pieces that describe the *shape* of a hierarchy independently
//! of any model: the bottom-level data container, the branching
//! specification, name tokenization and tree inference, node labels, and the
//! group / scaling / summing matrices derived from the structure.
//!
//! Key behaviors
//! -------------
//! - [`data`]: [`BottomSeries`], the validated bottom-level observation
//!   matrix with optional names and a time index.
//! - [`nodes`]: [`Nodes`] and [`validate_nodes`], the per-level child counts
//!   and their consistency checks.
//! - [`mode`]: [`InferenceMode`], the choice between explicit nodes,
//!   fixed-width name parsing, and separator-based name parsing.
//! - [`tokens`]: [`TokenTable`] built by [`tokenize_fixed_width`] or
//!   [`tokenize_separated`].
//! - [`infer`]: [`infer_tree`], recovering nodes, labels, and the column
//!   reorder index from a token table.
//! - [`labels`]: [`LabelSet`] and the default alphabetic labelling.
//! - [`gmatrix`]: [`GroupMatrix`], plus the scaling vector and summing matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constructor in this module validates its input once and returns a
//!   [`HtsResult`](crate::hierarchy::errors::HtsResult); downstream code
//!   relies on those invariants instead of re-checking them.
//! - Levels are numbered from 0 (the single root) to K (the bottom series).
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; end-to-end construction is
//!   exercised through [`crate::hierarchy::models`] and the integration tests.

pub mod data;
pub mod gmatrix;
pub mod infer;
pub mod labels;
pub mod mode;
pub mod nodes;
pub mod tokens;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::BottomSeries;
pub use self::gmatrix::GroupMatrix;
pub use self::infer::{InferredTree, infer_tree};
pub use self::labels::{LabelSet, ROOT_LABEL, default_labels, named_bottom_labels};
pub use self::mode::InferenceMode;
pub use self::nodes::{Nodes, validate_nodes};
pub use self::tokens::{TokenTable, tokenize_fixed_width, tokenize_separated};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hts::hierarchy::core::prelude::*;
//
// to import the structural surface in a single line.

pub mod prelude {
    pub use super::data::BottomSeries;
    pub use super::gmatrix::GroupMatrix;
    pub use super::labels::LabelSet;
    pub use super::mode::InferenceMode;
    pub use super::nodes::Nodes;
    pub use super::tokens::TokenTable;
}
