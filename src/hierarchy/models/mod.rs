//! hierarchy::models — the user-facing hierarchical time series object.
//!
//! Purpose
//! -------
//! Expose [`Hts`], which ties validated bottom-level data to its inferred or
//! explicit structure and offers the derived views (group matrix, scaling
//! vector, aggregated series) that reconciliation code consumes.
//!
//! Downstream usage
//! ----------------
//! - Build with `Hts::new(bts, mode)` or the keyword-style
//!   `Hts::construct(y, nodes, bnames, characters, separator)`.
//! - Front-ends (the Python bindings) depend on the items re-exported below.

pub mod hts;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::hts::{Hts, HtsSummary, LevelSeries};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::hts::{Hts, LevelSeries};
}
