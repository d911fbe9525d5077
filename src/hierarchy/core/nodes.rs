//! Branching specification for a hierarchy and its validation.
//!
//! Purpose
//! -------
//! Represent the shape of a hierarchy as per-level child-count sequences
//! ([`Nodes`]) and centralize the structural checks that make such a
//! sequence a valid single-rooted tree over a known number of bottom series
//! ([`validate_nodes`]).
//!
//! Key behaviors
//! -------------
//! - Entry `i` of [`Nodes`] lists, for every node at level `i`, how many
//!   children it has at level `i + 1`. Level 0 is the root; the last entry
//!   describes how bottom series attach to their parents.
//! - [`validate_nodes`] checks, in order: non-empty levels with positive
//!   counts, a single root, terminal count against the bottom series, and
//!   consistency between each pair of consecutive levels.
//! - [`Nodes::node_counts`] reports the node count at every level, root
//!   and bottom included.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`Nodes`] always satisfies every check of
//!   [`validate_nodes`] for `bottom_count = nodes.bottom_count()`.
//! - The representation is flat: no parent/child pointers, only counts
//!   addressed by level and position.
//!
//! Conventions
//! -----------
//! - Levels of the branching specification are named "Level 1".."Level K"
//!   (entry `i` is "Level i+1"), matching the level its children live on.
use crate::hierarchy::errors::{HtsError, HtsResult};

/// `Nodes` — validated per-level child counts of a single-rooted tree.
///
/// Fields
/// ------
/// - `levels`: `Vec<Vec<usize>>`
///   `levels[i][j]` is the number of children of node `j` at level `i`.
///
/// Invariants
/// ----------
/// - `levels` is non-empty and every entry is non-empty.
/// - `levels[0].len() == 1`.
/// - `levels[i].iter().sum() == levels[i + 1].len()` for consecutive levels.
/// - Every child count is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nodes {
    levels: Vec<Vec<usize>>,
}

impl Nodes {
    /// Construct and validate a branching specification against `bottom_count`.
    ///
    /// Parameters
    /// ----------
    /// - `levels`: `Vec<Vec<usize>>`
    ///   Child counts per level, root first.
    /// - `bottom_count`: `usize`
    ///   Number of bottom series the tree must cover.
    ///
    /// Errors
    /// ------
    /// - Any structural error reported by [`validate_nodes`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_hts::hierarchy::core::nodes::Nodes;
    /// let nodes = Nodes::new(vec![vec![2], vec![3, 2]], 5).unwrap();
    /// assert_eq!(nodes.node_counts(), vec![1, 2, 5]);
    /// assert!(Nodes::new(vec![vec![2], vec![3, 2]], 6).is_err());
    /// ```
    pub fn new(levels: Vec<Vec<usize>>, bottom_count: usize) -> HtsResult<Self> {
        validate_nodes(&levels, bottom_count)?;
        Ok(Nodes { levels })
    }

    /// Single-level tree: one root directly above `bottom_count` series.
    ///
    /// Errors
    /// ------
    /// - `HtsError::ZeroChildCount { level: 0, position: 0 }` when
    ///   `bottom_count == 0`.
    pub fn flat(bottom_count: usize) -> HtsResult<Self> {
        Nodes::new(vec![vec![bottom_count]], bottom_count)
    }

    /// Construct from counts already known to be consistent, e.g. produced by
    /// tree inference. Validity is still checked in debug builds.
    pub(crate) fn from_inferred(levels: Vec<Vec<usize>>) -> Self {
        debug_assert!(
            validate_nodes(&levels, levels.last().map_or(0, |l| l.iter().sum())).is_ok()
        );
        Nodes { levels }
    }

    /// Child counts per level, root first.
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    /// Child counts of the nodes at `level` (0-based, root = 0).
    pub fn level(&self, level: usize) -> Option<&[usize]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Number of levels below the root (K).
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Number of bottom series the tree covers.
    pub fn bottom_count(&self) -> usize {
        self.levels.last().map_or(0, |last| last.iter().sum())
    }

    /// Node count per level, `[1, n_1, ..., n_K]`, with `n_K` the bottom count.
    pub fn node_counts(&self) -> Vec<usize> {
        std::iter::once(1).chain(self.levels.iter().map(|l| l.iter().sum())).collect()
    }

    /// Total number of nodes across all levels.
    pub fn total_nodes(&self) -> usize {
        self.node_counts().iter().sum()
    }

    /// Levels paired with their display names, "Level 1".."Level K".
    pub fn named(&self) -> impl Iterator<Item = (String, &[usize])> {
        self.levels.iter().enumerate().map(|(i, l)| (format!("Level {}", i + 1), l.as_slice()))
    }
}

/// Validate a branching specification against the number of bottom series.
///
/// Parameters
/// ----------
/// - `levels`: `&[Vec<usize>]`
///   Child counts per level, root first.
/// - `bottom_count`: `usize`
///   Number of bottom series the tree must cover.
///
/// Returns
/// -------
/// `HtsResult<()>`
///   `Ok(())` when `levels` describes a single-rooted tree over exactly
///   `bottom_count` leaves.
///
/// Errors
/// ------
/// - `HtsError::EmptyNodes` / `HtsError::EmptyLevel { level }`
///   Missing levels or a level with no entries.
/// - `HtsError::ZeroChildCount { level, position }`
///   A node declares zero children.
/// - `HtsError::RootNotSingle { found }`
///   `levels[0].len() != 1`.
/// - `HtsError::TerminalMismatch { expected, found }`
///   Sum of the last level differs from `bottom_count`.
/// - `HtsError::LevelMismatch { level, expected, found }`
///   `sum(levels[i]) != levels[i + 1].len()`.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_nodes(levels: &[Vec<usize>], bottom_count: usize) -> HtsResult<()> {
    if levels.is_empty() {
        return Err(HtsError::EmptyNodes);
    }
    for (level, counts) in levels.iter().enumerate() {
        if counts.is_empty() {
            return Err(HtsError::EmptyLevel { level });
        }
        if let Some(position) = counts.iter().position(|&c| c == 0) {
            return Err(HtsError::ZeroChildCount { level, position });
        }
    }

    if levels[0].len() != 1 {
        return Err(HtsError::RootNotSingle { found: levels[0].len() });
    }

    let terminal: usize = levels[levels.len() - 1].iter().sum();
    if terminal != bottom_count {
        return Err(HtsError::TerminalMismatch { expected: terminal, found: bottom_count });
    }

    for (level, pair) in levels.windows(2).enumerate() {
        let declared: usize = pair[0].iter().sum();
        if declared != pair[1].len() {
            return Err(HtsError::LevelMismatch {
                level,
                expected: declared,
                found: pair[1].len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every error branch of `validate_nodes`, in documented order.
    // - `Nodes` accessors: node counts, depth, bottom count, level names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify a consistent two-level specification is accepted.
    //
    // Given
    // -----
    // - `levels = [[2], [3, 2]]`, 5 bottom series.
    //
    // Expect
    // ------
    // - `Ok`, with node counts `[1, 2, 5]` and depth 2.
    fn nodes_new_accepts_consistent_specification() {
        let nodes = Nodes::new(vec![vec![2], vec![3, 2]], 5).unwrap();

        assert_eq!(nodes.node_counts(), vec![1, 2, 5]);
        assert_eq!(nodes.depth(), 2);
        assert_eq!(nodes.bottom_count(), 5);
        assert_eq!(nodes.total_nodes(), 8);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a terminal count mismatch reports expected and given counts.
    //
    // Given
    // -----
    // - `levels = [[2], [3, 2]]`, 6 bottom series.
    //
    // Expect
    // ------
    // - `TerminalMismatch { expected: 5, found: 6 }`.
    fn validate_nodes_rejects_terminal_mismatch() {
        let result = validate_nodes(&[vec![2], vec![3, 2]], 6);

        assert_eq!(result.unwrap_err(), HtsError::TerminalMismatch { expected: 5, found: 6 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure a multi-node first level is rejected as a missing single root.
    //
    // Given
    // -----
    // - `levels = [[2, 1], [1, 1, 1]]`, 3 bottom series.
    //
    // Expect
    // ------
    // - `RootNotSingle { found: 2 }`.
    fn validate_nodes_rejects_multiple_roots() {
        let result = validate_nodes(&[vec![2, 1], vec![1, 1, 1]], 3);

        assert_eq!(result.unwrap_err(), HtsError::RootNotSingle { found: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure inconsistent consecutive levels name the offending pair.
    //
    // Given
    // -----
    // - `levels = [[3], [2, 2]]`: the root declares 3 children but level 1
    //   lists only 2 nodes.
    //
    // Expect
    // ------
    // - `LevelMismatch { level: 0, expected: 3, found: 2 }`.
    fn validate_nodes_rejects_level_mismatch() {
        let result = validate_nodes(&[vec![3], vec![2, 2]], 4);

        assert_eq!(
            result.unwrap_err(),
            HtsError::LevelMismatch { level: 0, expected: 3, found: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure empty specifications, empty levels, and zero counts are rejected.
    //
    // Expect
    // ------
    // - `EmptyNodes`, `EmptyLevel { level: 1 }`, `ZeroChildCount { level: 1, position: 1 }`.
    fn validate_nodes_rejects_degenerate_levels() {
        assert_eq!(validate_nodes(&[], 0).unwrap_err(), HtsError::EmptyNodes);
        assert_eq!(
            validate_nodes(&[vec![1], vec![]], 0).unwrap_err(),
            HtsError::EmptyLevel { level: 1 }
        );
        assert_eq!(
            validate_nodes(&[vec![2], vec![2, 0]], 2).unwrap_err(),
            HtsError::ZeroChildCount { level: 1, position: 1 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the flat default tree and the level display names.
    //
    // Given
    // -----
    // - `Nodes::flat(4)` and a two-level specification.
    //
    // Expect
    // ------
    // - Flat tree has one level `[4]`; names run "Level 1", "Level 2".
    fn nodes_flat_and_named_levels() {
        let flat = Nodes::flat(4).unwrap();
        assert_eq!(flat.levels(), &[vec![4]]);
        assert_eq!(flat.node_counts(), vec![1, 4]);

        let nodes = Nodes::new(vec![vec![2], vec![1, 1]], 2).unwrap();
        let names: Vec<String> = nodes.named().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Level 1".to_string(), "Level 2".to_string()]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a flat tree over zero series is rejected instead of yielding a
    // root with no children.
    //
    // Given
    // -----
    // - `Nodes::flat(0)`.
    //
    // Expect
    // ------
    // - `ZeroChildCount { level: 0, position: 0 }`.
    fn nodes_flat_rejects_zero_series() {
        assert_eq!(Nodes::flat(0).unwrap_err(), HtsError::ZeroChildCount { level: 0, position: 0 });
    }
}
