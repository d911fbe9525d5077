//! Node labels for every level of a hierarchy.
//!
//! Purpose
//! -------
//! Hold the human-readable label of every node ([`LabelSet`]) and build the
//! default labelling used when a hierarchy is given by explicit child counts.
//!
//! Key behaviors
//! -------------
//! - [`default_labels`]: the root is `"Total"`; level 1 nodes are `A, B, …`;
//!   a node at a deeper level is its parent's label followed by the letter
//!   code of its position among its siblings (`AA, AB, BA, …`).
//! - [`named_bottom_labels`]: as above, but the bottom level carries the
//!   user-supplied series names verbatim.
//! - Inferred labels are assembled directly by tree inference.
//!
//! Invariants & assumptions
//! ------------------------
//! - Level 0 always holds exactly one label.
//! - The label count at level `i` equals the node count at level `i`.
//! - Labelling is a pure function of the branching specification: the same
//!   [`Nodes`] always yields the same labels.
//!
//! Conventions
//! -----------
//! - Letter codes continue past `Z` as `AA, AB, …`, so siblings never share
//!   a label however many there are.
use crate::hierarchy::{
    core::nodes::Nodes,
    errors::{HtsError, HtsResult},
};

/// Label of the root node.
pub const ROOT_LABEL: &str = "Total";

/// `LabelSet` — labels per level, root first.
///
/// Invariants
/// ----------
/// - `levels[0] == ["Total"]`.
/// - `levels[i].len()` equals the node count of level `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    levels: Vec<Vec<String>>,
}

impl LabelSet {
    pub(crate) fn new(levels: Vec<Vec<String>>) -> Self {
        LabelSet { levels }
    }

    /// Labels per level, root first.
    pub fn levels(&self) -> &[Vec<String>] {
        &self.levels
    }

    /// Labels of one level (0 = root).
    pub fn level(&self, level: usize) -> Option<&[String]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Labels of the bottom level.
    pub fn bottom(&self) -> &[String] {
        self.levels.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Labels of every node, levels top to bottom.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.levels.iter().flatten()
    }

    /// Levels paired with their display names, "Level 0".."Level K".
    pub fn named(&self) -> impl Iterator<Item = (String, &[String])> {
        self.levels.iter().enumerate().map(|(i, l)| (format!("Level {i}"), l.as_slice()))
    }
}

/// Build the default alphabetic labels for a branching specification.
///
/// Parameters
/// ----------
/// - `nodes`: [`Nodes`]
///   Validated branching specification.
///
/// Returns
/// -------
/// `LabelSet`
///   `"Total"`, then one alphabetic label per node at every level.
///
/// Examples
/// --------
/// ```rust
/// # use rust_hts::hierarchy::core::{labels::default_labels, nodes::Nodes};
/// let nodes = Nodes::new(vec![vec![2], vec![3, 2]], 5).unwrap();
/// let labels = default_labels(&nodes);
/// assert_eq!(labels.level(2).unwrap(), &["AA", "AB", "AC", "BA", "BB"]);
/// ```
pub fn default_labels(nodes: &Nodes) -> LabelSet {
    let mut levels = Vec::with_capacity(nodes.depth() + 1);
    levels.push(vec![ROOT_LABEL.to_string()]);

    let mut parents = vec![String::new()];
    for counts in nodes.levels() {
        let current: Vec<String> = parents
            .iter()
            .zip(counts)
            .flat_map(|(parent, &count)| {
                (0..count).map(move |k| format!("{parent}{}", letter_code(k)))
            })
            .collect();
        levels.push(current.clone());
        parents = current;
    }

    LabelSet::new(levels)
}

/// Default labels for every level except the bottom, which uses `names`.
///
/// Errors
/// ------
/// - `HtsError::NameCountMismatch { expected, found }` when `names` does not
///   hold one entry per bottom series.
pub fn named_bottom_labels(nodes: &Nodes, names: &[String]) -> HtsResult<LabelSet> {
    if names.len() != nodes.bottom_count() {
        return Err(HtsError::NameCountMismatch {
            expected: nodes.bottom_count(),
            found: names.len(),
        });
    }
    let mut labels = default_labels(nodes);
    if let Some(bottom) = labels.levels.last_mut() {
        *bottom = names.to_vec();
    }
    Ok(labels)
}

/// Letter code of the `k`-th sibling (0-based): A..Z, AA..AZ, BA, ...
fn letter_code(mut k: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (k % 26) as u8));
        if k < 26 {
            break;
        }
        k = k / 26 - 1;
    }
    letters.iter().rev().collect()
}
