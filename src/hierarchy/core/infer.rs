//! Tree inference from tokenized bottom-series names.
//!
//! Purpose
//! -------
//! Derive a hierarchy's branching specification, node labels, and the
//! column order of the bottom series from a [`TokenTable`].
//!
//! Key behaviors
//! -------------
//! - Nodes at level `z` are the distinct `z`-segment prefixes of the bottom
//!   paths. They are ordered tree-consistently: children are grouped under
//!   their parent (parents in their own level order) and, within a parent,
//!   appear in the order their prefix is first seen in the input.
//! - `nodes[z - 1]` counts the distinct children of every level `z - 1` node,
//!   so the same order drives counts, labels, and the reorder index.
//! - `index[k]` is the input row holding the `k`-th bottom node, i.e. the
//!   column permutation that aligns the bottom series with the tree.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every full path must be unique; a repeated path is rejected rather than
//!   silently dropping a series.
//! - Grouping compares segment paths, so two different paths never merge
//!   even if their rendered labels coincide.
//!
//! Performance
//! -----------
//! - O(depth × rows) hash lookups; levels are processed sequentially because
//!   each level's order depends on its parent level's order.
use std::collections::HashMap;

use tracing::debug;

use crate::hierarchy::{
    core::{
        labels::{LabelSet, ROOT_LABEL},
        nodes::Nodes,
        tokens::TokenTable,
    },
    errors::{HtsError, HtsResult},
};

/// `InferredTree` — structure, labels, and column order recovered from names.
///
/// Fields
/// ------
/// - `nodes`: [`Nodes`]
///   Branching specification with one entry per level below the root.
/// - `labels`: [`LabelSet`]
///   `"Total"` at level 0, then the rendered prefixes of every level.
/// - `index`: `Vec<usize>`
///   Permutation of input rows; `index[k]` is the input position of the
///   `k`-th bottom node.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredTree {
    pub nodes: Nodes,
    pub labels: LabelSet,
    pub index: Vec<usize>,
}

/// Infer the hierarchy encoded by a token table.
///
/// Parameters
/// ----------
/// - `table`: [`TokenTable`]
///   Tokenized bottom-series names, one row per series.
///
/// Returns
/// -------
/// `HtsResult<InferredTree>`
///   The inferred branching specification, labels, and reorder index.
///
/// Errors
/// ------
/// - `HtsError::MissingNames` if the table has no rows.
/// - `HtsError::DuplicatePath { path, first, second }` when two rows share
///   the same full path.
///
/// Examples
/// --------
/// ```rust
/// # use rust_hts::hierarchy::core::{infer::infer_tree, tokens::tokenize_separated};
/// let names: Vec<String> =
///     ["VIC_MELB", "VIC_GEEL", "NSW_SYD"].iter().map(|s| s.to_string()).collect();
/// let tree = infer_tree(&tokenize_separated(&names, "_").unwrap()).unwrap();
/// assert_eq!(tree.nodes.levels(), &[vec![2], vec![2, 1]]);
/// assert_eq!(tree.index, vec![0, 1, 2]);
/// ```
pub fn infer_tree(table: &TokenTable) -> HtsResult<InferredTree> {
    if table.is_empty() {
        return Err(HtsError::MissingNames);
    }
    let depth = table.depth();

    // Current level's nodes in tree order, each with the first row carrying it.
    let mut order: Vec<(&[String], usize)> = vec![(table.prefix(0, 0), 0)];
    let mut levels: Vec<Vec<usize>> = Vec::with_capacity(depth);
    let mut labels: Vec<Vec<String>> = Vec::with_capacity(depth + 1);
    labels.push(vec![ROOT_LABEL.to_string()]);

    for level in 1..=depth {
        let position: HashMap<&[String], usize> =
            order.iter().enumerate().map(|(i, &(path, _))| (path, i)).collect();
        let mut children: Vec<Vec<(&[String], usize)>> = vec![Vec::new(); order.len()];
        let mut seen: HashMap<&[String], usize> = HashMap::with_capacity(table.len());

        for row in 0..table.len() {
            let path = table.prefix(row, level);
            if let Some(&first) = seen.get(path) {
                if level == depth {
                    return Err(HtsError::DuplicatePath {
                        path: table.render(path),
                        first,
                        second: row,
                    });
                }
                continue;
            }
            seen.insert(path, row);
            let parent = position[&path[..level - 1]];
            children[parent].push((path, row));
        }

        levels.push(children.iter().map(Vec::len).collect());
        order = children.into_iter().flatten().collect();
        labels.push(order.iter().map(|&(path, _)| table.render(path)).collect());
    }

    let index: Vec<usize> = order.iter().map(|&(_, row)| row).collect();
    debug!(depth, node_counts = ?levels, ?index, "inferred hierarchy from names");

    Ok(InferredTree { nodes: Nodes::from_inferred(levels), labels: LabelSet::new(labels), index })
}
