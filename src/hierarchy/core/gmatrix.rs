//! Group matrix, scaling vector, and summing matrix of a hierarchy.
//!
//! Purpose
//! -------
//! Turn a branching specification into the dense mappings that forecast
//! reconciliation consumes: which node owns each bottom series at every
//! level ([`GroupMatrix`]), the reciprocal subtree size of every node
//! ([`GroupMatrix::scaling_vector`]), and the 0/1 aggregation matrix that
//! maps bottom series onto all nodes ([`GroupMatrix::summing_matrix`]).
//!
//! Key behaviors
//! -------------
//! - Row `l` of the group matrix holds, for every bottom series, the
//!   1-based position of its ancestor among the level `l` nodes.
//! - Rows are filled bottom-up: the bottom row is `1..N`; each shallower row
//!   repeats node ids by the number of bottom series under each node, and
//!   those per-node totals are then summed into their parents' totals.
//! - Everything here depends on [`Nodes`] alone; no series data is needed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Row 0 is all ones; the bottom row is `1..N`.
//! - Each row is non-decreasing and its values are exactly `1..=n_l`, where
//!   `n_l` is the node count of level `l`.
//! - Scaling entries lie in `(0, 1]`; the bottom segment is all `1.0`.
//!
//! Performance
//! -----------
//! - Construction is O(levels × bottom series). The summing matrix is dense,
//!   O(total nodes × bottom series) in memory.
use ndarray::{Array1, Array2, ArrayView1};

use crate::hierarchy::core::nodes::Nodes;

/// `GroupMatrix` — ancestor ids per level (rows) and bottom series (columns).
///
/// Fields
/// ------
/// - `matrix`: `Array2<usize>`
///   Shape `(K + 1, N)`; entry `(l, j)` is the 1-based id of the level `l`
///   ancestor of bottom series `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatrix {
    matrix: Array2<usize>,
}

impl GroupMatrix {
    /// Build the group matrix of a branching specification.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_hts::hierarchy::core::{gmatrix::GroupMatrix, nodes::Nodes};
    /// let nodes = Nodes::new(vec![vec![2], vec![3, 2]], 5).unwrap();
    /// let gmat = GroupMatrix::from_nodes(&nodes);
    /// assert_eq!(gmat.matrix(), &array![[1usize, 1, 1, 1, 1], [1, 1, 1, 2, 2], [1, 2, 3, 4, 5]]);
    /// ```
    pub fn from_nodes(nodes: &Nodes) -> Self {
        let depth = nodes.depth();
        let n_bottom = nodes.bottom_count();
        let mut matrix = Array2::<usize>::zeros((depth + 1, n_bottom));

        matrix.row_mut(0).fill(1);
        for (j, cell) in matrix.row_mut(depth).iter_mut().enumerate() {
            *cell = j + 1;
        }

        if depth > 1 {
            // Bottom series under each node of the level being filled.
            let mut per_node: Vec<usize> = nodes.levels()[depth - 1].clone();
            for level in (1..depth).rev() {
                let mut col = 0;
                for (id, &count) in per_node.iter().enumerate() {
                    for _ in 0..count {
                        matrix[[level, col]] = id + 1;
                        col += 1;
                    }
                }
                per_node = fold_into_parents(&per_node, &nodes.levels()[level - 1]);
            }
        }

        GroupMatrix { matrix }
    }

    /// The underlying `(K + 1) × N` matrix.
    pub fn matrix(&self) -> &Array2<usize> {
        &self.matrix
    }

    /// Ancestor ids at `level` for every bottom series.
    pub fn row(&self, level: usize) -> Option<ArrayView1<'_, usize>> {
        (level < self.matrix.nrows()).then(|| self.matrix.row(level))
    }

    /// Number of levels, root and bottom included (K + 1).
    pub fn n_levels(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of bottom series (N).
    pub fn bottom_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Node count per level, read from the largest id in each row.
    pub fn node_counts(&self) -> Vec<usize> {
        self.matrix.rows().into_iter().map(|row| row.iter().copied().max().unwrap_or(0)).collect()
    }

    /// Reciprocal number of bottom series under every node, levels top to bottom.
    ///
    /// Returns
    /// -------
    /// `Array1<f64>`
    ///   One entry per node (root first, nodes in id order within a level),
    ///   each `1 / size` computed by exact integer-to-float division.
    pub fn scaling_vector(&self) -> Array1<f64> {
        let mut inv_s = Vec::with_capacity(self.node_counts().iter().sum());
        for (row, n_nodes) in self.matrix.rows().into_iter().zip(self.node_counts()) {
            let mut sizes = vec![0usize; n_nodes];
            for &id in row.iter() {
                sizes[id - 1] += 1;
            }
            inv_s.extend(sizes.into_iter().map(|size| 1.0 / size as f64));
        }
        Array1::from(inv_s)
    }

    /// Dense 0/1 aggregation matrix: one row per node, one column per bottom series.
    ///
    /// Row order matches [`scaling_vector`](Self::scaling_vector); entry
    /// `(node, j)` is `1.0` when bottom series `j` lies under `node`.
    pub fn summing_matrix(&self) -> Array2<f64> {
        let counts = self.node_counts();
        let mut smat = Array2::<f64>::zeros((counts.iter().sum(), self.bottom_count()));
        let mut offset = 0;
        for (row, n_nodes) in self.matrix.rows().into_iter().zip(counts) {
            for (j, &id) in row.iter().enumerate() {
                smat[[offset + id - 1, j]] = 1.0;
            }
            offset += n_nodes;
        }
        smat
    }
}

/// Sum per-node totals into their parents' totals; `children[p]` is the
/// number of consecutive entries of `totals` belonging to parent `p`.
fn fold_into_parents(totals: &[usize], children: &[usize]) -> Vec<usize> {
    let mut offset = 0;
    children
        .iter()
        .map(|&n| {
            let sum: usize = totals[offset..offset + n].iter().sum();
            offset += n;
            sum
        })
        .collect()
}
