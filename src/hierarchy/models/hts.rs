//! Hierarchical time series: construction and derived views.
//!
//! Purpose
//! -------
//! Assemble bottom-level series, a branching specification, and node labels
//! into one immutable [`Hts`] value, and derive from it everything
//! reconciliation and reporting need: the group matrix, scaling vector,
//! summing matrix, and aggregated series at any level.
//!
//! Key behaviors
//! -------------
//! - [`Hts::new`] dispatches once on [`InferenceMode`]:
//!   - `Explicit`: validate the given child counts (or use one root over all
//!     series) and label nodes alphabetically, keeping user series names at
//!     the bottom when present. An informational notice is logged.
//!   - `FixedWidth` / `Separated`: tokenize the series names, infer the tree,
//!     and reorder the bottom columns by the inferred index.
//! - The applied column permutation is kept in [`Hts::index`]; it is the
//!   identity for explicit construction.
//! - Aggregated series are computed as `bts · Sᵀ` for the relevant rows of
//!   the summing matrix `S`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `nodes.bottom_count() == bts.n_series()`.
//! - `labels.level(i).len() == nodes.node_counts()[i]` for every level.
//! - Bottom series always carry names, equal to the bottom labels.
//! - No field changes after construction; derived views are recomputed on
//!   demand from `nodes`.
use ndarray::{Array1, Array2, Axis};
use tracing::{debug, info};

use crate::hierarchy::{
    core::{
        data::BottomSeries,
        gmatrix::GroupMatrix,
        infer::infer_tree,
        labels::{LabelSet, default_labels, named_bottom_labels},
        mode::InferenceMode,
        nodes::Nodes,
        tokens::{TokenTable, tokenize_fixed_width, tokenize_separated},
    },
    errors::{HtsError, HtsResult},
};

/// `Hts` — bottom series together with their hierarchy.
///
/// Fields
/// ------
/// - `bts`: [`BottomSeries`]
///   Bottom-level series in tree order (possibly reordered from the input).
/// - `nodes`: [`Nodes`]
///   Validated branching specification ("Level 1".."Level K").
/// - `labels`: [`LabelSet`]
///   Node labels ("Level 0".."Level K").
/// - `index`: `Vec<usize>`
///   Input column of each stored bottom series.
#[derive(Debug, Clone, PartialEq)]
pub struct Hts {
    bts: BottomSeries,
    nodes: Nodes,
    labels: LabelSet,
    index: Vec<usize>,
}

/// Series of every node at a set of levels.
///
/// Fields
/// ------
/// - `values`: `Array2<f64>`, shape `(T, m)`, one column per node.
/// - `names`: node labels, one per column.
/// - `time`: time index shared with the bottom series.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSeries {
    pub values: Array2<f64>,
    pub names: Vec<String>,
    pub time: Array1<f64>,
}

/// Headline figures of a hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct HtsSummary {
    /// Number of levels below the root (K).
    pub n_levels: usize,
    /// Nodes per level, root first.
    pub node_counts: Vec<usize>,
    /// Number of series across all levels.
    pub total_series: usize,
    /// Observations per series.
    pub n_obs: usize,
    /// Root (total) series.
    pub top_level: Array1<f64>,
}

impl Hts {
    /// Build a hierarchy from validated bottom series.
    ///
    /// Parameters
    /// ----------
    /// - `bts`: [`BottomSeries`]
    ///   Bottom-level series; name-based modes require names.
    /// - `mode`: [`InferenceMode`]
    ///   Where the structure comes from.
    ///
    /// Returns
    /// -------
    /// `HtsResult<Hts>`
    ///   The assembled hierarchy; for name-based modes the columns of `bts`
    ///   are reordered to match the inferred tree.
    ///
    /// Errors
    /// ------
    /// - Structure errors from [`Nodes::new`] for explicit child counts.
    /// - `HtsError::MissingNames` when a name-based mode has no names.
    /// - Format errors from the tokenizers and `DuplicatePath` from inference.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::Array2;
    /// # use rust_hts::hierarchy::{BottomSeries, Hts, InferenceMode};
    /// let bts = BottomSeries::new(Array2::ones((4, 5)), None, None).unwrap();
    /// let hts = Hts::new(bts, InferenceMode::Explicit(Some(vec![vec![2], vec![3, 2]]))).unwrap();
    /// assert_eq!(hts.nodes().node_counts(), vec![1, 2, 5]);
    /// assert_eq!(hts.labels().level(1).unwrap(), &["A", "B"]);
    /// ```
    pub fn new(bts: BottomSeries, mode: InferenceMode) -> HtsResult<Self> {
        let inferred = mode.infers_from_names();
        let hts = match mode {
            InferenceMode::Explicit(levels) => Self::from_explicit(bts, levels)?,
            InferenceMode::FixedWidth(widths) => {
                let table = tokenize_fixed_width(bottom_names(&bts)?, &widths)?;
                Self::from_tokens(bts, &table)?
            }
            InferenceMode::Separated(separator) => {
                let table = tokenize_separated(bottom_names(&bts)?, &separator)?;
                Self::from_tokens(bts, &table)?
            }
        };
        debug!(
            n_series = hts.bts.n_series(),
            n_obs = hts.bts.n_obs(),
            node_counts = ?hts.nodes.node_counts(),
            inferred,
            "constructed hierarchical time series"
        );
        Ok(hts)
    }

    /// Build a hierarchy from raw parts, choosing the mode from which optional
    /// arguments are supplied.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `Array2<f64>` — observations, rows = time, columns = bottom series.
    /// - `nodes`: explicit child counts; ignored when names are parsed.
    /// - `bnames`: bottom-series names.
    /// - `characters`: fixed segment widths.
    /// - `separator`: segment separator.
    ///
    /// Errors
    /// ------
    /// - `HtsError::ConflictingModes` when both `characters` and `separator`
    ///   are given, plus every error of [`BottomSeries::new`] and [`Hts::new`].
    pub fn construct(
        y: Array2<f64>, nodes: Option<Vec<Vec<usize>>>, bnames: Option<Vec<String>>,
        characters: Option<Vec<usize>>, separator: Option<String>,
    ) -> HtsResult<Self> {
        let mode = InferenceMode::from_options(nodes, characters, separator)?;
        Hts::new(BottomSeries::new(y, bnames, None)?, mode)
    }

    fn from_explicit(bts: BottomSeries, levels: Option<Vec<Vec<usize>>>) -> HtsResult<Self> {
        info!("characters and separator not specified; using the default labelling system");
        let n_series = bts.n_series();
        let nodes = match levels {
            Some(levels) => Nodes::new(levels, n_series)?,
            None => Nodes::flat(n_series)?,
        };

        let labels = match bts.names() {
            Some(names) => named_bottom_labels(&nodes, names)?,
            None => default_labels(&nodes),
        };
        let bts = if bts.names().is_some() {
            bts
        } else {
            bts.with_names(labels.bottom().to_vec())
        };

        Ok(Hts { bts, nodes, labels, index: (0..n_series).collect() })
    }

    fn from_tokens(bts: BottomSeries, table: &TokenTable) -> HtsResult<Self> {
        let tree = infer_tree(table)?;
        let bts = bts.select_columns(&tree.index);
        Ok(Hts { bts, nodes: tree.nodes, labels: tree.labels, index: tree.index })
    }

    /// Bottom series in tree order.
    pub fn bts(&self) -> &BottomSeries {
        &self.bts
    }

    /// Branching specification.
    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    /// Node labels per level.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Input column of each stored bottom series.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Node count per level, root first.
    pub fn node_counts(&self) -> Vec<usize> {
        self.nodes.node_counts()
    }

    pub fn group_matrix(&self) -> GroupMatrix {
        GroupMatrix::from_nodes(&self.nodes)
    }

    pub fn scaling_vector(&self) -> Array1<f64> {
        self.group_matrix().scaling_vector()
    }

    pub fn summing_matrix(&self) -> Array2<f64> {
        self.group_matrix().summing_matrix()
    }

    /// Series of every node at the requested levels, in the given level order.
    ///
    /// Errors
    /// ------
    /// - `HtsError::LevelOutOfRange { level, max }` for a level deeper than K.
    pub fn aggregate(&self, levels: &[usize]) -> HtsResult<LevelSeries> {
        let max = self.nodes.depth();
        if let Some(&level) = levels.iter().find(|&&l| l > max) {
            return Err(HtsError::LevelOutOfRange { level, max });
        }
        Ok(self.aggregate_levels(levels))
    }

    /// Series of every node, levels top to bottom.
    pub fn all_series(&self) -> LevelSeries {
        let levels: Vec<usize> = (0..=self.nodes.depth()).collect();
        self.aggregate_levels(&levels)
    }

    /// Root series: the sum of all bottom series.
    pub fn total_series(&self) -> Array1<f64> {
        self.bts.values().sum_axis(Axis(1))
    }

    /// Restrict to observations whose time index lies in `[start, end]`.
    pub fn window(&self, start: Option<f64>, end: Option<f64>) -> HtsResult<Hts> {
        Ok(Hts {
            bts: self.bts.window(start, end)?,
            nodes: self.nodes.clone(),
            labels: self.labels.clone(),
            index: self.index.clone(),
        })
    }

    pub fn summary(&self) -> HtsSummary {
        let node_counts = self.nodes.node_counts();
        HtsSummary {
            n_levels: self.nodes.depth(),
            total_series: node_counts.iter().sum(),
            node_counts,
            n_obs: self.bts.n_obs(),
            top_level: self.total_series(),
        }
    }

    fn aggregate_levels(&self, levels: &[usize]) -> LevelSeries {
        let counts = self.nodes.node_counts();
        let offsets: Vec<usize> = counts
            .iter()
            .scan(0, |acc, &n| {
                let start = *acc;
                *acc += n;
                Some(start)
            })
            .collect();

        let rows: Vec<usize> =
            levels.iter().flat_map(|&l| offsets[l]..offsets[l] + counts[l]).collect();
        let smat = self.summing_matrix().select(Axis(0), &rows);
        let values = self.bts.values().dot(&smat.t());

        let names = levels
            .iter()
            .flat_map(|&l| self.labels.level(l).unwrap_or_default().iter().cloned())
            .collect();

        LevelSeries { values, names, time: self.bts.time().clone() }
    }
}

fn bottom_names(bts: &BottomSeries) -> HtsResult<&[String]> {
    bts.names().ok_or(HtsError::MissingNames)
}
