//! Splitting bottom-series names into hierarchical segments.
//!
//! Purpose
//! -------
//! Turn flat bottom-series names into ordered segment paths, one segment per
//! hierarchy level, so that tree inference can group series by common
//! prefixes. Two encodings are supported: fixed character widths
//! ([`tokenize_fixed_width`]) and a separator string ([`tokenize_separated`]).
//!
//! Key behaviors
//! -------------
//! - Both tokenizers return a [`TokenTable`] of identical shape: one row per
//!   bottom series and one column per level, where the token at level `z` is
//!   the first `z` segments joined together.
//! - Fixed-width tokens are joined with no delimiter; separated tokens are
//!   re-joined with the separator, so the deepest token equals the full name
//!   in both modes.
//! - Grouping downstream is done on segment paths, never on joined strings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every row of a [`TokenTable`] has the same number of segments.
//! - Widths are counted in Unicode scalar values, not bytes.
//!
//! Conventions
//! -----------
//! - Fixed-width offsets that overshoot the common name length are clipped
//!   and repeated offsets collapse; characters left uncovered by the widths
//!   form one final segment. Either case logs a warning but is not an error.
use crate::hierarchy::errors::{HtsError, HtsResult};
use ndarray::Array2;
use tracing::warn;

/// `TokenTable` — per-series segment paths plus the delimiter used to render them.
///
/// Fields
/// ------
/// - `paths`: `Vec<Vec<String>>`
///   `paths[row]` holds the segments of bottom series `row`, shallowest first.
/// - `joiner`: `String`
///   Delimiter inserted between segments when rendering a token.
///
/// Invariants
/// ----------
/// - All paths have the same, non-zero number of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable {
    paths: Vec<Vec<String>>,
    joiner: String,
}

impl TokenTable {
    /// Number of bottom series (rows).
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of levels below the root (columns).
    pub fn depth(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// First `level` segments of `row`'s path; `level == 0` is the empty root path.
    ///
    /// Panics
    /// ------
    /// - If `row >= self.len()` or `level > self.depth()`.
    pub fn prefix(&self, row: usize, level: usize) -> &[String] {
        &self.paths[row][..level]
    }

    /// Render a segment path as a token.
    pub fn render(&self, segments: &[String]) -> String {
        segments.join(&self.joiner)
    }

    /// Token of `row` at `level` (`1 <= level <= depth`).
    ///
    /// Panics
    /// ------
    /// - Under the same conditions as [`TokenTable::prefix`].
    pub fn token(&self, row: usize, level: usize) -> String {
        self.render(self.prefix(row, level))
    }

    /// Full token table: row = bottom series, column `c` = level `c + 1`.
    pub fn tokens(&self) -> Array2<String> {
        Array2::from_shape_fn((self.len(), self.depth()), |(row, col)| self.token(row, col + 1))
    }
}

/// Tokenize names made of fixed-width segments.
///
/// Parameters
/// ----------
/// - `names`: `&[String]`
///   Bottom-series names; all must have the same length in characters.
/// - `widths`: `&[usize]`
///   Segment widths, shallowest first; all strictly positive.
///
/// Returns
/// -------
/// `HtsResult<TokenTable>`
///   Token table whose level `z` token is the name prefix ending at the
///   `z`-th cumulative offset.
///
/// Errors
/// ------
/// - `HtsError::MissingNames` if `names` is empty.
/// - `HtsError::InvalidWidths` if `widths` is empty or contains a zero.
/// - `HtsError::EmptyName { index }` for an empty name.
/// - `HtsError::UnequalNameLengths { expected, index, found }` when a name's
///   length differs from the first name's.
///
/// Notes
/// -----
/// - A warning is logged when `sum(widths)` differs from the common length;
///   inference proceeds on the clipped offsets.
///
/// Examples
/// --------
/// ```rust
/// # use rust_hts::hierarchy::core::tokens::tokenize_fixed_width;
/// let names = vec!["A10A".to_string(), "B30C".to_string()];
/// let table = tokenize_fixed_width(&names, &[1, 2, 1]).unwrap();
/// assert_eq!(table.token(1, 2), "B30");
/// ```
pub fn tokenize_fixed_width(names: &[String], widths: &[usize]) -> HtsResult<TokenTable> {
    if names.is_empty() {
        return Err(HtsError::MissingNames);
    }
    if widths.is_empty() {
        return Err(HtsError::InvalidWidths { reason: "at least one width is required" });
    }
    if widths.contains(&0) {
        return Err(HtsError::InvalidWidths { reason: "widths must be strictly positive" });
    }

    let chars: Vec<Vec<char>> = names.iter().map(|n| n.chars().collect()).collect();
    let common = chars[0].len();
    for (index, name) in chars.iter().enumerate() {
        if name.is_empty() {
            return Err(HtsError::EmptyName { index });
        }
        if name.len() != common {
            return Err(HtsError::UnequalNameLengths {
                expected: common,
                index,
                found: name.len(),
            });
        }
    }

    let covered: usize = widths.iter().sum();
    if covered != common {
        warn!(
            covered,
            name_length = common,
            "segment widths do not match the name length; using clipped offsets"
        );
    }
    let ends = segment_ends(widths, common);

    let paths = chars
        .iter()
        .map(|name| {
            let mut start = 0;
            ends.iter()
                .map(|&end| {
                    let segment: String = name[start..end].iter().collect();
                    start = end;
                    segment
                })
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(TokenTable { paths, joiner: String::new() })
}

/// Tokenize names whose segments are delimited by `separator`.
///
/// Parameters
/// ----------
/// - `names`: `&[String]`
///   Bottom-series names; lengths may differ.
/// - `separator`: `&str`
///   Non-empty delimiter occurring the same number of times in every name.
///
/// Returns
/// -------
/// `HtsResult<TokenTable>`
///   Token table whose level `z` token is the first `z` parts re-joined with
///   `separator`.
///
/// Errors
/// ------
/// - `HtsError::MissingNames` if `names` is empty.
/// - `HtsError::EmptySeparator` if `separator` is empty.
/// - `HtsError::MissingSeparator { name, separator }` if a name lacks it.
/// - `HtsError::InconsistentSeparatorCount { name, expected, found }` if a
///   name contains it a different number of times than the first name.
///
/// Examples
/// --------
/// ```rust
/// # use rust_hts::hierarchy::core::tokens::tokenize_separated;
/// let names = vec!["VIC_MELB".to_string(), "NSW_SYD".to_string()];
/// let table = tokenize_separated(&names, "_").unwrap();
/// assert_eq!(table.token(0, 1), "VIC");
/// assert_eq!(table.token(0, 2), "VIC_MELB");
/// ```
pub fn tokenize_separated(names: &[String], separator: &str) -> HtsResult<TokenTable> {
    if names.is_empty() {
        return Err(HtsError::MissingNames);
    }
    if separator.is_empty() {
        return Err(HtsError::EmptySeparator);
    }

    let expected = names[0].matches(separator).count();
    for name in names {
        let found = name.matches(separator).count();
        if found == 0 {
            return Err(HtsError::MissingSeparator {
                name: name.clone(),
                separator: separator.to_string(),
            });
        }
        if found != expected {
            return Err(HtsError::InconsistentSeparatorCount {
                name: name.clone(),
                expected,
                found,
            });
        }
    }

    let paths = names
        .iter()
        .map(|name| name.split(separator).map(String::from).collect::<Vec<String>>())
        .collect();

    Ok(TokenTable { paths, joiner: separator.to_string() })
}

/// Cumulative segment end offsets, clipped to `len`, deduplicated, and
/// always ending at `len`.
fn segment_ends(widths: &[usize], len: usize) -> Vec<usize> {
    let mut ends = Vec::with_capacity(widths.len() + 1);
    let mut offset = 0;
    for &width in widths {
        offset = (offset + width).min(len);
        if ends.last() != Some(&offset) {
            ends.push(offset);
        }
    }
    if ends.last() != Some(&len) {
        ends.push(len);
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::testing::capture_logs;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Fixed-width tokenization, including widths that under- or over-cover
    //   the name length.
    // - Separator tokenization and its format errors.
    // - Shape agreement of the two modes.
    // -------------------------------------------------------------------------

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify fixed-width tokens are cumulative prefixes.
    //
    // Given
    // -----
    // - Names "A10A", "B30C" and widths [1, 2, 1].
    //
    // Expect
    // ------
    // - Depth 3; row 0 tokens "A", "A10", "A10A".
    fn fixed_width_produces_cumulative_prefixes() {
        let table = tokenize_fixed_width(&names(&["A10A", "B30C"]), &[1, 2, 1]).unwrap();

        assert_eq!(table.depth(), 3);
        assert_eq!(table.len(), 2);
        let tokens = table.tokens();
        assert_eq!(tokens.row(0).to_vec(), vec!["A", "A10", "A10A"]);
        assert_eq!(tokens.row(1).to_vec(), vec!["B", "B30", "B30C"]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure widths that stop short of the name length still end at the full name.
    //
    // Given
    // -----
    // - Names of length 4 and widths [1, 2] (covering 3 characters).
    //
    // Expect
    // ------
    // - Depth 3; the deepest token is the full name.
    fn fixed_width_short_coverage_appends_trailing_segment() {
        let table = tokenize_fixed_width(&names(&["A10A", "A10B"]), &[1, 2]).unwrap();

        assert_eq!(table.depth(), 3);
        assert_eq!(table.token(1, 3), "A10B");
    }

    #[test]
    // Purpose
    // -------
    // Ensure widths that overshoot the name length are clipped and collapsed.
    //
    // Given
    // -----
    // - Names of length 3 and widths [1, 2, 4].
    //
    // Expect
    // ------
    // - Depth 2 (offsets 1, 3); no empty segments.
    fn fixed_width_over_coverage_collapses_offsets() {
        let table = tokenize_fixed_width(&names(&["A10", "B20"]), &[1, 2, 4]).unwrap();

        assert_eq!(table.depth(), 2);
        assert_eq!(table.prefix(0, 2), &["A".to_string(), "10".to_string()]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure fixed-width mode rejects names of differing lengths and bad widths.
    //
    // Expect
    // ------
    // - `UnequalNameLengths { expected: 3, index: 1, found: 4 }`.
    // - `InvalidWidths` for empty and zero widths.
    fn fixed_width_rejects_malformed_input() {
        assert_eq!(
            tokenize_fixed_width(&names(&["A10", "A100"]), &[1, 2]).unwrap_err(),
            HtsError::UnequalNameLengths { expected: 3, index: 1, found: 4 }
        );
        assert!(matches!(
            tokenize_fixed_width(&names(&["A10"]), &[]).unwrap_err(),
            HtsError::InvalidWidths { .. }
        ));
        assert!(matches!(
            tokenize_fixed_width(&names(&["A10"]), &[1, 0]).unwrap_err(),
            HtsError::InvalidWidths { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify separator tokens keep the separator between parts.
    //
    // Given
    // -----
    // - Names "VIC_MELB", "NSW_SYD" and separator "_".
    //
    // Expect
    // ------
    // - Level 1 tokens "VIC", "NSW"; level 2 tokens equal the full names.
    fn separated_rejoins_parts_with_separator() {
        let table = tokenize_separated(&names(&["VIC_MELB", "NSW_SYD"]), "_").unwrap();

        assert_eq!(table.depth(), 2);
        assert_eq!(table.token(1, 1), "NSW");
        assert_eq!(table.token(0, 2), "VIC_MELB");
    }

    #[test]
    // Purpose
    // -------
    // Ensure separator-mode format errors are reported with the offending name.
    //
    // Expect
    // ------
    // - Missing separator, inconsistent count, and empty separator errors.
    fn separated_rejects_malformed_names() {
        assert_eq!(
            tokenize_separated(&names(&["VIC_MELB", "NSWSYD"]), "_").unwrap_err(),
            HtsError::MissingSeparator { name: "NSWSYD".into(), separator: "_".into() }
        );
        assert_eq!(
            tokenize_separated(&names(&["VIC_MELB", "NSW_SYD_C"]), "_").unwrap_err(),
            HtsError::InconsistentSeparatorCount { name: "NSW_SYD_C".into(), expected: 1, found: 2 }
        );
        assert_eq!(
            tokenize_separated(&names(&["VIC_MELB"]), "").unwrap_err(),
            HtsError::EmptySeparator
        );
    }

    #[test]
    // Purpose
    // -------
    // Check the two modes agree on shape when encoding the same grouping.
    //
    // Given
    // -----
    // - "AX", "AY", "BZ" with widths [1, 1] and "A_X", "A_Y", "B_Z" with "_".
    //
    // Expect
    // ------
    // - Same depth and row count; identical segment paths.
    fn fixed_width_and_separated_shapes_agree() {
        let fixed = tokenize_fixed_width(&names(&["AX", "AY", "BZ"]), &[1, 1]).unwrap();
        let sep = tokenize_separated(&names(&["A_X", "A_Y", "B_Z"]), "_").unwrap();

        assert_eq!(fixed.tokens().dim(), sep.tokens().dim());
        for row in 0..fixed.len() {
            assert_eq!(fixed.prefix(row, 2), sep.prefix(row, 2));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify a width/length mismatch is reported as a warning and that
    // matching widths stay silent.
    //
    // Given
    // -----
    // - Names "A1x", "B2y" (length 3) with widths [1, 1], then [1, 1, 1].
    //
    // Expect
    // ------
    // - First call: a WARN line carrying `covered=2` and `name_length=3`.
    // - Second call: no WARN line.
    fn fixed_width_coverage_mismatch_logs_warning() {
        let bnames = names(&["A1x", "B2y"]);

        let (table, logs) = capture_logs(|| tokenize_fixed_width(&bnames, &[1, 1]));
        assert_eq!(table.unwrap().depth(), 3);
        assert!(logs.contains("WARN"), "Got: {logs}");
        assert!(logs.contains("segment widths do not match the name length"), "Got: {logs}");
        assert!(logs.contains("covered=2") && logs.contains("name_length=3"), "Got: {logs}");

        let (_, logs) = capture_logs(|| tokenize_fixed_width(&bnames, &[1, 1, 1]));
        assert!(!logs.contains("WARN"), "Got: {logs}");
    }
}
