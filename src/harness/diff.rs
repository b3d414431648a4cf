//! Line-oriented comparison of rendered output against golden text.
//!
//! Both sides are normalized to `\n` separators before comparison. A
//! single line terminator after the final line is not significant, so a
//! golden file saved by an editor that appends a newline still matches a
//! renderer that omits it. Additional trailing blank lines are compared
//! like any other line.

use std::fmt;

use super::loader::normalize_line_separators;

/// The first line at which expected and actual text diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// 0-based index of the first differing line.
    pub index: usize,
    /// Expected line content, or `None` when the golden text ended first.
    pub expected: Option<String>,
    /// Actual line content, or `None` when the rendered text ended first.
    pub actual: Option<String>,
}

impl LineMismatch {
    /// Returns the 1-based line number of the mismatch.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.index.saturating_add(1)
    }

    /// Returns the 1-based column of the first differing character.
    ///
    /// When one side has no line at all the column is 1. When one line is
    /// a prefix of the other, the column points just past the shorter one.
    #[must_use]
    pub fn column(&self) -> usize {
        let (Some(expected), Some(actual)) = (&self.expected, &self.actual) else {
            return 1;
        };
        let mut column = 1;
        let mut expected_chars = expected.chars();
        let mut actual_chars = actual.chars();
        loop {
            match (expected_chars.next(), actual_chars.next()) {
                (Some(e), Some(a)) if e == a => column += 1,
                _ => return column,
            }
        }
    }
}

impl fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line index {}: expected {}, found {}",
            self.index,
            describe(self.expected.as_deref()),
            describe(self.actual.as_deref())
        )
    }
}

fn describe(line: Option<&str>) -> String {
    line.map_or_else(|| "<end of file>".to_owned(), |text| format!("`{text}`"))
}

/// Compares `expected` and `actual` line by line.
///
/// Returns `None` when every line matches, otherwise the first
/// [`LineMismatch`]. Differing line counts are reported at the index of
/// the first line present on only one side.
///
/// # Examples
///
///     use goldenfix::harness::first_line_mismatch;
///
///     assert!(first_line_mismatch("a\nb\n", "a\r\nb").is_none());
///
///     let mismatch = first_line_mismatch("L1\nL2\nL4", "L1\nL2\nL3");
///     assert_eq!(mismatch.map(|m| m.index), Some(2));
#[must_use]
pub fn first_line_mismatch(expected: &str, actual: &str) -> Option<LineMismatch> {
    let expected_text = normalize_line_separators(expected);
    let actual_text = normalize_line_separators(actual);
    let mut expected_lines = expected_text.lines();
    let mut actual_lines = actual_text.lines();
    let mut index = 0;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return None,
            (e, a) if e == a => index += 1,
            (e, a) => {
                return Some(LineMismatch {
                    index,
                    expected: e.map(str::to_owned),
                    actual: a.map(str::to_owned),
                });
            }
        }
    }
}
