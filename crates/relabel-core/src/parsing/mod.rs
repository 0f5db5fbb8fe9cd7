pub mod quantity;

use crate::catalog::schema::CatalogDef;
use crate::error::RelabelError;
use crate::extraction::PageText;
use crate::model::CodeMatch;
use quantity::quantity_at;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which label layout produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeForm {
    /// Marker and full code on one line, quantity on the next.
    SingleLine,
    /// Code wrapped onto the next line, quantity on the line after that.
    Split,
}

/// Result of scanning one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    pub code_match: CodeMatch,
    pub form: CodeForm,
    /// Lines the match spans, counting the marker line and the quantity line.
    pub lines_consumed: usize,
}

impl LineScan {
    /// Index of the line the quantity was read from.
    pub fn quantity_line(&self) -> usize {
        self.code_match.source_line_index + self.lines_consumed - 1
    }
}

/// Finds product codes and their quantities in a page's lines.
#[derive(Debug, Clone)]
pub struct LineParser {
    marker: String,
    single_line: Regex,
}

impl LineParser {
    /// Build a parser for the given code marker (e.g. "SKU:").
    pub fn new(marker: &str) -> Result<Self, RelabelError> {
        let pattern = format!(r"{}\s*([\w-]+)", regex::escape(marker));
        let single_line = Regex::new(&pattern).map_err(|e| {
            RelabelError::CatalogInvalid(format!("marker '{}' is unusable: {}", marker, e))
        })?;
        Ok(LineParser {
            marker: marker.to_string(),
            single_line,
        })
    }

    pub fn for_catalog(catalog: &CatalogDef) -> Result<Self, RelabelError> {
        Self::new(&catalog.marker)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parse all code matches on a page, in line order.
    ///
    /// Every line is scanned; a split match does not skip the lines it read.
    pub fn parse_page(&self, page: &PageText) -> Vec<CodeMatch> {
        self.parse_lines(&page.lines)
    }

    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CodeMatch> {
        (0..lines.len())
            .filter_map(|idx| self.scan_line(lines, idx))
            .map(|scan| scan.code_match)
            .collect()
    }

    /// Try the single-line form, then the split form, on `lines[idx]`.
    pub fn scan_line<S: AsRef<str>>(&self, lines: &[S], idx: usize) -> Option<LineScan> {
        let line = lines.get(idx)?.as_ref();
        self.scan_single_line(lines, idx, line)
            .or_else(|| self.scan_split(lines, idx, line))
    }

    fn scan_single_line<S: AsRef<str>>(
        &self,
        lines: &[S],
        idx: usize,
        line: &str,
    ) -> Option<LineScan> {
        let caps = self.single_line.captures(line)?;
        let token = caps.get(1)?.as_str();
        // A trailing hyphen means the code wraps onto the next line.
        if token.ends_with('-') {
            return None;
        }

        Some(LineScan {
            code_match: CodeMatch {
                code: token.to_string(),
                quantity: quantity_at(lines, idx + 1),
                source_line_index: idx,
            },
            form: CodeForm::SingleLine,
            lines_consumed: 2,
        })
    }

    fn scan_split<S: AsRef<str>>(&self, lines: &[S], idx: usize, line: &str) -> Option<LineScan> {
        let pos = line.find(&self.marker)?;
        let prefix = line[pos + self.marker.len()..].trim();
        if prefix.is_empty() {
            return None;
        }

        let suffix = lines.get(idx + 1)?.as_ref();
        // The next line starts a label of its own; leave it to its own scan.
        if suffix.contains(&self.marker) {
            return None;
        }
        let suffix = suffix.trim();
        if suffix.is_empty() {
            return None;
        }

        Some(LineScan {
            code_match: CodeMatch {
                code: join_code(prefix, suffix),
                quantity: quantity_at(lines, idx + 2),
                source_line_index: idx,
            },
            form: CodeForm::Split,
            lines_consumed: 3,
        })
    }
}

/// Join the two halves of a wrapped code with a single hyphen and drop all
/// whitespace.
fn join_code(prefix: &str, suffix: &str) -> String {
    let joined = if prefix.ends_with('-') || suffix.starts_with('-') {
        format!("{prefix}{suffix}")
    } else {
        format!("{prefix}-{suffix}")
    };
    joined.chars().filter(|c| !c.is_whitespace()).collect()
}
