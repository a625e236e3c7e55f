//! Data models for the performance report.
//!
//! This module contains the core data structures passed between the
//! aggregation and reporting stages.

use indexmap::IndexMap;

/// Performance values grouped by position label.
///
/// Labels iterate in first-seen order and each label's values keep
/// file-then-row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    groups: IndexMap<String, Vec<f64>>,
}

impl Grouping {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under the given position label.
    pub fn push(&mut self, position: &str, value: f64) {
        if let Some(values) = self.groups.get_mut(position) {
            values.push(value);
        } else {
            self.groups.insert(position.to_string(), vec![value]);
        }
    }

    /// Values recorded for a position, if any.
    #[allow(dead_code)] // Lookup for callers inspecting a single position
    pub fn get(&self, position: &str) -> Option<&[f64]> {
        self.groups.get(position).map(Vec::as_slice)
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of values across all positions.
    pub fn value_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Iterate positions and their values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl IntoIterator for Grouping {
    type Item = (String, Vec<f64>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for Grouping {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        let mut grouping = Grouping::new();
        for (position, values) in iter {
            grouping
                .groups
                .entry(position.into())
                .or_default()
                .extend(values);
        }
        grouping
    }
}

/// Mean performance for one position.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedResult {
    /// Position label exactly as it appeared in the input.
    pub position: String,
    /// Arithmetic mean of the position's values.
    pub average: f64,
}

impl AveragedResult {
    #[allow(dead_code)] // Constructor for tests and external callers
    pub fn new(position: impl Into<String>, average: f64) -> Self {
        Self {
            position: position.into(),
            average,
        }
    }
}

/// A data row reduced to the two columns the report needs.
///
/// Both fields are already whitespace-trimmed; the performance text is
/// still raw and may not be numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceRecord<'a> {
    pub position: &'a str,
    pub performance_raw: &'a str,
}

impl<'a> PerformanceRecord<'a> {
    /// Build a record from raw cells, rejecting rows with a blank cell.
    pub fn from_cells(position: Option<&'a str>, performance: Option<&'a str>) -> Option<Self> {
        let position = position.map(str::trim).filter(|p| !p.is_empty())?;
        let performance_raw = performance.map(str::trim).filter(|p| !p.is_empty())?;

        Some(Self {
            position,
            performance_raw,
        })
    }

    /// Parse the performance cell, accepting a comma as decimal separator.
    pub fn performance(&self) -> Option<f64> {
        parse_decimal(self.performance_raw)
    }
}

/// Parse a decimal number where every `,` is treated as `.`.
///
/// Single underscores between digits are accepted as digit separators
/// (`1_000` is 1000); any other underscore makes the value invalid.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    let chars: Vec<char> = normalized.chars().collect();

    let mut digits = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !between_digits {
                return None;
            }
            continue;
        }
        digits.push(c);
    }

    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let mut grouping = Grouping::new();
        grouping.push("QA", 80.0);
        grouping.push("Dev", 90.0);
        grouping.push("QA", 82.0);

        let positions: Vec<&str> = grouping.iter().map(|(p, _)| p).collect();
        assert_eq!(positions, vec!["QA", "Dev"]);
        assert_eq!(grouping.get("QA"), Some(&[80.0, 82.0][..]));
        assert_eq!(grouping.value_count(), 3);
    }

    #[test]
    fn test_grouping_labels_are_case_sensitive() {
        let mut grouping = Grouping::new();
        grouping.push("dev", 1.0);
        grouping.push("Dev", 2.0);

        assert_eq!(grouping.len(), 2);
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal("8,5"), Some(8.5));
        assert_eq!(parse_decimal("8.5"), Some(8.5));
        assert_eq!(parse_decimal(" 42 "), Some(42.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("1,000,5"), None);
    }

    #[test]
    fn test_parse_decimal_digit_separators() {
        assert_eq!(parse_decimal("1_000"), Some(1000.0));
        assert_eq!(parse_decimal("1_000,5"), Some(1000.5));
        assert_eq!(parse_decimal("_1"), None);
        assert_eq!(parse_decimal("1_"), None);
        assert_eq!(parse_decimal("1__0"), None);
        assert_eq!(parse_decimal("1_.5"), None);
    }

    #[test]
    fn test_record_rejects_blank_cells() {
        assert!(PerformanceRecord::from_cells(Some("  "), Some("1")).is_none());
        assert!(PerformanceRecord::from_cells(Some("Dev"), Some("")).is_none());
        assert!(PerformanceRecord::from_cells(Some("Dev"), None).is_none());

        let record = PerformanceRecord::from_cells(Some(" Dev "), Some(" 8,5 ")).unwrap();
        assert_eq!(record.position, "Dev");
        assert_eq!(record.performance(), Some(8.5));
    }
}
