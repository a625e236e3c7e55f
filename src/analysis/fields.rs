//! Header resolution for logical column names.

/// A header that satisfied one of the requested candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch<'h> {
    /// Zero-based column index.
    pub index: usize,
    /// Header text as written in the file.
    pub name: &'h str,
}

/// Find the header matching the first candidate that matches anything.
///
/// Comparison ignores case, surrounding whitespace and a leading byte-order
/// mark. Candidates are tried in order, so the earliest candidate wins even
/// if a later one matches an earlier column. If several headers normalize to
/// the same name, the last of them is returned.
pub fn find_field<'h, C>(headers: &[&'h str], candidates: &[C]) -> Option<FieldMatch<'h>>
where
    C: AsRef<str>,
{
    if headers.is_empty() {
        return None;
    }

    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

    candidates.iter().find_map(|candidate| {
        let key = normalize(candidate.as_ref());
        normalized
            .iter()
            .rposition(|h| *h == key)
            .map(|index| FieldMatch {
                index,
                name: headers[index],
            })
    })
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let found = find_field(&["Position", "Performance"], &["position"]);
        assert_eq!(
            found,
            Some(FieldMatch {
                index: 0,
                name: "Position"
            })
        );
    }

    #[test]
    fn test_empty_headers() {
        assert_eq!(find_field(&[], &["position"]), None);
    }

    #[test]
    fn test_whitespace_and_bom() {
        let found = find_field(&["\u{feff}position ", "  PERFORMANCE"], &["performance"]);
        assert_eq!(found.map(|f| f.name), Some("  PERFORMANCE"));

        let found = find_field(&["\u{feff}position ", "  PERFORMANCE"], &["position"]);
        assert_eq!(found.map(|f| f.index), Some(0));
    }

    #[test]
    fn test_candidate_priority() {
        let headers = ["role", "position"];
        let found = find_field(&headers, &["position", "role"]);
        assert_eq!(found.map(|f| f.name), Some("position"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_field(&["name", "age"], &["position"]), None);
    }

    #[test]
    fn test_duplicate_headers_last_wins() {
        let found = find_field(&["Position", "position"], &["POSITION"]);
        assert_eq!(found.map(|f| f.index), Some(1));
    }
}
