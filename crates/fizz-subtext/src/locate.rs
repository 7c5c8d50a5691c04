//! Case-insensitive fragment search with per-call memoization.

use std::collections::HashMap;

use crate::types::FragmentMatch;

/// Result text for a fragment that never occurs.
pub const NO_MATCH_MARKER: &str = "no output";

/// Find every 1-based offset at which each fragment occurs in `text`, ignoring case.
///
/// Results keep the input order and the original spelling of each fragment.
/// Fragments that are equal once lower-cased are scanned only once per call.
pub fn locate<S: AsRef<str>>(fragments: &[S], text: &str) -> Vec<FragmentMatch> {
    if fragments.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    let mut cache: HashMap<String, Vec<usize>> = HashMap::new();

    let results: Vec<FragmentMatch> = fragments
        .iter()
        .map(|fragment| {
            let fragment = fragment.as_ref();
            let positions = cache
                .entry(fragment.to_lowercase())
                .or_insert_with_key(|key| scan(&haystack, key));

            FragmentMatch {
                subtext: fragment.to_string(),
                result: format_positions(positions),
            }
        })
        .collect();

    tracing::debug!(
        fragments = fragments.len(),
        distinct = cache.len(),
        text_chars = haystack.len(),
        "Located fragments"
    );
    results
}

/// Whether `fragment` occurs in `text` starting at character offset `start`.
///
/// Comparison is exact; callers fold case beforehand. A start that is negative
/// or would let the fragment run past the end of `text` never matches.
pub fn matches_at(text: &str, fragment: &str, start: i64) -> bool {
    let text: Vec<char> = text.chars().collect();
    let fragment: Vec<char> = fragment.chars().collect();
    chars_match_at(&text, &fragment, start)
}

fn chars_match_at(text: &[char], fragment: &[char], start: i64) -> bool {
    let Ok(start) = usize::try_from(start) else {
        return false;
    };
    if start.saturating_add(fragment.len()) > text.len() {
        return false;
    }

    text[start..start + fragment.len()] == *fragment
}

/// 0-based-to-1-based offsets of `needle` in the already lower-cased haystack.
fn scan(haystack: &[char], needle: &str) -> Vec<usize> {
    let needle: Vec<char> = needle.chars().collect();
    let Some(&first) = needle.first() else {
        return Vec::new();
    };

    haystack
        .iter()
        .enumerate()
        .filter(|&(idx, &c)| c == first && chars_match_at(haystack, &needle, idx as i64))
        .map(|(idx, _)| idx + 1)
        .collect()
}

fn format_positions(positions: &[usize]) -> String {
    if positions.is_empty() {
        return NO_MATCH_MARKER.to_string();
    }

    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Pepep and hello";

    fn fragment_match(subtext: &str, result: &str) -> FragmentMatch {
        FragmentMatch {
            subtext: subtext.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_locate_empty_fragments() {
        let fragments: [&str; 0] = [];
        assert!(locate(&fragments, "String to search").is_empty());
    }

    #[test]
    fn test_locate_empty_text() {
        assert!(locate(&["searchText A", "searchText B"], "").is_empty());
    }

    #[test]
    fn test_locate_mixed_case() {
        let results = locate(&["pe", "pep"], TEXT);
        assert_eq!(
            results,
            vec![fragment_match("pe", "1, 3"), fragment_match("pep", "1, 3")]
        );
    }

    #[test]
    fn test_locate_no_match_marker() {
        let results = locate(&["xyz"], TEXT);
        assert_eq!(results, vec![fragment_match("xyz", NO_MATCH_MARKER)]);
    }

    #[test]
    fn test_locate_empty_fragment() {
        let results = locate(&["", "and"], TEXT);
        assert_eq!(
            results,
            vec![fragment_match("", NO_MATCH_MARKER), fragment_match("and", "7")]
        );
    }

    #[test]
    fn test_locate_repeated_fragment_reuses_result() {
        let results = locate(&["Pep", "and", "pEP", "l"], TEXT);
        assert_eq!(results[0].result, "1, 3");
        assert_eq!(results[2].result, results[0].result);
        assert_eq!(results[2].subtext, "pEP");
        assert_eq!(results[1].result, "7");
        assert_eq!(results[3].result, "13, 14");
    }

    #[test]
    fn test_locate_overlapping_and_tail() {
        let results = locate(&["lo", "o", "hello"], TEXT);
        assert_eq!(results[0].result, "14");
        assert_eq!(results[1].result, "15");
        assert_eq!(results[2].result, "11");
    }

    #[test]
    fn test_matches_at_exact() {
        assert!(matches_at(TEXT, "Pe", 0));
        assert!(!matches_at(TEXT, "pe", 1));
    }

    #[test]
    fn test_matches_at_bounds() {
        assert!(!matches_at(TEXT, "low", 13));
        assert!(matches_at(TEXT, "lo", 13));
        assert!(!matches_at(TEXT, "lo", -13));
        assert!(!matches_at(TEXT, "lo", 400));
    }

    #[test]
    fn test_matches_at_unicode_offsets() {
        assert!(matches_at("naïve café", "café", 6));
        let results = locate(&["CAFÉ"], "naïve café");
        assert_eq!(results[0].result, "7");
    }
}
