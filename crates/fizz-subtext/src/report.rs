//! Line-per-number report over a range, annotated by divisor labels.

use crate::types::{DivisorMapping, Range};

/// Line separator used between report lines.
pub const LINE_SEPARATOR: char = '\r';

/// Ranges wider than this are still rendered, but logged as suspicious.
pub const LARGE_REPORT_WIDTH: u64 = 1_000_000;

/// Render `"{n}: {labels}"` for every `n` in the range, each followed by a carriage return.
pub fn build_report(range: &Range, divisors: &DivisorMapping) -> String {
    if range.width() > LARGE_REPORT_WIDTH {
        tracing::warn!(
            min = range.min,
            max = range.max,
            limit = LARGE_REPORT_WIDTH,
            "Range report spans {} numbers",
            range.width()
        );
    }

    let mut report = String::new();

    for n in range.iter() {
        report.push_str(&n.to_string());
        report.push_str(": ");
        report.push_str(&divisors.labels_for(n));
        report.push(LINE_SEPARATOR);
    }

    tracing::debug!(
        min = range.min,
        max = range.max,
        divisors = divisors.len(),
        bytes = report.len(),
        "Built range report"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boss_hogg() -> DivisorMapping {
        vec![(3, "Boss"), (5, "Hogg")].into_iter().collect()
    }

    #[test]
    fn test_report_annotates_divisible_numbers() {
        let report = build_report(&Range::new(14, 16), &boss_hogg());
        assert_eq!(report, "14: \r15: BossHogg\r16: \r");
    }

    #[test]
    fn test_report_includes_both_ends() {
        let report = build_report(&Range::new(3, 5), &boss_hogg());
        let lines: Vec<&str> = report.split_terminator('\r').collect();
        assert_eq!(lines, vec!["3: Boss", "4: ", "5: Hogg"]);
    }

    #[test]
    fn test_report_without_divisors() {
        let report = build_report(&Range::new(0, 2), &DivisorMapping::new());
        assert_eq!(report, "0: \r1: \r2: \r");
    }

    #[test]
    fn test_report_zero_matches_every_divisor() {
        let report = build_report(&Range::new(0, 0), &boss_hogg());
        assert_eq!(report, "0: BossHogg\r");
    }

    #[test]
    fn test_report_just_above_warn_width() {
        let range = Range::new(0, LARGE_REPORT_WIDTH as i64);
        assert!(range.width() > LARGE_REPORT_WIDTH);
        let report = build_report(&range, &DivisorMapping::new());
        assert!(report.ends_with("1000000: \r"));
        assert_eq!(report.matches(LINE_SEPARATOR).count() as u64, range.width());
    }

    #[test]
    fn test_report_single_number() {
        let report = build_report(&Range::new(7, 7), &boss_hogg());
        assert_eq!(report, "7: \r");
    }
}
