//! Parsing and formatting of race times.
//!
//! Result feeds write times the way rinks display them: `"34.72"`,
//! `"1:09.86"`, `"13:25,20"`. Both `.` and `,` are accepted as the decimal
//! separator; `:` separates hours/minutes/seconds.

/// Parses a time string into seconds.
///
/// Accepts 1–3 colon-separated segments (seconds, minutes:seconds, or
/// hours:minutes:seconds), each a plain number. Returns `None` for empty,
/// malformed, or non-finite input. Precision is preserved as given; no
/// truncation happens here.
pub fn parse_time_to_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    let segment = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());

    match parts.as_slice() {
        [s] => segment(s),
        [m, s] => Some(segment(m)? * 60.0 + segment(s)?),
        [h, m, s] => Some(segment(h)? * 3600.0 + segment(m)? * 60.0 + segment(s)?),
        _ => None,
    }
}

/// Formats seconds as a display time.
///
/// The minutes component appears only from one minute up; seconds are shown
/// with 3 decimals, zero-padded (`"1:09.860"`, `"34.720"`). Negative values
/// keep a leading sign so the same formatter serves deltas. Non-finite
/// input renders as an em dash.
pub fn format_seconds_to_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "—".to_string();
    }

    let sign = if seconds < 0.0 { "-" } else { "" };
    let abs = seconds.abs();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (abs / 60.0).floor() as u64;
    let secs = abs - (minutes as f64) * 60.0;

    if minutes > 0 {
        format!("{sign}{minutes}:{secs:06.3}")
    } else {
        format!("{sign}{secs:06.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_bare_seconds() {
        assert!(close(parse_time_to_seconds("34.72").unwrap(), 34.72));
        assert!(close(parse_time_to_seconds("34,72").unwrap(), 34.72));
        assert!(close(parse_time_to_seconds("40").unwrap(), 40.0));
    }

    #[test]
    fn parses_minutes_and_seconds() {
        assert!(close(parse_time_to_seconds("1:09.86").unwrap(), 69.86));
        assert!(close(parse_time_to_seconds("13:25,20").unwrap(), 805.2));
        assert!(close(parse_time_to_seconds("6:25.10").unwrap(), 385.1));
    }

    #[test]
    fn parses_hours() {
        assert!(close(parse_time_to_seconds("1:01:01.5").unwrap(), 3661.5));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert!(close(parse_time_to_seconds("  34.72  ").unwrap(), 34.72));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_time_to_seconds(""), None);
        assert_eq!(parse_time_to_seconds("   "), None);
        assert_eq!(parse_time_to_seconds("abc"), None);
        assert_eq!(parse_time_to_seconds("1:xx.0"), None);
        assert_eq!(parse_time_to_seconds("1:"), None);
        assert_eq!(parse_time_to_seconds("1:2:3:4"), None);
        assert_eq!(parse_time_to_seconds("nan"), None);
        assert_eq!(parse_time_to_seconds("inf"), None);
    }

    #[test]
    fn formats_seconds_only_below_a_minute() {
        assert_eq!(format_seconds_to_time(34.72), "34.720");
        assert_eq!(format_seconds_to_time(4.5), "04.500");
        assert_eq!(format_seconds_to_time(0.0), "00.000");
    }

    #[test]
    fn formats_minutes_from_one_minute_up() {
        assert_eq!(format_seconds_to_time(69.86), "1:09.860");
        assert_eq!(format_seconds_to_time(805.2), "13:25.200");
        assert_eq!(format_seconds_to_time(60.0), "1:00.000");
    }

    #[test]
    fn negative_keeps_sign() {
        assert_eq!(format_seconds_to_time(-4.5), "-04.500");
        assert_eq!(format_seconds_to_time(-69.86), "-1:09.860");
    }

    #[test]
    fn non_finite_renders_dash() {
        assert_eq!(format_seconds_to_time(f64::NAN), "—");
    }

    #[test]
    fn roundtrip_preserves_three_decimals() {
        for raw in ["34.72", "1:09.86", "13:25,20", "6:25.10", "0.001"] {
            let secs = parse_time_to_seconds(raw).unwrap();
            let formatted = format_seconds_to_time(secs);
            let reparsed = parse_time_to_seconds(&formatted).unwrap();
            assert!(
                close(secs, reparsed),
                "roundtrip drifted for {raw}: {secs} vs {reparsed}"
            );
        }
    }
}
