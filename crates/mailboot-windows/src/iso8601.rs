//! ISO 8601 duration strings (`PT30S`, `PT1M`, `P1DT12H`).
//!
//! The scheduler speaks this format in two places: the `Delay` field
//! of a logon trigger and the duration fields of exported task XML.

use std::time::Duration;

/// Formats a duration as an ISO 8601 string with whole H/M/S parts.
///
/// `Duration::ZERO` formats as `PT0S`, which the scheduler reads as
/// "no limit" in duration-limit fields.
pub fn format(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return "PT0S".to_string();
    }

    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    let mut out = String::from("PT");
    if h > 0 {
        out.push_str(&format!("{h}H"));
    }
    if m > 0 {
        out.push_str(&format!("{m}M"));
    }
    if s > 0 {
        out.push_str(&format!("{s}S"));
    }
    out
}

/// Parses an ISO 8601 duration with day/hour/minute/second parts.
///
/// Returns `None` for anything malformed; fractional parts are not
/// produced by the scheduler and are rejected.
pub fn parse(s: &str) -> Option<Duration> {
    let rest = s.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }
    let (date, time) = match rest.split_once('T') {
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    let days = scan(date, &[('D', 86_400)])?;
    let secs = scan(time, &[('H', 3600), ('M', 60), ('S', 1)])?;
    Some(Duration::from_secs(days + secs))
}

/// Sums `<number><unit>` groups, where each unit maps to a multiplier
/// in seconds. Fails on unknown units or trailing digits.
fn scan(part: &str, units: &[(char, u64)]) -> Option<u64> {
    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let (_, mult) = units.iter().find(|(u, _)| *u == c)?;
            total += digits.parse::<u64>().ok()? * mult;
            digits.clear();
        }
    }
    if digits.is_empty() { Some(total) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_seconds_minutes_and_hours() {
        assert_eq!(format(Duration::from_secs(30)), "PT30S");
        assert_eq!(format(Duration::from_secs(60)), "PT1M");
        assert_eq!(format(Duration::from_secs(90)), "PT1M30S");
        assert_eq!(format(Duration::from_secs(72 * 3600)), "PT72H");
        assert_eq!(format(Duration::from_secs(3661)), "PT1H1M1S");
    }

    #[test]
    fn zero_formats_as_pt0s() {
        assert_eq!(format(Duration::ZERO), "PT0S");
    }

    #[test]
    fn parses_scheduler_durations() {
        assert_eq!(parse("PT30S"), Some(Duration::from_secs(30)));
        assert_eq!(parse("PT1M"), Some(Duration::from_secs(60)));
        assert_eq!(parse("PT0S"), Some(Duration::ZERO));
        assert_eq!(parse("PT72H"), Some(Duration::from_secs(72 * 3600)));
        assert_eq!(parse("P3D"), Some(Duration::from_secs(3 * 86_400)));
        assert_eq!(parse("P1DT12H"), Some(Duration::from_secs(36 * 3600)));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("P"), None);
        assert_eq!(parse("30S"), None);
        assert_eq!(parse("PT30"), None);
        assert_eq!(parse("PT30X"), None);
    }

    #[test]
    fn format_and_parse_agree() {
        for secs in [1, 30, 60, 90, 3600, 3661, 259_200] {
            let d = Duration::from_secs(secs);
            assert_eq!(parse(&format(d)), Some(d));
        }
    }
}
