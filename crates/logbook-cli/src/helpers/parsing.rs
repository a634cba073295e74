//! Parsing helpers for date flags.

use chrono::{Duration, Local, NaiveDate};

/// Parse a filter date: `YYYY-MM-DD`, `today` or `yesterday`.
///
/// Used as a clap value parser, hence the `String` error.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    parse_date_relative_to(value, today)
}

fn parse_date_relative_to(value: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    match value.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            format!(
                "Invalid date (expected YYYY-MM-DD, today or yesterday): {}",
                value
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), day(2024, 2, 29));
    }

    #[test]
    fn test_relative_words() {
        let today = day(2024, 3, 1);
        assert_eq!(parse_date_relative_to("Today", today).unwrap(), today);
        assert_eq!(
            parse_date_relative_to("yesterday", today).unwrap(),
            day(2024, 2, 29)
        );
    }

    #[test]
    fn test_invalid_date() {
        let err = parse_date("03/01/2024").unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
        assert!(parse_date("2024-02-30").is_err());
    }
}
