//! Display formatting (fr-FR conventions)
//!
//! Amounts are CFA francs without decimals, grouped by thousands with a space.
//! Dates come from the server as ISO strings; anything unparsable is shown as is.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency suffix used for every amount
pub const CURRENCY_SUFFIX: &str = "F CFA";

const MONTHS_LONG: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre",
    "novembre", "décembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// Group the digits of a non-negative integer string by thousands
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// `1000` → `"1 000 F CFA"`
pub fn format_cfa(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{} {CURRENCY_SUFFIX}", group_thousands(&digits))
}

/// Signed display for ledger amounts: `+1 000 F CFA` / `-2 500 F CFA`
pub fn format_signed_cfa(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format_cfa(amount)
    } else {
        format!("+{}", format_cfa(amount))
    }
}

/// Parse a server timestamp or date
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

/// `dd/mm/yyyy`
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// `dd/mm/yyyy HH:MM:SS`
pub fn format_date_time(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

/// `5 janvier 2024 à 10:30`
pub fn format_date_long(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => format!(
            "{} {} {} à {:02}:{:02}",
            dt.day(),
            MONTHS_LONG[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => value.to_string(),
    }
}

/// `5 janv.`
pub fn format_day_month(value: &str) -> String {
    match parse_date(value) {
        Some(d) => format!("{} {}", d.day(), MONTHS_SHORT[d.month0() as usize]),
        None => value.to_string(),
    }
}

/// `janvier 2024`
pub fn format_month_year(year: i32, month: u32) -> String {
    match month.checked_sub(1).and_then(|m| MONTHS_LONG.get(m as usize)) {
        Some(name) => format!("{name} {year}"),
        None => format!("{month:02}/{year}"),
    }
}

/// Keep only the `YYYY-MM-DD` part of an ISO timestamp
pub fn date_only(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The date `days` days before today, as `YYYY-MM-DD` (UTC)
pub fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cfa_hides_iso_code() {
        let text = format_cfa(Decimal::from(1000));
        assert_eq!(text, "1 000 F CFA");
        assert!(!text.contains("XOF"));
    }

    #[test]
    fn test_format_cfa_grouping_and_rounding() {
        assert_eq!(format_cfa(Decimal::ZERO), "0 F CFA");
        assert_eq!(format_cfa(Decimal::from(999)), "999 F CFA");
        assert_eq!(format_cfa(Decimal::from(1_234_567)), "1 234 567 F CFA");
        assert_eq!(format_cfa(Decimal::new(25005, 1)), "2 501 F CFA");
        assert_eq!(format_cfa(Decimal::from(-2500)), "-2 500 F CFA");
    }

    #[test]
    fn test_signed_amounts() {
        assert_eq!(format_signed_cfa(Decimal::from(1500)), "+1 500 F CFA");
        assert_eq!(format_signed_cfa(Decimal::from(-1500)), "-1 500 F CFA");
        assert_eq!(format_signed_cfa(Decimal::ZERO), "+0 F CFA");
    }

    #[test]
    fn test_format_date_is_day_month_year() {
        assert_eq!(format_date("2024-01-05T10:00:00"), "05/01/2024");
        assert_eq!(format_date("2024-12-31"), "31/12/2024");
        assert_eq!(format_date("2024-03-09T23:15:00Z"), "09/03/2024");
        assert_eq!(format_date("pas une date"), "pas une date");
    }

    #[test]
    fn test_long_and_short_dates() {
        assert_eq!(format_date_long("2024-01-05T10:30:00"), "5 janvier 2024 à 10:30");
        assert_eq!(format_day_month("2024-02-12"), "12 févr.");
        assert_eq!(format_date_time("2024-01-05T10:30:07.123"), "05/01/2024 10:30:07");
        assert_eq!(format_month_year(2024, 8), "août 2024");
    }

    #[test]
    fn test_date_only_truncates_time() {
        assert_eq!(date_only("2024-06-01T00:00:00"), "2024-06-01");
        assert_eq!(date_only("2024-06-01"), "2024-06-01");
    }
}
