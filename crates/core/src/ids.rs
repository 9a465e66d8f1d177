//! Business identifier formats.
//!
//! Sale, service, and generated VIN identifiers share one shape: the
//! record's creation date as MMDDYYYY followed by the record's own
//! sequence number, concatenated without separators. Finance identifiers
//! are a prefix letter plus a 6-digit zero-padded sequence.

use chrono::{Datelike, NaiveDate};

/// Formats a date-plus-sequence identifier, e.g. month 4, day 9, year
/// 2024, sequence 7 -> `"040920247"`.
#[must_use]
pub fn daily_record_id(date: NaiveDate, sequence: i64) -> String {
    format!(
        "{:02}{:02}{}{}",
        date.month(),
        date.day(),
        date.year(),
        sequence
    )
}

/// Finance id for a sale-derived snapshot row: `F` + 6-digit sequence.
#[must_use]
pub fn finance_sale_id(sequence: i64) -> String {
    format!("F{sequence:06}")
}

/// Finance id for an inventory-only snapshot row: `I` + 6-digit sequence.
#[must_use]
pub fn finance_stock_id(sequence: i64) -> String {
    format!("I{sequence:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_record_id_format() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();
        assert_eq!(daily_record_id(date, 7), "040920247");

        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(daily_record_id(date, 123), "12312026123");
    }

    #[test]
    fn test_finance_id_padding() {
        assert_eq!(finance_sale_id(1), "F000001");
        assert_eq!(finance_sale_id(123_456), "F123456");
        assert_eq!(finance_stock_id(42), "I000042");
        // Sequences beyond six digits keep their full width.
        assert_eq!(finance_stock_id(1_234_567), "I1234567");
    }
}
