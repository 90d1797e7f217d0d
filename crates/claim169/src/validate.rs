//! Post-decode validation that the schema layer stays oblivious to.
//!
//! Calendar semantics live here: the schema stores `date_of_birth` as plain
//! text and the orchestrator checks it after a full decode, accepting both
//! ISO 8601 extended (`YYYY-MM-DD`) and basic (`YYYYMMDD`) forms without
//! normalizing either.

use claim169_core::IdentityRecord;

use crate::error::{Claim169Error, Result};

/// Validate the date fields of a decoded record.
pub fn validate_record(record: &IdentityRecord) -> Result<()> {
    if let Some(dob) = &record.date_of_birth {
        validate_date(dob, "date_of_birth")?;
    }
    Ok(())
}

/// Check that a date string is one of the two accepted forms and denotes a
/// real calendar date.
pub fn validate_date(date: &str, field_name: &str) -> Result<()> {
    let bytes = date.as_bytes();
    let digits = |ranges: &[std::ops::Range<usize>]| {
        ranges
            .iter()
            .all(|r| bytes[r.clone()].iter().all(u8::is_ascii_digit))
    };

    let (year, month, day) = match bytes.len() {
        10 if bytes[4] == b'-' && bytes[7] == b'-' && digits(&[0..4, 5..7, 8..10]) => (
            parse_u32(&date[0..4]),
            parse_u32(&date[5..7]),
            parse_u32(&date[8..10]),
        ),
        8 if digits(&[0..8]) => (
            parse_u32(&date[0..4]),
            parse_u32(&date[4..6]),
            parse_u32(&date[6..8]),
        ),
        _ => {
            return Err(Claim169Error::Validation(format!(
                "invalid {} format: {:?} (expected YYYY-MM-DD or YYYYMMDD)",
                field_name, date
            )))
        }
    };

    if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
        return Err(Claim169Error::Validation(format!(
            "invalid {} value: {:?} is not a valid calendar date",
            field_name, date
        )));
    }
    Ok(())
}

fn parse_u32(s: &str) -> u32 {
    s.parse().expect("digits already checked")
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
