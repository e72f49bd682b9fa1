//! Watermark filtering of extracted listings
//!
//! Listing dates follow one grammar, `MONTH DAY, YEAR`:
//! - `MONTH` is an English month name, case-insensitive: the full name
//!   ("March"), the three-letter abbreviation ("Dec"), or AP style "Sept".
//!   A trailing period is optional ("Dec." and "Dec" are the same month).
//! - `DAY` is one or two digits followed by a comma.
//! - `YEAR` is four digits.

use anyhow::Result;
use chrono::NaiveDate;

use crate::error::WatchError;
use crate::models::JobRecord;
use crate::watermark::Watermark;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a listing display date such as "Dec. 3, 2020" or "March 15, 2021"
pub fn parse_listing_date(value: &str) -> Result<NaiveDate> {
    let invalid = || WatchError::ParseError(format!("invalid listing date: {:?}", value));

    let mut parts = value.split_whitespace();
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid().into());
    };

    let month = parse_month(month).ok_or_else(invalid)?;
    let day = day
        .strip_suffix(',')
        .filter(|d| (1..=2).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|d| d.parse::<u32>().ok())
        .ok_or_else(invalid)?;
    let year = Some(year)
        .filter(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|y| y.parse::<i32>().ok())
        .ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid().into())
}

fn parse_month(token: &str) -> Option<u32> {
    let name = token.strip_suffix('.').unwrap_or(token).to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|full| {
            name == *full
                || (name.len() == 3 && full.starts_with(name.as_str()))
                || (name == "sept" && *full == "september")
        })
        .map(|idx| idx as u32 + 1)
}

/// Keep the records dated strictly after the watermark, preserving order.
///
/// A single unparseable date fails the whole batch.
pub fn new_since(records: &[JobRecord], watermark: Watermark) -> Result<Vec<JobRecord>> {
    let mut fresh = Vec::new();
    for record in records {
        let date = parse_listing_date(&record.updated)?;
        if date > watermark.date() {
            fresh.push(record.clone());
        }
    }
    Ok(fresh)
}
