//! Utility functions used across NBA Graphs

use crate::error::{NbaGraphError, Result};
use chrono::{Datelike, NaiveDate};

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color into its RGB components.
pub fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(NbaGraphError::validation_field(
            format!("invalid hex color '{hex}'"),
            "color",
        ));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| NbaGraphError::validation_field(format!("invalid hex color '{hex}'"), "color"))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format a differential with an explicit sign for positive values: `+3`, `-2`, `0`.
pub fn format_signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// First calendar year of the season in progress on `today`.
///
/// Seasons start in October, so anything before October belongs to the
/// season that started the previous year.
pub fn season_start_year(today: NaiveDate) -> i32 {
    if today.month() >= 10 {
        today.year()
    } else {
        today.year() - 1
    }
}

/// Season label for a start year, e.g. `2025` -> `"2025-26"`.
pub fn season_label(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

/// Parse a `YYYY-YY` season label into `(first_year, second_year)`.
///
/// The two-digit suffix must be the year after the first year.
pub fn parse_season_label(label: &str) -> Result<(i32, i32)> {
    let invalid = || {
        NbaGraphError::validation_field(
            format!("season label '{label}' must look like 2025-26"),
            "season",
        )
    };

    let (first, second) = label.trim().split_once('-').ok_or_else(invalid)?;
    if first.len() != 4 || second.len() != 2 {
        return Err(invalid());
    }
    let first: i32 = first.parse().map_err(|_| invalid())?;
    let suffix: i32 = second.parse().map_err(|_| invalid())?;

    let second_year = (first / 100) * 100 + suffix;
    let second_year = if second_year <= first {
        second_year + 100
    } else {
        second_year
    };
    if second_year != first + 1 {
        return Err(invalid());
    }
    Ok((first, second_year))
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(NbaGraphError::validation_field(
            format!("{field_name} cannot be empty"),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}
