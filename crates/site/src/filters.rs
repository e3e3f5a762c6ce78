//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an optional UTC timestamp as `YYYY-MM-DD HH:MM`.
///
/// Usage in templates: `{{ message.created_at|short_datetime }}`
#[askama::filter_fn]
pub fn short_datetime(
    value: &Option<chrono::DateTime<chrono::Utc>>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default())
}
