pub mod schema_form;
pub mod document_editor;
pub mod journal;
pub mod todos;
pub mod planner;

use chrono::{DateTime, Utc};
use leptos::prelude::*;

/// Ask the browser for confirmation; a blocked dialog counts as "no"
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

/// `Mar 5, 2024`
pub fn format_day(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// `Mar 5, 2024 14:30`
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y %H:%M").to_string()
}
