//! Compact rendering of an entry's practice dates.

use chrono::{Datelike, NaiveDate};

/// Format a list of ISO dates for display.
///
/// Consecutive dates in the same month share their `YYYY-MM-` prefix:
/// `["2024-01-05", "2024-01-12"]` renders as `2024-01-05/12`. Runs from
/// different months are joined with `, `. A value that is not a valid
/// `YYYY-MM-DD` date is printed verbatim as its own run.
pub fn format_dates(dates: &[String]) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut current_month: Option<(i32, u32)> = None;

    for raw in dates {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => {
                let month = (date.year(), date.month());
                match runs.last_mut() {
                    Some(run) if current_month == Some(month) => {
                        run.push_str(&format!("/{:02}", date.day()));
                    }
                    _ => {
                        let start = date.format("%Y-%m-%d").to_string();
                        runs.push(start);
                    }
                }
                current_month = Some(month);
            }
            Err(_) => {
                runs.push(raw.clone());
                current_month = None;
            }
        }
    }

    runs.join(", ")
}
