//! Calendar-day grouping and relative time labels for the drink history.
//!
//! Grouping uses the event's local calendar day. Buckets come out newest
//! day first, and drinks inside a bucket stay in descending time order.

use crate::{DrinkEvent, DrinkLog};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// One calendar day of history
#[derive(Clone, Debug, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Formatted day header, e.g. "5 August 2026"
    pub label: String,
    /// Drinks of that day, newest first
    pub drinks: Vec<DrinkEvent>,
}

/// Bucket the full log by local calendar day, newest day first
pub fn group_by_day(log: &DrinkLog) -> Vec<DayGroup> {
    let mut sorted: Vec<DrinkEvent> = log.events().to_vec();
    sorted.sort_by(|a, b| b.datetime.cmp(&a.datetime));

    // Descending timestamps give non-increasing local dates, so each day is
    // a contiguous run and buckets form in newest-first order.
    let mut groups: Vec<DayGroup> = Vec::new();
    for drink in sorted {
        let date = drink.datetime.with_timezone(&Local).date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.drinks.push(drink),
            _ => groups.push(DayGroup {
                date,
                label: format_day_label(date),
                drinks: vec![drink],
            }),
        }
    }
    groups
}

/// Format a day header like "5 August 2026"
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Format an event time relative to `now`
///
/// "Today, HH:MM" on the same local calendar day, "Yesterday, HH:MM" one
/// day earlier, otherwise "5 Aug, HH:MM".
pub fn format_relative_label(datetime: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let local = datetime.with_timezone(&Local);
    let today = now.with_timezone(&Local).date_naive();
    let time = local.format("%H:%M");

    if local.date_naive() == today {
        format!("Today, {}", time)
    } else if Some(local.date_naive()) == today.pred_opt() {
        format!("Yesterday, {}", time)
    } else {
        local.format("%-d %b, %H:%M").to_string()
    }
}
