//! Renders the availability report pushed to the LINE group.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Slot, VenueSlots, normalize_digits};

/// Matches a `"{day}({weekday})"` date label; either parenthesis width
static DATE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[(（](.)[)）]").expect("static regex"));

/// Leading numeral (either width) of a time label
static LEADING_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([０-９0-9]+)").expect("static regex"));

const REPORT_HEADER: &str = "📣 グラウンドの空き情報";

/// Integer sort key from a time label's leading numeral, 0 when absent.
fn time_sort_key(slot: &Slot) -> u32 {
    LEADING_NUMERAL
        .captures(&slot.time)
        .and_then(|c| normalize_digits(&c[1]).parse().ok())
        .unwrap_or(0)
}

/// Formats one slot as a report line.
///
/// Day and weekday are re-extracted from the date label; a label that does
/// not match the expected pattern is used whole as the day, with an empty
/// weekday. Time labels are digit-normalized before rendering.
fn slot_line(slot: &Slot) -> String {
    let (day, weekday) = match DATE_LABEL.captures(&slot.date) {
        Some(c) => (c[1].to_string(), c[2].to_string()),
        None => (slot.date.clone(), String::new()),
    };
    let time = normalize_digits(&slot.time);
    format!("・{day}日({weekday}) {time}：{}枠", slot.status)
}

/// Render the full report.
///
/// Venues without any open slot are omitted entirely. Within a venue, slots
/// sort by the raw date label (lexicographic, so "12(日)" orders before
/// "2(日)" — a known quirk, kept deliberately) and then by the numeric time
/// key. Pure and deterministic for a given input.
pub fn make_report(results: &[VenueSlots]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push_str("\n\n");
    for entry in results {
        if entry.slots.is_empty() {
            continue;
        }
        let mut slots: Vec<&Slot> = entry.slots.iter().collect();
        slots.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| time_sort_key(a).cmp(&time_sort_key(b)))
        });
        out.push_str(&format!("【{}】\n", entry.venue.name));
        for slot in slots {
            out.push_str(&slot_line(slot));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
