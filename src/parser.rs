//! Pure parser for the booking site's weekly calendar table.
//!
//! Input is a full page's serialized markup; output is the list of open
//! slots for the currently displayed week. Only Saturday and Sunday columns
//! are kept, per the weekend-only business rule.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::types::{Slot, normalize_digits};

static WEEK_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#week-info").expect("static selector"));
static THEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead").expect("static selector"));
static TBODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody").expect("static selector"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("static selector"));
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("static selector"));
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("static selector"));
static PC_TEXT_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.pc-text").expect("static selector"));
static OPEN_MARKER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[alt=\"空き\"]").expect("static selector"));

/// Alt text of the image the site renders in bookable cells
pub const OPEN_MARKER_ALT: &str = "空き";

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn is_day_number(s: &str) -> bool {
    let normalized = normalize_digits(s);
    !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_digit())
}

/// Extract per-column date labels from the header row.
///
/// The first column is a label column and is skipped. A kept column yields
/// `"{day}({weekday})"`; weekday columns yield an empty string, which marks
/// the column as excluded from extraction.
fn header_date_labels(table: ElementRef<'_>) -> Vec<String> {
    let mut labels = Vec::new();
    let Some(thead) = table.select(&THEAD).next() else {
        return labels;
    };
    for th in thead.select(&TH).skip(1) {
        let divs: Vec<ElementRef<'_>> = th.select(&DIV).collect();
        if divs.len() < 2 {
            labels.push(String::new());
            continue;
        }
        let day = divs[0]
            .select(&SPAN)
            .map(element_text)
            .find(|t| is_day_number(t))
            .unwrap_or_default();
        let weekday = divs[1]
            .select(&PC_TEXT_SPAN)
            .next()
            .map(element_text)
            .unwrap_or_default();
        if weekday == "土" || weekday == "日" {
            labels.push(format!("{day}({weekday})"));
        } else {
            labels.push(String::new());
        }
    }
    labels
}

/// Parse one rendered week of the `#week-info` calendar table.
///
/// Absence of the table yields an empty result, not an error: the site
/// renders no table at all for weeks with nothing bookable. A body row with
/// fewer cells than the header has columns is a hard error, so a misaligned
/// table can never produce misattributed slots.
pub fn parse_week_table(html: &str) -> Result<Vec<Slot>> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&WEEK_TABLE).next() else {
        return Ok(Vec::new());
    };

    let date_labels = header_date_labels(table);

    let Some(tbody) = table.select(&TBODY).next() else {
        return Ok(Vec::new());
    };
    let mut time_labels = Vec::new();
    let mut cell_matrix: Vec<Vec<ElementRef<'_>>> = Vec::new();
    for row in tbody.select(&TR) {
        let time = row.select(&TH).next().map(element_text).unwrap_or_default();
        time_labels.push(time);
        cell_matrix.push(row.select(&TD).collect());
    }

    let mut slots = Vec::new();
    for (col, date_label) in date_labels.iter().enumerate() {
        if date_label.is_empty() {
            continue;
        }
        for (row, cells) in cell_matrix.iter().enumerate() {
            let cell = cells.get(col).ok_or_else(|| {
                anyhow!(
                    "week table row {} has {} cells but header has {} columns",
                    row,
                    cells.len(),
                    date_labels.len()
                )
            })?;
            if cell.select(&OPEN_MARKER).next().is_none() {
                continue;
            }
            // Span text is taken verbatim, even when it is empty
            let status = cell
                .select(&SPAN)
                .next()
                .map(element_text)
                .unwrap_or_else(|| OPEN_MARKER_ALT.to_string());
            slots.push(Slot {
                date: date_label.clone(),
                time: time_labels[row].clone(),
                status,
            });
        }
    }
    Ok(slots)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;
