// Unit tests for the week-table parser, against synthetic site markup.

use super::*;
use pretty_assertions::assert_eq;

fn header_cell(day: &str, weekday: &str) -> String {
    format!(
        "<th><div><span>{day}</span></div><div><span class=\"pc-text\">{weekday}</span></div></th>"
    )
}

fn open_cell(status: &str) -> String {
    format!("<td><img src=\"o.png\" alt=\"空き\"><span>{status}</span></td>")
}

const CLOSED_CELL: &str = "<td><img src=\"x.png\" alt=\"予約済み\"></td>";
const EMPTY_CELL: &str = "<td></td>";

/// Builds a page with a three-column week table: Friday, Saturday, Sunday.
fn week_page(rows: &[(&str, [String; 3])]) -> String {
    let mut html = String::from(
        "<html><body><table id=\"week-info\"><thead><tr><th>時間帯</th>",
    );
    html.push_str(&header_cell("11", "金"));
    html.push_str(&header_cell("12", "土"));
    html.push_str(&header_cell("13", "日"));
    html.push_str("</tr></thead><tbody>");
    for (time, cells) in rows {
        html.push_str(&format!("<tr><th>{time}</th>"));
        for cell in cells {
            html.push_str(cell);
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></body></html>");
    html
}

#[test]
fn test_missing_table_yields_empty() {
    let slots = parse_week_table("<html><body><p>no calendar</p></body></html>").unwrap();
    assert!(slots.is_empty());
}

#[test]
fn test_weekend_only_extraction() {
    // Friday column is fully open but must contribute nothing
    let page = week_page(&[(
        "９時",
        [open_cell("3"), open_cell("2"), CLOSED_CELL.to_string()],
    )]);
    let slots = parse_week_table(&page).unwrap();
    assert_eq!(
        slots,
        vec![Slot {
            date: "12(土)".to_string(),
            time: "９時".to_string(),
            status: "2".to_string(),
        }]
    );
}

#[test]
fn test_column_major_then_row_major_order() {
    let page = week_page(&[
        (
            "９時",
            [EMPTY_CELL.to_string(), open_cell("1"), open_cell("4")],
        ),
        (
            "１３時",
            [EMPTY_CELL.to_string(), open_cell("2"), CLOSED_CELL.to_string()],
        ),
    ]);
    let slots = parse_week_table(&page).unwrap();
    let keys: Vec<(&str, &str, &str)> = slots
        .iter()
        .map(|s| (s.date.as_str(), s.time.as_str(), s.status.as_str()))
        .collect();
    // All of Saturday's rows before any of Sunday's
    assert_eq!(
        keys,
        vec![
            ("12(土)", "９時", "1"),
            ("12(土)", "１３時", "2"),
            ("13(日)", "９時", "4"),
        ]
    );
}

#[test]
fn test_weekday_marker_never_emits() {
    // Availability markers in weekday columns are ignored for any input
    for status in ["1", "5", "空き"] {
        let page = week_page(&[(
            "１０時",
            [
                open_cell(status),
                CLOSED_CELL.to_string(),
                CLOSED_CELL.to_string(),
            ],
        )]);
        assert!(parse_week_table(&page).unwrap().is_empty());
    }
}

#[test]
fn test_status_defaults_when_span_absent() {
    let page = week_page(&[(
        "１０時",
        [
            EMPTY_CELL.to_string(),
            "<td><img alt=\"空き\"></td>".to_string(),
            EMPTY_CELL.to_string(),
        ],
    )]);
    let slots = parse_week_table(&page).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].status, "空き");
}

#[test]
fn test_empty_status_span_kept_verbatim() {
    let page = week_page(&[(
        "１０時",
        [
            EMPTY_CELL.to_string(),
            open_cell(""),
            EMPTY_CELL.to_string(),
        ],
    )]);
    let slots = parse_week_table(&page).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].status, "");
}

#[test]
fn test_header_cell_without_two_divs_is_excluded() {
    let mut html = String::from(
        "<html><body><table id=\"week-info\"><thead><tr><th>時間帯</th><th><div><span>12</span></div></th>",
    );
    html.push_str(&header_cell("13", "日"));
    html.push_str("</tr></thead><tbody><tr><th>９時</th>");
    html.push_str(&open_cell("1"));
    html.push_str(&open_cell("2"));
    html.push_str("</tr></tbody></table></body></html>");
    let slots = parse_week_table(&html).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].date, "13(日)");
    assert_eq!(slots[0].status, "2");
}

#[test]
fn test_short_body_row_fails_loudly() {
    // Sunday column exists in the header but the row has only two cells
    let mut html = String::from(
        "<html><body><table id=\"week-info\"><thead><tr><th>時間帯</th>",
    );
    html.push_str(&header_cell("11", "金"));
    html.push_str(&header_cell("12", "土"));
    html.push_str(&header_cell("13", "日"));
    html.push_str("</tr></thead><tbody><tr><th>９時</th>");
    html.push_str(EMPTY_CELL);
    html.push_str(EMPTY_CELL);
    html.push_str("</tr></tbody></table></body></html>");
    assert!(parse_week_table(&html).is_err());
}

#[test]
fn test_missing_tbody_yields_empty() {
    let html = "<html><body><table id=\"week-info\"><thead><tr><th>時間帯</th></tr></thead></table></body></html>";
    assert!(parse_week_table(html).unwrap().is_empty());
}

#[test]
fn test_full_width_day_number_accepted() {
    let mut html = String::from(
        "<html><body><table id=\"week-info\"><thead><tr><th>時間帯</th>",
    );
    html.push_str(&header_cell("１２", "土"));
    html.push_str("</tr></thead><tbody><tr><th>９時</th>");
    html.push_str(&open_cell("1"));
    html.push_str("</tr></tbody></table></body></html>");
    let slots = parse_week_table(&html).unwrap();
    assert_eq!(slots[0].date, "１２(土)");
}
