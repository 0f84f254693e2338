// Unit tests for types module

use super::*;

#[test]
fn test_normalize_digits_full_width() {
    assert_eq!(normalize_digits("０１２３４５６７８９"), "0123456789");
    assert_eq!(normalize_digits("１０時"), "10時");
    assert_eq!(normalize_digits("９時〜１２時"), "9時〜12時");
}

#[test]
fn test_normalize_digits_ascii_passthrough() {
    // Already-ASCII labels come back byte-for-byte identical
    assert_eq!(normalize_digits("10時"), "10時");
    assert_eq!(normalize_digits("abc123"), "abc123");
    assert_eq!(normalize_digits(""), "");
}

#[test]
fn test_normalize_digits_mixed_widths() {
    assert_eq!(normalize_digits("１0時３0分"), "10時30分");
}

#[test]
fn test_venue_equality() {
    let a = Venue {
        name: "中央公園".to_string(),
        value: "12".to_string(),
    };
    let b = Venue {
        name: "中央公園".to_string(),
        value: "12".to_string(),
    };
    assert_eq!(a, b);
}

#[test]
fn test_slot_fields() {
    let slot = Slot {
        date: "12(土)".to_string(),
        time: "１０時".to_string(),
        status: "空き".to_string(),
    };
    assert_eq!(slot.date, "12(土)");
    assert_eq!(normalize_digits(&slot.time), "10時");
}
