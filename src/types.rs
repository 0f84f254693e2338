/// One selectable ground in the booking site's venue dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    /// Display name of the ground
    pub name: String,
    /// The dropdown option's `value` attribute, used to re-select it
    pub value: String,
}

/// One bookable time range on one date, as read from the weekly calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Date label, `"{day}({weekday})"` as rendered by the site
    pub date: String,
    /// Time label from the row header, possibly in full-width numerals
    pub time: String,
    /// Remaining-capacity text from the cell, verbatim; `空き` only when the
    /// cell has no text span at all
    pub status: String,
}

/// Scrape result for one venue, kept in dropdown enumeration order
#[derive(Debug, Clone)]
pub struct VenueSlots {
    pub venue: Venue,
    pub slots: Vec<Slot>,
}

/// Replace full-width digits (`０`..`９`) with their ASCII equivalents.
///
/// The site mixes numeral widths in time labels; report sorting and
/// rendering both expect plain ASCII digits.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
