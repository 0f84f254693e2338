//! Booking-site navigation: venue enumeration and the per-venue,
//! four-week availability walk.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use fantoccini::Locator;
use tracing::{debug, info};

use crate::browser::{Browser, ELEMENT_WAIT, PAGE_WAIT};
use crate::parser::parse_week_table;
use crate::types::{Slot, Venue};

/// Calendar weeks scanned per venue, today's week included
pub const WEEKS_PER_VENUE: usize = 4;

/// Dropdown value of the "please choose" sentinel option
const VENUE_SENTINEL: &str = "0";

const DATE_INPUT: Locator<'static> = Locator::Id("daystart-home");
const VENUE_SELECT: Locator<'static> = Locator::Id("bname-home");
const SEARCH_BUTTON: Locator<'static> = Locator::Id("btn-go");
const CALENDAR_TABLE: Locator<'static> = Locator::Css("table.calendar");
const WEEK_TABLE: Locator<'static> = Locator::Css("table#week-info");
const WEEK_TABLE_ROWS: Locator<'static> = Locator::Css("table#week-info tbody tr");
const NEXT_WEEK_BUTTON: Locator<'static> = Locator::Id("next-week");

/// Purpose-selector label for baseball
const BASEBALL_LABEL: &str = "野球";

/// Load the home page and read the venue dropdown.
///
/// Sets the search start date and the baseball purpose first, since the
/// venue list only populates once a purpose is chosen. Errors here are not
/// guarded per-venue; they abort the run and go through the retry wrapper.
pub async fn fetch_venues(browser: &Browser, base_url: &str, date: NaiveDate) -> Result<Vec<Venue>> {
    browser.goto(base_url).await?;
    browser.wait_for(DATE_INPUT, ELEMENT_WAIT).await?;
    browser
        .set_value_by_script("#daystart-home", &date.format("%Y-%m-%d").to_string())
        .await?;

    let selected = browser
        .select_option("#purpose-home", |_, text| text == BASEBALL_LABEL)
        .await?;
    if !selected {
        return Err(anyhow!("purpose selector has no {} option", BASEBALL_LABEL));
    }

    browser.wait_for(VENUE_SELECT, ELEMENT_WAIT).await?;
    let mut venues = Vec::new();
    for option in browser.find_all(Locator::Css("#bname-home option")).await? {
        let value = option.attr("value").await?.unwrap_or_default();
        if value == VENUE_SENTINEL {
            continue;
        }
        let name = option.text().await?.trim().to_string();
        venues.push(Venue { name, value });
    }
    info!("Found {} venues", venues.len());
    Ok(venues)
}

/// Navigate back to the home page and wait until it is usable again; the
/// reset between venues that keeps one failure from poisoning the next.
pub async fn return_home(browser: &Browser, base_url: &str) -> Result<()> {
    browser.goto(base_url).await?;
    browser.wait_for(DATE_INPUT, ELEMENT_WAIT).await?;
    debug!("Back on the home page");
    Ok(())
}

/// Scrape one venue's availability across [`WEEKS_PER_VENUE`] weeks.
///
/// Expects the session to be on the home page. Advancing the calendar has
/// no completion event, so each pagination waits for the week table's
/// markup to differ from a pre-click snapshot.
pub async fn venue_availability(browser: &Browser, venue: &Venue) -> Result<Vec<Slot>> {
    info!("Searching availability for {}", venue.name);

    browser.wait_for(VENUE_SELECT, ELEMENT_WAIT).await?;
    let selected = browser
        .select_option("#bname-home", |value, _| value == venue.value)
        .await?;
    if !selected {
        return Err(anyhow!("venue option {} not found in dropdown", venue.value));
    }

    let before_url = browser.current_url().await?;
    let search = browser.wait_for(SEARCH_BUTTON, ELEMENT_WAIT).await?;
    search.click().await?;
    browser.wait_for_url_change(&before_url, PAGE_WAIT).await?;

    browser.wait_for(CALENDAR_TABLE, ELEMENT_WAIT).await?;
    browser.wait_for(WEEK_TABLE_ROWS, ELEMENT_WAIT).await?;

    let mut slots = Vec::new();
    for week in 0..WEEKS_PER_VENUE {
        let page = browser.page_source().await?;
        slots.extend(
            parse_week_table(&page)
                .with_context(|| format!("week {} of {}", week + 1, venue.name))?,
        );

        if week + 1 < WEEKS_PER_VENUE {
            let snapshot = browser.outer_html(WEEK_TABLE).await?;
            browser.wait_for(NEXT_WEEK_BUTTON, ELEMENT_WAIT).await?;
            browser.click_by_script("#next-week").await?;
            browser
                .wait_for_markup_change(WEEK_TABLE, &snapshot, PAGE_WAIT)
                .await?;
            debug!("Advanced to week {}", week + 2);
        }
    }
    info!("{}: {} open slots", venue.name, slots.len());
    Ok(slots)
}
