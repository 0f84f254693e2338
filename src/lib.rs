//! # ground-check
//!
//! Single-run checker for open baseball-ground slots on a municipal
//! facility-booking site. Drives a headless Chrome session over WebDriver,
//! walks every venue across four calendar weeks, renders a weekend-only
//! availability report, and pushes it to a LINE group. Optionally captures
//! the opponent-recruitment page and attaches it as an image, hosted via a
//! git commit and its raw-content URL.
//!
//! Built to run from a scheduler: scrape, format, notify, exit. One
//! browser session, sequential venues, and a flat whole-run retry as the
//! only resilience mechanism.

/// Headless browser session and bounded DOM waits
pub mod browser;

/// Environment-sourced configuration
pub mod config;

/// chromedriver process management
pub mod driver;

/// Error classification and exit codes
pub mod errors;

/// LINE Messaging API push client
pub mod notify;

/// Weekly calendar table parser
pub mod parser;

/// Run orchestration and the retry wrapper
pub mod pipeline;

/// Screenshot hosting via git raw-content URLs
pub mod publish;

/// Recruitment-page screenshot capture
pub mod recruitment;

/// Report rendering
pub mod report;

/// Booking-site navigation and scraping
pub mod scrape;

/// Core record types
pub mod types;

pub use config::Config;
pub use pipeline::{RunOptions, run_once, run_with_retry};
pub use types::{Slot, Venue, VenueSlots};
