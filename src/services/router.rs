//! Turns bot commands into replies.
//!
//! Every entry point returns a finished [`Reply`]: usage mistakes and
//! upstream failures are converted to user-facing text here, so callers
//! only have to deliver it.

use crate::models::pagination::{PageWindow, PagerAction, COUNTRIES_PAGE_SIZE};
use crate::services::location::{LocationApi, LocationError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

pub const WELCOME_TEXT: &str = "Welcome! Use /countries, /states <country_code>, or /cities <country_code> <state_code> to fetch location data.";
pub const COUNTRIES_USAGE: &str = "Usage: /countries [page]";
pub const STATES_USAGE: &str = "Usage: /states <country_code>";
pub const CITIES_USAGE: &str = "Usage: /cities <country_code> <state_code>";

/// Longest text Telegram accepts in one message, in UTF-16 code units.
pub const MESSAGE_LIMIT: usize = 4096;

/// Room kept free for the "(+N more)" line of a truncated listing.
const TRUNCATION_RESERVE: usize = 32;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("Location lookup failed: {0}")]
    Location(#[from] LocationError),
}

/// Text to show in the chat plus the pager buttons to attach, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub pager: Vec<PagerAction>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pager: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct CommandRouter {
    locations: Arc<dyn LocationApi>,
    page_size: usize,
}

impl CommandRouter {
    pub fn new(locations: Arc<dyn LocationApi>) -> Self {
        Self {
            locations,
            page_size: COUNTRIES_PAGE_SIZE,
        }
    }

    pub fn start(&self) -> Reply {
        Reply::text(WELCOME_TEXT)
    }

    /// `/countries [page]`
    pub async fn countries(&self, args: &str) -> Reply {
        let result = match parse_page(args) {
            Ok(page) => self.render_countries(page).await,
            Err(e) => Err(e),
        };
        settle(result, "countries")
    }

    /// Same listing as `/countries`, used when a pager button is pressed.
    pub async fn countries_page(&self, page: u32) -> Reply {
        settle(self.render_countries(page).await, "countries")
    }

    /// `/states <country_code>`
    pub async fn states(&self, args: &str) -> Reply {
        settle(self.render_states(args).await, "states")
    }

    /// `/cities <country_code> <state_code>`
    pub async fn cities(&self, args: &str) -> Reply {
        settle(self.render_cities(args).await, "cities")
    }

    async fn render_countries(&self, page: u32) -> Result<Reply, CommandError> {
        let countries = self.locations.list_countries().await?;
        let window = PageWindow::new(page, self.page_size, countries.len())
            .ok_or(CommandError::Usage(COUNTRIES_USAGE))?;

        let lines: Vec<String> = window.slice(&countries).iter().map(|c| c.label()).collect();
        let text = listing(&format!("Countries (Page {}):", page), &lines);
        let pager = window.previous().into_iter().chain(window.next()).collect();

        info!(
            "Listing countries page {} ({} of {})",
            page,
            lines.len(),
            countries.len()
        );

        Ok(Reply { text, pager })
    }

    async fn render_states(&self, args: &str) -> Result<Reply, CommandError> {
        let [country_code] = split_codes::<1>(args).ok_or(CommandError::Usage(STATES_USAGE))?;

        let mut states = self.locations.list_states(country_code).await?;
        states.sort_by(|a, b| a.name.cmp(&b.name));

        let lines: Vec<String> = states.iter().map(|s| s.label()).collect();
        info!("Listing {} states of {}", lines.len(), country_code);

        Ok(Reply::text(listing(
            &format!("States in {}:", country_code),
            &lines,
        )))
    }

    async fn render_cities(&self, args: &str) -> Result<Reply, CommandError> {
        let [country_code, state_code] =
            split_codes::<2>(args).ok_or(CommandError::Usage(CITIES_USAGE))?;

        let cities = self
            .locations
            .list_cities(country_code, state_code)
            .await?;

        let lines: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        info!(
            "Listing {} cities of {}/{}",
            lines.len(),
            country_code,
            state_code
        );

        Ok(Reply::text(listing(
            &format!("Cities in {}, {}:", state_code, country_code),
            &lines,
        )))
    }
}

fn settle(result: Result<Reply, CommandError>, what: &str) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(CommandError::Usage(usage)) => Reply::text(usage),
        Err(CommandError::Location(e)) => {
            if e.is_transport() {
                error!("Failed to reach location API for {}: {:?}", what, e);
            } else {
                error!("Failed to fetch {}: {}", what, e);
            }
            Reply::text(format!(
                "Failed to fetch {}. Please try again later.",
                what
            ))
        }
    }
}

/// Exactly `N` whitespace separated arguments.
fn split_args<const N: usize>(args: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    parts.try_into().ok()
}

/// Like [`split_args`], but every argument must be usable as a single URL
/// path segment. `.` and `..` would be collapsed into a different route.
fn split_codes<const N: usize>(args: &str) -> Option<[&str; N]> {
    split_args::<N>(args).filter(|codes| !codes.iter().any(|c| matches!(*c, "." | "..")))
}

/// Header followed by one line per entry. Entries that would push the text
/// past [`MESSAGE_LIMIT`] are dropped and counted in a closing line.
fn listing<S: AsRef<str>>(header: &str, lines: &[S]) -> String {
    let full = format!(
        "{}\n{}",
        header,
        lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join("\n")
    );
    if utf16_len(&full) <= MESSAGE_LIMIT {
        return full;
    }

    let budget = MESSAGE_LIMIT.saturating_sub(TRUNCATION_RESERVE);
    let mut text = header.to_string();
    let mut used = utf16_len(&text);
    let mut shown = 0;
    for line in lines {
        let line: &str = line.as_ref();
        let cost = 1 + utf16_len(line);
        if used + cost > budget {
            break;
        }
        text.push('\n');
        text.push_str(line);
        used += cost;
        shown += 1;
    }

    text.push_str(&format!("\n(+{} more)", lines.len() - shown));
    text
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn parse_page(args: &str) -> Result<u32, CommandError> {
    match args.split_whitespace().collect::<Vec<_>>().as_slice() {
        [] => Ok(1),
        [page] => match page.parse::<u32>() {
            Ok(page) if page > 0 => Ok(page),
            _ => Err(CommandError::Usage(COUNTRIES_USAGE)),
        },
        _ => Err(CommandError::Usage(COUNTRIES_USAGE)),
    }
}
