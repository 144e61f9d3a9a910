//! Page arithmetic for listings and the callback payload that carries the
//! requested page between the bot and the chat client.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const COUNTRIES_PAGE_SIZE: usize = 50;

/// A 1-based page over `total` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    /// Returns `None` for page 0 or an empty page size.
    pub fn new(page: u32, page_size: usize, total: usize) -> Option<Self> {
        if page == 0 || page_size == 0 {
            return None;
        }
        Some(Self {
            page,
            page_size,
            total,
        })
    }

    pub fn start(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size)
    }

    pub fn end(&self) -> usize {
        (self.page as usize).saturating_mul(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.start() > 0
    }

    pub fn has_next(&self) -> bool {
        self.end() < self.total
    }

    /// The records visible on this page. Empty past the last page.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = self.start().min(records.len());
        let end = self.end().min(records.len());
        &records[start..end]
    }

    pub fn previous(&self) -> Option<PagerAction> {
        self.has_previous().then(|| PagerAction::Prev(self.page - 1))
    }

    pub fn next(&self) -> Option<PagerAction> {
        self.has_next().then(|| PagerAction::Next(self.page + 1))
    }
}

/// Button press on a pager, holding the page to show next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Prev(u32),
    Next(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PagerActionError {
    #[error("Unknown pager action: {0}")]
    UnknownAction(String),
    #[error("Invalid page in pager payload: {0}")]
    InvalidPage(String),
}

impl PagerAction {
    pub fn target_page(&self) -> u32 {
        match self {
            PagerAction::Prev(page) | PagerAction::Next(page) => *page,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PagerAction::Prev(_) => "Previous",
            PagerAction::Next(_) => "Next",
        }
    }
}

impl fmt::Display for PagerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerAction::Prev(page) => write!(f, "prev_{}", page),
            PagerAction::Next(page) => write!(f, "next_{}", page),
        }
    }
}

impl FromStr for PagerAction {
    type Err = PagerActionError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let (action, page) = data
            .split_once('_')
            .ok_or_else(|| PagerActionError::UnknownAction(data.to_string()))?;

        let page: u32 = match page.parse() {
            Ok(page) if page > 0 => page,
            _ => return Err(PagerActionError::InvalidPage(page.to_string())),
        };

        match action {
            "prev" => Ok(PagerAction::Prev(page)),
            "next" => Ok(PagerAction::Next(page)),
            other => Err(PagerActionError::UnknownAction(other.to_string())),
        }
    }
}
