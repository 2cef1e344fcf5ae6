//! Backend-independent pieces of cursor pagination.
//!
//! Every backend runs the same five steps: build the date filter, add the seek
//! predicate from the cursor, sort newest first, fetch `limit + 1`, then cut
//! the extra record off and turn the last kept one into the next cursor. The
//! backends only differ in *where* steps 1-3 run (in Rust for the file store,
//! in SQL for the document store); steps 4-5 always go through [`finish_page`].

use crate::cursor::Cursor;
use crate::error::{DailyError, Result};
use crate::model::Record;
use chrono::NaiveDate;
use log::warn;
use std::cmp::Ordering;

/// Parameters of a `list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Opaque token from a previous [`Page::next_cursor`].
    pub cursor: Option<String>,
    /// Maximum number of records in the page. Must be positive.
    pub limit: usize,
    /// Inclusive lower bound on `entry_date`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on `entry_date`.
    pub end_date: Option<NaiveDate>,
}

impl ListQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            cursor: None,
            limit,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_range(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }
}

/// One page of records, newest first.
///
/// `next_cursor` is `None` exactly when the matching set is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<Record>,
    pub next_cursor: Option<String>,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Filter derived from a [`ListQuery`]: date range plus the seek position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub after: Option<Cursor>,
    pub limit: usize,
}

impl PageFilter {
    /// Validate the query and decode its cursor.
    ///
    /// A cursor that fails to decode is dropped and listing restarts from the
    /// first page.
    pub fn from_query(query: &ListQuery) -> Result<Self> {
        if query.limit == 0 {
            return Err(DailyError::Validation(
                "page limit must be at least 1".to_string(),
            ));
        }

        let after = match query.cursor.as_deref() {
            None => None,
            Some(token) => match Cursor::decode(token) {
                Ok(cursor) => Some(cursor),
                Err(err) => {
                    warn!("ignoring malformed cursor ({}), listing from the first page", err);
                    None
                }
            },
        };

        Ok(Self {
            start_date: query.start_date,
            end_date: query.end_date,
            after,
            limit: query.limit,
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(start) = self.start_date {
            if record.entry_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.entry_date > end {
                return false;
            }
        }
        match &self.after {
            Some(cursor) => cursor.precedes(record.entry_date, &record.created_at),
            None => true,
        }
    }

    /// How many records a backend should fetch: one more than the page holds.
    pub fn fetch_size(&self) -> usize {
        self.limit.saturating_add(1)
    }
}

/// Listing order: `entry_date` DESC, `created_at` DESC, then `id` DESC so that
/// identical keys still come out in a fixed order.
pub fn newest_first(a: &Record, b: &Record) -> Ordering {
    b.entry_date
        .cmp(&a.entry_date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Turn an over-fetched, already sorted result into a page.
pub fn finish_page(mut records: Vec<Record>, limit: usize) -> Page {
    if records.len() <= limit {
        return Page {
            records,
            next_cursor: None,
        };
    }

    records.truncate(limit);
    let next_cursor = records.last().map(|last| Cursor::for_record(last).encode());
    Page {
        records,
        next_cursor,
    }
}
