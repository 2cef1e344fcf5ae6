//! # Pagination Cursors
//!
//! A [`Cursor`] marks a position in the listing order `(entry_date DESC,
//! created_at DESC)`: the ordering key of the last record a page returned.
//! The next page starts strictly after it.
//!
//! Callers only ever see the encoded token and must hand it back unmodified.
//! The token is standard base64 of `"<YYYY-MM-DD>|<RFC 3339 timestamp>"`. The
//! `|` separator cannot appear in either field, so a valid token splits into
//! exactly two parts.
//!
//! Timestamps carry microsecond precision, the precision records are stored
//! with. Decoding never panics: every malformed token yields a [`CursorError`].

use crate::model::{format_timestamp, parse_timestamp, Record};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use std::fmt;
use thiserror::Error;

const SEPARATOR: char = '|';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is not valid base64")]
    Base64,

    #[error("cursor is not valid UTF-8")]
    Utf8,

    #[error("cursor must contain exactly one '|' separator")]
    Separator,

    #[error("invalid date in cursor: {0}")]
    Date(String),

    #[error("invalid timestamp in cursor: {0}")]
    Timestamp(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Cursor {
    pub fn new(entry_date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            entry_date,
            created_at,
        }
    }

    /// Cursor positioned on `record`.
    pub fn for_record(record: &Record) -> Self {
        Self::new(record.entry_date, record.created_at)
    }

    pub fn encode(&self) -> String {
        let raw = format!(
            "{}{}{}",
            self.entry_date,
            SEPARATOR,
            format_timestamp(&self.created_at)
        );
        STANDARD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|_| CursorError::Base64)?;
        let raw = String::from_utf8(bytes).map_err(|_| CursorError::Utf8)?;

        let (date_part, ts_part) = raw.split_once(SEPARATOR).ok_or(CursorError::Separator)?;
        if ts_part.contains(SEPARATOR) {
            return Err(CursorError::Separator);
        }

        let entry_date = date_part
            .parse::<NaiveDate>()
            .map_err(|_| CursorError::Date(date_part.to_string()))?;
        let created_at = parse_timestamp(ts_part)
            .ok_or_else(|| CursorError::Timestamp(ts_part.to_string()))?
            .trunc_subsecs(6);

        Ok(Self::new(entry_date, created_at))
    }

    /// The seek predicate: true when a record with this ordering key sorts
    /// strictly after the cursor in descending order.
    pub fn precedes(&self, entry_date: NaiveDate, created_at: &DateTime<Utc>) -> bool {
        entry_date < self.entry_date
            || (entry_date == self.entry_date && *created_at < self.created_at)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
