//! # Records
//!
//! A [`Record`] is one dated journal entry. The rules that make a record valid
//! live here so that every layer applies them the same way:
//!
//! - `content` is never empty once surrounding whitespace is trimmed, and it is
//!   stored trimmed.
//! - `id` and `created_at` are assigned once by [`Record::new`] and never change.
//! - `updated_at` starts equal to `created_at` and moves forward on every
//!   content change made through [`Record::with_content`].
//!
//! The one-entry-per-date rule needs to see the whole store, so it is enforced
//! by the service layer, not here.
//!
//! ## Timestamps
//!
//! Timestamps are truncated to microseconds when assigned. Both storage
//! backends and the pagination cursor carry them as fixed-width RFC 3339 text
//! (`2024-02-12T09:30:00.000000Z`), which round-trips exactly and sorts
//! lexicographically in time order.
//!
//! ## Stored form
//!
//! Records serialize through [`StoredRecord`]. Reading is lenient about data
//! written by older tools: a date-time in `entry_date` is reduced to its date,
//! and missing timestamps fall back to the current time.

use crate::error::{DailyError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of characters shown by the `Display` impl.
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord", into = "StoredRecord")]
pub struct Record {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Create a new record with a fresh id and timestamps.
    pub fn new(entry_date: NaiveDate, content: &str) -> Result<Self> {
        let content = normalize_content(content)?;
        let now = timestamp_now();
        Ok(Self {
            id: Uuid::new_v4(),
            entry_date,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the content, refreshing `updated_at`.
    ///
    /// Consumes the record and returns the new value. Copies held elsewhere
    /// (including the stored one) are unaffected until the result is saved.
    pub fn with_content(mut self, new_content: &str) -> Result<Self> {
        self.content = normalize_content(new_content)?;
        self.updated_at = timestamp_now();
        Ok(self)
    }

    pub fn is_today(&self) -> bool {
        self.entry_date == Local::now().date_naive()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Single-line preview of at most `max` characters, with `...` when cut.
    pub fn preview(&self, max: usize) -> String {
        let flat: String = self
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if flat.chars().count() > max {
            let cut: String = flat.chars().take(max).collect();
            format!("{}...", cut)
        } else {
            flat
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.entry_date, self.preview(PREVIEW_CHARS))
    }
}

/// Trim content and reject it if nothing is left.
pub fn normalize_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DailyError::Validation(
            "entry content cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Current time at the precision records are stored with.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 text for a timestamp (microseconds, `Z` suffix).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp. A timestamp without an offset is taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let parsed = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()?
            .and_utc(),
    };
    Some(parsed.trunc_subsecs(6))
}

/// Parse an ISO date, accepting a full date-time and keeping only its date.
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next().unwrap_or(s);
    date_part.parse().ok()
}

/// On-disk / in-database document shape of a [`Record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    pub entry_date: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<Record> for StoredRecord {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            entry_date: record.entry_date.to_string(),
            content: record.content,
            created_at: Some(format_timestamp(&record.created_at)),
            updated_at: Some(format_timestamp(&record.updated_at)),
        }
    }
}

impl TryFrom<StoredRecord> for Record {
    type Error = String;

    fn try_from(stored: StoredRecord) -> std::result::Result<Self, Self::Error> {
        let entry_date = parse_entry_date(&stored.entry_date)
            .ok_or_else(|| format!("invalid entry_date '{}'", stored.entry_date))?;

        let created_at = match stored.created_at.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| format!("invalid created_at '{}'", raw))?,
            None => {
                warn!(
                    "entry {} has no created_at, using current time",
                    stored.id
                );
                timestamp_now()
            }
        };
        let updated_at = match stored.updated_at.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| format!("invalid updated_at '{}'", raw))?,
            None => created_at,
        };

        Ok(Self {
            id: stored.id,
            entry_date,
            content: stored.content,
            created_at,
            updated_at,
        })
    }
}
