//! # Storage Layer
//!
//! This module defines the storage abstraction for daily. The [`RecordStore`]
//! trait is the contract every backend implements; the service layer is written
//! against the trait only.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per record in a data directory.
//! - [`document::DocumentStore`]: a document collection in an embedded SQLite
//!   database, with indexed columns for the sort and filter keys.
//!
//! Both backends must return the same pages and the same cursor tokens for the
//! same data and the same query. The shared parts of the pagination algorithm
//! live in [`page`] so there is one definition of the seek predicate and of
//! next-cursor production. `tests/store_conformance.rs` runs one suite against
//! both.
//!
//! ## What Stores Do NOT Do
//!
//! - Enforce one-record-per-date. That rule belongs to the service; stores
//!   accept whatever they are given.
//! - Assign ids or timestamps. Records arrive fully formed.
//! - Lock, batch or retry. A single `save` or `delete` is atomic on its own
//!   and nothing spans more than one record.
//!
//! ## Consistency
//!
//! A cursor only remembers a position in the ordering, not a snapshot.
//! Records written or deleted between two page fetches may be skipped or, if
//! their ordering key moves, seen twice.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── entries/
//! │   └── entry-{uuid}.json   # FileStore
//! └── daily.db                # DocumentStore
//! ```

use crate::error::Result;
use crate::model::Record;
use chrono::NaiveDate;
use uuid::Uuid;

pub mod document;
pub mod fs;
pub mod page;

pub use page::{ListQuery, Page};

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Insert or replace the record with the same id.
    fn save(&mut self, record: &Record) -> Result<Record>;

    fn get_by_date(&self, entry_date: NaiveDate) -> Result<Option<Record>>;

    fn get_by_id(&self, id: &Uuid) -> Result<Option<Record>>;

    /// One page of records, newest first, plus the cursor for the next page.
    fn list(&self, query: &ListQuery) -> Result<Page>;

    /// Remove a record. Returns true iff it existed.
    fn delete(&mut self, id: &Uuid) -> Result<bool>;

    fn exists_on_date(&self, entry_date: NaiveDate) -> Result<bool>;
}

/// Lets callers pick a backend at runtime and still use the generic service.
impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn save(&mut self, record: &Record) -> Result<Record> {
        (**self).save(record)
    }

    fn get_by_date(&self, entry_date: NaiveDate) -> Result<Option<Record>> {
        (**self).get_by_date(entry_date)
    }

    fn get_by_id(&self, id: &Uuid) -> Result<Option<Record>> {
        (**self).get_by_id(id)
    }

    fn list(&self, query: &ListQuery) -> Result<Page> {
        (**self).list(query)
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        (**self).delete(id)
    }

    fn exists_on_date(&self, entry_date: NaiveDate) -> Result<bool> {
        (**self).exists_on_date(entry_date)
    }
}
