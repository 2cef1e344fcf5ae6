//! # Record Service
//!
//! [`RecordService`] is the single entry point for every journal operation,
//! whichever UI sits in front of it. It is a **thin facade**: each method
//! dispatches to the matching function in [`crate::commands`], where the
//! business rules live.
//!
//! Callers must not reach past the service to the store. The one-entry-per-date
//! and non-empty-content rules are only checked here; a store accepts anything.
//!
//! ## Generic Over RecordStore
//!
//! `RecordService<S: RecordStore>` works with any backend:
//! - `RecordService<FileStore>` and `RecordService<DocumentStore>` in production
//! - `RecordService<DocumentStore>` backed by `DocumentStore::in_memory()` in tests

use crate::commands::{self, migrate::MigrationReport};
use crate::error::Result;
use crate::model::Record;
use crate::store::{ListQuery, Page, RecordStore};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

pub struct RecordService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&mut self, entry_date: NaiveDate, content: &str) -> Result<Record> {
        commands::create::run(&mut self.store, entry_date, content)
    }

    pub fn update(&mut self, id: &Uuid, new_content: &str) -> Result<Record> {
        commands::update::by_id(&mut self.store, id, new_content)
    }

    pub fn update_by_date(&mut self, entry_date: NaiveDate, new_content: &str) -> Result<Record> {
        commands::update::by_date(&mut self.store, entry_date, new_content)
    }

    pub fn list(&self, query: &ListQuery) -> Result<Page> {
        commands::list::run(&self.store, query)
    }

    /// Every record matching `query`, following cursors to the end.
    pub fn list_all(&self, query: &ListQuery) -> Result<Vec<Record>> {
        commands::list::all(&self.store, query)
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<bool> {
        commands::delete::by_id(&mut self.store, id)
    }

    pub fn delete_by_date(&mut self, entry_date: NaiveDate) -> Result<bool> {
        commands::delete::by_date(&mut self.store, entry_date)
    }

    pub fn get_by_id(&self, id: &Uuid) -> Result<Option<Record>> {
        self.store.get_by_id(id)
    }

    pub fn get_by_date(&self, entry_date: NaiveDate) -> Result<Option<Record>> {
        self.store.get_by_date(entry_date)
    }

    pub fn exists_on_date(&self, entry_date: NaiveDate) -> Result<bool> {
        self.store.exists_on_date(entry_date)
    }

    /// Today's entry, by local date.
    pub fn today(&self) -> Result<Option<Record>> {
        self.store.get_by_date(Local::now().date_naive())
    }

    /// Copy every record into `target`, walking pages of `page_size`.
    pub fn migrate_into<T: RecordStore>(
        &self,
        target: &mut T,
        page_size: usize,
    ) -> Result<MigrationReport> {
        commands::migrate::run(&self.store, target, page_size)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
