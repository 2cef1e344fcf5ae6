use crate::error::{DailyError, RecordRef, Result};
use crate::model::Record;
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

pub fn by_id<S: RecordStore>(store: &mut S, id: &Uuid, new_content: &str) -> Result<Record> {
    let record = store
        .get_by_id(id)?
        .ok_or(DailyError::NotFound(RecordRef::Id(*id)))?;
    apply(store, record, new_content)
}

pub fn by_date<S: RecordStore>(
    store: &mut S,
    entry_date: NaiveDate,
    new_content: &str,
) -> Result<Record> {
    let record = store
        .get_by_date(entry_date)?
        .ok_or(DailyError::NotFound(RecordRef::Date(entry_date)))?;
    apply(store, record, new_content)
}

fn apply<S: RecordStore>(store: &mut S, record: Record, new_content: &str) -> Result<Record> {
    let updated = record.with_content(new_content)?;
    let saved = store.save(&updated)?;
    info!("updated entry {} for {}", saved.id, saved.entry_date);
    Ok(saved)
}
