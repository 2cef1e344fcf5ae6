use crate::error::{DailyError, RecordRef, Result};
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

pub fn by_id<S: RecordStore>(store: &mut S, id: &Uuid) -> Result<bool> {
    let removed = store.delete(id)?;
    if removed {
        info!("deleted entry {}", id);
    }
    Ok(removed)
}

pub fn by_date<S: RecordStore>(store: &mut S, entry_date: NaiveDate) -> Result<bool> {
    let record = store
        .get_by_date(entry_date)?
        .ok_or(DailyError::NotFound(RecordRef::Date(entry_date)))?;
    by_id(store, &record.id)
}
