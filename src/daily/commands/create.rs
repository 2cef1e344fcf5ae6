use crate::error::{DailyError, Result};
use crate::model::Record;
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::info;

pub fn run<S: RecordStore>(store: &mut S, entry_date: NaiveDate, content: &str) -> Result<Record> {
    let record = Record::new(entry_date, content)?;

    if store.exists_on_date(entry_date)? {
        return Err(DailyError::Conflict(entry_date));
    }

    let saved = store.save(&record)?;
    info!("created entry {} for {}", saved.id, saved.entry_date);
    Ok(saved)
}
