use crate::error::Result;
use crate::model::Record;
use crate::store::{ListQuery, Page, RecordStore};

pub fn run<S: RecordStore>(store: &S, query: &ListQuery) -> Result<Page> {
    store.list(query)
}

/// Follow cursors from `query` until the matching set is exhausted.
pub fn all<S: RecordStore>(store: &S, query: &ListQuery) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut query = query.clone();
    loop {
        let page = store.list(&query)?;
        records.extend(page.records);
        match page.next_cursor {
            Some(cursor) => query.cursor = Some(cursor),
            None => return Ok(records),
        }
    }
}
