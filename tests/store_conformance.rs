//! One behavioural suite, run against every `RecordStore` backend.
//!
//! Each test is written once as a generic function and instantiated per
//! backend by `conformance_tests!`. Anything that passes for one backend and
//! fails for the other is a bug in the backend, not in the test.

use chrono::{DateTime, NaiveDate, Utc};
use daily::cursor::Cursor;
use daily::error::DailyError;
use daily::model::{parse_timestamp, Record};
use daily::service::RecordService;
use daily::store::document::DocumentStore;
use daily::store::fs::FileStore;
use daily::store::{ListQuery, RecordStore};
use std::collections::HashSet;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn ts(s: &str) -> DateTime<Utc> {
    parse_timestamp(s).unwrap()
}

fn record_at(day: &str, created: &str, content: &str) -> Record {
    let mut record = Record::new(date(day), content).unwrap();
    record.created_at = ts(created);
    record.updated_at = record.created_at;
    record
}

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("entries"))
}

fn document_store(dir: &TempDir) -> DocumentStore {
    DocumentStore::open(dir.path().join("daily.db")).unwrap()
}

/// Four records: 2024-02-10, two on 2024-02-12, 2024-02-15.
fn seed<S: RecordStore>(store: &mut S) -> Vec<Record> {
    let records = vec![
        record_at("2024-02-10", "2024-02-10T20:00:00Z", "tenth"),
        record_at("2024-02-12", "2024-02-12T08:00:00Z", "twelfth, early"),
        record_at("2024-02-12", "2024-02-12T21:15:30.250000Z", "twelfth, late"),
        record_at("2024-02-15", "2024-02-15T07:45:00Z", "fifteenth"),
    ];
    for record in &records {
        store.save(record).unwrap();
    }
    records
}

fn contents(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.content.as_str()).collect()
}

/// Page through everything, returning the records and every cursor seen.
fn walk<S: RecordStore>(store: &S, query: ListQuery) -> (Vec<Record>, Vec<String>) {
    let mut records = Vec::new();
    let mut cursors = Vec::new();
    let mut query = query;
    loop {
        let page = store.list(&query).unwrap();
        assert!(page.records.len() <= query.limit);
        records.extend(page.records);
        match page.next_cursor {
            Some(next) => {
                cursors.push(next.clone());
                query = query.with_cursor(Some(next));
            }
            None => return (records, cursors),
        }
    }
}

fn example_scenario<S: RecordStore>(mut store: S) {
    seed(&mut store);

    let first = store.list(&ListQuery::new(2)).unwrap();
    assert_eq!(contents(&first.records), vec!["fifteenth", "twelfth, late"]);
    let cursor = first.next_cursor.expect("first page should not be the last");

    let decoded = Cursor::decode(&cursor).unwrap();
    assert_eq!(decoded.entry_date, date("2024-02-12"));
    assert_eq!(decoded.created_at, ts("2024-02-12T21:15:30.25Z"));

    let second = store
        .list(&ListQuery::new(2).with_cursor(Some(cursor)))
        .unwrap();
    assert_eq!(contents(&second.records), vec!["twelfth, early", "tenth"]);
    assert!(second.next_cursor.is_none());
}

fn paging_yields_every_record_once<S: RecordStore>(mut store: S) {
    let mut expected = Vec::new();
    for day in 1..=9 {
        for hour in [6, 12, 18] {
            let record = record_at(
                &format!("2024-03-0{}", day),
                &format!("2024-03-0{}T{:02}:00:00.000001Z", day, hour),
                &format!("day {} hour {}", day, hour),
            );
            store.save(&record).unwrap();
            expected.push(record);
        }
    }
    expected.sort_by(|a, b| {
        (b.entry_date, b.created_at).cmp(&(a.entry_date, a.created_at))
    });

    for limit in [1, 2, 4, 5, 26, 27, 100] {
        let (records, cursors) = walk(&store, ListQuery::new(limit));
        assert_eq!(records, expected, "limit {}", limit);

        let ids: HashSet<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), records.len(), "duplicate records at limit {}", limit);
        assert_eq!(cursors.len(), (expected.len() - 1) / limit, "limit {}", limit);
    }
}

fn exact_multiple_of_limit_ends_cleanly<S: RecordStore>(mut store: S) {
    seed(&mut store);
    let first = store.list(&ListQuery::new(4)).unwrap();
    assert_eq!(first.records.len(), 4);
    assert!(first.next_cursor.is_none());
}

fn empty_store_lists_nothing<S: RecordStore>(store: S) {
    let page = store.list(&ListQuery::new(10)).unwrap();
    assert!(page.records.is_empty());
    assert!(page.next_cursor.is_none());
}

fn zero_limit_is_rejected<S: RecordStore>(mut store: S) {
    seed(&mut store);
    assert!(matches!(
        store.list(&ListQuery::new(0)),
        Err(DailyError::Validation(_))
    ));
}

fn malformed_cursor_restarts_from_first_page<S: RecordStore>(mut store: S) {
    seed(&mut store);
    let fresh = store.list(&ListQuery::new(2)).unwrap();

    for bad in ["", "%%%not-base64%%%", "aGVsbG8=", "MjAyNC0wMi0xMnx8eA=="] {
        let page = store
            .list(&ListQuery::new(2).with_cursor(Some(bad.to_string())))
            .unwrap();
        assert_eq!(page, fresh, "cursor {:?}", bad);
    }
}

fn date_range_is_inclusive_across_pages<S: RecordStore>(mut store: S) {
    seed(&mut store);
    let range = ListQuery::new(1).with_range(Some(date("2024-02-11")), Some(date("2024-02-15")));
    let (records, _) = walk(&store, range);
    assert_eq!(
        contents(&records),
        vec!["fifteenth", "twelfth, late", "twelfth, early"]
    );

    let only_start = ListQuery::new(1).with_range(Some(date("2024-02-12")), None);
    let (records, _) = walk(&store, only_start);
    assert!(records.iter().all(|r| r.entry_date >= date("2024-02-12")));
    assert_eq!(records.len(), 3);

    let only_end = ListQuery::new(3).with_range(None, Some(date("2024-02-12")));
    let (records, _) = walk(&store, only_end);
    assert_eq!(
        contents(&records),
        vec!["twelfth, late", "twelfth, early", "tenth"]
    );

    let empty = ListQuery::new(5).with_range(Some(date("2024-02-13")), Some(date("2024-02-14")));
    assert!(store.list(&empty).unwrap().records.is_empty());
}

fn dates_order_chronologically_outside_four_digit_years<S: RecordStore>(mut store: S) {
    for day in ["-0002-01-01", "+10000-01-01", "2024-02-10", "-0001-01-01"] {
        store
            .save(&record_at(day, "2024-02-10T20:00:00Z", day))
            .unwrap();
    }

    let (records, cursors) = walk(&store, ListQuery::new(1));
    assert_eq!(
        contents(&records),
        vec!["+10000-01-01", "2024-02-10", "-0001-01-01", "-0002-01-01"]
    );
    assert_eq!(cursors.len(), 3);

    let range = ListQuery::new(10).with_range(Some(date("-0001-01-01")), Some(date("2024-12-31")));
    assert_eq!(
        contents(&store.list(&range).unwrap().records),
        vec!["2024-02-10", "-0001-01-01"]
    );
}

fn save_is_upsert_by_id<S: RecordStore>(mut store: S) {
    let record = record_at("2024-02-10", "2024-02-10T20:00:00Z", "draft");
    store.save(&record).unwrap();
    let revised = record.clone().with_content("final").unwrap();
    let returned = store.save(&revised).unwrap();
    assert_eq!(returned, revised);

    let page = store.list(&ListQuery::new(10)).unwrap();
    assert_eq!(page.records, vec![revised.clone()]);
    assert_eq!(store.get_by_id(&record.id).unwrap(), Some(revised));
}

fn lookups_and_delete<S: RecordStore>(mut store: S) {
    let records = seed(&mut store);
    let tenth = &records[0];

    assert_eq!(store.get_by_date(date("2024-02-10")).unwrap().as_ref(), Some(tenth));
    assert_eq!(
        store.get_by_date(date("2024-02-12")).unwrap().unwrap().content,
        "twelfth, late"
    );
    assert!(store.get_by_date(date("2024-02-11")).unwrap().is_none());
    assert!(store.exists_on_date(date("2024-02-15")).unwrap());
    assert!(!store.exists_on_date(date("2024-02-14")).unwrap());

    assert!(store.delete(&tenth.id).unwrap());
    assert!(!store.delete(&tenth.id).unwrap());
    assert!(store.get_by_id(&tenth.id).unwrap().is_none());
    assert!(!store.exists_on_date(date("2024-02-10")).unwrap());
}

fn service_rules<S: RecordStore>(store: S) {
    let mut service = RecordService::new(store);
    let day = date("2024-02-10");

    assert!(matches!(service.create(day, ""), Err(DailyError::Validation(_))));
    let created = service.create(day, "hello").unwrap();

    assert!(matches!(service.create(day, "world"), Err(DailyError::Conflict(d)) if d == day));
    assert_eq!(service.get_by_date(day).unwrap(), Some(created.clone()));

    assert!(matches!(
        service.update(&created.id, " \t\n"),
        Err(DailyError::Validation(_))
    ));
    assert_eq!(service.get_by_id(&created.id).unwrap(), Some(created.clone()));

    let updated = service.update_by_date(day, "world").unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.entry_date, created.entry_date);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.content, "world");
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(service.get_by_date(day).unwrap(), Some(updated));

    assert!(service.delete_by_date(day).unwrap());
    assert!(matches!(
        service.delete_by_date(day),
        Err(DailyError::NotFound(_))
    ));
}

macro_rules! conformance_tests {
    ($backend:ident, $open:ident: $($name:ident),* $(,)?) => {
        mod $backend {
            use super::*;

            $(
                #[test]
                fn $name() {
                    let dir = tempfile::tempdir().unwrap();
                    super::$name($open(&dir));
                }
            )*
        }
    };
}

conformance_tests!(file, file_store:
    example_scenario,
    dates_order_chronologically_outside_four_digit_years,
    paging_yields_every_record_once,
    exact_multiple_of_limit_ends_cleanly,
    empty_store_lists_nothing,
    zero_limit_is_rejected,
    malformed_cursor_restarts_from_first_page,
    date_range_is_inclusive_across_pages,
    save_is_upsert_by_id,
    lookups_and_delete,
    service_rules,
);

conformance_tests!(document, document_store:
    example_scenario,
    dates_order_chronologically_outside_four_digit_years,
    paging_yields_every_record_once,
    exact_multiple_of_limit_ends_cleanly,
    empty_store_lists_nothing,
    zero_limit_is_rejected,
    malformed_cursor_restarts_from_first_page,
    date_range_is_inclusive_across_pages,
    save_is_upsert_by_id,
    lookups_and_delete,
    service_rules,
);

#[test]
fn backends_agree_on_pages_and_cursors() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_store(&dir);
    let mut documents = document_store(&dir);

    let records = seed(&mut files);
    for record in &records {
        documents.save(record).unwrap();
    }

    for limit in 1..=5 {
        let query = ListQuery::new(limit).with_range(Some(date("2024-02-01")), None);
        assert_eq!(walk(&files, query.clone()), walk(&documents, query));
    }
}

#[test]
fn data_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let records = {
        let mut files = file_store(&dir);
        let mut documents = document_store(&dir);
        let records = seed(&mut files);
        for record in &records {
            documents.save(record).unwrap();
        }
        records
    };

    let files = file_store(&dir);
    let documents = document_store(&dir);
    for record in &records {
        assert_eq!(files.get_by_id(&record.id).unwrap().as_ref(), Some(record));
        assert_eq!(documents.get_by_id(&record.id).unwrap().as_ref(), Some(record));
    }
}
