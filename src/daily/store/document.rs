use super::page::{finish_page, PageFilter};
use super::{ListQuery, Page, RecordStore};
use crate::error::{DailyError, Result};
use crate::model::{format_timestamp, Record};
use chrono::{Datelike, NaiveDate};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

/// Document-database backend.
///
/// Records live as JSON documents in the `records` collection of an embedded
/// SQLite database. The sort and filter keys are copied into indexed columns
/// so that filtering, seeking, ordering and the `LIMIT` all run inside the
/// database. Dates are keyed by day number (`entry_day`), which orders the same
/// way as [`NaiveDate`] for every representable year.
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open (or create) a database file and make sure the collection exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DailyError::Io)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Ephemeral store, gone when dropped.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    fn day_key(date: NaiveDate) -> i64 {
        i64::from(date.num_days_from_ce())
    }

    fn decode_doc(doc: &str) -> Result<Record> {
        serde_json::from_str(doc).map_err(DailyError::Serialization)
    }

    fn query_one(&self, sql: &str, key: &str) -> Result<Option<Record>> {
        let doc: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        doc.as_deref().map(Self::decode_doc).transpose()
    }
}

impl RecordStore for DocumentStore {
    fn save(&mut self, record: &Record) -> Result<Record> {
        let doc = serde_json::to_string(record).map_err(DailyError::Serialization)?;
        self.conn.execute(
            "INSERT INTO records (id, entry_date, entry_day, created_at, doc)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                entry_date = excluded.entry_date,
                entry_day = excluded.entry_day,
                created_at = excluded.created_at,
                doc = excluded.doc",
            params![
                record.id.to_string(),
                record.entry_date.to_string(),
                Self::day_key(record.entry_date),
                format_timestamp(&record.created_at),
                doc,
            ],
        )?;
        debug!("upserted document {} ({})", record.id, record.entry_date);
        Ok(record.clone())
    }

    fn get_by_date(&self, entry_date: NaiveDate) -> Result<Option<Record>> {
        self.query_one(
            "SELECT doc FROM records WHERE entry_date = ?1
             ORDER BY created_at DESC, id DESC LIMIT 1",
            &entry_date.to_string(),
        )
    }

    fn get_by_id(&self, id: &Uuid) -> Result<Option<Record>> {
        self.query_one("SELECT doc FROM records WHERE id = ?1", &id.to_string())
    }

    fn list(&self, query: &ListQuery) -> Result<Page> {
        let filter = PageFilter::from_query(query)?;

        let mut clauses: Vec<&str> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        if let Some(start) = filter.start_date {
            clauses.push("entry_day >= ?");
            args.push(Value::Integer(Self::day_key(start)));
        }
        if let Some(end) = filter.end_date {
            clauses.push("entry_day <= ?");
            args.push(Value::Integer(Self::day_key(end)));
        }
        if let Some(cursor) = filter.after {
            clauses.push("(entry_day < ? OR (entry_day = ? AND created_at < ?))");
            args.push(Value::Integer(Self::day_key(cursor.entry_date)));
            args.push(Value::Integer(Self::day_key(cursor.entry_date)));
            args.push(Value::Text(format_timestamp(&cursor.created_at)));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT doc FROM records{} ORDER BY entry_day DESC, created_at DESC, id DESC LIMIT ?",
            where_clause
        );
        args.push(Value::Integer(
            i64::try_from(filter.fetch_size()).unwrap_or(i64::MAX),
        ));

        let mut stmt = self.conn.prepare(&sql)?;
        let docs = stmt
            .query_map(params_from_iter(args.iter()), |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let fetched = docs
            .iter()
            .map(|doc| Self::decode_doc(doc))
            .collect::<Result<Vec<_>>>()?;

        debug!("listed {} documents (limit {})", fetched.len(), filter.limit);
        Ok(finish_page(fetched, filter.limit))
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", [id.to_string()])?;
        if removed > 0 {
            debug!("deleted document {}", id);
        }
        Ok(removed > 0)
    }

    fn exists_on_date(&self, entry_date: NaiveDate) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM records WHERE entry_date = ?1)",
            [entry_date.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
