use super::page::{finish_page, newest_first, PageFilter};
use super::{ListQuery, Page, RecordStore};
use crate::error::{DailyError, Result};
use crate::model::Record;
use chrono::NaiveDate;
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ENTRY_PREFIX: &str = "entry-";
const ENTRY_EXT: &str = ".json";

/// Flat-file backend: one pretty-printed JSON document per record.
///
/// Reads are best-effort. An entry file that cannot be decoded is logged and
/// treated as absent, so one damaged file never hides the rest of the journal.
/// Damaged files are left on disk for the user to inspect.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_filename(id: &Uuid) -> String {
        format!("{}{}{}", ENTRY_PREFIX, id, ENTRY_EXT)
    }

    fn entry_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(Self::entry_filename(id))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DailyError::Io)?;
        }
        Ok(())
    }

    fn list_entry_ids(&self) -> Result<Vec<Uuid>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(DailyError::Io)? {
            let path = entry.map_err(DailyError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let id_part = name
                .strip_prefix(ENTRY_PREFIX)
                .and_then(|rest| rest.strip_suffix(ENTRY_EXT));
            if let Some(id) = id_part.and_then(|s| Uuid::parse_str(s).ok()) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Read one entry. Missing and undecodable files both come back as `None`.
    fn read_entry(&self, id: &Uuid) -> Result<Option<Record>> {
        let path = self.entry_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                warn!("skipping unreadable entry file {}: {}", path.display(), err);
                return Ok(None);
            }
            Err(err) => return Err(DailyError::Io(err)),
        };

        match serde_json::from_str::<Record>(&raw) {
            Ok(record) if record.id == *id => Ok(Some(record)),
            Ok(record) => {
                warn!(
                    "skipping entry file {}: it holds record {}",
                    path.display(),
                    record.id
                );
                Ok(None)
            }
            Err(err) => {
                warn!("skipping corrupted entry file {}: {}", path.display(), err);
                Ok(None)
            }
        }
    }

    /// Every readable record, newest first.
    fn load_all(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for id in self.list_entry_ids()? {
            if let Some(record) = self.read_entry(&id)? {
                records.push(record);
            }
        }
        records.sort_by(newest_first);
        Ok(records)
    }
}

impl RecordStore for FileStore {
    fn save(&mut self, record: &Record) -> Result<Record> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(record).map_err(DailyError::Serialization)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}.tmp", Self::entry_filename(&record.id)));
        fs::write(&tmp_path, content).map_err(DailyError::Io)?;
        if let Err(err) = fs::rename(&tmp_path, self.entry_path(&record.id)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DailyError::Io(err));
        }

        debug!("saved entry {} ({})", record.id, record.entry_date);
        Ok(record.clone())
    }

    fn get_by_date(&self, entry_date: NaiveDate) -> Result<Option<Record>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|r| r.entry_date == entry_date))
    }

    fn get_by_id(&self, id: &Uuid) -> Result<Option<Record>> {
        self.read_entry(id)
    }

    fn list(&self, query: &ListQuery) -> Result<Page> {
        let filter = PageFilter::from_query(query)?;

        let fetched: Vec<Record> = self
            .load_all()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .take(filter.fetch_size())
            .collect();

        debug!(
            "listed {} entries from {} (limit {})",
            fetched.len(),
            self.root.display(),
            filter.limit
        );
        Ok(finish_page(fetched, filter.limit))
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool> {
        match fs::remove_file(self.entry_path(id)) {
            Ok(()) => {
                debug!("deleted entry {}", id);
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(DailyError::Io(err)),
        }
    }

    fn exists_on_date(&self, entry_date: NaiveDate) -> Result<bool> {
        Ok(self.get_by_date(entry_date)?.is_some())
    }
}
