use crate::model::{parse_timestamp, Record};
use crate::store::document::DocumentStore;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub files: FileStore,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let files = FileStore::new(root.join("entries"));
        Self {
            _temp_dir: temp_dir,
            root,
            files,
        }
    }

    pub fn documents(&self) -> DocumentStore {
        DocumentStore::open(self.root.join("daily.db")).expect("failed to open document store")
    }
}

/// A record on `date` whose `created_at`/`updated_at` are pinned to `created`.
pub fn record_at(date: &str, created: &str) -> Record {
    let mut record = Record::new(date.parse().expect("bad date"), &format!("entry for {}", date))
        .expect("valid content");
    record.created_at = parse_timestamp(created).expect("bad timestamp");
    record.updated_at = record.created_at;
    record
}
