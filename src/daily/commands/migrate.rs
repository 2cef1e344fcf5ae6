//! Copy a journal from one backend into another.
//!
//! Records keep their ids and timestamps. A record whose date is already taken
//! in the target by a *different* record is skipped, so the target never ends
//! up with two entries on one day. Running a migration twice is harmless: the
//! second run rewrites the same documents.

use crate::commands::list;
use crate::error::Result;
use crate::store::{ListQuery, RecordStore};
use chrono::NaiveDate;
use log::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub copied: usize,
    /// Dates left alone because the target already had another entry there.
    pub skipped: Vec<NaiveDate>,
}

pub fn run<S: RecordStore, T: RecordStore>(
    source: &S,
    target: &mut T,
    page_size: usize,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    for record in list::all(source, &ListQuery::new(page_size))? {
        if let Some(existing) = target.get_by_date(record.entry_date)? {
            if existing.id != record.id {
                warn!(
                    "not migrating entry {}: {} already has entry {}",
                    record.id, record.entry_date, existing.id
                );
                report.skipped.push(record.entry_date);
                continue;
            }
        }
        target.save(&record)?;
        report.copied += 1;
    }

    info!(
        "migration finished: {} copied, {} skipped",
        report.copied,
        report.skipped.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::store::document::DocumentStore;
    use crate::test_utils::TestEnv;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn copies_every_entry_with_identity() {
        let mut env = TestEnv::new();
        let a = create::run(&mut env.files, date("2024-02-10"), "a").unwrap();
        let b = create::run(&mut env.files, date("2024-02-11"), "b").unwrap();
        let c = create::run(&mut env.files, date("2024-02-12"), "c").unwrap();

        let mut target = DocumentStore::in_memory().unwrap();
        let report = run(&env.files, &mut target, 2).unwrap();

        assert_eq!(report.copied, 3);
        assert!(report.skipped.is_empty());
        for record in [a, b, c] {
            assert_eq!(target.get_by_id(&record.id).unwrap(), Some(record));
        }
    }

    #[test]
    fn skips_dates_taken_in_target() {
        let mut env = TestEnv::new();
        create::run(&mut env.files, date("2024-02-10"), "from files").unwrap();
        create::run(&mut env.files, date("2024-02-11"), "also from files").unwrap();

        let mut target = env.documents();
        let kept = create::run(&mut target, date("2024-02-10"), "already here").unwrap();

        let report = run(&env.files, &mut target, 10).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, vec![date("2024-02-10")]);
        assert_eq!(target.get_by_date(date("2024-02-10")).unwrap(), Some(kept));
    }

    #[test]
    fn rerun_is_idempotent() {
        let mut env = TestEnv::new();
        create::run(&mut env.files, date("2024-02-10"), "a").unwrap();

        let mut target = DocumentStore::in_memory().unwrap();
        run(&env.files, &mut target, 10).unwrap();
        let second = run(&env.files, &mut target, 10).unwrap();

        assert_eq!(second.copied, 1);
        assert!(second.skipped.is_empty());
        assert_eq!(list::all(&target, &ListQuery::new(10)).unwrap().len(), 1);
    }
}
