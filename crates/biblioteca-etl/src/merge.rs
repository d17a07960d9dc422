//! Merge engine: fold a batch of new records into an existing catalog.

use std::collections::HashSet;

use biblioteca_core::{Clock, DedupKey, Record};

/// What to do with an incoming record whose identity is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Drop it and count it as skipped.
    #[default]
    Skip,
    /// Add it anyway.
    Allow,
}

impl DuplicatePolicy {
    #[must_use]
    pub const fn from_allow_flag(allow_duplicates: bool) -> Self {
        if allow_duplicates {
            Self::Allow
        } else {
            Self::Skip
        }
    }
}

/// The merged, sorted catalog and what happened to the incoming batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<Record>,
    pub added: usize,
    pub skipped: usize,
}

/// Merge `incoming` into `existing` and sort the result.
///
/// Each incoming record keeps its creation stamp when it has one (a fresh
/// one otherwise) and gets a fresh update stamp. Under
/// [`DuplicatePolicy::Skip`] a record is dropped when its [`Record::key`]
/// matches an existing record or one added earlier in the same batch.
pub fn merge(
    existing: Vec<Record>,
    incoming: Vec<Record>,
    policy: DuplicatePolicy,
    clock: &dyn Clock,
) -> MergeOutcome {
    let now = clock.timestamp();
    let mut keys: HashSet<DedupKey> = existing.iter().map(Record::key).collect();
    let mut records = existing;
    records.reserve(incoming.len());

    let mut added = 0;
    let mut skipped = 0;

    for record in incoming {
        let created_at = if record.created_at().is_empty() {
            now.clone()
        } else {
            record.created_at().to_string()
        };
        let record = record.stamped(created_at, now.as_str());

        let key = record.key();
        if policy == DuplicatePolicy::Skip && keys.contains(&key) {
            log::debug!(
                "Skipping duplicate {} / {} / {}",
                record.last_name(),
                record.title(),
                record.publisher()
            );
            skipped += 1;
            continue;
        }

        keys.insert(key);
        records.push(record);
        added += 1;
    }

    sort_records(&mut records);
    log::info!(
        "Merged catalog: {} records ({} added, {} duplicates skipped)",
        records.len(),
        added,
        skipped
    );

    MergeOutcome {
        records,
        added,
        skipped,
    }
}

/// Stable ascending sort by [`Record::sort_key`].
pub fn sort_records(records: &mut [Record]) {
    records.sort_by_cached_key(Record::sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblioteca_core::FixedClock;

    fn clock(at: &str) -> FixedClock {
        FixedClock::parse(at).unwrap()
    }

    fn book(genre: &str, last: &str, first: &str, title: &str, year: Option<u16>) -> Record {
        Record::new(genre, last, first, title)
            .with_publisher("Einaudi")
            .with_year(year)
    }

    fn batch() -> Vec<Record> {
        vec![
            book("Narrativa", "Calvino", "Italo", "Il barone rampante", Some(1957)),
            book("Letteratura greca", "Omero", "—", "Iliade", Some(1990)),
            book("Narrativa", "Calvino", "Italo", "Il visconte dimezzato", Some(1952)),
        ]
    }

    #[test]
    fn test_merge_into_empty_sorts_and_stamps() {
        let outcome = merge(
            Vec::new(),
            batch(),
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );

        assert_eq!(outcome.added, 3);
        assert_eq!(outcome.skipped, 0);
        let titles: Vec<&str> = outcome.records.iter().map(Record::title).collect();
        assert_eq!(
            titles,
            vec!["Iliade", "Il visconte dimezzato", "Il barone rampante"]
        );
        assert!(outcome
            .records
            .iter()
            .all(|r| r.created_at() == "2024-05-01 12:00:00"
                && r.updated_at() == "2024-05-01 12:00:00"));
    }

    #[test]
    fn test_remerge_same_batch_adds_nothing() {
        let first = merge(
            Vec::new(),
            batch(),
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );
        let second = merge(
            first.records.clone(),
            batch(),
            DuplicatePolicy::Skip,
            &clock("2024-05-02 12:00:00"),
        );

        assert_eq!(second.added, 0);
        assert_eq!(second.skipped, batch().len());
        assert_eq!(second.records, first.records);
    }

    #[test]
    fn test_duplicates_within_one_batch_are_caught() {
        let mut incoming = batch();
        incoming.push(book("narrativa", "CALVINO", "Ìtalo", "il barone rampante", Some(1957)));

        let outcome = merge(
            Vec::new(),
            incoming,
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );
        assert_eq!(outcome.added, 3);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_allow_policy_keeps_duplicates() {
        let outcome = merge(
            batch(),
            batch(),
            DuplicatePolicy::Allow,
            &clock("2024-05-01 12:00:00"),
        );
        assert_eq!(outcome.added, 3);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records.len(), 6);
    }

    #[test]
    fn test_existing_created_stamp_is_kept() {
        let incoming =
            vec![book("Storia", "Gibbon", "Edward", "Declino", None).stamped("2020-01-01 00:00:00", "")];
        let outcome = merge(
            Vec::new(),
            incoming,
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );
        assert_eq!(outcome.records[0].created_at(), "2020-01-01 00:00:00");
        assert_eq!(outcome.records[0].updated_at(), "2024-05-01 12:00:00");
    }

    #[test]
    fn test_existing_records_are_not_restamped() {
        let existing = vec![book("Storia", "Gibbon", "Edward", "Declino", None)
            .stamped("2020-01-01 00:00:00", "2020-01-02 00:00:00")];
        let outcome = merge(
            existing.clone(),
            Vec::new(),
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );
        assert_eq!(outcome.records, existing);
    }

    #[test]
    fn test_ordering_groups_and_unknowns_last() {
        let records = vec![
            book("Storia", "Gibbon", "Edward", "Senza anno", None),
            book("Narrativa", "Zola", "Émile", "Germinal", Some(1885)),
            book("Storia", "Gibbon", "Edward", "Declino", Some(1787)).with_volume(Some(2)),
            book("Storia", "Gibbon", "Edward", "Appendice", Some(1787)),
            book("Storia", "Gibbon", "Edward", "Declino", Some(1776)).with_volume(Some(1)),
            book("Narrativa", "Calvino", "Italo", "Palomar", Some(1983)),
            book("Storia", "Braudel", "Fernand", "Il Mediterraneo", Some(1949)),
        ];

        let outcome = merge(
            Vec::new(),
            records,
            DuplicatePolicy::Skip,
            &clock("2024-05-01 12:00:00"),
        );
        let order: Vec<(&str, &str, Option<u16>, Option<u32>)> = outcome
            .records
            .iter()
            .map(|r| (r.last_name(), r.title(), r.year(), r.volume()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("Calvino", "Palomar", Some(1983), None),
                ("Zola", "Germinal", Some(1885), None),
                ("Braudel", "Il Mediterraneo", Some(1949), None),
                ("Gibbon", "Declino", Some(1776), Some(1)),
                ("Gibbon", "Declino", Some(1787), Some(2)),
                ("Gibbon", "Appendice", Some(1787), None),
                ("Gibbon", "Senza anno", None, None),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut records = vec![
            book("Storia", "Gibbon", "Edward", "Declino", None).with_note("prima copia"),
            book("Storia", "Gibbon", "Edward", "Declino", None).with_note("seconda copia"),
        ];
        sort_records(&mut records);
        assert_eq!(records[0].note(), "prima copia");
        assert_eq!(records[1].note(), "seconda copia");
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(DuplicatePolicy::from_allow_flag(true), DuplicatePolicy::Allow);
        assert_eq!(DuplicatePolicy::from_allow_flag(false), DuplicatePolicy::Skip);
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Skip);
    }
}
