//! Completed task records and the task log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::{validate_title, TitleError};
use super::palette::ColorPair;
use crate::store::{KeyValueStore, StoreError};

/// Store key the task log lives under.
pub const TASKS_KEY: &str = "tasks";

/// A finished task.
///
/// Deserialization runs the same title check as [`TaskRecord::new`], so a
/// stored record with a short title fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct TaskRecord {
    title: String,
    time_taken: u64,
    colors: ColorPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Create a record, rejecting titles the timer form would not accept.
    pub fn new(title: impl Into<String>, time_taken: u64, colors: ColorPair) -> Result<Self, TitleError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            title,
            time_taken,
            colors,
            completed_at: None,
        })
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time_taken(&self) -> u64 {
        self.time_taken
    }

    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

/// Unchecked shape of a record as it sits in the store.
#[derive(Deserialize)]
struct StoredRecord {
    title: String,
    time_taken: u64,
    colors: ColorPair,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredRecord> for TaskRecord {
    type Error = TitleError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let record = TaskRecord::new(stored.title, stored.time_taken, stored.colors)?;
        Ok(match stored.completed_at {
            Some(at) => record.completed_at(at),
            None => record,
        })
    }
}

/// Errors raised while saving the log.
#[derive(Debug, Error)]
pub enum TaskLogError {
    #[error("failed to serialize task log: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered log of completed tasks, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLog {
    records: Vec<TaskRecord>,
}

impl TaskLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the log from `store`. A missing or malformed value yields an empty log.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(TASKS_KEY) else {
            tracing::debug!("no stored task log");
            return Self::new();
        };

        match serde_json::from_str::<Option<Vec<TaskRecord>>>(&raw) {
            Ok(records) => {
                let records = records.unwrap_or_default();
                tracing::debug!(count = records.len(), "loaded task log");
                Self { records }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed task log");
                Self::new()
            }
        }
    }

    /// Write the whole log to `store`.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), TaskLogError> {
        let json = serde_json::to_string(&self.records)?;
        store.set(TASKS_KEY, json)?;
        Ok(())
    }

    pub fn append(&mut self, record: TaskRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// Records in display order, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_time(&self) -> u64 {
        self.records.iter().map(TaskRecord::time_taken).sum()
    }
}

impl FromIterator<TaskRecord> for TaskLog {
    fn from_iter<I: IntoIterator<Item = TaskRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MockKeyValueStore};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn record(title: &str, secs: u64) -> TaskRecord {
        TaskRecord::new(title, secs, ColorPair::new("#FFD700", "#B8860B")).unwrap()
    }

    #[fixture]
    fn log() -> TaskLog {
        [record("write", 61), record("read docs", 5)].into_iter().collect()
    }

    #[test]
    fn record_rejects_invalid_title() {
        let colors = ColorPair::new("#000000", "#FFFFFF");
        assert_eq!(TaskRecord::new("", 1, colors.clone()), Err(TitleError::Required));
        assert!(TaskRecord::new("ok", 1, colors).is_err());
    }

    #[rstest]
    fn save_then_load_round_trips(log: TaskLog) {
        let mut store = MemoryStore::new();
        log.save(&mut store).unwrap();
        assert_eq!(TaskLog::load(&store), log);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty_string(Some(""))]
    #[case::not_json(Some("tasks!"))]
    #[case::wrong_shape(Some(r#"{"title":"x"}"#))]
    #[case::null(Some("null"))]
    #[case::empty_title(Some(r##"[{"title":"","time_taken":1,"colors":["#000000","#FFFFFF"]}]"##))]
    #[case::short_title(Some(
        r##"[{"title":"write","time_taken":1,"colors":["#000000","#FFFFFF"]},{"title":"ab","time_taken":2,"colors":["#000000","#FFFFFF"]}]"##
    ))]
    fn load_degrades_to_empty(#[case] stored: Option<&'static str>) {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == TASKS_KEY)
            .return_const(stored.map(str::to_string));
        assert!(TaskLog::load(&store).is_empty());
    }

    #[test]
    fn loads_records_without_timestamp() {
        let mut store = MemoryStore::new();
        store
            .set(
                TASKS_KEY,
                r##"[{"title":"read","time_taken":3,"colors":["#CBD5E1","#1E293B"]}]"##.to_string(),
            )
            .unwrap();

        let log = TaskLog::load(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].title(), "read");
        assert_eq!(log.records()[0].colors(), &ColorPair::new("#CBD5E1", "#1E293B"));
        assert_eq!(log.records()[0].completion_time(), None);
    }

    #[test]
    fn loaded_timestamp_survives_validation() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let log: TaskLog = [record("stamped", 4).completed_at(at)].into_iter().collect();
        let mut store = MemoryStore::new();
        log.save(&mut store).unwrap();

        assert_eq!(TaskLog::load(&store).records()[0].completion_time(), Some(at));
    }

    #[test]
    fn serializes_in_stored_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_string(&record("write", 61).completed_at(at)).unwrap();
        assert_eq!(
            json,
            r##"{"title":"write","time_taken":61,"colors":["#FFD700","#B8860B"],"completed_at":"2024-05-01T12:00:00Z"}"##
        );
    }

    #[rstest]
    fn append_keeps_insertion_order(mut log: TaskLog) {
        log.append(record("third", 1));

        let titles: Vec<_> = log.records().iter().map(TaskRecord::title).collect();
        assert_eq!(titles, ["write", "read docs", "third"]);

        let newest: Vec<_> = log.newest_first().map(TaskRecord::title).collect();
        assert_eq!(newest, ["third", "read docs", "write"]);
        assert_eq!(log.total_time(), 67);
    }

    #[rstest]
    fn save_reports_store_failure(log: TaskLog) {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .returning(|key, _| Err(StoreError::InvalidKey(key.to_string())));
        assert!(matches!(log.save(&mut store), Err(TaskLogError::Store(_))));
    }
}
