//! Persisted record shapes and load-tolerant decoding.
//!
//! Tasks and archive entries are stored as JSON arrays with camelCase keys.
//! Decoding never fails as a whole: a missing or unparsable document reads
//! as empty, and each element is validated on its own, with invalid
//! elements dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

use crate::board::domain::{
    ColumnId, CompletedEntry, DueDate, PersistedTaskData, Priority, Stamp, StampSet, Task, TaskId,
};

/// Persisted shape of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Numeric task identifier.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Lowercase priority label; missing reads as unranked.
    #[serde(default)]
    pub priority: String,
    /// Due date as `DD/MM/AAAA`.
    pub due_date: String,
    /// Creating manager's name.
    #[serde(default)]
    pub created_by: String,
    /// Stored column identifier.
    pub column_id: String,
    /// Stamp labels in application order.
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

/// Persisted shape of a completed-archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRecord {
    /// Identifier of the completed task.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Due date as `DD/MM/AAAA`.
    pub due_date: String,
}

/// Reasons a persisted element is dropped on load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The element does not have the expected fields and types.
    #[error("malformed record: {0}")]
    Shape(String),

    /// The column identifier is empty.
    #[error("task {0} has an empty column identifier")]
    EmptyColumn(TaskId),

    /// A stamp label is not recognised.
    #[error("task {id} carries unknown stamp '{label}'")]
    UnknownStamp {
        /// Offending task.
        id: TaskId,
        /// Unrecognised label.
        label: String,
    },

    /// The due date is not a real calendar date.
    #[error("record {id} has invalid due date '{value}'")]
    InvalidDueDate {
        /// Offending record.
        id: TaskId,
        /// Raw stored value.
        value: String,
    },

    /// Stamps, completion flag and column contradict each other.
    #[error("task {0} has inconsistent stamps or completion state")]
    Inconsistent(TaskId),
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            priority: task.priority().as_str().to_owned(),
            due_date: task.due_date().to_string(),
            created_by: task.created_by().to_owned(),
            column_id: task.column().as_str().to_owned(),
            blocks: task
                .stamps()
                .iter()
                .map(|stamp| stamp.as_str().to_owned())
                .collect(),
            completed: task.is_completed(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = RecordError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let id = TaskId::new(record.id);
        let column =
            ColumnId::parse(&record.column_id).map_err(|_| RecordError::EmptyColumn(id))?;
        let due_date = parse_due_date(id, &record.due_date)?;
        let stamps = record
            .blocks
            .iter()
            .map(|label| {
                Stamp::try_from(label.as_str()).map_err(|_| RecordError::UnknownStamp {
                    id,
                    label: label.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let task = Self::from_persisted(PersistedTaskData {
            id,
            title: record.title,
            description: record.description,
            priority: Priority::from_label(&record.priority),
            due_date,
            created_by: record.created_by,
            column,
            stamps: StampSet::from_applied(stamps),
            completed: record.completed,
        });
        if !task.is_consistent() {
            return Err(RecordError::Inconsistent(id));
        }
        Ok(task)
    }
}

impl From<&CompletedEntry> for CompletedRecord {
    fn from(entry: &CompletedEntry) -> Self {
        Self {
            id: entry.id.value(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            due_date: entry.due_date.to_string(),
        }
    }
}

impl TryFrom<CompletedRecord> for CompletedEntry {
    type Error = RecordError;

    fn try_from(record: CompletedRecord) -> Result<Self, Self::Error> {
        let id = TaskId::new(record.id);
        Ok(Self {
            id,
            title: record.title,
            description: record.description,
            due_date: parse_due_date(id, &record.due_date)?,
        })
    }
}

fn parse_due_date(id: TaskId, value: &str) -> Result<DueDate, RecordError> {
    DueDate::parse(value).map_err(|_| RecordError::InvalidDueDate {
        id,
        value: value.to_owned(),
    })
}

/// Items recovered from one persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Valid items in stored order.
    pub items: Vec<T>,
    /// Number of elements dropped as invalid or duplicated.
    pub dropped: usize,
    /// Whether the document itself was unparsable or not an array.
    pub malformed: bool,
}

impl<T> Decoded<T> {
    const fn empty(malformed: bool) -> Self {
        Self {
            items: Vec::new(),
            dropped: 0,
            malformed,
        }
    }
}

/// Decodes the persisted task list.
#[must_use]
pub fn decode_tasks(raw: Option<&str>) -> Decoded<Task> {
    decode::<TaskRecord, Task>(raw, Task::id)
}

/// Decodes the persisted completed archive.
#[must_use]
pub fn decode_archive(raw: Option<&str>) -> Decoded<CompletedEntry> {
    decode::<CompletedRecord, CompletedEntry>(raw, |entry| entry.id)
}

/// Encodes tasks as a JSON array.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialisation fails.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    serde_json::to_string(&records)
}

/// Encodes archive entries as a JSON array.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialisation fails.
pub fn encode_archive(entries: &[CompletedEntry]) -> Result<String, serde_json::Error> {
    let records: Vec<CompletedRecord> = entries.iter().map(CompletedRecord::from).collect();
    serde_json::to_string(&records)
}

fn decode<R, T>(raw: Option<&str>, id_of: impl Fn(&T) -> TaskId) -> Decoded<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    let Some(document) = raw else {
        return Decoded::empty(false);
    };
    let elements = match serde_json::from_str::<serde_json::Value>(document) {
        Ok(serde_json::Value::Array(elements)) => elements,
        Ok(_) => {
            warn!("persisted document is not an array; reading as empty");
            return Decoded::empty(true);
        }
        Err(err) => {
            warn!(error = %err, "persisted document is not valid JSON; reading as empty");
            return Decoded::empty(true);
        }
    };

    let mut decoded = Decoded::empty(false);
    let mut seen = HashSet::new();
    for element in elements {
        let item = serde_json::from_value::<R>(element)
            .map_err(|err| RecordError::Shape(err.to_string()))
            .and_then(T::try_from);
        match item {
            Ok(item) if seen.insert(id_of(&item)) => decoded.items.push(item),
            Ok(item) => {
                warn!(id = %id_of(&item), "dropping duplicate persisted record");
                decoded.dropped += 1;
            }
            Err(err) => {
                warn!(error = %err, "dropping invalid persisted record");
                decoded.dropped += 1;
            }
        }
    }
    decoded
}
