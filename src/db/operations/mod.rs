pub mod blank_history;
pub mod content_notify;
pub mod feedback;
pub mod fillin_history;
pub mod notify_me;
pub mod phrases;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use thiserror::Error;

use crate::types::FieldEnum;
use crate::validation::ValidationError;

/// Result of inserting into a table guarded by a compound unique key.
///
/// `AlreadyExists` is terminal: repeating the same insert fails the same way,
/// so callers report it instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "record", rename_all = "snake_case")]
pub enum InsertOutcome<T> {
    Created(T),
    AlreadyExists,
}

impl<T> InsertOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn created(self) -> Option<T> {
        match self {
            Self::Created(record) => Some(record),
            Self::AlreadyExists => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn decode_enum<E: FieldEnum>(row: &SqliteRow, column: &'static str) -> Result<E, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_stored(column, &raw)
}

pub(crate) fn decode_optional_enum<E: FieldEnum>(
    row: &SqliteRow,
    column: &'static str,
) -> Result<Option<E>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| parse_stored(column, &value)).transpose()
}

fn parse_stored<E: FieldEnum>(column: &'static str, raw: &str) -> Result<E, sqlx::Error> {
    E::parse(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unexpected stored value `{raw}`").into(),
    })
}
