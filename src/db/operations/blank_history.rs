use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_enum, new_id, now_iso};
use crate::db::Database;
use crate::types::{FieldEnum, Gender, PhraseDialect};

/// One answer to a fill-in-the-blank exercise. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankAttempt {
    pub id: String,
    pub user_id: String,
    pub phrase_id: String,
    pub dialect: PhraseDialect,
    pub gender: Gender,
    pub is_correct: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlankAttempt {
    pub user_id: String,
    pub phrase_id: String,
    pub dialect: PhraseDialect,
    pub gender: Gender,
    pub is_correct: bool,
}

pub async fn insert_blank_attempt(
    db: &Database,
    new: NewBlankAttempt,
) -> Result<BlankAttempt, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    sqlx::query(
        r#"
        INSERT INTO "blank_history" ("id", "userId", "phraseId", "dialect", "gender", "isCorrect", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(&new.phrase_id)
    .bind(new.dialect.as_str())
    .bind(new.gender.as_str())
    .bind(new.is_correct)
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await?;

    Ok(BlankAttempt {
        id,
        user_id: new.user_id,
        phrase_id: new.phrase_id,
        dialect: new.dialect,
        gender: new.gender,
        is_correct: new.is_correct,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Attempts by `user_id`, newest first; narrowed to one phrase when given.
pub async fn list_blank_attempts(
    db: &Database,
    user_id: &str,
    phrase_id: Option<&str>,
) -> Result<Vec<BlankAttempt>, sqlx::Error> {
    let rows = match phrase_id {
        Some(phrase_id) => {
            sqlx::query(
                r#"
                SELECT * FROM "blank_history"
                WHERE "userId" = ? AND "phraseId" = ?
                ORDER BY "createdAt" DESC, "id" DESC
                "#,
            )
            .bind(user_id)
            .bind(phrase_id)
            .fetch_all(db.pool())
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT * FROM "blank_history"
                WHERE "userId" = ?
                ORDER BY "createdAt" DESC, "id" DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(db.pool())
            .await?
        }
    };

    rows.iter().map(map_blank_attempt).collect()
}

fn map_blank_attempt(row: &SqliteRow) -> Result<BlankAttempt, sqlx::Error> {
    Ok(BlankAttempt {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        phrase_id: row.try_get("phraseId")?,
        dialect: decode_enum(row, "dialect")?,
        gender: decode_enum(row, "gender")?,
        is_correct: row.try_get("isCorrect")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
