use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_enum, is_unique_violation, new_id, now_iso, InsertOutcome};
use crate::db::Database;
use crate::types::{FieldEnum, Gender, PhraseDialect};

/// A phrase bookmarked by a user. At most one per (user, phrase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPhrase {
    pub id: String,
    pub user_id: String,
    pub phrase_id: String,
    pub dialect: PhraseDialect,
    pub gender: Gender,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedPhrase {
    pub user_id: String,
    pub phrase_id: String,
    pub dialect: PhraseDialect,
    pub gender: Gender,
}

pub async fn insert_saved_phrase(
    db: &Database,
    new: NewSavedPhrase,
) -> Result<InsertOutcome<SavedPhrase>, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    let result = sqlx::query(
        r#"
        INSERT INTO "saved_phrases" ("id", "userId", "phraseId", "dialect", "gender", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(&new.phrase_id)
    .bind(new.dialect.as_str())
    .bind(new.gender.as_str())
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await;

    match result {
        Ok(_) => Ok(InsertOutcome::Created(SavedPhrase {
            id,
            user_id: new.user_id,
            phrase_id: new.phrase_id,
            dialect: new.dialect,
            gender: new.gender,
            created_at: now.clone(),
            updated_at: now,
        })),
        Err(err) if is_unique_violation(&err) => {
            tracing::debug!(user_id = %new.user_id, phrase_id = %new.phrase_id, "phrase already saved");
            Ok(InsertOutcome::AlreadyExists)
        }
        Err(err) => Err(err),
    }
}

pub async fn find_saved_phrase(
    db: &Database,
    user_id: &str,
    phrase_id: &str,
) -> Result<Option<SavedPhrase>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT * FROM "saved_phrases" WHERE "userId" = ? AND "phraseId" = ? LIMIT 1"#,
    )
    .bind(user_id)
    .bind(phrase_id)
    .fetch_optional(db.pool())
    .await?;

    row.as_ref().map(map_saved_phrase).transpose()
}

pub async fn list_saved_phrases(db: &Database, user_id: &str) -> Result<Vec<SavedPhrase>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "saved_phrases"
        WHERE "userId" = ?
        ORDER BY "createdAt" DESC, "id" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_saved_phrase).collect()
}

fn map_saved_phrase(row: &SqliteRow) -> Result<SavedPhrase, sqlx::Error> {
    Ok(SavedPhrase {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        phrase_id: row.try_get("phraseId")?,
        dialect: decode_enum(row, "dialect")?,
        gender: decode_enum(row, "gender")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
