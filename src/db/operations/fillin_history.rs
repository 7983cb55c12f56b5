use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{new_id, now_iso};
use crate::db::Database;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillinAttempt {
    pub id: String,
    pub user_id: String,
    pub sentence_id: String,
    pub is_correct: bool,
    pub is_review: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFillinAttempt {
    pub user_id: String,
    pub sentence_id: String,
    pub is_correct: bool,
    pub is_review: bool,
}

pub async fn insert_fillin_attempt(
    db: &Database,
    new: NewFillinAttempt,
) -> Result<FillinAttempt, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    sqlx::query(
        r#"
        INSERT INTO "fillin_history" ("id", "userId", "sentenceId", "isCorrect", "isReview", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(&new.sentence_id)
    .bind(new.is_correct)
    .bind(new.is_review)
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await?;

    Ok(FillinAttempt {
        id,
        user_id: new.user_id,
        sentence_id: new.sentence_id,
        is_correct: new.is_correct,
        is_review: new.is_review,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn list_fillin_attempts_for_user(
    db: &Database,
    user_id: &str,
    sentence_id: Option<&str>,
) -> Result<Vec<FillinAttempt>, sqlx::Error> {
    let rows = match sentence_id {
        Some(sentence_id) => {
            sqlx::query(
                r#"
                SELECT * FROM "fillin_history"
                WHERE "userId" = ? AND "sentenceId" = ?
                ORDER BY "createdAt" DESC, "id" DESC
                "#,
            )
            .bind(user_id)
            .bind(sentence_id)
            .fetch_all(db.pool())
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT * FROM "fillin_history"
                WHERE "userId" = ?
                ORDER BY "createdAt" DESC, "id" DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(db.pool())
            .await?
        }
    };

    rows.iter().map(map_fillin_attempt).collect()
}

pub async fn list_fillin_attempts_for_sentence(
    db: &Database,
    sentence_id: &str,
) -> Result<Vec<FillinAttempt>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "fillin_history"
        WHERE "sentenceId" = ?
        ORDER BY "createdAt" DESC, "id" DESC
        "#,
    )
    .bind(sentence_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_fillin_attempt).collect()
}

fn map_fillin_attempt(row: &SqliteRow) -> Result<FillinAttempt, sqlx::Error> {
    Ok(FillinAttempt {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        sentence_id: row.try_get("sentenceId")?,
        is_correct: row.try_get("isCorrect")?,
        is_review: row.try_get("isReview")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
