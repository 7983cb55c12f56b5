use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{new_id, now_iso};
use crate::db::Database;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub user_id: String,
    pub description: String,
    pub rating: Option<i64>,
}

pub async fn insert_feedback(db: &Database, new: NewFeedback) -> Result<Feedback, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    sqlx::query(
        r#"
        INSERT INTO "feedback" ("id", "userId", "description", "rating", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(&new.description)
    .bind(new.rating)
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await?;

    Ok(Feedback {
        id,
        user_id: new.user_id,
        description: new.description,
        rating: new.rating,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn list_feedback(db: &Database, user_id: &str) -> Result<Vec<Feedback>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "feedback"
        WHERE "userId" = ?
        ORDER BY "createdAt" DESC, "id" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_feedback).collect()
}

fn map_feedback(row: &SqliteRow) -> Result<Feedback, sqlx::Error> {
    Ok(Feedback {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
