use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_enum, is_unique_violation, new_id, now_iso, InsertOutcome};
use crate::db::Database;
use crate::types::{ContentLevel, FieldEnum};

/// Opt-in to alerts when new content is published for a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubscription {
    pub id: String,
    pub user_id: String,
    pub level: ContentLevel,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentSubscription {
    pub user_id: String,
    pub level: ContentLevel,
}

pub async fn insert_content_subscription(
    db: &Database,
    new: NewContentSubscription,
) -> Result<InsertOutcome<ContentSubscription>, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    let result = sqlx::query(
        r#"
        INSERT INTO "content_notify" ("id", "userId", "level", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(new.level.as_str())
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await;

    match result {
        Ok(_) => Ok(InsertOutcome::Created(ContentSubscription {
            id,
            user_id: new.user_id,
            level: new.level,
            created_at: now.clone(),
            updated_at: now,
        })),
        Err(err) if is_unique_violation(&err) => {
            tracing::debug!(user_id = %new.user_id, level = %new.level, "content level already subscribed");
            Ok(InsertOutcome::AlreadyExists)
        }
        Err(err) => Err(err),
    }
}

pub async fn list_content_subscriptions(
    db: &Database,
    user_id: &str,
) -> Result<Vec<ContentSubscription>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "content_notify"
        WHERE "userId" = ?
        ORDER BY "createdAt" DESC, "id" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_content_subscription).collect()
}

fn map_content_subscription(row: &SqliteRow) -> Result<ContentSubscription, sqlx::Error> {
    Ok(ContentSubscription {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        level: decode_enum(row, "level")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
