use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_optional_enum, new_id, now_iso};
use crate::db::Database;
use crate::types::{CefrLevel, FieldEnum, Game, RegionalDialect};

/// Open-ended "notify me" registration. Unlike content-level subscriptions a
/// user may hold any number of these, including identical ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifySubscription {
    pub id: String,
    pub user_id: String,
    pub level: Option<CefrLevel>,
    pub dialect: Option<RegionalDialect>,
    pub game: Option<Game>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotifySubscription {
    pub user_id: String,
    pub level: Option<CefrLevel>,
    pub dialect: Option<RegionalDialect>,
    pub game: Option<Game>,
}

pub async fn insert_notify_subscription(
    db: &Database,
    new: NewNotifySubscription,
) -> Result<NotifySubscription, sqlx::Error> {
    let id = new_id();
    let now = now_iso();

    sqlx::query(
        r#"
        INSERT INTO "notify_me" ("id", "userId", "level", "dialect", "game", "createdAt", "updatedAt")
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.user_id)
    .bind(new.level.map(|v| v.as_str()))
    .bind(new.dialect.map(|v| v.as_str()))
    .bind(new.game.map(|v| v.as_str()))
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await?;

    Ok(NotifySubscription {
        id,
        user_id: new.user_id,
        level: new.level,
        dialect: new.dialect,
        game: new.game,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn list_notify_subscriptions(
    db: &Database,
    user_id: &str,
) -> Result<Vec<NotifySubscription>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "notify_me"
        WHERE "userId" = ?
        ORDER BY "createdAt" DESC, "id" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_notify_subscription).collect()
}

fn map_notify_subscription(row: &SqliteRow) -> Result<NotifySubscription, sqlx::Error> {
    Ok(NotifySubscription {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        level: decode_optional_enum(row, "level")?,
        dialect: decode_optional_enum(row, "dialect")?,
        game: decode_optional_enum(row, "game")?,
        created_at: row.try_get("createdAt")?,
        updated_at: row.try_get("updatedAt")?,
    })
}
