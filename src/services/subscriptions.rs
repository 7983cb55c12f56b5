use serde::Deserialize;
use serde_json::Value;

use crate::db::operations::content_notify::{self, ContentSubscription, NewContentSubscription};
use crate::db::operations::notify_me::{self, NewNotifySubscription, NotifySubscription};
use crate::db::operations::{InsertOutcome, StoreError};
use crate::db::Database;
use crate::types::{CefrLevel, ContentLevel, Game, RegionalDialect};
use crate::validation::{ValidationError, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubscriptionInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub level: Option<Value>,
}

impl ContentSubscriptionInput {
    pub fn validate(self) -> Result<NewContentSubscription, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let level = v.required_enum::<ContentLevel>("level", self.level);

        match (user_id, level) {
            (Some(user_id), Some(level)) if v.is_ok() => {
                Ok(NewContentSubscription { user_id, level })
            }
            _ => Err(v.into_error()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifySubscriptionInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub dialect: Option<Value>,
    #[serde(default)]
    pub game: Option<Value>,
}

impl NotifySubscriptionInput {
    /// Only the user is required; each preference is optional but must be a
    /// known value when present.
    pub fn validate(self) -> Result<NewNotifySubscription, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let level = v.optional_enum::<CefrLevel>("level", self.level);
        let dialect = v.optional_enum::<RegionalDialect>("dialect", self.dialect);
        let game = v.optional_enum::<Game>("game", self.game);

        match user_id {
            Some(user_id) if v.is_ok() => Ok(NewNotifySubscription {
                user_id,
                level,
                dialect,
                game,
            }),
            _ => Err(v.into_error()),
        }
    }
}

pub async fn subscribe_content_level(
    db: &Database,
    input: ContentSubscriptionInput,
) -> Result<InsertOutcome<ContentSubscription>, StoreError> {
    let new = input.validate()?;
    Ok(content_notify::insert_content_subscription(db, new).await?)
}

pub async fn register_notify_me(
    db: &Database,
    input: NotifySubscriptionInput,
) -> Result<NotifySubscription, StoreError> {
    let new = input.validate()?;
    Ok(notify_me::insert_notify_subscription(db, new).await?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_content_level_rejects_unpublished_levels() {
        for level in ["A2", "B1", "a1", ""] {
            let err = ContentSubscriptionInput {
                user_id: Some(json!("user-1")),
                level: Some(json!(level)),
            }
            .validate()
            .unwrap_err();
            assert_eq!(err.fields(), vec!["level"], "level {level:?}");
        }
    }

    #[test]
    fn test_content_level_required() {
        let err = ContentSubscriptionInput {
            user_id: Some(json!("user-1")),
            level: None,
        }
        .validate()
        .unwrap_err();
        assert!(err.has_field("level"));
    }

    #[test]
    fn test_notify_me_all_optional() {
        let new = NotifySubscriptionInput {
            user_id: Some(json!("user-1")),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(new.level, None);
        assert_eq!(new.dialect, None);
        assert_eq!(new.game, None);
    }

    #[test]
    fn test_notify_me_values() {
        let new = NotifySubscriptionInput {
            user_id: Some(json!("user-1")),
            level: Some(json!("B1")),
            dialect: Some(json!("Levantine")),
            game: Some(json!("WordSearch")),
        }
        .validate()
        .unwrap();
        assert_eq!(new.level, Some(CefrLevel::B1));
        assert_eq!(new.dialect, Some(RegionalDialect::Levantine));
        assert_eq!(new.game, Some(Game::WordSearch));

        let err = NotifySubscriptionInput {
            user_id: Some(json!("user-1")),
            dialect: Some(json!("klingon")),
            game: Some(json!("Chess")),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.fields(), vec!["dialect", "game"]);
    }
}
