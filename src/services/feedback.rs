use serde::Deserialize;
use serde_json::Value;

use crate::db::operations::feedback::{self, Feedback, NewFeedback};
use crate::db::operations::StoreError;
use crate::db::Database;
use crate::validation::{ValidationError, Validator};

pub const MAX_DESCRIPTION_CHARS: usize = 1000;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
}

impl FeedbackInput {
    pub fn validate(self) -> Result<NewFeedback, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let description = v.required_string("description", self.description);
        let description = v.max_chars("description", description, MAX_DESCRIPTION_CHARS);
        let rating = v
            .int("rating", self.rating)
            .and_then(|rating| v.range_i64("rating", rating, MIN_RATING, MAX_RATING));

        match (user_id, description) {
            (Some(user_id), Some(description)) if v.is_ok() => Ok(NewFeedback {
                user_id,
                description,
                rating,
            }),
            _ => Err(v.into_error()),
        }
    }
}

pub async fn submit_feedback(db: &Database, input: FeedbackInput) -> Result<Feedback, StoreError> {
    let new = input.validate()?;
    Ok(feedback::insert_feedback(db, new).await?)
}
