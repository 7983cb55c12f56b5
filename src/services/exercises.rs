use serde::Deserialize;
use serde_json::Value;

use crate::db::operations::blank_history::{self, BlankAttempt, NewBlankAttempt};
use crate::db::operations::fillin_history::{self, FillinAttempt, NewFillinAttempt};
use crate::db::operations::StoreError;
use crate::db::Database;
use crate::types::{Gender, PhraseDialect};
use crate::validation::{ValidationError, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankAttemptInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub phrase_id: Option<Value>,
    #[serde(default)]
    pub dialect: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub is_correct: Option<Value>,
}

impl BlankAttemptInput {
    /// Every field is required and enum values must match exactly.
    pub fn validate(self) -> Result<NewBlankAttempt, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let phrase_id = v.required_text("phraseId", self.phrase_id);
        let dialect = v.required_enum::<PhraseDialect>("dialect", self.dialect);
        let gender = v.required_enum::<Gender>("gender", self.gender);
        let is_correct = v.required_bool("isCorrect", self.is_correct);

        match (user_id, phrase_id, dialect, gender, is_correct) {
            (Some(user_id), Some(phrase_id), Some(dialect), Some(gender), Some(is_correct))
                if v.is_ok() =>
            {
                Ok(NewBlankAttempt {
                    user_id,
                    phrase_id,
                    dialect,
                    gender,
                    is_correct,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillinAttemptInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub sentence_id: Option<Value>,
    #[serde(default)]
    pub is_correct: Option<Value>,
    #[serde(default)]
    pub is_review: Option<Value>,
}

impl FillinAttemptInput {
    pub fn validate(self) -> Result<NewFillinAttempt, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let sentence_id = v.required_text("sentenceId", self.sentence_id);
        let is_correct = v.required_bool("isCorrect", self.is_correct);
        let is_review = v.bool("isReview", self.is_review);

        match (user_id, sentence_id, is_correct) {
            (Some(user_id), Some(sentence_id), Some(is_correct)) if v.is_ok() => {
                Ok(NewFillinAttempt {
                    user_id,
                    sentence_id,
                    is_correct,
                    is_review: is_review.unwrap_or(false),
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

pub async fn record_blank_attempt(
    db: &Database,
    input: BlankAttemptInput,
) -> Result<BlankAttempt, StoreError> {
    let new = input.validate()?;
    Ok(blank_history::insert_blank_attempt(db, new).await?)
}

pub async fn record_fillin_attempt(
    db: &Database,
    input: FillinAttemptInput,
) -> Result<FillinAttempt, StoreError> {
    let new = input.validate()?;
    Ok(fillin_history::insert_fillin_attempt(db, new).await?)
}
