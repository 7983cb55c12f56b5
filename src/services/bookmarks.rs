use serde::Deserialize;
use serde_json::Value;

use crate::db::operations::phrases::{self, NewSavedPhrase, SavedPhrase};
use crate::db::operations::{InsertOutcome, StoreError};
use crate::db::Database;
use crate::types::{Gender, PhraseDialect};
use crate::validation::{ValidationError, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePhraseInput {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub phrase_id: Option<Value>,
    #[serde(default)]
    pub dialect: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
}

impl SavePhraseInput {
    /// Dialect is lowercased before matching, so `"MSA"` is stored as `msa`.
    /// Gender is matched as given.
    pub fn validate(self) -> Result<NewSavedPhrase, ValidationError> {
        let mut v = Validator::new();

        let user_id = v.required_text("userId", self.user_id);
        let phrase_id = v.required_text("phraseId", self.phrase_id);
        let dialect = match v.text("dialect", self.dialect) {
            Some(raw) => v.one_of::<PhraseDialect>("dialect", &raw.to_lowercase()),
            None => Some(PhraseDialect::default()),
        };
        let gender = match v.text("gender", self.gender) {
            Some(raw) => v.one_of::<Gender>("gender", &raw),
            None => Some(Gender::default()),
        };

        match (user_id, phrase_id, dialect, gender) {
            (Some(user_id), Some(phrase_id), Some(dialect), Some(gender)) if v.is_ok() => {
                Ok(NewSavedPhrase {
                    user_id,
                    phrase_id,
                    dialect,
                    gender,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

pub async fn save_phrase(
    db: &Database,
    input: SavePhraseInput,
) -> Result<InsertOutcome<SavedPhrase>, StoreError> {
    let new = input.validate()?;
    Ok(phrases::insert_saved_phrase(db, new).await?)
}
