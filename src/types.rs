use std::fmt;

use serde::Serialize;

/// A closed set of string values stored verbatim in a column.
pub trait FieldEnum: Sized + Copy + 'static {
    const ALLOWED: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive match against the stored spelling.
    fn parse(value: &str) -> Option<Self> {
        Self::ALLOWED.iter().copied().find(|v| v.as_str() == value)
    }

    fn allowed_list() -> String {
        Self::ALLOWED
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Dialect a phrase is rendered in. Bookmarks lowercase their input before
/// matching; exercise attempts match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseDialect {
    #[default]
    Msa,
    Egyptian,
    Saudi,
}

impl FieldEnum for PhraseDialect {
    const ALLOWED: &'static [Self] = &[Self::Msa, Self::Egyptian, Self::Saudi];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Msa => "msa",
            Self::Egyptian => "egyptian",
            Self::Saudi => "saudi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Neutral,
}

impl FieldEnum for Gender {
    const ALLOWED: &'static [Self] = &[Self::Male, Self::Female, Self::Neutral];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Neutral => "neutral",
        }
    }
}

/// Levels offered for new-content alerts. Only these four are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentLevel {
    A1,
    B2,
    C1,
    C2,
}

impl FieldEnum for ContentLevel {
    const ALLOWED: &'static [Self] = &[Self::A1, Self::B2, Self::C1, Self::C2];

    fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl FieldEnum for CefrLevel {
    const ALLOWED: &'static [Self] = &[
        Self::A1,
        Self::A2,
        Self::B1,
        Self::B2,
        Self::C1,
        Self::C2,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

/// Regional variety a notification subscription is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegionalDialect {
    #[serde(rename = "MSA")]
    Msa,
    Egyptian,
    Levantine,
    Gulf,
    Maghrebi,
}

impl FieldEnum for RegionalDialect {
    const ALLOWED: &'static [Self] = &[
        Self::Msa,
        Self::Egyptian,
        Self::Levantine,
        Self::Gulf,
        Self::Maghrebi,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Msa => "MSA",
            Self::Egyptian => "Egyptian",
            Self::Levantine => "Levantine",
            Self::Gulf => "Gulf",
            Self::Maghrebi => "Maghrebi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Game {
    Memory,
    WordSearch,
    Crossword,
    Spelling,
}

impl FieldEnum for Game {
    const ALLOWED: &'static [Self] = &[
        Self::Memory,
        Self::WordSearch,
        Self::Crossword,
        Self::Spelling,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "Memory",
            Self::WordSearch => "WordSearch",
            Self::Crossword => "Crossword",
            Self::Spelling => "Spelling",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(PhraseDialect, Gender, ContentLevel, CefrLevel, RegionalDialect, Game);
