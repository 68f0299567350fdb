use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::errors::TypecraftError;

/// Id of the tagset every phrase refers to unless told otherwise
pub const DEFAULT_TAGSET_ID: u32 = 1;

/// Name of the default tagset
pub const DEFAULT_TAGSET_NAME: &str = "Default";

static DEFAULT_TAGSET: Lazy<Arc<GlobalTagSet>> =
    Lazy::new(|| Arc::new(GlobalTagSet::new(DEFAULT_TAGSET_ID, DEFAULT_TAGSET_NAME)));

/// Meta-information about a global tagset.
///
/// Phrases hold a shared, read-only reference to their tagset; the
/// default one is a process-wide singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalTagSet {
    pub id: u32,
    pub name: String,
}

impl GlobalTagSet {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// The shared default tagset `(1, "Default")`
    pub fn shared_default() -> Arc<GlobalTagSet> {
        Arc::clone(&DEFAULT_TAGSET)
    }

    pub fn to_projection(&self) -> Value {
        json!({ "id": self.id, "name": self.name })
    }
}

impl Default for GlobalTagSet {
    fn default() -> Self {
        Self::new(DEFAULT_TAGSET_ID, DEFAULT_TAGSET_NAME)
    }
}

/// A phrase-level annotation tag.
///
/// `level` is an opaque grouping key. It is usually numeric but is kept
/// as the string read from the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobalTag {
    pub name: String,
    pub level: String,
    /// Unused; mirrors the field of the same name in Typecraft core
    pub description: String,
}

impl GlobalTag {
    pub fn new(name: impl Into<String>, level: impl ToString) -> Self {
        Self {
            name: name.into(),
            level: level.to_string(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn to_projection(&self) -> Value {
        json!({
            "name": self.name,
            "level": self.level,
            "description": self.description,
        })
    }
}

/// Validity state of a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhraseValidity {
    Unknown,
    Valid,
    Invalid,
    Special,
    #[default]
    Empty,
}

impl PhraseValidity {
    pub const ALL: [PhraseValidity; 5] = [
        Self::Unknown,
        Self::Valid,
        Self::Invalid,
        Self::Special,
        Self::Empty,
    ];

    /// The wire name, as used in the `valid` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::Special => "SPECIAL",
            Self::Empty => "EMPTY",
        }
    }
}

impl fmt::Display for PhraseValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Names are matched case-sensitively
impl FromStr for PhraseValidity {
    type Err = TypecraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|validity| validity.as_str() == s)
            .ok_or_else(|| {
                TypecraftError::UnsupportedOperation(format!(
                    "invalid validity tag '{}' for phrase",
                    s
                ))
            })
    }
}
