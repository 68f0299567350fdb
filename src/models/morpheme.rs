use std::fmt;

use serde_json::{Map, Value, json};

use crate::errors::{Result, TypecraftError};
use crate::models::Merge;

/// Separator of glosses in concatenated form (`3SG.FEM.INDEF`)
pub const GLOSS_SEPARATOR: char = '.';

/// The smallest unit of the model: a text form with its glosses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Morpheme {
    pub morpheme: String,
    pub baseform: String,
    pub meaning: String,
    glosses: Vec<String>,
}

impl Morpheme {
    pub fn new(morpheme: impl Into<String>) -> Self {
        Self {
            morpheme: morpheme.into(),
            ..Self::default()
        }
    }

    pub fn with_baseform(mut self, baseform: impl Into<String>) -> Self {
        self.baseform = baseform.into();
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self
    }

    /// Appends each gloss of `glosses` in order.
    pub fn with_glosses<I, S>(mut self, glosses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_glosses(glosses);
        self
    }

    /// Appends the glosses of a dot-delimited string.
    ///
    /// `Morpheme::new("x").with_concatenated_glosses("A.B")` and
    /// `Morpheme::new("x").with_glosses(["A", "B"])` are equal.
    pub fn with_concatenated_glosses(mut self, glosses: &str) -> Self {
        self.add_concatenated_glosses(glosses);
        self
    }

    pub fn glosses(&self) -> &[String] {
        &self.glosses
    }

    pub fn add_gloss(&mut self, gloss: impl Into<String>) {
        self.glosses.push(gloss.into());
    }

    pub fn add_glosses<I, S>(&mut self, glosses: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.glosses.extend(glosses.into_iter().map(Into::into));
    }

    pub fn add_concatenated_glosses(&mut self, glosses: &str) {
        self.add_glosses(glosses.split(GLOSS_SEPARATOR));
    }

    /// Joins the glosses with `.`; a sorted copy is joined when `sort` is set.
    pub fn gloss_concatenated(&self, sort: bool) -> String {
        if sort {
            let mut sorted = self.glosses.clone();
            sorted.sort();
            sorted.join(".")
        } else {
            self.glosses.join(".")
        }
    }

    pub fn remove_gloss(&mut self, gloss: &str) -> Result<String> {
        let index = self
            .glosses
            .iter()
            .position(|g| g == gloss)
            .ok_or_else(|| TypecraftError::NotFound(format!("gloss '{}'", gloss)))?;
        Ok(self.glosses.remove(index))
    }

    pub fn clear_glosses(&mut self) {
        self.glosses.clear();
    }

    /// Alias of [`Morpheme::clear_glosses`]
    pub fn clear_tags(&mut self) {
        self.clear_glosses();
    }

    pub(crate) fn replace_glosses(&mut self, glosses: Vec<String>) {
        self.glosses = glosses;
    }

    pub fn detokenize(&self) -> &str {
        &self.morpheme
    }

    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("morpheme".into(), json!(self.morpheme));
        map.insert("baseform".into(), json!(self.baseform));
        map.insert("meaning".into(), json!(self.meaning));
        map
    }

    pub fn to_projection(&self) -> Value {
        let mut map = self.attributes();
        map.insert("glosses".into(), json!(self.glosses));
        Value::Object(map)
    }
}

impl Merge for Morpheme {
    fn merge(&mut self, _other: Self) -> Result<()> {
        Err(TypecraftError::UnsupportedOperation(
            "merge is not defined for morphemes".to_string(),
        ))
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_projection(f, &self.to_projection())
    }
}
