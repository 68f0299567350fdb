use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde_json::{Map, Value, json};

use crate::errors::{Result, TypecraftError};
use crate::mapping::TagSet;
use crate::models::{Merge, Phrase};
use crate::traversal::{self, TagClearer, TagMapper};

/// Language code used when nothing else is known
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// A text: a sequence of phrases with a title and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Source identifier, only present when read from input
    pub id: Option<String>,
    pub title: String,
    pub title_translation: String,
    pub language: String,
    pub plain_text: String,
    /// Raw markup, carried in the `body` element
    pub rich_text: String,
    metadata: BTreeMap<String, String>,
    phrases: Vec<Phrase>,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            title_translation: String::new(),
            language: UNDETERMINED_LANGUAGE.to_string(),
            plain_text: String::new(),
            rich_text: String::new(),
            metadata: BTreeMap::new(),
            phrases: Vec::new(),
        }
    }
}

impl Text {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_phrases<I: IntoIterator<Item = Phrase>>(mut self, phrases: I) -> Self {
        self.add_phrases(phrases);
        self
    }

    pub fn with_metadata<I, K, V>(mut self, metadata: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in metadata {
            self.add_metadata(key, value);
        }
        self
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn phrases_mut(&mut self) -> &mut [Phrase] {
        &mut self.phrases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phrase> {
        self.phrases.iter()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn add_phrase(&mut self, phrase: Phrase) {
        self.phrases.push(phrase);
    }

    pub fn add_phrases<I: IntoIterator<Item = Phrase>>(&mut self, phrases: I) {
        self.phrases.extend(phrases);
    }

    pub fn remove_phrase(&mut self, phrase: &Phrase) -> Result<Phrase> {
        let index = self
            .phrases
            .iter()
            .position(|p| p == phrase)
            .ok_or_else(|| TypecraftError::NotFound(format!("phrase '{}'", phrase.phrase)))?;
        Ok(self.phrases.remove(index))
    }

    pub fn clear_phrases(&mut self) {
        self.phrases.clear();
    }

    /// Takes the phrases out, leaving the text without any
    pub fn take_phrases(&mut self) -> Vec<Phrase> {
        std::mem::take(&mut self.phrases)
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Sets a metadata entry, replacing an existing value for `key`.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Removes `key` if present.
    pub fn remove_metadata(&mut self, key: &str) -> Option<String> {
        self.metadata.remove(key)
    }

    pub fn clear_metadata(&mut self) {
        self.metadata.clear();
    }

    pub fn clear_tags(&mut self) {
        traversal::walk_text_mut(self, &mut TagClearer);
    }

    pub fn map_tags(&mut self, tagset: TagSet) {
        traversal::walk_text_mut(self, &mut TagMapper::new(tagset));
    }

    /// `plain_text` if set, otherwise the phrases detokenized one per line.
    pub fn detokenize(&self) -> String {
        traversal::detokenize_text(self)
    }

    /// A copy of this text's own fields, without any phrases
    pub fn shallow_copy(&self) -> Text {
        Text {
            id: self.id.clone(),
            title: self.title.clone(),
            title_translation: self.title_translation.clone(),
            language: self.language.clone(),
            plain_text: self.plain_text.clone(),
            rich_text: self.rich_text.clone(),
            metadata: self.metadata.clone(),
            phrases: Vec::new(),
        }
    }

    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".into(), json!(self.title));
        map.insert("title_translation".into(), json!(self.title_translation));
        map.insert("language".into(), json!(self.language));
        map.insert("plain_text".into(), json!(self.plain_text));
        map.insert("rich_text".into(), json!(self.rich_text));
        map.insert("metadata".into(), json!(self.metadata));
        if let Some(id) = &self.id {
            map.insert("id".into(), json!(id));
        }
        map
    }

    pub fn to_projection(&self) -> Value {
        let mut map = self.attributes();
        map.insert(
            "phrases".into(),
            Value::Array(self.phrases.iter().map(Phrase::to_projection).collect()),
        );
        Value::Object(map)
    }
}

impl Merge for Text {
    /// Appends the phrases of `other`; title and metadata of `self` are kept.
    fn merge(&mut self, other: Self) -> Result<()> {
        self.phrases.extend(other.phrases);
        Ok(())
    }
}

impl Index<usize> for Text {
    type Output = Phrase;

    fn index(&self, index: usize) -> &Phrase {
        &self.phrases[index]
    }
}

impl<'a> IntoIterator for &'a Text {
    type Item = &'a Phrase;
    type IntoIter = std::slice::Iter<'a, Phrase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phrases.iter()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_projection(f, &self.to_projection())
    }
}
