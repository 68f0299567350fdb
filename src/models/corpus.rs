use std::fmt;
use std::ops::Index;

use serde_json::{Value, json};

use crate::errors::Result;
use crate::mapping::TagSet;
use crate::models::{Merge, Text};
use crate::traversal::{self, TagMapper};

/// An ordered collection of texts; the in-memory image of one XML document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corpus {
    texts: Vec<Text>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    pub fn texts_mut(&mut self) -> &mut [Text] {
        &mut self.texts
    }

    pub fn into_texts(self) -> Vec<Text> {
        self.texts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Text> {
        self.texts.iter()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn add_text(&mut self, text: Text) {
        self.texts.push(text);
    }

    pub fn map_tags(&mut self, tagset: TagSet) {
        traversal::walk_corpus_mut(self, &mut TagMapper::new(tagset));
    }

    /// Every text detokenized, separated by newlines
    pub fn detokenize(&self) -> String {
        self.texts
            .iter()
            .map(Text::detokenize)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_projection(&self) -> Value {
        json!({
            "texts": self.texts.iter().map(Text::to_projection).collect::<Vec<_>>()
        })
    }
}

impl From<Vec<Text>> for Corpus {
    fn from(texts: Vec<Text>) -> Self {
        Self { texts }
    }
}

impl Merge for Corpus {
    fn merge(&mut self, other: Self) -> Result<()> {
        self.texts.extend(other.texts);
        Ok(())
    }
}

impl Index<usize> for Corpus {
    type Output = Text;

    fn index(&self, index: usize) -> &Text {
        &self.texts[index]
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Text;
    type IntoIter = std::slice::Iter<'a, Text>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.iter()
    }
}

impl IntoIterator for Corpus {
    type Item = Text;
    type IntoIter = std::vec::IntoIter<Text>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.into_iter()
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Corpus with {} texts", self.texts.len())
    }
}
