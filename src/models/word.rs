use std::fmt;
use std::ops::Index;

use serde_json::{Map, Value, json};

use crate::errors::{Result, TypecraftError};
use crate::mapping::TagSet;
use crate::models::{Merge, Morpheme};
use crate::traversal::{self, TagClearer, TagMapper};

/// A word: a surface form, a part-of-speech tag and its morphemes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    /// Source identifier, only present when read from input
    pub id: Option<String>,
    pub word: String,
    pub ipa: String,
    pub pos: String,
    /// Head flag, only present when read from input or set explicitly
    pub head: Option<bool>,
    morphemes: Vec<Morpheme>,
    stem_morpheme: Option<usize>,
}

impl Word {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    /// Same as [`Word::new`]; the name the tokenizers use
    pub fn from_text(word: &str) -> Self {
        Self::new(word)
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    pub fn with_ipa(mut self, ipa: impl Into<String>) -> Self {
        self.ipa = ipa.into();
        self
    }

    pub fn with_morphemes<I: IntoIterator<Item = Morpheme>>(mut self, morphemes: I) -> Self {
        self.add_morphemes(morphemes);
        self
    }

    pub fn morphemes(&self) -> &[Morpheme] {
        &self.morphemes
    }

    pub fn morphemes_mut(&mut self) -> &mut [Morpheme] {
        &mut self.morphemes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Morpheme> {
        self.morphemes.iter()
    }

    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    pub fn add_morpheme(&mut self, morpheme: Morpheme) {
        self.morphemes.push(morpheme);
    }

    pub fn add_morphemes<I: IntoIterator<Item = Morpheme>>(&mut self, morphemes: I) {
        self.morphemes.extend(morphemes);
    }

    /// Removes the first morpheme equal to `morpheme`.
    ///
    /// The stem reference follows the morpheme it pointed at, and is
    /// cleared if that morpheme is the one removed.
    pub fn remove_morpheme(&mut self, morpheme: &Morpheme) -> Result<Morpheme> {
        let index = self
            .morphemes
            .iter()
            .position(|m| m == morpheme)
            .ok_or_else(|| TypecraftError::NotFound(format!("morpheme '{}'", morpheme.morpheme)))?;

        self.stem_morpheme = match self.stem_morpheme {
            Some(stem) if stem == index => None,
            Some(stem) if stem > index => Some(stem - 1),
            other => other,
        };
        Ok(self.morphemes.remove(index))
    }

    pub fn clear_morphemes(&mut self) {
        self.morphemes.clear();
        self.stem_morpheme = None;
    }

    /// The stem, always one of this word's own morphemes
    pub fn stem_morpheme(&self) -> Option<&Morpheme> {
        self.stem_morpheme.and_then(|index| self.morphemes.get(index))
    }

    pub fn stem_morpheme_index(&self) -> Option<usize> {
        self.stem_morpheme
    }

    /// Marks the morpheme at `index` as the stem.
    pub fn set_stem_morpheme(&mut self, index: usize) -> Result<()> {
        if index >= self.morphemes.len() {
            return Err(TypecraftError::NotFound(format!(
                "morpheme {} of word '{}' ({} morphemes)",
                index,
                self.word,
                self.morphemes.len()
            )));
        }
        self.stem_morpheme = Some(index);
        Ok(())
    }

    pub fn clear_stem_morpheme(&mut self) {
        self.stem_morpheme = None;
    }

    /// Empties the POS tag and the glosses of every morpheme.
    pub fn clear_tags(&mut self) {
        traversal::walk_word_mut(self, &mut TagClearer);
    }

    /// Rewrites the POS tag (and glosses) into `tagset`.
    pub fn map_tags(&mut self, tagset: TagSet) {
        traversal::walk_word_mut(self, &mut TagMapper::new(tagset));
    }

    pub fn detokenize(&self) -> &str {
        &self.word
    }

    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("word".into(), json!(self.word));
        map.insert("ipa".into(), json!(self.ipa));
        map.insert("pos".into(), json!(self.pos));
        map.insert(
            "stem_morpheme".into(),
            self.stem_morpheme()
                .map_or(Value::Null, |stem| json!(stem.morpheme)),
        );
        if let Some(id) = &self.id {
            map.insert("id".into(), json!(id));
        }
        if let Some(head) = self.head {
            map.insert("head".into(), json!(head));
        }
        map
    }

    pub fn to_projection(&self) -> Value {
        let mut map = self.attributes();
        map.insert(
            "morphemes".into(),
            Value::Array(self.morphemes.iter().map(Morpheme::to_projection).collect()),
        );
        Value::Object(map)
    }
}

impl Merge for Word {
    fn merge(&mut self, _other: Self) -> Result<()> {
        Err(TypecraftError::UnsupportedOperation(
            "merge is not defined for words".to_string(),
        ))
    }
}

impl Index<usize> for Word {
    type Output = Morpheme;

    fn index(&self, index: usize) -> &Morpheme {
        &self.morphemes[index]
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Morpheme;
    type IntoIter = std::slice::Iter<'a, Morpheme>;

    fn into_iter(self) -> Self::IntoIter {
        self.morphemes.iter()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_projection(f, &self.to_projection())
    }
}
