use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::errors::{Result, TypecraftError};
use crate::mapping::TagSet;
use crate::models::{GlobalTag, GlobalTagSet, Merge, PhraseValidity, Word};
use crate::traversal::{self, TagClearer, TagMapper};

/// A phrase: an original utterance, its translations and its words.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    /// Source identifier, only present when read from input
    pub id: Option<String>,
    pub phrase: String,
    pub translation: String,
    pub translation2: String,
    pub comment: String,
    pub validity: PhraseValidity,
    pub offset: u64,
    pub duration: u64,
    senses: Vec<String>,
    global_tags: Vec<GlobalTag>,
    global_tag_set: Arc<GlobalTagSet>,
    words: Vec<Word>,
}

impl Default for Phrase {
    fn default() -> Self {
        Self {
            id: None,
            phrase: String::new(),
            translation: String::new(),
            translation2: String::new(),
            comment: String::new(),
            validity: PhraseValidity::default(),
            offset: 0,
            duration: 0,
            senses: Vec::new(),
            global_tags: Vec::new(),
            global_tag_set: GlobalTagSet::shared_default(),
            words: Vec::new(),
        }
    }
}

impl Phrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_translation2(mut self, translation2: impl Into<String>) -> Self {
        self.translation2 = translation2.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_validity(mut self, validity: PhraseValidity) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_words<I: IntoIterator<Item = Word>>(mut self, words: I) -> Self {
        self.add_words(words);
        self
    }

    pub fn with_global_tags<I: IntoIterator<Item = GlobalTag>>(mut self, tags: I) -> Self {
        self.add_global_tags(tags);
        self
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    pub fn add_words<I: IntoIterator<Item = Word>>(&mut self, words: I) {
        self.words.extend(words);
    }

    pub fn remove_word(&mut self, word: &Word) -> Result<Word> {
        let index = self
            .words
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| TypecraftError::NotFound(format!("word '{}'", word.word)))?;
        Ok(self.words.remove(index))
    }

    /// Drops the word children; `phrase` itself is left alone.
    pub fn clear_words(&mut self) {
        self.words.clear();
    }

    pub fn senses(&self) -> &[String] {
        &self.senses
    }

    pub fn add_sense(&mut self, sense: impl Into<String>) {
        self.senses.push(sense.into());
    }

    pub fn add_senses<I, S>(&mut self, senses: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senses.extend(senses.into_iter().map(Into::into));
    }

    pub fn clear_senses(&mut self) {
        self.senses.clear();
    }

    pub fn global_tags(&self) -> &[GlobalTag] {
        &self.global_tags
    }

    pub fn add_global_tag(&mut self, tag: GlobalTag) {
        self.global_tags.push(tag);
    }

    pub fn add_global_tags<I: IntoIterator<Item = GlobalTag>>(&mut self, tags: I) {
        self.global_tags.extend(tags);
    }

    pub fn remove_global_tag(&mut self, tag: &GlobalTag) -> Result<GlobalTag> {
        let index = self
            .global_tags
            .iter()
            .position(|t| t == tag)
            .ok_or_else(|| TypecraftError::NotFound(format!("global tag '{}'", tag.name)))?;
        Ok(self.global_tags.remove(index))
    }

    /// Drops every global tag on `level`; returns how many were removed.
    pub fn remove_global_tags_by_level(&mut self, level: &str) -> usize {
        let before = self.global_tags.len();
        self.global_tags.retain(|tag| tag.level != level);
        before - self.global_tags.len()
    }

    pub fn clear_global_tags(&mut self) {
        self.global_tags.clear();
    }

    pub fn global_tag_set(&self) -> &GlobalTagSet {
        &self.global_tag_set
    }

    pub fn set_global_tag_set(&mut self, tagset: Arc<GlobalTagSet>) {
        self.global_tag_set = tagset;
    }

    /// Clears global tags and senses, then the tags of every word.
    pub fn clear_tags(&mut self) {
        traversal::walk_phrase_mut(self, &mut TagClearer);
    }

    pub fn map_tags(&mut self, tagset: TagSet) {
        traversal::walk_phrase_mut(self, &mut TagMapper::new(tagset));
    }

    /// The phrase text, or the detokenized words when it is empty.
    pub fn detokenize(&self) -> String {
        traversal::detokenize_phrase(self)
    }

    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("phrase".into(), json!(self.phrase));
        map.insert("translation".into(), json!(self.translation));
        map.insert("translation2".into(), json!(self.translation2));
        map.insert("comment".into(), json!(self.comment));
        map.insert("validity".into(), json!(self.validity.as_str()));
        map.insert("offset".into(), json!(self.offset));
        map.insert("duration".into(), json!(self.duration));
        map.insert("senses".into(), json!(self.senses));
        map.insert("global_tag_set".into(), self.global_tag_set.to_projection());
        if let Some(id) = &self.id {
            map.insert("id".into(), json!(id));
        }
        map
    }

    pub fn to_projection(&self) -> Value {
        let mut map = self.attributes();
        map.insert(
            "global_tags".into(),
            Value::Array(self.global_tags.iter().map(GlobalTag::to_projection).collect()),
        );
        map.insert(
            "words".into(),
            Value::Array(self.words.iter().map(Word::to_projection).collect()),
        );
        Value::Object(map)
    }
}

impl Merge for Phrase {
    /// Appends `other` to this phrase: texts are joined with a space
    /// (the comment with a newline), durations summed, senses and words
    /// concatenated.
    fn merge(&mut self, other: Self) -> Result<()> {
        self.phrase = format!("{} {}", self.phrase, other.phrase);
        self.translation = format!("{} {}", self.translation, other.translation);
        self.translation2 = format!("{} {}", self.translation2, other.translation2);
        self.comment = format!("{}\n{}", self.comment, other.comment);
        self.duration += other.duration;
        self.senses.extend(other.senses);
        self.words.extend(other.words);
        Ok(())
    }
}

impl Index<usize> for Phrase {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.words[index]
    }
}

impl<'a> IntoIterator for &'a Phrase {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_projection(f, &self.to_projection())
    }
}
