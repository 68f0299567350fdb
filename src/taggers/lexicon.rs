use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::Tagger;
use super::tokenization::{sentence_tokenize, word_tokenize};
use crate::errors::TaggerError;
use crate::models::{Morpheme, Phrase, Word};

/// Tags of one surface form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LexiconEntry {
    pub pos: String,

    #[serde(default)]
    pub lemma: Option<String>,

    #[serde(default)]
    pub glosses: Vec<String>,
}

/// A JSON lexicon: `{"entries": {"dog": {"pos": "nn", "lemma": "dog"}}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lexicon {
    #[serde(default)]
    pub entries: HashMap<String, LexiconEntry>,
}

/// Tags words by looking them up in a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Lexicon,
    lowercase_lookup: bool,
}

impl LexiconTagger {
    pub fn new(lexicon: Lexicon, lowercase_lookup: bool) -> Self {
        let lexicon = if lowercase_lookup {
            Lexicon {
                entries: lexicon
                    .entries
                    .into_iter()
                    .map(|(form, entry)| (form.to_lowercase(), entry))
                    .collect(),
            }
        } else {
            lexicon
        };
        Self {
            lexicon,
            lowercase_lookup,
        }
    }

    pub fn from_json(json: &str, lowercase_lookup: bool) -> Result<Self, TaggerError> {
        let lexicon: Lexicon = serde_json::from_str(json)
            .map_err(|e| TaggerError::Unavailable(format!("invalid lexicon: {}", e)))?;
        Ok(Self::new(lexicon, lowercase_lookup))
    }

    pub fn from_file<P: AsRef<Path>>(path: P, lowercase_lookup: bool) -> Result<Self, TaggerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TaggerError::Unavailable(format!("cannot read lexicon {:?}: {}", path, e))
        })?;
        let tagger = Self::from_json(&content, lowercase_lookup)?;
        info!("Loaded lexicon with {} entries from {:?}", tagger.len(), path);
        Ok(tagger)
    }

    pub fn len(&self) -> usize {
        self.lexicon.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.entries.is_empty()
    }

    pub fn lookup(&self, form: &str) -> Option<&LexiconEntry> {
        if self.lowercase_lookup {
            self.lexicon.entries.get(&form.to_lowercase())
        } else {
            self.lexicon.entries.get(form)
        }
    }
}

impl Tagger for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn is_parser(&self) -> bool {
        self.lexicon
            .entries
            .values()
            .any(|entry| !entry.glosses.is_empty())
    }

    fn has_automatic_sentence_tokenization_support(&self, _language: &str) -> bool {
        true
    }

    fn has_automatic_word_tokenization_support(&self, _language: &str) -> bool {
        true
    }

    fn tag_raw(&self, raw: &str, language: &str) -> Result<Vec<Phrase>, TaggerError> {
        let mut phrases = Vec::new();
        for sentence in sentence_tokenize(raw) {
            let words: Vec<Word> = word_tokenize(&sentence)
                .iter()
                .map(|token| Word::from_text(token))
                .collect();
            let mut phrase = Phrase::new(sentence).with_words(words);
            self.tag_phrase(&mut phrase, language)?;
            phrases.push(phrase);
        }
        Ok(phrases)
    }

    /// Unknown words are left untouched. A lemma only adds a morpheme when
    /// the word has none yet.
    fn tag_word(&self, word: &mut Word, _language: &str) -> Result<(), TaggerError> {
        let Some(entry) = self.lookup(&word.word) else {
            debug!("No lexicon entry for '{}'", word.word);
            return Ok(());
        };

        word.pos = entry.pos.clone();
        if let Some(lemma) = &entry.lemma {
            if word.is_empty() {
                let morpheme = Morpheme::new(word.word.as_str())
                    .with_baseform(lemma.as_str())
                    .with_glosses(entry.glosses.iter().cloned());
                word.add_morpheme(morpheme);
            }
        }
        Ok(())
    }
}
