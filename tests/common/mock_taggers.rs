/*!
 * Mock tagger implementations for testing
 *
 * These avoid the need for any lexicon or external tool: the mock tags
 * every word with a fixed POS and records what it was asked to do.
 */

use std::sync::Mutex;

use typecraft::errors::TaggerError;
use typecraft::models::{Morpheme, Phrase, Word};
use typecraft::taggers::Tagger;

/// Tracks tagger calls
#[derive(Debug, Default)]
pub struct TagCallTracker {
    /// Number of words tagged
    pub words_tagged: usize,
    /// Language of the last call
    pub last_language: Option<String>,
}

/// Tags every word with `pos` and adds a lowercase lemma morpheme
#[derive(Debug)]
pub struct MockTagger {
    pos: String,
    pub tracker: Mutex<TagCallTracker>,
}

impl MockTagger {
    pub fn new(pos: &str) -> Self {
        Self {
            pos: pos.to_string(),
            tracker: Mutex::new(TagCallTracker::default()),
        }
    }

    pub fn words_tagged(&self) -> usize {
        self.tracker.lock().unwrap().words_tagged
    }

    pub fn last_language(&self) -> Option<String> {
        self.tracker.lock().unwrap().last_language.clone()
    }
}

impl Tagger for MockTagger {
    fn name(&self) -> &str {
        "mock"
    }

    fn tag_word(&self, word: &mut Word, language: &str) -> Result<(), TaggerError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.words_tagged += 1;
        tracker.last_language = Some(language.to_string());

        word.pos = self.pos.clone();
        if word.is_empty() {
            let lemma = word.word.to_lowercase();
            word.add_morpheme(Morpheme::new(word.word.as_str()).with_baseform(lemma));
        }
        Ok(())
    }
}

/// Always reports the external tool as missing
#[derive(Debug, Default)]
pub struct UnavailableTagger;

impl Tagger for UnavailableTagger {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn tag_raw(&self, _raw: &str, _language: &str) -> Result<Vec<Phrase>, TaggerError> {
        Err(TaggerError::Unavailable("tool not installed".to_string()))
    }

    fn tag_word(&self, _word: &mut Word, _language: &str) -> Result<(), TaggerError> {
        Err(TaggerError::Unavailable("tool not installed".to_string()))
    }
}
