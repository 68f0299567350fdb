/*!
 * Tagger collaborators.
 *
 * A tagger assigns part-of-speech tags (and optionally lemmas and glosses)
 * to the words of a document, mutating them in place. The external tools
 * the Typecraft tooling historically wrapped (TreeTagger, the Oslo-Bergen
 * tagger, NLTK) are not bundled; the [`lexicon::LexiconTagger`] is the
 * reference implementation.
 */

use std::fmt::Debug;

use log::debug;

use crate::app_config::TaggerConfig;
use crate::errors::TaggerError;
use crate::models::{Phrase, Text, Word};

pub mod lexicon;
pub mod tokenization;

pub use lexicon::{Lexicon, LexiconEntry, LexiconTagger};

/// Common interface of all taggers
///
/// Only [`Tagger::tag_word`] has to be provided; texts and phrases are
/// tagged word by word unless an implementation can do better.
pub trait Tagger: Send + Sync + Debug {
    /// Short identifier, as accepted by [`get_tagger_by_name`]
    fn name(&self) -> &str;

    /// Whether the tagger also does morphological parsing and glossing
    fn is_parser(&self) -> bool {
        false
    }

    fn has_automatic_sentence_tokenization_support(&self, _language: &str) -> bool {
        false
    }

    fn has_automatic_word_tokenization_support(&self, _language: &str) -> bool {
        false
    }

    /// Tokenizes and tags raw text into phrases.
    fn tag_raw(&self, _raw: &str, language: &str) -> Result<Vec<Phrase>, TaggerError> {
        Err(TaggerError::Unsupported(format!(
            "{} cannot tag raw text in '{}'",
            self.name(),
            language
        )))
    }

    fn tag_text(&self, text: &mut Text, language: &str) -> Result<(), TaggerError> {
        debug!("Tagging text '{}' with {}", text.title, self.name());
        for phrase in text.phrases_mut() {
            self.tag_phrase(phrase, language)?;
        }
        Ok(())
    }

    fn tag_phrases(&self, phrases: &mut [Phrase], language: &str) -> Result<(), TaggerError> {
        for phrase in phrases {
            self.tag_phrase(phrase, language)?;
        }
        Ok(())
    }

    fn tag_phrase(&self, phrase: &mut Phrase, language: &str) -> Result<(), TaggerError> {
        for word in phrase.words_mut() {
            self.tag_word(word, language)?;
        }
        Ok(())
    }

    fn tag_word(&self, word: &mut Word, language: &str) -> Result<(), TaggerError>;
}

/// Resolves a tagger by (case-insensitive) name.
///
/// Names of the external taggers are recognized but report
/// [`TaggerError::Unavailable`], since none of them ship with this crate.
pub fn get_tagger_by_name(name: &str, config: &TaggerConfig) -> Result<Box<dyn Tagger>, TaggerError> {
    let lower = name.trim().to_lowercase();

    if lower.contains("lex") {
        let path = config.lexicon_path.as_deref().ok_or_else(|| {
            TaggerError::Unavailable("no lexicon_path configured for the lexicon tagger".to_string())
        })?;
        let tagger = LexiconTagger::from_file(path, config.lowercase_lookup)?;
        return Ok(Box::new(tagger));
    }

    for external in ["tree", "nltk", "obt"] {
        if lower.contains(external) {
            return Err(TaggerError::Unavailable(format!(
                "tagger '{}' needs an external tool that is not available",
                name
            )));
        }
    }

    Err(TaggerError::Unsupported(format!("tagger '{}' not found", name)))
}
