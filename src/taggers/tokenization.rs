/*!
 * Rule based sentence and word tokenization.
 *
 * These are deliberately simple: sentences end at terminal punctuation
 * followed by whitespace (or at a blank line), and words are runs of
 * letters and digits with clitics and punctuation split off, so that
 * [`crate::convenience::detokenize`] restores the original spacing.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Phrase, Word};

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["')\]]*\s+|\n[ \t]*\n\s*"#).expect("Invalid sentence boundary regex")
});

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:[.,\-][\p{L}\p{N}]+)*|'[\p{L}]+|\.\.\.|[^\s\p{L}\p{N}]")
        .expect("Invalid word token regex")
});

/// Splits raw text into trimmed, non-empty sentences.
pub fn sentence_tokenize(raw: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(raw) {
        let sentence = raw[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = boundary.end();
    }

    let rest = raw[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Splits a sentence into word tokens: `"I've left."` gives `["I", "'ve", "left", "."]`.
pub fn word_tokenize(sentence: &str) -> Vec<String> {
    WORD_TOKEN
        .find_iter(sentence)
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Replaces the words of `phrase` with the tokens of its text.
pub fn tokenize_phrase(phrase: &mut Phrase) {
    let words: Vec<Word> = word_tokenize(&phrase.phrase)
        .iter()
        .map(|token| Word::from_text(token))
        .collect();
    phrase.clear_words();
    phrase.add_words(words);
}

/// One untokenized phrase per sentence
pub fn raw_text_to_phrases(raw: &str) -> Vec<Phrase> {
    sentence_tokenize(raw).into_iter().map(Phrase::new).collect()
}

/// One phrase per sentence, each split into words
pub fn raw_text_to_tokenized_phrases(raw: &str) -> Vec<Phrase> {
    let mut phrases = raw_text_to_phrases(raw);
    for phrase in &mut phrases {
        tokenize_phrase(phrase);
    }
    phrases
}
