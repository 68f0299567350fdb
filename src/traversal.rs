/*!
 * Walks over the ownership tree.
 *
 * Cross-cutting operations (tag mapping, tag clearing, detokenization) are
 * expressed as visitors here so the model types stay unaware of them.
 */

use crate::convenience;
use crate::mapping::{self, TagSet};
use crate::models::{Corpus, Morpheme, Phrase, Text, Word};

/// Mutable pre-order visitor. Every hook defaults to a no-op.
pub trait VisitorMut {
    fn visit_text(&mut self, _text: &mut Text) {}
    fn visit_phrase(&mut self, _phrase: &mut Phrase) {}
    fn visit_word(&mut self, _word: &mut Word) {}
    fn visit_morpheme(&mut self, _morpheme: &mut Morpheme) {}
}

pub fn walk_corpus_mut<V: VisitorMut + ?Sized>(corpus: &mut Corpus, visitor: &mut V) {
    for text in corpus.texts_mut() {
        walk_text_mut(text, visitor);
    }
}

pub fn walk_text_mut<V: VisitorMut + ?Sized>(text: &mut Text, visitor: &mut V) {
    visitor.visit_text(text);
    for phrase in text.phrases_mut() {
        walk_phrase_mut(phrase, visitor);
    }
}

pub fn walk_phrase_mut<V: VisitorMut + ?Sized>(phrase: &mut Phrase, visitor: &mut V) {
    visitor.visit_phrase(phrase);
    for word in phrase.words_mut() {
        walk_word_mut(word, visitor);
    }
}

pub fn walk_word_mut<V: VisitorMut + ?Sized>(word: &mut Word, visitor: &mut V) {
    visitor.visit_word(word);
    for morpheme in word.morphemes_mut() {
        visitor.visit_morpheme(morpheme);
    }
}

/// Rewrites POS tags and glosses into a target tagset
#[derive(Debug, Clone, Copy)]
pub struct TagMapper {
    tagset: TagSet,
}

impl TagMapper {
    pub fn new(tagset: TagSet) -> Self {
        Self { tagset }
    }
}

impl VisitorMut for TagMapper {
    fn visit_word(&mut self, word: &mut Word) {
        word.pos = mapping::map_pos(&word.pos, self.tagset);
    }

    fn visit_morpheme(&mut self, morpheme: &mut Morpheme) {
        let mapped = mapping::map_gloss(morpheme.glosses(), self.tagset);
        morpheme.replace_glosses(mapped);
    }
}

/// Removes every annotation tag: senses, global tags, POS and glosses
#[derive(Debug, Clone, Copy, Default)]
pub struct TagClearer;

impl VisitorMut for TagClearer {
    fn visit_phrase(&mut self, phrase: &mut Phrase) {
        phrase.clear_global_tags();
        phrase.clear_senses();
    }

    fn visit_word(&mut self, word: &mut Word) {
        word.pos.clear();
    }

    fn visit_morpheme(&mut self, morpheme: &mut Morpheme) {
        morpheme.clear_glosses();
    }
}

/// Counts the entities below (and including) the visited node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounter {
    pub texts: usize,
    pub phrases: usize,
    pub words: usize,
    pub morphemes: usize,
}

impl VisitorMut for NodeCounter {
    fn visit_text(&mut self, _text: &mut Text) {
        self.texts += 1;
    }

    fn visit_phrase(&mut self, _phrase: &mut Phrase) {
        self.phrases += 1;
    }

    fn visit_word(&mut self, _word: &mut Word) {
        self.words += 1;
    }

    fn visit_morpheme(&mut self, _morpheme: &mut Morpheme) {
        self.morphemes += 1;
    }
}

pub fn detokenize_text(text: &Text) -> String {
    if !text.plain_text.is_empty() {
        return text.plain_text.clone();
    }
    text.iter()
        .map(detokenize_phrase)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn detokenize_phrase(phrase: &Phrase) -> String {
    if !phrase.phrase.is_empty() {
        return phrase.phrase.clone();
    }
    convenience::detokenize(phrase.iter().map(Word::detokenize))
}
