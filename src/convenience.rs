/*!
 * Helpers that build phrases from token lists and common plain-text
 * corpus formats.
 */

use crate::models::{Morpheme, Phrase, Word};

// @const: ASCII punctuation, in the order tokens are matched against it
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.contains(token)
}

/// Joins tokens into a sentence.
///
/// Tokens are separated by a space, except clitics starting with `'`
/// and punctuation, which attach to the previous token:
/// `["This", "is", "cool", "."]` becomes `"This is cool."`.
pub fn detokenize<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for token in tokens {
        let token = token.as_ref();
        if !token.starts_with('\'') && !is_punctuation(token) {
            out.push(' ');
        }
        out.push_str(token);
    }
    out.trim().to_string()
}

/// A phrase whose words are `words`, with the detokenized text as `phrase`
pub fn words_to_phrase<I, S>(words: I) -> Phrase
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let words: Vec<Word> = words
        .into_iter()
        .map(|word| Word::from_text(word.as_ref()))
        .collect();
    build_phrase(words)
}

/// A phrase from `(word, pos)` pairs
pub fn word_pos_tuples_to_phrase<I, W, P>(pairs: I) -> Phrase
where
    I: IntoIterator<Item = (W, P)>,
    W: AsRef<str>,
    P: AsRef<str>,
{
    let words: Vec<Word> = pairs
        .into_iter()
        .map(|(word, pos)| Word::from_text(word.as_ref()).with_pos(pos.as_ref()))
        .collect();
    build_phrase(words)
}

/// A phrase from `(word, pos, lemma)` triples; each word gets one morpheme
/// with the lemma as baseform.
pub fn word_pos_lemma_tuples_to_phrase<I, W, P, L>(triples: I) -> Phrase
where
    I: IntoIterator<Item = (W, P, L)>,
    W: AsRef<str>,
    P: AsRef<str>,
    L: AsRef<str>,
{
    let words: Vec<Word> = triples
        .into_iter()
        .map(|(word, pos, lemma)| {
            let word = word.as_ref();
            Word::from_text(word)
                .with_pos(pos.as_ref())
                .with_morphemes([Morpheme::new(word).with_baseform(lemma.as_ref())])
        })
        .collect();
    build_phrase(words)
}

fn build_phrase(words: Vec<Word>) -> Phrase {
    let text = detokenize(words.iter().map(Word::detokenize));
    Phrase::new(text).with_words(words)
}

fn split_tagged_tokens(line: &str, separator: char) -> Vec<(&str, &str)> {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| token.rsplit_once(separator).unwrap_or((token, "")))
        .collect()
}

/// Parses a Brown-corpus style line such as `The/at home/nr ./.`.
///
/// Tokens are split on their last `/`; a token without one gets an empty tag.
pub fn parse_slash_separated_phrase(line: &str) -> Phrase {
    word_pos_tuples_to_phrase(split_tagged_tokens(line, '/'))
}

/// Parses an LCC style line such as `Aber|KON es|PPER gibt|VVFIN`.
pub fn parse_bar_separated_phrase(line: &str) -> Phrase {
    word_pos_tuples_to_phrase(split_tagged_tokens(line, '|'))
}

/// Consecutive chunks of at most `size` items; `size` 0 is treated as 1
pub fn batch<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

/// `parts` contiguous slices whose lengths differ by at most one.
///
/// Earlier parts take the remainder, so 7 items in 3 parts gives 3, 2, 2.
pub fn split<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    let parts = parts.max(1);
    let (size, remainder) = (items.len() / parts, items.len() % parts);
    (0..parts)
        .map(|i| {
            let start = i * size + i.min(remainder);
            let end = (i + 1) * size + (i + 1).min(remainder);
            &items[start..end]
        })
        .collect()
}

/// Parses parallel text: each group of `languages` non-empty lines becomes
/// one phrase (original, translation, second translation).
pub fn parse_parallel_text_to_phrases(raw: &str, languages: usize, strip: bool) -> Vec<Phrase> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| if strip { line.trim() } else { line })
        .filter(|line| !line.is_empty())
        .collect();

    batch(&lines, languages)
        .into_iter()
        .map(|group| {
            let mut phrase = Phrase::new(group[0]);
            if let Some(translation) = group.get(1) {
                phrase.translation = translation.to_string();
            }
            if let Some(translation2) = group.get(2) {
                phrase.translation2 = translation2.to_string();
            }
            phrase
        })
        .collect()
}
