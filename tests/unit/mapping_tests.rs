/*!
 * Tests for tagset mapping over the model
 */

use typecraft::mapping::{TagSet, map_gloss, map_pos};
use typecraft::models::{Corpus, Morpheme, Phrase, Text, Word};

#[test]
fn test_mapPos_withSttsTags_shouldMapToTypecraft() {
    assert_eq!(map_pos("ADJA", TagSet::Tc), "ADJ");
    assert_eq!(map_pos("PPER", TagSet::Tc), "PN");
    assert_eq!(map_pos("KON", TagSet::Tc), "CONJC");
    assert_eq!(map_pos("$.", TagSet::Tc), "PUN");
}

#[test]
fn test_mapPos_withVerbFrameTags_shouldMap() {
    assert_eq!(map_pos("v-tr", TagSet::Tc), "Vtr");
    assert_eq!(map_pos("V-INTROBL", TagSet::Tc), "VitrOBL");
}

#[test]
fn test_mapGloss_shouldBeIdentity() {
    let glosses = vec!["3SG".to_string(), "PST".to_string()];
    assert_eq!(map_gloss(&glosses, TagSet::Tc), glosses);
}

#[test]
fn test_word_mapTags_shouldRewritePos() {
    let mut word = Word::new("Haus")
        .with_pos("NN")
        .with_morphemes([Morpheme::new("Haus").with_glosses(["NEUT"])]);

    word.map_tags(TagSet::Tc);

    assert_eq!(word.pos, "N");
    assert_eq!(word[0].glosses(), ["NEUT"]);
}

#[test]
fn test_text_mapTags_shouldReachEveryWord() {
    let phrase = Phrase::new("Ich gehe")
        .with_words([Word::new("Ich").with_pos("PPER"), Word::new("gehe").with_pos("VVFIN")]);
    let mut text = Text::new("t").with_phrases([phrase.clone(), phrase]);

    text.map_tags(TagSet::Tc);

    for phrase in &text {
        let tags: Vec<&str> = phrase.iter().map(|w| w.pos.as_str()).collect();
        assert_eq!(tags, vec!["PN", "V"]);
    }
}

#[test]
fn test_corpus_mapTags_withUnknownTags_shouldLeaveThem() {
    let mut corpus = Corpus::from(vec![Text::new("t").with_phrases([
        Phrase::new("x").with_words([Word::new("x").with_pos("CUSTOM")]),
    ])]);

    corpus.map_tags(TagSet::Tc);
    assert_eq!(corpus[0][0][0].pos, "CUSTOM");
}
