/*!
 * End-to-end tests of the tpy command pipelines
 */

use std::fs;

use anyhow::Result;

use typecraft::app_config::Config;
use typecraft::app_controller::{Controller, RawOptions, XmlOptions};
use typecraft::models::{Phrase, Text, Word};
use typecraft::xml;

use crate::common;
use crate::common::mock_taggers::{MockTagger, UnavailableTagger};

fn untagged_raw() -> RawOptions {
    RawOptions {
        tag: false,
        ..RawOptions::default()
    }
}

fn texts_with_phrases(counts: &[usize]) -> Vec<Text> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Text::new(format!("Text {}", i))
                .with_language("nob")
                .with_phrases((0..count).map(|j| Phrase::new(format!("{}-{}", i, j))))
        })
        .collect()
}

/// Test that raw input becomes one tokenized text with config defaults
#[test]
fn test_raw_withDefaults_shouldBuildTokenizedText() -> Result<()> {
    let controller = Controller::new_for_test()?;

    let text = controller.build_raw_text("Hello world. How are you?", &untagged_raw())?;

    assert_eq!(text.title, "Automatically generated text from tpy");
    assert_eq!(text.language, "eng");
    assert_eq!(text.len(), 2);
    assert_eq!(text[0].phrase, "Hello world.");
    let forms: Vec<&str> = text[1].iter().map(|w| w.word.as_str()).collect();
    assert_eq!(forms, vec!["How", "are", "you", "?"]);
    Ok(())
}

#[test]
fn test_raw_withoutSentenceTokenization_shouldBuildSinglePhrase() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = RawOptions {
        sent_tokenize: false,
        tokenize: false,
        ..untagged_raw()
    };

    let text = controller.build_raw_text("  One. Two.\n", &options)?;

    assert_eq!(text.len(), 1);
    assert_eq!(text[0].phrase, "One. Two.");
    assert!(text[0].is_empty());
    Ok(())
}

#[test]
fn test_raw_withTitleLanguageAndMeta_shouldApplyThem() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = RawOptions {
        title: Some("Eventyr".to_string()),
        language: Some("nb".to_string()),
        meta: vec![("source".to_string(), "folk".to_string())],
        ..untagged_raw()
    };

    let text = controller.build_raw_text("Det var en gang.", &options)?;

    assert_eq!(text.title, "Eventyr");
    assert_eq!(text.language, "nob");
    assert_eq!(text.metadata().get("source").map(String::as_str), Some("folk"));
    Ok(())
}

#[test]
fn test_raw_withInvalidLanguage_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = RawOptions {
        language: Some("klingon".to_string()),
        ..untagged_raw()
    };

    assert!(controller.build_raw_text("Qapla'", &options).is_err());
    Ok(())
}

#[test]
fn test_raw_withMockTagger_shouldTagEveryWord() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let tagger = MockTagger::new("N");

    let text = controller.build_raw_text_with("Dogs bark.", &RawOptions::default(), Some(&tagger))?;

    assert_eq!(tagger.words_tagged(), 3);
    assert_eq!(tagger.last_language().as_deref(), Some("eng"));
    assert!(text[0].iter().all(|w| w.pos == "N"));
    Ok(())
}

#[test]
fn test_raw_withDefaultTaggerAndNoLexicon_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.process_raw("Hello.", &RawOptions::default()).is_err());
    Ok(())
}

#[test]
fn test_raw_withLexiconConfig_shouldWriteTaggedXml() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lexicon = common::create_test_file(
        temp_dir.path(),
        "lexicon.json",
        r#"{"entries": {"hund": {"pos": "NN", "lemma": "hund"}}}"#,
    )?;
    let mut config = Config::default();
    config.default_language = "nob".to_string();
    config.tagger.lexicon_path = Some(lexicon.to_string_lossy().to_string());
    let controller = Controller::with_config(config)?;

    let bytes = controller.process_raw("En hund.", &RawOptions::default())?;
    let output = String::from_utf8(bytes)?;

    assert!(output.contains(r#"<word text="hund" head="false"><pos>NN</pos>"#));
    assert!(output.contains(r#"<text lang="nob">"#));
    Ok(())
}

#[test]
fn test_runRaw_withOutputFile_shouldWriteParsableXml() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "input.txt", "First one. Second one.")?;
    let output = temp_dir.path().join("out").join("result.xml");
    let controller = Controller::new_for_test()?;

    controller.run_raw(&input, Some(&output), &untagged_raw())?;

    let texts = xml::parse_file(&output)?;
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].len(), 2);
    Ok(())
}

/// Test the xml pipeline with title, meta and tag mapping
#[test]
fn test_xml_withTitleMetaAndMapTags_shouldTransformEveryText() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        title: Some("Renamed".to_string()),
        meta: vec![("k".to_string(), "v".to_string())],
        map_tags: true,
        ..XmlOptions::default()
    };
    let texts = vec![Text::new("Old").with_phrases([
        Phrase::new("Ich").with_words([Word::new("Ich").with_pos("PPER")]),
    ])];

    let result = controller.transform_texts(texts, &options)?;

    assert_eq!(result[0].title, "Renamed");
    assert_eq!(result[0].metadata().get("k").map(String::as_str), Some("v"));
    assert_eq!(result[0][0][0].pos, "PN");
    Ok(())
}

#[test]
fn test_xml_withSplit_shouldCopyTextFieldsIntoParts() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        split: 3,
        ..XmlOptions::default()
    };

    let result = controller.transform_texts(texts_with_phrases(&[7, 2]), &options)?;

    let sizes: Vec<usize> = result.iter().map(Text::len).collect();
    assert_eq!(sizes, vec![3, 2, 2, 1, 1, 0]);
    assert!(result[..3].iter().all(|t| t.title == "Text 0" && t.language == "nob"));
    assert_eq!(result[1][0].phrase, "0-3");
    assert_eq!(result[3].title, "Text 1");
    Ok(())
}

#[test]
fn test_xml_withMerge_shouldFoldIntoFirstText() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        merge: true,
        ..XmlOptions::default()
    };

    let result = controller.transform_texts(texts_with_phrases(&[1, 2, 1]), &options)?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "Text 0");
    let phrases: Vec<&str> = result[0].iter().map(|p| p.phrase.as_str()).collect();
    assert_eq!(phrases, vec!["0-0", "1-0", "1-1", "2-0"]);
    Ok(())
}

#[test]
fn test_xml_withMergeAndSplit_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        merge: true,
        split: 2,
        ..XmlOptions::default()
    };

    let err = controller
        .transform_texts(texts_with_phrases(&[2]), &options)
        .unwrap_err();
    assert!(err.to_string().contains("merge and split"));
    Ok(())
}

#[test]
fn test_xml_withTokenize_shouldOnlyTokenizeEmptyPhrases() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        tokenize: true,
        ..XmlOptions::default()
    };
    let texts = vec![Text::new("t").with_phrases([
        Phrase::new("Two words"),
        Phrase::new("Kept as is").with_words([Word::new("Kept-as-is")]),
    ])];

    let result = controller.transform_texts(texts, &options)?;

    assert_eq!(result[0][0].len(), 2);
    assert_eq!(result[0][1].len(), 1);
    assert_eq!(result[0][1][0].word, "Kept-as-is");
    Ok(())
}

#[test]
fn test_xml_withOverrideLanguage_shouldTagWithIt() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let tagger = MockTagger::new("V");
    let options = XmlOptions {
        tag: true,
        override_language: Some("deu".to_string()),
        ..XmlOptions::default()
    };
    let texts = xml::parse(common::TORMOD_XML)?;

    let result = controller.transform_texts_with(texts, &options, Some(&tagger))?;

    assert_eq!(tagger.words_tagged(), 4);
    assert_eq!(tagger.last_language().as_deref(), Some("deu"));
    assert!(result[0][0].iter().all(|w| w.pos == "V"));
    assert_eq!(result[0].language, "kri");
    Ok(())
}

#[test]
fn test_xml_withTextLanguage_shouldTagWithEachTextsLanguage() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let tagger = MockTagger::new("V");
    let options = XmlOptions {
        tag: true,
        ..XmlOptions::default()
    };

    controller.transform_texts_with(xml::parse(common::TORMOD_XML)?, &options, Some(&tagger))?;

    assert_eq!(tagger.last_language().as_deref(), Some("kri"));
    Ok(())
}

#[test]
fn test_xml_withFailingTagger_shouldPropagateError() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        tag: true,
        ..XmlOptions::default()
    };

    let result =
        controller.transform_texts_with(xml::parse(common::TORMOD_XML)?, &options, Some(&UnavailableTagger));
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_processXml_strictAndLenient_shouldFollowOptions() -> Result<()> {
    let controller = Controller::new_for_test()?;

    let strict = controller.process_xml(common::MISSING_TITLE_TRANSLATION_XML, &XmlOptions::default());
    assert!(strict.is_err());

    let options = XmlOptions {
        lenient: true,
        ..XmlOptions::default()
    };
    let bytes = controller.process_xml(common::MISSING_TITLE_TRANSLATION_XML, &options)?;
    assert!(String::from_utf8(bytes)?.contains("<titleTranslation/>"));
    Ok(())
}

#[test]
fn test_processXml_withLenientConfig_shouldAcceptIncompleteInput() -> Result<()> {
    let mut config = Config::default();
    config.strict_mode = false;
    config.output.pretty = true;
    let controller = Controller::with_config(config)?;

    let bytes = controller.process_xml(common::MISSING_TITLE_TRANSLATION_XML, &XmlOptions::default())?;
    let output = String::from_utf8(bytes)?;

    assert!(output.contains("\n  <text"));
    Ok(())
}

#[test]
fn test_runXml_withFiles_shouldWriteTransformedDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "in.xml", common::GLOBAL_TAGS_XML)?;
    let output = temp_dir.path().join("out.xml");
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        title: Some("Tagged".to_string()),
        ..XmlOptions::default()
    };

    controller.run_xml(&input, Some(&output), &options)?;

    let texts = xml::parse(&fs::read_to_string(&output)?)?;
    assert_eq!(texts[0].title, "Tagged");
    assert_eq!(texts[0][0].global_tags().len(), 8);
    Ok(())
}

#[test]
fn test_countTexts_withDocument_shouldCountTexts() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let document = common::wrap_texts(
        &[
            common::text_element("nob", &["a"]),
            common::text_element("eng", &[]),
            common::text_element("deu", &["b", "c"]),
        ]
        .concat(),
    );

    assert_eq!(controller.count_texts(&document)?, 3);
    assert!(controller.count_texts("<broken").is_err());
    Ok(())
}

#[test]
fn test_countTexts_withStrictConfig_shouldStillCountPartialDocuments() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.config().strict_mode);
    assert!(controller.process_xml(common::MISSING_TITLE_TRANSLATION_XML, &XmlOptions::default()).is_err());

    assert_eq!(controller.count_texts(common::MISSING_TITLE_TRANSLATION_XML)?, 1);
    Ok(())
}

#[test]
fn test_countNodes_withTormodDocument_shouldCountEveryLevel() -> Result<()> {
    let controller = Controller::new_for_test()?;

    let counts = controller.count_nodes(common::TORMOD_XML)?;
    assert_eq!(counts.texts, 1);
    assert_eq!(counts.phrases, 1);
    assert_eq!(counts.words, 4);
    assert_eq!(counts.morphemes, 4);

    let counts = controller.count_nodes(common::GLOBAL_TAGS_XML)?;
    assert_eq!((counts.words, counts.morphemes), (6, 6));
    Ok(())
}

#[test]
fn test_countTextsInPath_withDirectory_shouldSumXmlFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.xml", common::TORMOD_XML)?;
    common::create_test_file(
        temp_dir.path(),
        "b.xml",
        &common::wrap_texts(&common::text_element("nob", &["x"]).repeat(2)),
    )?;
    common::create_test_file(temp_dir.path(), "ignored.txt", "not xml")?;
    let controller = Controller::new_for_test()?;

    assert_eq!(controller.count_texts_in_path(temp_dir.path())?, 3);
    assert_eq!(controller.count_texts_in_path(&temp_dir.path().join("a.xml"))?, 1);
    Ok(())
}

#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.default_language = "not-a-language".to_string();
    assert!(Controller::with_config(config).is_err());
}
