/*!
 * Tests for application controller functionality
 */

use anyhow::Result;
use typecraft::app_config::Config;
use typecraft::app_controller::{Controller, RawOptions, XmlOptions};
use typecraft::mapping::TagSet;
use typecraft::models::{Phrase, Text, Word};

/// Test creating a controller with the default configuration
#[test]
fn test_new_with_default_config_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().default_language, "en");
    assert!(controller.config().strict_mode);
    Ok(())
}

/// Test that the parser follows the config and the lenient flag
#[test]
fn test_parser_withStrictConfig_shouldOnlyRelaxOnRequest() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.parser(false).is_strict());
    assert!(!controller.parser(true).is_strict());

    let mut config = Config::default();
    config.strict_mode = false;
    let lenient = Controller::with_config(config)?;
    assert!(!lenient.parser(false).is_strict());
    Ok(())
}

#[test]
fn test_tagger_withUnknownName_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let err = controller.tagger("nonexistent").unwrap_err();
    assert!(err.to_string().contains("nonexistent"));
    Ok(())
}

#[test]
fn test_options_defaults_shouldMatchCommandLineDefaults() {
    let raw = RawOptions::default();
    assert!(raw.sent_tokenize && raw.tokenize && raw.tag);
    assert_eq!(raw.tagger, "lexicon");

    let xml = XmlOptions::default();
    assert!(!xml.tokenize && !xml.tag && !xml.merge && !xml.map_tags);
    assert_eq!(xml.split, 1);
}

#[test]
fn test_transformTexts_withNoTexts_shouldReturnEmpty() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let options = XmlOptions {
        merge: true,
        ..XmlOptions::default()
    };
    assert!(controller.transform_texts(Vec::new(), &options)?.is_empty());
    Ok(())
}

#[test]
fn test_tagset_withTypecraftAlias_shouldBeResolvedAtConstruction() -> Result<()> {
    let mut config = Config::default();
    config.tagset = "Typecraft".to_string();
    let controller = Controller::with_config(config)?;
    assert_eq!(controller.tagset(), TagSet::Tc);

    let mut config = Config::default();
    config.tagset = "penn".to_string();
    assert!(Controller::with_config(config).is_err());
    Ok(())
}

#[test]
fn test_transformTexts_withMapTags_shouldUseControllerTagset() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let text = Text::new("t").with_phrases([Phrase::new("x").with_words([Word::new("x").with_pos("$.")])]);
    let options = XmlOptions {
        map_tags: true,
        ..XmlOptions::default()
    };

    let texts = controller.transform_texts(vec![text], &options)?;
    assert_eq!(texts[0][0][0].pos, "PUN");
    Ok(())
}
