/*!
 * Common test utilities for the typecraft test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use typecraft::models::{GlobalTag, Morpheme, Phrase, PhraseValidity, Text, Word};

// Re-export the mock taggers module
pub mod mock_taggers;

/// Routes `log` output of the library through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A one-text document with four annotated words
pub const TORMOD_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<typecraft xsi:schemaLocation="http://typecraft.org/typecraft.xsd" xmlns="http://typecraft.org/typecraft" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<text id="3453" lang="kri">
<title>My name is Tormod.</title>
<titleTranslation></titleTranslation>
<extraMetadata setName="Default"/>
<body>My name is Tormod.&lt;p&gt;&lt;/p&gt;</body>
<phrase id="449800" valid="VALID">
<original>My name is Tormod.</original>
<translation>Jeg heter Tormod.</translation>
<translation2></translation2>
<description></description>
<globaltags id="1" tagset="Default"/>
<word id="449800-1" text="My" head="true">
<pos>PREP</pos>
<morpheme text="My" baseform="My" meaning="My">
<gloss>1PL</gloss>
</morpheme>
</word>
<word id="449800-2" text="name" head="false">
<pos>N</pos>
<morpheme text="name" baseform="name" meaning="name"/>
</word>
<word id="449800-3" text="is" head="false">
<pos>V</pos>
<morpheme text="is" baseform="is" meaning=""/>
</word>
<word id="449800-4" text="Tormod." head="false">
<pos>NMASC</pos>
<morpheme text="Tormod." baseform="Tormod." meaning="Name of the object">
<gloss>NEUT</gloss>
</morpheme>
</word>
</phrase>
</text>
</typecraft>"#;

/// A phrase carrying eight global tags, on a single line
pub const GLOBAL_TAGS_XML: &str = r#"<typecraft xmlns="http://typecraft.org/typecraft" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://typecraft.org/typecraft.xsd"><text id="3361" lang="und"><title>Hello this is a sentence.</title><titleTranslation/><extraMetadata setName="Default"/><body>Hello this is a sentence.<p></p></body><phrase id="421987" valid="VALID"><original>Hello this is a sentence.</original><translation/><translation2/><description/><globaltags id="1" tagset="Default"><globaltag level="5">passive+causative+applicative</globaltag><globaltag level="7">EXPL+NP+NP+S</globaltag><globaltag level="3">resultative</globaltag><globaltag level="6">motion</globaltag><globaltag level="4">PP:manner</globaltag><globaltag level="2">timitive</globaltag><globaltag level="1">informative</globaltag><globaltag level="0">habitual</globaltag></globaltags><word id="421987-1" text="Hello" head="false"><pos>INTRJCT</pos><morpheme text="hello" baseform="hello"/></word><word id="421987-2" text="this" head="false"><pos>PN</pos><morpheme text="this" baseform="this"/></word><word id="421987-3" text="is" head="false"><pos>COP</pos><morpheme text="is" baseform="be" meaning=""><gloss>PRES</gloss></morpheme></word><word id="421987-4" text="a" head="false"><pos>DET</pos><morpheme text="a" meaning="the"><gloss>DEF</gloss></morpheme></word><word id="421987-5" text="sentence" head="false"><pos>N</pos><morpheme text="sentence" baseform="sentence" meaning="sentence@obj:await"/></word><word id="421987-6" text="." head="false"><pos>PUN</pos><morpheme/></word></phrase></text></typecraft>"#;

/// A document whose text lacks `titleTranslation`
pub const MISSING_TITLE_TRANSLATION_XML: &str = r#"<typecraft xmlns="http://typecraft.org/typecraft">
<text lang="nob">
<title>Uten oversettelse</title>
<extraMetadata/>
<phrase><original>Hei</original></phrase>
</text>
</typecraft>"#;

/// Wraps `texts` (raw `<text>` elements) in a Typecraft root
pub fn wrap_texts(texts: &str) -> String {
    format!(
        r#"<typecraft xmlns="http://typecraft.org/typecraft" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}</typecraft>"#,
        texts
    )
}

/// A minimal conforming text element with the given phrases
pub fn text_element(lang: &str, phrases: &[&str]) -> String {
    let phrases: String = phrases
        .iter()
        .map(|p| format!("<phrase valid=\"EMPTY\"><original>{}</original></phrase>", p))
        .collect();
    format!(
        "<text lang=\"{}\"><title>T</title><titleTranslation/><extraMetadata/>{}</text>",
        lang, phrases
    )
}

/// A text using every annotation level the codec writes
pub fn fully_annotated_text() -> Text {
    let morpheme = Morpheme::new("nice")
        .with_baseform("nice")
        .with_meaning("pleasant")
        .with_concatenated_glosses("ADJ.POS");
    let mut word = Word::new("nice").with_pos("ADJ").with_morphemes([morpheme]);
    word.head = Some(true);

    let phrase = Phrase::new("This is a nice phrase")
        .with_translation("Dette er en fin frase")
        .with_translation2("C'est une belle phrase")
        .with_comment("Some text comment")
        .with_validity(PhraseValidity::Unknown)
        .with_global_tags([GlobalTag::new("SAS", "NP+PP")])
        .with_words([word]);

    let mut text = Text::new("A nice text")
        .with_language("nob")
        .with_metadata([("Source link", "test@example.com")])
        .with_phrases([phrase]);
    text.title_translation = "En fin tekst".to_string();
    text.rich_text = "<phrase>hello</phrase>".to_string();
    text
}
