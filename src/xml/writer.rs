/*!
 * Serialization of the document model into Typecraft XML.
 *
 * Element order inside `text` and `phrase` follows the Typecraft schema.
 * Validity, global tag set and metadata are taken from the model, so a
 * written document parses back to the same tree.
 */

use std::borrow::Cow;
use std::path::Path;

use log::debug;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;

use super::{SCHEMA_LOCATION, TYPECRAFT_NS, XSI_NS};
use crate::errors::{Result, TypecraftError};
use crate::models::{Morpheme, Phrase, Text, Word};

// @const: setName written on every extraMetadata element
const METADATA_SET_NAME: &str = "Default";

/// Writes [`Text`]s as Typecraft XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypecraftWriter {
    /// Spaces per nesting level; `None` writes everything on one line
    indent: Option<usize>,
}

impl TypecraftWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(indent_width: usize) -> Self {
        Self {
            indent: Some(indent_width),
        }
    }

    /// Serializes `texts` into UTF-8 bytes, XML declaration included.
    pub fn write(&self, texts: &[Text]) -> Result<Vec<u8>> {
        let mut writer = match self.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;

        let root = BytesStart::new("typecraft")
            .with_attributes([
                attribute("xmlns", TYPECRAFT_NS),
                attribute("xmlns:xsi", XSI_NS),
                attribute("xsi:schemaLocation", SCHEMA_LOCATION),
            ]);
        emit(&mut writer, Event::Start(root))?;
        for text in texts {
            write_text(&mut writer, text)?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("typecraft")))?;

        let bytes = writer.into_inner();
        debug!("Serialized {} texts into {} bytes", texts.len(), bytes.len());
        Ok(bytes)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, texts: &[Text]) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.write(texts)?;
        std::fs::write(path, bytes).map_err(|source| TypecraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote {} texts to {:?}", texts.len(), path);
        Ok(())
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| TypecraftError::Write(e.to_string()))
}

/// An attribute whose tabs and line breaks are written as character
/// references, so attribute-value normalization on read leaves them intact
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            c => escaped.push(c),
        }
    }
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

// An empty element when there is no text, so indentation never leaks into content
fn text_element(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<()> {
    if text.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    let escaped = escape(text).replace('\r', "&#13;");
    emit(writer, Event::Text(BytesText::from_escaped(escaped)))?;
    emit(writer, Event::End(end))
}

fn simple_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    text_element(writer, BytesStart::new(name), text)
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &Text) -> Result<()> {
    let mut start = BytesStart::new("text");
    if let Some(id) = &text.id {
        start.push_attribute(attribute("id", id.as_str()));
    }
    start.push_attribute(attribute("lang", text.language.as_str()));
    emit(writer, Event::Start(start))?;

    simple_element(writer, "title", &text.title)?;
    simple_element(writer, "titleTranslation", &text.title_translation)?;

    let metadata = BytesStart::new("extraMetadata").with_attributes([attribute("setName", METADATA_SET_NAME)]);
    if text.metadata().is_empty() {
        emit(writer, Event::Empty(metadata))?;
    } else {
        emit(writer, Event::Start(metadata))?;
        for (key, value) in text.metadata() {
            let entry = BytesStart::new("metadata").with_attributes([attribute("name", key)]);
            text_element(writer, entry, value)?;
        }
        emit(writer, Event::End(BytesEnd::new("extraMetadata")))?;
    }

    simple_element(writer, "body", &text.rich_text)?;

    for phrase in text {
        write_phrase(writer, phrase)?;
    }

    emit(writer, Event::End(BytesEnd::new("text")))
}

fn write_phrase(writer: &mut Writer<Vec<u8>>, phrase: &Phrase) -> Result<()> {
    let mut start = BytesStart::new("phrase");
    if let Some(id) = &phrase.id {
        start.push_attribute(attribute("id", id.as_str()));
    }
    start.push_attribute(attribute("valid", phrase.validity.as_str()));
    emit(writer, Event::Start(start))?;

    simple_element(writer, "original", &phrase.phrase)?;
    simple_element(writer, "translation", &phrase.translation)?;
    simple_element(writer, "translation2", &phrase.translation2)?;

    let tagset = phrase.global_tag_set();
    let tagset_id = tagset.id.to_string();
    let global_tags = BytesStart::new("globaltags")
        .with_attributes([attribute("id", &tagset_id), attribute("tagset", &tagset.name)]);
    if phrase.global_tags().is_empty() {
        emit(writer, Event::Empty(global_tags))?;
    } else {
        emit(writer, Event::Start(global_tags))?;
        for tag in phrase.global_tags() {
            let start = BytesStart::new("globaltag").with_attributes([attribute("level", &tag.level)]);
            text_element(writer, start, &tag.name)?;
        }
        emit(writer, Event::End(BytesEnd::new("globaltags")))?;
    }

    for word in phrase {
        write_word(writer, word)?;
    }

    simple_element(writer, "comment", &phrase.comment)?;

    emit(writer, Event::End(BytesEnd::new("phrase")))
}

fn write_word(writer: &mut Writer<Vec<u8>>, word: &Word) -> Result<()> {
    let mut start = BytesStart::new("word");
    if let Some(id) = &word.id {
        start.push_attribute(attribute("id", id.as_str()));
    }
    start.push_attribute(attribute("text", word.word.as_str()));
    start.push_attribute(attribute("head", if word.head == Some(true) { "true" } else { "false" }));
    emit(writer, Event::Start(start))?;

    simple_element(writer, "pos", &word.pos)?;
    for morpheme in word {
        write_morpheme(writer, morpheme)?;
    }

    emit(writer, Event::End(BytesEnd::new("word")))
}

fn write_morpheme(writer: &mut Writer<Vec<u8>>, morpheme: &Morpheme) -> Result<()> {
    let start = BytesStart::new("morpheme").with_attributes([
        attribute("text", &morpheme.morpheme),
        attribute("baseform", &morpheme.baseform),
        attribute("meaning", &morpheme.meaning),
    ]);

    if morpheme.glosses().is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for gloss in morpheme.glosses() {
        simple_element(writer, "gloss", gloss)?;
    }
    emit(writer, Event::End(BytesEnd::new("morpheme")))
}
