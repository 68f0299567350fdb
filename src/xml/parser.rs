/*!
 * Conversion of Typecraft XML into the document model.
 *
 * The parser works on the generic element tree from [`super::tree`]. In
 * strict mode it rejects documents that lack elements or attributes the
 * Typecraft schema requires; in lenient mode those fall back to defaults.
 * Malformed XML and a wrong root element are fatal in both modes.
 */

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use super::TYPECRAFT_NS;
use super::tree::{self, Element};
use crate::errors::{Result, TypecraftError};
use crate::models::global_tag::{DEFAULT_TAGSET_ID, DEFAULT_TAGSET_NAME};
use crate::models::{GlobalTag, GlobalTagSet, Morpheme, Phrase, PhraseValidity, Text, Word};

/// Reads Typecraft XML into [`Text`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypecraftParser {
    strict: bool,
}

impl Default for TypecraftParser {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl TypecraftParser {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// A parser that skips the conformance checks
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses a Typecraft document into its texts, in document order.
    pub fn parse(&self, xml: &str) -> Result<Vec<Text>> {
        let root = tree::parse_document(xml)?;
        self.convert_document(&root)
    }

    /// Reads the whole file into memory and parses it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Text>> {
        let path = path.as_ref();
        debug!("Parsing Typecraft XML file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| TypecraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content)
    }

    /// Converts an already parsed `typecraft` root element.
    pub fn convert_document(&self, root: &Element) -> Result<Vec<Text>> {
        expect_element(root, "typecraft")?;

        let texts = root
            .children
            .iter()
            .map(|child| self.convert_text(child))
            .collect::<Result<Vec<_>>>()?;

        debug!("Parsed {} texts (strict mode: {})", texts.len(), self.strict);
        Ok(texts)
    }

    pub fn convert_text(&self, element: &Element) -> Result<Text> {
        expect_element(element, "text")?;
        if self.strict {
            require_children(element, "text", &["title", "titleTranslation", "extraMetadata"])?;
        }

        let mut text = Text::default();

        if let Some(title) = element.child_text(TYPECRAFT_NS, "title") {
            text.title = title.to_string();
        }
        if let Some(translation) = element.child_text(TYPECRAFT_NS, "titleTranslation") {
            text.title_translation = translation.to_string();
        }
        if let Some(metadata) = element.find(TYPECRAFT_NS, "extraMetadata") {
            for entry in metadata.find_all(TYPECRAFT_NS, "metadata") {
                match entry.attr("name") {
                    Some(name) => text.add_metadata(name, entry.text.as_deref().unwrap_or_default()),
                    None => warn!("Ignoring metadata entry without a name attribute"),
                }
            }
        }
        if let Some(body) = element.child_text(TYPECRAFT_NS, "body") {
            text.rich_text = body.to_string();
        }
        if let Some(id) = element.attr("id") {
            text.id = Some(id.to_string());
        }
        if let Some(lang) = element.attr("lang") {
            text.language = lang.to_string();
        }

        for phrase in element.find_all(TYPECRAFT_NS, "phrase") {
            text.add_phrase(self.convert_phrase(phrase)?);
        }

        debug!(
            "Parsed text {:?} with {} phrases",
            text.id.as_deref().unwrap_or("<no id>"),
            text.len()
        );
        Ok(text)
    }

    pub fn convert_phrase(&self, element: &Element) -> Result<Phrase> {
        expect_element(element, "phrase")?;
        if self.strict {
            require_children(element, "phrase", &["original"])?;
        }

        let mut phrase = Phrase::default();

        if let Some(original) = element.find(TYPECRAFT_NS, "original") {
            phrase.phrase = original.text.clone().unwrap_or_default();
        }
        if let Some(id) = element.attr("id") {
            phrase.id = Some(id.to_string());
        }
        if let Some(valid) = element.attr("valid") {
            phrase.validity = valid.parse::<PhraseValidity>()?;
        }
        if let Some(translation) = element.child_text(TYPECRAFT_NS, "translation") {
            phrase.translation = translation.to_string();
        }
        if let Some(translation2) = element.child_text(TYPECRAFT_NS, "translation2") {
            phrase.translation2 = translation2.to_string();
        }
        if let Some(comment) = element.child_text(TYPECRAFT_NS, "comment") {
            phrase.comment = comment.to_string();
        }
        if let Some(global_tags) = element.find(TYPECRAFT_NS, "globaltags") {
            phrase.set_global_tag_set(convert_global_tag_set(global_tags));
            for tag in global_tags.find_all(TYPECRAFT_NS, "globaltag") {
                phrase.add_global_tag(convert_global_tag(tag));
            }
        }

        for word in element.find_all(TYPECRAFT_NS, "word") {
            phrase.add_word(self.convert_word(word)?);
        }

        Ok(phrase)
    }

    pub fn convert_word(&self, element: &Element) -> Result<Word> {
        expect_element(element, "word")?;

        let mut word = match element.attr("text") {
            Some(text) => Word::new(text),
            None if self.strict => return Err(TypecraftError::missing_attribute("word", "text")),
            None => Word::default(),
        };

        if let Some(id) = element.attr("id") {
            word.id = Some(id.to_string());
        }
        if let Some(head) = element.attr("head") {
            word.head = Some(head == "true");
        }
        if let Some(pos) = element.find(TYPECRAFT_NS, "pos") {
            word.pos = pos.text.clone().unwrap_or_default();
        }

        for morpheme in element.find_all(TYPECRAFT_NS, "morpheme") {
            word.add_morpheme(convert_morpheme(morpheme)?);
        }

        Ok(word)
    }
}

/// Morphemes have no required fields; every attribute is optional.
pub fn convert_morpheme(element: &Element) -> Result<Morpheme> {
    expect_element(element, "morpheme")?;

    let mut morpheme = Morpheme::default();
    if let Some(text) = element.attr("text") {
        morpheme.morpheme = text.to_string();
    }
    if let Some(baseform) = element.attr("baseform") {
        morpheme.baseform = baseform.to_string();
    }
    if let Some(meaning) = element.attr("meaning") {
        morpheme.meaning = meaning.to_string();
    }
    for gloss in element.find_all(TYPECRAFT_NS, "gloss") {
        morpheme.add_gloss(gloss.text.clone().unwrap_or_default());
    }

    Ok(morpheme)
}

fn convert_global_tag_set(element: &Element) -> Arc<GlobalTagSet> {
    let id = match element.attr("id") {
        Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
            warn!("Non-numeric globaltags id '{}', using {}", raw, DEFAULT_TAGSET_ID);
            DEFAULT_TAGSET_ID
        }),
        None => DEFAULT_TAGSET_ID,
    };
    let name = element.attr("tagset").unwrap_or(DEFAULT_TAGSET_NAME);

    let shared = GlobalTagSet::shared_default();
    if shared.id == id && shared.name == name {
        shared
    } else {
        Arc::new(GlobalTagSet::new(id, name))
    }
}

fn convert_global_tag(element: &Element) -> GlobalTag {
    GlobalTag::new(
        element.text.as_deref().unwrap_or_default(),
        element.attr("level").unwrap_or_default(),
    )
}

fn expect_element(element: &Element, name: &str) -> Result<()> {
    if element.is(TYPECRAFT_NS, name) {
        Ok(())
    } else {
        Err(TypecraftError::UnexpectedElement {
            expected: format!("{{{}}}{}", TYPECRAFT_NS, name),
            found: element.qualified_name(),
        })
    }
}

fn require_children(element: &Element, kind: &str, required: &[&str]) -> Result<()> {
    match required
        .iter()
        .find(|name| element.find(TYPECRAFT_NS, name).is_none())
    {
        Some(missing) => Err(TypecraftError::missing_element(kind, missing)),
        None => Ok(()),
    }
}
