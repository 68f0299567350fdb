use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::convenience;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::mapping::TagSet;
use crate::models::{Merge, Phrase, Text};
use crate::taggers::{self, Tagger, tokenization};
use crate::traversal::{self, NodeCounter};
use crate::xml::{TypecraftParser, TypecraftWriter};

// @module: Application controller for the tpy commands

/// Options of `tpy raw`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptions {
    pub sent_tokenize: bool,
    pub tokenize: bool,
    pub tag: bool,
    pub tagger: String,
    /// Overrides the configured default title
    pub title: Option<String>,
    /// Overrides the configured default language
    pub language: Option<String>,
    pub meta: Vec<(String, String)>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            sent_tokenize: true,
            tokenize: true,
            tag: true,
            tagger: "lexicon".to_string(),
            title: None,
            language: None,
            meta: Vec::new(),
        }
    }
}

/// Options of `tpy xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Tokenize phrases that have no words yet
    pub tokenize: bool,
    pub tag: bool,
    pub tagger: String,
    /// Split every text into this many parts; 0 and 1 leave texts whole
    pub split: usize,
    /// Merge all texts into the first one
    pub merge: bool,
    pub title: Option<String>,
    /// Language passed to the tagger instead of each text's own
    pub override_language: Option<String>,
    pub meta: Vec<(String, String)>,
    pub map_tags: bool,
    /// Skip the conformance checks even when the config asks for them
    pub lenient: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            tokenize: false,
            tag: false,
            tagger: "lexicon".to_string(),
            split: 1,
            merge: false,
            title: None,
            override_language: None,
            meta: Vec::new(),
            map_tags: false,
            lenient: false,
        }
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Target tagset of --map-tags, checked at construction
    tagset: TagSet,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let tagset = config.tagset()?;
        Ok(Self { config, tagset })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tagset(&self) -> TagSet {
        self.tagset
    }

    pub fn parser(&self, lenient: bool) -> TypecraftParser {
        TypecraftParser::new(self.config.strict_mode && !lenient)
    }

    pub fn writer(&self) -> TypecraftWriter {
        if self.config.output.pretty {
            TypecraftWriter::pretty(self.config.output.indent_width)
        } else {
            TypecraftWriter::new()
        }
    }

    /// Resolve a tagger by name using the tagger section of the config
    pub fn tagger(&self, name: &str) -> Result<Box<dyn Tagger>> {
        taggers::get_tagger_by_name(name, &self.config.tagger)
            .with_context(|| format!("Failed to load tagger '{}'", name))
    }

    /// Builds one text out of raw input
    pub fn build_raw_text(&self, contents: &str, options: &RawOptions) -> Result<Text> {
        if options.tag {
            let tagger = self.tagger(&options.tagger)?;
            self.build_raw_text_with(contents, options, Some(tagger.as_ref()))
        } else {
            self.build_raw_text_with(contents, options, None)
        }
    }

    pub fn build_raw_text_with(
        &self,
        contents: &str,
        options: &RawOptions,
        tagger: Option<&dyn Tagger>,
    ) -> Result<Text> {
        let language_code = options
            .language
            .as_deref()
            .unwrap_or(self.config.default_language.as_str());
        let language = language_utils::normalize_to_part3(language_code)
            .with_context(|| format!("Unsupported language '{}'", language_code))?;

        let mut phrases = match (options.sent_tokenize, options.tokenize) {
            (true, true) => tokenization::raw_text_to_tokenized_phrases(contents),
            (true, false) => tokenization::raw_text_to_phrases(contents),
            (false, true) => {
                let mut phrase = Phrase::new(contents.trim());
                tokenization::tokenize_phrase(&mut phrase);
                vec![phrase]
            }
            (false, false) => vec![Phrase::new(contents.trim())],
        };
        debug!("Built {} phrases from raw input", phrases.len());

        if let Some(tagger) = tagger {
            info!("Tagging {} phrases with {}", phrases.len(), tagger.name());
            tagger.tag_phrases(&mut phrases, &language)?;
        }

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| self.config.default_title.clone());

        Ok(Text::new(title)
            .with_language(language)
            .with_phrases(phrases)
            .with_metadata(options.meta.iter().cloned()))
    }

    pub fn process_raw(&self, contents: &str, options: &RawOptions) -> Result<Vec<u8>> {
        let text = self.build_raw_text(contents, options)?;
        Ok(self.writer().write(&[text])?)
    }

    /// Applies the `tpy xml` transformations to parsed texts
    pub fn transform_texts(&self, texts: Vec<Text>, options: &XmlOptions) -> Result<Vec<Text>> {
        if options.tag {
            let tagger = self.tagger(&options.tagger)?;
            self.transform_texts_with(texts, options, Some(tagger.as_ref()))
        } else {
            self.transform_texts_with(texts, options, None)
        }
    }

    pub fn transform_texts_with(
        &self,
        texts: Vec<Text>,
        options: &XmlOptions,
        tagger: Option<&dyn Tagger>,
    ) -> Result<Vec<Text>> {
        if options.split > 1 && options.merge {
            return Err(anyhow!("Both merge and split cannot be set at the same time"));
        }

        if let Some(language) = &options.override_language {
            if let Err(e) = language_utils::validate_language_code(language) {
                warn!("Language code issue: {}", e);
            }
        }

        let tagset = options.map_tags.then_some(self.tagset);

        let mut new_texts = Vec::new();
        for mut text in texts {
            if options.tokenize {
                for phrase in text.phrases_mut().iter_mut().filter(|p| p.is_empty()) {
                    tokenization::tokenize_phrase(phrase);
                }
            }

            if let Some(tagger) = tagger {
                let language = options
                    .override_language
                    .clone()
                    .unwrap_or_else(|| text.language.clone());
                tagger.tag_text(&mut text, &language)?;
            }

            if let Some(title) = &options.title {
                text.title = title.clone();
            }

            for (key, value) in &options.meta {
                text.add_metadata(key.as_str(), value.as_str());
            }

            if let Some(tagset) = tagset {
                text.map_tags(tagset);
            }

            if options.split > 1 {
                let phrases = text.take_phrases();
                for part in convenience::split(&phrases, options.split) {
                    let mut new_text = text.shallow_copy();
                    new_text.add_phrases(part.iter().cloned());
                    new_texts.push(new_text);
                }
            } else {
                new_texts.push(text);
            }
        }

        if options.merge && new_texts.len() > 1 {
            let rest = new_texts.split_off(1);
            let root = &mut new_texts[0];
            for text in rest {
                root.merge(text)?;
            }
        }

        Ok(new_texts)
    }

    pub fn process_xml(&self, xml: &str, options: &XmlOptions) -> Result<Vec<u8>> {
        let texts = self
            .parser(options.lenient)
            .parse(xml)
            .context("Failed to parse Typecraft XML")?;
        let texts = self.transform_texts(texts, options)?;
        info!("Writing {} texts", texts.len());
        Ok(self.writer().write(&texts)?)
    }

    /// Entity counts of a document, parsed leniently so that partial
    /// documents can still be counted
    pub fn count_nodes(&self, xml: &str) -> Result<NodeCounter> {
        let mut texts = self
            .parser(true)
            .parse(xml)
            .context("Failed to parse Typecraft XML")?;

        let mut counter = NodeCounter::default();
        for text in &mut texts {
            traversal::walk_text_mut(text, &mut counter);
        }
        debug!(
            "Counted {} texts, {} phrases, {} words, {} morphemes",
            counter.texts, counter.phrases, counter.words, counter.morphemes
        );
        Ok(counter)
    }

    pub fn count_texts(&self, xml: &str) -> Result<usize> {
        Ok(self.count_nodes(xml)?.texts)
    }

    /// Number of texts in a file, or in all `.xml` files below a directory
    pub fn count_texts_in_path(&self, path: &Path) -> Result<usize> {
        if !path.is_dir() {
            return self.count_texts(&FileManager::read_input(path)?);
        }

        let mut total = 0;
        for file in FileManager::find_files(path, "xml")? {
            let count = self
                .count_texts(&FileManager::read_input(&file)?)
                .with_context(|| format!("Failed to count texts in {:?}", file))?;
            debug!("{:?}: {} texts", file, count);
            total += count;
        }
        Ok(total)
    }

    /// `tpy raw`: raw text in, Typecraft XML out
    pub fn run_raw(&self, input: &Path, output: Option<&Path>, options: &RawOptions) -> Result<()> {
        let contents = FileManager::read_input(input)?;
        let bytes = self.process_raw(&contents, options)?;
        FileManager::write_output(output, &bytes)
    }

    /// `tpy xml`: Typecraft XML in, transformed Typecraft XML out
    pub fn run_xml(&self, input: &Path, output: Option<&Path>, options: &XmlOptions) -> Result<()> {
        let contents = FileManager::read_input(input)?;
        let bytes = self.process_xml(&contents, options)?;
        FileManager::write_output(output, &bytes)
    }

    /// `tpy ntexts`: prints the number of texts
    pub fn run_ntexts(&self, input: &Path) -> Result<()> {
        let count = self.count_texts_in_path(input)?;
        println!("{}", count);
        Ok(())
    }
}
