/*!
 * Typecraft XML codec.
 *
 * - `tree`: generic namespace-aware element tree over quick-xml
 * - `parser`: element tree to document model, with strict conformance checks
 * - `writer`: document model to XML bytes
 *
 * The free functions below use a strict parser and a compact writer.
 */

use std::path::Path;

use crate::errors::Result;
use crate::models::Text;

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::TypecraftParser;
pub use writer::TypecraftWriter;

/// Namespace of every Typecraft element
pub const TYPECRAFT_NS: &str = "http://typecraft.org/typecraft";

pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const SCHEMA_LOCATION: &str = "https://typecraft.org/typecraft.xsd";

pub fn parse(xml: &str) -> Result<Vec<Text>> {
    TypecraftParser::default().parse(xml)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Text>> {
    TypecraftParser::default().parse_file(path)
}

pub fn write(texts: &[Text]) -> Result<Vec<u8>> {
    TypecraftWriter::default().write(texts)
}

pub fn write_to_file<P: AsRef<Path>>(path: P, texts: &[Text]) -> Result<()> {
    TypecraftWriter::default().write_to_file(path, texts)
}
