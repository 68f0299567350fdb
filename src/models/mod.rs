/*!
 * Hierarchical annotation model: corpus → text → phrase → word → morpheme.
 *
 * Every parent exclusively owns its children. The only shared value is
 * the default [`GlobalTagSet`], which phrases reference read-only.
 */

use std::fmt;

use serde_json::Value;

use crate::errors::Result;

pub mod corpus;
pub mod global_tag;
pub mod morpheme;
pub mod node;
pub mod phrase;
pub mod text;
pub mod word;

pub use corpus::Corpus;
pub use global_tag::{GlobalTag, GlobalTagSet, PhraseValidity};
pub use morpheme::Morpheme;
pub use node::{Container, Node, NodeKind};
pub use phrase::Phrase;
pub use text::Text;
pub use word::Word;

/// Combining two entities of the same kind into one.
///
/// Only defined for corpora, texts and phrases; words and morphemes
/// return `UnsupportedOperation`.
pub trait Merge: Sized {
    fn merge(&mut self, other: Self) -> Result<()>;
}

// Display impls render the projection as indented JSON
fn write_projection(f: &mut fmt::Formatter<'_>, projection: &Value) -> fmt::Result {
    let rendered = serde_json::to_string_pretty(projection).map_err(|_| fmt::Error)?;
    f.write_str(&rendered)
}
