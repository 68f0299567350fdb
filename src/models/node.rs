use std::fmt;

use crate::errors::{Result, TypecraftError};
use crate::models::{Corpus, GlobalTag, GlobalTagSet, Morpheme, Phrase, Text, Word};

/// Kind tag of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Phrase,
    Word,
    Morpheme,
    GlobalTag,
    GlobalTagSet,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Phrase => "Phrase",
            Self::Word => "Word",
            Self::Morpheme => "Morpheme",
            Self::GlobalTag => "GlobalTag",
            Self::GlobalTagSet => "GlobalTagSet",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any model entity, for callers that assemble trees from untyped input.
///
/// The typed `add_*` methods of each container are the normal API; this
/// is the runtime-checked door used at dynamic boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Text),
    Phrase(Phrase),
    Word(Word),
    Morpheme(Morpheme),
    GlobalTag(GlobalTag),
    GlobalTagSet(GlobalTagSet),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::Phrase(_) => NodeKind::Phrase,
            Self::Word(_) => NodeKind::Word,
            Self::Morpheme(_) => NodeKind::Morpheme,
            Self::GlobalTag(_) => NodeKind::GlobalTag,
            Self::GlobalTagSet(_) => NodeKind::GlobalTagSet,
        }
    }
}

macro_rules! impl_node_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_node_from!(Text, Phrase, Word, Morpheme, GlobalTag, GlobalTagSet);

/// A model entity that owns children of a fixed kind.
pub trait Container {
    /// Human readable list of accepted kinds, used in error messages
    fn expected(&self) -> &'static str;

    fn accepts(&self, kind: NodeKind) -> bool;

    /// Adds `node`, or fails with `TypeMismatch` without touching `self`.
    fn add_node(&mut self, node: Node) -> Result<()>;

    /// Adds all `nodes` in order.
    ///
    /// Every node is checked before any is added: on a `TypeMismatch`
    /// the container is left exactly as it was.
    fn add_nodes<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = Node>,
        Self: Sized,
    {
        let nodes: Vec<Node> = nodes.into_iter().collect();
        if let Some(bad) = nodes.iter().find(|node| !self.accepts(node.kind())) {
            return Err(mismatch(self.expected(), bad));
        }
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(())
    }
}

fn mismatch(expected: &'static str, node: &Node) -> TypecraftError {
    TypecraftError::TypeMismatch {
        expected,
        found: node.kind().as_str(),
    }
}

impl Container for Corpus {
    fn expected(&self) -> &'static str {
        "Text"
    }

    fn accepts(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Text
    }

    fn add_node(&mut self, node: Node) -> Result<()> {
        match node {
            Node::Text(text) => {
                self.add_text(text);
                Ok(())
            }
            other => Err(mismatch(self.expected(), &other)),
        }
    }
}

impl Container for Text {
    fn expected(&self) -> &'static str {
        "Phrase"
    }

    fn accepts(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Phrase
    }

    fn add_node(&mut self, node: Node) -> Result<()> {
        match node {
            Node::Phrase(phrase) => {
                self.add_phrase(phrase);
                Ok(())
            }
            other => Err(mismatch(self.expected(), &other)),
        }
    }
}

// A phrase has three slots: words, global tags and the tagset reference
impl Container for Phrase {
    fn expected(&self) -> &'static str {
        "Word, GlobalTag or GlobalTagSet"
    }

    fn accepts(&self, kind: NodeKind) -> bool {
        matches!(
            kind,
            NodeKind::Word | NodeKind::GlobalTag | NodeKind::GlobalTagSet
        )
    }

    fn add_node(&mut self, node: Node) -> Result<()> {
        match node {
            Node::Word(word) => self.add_word(word),
            Node::GlobalTag(tag) => self.add_global_tag(tag),
            Node::GlobalTagSet(tagset) => self.set_global_tag_set(tagset.into()),
            other => return Err(mismatch(self.expected(), &other)),
        }
        Ok(())
    }
}

impl Container for Word {
    fn expected(&self) -> &'static str {
        "Morpheme"
    }

    fn accepts(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Morpheme
    }

    fn add_node(&mut self, node: Node) -> Result<()> {
        match node {
            Node::Morpheme(morpheme) => {
                self.add_morpheme(morpheme);
                Ok(())
            }
            other => Err(mismatch(self.expected(), &other)),
        }
    }
}
