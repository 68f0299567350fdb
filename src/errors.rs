/*!
 * Error types for the typecraft crate.
 *
 * This module contains the error taxonomy of the document model, the XML
 * codec and the tagger collaborators, using the thiserror crate for
 * ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document model and the Typecraft XML codec
#[derive(Error, Debug)]
pub enum TypecraftError {
    /// The input is not well-formed XML
    #[error("Malformed XML input: {0}")]
    MalformedInput(String),

    /// A Typecraft-required child element or attribute is absent
    #[error("Element '{element}' is missing {kind} '{field}'")]
    MissingField {
        /// Element kind that failed the check (e.g. "text")
        element: String,
        /// "field" for child elements, "attribute" for attributes
        kind: &'static str,
        /// Name of the missing element or attribute
        field: String,
    },

    /// An element of the wrong kind appeared where another was required
    #[error("Expected element '{expected}', found '{found}'")]
    UnexpectedElement {
        /// Qualified name that was required
        expected: String,
        /// Qualified name that was found
        found: String,
    },

    /// A mutator received a child of the wrong kind
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Child kind accepted by the container
        expected: &'static str,
        /// Kind that was passed in
        found: &'static str,
    },

    /// The operation has no defined semantics for this value
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Removal of an element that is not present
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serializing the document tree failed
    #[error("Failed to write XML: {0}")]
    Write(String),

    /// Reading or writing a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TypecraftError {
    /// True for the structural conformance failures (missing or unexpected elements)
    pub fn is_conformance(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::UnexpectedElement { .. })
    }

    pub(crate) fn missing_element(element: &str, field: &str) -> Self {
        Self::MissingField {
            element: element.to_string(),
            kind: "field",
            field: field.to_string(),
        }
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingField {
            element: element.to_string(),
            kind: "attribute",
            field: attribute.to_string(),
        }
    }
}

/// Errors that can occur in tagger collaborators
#[derive(Error, Debug)]
pub enum TaggerError {
    /// The external tool or its resources are not available
    #[error("Tagger unavailable: {0}")]
    Unavailable(String),

    /// The tagger does not support the requested capability
    #[error("Unsupported tagger capability: {0}")]
    Unsupported(String),

    /// The tagger produced output the document model rejected
    #[error("Model error: {0}")]
    Model(#[from] TypecraftError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the model or the codec
    #[error("Typecraft error: {0}")]
    Typecraft(#[from] TypecraftError),

    /// Error from a tagger
    #[error("Tagger error: {0}")]
    Tagger(#[from] TaggerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

/// Shorthand for results carrying a [`TypecraftError`]
pub type Result<T> = std::result::Result<T, TypecraftError>;
