/*!
 * A small namespace-aware element tree read with quick-xml.
 *
 * Text handling follows the ElementTree convention: `text` is the
 * character data before the first child element, `None` when there is
 * none. Text after child elements is dropped.
 *
 * Line endings and attribute values are normalized the way XML 1.0
 * requires before references are expanded, so `&#13;` and `&#9;` survive.
 */

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::errors::{Result, TypecraftError};

/// One parsed element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Local name, without prefix
    pub name: String,
    /// Resolved namespace URI
    pub namespace: Option<String>,
    /// Attributes other than namespace declarations, in document order
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// `{namespace}name`, as used in error messages
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child called `name` in `namespace`
    pub fn find(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is(namespace, name))
    }

    /// All children called `name` in `namespace`, in document order
    pub fn find_all<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.is(namespace, name))
    }

    /// Text of the child `name`, when both the child and its text exist
    pub fn child_text(&self, namespace: &str, name: &str) -> Option<&str> {
        self.find(namespace, name).and_then(|child| child.text.as_deref())
    }
}

struct OpenElement {
    element: Element,
    scope: HashMap<String, String>,
}

fn malformed(error: impl std::fmt::Display) -> TypecraftError {
    TypecraftError::MalformedInput(error.to_string())
}

/// `\r\n` and lone `\r` become `\n`
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Literal tabs and line breaks in an attribute value read as spaces
fn normalize_attribute_value(raw: &str) -> String {
    normalize_line_endings(raw).replace(['\t', '\n'], " ")
}

fn split_prefix(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, raw),
    }
}

fn open_element(start: &BytesStart<'_>, parent_scope: &HashMap<String, String>) -> Result<OpenElement> {
    let raw_name = std::str::from_utf8(start.name().as_ref())
        .map_err(malformed)?
        .to_string();

    let mut scope = parent_scope.clone();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(malformed)?
            .to_string();
        let raw_value = std::str::from_utf8(&attribute.value).map_err(malformed)?;
        let value = unescape(&normalize_attribute_value(raw_value))
            .map_err(malformed)?
            .into_owned();

        if key == "xmlns" {
            scope.insert(String::new(), value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.insert(prefix.to_string(), value);
        } else {
            attributes.push((key, value));
        }
    }

    let (prefix, local) = split_prefix(&raw_name);
    let namespace = match prefix {
        Some(prefix) => Some(
            scope
                .get(prefix)
                .cloned()
                .ok_or_else(|| malformed(format!("unbound namespace prefix '{}'", prefix)))?,
        ),
        None => scope.get("").filter(|uri| !uri.is_empty()).cloned(),
    };

    Ok(OpenElement {
        element: Element {
            name: local.to_string(),
            namespace,
            attributes,
            text: None,
            children: Vec::new(),
        },
        scope,
    })
}

fn push_text(stack: &mut [OpenElement], content: &str) -> Result<()> {
    match stack.last_mut() {
        Some(open) => {
            if open.element.children.is_empty() {
                open.element
                    .text
                    .get_or_insert_with(String::new)
                    .push_str(content);
            }
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(malformed("character data outside the root element")),
    }
}

/// Parses `xml` into its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Element> = None;
    let empty_scope = HashMap::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            malformed(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                let scope = stack.last().map_or(&empty_scope, |open| &open.scope);
                let open = open_element(&start, scope)?;
                stack.push(open);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                let scope = stack.last().map_or(&empty_scope, |open| &open.scope);
                let element = open_element(&start, scope)?.element;
                match stack.last_mut() {
                    Some(parent) => parent.element.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(_) => {
                let closed = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without an open element"))?
                    .element;
                match stack.last_mut() {
                    Some(parent) => parent.element.children.push(closed),
                    None => root = Some(closed),
                }
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text).map_err(malformed)?;
                let normalized = normalize_line_endings(raw);
                let content = unescape(&normalized).map_err(malformed)?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let content = std::str::from_utf8(&bytes).map_err(malformed)?;
                push_text(&mut stack, &normalize_line_endings(content))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!(
            "unexpected end of input, element '{}' is not closed",
            open.element.name
        )));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}
