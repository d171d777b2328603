//! Owned element tree over a quick-xml event stream
//!
//! CCDA documents are deeply nested and queried ad hoc (fixed paths, code
//! predicates, anchor cross-references), so the intake side builds a plain
//! owned tree rather than deserializing into fixed shapes. Element and
//! attribute names are reduced to their local part: conformant documents live
//! in the single `urn:hl7-org:v3` namespace and prefix spelling varies
//! between emitters (`ns0:section` vs `section`).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// One parsed clinical document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a document from XML text.
    ///
    /// Fails only on broken XML (unclosed or unbalanced tags, bad syntax).
    /// Missing clinical structure is not an error at this layer; the
    /// extractors degrade per-field instead.
    pub fn parse(xml: &str) -> Result<Document> {
        let root = build_tree(xml)?;
        Ok(Document { root })
    }

    /// The document element (`ClinicalDocument` in conformant files).
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// A single element: local name, attributes, child elements, direct text.
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Local (namespace-stripped) element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed direct text content, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Descend through a fixed containment path, first match at each step.
    pub fn path(&self, segments: &[&str]) -> Option<&Element> {
        let mut current = self;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Depth-first, document-order iterator over the subtree, self excluded.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.children.iter().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// First descendant with the given local name (the `.//name` lookup).
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.name == name)
    }

    /// All descendants with the given local name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.name == name)
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Children pushed in reverse so the leftmost pops first.
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn build_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let elem = element_from_start(&start)?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::End(_) => {
                let elem = stack
                    .pop()
                    .ok_or_else(|| Error::Malformed("unbalanced closing tag".into()))?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &text.unescape()?);
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    push_text(parent, &raw);
                }
            }
            Event::Eof => break,
            // Declarations, comments, doctypes, processing instructions
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Malformed("unclosed element at end of input".into()));
    }
    root.ok_or_else(|| Error::Malformed("no root element".into()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = local_name(start.name().as_ref());
    let mut attrs = Vec::new();

    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| Error::Malformed(format!("bad attribute in <{name}>: {e}")))?;
        // Namespace declarations are noise once names are localized
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = local_name(attr.key.as_ref());
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }

    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, elem: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None if root.is_none() => *root = Some(elem),
        None => return Err(Error::Malformed("multiple root elements".into())),
    }
    Ok(())
}

fn push_text(parent: &mut Element, piece: &str) {
    let piece = piece.trim();
    if piece.is_empty() {
        return;
    }
    if !parent.text.is_empty() {
        parent.text.push(' ');
    }
    parent.text.push_str(piece);
}

fn local_name(raw: &[u8]) -> String {
    let local = raw.rsplit(|&b| b == b':').next().unwrap_or(raw);
    String::from_utf8_lossy(local).into_owned()
}
