//! Lexical adapter: a pull cursor over the YIN byte stream.
//!
//! The parser never talks to `quick-xml` directly; this module presents the
//! document as a cursor that yields fully resolved element-start records
//! (namespace, prefix, local name, unescaped attributes) and splits element
//! content into either one verbatim text body or a sequence of child
//! elements. Whitespace around child elements is insignificant, whitespace
//! inside a text body is preserved verbatim.
//!
//! Attribute and text values carry a `dynamic` marker: `true` when entity
//! unescaping produced a fresh heap copy, which lets the parser pick the
//! move-in interning path instead of re-copying.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::parser::errors::{ErrorKind, ParseError, Result};

/// The XML namespace YIN assigns to YANG keywords.
pub const YIN_NS_URI: &str = "urn:ietf:params:xml:ns:yang:yin:1";

/// One XML attribute of an element, unescaped.
#[derive(Debug, Clone)]
pub struct Attr {
    /// Namespace prefix, if the attribute name was prefixed.
    pub prefix: Option<String>,
    /// Local attribute name.
    pub local: String,
    /// Unescaped value.
    pub value: String,
    /// True when unescaping had to allocate (the value contained entities).
    pub dynamic: bool,
}

/// A resolved element-start record.
#[derive(Debug, Clone)]
pub struct Element {
    /// Namespace prefix as written, if any.
    pub prefix: Option<String>,
    /// Local element name.
    pub local: String,
    /// Resolved namespace URI; `None` when no binding is in scope.
    pub ns: Option<String>,
    /// Attributes in document order, `xmlns` declarations excluded.
    pub attrs: Vec<Attr>,
    /// True for self-closing elements (`<e/>`), which have no content.
    pub empty: bool,
    /// Line on which the element was read.
    pub line: u32,
}

impl Element {
    /// The element name as written, including its prefix.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{p}:{}", self.local),
            None => self.local.clone(),
        }
    }

    /// Whether the element is bound to the YIN namespace.
    pub fn in_yin_ns(&self) -> bool {
        self.ns.as_deref() == Some(YIN_NS_URI)
    }
}

/// A text body collected from element content.
#[derive(Debug, Clone, Default)]
pub struct TextBody {
    /// The verbatim (unescaped) text.
    pub text: String,
    /// True when unescaping allocated a fresh copy.
    pub dynamic: bool,
}

/// What an element's content starts with.
#[derive(Debug)]
pub enum FirstContent {
    /// The whole content was text; the closing tag has been consumed.
    Text(TextBody),
    /// The first child element.
    Child(Element),
}

/// Namespace-aware pull cursor over one YIN document.
pub struct XmlCursor<'i> {
    reader: NsReader<&'i [u8]>,
    input: &'i str,
    scan: usize,
    line: u32,
}

impl<'i> XmlCursor<'i> {
    pub fn new(input: &'i str) -> Self {
        let mut reader = NsReader::from_str(input);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            input,
            scan: 0,
            line: 1,
        }
    }

    /// Current line (1-based), advanced incrementally from the reader's
    /// buffer position.
    pub fn line(&mut self) -> u32 {
        let pos = (self.reader.buffer_position() as usize).min(self.input.len());
        if pos > self.scan {
            self.line += self.input[self.scan..pos]
                .bytes()
                .filter(|b| *b == b'\n')
                .count() as u32;
            self.scan = pos;
        }
        self.line
    }

    fn xml_error(&mut self, err: quick_xml::Error) -> ParseError {
        let line = self.line();
        ParseError::new(ErrorKind::Xml(err.to_string()), line)
    }

    fn err(&mut self, kind: ErrorKind) -> ParseError {
        let line = self.line();
        ParseError::new(kind, line)
    }

    /// Read the document's root element, skipping the prolog.
    ///
    /// Returns `None` at end of input (an empty document).
    pub fn root_element(&mut self) -> Result<Option<Element>> {
        loop {
            match self.reader.read_resolved_event() {
                Ok((resolve, Event::Start(e))) => {
                    let ns = ns_bytes(resolve);
                    return self.build_element(ns, &e, false).map(Some);
                }
                Ok((resolve, Event::Empty(e))) => {
                    let ns = ns_bytes(resolve);
                    return self.build_element(ns, &e, true).map(Some);
                }
                Ok((_, Event::Text(t))) => {
                    let text = t.unescape().map_err(|e| self.xml_error(e))?;
                    if !text.trim().is_empty() {
                        return Err(self.err(ErrorKind::Xml(
                            "text content outside of the root element".into(),
                        )));
                    }
                }
                Ok((_, Event::Eof)) => return Ok(None),
                Ok(_) => {} // declaration, comments, processing instructions, doctype
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    /// Read the first piece of an element's content: either the complete
    /// text body (closing tag consumed) or the first child element.
    ///
    /// Must not be called for self-closing elements.
    pub fn first_content(&mut self) -> Result<FirstContent> {
        let mut body = TextBody::default();
        loop {
            match self.reader.read_resolved_event() {
                Ok((resolve, Event::Start(e))) => {
                    let ns = ns_bytes(resolve);
                    self.reject_mixed(&body)?;
                    return self.build_element(ns, &e, false).map(FirstContent::Child);
                }
                Ok((resolve, Event::Empty(e))) => {
                    let ns = ns_bytes(resolve);
                    self.reject_mixed(&body)?;
                    return self.build_element(ns, &e, true).map(FirstContent::Child);
                }
                Ok((_, Event::Text(t))) => {
                    let cow = t.unescape().map_err(|e| self.xml_error(e))?;
                    push_text(&mut body, cow);
                }
                Ok((_, Event::CData(c))) => {
                    let raw = c.into_inner();
                    let text = std::str::from_utf8(raw.as_ref())
                        .map_err(|_| self.err(ErrorKind::Xml("CDATA is not valid UTF-8".into())))?;
                    push_text(&mut body, Cow::Borrowed(text));
                }
                Ok((_, Event::End(_))) => return Ok(FirstContent::Text(body)),
                Ok((_, Event::Eof)) => {
                    return Err(self.err(ErrorKind::Xml("unexpected end of input".into())));
                }
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    /// Read the next child element, or `None` when the enclosing element
    /// closes. Text between children must be whitespace.
    pub fn next_child(&mut self) -> Result<Option<Element>> {
        loop {
            match self.reader.read_resolved_event() {
                Ok((resolve, Event::Start(e))) => {
                    let ns = ns_bytes(resolve);
                    return self.build_element(ns, &e, false).map(Some);
                }
                Ok((resolve, Event::Empty(e))) => {
                    let ns = ns_bytes(resolve);
                    return self.build_element(ns, &e, true).map(Some);
                }
                Ok((_, Event::Text(t))) => {
                    let text = t.unescape().map_err(|e| self.xml_error(e))?;
                    if !text.trim().is_empty() {
                        return Err(self.err(ErrorKind::Xml(
                            "mixed text and element content".into(),
                        )));
                    }
                }
                Ok((_, Event::End(_))) => return Ok(None),
                Ok((_, Event::Eof)) => {
                    return Err(self.err(ErrorKind::Xml("unexpected end of input".into())));
                }
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    /// After the root element closed: require that only trivia remains.
    pub fn finish(&mut self) -> Result<()> {
        loop {
            match self.reader.read_resolved_event() {
                Ok((_, Event::Eof)) => return Ok(()),
                Ok((_, Event::Start(e))) | Ok((_, Event::Empty(e))) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(self.err(ErrorKind::TrailingGarbage { snippet: name }));
                }
                Ok((_, Event::Text(t))) => {
                    let text = t.unescape().map_err(|e| self.xml_error(e))?;
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        let snippet: String = trimmed.chars().take(15).collect();
                        return Err(self.err(ErrorKind::TrailingGarbage { snippet }));
                    }
                }
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    fn build_element(
        &mut self,
        ns: Option<Vec<u8>>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<Element> {
        let ns = match ns {
            Some(bytes) => Some(String::from_utf8(bytes).map_err(|_| {
                self.err(ErrorKind::Xml("namespace URI is not valid UTF-8".into()))
            })?),
            None => None,
        };

        let name = start.name();
        let prefix = match name.prefix() {
            Some(p) => Some(
                std::str::from_utf8(p.as_ref())
                    .map_err(|_| self.err(ErrorKind::Xml("element prefix is not valid UTF-8".into())))?
                    .to_owned(),
            ),
            None => None,
        };
        let local = std::str::from_utf8(name.local_name().as_ref())
            .map_err(|_| self.err(ErrorKind::Xml("element name is not valid UTF-8".into())))?
            .to_owned();

        let mut attrs = Vec::new();
        // duplicate-attribute detection is the argument binder's job
        for attr in start.attributes().with_checks(false) {
            let attr = attr.map_err(|e| {
                let line = self.line();
                ParseError::new(ErrorKind::Xml(e.to_string()), line)
            })?;
            let key = attr.key;
            // xmlns declarations are namespace bindings, not arguments
            if key.as_ref() == b"xmlns" || key.prefix().is_some_and(|p| p.as_ref() == b"xmlns") {
                continue;
            }
            let attr_prefix = match key.prefix() {
                Some(p) => Some(
                    std::str::from_utf8(p.as_ref())
                        .map_err(|_| {
                            self.err(ErrorKind::Xml("attribute prefix is not valid UTF-8".into()))
                        })?
                        .to_owned(),
                ),
                None => None,
            };
            let attr_local = std::str::from_utf8(key.local_name().as_ref())
                .map_err(|_| self.err(ErrorKind::Xml("attribute name is not valid UTF-8".into())))?
                .to_owned();
            let cow = attr
                .unescape_value()
                .map_err(|e| self.xml_error(quick_xml::Error::from(e)))?;
            let dynamic = matches!(cow, Cow::Owned(_));
            attrs.push(Attr {
                prefix: attr_prefix,
                local: attr_local,
                value: cow.into_owned(),
                dynamic,
            });
        }

        let line = self.line();
        Ok(Element {
            prefix,
            local,
            ns,
            attrs,
            empty,
            line,
        })
    }
}

/// Detach the resolved namespace from the reader's scope buffer.
fn ns_bytes(resolve: ResolveResult<'_>) -> Option<Vec<u8>> {
    match resolve {
        ResolveResult::Bound(ns) => Some(ns.as_ref().to_vec()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

/// Append one unescaped chunk to a text body, tracking whether any chunk
/// required a fresh allocation.
fn push_text(body: &mut TextBody, chunk: Cow<'_, str>) {
    if matches!(chunk, Cow::Owned(_)) || !body.text.is_empty() {
        body.dynamic = true;
    }
    body.text.push_str(&chunk);
}

impl XmlCursor<'_> {
    fn reject_mixed(&mut self, body: &TextBody) -> Result<()> {
        if !body.text.trim().is_empty() {
            return Err(self.err(ErrorKind::Xml("mixed text and element content".into())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_element_skips_prolog() {
        let mut cur = XmlCursor::new(
            "<?xml version=\"1.0\"?>\n<!-- a comment -->\n<module xmlns=\"urn:ietf:params:xml:ns:yang:yin:1\" name=\"m\"/>",
        );
        let root = cur.root_element().unwrap().expect("root");
        assert_eq!(root.local, "module");
        assert!(root.in_yin_ns());
        assert!(root.empty);
        assert_eq!(root.line, 3);
        assert_eq!(root.attrs.len(), 1);
        assert_eq!(root.attrs[0].local, "name");
        assert_eq!(root.attrs[0].value, "m");
    }

    #[test]
    fn test_xmlns_attributes_are_not_arguments() {
        let mut cur = XmlCursor::new(
            "<m xmlns=\"urn:x\" xmlns:a=\"urn:a\" name=\"n\" a:meta=\"v\"/>",
        );
        let root = cur.root_element().unwrap().unwrap();
        let names: Vec<_> = root.attrs.iter().map(|a| a.local.as_str()).collect();
        assert_eq!(names, ["name", "meta"]);
        assert_eq!(root.attrs[1].prefix.as_deref(), Some("a"));
    }

    #[test]
    fn test_text_body_is_verbatim() {
        let mut cur = XmlCursor::new("<d><text>  two\n lines  </text></d>");
        let _root = cur.root_element().unwrap().unwrap();
        let child = match cur.first_content().unwrap() {
            FirstContent::Child(c) => c,
            other => panic!("expected child, got {other:?}"),
        };
        assert_eq!(child.local, "text");
        match cur.first_content().unwrap() {
            FirstContent::Text(body) => assert_eq!(body.text, "  two\n lines  "),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_unescape_marks_dynamic() {
        let mut cur = XmlCursor::new("<e value=\"a &amp; b\"/>");
        let root = cur.root_element().unwrap().unwrap();
        assert_eq!(root.attrs[0].value, "a & b");
        assert!(root.attrs[0].dynamic);
    }

    #[test]
    fn test_children_iteration_and_close() {
        let mut cur = XmlCursor::new("<p>\n  <a/>\n  <b/>\n</p>");
        let _root = cur.root_element().unwrap().unwrap();
        let first = match cur.first_content().unwrap() {
            FirstContent::Child(c) => c,
            other => panic!("expected child, got {other:?}"),
        };
        assert_eq!(first.local, "a");
        let second = cur.next_child().unwrap().expect("second child");
        assert_eq!(second.local, "b");
        assert!(cur.next_child().unwrap().is_none());
        assert!(cur.finish().is_ok());
    }

    #[test]
    fn test_trailing_garbage_detected() {
        let mut cur = XmlCursor::new("<a/><b/>");
        let _root = cur.root_element().unwrap().unwrap();
        let err = cur.finish().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TrailingGarbage { .. }));
    }

    #[test]
    fn test_unknown_prefix_resolves_to_no_namespace() {
        let mut cur = XmlCursor::new("<u:e xmlns:other=\"urn:o\"/>");
        // quick-xml reports the undeclared prefix as unresolved, not an error
        let root = cur.root_element().unwrap().unwrap();
        assert_eq!(root.ns, None);
        assert_eq!(root.prefix.as_deref(), Some("u"));
    }
}
