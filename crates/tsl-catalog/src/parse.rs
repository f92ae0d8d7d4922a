//! Resource parser.
//!
//! Parsing runs in two passes over an in-memory buffer:
//!
//! - a tokenizer state machine turns the text into start tags, end tags and
//!   decoded text, skipping declarations, comments and processing
//!   instructions;
//! - a tree pass checks nesting and builds elements, which are then read
//!   into a [`Catalog`].
//!
//! Parsing is all-or-nothing: any structural problem yields
//! [`ParseError::Malformed`] and no catalog. Content problems that the format
//! tolerates (unknown status values, duplicate source strings) are recorded in
//! the [`ParseReport`] instead.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Broken markup | Unterminated tag, mismatched end tag, bad entity | `Malformed` |
//! | Wrong document | Root is not `TS`, no root, several roots | `Malformed` |
//! | Message without `<source>` | Truncated resource | `Malformed` |
//! | Unknown `type` value | Newer format vocabulary | Lenient status, reported |
//! | Duplicate source in a context | Data-entry slip | Last wins, reported |
//! | Unknown element | Newer format elements | Skipped with its subtree |

use thiserror::Error;

use crate::escape::{decode_byte_value, decode_entity, parse_unsigned};
use crate::model::{Catalog, DEFAULT_VERSION, Location, Message, Status};

/// Why a resource was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("resource is not valid UTF-8")]
    InvalidUtf8,
    #[error("unterminated {0}")]
    Unterminated(&'static str),
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("invalid element or attribute name")]
    InvalidName,
    #[error("unknown entity reference `&{0};`")]
    UnknownEntity(String),
    #[error("duplicate attribute `{0}`")]
    DuplicateAttribute(String),
    #[error("end tag `</{found}>` does not match `<{expected}>`")]
    MismatchedEndTag { expected: String, found: String },
    #[error("end tag `</{0}>` without a matching start tag")]
    UnexpectedEndTag(String),
    #[error("element `<{0}>` is never closed")]
    UnclosedElement(String),
    #[error("no root element")]
    MissingRoot,
    #[error("root element is `<{0}>`, expected `<TS>`")]
    WrongRoot(String),
    #[error("more than one root element")]
    MultipleRoots,
    #[error("text outside the root element")]
    TextOutsideRoot,
    #[error("message has no <source>")]
    MissingSource,
    #[error("invalid <byte> value `{0}`")]
    InvalidByteValue(String),
    #[error("elements nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Errors from catalog parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The resource is structurally invalid. Line and column are 1-based.
    #[error("malformed resource at {line}:{column}: {reason}")]
    Malformed {
        line: usize,
        column: usize,
        reason: MalformedReason,
    },
}

impl ParseError {
    fn at(src: &str, offset: usize, reason: MalformedReason) -> Self {
        let (line, column) = line_column(src, offset);
        Self::Malformed {
            line,
            column,
            reason,
        }
    }

    /// The rejection reason.
    #[must_use]
    pub fn reason(&self) -> &MalformedReason {
        match self {
            Self::Malformed { reason, .. } => reason,
        }
    }
}

fn line_column(src: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(src.len());
    let before = src.get(..offset).unwrap_or(src);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, column)
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trim surrounding whitespace from source texts and context names.
    pub trim_keys: bool,
    /// Drop messages whose status is `obsolete`.
    pub skip_obsolete: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_keys: true,
            skip_obsolete: false,
        }
    }
}

/// A source string that appeared more than once in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DuplicateSource {
    pub context: String,
    pub source: String,
    /// Line of the occurrence that won.
    pub line: usize,
}

/// A `type` attribute outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnknownStatus {
    pub context: String,
    pub source: String,
    pub value: String,
    /// Status the message was given instead.
    pub resolved: Status,
}

/// Non-fatal findings collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseReport {
    pub duplicates: Vec<DuplicateSource>,
    pub unknown_statuses: Vec<UnknownStatus>,
    /// Elements that were not understood and skipped.
    pub skipped_elements: usize,
}

impl ParseReport {
    /// Whether parsing found nothing worth reporting.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.unknown_statuses.is_empty()
    }
}

/// A parsed catalog together with its report.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub catalog: Catalog,
    pub report: ParseReport,
}

/// Parse a resource with default options.
///
/// # Example
///
/// ```
/// let src = br#"<?xml version="1.0" encoding="utf-8"?>
/// <!DOCTYPE TS>
/// <TS version="2.0" language="ro_RO" sourcelanguage="en_US">
/// <context>
///     <name>CloudDeskTray</name>
///     <message>
///         <source>Quit %s</source>
///         <translation>Termina %s</translation>
///     </message>
/// </context>
/// </TS>"#;
///
/// let catalog = tsl_catalog::parse(src).unwrap();
/// assert_eq!(catalog.locale(), "ro_RO");
/// let msg = catalog.context("CloudDeskTray").and_then(|c| c.get("Quit %s")).unwrap();
/// assert_eq!(msg.translation, "Termina %s");
/// ```
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] when the resource is not a well-formed
/// catalog document.
pub fn parse(bytes: &[u8]) -> Result<Catalog, ParseError> {
    parse_with(bytes, &ParseOptions::default()).map(|parsed| parsed.catalog)
}

/// Parse a resource with explicit options, returning the findings report.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] when the resource is not a well-formed
/// catalog document.
pub fn parse_with(bytes: &[u8], options: &ParseOptions) -> Result<Parsed, ParseError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let src = std::str::from_utf8(bytes).map_err(|err| {
        let lossy = String::from_utf8_lossy(&bytes[..err.valid_up_to()]);
        ParseError::at(&lossy, lossy.len(), MalformedReason::InvalidUtf8)
    })?;

    let root = build_tree(src)?;
    let parsed = read_catalog(src, &root, options)?;

    tracing::debug!(
        locale = parsed.catalog.locale(),
        contexts = parsed.catalog.contexts().len(),
        messages = parsed.catalog.message_count(),
        duplicates = parsed.report.duplicates.len(),
        "parsed translation catalog"
    );
    Ok(parsed)
}

// ---------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Start {
        name: &'a str,
        attrs: Vec<(&'a str, String)>,
        empty: bool,
    },
    End {
        name: &'a str,
    },
    Text(String),
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, offset: usize, reason: MalformedReason) -> ParseError {
        ParseError::at(self.src, offset, reason)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Next token and the byte offset it starts at.
    fn next_token(&mut self) -> Result<Option<(usize, Token<'a>)>, ParseError> {
        loop {
            let start = self.pos;
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }
            if rest.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let end = body
                    .find("]]>")
                    .ok_or_else(|| self.error(start, MalformedReason::Unterminated("CDATA section")))?;
                self.pos += "<![CDATA[".len() + end + "]]>".len();
                return Ok(Some((start, Token::Text(normalize_newlines(&body[..end])))));
            } else if rest.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with("<!") {
                self.skip_declaration()?;
            } else if rest.starts_with("</") {
                return self.end_tag().map(|tok| Some((start, tok)));
            } else if rest.starts_with('<') {
                return self.start_tag().map(|tok| Some((start, tok)));
            } else {
                return self.text().map(|tok| Some((start, tok)));
            }
        }
    }

    fn skip_past(&mut self, terminator: &str, what: &'static str) -> Result<(), ParseError> {
        let start = self.pos;
        let end = self.src[start + 2..]
            .find(terminator)
            .ok_or_else(|| self.error(start, MalformedReason::Unterminated(what)))?;
        self.pos = start + 2 + end + terminator.len();
        Ok(())
    }

    /// `<!DOCTYPE ...>` including an optional `[...]` internal subset.
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let mut depth = 0usize;
        for (idx, byte) in self.src.as_bytes()[start + 2..].iter().enumerate() {
            match byte {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    self.pos = start + 2 + idx + 1;
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(self.error(start, MalformedReason::Unterminated("declaration")))
    }

    fn skip_whitespace(&mut self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(is_xml_whitespace);
        self.pos += rest.len() - trimmed.len();
        rest.len() != trimmed.len()
    }

    fn name(&mut self) -> Result<&'a str, ParseError> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if is_name_start(c) => {}
            _ => return Err(self.error(self.pos, MalformedReason::InvalidName)),
        }
        let len = chars
            .find(|&(_, c)| !is_name_char(c))
            .map_or(rest.len(), |(idx, _)| idx);
        self.pos += len;
        Ok(&rest[..len])
    }

    fn expect(&mut self, ch: char, what: &'static str, tag_start: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == ch => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(_) => Err(self.error(self.pos, MalformedReason::Expected(what))),
            None => Err(self.error(tag_start, MalformedReason::Unterminated("tag"))),
        }
    }

    fn end_tag(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.pos;
        self.pos += 2;
        let name = self.name()?;
        self.skip_whitespace();
        self.expect('>', "`>`", start)?;
        Ok(Token::End { name })
    }

    fn start_tag(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.name()?;
        let mut attrs: Vec<(&'a str, String)> = Vec::new();
        loop {
            let spaced = self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(start, MalformedReason::Unterminated("tag"))),
                Some('>') => {
                    self.pos += 1;
                    return Ok(Token::Start {
                        name,
                        attrs,
                        empty: false,
                    });
                }
                Some('/') => {
                    self.pos += 1;
                    self.expect('>', "`>` after `/`", start)?;
                    return Ok(Token::Start {
                        name,
                        attrs,
                        empty: true,
                    });
                }
                Some(_) if !spaced => {
                    return Err(self.error(self.pos, MalformedReason::Expected("whitespace")));
                }
                Some(_) => {
                    let attr_start = self.pos;
                    let key = self.name()?;
                    self.skip_whitespace();
                    self.expect('=', "`=` after attribute name", start)?;
                    self.skip_whitespace();
                    let value = self.attr_value(start)?;
                    if attrs.iter().any(|(existing, _)| *existing == key) {
                        return Err(self.error(
                            attr_start,
                            MalformedReason::DuplicateAttribute(key.to_string()),
                        ));
                    }
                    attrs.push((key, value));
                }
            }
        }
    }

    fn attr_value(&mut self, tag_start: usize) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(self.error(self.pos, MalformedReason::Expected("quoted value"))),
            None => return Err(self.error(tag_start, MalformedReason::Unterminated("tag"))),
        };
        let value_start = self.pos + 1;
        let body = &self.src[value_start..];
        let end = body
            .find(quote)
            .ok_or_else(|| self.error(self.pos, MalformedReason::Unterminated("attribute value")))?;
        let raw = &body[..end];
        if let Some(idx) = raw.find('<') {
            return Err(self.error(value_start + idx, MalformedReason::Expected("no `<` in attribute value")));
        }
        self.pos = value_start + end + 1;
        self.decode(raw, value_start)
    }

    fn text(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        self.decode(&rest[..end], start).map(Token::Text)
    }

    /// Decode entity references and normalize line endings.
    fn decode(&self, raw: &str, base: usize) -> Result<String, ParseError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        let mut offset = base;
        while let Some(idx) = rest.find(&['&', '\r'][..]) {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            let consumed = if tail.starts_with("\r\n") {
                out.push('\n');
                2
            } else if tail.starts_with('\r') {
                out.push('\n');
                1
            } else {
                let semi = tail.find(';').ok_or_else(|| {
                    self.error(offset + idx, MalformedReason::Unterminated("entity reference"))
                })?;
                let body = &tail[1..semi];
                let ch = decode_entity(body).ok_or_else(|| {
                    self.error(
                        offset + idx,
                        MalformedReason::UnknownEntity(body.to_string()),
                    )
                })?;
                out.push(ch);
                semi + 1
            };
            rest = &tail[consumed..];
            offset += idx + consumed;
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || matches!(c, '-' | '.')
}

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

// ---------------------------------------------------------------------
// Element tree
// ---------------------------------------------------------------------

#[derive(Debug)]
struct Element<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, String)>,
    children: Vec<Node<'a>>,
    offset: usize,
}

#[derive(Debug)]
enum Node<'a> {
    Element(Element<'a>),
    Text(String),
}

impl<'a> Element<'a> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    fn elements(&self) -> impl Iterator<Item = &Element<'a>> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    fn child(&self, name: &str) -> Option<&Element<'a>> {
        self.elements().find(|el| el.name == name)
    }
}

/// Elements the catalog reader looks into. Any other element is kept as an
/// empty placeholder and its content is only checked for well-formedness.
const READ_ELEMENTS: &[&str] = &[
    "TS",
    "context",
    "name",
    "message",
    "source",
    "translation",
    "numerusform",
    "byte",
    "location",
    "comment",
    "extracomment",
    "translatorcomment",
];

/// Deepest nesting of read elements kept in the tree.
const MAX_DEPTH: usize = 32;

fn build_tree(src: &str) -> Result<Element<'_>, ParseError> {
    let mut tokenizer = Tokenizer::new(src);
    let mut stack: Vec<Element<'_>> = Vec::new();
    let mut root: Option<Element<'_>> = None;
    // Open elements inside a discarded subtree, innermost last.
    let mut discarded: Vec<(&str, usize)> = Vec::new();

    while let Some((offset, token)) = tokenizer.next_token()? {
        if !discarded.is_empty() {
            match token {
                Token::Start { name, empty, .. } => {
                    if !empty {
                        discarded.push((name, offset));
                    }
                }
                Token::End { name } => {
                    if let Some((open, _)) = discarded.pop() {
                        if open != name {
                            return Err(ParseError::at(
                                src,
                                offset,
                                MalformedReason::MismatchedEndTag {
                                    expected: open.to_string(),
                                    found: name.to_string(),
                                },
                            ));
                        }
                    }
                }
                Token::Text(_) => {}
            }
            continue;
        }

        match token {
            Token::Start { name, attrs, empty } => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::at(src, offset, MalformedReason::MultipleRoots));
                }
                let element = Element {
                    name,
                    attrs,
                    children: Vec::new(),
                    offset,
                };
                if empty {
                    attach(&mut stack, &mut root, element);
                } else if !READ_ELEMENTS.contains(&name) {
                    attach(&mut stack, &mut root, element);
                    discarded.push((name, offset));
                } else if stack.len() >= MAX_DEPTH {
                    return Err(ParseError::at(src, offset, MalformedReason::TooDeep(MAX_DEPTH)));
                } else {
                    stack.push(element);
                }
            }
            Token::End { name } => {
                let Some(open) = stack.pop() else {
                    return Err(ParseError::at(
                        src,
                        offset,
                        MalformedReason::UnexpectedEndTag(name.to_string()),
                    ));
                };
                if open.name != name {
                    return Err(ParseError::at(
                        src,
                        offset,
                        MalformedReason::MismatchedEndTag {
                            expected: open.name.to_string(),
                            found: name.to_string(),
                        },
                    ));
                }
                attach(&mut stack, &mut root, open);
            }
            Token::Text(text) => match stack.last_mut() {
                Some(parent) => parent.children.push(Node::Text(text)),
                None if text.trim_matches(is_xml_whitespace).is_empty() => {}
                None => {
                    return Err(ParseError::at(src, offset, MalformedReason::TextOutsideRoot));
                }
            },
        }
    }

    if let Some(&(name, offset)) = discarded.last() {
        return Err(ParseError::at(
            src,
            offset,
            MalformedReason::UnclosedElement(name.to_string()),
        ));
    }
    if let Some(open) = stack.last() {
        return Err(ParseError::at(
            src,
            open.offset,
            MalformedReason::UnclosedElement(open.name.to_string()),
        ));
    }
    root.ok_or_else(|| ParseError::at(src, src.len(), MalformedReason::MissingRoot))
}

fn attach<'a>(stack: &mut [Element<'a>], root: &mut Option<Element<'a>>, element: Element<'a>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

// ---------------------------------------------------------------------
// Catalog reader
// ---------------------------------------------------------------------

struct Reader<'s, 'o> {
    src: &'s str,
    options: &'o ParseOptions,
    catalog: Catalog,
    report: ParseReport,
}

fn read_catalog(src: &str, root: &Element<'_>, options: &ParseOptions) -> Result<Parsed, ParseError> {
    if root.name != "TS" {
        return Err(ParseError::at(
            src,
            root.offset,
            MalformedReason::WrongRoot(root.name.to_string()),
        ));
    }

    let catalog = Catalog::new(
        root.attr("language").unwrap_or_default(),
        root.attr("sourcelanguage").unwrap_or_default(),
    )
    .with_version(root.attr("version").unwrap_or(DEFAULT_VERSION));

    let mut reader = Reader {
        src,
        options,
        catalog,
        report: ParseReport::default(),
    };
    for child in root.elements() {
        match child.name {
            "context" => reader.context(child)?,
            other => reader.skip(other, child),
        }
    }
    Ok(Parsed {
        catalog: reader.catalog,
        report: reader.report,
    })
}

impl Reader<'_, '_> {
    fn skip(&mut self, name: &str, element: &Element<'_>) {
        tracing::debug!(element = name, offset = element.offset, "skipping unknown element");
        self.report.skipped_elements += 1;
    }

    fn key(&self, text: String) -> String {
        if self.options.trim_keys {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                return trimmed.to_string();
            }
        }
        text
    }

    fn context(&mut self, element: &Element<'_>) -> Result<(), ParseError> {
        let name = match element.child("name") {
            Some(name) => self.key(self.text(name)?),
            None => String::new(),
        };
        self.catalog.context_entry(&name);

        for child in element.elements() {
            match child.name {
                "message" => self.message(&name, child)?,
                "name" => {}
                other => self.skip(other, child),
            }
        }
        Ok(())
    }

    fn message(&mut self, context: &str, element: &Element<'_>) -> Result<(), ParseError> {
        let source = element
            .child("source")
            .ok_or_else(|| ParseError::at(self.src, element.offset, MalformedReason::MissingSource))?;
        let source = self.key(self.text(source)?);

        let mut message = Message::new(source, String::new());
        for child in element.elements() {
            match child.name {
                "source" => {}
                "translation" => self.translation(context, child, &mut message)?,
                "location" => message.locations.push(Location {
                    filename: child.attr("filename").map(str::to_string),
                    line: child.attr("line").and_then(|line| parse_unsigned(line, 10)),
                }),
                "comment" => message.comment = Some(self.text(child)?),
                "extracomment" => message.extra_comment = Some(self.text(child)?),
                "translatorcomment" => message.translator_comment = Some(self.text(child)?),
                "oldsource" | "oldcomment" | "userdata" => {}
                other => self.skip(other, child),
            }
        }
        if element.child("translation").is_none() {
            message.status = Status::Unfinished;
        }

        if self.options.skip_obsolete && message.status == Status::Obsolete {
            return Ok(());
        }

        let source = message.source.clone();
        if self.catalog.insert(context, message).is_some() {
            let (line, _) = line_column(self.src, element.offset);
            tracing::warn!(context, source = %source, line, "duplicate source string, later entry wins");
            self.report.duplicates.push(DuplicateSource {
                context: context.to_string(),
                source,
                line,
            });
        }
        Ok(())
    }

    fn translation(
        &mut self,
        context: &str,
        element: &Element<'_>,
        message: &mut Message,
    ) -> Result<(), ParseError> {
        // Plural forms are not modelled; the first form stands for the message.
        message.translation = match element.child("numerusform") {
            Some(form) => self.text(form)?,
            None => self.text(element)?,
        };
        message.status = match element.attr("type") {
            None => Status::Translated,
            Some(value) => match Status::from_attr(value) {
                Some(status) => status,
                None => {
                    let resolved = Status::for_unknown(&message.translation);
                    tracing::warn!(
                        context,
                        source = %message.source,
                        value,
                        %resolved,
                        "unknown translation status"
                    );
                    self.report.unknown_statuses.push(UnknownStatus {
                        context: context.to_string(),
                        source: message.source.clone(),
                        value: value.to_string(),
                        resolved,
                    });
                    resolved
                }
            },
        };
        Ok(())
    }

    /// Concatenated text of an element, with `<byte>` elements decoded.
    fn text(&self, element: &Element<'_>) -> Result<String, ParseError> {
        let mut out = String::new();
        for node in &element.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) if el.name == "byte" => {
                    let value = el.attr("value").unwrap_or_default();
                    let ch = decode_byte_value(value).ok_or_else(|| {
                        ParseError::at(
                            self.src,
                            el.offset,
                            MalformedReason::InvalidByteValue(value.to_string()),
                        )
                    })?;
                    out.push(ch);
                }
                Node::Element(_) => {}
            }
        }
        Ok(out)
    }
}
