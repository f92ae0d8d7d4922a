//! Catalog writer.
//!
//! Produces the layout the linguist tool itself writes: XML declaration,
//! `<!DOCTYPE TS>`, one unindented `<context>` per scope and four-space
//! indentation below it. Reading the output back yields the same
//! (context, source, translation, status) tuples.

use crate::escape::{escape_attr, escape_text};
use crate::model::{Catalog, Message, Status};

const INDENT: &str = "    ";

/// Writer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<location>` elements.
    pub locations: bool,
    /// Emit messages whose status is `obsolete`.
    pub obsolete: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            locations: true,
            obsolete: true,
        }
    }
}

/// Serialize a catalog with default options.
#[must_use]
pub fn write(catalog: &Catalog) -> String {
    write_with(catalog, &WriteOptions::default())
}

/// Serialize a catalog.
#[must_use]
pub fn write_with(catalog: &Catalog, options: &WriteOptions) -> String {
    let mut out = String::with_capacity(64 * catalog.message_count() + 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS");
    attr(&mut out, "version", catalog.version());
    if !catalog.locale().is_empty() {
        attr(&mut out, "language", catalog.locale());
    }
    if !catalog.source_locale().is_empty() {
        attr(&mut out, "sourcelanguage", catalog.source_locale());
    }
    out.push_str(">\n");

    for context in catalog.contexts() {
        out.push_str("<context>\n");
        out.push_str(INDENT);
        element(&mut out, "name", context.name());
        for message in context.messages() {
            if message.status == Status::Obsolete && !options.obsolete {
                continue;
            }
            write_message(&mut out, message, options);
        }
        out.push_str("</context>\n");
    }
    out.push_str("</TS>\n");
    out
}

fn write_message(out: &mut String, message: &Message, options: &WriteOptions) {
    let inner = INDENT.repeat(2);
    out.push_str(INDENT);
    out.push_str("<message>\n");

    if options.locations {
        for location in &message.locations {
            out.push_str(&inner);
            out.push_str("<location");
            if let Some(filename) = &location.filename {
                attr(out, "filename", filename);
            }
            if let Some(line) = location.line {
                attr(out, "line", &line.to_string());
            }
            out.push_str("/>\n");
        }
    }

    out.push_str(&inner);
    element(out, "source", &message.source);
    let comments = [
        ("comment", &message.comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, text) in comments {
        if let Some(text) = text {
            out.push_str(&inner);
            element(out, name, text);
        }
    }

    out.push_str(&inner);
    out.push_str("<translation");
    if let Some(kind) = message.status.as_attr() {
        attr(out, "type", kind);
    }
    out.push('>');
    escape_text(&message.translation, out);
    out.push_str("</translation>\n");

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr(value, out);
    out.push('"');
}

fn element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    escape_text(text, out);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}
