#![forbid(unsafe_code)]

//! Translation catalogs for Qt Linguist style resources.
//!
//! A resource maps source-language UI strings, grouped by the dialog
//! (context) they come from, to translated text. This crate owns the
//! in-memory model and everything that works on whole catalogs:
//!
//! - [`parse`] / [`parse_with`]: all-or-nothing parsing of a byte buffer.
//! - [`write`] / [`write_with`]: serialization back to the resource format.
//! - [`lint`]: duplicate, status and placeholder checks plus coverage.
//! - [`placeholder`]: printf-style token scanning shared with the runtime.
//!
//! Lookup with fallback and argument substitution lives in `tsl-runtime`.

pub mod escape;
pub mod lint;
pub mod model;
pub mod parse;
pub mod placeholder;
pub mod write;

pub use lint::{CoverageReport, Finding, LintReport, Severity, coverage, lint, lint_catalog};
pub use model::{Catalog, Context, Locale, Location, Message, Status};
pub use parse::{
    MalformedReason, ParseError, ParseOptions, ParseReport, Parsed, parse, parse_with,
};
pub use write::{WriteOptions, write, write_with};
