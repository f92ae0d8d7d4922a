//! In-memory translation catalog.
//!
//! # Invariants
//!
//! 1. **Unique context names**: a [`Catalog`] never holds two contexts with
//!    the same name. Inserting into an existing name merges into it.
//!
//! 2. **Unique source keys**: a [`Context`] never holds two messages with the
//!    same source text. A later insert replaces the earlier message in place
//!    (last wins, first-seen position kept).
//!
//! 3. **Stable order**: contexts and messages keep document order, so writing
//!    a parsed catalog reproduces the resource layout.
//!
//! 4. **Immutable after construction**: messages are only reachable through
//!    shared references once inserted; a catalog is replaced, never patched.

use std::collections::HashMap;

/// Locale identifier as written in the resource (e.g., `"ro_RO"`, `"en_US"`).
pub type Locale = String;

/// Format version written when a catalog does not carry one.
pub const DEFAULT_VERSION: &str = "2.0";

/// Translation state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    /// Translation is final (no `type` attribute in the resource).
    #[default]
    Translated,
    /// Not yet translated for the target locale.
    Unfinished,
    /// Source string no longer exists in the application.
    Obsolete,
}

impl Status {
    /// The `type` attribute value, or `None` for [`Status::Translated`].
    #[must_use]
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Translated => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Parse a known `type` attribute value.
    ///
    /// Returns `None` for values outside the vocabulary; callers apply
    /// [`Status::for_unknown`] in that case.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// Status assigned when the resource carries an unrecognized value.
    #[must_use]
    pub fn for_unknown(translation: &str) -> Self {
        if translation.is_empty() {
            Self::Unfinished
        } else {
            Self::Translated
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Translated => "translated",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
        })
    }
}

/// Where a message was extracted from. Provenance only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// Originating file path, relative to the resource.
    pub filename: Option<String>,
    /// Line number inside `filename`.
    pub line: Option<u32>,
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    /// Source-language text; the lookup key within its context.
    pub source: String,
    /// Translated text. Empty when no translation exists.
    pub translation: String,
    /// Translation state.
    pub status: Status,
    /// Extraction sites.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub locations: Vec<Location>,
    /// Developer disambiguation comment (`<comment>`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    /// Comment extracted from the code (`<extracomment>`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub extra_comment: Option<String>,
    /// Note left by the translator (`<translatorcomment>`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub translator_comment: Option<String>,
}

impl Message {
    /// A translated message.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            ..Self::default()
        }
    }

    /// An unfinished message with an empty translation.
    #[must_use]
    pub fn unfinished(source: impl Into<String>) -> Self {
        Self::new(source, String::new()).with_status(Status::Unfinished)
    }

    /// Replace the status.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Append an extraction site.
    #[must_use]
    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location {
            filename: Some(filename.into()),
            line: Some(line),
        });
        self
    }

    /// Whether the message has usable translated text.
    #[must_use]
    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }
}

/// A named scope of messages. The empty name is the default context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Context {
    name: String,
    messages: Vec<Message>,
    #[cfg_attr(feature = "serde", serde(skip))]
    positions: HashMap<String, usize>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Context name; empty for the default context.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the shared default context.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    /// Insert a message, replacing any message with the same source text.
    ///
    /// The replacement keeps the position of the message it replaces.
    /// Returns the replaced message.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        match self.positions.get(&message.source) {
            Some(&idx) => Some(std::mem::replace(&mut self.messages[idx], message)),
            None => {
                self.positions
                    .insert(message.source.clone(), self.messages.len());
                self.messages.push(message);
                None
            }
        }
    }

    /// Look up a message by exact source text.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&Message> {
        self.positions.get(source).map(|&idx| &self.messages[idx])
    }

    /// Messages in document order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the context has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consume the context into its name and messages.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Message>) {
        (self.name, self.messages)
    }
}

/// All contexts for one target locale.
///
/// # Example
///
/// ```
/// use tsl_catalog::{Catalog, Message};
///
/// let mut catalog = Catalog::new("ro_RO", "en_US");
/// catalog.insert("ProxyDlg", Message::new("Must be a numeric value.", "Trebuie sa fie o valoare numerica"));
/// catalog.insert("", Message::unfinished("Login"));
///
/// let proxy = catalog.context("ProxyDlg").unwrap();
/// assert_eq!(
///     proxy.get("Must be a numeric value.").map(|m| m.translation.as_str()),
///     Some("Trebuie sa fie o valoare numerica")
/// );
/// assert!(catalog.default_context().is_some());
/// assert_eq!(catalog.message_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    version: String,
    locale: Locale,
    source_locale: Locale,
    contexts: Vec<Context>,
    #[cfg_attr(feature = "serde", serde(skip))]
    positions: HashMap<String, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(locale: impl Into<Locale>, source_locale: impl Into<Locale>) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            locale: locale.into(),
            source_locale: source_locale.into(),
            contexts: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Replace the format version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Format version of the resource.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Target locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Locale the source strings are written in.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Look up a context by exact name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.positions.get(name).map(|&idx| &self.contexts[idx])
    }

    /// The default (empty-name) context, if present.
    #[must_use]
    pub fn default_context(&self) -> Option<&Context> {
        self.context("")
    }

    /// Get the named context, appending an empty one if missing.
    pub fn context_entry(&mut self, name: &str) -> &mut Context {
        let idx = match self.positions.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.contexts.len();
                self.positions.insert(name.to_string(), idx);
                self.contexts.push(Context::new(name));
                idx
            }
        };
        &mut self.contexts[idx]
    }

    /// Insert a message into the named context (created on demand).
    ///
    /// Returns the message it replaced, if any.
    pub fn insert(&mut self, context: &str, message: Message) -> Option<Message> {
        self.context_entry(context).insert(message)
    }

    /// Contexts in document order.
    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Iterate over every `(context, message)` pair in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    /// Total number of messages across all contexts.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    /// Whether the catalog has no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    /// Consume the catalog, yielding its contexts in document order.
    #[must_use]
    pub fn into_contexts(self) -> Vec<Context> {
        self.contexts
    }
}
