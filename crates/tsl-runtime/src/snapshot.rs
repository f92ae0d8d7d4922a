//! Compiled, immutable lookup tables for one catalog.
//!
//! # Invariants
//!
//! 1. **Every context is indexed**: a context present in the catalog has a
//!    table here even when none of its messages is translated, so a known
//!    context never falls back to the default scope.
//!
//! 2. **Only usable text is stored**: empty translations are dropped at
//!    compile time; a miss and an empty translation both resolve to the
//!    caller's source.
//!
//! 3. **Total lookup**: [`Snapshot::translate`] and [`Snapshot::lookup`]
//!    always return a string.

use std::collections::HashMap;
use std::fmt;

use tsl_catalog::{Catalog, Locale};

use crate::format::substitute;

type Table = HashMap<String, String>;

/// A catalog compiled for O(1) `(context, source)` lookup.
///
/// Snapshots are cheap to share behind an [`Arc`](std::sync::Arc) and are
/// never modified after construction.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    locale: Locale,
    source_locale: Locale,
    contexts: HashMap<String, Table>,
    messages: usize,
}

impl Snapshot {
    /// A snapshot with no contexts; every lookup returns its source.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a catalog into lookup tables.
    #[must_use]
    pub fn compile(catalog: Catalog) -> Self {
        let locale = catalog.locale().to_string();
        let source_locale = catalog.source_locale().to_string();

        let mut contexts: HashMap<String, Table> = HashMap::new();
        let mut messages = 0;
        for context in catalog.into_contexts() {
            let (name, entries) = context.into_parts();
            let table = contexts.entry(name).or_default();
            for message in entries {
                if message.has_translation() {
                    table.insert(message.source, message.translation);
                    messages += 1;
                }
            }
        }

        tracing::debug!(
            locale = %locale,
            contexts = contexts.len(),
            translated = messages,
            "compiled lookup snapshot"
        );

        Self {
            locale,
            source_locale,
            contexts,
            messages,
        }
    }

    /// Target locale of the compiled catalog (empty for [`Snapshot::empty`]).
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Source locale of the compiled catalog.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Number of indexed contexts.
    #[must_use]
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Number of messages with a usable translation.
    #[must_use]
    pub fn translated_count(&self) -> usize {
        self.messages
    }

    /// Whether `name` is a known context, after key normalization.
    #[must_use]
    pub fn has_context(&self, name: &str) -> bool {
        self.context_table(name).is_some()
    }

    /// Resolve `(context, source)` to display text without substitution.
    ///
    /// Unknown contexts fall back to the default (unnamed) context. A miss
    /// anywhere returns `source` unchanged.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        let table = self
            .context_table(context)
            .or_else(|| self.contexts.get(""));
        let Some(table) = table else {
            return source;
        };
        find(table, source).map_or(source, String::as_str)
    }

    /// Resolve and substitute `args` into the result.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str, args: &[&dyn fmt::Display]) -> String {
        substitute(self.translate(context, source), args).into_owned()
    }

    fn context_table(&self, name: &str) -> Option<&Table> {
        find(&self.contexts, name)
    }
}

impl From<Catalog> for Snapshot {
    fn from(catalog: Catalog) -> Self {
        Self::compile(catalog)
    }
}

/// Exact key first, then the trimmed key the parser stores.
fn find<'m, V>(map: &'m HashMap<String, V>, key: &str) -> Option<&'m V> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let trimmed = key.trim();
    if trimmed.len() == key.len() {
        return None;
    }
    map.get(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsl_catalog::{Message, Status};

    fn drive_catalog() -> Catalog {
        let mut catalog = Catalog::new("ro_RO", "en_US");
        catalog.insert("", Message::new("Quit %s", "Termina %s"));
        catalog.insert("", Message::new("Login", "Autentificare"));
        catalog.insert("", Message::unfinished("Settings"));
        catalog.insert(
            "ProxyDlg",
            Message::new("Must be a numeric value.", "Trebuie sa fie o valoare numerica"),
        );
        catalog.insert("AdvancedPage", Message::unfinished("Change..."));
        catalog.insert("IntroPage", Message::new("Login", "Conectare"));
        catalog.insert(
            "SettingsDialog",
            Message::new("Old label", "Eticheta veche").with_status(Status::Obsolete),
        );
        catalog
    }

    #[test]
    fn translated_entry() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(
            snap.translate("ProxyDlg", "Must be a numeric value."),
            "Trebuie sa fie o valoare numerica"
        );
    }

    #[test]
    fn unfinished_entry_returns_source() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("AdvancedPage", "Change..."), "Change...");
    }

    #[test]
    fn unknown_context_uses_default() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("NoSuchDialog", "Login"), "Autentificare");
        assert_eq!(snap.translate("NoSuchDialog", "Nope"), "Nope");
    }

    #[test]
    fn known_context_does_not_use_default() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("ProxyDlg", "Login"), "Login");
        assert!(snap.has_context("AdvancedPage"));
    }

    #[test]
    fn same_source_differs_by_context() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("", "Login"), "Autentificare");
        assert_eq!(snap.translate("IntroPage", "Login"), "Conectare");
    }

    #[test]
    fn obsolete_text_is_still_used() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("SettingsDialog", "Old label"), "Eticheta veche");
    }

    #[test]
    fn query_keys_are_trimmed_but_fallback_is_not() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(
            snap.translate(" ProxyDlg ", "  Must be a numeric value.\n"),
            "Trebuie sa fie o valoare numerica"
        );
        assert_eq!(snap.translate("ProxyDlg", "  Unknown  "), "  Unknown  ");
    }

    #[test]
    fn case_is_significant() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.translate("", "login"), "login");
    }

    #[test]
    fn lookup_substitutes() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.lookup("", "Quit %s", &[&"MyApp"]), "Termina MyApp");
        assert_eq!(snap.lookup("Tray", "Quit %s", &[]), "Termina %s");
        assert_eq!(snap.lookup("AdvancedPage", "Move %s", &[&"x"]), "Move x");
    }

    #[test]
    fn empty_snapshot_returns_source() {
        let snap = Snapshot::empty();
        assert_eq!(snap.translate("", "Quit %s"), "Quit %s");
        assert_eq!(snap.locale(), "");
        assert_eq!(snap.context_count(), 0);
    }

    #[test]
    fn no_default_context_skips_to_source() {
        let mut catalog = Catalog::new("ro_RO", "en_US");
        catalog.insert("ProxyDlg", Message::new("Port", "Port"));
        let snap = Snapshot::from(catalog);
        assert_eq!(snap.translate("Elsewhere", "Port"), "Port");
        assert_eq!(snap.translate("Elsewhere", "Quit"), "Quit");
    }

    #[test]
    fn counts_and_locales() {
        let snap = Snapshot::compile(drive_catalog());
        assert_eq!(snap.locale(), "ro_RO");
        assert_eq!(snap.source_locale(), "en_US");
        assert_eq!(snap.context_count(), 5);
        assert_eq!(snap.translated_count(), 5);
    }
}
