#![forbid(unsafe_code)]

//! Runtime lookup for translation catalogs.
//!
//! [`Translator`] holds the active catalog as an immutable [`Snapshot`] and
//! answers `(context, source)` queries:
//!
//! 1. An unknown context falls back to the default (unnamed) context.
//! 2. A missing message or empty translation yields the source text.
//! 3. Positional placeholders are filled from the caller's arguments.
//!
//! Lookup never fails and never blocks on a catalog swap for longer than an
//! `Arc` clone.
//!
//! # Example
//!
//! ```
//! use tsl_catalog::{Catalog, Message};
//! use tsl_runtime::{Translator, tr};
//!
//! let mut catalog = Catalog::new("ro_RO", "en_US");
//! catalog.insert("", Message::new("Error moving folder %s to %s", "Eroare la mutarea %s in %s"));
//! let translator = Translator::new(catalog);
//!
//! assert_eq!(
//!     tr!(translator, "", "Error moving folder %s to %s", "a", "b"),
//!     "Eroare la mutarea a in b"
//! );
//! assert_eq!(tr!(translator, "SettingsDialog", "Cancel"), "Cancel");
//! ```

pub mod format;
pub mod snapshot;
pub mod translator;

pub use format::substitute;
pub use snapshot::Snapshot;
pub use translator::{ScopedTranslator, Translator};

/// Look up a message with variadic arguments.
///
/// `tr!(translator, context, source, args...)` expands to
/// [`Translator::lookup`] with each argument passed by `Display`. Works with
/// anything exposing a matching `lookup(&str, &str, &[&dyn Display])`,
/// including [`Snapshot`].
#[macro_export]
macro_rules! tr {
    ($translator:expr, $context:expr, $source:expr $(,)?) => {
        $translator.lookup($context, $source, &[])
    };
    ($translator:expr, $context:expr, $source:expr, $($arg:expr),+ $(,)?) => {
        $translator.lookup(
            $context,
            $source,
            &[$(&$arg as &dyn ::std::fmt::Display),+],
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsl_catalog::{Catalog, Message};

    #[test]
    fn macro_without_arguments() {
        let translator = Translator::default();
        assert_eq!(tr!(translator, "", "100%% done"), "100%% done");
    }

    #[test]
    fn macro_with_arguments_and_trailing_comma() {
        let mut catalog = Catalog::new("ro_RO", "en_US");
        catalog.insert("", Message::new("%d files in %s", "%d fisiere in %s"));
        let snapshot = Snapshot::compile(catalog);
        let count = 3;
        assert_eq!(
            tr!(snapshot, "", "%d files in %s", count, "/tmp",),
            "3 fisiere in /tmp"
        );
    }
}
