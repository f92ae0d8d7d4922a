//! The active-catalog service handed to UI code.
//!
//! A [`Translator`] owns exactly one published [`Snapshot`]. Publishing a new
//! catalog swaps the `Arc` under a write lock that is held only for the
//! pointer replacement; lookups clone the `Arc` under a read lock and then
//! work on an immutable table, so a lookup in flight always completes
//! against the snapshot it started with.
//!
//! [`Translator::lookup`] and [`Translator::tr`] take the read lock for that
//! clone on every call. Lock-free reads go through a held snapshot: call
//! [`Translator::snapshot`] once and look up on the returned `Arc<Snapshot>`,
//! which also pins one catalog across a batch of lookups.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tsl_catalog::Catalog;

use crate::snapshot::Snapshot;

/// Shared translation service.
///
/// Construct one per process (or per UI tree) and pass it to components as
/// `Arc<Translator>`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tsl_catalog::{Catalog, Message};
/// use tsl_runtime::Translator;
///
/// let mut catalog = Catalog::new("ro_RO", "en_US");
/// catalog.insert("CloudDeskTray", Message::new("Quit %s", "Termina %s"));
///
/// let translator = Arc::new(Translator::new(catalog));
/// assert_eq!(translator.current_locale(), "ro_RO");
/// assert_eq!(translator.lookup("CloudDeskTray", "Quit %s", &[&"MyApp"]), "Termina MyApp");
///
/// let tray = translator.scoped("CloudDeskTray");
/// assert_eq!(tray.tr("Quit %s"), "Termina %s");
/// ```
#[derive(Debug, Default)]
pub struct Translator {
    active: RwLock<Arc<Snapshot>>,
}

impl Translator {
    /// Create a translator with `catalog` already published.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::from_snapshot(Arc::new(Snapshot::compile(catalog)))
    }

    /// Create a translator from a compiled snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: Arc<Snapshot>) -> Self {
        Self {
            active: RwLock::new(snapshot),
        }
    }

    /// Compile and publish `catalog`, replacing the active one.
    ///
    /// Returns the snapshot that was replaced; callers still holding it keep
    /// a valid view until they drop it.
    pub fn set_catalog(&self, catalog: Catalog) -> Arc<Snapshot> {
        self.publish(Arc::new(Snapshot::compile(catalog)))
    }

    /// Publish an already compiled snapshot.
    pub fn publish(&self, snapshot: Arc<Snapshot>) -> Arc<Snapshot> {
        tracing::info!(
            locale = snapshot.locale(),
            source_locale = snapshot.source_locale(),
            contexts = snapshot.context_count(),
            translated = snapshot.translated_count(),
            "publishing translation catalog"
        );
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, snapshot)
    }

    /// The active snapshot. Hold it to run many lookups without touching
    /// the lock.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Target locale of the active catalog.
    #[must_use]
    pub fn current_locale(&self) -> String {
        self.snapshot().locale().to_string()
    }

    /// Source locale of the active catalog.
    #[must_use]
    pub fn source_locale(&self) -> String {
        self.snapshot().source_locale().to_string()
    }

    /// Resolve `(context, source)` and substitute `args`. Never fails.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str, args: &[&dyn fmt::Display]) -> String {
        self.snapshot().lookup(context, source, args)
    }

    /// Resolve `(context, source)` without substitution.
    #[must_use]
    pub fn tr(&self, context: &str, source: &str) -> String {
        self.snapshot().translate(context, source).to_string()
    }

    /// A translator bound to one context.
    #[must_use]
    pub fn scoped(self: &Arc<Self>, context: impl Into<String>) -> ScopedTranslator {
        ScopedTranslator {
            translator: Arc::clone(self),
            context: context.into(),
        }
    }
}

impl From<Catalog> for Translator {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

/// A [`Translator`] bound to a single context, the equivalent of a dialog's
/// own `tr()`.
///
/// It follows catalog swaps on the shared translator.
#[derive(Debug, Clone)]
pub struct ScopedTranslator {
    translator: Arc<Translator>,
    context: String,
}

impl ScopedTranslator {
    /// The bound context name.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Resolve `source` in the bound context.
    #[must_use]
    pub fn tr(&self, source: &str) -> String {
        self.translator.tr(&self.context, source)
    }

    /// Resolve `source` in the bound context and substitute `args`.
    #[must_use]
    pub fn lookup(&self, source: &str, args: &[&dyn fmt::Display]) -> String {
        self.translator.lookup(&self.context, source, args)
    }

    /// The shared translator this scope reads from.
    #[must_use]
    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }
}
