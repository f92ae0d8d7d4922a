//! Quality checks and coverage statistics.
//!
//! Lint runs outside the lookup path: it inspects a parsed catalog and its
//! [`ParseReport`] and lists findings for translators. Nothing here changes
//! how lookups resolve.

use std::fmt;

use crate::model::{Catalog, Context, Message, Status};
use crate::parse::{ParseReport, Parsed};
use crate::placeholder;

/// How much attention a finding deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Info,
    Warning,
}

/// One lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Finding {
    /// The same source text appeared twice in one context.
    DuplicateSource {
        context: String,
        source: String,
        line: usize,
    },
    /// A status value outside the known vocabulary.
    UnknownStatus {
        context: String,
        source: String,
        value: String,
    },
    /// The translation has a different number of placeholders than the source.
    PlaceholderMismatch {
        context: String,
        source: String,
        expected: usize,
        found: usize,
    },
    /// A named context repeats a source string of the default context.
    CrossContextDuplicate { context: String, source: String },
}

impl Finding {
    /// Severity of this finding.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::CrossContextDuplicate { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Context the finding belongs to.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::DuplicateSource { context, .. }
            | Self::UnknownStatus { context, .. }
            | Self::PlaceholderMismatch { context, .. }
            | Self::CrossContextDuplicate { context, .. } => context,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSource {
                context,
                source,
                line,
            } => write!(
                f,
                "[{context}] duplicate source {source:?}, entry at line {line} wins"
            ),
            Self::UnknownStatus {
                context,
                source,
                value,
            } => write!(f, "[{context}] unknown status {value:?} on {source:?}"),
            Self::PlaceholderMismatch {
                context,
                source,
                expected,
                found,
            } => write!(
                f,
                "[{context}] {source:?} has {expected} placeholder(s), translation has {found}"
            ),
            Self::CrossContextDuplicate { context, source } => write!(
                f,
                "[{context}] {source:?} is also defined in the default context"
            ),
        }
    }
}

/// Message counts for one context or the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counts {
    /// All messages.
    pub messages: usize,
    /// Live messages with usable translated text.
    pub translated: usize,
    /// Messages marked unfinished.
    pub unfinished: usize,
    /// Messages marked obsolete.
    pub obsolete: usize,
}

impl Counts {
    fn add(&mut self, message: &Message) {
        self.messages += 1;
        match message.status {
            Status::Obsolete => self.obsolete += 1,
            Status::Unfinished => self.unfinished += 1,
            Status::Translated => {}
        }
        if message.status != Status::Obsolete && message.has_translation() {
            self.translated += 1;
        }
    }

    fn merge(&mut self, other: Self) {
        self.messages += other.messages;
        self.translated += other.translated;
        self.unfinished += other.unfinished;
        self.obsolete += other.obsolete;
    }

    /// Live messages, i.e. everything except obsolete ones.
    #[must_use]
    pub fn live(&self) -> usize {
        self.messages.saturating_sub(self.obsolete)
    }

    /// Translated share of live messages (0.0–100.0).
    #[must_use]
    pub fn coverage_percent(&self) -> f32 {
        let live = self.live();
        if live == 0 {
            100.0
        } else {
            (self.translated as f32 / live as f32) * 100.0
        }
    }
}

/// Per-context coverage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContextCoverage {
    /// Context name (empty for the default context).
    pub context: String,
    pub counts: Counts,
    /// Live sources that fall back to the source text at lookup.
    pub untranslated: Vec<String>,
    /// Same as `counts.coverage_percent()`.
    pub coverage_percent: f32,
}

/// Coverage across a catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoverageReport {
    pub locale: String,
    pub total: Counts,
    pub coverage_percent: f32,
    /// Contexts in document order.
    pub contexts: Vec<ContextCoverage>,
}

/// Findings plus coverage for one catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LintReport {
    pub findings: Vec<Finding>,
    pub coverage: CoverageReport,
}

impl LintReport {
    /// Number of findings at [`Severity::Warning`].
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Warning)
            .count()
    }
}

/// Compute coverage statistics.
#[must_use]
pub fn coverage(catalog: &Catalog) -> CoverageReport {
    let mut total = Counts::default();
    let contexts = catalog
        .contexts()
        .iter()
        .map(|ctx| {
            let mut counts = Counts::default();
            let mut untranslated = Vec::new();
            for message in ctx.messages() {
                counts.add(message);
                if message.status != Status::Obsolete && !message.has_translation() {
                    untranslated.push(message.source.clone());
                }
            }
            total.merge(counts);
            ContextCoverage {
                context: ctx.name().to_string(),
                counts,
                untranslated,
                coverage_percent: counts.coverage_percent(),
            }
        })
        .collect();

    CoverageReport {
        locale: catalog.locale().to_string(),
        total,
        coverage_percent: total.coverage_percent(),
        contexts,
    }
}

/// Lint a parsed catalog.
#[must_use]
pub fn lint(parsed: &Parsed) -> LintReport {
    lint_catalog(&parsed.catalog, &parsed.report)
}

/// Lint a catalog against the report produced when it was parsed.
#[must_use]
pub fn lint_catalog(catalog: &Catalog, report: &ParseReport) -> LintReport {
    let mut findings: Vec<Finding> = report
        .duplicates
        .iter()
        .map(|dup| Finding::DuplicateSource {
            context: dup.context.clone(),
            source: dup.source.clone(),
            line: dup.line,
        })
        .chain(report.unknown_statuses.iter().map(|unknown| Finding::UnknownStatus {
            context: unknown.context.clone(),
            source: unknown.source.clone(),
            value: unknown.value.clone(),
        }))
        .collect();

    let default_context = catalog.default_context();
    for ctx in catalog.contexts() {
        for message in ctx.messages() {
            check_placeholders(ctx, message, &mut findings);
            if !ctx.is_default()
                && default_context.is_some_and(|global| global.get(&message.source).is_some())
            {
                findings.push(Finding::CrossContextDuplicate {
                    context: ctx.name().to_string(),
                    source: message.source.clone(),
                });
            }
        }
    }

    LintReport {
        findings,
        coverage: coverage(catalog),
    }
}

fn check_placeholders(ctx: &Context, message: &Message, findings: &mut Vec<Finding>) {
    if !message.has_translation() {
        return;
    }
    let expected = placeholder::count(&message.source);
    let found = placeholder::count(&message.translation);
    if expected != found {
        findings.push(Finding::PlaceholderMismatch {
            context: ctx.name().to_string(),
            source: message.source.clone(),
            expected,
            found,
        });
    }
}
