//! Subcommand implementations. Each one writes its report to `out` and
//! returns the process exit status.

use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, info};
use tsl_catalog::{CoverageReport, ParseOptions, Parsed, Severity, WriteOptions, lint};
use tsl_runtime::Translator;

pub const EXIT_OK: u8 = 0;
/// `check --deny-warnings` found warnings.
pub const EXIT_WARNINGS: u8 = 2;

fn load(path: &Path, options: &ParseOptions) -> Result<Parsed> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read catalog");
    tsl_catalog::parse_with(&bytes, options)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn context_label(name: &str) -> &str {
    if name.is_empty() { "<default>" } else { name }
}

pub fn check(
    path: &Path,
    options: &ParseOptions,
    deny_warnings: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let parsed = load(path, options)?;
    let report = lint(&parsed);

    for finding in &report.findings {
        let level = match finding.severity() {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        writeln!(out, "{level}: {finding}")?;
    }

    let warnings = report.warnings();
    writeln!(
        out,
        "{}: {} contexts, {} messages, {} warning(s), {:.1}% translated",
        path.display(),
        parsed.catalog.contexts().len(),
        parsed.catalog.message_count(),
        warnings,
        report.coverage.coverage_percent,
    )?;

    if deny_warnings && warnings > 0 {
        info!(warnings, "warnings denied");
        return Ok(EXIT_WARNINGS);
    }
    Ok(EXIT_OK)
}

pub fn stats(
    path: &Path,
    options: &ParseOptions,
    json: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let parsed = load(path, options)?;
    let report = tsl_catalog::coverage(&parsed.catalog);

    if json {
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to encode report")?;
        writeln!(out)?;
    } else {
        write_stats_table(&report, out)?;
    }
    Ok(EXIT_OK)
}

fn write_stats_table(report: &CoverageReport, out: &mut impl Write) -> Result<()> {
    let width = report
        .contexts
        .iter()
        .map(|ctx| context_label(&ctx.context).len())
        .max()
        .unwrap_or(0)
        .max("total".len());

    writeln!(out, "locale: {}", report.locale)?;
    for ctx in &report.contexts {
        writeln!(
            out,
            "{:<width$}  {:>4}/{:<4} {:>6.1}%",
            context_label(&ctx.context),
            ctx.counts.translated,
            ctx.counts.live(),
            ctx.coverage_percent,
        )?;
    }
    writeln!(
        out,
        "{:<width$}  {:>4}/{:<4} {:>6.1}%",
        "total",
        report.total.translated,
        report.total.live(),
        report.coverage_percent,
    )?;
    Ok(())
}

pub fn lookup(
    path: &Path,
    options: &ParseOptions,
    context: &str,
    source: &str,
    args: &[String],
    out: &mut impl Write,
) -> Result<u8> {
    let parsed = load(path, options)?;
    let translator = Translator::new(parsed.catalog);
    let args: Vec<&dyn Display> = args.iter().map(|arg| arg as &dyn Display).collect();
    writeln!(out, "{}", translator.lookup(context, source, &args))?;
    Ok(EXIT_OK)
}

pub fn fmt(
    path: &Path,
    options: &ParseOptions,
    write_options: &WriteOptions,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<u8> {
    let parsed = load(path, options)?;
    let text = tsl_catalog::write_with(&parsed.catalog, write_options);
    match output {
        Some(target) => {
            fs::write(target, &text)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "wrote catalog");
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(EXIT_OK)
}
