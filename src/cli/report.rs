//! Report formatting and printing utilities.
//!
//! Results go to stdout in cargo-style format, errors and hints about
//! hidden detail go to stderr. Kept apart from the commands so locsync can
//! be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, FilesReport, InitReport, LocalesReport, PublishReport,
    ScanReport, SourcesReport, StatusReport, StringsReport, TranslateReport,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{ScanSummary, WriteOutcome};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Column gap in tables.
const GAP: &str = "  ";

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Scan(report) => print_scan(report, verbose, out, err),
        CommandSummary::Status(report) => {
            print_status(report, result.exit_on_failures, out)
        }
        CommandSummary::Strings(report) => print_strings(report, out),
        CommandSummary::Translate(report) => print_translate(report, out),
        CommandSummary::Publish(report) => print_publish(report, verbose, out),
        CommandSummary::Files(report) => print_files(report, out),
        CommandSummary::Locales(report) => print_locales(report, out),
        CommandSummary::Sources(report) => print_sources(report, out),
        CommandSummary::Init(report) => print_init(report, out, err),
    }
}

// ============================================================
// Scan
// ============================================================

fn print_scan<O: Write, E: Write>(report: &ScanReport, verbose: bool, out: &mut O, err: &mut E) {
    for summary in &report.summaries {
        print_scan_problems(summary, verbose, out);
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {}: {} {}, {} {} ({} added, {} removed)",
                summary.source,
                summary.files_scanned,
                plural(summary.files_scanned, "file", "files"),
                summary.string_count,
                plural(summary.string_count, "string", "strings"),
                summary.added,
                summary.removed
            )
            .green()
        );
    }

    let failures: usize = report.summaries.iter().map(|s| s.failures.len()).sum();
    if failures > 0 {
        let _ = writeln!(
            out,
            "\n{} {} {} could not be read",
            FAILURE_MARK.red(),
            failures,
            plural(failures, "file", "files")
        );
    }

    let warnings: usize = report.summaries.iter().map(|s| s.warnings.len()).sum();
    print_lexical_warning_to(warnings, verbose, err);
}

fn print_scan_problems<W: Write>(summary: &ScanSummary, verbose: bool, writer: &mut W) {
    for failure in &summary.failures {
        let _ = writeln!(writer, "{} could not read file", "warning:".bold().yellow());
        let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.path.display());
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), failure.reason);
        let _ = writeln!(writer);
    }

    if !verbose {
        return;
    }

    for warning in &summary.warnings {
        let diagnostic = &warning.diagnostic;
        let _ = writeln!(
            writer,
            "{} {}",
            "warning:".bold().yellow(),
            diagnostic.problem
        );
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            warning.file,
            diagnostic.line,
            diagnostic.column
        );
        let _ = writeln!(
            writer,
            "   {} {} {}",
            "=".blue(),
            "note:".bold(),
            diagnostic.excerpt
        );
        let _ = writeln!(writer);
    }
}

/// Print a warning about lexical problems hidden without `-v`.
pub fn print_lexical_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} lexical {} found (use {} for details)",
            "warning:".bold().yellow(),
            count,
            plural(count, "problem", "problems"),
            "-v".cyan()
        );
    }
}

// ============================================================
// Status
// ============================================================

fn print_status<W: Write>(report: &StatusReport, failing: bool, writer: &mut W) {
    let mut header = vec!["Source".to_string(), "Strings".to_string()];
    header.extend(report.locales.iter().cloned());

    let rows: Vec<Vec<String>> = report
        .sources
        .iter()
        .map(|source| {
            let mut row = vec![source.label.clone()];
            if source.scanned {
                row.push(source.string_count.to_string());
                row.extend(source.untranslated.iter().map(|c| c.count.to_string()));
            } else {
                row.push("not scanned".to_string());
                row.extend(source.untranslated.iter().map(|_| "-".to_string()));
            }
            row
        })
        .collect();

    let widths = column_widths(&header, &rows);
    let _ = writeln!(writer, "{}", format_row(&header, &widths).bold());
    for row in &rows {
        let _ = writeln!(writer, "{}", format_row(row, &widths));
    }
    let _ = writeln!(writer);

    if report.locales.is_empty() {
        let _ = writeln!(
            writer,
            "{} no application locales besides the native one are configured",
            "note:".bold()
        );
        return;
    }

    let untranslated = report.untranslated_total();
    if untranslated == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "All strings are translated".green()
        );
    } else {
        let message = format!(
            "{} untranslated {}",
            untranslated,
            plural(untranslated, "string", "strings")
        );
        let _ = if failing {
            writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red())
        } else {
            writeln!(writer, "{} {}", "warning:".bold().yellow(), message)
        };
    }
}

fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(title.width()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == last {
                cell.clone()
            } else {
                pad(cell, widths.get(i).copied().unwrap_or(0))
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

// ============================================================
// Strings and translations
// ============================================================

fn print_strings<W: Write>(report: &StringsReport, writer: &mut W) {
    for entry in &report.entries {
        let _ = writeln!(writer, "{}  {:?}", entry.hash.dimmed(), entry.text);
        match &entry.translation {
            Some(translation) => {
                let _ = writeln!(
                    writer,
                    "   {} {}: {:?}",
                    "=".blue(),
                    report.locale,
                    translation
                );
            }
            None => {
                let _ = writeln!(
                    writer,
                    "   {} {}: {}",
                    "=".blue(),
                    report.locale,
                    "(untranslated)".dimmed()
                );
            }
        }
        let _ = writeln!(
            writer,
            "   {} {} {} ({} {})",
            "=".blue(),
            "used:".bold(),
            entry.files.join(", "),
            entry.call_count,
            plural(entry.call_count, "call", "calls")
        );
    }

    if !report.entries.is_empty() {
        let _ = writeln!(writer);
    }
    let _ = writeln!(
        writer,
        "Listed {} of {} {} in {}",
        report.entries.len(),
        report.total,
        plural(report.total, "string", "strings"),
        report.source
    );
}

fn print_translate<W: Write>(report: &TranslateReport, writer: &mut W) {
    if !report.applied {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "No string with hash {} in source {}",
                report.hash, report.source
            )
            .red()
        );
        let _ = writeln!(
            writer,
            "   {} {} run {} to list the hashes",
            "=".blue(),
            "hint:".bold().cyan(),
            format!("locsync strings --source {} --locale {}", report.source, report.locale).cyan()
        );
        return;
    }

    let action = if report.removed { "Removed" } else { "Saved" };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} translation of {} in {}",
            action, report.locale, report.hash, report.source
        )
        .green()
    );
}

// ============================================================
// Client files
// ============================================================

fn print_publish<W: Write>(report: &PublishReport, verbose: bool, writer: &mut W) {
    match &report.outcome {
        WriteOutcome::Disabled => {
            let _ = writeln!(
                writer,
                "{} no client folder configured, nothing to publish",
                "warning:".bold().yellow()
            );
            let _ = writeln!(
                writer,
                "   {} {} set {} in {} or pass {}",
                "=".blue(),
                "hint:".bold().cyan(),
                "clientFolder".cyan(),
                CONFIG_FILE_NAME,
                "--client-folder".cyan()
            );
        }
        WriteOutcome::UpToDate => {
            let _ = writeln!(
                writer,
                "{} {} (use {} to rewrite)",
                SUCCESS_MARK.green(),
                "Client files are up to date".green(),
                "--force".cyan()
            );
        }
        WriteOutcome::Written(files) => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Wrote {} client {}",
                    files.len(),
                    plural(files.len(), "file", "files")
                )
                .green()
            );
            if verbose {
                for file in files {
                    let _ = writeln!(writer, "  {}", file.display());
                }
            }
        }
    }
}

fn print_files<W: Write>(report: &FilesReport, writer: &mut W) {
    let Some(folder) = &report.folder else {
        let _ = writeln!(writer, "No client folder configured");
        return;
    };

    let _ = writeln!(writer, "{}", format!("{}:", folder.display()).bold());
    for file in &report.files {
        let name = file
            .strip_prefix(folder)
            .unwrap_or(file.as_path())
            .display()
            .to_string();
        if file.is_file() {
            let _ = writeln!(writer, "  {}", name);
        } else {
            let _ = writeln!(writer, "  {} {}", name, "(missing)".dimmed());
        }
    }
}

// ============================================================
// Listings
// ============================================================

fn print_locales<W: Write>(report: &LocalesReport, writer: &mut W) {
    let width = report
        .locales
        .iter()
        .map(|l| l.name.width())
        .max()
        .unwrap_or(0);

    for locale in &report.locales {
        let marker = if locale.selected { "*" } else { " " };
        let _ = writeln!(
            writer,
            "{} {}{}{}",
            marker.green(),
            pad(locale.name, width),
            GAP,
            locale.label
        );
    }

    if let Some(namespace) = report.namespace {
        let _ = writeln!(
            writer,
            "\n{} {} in the {} namespace",
            report.locales.len(),
            plural(report.locales.len(), "locale", "locales"),
            namespace
        );
    }
}

fn print_sources<W: Write>(report: &SourcesReport, writer: &mut W) {
    for (group, sources) in &report.groups {
        let indent = if group.is_empty() {
            ""
        } else {
            let _ = writeln!(writer, "{}", format!("{}:", group).bold());
            "  "
        };

        for source in sources {
            let state = if source.scanned {
                "scanned".green()
            } else {
                "not scanned".yellow()
            };
            let _ = writeln!(
                writer,
                "{}{} {} ({}) [{}]",
                indent,
                source.alias.bold(),
                source.label,
                source.id.dimmed(),
                state
            );
            for root in &source.roots {
                let _ = writeln!(writer, "{}   {} {}", indent, "root:".bold(), display(root));
            }
            let _ = writeln!(
                writer,
                "{}   {} {}",
                indent,
                "storage:".bold(),
                display(&source.storage_folder)
            );
        }
    }
}

fn print_init<O: Write, E: Write>(report: &InitReport, out: &mut O, err: &mut E) {
    if report.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(err, "Error: {} already exists", CONFIG_FILE_NAME);
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Tests
// ============================================================
