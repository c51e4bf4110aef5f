use std::io::Write;

use owo_colors::OwoColorize;
use pdfpeek_core::{BatchConfig, FileReport, Outcome};

/// Width of the `=` rule around each banner.
pub const RULE_WIDTH: usize = 80;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the banner that opens a processed file's section.
pub fn print_banner(w: &mut dyn Write, file_name: &str, color: ColorMode) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let title = format!("EXTRACTING: {}", file_name);
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", rule.cyan())?;
        writeln!(w, "{}", title.bold())?;
        writeln!(w, "{}", rule.cyan())?;
    } else {
        writeln!(w, "{}", rule)?;
        writeln!(w, "{}", title)?;
        writeln!(w, "{}", rule)?;
    }
    Ok(())
}

/// Print one file's section of the report.
///
/// Missing files get a single `File not found: <path>` line. Everything
/// else gets a banner followed by the previewed text (or error message).
pub fn print_report(
    w: &mut dyn Write,
    report: &FileReport,
    config: &BatchConfig,
    color: ColorMode,
) -> std::io::Result<()> {
    let Some(text) = report.display_text() else {
        let line = format!("File not found: {}", report.path.display());
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
        return Ok(());
    };

    print_banner(w, &report.file_name, color)?;
    let shown = config.preview(&text);
    match report.outcome {
        Outcome::Failed { .. } if color.enabled() => writeln!(w, "{}", shown.red())?,
        _ => writeln!(w, "{}", shown)?,
    }
    Ok(())
}
