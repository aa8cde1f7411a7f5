//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use zipvault_core::ExtractReport;
use zipvault_core::VerifyReport;
use zipvault_core::WriteReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.2} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_encrypt_result(
        &self,
        archive: &Path,
        report: &WriteReport,
        source_removed: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Encryption complete");
        let _ = self
            .term
            .write_line(&format!("  Saved to: {}", archive.display()));
        let _ = self.term.write_line(&format!(
            "  Encrypted size: {}",
            Self::format_size(report.archive_size)
        ));
        let _ = self.term.write_line(&format!(
            "  Entries: {} files, {} directories",
            report.files_added, report.directories_added
        ));
        if source_removed {
            let _ = self.term.write_line("  Original source removed");
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Plaintext read: {}",
                Self::format_size(report.bytes_read)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_extract_result(&self, destination: &Path, report: &ExtractReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Decryption successful");
        let _ = self
            .term
            .write_line(&format!("  Extracted to: {}", destination.display()));
        let _ = self.term.write_line(&format!(
            "  Files: {}, directories: {}",
            report.files_extracted, report.directories_created
        ));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_verify_result(&self, archive: &Path, report: &VerifyReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Archive verified");
        let _ = self
            .term
            .write_line(&format!("  Archive: {}", archive.display()));
        let _ = self.term.write_line(&format!(
            "  Entries checked: {} ({})",
            report.entries_checked,
            Self::format_size(report.bytes_checked)
        ));

        Ok(())
    }

    fn format_locked(&self, quarantined_to: &Path, attempts: u8) -> Result<()> {
        let symbol = if self.use_colors {
            format!("{}", style("⚠").yellow().bold())
        } else {
            "!".to_string()
        };
        let _ = self.term.write_line(&format!(
            "{symbol} Password entered wrong {attempts} times; no further attempts accepted."
        ));
        let _ = self.term.write_line(&format!(
            "  Archive moved to quarantine: {}",
            quarantined_to.display()
        ));
        Ok(())
    }

    fn format_cancelled(&self, operation: &str) -> Result<()> {
        if !self.quiet {
            let _ = self.term.write_line(&format!("{operation} cancelled"));
        }
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        let stderr = Term::stderr();
        if self.use_colors {
            let _ = stderr.write_line(&format!("{} {message}", style("!").yellow().bold()));
        } else {
            let _ = stderr.write_line(&format!("! {message}"));
        }
    }
}
