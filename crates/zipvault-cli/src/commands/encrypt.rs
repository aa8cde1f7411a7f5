//! Encrypt command implementation.
//!
//! Encrypts a file or folder, verifies the freshly written archive, and
//! only then removes the original source (unless `--keep`). A failure at
//! any point leaves the source untouched.

use crate::cli::EncryptArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::prompt;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::env;
use std::fs;
use zipvault_core::NoopProgress;
use zipvault_core::Password;
use zipvault_core::VaultOptions;
use zipvault_core::verifier::verify_archive;
use zipvault_core::writer::archive_file_name;
use zipvault_core::writer::write_archive_with_progress;

pub fn execute(args: &EncryptArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let Some(secret) = prompt::read_password("Password: ")? else {
        return formatter.format_cancelled("encrypt");
    };
    let Some(confirmation) = prompt::read_password("Confirm password: ")? else {
        return formatter.format_cancelled("encrypt");
    };
    if *secret != *confirmation {
        bail!("Passwords do not match");
    }
    let password =
        Password::new(secret.as_str()).map_err(|_| anyhow::anyhow!("Password cannot be empty"))?;

    let mut options = VaultOptions::default();
    if let Some(level) = args.compression_level {
        options = options.with_compression_level(level);
    }

    let archive_path = output_dir.join(
        archive_file_name(&args.source)
            .with_context(|| format!("cannot name an archive for '{}'", args.source.display()))?,
    );

    let report = if CliProgress::should_show() && !quiet {
        let mut progress = CliProgress::new("Encrypting");
        add_archive_context(
            write_archive_with_progress(
                &args.source,
                &archive_path,
                &password,
                &options,
                &mut progress,
            ),
            &archive_path,
        )?
    } else {
        add_archive_context(
            write_archive_with_progress(
                &args.source,
                &archive_path,
                &password,
                &options,
                &mut NoopProgress,
            ),
            &archive_path,
        )?
    };

    // Self-check before anything irreversible; a failure here means the
    // archive we just wrote is unreadable and the source stays put.
    add_archive_context(verify_archive(&archive_path, &password), &archive_path)?;

    if !args.keep {
        if args.source.is_dir() {
            fs::remove_dir_all(&args.source)
        } else {
            fs::remove_file(&args.source)
        }
        .with_context(|| {
            format!(
                "archive written and verified, but removing '{}' failed",
                args.source.display()
            )
        })?;
    }

    formatter.format_encrypt_result(&archive_path, &report, !args.keep)
}
