//! Decrypt command implementation.
//!
//! Drives the core retry-lockout session: prompts for a password, retries
//! on a wrong one, and reports quarantine when the attempt limit is
//! reached. Lockout and cancellation are defined outcomes, so both exit
//! zero; integrity and I/O failures exit non-zero.

use crate::cli::DecryptArgs;
use crate::error::convert_archive_error;
use crate::output::OutputFormatter;
use crate::prompt;
use anyhow::Context;
use anyhow::Result;
use std::env;
use zipvault_core::Password;
use zipvault_core::SessionOutcome;
use zipvault_core::VaultOptions;
use zipvault_core::session;

pub fn execute(args: &DecryptArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let destination = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let options = VaultOptions::default();
    let outcome = session::run(&args.archive, &destination, &options, |session| {
        if session.attempts() > 0 {
            formatter.format_warning(&format!(
                "Incorrect password. Attempts left: {}",
                session.remaining()
            ));
        }
        loop {
            match prompt::read_password("Password: ") {
                Ok(Some(secret)) => match Password::new(secret.as_str()) {
                    Ok(password) => return Some(password),
                    // Surfaced immediately; an empty line is not an attempt.
                    Err(_) => formatter.format_warning("Password must not be empty"),
                },
                Ok(None) | Err(_) => return None,
            }
        }
    })
    .map_err(|e| convert_archive_error(e, &args.archive))?;

    match outcome {
        SessionOutcome::Extracted(report) => formatter.format_extract_result(&destination, &report),
        SessionOutcome::Cancelled { .. } => formatter.format_cancelled("decrypt"),
        SessionOutcome::Locked { quarantined_to } => {
            formatter.format_locked(&quarantined_to, options.attempt_limit)
        }
    }
}
