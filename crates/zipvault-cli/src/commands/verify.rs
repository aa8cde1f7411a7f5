//! Verify command implementation.
//!
//! Re-checks every entry of an archive against its password without
//! extracting anything.

use crate::cli::VerifyArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::prompt;
use anyhow::Result;
use zipvault_core::Password;
use zipvault_core::verifier::verify_archive;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let Some(secret) = prompt::read_password("Password: ")? else {
        return formatter.format_cancelled("verify");
    };
    let password =
        Password::new(secret.as_str()).map_err(|_| anyhow::anyhow!("Password cannot be empty"))?;

    let report = add_archive_context(verify_archive(&args.archive, &password), &args.archive)?;

    formatter.format_verify_result(&args.archive, &report)
}
