//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipvault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file or folder into a password-protected archive
    Encrypt(EncryptArgs),
    /// Decrypt an encrypted archive
    Decrypt(DecryptArgs),
    /// Check an archive's integrity without extracting it
    Verify(VerifyArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct EncryptArgs {
    /// File or folder to encrypt
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory for the archive (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Deflate compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Keep the source after successful encryption
    #[arg(long)]
    pub keep: bool,
}

#[derive(clap::Args)]
pub struct DecryptArgs {
    /// Encrypted archive to open (*.enc.zip)
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to extract into (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Encrypted archive to check (*.enc.zip)
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}
