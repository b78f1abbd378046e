//! CLI for the pkgcache archive cache.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use pkgcache_core::checksum::HashKind;
use pkgcache_core::config;
use std::path::PathBuf;

use commands::{run_cache, run_checksum, run_completions, run_man};

/// Top-level CLI for pkgcache.
#[derive(Debug, Parser)]
#[command(name = "pkgcache")]
#[command(about = "Populate a content-addressed cache of package source archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and verify every package archive of a repository into the cache.
    Cache(CacheArgs),

    /// Print the checksum of a file in package definition form.
    Checksum {
        /// Path to the file.
        path: PathBuf,
        /// Digest algorithm.
        #[arg(long, default_value = "sha256")]
        kind: HashKind,
    },

    /// Generate shell completions on stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate the man page on stdout.
    Man,
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Cache directory (default: `<repo>/<cache_dir_name>` from the config).
    pub cache_dir: Option<PathBuf>,

    /// Repository root.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub repo: PathBuf,

    /// Process up to N packages concurrently (default from config, 8).
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub jobs: Option<usize>,

    /// Also create human-readable symlinks to cached archives under DIR.
    #[arg(long, value_name = "DIR")]
    pub link: Option<PathBuf>,

    /// Do not record the cache directory in the repository's repo.toml.
    #[arg(long)]
    pub no_repo_update: bool,

    /// Exit with status 1 if any package had errors.
    #[arg(long)]
    pub fail_on_error: bool,
}

impl CliCommand {
    /// Parses arguments and runs the command. `Ok(false)` means the command
    /// completed but asks for a failing exit status.
    pub async fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Cache(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_cache(&cfg, args).await
            }
            CliCommand::Checksum { path, kind } => {
                run_checksum(&path, kind)?;
                Ok(true)
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(true)
            }
            CliCommand::Man => {
                run_man()?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests;
