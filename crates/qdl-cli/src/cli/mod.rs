//! CLI for qdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use qdl_core::config;
use qdl_core::naming::SearchMode;
use qdl_core::quality::Quality;
use std::path::PathBuf;

use commands::{
    run_canon, run_completions, run_label, run_man, run_name, run_pick, run_show_config,
    LabelArgs,
};

/// Top-level CLI for qdl.
#[derive(Debug, Parser)]
#[command(name = "qdl", version)]
#[command(
    about = "qdl: discover catalog entries through web search, pick them interactively, queue them with resolved names",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Find a record label's storefront pages, select them and print a download plan.
    Label {
        /// Label name; prompted for when omitted.
        query: Vec<String>,
        /// Show at most N results in the selector (default: interactive_limit).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
        /// Run up to N search queries concurrently (default: search.max_workers).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
        /// Preselected quality id: 5, 6, 7 or 27 (default: default_quality).
        #[arg(long, short, value_name = "ID")]
        quality: Option<Quality>,
        /// Write the plan JSON to PATH instead of stdout.
        #[arg(long, value_name = "PATH")]
        plan_out: Option<PathBuf>,
    },

    /// Select from a JSON listing of artists, albums, tracks, playlists or labels.
    Pick {
        /// JSON array of items tagged with "type".
        file: PathBuf,
        /// Show at most N items in the selector (default: interactive_limit).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
        /// Preselected quality id: 5, 6, 7 or 27 (default: default_quality).
        #[arg(long, short, value_name = "ID")]
        quality: Option<Quality>,
        /// Write the plan JSON to PATH instead of stdout.
        #[arg(long, value_name = "PATH")]
        plan_out: Option<PathBuf>,
    },

    /// Print the canonical identity of catalog URLs (or text files listing them).
    Canon {
        /// URLs or paths to URL list files.
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Preview folder and track names for a search mode and a set of tags.
    Name {
        /// Search mode: artists, albums, tracks, playlists or label.
        #[arg(long, short)]
        mode: SearchMode,
        /// Tag value, e.g. --tag artist="Astral Projection". Repeatable.
        #[arg(long = "tag", short, value_name = "KEY=VALUE", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
    },

    /// Show configuration file locations and contents.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

fn parse_tag(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let key = key.trim().to_ascii_lowercase();
    if key.is_empty() {
        return Err(format!("empty tag name in {raw:?}"));
    }
    Ok((key, value.to_string()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Label {
                query,
                limit,
                workers,
                quality,
                plan_out,
            } => {
                let format = config::load_or_init_format()?;
                let args = LabelArgs {
                    query,
                    limit,
                    workers,
                    quality,
                    plan_out,
                };
                run_label(&cfg, format, args).await?;
            }
            CliCommand::Pick {
                file,
                limit,
                quality,
                plan_out,
            } => {
                let format = config::load_or_init_format()?;
                run_pick(&cfg, format, &file, limit, quality, plan_out.as_deref()).await?;
            }
            CliCommand::Canon { sources } => run_canon(&cfg, &sources)?,
            CliCommand::Name { mode, tags } => {
                let format = config::load_or_init_format()?;
                run_name(&cfg, format, mode, tags)?;
            }
            CliCommand::Config => run_show_config()?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
