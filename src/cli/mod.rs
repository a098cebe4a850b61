//! Command-line interface for spud.
//!
//! Provides commands for installing plugins from the directory, updating
//! installed plugins, and showing the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::SpigetClient;
use crate::config;
use crate::core::{BatchSummary, Installed, PluginError, PluginManager, Prompt, UpdateStatus};
use crate::core::AutoPrompt;

pub mod console;
pub mod prompt;

use console::{format_text, Level};
pub use prompt::TerminalPrompt;

/// spud - Spigot plugin manager
#[derive(Parser, Debug)]
#[command(name = "spud")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Never prompt: pick the top search result and apply every update
    #[arg(short = 'n', long, global = true)]
    pub noninteractive: bool,

    /// Plugins directory
    #[arg(short, long, global = true, default_value = ".")]
    pub directory: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for plugins and install them
    Install {
        /// Plugin names to search for
        #[arg(required = true)]
        plugins: Vec<String>,
    },

    /// Update installed plugins (all plugins in the directory if none given)
    Update {
        /// Installed plugin names
        plugins: Vec<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        if let Commands::Config = self.command {
            return show_config();
        }

        if !self.directory.is_dir() {
            anyhow::bail!("Plugins directory not found: {}", self.directory.display());
        }

        let cfg = config::config()?;
        let directory = SpigetClient::from_config(cfg).context("Failed to create directory client")?;

        let summary = if self.noninteractive {
            let manager = PluginManager::new(directory, AutoPrompt, &self.directory, cfg.search.clone());
            dispatch(self.command, manager).await?
        } else {
            let manager = PluginManager::new(
                directory,
                TerminalPrompt::stdio(),
                &self.directory,
                cfg.search.clone(),
            );
            dispatch(self.command, manager).await?
        };

        if summary.failed > 0 {
            std::process::exit(1);
        }

        Ok(())
    }
}

async fn dispatch<P: Prompt>(
    command: Commands,
    mut manager: PluginManager<SpigetClient, P>,
) -> Result<BatchSummary> {
    match command {
        Commands::Install { plugins } => Ok(install_plugins(&mut manager, &plugins).await),
        Commands::Update { plugins } => update_plugins(&mut manager, &plugins).await,
        Commands::Config => {
            show_config()?;
            Ok(BatchSummary::default())
        }
    }
}

/// Install each plugin, one status line per plugin
async fn install_plugins<P: Prompt>(
    manager: &mut PluginManager<SpigetClient, P>,
    plugins: &[String],
) -> BatchSummary {
    let summary = manager
        .install_all(plugins, |name, result| {
            println!("{}", install_line(name, result));
        })
        .await;

    print_summary(&summary);
    summary
}

/// Update the named plugins, or every artifact in the directory
async fn update_plugins<P: Prompt>(
    manager: &mut PluginManager<SpigetClient, P>,
    plugins: &[String],
) -> Result<BatchSummary> {
    let files = if plugins.is_empty() {
        manager.discover_artifacts()?
    } else {
        plugins.iter().map(|p| manager.artifact_path(p)).collect()
    };

    if files.is_empty() {
        println!(
            "{}",
            format_text(
                &format!("No plugins found in {}", manager.plugins_dir().display()),
                Level::Warning
            )
        );
        return Ok(BatchSummary::default());
    }

    let summary = manager
        .update_all(&files, |file, result| {
            println!("{}", update_line(file, result));
        })
        .await;

    print_summary(&summary);
    Ok(summary)
}

/// Status line for one install result
pub fn install_line(name: &str, result: &Result<Installed, PluginError>) -> String {
    match result {
        Ok(installed) => format_text(
            &format!(
                "Installed {} as {}",
                installed.candidate.name,
                installed.file.display()
            ),
            Level::Success,
        ),
        Err(e) => error_line(name, e),
    }
}

/// Status line for one update result
pub fn update_line(file: &Path, result: &Result<UpdateStatus, PluginError>) -> String {
    match result {
        Ok(UpdateStatus::UpToDate { name, version_id }) => format_text(
            &format!("{name} is up to date (version {version_id})"),
            Level::Dimmed,
        ),
        Ok(UpdateStatus::Updated {
            installed,
            from_version,
        }) => format_text(
            &format!(
                "Updated {} (version {} -> {})",
                installed.candidate.name, from_version, installed.candidate.latest_version_id
            ),
            Level::Success,
        ),
        Ok(UpdateStatus::Declined { name, version_id }) => format_text(
            &format!("Kept {name} at version {version_id}"),
            Level::Dimmed,
        ),
        Ok(UpdateStatus::Reinstalled(installed)) => format_text(
            &format!(
                "Reinstalled {} as {}",
                installed.candidate.name,
                installed.file.display()
            ),
            Level::Success,
        ),
        Err(e) => error_line(&file.display().to_string(), e),
    }
}

fn error_line(subject: &str, error: &PluginError) -> String {
    match error {
        PluginError::UserSkipped => format_text(&format!("Skipped {subject}"), Level::Warning),
        PluginError::NotFound { .. } | PluginError::Untracked { .. } => {
            format_text(&error.to_string(), Level::Warning)
        }
        e if e.is_service() => format_text(
            &format!("{subject}: the plugin directory is unavailable ({e})"),
            Level::Error,
        ),
        e => format_text(&format!("{subject}: {e}"), Level::Error),
    }
}

fn print_summary(summary: &BatchSummary) {
    println!("{}", console::separator());
    println!(
        "{}",
        format_text(
            &format!(
                "{} succeeded, {} skipped, {} failed",
                summary.succeeded, summary.skipped, summary.failed
            ),
            Level::Status
        )
    );
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("{}", format_text("Spud Configuration", Level::Status));
    println!("{}", console::separator());
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Directory API:");
    println!("  URL:        {}", cfg.api_url);
    println!("  User agent: {}", cfg.user_agent);
    println!();
    println!("Search:");
    println!("  Page size:      {}", cfg.search.page_size);
    println!("  Max candidates: {}", cfg.search.max_candidates);
    println!("  Sort:           {}", cfg.search.sort.as_param());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UntrackedReason;

    #[test]
    fn test_parse_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "spud", "-n", "-d", "/home/test", "install", "LuckPerms", "EssentialsX",
        ])
        .unwrap();

        assert!(cli.noninteractive);
        assert_eq!(cli.directory, PathBuf::from("/home/test"));
        match cli.command {
            Commands::Install { plugins } => assert_eq!(plugins, vec!["LuckPerms", "EssentialsX"]),
            other => panic!("Expected install, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["spud", "update", "LuckPerms", "EssentialsX"]).unwrap();

        assert!(!cli.noninteractive);
        assert_eq!(cli.directory, PathBuf::from("."));
        match cli.command {
            Commands::Update { plugins } => assert_eq!(plugins, vec!["LuckPerms", "EssentialsX"]),
            other => panic!("Expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["spud", "update", "-n", "--directory", "plugins"]).unwrap();

        assert!(cli.noninteractive);
        assert_eq!(cli.directory, PathBuf::from("plugins"));
        assert!(matches!(cli.command, Commands::Update { ref plugins } if plugins.is_empty()));
    }

    #[test]
    fn test_install_requires_a_name() {
        assert!(Cli::try_parse_from(["spud", "install"]).is_err());
    }

    #[test]
    fn test_error_lines() {
        let skipped = error_line("Vault", &PluginError::UserSkipped);
        assert!(skipped.contains("Skipped Vault"));

        let untracked = update_line(
            Path::new("Foo.jar"),
            &Err(PluginError::Untracked {
                file: PathBuf::from("Foo.jar"),
                reason: UntrackedReason::NoEntry,
            }),
        );
        assert!(untracked.contains("Foo.jar is not tracked (no install metadata)"));
    }
}
