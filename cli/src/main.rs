use clap::{Parser, Subcommand};
use missionboard_cli::context::ConfigOverrides;
use missionboard_cli::{CliContext, commands, logging};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();

    let cli = Cli::parse();
    let ctx = CliContext::new();
    ctx.apply_overrides(cli.overrides()).await;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => commands::watch(&ctx).await,
        Commands::Show { json } => commands::show(&ctx, json).await,
        Commands::ListFiles => {
            commands::list_files(&ctx).await;
            Ok(())
        }
        Commands::Config => {
            commands::show_settings(&ctx).await;
            Ok(())
        }
        Commands::SetDirectory { path } => commands::set_directory(&path, &ctx).await,
    }
}

#[derive(Parser)]
#[command(version, about = "Live mission board for Elite Dangerous journals")]
struct Cli {
    /// Journal directory (overrides the saved config for this run)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Number of newest journal files to scan
    #[arg(long, global = true)]
    count: Option<usize>,

    /// Seconds between checks of the newest journal
    #[arg(long, global = true)]
    interval: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_directory: self.dir.clone(),
            journal_count: self.count,
            poll_interval_secs: self.interval,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard and refresh it whenever the journal changes (default)
    Watch,
    /// Show the dashboard once
    Show {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List journal files in the configured directory
    ListFiles,
    /// Print the effective configuration
    Config,
    /// Save a new journal directory
    SetDirectory {
        #[arg(short, long)]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_watch() {
        let cli = Cli::try_parse_from(["missionboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "missionboard",
            "show",
            "--json",
            "--dir",
            "/tmp/journals",
            "--count",
            "1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Show { json: true })));
        let overrides = cli.overrides();
        assert_eq!(overrides.log_directory, Some(PathBuf::from("/tmp/journals")));
        assert_eq!(overrides.journal_count, Some(1));
        assert_eq!(overrides.poll_interval_secs, None);
    }
}
