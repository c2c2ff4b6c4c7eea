use missionboard_core::context::{AppConfig, AppConfigExt, DirectoryIndex};
use missionboard_core::run_pipeline;
use std::io::Write;
use std::path::Path;

use crate::CliContext;
use crate::dashboard::{no_journals_message, render};
use crate::dir_watcher;

pub async fn watch(ctx: &CliContext) -> Result<(), String> {
    dir_watcher::run_live(ctx).await
}

pub async fn show(ctx: &CliContext, json: bool) -> Result<(), String> {
    let (dir, count) = {
        let config = ctx.config.read().await;
        (config.log_path(), config.journal_count)
    };

    let dashboard = run_pipeline(&dir, count);
    let output = if json {
        let mut json = serde_json::to_string_pretty(&dashboard).map_err(|e| e.to_string())?;
        json.push('\n');
        json
    } else {
        render(&dashboard)
    };

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", output).map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())
}

pub async fn list_files(ctx: &CliContext) {
    let dir = ctx.config.read().await.log_path();

    let index = match DirectoryIndex::build_index(&dir) {
        Ok(index) => index,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to index journal directory");
            println!("{}", no_journals_message(&dir));
            return;
        }
    };

    if index.is_empty() {
        println!("{}", no_journals_message(&dir));
        return;
    }

    println!("{:<45} {:<20} {:>5} {:>12}", "File", "Session Start", "Part", "Size");
    println!("{}", "-".repeat(85));

    for entry in index.entries() {
        let part = entry.part.map(|p| p.to_string()).unwrap_or_default();
        let empty_marker = if entry.is_empty() { " (empty)" } else { "" };
        println!(
            "{:<45} {:<20} {:>5} {:>12}{}",
            entry.filename,
            entry.formatted_datetime(),
            part,
            entry.file_size,
            empty_marker
        );
    }

    println!(
        "\nTotal: {} files, {} bytes",
        index.len(),
        index.total_size()
    );
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    print_config(&config);
    match AppConfig::config_path() {
        Ok(path) => println!("Config file:        {}", path.display()),
        Err(e) => println!("Config file:        unavailable ({})", e),
    }
}

fn print_config(config: &AppConfig) {
    println!("Journal directory:  {}", config.log_directory);
    println!("Journals scanned:   {}", config.journal_count);
    println!("Poll interval:      {}s", config.poll_interval_secs);
    println!("Follow new files:   {}", config.watch_new_journals);
}

pub async fn set_directory(new_directory: &Path, ctx: &CliContext) -> Result<(), String> {
    let mut config = ctx.config.write().await;

    if config.log_path() == new_directory {
        println!(
            "Journal directory already configured to {}",
            new_directory.display()
        );
        return Ok(());
    }

    config
        .set_log_directory(new_directory)
        .map_err(|e| format!("Update failed. {}", e))?;
    config.save().map_err(|e| e.to_string())?;

    tracing::info!(path = %new_directory.display(), "Journal directory updated");
    println!("Journal directory set to {}", new_directory.display());
    Ok(())
}
