mod cli;
mod color;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigCommands, OutputFormat};
use config::Config;
use github_backend::GitHubClient;
use output::output_error;
use repomark_core::{BookmarkStore, Bookmarker, FileStore, RepositorySearch, SearchController};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color, cli.format);
    logging::init(cli.verbose);

    let format = cli.format;
    if let Err(e) = run(cli) {
        output_error(&e, format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need the API or the bookmark store
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "repomark",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Commands::Config { action } => return handle_config(&cli, action),
        _ => {}
    }

    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.api_url.clone(), cli.token.clone(), cli.data_dir.clone());
    config.validate()?;

    let data_dir = config.resolve_data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), api_url = %config.api_url, "Starting");

    let client = Arc::new(GitHubClient::with_base_url(
        &config.api_url,
        config.token.as_deref(),
    ));
    let bookmarks = BookmarkStore::open(Box::new(FileStore::new(data_dir)));
    let mut app = Bookmarker::new(SearchController::new(config.debounce()), bookmarks);

    match &cli.command {
        Commands::Search { query, limit } => {
            let per_page = limit.unwrap_or(config.per_page).clamp(1, 100);
            commands::search::handle_search(
                &mut app,
                client.as_ref(),
                &query.join(" "),
                per_page,
                cli.format,
            )
        }
        Commands::Bookmark { id } => {
            commands::bookmarks::handle_toggle(&mut app, client.as_ref(), *id, cli.format)
        }
        Commands::Bookmarks { sort } => commands::bookmarks::handle_list(&app, *sort, cli.format),
        Commands::Open { id } => commands::bookmarks::handle_open(&app, *id),
        Commands::Interactive => {
            let search: Arc<dyn RepositorySearch> = client;
            commands::interactive::run_interactive(&mut app, search, config.per_page, cli.format)
        }
        // Handled above
        Commands::Completions { .. } | Commands::Config { .. } => Ok(()),
    }
}

fn handle_config(cli: &Cli, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let mut config = Config::load(cli.config.clone())?;
            config.merge_with_cli(cli.api_url.clone(), cli.token.clone(), cli.data_dir.clone());
            let shown = config.redacted();
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                }
                OutputFormat::Text => {
                    let text = toml::to_string_pretty(&shown)
                        .context("Failed to render configuration")?;
                    print!("{}", text);
                    if shown.data_dir.is_none() {
                        if let Ok(dir) = config.resolve_data_dir() {
                            println!("# data_dir defaults to {}", dir.display());
                        }
                    }
                }
            }
            Ok(())
        }
        ConfigCommands::Path => {
            for path in config::config_paths(cli.config.as_deref()) {
                let marker = if path.exists() { "*" } else { " " };
                println!("{} {}", marker, path.display());
            }
            Ok(())
        }
    }
}
