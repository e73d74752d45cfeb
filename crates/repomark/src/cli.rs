use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use repomark_core::BookmarkOrder;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repomark",
    version,
    about = "Search GitHub repositories and keep a local bookmark list"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "REPOMARK_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub API base URL (overrides config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// GitHub token, raises the anonymous rate limit (overrides config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Directory holding persisted bookmarks (overrides config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most starred first
    #[default]
    Stars,
    /// Alphabetical by repository name
    Name,
    /// In the order they were bookmarked
    Added,
}

impl From<SortOrder> for BookmarkOrder {
    fn from(sort: SortOrder) -> Self {
        match sort {
            SortOrder::Stars => BookmarkOrder::StarsDescending,
            SortOrder::Name => BookmarkOrder::Name,
            SortOrder::Added => BookmarkOrder::Added,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories by keyword
    #[command(visible_alias = "s")]
    Search {
        /// Search terms (GitHub search syntax is passed through)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results (1-100, defaults to config per_page)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Toggle the bookmark on a repository by its numeric ID
    #[command(visible_alias = "b")]
    Bookmark {
        /// Repository ID as shown in search results
        id: u64,
    },
    /// List bookmarked repositories
    #[command(visible_alias = "ls")]
    Bookmarks {
        /// Sort order
        #[arg(long, short = 's', value_enum, default_value_t = SortOrder::Stars)]
        sort: SortOrder,
    },
    /// Open a bookmarked repository in the browser
    Open {
        /// Repository ID
        id: u64,
    },
    /// Interactive search: each input line is the new query
    #[command(visible_alias = "i")]
    Interactive,
    /// Configuration inspection
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (token redacted)
    Show,
    /// Show the config file locations that are searched
    Path,
}
