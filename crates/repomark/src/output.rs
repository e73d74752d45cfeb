use crate::cli::OutputFormat;
use colored::Colorize;
use repomark_core::{Bookmarker, DisplayedRepo, RepositorySummary, SearchStatus};
use serde::Serialize;

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

/// Print rows, numbered from 1 in text mode
pub fn output_list<T: Serialize + Displayable>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            for (i, item) in items.iter().enumerate() {
                println!("{:>3}. {}", i + 1, item.display());
                println!();
            }
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for RepositorySummary {
    fn display(&self) -> String {
        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided.");
        let language = self
            .primary_language
            .as_deref()
            .unwrap_or("Unknown Language");

        format!(
            "{} {}\n       {}\n       {} {} | {}\n       {}",
            self.full_name().cyan().bold(),
            format!("({})", self.id).dimmed(),
            description,
            "★".yellow(),
            self.star_count,
            language,
            self.url.dimmed()
        )
    }
}

impl Displayable for DisplayedRepo {
    fn display(&self) -> String {
        let marker = if self.is_bookmarked {
            "★ Bookmarked".green().bold().to_string()
        } else {
            "☆".dimmed().to_string()
        };
        format!("{} {}", marker, self.summary.display())
    }
}

/// Full state of an interactive session, emitted once per change in JSON mode
#[derive(Serialize)]
pub struct SessionView {
    pub query: String,
    pub status: SearchStatus,
    pub show_bookmarks_only: bool,
    pub message: Option<String>,
    pub items: Vec<DisplayedRepo>,
}

impl SessionView {
    pub fn capture(app: &Bookmarker) -> Self {
        Self {
            query: app.search().query().to_string(),
            status: app.search().status(),
            show_bookmarks_only: app.show_bookmarks_only(),
            message: app.status_message(),
            items: app.displayed(),
        }
    }
}

/// Render the session: a header, the status line, then the rows
pub fn output_session(app: &Bookmarker, format: OutputFormat) {
    let view = SessionView::capture(app);
    match format {
        OutputFormat::Json => {
            // One object per line so consumers can stream the session
            if let Ok(json) = serde_json::to_string(&view) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            let mode = if view.show_bookmarks_only {
                "bookmarks"
            } else {
                "results"
            };
            println!(
                "{} {} {}",
                "Query:".dimmed(),
                view.query.white().bold(),
                format!("[{}]", mode).magenta()
            );
            if let Some(message) = &view.message {
                let line = if view.status == SearchStatus::Failed {
                    message.red().to_string()
                } else {
                    message.dimmed().to_string()
                };
                println!("{}", line);
            }
            output_list(&view.items, format);
        }
    }
}
