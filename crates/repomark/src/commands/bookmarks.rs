use crate::cli::{OutputFormat, SortOrder};
use crate::output::{output_list, output_result, Displayable};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use repomark_core::{Bookmarker, DisplayedRepo, RepositorySearch, RepositorySummary, Toggle};
use serde::Serialize;

#[derive(Serialize)]
pub struct ToggleReport {
    pub id: u64,
    pub full_name: String,
    pub bookmarked: bool,
}

impl ToggleReport {
    fn new(repo: &RepositorySummary, toggle: Toggle) -> Self {
        Self {
            id: repo.id,
            full_name: repo.full_name(),
            bookmarked: toggle.is_bookmarked(),
        }
    }
}

impl Displayable for ToggleReport {
    fn display(&self) -> String {
        if self.bookmarked {
            format!("{} {}", "Bookmarked".green().bold(), self.full_name)
        } else {
            format!("{} {}", "Removed bookmark".yellow().bold(), self.full_name)
        }
    }
}

/// Toggle a bookmark by ID
///
/// Removing uses the stored snapshot. Adding needs a fresh snapshot, which is
/// looked up on GitHub.
pub fn handle_toggle(
    app: &mut Bookmarker,
    client: &dyn RepositorySearch,
    id: u64,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = match app.bookmarks().get(id) {
        Some(existing) => existing.clone(),
        None => client
            .get_repository(id)
            .with_context(|| format!("Failed to look up repository {}", id))?,
    };

    let toggle = app
        .toggle(&snapshot)
        .context("Failed to update bookmarks")?;

    output_result(&ToggleReport::new(&snapshot, toggle), format);
    Ok(())
}

pub fn handle_list(app: &Bookmarker, sort: SortOrder, format: OutputFormat) -> Result<()> {
    let rows: Vec<DisplayedRepo> = app
        .bookmarks()
        .list(sort.into())
        .into_iter()
        .map(|summary| DisplayedRepo {
            summary,
            is_bookmarked: true,
        })
        .collect();

    if rows.is_empty() && format == OutputFormat::Text {
        eprintln!("No bookmarks yet. Use 'repomark bookmark <ID>' to add one.");
        return Ok(());
    }

    output_list(&rows, format);
    Ok(())
}

pub fn handle_open(app: &Bookmarker, id: u64) -> Result<()> {
    let repo = app
        .bookmarks()
        .get(id)
        .ok_or_else(|| anyhow!("Repository {} is not bookmarked", id))?;

    open::that(&repo.url).with_context(|| format!("Failed to open {}", repo.url))?;
    eprintln!("Opened {}", repo.url);
    Ok(())
}
