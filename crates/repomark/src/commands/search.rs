use crate::cli::OutputFormat;
use crate::output::output_list;
use anyhow::{anyhow, Result};
use repomark_core::{Bookmarker, RepositorySearch, SearchStatus};
use std::time::Instant;

/// One-shot search: record the query, fire the debounce immediately, print results
pub fn handle_search(
    app: &mut Bookmarker,
    client: &dyn RepositorySearch,
    query: &str,
    per_page: usize,
    format: OutputFormat,
) -> Result<()> {
    app.set_query(query, Instant::now());

    if let Some(ticket) = app.flush() {
        let outcome = client.search_repositories(&ticket.query, per_page);
        app.complete(ticket.seq, outcome);
    }

    if app.search().status() == SearchStatus::Failed {
        let message = app
            .search()
            .error()
            .unwrap_or("Search failed")
            .to_string();
        return Err(anyhow!(message));
    }

    let rows = app.displayed();
    if rows.is_empty() && format == OutputFormat::Text {
        if let Some(message) = app.status_message() {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    output_list(&rows, format);
    Ok(())
}
