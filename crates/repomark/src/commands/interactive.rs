//! Line-oriented interactive session.
//!
//! The main thread owns the [`Bookmarker`] and runs an event loop. Stdin and
//! outbound searches run on helper threads that only report back over a
//! channel, so every state change happens on one thread and in event order.
//! Search responses can arrive in any order; the controller drops stale ones.

use crate::cli::OutputFormat;
use crate::output::output_session;
use anyhow::Result;
use repomark_core::{Bookmarker, Completion, RepositorySearch, RepositorySummary, SearchTicket};
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

const HELP: &str = "\
Type to search; each line replaces the query (an empty line clears it).
  :s      search now without waiting
  :b N    toggle bookmark on row N
  :o N    open row N in the browser
  :m      switch between results and bookmarks
  :h      show this help
  :q      quit";

enum Event {
    Input(String),
    InputClosed,
    SearchDone {
        seq: u64,
        outcome: repomark_core::Result<Vec<RepositorySummary>>,
    },
}

/// A parsed input line
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Query(String),
    SearchNow,
    ToggleBookmark(usize),
    Open(usize),
    ToggleMode,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Action {
    let Some(command) = line.strip_prefix(':') else {
        return Action::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let row = parts.next().map(str::parse::<usize>);

    match (name, row) {
        ("s", None) => Action::SearchNow,
        ("m", None) => Action::ToggleMode,
        ("h", None) => Action::Help,
        ("q", None) => Action::Quit,
        ("b", Some(Ok(n))) if n > 0 => Action::ToggleBookmark(n),
        ("o", Some(Ok(n))) if n > 0 => Action::Open(n),
        ("b", _) | ("o", _) => Action::Invalid(format!(
            "':{}' needs a row number, e.g. ':{} 1'",
            name, name
        )),
        _ => Action::Invalid(format!(
            "Unknown command ':{}'. Type :h for help",
            command.trim()
        )),
    }
}

pub fn run_interactive(
    app: &mut Bookmarker,
    client: Arc<dyn RepositorySearch>,
    per_page: usize,
    format: OutputFormat,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());

    if format == OutputFormat::Text {
        eprintln!("{}", HELP);
    }

    let mut input_closed = false;
    loop {
        if let Some(ticket) = app.poll(Instant::now()) {
            dispatch(ticket, Arc::clone(&client), per_page, tx.clone());
            output_session(app, format);
        }

        let idle = app.search().in_flight().is_none() && app.search().next_deadline().is_none();
        if input_closed && idle {
            break;
        }

        let event = match next_event(app, &rx) {
            Wake::Event(event) => event,
            Wake::TimerDue => continue,
            Wake::Closed => break,
        };

        match event {
            Event::Input(line) => match parse_line(&line) {
                Action::Query(text) => {
                    app.set_query(&text, Instant::now());
                    output_session(app, format);
                }
                Action::SearchNow => {
                    if let Some(ticket) = app.flush() {
                        dispatch(ticket, Arc::clone(&client), per_page, tx.clone());
                        output_session(app, format);
                    }
                }
                Action::ToggleBookmark(row) => match app.displayed().get(row - 1) {
                    Some(item) => {
                        let summary = item.summary.clone();
                        match app.toggle(&summary) {
                            Ok(_) => output_session(app, format),
                            Err(e) => warn!(error = %e, "Could not update bookmarks"),
                        }
                    }
                    None => warn!(row, "No such row"),
                },
                Action::Open(row) => match app.displayed().get(row - 1) {
                    Some(item) => {
                        if let Err(e) = open::that(&item.summary.url) {
                            warn!(error = %e, url = %item.summary.url, "Could not open browser");
                        }
                    }
                    None => warn!(row, "No such row"),
                },
                Action::ToggleMode => {
                    app.toggle_display_mode();
                    output_session(app, format);
                }
                Action::Help => eprintln!("{}", HELP),
                Action::Quit => break,
                Action::Invalid(message) => eprintln!("{}", message),
            },
            Event::InputClosed => {
                // Piped input: run whatever is still debouncing, then drain
                input_closed = true;
                if let Some(ticket) = app.flush() {
                    dispatch(ticket, Arc::clone(&client), per_page, tx.clone());
                    output_session(app, format);
                }
            }
            Event::SearchDone { seq, outcome } => {
                if app.complete(seq, outcome) == Completion::Applied {
                    output_session(app, format);
                }
            }
        }
    }

    Ok(())
}

enum Wake {
    Event(Event),
    TimerDue,
    Closed,
}

/// Wait for the next event, but no longer than the pending debounce deadline
fn next_event(app: &Bookmarker, rx: &Receiver<Event>) -> Wake {
    match app.search().time_until_due(Instant::now()) {
        Some(wait) => match rx.recv_timeout(wait) {
            Ok(event) => Wake::Event(event),
            Err(RecvTimeoutError::Timeout) => Wake::TimerDue,
            Err(RecvTimeoutError::Disconnected) => Wake::Closed,
        },
        None => rx.recv().map(Wake::Event).unwrap_or(Wake::Closed),
    }
}

/// Run a ticket on a worker thread; the outcome comes back as an event
fn dispatch(
    ticket: SearchTicket,
    client: Arc<dyn RepositorySearch>,
    per_page: usize,
    tx: Sender<Event>,
) {
    debug!(seq = ticket.seq, query = %ticket.query, "Dispatching search");
    thread::spawn(move || {
        let outcome = client.search_repositories(&ticket.query, per_page);
        // The session may already be over; nothing to report to then
        let _ = tx.send(Event::SearchDone {
            seq: ticket.seq,
            outcome,
        });
    });
}

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(parse_line("react"), Action::Query("react".to_string()));
        assert_eq!(parse_line(""), Action::Query(String::new()));
        assert_eq!(parse_line("  spaced "), Action::Query("  spaced ".to_string()));
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line(":s"), Action::SearchNow);
        assert_eq!(parse_line(":m"), Action::ToggleMode);
        assert_eq!(parse_line(":q"), Action::Quit);
        assert_eq!(parse_line(":h"), Action::Help);
        assert_eq!(parse_line(":b 3"), Action::ToggleBookmark(3));
        assert_eq!(parse_line(":o  12"), Action::Open(12));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(matches!(parse_line(":b"), Action::Invalid(_)));
        assert!(matches!(parse_line(":b 0"), Action::Invalid(_)));
        assert!(matches!(parse_line(":b two"), Action::Invalid(_)));
        assert!(matches!(parse_line(":x"), Action::Invalid(_)));
        assert!(matches!(parse_line(":m 1"), Action::Invalid(_)));
    }
}
