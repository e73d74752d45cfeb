use crate::cli::{ColorChoice, OutputFormat};
use std::io::IsTerminal;

/// Decide whether output is colorized; JSON output never is
pub fn init(choice: ColorChoice, format: OutputFormat) {
    let enabled = match (format, choice) {
        (OutputFormat::Json, _) => false,
        (_, ColorChoice::Always) => true,
        (_, ColorChoice::Never) => false,
        // Respect NO_COLOR (https://no-color.org/), then require a terminal
        (_, ColorChoice::Auto) => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    };

    colored::control::set_override(enabled);
}
