// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides standardized formatting for errors, warnings and SDK failures

use gallery_sdk::GalleryError;
use owo_colors::OwoColorize;

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {}", message)
        }
    }

    /// Display an error message
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    /// Display an SDK error with its help text. The cause of an internal
    /// failure only goes to the debug log.
    pub fn gallery_error(&self, err: &GalleryError) {
        self.error(&err.to_string());

        if let Some(cause) = err.cause() {
            log::debug!("cause: {}", cause);
        }

        if let Some(help) = err.help_text() {
            eprintln!();
            if self.use_color {
                eprintln!("{}", help.dimmed());
            } else {
                eprintln!("{}", help);
            }
        }
    }
}
