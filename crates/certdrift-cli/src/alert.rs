//! Terminal alert surface for drift.
//!
//! A persistent banner plus a two-item menu, standing in for a tray icon
//! with a context menu. The menu loop is the last step of a drifted run
//! and returns only when the operator dismisses it.

use certdrift_core::{DriftAlert, DriftError, Notifier};
use colored::Colorize;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::path::Path;
use tracing::warn;

const MENU_OPEN: &str = "Open containing folder";
const MENU_EXIT: &str = "Exit";
const MENU_ITEMS: [&str; 2] = [MENU_OPEN, MENU_EXIT];

/// What a menu selection means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Reveal the working directory and keep the alert up
    Reveal,
    /// Close the alert
    Dismiss,
}

impl MenuAction {
    /// Map a menu selection. Escape (`None`) dismisses.
    #[must_use]
    pub const fn from_selection(selection: Option<usize>) -> Self {
        match selection {
            Some(0) => Self::Reveal,
            _ => Self::Dismiss,
        }
    }
}

/// Interactive drift alert rendered on stderr.
#[derive(Debug, Clone)]
pub struct TerminalAlert {
    term: Term,
}

impl Default for TerminalAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalAlert {
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn banner(alert: &DriftAlert) {
        eprintln!();
        eprintln!("  {}", "CERTIFICATE DRIFT".on_red().white().bold());
        eprintln!("  {}", alert.message.bright_red().bold());
        eprintln!();
        eprintln!(
            "  {} {}",
            "results: ".dimmed(),
            format!("{}  {}", alert.comparison.results, alert.results_path.display()).bright_white()
        );
        eprintln!(
            "  {} {}",
            "baseline:".dimmed(),
            format!("{}  {}", alert.comparison.baseline, alert.baseline_path.display()).bright_white()
        );
        eprintln!();
    }

    fn reveal(dir: &Path) {
        if let Err(e) = open::that(dir) {
            warn!(path = %dir.display(), error = %e, "failed to open folder");
            eprintln!(
                "  {} could not open {}: {e}",
                "warning:".bright_yellow().bold(),
                dir.display()
            );
        }
    }
}

impl Notifier for TerminalAlert {
    fn notify(&self, alert: &DriftAlert) -> certdrift_core::Result<()> {
        Self::banner(alert);

        // Scheduled runs have no terminal to hold a menu; the banner, log
        // and exit code carry the alert.
        if !self.term.is_term() {
            return Ok(());
        }

        loop {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("certdrift")
                .items(&MENU_ITEMS)
                .default(0)
                .interact_on_opt(&self.term)
                .map_err(|e| DriftError::Notify(e.to_string()))?;

            match MenuAction::from_selection(selection) {
                MenuAction::Reveal => Self::reveal(&alert.working_dir),
                MenuAction::Dismiss => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_mapping() {
        assert_eq!(MenuAction::from_selection(Some(0)), MenuAction::Reveal);
        assert_eq!(MenuAction::from_selection(Some(1)), MenuAction::Dismiss);
        assert_eq!(MenuAction::from_selection(None), MenuAction::Dismiss);
        assert_eq!(MENU_ITEMS[1], MENU_EXIT);
    }
}
