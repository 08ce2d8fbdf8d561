//! CLI output for navigation state and screen events
//!
//! Text mode draws the navigator with iocraft and prints colored event lines;
//! JSON mode prints one JSON object per line on stdout.

use crate::interactive::app::{ActionOutcome, DemoNavigator};
use crate::interactive::view::print_state;
use anyhow::Result;
use colored::Colorize;
use navstack_core::router::{RouteId, RouterSnapshot, ScreenEvent, StackChange};
use serde::Serialize;

/// A single line of JSON output
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Step { description: &'a str },
    State { snapshot: &'a RouterSnapshot<RouteId> },
    Screen { event: &'a ScreenEvent<RouteId> },
    Note { message: &'a str },
}

/// Output mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Announce a step of a scripted run
    pub fn step(&self, description: &str) -> Result<()> {
        if self.json {
            self.emit(&Record::Step { description })
        } else {
            println!("\n{} {}", "▶".cyan(), description.bold());
            Ok(())
        }
    }

    /// Show the navigator's current state
    pub fn state(&self, navigator: &DemoNavigator) -> Result<()> {
        if self.json {
            let snapshot = navigator.router().snapshot();
            self.emit(&Record::State {
                snapshot: &snapshot,
            })
        } else {
            print_state(navigator)?;
            Ok(())
        }
    }

    /// Report a screen visibility change
    pub fn screen_event(&self, event: &ScreenEvent<RouteId>) {
        if self.json {
            if let Err(e) = self.emit(&Record::Screen { event }) {
                tracing::warn!("Failed to write screen event: {}", e);
            }
            return;
        }

        let line = format!(
            "  {} {} ({:?})",
            event.label(),
            event.entry().route,
            event.transition()
        );
        match event {
            ScreenEvent::Appeared { .. } => println!("{}", line.green()),
            ScreenEvent::Disappeared { .. } => println!("{}", line.dimmed()),
        }
    }

    /// Report the outcome of an action that did not change the visible screen
    pub fn outcome(&self, outcome: &ActionOutcome) -> Result<()> {
        let message = match outcome {
            ActionOutcome::Stack(StackChange::DuplicateSuppressed) => {
                "already visible, push suppressed"
            }
            ActionOutcome::Stack(StackChange::RootGuarded) => "already at root, nothing to pop",
            ActionOutcome::Stack(StackChange::Unchanged) => "nothing changed",
            ActionOutcome::Deferred(_) => "follow-up push scheduled",
            ActionOutcome::Stack(_) => return Ok(()),
        };
        self.note(message)
    }

    /// Print an informational message
    pub fn note(&self, message: &str) -> Result<()> {
        if self.json {
            self.emit(&Record::Note { message })
        } else {
            println!("  {}", message.yellow());
            Ok(())
        }
    }

    fn emit(&self, record: &Record<'_>) -> Result<()> {
        println!("{}", serde_json::to_string(record)?);
        Ok(())
    }
}
