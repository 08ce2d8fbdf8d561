//! Command parsing for the interactive shell

use navstack_core::router::{RouteId, TabId};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Push(RouteId),
    Pop,
    Root,
    Tab(TabId),
    Handoff { tab: TabId, route: RouteId },
    /// Press the visible page's button
    Tap,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  push <route>            open a route on the selected tab
  pop                     go back one screen
  root                    go back to the tab's root
  tab <tab>               select a tab
  handoff <tab> <route>   select a tab, then open a route there
  tap                     press the visible page's button
  show                    draw the current state
  help                    show this help
  quit                    leave the shell";

/// Parse one input line; `Ok(None)` for blank lines
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let parsed = match (command, args.as_slice()) {
        ("push", [route]) => ShellCommand::Push(RouteId::from(*route)),
        ("pop" | "back", []) => ShellCommand::Pop,
        ("root", []) => ShellCommand::Root,
        ("tab", [tab]) => ShellCommand::Tab(TabId::from(*tab)),
        ("handoff", [tab, route]) => ShellCommand::Handoff {
            tab: TabId::from(*tab),
            route: RouteId::from(*route),
        },
        ("tap", []) => ShellCommand::Tap,
        ("show", []) => ShellCommand::Show,
        ("help" | "?", []) => ShellCommand::Help,
        ("quit" | "exit" | "q", []) => ShellCommand::Quit,
        ("push" | "tab", _) => return Err(format!("usage: {} <name>", command)),
        ("handoff", _) => return Err("usage: handoff <tab> <route>".to_string()),
        (
            "pop" | "back" | "root" | "tap" | "show" | "help" | "?" | "quit" | "exit" | "q",
            _,
        ) => return Err(format!("'{}' takes no arguments", command)),
        _ => return Err(format!("unknown command '{}', try 'help'", command)),
    };

    Ok(Some(parsed))
}
