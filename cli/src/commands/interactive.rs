//! Interactive mode command

use crate::config::CliConfigLoader;
use crate::interactive::app::{build_navigator, perform, tap, ActionOutcome, DemoNavigator};
use crate::interactive::pages::PageAction;
use crate::interactive::shell::{parse_command, ShellCommand, HELP};
use crate::output::Output;
use anyhow::Result;
use navstack_core::router::{DeferredPush, PresentationAdapter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Start interactive mode
pub async fn interactive_command(config_loader: CliConfigLoader, output: Output) -> Result<()> {
    let settings = config_loader.load().await?;
    let navigator = build_navigator(settings)?;
    let _events = PresentationAdapter::attach(navigator.router(), move |event| {
        output.screen_event(&event)
    });

    if !output.is_json() {
        println!("{}\n", HELP);
    }
    output.state(&navigator)?;

    let mut pending: Vec<DeferredPush> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                output.note(&message)?;
                continue;
            }
        };
        debug!("Shell command: {:?}", command);

        if command == ShellCommand::Quit {
            break;
        }

        match execute(&navigator, &command) {
            Ok(Some(outcome)) => {
                output.outcome(&outcome)?;
                if let ActionOutcome::Deferred(deferred) = outcome {
                    pending.push(deferred);
                }
            }
            Ok(None) => {}
            Err(e) => output.note(&e.to_string())?,
        }

        pending.retain(|deferred| !deferred.is_finished());
        if command == ShellCommand::Help {
            output.note(HELP)?;
        } else {
            output.state(&navigator)?;
        }
    }

    // Let scheduled handoffs land before exiting.
    for deferred in pending {
        deferred.completed().await;
    }
    Ok(())
}

fn execute(
    navigator: &DemoNavigator,
    command: &ShellCommand,
) -> navstack_core::Result<Option<ActionOutcome>> {
    let outcome = match command {
        ShellCommand::Push(route) => perform(navigator, &PageAction::Push(route.clone()))?,
        ShellCommand::Pop => perform(navigator, &PageAction::Pop)?,
        ShellCommand::Root => ActionOutcome::Stack(navigator.router().pop_to_root()),
        ShellCommand::Tab(tab) => {
            navigator.router().switch_tab(tab.clone())?;
            return Ok(None);
        }
        ShellCommand::Handoff { tab, route } => perform(
            navigator,
            &PageAction::Handoff {
                tab: tab.clone(),
                route: route.clone(),
            },
        )?,
        ShellCommand::Tap => tap(navigator)?,
        ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => return Ok(None),
    };
    Ok(Some(outcome))
}
