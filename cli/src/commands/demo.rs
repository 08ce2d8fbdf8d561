//! Demo command: a scripted walk through the two-tab app

use crate::config::CliConfigLoader;
use crate::interactive::app::{build_navigator, perform, tap, ActionOutcome, DemoNavigator};
use crate::interactive::pages::{PageAction, FIRST_DETAIL, SECOND_TAB};
use crate::output::Output;
use anyhow::Result;
use navstack_core::router::{PresentationAdapter, RouteId, RouterResult};
use tracing::{debug, info};

/// Run the scripted demo
pub async fn demo_command(config_loader: CliConfigLoader, output: Output) -> Result<()> {
    let settings = config_loader.load().await?;
    debug!("Handoff delay: {}ms", settings.handoff_delay_ms);

    let navigator = build_navigator(settings)?;
    let _events = PresentationAdapter::attach(navigator.router(), move |event| {
        output.screen_event(&event)
    });

    info!("Starting navigation demo");
    output.step("Start")?;
    output.state(&navigator)?;

    run_step(&navigator, output, "Tap FirstView", tap).await?;
    run_step(&navigator, output, "Push first-detail again", |nav| {
        perform(nav, &PageAction::Push(RouteId::from(FIRST_DETAIL)))
    })
    .await?;
    run_step(&navigator, output, "Tap FirstDetailView (back)", tap).await?;
    run_step(&navigator, output, "Back on the root", |nav| {
        perform(nav, &PageAction::Pop)
    })
    .await?;

    output.step("Switch to SecondView")?;
    navigator.router().switch_tab(SECOND_TAB)?;
    output.state(&navigator)?;

    run_step(&navigator, output, "Tap SecondView", tap).await?;
    run_step(
        &navigator,
        output,
        "Tap SecondDetailView (hand off to FirstView)",
        tap,
    )
    .await?;

    output.step("Pop FirstView to root")?;
    navigator.router().pop_to_root();
    output.state(&navigator)?;

    info!("Navigation demo finished");
    Ok(())
}

async fn run_step<F>(
    navigator: &DemoNavigator,
    output: Output,
    description: &str,
    action: F,
) -> Result<()>
where
    F: FnOnce(&DemoNavigator) -> RouterResult<ActionOutcome>,
{
    output.step(description)?;
    let outcome = action(navigator)?;
    output.outcome(&outcome)?;

    if let ActionOutcome::Deferred(deferred) = outcome {
        if !deferred.completed().await {
            output.note("follow-up push did not change the stack")?;
        }
    }

    output.state(navigator)
}
