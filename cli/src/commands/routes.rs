//! Routes command: list tabs and registered routes

use crate::config::CliConfigLoader;
use crate::interactive::app::build_navigator;
use crate::interactive::pages::tab_title;
use crate::output::Output;
use anyhow::Result;
use serde_json::json;

/// Show the demo's tabs and routes
pub async fn routes_command(config_loader: CliConfigLoader, output: Output) -> Result<()> {
    let settings = config_loader.load().await?;
    let navigator = build_navigator(settings)?;
    let router = navigator.router();

    let tabs: Vec<_> = navigator.router().with_router(|router| {
        router
            .tab_ids()
            .filter_map(|tab| {
                router
                    .stack(tab)
                    .map(|stack| (tab.clone(), stack.root_route().clone()))
            })
            .collect()
    });
    let mut routes: Vec<String> = navigator
        .renderers()
        .routes()
        .map(|route| route.to_string())
        .collect();
    routes.sort();

    if output.is_json() {
        let tabs: Vec<_> = tabs
            .iter()
            .map(|(tab, root)| json!({ "tab": tab, "root": root }))
            .collect();
        let value = json!({
            "selected": router.selected_tab(),
            "handoff_delay_ms": navigator.settings().handoff_delay_ms,
            "tabs": tabs,
            "routes": routes,
        });
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    println!("Tabs:");
    for (tab, root) in &tabs {
        let marker = if *tab == router.selected_tab() { "*" } else { " " };
        println!("  {} {:<8} {:<12} root: {}", marker, tab, tab_title(tab), root);
    }
    println!("\nRoutes:");
    for route in &routes {
        println!("  {}", route);
    }
    println!(
        "\nHandoff delay: {}ms",
        navigator.settings().handoff_delay_ms
    );

    Ok(())
}
