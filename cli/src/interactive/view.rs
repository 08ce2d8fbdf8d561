//! Terminal rendering of the demo navigator
//!
//! Draws the tab bar, the breadcrumb of the selected stack and the visible
//! page with iocraft elements.

use super::app::DemoNavigator;
use super::pages::tab_title;
use iocraft::prelude::*;
use navstack_core::router::RouterResult;

/// Build the element for the navigator's current state
pub fn render_state(navigator: &DemoNavigator) -> RouterResult<AnyElement<'static>> {
    let snapshot = navigator.router().snapshot();
    let stack = navigator.render_active_stack()?;

    let tabs: Vec<AnyElement<'static>> = snapshot
        .tabs
        .iter()
        .map(|tab| {
            let is_selected = tab.tab == snapshot.selected;
            let prefix = if is_selected { "► " } else { "  " };

            element! {
                Text(
                    key: format!("tab-{}", tab.tab),
                    content: format!("{}{} [{}]", prefix, tab_title(&tab.tab), tab.entries.len()),
                    color: if is_selected { Color::Yellow } else { Color::Grey },
                    weight: if is_selected { Weight::Bold } else { Weight::Normal }
                )
            }
            .into()
        })
        .collect();

    let breadcrumb = stack
        .iter()
        .map(|(layout, _)| layout.entry.route.to_string())
        .collect::<Vec<_>>()
        .join(" › ");

    let mut body: Vec<AnyElement<'static>> = Vec::new();
    if let Some((layout, page)) = stack.last() {
        if layout.shows_back {
            body.push(
                element! {
                    Text(key: "back", content: "‹ Back", color: Color::Blue)
                }
                .into(),
            );
        }
        body.push(
            element! {
                Text(key: "title", content: page.title, weight: Weight::Bold, color: Color::Cyan)
            }
            .into(),
        );
        body.push(
            element! {
                Text(key: "action", content: format!("[tap] {}", page.action.label()))
            }
            .into(),
        );
    }

    Ok(element! {
        View(
            key: "navstack-state",
            flex_direction: FlexDirection::Column,
            width: 64,
            padding: 1,
            border_style: BorderStyle::Round,
            border_color: Color::Cyan,
        ) {
            View(flex_direction: FlexDirection::Row, gap: 2) {
                #(tabs)
            }
            Text(content: breadcrumb, color: Color::Grey)
            View(height: 1)
            #(body)
        }
    }
    .into())
}

/// Print the navigator's current state to stdout
pub fn print_state(navigator: &DemoNavigator) -> RouterResult<()> {
    let mut element = render_state(navigator)?;
    element.print();
    Ok(())
}
