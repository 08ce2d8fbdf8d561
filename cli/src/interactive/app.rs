//! The demo application: two tabs, four pages
//!
//! Builds the navigator for the demo and performs page actions against it.

use super::pages::{
    first_detail_page, first_page, second_detail_page, second_page, Page, PageAction, FIRST,
    FIRST_DETAIL, FIRST_TAB, SECOND, SECOND_DETAIL, SECOND_TAB,
};
use navstack_core::router::{
    DeferredPush, Navigator, NavigatorBuilder, RouteId, RouterResult, StackChange,
};
use navstack_core::NavigationConfig;

/// Navigator type used by the demo
pub type DemoNavigator = Navigator<RouteId, Page>;

/// Build the demo navigator with the given settings
pub fn build_navigator(settings: NavigationConfig) -> navstack_core::Result<DemoNavigator> {
    NavigatorBuilder::new()
        .tab(FIRST_TAB, RouteId::from(FIRST))
        .tab(SECOND_TAB, RouteId::from(SECOND))
        .route(RouteId::from(FIRST), first_page)
        .route(RouteId::from(FIRST_DETAIL), first_detail_page)
        .route(RouteId::from(SECOND), second_page)
        .route(RouteId::from(SECOND_DETAIL), second_detail_page)
        .settings(settings)
        .build()
}

/// Result of performing a page action
#[derive(Debug)]
pub enum ActionOutcome {
    /// A stack operation completed synchronously
    Stack(StackChange),
    /// A tab handoff whose push is still pending
    Deferred(DeferredPush),
}

/// Perform an action against the navigator
pub fn perform(navigator: &DemoNavigator, action: &PageAction) -> RouterResult<ActionOutcome> {
    match action {
        PageAction::Push(route) => navigator
            .router()
            .push(route.clone())
            .map(ActionOutcome::Stack),
        PageAction::Pop => Ok(ActionOutcome::Stack(navigator.router().pop())),
        PageAction::Handoff { tab, route } => navigator
            .handoff(tab.clone(), route.clone())
            .map(ActionOutcome::Deferred),
    }
}

/// Press the button of the visible page
pub fn tap(navigator: &DemoNavigator) -> RouterResult<ActionOutcome> {
    let page = navigator.render_visible()?;
    tracing::debug!("Tapped {} ({})", page.title, page.action.label());
    perform(navigator, &page.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstack_core::router::TabId;

    fn routes(navigator: &DemoNavigator, tab: &str) -> Vec<String> {
        navigator
            .router()
            .snapshot()
            .routes(&TabId::from(tab))
            .into_iter()
            .map(|route| route.0)
            .collect()
    }

    #[test]
    fn test_tap_through_first_tab() {
        let navigator = build_navigator(NavigationConfig::default()).unwrap();

        tap(&navigator).unwrap();
        assert_eq!(routes(&navigator, FIRST_TAB), vec![FIRST, FIRST_DETAIL]);

        tap(&navigator).unwrap();
        assert_eq!(routes(&navigator, FIRST_TAB), vec![FIRST]);
    }

    #[tokio::test]
    async fn test_second_detail_handoff() {
        let navigator = build_navigator(NavigationConfig::new().with_handoff_delay_ms(0)).unwrap();
        navigator.router().switch_tab(SECOND_TAB).unwrap();
        tap(&navigator).unwrap();
        assert_eq!(routes(&navigator, SECOND_TAB), vec![SECOND, SECOND_DETAIL]);

        match tap(&navigator).unwrap() {
            ActionOutcome::Deferred(deferred) => assert!(deferred.completed().await),
            other => panic!("expected a deferred push, got {:?}", other),
        }

        assert_eq!(navigator.router().selected_tab(), TabId::from(FIRST_TAB));
        assert_eq!(routes(&navigator, FIRST_TAB), vec![FIRST, FIRST_DETAIL]);
        assert_eq!(routes(&navigator, SECOND_TAB), vec![SECOND, SECOND_DETAIL]);
    }

    #[test]
    fn test_unknown_initial_tab_fails_to_build() {
        let result = build_navigator(NavigationConfig::new().with_initial_tab("third"));
        assert!(result.is_err());
    }
}
