//! Page definitions for the two-tab demo application
//!
//! Each route of the demo resolves to a [`Page`]: a title and the single
//! action its button performs.

use navstack_core::router::{RouteId, TabId};

pub const FIRST_TAB: &str = "first";
pub const SECOND_TAB: &str = "second";

pub const FIRST: &str = "first";
pub const FIRST_DETAIL: &str = "first-detail";
pub const SECOND: &str = "second";
pub const SECOND_DETAIL: &str = "second-detail";

/// What a page's button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Push a route onto the selected tab
    Push(RouteId),
    /// Go back one screen
    Pop,
    /// Switch tab, then push a route there
    Handoff { tab: TabId, route: RouteId },
}

impl PageAction {
    /// Get the display text for this action
    pub fn label(&self) -> String {
        match self {
            PageAction::Push(route) => format!("open {}", route),
            PageAction::Pop => "go back".to_string(),
            PageAction::Handoff { tab, route } => format!("switch to {} → open {}", tab, route),
        }
    }
}

/// Content shown for a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: &'static str,
    pub action: PageAction,
}

pub fn first_page(_route: &RouteId) -> Page {
    Page {
        title: "FirstView",
        action: PageAction::Push(RouteId::from(FIRST_DETAIL)),
    }
}

pub fn first_detail_page(_route: &RouteId) -> Page {
    Page {
        title: "FirstDetailView",
        action: PageAction::Pop,
    }
}

pub fn second_page(_route: &RouteId) -> Page {
    Page {
        title: "SecondView",
        action: PageAction::Push(RouteId::from(SECOND_DETAIL)),
    }
}

pub fn second_detail_page(_route: &RouteId) -> Page {
    Page {
        title: "SecondDetailView",
        action: PageAction::Handoff {
            tab: TabId::from(FIRST_TAB),
            route: RouteId::from(FIRST_DETAIL),
        },
    }
}

/// Tab bar label
pub fn tab_title(tab: &TabId) -> &'static str {
    match tab.as_str() {
        FIRST_TAB => "FirstView",
        SECOND_TAB => "SecondView",
        _ => "Tab",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_detail_hands_off_to_first_tab() {
        let page = second_detail_page(&RouteId::from(SECOND_DETAIL));
        assert_eq!(
            page.action,
            PageAction::Handoff {
                tab: TabId::from(FIRST_TAB),
                route: RouteId::from(FIRST_DETAIL),
            }
        );
        assert_eq!(page.action.label(), "switch to first → open first-detail");
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(tab_title(&TabId::from(FIRST_TAB)), "FirstView");
        assert_eq!(tab_title(&TabId::from(SECOND_TAB)), "SecondView");
    }
}
