//! Presentation adapter
//!
//! Glue between the router and a concrete surface. Given the current stack it
//! computes where each entry sits for a slide transition, and given successive
//! router snapshots it reports which screen became visible or hidden.

use super::handle::RouterHandle;
use super::notify::Subscription;
use super::renderer::RendererRegistry;
use super::route::{NavigationRoute, StackEntry, TabId};
use super::tabs::RouterSnapshot;
use crate::error::RouterError;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Horizontal placement of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Offset {
    /// On screen, zero offset
    Resting,
    /// Shifted one surface width towards the leading edge
    OffLeading,
}

/// Placement of one stack entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryLayout<R> {
    pub entry: StackEntry<R>,
    pub index: usize,
    /// Stacking order; higher is drawn above
    pub z_index: usize,
    pub offset: Offset,
    /// Only the top entry receives input
    pub interactive: bool,
    /// Every non-root entry carries a back affordance
    pub shows_back: bool,
}

/// Lay out a stack, root first
pub fn layout_stack<R: NavigationRoute>(entries: &[StackEntry<R>]) -> Vec<EntryLayout<R>> {
    let top = entries.len().saturating_sub(1);
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let is_top = index == top;
            EntryLayout {
                entry: entry.clone(),
                index,
                z_index: index,
                offset: if is_top {
                    Offset::Resting
                } else {
                    Offset::OffLeading
                },
                interactive: is_top,
                shows_back: index != 0,
            }
        })
        .collect()
}

/// Render every entry of a stack together with its layout
pub fn render_stack<R: NavigationRoute, C>(
    registry: &RendererRegistry<R, C>,
    entries: &[StackEntry<R>],
) -> Result<Vec<(EntryLayout<R>, C)>, RouterError> {
    layout_stack(entries)
        .into_iter()
        .map(|layout| {
            let content = registry.render(&layout.entry.route)?;
            Ok((layout, content))
        })
        .collect()
}

/// Render the visible screen of a router snapshot
pub fn render_visible<R: NavigationRoute, C>(
    registry: &RendererRegistry<R, C>,
    snapshot: &RouterSnapshot<R>,
) -> Result<C, RouterError> {
    let entry = snapshot
        .visible()
        .ok_or_else(|| RouterError::UnknownTab(snapshot.selected.0.clone()))?;
    registry.render(&entry.route)
}

/// Why the visible screen changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// First snapshot observed
    Initial,
    Push,
    Pop,
    /// Stack replaced, e.g. by pop-to-root
    Reset,
    TabSwitch,
}

/// Visibility change of a single screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScreenEvent<R> {
    Appeared {
        tab: TabId,
        entry: StackEntry<R>,
        transition: TransitionKind,
    },
    Disappeared {
        tab: TabId,
        entry: StackEntry<R>,
        transition: TransitionKind,
    },
}

impl<R> ScreenEvent<R> {
    pub fn label(&self) -> &'static str {
        match self {
            ScreenEvent::Appeared { .. } => "appeared",
            ScreenEvent::Disappeared { .. } => "disappeared",
        }
    }

    pub fn entry(&self) -> &StackEntry<R> {
        match self {
            ScreenEvent::Appeared { entry, .. } | ScreenEvent::Disappeared { entry, .. } => entry,
        }
    }

    pub fn transition(&self) -> TransitionKind {
        match self {
            ScreenEvent::Appeared { transition, .. }
            | ScreenEvent::Disappeared { transition, .. } => *transition,
        }
    }
}

/// Tracks the visible screen across router snapshots
#[derive(Debug, Clone)]
pub struct PresentationAdapter<R> {
    last: Option<RouterSnapshot<R>>,
}

impl<R: NavigationRoute> PresentationAdapter<R> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Feed a snapshot; returns the screens that disappeared and appeared
    pub fn observe(&mut self, snapshot: &RouterSnapshot<R>) -> Vec<ScreenEvent<R>> {
        let Some(current) = snapshot.visible().cloned() else {
            return Vec::new();
        };
        let tab = snapshot.selected.clone();

        let events = match self.last.as_ref() {
            None => vec![ScreenEvent::Appeared {
                tab,
                entry: current,
                transition: TransitionKind::Initial,
            }],
            Some(last) => match last.visible() {
                Some(previous) if previous.id == current.id => Vec::new(),
                previous => {
                    let transition = classify(last, snapshot);
                    let mut events = Vec::with_capacity(2);
                    if let Some(previous) = previous {
                        events.push(ScreenEvent::Disappeared {
                            tab: last.selected.clone(),
                            entry: previous.clone(),
                            transition,
                        });
                    }
                    events.push(ScreenEvent::Appeared {
                        tab,
                        entry: current,
                        transition,
                    });
                    events
                }
            },
        };

        for event in &events {
            tracing::debug!(
                "Screen '{}' {} ({:?})",
                event.entry().route,
                event.label(),
                event.transition()
            );
        }
        self.last = Some(snapshot.clone());
        events
    }

    /// Subscribe to a router and forward screen events to `on_event`.
    ///
    /// The router's current state is taken as the starting point, so only
    /// later changes produce events.
    pub fn attach<F>(router: &RouterHandle<R>, on_event: F) -> Subscription
    where
        F: Fn(ScreenEvent<R>) + Send + Sync + 'static,
    {
        let mut adapter = Self::new();
        adapter.observe(&router.snapshot());
        let adapter = Mutex::new(adapter);

        router.on_change(move |snapshot| {
            let events = adapter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observe(snapshot);
            for event in events {
                on_event(event);
            }
        })
    }
}

impl<R: NavigationRoute> Default for PresentationAdapter<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn classify<R: NavigationRoute>(last: &RouterSnapshot<R>, next: &RouterSnapshot<R>) -> TransitionKind {
    if last.selected != next.selected {
        return TransitionKind::TabSwitch;
    }

    let (Some(before), Some(after)) = (last.stack(&last.selected), next.stack(&next.selected)) else {
        return TransitionKind::Reset;
    };

    let shared = before
        .iter()
        .zip(after.iter())
        .take_while(|(a, b)| a.id == b.id)
        .count();

    if after.len() > before.len() && shared == before.len() {
        TransitionKind::Push
    } else if after.len() < before.len() && shared == after.len() {
        TransitionKind::Pop
    } else {
        TransitionKind::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{RouteId, TabRouter, TabRouterConfig};
    use std::sync::Arc;

    fn r(id: &str) -> RouteId {
        RouteId::from(id)
    }

    fn demo_handle() -> RouterHandle<RouteId> {
        let config = TabRouterConfig::new()
            .add_tab("first", r("root1"))
            .add_tab("second", r("root2"))
            .add_route(r("detail"));
        RouterHandle::new(TabRouter::new(config).expect("Failed to create router"))
    }

    fn kinds(events: &[ScreenEvent<RouteId>]) -> Vec<(&'static str, String, TransitionKind)> {
        events
            .iter()
            .map(|event| {
                (
                    event.label(),
                    event.entry().route.to_string(),
                    event.transition(),
                )
            })
            .collect()
    }

    #[test]
    fn test_layout_marks_only_top_interactive() {
        let entries: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| StackEntry::new(r(id)))
            .collect();

        let layout = layout_stack(&entries);
        let offsets: Vec<_> = layout.iter().map(|l| l.offset).collect();
        assert_eq!(
            offsets,
            vec![Offset::OffLeading, Offset::OffLeading, Offset::Resting]
        );
        assert_eq!(
            layout.iter().map(|l| l.interactive).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert_eq!(
            layout.iter().map(|l| l.shows_back).collect::<Vec<_>>(),
            vec![false, true, true]
        );
        assert_eq!(layout[2].z_index, 2);
    }

    #[test]
    fn test_single_entry_layout() {
        let layout = layout_stack(&[StackEntry::new(r("root"))]);
        assert_eq!(layout[0].offset, Offset::Resting);
        assert!(layout[0].interactive);
        assert!(!layout[0].shows_back);
    }

    #[test]
    fn test_render_stack_fails_fast_on_missing_renderer() {
        let registry = RendererRegistry::new().with(r("a"), |route: &RouteId| route.to_string());
        let entries = vec![StackEntry::new(r("a")), StackEntry::new(r("b"))];

        assert_eq!(
            render_stack(&registry, &entries).unwrap_err(),
            RouterError::RendererMissing("b".to_string())
        );
        let rendered = render_stack(&registry, &entries[..1]).unwrap();
        assert_eq!(rendered[0].1, "a");
    }

    #[test]
    fn test_observe_classifies_transitions() {
        let handle = demo_handle();
        let mut adapter = PresentationAdapter::new();

        let initial = adapter.observe(&handle.snapshot());
        assert_eq!(
            kinds(&initial),
            vec![("appeared", "root1".to_string(), TransitionKind::Initial)]
        );

        handle.push(r("detail")).unwrap();
        assert_eq!(
            kinds(&adapter.observe(&handle.snapshot())),
            vec![
                ("disappeared", "root1".to_string(), TransitionKind::Push),
                ("appeared", "detail".to_string(), TransitionKind::Push),
            ]
        );

        handle.switch_tab("second").unwrap();
        assert_eq!(
            kinds(&adapter.observe(&handle.snapshot())),
            vec![
                ("disappeared", "detail".to_string(), TransitionKind::TabSwitch),
                ("appeared", "root2".to_string(), TransitionKind::TabSwitch),
            ]
        );

        handle.switch_tab("first").unwrap();
        adapter.observe(&handle.snapshot());
        handle.pop();
        assert_eq!(
            kinds(&adapter.observe(&handle.snapshot())),
            vec![
                ("disappeared", "detail".to_string(), TransitionKind::Pop),
                ("appeared", "root1".to_string(), TransitionKind::Pop),
            ]
        );
    }

    #[test]
    fn test_pop_to_root_is_reported_as_reset() {
        let handle = demo_handle();
        handle.push(r("detail")).unwrap();
        let mut adapter = PresentationAdapter::new();
        adapter.observe(&handle.snapshot());

        handle.pop_to_root();
        let events = adapter.observe(&handle.snapshot());
        assert!(events
            .iter()
            .all(|event| event.transition() == TransitionKind::Reset));
    }

    #[test]
    fn test_unchanged_visible_screen_emits_nothing() {
        let handle = demo_handle();
        let mut adapter = PresentationAdapter::new();
        adapter.observe(&handle.snapshot());

        handle
            .push_to(&TabId::from("second"), r("detail"))
            .unwrap();
        assert!(adapter.observe(&handle.snapshot()).is_empty());
    }

    #[test]
    fn test_attach_forwards_events() {
        let handle = demo_handle();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _subscription = {
            let seen = Arc::clone(&seen);
            PresentationAdapter::attach(&handle, move |event| {
                seen.lock().unwrap().push(event);
            })
        };

        handle.push(r("detail")).unwrap();
        handle.push(r("detail")).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            kinds(&seen),
            vec![
                ("disappeared", "root1".to_string(), TransitionKind::Push),
                ("appeared", "detail".to_string(), TransitionKind::Push),
            ]
        );
    }
}
