//! Router module for stack-based, multi-tab navigation
//!
//! This module provides the navigation state machine: per-tab route stacks,
//! tab selection with deferred cross-tab pushes, change notification, and the
//! glue a presentation surface needs to render and animate screens.

pub mod handle;
pub mod integration;
pub mod notify;
pub mod presentation;
pub mod renderer;
pub mod route;
pub mod stack;
pub mod stack_router;
pub mod tabs;

// Re-export commonly used types
pub use handle::{DeferredPush, RouterHandle, WeakRouterHandle};
pub use notify::{ChangeNotifier, Subscription};
pub use presentation::{
    layout_stack, render_stack, render_visible, EntryLayout, Offset, PresentationAdapter,
    ScreenEvent, TransitionKind,
};
pub use renderer::{RenderFn, RendererRegistry};
pub use route::{EntryId, NavigationRoute, RouteId, StackEntry, TabId};
pub use stack::{RouteStack, StackChange, StackSnapshot};
pub use stack_router::StackRouter;
pub use tabs::{RouterResult, RouterSnapshot, TabRouter, TabRouterConfig, TabSnapshot, TabSwitch};

// Re-export presentation integration
pub use integration::{Navigator, NavigatorBuilder};
