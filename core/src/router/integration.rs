//! Presentation-layer integration for the router system
//!
//! This module bridges the tab router with a surface's content type: a
//! [`NavigatorBuilder`] collects tabs, routes and their renderers, and the
//! resulting [`Navigator`] drives navigation and resolves what to display.

use super::handle::{DeferredPush, RouterHandle};
use super::presentation::{render_stack, render_visible, EntryLayout};
use super::renderer::RendererRegistry;
use super::route::{NavigationRoute, TabId};
use super::tabs::{RouterResult, TabRouter, TabRouterConfig};
use crate::config::NavigationConfig;
use crate::error::{Result, RouterError};
use std::sync::Arc;

/// Builder for creating navigators with their renderers
pub struct NavigatorBuilder<R, C> {
    config: TabRouterConfig<R>,
    renderers: RendererRegistry<R, C>,
    settings: NavigationConfig,
}

impl<R: NavigationRoute, C> NavigatorBuilder<R, C> {
    /// Create a new navigator builder
    pub fn new() -> Self {
        Self {
            config: TabRouterConfig::new(),
            renderers: RendererRegistry::new(),
            settings: NavigationConfig::default(),
        }
    }

    /// Add a tab with its root route
    pub fn tab(mut self, id: impl Into<TabId>, root: R) -> Self {
        self.config = self.config.add_tab(id, root);
        self
    }

    /// Add a route with its renderer
    pub fn route<F>(mut self, route: R, renderer: F) -> Self
    where
        F: Fn(&R) -> C + Send + Sync + 'static,
    {
        self.config = self.config.add_route(route.clone());
        self.renderers.register(route, renderer);
        self
    }

    /// Set the initially selected tab
    pub fn initial_tab(mut self, id: impl Into<TabId>) -> Self {
        self.config = self.config.with_initial_tab(id);
        self
    }

    /// Apply navigation settings
    pub fn settings(mut self, settings: NavigationConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Build the navigator.
    ///
    /// Fails when a tab root or registered route has no renderer.
    pub fn build(mut self) -> Result<Navigator<R, C>> {
        self.settings.validate()?;

        if self.config.initial_tab.is_none() {
            if let Some(tab) = &self.settings.initial_tab {
                self.config.initial_tab = Some(TabId::new(tab.clone()));
            }
        }

        let router = TabRouter::new(self.config)?;
        let missing = router
            .registered_routes()
            .find(|route| !self.renderers.contains(route))
            .map(|route| route.to_string());
        if let Some(route) = missing {
            return Err(RouterError::RendererMissing(route).into());
        }

        tracing::debug!(
            "Built navigator with {} tabs and {} routes",
            router.tab_ids().count(),
            self.renderers.len()
        );

        Ok(Navigator {
            router: RouterHandle::new(router),
            renderers: Arc::new(self.renderers),
            settings: self.settings,
        })
    }
}

impl<R: NavigationRoute, C> Default for NavigatorBuilder<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A tab router paired with the renderers for its routes
pub struct Navigator<R, C> {
    router: RouterHandle<R>,
    renderers: Arc<RendererRegistry<R, C>>,
    settings: NavigationConfig,
}

impl<R, C> Clone for Navigator<R, C> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            renderers: Arc::clone(&self.renderers),
            settings: self.settings.clone(),
        }
    }
}

impl<R: NavigationRoute, C> Navigator<R, C> {
    /// Router handle for navigation control
    pub fn router(&self) -> &RouterHandle<R> {
        &self.router
    }

    pub fn renderers(&self) -> &RendererRegistry<R, C> {
        &self.renderers
    }

    pub fn settings(&self) -> &NavigationConfig {
        &self.settings
    }

    /// Switch to `tab` and push `route` there after the configured delay
    pub fn handoff(&self, tab: impl Into<TabId>, route: R) -> RouterResult<DeferredPush> {
        self.router
            .switch_tab_and_then_push(tab, route, self.settings.handoff_delay())
    }

    /// Content for the visible screen
    pub fn render_visible(&self) -> RouterResult<C> {
        render_visible(&self.renderers, &self.router.snapshot())
    }

    /// Content and layout for every entry of the selected tab
    pub fn render_active_stack(&self) -> RouterResult<Vec<(EntryLayout<R>, C)>> {
        let entries = self
            .router
            .with_router(|router| router.active_stack().entries().to_vec());
        render_stack(&self.renderers, &entries)
    }
}
