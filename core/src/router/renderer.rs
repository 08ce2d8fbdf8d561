//! Route renderer binding
//!
//! Maps a route to the content a presentation surface shows for it. The
//! router never builds content itself; it hands identities to this registry
//! when the surface asks what to display for an entry.

use super::route::NavigationRoute;
use crate::error::RouterError;
use std::collections::HashMap;

/// Type alias for route render functions
pub type RenderFn<R, C> = Box<dyn Fn(&R) -> C + Send + Sync>;

/// Registry of render functions keyed by route
pub struct RendererRegistry<R, C> {
    renderers: HashMap<R, RenderFn<R, C>>,
}

impl<R: NavigationRoute, C> RendererRegistry<R, C> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register the renderer for a route, replacing any previous one
    pub fn register<F>(&mut self, route: R, render: F)
    where
        F: Fn(&R) -> C + Send + Sync + 'static,
    {
        if self.renderers.insert(route.clone(), Box::new(render)).is_some() {
            tracing::debug!("Replaced renderer for '{}'", route);
        }
    }

    /// Builder-style `register`
    pub fn with<F>(mut self, route: R, render: F) -> Self
    where
        F: Fn(&R) -> C + Send + Sync + 'static,
    {
        self.register(route, render);
        self
    }

    /// Produce content for a route; a missing binding is an error
    pub fn render(&self, route: &R) -> Result<C, RouterError> {
        match self.renderers.get(route) {
            Some(render) => Ok(render(route)),
            None => {
                tracing::warn!("No renderer registered for '{}'", route);
                Err(RouterError::RendererMissing(route.to_string()))
            }
        }
    }

    pub fn contains(&self, route: &R) -> bool {
        self.renderers.contains_key(route)
    }

    /// Routes that have a renderer
    pub fn routes(&self) -> impl Iterator<Item = &R> {
        self.renderers.keys()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl<R: NavigationRoute, C> Default for RendererRegistry<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: NavigationRoute, C> std::fmt::Debug for RendererRegistry<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("routes", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteId;

    #[test]
    fn test_render_registered_route() {
        let registry = RendererRegistry::new()
            .with(RouteId::from("home"), |route: &RouteId| format!("<{}>", route))
            .with(RouteId::from("about"), |_: &RouteId| "About".to_string());

        assert_eq!(registry.render(&RouteId::from("home")).unwrap(), "<home>");
        assert_eq!(registry.render(&RouteId::from("about")).unwrap(), "About");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_missing_renderer_fails_fast() {
        let registry: RendererRegistry<RouteId, String> = RendererRegistry::new();
        assert_eq!(
            registry.render(&RouteId::from("ghost")).unwrap_err(),
            RouterError::RendererMissing("ghost".to_string())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_previous_renderer() {
        let mut registry = RendererRegistry::new();
        registry.register(RouteId::from("home"), |_: &RouteId| 1);
        registry.register(RouteId::from("home"), |_: &RouteId| 2);

        assert_eq!(registry.render(&RouteId::from("home")).unwrap(), 2);
        assert_eq!(registry.len(), 1);
    }
}
