//! Route definitions and utilities
//!
//! This module defines the identity types the router stores: route keys,
//! tab keys, and the stack entries that wrap a route with a per-push id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use uuid::Uuid;

/// A key naming a screen, independent of when it was pushed.
///
/// Equality is by key only: two pushes of the same kind of screen are the same
/// route for duplicate suppression, even if the caller would render them with
/// different parameters.
pub trait NavigationRoute: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> NavigationRoute for T where
    T: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// String-keyed route identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteId(pub String);

impl RouteId {
    /// Create a new route ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of an independent navigation context
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub String);

impl TabId {
    /// Create a new tab ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for TabId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Process-unique id of one pushed occurrence of a route. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A route together with the id assigned when it was pushed
#[derive(Debug, Clone, Serialize)]
pub struct StackEntry<R> {
    /// Unique id of this occurrence
    pub id: EntryId,
    /// The route this entry shows
    pub route: R,
    /// When the entry was pushed
    pub pushed_at: DateTime<Utc>,
}

impl<R: NavigationRoute> StackEntry<R> {
    /// Wrap a route with a fresh entry id
    pub fn new(route: R) -> Self {
        Self {
            id: EntryId::new(),
            route,
            pushed_at: Utc::now(),
        }
    }
}

// Two entries are equal only when they are the same occurrence of the same route.
impl<R: PartialEq> PartialEq for StackEntry<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.route == other.route
    }
}

impl<R: Eq> Eq for StackEntry<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_traits() {
        let route_id = RouteId::from("first-detail");
        assert_eq!(format!("{}", route_id), "first-detail");

        let s: &str = route_id.as_ref();
        assert_eq!(s, "first-detail");

        let s: &str = route_id.borrow();
        assert_eq!(s, "first-detail");
        assert_eq!(route_id, RouteId::new(String::from("first-detail")));
    }

    #[test]
    fn test_display_honours_width_and_alignment() {
        assert_eq!(format!("[{:<8}]", RouteId::from("first")), "[first   ]");
        assert_eq!(format!("[{:>8}]", TabId::from("second")), "[  second]");
    }

    #[test]
    fn test_entries_for_same_route_are_distinct() {
        let a = StackEntry::new(RouteId::from("first"));
        let b = StackEntry::new(RouteId::from("first"));

        assert_eq!(a.route, b.route);
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_entry_serializes_route_and_id() {
        let entry = StackEntry::new(RouteId::from("second"));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["route"], "second");
        assert_eq!(value["id"], entry.id.to_string());
    }
}
