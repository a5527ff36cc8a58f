//! Route definitions and utilities
//!
//! This module defines the route path type and the table mapping
//! paths to the views that render them.

use super::view::View;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A navigable path such as `/dashboard` or `/calendar?day=3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(pub String);

impl RoutePath {
    /// Create a new route path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part of the path used for route lookup, without query or fragment
    pub fn route_key(&self) -> &str {
        let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoutePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoutePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&RoutePath> for RoutePath {
    fn from(path: &RoutePath) -> Self {
        path.clone()
    }
}

impl PartialEq<str> for RoutePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Mapping from route key to the view rendering it
#[derive(Default, Clone)]
pub struct RouteTable {
    views: HashMap<String, Arc<dyn View>>,
}

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a view, returning the one it replaced
    pub fn insert(&mut self, path: &RoutePath, view: Arc<dyn View>) -> Option<Arc<dyn View>> {
        self.views.insert(path.route_key().to_string(), view)
    }

    /// Find the view for a path, ignoring query and fragment
    pub fn resolve(&self, path: &RoutePath) -> Option<Arc<dyn View>> {
        self.views.get(path.route_key()).cloned()
    }

    pub fn contains(&self, path: &RoutePath) -> bool {
        self.views.contains_key(path.route_key())
    }

    /// Registered route keys, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.views.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("paths", &self.paths())
            .finish()
    }
}
