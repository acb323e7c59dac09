//! In-process navigation surface.
//!
//! The funnel consumes the environment's location through three operations
//! only: read the current path, request a navigation, and subscribe to
//! change notifications. Test identity is the single slug-addressable
//! resource; everything else maps to the home screen.

use tokio::sync::watch;

use crate::models::TestKind;

/// Where a location string points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Test(TestKind),
    Unknown,
}

impl Route {
    /// Parse a path such as "/", "/carreira" or "/whatever".
    pub fn parse(path: &str) -> Self {
        let slug = path.trim_start_matches('/');
        if slug.is_empty() {
            return Route::Home;
        }
        match TestKind::from_slug(slug) {
            Some(kind) => Route::Test(kind),
            None => Route::Unknown,
        }
    }
}

/// Single mutable location plus push notifications for its changes.
#[derive(Clone)]
pub struct Router {
    path: watch::Sender<String>,
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Self {
            path: watch::Sender::new(normalize(initial)),
        }
    }

    pub fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    /// Point the location at `path` and notify subscribers.
    pub fn navigate(&self, path: &str) {
        self.path.send_replace(normalize(path));
    }

    /// Change notifications. The receiver also exposes the latest path.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.path.subscribe()
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
