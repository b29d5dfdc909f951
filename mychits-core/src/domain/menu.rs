//! Side-menu items
//!
//! A menu item either runs an action, navigates to a route, or opens an
//! external link. Dispatch matches on the variant.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use url::Url;

use super::result::Result;
use crate::state::NetworkGate;

/// What a menu item does when pressed
#[derive(Clone)]
pub enum MenuAction {
    /// Run a closure (e.g., open the share sheet, log out)
    Action(Arc<dyn Fn() + Send + Sync>),
    /// Push a route with parameters
    Navigate {
        route: String,
        params: Map<String, JsonValue>,
    },
    /// Open an outbound link; requires connectivity
    OpenLink(Url),
}

impl MenuAction {
    pub fn action(f: impl Fn() + Send + Sync + 'static) -> Self {
        MenuAction::Action(Arc::new(f))
    }

    pub fn navigate(route: impl Into<String>) -> Self {
        MenuAction::Navigate {
            route: route.into(),
            params: Map::new(),
        }
    }

    pub fn with_param(self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        match self {
            MenuAction::Navigate { route, mut params } => {
                params.insert(key.into(), value.into());
                MenuAction::Navigate { route, params }
            }
            other => other,
        }
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Action(_) => f.write_str("Action(..)"),
            MenuAction::Navigate { route, params } => f
                .debug_struct("Navigate")
                .field("route", route)
                .field("params", params)
                .finish(),
            MenuAction::OpenLink(url) => f.debug_tuple("OpenLink").field(&url.as_str()).finish(),
        }
    }
}

/// Where navigation and link requests go
pub trait Navigator {
    fn navigate(&mut self, route: &str, params: &Map<String, JsonValue>);
    fn open_link(&mut self, url: &Url);
}

/// One entry in the side menu
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub title: String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, action: MenuAction) -> Self {
        Self {
            title: title.into(),
            action,
        }
    }

    /// Run this item's action. Link opening is checked against the latest
    /// connectivity snapshot at press time.
    pub fn activate(&self, navigator: &mut dyn Navigator, gate: &NetworkGate) -> Result<()> {
        match &self.action {
            MenuAction::Action(f) => f(),
            MenuAction::Navigate { route, params } => navigator.navigate(route, params),
            MenuAction::OpenLink(url) => {
                gate.check()?;
                navigator.open_link(url);
            }
        }
        Ok(())
    }
}
