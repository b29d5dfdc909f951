//! Screen load state
//!
//! A screen moves to `Loading` before a request and always leaves it when the
//! request finishes, whatever the outcome.

use serde::Serialize;

use crate::domain::result::{Notice, Result};

/// What a list screen is currently showing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Empty,
    Failed(Notice),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    /// Settle a finished request
    pub fn from_result(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ViewState::Empty,
            Ok(items) => ViewState::Loaded(items),
            Err(e) => ViewState::Failed(e.notice()),
        }
    }

    /// Enter `Loading`, run `fetch`, then settle. `on_change` sees every
    /// transition, so a renderer can show and hide its spinner.
    pub fn load(
        &mut self,
        fetch: impl FnOnce() -> Result<Vec<T>>,
        mut on_change: impl FnMut(&ViewState<T>),
    ) {
        *self = ViewState::Loading;
        on_change(&*self);
        *self = Self::from_result(fetch());
        on_change(&*self);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ViewState::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}
