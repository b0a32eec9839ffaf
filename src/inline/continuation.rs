//! What a callback button does when it is clicked.
//!
//! Registry entries store plain data instead of live closures: either a
//! paginator page to rebuild or a named action with its bound arguments.
//! Both are cloneable and serializable, so a pending entry can be logged or
//! inspected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::paginator::PageRequest;

/// Work bound to a callback token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Continuation {
    /// Rebuild and show one page of a paginated list.
    ShowPage(PageRequest),
    /// Run an application action by name.
    Invoke(ActionCall),
}

impl Continuation {
    /// Short name used in logs and as the default registry label.
    pub fn describe(&self) -> String {
        match self {
            Continuation::ShowPage(request) => format!("page {}", request.page()),
            Continuation::Invoke(call) => format!("action {}", call.action),
        }
    }
}

impl From<ActionCall> for Continuation {
    fn from(call: ActionCall) -> Self {
        Continuation::Invoke(call)
    }
}

impl From<PageRequest> for Continuation {
    fn from(request: PageRequest) -> Self {
        Continuation::ShowPage(request)
    }
}

/// A named action plus the positional and keyword arguments bound at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCall {
    /// Name in the [`ActionTable`](super::ActionTable).
    pub action: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Keyword arguments; they win over click context keys.
    #[serde(default)]
    pub kwargs: BTreeMap<String, String>,
}

impl ActionCall {
    /// Call of `action` with no arguments.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Bind a keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}
