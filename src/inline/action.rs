//! Named handlers that `Continuation::Invoke` entries call into.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::continuation::ActionCall;
use super::error::InlineError;
use super::inbox::ClickEvent;
use super::markup::Markup;

/// Text plus optional keyboard, ready to send or edit in.
#[derive(Debug, Clone)]
pub struct Screen {
    /// Message text.
    pub text: String,
    /// Keyboard, if any.
    pub markup: Option<Markup>,
}

impl Screen {
    /// Screen without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    /// Attach a keyboard.
    pub fn with_markup(mut self, markup: impl Into<Markup>) -> Self {
        self.markup = Some(markup.into());
        self
    }
}

/// What the inbox should do after an action ran.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Acknowledge the click silently.
    Nothing,
    /// Transient notice on the clicked button.
    Toast(String),
    /// Modal notice the user has to dismiss.
    Alert(String),
    /// Replace the clicked message.
    Edit(Screen),
    /// Post a new message in the same chat.
    Send(Screen),
}

/// Arguments an action runs with.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The click that triggered the action.
    pub click: ClickEvent,
    /// Positional arguments bound at render time.
    pub args: Vec<String>,
    /// Click context keys overlaid with the stored keyword arguments.
    pub kwargs: BTreeMap<String, String>,
}

impl ActionContext {
    /// Merge a click with the arguments bound at render time. Stored kwargs
    /// replace click context keys of the same name.
    pub fn new(click: ClickEvent, call: ActionCall) -> Self {
        let mut kwargs = click.context_kwargs();
        kwargs.extend(call.kwargs);
        Self {
            click,
            args: call.args,
            kwargs,
        }
    }

    /// Keyword argument by name, stored or from the click.
    pub fn kwarg(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }
}

/// Boxed future an async handler returns.
pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<Reply>> + Send>>;

/// A registered action, run either on the dispatch task or the blocking pool.
#[derive(Clone)]
pub enum ActionHandler {
    /// Awaited on the dispatch task.
    Async(Arc<dyn Fn(ActionContext) -> ActionFuture + Send + Sync>),
    /// Synchronous work, moved to the blocking pool so dispatch never stalls.
    Blocking(Arc<dyn Fn(ActionContext) -> anyhow::Result<Reply> + Send + Sync>),
}

/// Actions by name. Built once at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct ActionTable {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async handler under `name`, replacing any previous one.
    pub fn on_async<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Reply>> + Send + 'static,
    {
        let handler: Arc<dyn Fn(ActionContext) -> ActionFuture + Send + Sync> =
            Arc::new(move |ctx: ActionContext| -> ActionFuture { Box::pin(handler(ctx)) });
        self.handlers.insert(name.into(), ActionHandler::Async(handler));
        self
    }

    /// Register a synchronous handler; it runs on `spawn_blocking`.
    pub fn on_blocking<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ActionContext) -> anyhow::Result<Reply> + Send + Sync + 'static,
    {
        self.handlers
            .insert(name.into(), ActionHandler::Blocking(Arc::new(handler)));
        self
    }

    /// Whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run the handler registered for `call.action`.
    pub async fn invoke(&self, call: ActionCall, click: ClickEvent) -> anyhow::Result<Reply> {
        let handler = self
            .handlers
            .get(&call.action)
            .cloned()
            .ok_or_else(|| InlineError::UnknownAction(call.action.clone()))?;
        let ctx = ActionContext::new(click, call);

        match handler {
            ActionHandler::Async(handler) => handler(ctx).await,
            ActionHandler::Blocking(handler) => {
                tokio::task::spawn_blocking(move || handler(ctx)).await?
            }
        }
    }
}
