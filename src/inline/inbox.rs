//! Single entry point for button clicks.
//!
//! received -> lookup -> found -> invoke -> done, or
//! received -> lookup -> not found -> notify expired -> done.
//! One-shot entries are retired by the lookup itself. Nothing is retried and
//! handler errors are returned to the caller untouched.
//!
//! Plain data buttons bypass the registry: when the callback data is not a
//! pending token but names an action, [`InlineManager::dispatch_data`] runs
//! that action directly. Such buttons never expire.

use std::collections::BTreeMap;
use teloxide::types::CallbackQuery;

use super::action::Reply;
use super::continuation::{ActionCall, Continuation};
use super::error::InlineError;
use super::manager::InlineManager;
use super::messenger::{MessageHandle, RenderTarget};
use crate::utils::logging::{log_callback_dispatch, log_callback_expired};

/// Shown when a clicked button no longer has a registry entry.
pub const EXPIRED_NOTICE: &str = "This button has expired. Please run the command again.";

/// Platform-independent view of a callback query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Id used to answer the query.
    pub query_id: String,
    /// Token or raw data of the clicked button.
    pub data: Option<String>,
    /// Telegram id of the user who clicked.
    pub user_id: u64,
    /// Message the clicked keyboard is attached to, when it is still reachable.
    pub message: Option<MessageHandle>,
}

impl ClickEvent {
    /// Read the fields dispatch needs from a callback query.
    pub fn from_query(query: &CallbackQuery) -> Self {
        Self {
            query_id: query.id.clone(),
            data: query.data.clone(),
            user_id: query.from.id.0,
            message: query.message.as_ref().map(MessageHandle::of),
        }
    }

    /// Keyword arguments every action receives before its stored ones.
    pub fn context_kwargs(&self) -> BTreeMap<String, String> {
        let mut kwargs = BTreeMap::new();
        kwargs.insert("query_id".to_string(), self.query_id.clone());
        kwargs.insert("user_id".to_string(), self.user_id.to_string());
        if let Some(message) = self.message {
            kwargs.insert("chat_id".to_string(), message.chat_id.0.to_string());
            kwargs.insert("message_id".to_string(), message.message_id.0.to_string());
        }
        kwargs
    }
}

/// How a click was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The query carried no callback data.
    Ignored,
    /// No entry for the token; the user was told to retry.
    Expired {
        /// Callback data of the click
        token: String,
    },
    /// The entry ran.
    Invoked {
        /// Token of the entry
        token: String,
        /// True for one-shot entries
        retired: bool,
    },
    /// A plain data button ran the action it names.
    Routed {
        /// Action name carried as callback data
        action: String,
    },
}

impl InlineManager {
    /// True when `data` is not a pending token but names a registered action.
    pub fn routes_data(&self, data: &str) -> bool {
        !self.registry.contains(data) && self.actions.contains(data)
    }

    /// Run the action a plain data button names. The registry is not touched.
    pub async fn dispatch_data(&self, click: ClickEvent) -> anyhow::Result<DispatchOutcome> {
        let Some(action) = click.data.clone() else {
            self.messenger.answer_click(&click.query_id, None, false).await?;
            return Ok(DispatchOutcome::Ignored);
        };

        log_callback_dispatch(&action, "data", click.user_id);
        let query_id = click.query_id.clone();
        let message = click.message;
        let reply = self.actions.invoke(ActionCall::new(action.clone()), click).await?;
        self.apply_reply(&query_id, message, reply).await?;

        Ok(DispatchOutcome::Routed { action })
    }

    /// Resolve a registry token and run its continuation.
    pub async fn dispatch(&self, click: ClickEvent) -> anyhow::Result<DispatchOutcome> {
        let Some(token) = click.data.clone() else {
            self.messenger.answer_click(&click.query_id, None, false).await?;
            return Ok(DispatchOutcome::Ignored);
        };

        let Some(entry) = self.registry.claim(&token) else {
            log_callback_expired(&token, click.user_id);
            self.messenger
                .answer_click(&click.query_id, Some(EXPIRED_NOTICE), true)
                .await?;
            return Ok(DispatchOutcome::Expired { token });
        };

        log_callback_dispatch(&entry.token, &entry.label, click.user_id);
        let retired = !entry.reusable;

        match entry.continuation {
            Continuation::ShowPage(request) => {
                let message = click.message.ok_or(InlineError::MessageUnavailable)?;
                self.show_page(RenderTarget::Message(message), &request).await?;
                self.messenger.answer_click(&click.query_id, None, false).await?;
            }
            Continuation::Invoke(call) => {
                let query_id = click.query_id.clone();
                let message = click.message;
                let reply = self.actions.invoke(call, click).await?;
                self.apply_reply(&query_id, message, reply).await?;
            }
        }

        Ok(DispatchOutcome::Invoked { token, retired })
    }

    async fn apply_reply(
        &self,
        query_id: &str,
        message: Option<MessageHandle>,
        reply: Reply,
    ) -> anyhow::Result<()> {
        match reply {
            Reply::Nothing => self.messenger.answer_click(query_id, None, false).await,
            Reply::Toast(text) => self.messenger.answer_click(query_id, Some(text.as_str()), false).await,
            Reply::Alert(text) => self.messenger.answer_click(query_id, Some(text.as_str()), true).await,
            Reply::Edit(screen) => {
                let message = message.ok_or(InlineError::MessageUnavailable)?;
                self.render_screen(message, &screen.text, screen.markup).await?;
                self.messenger.answer_click(query_id, None, false).await
            }
            Reply::Send(screen) => {
                let message = message.ok_or(InlineError::MessageUnavailable)?;
                self.render_screen(message.chat_id, &screen.text, screen.markup)
                    .await?;
                self.messenger.answer_click(query_id, None, false).await
            }
        }
    }
}
