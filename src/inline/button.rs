//! Button descriptors.
//!
//! [`Button`] is the typed form a feature handler builds. [`ButtonSpec`] is the
//! loose literal form (every field optional, deserializable from JSON) that is
//! resolved into a [`Button`] by field presence, in a fixed priority order.

use serde::{Deserialize, Serialize};

use super::continuation::Continuation;
use super::error::DescriptorError;

/// Targets of a "choose a chat, then switch inline" button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChosenChatQuery {
    /// Query inserted into the input field.
    pub query: String,
    /// Allow private chats with users.
    pub allow_user_chats: bool,
    /// Allow private chats with bots.
    pub allow_bot_chats: bool,
    /// Allow groups and supergroups.
    pub allow_group_chats: bool,
    /// Allow channels.
    pub allow_channel_chats: bool,
}

/// A button wired to a registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackButton {
    /// Label shown on the button.
    pub text: String,
    /// What a click runs.
    pub continuation: Continuation,
    /// Explicit callback data; a random token is generated when absent.
    pub token: Option<String>,
    /// Diagnostic label stored with the registry entry.
    pub label: Option<String>,
    /// Survive clicks; only the deadline retires the entry.
    pub reusable: bool,
    /// Never expire; the entry lives until clicked.
    pub disable_deadline: bool,
    /// Overrides the registry's default time-to-live.
    pub ttl_seconds: Option<i64>,
}

impl CallbackButton {
    /// One-shot button with the default lifetime.
    pub fn new(text: impl Into<String>, continuation: impl Into<Continuation>) -> Self {
        Self {
            text: text.into(),
            continuation: continuation.into(),
            token: None,
            label: None,
            reusable: false,
            disable_deadline: false,
            ttl_seconds: None,
        }
    }

    /// Pin the callback data instead of generating a token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Diagnostic label for the registry entry.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Lifetime for this button only.
    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl_seconds = Some(ttl.num_seconds());
        self
    }

    /// Keep the entry after it has been clicked.
    pub fn reusable(mut self) -> Self {
        self.reusable = true;
        self
    }

    /// Exempt the entry from the expiry sweeper.
    pub fn without_deadline(mut self) -> Self {
        self.disable_deadline = true;
        self
    }
}

/// One clickable button, independent of the platform's native button type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Opens a link.
    Url {
        /// Label
        text: String,
        /// Absolute link with a host
        url: String,
    },
    /// Bound to a registry entry.
    Callback(CallbackButton),
    /// Opens a user profile through a `tg://user` link.
    Mention {
        /// Label
        text: String,
        /// Telegram user id
        user_id: u64,
    },
    /// Starts an inline query in the current chat.
    SwitchInlineQueryCurrentChat {
        /// Label
        text: String,
        /// Query put in the input field
        query: String,
    },
    /// Starts an inline query in a chat the user picks.
    SwitchInlineQuery {
        /// Label
        text: String,
        /// Query put in the input field
        query: String,
    },
    /// Like `SwitchInlineQuery`, limited to some chat kinds.
    SwitchInlineQueryChosenChat {
        /// Label
        text: String,
        /// Query and the chat kinds offered
        chosen: ChosenChatQuery,
    },
    /// Opens a web app over https.
    WebApp {
        /// Label
        text: String,
        /// Web app address
        url: String,
    },
    /// Raw callback data, no registry entry.
    Data {
        /// Label
        text: String,
        /// Sent back verbatim on click
        callback_data: String,
    },
}

impl Button {
    /// Link button.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Url {
            text: text.into(),
            url: url.into(),
        }
    }

    /// One-shot callback button.
    pub fn callback(text: impl Into<String>, continuation: impl Into<Continuation>) -> Self {
        Button::Callback(CallbackButton::new(text, continuation))
    }

    /// Plain data button; the data is sent back verbatim on click.
    pub fn data(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Button::Data {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }

    /// Mention button for `user_id`.
    pub fn mention(text: impl Into<String>, user_id: u64) -> Self {
        Button::Mention {
            text: text.into(),
            user_id,
        }
    }

    /// Web app button; the url must be https.
    pub fn web_app(text: impl Into<String>, url: impl Into<String>) -> Self {
        Button::WebApp {
            text: text.into(),
            url: url.into(),
        }
    }

    /// Label shown on the button.
    pub fn text(&self) -> &str {
        match self {
            Button::Url { text, .. }
            | Button::Mention { text, .. }
            | Button::SwitchInlineQueryCurrentChat { text, .. }
            | Button::SwitchInlineQuery { text, .. }
            | Button::SwitchInlineQueryChosenChat { text, .. }
            | Button::WebApp { text, .. }
            | Button::Data { text, .. } => text,
            Button::Callback(callback) => &callback.text,
        }
    }

    /// Kind name used in log lines.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Button::Url { .. } => "url",
            Button::Callback(_) => "callback",
            Button::Mention { .. } => "mention",
            Button::SwitchInlineQueryCurrentChat { .. } => "switch_inline_query_current_chat",
            Button::SwitchInlineQuery { .. } => "switch_inline_query",
            Button::SwitchInlineQueryChosenChat { .. } => "switch_inline_query_chosen_chat",
            Button::WebApp { .. } => "web_app",
            Button::Data { .. } => "callback_data",
        }
    }
}

impl From<CallbackButton> for Button {
    fn from(callback: CallbackButton) -> Self {
        Button::Callback(callback)
    }
}

/// Literal button description keyed by field presence.
///
/// A spec may carry several destination fields at once (a callback spec also
/// carries its `callback_data` token). [`ButtonSpec::resolve`] picks the first
/// present field in this order: `url`, `callback`, `user_id`,
/// `switch_inline_query_current_chat`, `switch_inline_query`,
/// `switch_inline_query_chosen_chat`, `web_app`, `callback_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSpec {
    /// Button label; a callback button without one is malformed.
    pub text: Option<String>,
    /// Link target.
    pub url: Option<String>,
    /// Continuation for a callback button.
    pub callback: Option<Continuation>,
    /// Mention target.
    pub user_id: Option<u64>,
    /// Inline query for the current chat.
    pub switch_inline_query_current_chat: Option<String>,
    /// Inline query for a chat the user picks.
    pub switch_inline_query: Option<String>,
    /// Chosen-chat inline query.
    pub switch_inline_query_chosen_chat: Option<ChosenChatQuery>,
    /// Web app url.
    pub web_app: Option<String>,
    /// Token for `callback`, raw data otherwise.
    pub callback_data: Option<String>,
    /// Registry label.
    pub label: Option<String>,
    /// Keep the entry after clicks.
    pub reusable: bool,
    /// Never expire the entry.
    pub disable_deadline: bool,
    /// Lifetime override in seconds.
    pub ttl_seconds: Option<i64>,
}

impl ButtonSpec {
    /// Resolve into a typed button. `Ok(None)` means a spacer.
    pub fn resolve(&self) -> Result<Option<Button>, DescriptorError> {
        let text = |variant: &'static str| {
            self.text
                .clone()
                .filter(|text| !text.is_empty())
                .ok_or(DescriptorError::MissingText { variant })
        };

        if let Some(url) = &self.url {
            return Ok(Some(Button::Url {
                text: text("url")?,
                url: url.clone(),
            }));
        }
        if let Some(continuation) = &self.callback {
            return Ok(Some(Button::Callback(CallbackButton {
                text: text("callback")?,
                continuation: continuation.clone(),
                token: self.callback_data.clone(),
                label: self.label.clone(),
                reusable: self.reusable,
                disable_deadline: self.disable_deadline,
                ttl_seconds: self.ttl_seconds,
            })));
        }
        if let Some(user_id) = self.user_id {
            return Ok(Some(Button::Mention {
                text: text("mention")?,
                user_id,
            }));
        }
        if let Some(query) = &self.switch_inline_query_current_chat {
            return Ok(Some(Button::SwitchInlineQueryCurrentChat {
                text: text("switch_inline_query_current_chat")?,
                query: query.clone(),
            }));
        }
        if let Some(query) = &self.switch_inline_query {
            return Ok(Some(Button::SwitchInlineQuery {
                text: text("switch_inline_query")?,
                query: query.clone(),
            }));
        }
        if let Some(chosen) = &self.switch_inline_query_chosen_chat {
            return Ok(Some(Button::SwitchInlineQueryChosenChat {
                text: text("switch_inline_query_chosen_chat")?,
                chosen: chosen.clone(),
            }));
        }
        if let Some(url) = &self.web_app {
            return Ok(Some(Button::WebApp {
                text: text("web_app")?,
                url: url.clone(),
            }));
        }
        if let Some(callback_data) = &self.callback_data {
            return Ok(Some(Button::Data {
                text: text("callback_data")?,
                callback_data: callback_data.clone(),
            }));
        }
        Ok(None)
    }
}
