//! Outbound calls to the messaging platform.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, Message, MessageId};

/// A message that can later be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    /// Chat the message lives in.
    pub chat_id: ChatId,
    /// Message id within the chat.
    pub message_id: MessageId,
}

impl MessageHandle {
    /// Handle of a message returned by the Bot API.
    pub fn of(message: &Message) -> Self {
        Self {
            chat_id: message.chat.id,
            message_id: message.id,
        }
    }
}

/// Where a screen goes: a new message in a chat, or over an existing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Send a new message.
    Chat(ChatId),
    /// Edit the message in place.
    Message(MessageHandle),
}

impl From<ChatId> for RenderTarget {
    fn from(chat_id: ChatId) -> Self {
        RenderTarget::Chat(chat_id)
    }
}

impl From<MessageHandle> for RenderTarget {
    fn from(handle: MessageHandle) -> Self {
        RenderTarget::Message(handle)
    }
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a new message and return its handle.
    async fn send_screen(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle>;

    /// Replace text and keyboard of an existing message.
    async fn edit_screen(
        &self,
        target: MessageHandle,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle>;

    /// Acknowledge a button click, optionally with a notice.
    async fn answer_click(
        &self,
        query_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl Messenger for Bot {
    async fn send_screen(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle> {
        let mut request = self.send_message(chat_id, text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        let message = request.await?;
        Ok(MessageHandle::of(&message))
    }

    async fn edit_screen(
        &self,
        target: MessageHandle,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle> {
        let mut request = self.edit_message_text(target.chat_id, target.message_id, text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        let message = request.await?;
        Ok(MessageHandle::of(&message))
    }

    async fn answer_click(
        &self,
        query_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> anyhow::Result<()> {
        let mut request = self.answer_callback_query(query_id);
        if let Some(notice) = notice {
            request = request.text(notice).show_alert(show_alert);
        }
        request.await?;
        Ok(())
    }
}
