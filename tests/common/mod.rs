#![allow(dead_code)]

use async_trait::async_trait;
use diary_inline_bot::inline::{
    ActionTable, CallbackRegistry, ClickEvent, InlineManager, ManualClock, MessageHandle,
    Messenger,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use teloxide::types::{
    ChatId, InlineKeyboardButtonKind, InlineKeyboardMarkup, MessageId,
};

pub const CHAT: ChatId = ChatId(1001);
pub const USER: u64 = 42;

/// One outbound call observed by the recording messenger.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Send {
        handle: MessageHandle,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Edit {
        handle: MessageHandle,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Answer {
        query_id: String,
        notice: Option<String>,
        show_alert: bool,
    },
}

/// Messenger that records every call instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingMessenger {
    log: Mutex<Vec<Outbound>>,
    next_message_id: AtomicI32,
}

impl RecordingMessenger {
    pub fn calls(&self) -> Vec<Outbound> {
        self.log.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(MessageHandle, String, Option<InlineKeyboardMarkup>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Outbound::Edit { handle, text, keyboard } => Some((handle, text, keyboard)),
                _ => None,
            })
            .collect()
    }

    pub fn answers(&self) -> Vec<(String, Option<String>, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Outbound::Answer { query_id, notice, show_alert } => {
                    Some((query_id, notice, show_alert))
                }
                _ => None,
            })
            .collect()
    }

    /// Keyboard of the most recent send or edit.
    pub fn last_keyboard(&self) -> Option<InlineKeyboardMarkup> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Outbound::Send { keyboard, .. } | Outbound::Edit { keyboard, .. } => keyboard,
            Outbound::Answer { .. } => None,
        })
    }

    pub fn last_text(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Outbound::Send { text, .. } | Outbound::Edit { text, .. } => Some(text),
            Outbound::Answer { .. } => None,
        })
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_screen(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle> {
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = MessageHandle {
            chat_id,
            message_id: MessageId(id),
        };
        self.log.lock().unwrap().push(Outbound::Send {
            handle,
            text: text.to_string(),
            keyboard,
        });
        Ok(handle)
    }

    async fn edit_screen(
        &self,
        target: MessageHandle,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle> {
        self.log.lock().unwrap().push(Outbound::Edit {
            handle: target,
            text: text.to_string(),
            keyboard,
        });
        Ok(target)
    }

    async fn answer_click(
        &self,
        query_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> anyhow::Result<()> {
        self.log.lock().unwrap().push(Outbound::Answer {
            query_id: query_id.to_string(),
            notice: notice.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub registry: Arc<CallbackRegistry>,
    pub messenger: Arc<RecordingMessenger>,
    pub manager: InlineManager,
}

pub fn harness(actions: ActionTable) -> Harness {
    let clock = Arc::new(ManualClock::default());
    let registry = Arc::new(CallbackRegistry::with_clock(
        clock.clone(),
        chrono::Duration::minutes(20),
    ));
    let messenger = Arc::new(RecordingMessenger::default());
    let manager = InlineManager::new(registry.clone(), messenger.clone(), actions);
    Harness {
        clock,
        registry,
        messenger,
        manager,
    }
}

/// Button labels row by row.
pub fn labels(keyboard: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    keyboard
        .inline_keyboard
        .iter()
        .map(|row| row.iter().map(|button| button.text.clone()).collect())
        .collect()
}

/// Callback data of the first button with the given label.
pub fn callback_data(keyboard: &InlineKeyboardMarkup, label: &str) -> String {
    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .find(|button| button.text == label)
        .and_then(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no callback button labelled {label:?}"))
}

pub fn click(query_id: &str, data: &str, message: Option<MessageHandle>) -> ClickEvent {
    ClickEvent {
        query_id: query_id.to_string(),
        data: Some(data.to_string()),
        user_id: USER,
        message,
    }
}
