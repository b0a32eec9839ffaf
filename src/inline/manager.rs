//! Entry points feature handlers call to put screens in front of users.

use std::sync::Arc;
use teloxide::types::InlineKeyboardMarkup;

use super::action::ActionTable;
use super::error::CompileError;
use super::markup::{Markup, MarkupCompiler};
use super::messenger::{MessageHandle, Messenger, RenderTarget};
use super::paginator::{ExtraRows, PageRef, PageRequest, Screens};
use super::registry::CallbackRegistry;
use crate::utils::logging::log_markup_error;

/// Body of the current page plus its compiled keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Body text of the page.
    pub body: String,
    /// Native keyboard with fresh tokens.
    pub keyboard: InlineKeyboardMarkup,
}

/// Shared handle over the registry, the action table and the messenger.
///
/// Cheap to clone; every clone talks to the same registry.
#[derive(Clone)]
pub struct InlineManager {
    pub(super) registry: Arc<CallbackRegistry>,
    pub(super) actions: Arc<ActionTable>,
    pub(super) messenger: Arc<dyn Messenger>,
}

impl InlineManager {
    /// Manager over a registry, a messenger and the application's actions.
    pub fn new(
        registry: Arc<CallbackRegistry>,
        messenger: Arc<dyn Messenger>,
        actions: ActionTable,
    ) -> Self {
        Self {
            registry,
            actions: Arc::new(actions),
            messenger,
        }
    }

    /// Compile a keyboard, registering its callback buttons.
    pub fn compile_markup(
        &self,
        markup: impl Into<Markup>,
    ) -> Result<InlineKeyboardMarkup, CompileError> {
        MarkupCompiler::new(&self.registry).compile(markup)
    }

    /// Send or edit in a screen. A keyboard that fails to compile is left off.
    pub async fn render_screen(
        &self,
        target: impl Into<RenderTarget>,
        text: &str,
        markup: Option<Markup>,
    ) -> anyhow::Result<MessageHandle> {
        let keyboard = match markup.map(|markup| self.compile_markup(markup)) {
            Some(Ok(keyboard)) => Some(keyboard),
            Some(Err(error)) => {
                log_markup_error(&format!("sending screen without keyboard: {error}"));
                None
            }
            None => None,
        };
        self.deliver(target.into(), text, keyboard).await
    }

    /// Resolve the page to show and build its body and keyboard.
    pub fn list(
        &self,
        screens: Screens,
        current_page: Option<PageRef>,
        row_width: usize,
        extras: ExtraRows,
    ) -> anyhow::Result<RenderedPage> {
        let request = PageRequest::new(screens, current_page, row_width, extras)?;
        Ok(self.build_page(&request)?)
    }

    /// Send or edit in one page of `screens` with its navigation keyboard.
    pub async fn render_paginated(
        &self,
        target: impl Into<RenderTarget>,
        screens: Screens,
        row_width: usize,
        current_page: Option<PageRef>,
        extras: ExtraRows,
    ) -> anyhow::Result<MessageHandle> {
        let request = PageRequest::new(screens, current_page, row_width, extras)?;
        self.show_page(target.into(), &request).await
    }

    /// Compile one page of a request into body and keyboard.
    pub fn build_page(&self, request: &PageRequest) -> Result<RenderedPage, CompileError> {
        let layout = request.layout();
        let keyboard = self.compile_markup(layout.rows)?;
        Ok(RenderedPage {
            body: layout.body,
            keyboard,
        })
    }

    pub(super) async fn show_page(
        &self,
        target: RenderTarget,
        request: &PageRequest,
    ) -> anyhow::Result<MessageHandle> {
        let page = self.build_page(request)?;
        self.deliver(target, &page.body, Some(page.keyboard)).await
    }

    pub(super) async fn deliver(
        &self,
        target: RenderTarget,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> anyhow::Result<MessageHandle> {
        match target {
            RenderTarget::Chat(chat_id) => self.messenger.send_screen(chat_id, text, keyboard).await,
            RenderTarget::Message(handle) => self.messenger.edit_screen(handle, text, keyboard).await,
        }
    }
}
