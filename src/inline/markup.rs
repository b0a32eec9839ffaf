//! Compiles button descriptors into Telegram inline keyboards.
//!
//! Callback buttons are registered in the [`CallbackRegistry`] as a side
//! effect. Registrations are only committed once the whole keyboard compiled,
//! so a rejected markup leaves no orphaned entries behind.

use chrono::Duration;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, WebAppInfo,
};

use super::button::{Button, ButtonSpec, CallbackButton};
use super::error::{CompileError, DescriptorError};
use super::registry::{generate_token, CallbackRegistry, Registration};
use crate::utils::logging::log_markup_error;
use crate::utils::validation::{
    mention_url, validate_button_url, validate_callback_data, validate_web_app_url,
};

/// One cell of a keyboard grid.
#[derive(Debug, Clone)]
pub enum Item {
    /// Typed descriptor.
    Button(Button),
    /// Literal form, resolved at compile time.
    Spec(ButtonSpec),
    /// Already native, passed through untouched.
    Native(InlineKeyboardButton),
}

impl From<Button> for Item {
    fn from(button: Button) -> Self {
        Item::Button(button)
    }
}

impl From<CallbackButton> for Item {
    fn from(callback: CallbackButton) -> Self {
        Item::Button(callback.into())
    }
}

impl From<ButtonSpec> for Item {
    fn from(spec: ButtonSpec) -> Self {
        Item::Spec(spec)
    }
}

impl From<InlineKeyboardButton> for Item {
    fn from(native: InlineKeyboardButton) -> Self {
        Item::Native(native)
    }
}

/// Keyboard input in any of the shapes callers write.
///
/// A single item becomes a 1x1 grid and a flat list becomes one row.
#[derive(Debug, Clone)]
pub enum Markup {
    /// Whole native keyboard, passed through.
    Native(InlineKeyboardMarkup),
    /// One button.
    Single(Item),
    /// One row.
    Row(Vec<Item>),
    /// Rows of buttons.
    Grid(Vec<Vec<Item>>),
}

impl Markup {
    fn into_grid(self) -> Result<Vec<Vec<Item>>, InlineKeyboardMarkup> {
        match self {
            Markup::Native(keyboard) => Err(keyboard),
            Markup::Single(item) => Ok(vec![vec![item]]),
            Markup::Row(row) => Ok(vec![row]),
            Markup::Grid(grid) => Ok(grid),
        }
    }
}

impl From<InlineKeyboardMarkup> for Markup {
    fn from(keyboard: InlineKeyboardMarkup) -> Self {
        Markup::Native(keyboard)
    }
}

impl From<Item> for Markup {
    fn from(item: Item) -> Self {
        Markup::Single(item)
    }
}

impl From<Button> for Markup {
    fn from(button: Button) -> Self {
        Markup::Single(button.into())
    }
}

impl From<CallbackButton> for Markup {
    fn from(callback: CallbackButton) -> Self {
        Markup::Single(callback.into())
    }
}

impl From<ButtonSpec> for Markup {
    fn from(spec: ButtonSpec) -> Self {
        Markup::Single(spec.into())
    }
}

macro_rules! impl_markup_from_vecs {
    ($($item:ty),*) => {$(
        impl From<Vec<$item>> for Markup {
            fn from(row: Vec<$item>) -> Self {
                Markup::Row(row.into_iter().map(Into::into).collect())
            }
        }

        impl From<Vec<Vec<$item>>> for Markup {
            fn from(grid: Vec<Vec<$item>>) -> Self {
                Markup::Grid(
                    grid.into_iter()
                        .map(|row| row.into_iter().map(Into::into).collect())
                        .collect(),
                )
            }
        }
    )*};
}

impl_markup_from_vecs!(Item, Button, ButtonSpec, InlineKeyboardButton);

/// Turns [`Markup`] into a native keyboard, staging registrations until the whole grid compiled.
pub struct MarkupCompiler<'a> {
    registry: &'a CallbackRegistry,
    default_label: Option<&'a str>,
}

impl<'a> MarkupCompiler<'a> {
    /// Compiler writing into `registry`.
    pub fn new(registry: &'a CallbackRegistry) -> Self {
        Self {
            registry,
            default_label: None,
        }
    }

    /// Label for callback entries that do not name one.
    pub fn with_default_label(mut self, label: &'a str) -> Self {
        self.default_label = Some(label);
        self
    }

    /// Compile a keyboard.
    ///
    /// A malformed descriptor drops its row. An invalid URL button rejects
    /// the whole markup.
    pub fn compile(&self, markup: impl Into<Markup>) -> Result<InlineKeyboardMarkup, CompileError> {
        let grid = match markup.into().into_grid() {
            Ok(grid) => grid,
            Err(native) => return Ok(native),
        };

        let mut keyboard = Vec::with_capacity(grid.len());
        let mut pending = Vec::new();

        for (index, row) in grid.into_iter().enumerate() {
            match self.compile_row(row) {
                Ok((buttons, registrations)) => {
                    if !buttons.is_empty() {
                        keyboard.push(buttons);
                        pending.extend(registrations);
                    }
                }
                Err(DescriptorError::InvalidUrl(url)) => {
                    log_markup_error(&format!("markup rejected, invalid url {url:?}"));
                    return Err(CompileError::InvalidUrl { url });
                }
                Err(error) => log_markup_error(&format!("row {index} dropped: {error}")),
            }
        }

        for registration in pending {
            self.registry.register(registration);
        }
        Ok(InlineKeyboardMarkup::new(keyboard))
    }

    /// Compile one row. The whole row is scanned even after a malformed cell so
    /// that a later invalid URL still aborts the markup.
    fn compile_row(
        &self,
        row: Vec<Item>,
    ) -> Result<(Vec<InlineKeyboardButton>, Vec<Registration>), DescriptorError> {
        let mut buttons = Vec::with_capacity(row.len());
        let mut registrations = Vec::new();
        let mut malformed = None;

        for item in row {
            let compiled = match item {
                Item::Native(native) => Ok(Some((native, None))),
                Item::Button(button) => self.compile_button(button).map(Some),
                Item::Spec(spec) => match spec.resolve() {
                    Ok(Some(button)) => self.compile_button(button).map(Some),
                    Ok(None) => Ok(None),
                    Err(error) => Err(error),
                },
            };

            match compiled {
                Ok(Some((native, registration))) => {
                    buttons.push(native);
                    registrations.extend(registration);
                }
                Ok(None) => {}
                Err(error @ DescriptorError::InvalidUrl(_)) => return Err(error),
                Err(error) => {
                    malformed.get_or_insert(error);
                }
            }
        }

        match malformed {
            Some(error) => Err(error),
            None => Ok((buttons, registrations)),
        }
    }

    fn compile_button(
        &self,
        button: Button,
    ) -> Result<(InlineKeyboardButton, Option<Registration>), DescriptorError> {
        if button.text().is_empty() {
            return Err(DescriptorError::MissingText {
                variant: button.variant_name(),
            });
        }

        let native = match button {
            Button::Url { text, url } => InlineKeyboardButton::url(text, validate_button_url(&url)?),
            Button::Callback(callback) => return self.compile_callback(callback),
            Button::Mention { text, user_id } => {
                InlineKeyboardButton::url(text, mention_url(user_id)?)
            }
            Button::SwitchInlineQueryCurrentChat { text, query } => {
                InlineKeyboardButton::switch_inline_query_current_chat(text, query)
            }
            Button::SwitchInlineQuery { text, query } => {
                InlineKeyboardButton::switch_inline_query(text, query)
            }
            // teloxide 0.12 has no chosen-chat kind; the chat filters are not sent.
            Button::SwitchInlineQueryChosenChat { text, chosen } => {
                InlineKeyboardButton::switch_inline_query(text, chosen.query)
            }
            Button::WebApp { text, url } => InlineKeyboardButton::new(
                text,
                InlineKeyboardButtonKind::WebApp(WebAppInfo {
                    url: validate_web_app_url(&url)?,
                }),
            ),
            Button::Data {
                text,
                callback_data,
            } => {
                validate_callback_data(&callback_data)?;
                InlineKeyboardButton::callback(text, callback_data)
            }
        };
        Ok((native, None))
    }

    fn compile_callback(
        &self,
        callback: CallbackButton,
    ) -> Result<(InlineKeyboardButton, Option<Registration>), DescriptorError> {
        let token = match callback.token {
            Some(token) => {
                validate_callback_data(&token)?;
                token
            }
            None => generate_token(),
        };

        let delete_time = if callback.disable_deadline {
            None
        } else {
            Some(self.registry.deadline(callback.ttl_seconds.map(Duration::seconds)))
        };

        let label = callback.label.unwrap_or_else(|| match self.default_label {
            Some(label) => label.to_string(),
            None => callback.continuation.describe(),
        });

        let registration = Registration::new(label, callback.continuation)
            .token(token.clone())
            .reusable(callback.reusable)
            .delete_time(delete_time);

        Ok((
            InlineKeyboardButton::callback(callback.text, token),
            Some(registration),
        ))
    }
}
