use thiserror::Error;

/// A single button descriptor that cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor resolved to a visible button but carries no label.
    #[error("{variant} button is missing its text")]
    MissingText {
        /// Variant the descriptor resolved to
        variant: &'static str,
    },
    /// URL button whose target has no network location.
    #[error("invalid url {0:?}")]
    InvalidUrl(String),
    /// Web app button whose target is not an absolute URL.
    #[error("invalid web app url {0:?}")]
    InvalidWebApp(String),
    /// Explicit callback data outside Telegram's 1..=64 byte window.
    #[error("callback data must be 1..=64 bytes, got {0}")]
    CallbackDataLength(usize),
}

/// Failure of a whole markup compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A URL button failed validation; Telegram rejects the whole request for it.
    #[error("markup rejected, url button {url:?} is invalid")]
    InvalidUrl {
        /// The offending URL
        url: String,
    },
}

/// Paginator preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginateError {
    /// The collection has no pages.
    #[error("cannot paginate an empty screen collection")]
    EmptyScreens,
}

/// Errors raised while dispatching a click.
#[derive(Debug, Error)]
pub enum InlineError {
    /// No handler is registered under this name.
    #[error("no action handler registered under {0:?}")]
    UnknownAction(String),
    /// A page or edit reply needs the clicked message.
    #[error("clicked message is no longer accessible")]
    MessageUnavailable,
}
