//! Inline keyboard core: button descriptors, the callback registry, markup
//! compilation, pagination and click dispatch.
//!
//! Telegram buttons only carry a short opaque `callback_data` string. Feature
//! handlers describe buttons with [`Button`] and get back native keyboards;
//! callback buttons are stored in the [`CallbackRegistry`] under a random
//! token, and [`InlineManager::dispatch`] turns a click on that token back
//! into the bound [`Continuation`].

pub mod action;
pub mod button;
/// Time source for registry deadlines.
pub mod clock;
pub mod continuation;
/// Error types of the inline core.
pub mod error;
pub mod inbox;
pub mod manager;
pub mod markup;
pub mod messenger;
pub mod paginator;
pub mod registry;

pub use action::{ActionContext, ActionTable, Reply, Screen};
pub use button::{Button, ButtonSpec, CallbackButton, ChosenChatQuery};
pub use clock::{Clock, ManualClock, SystemClock};
pub use continuation::{ActionCall, Continuation};
pub use error::{CompileError, DescriptorError, InlineError, PaginateError};
pub use inbox::{ClickEvent, DispatchOutcome, EXPIRED_NOTICE};
pub use manager::{InlineManager, RenderedPage};
pub use markup::{Item, Markup, MarkupCompiler};
pub use messenger::{MessageHandle, Messenger, RenderTarget};
pub use paginator::{ExtraRows, PageRef, PageRequest, Screens, DEFAULT_ROW_WIDTH};
pub use registry::{CallbackRegistry, Registration, RegistryEntry};
