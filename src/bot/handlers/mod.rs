/// Callback query endpoints.
pub mod callback;
/// Command endpoints.
pub mod message;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::commands::Command;
use crate::inline::InlineManager;

/// Result every endpoint returns to the dispatcher.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Owns the inline manager and builds the update tree around it.
pub struct BotHandler {
    /// Inline manager shared by every endpoint.
    pub manager: InlineManager,
}

impl BotHandler {
    /// Wrap a manager.
    pub fn new(manager: InlineManager) -> Self {
        Self { manager }
    }

    /// Commands first, then plain data buttons, then registry tokens.
    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let manager = self.manager.clone();
        let manager_data = self.manager.clone();
        let manager_routes = self.manager.clone();
        let manager_callback = self.manager.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |msg: Message, cmd: Command| {
                        let manager = manager.clone();
                        async move { message::command_handler(msg, cmd, manager).await }
                    }),
            )
            .branch(
                Update::filter_callback_query()
                    .filter(move |q: CallbackQuery| {
                        q.data
                            .as_deref()
                            .is_some_and(|data| manager_routes.routes_data(data))
                    })
                    .endpoint(move |q: CallbackQuery| {
                        let manager = manager_data.clone();
                        async move { callback::data_handler(q, manager).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |q: CallbackQuery| {
                let manager = manager_callback.clone();
                async move { callback::callback_handler(q, manager).await }
            }))
    }
}
