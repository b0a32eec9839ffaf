use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::HandlerResult;
use crate::bot::commands::{confirm, lessons, menu, Command};
use crate::inline::InlineManager;
use crate::utils::logging::{log_command_error, log_command_start};

/// Route a parsed command to its screen.
pub async fn command_handler(msg: Message, cmd: Command, manager: InlineManager) -> HandlerResult {
    let chat_id = msg.chat.id;
    let user_id = msg.from().map(|u| u.id.0).unwrap_or(0);
    let username = msg.from().and_then(|u| u.username.as_deref()).unwrap_or("unknown");
    let name = format!("{cmd:?}").to_lowercase();
    log_command_start(&name, username, user_id, chat_id.0);

    let result = match cmd {
        Command::Help => manager
            .render_screen(chat_id, &Command::descriptions().to_string(), None)
            .await
            .map(|_| ()),
        Command::Start => menu::handle_start(chat_id, &manager).await,
        Command::Pages => lessons::handle_pages(chat_id, &manager).await,
        Command::Topics => lessons::handle_topics(chat_id, &manager).await,
        Command::Confirm => confirm::handle_confirm(chat_id, &manager).await,
    };

    if let Err(e) = &result {
        log_command_error(&name, user_id, chat_id.0, &e.to_string());
    }
    result.map_err(Into::into)
}
