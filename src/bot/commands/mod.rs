/// One-shot confirmation prompt.
pub mod confirm;
/// Paginated lesson and topic lists.
pub mod lessons;
/// Main menu and its actions.
pub mod menu;

use teloxide::utils::command::BotCommands;

use crate::inline::ActionTable;

/// Commands the bot answers to. Variant help lives in the `command` attributes.
#[allow(missing_docs)]
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "School diary bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Open the main menu")]
    Start,
    #[command(description = "Browse this week's lessons page by page")]
    Pages,
    #[command(description = "Browse subjects by name")]
    Topics,
    #[command(description = "Mark today's homework as done")]
    Confirm,
}

/// Every action a rendered button can point at.
pub fn actions() -> ActionTable {
    ActionTable::new()
        .on_async(menu::MENU, menu::show_menu)
        .on_async(menu::WEEK, menu::show_week)
        .on_blocking(menu::CLOCK, menu::server_time)
        .on_async(lessons::CLOSE, lessons::close)
        .on_async(confirm::CONFIRM, confirm::confirm)
        .on_async(confirm::CANCEL, confirm::cancel)
}
