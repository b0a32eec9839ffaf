use chrono::Utc;
use teloxide::types::ChatId;

use crate::inline::{
    ActionCall, ActionContext, Button, CallbackButton, InlineManager, Reply, Screen,
};

/// Action names used by the menu buttons.
pub const MENU: &str = "menu";
/// Opens this week's timetable.
pub const WEEK: &str = "week";
/// Shows the server time.
pub const CLOCK: &str = "clock";

const DIARY_URL: &str = "https://school.mos.ru/diary";

/// The main menu with its keyboard.
pub fn menu_screen() -> Screen {
    Screen::text("📒 School diary\n\nPick a section below.").with_markup(vec![
        vec![Button::callback("🗓 This week", ActionCall::new(WEEK))],
        vec![CallbackButton::new("🕒 Server time", ActionCall::new(CLOCK))
            .reusable()
            .into()],
        vec![
            Button::url("🌐 Diary website", DIARY_URL),
            Button::SwitchInlineQuery {
                text: "📤 Share".to_string(),
                query: String::new(),
            },
        ],
    ])
}

/// `/start`: sends the main menu.
pub async fn handle_start(chat_id: ChatId, manager: &InlineManager) -> anyhow::Result<()> {
    let screen = menu_screen();
    manager.render_screen(chat_id, &screen.text, screen.markup).await?;
    Ok(())
}

/// Edits the clicked message back to the main menu.
pub async fn show_menu(_ctx: ActionContext) -> anyhow::Result<Reply> {
    Ok(Reply::Edit(menu_screen()))
}

/// Edits the clicked message into this week's timetable.
pub async fn show_week(_ctx: ActionContext) -> anyhow::Result<Reply> {
    let text = "🗓 This week\n\n\
        Mon: Math, Physics, History\n\
        Tue: Literature, Chemistry\n\
        Wed: Biology, Math, PE\n\
        Thu: Geography, English\n\
        Fri: Informatics, Math";
    // Stateless back button: the data names the action, so it never expires.
    Ok(Reply::Edit(Screen::text(text).with_markup(Button::data("⬅ Back", MENU))))
}

/// Reusable button; runs on the blocking pool.
pub fn server_time(_ctx: ActionContext) -> anyhow::Result<Reply> {
    Ok(Reply::Toast(format!(
        "Server time: {} UTC",
        Utc::now().format("%H:%M:%S")
    )))
}
