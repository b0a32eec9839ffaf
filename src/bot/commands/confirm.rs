use teloxide::types::ChatId;

use crate::inline::{ActionCall, ActionContext, Button, InlineManager, Reply, Screen};

/// Action behind "Done".
pub const CONFIRM: &str = "confirm";
/// Action behind "Not yet".
pub const CANCEL: &str = "cancel";

/// One-shot yes/no prompt. Both buttons are retired by the first click on
/// either, and the second one simply reports that it expired.
pub async fn handle_confirm(chat_id: ChatId, manager: &InlineManager) -> anyhow::Result<()> {
    let subject = "today's homework";
    let markup = vec![
        Button::callback("✅ Done", ActionCall::new(CONFIRM).kwarg("subject", subject)),
        Button::callback("❌ Not yet", ActionCall::new(CANCEL)),
    ];
    manager
        .render_screen(chat_id, &format!("Mark {subject} as done?"), Some(markup.into()))
        .await?;
    Ok(())
}

/// Reads the `subject` kwarg bound at render time.
pub async fn confirm(ctx: ActionContext) -> anyhow::Result<Reply> {
    let subject = ctx.kwarg("subject").unwrap_or("homework");
    let user_id = ctx.click.user_id;
    tracing::info!("Homework '{}' marked as done by user {}", subject, user_id);
    Ok(Reply::Edit(Screen::text(format!("✅ {subject} marked as done."))))
}

/// Leaves the prompt as it is and shows a toast.
pub async fn cancel(_ctx: ActionContext) -> anyhow::Result<Reply> {
    Ok(Reply::Toast("Nothing changed.".to_string()))
}
