use teloxide::types::ChatId;

use crate::inline::{
    ActionCall, ActionContext, Button, ExtraRows, InlineManager, PageRef, Reply, Screen,
    Screens, DEFAULT_ROW_WIDTH,
};

use super::confirm::CONFIRM;

/// Action behind the close row.
pub const CLOSE: &str = "close";

const LESSONS: [(&str, &str); 8] = [
    ("Math", "Quadratic equations, exercises 112-118"),
    ("Physics", "Newton's second law, lab report due"),
    ("History", "The Congress of Vienna, read chapter 4"),
    ("Literature", "Essay draft on \"Dead Souls\""),
    ("Chemistry", "Redox reactions, balance 10 equations"),
    ("Biology", "Cell division, diagram of mitosis"),
    ("Geography", "Climate zones map"),
    ("English", "Irregular verbs, list 3"),
];

/// One page per lesson, in timetable order.
pub fn lesson_screens() -> Screens {
    Screens::ordered(LESSONS.iter().enumerate().map(|(idx, (subject, homework))| {
        format!("📖 Lesson {}: {}\n\nHomework: {}", idx + 1, subject, homework)
    }))
}

/// Pages addressed by subject name.
pub fn topic_screens() -> Screens {
    Screens::keyed(LESSONS.iter().take(4).map(|(subject, homework)| {
        (subject.to_string(), format!("📚 {subject}\n\n{homework}"))
    }))
}

fn close_row() -> Vec<Vec<Button>> {
    vec![vec![Button::callback("✖ Close", ActionCall::new(CLOSE))]]
}

/// `/pages`: positional pages with a close row.
pub async fn handle_pages(chat_id: ChatId, manager: &InlineManager) -> anyhow::Result<()> {
    let extras = ExtraRows {
        down: close_row(),
        ..ExtraRows::default()
    };
    manager
        .render_paginated(chat_id, lesson_screens(), DEFAULT_ROW_WIDTH, None, extras)
        .await?;
    Ok(())
}

/// `/topics`: keyed pages, two per navigation row.
pub async fn handle_topics(chat_id: ChatId, manager: &InlineManager) -> anyhow::Result<()> {
    // Math gets its own shortcut row while it is the open page.
    let math_done = vec![vec![Button::callback(
        "✅ Math homework done",
        ActionCall::new(CONFIRM).kwarg("subject", "Math"),
    )]];
    let extras = ExtraRows {
        down_per_page: vec![(PageRef::from("Math"), math_done)],
        down: close_row(),
        ..ExtraRows::default()
    };
    manager
        .render_paginated(chat_id, topic_screens(), 2, None, extras)
        .await?;
    Ok(())
}

/// Replaces the page with a closing note.
pub async fn close(_ctx: ActionContext) -> anyhow::Result<Reply> {
    Ok(Reply::Edit(Screen::text("Closed. Send /pages to browse again.")))
}
