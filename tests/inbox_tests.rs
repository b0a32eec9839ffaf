mod common;

use common::{callback_data, click, harness, labels, CHAT, USER};
use diary_inline_bot::inline::{
    ActionCall, ActionTable, Button, ButtonSpec, ClickEvent, DispatchOutcome, ExtraRows, Registration, Reply,
    Screen, Screens, EXPIRED_NOTICE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_clicking_page_two_edits_message_in_place() {
    let h = harness(ActionTable::new());

    let handle = h
        .manager
        .render_paginated(CHAT, Screens::ordered(["p1", "p2", "p3"]), 5, None, ExtraRows::default())
        .await
        .unwrap();
    let first = h.messenger.last_keyboard().unwrap();
    assert_eq!(h.messenger.last_text().as_deref(), Some("p1"));
    assert_eq!(labels(&first), vec![vec!["· 1 ·", "2", "3"]]);

    let token = callback_data(&first, "2");
    let outcome = h
        .manager
        .dispatch(click("q1", &token, Some(handle)))
        .await
        .unwrap();
    assert!(matches!(outcome, DispatchOutcome::Invoked { retired: true, .. }));

    let edits = h.messenger.edits();
    assert_eq!(edits.len(), 1);
    let (edited, text, keyboard) = &edits[0];
    assert_eq!(*edited, handle);
    assert_eq!(text, "p2");
    assert_eq!(labels(keyboard.as_ref().unwrap()), vec![vec!["1", "· 2 ·", "3"]]);
    assert_eq!(h.messenger.answers(), vec![("q1".to_string(), None, false)]);
}

#[tokio::test]
async fn test_one_shot_confirm_runs_once_then_reports_expired() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let actions = ActionTable::new().on_async("confirm", move |_ctx| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Reply::Edit(Screen::text("Confirmed")))
        }
    });
    let h = harness(actions);

    let handle = h
        .manager
        .render_screen(
            CHAT,
            "Sure?",
            Some(Button::callback("Yes", ActionCall::new("confirm")).into()),
        )
        .await
        .unwrap();
    let token = callback_data(&h.messenger.last_keyboard().unwrap(), "Yes");

    let first = h.manager.dispatch(click("q1", &token, Some(handle))).await.unwrap();
    assert!(matches!(first, DispatchOutcome::Invoked { retired: true, .. }));
    assert!(!h.registry.contains(&token));
    assert_eq!(h.messenger.last_text().as_deref(), Some("Confirmed"));

    let second = h.manager.dispatch(click("q2", &token, Some(handle))).await.unwrap();
    assert_eq!(second, DispatchOutcome::Expired { token });
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.messenger.answers().last(),
        Some(&("q2".to_string(), Some(EXPIRED_NOTICE.to_string()), true))
    );
}

#[tokio::test]
async fn test_concurrent_renders_last_render_wins() {
    let h = harness(ActionTable::new());
    let screens = Screens::ordered(["p1", "p2", "p3"]);

    let handle = h
        .manager
        .render_paginated(CHAT, screens.clone(), 5, None, ExtraRows::default())
        .await
        .unwrap();
    let stale = h.messenger.last_keyboard().unwrap();

    // Two clicks on different keyboards of the same message race.
    let page_two = callback_data(&stale, "2");
    let page_three = callback_data(&stale, "3");
    let (a, b) = tokio::join!(
        h.manager.dispatch(click("qa", &page_two, Some(handle))),
        h.manager.dispatch(click("qb", &page_three, Some(handle))),
    );
    assert!(a.is_ok() && b.is_ok());

    // Every render minted its own tokens; none were shared.
    let edits = h.messenger.edits();
    assert_eq!(edits.len(), 2);
    let (_, last_text, last_keyboard) = edits.last().unwrap();
    assert_eq!(h.messenger.last_text().as_ref(), Some(last_text));

    // The keyboard on screen belongs to the last edit and still works.
    let back = callback_data(last_keyboard.as_ref().unwrap(), "1");
    h.manager.dispatch(click("qc", &back, Some(handle))).await.unwrap();
    assert_eq!(h.messenger.last_text().as_deref(), Some("p1"));
}

#[tokio::test]
async fn test_stored_kwargs_override_click_context() {
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let actions = ActionTable::new().on_blocking("inspect", move |ctx| {
        *sink.lock().unwrap() = Some((
            ctx.kwarg("user_id").map(str::to_string),
            ctx.kwarg("query_id").map(str::to_string),
            ctx.kwarg("chat_id").map(str::to_string),
            ctx.args.clone(),
        ));
        Ok(Reply::Nothing)
    });
    let h = harness(actions);

    let handle = h
        .manager
        .render_screen(
            CHAT,
            "inspect",
            Some(
                Button::callback(
                    "go",
                    ActionCall::new("inspect").arg("lesson-3").kwarg("user_id", "override"),
                )
                .into(),
            ),
        )
        .await
        .unwrap();
    let token = callback_data(&h.messenger.last_keyboard().unwrap(), "go");

    h.manager.dispatch(click("q9", &token, Some(handle))).await.unwrap();

    let seen = seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.0.as_deref(), Some("override"));
    assert_eq!(seen.1.as_deref(), Some("q9"));
    assert_eq!(seen.2, Some(CHAT.0.to_string()));
    assert_eq!(seen.3, vec!["lesson-3".to_string()]);
}

#[tokio::test]
async fn test_action_replies_are_applied() {
    let actions = ActionTable::new()
        .on_async("toast", |_ctx| async { Ok(Reply::Toast("saved".into())) })
        .on_async("alert", |_ctx| async { Ok(Reply::Alert("careful".into())) })
        .on_async("send", |_ctx| async {
            Ok(Reply::Send(Screen::text("new message")))
        });
    let h = harness(actions);
    let handle = h.manager.render_screen(CHAT, "menu", None).await.unwrap();

    for name in ["toast", "alert", "send"] {
        let token = h.registry.register(Registration::new(name, ActionCall::new(name)));
        h.manager
            .dispatch(click(name, &token, Some(handle)))
            .await
            .unwrap();
    }

    let answers = h.messenger.answers();
    assert_eq!(answers[0], ("toast".to_string(), Some("saved".to_string()), false));
    assert_eq!(answers[1], ("alert".to_string(), Some("careful".to_string()), true));
    assert_eq!(answers[2], ("send".to_string(), None, false));
    assert_eq!(h.messenger.last_text().as_deref(), Some("new message"));
    assert!(h.messenger.edits().is_empty());
}

#[tokio::test]
async fn test_handler_error_propagates_and_entry_stays_retired() {
    let actions = ActionTable::new()
        .on_async("boom", |_ctx| async { Err(anyhow::anyhow!("diary backend down")) });
    let h = harness(actions);
    let token = h.registry.register(Registration::new("boom", ActionCall::new("boom")));

    let result = h.manager.dispatch(click("q1", &token, None)).await;

    assert!(result.unwrap_err().to_string().contains("diary backend down"));
    assert!(!h.registry.contains(&token));
}

#[tokio::test]
async fn test_unknown_action_and_missing_data() {
    let h = harness(ActionTable::new());
    let token = h.registry.register(Registration::new("ghost", ActionCall::new("ghost")));
    assert!(h.manager.dispatch(click("q1", &token, None)).await.is_err());

    let empty = ClickEvent {
        query_id: "q2".into(),
        data: None,
        user_id: USER,
        message: None,
    };
    assert_eq!(h.manager.dispatch(empty).await.unwrap(), DispatchOutcome::Ignored);
    assert_eq!(h.messenger.answers(), vec![("q2".to_string(), None, false)]);
}

#[tokio::test]
async fn test_page_click_without_message_fails() {
    let h = harness(ActionTable::new());
    let page = h
        .manager
        .list(Screens::ordered(["p1", "p2"]), None, 5, ExtraRows::default())
        .unwrap();
    let token = callback_data(&page.keyboard, "2");

    assert!(h.manager.dispatch(click("q1", &token, None)).await.is_err());
}

#[tokio::test]
async fn test_literal_page_button_with_zero_row_width_renders_one_per_row() {
    let h = harness(ActionTable::new());
    let spec: ButtonSpec = serde_json::from_value(serde_json::json!({
        "text": "Lessons",
        "callback": {
            "kind": "show_page",
            "screens": {"kind": "ordered", "pages": ["p1", "p2"]},
            "page": 1,
            "row_width": 0,
        },
    }))
    .unwrap();

    let handle = h
        .manager
        .render_screen(CHAT, "Diary", Some(spec.into()))
        .await
        .unwrap();
    let token = callback_data(&h.messenger.last_keyboard().unwrap(), "Lessons");

    let outcome = h
        .manager
        .dispatch(click("q1", &token, Some(handle)))
        .await
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::Invoked { retired: true, .. }));
    assert_eq!(h.messenger.last_text().as_deref(), Some("p1"));
    assert_eq!(
        labels(&h.messenger.last_keyboard().unwrap()),
        vec![vec!["· 1 ·"], vec!["2"]]
    );
}

#[test]
fn test_literal_page_button_over_empty_collection_is_rejected() {
    let spec = serde_json::from_value::<ButtonSpec>(serde_json::json!({
        "text": "Lessons",
        "callback": {"kind": "show_page", "screens": {"kind": "ordered", "pages": []}},
    }));
    assert!(spec.is_err());
}

#[tokio::test]
async fn test_data_button_naming_an_action_runs_without_registry_entry() {
    let actions = ActionTable::new()
        .on_async("menu", |_ctx| async { Ok(Reply::Edit(Screen::text("Main menu"))) });
    let h = harness(actions);
    let handle = h
        .manager
        .render_screen(CHAT, "week", Some(Button::data("⬅ Back", "menu").into()))
        .await
        .unwrap();
    assert!(h.registry.is_empty());

    let data = callback_data(&h.messenger.last_keyboard().unwrap(), "⬅ Back");
    assert!(h.manager.routes_data(&data));
    assert!(!h.manager.routes_data("not-an-action"));

    for query in ["q1", "q2"] {
        let outcome = h
            .manager
            .dispatch_data(click(query, &data, Some(handle)))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Routed { action: "menu".to_string() });
    }
    assert_eq!(h.messenger.last_text().as_deref(), Some("Main menu"));
    assert!(h
        .messenger
        .answers()
        .iter()
        .all(|(_, text, _)| text.as_deref() != Some(EXPIRED_NOTICE)));
}

#[test]
fn test_pending_token_is_not_routed_as_data() {
    let h = harness(ActionTable::new().on_async("menu", |_ctx| async { Ok(Reply::Nothing) }));
    h.registry
        .register(Registration::new("pinned", ActionCall::new("menu")).token("menu"));
    assert!(!h.manager.routes_data("menu"));
}
