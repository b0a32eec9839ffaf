use teloxide::prelude::*;

use super::HandlerResult;
use crate::inline::{ClickEvent, DispatchOutcome, InlineManager};

/// Every callback query not claimed by [`data_handler`] goes through the inbox.
pub async fn callback_handler(q: CallbackQuery, manager: InlineManager) -> HandlerResult {
    let username = q.from.username.as_deref().unwrap_or("unknown");
    let click = ClickEvent::from_query(&q);
    tracing::debug!(
        "Callback received: {:?} from user {} ({})",
        click.data, username, click.user_id
    );

    match manager.dispatch(click).await {
        Ok(DispatchOutcome::Invoked { token, retired: true }) => {
            tracing::debug!("Callback {} handled and retired", token);
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Callback from user {} failed: {}", q.from.id.0, e);
            Err(e.into())
        }
    }
}

/// Plain data buttons that name an action; the registry is skipped.
pub async fn data_handler(q: CallbackQuery, manager: InlineManager) -> HandlerResult {
    let click = ClickEvent::from_query(&q);
    tracing::debug!("Data button {:?} from user {}", click.data, click.user_id);

    if let Err(e) = manager.dispatch_data(click).await {
        tracing::error!("Data button from user {} failed: {}", q.from.id.0, e);
        return Err(e.into());
    }
    Ok(())
}
