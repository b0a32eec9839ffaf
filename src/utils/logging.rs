use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64) {
    info!(
        "CMD_START: {} by {}({}) in chat {}",
        command, user, user_id, chat_id
    );
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {} in chat {} - {}",
        command, user_id, chat_id, error
    );
}

/// Logs a callback entry entering the registry
pub fn log_callback_registered(token: &str, label: &str, delete_time: Option<DateTime<Utc>>) {
    match delete_time {
        Some(deadline) => debug!(
            "CALLBACK_REGISTERED: {} ({}) until {}",
            token,
            label,
            deadline.to_rfc3339()
        ),
        None => debug!("CALLBACK_REGISTERED: {} ({}) without deadline", token, label),
    }
}

/// Logs a click resolved to a registry entry
pub fn log_callback_dispatch(token: &str, label: &str, user_id: u64) {
    info!("CALLBACK_DISPATCH: {} ({}) by {}", token, label, user_id);
}

/// Logs a click on a button whose entry is gone
pub fn log_callback_expired(token: &str, user_id: u64) {
    warn!("CALLBACK_EXPIRED: {} clicked by {}", token, user_id);
}

/// Logs a one-shot entry removed after use
pub fn log_callback_retired(token: &str, label: &str) {
    debug!("CALLBACK_RETIRED: {} ({})", token, label);
}

/// Logs dropped rows and rejected keyboards
pub fn log_markup_error(details: &str) {
    warn!("MARKUP_ERROR: {}", details);
}

/// Logs one expiry sweep pass
pub fn log_sweep(evicted: usize, remaining: usize) {
    if evicted > 0 {
        info!("SWEEP: evicted {} expired callbacks, {} pending", evicted, remaining);
    } else {
        debug!("SWEEP: nothing expired, {} pending", remaining);
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
