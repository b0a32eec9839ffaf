//! Process-wide map from callback token to pending continuation.
//!
//! The registry is written by the markup compiler (insert), the dispatch inbox
//! (claim) and the expiry sweeper (evict). Every read-modify-write happens
//! under one lock so a click racing a sweep resolves to "not found" for
//! whichever arrives second.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::clock::{Clock, SystemClock};
use super::continuation::Continuation;
use crate::utils::logging::{log_callback_registered, log_callback_retired};

/// Default lifetime of a registry entry.
pub const DEFAULT_TTL_MINUTES: i64 = 20;

/// A pending callback.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Callback data the button carries.
    pub token: String,
    /// Diagnostic label, never shown to users.
    pub label: String,
    /// What a click runs.
    pub continuation: Continuation,
    /// True when clicks do not retire the entry.
    pub reusable: bool,
    /// `None` when the entry was created with its deadline disabled.
    pub delete_time: Option<DateTime<Utc>>,
}

impl RegistryEntry {
    /// True once the deadline has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.delete_time.is_some_and(|deadline| deadline <= now)
    }
}

/// Arguments of [`CallbackRegistry::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    /// Explicit token; generated when `None`.
    pub token: Option<String>,
    /// Diagnostic label.
    pub label: String,
    /// What a click runs.
    pub continuation: Continuation,
    /// Keep the entry after clicks.
    pub reusable: bool,
    /// Absolute deadline, `None` for no deadline.
    pub delete_time: Option<DateTime<Utc>>,
}

impl Registration {
    /// One-shot registration without a deadline.
    pub fn new(label: impl Into<String>, continuation: impl Into<Continuation>) -> Self {
        Self {
            token: None,
            label: label.into(),
            continuation: continuation.into(),
            reusable: false,
            delete_time: None,
        }
    }

    /// Use an explicit token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the reusable flag.
    pub fn reusable(mut self, reusable: bool) -> Self {
        self.reusable = reusable;
        self
    }

    /// Set the deadline.
    pub fn delete_time(mut self, delete_time: Option<DateTime<Utc>>) -> Self {
        self.delete_time = delete_time;
        self
    }
}

/// Fresh unguessable token: 8 random bytes, hex encoded.
pub fn generate_token() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

/// Pending callbacks by token, shared by every render and click.
pub struct CallbackRegistry {
    entries: Mutex<HashMap<String, RegistryEntry>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl CallbackRegistry {
    /// Registry on the system clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(Arc::new(SystemClock), default_ttl)
    }

    /// Registry on a custom clock, used by tests.
    pub fn with_clock(clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            default_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RegistryEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current time on the registry clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Lifetime applied when a button sets none.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Deadline for an entry created now, with an optional TTL override.
    pub fn deadline(&self, ttl: Option<Duration>) -> DateTime<Utc> {
        self.now() + ttl.unwrap_or(self.default_ttl)
    }

    /// Insert or overwrite an entry and return its token.
    pub fn register(&self, registration: Registration) -> String {
        let token = registration.token.unwrap_or_else(generate_token);
        let entry = RegistryEntry {
            token: token.clone(),
            label: registration.label,
            continuation: registration.continuation,
            reusable: registration.reusable,
            delete_time: registration.delete_time,
        };
        log_callback_registered(&entry.token, &entry.label, entry.delete_time);
        self.lock().insert(token.clone(), entry);
        token
    }

    /// Snapshot of an entry without consuming it.
    pub fn get(&self, token: &str) -> Option<RegistryEntry> {
        self.lock().get(token).cloned()
    }

    /// Whether `token` is pending.
    pub fn contains(&self, token: &str) -> bool {
        self.lock().contains_key(token)
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Look up an entry for invocation.
    ///
    /// Non-reusable entries are removed in the same critical section, so a
    /// one-shot button can be claimed at most once. Entries past their
    /// deadline are evicted and reported as missing.
    pub fn claim(&self, token: &str) -> Option<RegistryEntry> {
        let now = self.now();
        let mut entries = self.lock();
        let entry = entries.get(token)?;

        if entry.is_expired(now) {
            entries.remove(token);
            return None;
        }
        if entry.reusable {
            return Some(entry.clone());
        }

        let entry = entries.remove(token)?;
        log_callback_retired(&entry.token, &entry.label);
        Some(entry)
    }

    /// Remove an entry regardless of its deadline.
    pub fn evict(&self, token: &str) -> Option<RegistryEntry> {
        self.lock().remove(token)
    }

    /// Remove every entry whose deadline is at or before `now`. Returns the count.
    pub fn evict_if_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Drop every entry past its deadline; returns how many went.
    pub fn evict_expired(&self) -> usize {
        self.evict_if_expired(self.now())
    }
}
