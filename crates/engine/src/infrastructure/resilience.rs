//! Circuit and notification state for the generative path.
//!
//! One instance per generative responder. Concurrent turns share it, so all
//! state sits behind a single mutex; every method takes `now` explicitly so
//! the caller's clock stays the only source of time.
//!
//! - **Closed**: `cooldown_until` is `None` or in the past; calls go out.
//! - **Open**: `now < cooldown_until`; calls are skipped.
//!
//! There is no half-open probe: the first turn after the cooldown simply
//! makes the call, and its outcome closes or reopens the circuit.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// Default time the circuit stays open after a degradation.
pub const DEFAULT_COOLDOWN_SECS: u64 = 30;

#[derive(Debug, Default)]
struct Inner {
    cooldown_until: Option<DateTime<Utc>>,
    /// An unavailable event went out since the last success.
    failure_notified: bool,
    /// Rejection signatures already reported. Never shrinks.
    seen_signatures: HashSet<String>,
}

#[derive(Debug)]
pub struct ResilienceState {
    cooldown: Duration,
    inner: Mutex<Inner>,
}

impl ResilienceState {
    pub fn new(cooldown: std::time::Duration) -> Self {
        Self {
            cooldown: Duration::from_std(cooldown)
                .unwrap_or_else(|_| Duration::seconds(DEFAULT_COOLDOWN_SECS as i64)),
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.lock().cooldown_until.is_some_and(|until| now < until)
    }

    pub fn cooldown_until(&self) -> Option<DateTime<Utc>> {
        self.lock().cooldown_until
    }

    /// Opens the circuit until `now + cooldown`.
    ///
    /// Returns `true` when this is the first failure since the last success,
    /// i.e. when an unavailable notification should go out.
    pub fn record_failure(&self, now: DateTime<Utc>) -> bool {
        let mut inner = self.lock();
        let until = now + self.cooldown;
        inner.cooldown_until = Some(until);
        tracing::warn!(cooldown_until = %until, "Dialogue circuit opened");
        let first = !inner.failure_notified;
        inner.failure_notified = true;
        first
    }

    /// Closes the circuit and re-arms the unavailable notification.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        if inner.cooldown_until.take().is_some() || inner.failure_notified {
            tracing::info!("Dialogue circuit closed");
        }
        inner.failure_notified = false;
    }

    /// Records a rejection signature. `true` on first sighting.
    pub fn note_signature(&self, signature: &str) -> bool {
        self.lock().seen_signatures.insert(signature.to_string())
    }
}

impl Default for ResilienceState {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_COOLDOWN_SECS))
    }
}

/// Stable fingerprint of a rejection: SHA-256 over the code and issues.
pub fn validation_signature(code: Option<&str>, issues: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.unwrap_or("").as_bytes());
    for issue in issues {
        hasher.update(b"\n");
        hasher.update(issue.as_bytes());
    }
    hex::encode(hasher.finalize())
}
