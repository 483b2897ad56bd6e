//! Notification sink — the toast surface of the original product.
//!
//! Components never talk to a renderer directly; they emit
//! `notify(title, detail, severity)` into an `Arc<dyn Notifier>` carried in
//! `AppState`. The default sink logs via `tracing`; tests swap in
//! `RecordingNotifier` to assert on what the user would have seen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// User-visible message surface. Implementations must be cheap and
/// non-blocking; session state transitions call this synchronously.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, detail: &str, severity: Severity);
}

/// Default sink: structured log lines.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, detail: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::warn!(title, detail, "user notification"),
            _ => tracing::info!(title, detail, "user notification"),
        }
    }
}

/// Test double that records every notification.
#[cfg(test)]
pub struct RecordingNotifier {
    messages: std::sync::Mutex<Vec<(String, String, Severity)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _, _)| t.clone())
            .collect()
    }

    pub fn count_with_severity(&self, severity: Severity) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, s)| *s == severity)
            .count()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, detail: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), detail.to_string(), severity));
    }
}
