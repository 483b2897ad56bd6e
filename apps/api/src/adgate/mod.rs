//! Ad gating — the free-tier "watch an ad to unlock analysis" machine.
//!
//! Kept separate from the analysis machine on purpose: the two couple only
//! through `satisfied()`, so adding more gating tiers later does not multiply
//! session states.
//!
//! Transitions: `required & !watched` → (start) → `playing` → (ticks reach
//! 100) → `!required & watched`. The terminal state is permanent for the
//! session; there is no re-locking.

use serde::Serialize;

use crate::errors::AppError;
use crate::notify::{Notifier, Severity};

/// Nominal playback length in ticks (one tick per simulated second).
pub const DEFAULT_AD_DURATION_TICKS: u32 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGateSnapshot {
    pub required: bool,
    pub watched: bool,
    pub is_playing: bool,
    /// Watch progress in [0,100]; meaningful only while playing.
    pub watch_progress: f32,
}

#[derive(Debug, Clone)]
pub struct AdGate {
    required: bool,
    watched: bool,
    playing: bool,
    watch_progress: f32,
    duration_ticks: u32,
}

impl AdGate {
    pub fn new(required: bool) -> Self {
        Self::with_duration(required, DEFAULT_AD_DURATION_TICKS)
    }

    pub fn with_duration(required: bool, duration_ticks: u32) -> Self {
        AdGate {
            required,
            watched: false,
            playing: false,
            watch_progress: 0.0,
            duration_ticks: duration_ticks.max(1),
        }
    }

    /// True when analysis may run: either no ad was required or it has been
    /// watched.
    pub fn satisfied(&self) -> bool {
        !self.required || self.watched
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Begins playback. Starting an already-satisfied gate is a no-op.
    pub fn start(&mut self, notifier: &dyn Notifier) {
        if self.satisfied() || self.playing {
            return;
        }
        self.playing = true;
        self.watch_progress = 0.0;
        notifier.notify(
            "Advertisement started",
            "Please watch the entire ad to continue.",
            Severity::Info,
        );
    }

    /// Advances watch progress by one tick. Returns true when this tick
    /// completed the ad.
    pub fn tick(&mut self, notifier: &dyn Notifier) -> bool {
        if !self.playing {
            return false;
        }
        self.watch_progress += 100.0 / self.duration_ticks as f32;
        if self.watch_progress >= 100.0 {
            self.complete(notifier);
            return true;
        }
        false
    }

    /// Marks the gate permanently satisfied. Idempotent: completing twice
    /// leaves the same terminal state.
    pub fn complete(&mut self, notifier: &dyn Notifier) {
        if self.watched && !self.required {
            return;
        }
        self.required = false;
        self.watched = true;
        self.playing = false;
        self.watch_progress = 100.0;
        notifier.notify(
            "Ad completed",
            "Thank you for watching. Your free analysis is now available.",
            Severity::Success,
        );
    }

    /// Attempt to close the gate overlay. While the ad is still required and
    /// unwatched this is a no-op that re-signals the requirement.
    pub fn dismiss(&mut self, notifier: &dyn Notifier) -> Result<(), AppError> {
        if self.required && !self.watched {
            notifier.notify(
                "Watch Ad to Continue",
                "Watch this advertisement to unlock your free monthly resume analysis.",
                Severity::Info,
            );
            return Err(AppError::GateUnsatisfied);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> AdGateSnapshot {
        AdGateSnapshot {
            required: self.required,
            watched: self.watched,
            is_playing: self.playing,
            watch_progress: self.watch_progress.clamp(0.0, 100.0),
        }
    }
}
