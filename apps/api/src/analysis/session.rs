//! Analysis session state machine: `Idle → Gating → Running → Complete`.
//!
//! The machine is pure and tick-driven — callers (the tokio runners in
//! `runner.rs`, or tests) inject progress ticks, so every transition is
//! deterministic without a timer runtime. `Gating` is skipped entirely when
//! the gate is already satisfied.
//!
//! No auto-resume: completing the ad does NOT start the job. The caller
//! re-invokes `request_analysis` once the gate is satisfied, which keeps the
//! trigger policy at-most-one and avoids double-starts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::adgate::{AdGate, AdGateSnapshot};
use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::intake::models::{CandidateFile, FileEntry};
use crate::intake::{IntakeManager, SubmitOutcome};
use crate::notify::{Notifier, Severity};

/// Ticking alone never completes a run; progress stalls here until the
/// completion event forces it to 100.
pub const PROGRESS_TICK_CAP: f32 = 90.0;

/// Upper bound on one randomized progress increment.
pub const MAX_TICK_INCREMENT: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Gating,
    Running,
    Complete,
}

/// Full session view for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub files: Vec<FileEntry>,
    pub progress: f32,
    pub ad_gate: AdGateSnapshot,
    pub result: Option<AnalysisResult>,
}

#[derive(Debug)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    intake: IntakeManager,
    gate: AdGate,
    phase: Phase,
    progress: f32,
    result: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(gate_required: bool, ad_duration_ticks: u32) -> Self {
        AnalysisSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            intake: IntakeManager::new(),
            gate: AdGate::with_duration(gate_required, ad_duration_ticks),
            phase: Phase::Idle,
            progress: 0.0,
            result: None,
        }
    }

    // ── Intake ──────────────────────────────────────────────────────────

    /// Accepting new files invalidates any prior result.
    pub fn submit_files(
        &mut self,
        candidates: Vec<CandidateFile>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let outcome = self.intake.submit(candidates, notifier);
        if !outcome.accepted.is_empty() {
            self.result = None;
            if self.phase == Phase::Complete {
                self.phase = Phase::Idle;
            }
        }
        outcome
    }

    pub fn remove_file(&mut self, index: usize) -> Result<FileEntry, AppError> {
        self.intake.remove(index)
    }

    /// Empties the file set and nulls any result, regardless of prior state.
    /// A job that is already `Running` is not cancelled (the source leaves
    /// that interaction undefined); if it completes it still assigns its
    /// result.
    pub fn clear_files(&mut self) {
        self.intake.clear();
        self.result = None;
        if self.phase != Phase::Running {
            self.phase = Phase::Idle;
            self.progress = 0.0;
        }
    }

    pub fn files(&self) -> &[FileEntry] {
        self.intake.files()
    }

    // ── Analysis lifecycle ──────────────────────────────────────────────

    /// Entry point for the analyze intent.
    ///
    /// Fails fast on an empty file set (stays `Idle`). With the gate
    /// unsatisfied it parks in `Gating` and reports why — the timed job does
    /// not start. Otherwise the session moves to `Running` and the caller is
    /// expected to drive progress ticks and eventually `complete` or `fail`.
    pub fn request_analysis(&mut self, notifier: &dyn Notifier) -> Result<(), AppError> {
        if self.phase == Phase::Running {
            return Err(AppError::AnalysisInProgress);
        }
        if self.intake.is_empty() {
            notifier.notify(
                "No files to analyze",
                "Please upload a resume or cover letter first.",
                Severity::Error,
            );
            return Err(AppError::NoFiles);
        }
        if !self.gate.satisfied() {
            self.phase = Phase::Gating;
            return Err(AppError::GateUnsatisfied);
        }

        self.phase = Phase::Running;
        self.progress = 0.0;
        self.result = None;
        Ok(())
    }

    /// One simulated progress tick. Monotonic, capped below 100 so only the
    /// completion event can finish the bar.
    pub fn tick_progress(&mut self, increment: f32) {
        if self.phase != Phase::Running {
            return;
        }
        let increment = increment.clamp(0.0, MAX_TICK_INCREMENT);
        self.progress = (self.progress + increment).min(PROGRESS_TICK_CAP);
    }

    /// Completion event: forces progress to exactly 100 and installs the
    /// result.
    pub fn complete(&mut self, result: AnalysisResult, notifier: &dyn Notifier) {
        if self.phase != Phase::Running {
            return;
        }
        self.progress = 100.0;
        self.result = Some(result);
        self.phase = Phase::Complete;
        notifier.notify(
            "Analysis complete",
            "Your resume feedback is ready.",
            Severity::Success,
        );
    }

    /// Failure event: back to `Idle`, files retained, no result.
    pub fn fail(&mut self, notifier: &dyn Notifier) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Idle;
        self.progress = 0.0;
        self.result = None;
        notifier.notify(
            "Analysis failed",
            "There was an error analyzing your resume. Please try again.",
            Severity::Error,
        );
    }

    // ── Ad gate ─────────────────────────────────────────────────────────

    pub fn start_ad(&mut self, notifier: &dyn Notifier) {
        self.gate.start(notifier);
    }

    /// Advances ad playback; returns true when the gate just became
    /// satisfied. The session stays in `Gating` — the caller re-invokes
    /// `request_analysis`.
    pub fn tick_ad(&mut self, notifier: &dyn Notifier) -> bool {
        self.gate.tick(notifier)
    }

    pub fn dismiss_ad(&mut self, notifier: &dyn Notifier) -> Result<(), AppError> {
        self.gate.dismiss(notifier)
    }

    pub fn gate(&self) -> &AdGate {
        &self.gate
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            phase: self.phase,
            files: self.intake.files().to_vec(),
            progress: self.progress,
            ad_gate: self.gate.snapshot(),
            result: self.result.clone(),
        }
    }
}
