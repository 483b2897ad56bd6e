//! Timer drivers for the simulated workflows.
//!
//! The state machines in `session.rs`/`adgate` are pure and tick-driven;
//! these runners are the only place wall-clock time enters. Each runner is a
//! spawned tokio task whose `JoinHandle` is owned by the session's store
//! entry and aborted on teardown, so no ticker outlives its session.
//!
//! Lock discipline: the session mutex is never held across an `.await` —
//! files are cloned out before the analyzer call, then the lock is retaken
//! for the completion event.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::session::{AnalysisSession, MAX_TICK_INCREMENT};
use crate::config::Config;
use crate::notify::Notifier;

/// Timing knobs for one simulated analysis run.
#[derive(Debug, Clone, Copy)]
pub struct JobTimings {
    pub tick: Duration,
    pub duration: Duration,
}

impl JobTimings {
    pub fn from_config(config: &Config) -> Self {
        JobTimings {
            tick: Duration::from_millis(config.analysis_tick_ms.max(1)),
            duration: Duration::from_millis(config.analysis_duration_ms),
        }
    }

    fn total_ticks(&self) -> u64 {
        (self.duration.as_millis() / self.tick.as_millis().max(1)).max(1) as u64
    }
}

/// Drives one analysis run: randomized progress ticks for the nominal
/// duration, then the analyzer call whose outcome becomes the completion or
/// failure event.
///
/// Precondition: the session is already `Running` (the handler called
/// `request_analysis` before spawning).
pub fn spawn_analysis_job(
    session: Arc<Mutex<AnalysisSession>>,
    analyzer: Arc<dyn Analyzer>,
    notifier: Arc<dyn Notifier>,
    timings: JobTimings,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for _ in 0..timings.total_ticks() {
            tokio::time::sleep(timings.tick).await;
            let increment = rand::thread_rng().gen_range(0.0..MAX_TICK_INCREMENT);
            session.lock().await.tick_progress(increment);
        }

        // Clone the file set out so the analyzer await happens unlocked.
        let files = session.lock().await.files().to_vec();

        match analyzer.analyze(&files).await {
            Ok(result) => {
                let mut session = session.lock().await;
                session.complete(result, notifier.as_ref());
                tracing::info!(session_id = %session.id, "analysis complete");
            }
            Err(err) => {
                tracing::error!("analysis job failed: {err}");
                session.lock().await.fail(notifier.as_ref());
            }
        }
    })
}

/// Drives ad playback: one watch-progress tick per interval until the gate
/// completes (or playback stops for any other reason).
pub fn spawn_ad_playback(
    session: Arc<Mutex<AnalysisSession>>,
    notifier: Arc<dyn Notifier>,
    tick: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tick).await;
            let mut session = session.lock().await;
            if !session.gate().is_playing() {
                break;
            }
            if session.tick_ad(notifier.as_ref()) {
                tracing::info!(session_id = %session.id, "ad playback complete");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::MockAnalyzer;
    use crate::analysis::models::AnalysisResult;
    use crate::analysis::session::Phase;
    use crate::errors::AppError;
    use crate::intake::models::{CandidateFile, FileEntry};
    use crate::notify::RecordingNotifier;
    use async_trait::async_trait;
    use bytes::Bytes;

    fn timings() -> JobTimings {
        JobTimings {
            tick: Duration::from_millis(500),
            duration: Duration::from_millis(3000),
        }
    }

    async fn running_session(notifier: &RecordingNotifier) -> Arc<Mutex<AnalysisSession>> {
        let mut session = AnalysisSession::new(false, 10);
        session.submit_files(
            vec![CandidateFile {
                filename: "resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }],
            notifier,
        );
        session.request_analysis(notifier).unwrap();
        Arc::new(Mutex::new(session))
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl Analyzer for FailingAnalyzer {
        async fn analyze(&self, _files: &[FileEntry]) -> Result<AnalysisResult, AppError> {
            Err(AppError::AnalysisFailed("backend unavailable".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_ticks_then_completes_with_result() {
        let notifier = Arc::new(RecordingNotifier::new());
        let session = running_session(&notifier).await;

        let handle = spawn_analysis_job(
            session.clone(),
            Arc::new(MockAnalyzer),
            notifier.clone(),
            timings(),
        );
        handle.await.unwrap();

        let session = session.lock().await;
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.progress(), 100.0);
        let result = session.result().unwrap();
        assert!(result.overall_score <= 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_analyzer_returns_session_to_idle() {
        let notifier = Arc::new(RecordingNotifier::new());
        let session = running_session(&notifier).await;

        let handle = spawn_analysis_job(
            session.clone(),
            Arc::new(FailingAnalyzer),
            notifier.clone(),
            timings(),
        );
        handle.await.unwrap();

        let session = session.lock().await;
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.result().is_none());
        assert_eq!(session.files().len(), 1);
        assert!(notifier.titles().contains(&"Analysis failed".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ad_playback_satisfies_gate_without_resuming() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut raw = AnalysisSession::new(true, 10);
        raw.submit_files(
            vec![CandidateFile {
                filename: "resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }],
            notifier.as_ref(),
        );
        assert!(matches!(
            raw.request_analysis(notifier.as_ref()),
            Err(AppError::GateUnsatisfied)
        ));
        raw.start_ad(notifier.as_ref());
        let session = Arc::new(Mutex::new(raw));

        let handle = spawn_ad_playback(session.clone(), notifier.clone(), Duration::from_secs(1));
        handle.await.unwrap();

        let session = session.lock().await;
        assert!(session.gate().satisfied());
        // No auto-resume: the caller must re-invoke analysis.
        assert_eq!(session.phase(), Phase::Gating);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ad_playback_stops_when_not_playing() {
        let notifier = Arc::new(RecordingNotifier::new());
        // Gate never started: the driver exits on its first tick.
        let session = Arc::new(Mutex::new(AnalysisSession::new(true, 10)));
        let handle = spawn_ad_playback(session.clone(), notifier, Duration::from_secs(1));
        handle.await.unwrap();

        assert!(!session.lock().await.gate().satisfied());
    }
}
