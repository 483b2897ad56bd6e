use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::session::AnalysisSession;
use crate::config::Config;
use crate::errors::AppError;
use crate::notify::Notifier;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Pluggable scoring backend. Default: MockAnalyzer.
    pub analyzer: Arc<dyn Analyzer>,
    pub notifier: Arc<dyn Notifier>,
}

/// One store entry: the session plus the timer tasks ticking against it.
/// Dropping the handle aborts both tasks, which is how the scoped-timer
/// obligation is met — session teardown can never leak a ticking callback.
pub struct SessionHandle {
    pub session: Arc<Mutex<AnalysisSession>>,
    pub analysis_job: Option<JoinHandle<()>>,
    pub ad_job: Option<JoinHandle<()>>,
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(job) = self.analysis_job.take() {
            job.abort();
        }
        if let Some(job) = self.ad_job.take() {
            job.abort();
        }
    }
}

/// In-memory session registry. Sessions are ephemeral: nothing survives a
/// process restart, matching the page-instance scoping of the original.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, gate_required: bool, ad_duration_ticks: u32) -> Arc<Mutex<AnalysisSession>> {
        let session = AnalysisSession::new(gate_required, ad_duration_ticks);
        let id = session.id;
        let session = Arc::new(Mutex::new(session));
        let handle = SessionHandle {
            session: session.clone(),
            analysis_job: None,
            ad_job: None,
        };
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(id, handle);
        session
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<AnalysisSession>>, AppError> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(&id)
            .map(|handle| handle.session.clone())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Installs the analysis ticker for a session, aborting any stale one.
    pub fn attach_analysis_job(&self, id: Uuid, job: JoinHandle<()>) {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        if let Some(handle) = sessions.get_mut(&id) {
            if let Some(old) = handle.analysis_job.replace(job) {
                old.abort();
            }
        } else {
            // Session torn down between spawn and attach.
            job.abort();
        }
    }

    /// Installs the ad playback ticker for a session, aborting any stale one.
    pub fn attach_ad_job(&self, id: Uuid, job: JoinHandle<()>) {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        if let Some(handle) = sessions.get_mut(&id) {
            if let Some(old) = handle.ad_job.replace(job) {
                old.abort();
            }
        } else {
            job.abort();
        }
    }

    /// Teardown: dropping the handle aborts any ticking tasks.
    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_create_get_remove() {
        let store = SessionStore::new();
        let session = store.create(true, 10);
        let id = session.lock().await.id;

        assert!(store.get(id).is_ok());
        assert_eq!(store.len(), 1);

        store.remove(id).unwrap();
        assert!(store.get(id).is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.remove(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_aborts_attached_jobs() {
        let store = SessionStore::new();
        let session = store.create(true, 10);
        let id = session.lock().await.id;

        // A task that would tick forever if leaked.
        let job = tokio::spawn(async {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        });
        store.attach_analysis_job(id, job);

        store.remove(id).unwrap();
        // Give the runtime a turn to observe the abort.
        tokio::task::yield_now().await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_attach_to_missing_session_aborts_job() {
        let store = SessionStore::new();
        let job = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });
        store.attach_analysis_job(Uuid::new_v4(), job);
        // Nothing registered; the orphan task was aborted rather than leaked.
        assert!(store.is_empty());
    }
}
