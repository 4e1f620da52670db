//! Screening sessions — explicit state objects with a defined lifecycle,
//! replacing ambient globals: created on demand, reset by `clear_all`, torn
//! down by delete. The session store is the only shared mutable state in the
//! service; all access goes through its `RwLock`.

pub mod documents;
pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::results::ResultStore;
use crate::screening::orchestrator::CancelFlag;
use crate::screening::priorities::PriorityProfile;
use crate::screening::prompt::WeightConfig;
use crate::session::documents::DocumentQueue;

/// The job being screened against. Created once per analysis session and
/// replaced wholesale when the user re-analyzes with a new description.
#[derive(Debug, Clone)]
pub struct JobProfile {
    pub title: String,
    pub description: String,
    /// Filled in by the priority extractor at the start of an analysis run;
    /// `None` means the default rubric applies.
    pub extracted_priorities: Option<PriorityProfile>,
}

/// All per-user screening state: the job, the queued documents, and the
/// canonical result collection.
#[derive(Debug)]
pub struct ScreeningSession {
    pub id: Uuid,
    pub job: Option<JobProfile>,
    pub weights: WeightConfig,
    pub documents: DocumentQueue,
    pub results: ResultStore,
    pub cancel: CancelFlag,
    pub created_at: DateTime<Utc>,
}

impl ScreeningSession {
    fn new(id: Uuid) -> Self {
        ScreeningSession {
            id,
            job: None,
            weights: WeightConfig::default(),
            documents: DocumentQueue::default(),
            results: ResultStore::default(),
            cancel: CancelFlag::default(),
            created_at: Utc::now(),
        }
    }

    /// Resets the session to its initial state, keeping the same id.
    pub fn clear_all(&mut self) {
        self.job = None;
        self.weights = WeightConfig::default();
        self.documents.clear();
        self.results.clear();
        self.cancel = CancelFlag::default();
    }
}

/// In-memory session registry shared across handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, ScreeningSession>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, ScreeningSession::new(id));
        id
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Runs a closure against a session under the read lock.
    pub async fn with<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&ScreeningSession) -> T,
    ) -> Result<T, AppError> {
        let sessions = self.inner.read().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }

    /// Runs a closure against a session under the write lock.
    pub async fn with_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ScreeningSession) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }
}
