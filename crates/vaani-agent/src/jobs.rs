//! Call job dispatch and cancellation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::AbortHandle;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;
use vaani_voice::{RunningSession, VoiceError};

/// Tracks in-flight call jobs so they can be listed and cancelled.
///
/// Uses `std::sync::Mutex`: every critical section is a single map
/// operation and none spans an `.await`.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<Uuid, AbortHandle>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `job` and tracks it until it finishes or is cancelled.
    pub fn spawn<F>(&self, room: &str, job: F) -> Uuid
    where
        F: Future<Output = Result<RunningSession, VoiceError>> + Send + 'static,
    {
        let job_id = Uuid::new_v4();
        let jobs = self.jobs.clone();
        let span = tracing::info_span!("job", %job_id, room);

        // Hold the lock across spawn so the task cannot deregister itself
        // before it is registered.
        let mut guard = match self.jobs.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let handle = tokio::spawn(
            async move {
                match job.await {
                    Ok(running) => info!(
                        language = %running.config.language,
                        voice = %running.config.voice,
                        "call setup complete"
                    ),
                    Err(e) => error!(error = %e, "call job failed"),
                }
                if let Ok(mut jobs) = jobs.lock() {
                    jobs.remove(&job_id);
                }
            }
            .instrument(span),
        );
        guard.insert(job_id, handle.abort_handle());
        job_id
    }

    /// Aborts a job. Returns false if no such job is running.
    pub fn cancel(&self, job_id: &Uuid) -> bool {
        let removed = match self.jobs.lock() {
            Ok(mut jobs) => jobs.remove(job_id),
            Err(_) => {
                warn!(%job_id, "job registry lock poisoned");
                None
            }
        };
        match removed {
            Some(handle) => {
                handle.abort();
                info!(%job_id, "call job cancelled");
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Vec<Uuid> {
        self.jobs
            .lock()
            .map(|jobs| jobs.keys().copied().collect())
            .unwrap_or_default()
    }
}
