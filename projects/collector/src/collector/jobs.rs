use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

/// Finished jobs retained for polling before the oldest are evicted.
const MAX_FINISHED_JOBS: usize = 256;

/// State of one background collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Completed {
        questions_stored: usize,
        issues_stored: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Default)]
struct Inner {
    jobs: HashMap<Uuid, JobStatus>,
    finished: VecDeque<Uuid>,
}

/// Tracks background collection runs so the trigger endpoint can hand out an
/// id the caller polls for completion. Running jobs are never evicted;
/// finished ones age out beyond `MAX_FINISHED_JOBS`.
#[derive(Debug, Default)]
pub struct JobRegistry {
    inner: Mutex<Inner>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Uuid {
        let job_id = Uuid::new_v4();
        self.lock().jobs.insert(job_id, JobStatus::Running);
        job_id
    }

    pub fn complete(&self, job_id: Uuid, questions_stored: usize, issues_stored: usize) {
        self.finish(
            job_id,
            JobStatus::Completed {
                questions_stored,
                issues_stored,
            },
        );
    }

    pub fn fail(&self, job_id: Uuid, error: String) {
        self.finish(job_id, JobStatus::Failed { error });
    }

    pub fn status(&self, job_id: Uuid) -> Option<JobStatus> {
        self.lock().jobs.get(&job_id).cloned()
    }

    fn finish(&self, job_id: Uuid, status: JobStatus) {
        let mut inner = self.lock();
        inner.jobs.insert(job_id, status);
        inner.finished.push_back(job_id);
        while inner.finished.len() > MAX_FINISHED_JOBS {
            if let Some(evicted) = inner.finished.pop_front() {
                inner.jobs.remove(&evicted);
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
