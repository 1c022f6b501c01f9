use std::sync::Arc;

use tokio::{
    sync::{mpsc, RwLock},
    task::JoinHandle,
};

use crate::services::risk_analyzer::RiskAnalyzer;

/// A request to score one stored attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringJob {
    pub attempt_id: String,
    pub use_judgment: bool,
}

/// Fire-and-forget scoring. Submissions enqueue a job and return; a background
/// worker drains the channel and runs each job in its own task.
#[derive(Clone)]
pub struct ScoringQueue {
    sender: mpsc::UnboundedSender<ScoringJob>,
    worker_handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl ScoringQueue {
    /// Spawns the worker. Must be called from within a tokio runtime.
    pub fn start(analyzer: Arc<RiskAnalyzer>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<ScoringJob>();

        let worker = tokio::spawn(async move {
            log::info!("Scoring worker started");
            while let Some(job) = receiver.recv().await {
                let analyzer = Arc::clone(&analyzer);
                tokio::spawn(async move {
                    if let Err(err) = analyzer
                        .analyze_attempt(&job.attempt_id, job.use_judgment)
                        .await
                    {
                        log::error!("Background analysis failed for attempt {}: {}", job.attempt_id, err);
                    }
                });
            }
            log::info!("Scoring queue closed, worker stopping");
        });

        Self {
            sender,
            worker_handle: Arc::new(RwLock::new(Some(worker))),
        }
    }

    /// Returns false when the worker is gone and the job was dropped.
    pub fn enqueue(&self, job: ScoringJob) -> bool {
        let attempt_id = job.attempt_id.clone();
        match self.sender.send(job) {
            Ok(()) => {
                log::debug!("Queued scoring for attempt {}", attempt_id);
                true
            }
            Err(_) => {
                log::error!("Scoring queue is closed; attempt {} stays unscored", attempt_id);
                false
            }
        }
    }

    pub async fn stop_worker(&self) {
        let mut handle = self.worker_handle.write().await;
        if let Some(join_handle) = handle.take() {
            join_handle.abort();
            log::info!("Scoring worker stopped");
        }
    }
}
