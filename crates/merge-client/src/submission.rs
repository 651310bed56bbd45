/// Background execution of one merge submission
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::client::{MergeClient, MergeRequest};
use crate::error::MergeError;
use crate::result::MergedVideo;

/// Terminal outcome of one submission.
pub type MergeOutcome = Result<MergedVideo, MergeError>;

/// One in-flight submission.
///
/// Spawning starts a worker thread that owns a tokio runtime and races the
/// request against the cancel signal. The outcome arrives on a bounded
/// channel the UI drains once per frame. Dropping the handle mid-flight
/// drops the cancel sender, which also aborts the worker's request.
pub struct Submission {
    rx: Receiver<MergeOutcome>,
    cancel: Option<oneshot::Sender<()>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Submission {
    /// Start the submission on a background worker.
    pub fn spawn(client: MergeClient, request: MergeRequest) -> Self {
        let (tx, rx) = bounded(1);
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        let worker = thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create submission runtime: {}", e);
                    let _ = tx.send(Err(MergeError::Io(e)));
                    return;
                }
            };
            let outcome = rt.block_on(async {
                tokio::select! {
                    _ = cancel_rx => {
                        debug!("Merge request cancelled by user");
                        Err(MergeError::Cancelled)
                    }
                    outcome = client.merge(&request) => outcome,
                }
            });
            let _ = tx.send(outcome);
        });

        Self {
            rx,
            cancel: Some(cancel_tx),
            worker: Some(worker),
        }
    }

    /// Abort the in-flight request. The worker's select drops the request
    /// future, tearing down the connection; the outcome then reports
    /// `MergeError::Cancelled`. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Non-blocking poll for the outcome; call once per UI frame.
    /// Yields `Some` exactly once.
    pub fn try_outcome(&mut self) -> Option<MergeOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                if let Some(worker) = self.worker.take() {
                    let _ = worker.join();
                }
                Some(outcome)
            }
            Err(_) => None,
        }
    }
}
