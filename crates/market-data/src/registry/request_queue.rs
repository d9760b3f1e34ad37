//! Serializing request queue for upstream calls.
//!
//! Every upstream call goes through a single worker task. The worker takes
//! tasks in submission order, runs one at a time, and waits a fixed spacing
//! after each one finishes before starting the next, whether it succeeded
//! or failed.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::errors::MarketDataError;

/// Default pause between the end of one upstream call and the start of the next.
pub const DEFAULT_DISPATCH_SPACING: Duration = Duration::from_secs(1);

/// Reported when an action panics instead of returning a result.
const QUEUE_ID: &str = "REQUEST_QUEUE";

/// One unit of queued work: runs the upstream action and signals its completion.
type QueueTask = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

#[derive(Debug, Default)]
struct QueueState {
    /// Tasks submitted but not yet picked up by the worker.
    pending: AtomicUsize,
    /// True while the worker is running a task or observing the spacing delay.
    draining: AtomicBool,
}

/// FIFO queue that dispatches upstream calls one at a time with fixed spacing.
///
/// Cheap to share behind an `Arc`; the worker stops once the queue is dropped
/// and every queued task has run.
pub struct RequestQueue {
    sender: mpsc::UnboundedSender<QueueTask>,
    state: Arc<QueueState>,
    spacing: Duration,
}

impl RequestQueue {
    /// Create a queue and spawn its worker on the current tokio runtime.
    pub fn new(spacing: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(QueueState::default());

        tokio::spawn(drain_loop(receiver, state.clone(), spacing));

        Self {
            sender,
            state,
            spacing,
        }
    }

    /// Append an action to the queue and wait for its outcome.
    ///
    /// The action runs exactly once, after every previously submitted action
    /// has finished and the spacing delay has elapsed. Once submitted it runs
    /// to completion even if the caller stops waiting.
    pub async fn submit<T, F, Fut>(&self, action: F) -> Result<T, MarketDataError>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, MarketDataError>> + Send + 'static,
    {
        let (completion, outcome) = oneshot::channel();

        let task: QueueTask = Box::new(move || {
            async move {
                let result = AssertUnwindSafe(async move { action().await })
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        warn!("Queued upstream action panicked");
                        Err(MarketDataError::Transport {
                            provider: QUEUE_ID.to_string(),
                            message: "upstream call aborted unexpectedly".to_string(),
                        })
                    });
                // The caller may have gone away; the outcome is simply dropped then.
                let _ = completion.send(result);
            }
            .boxed()
        });

        self.state.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(task).is_err() {
            self.state.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(MarketDataError::QueueClosed);
        }

        outcome.await.map_err(|_| MarketDataError::QueueClosed)?
    }

    /// Number of tasks waiting to be dispatched (the in-flight task excluded).
    pub fn pending(&self) -> usize {
        self.state.pending.load(Ordering::SeqCst)
    }

    /// Whether the worker is currently running a task or waiting out the spacing.
    pub fn is_draining(&self) -> bool {
        self.state.draining.load(Ordering::SeqCst)
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }
}

async fn drain_loop(
    mut receiver: mpsc::UnboundedReceiver<QueueTask>,
    state: Arc<QueueState>,
    spacing: Duration,
) {
    while let Some(task) = receiver.recv().await {
        state.pending.fetch_sub(1, Ordering::SeqCst);
        state.draining.store(true, Ordering::SeqCst);
        debug!(
            "Request queue: dispatching task ({} still pending)",
            state.pending.load(Ordering::SeqCst)
        );

        task().await;

        tokio::time::sleep(spacing).await;

        if state.pending.load(Ordering::SeqCst) == 0 {
            state.draining.store(false, Ordering::SeqCst);
            debug!("Request queue: drained");
        }
    }

    state.draining.store(false, Ordering::SeqCst);
    debug!("Request queue: worker stopped");
}
