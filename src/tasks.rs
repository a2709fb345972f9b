//! Background loads owned by the step that started them.
//!
//! A [`PendingTask`] aborts its tokio task when dropped, so a result can only
//! be delivered while its owner is still alive.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{BookingError, Result};

/// Outcome of a non-blocking check on a [`PendingTask`].
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
    Ready(T),
    Pending,
    /// The task ended without producing a value (aborted or panicked).
    Gone,
}

pub struct PendingTask<T> {
    label: &'static str,
    handle: JoinHandle<()>,
    receiver: oneshot::Receiver<T>,
}

impl<T: Send + 'static> PendingTask<T> {
    /// Spawns `future` on the current tokio runtime. Fails with
    /// [`BookingError::Provider`] when no runtime is entered.
    pub fn spawn<F>(label: &'static str, future: F) -> Result<Self>
    where
        F: Future<Output = T> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|err| {
            warn!(task = label, error = %err, "no runtime for background load");
            BookingError::Provider(format!("{label}: {err}"))
        })?;
        let (sender, receiver) = oneshot::channel();
        let handle = runtime.spawn(async move {
            let value = future.await;
            let _ = sender.send(value);
        });
        debug!(task = label, "background load started");
        Ok(Self {
            label,
            handle,
            receiver,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn try_take(&mut self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Closed) => TaskPoll::Gone,
        }
    }

    /// Waits for the value; `None` when the task ended without one.
    pub async fn wait(mut self) -> Option<T> {
        (&mut self.receiver).await.ok()
    }
}

impl<T> Drop for PendingTask<T> {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(task = self.label, "background load cancelled");
            self.handle.abort();
        }
    }
}
