//! Trailing-edge debounce.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Delays a callback until calls stop arriving for `wait`.
///
/// Every [`call`](Self::call) restarts the timer and replaces the pending
/// argument, so only the last call inside an idle window reaches the
/// callback. Pending calls are cancelled when the debouncer is dropped.
pub struct Debouncer<T> {
    wait: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Wrap `callback` so it fires `wait` after the last call.
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Schedule the callback with `value`, cancelling any pending call.
    ///
    /// Without a Tokio runtime the call is dropped with a warning.
    pub fn call(&self, value: T) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "No async runtime, debounced call dropped");
                return;
            }
        };

        let wait = self.wait;
        let callback = Arc::clone(&self.callback);
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(handle.spawn(async move {
            tokio::time::sleep(wait).await;
            callback(value);
        }));
    }

    /// Cancel the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// The idle window.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}
