//! Cancellable fixed-period timer on a background thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Shared flag a tick callback checks before touching state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Calls a closure once per period until cancelled or dropped.
///
/// Cancellation is synchronous: once [`Ticker::cancel`] returns, the
/// callback is not running and never runs again.
pub struct Ticker {
    token: CancelToken,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(&CancelToken) + Send + 'static,
    {
        let (stop_tx, stop_rx) = channel::<()>();
        let token = CancelToken::default();
        let thread_token = token.clone();

        let handle = thread::spawn(move || {
            let mut deadline = Instant::now() + period;
            loop {
                let wait = deadline.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        if thread_token.is_cancelled() {
                            break;
                        }
                        on_tick(&thread_token);
                        deadline += period;
                        // Fell behind: skip missed periods rather than bursting.
                        let now = Instant::now();
                        if deadline < now {
                            deadline = now + period;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("ticker stopped");
        });

        Self {
            token,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the timer and wait for the thread to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.token.cancel();
        // Dropping the sender wakes the thread immediately.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take()
            && handle.thread().id() != thread::current().id()
        {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
