//! # Auto-save Timer
//!
//! A background thread that runs a tick closure once per interval until it is
//! told to stop.
//!
//! ## Cancellation
//!
//! The thread waits on a stop channel with the interval as timeout, so a stop
//! request wakes it immediately instead of after the remaining sleep. A tick
//! already in progress is never interrupted: [`AutoSaveTimer::stop`] waits for
//! it, up to a bounded timeout, and then detaches the thread if it is still
//! busy.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long shutdown waits for the timer thread to finish its current tick.
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveStatus {
    Stopped,
    Running,
}

pub struct AutoSaveTimer {
    interval: Duration,
    stop_tx: Sender<()>,
    done_rx: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl AutoSaveTimer {
    /// Spawn the timer thread. `tick` runs on that thread after every full interval.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> std::io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("gridflow-autosave".to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let _ = done_tx.send(());
            })?;

        tracing::debug!(interval_ms = interval.as_millis() as u64, "auto-save timer started");
        Ok(Self {
            interval,
            stop_tx,
            done_rx,
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ask the thread to exit after its current tick. Does not wait.
    pub fn signal_stop(&self) {
        let _ = self.stop_tx.send(());
    }

    /// Wait up to `timeout` for the thread to exit. Returns false if it was
    /// still running and had to be detached.
    pub fn join(mut self, timeout: Duration) -> bool {
        match self.done_rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    if handle.join().is_err() {
                        tracing::error!("auto-save thread panicked");
                    }
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "auto-save thread did not stop in time, detaching"
                );
                false
            }
        }
    }

    /// Signal and wait.
    pub fn stop(self, timeout: Duration) -> bool {
        self.signal_stop();
        self.join(timeout)
    }
}
