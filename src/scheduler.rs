//! Deferred callbacks tied to the lifetime of their owner.
//!
//! A [`ScheduledTask`] aborts its timer when dropped, so a view that owns
//! one cannot be mutated by a callback after it has been torn down.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Handle to a callback scheduled on the tokio runtime
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Runs `callback` once after `delay`.
    ///
    /// Returns `None` when called outside a tokio runtime; the callback is
    /// dropped without running.
    pub fn after<F>(delay: Duration, callback: F) -> Option<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(delay_ms = delay.as_millis() as u64, "no async runtime, timer not scheduled");
                return None;
            }
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });

        Some(Self {
            handle: Some(handle),
        })
    }

    /// Cancels the callback if it has not run yet
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Lets the callback run to completion even after this handle is gone
    pub fn detach(mut self) {
        self.handle.take();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Simulated loading delay shown as a skeleton before a view renders
#[derive(Debug)]
pub struct LoadingGate {
    ready: watch::Receiver<bool>,
    timer: Option<ScheduledTask>,
}

impl LoadingGate {
    /// Starts loading; the gate opens after `delay`. A zero delay, or no
    /// async runtime, opens it immediately.
    pub fn start(delay: Duration) -> Self {
        let (tx, ready) = watch::channel(false);

        let timer = if delay.is_zero() {
            None
        } else {
            ScheduledTask::after(delay, move || {
                tx.send_replace(true);
            })
        };

        Self { ready, timer }
    }

    pub fn is_loading(&self) -> bool {
        self.timer.is_some() && !*self.ready.borrow()
    }

    /// Waits until the delay has elapsed
    pub async fn wait_ready(&mut self) {
        if self.timer.is_none() {
            return;
        }
        // An error means the timer was aborted; nothing left to wait for.
        let _ = self.ready.wait_for(|ready| *ready).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_runs_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let task = ScheduledTask::after(Duration::from_millis(100), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(100)).await;
        tokio::task::yield_now().await;
        assert!(fired.load(Ordering::SeqCst));
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_task_never_fires() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let task = ScheduledTask::after(Duration::from_millis(100), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();
        drop(task);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_task_still_fires() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        ScheduledTask::after(Duration::from_millis(10), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap()
        .detach();

        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_no_runtime_returns_none() {
        assert!(ScheduledTask::after(Duration::from_millis(1), || {}).is_none());

        let gate = LoadingGate::start(Duration::from_millis(500));
        assert!(!gate.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_gate_opens_after_delay() {
        let mut gate = LoadingGate::start(Duration::from_millis(500));
        assert!(gate.is_loading());

        gate.wait_ready().await;
        assert!(!gate.is_loading());
    }

    #[tokio::test]
    async fn test_loading_gate_zero_delay() {
        let mut gate = LoadingGate::start(Duration::ZERO);
        assert!(!gate.is_loading());
        gate.wait_ready().await;
    }
}
