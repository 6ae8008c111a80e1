use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs a callback on a fixed period until the returned handle is stopped or dropped
pub trait Scheduler {
    fn start<F>(&self, interval: Duration, on_tick: F) -> TickHandle
    where
        F: FnMut() + Send + 'static;
}

/// Owns a running schedule. Dropping the handle stops the schedule, so it should live exactly as
/// long as whatever consumes the ticks.
#[derive(Debug)]
pub struct TickHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn new(token: CancellationToken, task: Option<JoinHandle<()>>) -> Self {
        Self { token, task }
    }

    /// Safe to call any number of times
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            debug!("stopping tick schedule");
        }
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stops the schedule and waits until the callback can no longer run
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Drives ticks from a tokio interval. The first tick fires one full period after `start`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn start<F>(&self, interval: Duration, mut on_tick: F) -> TickHandle
    where
        F: FnMut() + Send + 'static,
    {
        // tokio panics on a zero period
        let period = interval.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let task_token = token.clone();
        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => on_tick(),
                }
            }
            debug!("tick schedule finished");
        });
        TickHandle::new(token, Some(task))
    }
}
