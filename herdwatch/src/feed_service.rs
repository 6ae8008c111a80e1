use std::sync::Arc;

use chrono::Utc;
use herdwatch_api_types::{FeedMode, FeedSnapshot};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::{
    config::{ConfigError, FeedConfig},
    event::{create_event_busses, EventType, FeedReceivers, FeedSenders},
    scheduler::{Scheduler, TickHandle},
    simulator::{FeedState, LiveFeedSimulator, TickChanges},
    source::DataSource,
};

/// A running simulated feed, owned by whatever renders it.
///
/// The feed state itself lives inside the scheduled callback, so the only shared pieces are the
/// watch channels: the live flag flows in, snapshots flow out.
#[derive(Debug)]
pub struct FeedHandle {
    mode: watch::Sender<FeedMode>,
    snapshots: Arc<watch::Sender<FeedSnapshot>>,
    senders: FeedSenders,
    receivers: FeedReceivers,
    ticker: TickHandle,
}

impl FeedHandle {
    /// Publishes `state` as the first snapshot, then ticks on `config.interval()`. Must be called
    /// from within a tokio runtime when using [`crate::TokioScheduler`].
    #[instrument(skip(state, source, scheduler))]
    pub fn start<S, Sch>(
        config: &FeedConfig,
        state: FeedState,
        source: S,
        scheduler: &Sch,
    ) -> Result<Self, ConfigError>
    where
        S: DataSource + 'static,
        Sch: Scheduler,
    {
        config.validate()?;
        let (mode_tx, mode_rx) = watch::channel(FeedMode::Live);
        let snapshots = Arc::new(watch::Sender::new(state.snapshot(FeedMode::Live, 0)));
        let (senders, receivers) = create_event_busses();

        let mut simulator = LiveFeedSimulator::new(source, config);
        let mut state = state;
        let mut tick = 0u64;
        let task_snapshots = snapshots.clone();
        let task_senders = senders.clone();
        let ticker = scheduler.start(config.interval(), move || {
            let is_live = mode_rx.borrow().is_live();
            let Some(changes) = simulator.apply(&mut state, is_live, Utc::now()) else {
                return;
            };
            tick += 1;
            publish_changes(&task_senders, changes);
            // the mode may have flipped mid-tick; read it under the snapshot lock so a concurrent
            // set_live either lands after this write or is seen by it
            task_snapshots.send_modify(|snapshot| {
                *snapshot = state.snapshot(*mode_rx.borrow(), tick);
            });
            debug!(tick, samples = state.samples.len(), "feed ticked");
        });
        info!("feed started");
        Ok(Self {
            mode: mode_tx,
            snapshots,
            senders,
            receivers,
            ticker,
        })
    }

    pub fn mode(&self) -> FeedMode {
        *self.mode.borrow()
    }

    pub fn is_live(&self) -> bool {
        self.mode().is_live()
    }

    /// Only gates future ticks, nothing else about the feed changes. Ignored once stopped.
    pub fn set_live(&self, is_live: bool) {
        if self.is_stopped() {
            debug!("feed stopped, ignoring mode change");
            return;
        }
        let mode = FeedMode::from_live(is_live);
        if self.mode.send_replace(mode) == mode {
            return;
        }
        info!(?mode, "feed mode changed");
        self.snapshots.send_modify(|snapshot| snapshot.mode = mode);
        let _ = self.senders.mode.send(EventType::updated(mode));
    }

    /// Returns the mode in effect afterwards
    pub fn toggle(&self) -> FeedMode {
        self.set_live(self.mode().toggled().is_live());
        self.mode()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn events(&self) -> FeedReceivers {
        self.receivers.clone()
    }

    /// Idempotent
    pub fn stop(&self) {
        self.ticker.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.ticker.is_stopped()
    }

    /// Stops ticking and waits for any in-flight tick to finish
    pub async fn shutdown(self) {
        self.ticker.shutdown().await;
        info!("feed stopped");
    }
}

fn publish_changes(senders: &FeedSenders, changes: TickChanges) {
    let TickChanges {
        sample,
        evicted_samples,
        trending,
        evicted_trending,
    } = changes;
    for evicted in evicted_samples {
        let _ = senders.samples.send(EventType::removed(evicted));
    }
    let _ = senders.samples.send(EventType::added(sample));
    if let Some(entry) = trending {
        metrics::counter!("herdwatch_trending_inserted").increment(1);
        info!(id = %entry.id, name = %entry.name, "new trending product");
        let _ = senders.trending.send(EventType::added(entry));
    }
    for evicted in evicted_trending {
        let _ = senders.trending.send(EventType::removed(evicted));
    }
    metrics::counter!("herdwatch_ticks").increment(1);
}

#[cfg(test)]
mod test {
    use std::{
        sync::{Arc, Mutex, OnceLock},
        time::Duration,
    };

    use chrono::{DateTime, Utc};
    use herdwatch_api_types::{FeedMode, Sample, TrendingEntry};
    use tokio_util::sync::CancellationToken;

    use super::FeedHandle;
    use crate::{
        config::FeedConfig,
        event::EventType,
        scheduler::{Scheduler, TickHandle, TokioScheduler},
        seed,
        simulator::FeedState,
        source::{DataSource, RandomSource},
    };

    fn config(spike_probability: f64) -> FeedConfig {
        FeedConfig {
            interval_ms: 1000,
            spike_probability,
            ..Default::default()
        }
    }

    fn start(spike_probability: f64, state: FeedState) -> FeedHandle {
        let config = config(spike_probability);
        let source = RandomSource::from_config(&config, Some(3)).unwrap();
        FeedHandle::start(&config, state, source, &TokioScheduler).unwrap()
    }

    async fn advance_ticks(ticks: u32) {
        for _ in 0..ticks {
            tokio::time::advance(Duration::from_millis(1000)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_is_published() {
        let state = seed::initial_state(Utc::now());
        let handle = start(0.05, state.clone());
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.mode, FeedMode::Live);
        assert_eq!(snapshot.trending.len(), state.trending.len());
        assert_eq!(snapshot.alerts.len(), state.alerts.len());
        assert!(snapshot.samples.is_empty());
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_bounded_while_live() {
        let handle = start(1.0, FeedState::default());
        advance_ticks(35).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tick, 35);
        assert_eq!(snapshot.samples.len(), 30);
        assert_eq!(snapshot.trending.len(), 5);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_feed_does_not_change() {
        let handle = start(1.0, FeedState::default());
        advance_ticks(4).await;
        handle.set_live(false);
        let frozen = handle.snapshot();
        assert_eq!(frozen.mode, FeedMode::Paused);
        advance_ticks(10).await;
        assert_eq!(handle.snapshot(), frozen);

        assert_eq!(handle.toggle(), FeedMode::Live);
        advance_ticks(1).await;
        let resumed = handle.snapshot();
        assert_eq!(resumed.tick, 5);
        assert_eq!(resumed.samples.len(), 5);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_snapshots_after_stop() {
        let handle = start(0.05, FeedState::default());
        advance_ticks(2).await;
        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());
        let stopped = handle.snapshot();
        advance_ticks(5).await;
        assert_eq!(handle.snapshot(), stopped);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_report_additions_and_evictions() {
        let handle = start(1.0, FeedState::default());
        let mut events = handle.events();
        advance_ticks(6).await;

        let mut added = 0;
        let mut removed = 0;
        while let Ok(event) = events.trending.try_recv() {
            match event {
                EventType::Add(_) => added += 1,
                EventType::Remove(_) => removed += 1,
                EventType::Update(_) => {}
            }
        }
        assert_eq!(added, 6);
        assert_eq!(removed, 1);

        handle.set_live(false);
        let mode = events.mode.try_recv().unwrap();
        assert_eq!(mode, EventType::updated(FeedMode::Paused));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_changes() {
        let handle = start(0.05, FeedState::default());
        let mut receiver = handle.subscribe();
        advance_ticks(1).await;
        assert!(receiver.has_changed().unwrap());
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.samples.len(), 1);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_changes_ignored_after_stop() {
        let handle = start(0.05, FeedState::default());
        let mut events = handle.events();
        advance_ticks(1).await;
        handle.stop();
        let stopped = handle.snapshot();

        assert_eq!(handle.toggle(), FeedMode::Live);
        handle.set_live(false);
        assert_eq!(handle.mode(), FeedMode::Live);
        assert_eq!(handle.snapshot(), stopped);
        assert!(events.mode.try_recv().is_err());
        handle.shutdown().await;
    }

    /// Hands the tick callback back to the test so ticks run exactly when called
    #[derive(Clone, Default)]
    struct ManualScheduler {
        on_tick: Arc<Mutex<Option<Box<dyn FnMut() + Send>>>>,
    }

    impl ManualScheduler {
        fn fire(&self) {
            if let Some(on_tick) = self.on_tick.lock().unwrap().as_mut() {
                on_tick();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn start<F>(&self, _interval: Duration, on_tick: F) -> TickHandle
        where
            F: FnMut() + Send + 'static,
        {
            *self.on_tick.lock().unwrap() = Some(Box::new(on_tick));
            TickHandle::new(CancellationToken::new(), None)
        }
    }

    /// Pauses the feed from inside a tick, after the tick has already decided it is live
    struct PausingSource {
        inner: RandomSource,
        feed: Arc<OnceLock<FeedHandle>>,
    }

    impl DataSource for PausingSource {
        fn next_sample(&mut self, now: DateTime<Utc>) -> Sample {
            if let Some(feed) = self.feed.get() {
                feed.set_live(false);
            }
            self.inner.next_sample(now)
        }

        fn maybe_trending(&mut self, now: DateTime<Utc>) -> Option<TrendingEntry> {
            self.inner.maybe_trending(now)
        }
    }

    #[test]
    fn test_pause_during_tick_is_not_overwritten() {
        let config = config(0.0);
        let feed = Arc::new(OnceLock::new());
        let source = PausingSource {
            inner: RandomSource::from_config(&config, Some(5)).unwrap(),
            feed: feed.clone(),
        };
        let scheduler = ManualScheduler::default();
        let handle = FeedHandle::start(&config, FeedState::default(), source, &scheduler).unwrap();
        assert!(feed.set(handle).is_ok());

        scheduler.fire();
        let handle = feed.get().unwrap();
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.samples.len(), 1);
        assert_eq!(handle.mode(), FeedMode::Paused);
        assert_eq!(snapshot.mode, FeedMode::Paused);

        scheduler.fire();
        assert_eq!(handle.snapshot(), snapshot);
        // the callback holds the source, which holds the feed
        scheduler.on_tick.lock().unwrap().take();
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = FeedConfig {
            window: 0,
            ..Default::default()
        };
        let source = RandomSource::from_config(&FeedConfig::default(), None).unwrap();
        assert!(FeedHandle::start(&config, FeedState::default(), source, &TokioScheduler).is_err());
    }
}
