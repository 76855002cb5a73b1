//! Background poll loop.
//!
//! The `Poller` owns the `QuoteSource` and the staleness tracker and runs on its own
//! thread:
//!
//! - fetch once and post `PricesUpdated` or `FetchFailed` to the UI channel,
//! - count down the configured interval one second at a time, posting `CountdownTick`,
//! - repeat until the shared `running` flag is cleared or the UI side hangs up.
//!
//! Interval and timeout are read from `TimingHandle` at the start of every cycle, so a
//! saved settings change applies from the next cycle on. The thread is never joined; the
//! flag is checked at least once per second.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::Sender;
use gold_common::quote::QuoteBook;
use gold_common::settings::TimingConfig;
use gold_common::{BoardEvent, FetchError, GoldError};
use log::{debug, info, warn};

use crate::fetcher::QuoteSource;
use crate::model::staleness::StalenessTracker;

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Timing values shared between the UI loop (writer) and the worker (reader).
#[derive(Debug, Clone)]
pub struct TimingHandle {
    update_interval: Arc<AtomicU64>,
    error_timeout: Arc<AtomicU64>,
}

impl TimingHandle {
    /// Share `timing`.
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            update_interval: Arc::new(AtomicU64::new(timing.update_interval)),
            error_timeout: Arc::new(AtomicU64::new(timing.error_timeout)),
        }
    }

    /// Publish new values; the worker picks them up on its next cycle.
    pub fn store(&self, timing: TimingConfig) {
        self.update_interval.store(timing.update_interval, Ordering::Relaxed);
        self.error_timeout.store(timing.error_timeout, Ordering::Relaxed);
    }

    /// Current values.
    pub fn load(&self) -> TimingConfig {
        TimingConfig {
            update_interval: self.update_interval.load(Ordering::Relaxed),
            error_timeout: self.error_timeout.load(Ordering::Relaxed),
        }
    }
}

/// Fetch-and-countdown loop feeding the UI channel.
pub struct Poller<S> {
    source: S,
    tracker: StalenessTracker,
    timing: TimingHandle,
    running: Arc<AtomicBool>,
    tx: Sender<BoardEvent>,
}

impl<S: QuoteSource + 'static> Poller<S> {
    /// Create a poller; the staleness clock starts now.
    pub fn new(
        source: S,
        timing: TimingHandle,
        running: Arc<AtomicBool>,
        tx: Sender<BoardEvent>,
    ) -> Self {
        Self {
            source,
            tracker: StalenessTracker::new(Instant::now()),
            timing,
            running,
            tx,
        }
    }

    /// Run the loop on a dedicated thread.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    /// Blocking loop; returns when `running` is cleared or the receiver is dropped.
    pub fn run(mut self) {
        info!("Poll loop started (Thread ID: {:?})", thread::current().id());
        while self.running.load(Ordering::Relaxed) {
            let event = self.poll_once();
            if let Err(e) = self.send(event) {
                warn!("{}", e);
                break;
            }
            if let Err(e) = self.countdown() {
                warn!("{}", e);
                break;
            }
        }
        info!("Poll loop stopping...");
    }

    /// Fetch once and turn the outcome into an event.
    pub fn poll_once(&mut self) -> BoardEvent {
        let result = self.source.fetch();
        self.settle(result, Instant::now())
    }

    /// Update the staleness state with a fetch outcome observed at `now`.
    pub fn settle(&mut self, result: Result<QuoteBook, FetchError>, now: Instant) -> BoardEvent {
        match result {
            Ok(book) => {
                let fetched_at = Local::now();
                self.tracker.record_success(now, fetched_at);
                debug!("Fetched quotes for {} instruments", book.len());
                BoardEvent::PricesUpdated { book, fetched_at }
            }
            Err(e) => {
                let timeout = self.timing.load().timeout();
                let persistent = self.tracker.record_failure(now, timeout);
                warn!(
                    "Price fetch failed ({:?} since last success): {}",
                    self.tracker.elapsed(now),
                    e
                );
                BoardEvent::FetchFailed { persistent }
            }
        }
    }

    fn countdown(&self) -> Result<(), GoldError> {
        let interval = self.timing.load().update_interval;
        for remaining in (1..=interval).rev() {
            if !self.running.load(Ordering::Relaxed) {
                break;
            }
            self.send(BoardEvent::CountdownTick(remaining))?;
            thread::sleep(COUNTDOWN_STEP);
        }
        Ok(())
    }

    fn send(&self, event: BoardEvent) -> Result<(), GoldError> {
        let kind = event.kind();
        self.tx
            .send(event)
            .map_err(|_| GoldError::ChannelSend(format!("UI loop is gone, dropping {}", kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    struct Scripted(VecDeque<Result<QuoteBook, FetchError>>);

    impl QuoteSource for Scripted {
        fn fetch(&mut self) -> Result<QuoteBook, FetchError> {
            self.0
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Network("script exhausted".into())))
        }
    }

    fn poller(
        script: Vec<Result<QuoteBook, FetchError>>,
        timing: TimingConfig,
    ) -> (Poller<Scripted>, crossbeam_channel::Receiver<BoardEvent>, Arc<AtomicBool>) {
        let (tx, rx) = unbounded();
        let running = Arc::new(AtomicBool::new(true));
        let poller = Poller::new(
            Scripted(script.into()),
            TimingHandle::new(timing),
            running.clone(),
            tx,
        );
        (poller, rx, running)
    }

    #[test]
    fn timing_handle_publishes_changes() {
        let handle = TimingHandle::new(TimingConfig::default());
        let reader = handle.clone();
        handle.store(TimingConfig {
            update_interval: 30,
            error_timeout: 1,
        });
        assert_eq!(reader.load().update_interval, 30);
        assert_eq!(reader.load().timeout(), Duration::from_secs(60));
    }

    #[test]
    fn failures_turn_persistent_after_timeout() {
        let (mut poller, _rx, _running) = poller(Vec::new(), TimingConfig::default());
        let start = Instant::now();
        let event = poller.settle(Ok(QuoteBook::default()), start);
        assert!(matches!(event, BoardEvent::PricesUpdated { .. }));

        let fail = || Err(FetchError::Status(502));
        assert_eq!(
            poller.settle(fail(), start + Duration::from_secs(170)),
            BoardEvent::FetchFailed { persistent: false }
        );
        assert_eq!(
            poller.settle(fail(), start + Duration::from_secs(180)),
            BoardEvent::FetchFailed { persistent: true }
        );
    }

    #[test]
    fn timeout_changes_apply_on_next_failure() {
        let (mut poller, _rx, _running) = poller(Vec::new(), TimingConfig::default());
        let start = Instant::now();
        poller.settle(Ok(QuoteBook::default()), start);
        let fail = || Err(FetchError::Network("refused".into()));
        let later = start + Duration::from_secs(90);
        assert_eq!(poller.settle(fail(), later), BoardEvent::FetchFailed { persistent: false });

        poller.timing.store(TimingConfig {
            update_interval: 10,
            error_timeout: 1,
        });
        assert_eq!(poller.settle(fail(), later), BoardEvent::FetchFailed { persistent: true });
    }

    #[test]
    fn loop_posts_result_then_countdown() {
        let timing = TimingConfig {
            update_interval: 1,
            error_timeout: 3,
        };
        let (poller, rx, running) = poller(vec![Ok(QuoteBook::default())], timing);
        let handle = poller.spawn();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, BoardEvent::PricesUpdated { .. }));
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second, BoardEvent::CountdownTick(1));

        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();
    }

    struct Counting(Arc<AtomicUsize>);

    impl QuoteSource for Counting {
        fn fetch(&mut self) -> Result<QuoteBook, FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(QuoteBook::default())
        }
    }

    #[test]
    fn cleared_flag_interrupts_countdown() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = unbounded();
        let running = Arc::new(AtomicBool::new(true));
        let timing = TimingConfig {
            update_interval: 30,
            error_timeout: 3,
        };
        let handle = Poller::new(
            Counting(fetches.clone()),
            TimingHandle::new(timing),
            running.clone(),
            tx,
        )
        .spawn();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, BoardEvent::PricesUpdated { .. }));
        let tick = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(tick, BoardEvent::CountdownTick(30));

        let cleared_at = Instant::now();
        running.store(false, Ordering::SeqCst);
        handle.join().unwrap();
        assert!(cleared_at.elapsed() < Duration::from_secs(2));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(
            rx.try_iter()
                .all(|event| matches!(event, BoardEvent::CountdownTick(_)))
        );
    }

    #[test]
    fn cleared_flag_stops_before_fetching() {
        let (poller, rx, running) = poller(vec![Ok(QuoteBook::default())], TimingConfig::default());
        running.store(false, Ordering::Relaxed);
        poller.run();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_ends_the_loop() {
        let (poller, rx, _running) = poller(vec![Ok(QuoteBook::default())], TimingConfig::default());
        drop(rx);
        poller.run();
    }
}
