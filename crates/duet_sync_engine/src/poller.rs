//! Poller state machine.

use crate::backoff::Backoff;
use crate::config::PollConfig;
use crate::error::{SinkError, SyncError, SyncResult};
use crate::http::{HttpTransport, UreqClient};
use crate::signal::StopSignal;
use crate::sink::MessageSink;
use crate::transport::MessageTransport;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use duet_protocol::{timestamp, FetchParams, Message};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The current state of a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Never started.
    Idle,
    /// A fetch is in flight.
    Polling,
    /// A batch is being handed to the sink.
    Delivering,
    /// Sleeping until the next regular poll.
    Waiting,
    /// Sleeping after a failure.
    BackingOff,
    /// Stopped; can be started again.
    Stopped,
}

impl PollState {
    /// Returns true if the polling loop is active.
    pub fn is_running(&self) -> bool {
        !matches!(self, PollState::Idle | PollState::Stopped)
    }
}

/// Statistics about polling.
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    /// Fetch calls issued.
    pub polls: u64,
    /// Non-empty batches handed to the sink.
    pub batches_delivered: u64,
    /// Messages handed to the sink.
    pub messages_delivered: u64,
    /// Failed fetches (transport, status or parse).
    pub failures: u64,
    /// Batches the sink failed to accept.
    pub sink_errors: u64,
    /// Time of the last fetch.
    pub last_poll: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// New messages were handed to the sink.
    Delivered {
        /// Number of messages in the batch.
        count: usize,
        /// Cursor after the batch.
        cursor: String,
    },
    /// Nothing new (including unparsable responses).
    Empty,
    /// The relay answered with an error status.
    ServerError {
        /// HTTP status code.
        status: u16,
    },
    /// The relay could not be reached.
    NetworkError,
}

/// Polls a relay for new messages and hands them to a sink.
///
/// The loop runs on a dedicated thread started by [`start`](Poller::start)
/// and ends only when [`stop`](Poller::stop) is called or the poller is
/// dropped. Failures are absorbed with exponential backoff.
pub struct Poller<T: MessageTransport, S: MessageSink> {
    shared: Arc<Shared<T, S>>,
    worker: Mutex<Option<Worker>>,
}

struct Shared<T, S> {
    config: PollConfig,
    transport: T,
    sink: S,
    cursor: RwLock<Option<String>>,
    state: RwLock<PollState>,
    stats: RwLock<PollStats>,
}

struct Worker {
    stop: Arc<StopSignal>,
    done: Receiver<()>,
    handle: JoinHandle<()>,
}

impl<S: MessageSink + 'static> Poller<HttpTransport<UreqClient>, S> {
    /// Creates a poller talking HTTP to `config.server_url`.
    pub fn connect(config: PollConfig, sink: S) -> Self {
        let client = UreqClient::new(config.timeout);
        let transport = HttpTransport::new(config.server_url.clone(), client);
        Self::new(config, transport, sink)
    }
}

impl<T, S> Poller<T, S>
where
    T: MessageTransport + 'static,
    S: MessageSink + 'static,
{
    /// Creates a new poller. The cursor starts at `config.since`.
    pub fn new(config: PollConfig, transport: T, sink: S) -> Self {
        let cursor = config.since.clone();
        Self {
            shared: Arc::new(Shared {
                config,
                transport,
                sink,
                cursor: RwLock::new(cursor),
                state: RwLock::new(PollState::Idle),
                stats: RwLock::new(PollStats::default()),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &PollConfig {
        &self.shared.config
    }

    /// Gets the current state.
    pub fn state(&self) -> PollState {
        *self.shared.state.read()
    }

    /// Gets the current cursor.
    pub fn cursor(&self) -> Option<String> {
        self.shared.cursor.read().clone()
    }

    /// Gets the current stats.
    pub fn stats(&self) -> PollStats {
        self.shared.stats.read().clone()
    }

    /// Returns true while the polling thread is alive.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// Performs a single poll on the calling thread.
    ///
    /// Intended for callers that drive polling themselves. Leaves
    /// [`state`](Poller::state) untouched, since no loop is involved.
    pub fn poll_once(&self) -> PollOutcome {
        self.shared.poll_once(None)
    }

    /// Starts the polling loop. Does nothing if it is already running.
    pub fn start(&self) -> SyncResult<()> {
        let mut worker = self.worker.lock();
        if worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
        {
            debug!("poller already running");
            return Ok(());
        }

        let stop = Arc::new(StopSignal::new());
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let shared = Arc::clone(&self.shared);
        let thread_stop = Arc::clone(&stop);

        self.shared.set_state(PollState::Polling);
        let handle = thread::Builder::new()
            .name("duet-poller".into())
            .spawn(move || {
                // Dropped when the loop returns, which wakes `stop`.
                let _done = done_tx;
                shared.run(&thread_stop);
            })?;

        *worker = Some(Worker {
            stop,
            done: done_rx,
            handle,
        });
        Ok(())
    }

    /// Stops the polling loop.
    ///
    /// Wakes the loop out of any wait and blocks for at most
    /// `config.stop_grace`. Returns false if the thread had not finished by
    /// then (for example while blocked in a slow request); it is detached
    /// and exits on its own once the request returns.
    pub fn stop(&self) -> bool {
        let Some(worker) = self.worker.lock().take() else {
            return true;
        };

        {
            // Under the state lock so a detached worker cannot write after this.
            let _state = self.shared.state.write();
            worker.stop.signal();
        }
        let finished = match worker.done.recv_timeout(self.shared.config.stop_grace) {
            Err(RecvTimeoutError::Timeout) => false,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        };

        if finished {
            if worker.handle.join().is_err() {
                warn!("poller thread panicked");
            }
        } else {
            warn!(
                grace = ?self.shared.config.stop_grace,
                "poller did not stop within grace period, detaching"
            );
        }

        self.shared.set_state(PollState::Stopped);
        finished
    }
}

impl<T: MessageTransport, S: MessageSink> Drop for Poller<T, S> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.get_mut().take() {
            worker.stop.signal();
        }
    }
}

impl<T: MessageTransport, S: MessageSink> Shared<T, S> {
    fn set_state(&self, state: PollState) {
        *self.state.write() = state;
    }

    /// Records a loop transition unless the worker has been told to stop.
    /// Manual polls (`stop == None`) never move the state.
    fn transition(&self, stop: Option<&StopSignal>, state: PollState) {
        if let Some(stop) = stop {
            let mut current = self.state.write();
            if !stop.is_signalled() {
                *current = state;
            }
        }
    }

    fn run(&self, stop: &StopSignal) {
        info!(scope = ?self.config.scope, "poller started");
        let mut backoff = Backoff::new(self.config.poll_interval, &self.config.backoff);

        while !stop.is_signalled() {
            let outcome = self.poll_once(Some(stop));
            let (state, delay) = next_wait(&outcome, &mut backoff, &self.config);
            self.transition(Some(stop), state);

            if stop.wait_for(delay) {
                break;
            }
        }

        // `Poller::stop` records the final state.
        info!("poller stopped");
    }

    fn poll_once(&self, stop: Option<&StopSignal>) -> PollOutcome {
        self.transition(stop, PollState::Polling);
        let cursor = self.cursor.read().clone();
        let params = FetchParams::new(&self.config.scope, cursor.as_deref());

        let result = self.transport.fetch(&params);
        {
            let mut stats = self.stats.write();
            stats.polls += 1;
            stats.last_poll = Some(Instant::now());
        }

        match result {
            Ok(batch) => self.deliver(batch, stop),
            Err(e) => {
                self.record_failure(&e);
                match e {
                    SyncError::Parse(_) => PollOutcome::Empty,
                    SyncError::Status { status, .. } => PollOutcome::ServerError { status },
                    _ => PollOutcome::NetworkError,
                }
            }
        }
    }

    fn deliver(&self, mut batch: Vec<Message>, stop: Option<&StopSignal>) -> PollOutcome {
        let latest = {
            // Filter against the cursor as it is now, not as it was when the
            // fetch started: another poll may have advanced it meanwhile.
            let mut cursor = self.cursor.write();
            batch.retain(|m| m.is_after(cursor.as_deref()));
            timestamp::sort_messages(&mut batch);

            let Some(latest) = batch.last().map(|m| m.timestamp.clone()) else {
                debug!("no new messages");
                return PollOutcome::Empty;
            };
            *cursor = Some(latest.clone());
            latest
        };
        self.transition(stop, PollState::Delivering);

        let count = batch.len();
        debug!(count, cursor = %latest, "delivering batch");
        let delivered = panic::catch_unwind(AssertUnwindSafe(|| self.sink.on_new_messages(&batch)))
            .unwrap_or_else(|payload| Err(SinkError::Panicked(panic_message(payload.as_ref()))));

        let mut stats = self.stats.write();
        stats.batches_delivered += 1;
        stats.messages_delivered += count as u64;
        if let Err(e) = delivered {
            warn!(error = %e, count, "consumer failed to handle batch");
            stats.sink_errors += 1;
            stats.last_error = Some(e.to_string());
        }

        PollOutcome::Delivered {
            count,
            cursor: latest,
        }
    }

    fn record_failure(&self, error: &SyncError) {
        match error {
            SyncError::Parse(_) => warn!(error = %error, "unparsable poll response, treating as empty"),
            _ => warn!(error = %error, "poll failed"),
        }
        let mut stats = self.stats.write();
        stats.failures += 1;
        stats.last_error = Some(error.to_string());
    }
}

/// Decides the state and wait that follow a poll.
fn next_wait(outcome: &PollOutcome, backoff: &mut Backoff, config: &PollConfig) -> (PollState, Duration) {
    match outcome {
        PollOutcome::Delivered { .. } => {
            backoff.reset();
            (PollState::Waiting, config.catch_up_delay)
        }
        PollOutcome::Empty => {
            backoff.reset();
            (PollState::Waiting, config.poll_interval)
        }
        PollOutcome::ServerError { status } => {
            let delay = backoff.next_delay_at_least(config.server_error_floor());
            debug!(status, ?delay, "backing off after error status");
            (PollState::BackingOff, delay)
        }
        PollOutcome::NetworkError => {
            let delay = backoff.next_delay();
            debug!(?delay, "backing off after network failure");
            (PollState::BackingOff, delay)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackoffConfig;
    use crate::sink::{CallbackSink, MemorySink};
    use crate::transport::MockTransport;
    use duet_protocol::{NewMessage, Scope};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn msg(id: &str, from: &str, to: &str, ts: &str) -> Message {
        NewMessage::new(from, to, ts, id).into_message(id).unwrap()
    }

    fn fast_config() -> PollConfig {
        PollConfig::new("memory://")
            .with_poll_interval(Duration::from_millis(10))
            .with_catch_up_delay(Duration::from_millis(1))
            .with_server_error_delay(Duration::from_millis(10))
            .with_stop_grace(Duration::from_secs(2))
    }

    fn poller() -> (
        Arc<MockTransport>,
        Arc<MemorySink>,
        Poller<Arc<MockTransport>, Arc<MemorySink>>,
    ) {
        let transport = Arc::new(MockTransport::new());
        let sink = Arc::new(MemorySink::new());
        let poller = Poller::new(fast_config(), Arc::clone(&transport), Arc::clone(&sink));
        (transport, sink, poller)
    }

    fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    #[test]
    fn poll_state_checks() {
        assert!(!PollState::Stopped.is_running());
        assert!(PollState::Polling.is_running());
        assert!(PollState::BackingOff.is_running());
        assert!(PollState::Waiting.is_running());
        assert!(!PollState::Idle.is_running());
    }

    #[test]
    fn initial_state() {
        let (_, _, poller) = poller();
        assert_eq!(poller.state(), PollState::Idle);
        assert_eq!(poller.cursor(), None);
        assert_eq!(poller.stats().polls, 0);
        assert!(!poller.is_running());
    }

    #[test]
    fn delivered_batch_is_sorted_and_advances_cursor() {
        let (transport, sink, poller) = poller();
        transport.push_messages(vec![
            msg("b", "alice", "bob", "2024-01-01T10:00:02+00:00"),
            msg("a", "alice", "bob", "2024-01-01T10:00:01+00:00"),
        ]);

        let outcome = poller.poll_once();
        assert_eq!(
            outcome,
            PollOutcome::Delivered {
                count: 2,
                cursor: "2024-01-01T10:00:02+00:00".into()
            }
        );

        let ids: Vec<_> = sink.messages().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(poller.cursor().as_deref(), Some("2024-01-01T10:00:02+00:00"));

        poller.poll_once();
        let calls = transport.fetch_calls();
        assert_eq!(calls[0].since(), None);
        assert_eq!(calls[1].since(), Some("2024-01-01T10:00:02+00:00"));
    }

    #[test]
    fn cursor_never_moves_backwards() {
        let (transport, sink, poller) = poller();
        transport.push_messages(vec![msg("new", "a", "b", "2024-01-01T10:00:05+00:00")]);
        transport.push_messages(vec![
            msg("old", "a", "b", "2024-01-01T10:00:01+00:00"),
            msg("same", "a", "b", "2024-01-01T10:00:05+00:00"),
        ]);

        poller.poll_once();
        assert_eq!(poller.poll_once(), PollOutcome::Empty);
        assert_eq!(poller.cursor().as_deref(), Some("2024-01-01T10:00:05+00:00"));
        assert_eq!(sink.batch_count(), 1);

        let cursors: Vec<_> = transport
            .fetch_calls()
            .into_iter()
            .map(|p| p.since)
            .collect();
        assert!(cursors.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn starts_from_configured_cursor() {
        let transport = Arc::new(MockTransport::new());
        let config = fast_config()
            .with_scope(Scope::pair("alice", "bob"))
            .with_since("2024-01-01T00:00:00+00:00");
        let poller = Poller::new(config, Arc::clone(&transport), MemorySink::new());

        poller.poll_once();
        let call = &transport.fetch_calls()[0];
        assert_eq!(call.since(), Some("2024-01-01T00:00:00+00:00"));
        assert_eq!(call.scope(), Scope::pair("alice", "bob"));
    }

    #[test]
    fn failure_outcomes() {
        let (transport, _, poller) = poller();
        transport.push_fetch(Err(SyncError::transport("refused")));
        transport.push_fetch(Err(SyncError::Status {
            status: 500,
            body: String::new(),
        }));
        transport.push_fetch(Err(SyncError::Parse("garbage".into())));

        assert_eq!(poller.poll_once(), PollOutcome::NetworkError);
        assert_eq!(poller.poll_once(), PollOutcome::ServerError { status: 500 });
        assert_eq!(poller.poll_once(), PollOutcome::Empty);

        let stats = poller.stats();
        assert_eq!(stats.polls, 3);
        assert_eq!(stats.failures, 3);
        assert!(stats.last_error.unwrap().contains("garbage"));
        assert_eq!(poller.cursor(), None);
    }

    #[test]
    fn sink_failure_does_not_stop_delivery() {
        let transport = Arc::new(MockTransport::new());
        let sink = CallbackSink::new(|_: &[Message]| Err(SinkError::Failed("ui closed".into())));
        let poller = Poller::new(fast_config(), Arc::clone(&transport), sink);
        transport.push_messages(vec![msg("a", "x", "y", "2024-01-01T10:00:01+00:00")]);

        let outcome = poller.poll_once();
        assert!(matches!(outcome, PollOutcome::Delivered { count: 1, .. }));
        assert_eq!(poller.cursor().as_deref(), Some("2024-01-01T10:00:01+00:00"));
        assert_eq!(poller.stats().sink_errors, 1);
    }

    #[test]
    fn sink_panic_is_contained() {
        let transport = Arc::new(MockTransport::new());
        let sink = CallbackSink::new(|_: &[Message]| -> Result<(), SinkError> { panic!("boom") });
        let poller = Poller::new(fast_config(), Arc::clone(&transport), sink);
        transport.push_messages(vec![msg("a", "x", "y", "2024-01-01T10:00:01+00:00")]);

        assert!(matches!(poller.poll_once(), PollOutcome::Delivered { .. }));
        let stats = poller.stats();
        assert_eq!(stats.sink_errors, 1);
        assert!(stats.last_error.unwrap().contains("boom"));
    }

    #[test]
    fn backoff_grows_and_resets() {
        let config = PollConfig::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_server_error_delay(Duration::ZERO)
            .with_backoff(BackoffConfig::new(2.0, Duration::from_secs(3)));
        let mut backoff = Backoff::new(config.poll_interval, &config.backoff);

        let waits: Vec<_> = (0..3)
            .map(|_| next_wait(&PollOutcome::NetworkError, &mut backoff, &config))
            .collect();
        assert_eq!(
            waits,
            vec![
                (PollState::BackingOff, Duration::from_secs(1)),
                (PollState::BackingOff, Duration::from_secs(2)),
                (PollState::BackingOff, Duration::from_secs(3)),
            ]
        );

        let (state, wait) = next_wait(&PollOutcome::Empty, &mut backoff, &config);
        assert_eq!((state, wait), (PollState::Waiting, Duration::from_secs(1)));

        let (_, wait) = next_wait(&PollOutcome::NetworkError, &mut backoff, &config);
        assert_eq!(wait, Duration::from_secs(1));
    }

    #[test]
    fn server_error_wait_has_floor() {
        let config = PollConfig::default()
            .with_poll_interval(Duration::from_secs(2))
            .with_server_error_delay(Duration::from_secs(5));
        let mut backoff = Backoff::new(config.poll_interval, &config.backoff);

        let outcome = PollOutcome::ServerError { status: 503 };
        assert_eq!(next_wait(&outcome, &mut backoff, &config).1, Duration::from_secs(5));
        assert_eq!(next_wait(&outcome, &mut backoff, &config).1, Duration::from_secs(5));
        assert_eq!(next_wait(&outcome, &mut backoff, &config).1, Duration::from_secs(8));
    }

    #[test]
    fn delivery_resets_backoff_and_catches_up() {
        let config = fast_config();
        let mut backoff = Backoff::new(config.poll_interval, &config.backoff);
        next_wait(&PollOutcome::NetworkError, &mut backoff, &config);
        next_wait(&PollOutcome::NetworkError, &mut backoff, &config);

        let delivered = PollOutcome::Delivered {
            count: 1,
            cursor: "t".into(),
        };
        assert_eq!(
            next_wait(&delivered, &mut backoff, &config),
            (PollState::Waiting, config.catch_up_delay)
        );
        assert_eq!(backoff.current(), config.poll_interval);
    }

    #[test]
    fn background_loop_delivers_and_stops() {
        let (transport, sink, poller) = poller();
        transport.push_fetch(Err(SyncError::transport("not yet")));
        transport.push_messages(vec![msg("a", "x", "y", "2024-01-01T10:00:01+00:00")]);

        poller.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || sink.batch_count() == 1));
        assert!(poller.is_running());

        assert!(poller.stop());
        assert_eq!(poller.state(), PollState::Stopped);
        assert!(!poller.is_running());
        assert_eq!(poller.cursor().as_deref(), Some("2024-01-01T10:00:01+00:00"));
    }

    #[test]
    fn start_is_idempotent() {
        let (_, _, poller) = poller();
        poller.start().unwrap();
        poller.start().unwrap();
        assert!(poller.is_running());
        assert!(poller.stop());

        // Restart after stop.
        poller.start().unwrap();
        assert!(poller.is_running());
        assert!(poller.stop());
    }

    #[test]
    fn stop_interrupts_long_wait() {
        let transport = Arc::new(MockTransport::new());
        let config = fast_config().with_poll_interval(Duration::from_secs(60));
        let poller = Poller::new(config, Arc::clone(&transport), MemorySink::new());

        poller.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || !transport.fetch_calls().is_empty()));

        let started = Instant::now();
        assert!(poller.stop());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn stop_without_start() {
        let (_, _, poller) = poller();
        assert!(poller.stop());
    }

    #[test]
    fn manual_poll_leaves_state_alone() {
        let (transport, _, poller) = poller();
        transport.push_messages(vec![msg("a", "x", "y", "2024-01-01T10:00:01+00:00")]);
        transport.push_fetch(Err(SyncError::transport("down")));

        assert!(matches!(poller.poll_once(), PollOutcome::Delivered { .. }));
        assert_eq!(poller.state(), PollState::Idle);
        assert_eq!(poller.poll_once(), PollOutcome::NetworkError);
        assert_eq!(poller.state(), PollState::Idle);
    }

    /// Blocks on the first fetch, then answers from a fixed history.
    struct SlowFirstFetch {
        history: Vec<Message>,
        calls: AtomicUsize,
        first_delay: Duration,
    }

    impl SlowFirstFetch {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MessageTransport for SlowFirstFetch {
        fn fetch(&self, params: &FetchParams) -> SyncResult<Vec<Message>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                thread::sleep(self.first_delay);
                return Ok(self.history[..1].to_vec());
            }
            Ok(self
                .history
                .iter()
                .filter(|m| m.is_after(params.since()))
                .cloned()
                .collect())
        }

        fn send(&self, _request: &NewMessage) -> SyncResult<Message> {
            Err(SyncError::transport("read only"))
        }
    }

    #[test]
    fn detached_worker_cannot_rewind_cursor() {
        const FIRST: &str = "2024-01-01T10:00:01+00:00";
        const SECOND: &str = "2024-01-01T10:00:02+00:00";

        let transport = Arc::new(SlowFirstFetch {
            history: vec![msg("m1", "a", "b", FIRST), msg("m2", "a", "b", SECOND)],
            calls: AtomicUsize::new(0),
            first_delay: Duration::from_millis(400),
        });
        let sink = Arc::new(MemorySink::new());
        let config = fast_config().with_stop_grace(Duration::from_millis(50));
        let poller = Poller::new(config, Arc::clone(&transport), Arc::clone(&sink));

        poller.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || transport.calls() >= 1));
        // Still inside the slow fetch, so the worker is detached.
        assert!(!poller.stop());

        poller.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || {
            poller.cursor().as_deref() == Some(SECOND)
        }));

        // Let the detached fetch return and its worker exit.
        thread::sleep(Duration::from_millis(600));

        assert_eq!(poller.cursor().as_deref(), Some(SECOND));
        let ids: Vec<_> = sink.messages().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert!(poller.state().is_running());

        assert!(poller.stop());
        assert_eq!(poller.state(), PollState::Stopped);
    }
}
