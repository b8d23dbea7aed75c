//! Configuration for the sync engine.

use duet_protocol::Scope;
use std::time::Duration;

/// Configuration for a poller.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Relay base URL (e.g. `http://127.0.0.1:20202`).
    pub server_url: String,
    /// Conversations to follow.
    pub scope: Scope,
    /// Starting cursor; `None` fetches everything.
    pub since: Option<String>,
    /// Wait after an empty poll. Also the backoff base.
    pub poll_interval: Duration,
    /// Pause after delivering a batch before polling again.
    pub catch_up_delay: Duration,
    /// Minimum wait after the relay reports an error status.
    pub server_error_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long `stop` waits for the polling thread.
    pub stop_grace: Duration,
    /// Backoff configuration.
    pub backoff: BackoffConfig,
}

impl PollConfig {
    /// Creates a configuration following all conversations on `server_url`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            scope: Scope::All,
            since: None,
            poll_interval: Duration::from_secs(2),
            catch_up_delay: Duration::from_millis(100),
            server_error_delay: Duration::from_secs(5),
            timeout: Duration::from_secs(10),
            stop_grace: Duration::from_secs(2),
            backoff: BackoffConfig::default(),
        }
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the starting cursor.
    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the pause after a delivered batch.
    pub fn with_catch_up_delay(mut self, delay: Duration) -> Self {
        self.catch_up_delay = delay;
        self
    }

    /// Sets the minimum wait after an error status.
    pub fn with_server_error_delay(mut self, delay: Duration) -> Self {
        self.server_error_delay = delay;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the stop grace period.
    pub fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }

    /// Sets the backoff configuration.
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Wait floor after an error status: never faster than normal polling.
    pub fn server_error_floor(&self) -> Duration {
        self.server_error_delay.max(self.poll_interval)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:20202")
    }
}

/// Configuration for backoff growth. The base is the poll interval.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Multiplier applied after each failure.
    pub multiplier: f64,
    /// Ceiling for the wait.
    pub max_delay: Duration,
}

impl BackoffConfig {
    /// Creates a backoff configuration.
    pub fn new(multiplier: f64, max_delay: Duration) -> Self {
        Self {
            multiplier,
            max_delay,
        }
    }

    /// Sets the multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the ceiling.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::new(2.0, Duration::from_secs(30))
    }
}
