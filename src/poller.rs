//! Readiness polling
//!
//! Answers "does the set have a healthy quorum right now" and "block me
//! until it does". Status fetching goes through the injectable
//! [`StatusSource`] strategy so tests (or alternate transports) supply
//! their own implementation explicitly instead of patching ambient state.

use std::sync::Arc;
use std::time::Duration;

use slog::{debug, Logger};

use crate::error::Error;
use crate::quorum::has_quorum;
use crate::retry::RetryPolicy;
use crate::session::Session;
use crate::status::{current_status, Status};

/// Strategy for fetching a fresh status snapshot over a session.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    async fn current_status(&self, session: &dyn Session) -> Result<Status, Error>;
}

/// The production source: runs the store's status command.
pub struct CommandStatusSource;

#[async_trait::async_trait]
impl StatusSource for CommandStatusSource {
    async fn current_status(&self, session: &dyn Session) -> Result<Status, Error> {
        current_status(session).await
    }
}

/// Polls status snapshots and evaluates the quorum predicate against them.
pub struct ReadinessPoller {
    source: Arc<dyn StatusSource>,
    poll_interval: Duration,
    logger: Logger,
}

impl ReadinessPoller {
    /// A poller over the store's status command, polling every 500ms.
    pub fn new(logger: Logger) -> Self {
        ReadinessPoller {
            source: Arc::new(CommandStatusSource),
            poll_interval: Duration::from_millis(500),
            logger,
        }
    }

    /// Replace the status-fetching strategy.
    pub fn with_status_source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.source = source;
        self
    }

    /// Change the polling interval used by `wait_until_ready`.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Whether a strict majority of configured members currently reports
    /// healthy.
    ///
    /// A transient connection failure (reset, refused, broken pipe, EOF)
    /// while fetching status means the set is renegotiating, not that the
    /// caller did anything wrong: it is reported as `Ok(false)`. Any other
    /// failure propagates with its cause intact.
    pub async fn is_ready(&self, session: &dyn Session) -> Result<bool, Error> {
        match self.source.current_status(session).await {
            Ok(status) => Ok(has_quorum(&status)),
            Err(err) if err.is_transient_connection() => {
                debug!(self.logger, "status check hit transient connection failure";
                    "error" => %err
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Block until the set has a healthy quorum, or until `timeout_seconds`
    /// of wall-clock time have elapsed, whichever comes first.
    ///
    /// A timeout of zero means one attempt: check once, fail immediately if
    /// not ready. A hard error from `is_ready` aborts the wait at once.
    pub async fn wait_until_ready(
        &self,
        session: &dyn Session,
        timeout_seconds: u64,
    ) -> Result<(), Error> {
        let policy =
            RetryPolicy::deadline(Duration::from_secs(timeout_seconds), self.poll_interval);
        let mut attempt = policy.start();
        while attempt.next().await {
            if self.is_ready(session).await? {
                return Ok(());
            }
            debug!(self.logger, "replica set not ready yet";
                "timeout_seconds" => timeout_seconds
            );
        }
        Err(Error::Timeout { seconds: timeout_seconds })
    }
}
