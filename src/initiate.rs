//! Replica-set bootstrap
//!
//! Creates a brand-new, single-member replica set and waits for the store
//! to report it live. The store applies the initiate command
//! asynchronously, so a successful command reply does not yet mean the
//! configuration is visible; the initiator keeps polling status until at
//! least one member shows up. A one-member set is trivially its own
//! quorum, so there is no majority requirement here.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use slog::{debug, info, Logger};

use crate::error::Error;
use crate::member::{Config, Member};
use crate::poller::{CommandStatusSource, StatusSource};
use crate::retry::{RetryLimit, RetryPolicy};
use crate::session::{ReadMode, Session};

/// Bootstraps a new replica set over a session.
pub struct Initiator {
    source: Arc<dyn StatusSource>,
    poll_policy: RetryPolicy,
    logger: Logger,
}

impl Initiator {
    /// An initiator that polls the store's status command every 500ms,
    /// until the new configuration becomes visible.
    pub fn new(logger: Logger) -> Self {
        Initiator {
            source: Arc::new(CommandStatusSource),
            poll_policy: RetryPolicy::until_success(Duration::from_millis(500)),
            logger,
        }
    }

    /// Replace the status-fetching strategy.
    pub fn with_status_source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.source = source;
        self
    }

    /// Bound or retime the visibility poll. The default is unbounded; there
    /// is no attempt count with any semantic meaning, so callers wanting a
    /// ceiling supply a deadline here.
    pub fn with_poll_policy(mut self, policy: RetryPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Create a new replica set named `name` containing exactly one member:
    /// id 1 at `address` with the given tags, then wait until the store
    /// reports the set as live.
    ///
    /// The session's read mode is switched to Monotonic for the bootstrap
    /// write and restored to whatever the caller had set on every exit
    /// path.
    pub async fn initiate(
        &self,
        session: &dyn Session,
        address: &str,
        name: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), Error> {
        let saved_mode = session.mode();
        session.set_mode(ReadMode::Monotonic);
        let result = self.initiate_inner(session, address, name, tags).await;
        session.set_mode(saved_mode);
        result
    }

    async fn initiate_inner(
        &self,
        session: &dyn Session,
        address: &str,
        name: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), Error> {
        const OP: &str = "initiate replica set";

        let cfg = Config {
            name: name.to_string(),
            version: 1,
            members: vec![Member {
                id: 1,
                tags: tags.clone(),
                ..Member::new(address)
            }],
        };

        info!(self.logger, "initiating replica set";
            "name" => name,
            "address" => address
        );
        let doc = serde_json::to_value(&cfg).map_err(|e| Error::unexpected_reply(OP, e))?;
        session
            .run_command(json!({"replSetInitiate": doc}))
            .await
            .map_err(|e| Error::command(OP, e))?;

        // The command has been accepted; now wait for the configuration to
        // become visible. Status errors here are expected while the node
        // stands the set up, so a failed poll is just another attempt.
        let mut attempt = self.poll_policy.start();
        while attempt.next().await {
            match self.source.current_status(session).await {
                Ok(status) if !status.members.is_empty() => {
                    info!(self.logger, "replica set is live";
                        "name" => name,
                        "members" => status.members.len()
                    );
                    return Ok(());
                }
                Ok(_) => {
                    debug!(self.logger, "replica set configuration not visible yet");
                }
                Err(err) => {
                    debug!(self.logger, "status poll failed during initiate";
                        "error" => %err
                    );
                }
            }
        }

        // Only reachable when the caller bounded the poll with a deadline.
        let seconds = match self.poll_policy.limit {
            RetryLimit::Deadline(total) => total.as_secs(),
            RetryLimit::UntilSuccess => unreachable!("unbounded poll cannot expire"),
        };
        Err(Error::Timeout { seconds })
    }
}
