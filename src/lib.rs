//! Replica-set membership and readiness management
//!
//! Keeps a replicated document store configured as a primary/secondary
//! replica set correctly configured, observable, and ready for traffic:
//! initiate a brand-new set, add/remove/replace members, read back the
//! configuration and live health status, locate the current primary, and
//! block until the set has a healthy quorum.
//!
//! Everything operates over a caller-supplied [`Session`] handle to one
//! node of the store; the crate is stateless between calls. Writes are
//! single-shot by design: reconfiguration can trigger primary
//! renegotiation, and callers wrap [`add`]/[`remove`]/[`set`] in their own
//! bounded retry strategy.

pub mod address;
pub mod config;
pub mod error;
pub mod initiate;
pub mod master;
pub mod member;
pub mod poller;
pub mod quorum;
pub mod retry;
pub mod session;
pub mod status;

pub use address::normalize_host_port;
pub use config::{add, current_config, current_members, remove, set};
pub use error::Error;
pub use initiate::Initiator;
pub use master::{is_master, master_host_port, IsMasterResult};
pub use member::{Config, Member};
pub use poller::{CommandStatusSource, ReadinessPoller, StatusSource};
pub use quorum::has_quorum;
pub use retry::{RetryLimit, RetryPolicy};
pub use session::{ReadMode, Session, SessionError};
pub use status::{current_status, MemberState, MemberStatus, Status};

/// Default terminal logger, for binaries and examples that do not bring
/// their own drain.
pub fn default_logger() -> slog::Logger {
    use slog::Drain;
    let decorator = slog_term::PlainDecorator::new(std::io::stdout());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, slog::o!())
}
