//! Session Transport seam
//!
//! The manager is session-oriented: every operation takes a live connection
//! handle to one node of the store and runs administrative commands over it.
//! The handle itself (dialing, pooling, wire protocol) belongs to the caller;
//! this module only defines the trait the manager consumes.

use std::fmt;

use serde_json::Value;

/// Consistency mode of a session's reads.
///
/// `Strong` reads only from the primary, `Monotonic` may start on a secondary
/// but never goes backwards, `Eventual` reads from any reachable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Eventual,
    Monotonic,
    Strong,
}

/// A connected handle to one node of the replicated document store.
///
/// Implementations must be usable from one logical operation at a time; the
/// manager never pools or multiplexes sessions itself. `set_mode` uses
/// interior mutability so a shared handle can switch consistency modes.
#[async_trait::async_trait]
pub trait Session: Send + Sync {
    /// Run an administrative command document and return the structured
    /// reply. A reply the store itself marked as failed (`ok: 0`) must be
    /// surfaced as `SessionError::Command`, not as a success document.
    async fn run_command(&self, command: Value) -> Result<Value, SessionError>;

    /// Current read/consistency mode of the session.
    fn mode(&self) -> ReadMode;

    /// Switch the session's read/consistency mode.
    fn set_mode(&self, mode: ReadMode);

    /// Address of the node this session is connected to, host:port.
    fn address(&self) -> String;
}

/// Errors surfaced by a session while running a command.
#[derive(Debug)]
pub enum SessionError {
    /// Network-level failure talking to the node.
    Io(std::io::Error),

    /// The store executed the command and rejected it (bad config document,
    /// stale config version, missing privileges, ...).
    Command { code: Option<i32>, message: String },

    /// The session has been closed and cannot run further commands.
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(err) => write!(f, "connection error: {}", err),
            SessionError::Command { code: Some(code), message } => {
                write!(f, "command failed (code {}): {}", code, message)
            }
            SessionError::Command { code: None, message } => {
                write!(f, "command failed: {}", message)
            }
            SessionError::Closed => write!(f, "session is closed"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl SessionError {
    /// Whether this is a network failure of the kind expected while the set
    /// is reconfiguring or electing: connection reset/refused/aborted,
    /// broken pipe, or the peer closing the stream mid-reply. The closed set
    /// of kinds here replaces any dynamic inspection of transport
    /// internals.
    pub fn is_transient_connection(&self) -> bool {
        use std::io::ErrorKind;
        match self {
            SessionError::Io(err) => matches!(
                err.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::NotConnected
                    | ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}
