//! Error types for replica-set management operations

use std::fmt;

use crate::session::SessionError;

/// Errors that can occur during replica-set management operations
#[derive(Debug)]
pub enum Error {
    /// The store failed to execute a command, or the transport failed while
    /// running it. The originating session failure is kept as the cause.
    Command { op: String, source: SessionError },

    /// A command succeeded but its reply document did not have the expected
    /// shape.
    UnexpectedReply { op: String, source: serde_json::Error },

    /// The wait-until-ready deadline elapsed without observing quorum.
    Timeout { seconds: u64 },

    /// The queried node is not part of any replica-set configuration yet.
    MasterNotConfigured,
}

impl Error {
    pub(crate) fn command(op: &str, source: SessionError) -> Self {
        Error::Command { op: op.to_string(), source }
    }

    pub(crate) fn unexpected_reply(op: &str, source: serde_json::Error) -> Self {
        Error::UnexpectedReply { op: op.to_string(), source }
    }

    /// Whether the underlying failure is a transient network error of the
    /// kind expected during reconfiguration and elections.
    pub fn is_transient_connection(&self) -> bool {
        match self {
            Error::Command { source, .. } => source.is_transient_connection(),
            _ => false,
        }
    }

    /// Whether this is the distinguished "no replica set configured yet"
    /// condition from `master_host_port`.
    pub fn is_master_not_configured(&self) -> bool {
        matches!(self, Error::MasterNotConfigured)
    }

    /// Whether this is a wait-until-ready deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Command { op, source } => write!(f, "cannot {}: {}", op, source),
            Error::UnexpectedReply { op, source } => {
                write!(f, "malformed reply to {}: {}", op, source)
            }
            Error::Timeout { seconds } => write!(f, "timed out after {} seconds", seconds),
            Error::MasterNotConfigured => write!(f, "master not configured"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Command { source, .. } => Some(source),
            Error::UnexpectedReply { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout { seconds: 0 };
        assert_eq!(err.to_string(), "timed out after 0 seconds");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_command_error_preserves_cause() {
        let cause = SessionError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        let err = Error::command("get replica set status", cause);
        assert!(err.is_transient_connection());

        let source = err.source().expect("cause should be preserved");
        assert!(source.to_string().contains("reset"));
    }

    #[test]
    fn test_master_not_configured_is_distinguished() {
        let err = Error::MasterNotConfigured;
        assert!(err.is_master_not_configured());
        assert!(!err.is_transient_connection());
        assert_eq!(err.to_string(), "master not configured");
    }
}
