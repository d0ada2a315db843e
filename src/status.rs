//! Live replica-set status
//!
//! A status snapshot is one node's view of every member's health and role at
//! query time. Snapshots are ephemeral: recomputed fresh on every call and
//! never cached.

use serde::Deserialize;
use serde_json::json;

use crate::address::normalize_host_port;
use crate::error::Error;
use crate::session::Session;

/// Role a member reports in a status snapshot. Numeric wire codes 0..=10;
/// anything outside that range decodes as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberState {
    Startup,
    Primary,
    Secondary,
    Recovering,
    Fatal,
    Startup2,
    Unknown,
    Arbiter,
    Down,
    Rollback,
    Shunned,
}

impl MemberState {
    pub fn from_code(code: i32) -> MemberState {
        match code {
            0 => MemberState::Startup,
            1 => MemberState::Primary,
            2 => MemberState::Secondary,
            3 => MemberState::Recovering,
            4 => MemberState::Fatal,
            5 => MemberState::Startup2,
            7 => MemberState::Arbiter,
            8 => MemberState::Down,
            9 => MemberState::Rollback,
            10 => MemberState::Shunned,
            _ => MemberState::Unknown,
        }
    }
}

impl std::fmt::Display for MemberState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MemberState::Startup => "STARTUP",
            MemberState::Primary => "PRIMARY",
            MemberState::Secondary => "SECONDARY",
            MemberState::Recovering => "RECOVERING",
            MemberState::Fatal => "FATAL",
            MemberState::Startup2 => "STARTUP2",
            MemberState::Unknown => "UNKNOWN",
            MemberState::Arbiter => "ARBITER",
            MemberState::Down => "DOWN",
            MemberState::Rollback => "ROLLBACK",
            MemberState::Shunned => "SHUNNED",
        };
        write!(f, "{}", name)
    }
}

/// A live health observation for one configured member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberStatus {
    /// Configured member id.
    pub id: i32,

    /// host:port, normalized.
    pub address: String,

    /// True iff this entry describes the node the session is attached to.
    /// At most one entry per snapshot has this set; zero can happen briefly
    /// right after initiation while the node cannot yet find itself in the
    /// configuration.
    pub is_self: bool,

    /// Error message reported for the member, empty when healthy.
    pub err_msg: String,

    /// Whether the queried node considers this member healthy.
    pub healthy: bool,

    /// Reported role.
    pub state: MemberState,

    /// Seconds the member has been up, as seen by the queried node.
    pub uptime: u64,

    /// Round-trip latency to the member in milliseconds.
    pub ping: f64,
}

/// Snapshot of all members' health/role as seen by one node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Status {
    pub name: String,
    pub members: Vec<MemberStatus>,
}

#[derive(Deserialize)]
struct StatusReply {
    #[serde(rename = "set", default)]
    set: String,
    #[serde(default)]
    members: Vec<MemberStatusReply>,
}

#[derive(Deserialize)]
struct MemberStatusReply {
    #[serde(rename = "_id")]
    id: i32,
    #[serde(rename = "name", default)]
    name: String,
    #[serde(rename = "self", default)]
    is_self: bool,
    #[serde(default)]
    health: f64,
    #[serde(default)]
    state: i32,
    #[serde(rename = "errmsg", default)]
    err_msg: String,
    #[serde(default)]
    uptime: u64,
    #[serde(rename = "pingMs", default)]
    ping_ms: f64,
}

impl From<StatusReply> for Status {
    fn from(reply: StatusReply) -> Status {
        Status {
            name: reply.set,
            members: reply
                .members
                .into_iter()
                .map(|m| MemberStatus {
                    id: m.id,
                    address: normalize_host_port(&m.name),
                    is_self: m.is_self,
                    err_msg: m.err_msg,
                    healthy: m.health != 0.0,
                    state: MemberState::from_code(m.state),
                    uptime: m.uptime,
                    ping: m.ping_ms,
                })
                .collect(),
        }
    }
}

/// Fetch a fresh status snapshot from the node the session is attached to.
///
/// A command failure is surfaced, not swallowed, even while the set is
/// mid-election; classifying and absorbing transient failures is the
/// readiness poller's job.
pub async fn current_status(session: &dyn Session) -> Result<Status, Error> {
    const OP: &str = "get replica set status";
    let reply = session
        .run_command(json!({"replSetGetStatus": 1}))
        .await
        .map_err(|e| Error::command(OP, e))?;
    let reply: StatusReply =
        serde_json::from_value(reply).map_err(|e| Error::unexpected_reply(OP, e))?;
    Ok(reply.into())
}
