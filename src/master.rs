//! Primary location
//!
//! The is-master introspection is much cheaper than a full status fetch:
//! it reports the queried node's own role, the set's name and membership
//! addresses, and which member is currently primary. All addresses are
//! normalized before being returned or compared.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use serde_json::json;

use crate::address::normalize_host_port;
use crate::error::Error;
use crate::session::Session;

/// Reply of the is-master introspection command.
#[derive(Debug, Clone, PartialEq)]
pub struct IsMasterResult {
    /// Whether the queried node is the current primary.
    pub is_master: bool,

    /// Whether the queried node is a secondary.
    pub is_secondary: bool,

    /// Whether the queried node is an arbiter.
    pub is_arbiter: bool,

    /// Address of the queried node, normalized.
    pub address: String,

    /// Wall-clock time at the queried node. Callers use this for
    /// clock-skew checks; it is not interpreted here.
    pub local_time: SystemTime,

    /// Name of the replica set, empty when the node is not part of one.
    pub set_name: String,

    /// Addresses of all non-arbiter members known to the queried node.
    pub addresses: Vec<String>,

    /// Addresses of arbiter members.
    pub arbiters: Vec<String>,

    /// Address of the current primary, empty while there is none.
    pub primary_address: String,
}

#[derive(Deserialize)]
struct IsMasterReply {
    #[serde(rename = "ismaster", default)]
    is_master: bool,
    #[serde(default)]
    secondary: bool,
    #[serde(rename = "arbiterOnly", default)]
    arbiter_only: bool,
    #[serde(default)]
    me: String,
    /// Milliseconds since the Unix epoch at the queried node.
    #[serde(rename = "localTime", default)]
    local_time: i64,
    #[serde(rename = "setName", default)]
    set_name: String,
    #[serde(default)]
    hosts: Vec<String>,
    #[serde(default)]
    arbiters: Vec<String>,
    #[serde(default)]
    primary: String,
}

impl From<IsMasterReply> for IsMasterResult {
    fn from(reply: IsMasterReply) -> IsMasterResult {
        IsMasterResult {
            is_master: reply.is_master,
            is_secondary: reply.secondary,
            is_arbiter: reply.arbiter_only,
            address: normalize_host_port(&reply.me),
            local_time: UNIX_EPOCH + Duration::from_millis(reply.local_time.max(0) as u64),
            set_name: reply.set_name,
            addresses: reply.hosts.iter().map(|h| normalize_host_port(h)).collect(),
            arbiters: reply.arbiters.iter().map(|h| normalize_host_port(h)).collect(),
            primary_address: normalize_host_port(&reply.primary),
        }
    }
}

/// Run the is-master introspection against the node the session is attached
/// to.
pub async fn is_master(session: &dyn Session) -> Result<IsMasterResult, Error> {
    const OP: &str = "run isMaster";
    let reply = session
        .run_command(json!({"isMaster": 1}))
        .await
        .map_err(|e| Error::command(OP, e))?;
    let reply: IsMasterReply =
        serde_json::from_value(reply).map_err(|e| Error::unexpected_reply(OP, e))?;
    Ok(reply.into())
}

/// The current primary's host:port.
///
/// Fails with the distinguished [`Error::MasterNotConfigured`] condition
/// when the queried node is not part of any replica set at all; callers may
/// treat that as "not yet bootstrapped" rather than a true failure.
pub async fn master_host_port(session: &dyn Session) -> Result<String, Error> {
    let result = is_master(session).await?;
    if result.set_name.is_empty() {
        return Err(Error::MasterNotConfigured);
    }
    Ok(result.primary_address)
}
