//! Replica-set configuration data model
//!
//! Wire shapes follow the store's native configuration document: the set
//! name is stored under `_id`, member ids under `_id`, addresses under
//! `host`. Optional role flags are carried through reconfiguration verbatim
//! and never interpreted here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A replica-set participant as configured.
///
/// An `id` of zero means "not yet assigned": configured members always carry
/// an id of 1 or greater, so callers building a desired membership list can
/// leave the field at its default and let [`crate::config::set`] mint one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique, stable identifier within a configuration. Never reused.
    #[serde(rename = "_id", default)]
    pub id: i32,

    /// host:port of the member, canonical form (IPv6 literals bracketed).
    #[serde(rename = "host")]
    pub address: String,

    /// Opaque metadata (locality hints and the like), preserved verbatim.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,

    /// Whether the member is an arbiter. Pass-through only.
    #[serde(rename = "arbiterOnly", default, skip_serializing_if = "Option::is_none")]
    pub arbiter: Option<bool>,

    /// Whether the member is hidden from clients. Pass-through only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    /// Election priority. Pass-through only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,

    /// Voting weight. Pass-through only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<i32>,
}

impl Member {
    /// Create an unassigned member at the given address, no tags or flags.
    pub fn new(address: impl Into<String>) -> Self {
        Member {
            id: 0,
            address: address.into(),
            tags: HashMap::new(),
            arbiter: None,
            hidden: None,
            priority: None,
            votes: None,
        }
    }

    /// Attach tags, builder style.
    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }
}

/// The full replica-set configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Replica-set name, immutable once initiated.
    #[serde(rename = "_id")]
    pub name: String,

    /// Monotonically increasing write-conflict marker. A reconfiguration
    /// carrying a stale version is rejected by the store.
    pub version: i32,

    /// Configured members, read-back order preserved.
    pub members: Vec<Member>,
}
