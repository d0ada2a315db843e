//! Config reader/writer
//!
//! Reads the replica-set configuration document back from the store and
//! applies new membership, either wholesale ([`set`]) or incrementally
//! ([`add`] / [`remove`]). Every write is a single network round trip with
//! no internal retry: reconfiguration can trigger primary renegotiation
//! lasting tens of seconds, and the retry/backoff policy for that belongs
//! to the caller, not here.

use serde::Deserialize;
use serde_json::json;

use crate::address::normalize_host_port;
use crate::error::Error;
use crate::member::{Config, Member};
use crate::session::Session;

#[derive(Deserialize)]
struct ConfigReply {
    config: Config,
}

/// Read the current replica-set configuration document.
pub async fn current_config(session: &dyn Session) -> Result<Config, Error> {
    const OP: &str = "get replica set config";
    let reply = session
        .run_command(json!({"replSetGetConfig": 1}))
        .await
        .map_err(|e| Error::command(OP, e))?;
    let reply: ConfigReply =
        serde_json::from_value(reply).map_err(|e| Error::unexpected_reply(OP, e))?;

    let mut cfg = reply.config;
    for member in &mut cfg.members {
        member.address = normalize_host_port(&member.address);
    }
    Ok(cfg)
}

/// Read the currently configured members.
pub async fn current_members(session: &dyn Session) -> Result<Vec<Member>, Error> {
    Ok(current_config(session).await?.members)
}

/// Replace the entire membership list in one write.
///
/// Ids are reconciled against the configuration currently in the store: a
/// member whose address matches an existing member keeps that member's id,
/// every other member gets a freshly minted one. The write carries the
/// just-read version plus one; if another writer got there first the store
/// rejects it and the caller re-reads and retries.
pub async fn set(session: &dyn Session, members: Vec<Member>) -> Result<(), Error> {
    const OP: &str = "set replica set members";
    let cfg = current_config(session).await?;
    let cfg = Config {
        name: cfg.name,
        version: cfg.version + 1,
        members: assign_member_ids(&cfg.members, members),
    };

    let doc = serde_json::to_value(&cfg).map_err(|e| Error::unexpected_reply(OP, e))?;
    session
        .run_command(json!({"replSetReconfig": doc}))
        .await
        .map_err(|e| Error::command(OP, e))?;
    Ok(())
}

/// Add the given members to the replica set.
///
/// Idempotent per address: a member whose address is already configured is
/// skipped, so re-adding never produces a duplicate.
pub async fn add(session: &dyn Session, members: Vec<Member>) -> Result<(), Error> {
    let mut merged = current_members(session).await?;
    for mut member in members {
        // Normalize before the duplicate check so a raw literal and its
        // bracketed form, in this batch or already configured, count as the
        // same member.
        member.address = normalize_host_port(&member.address);
        if !merged.iter().any(|m| m.address == member.address) {
            merged.push(member);
        }
    }
    set(session, merged).await
}

/// Remove members with the given addresses from the replica set.
pub async fn remove(session: &dyn Session, addresses: &[String]) -> Result<(), Error> {
    let addresses: Vec<String> = addresses.iter().map(|a| normalize_host_port(a)).collect();
    let mut members = current_members(session).await?;
    members.retain(|m| !addresses.contains(&m.address));
    set(session, members).await
}

/// Reconcile a desired membership list against the configured one.
///
/// Address matches keep their configured id. Everything else gets
/// `1 + max(all existing and all newly assigned ids)`, in the order
/// supplied, so ids are never reused even across removals.
fn assign_member_ids(current: &[Member], desired: Vec<Member>) -> Vec<Member> {
    let mut max_id = current.iter().map(|m| m.id).max().unwrap_or(0);
    desired
        .into_iter()
        .map(|mut member| {
            member.address = normalize_host_port(&member.address);
            match current.iter().find(|m| m.address == member.address) {
                Some(existing) => member.id = existing.id,
                None => {
                    max_id += 1;
                    member.id = max_id;
                }
            }
            member
        })
        .collect()
}
