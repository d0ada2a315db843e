//! Quorum evaluation
//!
//! The readiness predicate over a status snapshot. The set can satisfy
//! writes and elections only once a strict majority of its currently
//! configured members is reachable and healthy, so that is the bar here:
//! majority, not unanimity, and measured against the configured member
//! count rather than any fixed external count.

use crate::status::Status;

/// Whether a strict majority of the members in this snapshot report
/// healthy. A snapshot with no members is never ready.
pub fn has_quorum(status: &Status) -> bool {
    let healthy = status.members.iter().filter(|m| m.healthy).count();
    healthy * 2 > status.members.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{MemberState, MemberStatus};

    fn status_with_health(health: &[bool]) -> Status {
        Status {
            name: "rs0".to_string(),
            members: health
                .iter()
                .enumerate()
                .map(|(i, &healthy)| MemberStatus {
                    id: i as i32 + 1,
                    address: format!("db{}:37017", i),
                    is_self: i == 0,
                    err_msg: String::new(),
                    healthy,
                    state: if healthy { MemberState::Secondary } else { MemberState::Down },
                    uptime: 0,
                    ping: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_healthy_member_is_ready() {
        assert!(has_quorum(&status_with_health(&[true])));
    }

    #[test]
    fn test_single_unhealthy_member_not_ready() {
        assert!(!has_quorum(&status_with_health(&[false])));
    }

    #[test]
    fn test_minority_not_ready() {
        assert!(!has_quorum(&status_with_health(&[true, false, false])));
    }

    #[test]
    fn test_majority_ready_without_unanimity() {
        assert!(has_quorum(&status_with_health(&[true, true, true, false, false])));
    }

    #[test]
    fn test_exact_half_not_ready() {
        assert!(!has_quorum(&status_with_health(&[true, true, false, false])));
    }

    #[test]
    fn test_no_members_not_ready() {
        assert!(!has_quorum(&status_with_health(&[])));
    }
}
