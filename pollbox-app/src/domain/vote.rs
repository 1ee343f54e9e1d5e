use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: uuid::Uuid,
    pub poll_id: uuid::Uuid,
    pub option_id: uuid::Uuid,
    pub voter_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Result of recording a vote. `updated` only affects the user-facing
/// message; the stored row is the same either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub poll_id: uuid::Uuid,
    pub option_id: uuid::Uuid,
    pub updated: bool,
}

impl VoteReceipt {
    pub fn message(&self) -> &'static str {
        if self.updated {
            "Your vote has been updated"
        } else {
            "Your vote has been submitted"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_message_tracks_outcome() {
        let id = uuid::Uuid::new_v4();
        let fresh = VoteReceipt { poll_id: id, option_id: id, updated: false };
        let changed = VoteReceipt { poll_id: id, option_id: id, updated: true };
        assert_eq!(fresh.message(), "Your vote has been submitted");
        assert_eq!(changed.message(), "Your vote has been updated");
    }
}
