use serde::{Deserialize, Serialize};

use super::Poll;

/// One option together with its vote count. Absent vote rows mean zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionTally {
    pub id: uuid::Uuid,
    pub text: String,
    pub position: i32,
    pub votes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResults {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<OptionTally>,
    pub total_votes: i64,
}

impl PollResults {
    pub fn new(poll: Poll, options: Vec<OptionTally>) -> Self {
        let total_votes = options.iter().map(|o| o.votes).sum();
        Self { poll, options, total_votes }
    }

    /// Share of the total for one option, rounded to the nearest integer.
    /// Presentation only; stored counts are never rounded.
    pub fn percentage(&self, option_id: uuid::Uuid) -> u32 {
        if self.total_votes == 0 {
            return 0;
        }
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| ((o.votes as f64 / self.total_votes as f64) * 100.0).round() as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll() -> Poll {
        Poll {
            id: uuid::Uuid::new_v4(),
            title: "Untitled Poll".into(),
            description: None,
            question: "q".into(),
            user_id: uuid::Uuid::new_v4(),
            created_at: None,
        }
    }

    fn tally(votes: i64) -> OptionTally {
        OptionTally {
            id: uuid::Uuid::new_v4(),
            text: "opt".into(),
            position: 0,
            votes,
        }
    }

    #[test]
    fn total_is_sum_of_option_counts() {
        let results = PollResults::new(poll(), vec![tally(3), tally(0), tally(7)]);
        assert_eq!(results.total_votes, 10);
    }

    #[test]
    fn zero_votes_means_zero_percent() {
        let results = PollResults::new(poll(), vec![tally(0), tally(0)]);
        let first = results.options[0].id;
        assert_eq!(results.total_votes, 0);
        assert_eq!(results.percentage(first), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let results = PollResults::new(poll(), vec![tally(1), tally(2)]);
        let (a, b) = (results.options[0].id, results.options[1].id);
        assert_eq!(results.percentage(a), 33);
        assert_eq!(results.percentage(b), 67);
    }

    #[test]
    fn unknown_option_reports_zero() {
        let results = PollResults::new(poll(), vec![tally(5)]);
        assert_eq!(results.percentage(uuid::Uuid::new_v4()), 0);
    }
}
