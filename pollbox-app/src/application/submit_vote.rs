use crate::domain::VoteReceipt;
use crate::infrastructure::db::{PollRepository, VoteRepository};
use pollbox_errors::AppError;
use uuid::Uuid;

pub struct SubmitVote {
    polls: PollRepository,
    votes: VoteRepository,
}

impl SubmitVote {
    pub fn new(polls: PollRepository, votes: VoteRepository) -> Self {
        Self { polls, votes }
    }

    /// Record `voter_id`'s current choice for a poll. The write itself is a
    /// single upsert keyed on (poll_id, voter_id), so replays and concurrent
    /// double-clicks converge to one row with the latest option.
    pub async fn execute(
        &self,
        poll_id: Uuid,
        option_id: Uuid,
        voter_id: Uuid,
    ) -> Result<VoteReceipt, AppError> {
        if self
            .polls
            .find_by_id(poll_id)
            .await
            .map_err(super::store_error)?
            .is_none()
        {
            return Err(AppError::not_found("Poll"));
        }

        if !self
            .polls
            .option_in_poll(poll_id, option_id)
            .await
            .map_err(super::store_error)?
        {
            return Err(AppError::not_found("Option"));
        }

        // Read the prior row for the "submitted" vs "updated" message only.
        // Correctness never depends on this: the upsert below is atomic and
        // a stale read here can at worst pick the other message.
        let prior = self
            .votes
            .find_by_poll_and_voter(poll_id, voter_id)
            .await
            .map_err(super::store_error)?;

        let vote = self
            .votes
            .upsert(poll_id, option_id, voter_id)
            .await
            .map_err(super::store_error)?;

        Ok(VoteReceipt {
            poll_id: vote.poll_id,
            option_id: vote.option_id,
            updated: prior.is_some(),
        })
    }
}
