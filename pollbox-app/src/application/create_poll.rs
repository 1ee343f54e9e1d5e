use crate::domain::NewPoll;
use crate::infrastructure::db::PollRepository;
use pollbox_errors::AppError;
use uuid::Uuid;

pub struct CreatePoll {
    polls: PollRepository,
}

impl CreatePoll {
    pub fn new(polls: PollRepository) -> Self {
        Self { polls }
    }

    /// Persist a validated poll with its options. Input validation happens
    /// at the handler boundary via [`NewPoll::validate`], so by the time we
    /// get here the only failures left are the store's.
    pub async fn execute(&self, input: NewPoll, user_id: Uuid) -> Result<Uuid, AppError> {
        let poll_id = self
            .polls
            .create(&input, user_id)
            .await
            .map_err(super::store_error)?;
        tracing::info!("Poll {poll_id} created by {user_id}");
        Ok(poll_id)
    }
}
