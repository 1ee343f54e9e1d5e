use crate::domain::{PageRequest, Paginated, PollResults};
use crate::infrastructure::db::PollRepository;
use pollbox_errors::AppError;
use uuid::Uuid;

pub struct ListPolls {
    polls: PollRepository,
}

impl ListPolls {
    pub fn new(polls: PollRepository) -> Self {
        Self { polls }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Paginated<PollResults>, AppError> {
        self.polls
            .list_for_user(user_id, request)
            .await
            .map_err(super::store_error)
    }
}
