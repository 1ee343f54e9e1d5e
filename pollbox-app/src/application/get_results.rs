use crate::domain::PollResults;
use crate::infrastructure::db::PollRepository;
use pollbox_errors::AppError;
use uuid::Uuid;

pub struct GetResults {
    polls: PollRepository,
}

impl GetResults {
    pub fn new(polls: PollRepository) -> Self {
        Self { polls }
    }

    /// Poll metadata, options and vote counts. When `requesting_user` is
    /// given the poll must belong to them (owner-only results view); the
    /// public read path passes `None` and skips the check.
    pub async fn execute(
        &self,
        poll_id: Uuid,
        requesting_user: Option<Uuid>,
    ) -> Result<PollResults, AppError> {
        let results = self
            .polls
            .find_with_results(poll_id)
            .await
            .map_err(super::store_error)?
            .ok_or_else(|| AppError::not_found("Poll"))?;

        if let Some(user_id) = requesting_user {
            if results.poll.user_id != user_id {
                return Err(AppError::Forbidden(
                    "You do not own this poll".to_string(),
                ));
            }
        }

        Ok(results)
    }
}
