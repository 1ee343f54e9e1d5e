mod create_poll;
mod get_results;
mod list_polls;
mod submit_vote;

pub use create_poll::CreatePoll;
pub use get_results::GetResults;
pub use list_polls::ListPolls;
pub use submit_vote::SubmitVote;

use pollbox_errors::AppError;

/// Store failures are logged with their backend detail and surfaced as the
/// opaque variant; clients only ever see a generic internal error.
pub(crate) fn store_error(err: sea_orm::DbErr) -> AppError {
    tracing::error!("Store error: {err}");
    AppError::Store(err.to_string())
}
