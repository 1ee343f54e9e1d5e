use super::entities::{vote, Vote};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_poll_and_voter(
        &self,
        poll_id: Uuid,
        voter_id: Uuid,
    ) -> Result<Option<vote::Model>, DbErr> {
        Vote::find()
            .filter(vote::Column::PollId.eq(poll_id))
            .filter(vote::Column::VoterId.eq(voter_id))
            .one(self.db.as_ref())
            .await
    }

    /// Record the voter's current choice in a single conditional write:
    /// `INSERT ... ON CONFLICT (poll_id, voter_id) DO UPDATE`. The unique
    /// constraint makes concurrent submissions from the same voter converge
    /// to one row holding the latest option, with no check-then-act window.
    pub async fn upsert(
        &self,
        poll_id: Uuid,
        option_id: Uuid,
        voter_id: Uuid,
    ) -> Result<vote::Model, DbErr> {
        upsert_statement(poll_id, option_id, voter_id)
            .exec_with_returning(self.db.as_ref())
            .await
    }
}

fn upsert_statement(poll_id: Uuid, option_id: Uuid, voter_id: Uuid) -> Insert<vote::ActiveModel> {
    let active = vote::ActiveModel {
        id: Set(Uuid::new_v4()),
        poll_id: Set(poll_id),
        option_id: Set(option_id),
        voter_id: Set(voter_id),
        created_at: Set(Some(chrono::Utc::now())),
    };

    Vote::insert(active).on_conflict(
        OnConflict::columns([vote::Column::PollId, vote::Column::VoterId])
            .update_columns([vote::Column::OptionId, vote::Column::CreatedAt])
            .to_owned(),
    )
}
