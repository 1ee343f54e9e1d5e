use super::entities::{poll, poll_option, vote, Poll, PollOption, Vote};
use crate::domain::{self, NewPoll, OptionTally, PageRequest, Paginated, PollResults};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a poll and its options as a unit. The external store gives us
    /// no cross-table transaction here, so a failed option insert triggers a
    /// compensating delete of the poll row; the original error is returned
    /// either way.
    pub async fn create(&self, new_poll: &NewPoll, user_id: Uuid) -> Result<Uuid, DbErr> {
        let poll_id = Uuid::new_v4();
        let active = poll::ActiveModel {
            id: Set(poll_id),
            title: Set(new_poll.title.clone()),
            description: Set(new_poll.description.clone()),
            question: Set(new_poll.question.clone()),
            user_id: Set(user_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await?;

        let options = new_poll.options.iter().enumerate().map(|(i, text)| {
            poll_option::ActiveModel {
                id: Set(Uuid::new_v4()),
                poll_id: Set(poll_id),
                text: Set(text.clone()),
                position: Set(i as i32),
            }
        });

        if let Err(err) = PollOption::insert_many(options).exec(self.db.as_ref()).await {
            tracing::error!("Option insert failed for poll {poll_id}: {err}");
            if let Err(cleanup_err) = Poll::delete_by_id(poll_id).exec(self.db.as_ref()).await {
                tracing::error!("Compensating delete of poll {poll_id} failed: {cleanup_err}");
            }
            return Err(err);
        }

        Ok(poll_id)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<poll::Model>, DbErr> {
        Poll::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Poll metadata plus per-option vote counts and the total, in one read
    /// path. Options with no vote rows count zero.
    pub async fn find_with_results(&self, id: Uuid) -> Result<Option<PollResults>, DbErr> {
        let Some(poll) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let options = self.tally_options(id).await?;
        Ok(Some(PollResults::new(into_domain(poll), options)))
    }

    /// The requesting user's polls, newest first, each with aggregated
    /// counts.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Paginated<PollResults>, DbErr> {
        let paginator = Poll::find()
            .filter(poll::Column::UserId.eq(user_id))
            .order_by_desc(poll::Column::CreatedAt)
            .paginate(self.db.as_ref(), request.page_size);

        let totals = paginator.num_items_and_pages().await?;
        let polls = paginator.fetch_page(request.page - 1).await?;

        let mut items = Vec::with_capacity(polls.len());
        for poll in polls {
            let options = self.tally_options(poll.id).await?;
            items.push(PollResults::new(into_domain(poll), options));
        }

        Ok(Paginated::new(
            items,
            request,
            totals.number_of_items,
            totals.number_of_pages,
        ))
    }

    /// True when the option exists and belongs to the given poll.
    pub async fn option_in_poll(&self, poll_id: Uuid, option_id: Uuid) -> Result<bool, DbErr> {
        let option = PollOption::find_by_id(option_id)
            .filter(poll_option::Column::PollId.eq(poll_id))
            .one(self.db.as_ref())
            .await?;
        Ok(option.is_some())
    }

    async fn tally_options(&self, poll_id: Uuid) -> Result<Vec<OptionTally>, DbErr> {
        let options = PollOption::find()
            .filter(poll_option::Column::PollId.eq(poll_id))
            .order_by_asc(poll_option::Column::Position)
            .all(self.db.as_ref())
            .await?;

        let counts: Vec<(Uuid, i64)> = Vote::find()
            .select_only()
            .column(vote::Column::OptionId)
            .column_as(vote::Column::Id.count(), "votes")
            .filter(vote::Column::PollId.eq(poll_id))
            .group_by(vote::Column::OptionId)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        Ok(options
            .into_iter()
            .map(|o| {
                let votes = counts
                    .iter()
                    .find(|(id, _)| *id == o.id)
                    .map(|(_, n)| *n)
                    .unwrap_or(0);
                OptionTally {
                    id: o.id,
                    text: o.text,
                    position: o.position,
                    votes,
                }
            })
            .collect())
    }
}

fn into_domain(model: poll::Model) -> domain::Poll {
    domain::Poll {
        id: model.id,
        title: model.title,
        description: model.description,
        question: model.question,
        user_id: model.user_id,
        created_at: model.created_at,
    }
}

// The aggregation and listing paths run against live Postgres; only the
// creation control flow is covered here, through a mock connection.
#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn new_poll() -> NewPoll {
        NewPoll::validate(
            None,
            None,
            "Tabs or spaces?",
            &["Tabs".to_string(), "Spaces".to_string()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn option_insert_failure_deletes_the_poll_row() {
        let user_id = Uuid::new_v4();
        let poll_row = poll::Model {
            id: Uuid::new_v4(),
            title: "Untitled Poll".into(),
            description: None,
            question: "Tabs or spaces?".into(),
            user_id,
            created_at: None,
        };

        // Poll insert succeeds, the option batch fails, the compensating
        // delete then removes the poll row.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[poll_row]])
                .append_exec_errors([DbErr::Custom("option insert failed".to_string())])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PollRepository::new(db.clone());
        let err = repo.create(&new_poll(), user_id).await.unwrap_err();
        // The original error is what the caller sees.
        assert!(err.to_string().contains("option insert failed"), "{err}");

        drop(repo);
        let log = Arc::try_unwrap(db)
            .expect("connection still shared")
            .into_transaction_log();
        let deletes = log
            .iter()
            .filter(|t| format!("{t:?}").contains(r#"DELETE FROM "polls""#))
            .count();
        assert_eq!(deletes, 1, "expected exactly one compensating delete");
    }

    #[tokio::test]
    async fn successful_creation_issues_no_delete() {
        let user_id = Uuid::new_v4();
        let poll_row = poll::Model {
            id: Uuid::new_v4(),
            title: "Untitled Poll".into(),
            description: None,
            question: "Tabs or spaces?".into(),
            user_id,
            created_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[poll_row]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );

        let repo = PollRepository::new(db.clone());
        repo.create(&new_poll(), user_id).await.unwrap();

        drop(repo);
        let log = Arc::try_unwrap(db)
            .expect("connection still shared")
            .into_transaction_log();
        assert!(!log.iter().any(|t| format!("{t:?}").contains("DELETE")));
    }
}
