use crate::application::{CreatePoll, GetResults, ListPolls, SubmitVote};
use crate::infrastructure::auth::IdentityClient;
use crate::infrastructure::db::{self, PollRepository, VoteRepository};
use crate::infrastructure::security::{RateLimitConfig, RateLimiter};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppContext {
    pub create_poll: Arc<CreatePoll>,
    pub submit_vote: Arc<SubmitVote>,
    pub get_results: Arc<GetResults>,
    pub list_polls: Arc<ListPolls>,
    pub identity: IdentityClient,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(
        db: DatabaseConnection,
        identity: IdentityClient,
        rate_limit: RateLimitConfig,
    ) -> Self {
        let db = Arc::new(db);
        let polls = PollRepository::new(db.clone());
        let votes = VoteRepository::new(db);

        Self {
            create_poll: Arc::new(CreatePoll::new(polls.clone())),
            submit_vote: Arc::new(SubmitVote::new(polls.clone(), votes)),
            get_results: Arc::new(GetResults::new(polls.clone())),
            list_polls: Arc::new(ListPolls::new(polls)),
            identity,
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    /// Wire the context from the environment: `DATABASE_URL` and
    /// `IDENTITY_BASE_URL` are required, rate-limit knobs are optional.
    pub async fn from_env() -> Result<Self, DbErr> {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let identity_base_url =
            std::env::var("IDENTITY_BASE_URL").expect("IDENTITY_BASE_URL must be set");

        let db = db::create_connection(&database_url).await?;
        db::run_migrations(&db).await?;

        let mut rate_limit = RateLimitConfig::default();
        if let Ok(max) = std::env::var("RATE_LIMIT_MAX") {
            if let Ok(max) = max.parse() {
                rate_limit.max_requests = max;
            }
        }
        if let Ok(secs) = std::env::var("RATE_LIMIT_WINDOW_SECS") {
            if let Ok(secs) = secs.parse() {
                rate_limit.window = Duration::from_secs(secs);
            }
        }

        Ok(Self::new(db, IdentityClient::new(identity_base_url), rate_limit))
    }
}
