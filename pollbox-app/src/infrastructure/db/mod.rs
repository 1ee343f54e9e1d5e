pub mod entities;
mod poll_repository;
mod vote_repository;

pub use poll_repository::PollRepository;
pub use vote_repository::VoteRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    // Split by semicolons and execute each statement
    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        if let Err(err) = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await
        {
            // Re-running the migration against an existing schema is fine;
            // anything else must not pass silently, since this file is also
            // what creates the votes uniqueness constraint.
            if is_already_applied(&err) {
                tracing::debug!("Migration statement skipped: {err}");
            } else {
                return Err(err);
            }
        }
    }

    Ok(())
}

fn is_already_applied(err: &DbErr) -> bool {
    err.to_string().contains("already exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerun_errors_are_benign() {
        let err = DbErr::Custom(r#"relation "polls" already exists"#.to_string());
        assert!(is_already_applied(&err));
        let err = DbErr::Custom(r#"constraint "votes_one_per_voter" already exists"#.to_string());
        assert!(is_already_applied(&err));
    }

    #[test]
    fn real_failures_are_surfaced() {
        assert!(!is_already_applied(&DbErr::Custom(
            "permission denied for schema public".to_string()
        )));
        assert!(!is_already_applied(&DbErr::Custom(
            "syntax error at or near \"CONSTRAINT\"".to_string()
        )));
    }
}
