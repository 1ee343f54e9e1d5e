use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pollbox_app::domain::{NewPoll, PageRequest, Paginated, PollResults};
use pollbox_app::AppContext;
use pollbox_errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use uuid::Uuid;

use crate::extract::{ClientIp, CurrentUser, SESSION_USER_KEY};

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub access_token: String,
}

/// Exchange a provider-issued access token for a server-side session.
pub async fn create_session(
    State(ctx): State<AppContext>,
    session: Session,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let identity = ctx.identity.verify_token(&body.access_token).await?;

    session
        .insert(SESSION_USER_KEY, identity.id)
        .await
        .map_err(|e| AppError::Store(format!("Session store failed: {e}")))?;

    Ok(Json(json!({
        "id": identity.id,
        "email": identity.email,
    })))
}

pub async fn delete_session(session: Session) -> Result<StatusCode, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Store(format!("Session store failed: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct CreatePollRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

pub async fn create_poll(
    State(ctx): State<AppContext>,
    ClientIp(ip): ClientIp,
    user: CurrentUser,
    Json(body): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    ctx.rate_limiter.check(ip)?;

    let input = NewPoll::validate(
        body.title.as_deref(),
        body.description.as_deref(),
        &body.question,
        &body.options,
    )?;

    let poll_id = ctx.create_poll.execute(input, user.0).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": poll_id,
            "message": "Poll created successfully",
        })),
    ))
}

/// Public poll view with aggregated counts; no ownership check.
pub async fn get_poll(
    State(ctx): State<AppContext>,
    Path(poll_id): Path<Uuid>,
) -> Result<Json<PollResults>, AppError> {
    let results = ctx.get_results.execute(poll_id, None).await?;
    Ok(Json(results))
}

/// Owner-only results view; 403 for anyone but the poll's creator.
pub async fn get_poll_results(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Path(poll_id): Path<Uuid>,
) -> Result<Json<PollResults>, AppError> {
    let results = ctx.get_results.execute(poll_id, Some(user.0)).await?;
    Ok(Json(results))
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub poll_id: Uuid,
    pub option_id: Uuid,
}

#[derive(Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub message: &'static str,
    pub updated: bool,
}

pub async fn submit_vote(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Json(body): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let receipt = ctx
        .submit_vote
        .execute(body.poll_id, body.option_id, user.0)
        .await?;

    Ok(Json(VoteResponse {
        success: true,
        message: receipt.message(),
        updated: receipt.updated,
    }))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

pub async fn my_polls(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<PollResults>>, AppError> {
    let request = PageRequest::new(query.page, query.page_size);
    let page = ctx.list_polls.execute(user.0, request).await?;
    Ok(Json(page))
}
