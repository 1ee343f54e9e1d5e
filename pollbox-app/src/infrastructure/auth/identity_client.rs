use pollbox_errors::AppError;
use serde::Deserialize;

/// The subject the external identity provider reports for a session token.
/// Token issuance and refresh live entirely on the provider's side; this
/// client only performs the current-user lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    pub id: uuid::Uuid,
    pub email: String,
}

#[derive(Clone)]
pub struct IdentityClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Resolve an access token to the user it belongs to. Invalid or expired
    /// tokens come back as `Unauthenticated`; provider outages as `Store`.
    pub async fn verify_token(&self, access_token: &str) -> Result<UserIdentity, AppError> {
        let response = self
            .http_client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Identity provider unreachable: {e}")))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AppError::Unauthenticated);
        }

        if !response.status().is_success() {
            return Err(AppError::Store(format!(
                "Identity provider returned {}",
                response.status()
            )));
        }

        response
            .json::<UserIdentity>()
            .await
            .map_err(|e| AppError::Store(format!("Failed to parse user info: {e}")))
    }
}
