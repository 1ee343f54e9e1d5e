use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use pollbox_errors::AppError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_sessions::Session;
use uuid::Uuid;

pub const SESSION_USER_KEY: &str = "user_id";

/// The authenticated user, taken from the server-side session. The session
/// is the only source of the voter identity; request bodies never carry it.
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthenticated)?;

        let user_id: Option<Uuid> = session
            .get(SESSION_USER_KEY)
            .await
            .map_err(|e| AppError::Store(format!("Session load failed: {e}")))?;

        user_id.map(CurrentUser).ok_or(AppError::Unauthenticated)
    }
}

/// Client address for rate limiting: proxy headers first, then the socket
/// peer address.
pub struct ClientIp(pub IpAddr);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = ip_from_headers(&parts.headers)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.0.ip())
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        Ok(ClientIp(ip))
    }
}

fn ip_from_headers(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Some(ip) = real_ip.to_str().ok().and_then(|s| s.trim().parse().ok()) {
            return Some(ip);
        }
    }
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_real_ip_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.9"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1"));
        assert_eq!(
            ip_from_headers(&headers),
            Some("203.0.113.9".parse().unwrap())
        );
    }

    #[test]
    fn takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("198.51.100.1, 10.0.0.1"),
        );
        assert_eq!(
            ip_from_headers(&headers),
            Some("198.51.100.1".parse().unwrap())
        );
    }

    #[test]
    fn garbage_headers_yield_none() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        assert_eq!(ip_from_headers(&headers), None);
    }
}
