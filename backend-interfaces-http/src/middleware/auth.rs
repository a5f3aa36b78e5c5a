use axum::http::HeaderMap;

use backend_domain::{RuntimeConfig, UserId};

pub const USER_HEADER: &str = "X-User-Id";

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Signed-in user as forwarded by the authenticating front end.
pub fn current_user(headers: &HeaderMap) -> Option<UserId> {
    let value = headers.get(USER_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(UserId::new(value))
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
