//! Current-user extraction and session cookies

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::api::server::SharedState;
use crate::db::users;
use crate::error::Error;
use crate::models::User;

/// The user behind the request's session cookie, if any.
///
/// A missing, malformed or expired token, or one naming a user that no longer
/// exists, yields an anonymous identity rather than a rejection.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user: Option<User>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl FromRequestParts<SharedState> for Identity {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers, &state.config.auth.cookie_name) else {
            return Ok(Self::anonymous());
        };

        let claims = match state.tokens.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                return Ok(Self::anonymous());
            }
        };

        let user = users::find_by_name(state.db.pool(), &claims.sub).await?;
        if user.is_none() {
            tracing::debug!("Session names unknown user '{}'", claims.sub);
        }
        Ok(Self { user })
    }
}

/// Find the session token in the request cookies
pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value)
}

/// `Set-Cookie` value that stores a session token
pub fn session_cookie(cookie_name: &str, token: &str) -> String {
    format!("{cookie_name}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(cookie_name: &str) -> String {
    format!("{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_no_cookie() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers, "wiki_session").is_none());
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; wiki_session=abc.def.ghi; lang=en"),
        );
        assert_eq!(extract_token(&headers, "wiki_session"), Some("abc.def.ghi"));
        assert!(extract_token(&headers, "other_session").is_none());
    }

    #[test]
    fn test_cleared_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("wiki_session="));
        assert!(extract_token(&headers, "wiki_session").is_none());
    }

    #[test]
    fn test_cookie_values() {
        assert!(session_cookie("wiki_session", "tok").starts_with("wiki_session=tok;"));
        assert!(clear_session_cookie("wiki_session").contains("Max-Age=0"));
    }
}
