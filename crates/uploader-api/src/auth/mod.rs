//! Authenticated principal extraction.
//!
//! The handler receives the principal as an explicit argument instead of
//! reading ambient security context: a `FromRequestParts` extractor parses the
//! `Authorization` header before the body is touched.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uploader_core::AppError;

use crate::error::HttpAppError;

/// The authenticated caller. Identity resolution happens upstream; here the
/// token is opaque and is only forwarded to collaborators.
#[derive(Debug, Clone)]
pub struct Principal {
    pub token: String,
}

impl Principal {
    /// The `Authorization` header value used for downstream calls. The
    /// platform convention downstream is a lowercase `bearer` scheme.
    pub fn bearer_token(&self) -> String {
        format!("bearer {}", self.token)
    }
}

/// Parse a bearer token out of an Authorization header value. Scheme matching
/// is case-insensitive ("Bearer" and "bearer" are both accepted).
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing authorization header".to_string(),
                ))
            })?;

        let token = parse_bearer(header).ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            ))
        })?;

        Ok(Principal {
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_accepts_both_schemes() {
        assert_eq!(parse_bearer("bearer abc123"), Some("abc123"));
        assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn test_parse_bearer_rejects_other_schemes() {
        assert_eq!(parse_bearer("Basic abc123"), None);
        assert_eq!(parse_bearer("abc123"), None);
        assert_eq!(parse_bearer("bearer "), None);
        assert_eq!(parse_bearer(""), None);
    }

    #[test]
    fn test_bearer_token_uses_lowercase_scheme() {
        let principal = Principal {
            token: "abc123".to_string(),
        };
        assert_eq!(principal.bearer_token(), "bearer abc123");
    }
}
