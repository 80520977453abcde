//! Operator identity extraction.
//!
//! A fronting identity proxy (oauth2-proxy or equivalent) authenticates
//! operators and asserts who they are via request headers. The extractor
//! here reads those headers, caches the result in the session, and sends
//! anyone without an identity to the proxy's sign-in page with a `next`
//! parameter pointing back to where they were.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use storeroom_core::Email;

use crate::{
    error::set_sentry_user,
    models::{CurrentOperator, keys},
    state::AppState,
};

/// Header carrying the authenticated email, set by the identity proxy.
pub const IDENTITY_EMAIL_HEADER: &str = "x-auth-request-email";

/// Header carrying the display name, set by the identity proxy.
pub const IDENTITY_NAME_HEADER: &str = "x-auth-request-user";

/// Extractor that requires an authenticated operator.
///
/// Handlers that take `RequireOperator` only run for identified
/// operators; everyone else is redirected to sign-in before any platform
/// call happens.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireOperator(operator): RequireOperator,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", operator.display_name())
/// }
/// ```
pub struct RequireOperator(pub CurrentOperator);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        };

        // Fresh proxy headers win over whatever the session remembers.
        if let Some(operator) = operator_from_headers(&parts.headers) {
            if let Err(e) = session
                .insert(keys::CURRENT_OPERATOR, operator.clone())
                .await
            {
                tracing::warn!(error = %e, "Failed to cache operator identity");
            }
            set_sentry_user(operator.email.as_str());
            return Ok(Self(operator));
        }

        // No headers on this request; fall back to the cached identity.
        let cached: Option<CurrentOperator> = session
            .get(keys::CURRENT_OPERATOR)
            .await
            .ok()
            .flatten();

        match cached {
            Some(operator) => {
                set_sentry_user(operator.email.as_str());
                Ok(Self(operator))
            }
            None => Err(sign_in_redirect(state, parts).into_response()),
        }
    }
}

/// Parse the proxy's identity headers.
///
/// Returns `None` unless the email header is present and well-formed;
/// the name header is optional.
fn operator_from_headers(headers: &HeaderMap) -> Option<CurrentOperator> {
    let email = headers.get(IDENTITY_EMAIL_HEADER)?.to_str().ok()?;
    let email = Email::parse(email).ok()?;
    let name = headers
        .get(IDENTITY_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Some(CurrentOperator { email, name })
}

fn sign_in_redirect(state: &AppState, parts: &Parts) -> Redirect {
    let next = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = format!(
        "{}?next={}",
        state.config().identity().sign_in_url,
        urlencoding::encode(next)
    );
    Redirect::to(&url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_EMAIL_HEADER, "ada@example.com".parse().unwrap());
        headers.insert(IDENTITY_NAME_HEADER, "Ada".parse().unwrap());

        let operator = operator_from_headers(&headers).unwrap();
        assert_eq!(operator.email.as_str(), "ada@example.com");
        assert_eq!(operator.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_name_header_is_optional() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_EMAIL_HEADER, "ada@example.com".parse().unwrap());

        let operator = operator_from_headers(&headers).unwrap();
        assert!(operator.name.is_none());
    }

    #[test]
    fn test_missing_email_header_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_NAME_HEADER, "Ada".parse().unwrap());

        assert!(operator_from_headers(&headers).is_none());
    }

    #[test]
    fn test_malformed_email_header_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_EMAIL_HEADER, "not-an-email".parse().unwrap());

        assert!(operator_from_headers(&headers).is_none());
    }
}
