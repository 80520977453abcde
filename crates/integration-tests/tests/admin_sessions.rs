//! Identity and session behavior.
//!
//! A fronting proxy asserts who the operator is via request headers.
//! The dashboard caches that identity in the session cookie, sends
//! anonymous visitors to the sign-in page with a return destination,
//! and keeps health probes and static assets outside the identity
//! check.

use storeroom_admin::middleware::auth::{IDENTITY_EMAIL_HEADER, IDENTITY_NAME_HEADER};
use storeroom_admin::middleware::session::SESSION_COOKIE_NAME;
use storeroom_integration_tests::{OPERATOR_EMAIL, OPERATOR_NAME, SIGN_IN_URL, TestContext, bare_client};

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("expected a redirect location")
        .to_string()
}

// ============================================================================
// Sign-in redirects
// ============================================================================

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_sign_in() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    let response = client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("{SIGN_IN_URL}?next=%2F"));
    // Nobody talks to the platform on behalf of an anonymous visitor.
    assert_eq!(ctx.platform.hits("stores.list"), 0);
}

#[tokio::test]
async fn test_sign_in_redirect_preserves_destination() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let client = bare_client();

    let response = client
        .get(ctx.url(&format!("/{}/colors", store.id)))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("{SIGN_IN_URL}?next=%2F{}%2Fcolors", store.id)
    );
    // Identity is checked before the store is resolved.
    assert_eq!(ctx.platform.hits("stores.get"), 0);
}

#[tokio::test]
async fn test_malformed_identity_email_is_rejected() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    let response = client
        .get(ctx.url("/"))
        .header(IDENTITY_EMAIL_HEADER, "not-an-email")
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with(SIGN_IN_URL));
}

// ============================================================================
// Session caching
// ============================================================================

#[tokio::test]
async fn test_default_client_is_signed_in() {
    let ctx = TestContext::start().await;

    let body = ctx.get_html("/").await;

    assert!(body.contains(OPERATOR_NAME));
}

#[tokio::test]
async fn test_identity_headers_are_cached_in_the_session() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    // First request carries the proxy headers and materializes a session.
    let first = client
        .get(ctx.url("/"))
        .header(IDENTITY_EMAIL_HEADER, OPERATOR_EMAIL)
        .header(IDENTITY_NAME_HEADER, "Robin")
        .send()
        .await
        .expect("request failed");
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    assert!(first.text().await.expect("body").contains("Robin"));

    // Same cookie jar, no headers: the cached identity serves the page.
    let second = client.get(ctx.url("/")).send().await.expect("request failed");
    assert_eq!(second.status(), reqwest::StatusCode::OK);
    assert!(second.text().await.expect("body").contains("Robin"));
}

#[tokio::test]
async fn test_fresh_headers_replace_cached_identity() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    let first = client
        .get(ctx.url("/"))
        .header(IDENTITY_EMAIL_HEADER, OPERATOR_EMAIL)
        .header(IDENTITY_NAME_HEADER, "Robin")
        .send()
        .await
        .expect("request failed");
    assert_eq!(first.status(), reqwest::StatusCode::OK);

    let second = client
        .get(ctx.url("/"))
        .header(IDENTITY_EMAIL_HEADER, OPERATOR_EMAIL)
        .header(IDENTITY_NAME_HEADER, "Sam")
        .send()
        .await
        .expect("request failed");
    assert!(second.text().await.expect("body").contains("Sam"));

    // The replacement sticks for header-less follow-ups.
    let third = client.get(ctx.url("/")).send().await.expect("request failed");
    assert!(third.text().await.expect("body").contains("Sam"));
}

// ============================================================================
// Cookie signing
// ============================================================================

#[tokio::test]
async fn test_fabricated_session_cookie_is_rejected() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    // A cookie that never came from the server carries no valid
    // signature, so the cached-identity path must not fire.
    let response = client
        .get(ctx.url("/"))
        .header(
            "cookie",
            format!("{SESSION_COOKIE_NAME}=bm90LWEtcmVhbC1zZXNzaW9u"),
        )
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("{SIGN_IN_URL}?next=%2F"));
    assert_eq!(ctx.platform.hits("stores.list"), 0);
}

#[tokio::test]
async fn test_tampered_session_cookie_is_rejected() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    // Establish a real session, then replay its cookie with the payload
    // flipped. Signature verification must treat it as no cookie at all.
    let first = client
        .get(ctx.url("/"))
        .header(IDENTITY_EMAIL_HEADER, OPERATOR_EMAIL)
        .header(IDENTITY_NAME_HEADER, OPERATOR_NAME)
        .send()
        .await
        .expect("request failed");
    assert_eq!(first.status(), reqwest::StatusCode::OK);

    let set_cookie = first
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("expected a session cookie");
    let value = set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, v)| v)
        .expect("cookie value");
    let mut tampered: String = value.chars().collect();
    let last = tampered.pop().expect("non-empty cookie value");
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let replay = bare_client()
        .get(ctx.url("/"))
        .header("cookie", format!("{SESSION_COOKIE_NAME}={tampered}"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(replay.status(), reqwest::StatusCode::SEE_OTHER);
    assert!(location(&replay).starts_with(SIGN_IN_URL));
}

// ============================================================================
// Public surfaces
// ============================================================================

#[tokio::test]
async fn test_health_probes_skip_identity() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    let health = client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    assert_eq!(health.text().await.expect("body"), "ok");

    let ready = client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(ready.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_static_assets_are_public() {
    let ctx = TestContext::start().await;
    let client = bare_client();

    let response = client
        .get(ctx.url("/static/css/admin.css"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
