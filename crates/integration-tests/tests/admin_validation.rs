//! Form validation behavior.
//!
//! Submissions with invalid fields must re-render the form with inline
//! messages, keep whatever the operator typed, and never reach the
//! platform API. The stub's per-operation counters make the last part
//! directly observable.

use storeroom_integration_tests::TestContext;

// ============================================================================
// Billboards
// ============================================================================

#[tokio::test]
async fn test_billboard_create_requires_both_fields() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/billboards", store.id),
            &[("label", ""), ("image_url", "")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Label is required"));
    assert!(body.contains("Background image is required"));
    assert_eq!(ctx.platform.hits("billboards.create"), 0);
}

#[tokio::test]
async fn test_billboard_validation_keeps_entered_values() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/billboards", store.id),
            &[("label", "Summer Sale"), ("image_url", "")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    // The valid field survives the round trip; only the missing one is
    // flagged.
    assert!(body.contains(r#"value="Summer Sale""#));
    assert!(body.contains("Background image is required"));
    assert!(!body.contains("Label is required"));
    assert_eq!(ctx.platform.hits("billboards.create"), 0);
}

// ============================================================================
// Colors
// ============================================================================

#[tokio::test]
async fn test_color_value_must_start_with_hash() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/colors", store.id),
            &[("name", "Red"), ("value", "FF0000")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("String must be a valid hex code"));
    assert!(body.contains(r#"value="Red""#));
    assert!(body.contains(r#"value="FF0000""#));
    assert_eq!(ctx.platform.hits("colors.create"), 0);
}

#[tokio::test]
async fn test_color_value_must_be_long_enough() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/colors", store.id),
            &[("name", "Red"), ("value", "#FF")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Value must be at least 4 characters"));
    assert_eq!(ctx.platform.hits("colors.create"), 0);
}

#[tokio::test]
async fn test_color_empty_fields_flag_both_inputs() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/colors", store.id),
            &[("name", ""), ("value", "")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Name is required"));
    assert!(body.contains("Value is required"));
    assert_eq!(ctx.platform.hits("colors.create"), 0);
}

#[tokio::test]
async fn test_whitespace_only_name_is_rejected() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/colors", store.id),
            &[("name", "   "), ("value", "#123456")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Name is required"));
    assert_eq!(ctx.platform.hits("colors.create"), 0);
}

#[tokio::test]
async fn test_color_update_validation_never_calls_platform() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let color = ctx.platform.seed_color(store.id, "Ocean", "#0066FF");

    let response = ctx
        .post_form(
            &format!("/{}/colors/{}", store.id, color.id),
            &[("name", "Ocean"), ("value", "nope")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("String must be a valid hex code"));
    assert_eq!(ctx.platform.hits("colors.update"), 0);

    // The stored record is untouched.
    let records = ctx.platform.records("colors");
    assert_eq!(
        records
            .first()
            .and_then(|r| r.get("value"))
            .and_then(|v| v.as_str()),
        Some("#0066FF")
    );
}

// ============================================================================
// Sizes
// ============================================================================

#[tokio::test]
async fn test_size_requires_name_and_value() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(
            &format!("/{}/sizes", store.id),
            &[("name", ""), ("value", "")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Name is required"));
    assert!(body.contains("Value is required"));
    assert_eq!(ctx.platform.hits("sizes.create"), 0);
}

// ============================================================================
// Stores
// ============================================================================

#[tokio::test]
async fn test_store_create_requires_name_and_reopens_modal() {
    let ctx = TestContext::start().await;

    // The create-store modal starts hidden.
    let body = ctx.get_html("/").await;
    assert!(body.contains("data-modal hidden"));

    let response = ctx.post_form("/stores", &[("name", "")]).await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Name is required"));
    // Re-rendered with the modal open so the message is visible.
    assert!(!body.contains("data-modal hidden"));
    assert_eq!(ctx.platform.hits("stores.create"), 0);
}

#[tokio::test]
async fn test_settings_rename_requires_name() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(&format!("/{}/settings", store.id), &[("name", "")])
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("response body");
    assert!(body.contains("Name is required"));
    assert!(body.contains("Delete store"));
    assert_eq!(ctx.platform.hits("stores.update"), 0);
}
