//! Deletion flows, including referential conflicts.
//!
//! The platform refuses to delete records that other entities still
//! reference (409). The dashboard must surface that as guidance on the
//! list page and leave the record in place, while a clean delete removes
//! the record and confirms with a toast.

use storeroom_integration_tests::{TestContext, assert_redirect};

// ============================================================================
// Entity deletes
// ============================================================================

#[tokio::test]
async fn test_confirmed_color_delete_removes_record() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let color = ctx.platform.seed_color(store.id, "Red", "#FF0000");

    let response = ctx
        .post_form(&format!("/{}/colors/{}/delete", store.id, color.id), &[])
        .await;

    assert_redirect(&response, &format!("/{}/colors", store.id));
    assert_eq!(ctx.platform.hits("colors.delete"), 1);
    assert!(ctx.platform.records("colors").is_empty());

    let body = ctx.get_html(&format!("/{}/colors", store.id)).await;
    assert!(body.contains("Color deleted."));
    assert!(body.contains("Colors (0)"));
    assert!(!body.contains("#FF0000"));
}

#[tokio::test]
async fn test_size_delete_round_trip() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let size = ctx.platform.seed_size(store.id, "Small", "S");

    let response = ctx
        .post_form(&format!("/{}/sizes/{}/delete", store.id, size.id), &[])
        .await;

    assert_redirect(&response, &format!("/{}/sizes", store.id));
    assert_eq!(ctx.platform.hits("sizes.delete"), 1);

    let body = ctx.get_html(&format!("/{}/sizes", store.id)).await;
    assert!(body.contains("Size deleted."));
    assert!(body.contains("Sizes (0)"));
}

// ============================================================================
// Referential conflicts
// ============================================================================

#[tokio::test]
async fn test_referenced_color_delete_shows_guidance() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let color = ctx.platform.seed_color(store.id, "Red", "#FF0000");
    ctx.platform.mark_delete_conflict(color.id);

    let response = ctx
        .post_form(&format!("/{}/colors/{}/delete", store.id, color.id), &[])
        .await;

    assert_redirect(&response, &format!("/{}/colors", store.id));
    // The delete was attempted, refused, and the record survived.
    assert_eq!(ctx.platform.hits("colors.delete"), 1);
    assert_eq!(ctx.platform.records("colors").len(), 1);

    let body = ctx.get_html(&format!("/{}/colors", store.id)).await;
    assert!(body.contains("Make sure you removed all products using this color first."));
    assert!(body.contains("Red"));
    assert!(body.contains("Colors (1)"));
}

#[tokio::test]
async fn test_referenced_billboard_delete_shows_guidance() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let billboard = ctx
        .platform
        .seed_billboard(store.id, "Summer Sale", "https://cdn.test/summer.png");
    ctx.platform.mark_delete_conflict(billboard.id);

    let response = ctx
        .post_form(
            &format!("/{}/billboards/{}/delete", store.id, billboard.id),
            &[],
        )
        .await;

    assert_redirect(&response, &format!("/{}/billboards", store.id));
    assert_eq!(ctx.platform.records("billboards").len(), 1);

    let body = ctx.get_html(&format!("/{}/billboards", store.id)).await;
    assert!(body.contains("Make sure you removed all categories using this billboard first."));
    assert!(body.contains("Summer Sale"));
}

#[tokio::test]
async fn test_delete_of_missing_record_reports_error() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    let ghost = uuid::Uuid::new_v4();

    let response = ctx
        .post_form(&format!("/{}/colors/{ghost}/delete", store.id), &[])
        .await;

    assert_redirect(&response, &format!("/{}/colors", store.id));
    assert_eq!(ctx.platform.hits("colors.delete"), 1);

    let body = ctx.get_html(&format!("/{}/colors", store.id)).await;
    assert!(body.contains("Something went wrong."));
}

// ============================================================================
// Store deletes
// ============================================================================

#[tokio::test]
async fn test_store_delete_returns_to_directory() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");

    let response = ctx
        .post_form(&format!("/{}/settings/delete", store.id), &[])
        .await;

    assert_redirect(&response, "/");
    assert_eq!(ctx.platform.hits("stores.delete"), 1);
    assert!(ctx.platform.records("stores").is_empty());

    let body = ctx.get_html("/").await;
    assert!(body.contains("Store deleted."));
    assert!(body.contains("Stores (0)"));
}

#[tokio::test]
async fn test_referenced_store_delete_stays_on_settings() {
    let ctx = TestContext::start().await;
    let store = ctx.platform.seed_store("Alpha Outfitters");
    ctx.platform.mark_delete_conflict(store.id);

    let response = ctx
        .post_form(&format!("/{}/settings/delete", store.id), &[])
        .await;

    assert_redirect(&response, &format!("/{}/settings", store.id));
    assert_eq!(ctx.platform.records("stores").len(), 1);

    let body = ctx.get_html(&format!("/{}/settings", store.id)).await;
    assert!(body.contains("Make sure you removed all products and categories first."));
    assert!(body.contains(r#"value="Alpha Outfitters""#));
}
