//! Operator-facing toast notifications.
//!
//! Outcome messages survive the redirect after a mutation by riding in the
//! session: the mutating handler pushes, the next page render drains. Each
//! notification carries its own auto-dismiss timeout so success and error
//! toasts can age out independently when several are on screen at once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const QUEUE_KEY: &str = "notifications";

/// How long a success toast stays on screen.
pub const SUCCESS_TIMEOUT_MS: u32 = 4_000;
/// Error toasts linger a little longer.
pub const ERROR_TIMEOUT_MS: u32 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single queued toast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timeout_ms: u32,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            timeout_ms: SUCCESS_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            timeout_ms: ERROR_TIMEOUT_MS,
        }
    }
}

/// Append a notification to the session queue.
///
/// A failed session write costs the operator one toast, not the mutation
/// that produced it, so this logs and moves on instead of failing the
/// request.
pub async fn push(session: &Session, notification: Notification) {
    let mut queue: Vec<Notification> = session
        .get(QUEUE_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    queue.push(notification);

    if let Err(e) = session.insert(QUEUE_KEY, queue).await {
        tracing::warn!(error = %e, "Failed to queue notification");
    }
}

/// Drain all queued notifications, oldest first.
pub async fn take(session: &Session) -> Vec<Notification> {
    match session.remove::<Vec<Notification>>(QUEUE_KEY).await {
        Ok(queue) => queue.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to drain notifications");
            Vec::new()
        }
    }
}

/// Template-facing shape of a toast.
#[derive(Debug, Clone)]
pub struct ToastView {
    /// CSS modifier: "success" or "error"
    pub kind: String,
    pub message: String,
    pub timeout_ms: u32,
}

impl From<&Notification> for ToastView {
    fn from(notification: &Notification) -> Self {
        let kind = match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        Self {
            kind: kind.to_string(),
            message: notification.message.clone(),
            timeout_ms: notification.timeout_ms,
        }
    }
}

/// Map a drained queue into template toasts.
#[must_use]
pub fn toast_views(queue: &[Notification]) -> Vec<ToastView> {
    queue.iter().map(ToastView::from).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_success_and_error_timeouts_differ() {
        let ok = Notification::success("Color created.");
        let err = Notification::error("Something went wrong.");

        assert_eq!(ok.kind, NotificationKind::Success);
        assert_eq!(err.kind, NotificationKind::Error);
        assert!(err.timeout_ms > ok.timeout_ms);
    }

    #[test]
    fn test_toast_view_css_kinds() {
        let views = toast_views(&[
            Notification::success("Size updated."),
            Notification::error("Something went wrong."),
        ]);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].kind, "success");
        assert_eq!(views[1].kind, "error");
        assert_eq!(views[0].message, "Size updated.");
    }

    #[tokio::test]
    async fn test_take_drains_in_push_order() {
        let session = test_session();

        push(&session, Notification::success("Billboard created.")).await;
        push(&session, Notification::error("Something went wrong.")).await;

        let drained = take(&session).await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "Billboard created.");
        assert_eq!(drained[1].message, "Something went wrong.");

        // The queue is consumed by the drain.
        assert!(take(&session).await.is_empty());
    }
}
