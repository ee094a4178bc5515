//! Notification inbox integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

/// Dispatch one announcement to alice and return her notification id.
async fn dispatch_to_alice(app: &TestApp, organizer: &str, alice: &str) -> String {
    let event_id = app.create_event(organizer, "Launch Party").await;
    app.register(alice, event_id).await;

    app.request(
        "POST",
        "/api/announcements",
        Some(organizer),
        Some(json!({
            "event_id": event_id,
            "title": "Reminder",
            "message": "Doors open at 6pm",
            "send_now": true,
        })),
    )
    .await;

    let (status, body) = app
        .request("GET", "/api/notifications", Some(alice), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["items"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (_, alice) = app.signup("alice", "attendee").await;

    let notification_id = dispatch_to_alice(&app, &organizer, &alice).await;

    for _ in 0..2 {
        let (status, body) = app
            .request(
                "PUT",
                &format!("/api/notifications/{notification_id}/read"),
                Some(&alice),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (_, body) = app
        .request("GET", "/api/notifications", Some(&alice), None)
        .await;
    assert_eq!(body["data"]["items"][0]["is_read"], true);

    let (_, body) = app
        .request("GET", "/api/notifications/unread-count", Some(&alice), None)
        .await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn mark_read_rejects_foreign_rows() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (_, alice) = app.signup("alice", "attendee").await;
    let (_, mallory) = app.signup("mallory", "attendee").await;

    let notification_id = dispatch_to_alice(&app, &organizer, &alice).await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/notifications/{notification_id}/read"),
            Some(&mallory),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn mark_read_on_missing_row_is_not_found() {
    let app = TestApp::new().await;
    let (_, alice) = app.signup("alice", "attendee").await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/notifications/{}/read", uuid::Uuid::new_v4()),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inbox_requires_authentication() {
    let app = TestApp::new().await;
    let (status, _) = app.request("GET", "/api/notifications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
