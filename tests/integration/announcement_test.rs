//! Announcement lifecycle integration tests.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn create_sent_announcement_fans_out_to_registrants() {
    let app = TestApp::new().await;

    let (_organizer_id, organizer) = app.signup("organizer", "organizer").await;
    let (alice_id, alice) = app.signup("alice", "attendee").await;
    let (bob_id, bob) = app.signup("bob", "attendee").await;

    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;
    app.register(&bob, event_id).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&organizer),
            Some(json!({
                "event_id": event_id,
                "title": "Reminder",
                "message": "Doors open at 6pm",
                "status": "sent",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["sent"]["inserted"], 2);
    assert_eq!(body["data"]["sent"]["requested"], 2);

    assert_eq!(app.notification_count(alice_id).await, 1);
    assert_eq!(app.notification_count(bob_id).await, 1);

    let (announcement_status, sent_at): (String, Option<chrono::DateTime<Utc>>) =
        sqlx::query_as("SELECT status::text, sent_at FROM announcements LIMIT 1")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(announcement_status, "Sent");
    assert!(sent_at.is_some());
}

#[tokio::test]
async fn scheduled_without_timestamp_is_rejected_and_writes_nothing() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&organizer),
            Some(json!({
                "title": "Reminder",
                "message": "Doors open at 6pm",
                "status": "scheduled",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn scheduling_a_draft_produces_no_deliveries() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (alice_id, alice) = app.signup("alice", "attendee").await;
    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&organizer),
            Some(json!({
                "event_id": event_id,
                "title": "Reminder",
                "message": "Doors open at 6pm",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["data"]["announcement_id"].as_str().unwrap();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/announcements/{id}"),
            Some(&organizer),
            Some(json!({
                "status": "scheduled",
                "scheduled_at": "2099-01-01T00:00:00Z",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["sent"].is_null());
    assert_eq!(app.notification_count(alice_id).await, 0);
}

#[tokio::test]
async fn update_transition_to_sent_dispatches_exactly_once() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (alice_id, alice) = app.signup("alice", "attendee").await;
    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;

    let (_, body) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&organizer),
            Some(json!({
                "event_id": event_id,
                "title": "Reminder",
                "message": "Doors open at 6pm",
            })),
        )
        .await;
    let id = body["data"]["announcement_id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/announcements/{id}"),
            Some(&organizer),
            Some(json!({ "status": "sent" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["sent"]["inserted"], 1);

    // A repeated transition into sent is rejected, and no new rows appear.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/announcements/{id}"),
            Some(&organizer),
            Some(json!({ "status": "draft" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.notification_count(alice_id).await, 1);
}

#[tokio::test]
async fn send_now_with_unknown_event_title_dispatches_to_nobody() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/announcements/send",
            Some(&organizer),
            Some(json!({
                "event_title": "Nonexistent Event",
                "title": "Hello",
                "message": "Anyone there?",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["inserted"], 0);
    assert_eq!(body["data"]["requested"], 0);
}

#[tokio::test]
async fn sweep_promotes_only_due_announcements() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (alice_id, alice) = app.signup("alice", "attendee").await;
    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;

    let past = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    let future = (Utc::now() + Duration::days(365)).to_rfc3339();

    for (title, when) in [
        ("Due one", &past),
        ("Due two", &past),
        ("Due three", &past),
        ("Future", &future),
    ] {
        let (status, body) = app
            .request(
                "POST",
                "/api/announcements",
                Some(&organizer),
                Some(json!({
                    "event_id": event_id,
                    "title": title,
                    "message": "body",
                    "status": "scheduled",
                    "scheduled_at": when,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let outcome = app
        .announcement_service
        .sweep_due(Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome.due, 3);
    assert_eq!(outcome.promoted, 3);
    assert_eq!(outcome.failed, 0);

    let sent: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements WHERE status = 'Sent'")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(sent, 3);

    let still_scheduled: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM announcements WHERE status = 'Scheduled'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(still_scheduled, 1);

    // One delivery per due announcement for the single registrant.
    assert_eq!(app.notification_count(alice_id).await, 3);
}

#[tokio::test]
async fn listing_groups_dispatches_into_views() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (_, alice) = app.signup("alice", "attendee").await;
    let (_, bob) = app.signup("bob", "attendee").await;
    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;
    app.register(&bob, event_id).await;

    app.request(
        "POST",
        "/api/announcements",
        Some(&organizer),
        Some(json!({
            "event_id": event_id,
            "title": "Reminder",
            "message": "Doors open at 6pm",
            "send_now": true,
        })),
    )
    .await;

    let (status, body) = app.request("GET", "/api/announcements", None, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let views = body["data"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["title"], "Reminder");
    assert_eq!(views[0]["status"], "sent");
    assert_eq!(views[0]["recipients"], 2);
}

#[tokio::test]
async fn attendees_may_not_manage_announcements() {
    let app = TestApp::new().await;
    let (_, attendee) = app.signup("alice", "attendee").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/announcements",
            Some(&attendee),
            Some(json!({ "title": "Hi", "message": "there" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn clear_all_removes_announcements_and_their_deliveries() {
    let app = TestApp::new().await;
    let (_, organizer) = app.signup("organizer", "organizer").await;
    let (_, alice) = app.signup("alice", "attendee").await;
    let event_id = app.create_event(&organizer, "Launch Party").await;
    app.register(&alice, event_id).await;

    app.request(
        "POST",
        "/api/announcements",
        Some(&organizer),
        Some(json!({
            "event_id": event_id,
            "title": "Reminder",
            "message": "body",
            "send_now": true,
        })),
    )
    .await;

    let (status, body) = app
        .request("DELETE", "/api/announcements", Some(&organizer), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["deleted"], 2);

    let (_, body) = app.request("GET", "/api/announcements", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
