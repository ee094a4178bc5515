//! Shared test helpers for integration tests.
//!
//! These tests run against a live PostgreSQL instance configured through
//! the standard config files (EVENZA_ENV=test).

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use evenza_core::config::AppConfig;
use evenza_service::announcement::AnnouncementService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Announcement service for driving the sweep directly
    pub announcement_service: Arc<AnnouncementService>,
}

impl TestApp {
    /// Create a new test application backed by a clean database
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = evenza_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        evenza_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(evenza_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let event_repo = Arc::new(evenza_database::repositories::event::EventRepository::new(
            db_pool.clone(),
        ));
        let registration_repo = Arc::new(
            evenza_database::repositories::registration::RegistrationRepository::new(
                db_pool.clone(),
            ),
        );
        let announcement_repo = Arc::new(
            evenza_database::repositories::announcement::AnnouncementRepository::new(
                db_pool.clone(),
            ),
        );
        let notification_repo = Arc::new(
            evenza_database::repositories::notification::NotificationRepository::new(
                db_pool.clone(),
            ),
        );

        let password_hasher = evenza_auth::password::hasher::PasswordHasher::new();
        let jwt_encoder = Arc::new(evenza_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(evenza_auth::jwt::decoder::JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(evenza_service::auth::service::AuthService::new(
            Arc::clone(&user_repo),
            password_hasher,
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
        ));
        let event_service = Arc::new(evenza_service::event::service::EventService::new(
            Arc::clone(&event_repo),
            Arc::clone(&registration_repo),
        ));
        let announcement_service = Arc::new(
            evenza_service::announcement::service::AnnouncementService::new(
                Arc::clone(&announcement_repo),
                Arc::clone(&notification_repo),
                Arc::clone(&event_repo),
                Arc::clone(&registration_repo),
            ),
        );
        let notification_service = Arc::new(
            evenza_service::notification::service::NotificationService::new(Arc::clone(
                &notification_repo,
            )),
        );

        let state = evenza_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            jwt_decoder,
            auth_service,
            event_service,
            announcement_service: Arc::clone(&announcement_service),
            notification_service,
        };

        Self {
            router: evenza_api::router::build_router(state),
            db_pool,
            announcement_service,
        }
    }

    /// Remove every row so each test starts clean
    async fn clean_database(pool: &PgPool) {
        for table in ["notifications", "announcements", "registrations", "events", "users"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Send a request and return (status, parsed JSON body)
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Sign up a user and return (user id, access token)
    pub async fn signup(&self, username: &str, role: &str) -> (Uuid, String) {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/signup",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "password": "integration-test-pw",
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");

        let user_id = body["data"]["user"]["id"].as_str().unwrap().parse().unwrap();
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        (user_id, token)
    }

    /// Create an event and return its id
    pub async fn create_event(&self, token: &str, title: &str) -> Uuid {
        let (status, body) = self
            .request(
                "POST",
                "/api/events",
                Some(token),
                Some(serde_json::json!({ "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "event creation failed: {body}");
        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }

    /// Register a user (by their token) for an event
    pub async fn register(&self, token: &str, event_id: Uuid) {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/events/{event_id}/register"),
                Some(token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    }

    /// Count notification rows for a user
    pub async fn notification_count(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .unwrap()
    }
}
