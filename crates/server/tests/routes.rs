use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use server::routes::{self, auth::ServerState};
use service::repo::memory::InMemoryStore;
use service::token::TokenCodec;
use service::Services;

struct TestApp {
    app: Router,
    store: Arc<InMemoryStore>,
    tokens: TokenCodec,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let tokens = TokenCodec::new("test-secret", 1);
        let state = ServerState { services: Services::new(store.clone(), tokens.clone()), tokens: tokens.clone() };
        let app = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
        Self { app, store, tokens }
    }

    /// Seeded account id plus a bearer token for it.
    fn account(&self, email: &str) -> (Uuid, String) {
        let id = self.store.seed_account(email, "Client");
        (id, self.tokens.issue(id, email).unwrap())
    }

    async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header("authorization", format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v).unwrap())),
            None => req.body(Body::empty()),
        }
        .unwrap();
        let resp = self.app.clone().call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

#[tokio::test]
async fn health_is_public() {
    let t = TestApp::new();
    let (status, body) = t.json("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_and_me() {
    let t = TestApp::new();
    let creds = json!({"email": "new@example.com", "name": "Newbie", "password": "S3curePass!"});
    let (status, _) = t.json("POST", "/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.json("POST", "/auth/register", None, Some(creds)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(json!({"email": "new@example.com", "password": "S3curePass!"}).to_string()))
        .unwrap();
    let resp = t.app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("auth_token="));

    // cookie alone is enough
    let req = Request::builder()
        .uri("/auth/me")
        .header("cookie", cookie.split(';').next().unwrap())
        .body(Body::empty())
        .unwrap();
    let resp = t.app.clone().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _) = t.json("POST", "/auth/login", None, Some(json!({"email": "new@example.com", "password": "wrong-pass"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_check_credentials() {
    let t = TestApp::new();
    let (status, _) = t.json("GET", "/bookmarks", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = t.json("GET", "/bookmarks", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = TokenCodec::new("other-secret", 1).issue(Uuid::new_v4(), "x@example.com").unwrap();
    let (status, _) = t.json("GET", "/bookmarks", Some(&other), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // valid token whose account is gone
    let orphan = t.tokens.issue(Uuid::new_v4(), "orphan@example.com").unwrap();
    let (status, body) = t.json("GET", "/bookmarks", Some(&orphan), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found user");

    // email now belongs to a different account than the token was issued for
    t.store.seed_account("reused@example.com", "New Owner");
    let stale = t.tokens.issue(Uuid::new_v4(), "reused@example.com").unwrap();
    let (status, _) = t.json("GET", "/bookmarks", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bookmark_lifecycle() {
    let t = TestApp::new();
    let (_, token) = t.account("me@example.com");
    let c = t.store.seed_counselor("Dr. Kang", &["anxiety", "anxiety", "family"]);
    let uri = format!("/counselors/{c}/bookmark");

    let (status, body) = t.json("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["counselor_id"], c.to_string());

    let (status, body) = t.json("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Already bookmarked this counselor");
    assert_eq!(t.store.bookmark_count(), 1);

    let (status, body) = t.json("GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["counselor"]["name"], "Dr. Kang");
    assert_eq!(list[0]["counselor"]["counseling_fields"], json!(["anxiety", "family"]));

    let (status, _) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = t.json("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = t.json("GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = t.json("POST", &format!("/counselors/{}/bookmark", Uuid::new_v4()), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found counselor");
}

#[tokio::test]
async fn reservation_create_and_list() {
    let t = TestApp::new();
    let (_, token) = t.account("me@example.com");
    let c = t.store.seed_counselor("Dr. Oh", &[]);
    let date = (Utc::now() + Duration::days(2)).date_naive();
    let body = json!({"counselor_id": c, "counsel_date": date, "counsel_time": "14:00:00", "location": "Room 7"});

    let (status, text) = t.send("POST", "/reservation/create", Some(&token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(text).unwrap(), service::reservation::RESERVATION_CREATED);

    let (status, _) = t.json("POST", "/reservation/create", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let past = json!({"counselor_id": c, "counsel_date": "2000-01-01", "counsel_time": "09:00:00"});
    let (status, _) = t.json("POST", "/reservation/create", Some(&token), Some(past)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = t.json("GET", "/reservation", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["counselor_name"], "Dr. Oh");
}

#[tokio::test]
async fn consult_detail_latest_and_paged() {
    let t = TestApp::new();
    let (account, token) = t.account("me@example.com");
    let c = t.store.seed_counselor("Dr. Min", &[]);
    let at = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    for day in [2, 9, 5, 1] {
        t.store.seed_consult_detail(account, c, NaiveDate::from_ymd_opt(2025, 1, day).unwrap(), at, None);
    }

    let (status, body) = t.json("GET", "/consult-detail/latest", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body.as_array().unwrap().iter().map(|v| v["counsel_date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2025-01-09", "2025-01-05", "2025-01-02"]);

    let (_, body) = t.json("GET", "/consult-detail/latest?size=1", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = t.json("GET", "/consult-detail?page=2&per_page=3", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 4);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["items"][0]["counsel_date"], "2025-01-01");
}

#[tokio::test]
async fn counselors_and_reviews() {
    let t = TestApp::new();
    let (_, token) = t.account("me@example.com");

    let new = json!({"name": "Dr. Bae", "introduction": "CBT", "counseling_fields": ["sleep", "sleep", "stress"]});
    let (status, created) = t.json("POST", "/counselors", Some(&token), Some(new.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = t.json("POST", "/counselors", None, Some(new)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = created["counselor_id"].as_str().unwrap().to_string();
    let (status, body) = t.json("GET", "/counselors?field=stress", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["counselor_id"], id.as_str());

    let (status, profile) = t.json("GET", &format!("/counselors/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["introduction"], "CBT");

    let review = json!({"title": "Helpful", "content": "Listened well", "rating": 4.5, "tags": ["Kind"]});
    let (status, written) = t.json("POST", &format!("/counselors/{id}/reviews"), Some(&token), Some(review)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(written["tags"], json!(["kind"]));

    let bad = json!({"title": "Too good", "content": "x", "rating": 9.0});
    let (status, _) = t.json("POST", &format!("/counselors/{id}/reviews"), Some(&token), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let review_id = written["review_id"].as_str().unwrap();
    let (status, body) = t.json("POST", &format!("/reviews/{review_id}/recommend"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation_count"], 1);

    let (status, body) = t.json("GET", &format!("/counselors/{id}/reviews"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["recommendation_count"], 1);
    assert_eq!(body[0]["author_name"], "Client");
}

#[tokio::test]
async fn openapi_document_served() {
    let t = TestApp::new();
    let (status, body) = t.json("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/counselors/{id}/bookmark"].is_object());
}
