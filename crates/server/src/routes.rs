pub mod auth;
pub mod bookmarks;
pub mod consult_details;
pub mod counselors;
pub mod reservations;
pub mod reviews;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: public, authenticated and docs routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/counselors", get(counselors::list).post(counselors::create))
        .route("/counselors/:id", get(counselors::get))
        .route("/counselors/:id/bookmark", post(bookmarks::add).delete(bookmarks::remove))
        .route("/counselors/:id/reviews", get(reviews::list).post(reviews::write))
        .route("/bookmarks", get(bookmarks::list))
        .route("/reviews/:id/recommend", post(reviews::recommend))
        .route("/reservation", get(reservations::list))
        .route("/reservation/create", post(reservations::create))
        .route("/consult-detail", get(consult_details::all))
        .route("/consult-detail/latest", get(consult_details::latest))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    api.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
