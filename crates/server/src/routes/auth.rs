use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use uuid::Uuid;

use service::account::domain::{Account, LoginInput, RegisterInput};
use service::token::{Principal, TokenCodec};
use service::Services;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub services: Services,
    pub tokens: TokenCodec,
}

#[derive(Serialize)]
pub struct RegisterOutput { pub account_id: Uuid }

#[derive(Serialize)]
pub struct LoginOutput { pub account_id: Uuid, pub email: String, pub name: String, pub token: String }

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<Json<RegisterOutput>, JsonApiError> {
    let account = state.services.accounts.register(input).await?;
    Ok(Json(RegisterOutput { account_id: account.id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.services.accounts.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let account = session.account;
    let out = LoginOutput { account_id: account.id, email: account.email, name: account.name, token: session.token };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current account"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not found user")))]
pub async fn me(State(state): State<ServerState>, Extension(principal): Extension<Principal>) -> Result<Json<Account>, JsonApiError> {
    Ok(Json(state.services.accounts.resolve(&principal).await?))
}

/// Routes reachable without a credential.
fn is_public(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS
        || path == "/health"
        || path == "/auth/login"
        || path == "/auth/register"
        || path == "/auth/logout"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || (method == Method::GET && (path == "/counselors" || path.starts_with("/counselors/")))
}

/// `Authorization: Bearer` first, then the `auth_token` cookie.
/// `Err(())` when an Authorization header is present but not Bearer.
fn extract_token(req: &Request) -> Result<Option<String>, ()> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(()),
        };
    }
    let cookie_header = req.headers().get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    Ok(cookie_header
        .split(';')
        .filter_map(|kv| kv.trim().strip_prefix("auth_token="))
        .find(|t| !t.is_empty())
        .map(str::to_string))
}

/// 全局中间件：公开路由直接放行，其余校验 Bearer token 并注入 `Principal`
/// 缺失 token 返回 400，非法或过期返回 401
pub async fn require_bearer_token(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    if is_public(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let token = match extract_token(&req) {
        Ok(Some(t)) => t,
        Ok(None) => {
            tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(JsonApiError::bad_request("missing credential"));
        }
        Err(()) => {
            tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
            return Err(JsonApiError::unauthorized("invalid Authorization format"));
        }
    };

    let principal = state.tokens.decode(&token).map_err(|e| {
        tracing::error!(path = %path, err = %e, "token validation failed");
        JsonApiError::from(e)
    })?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
