use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct NewCounselorRequest {
    pub name: String,
    pub introduction: Option<String>,
    pub counseling_fields: Vec<String>,
}

#[derive(ToSchema)]
pub struct CreateReservationRequest {
    pub counselor_id: Uuid,
    /// `YYYY-MM-DD`
    pub counsel_date: String,
    /// `HH:MM:SS`
    pub counsel_time: String,
    pub location: Option<String>,
}

#[derive(ToSchema)]
pub struct NewReviewRequest {
    pub title: String,
    pub content: String,
    /// 0.0 ..= 5.0
    pub rating: f64,
    pub tags: Vec<String>,
}

pub struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::counselors::list,
        crate::routes::counselors::create,
        crate::routes::counselors::get,
        crate::routes::bookmarks::add,
        crate::routes::bookmarks::remove,
        crate::routes::bookmarks::list,
        crate::routes::reviews::list,
        crate::routes::reviews::write,
        crate::routes::reviews::recommend,
        crate::routes::reservations::create,
        crate::routes::reservations::list,
        crate::routes::consult_details::latest,
        crate::routes::consult_details::all,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            NewCounselorRequest,
            CreateReservationRequest,
            NewReviewRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "counselor"),
        (name = "bookmark"),
        (name = "review"),
        (name = "reservation"),
        (name = "consult-detail")
    )
)]
pub struct ApiDoc;
