use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::profiles as profile_db;
use crate::error::ApiError;
use crate::models::profiles::UpdateProfile;

/// GET /api/auth/me — the caller's own profile, all fields included.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0)
}

/// PUT /api/auth/profile — owner updates personal fields. Role and the
/// approval flag are not reachable from here.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    let updated = profile_db::update_profile(db.get_ref(), user.0.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}
