use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::db::profiles as profile_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::notifications::{KIND_ACCOUNT_APPROVAL, NewNotification};
use crate::models::profiles::{ProfileResponse, Role, SetApproval};

/// Query params for GET /api/profiles.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileListQuery {
    pub role: Option<Role>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// GET /api/profiles — admin listing with role filter, text search,
/// pagination.
pub async fn get_profiles(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProfileListQuery>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&user.0)?;

    let paging = PaginationQuery {
        page: query.page,
        limit: query.limit,
    };

    let profiles = profile_db::get_profiles_paginated(
        db.get_ref(),
        query.role,
        query.search.as_deref(),
        paging.page(),
        paging.limit(),
    )
    .await?;

    let response: Vec<ProfileResponse> = profiles.into_iter().map(ProfileResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/profiles/{id}/approval — admin sets the approval flag.
///
/// Writing the same value twice is a no-op, so toggling approve/unapprove
/// twice restores the original state. The affected user gets a
/// notification either way.
pub async fn set_approval(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SetApproval>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&user.0)?;

    let target_id = path.into_inner();
    let approved = body.is_approved;

    let updated = profile_db::set_approval(db.get_ref(), target_id, approved)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => ApiError::not_found(format!("Profile {target_id}")),
            other => ApiError::Database(other),
        })?;

    let (title, message) = if approved {
        (
            "Account approved".to_string(),
            "Your account has been approved. You can now list lands and submit contracts."
                .to_string(),
        )
    } else {
        (
            "Account approval revoked".to_string(),
            "Your account approval has been revoked by the admin.".to_string(),
        )
    };

    notification_db::insert_on(
        db.get_ref(),
        NewNotification {
            user_id: target_id,
            title,
            message,
            kind: KIND_ACCOUNT_APPROVAL,
        },
    )
    .await?;

    tracing::info!(user = %target_id, approved, "approval flag updated");
    Ok(HttpResponse::Ok().json(ProfileResponse::from(updated)))
}
