use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::error::ApiError;

/// GET /api/notifications — the caller's own, newest first.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let notifications =
        notification_db::get_notifications_for_user(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// PUT /api/notifications/{id}/read — owner marks one read.
///
/// Idempotent: re-marking an already-read notification succeeds and
/// changes nothing.
pub async fn mark_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let notif = notification_db::get_notification_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Notification {id}")))?;

    if notif.user_id != user.0.id {
        return Err(ApiError::Forbidden(
            "You can only mark your own notifications".to_string(),
        ));
    }

    let updated = notification_db::mark_read(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(updated))
}
