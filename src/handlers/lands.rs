use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{require_admin, require_approved, verify_land_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{self, RedisCache, keys};
use crate::db::lands as land_db;
use crate::error::ApiError;
use crate::models::lands::{self, BrowseQuery, CreateLand, UpdateLand};
use crate::models::profiles::Role;

/// Browse listing cache TTL. Short on purpose: the listing only has to
/// be fresh enough for a browse page, and land mutations plus
/// activation-driven `is_lended` flips invalidate every variant eagerly
/// anyway.
const BROWSE_CACHE_TTL: u64 = 60;

/// POST /api/lands — an approved farmer lists a parcel.
pub async fn create_land(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateLand>,
) -> Result<HttpResponse, ApiError> {
    if user.0.role != Role::Farmer {
        return Err(ApiError::Forbidden(
            "Only farmers can list lands".to_string(),
        ));
    }
    require_approved(&user.0)?;

    let input = body.into_inner();
    if input.price < 0.0 {
        return Err(ApiError::Validation("Price must be non-negative".to_string()));
    }
    if input.area.trim().is_empty() || input.location.trim().is_empty() {
        return Err(ApiError::Validation(
            "Area and location are required".to_string(),
        ));
    }

    let land = land_db::insert_land(db.get_ref(), user.0.id, input).await?;
    cache::invalidate_browse(&cache).await;

    Ok(HttpResponse::Created().json(land))
}

/// GET /api/lands/mine — the farmer's own parcels.
pub async fn get_my_lands(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    if user.0.role != Role::Farmer {
        return Err(ApiError::Forbidden(
            "Only farmers have land listings".to_string(),
        ));
    }

    let lands = land_db::get_lands_by_farmer(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(lands))
}

/// GET /api/lands/available — contractor browse.
///
/// Only parcels with `is_lended = false` are ever returned; the filter
/// lives in the query itself so the invariant holds for every invocation,
/// cached or not.
pub async fn get_available_lands(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    query: web::Query<BrowseQuery>,
) -> Result<HttpResponse, ApiError> {
    if user.0.role != Role::Contractor {
        return Err(ApiError::Forbidden(
            "Only contractors can browse available lands".to_string(),
        ));
    }

    let cache_key = keys::available_lands(
        query.quality.map(|q| q.as_str()),
        query.search.as_deref(),
    );

    match cache.get::<Vec<lands::Model>>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {e}"),
    }

    let lands =
        land_db::get_available_lands(db.get_ref(), query.quality, query.search.as_deref()).await?;

    let _ = cache.set(&cache_key, &lands, Some(BROWSE_CACHE_TTL)).await;
    Ok(HttpResponse::Ok().json(lands))
}

/// GET /api/lands — admin view of every parcel (read-only).
pub async fn get_all_lands(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&user.0)?;

    let lands = land_db::get_all_lands(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(lands))
}

/// GET /api/lands/{id} — owner, admin, or any contractor while the parcel
/// is still open for proposals.
pub async fn get_land(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let land = land_db::get_land_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Land {id}")))?;

    let visible = land.farmer_id == user.0.id
        || user.0.role == Role::Admin
        || (user.0.role == Role::Contractor && !land.is_lended);
    if !visible {
        return Err(ApiError::Forbidden(
            "You do not have access to this land".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(land))
}

/// PUT /api/lands/{id} — owner edits a parcel that is not under an
/// active contract.
pub async fn update_land(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateLand>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let land = verify_land_owner(db.get_ref(), id, user.0.id).await?;

    if land.is_lended {
        return Err(ApiError::Conflict(
            "Land is under an active contract and cannot be edited".to_string(),
        ));
    }
    if let Some(price) = body.price {
        if price < 0.0 {
            return Err(ApiError::Validation("Price must be non-negative".to_string()));
        }
    }

    let updated = land_db::update_land(db.get_ref(), id, body.into_inner()).await?;
    cache::invalidate_browse(&cache).await;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/lands/{id} — owner removes a parcel not under an active
/// contract.
pub async fn delete_land(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let land = verify_land_owner(db.get_ref(), id, user.0.id).await?;

    if land.is_lended {
        return Err(ApiError::Conflict(
            "Land is under an active contract and cannot be removed".to_string(),
        ));
    }

    land_db::delete_land(db.get_ref(), id).await?;
    cache::invalidate_browse(&cache).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Land {id} removed"),
    })))
}
