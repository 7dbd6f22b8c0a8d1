use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::{contracts as contract_db, lands as land_db, profiles as profile_db};
use crate::error::ApiError;
use crate::models::contracts::Status;
use crate::models::profiles::Role;

/// Dashboard counters for the admin overview.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub farmers: u64,
    pub contractors: u64,
    pub pending_approvals: u64,
    pub total_lands: u64,
    pub available_lands: u64,
    pub total_contracts: u64,
    pub submitted_contracts: u64,
    pub active_contracts: u64,
    pub completed_contracts: u64,
}

/// GET /api/admin/stats.
pub async fn stats(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&user.0)?;
    let db = db.get_ref();

    let farmers = profile_db::count_by_role(db, Role::Farmer).await?;
    let contractors = profile_db::count_by_role(db, Role::Contractor).await?;
    let admins = profile_db::count_by_role(db, Role::Admin).await?;

    let stats = AdminStats {
        total_users: farmers + contractors + admins,
        farmers,
        contractors,
        pending_approvals: profile_db::count_pending(db).await?,
        total_lands: land_db::count_all(db).await?,
        available_lands: land_db::count_available(db).await?,
        total_contracts: contract_db::count_all(db).await?,
        submitted_contracts: contract_db::count_by_status(db, Status::Submitted).await?,
        active_contracts: contract_db::count_by_status(db, Status::Active).await?,
        completed_contracts: contract_db::count_by_status(db, Status::Completed).await?,
    };

    Ok(HttpResponse::Ok().json(stats))
}
