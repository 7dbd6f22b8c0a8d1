use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::contracts as contract_db;
use crate::db::lands as land_db;
use crate::error::ApiError;
use crate::models::contracts;
use crate::models::lands;
use crate::models::profiles::{self, Role};

/// Gate for the admin-only surface (user management, stats, full listings).
pub fn require_admin(profile: &profiles::Model) -> Result<(), ApiError> {
    if profile.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}

/// Unapproved accounts can read their own data but may not create lands
/// or contracts until the broker approves them.
pub fn require_approved(profile: &profiles::Model) -> Result<(), ApiError> {
    if profile.is_approved {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Account pending admin approval".to_string(),
        ))
    }
}

/// Fetch a contract and verify the caller may see it: the farmer party,
/// the contractor party, or the admin.
pub async fn verify_contract_access(
    db: &DatabaseConnection,
    contract_id: Uuid,
    profile: &profiles::Model,
) -> Result<contracts::Model, ApiError> {
    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id}")))?;

    let is_party = contract.farmer_id == profile.id || contract.contractor_id == profile.id;
    if !is_party && profile.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "You are not a party to this contract".to_string(),
        ));
    }

    Ok(contract)
}

/// Fetch a parcel and verify the caller owns it.
pub async fn verify_land_owner(
    db: &DatabaseConnection,
    land_id: Uuid,
    user_id: Uuid,
) -> Result<lands::Model, ApiError> {
    let land = land_db::get_land_by_id(db, land_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Land {land_id}")))?;

    if land.farmer_id != user_id {
        return Err(ApiError::Forbidden(
            "You do not own this land".to_string(),
        ));
    }

    Ok(land)
}
