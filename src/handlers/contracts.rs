use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{require_approved, verify_contract_access, verify_land_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{self, RedisCache};
use crate::db::contracts as contract_db;
use crate::db::lands as land_db;
use crate::db::profiles as profile_db;
use crate::error::ApiError;
use crate::lifecycle;
use crate::models::contracts::{ContractListQuery, CreateContract, Status, TransitionRequest};
use crate::models::notifications::{KIND_CONTRACT_STATUS, NewNotification};
use crate::models::profiles::Role;

/// POST /api/contracts — a farmer or contractor submits a proposal.
///
/// Rows are created directly in `submitted`; there is no draft path.
/// Party roles are validated against the profiles table, not trusted
/// from the request: the farmer side must hold the farmer role and the
/// contractor side the contractor role.
pub async fn create_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> Result<HttpResponse, ApiError> {
    require_approved(&user.0)?;

    let input = body.into_inner();
    if input.title.trim().is_empty() || input.crop_type.trim().is_empty() {
        return Err(ApiError::Validation(
            "Title and crop type are required".to_string(),
        ));
    }
    if input.price < 0.0 {
        return Err(ApiError::Validation("Price must be non-negative".to_string()));
    }

    let (farmer_id, contractor_id) = match user.0.role {
        Role::Contractor => {
            // A contractor proposes on a specific parcel; the farmer party
            // is the parcel's owner.
            let land_id = input.land_id.ok_or_else(|| {
                ApiError::Validation("Contractor proposals must reference a land".to_string())
            })?;
            let land = land_db::get_land_by_id(db.get_ref(), land_id)
                .await?
                .ok_or_else(|| ApiError::not_found(format!("Land {land_id}")))?;
            (land.farmer_id, user.0.id)
        }
        Role::Farmer => {
            let contractor_id = input.contractor_id.ok_or_else(|| {
                ApiError::Validation("Farmer submissions must name a contractor".to_string())
            })?;
            // A farmer may only attach their own parcel.
            if let Some(land_id) = input.land_id {
                verify_land_owner(db.get_ref(), land_id, user.0.id).await?;
            }
            (user.0.id, contractor_id)
        }
        Role::Admin => {
            return Err(ApiError::Forbidden(
                "The admin is not a contract party".to_string(),
            ));
        }
    };

    let farmer = profile_db::get_profile_by_id(db.get_ref(), farmer_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Profile {farmer_id}")))?;
    if farmer.role != Role::Farmer {
        return Err(ApiError::Validation(
            "Referenced farmer does not hold the farmer role".to_string(),
        ));
    }
    let contractor = profile_db::get_profile_by_id(db.get_ref(), contractor_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Profile {contractor_id}")))?;
    if contractor.role != Role::Contractor {
        return Err(ApiError::Validation(
            "Referenced contractor does not hold the contractor role".to_string(),
        ));
    }

    let counterparty = if user.0.id == farmer_id {
        contractor_id
    } else {
        farmer_id
    };
    let notify = NewNotification {
        user_id: counterparty,
        title: "New contract proposal".to_string(),
        message: format!(
            "{} submitted a contract proposal: \"{}\"",
            user.0.full_name, input.title
        ),
        kind: KIND_CONTRACT_STATUS,
    };

    let new_contract = contract_db::NewContract {
        title: input.title,
        description: input.description,
        crop_type: input.crop_type,
        quantity: input.quantity,
        price: input.price,
        start_date: input.start_date,
        end_date: input.end_date,
        farmer_id,
        contractor_id,
        land_id: input.land_id,
    };

    let created = contract_db::insert_contract(db.get_ref(), new_contract, notify).await?;
    tracing::info!(contract = %created.id, "contract submitted");

    Ok(HttpResponse::Created().json(created))
}

/// GET /api/contracts — role-scoped listing, newest first.
///
/// Admin sees everything; farmers and contractors see only contracts
/// where they are the respective party.
pub async fn get_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ContractListQuery>,
) -> Result<HttpResponse, ApiError> {
    let status = query.status;

    let contracts = match user.0.role {
        Role::Admin => contract_db::get_all_contracts(db.get_ref(), status).await?,
        Role::Farmer => {
            contract_db::get_contracts_by_farmer(db.get_ref(), user.0.id, status).await?
        }
        Role::Contractor => {
            contract_db::get_contracts_by_contractor(db.get_ref(), user.0.id, status).await?
        }
    };

    Ok(HttpResponse::Ok().json(contracts))
}

/// GET /api/contracts/{id} — parties and admin only.
pub async fn get_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let contract = verify_contract_access(db.get_ref(), path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(contract))
}

/// PUT /api/contracts/{id}/status — the lifecycle transition.
///
/// The transition table decides which role may drive which edge; the
/// store layer re-checks the source status under lock (compare-and-swap)
/// so a concurrent transition surfaces as `Conflict` rather than a lost
/// update. Counterparty notifications commit atomically with the write.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<TransitionRequest>,
) -> Result<HttpResponse, ApiError> {
    let contract_id = path.into_inner();
    let target = body.status;

    let expected_source = lifecycle::required_source(target).ok_or_else(|| {
        ApiError::Validation(format!(
            "No transition leads into status '{}'",
            target.as_str()
        ))
    })?;

    // Parties and admin may look; the table decides who may move.
    let contract = verify_contract_access(db.get_ref(), contract_id, &user.0).await?;

    if !lifecycle::actor_may_transition(user.0.role, target) {
        return Err(ApiError::Forbidden(format!(
            "Your role may not move a contract to '{}'",
            target.as_str()
        )));
    }

    // Notes ride along only on the admin approve/reject edges.
    let admin_notes = body
        .admin_notes
        .clone()
        .filter(|_| lifecycle::accepts_admin_notes(target));

    let recipients: Vec<Uuid> = if user.0.role == Role::Admin {
        vec![contract.farmer_id, contract.contractor_id]
    } else if user.0.id == contract.farmer_id {
        vec![contract.contractor_id]
    } else {
        vec![contract.farmer_id]
    };

    let notify = recipients
        .into_iter()
        .map(|user_id| NewNotification {
            user_id,
            title: format!("Contract {}", target.as_str()),
            message: match &admin_notes {
                Some(notes) => format!(
                    "Contract \"{}\" is now {}. Note: {}",
                    contract.title,
                    target.as_str(),
                    notes
                ),
                None => format!("Contract \"{}\" is now {}.", contract.title, target.as_str()),
            },
            kind: KIND_CONTRACT_STATUS,
        })
        .collect();

    let updated = contract_db::transition_contract(
        db.get_ref(),
        contract_id,
        expected_source,
        target,
        admin_notes,
        notify,
    )
    .await?;

    // Activation and closure flip is_lended, so every cached browse
    // variant (filtered or not) is stale and must go now, not at TTL.
    if updated.land_id.is_some()
        && matches!(target, Status::Active | Status::Completed | Status::Terminated)
    {
        cache::invalidate_browse(&cache).await;
    }

    tracing::info!(
        contract = %updated.id,
        from = expected_source.as_str(),
        to = target.as_str(),
        actor = %user.0.id,
        "contract transitioned"
    );

    Ok(HttpResponse::Ok().json(updated))
}
