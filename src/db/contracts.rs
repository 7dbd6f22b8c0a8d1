use chrono::NaiveDate;
use sea_orm::*;
use uuid::Uuid;

use crate::db::notifications as notification_db;
use crate::error::ApiError;
use crate::models::contracts::{self, Status};
use crate::models::lands;
use crate::models::notifications::NewNotification;

/// Everything needed to persist a new contract. Built by the handler
/// after party roles have been validated; rows always start `Submitted`.
#[derive(Debug, Clone)]
pub struct NewContract {
    pub title: String,
    pub description: Option<String>,
    pub crop_type: String,
    pub quantity: Option<String>,
    pub price: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub farmer_id: Uuid,
    pub contractor_id: Uuid,
    pub land_id: Option<Uuid>,
}

/// Insert a new contract together with the counterparty notification,
/// in one transaction.
pub async fn insert_contract(
    db: &DatabaseConnection,
    input: NewContract,
    notify: NewNotification,
) -> Result<contracts::Model, ApiError> {
    let created = db
        .transaction::<_, contracts::Model, ApiError>(move |txn| {
            Box::pin(async move {
                let row = contracts::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    title: Set(input.title),
                    description: Set(input.description),
                    crop_type: Set(input.crop_type),
                    quantity: Set(input.quantity),
                    price: Set(input.price),
                    start_date: Set(input.start_date),
                    end_date: Set(input.end_date),
                    status: Set(Status::Submitted),
                    farmer_id: Set(input.farmer_id),
                    contractor_id: Set(input.contractor_id),
                    land_id: Set(input.land_id),
                    admin_notes: Set(None),
                    created_at: Set(chrono::Utc::now()),
                };
                let created = row.insert(txn).await?;

                notification_db::insert_on(txn, notify).await?;

                Ok(created)
            })
        })
        .await?;

    Ok(created)
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Every contract (admin scope), newest first, optional status filter.
pub async fn get_all_contracts(
    db: &DatabaseConnection,
    status: Option<Status>,
) -> Result<Vec<contracts::Model>, DbErr> {
    let mut query = contracts::Entity::find().order_by_desc(contracts::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Contracts where the given profile is the farmer party.
pub async fn get_contracts_by_farmer(
    db: &DatabaseConnection,
    farmer_id: Uuid,
    status: Option<Status>,
) -> Result<Vec<contracts::Model>, DbErr> {
    let mut query = contracts::Entity::find()
        .filter(contracts::Column::FarmerId.eq(farmer_id))
        .order_by_desc(contracts::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Contracts where the given profile is the contractor party.
pub async fn get_contracts_by_contractor(
    db: &DatabaseConnection,
    contractor_id: Uuid,
    status: Option<Status>,
) -> Result<Vec<contracts::Model>, DbErr> {
    let mut query = contracts::Entity::find()
        .filter(contracts::Column::ContractorId.eq(contractor_id))
        .order_by_desc(contracts::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Execute a lifecycle transition as one atomic unit:
///
/// 1. Lock the contract row and compare-and-swap on `expected_source` —
///    a concurrent transition that got there first surfaces as `Conflict`
///    and leaves the row untouched.
/// 2. On activation, claim the referenced parcel (`is_lended = true`);
///    an already-lended parcel is a `Conflict`. On completion or
///    termination the parcel is released back to the browse pool.
/// 3. Write the counterparty notifications.
///
/// The caller has already checked the transition table and party
/// membership; this layer guards only against concurrent writers.
pub async fn transition_contract(
    db: &DatabaseConnection,
    id: Uuid,
    expected_source: Status,
    target: Status,
    admin_notes: Option<String>,
    notify: Vec<NewNotification>,
) -> Result<contracts::Model, ApiError> {
    let updated = db
        .transaction::<_, contracts::Model, ApiError>(move |txn| {
            Box::pin(async move {
                let contract = contracts::Entity::find_by_id(id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found(format!("Contract {id}")))?;

                if contract.status != expected_source {
                    return Err(ApiError::Conflict(format!(
                        "Contract is {}, expected {}",
                        contract.status.as_str(),
                        expected_source.as_str()
                    )));
                }

                if let Some(land_id) = contract.land_id {
                    match target {
                        Status::Active => claim_land(txn, land_id).await?,
                        Status::Completed | Status::Terminated => {
                            release_land(txn, land_id).await?
                        }
                        _ => {}
                    }
                }

                let mut active: contracts::ActiveModel = contract.into();
                active.status = Set(target);
                if let Some(notes) = admin_notes {
                    active.admin_notes = Set(Some(notes));
                }
                let updated = active.update(txn).await?;

                for n in notify {
                    notification_db::insert_on(txn, n).await?;
                }

                Ok(updated)
            })
        })
        .await?;

    Ok(updated)
}

/// At most one active contract per parcel: flip `is_lended` under lock,
/// refusing if another contract already holds the parcel.
async fn claim_land(txn: &DatabaseTransaction, land_id: Uuid) -> Result<(), ApiError> {
    let land = lands::Entity::find_by_id(land_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Land {land_id}")))?;

    if land.is_lended {
        return Err(ApiError::Conflict(
            "Land is already lended under another active contract".to_string(),
        ));
    }

    let mut active: lands::ActiveModel = land.into();
    active.is_lended = Set(true);
    active.update(txn).await?;
    Ok(())
}

async fn release_land(txn: &DatabaseTransaction, land_id: Uuid) -> Result<(), ApiError> {
    let land = lands::Entity::find_by_id(land_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Land {land_id}")))?;

    if !land.is_lended {
        return Ok(());
    }

    let mut active: lands::ActiveModel = land.into();
    active.is_lended = Set(false);
    active.update(txn).await?;
    Ok(())
}

/// Count contracts in a given status (admin dashboard).
pub async fn count_by_status(db: &DatabaseConnection, status: Status) -> Result<u64, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::Status.eq(status))
        .count(db)
        .await
}

/// Total contract count.
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    contracts::Entity::find().count(db).await
}

/// Count contracts where the profile is the farmer party, optionally
/// narrowed to one status (dashboard).
pub async fn count_for_farmer(
    db: &DatabaseConnection,
    farmer_id: Uuid,
    status: Option<Status>,
) -> Result<u64, DbErr> {
    let mut query = contracts::Entity::find().filter(contracts::Column::FarmerId.eq(farmer_id));
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.count(db).await
}

/// Count contracts where the profile is the contractor party.
pub async fn count_for_contractor(
    db: &DatabaseConnection,
    contractor_id: Uuid,
    status: Option<Status>,
) -> Result<u64, DbErr> {
    let mut query =
        contracts::Entity::find().filter(contracts::Column::ContractorId.eq(contractor_id));
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }
    query.count(db).await
}
