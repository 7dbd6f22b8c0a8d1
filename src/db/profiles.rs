use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, CreateProfileFromAuth, Role, UpdateProfile};

/// Create a profile from auth JWT claims if one does not exist yet
/// (called by the auth extractor on every request).
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateProfileFromAuth,
) -> Result<profiles::Model, DbErr> {
    if let Some(existing) = profiles::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    // First authenticated request for this account — admin approval pending.
    let new_profile = profiles::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        full_name: Set(input.full_name),
        phone_number: Set(None),
        address: Set(None),
        pin_code: Set(None),
        aadhaar_number: Set(None),
        role: Set(input.role),
        is_approved: Set(false),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_profile.insert(db).await
}

/// Fetch a single profile by ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Admin listing: newest first, optional role filter and name/phone/address
/// substring search, paginated.
pub async fn get_profiles_paginated(
    db: &DatabaseConnection,
    role: Option<Role>,
    search: Option<&str>,
    page: u64,
    limit: u64,
) -> Result<Vec<profiles::Model>, DbErr> {
    let mut query = profiles::Entity::find().order_by_desc(profiles::Column::CreatedAt);

    if let Some(role) = role {
        query = query.filter(profiles::Column::Role.eq(role));
    }
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(profiles::Column::FullName.contains(term))
                .add(profiles::Column::PhoneNumber.contains(term))
                .add(profiles::Column::Address.contains(term)),
        );
    }

    query.paginate(db, limit).fetch_page(page - 1).await
}

/// Owner update of personal fields.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(full_name) = input.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(pin_code) = input.pin_code {
        active.pin_code = Set(Some(pin_code));
    }
    if let Some(aadhaar_number) = input.aadhaar_number {
        active.aadhaar_number = Set(Some(aadhaar_number));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Admin approval flag write. Setting the current value again is a no-op
/// update, so toggling twice restores the original state.
pub async fn set_approval(
    db: &DatabaseConnection,
    id: Uuid,
    approved: bool,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();
    active.is_approved = Set(approved);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Count profiles with a given role (admin dashboard).
pub async fn count_by_role(db: &DatabaseConnection, role: Role) -> Result<u64, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::Role.eq(role))
        .count(db)
        .await
}

/// Count profiles still awaiting approval.
pub async fn count_pending(db: &DatabaseConnection) -> Result<u64, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::IsApproved.eq(false))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn profile(is_approved: bool) -> profiles::Model {
        profiles::Model {
            id: Uuid::new_v4(),
            email: "ramesh@example.com".to_string(),
            full_name: "Ramesh Patel".to_string(),
            phone_number: None,
            address: None,
            pin_code: None,
            aadhaar_number: None,
            role: Role::Farmer,
            is_approved,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    /// Approving then un-approving lands the account back where it
    /// started; the flag is a plain write with no hidden side state.
    #[tokio::test]
    async fn approval_toggle_is_invertible() {
        let pending = profile(false);
        let approved = profiles::Model {
            is_approved: true,
            ..pending.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![pending.clone()],
                vec![approved.clone()],
                vec![approved.clone()],
                vec![pending.clone()],
            ])
            .into_connection();

        let granted = set_approval(&db, pending.id, true).await.unwrap();
        assert!(granted.is_approved);

        let revoked = set_approval(&db, pending.id, false).await.unwrap();
        assert!(!revoked.is_approved);
        assert_eq!(revoked.is_approved, pending.is_approved);

        // Two lookups, two updates.
        assert_eq!(db.into_transaction_log().len(), 4);
    }

    /// Setting the flag on a missing account surfaces as a not-found
    /// error rather than an insert.
    #[tokio::test]
    async fn approval_of_unknown_profile_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profiles::Model>::new()])
            .into_connection();

        let err = set_approval(&db, Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotFound(_)));
    }
}
