use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application roles, stored as lowercase strings in a Postgres TEXT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "farmer")]
    Farmer,
    #[sea_orm(string_value = "contractor")]
    Contractor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// SeaORM entity for the `profiles` table.
///
/// The primary key is the auth provider's user UUID; one row per account,
/// created lazily on the first authenticated request.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub pin_code: Option<String>,
    pub aadhaar_number: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lands::Entity")]
    Lands,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::lands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lands.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (request/response shapes, not stored) ──

/// Used by the auth extractor to create a profile from JWT claims.
#[derive(Debug, Clone)]
pub struct CreateProfileFromAuth {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// PUT /api/auth/profile — owner-editable personal fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub pin_code: Option<String>,
    pub aadhaar_number: Option<String>,
}

/// PUT /api/profiles/{id}/approval — admin sets the approval flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SetApproval {
    pub is_approved: bool,
}

/// Safe profile representation for API responses (Aadhaar number is the
/// one field withheld from anything except the owner's own `/auth/me`).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub pin_code: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for ProfileResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            full_name: m.full_name,
            phone_number: m.phone_number,
            address: m.address,
            pin_code: m.pin_code,
            role: m.role,
            is_approved: m.is_approved,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
