use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract lifecycle status, stored as a lowercase string.
///
/// `Draft` is part of the enumeration but no endpoint creates it;
/// contracts enter the store directly in `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

impl Status {
    /// Lowercase wire name, for notification messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Submitted => "submitted",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Active => "active",
            Status::Completed => "completed",
            Status::Terminated => "terminated",
        }
    }
}

/// SeaORM entity for the `contracts` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub crop_type: String,
    pub quantity: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Status,
    pub farmer_id: Uuid,
    pub contractor_id: Uuid,
    pub land_id: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::FarmerId",
        to = "super::profiles::Column::Id"
    )]
    Farmer,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ContractorId",
        to = "super::profiles::Column::Id"
    )]
    Contractor,
    #[sea_orm(
        belongs_to = "super::lands::Entity",
        from = "Column::LandId",
        to = "super::lands::Column::Id"
    )]
    Land,
}

impl Related<super::lands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Land.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// POST /api/contracts.
///
/// A contractor proposal names the parcel (`land_id`); the farmer party is
/// derived from the parcel's owner. A farmer submission names the
/// contractor directly and may optionally reference one of their own lands.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub title: String,
    pub description: Option<String>,
    pub crop_type: String,
    pub quantity: Option<String>,
    pub price: f64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub land_id: Option<Uuid>,
    /// Required when a farmer submits; ignored for contractor proposals.
    pub contractor_id: Option<Uuid>,
}

/// PUT /api/contracts/{id}/status — lifecycle transition request.
/// `admin_notes` is only honored on the admin edges out of `submitted`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub status: Status,
    pub admin_notes: Option<String>,
}

/// Query params for GET /api/contracts.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    pub status: Option<Status>,
}
