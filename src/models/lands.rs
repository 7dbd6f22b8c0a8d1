use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Soil/land quality grades, stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[sea_orm(string_value = "excellent")]
    Excellent,
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "average")]
    Average,
    #[sea_orm(string_value = "poor")]
    Poor,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Excellent => "excellent",
            Quality::Good => "good",
            Quality::Average => "average",
            Quality::Poor => "poor",
        }
    }
}

/// SeaORM entity for the `lands` table.
///
/// `is_lended` is the visibility gate: a lended parcel never shows up in
/// the contractor browse listing, and is flipped transactionally when a
/// contract over the parcel activates or closes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub area: String,
    pub location: String,
    pub pin_code: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub quality: Quality,
    pub crop_feasibility: Option<String>,
    pub is_lended: bool,
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
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farmer.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// POST /api/lands — `farmer_id` comes from the JWT, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLand {
    pub area: String,
    pub location: String,
    pub pin_code: Option<String>,
    pub price: f64,
    pub quality: Quality,
    pub crop_feasibility: Option<String>,
}

/// PUT /api/lands/{id} — all fields optional, owner only.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLand {
    pub area: Option<String>,
    pub location: Option<String>,
    pub pin_code: Option<String>,
    pub price: Option<f64>,
    pub quality: Option<Quality>,
    pub crop_feasibility: Option<String>,
}

/// Query params for GET /api/lands/available.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseQuery {
    pub quality: Option<Quality>,
    pub search: Option<String>,
}
