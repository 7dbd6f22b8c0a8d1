use sea_orm::*;
use uuid::Uuid;

use crate::models::lands::{self, CreateLand, Quality, UpdateLand};

/// Insert a new parcel for a farmer (never lended at creation).
pub async fn insert_land(
    db: &DatabaseConnection,
    farmer_id: Uuid,
    input: CreateLand,
) -> Result<lands::Model, DbErr> {
    let new_land = lands::ActiveModel {
        id: Set(Uuid::new_v4()),
        farmer_id: Set(farmer_id),
        area: Set(input.area),
        location: Set(input.location),
        pin_code: Set(input.pin_code),
        price: Set(input.price),
        quality: Set(input.quality),
        crop_feasibility: Set(input.crop_feasibility),
        is_lended: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_land.insert(db).await
}

/// Fetch a single parcel by ID.
pub async fn get_land_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<lands::Model>, DbErr> {
    lands::Entity::find_by_id(id).one(db).await
}

/// A farmer's own parcels, newest first.
pub async fn get_lands_by_farmer(
    db: &DatabaseConnection,
    farmer_id: Uuid,
) -> Result<Vec<lands::Model>, DbErr> {
    lands::Entity::find()
        .filter(lands::Column::FarmerId.eq(farmer_id))
        .order_by_desc(lands::Column::CreatedAt)
        .all(db)
        .await
}

/// Build the contractor browse query. Lended parcels are excluded here,
/// unconditionally, so the visibility gate holds no matter which quality
/// filter or search term a caller layers on top.
fn browse_query(quality: Option<Quality>, search: Option<&str>) -> Select<lands::Entity> {
    let mut query = lands::Entity::find()
        .filter(lands::Column::IsLended.eq(false))
        .order_by_desc(lands::Column::CreatedAt);

    if let Some(quality) = quality {
        query = query.filter(lands::Column::Quality.eq(quality));
    }
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(lands::Column::Location.contains(term))
                .add(lands::Column::Area.contains(term))
                .add(lands::Column::CropFeasibility.contains(term)),
        );
    }

    query
}

/// Contractor browse listing, newest first.
pub async fn get_available_lands(
    db: &DatabaseConnection,
    quality: Option<Quality>,
    search: Option<&str>,
) -> Result<Vec<lands::Model>, DbErr> {
    browse_query(quality, search).all(db).await
}

/// Every parcel (admin view), newest first.
pub async fn get_all_lands(db: &DatabaseConnection) -> Result<Vec<lands::Model>, DbErr> {
    lands::Entity::find()
        .order_by_desc(lands::Column::CreatedAt)
        .all(db)
        .await
}

/// Owner update of parcel fields. `is_lended` is deliberately absent:
/// only the contract transition flips it.
pub async fn update_land(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateLand,
) -> Result<lands::Model, DbErr> {
    let land = lands::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Land not found".to_string()))?;

    let mut active: lands::ActiveModel = land.into();

    if let Some(area) = input.area {
        active.area = Set(area);
    }
    if let Some(location) = input.location {
        active.location = Set(location);
    }
    if let Some(pin_code) = input.pin_code {
        active.pin_code = Set(Some(pin_code));
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(quality) = input.quality {
        active.quality = Set(quality);
    }
    if let Some(crop_feasibility) = input.crop_feasibility {
        active.crop_feasibility = Set(Some(crop_feasibility));
    }

    active.update(db).await
}

/// Delete a parcel by ID.
pub async fn delete_land(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    lands::Entity::delete_by_id(id).exec(db).await
}

/// Total parcel count (admin dashboard).
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    lands::Entity::find().count(db).await
}

/// Parcels still open for proposals.
pub async fn count_available(db: &DatabaseConnection) -> Result<u64, DbErr> {
    lands::Entity::find()
        .filter(lands::Column::IsLended.eq(false))
        .count(db)
        .await
}

/// A farmer's own parcel count (dashboard).
pub async fn count_by_farmer(db: &DatabaseConnection, farmer_id: Uuid) -> Result<u64, DbErr> {
    lands::Entity::find()
        .filter(lands::Column::FarmerId.eq(farmer_id))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(quality: Option<Quality>, search: Option<&str>) -> String {
        browse_query(quality, search).build(DbBackend::Postgres).to_string()
    }

    /// A lended parcel must never reach the browse result, whatever the
    /// caller filters on: the gate is part of the query itself, so given
    /// one lended and one open parcel the store can only ever hand back
    /// the open one.
    #[test]
    fn browse_always_excludes_lended_parcels() {
        for (quality, search) in [
            (None, None),
            (Some(Quality::Good), None),
            (None, Some("wheat")),
            (Some(Quality::Excellent), Some("river delta")),
        ] {
            let sql = sql(quality, search);
            assert!(
                sql.contains(r#""is_lended" = FALSE"#),
                "visibility gate missing from: {sql}"
            );
        }
    }

    /// Filters narrow the listing; they must never widen it past the gate.
    #[test]
    fn browse_filters_are_conjoined_with_the_gate() {
        let sql = sql(Some(Quality::Good), Some("wheat"));
        assert!(sql.contains(r#""is_lended" = FALSE AND"#), "gate not ANDed: {sql}");
        assert!(sql.contains(r#""quality" = 'good'"#));
        assert!(sql.contains("'%wheat%'"));
    }

    #[test]
    fn empty_search_adds_no_condition() {
        assert_eq!(sql(None, Some("")), sql(None, None));
    }

    #[test]
    fn browse_orders_newest_first() {
        assert!(sql(None, None).contains(r#"ORDER BY "lands"."created_at" DESC"#));
    }
}
