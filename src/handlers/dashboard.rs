use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::{contracts as contract_db, lands as land_db, notifications as notification_db};
use crate::error::ApiError;
use crate::models::contracts::Status;
use crate::models::profiles::Role;

/// Per-role dashboard counters. Farmers see their own parcel count,
/// contractors the open browse pool; the contract and notification
/// counters are always scoped to the caller.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_lands: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_lands: Option<u64>,
    pub my_contracts: u64,
    pub active_contracts: u64,
    pub unread_notifications: u64,
}

/// GET /api/dashboard — farmer and contractor overview counts.
pub async fn summary(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let db = db.get_ref();
    let me = user.0.id;

    let summary = match user.0.role {
        Role::Farmer => DashboardSummary {
            my_lands: Some(land_db::count_by_farmer(db, me).await?),
            available_lands: None,
            my_contracts: contract_db::count_for_farmer(db, me, None).await?,
            active_contracts: contract_db::count_for_farmer(db, me, Some(Status::Active)).await?,
            unread_notifications: notification_db::count_unread(db, me).await?,
        },
        Role::Contractor => DashboardSummary {
            my_lands: None,
            available_lands: Some(land_db::count_available(db).await?),
            my_contracts: contract_db::count_for_contractor(db, me, None).await?,
            active_contracts: contract_db::count_for_contractor(db, me, Some(Status::Active))
                .await?,
            unread_notifications: notification_db::count_unread(db, me).await?,
        },
        Role::Admin => {
            return Err(ApiError::Forbidden(
                "Admins use /api/admin/stats".to_string(),
            ));
        }
    };

    Ok(HttpResponse::Ok().json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_specific_counters_are_omitted_not_nulled() {
        let farmer = DashboardSummary {
            my_lands: Some(3),
            available_lands: None,
            my_contracts: 2,
            active_contracts: 1,
            unread_notifications: 4,
        };
        let json = serde_json::to_value(&farmer).unwrap();
        assert_eq!(json["my_lands"], 3);
        assert!(json.get("available_lands").is_none());

        let contractor = DashboardSummary {
            my_lands: None,
            available_lands: Some(7),
            my_contracts: 0,
            active_contracts: 0,
            unread_notifications: 0,
        };
        let json = serde_json::to_value(&contractor).unwrap();
        assert_eq!(json["available_lands"], 7);
        assert!(json.get("my_lands").is_none());
    }
}
