use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications::{self, NewNotification};

/// Insert a notification on any connection (plain pool or an open
/// transaction — the transition path writes these atomically with the
/// status update).
pub async fn insert_on<C: ConnectionTrait>(
    conn: &C,
    input: NewNotification,
) -> Result<notifications::Model, DbErr> {
    let row = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        title: Set(input.title),
        message: Set(input.message),
        kind: Set(input.kind.to_string()),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    row.insert(conn).await
}

/// A user's notifications, newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch one notification (ownership is checked by the handler).
pub async fn get_notification_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    notifications::Entity::find_by_id(id).one(db).await
}

/// Mark a notification read. Idempotent: an already-read row is returned
/// unchanged and the call still succeeds.
pub async fn mark_read(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<notifications::Model, DbErr> {
    let notif = notifications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Notification not found".to_string()))?;

    if notif.is_read {
        return Ok(notif);
    }

    let mut active: notifications::ActiveModel = notif.into();
    active.is_read = Set(true);
    active.update(db).await
}

/// Unread notification count for the dashboard badge.
pub async fn count_unread(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn notification(is_read: bool) -> notifications::Model {
        notifications::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Contract approved".to_string(),
            message: "Contract \"Wheat 2026\" is now approved.".to_string(),
            kind: "contract_status".to_string(),
            is_read,
            created_at: chrono::Utc::now(),
        }
    }

    /// Marking an already-read notification again returns the row as-is
    /// without issuing a write: the transaction log stops at the lookup.
    #[tokio::test]
    async fn mark_read_is_idempotent() {
        let already_read = notification(true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![already_read.clone()]])
            .into_connection();

        let result = mark_read(&db, already_read.id).await.unwrap();
        assert!(result.is_read);
        assert_eq!(result, already_read);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1, "second mark must not write: {log:?}");
    }

    /// The unread path issues exactly one lookup and one update.
    #[tokio::test]
    async fn mark_read_updates_an_unread_row() {
        let unread = notification(false);
        let read = notifications::Model {
            is_read: true,
            ..unread.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![unread.clone()], vec![read]])
            .into_connection();

        let result = mark_read(&db, unread.id).await.unwrap();
        assert!(result.is_read);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
    }
}
