use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait,
};

use crate::errors::internal::{InternalError, ReservationError};
use crate::types::db::reservation::{self, ActiveModel, Entity as Reservation};
use crate::types::internal::{NewReservation, ReservationStatus, ReservationUpdate, VisitStatus};

/// ReservationStore persists bookings; it applies changes but decides none
pub struct ReservationStore {
    db: DatabaseConnection,
}

impl ReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a booking in PENDING / PENDING
    pub async fn insert(&self, request: NewReservation) -> Result<reservation::Model, InternalError> {
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(request.user_id),
            restaurant_id: Set(request.restaurant_id),
            restaurant_name: Set(request.restaurant_name),
            user_name: Set(request.user_name),
            user_phone: Set(request.user_phone),
            user_email: Set(request.user_email),
            reservation_date: Set(request.reservation_date),
            reservation_time: Set(request.reservation_time),
            guests: Set(request.guests),
            special_requests: Set(request.special_requests),
            status: Set(ReservationStatus::Pending.as_str().to_string()),
            rejection_reason: Set(None),
            visit_status: Set(VisitStatus::Pending.as_str().to_string()),
            visit_confirmed_at: Set(None),
            no_show_reason: Set(None),
            blacklist_reason: Set(None),
            is_blacklisted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_reservation", e))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<reservation::Model>, InternalError> {
        Reservation::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_reservation", e))
    }

    /// Read-modify-write of one reservation inside a transaction
    ///
    /// `decide` sees the current row and returns the changes to apply, or an
    /// error to abort without writing.
    pub async fn modify<F>(&self, id: i64, decide: F) -> Result<reservation::Model, InternalError>
    where
        F: FnOnce(&reservation::Model) -> Result<ReservationUpdate, InternalError>,
    {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let current = Reservation::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_reservation", e))?
            .ok_or(ReservationError::NotFound(id))?;

        // Dropping txn without commit rolls back
        let update = decide(&current)?;

        let mut active: ActiveModel = current.into();
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(reason) = update.rejection_reason {
            active.rejection_reason = Set(Some(reason));
        }
        if let Some(visit_status) = update.visit_status {
            active.visit_status = Set(visit_status.as_str().to_string());
        }
        if let Some(confirmed_at) = update.visit_confirmed_at {
            active.visit_confirmed_at = Set(Some(confirmed_at));
        }
        if let Some(reason) = update.no_show_reason {
            active.no_show_reason = Set(Some(reason));
        }
        if let Some(reason) = update.blacklist_reason {
            active.blacklist_reason = Set(Some(reason));
        }
        if let Some(flag) = update.is_blacklisted {
            active.is_blacklisted = Set(flag);
        }
        active.updated_at = Set(Utc::now().timestamp());

        let saved = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_reservation", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(saved)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<reservation::Model>, InternalError> {
        Self::newest_first(Reservation::find().filter(reservation::Column::UserId.eq(user_id)))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reservations_by_user", e))
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<reservation::Model>, InternalError> {
        Self::newest_first(Reservation::find().filter(reservation::Column::RestaurantId.eq(restaurant_id)))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reservations_by_restaurant", e))
    }

    /// Every reservation in insertion order
    pub async fn list_all(&self) -> Result<Vec<reservation::Model>, InternalError> {
        Reservation::find()
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reservations", e))
    }

    pub async fn list_by_visit_status(&self, visit_status: VisitStatus) -> Result<Vec<reservation::Model>, InternalError> {
        Self::newest_first(Reservation::find().filter(reservation::Column::VisitStatus.eq(visit_status.as_str())))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reservations_by_visit_status", e))
    }

    pub async fn list_blacklisted(&self) -> Result<Vec<reservation::Model>, InternalError> {
        Self::newest_first(Reservation::find().filter(reservation::Column::IsBlacklisted.eq(true)))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_blacklisted_reservations", e))
    }

    // created_at has one-second resolution; id breaks ties
    fn newest_first(query: Select<Reservation>) -> Select<Reservation> {
        query
            .order_by_desc(reservation::Column::CreatedAt)
            .order_by_desc(reservation::Column::Id)
    }
}
