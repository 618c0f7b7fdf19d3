//! SeaORM implementation of BookingRepository
//!
//! Writes that claim dates (`reserve`, `reschedule`) run in one transaction
//! that first writes the property row. On SQLite that write takes the
//! database write lock, elsewhere it locks the row; either way concurrent
//! writers for one property run one after another, so the overlap check,
//! the identifier allocation and the insert see a stable calendar.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, warn};

use super::db_err;
use crate::domain::booking::{
    format_booking_id, next_booking_id, parse_sequence, Booking, BookingFilter,
    BookingRepository, BookingStatus, NewBooking, StayOutcome, BOOKING_ID_PREFIX,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, booking_sequence, property};
use crate::shared::{PaginatedResult, PaginationParams};

// ── Conversion helpers ──────────────────────────────────────────

fn string_to_status(s: &str) -> BookingStatus {
    BookingStatus::parse(s).unwrap_or_else(|| {
        warn!(status = s, "Unknown booking status in database, treating as Confirmed");
        BookingStatus::Confirmed
    })
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        booking_id: m.booking_id,
        property_id: m.property_id,
        user_id: m.user_id,
        check_in: m.check_in,
        check_out: m.check_out,
        no_of_guests: m.no_of_guests,
        notes: m.notes,
        status: string_to_status(&m.status),
        reminder_sent: m.reminder_sent,
        cancelled_at: m.cancelled_at,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        booking_id: Set(b.booking_id),
        property_id: Set(b.property_id),
        user_id: Set(b.user_id),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        no_of_guests: Set(b.no_of_guests),
        notes: Set(b.notes),
        status: Set(b.status.as_str().to_string()),
        reminder_sent: Set(b.reminder_sent),
        cancelled_at: Set(b.cancelled_at),
        created_by: Set(b.created_by),
        updated_by: Set(b.updated_by),
        created_at: Set(b.created_at),
        updated_at: Set(Utc::now()),
    }
}

fn not_updated(id: i32) -> impl FnOnce(sea_orm::DbErr) -> DomainError {
    move |e| match e {
        sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Booking", "id", id),
        other => db_err(other),
    }
}

fn property_number(property_id: i32) -> DomainResult<u32> {
    u32::try_from(property_id)
        .ok()
        .filter(|pid| *pid >= 1)
        .ok_or_else(|| DomainError::Validation(format!("Invalid property id {}", property_id)))
}

// ── Transaction steps ───────────────────────────────────────────

/// No-op write on the property row; must be the first statement of the
/// transaction.
async fn lock_property(txn: &DatabaseTransaction, property_id: i32) -> DomainResult<()> {
    let result = property::Entity::update_many()
        .col_expr(
            property::Column::UpdatedAt,
            Expr::col(property::Column::UpdatedAt).into(),
        )
        .filter(property::Column::Id.eq(property_id))
        .exec(txn)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(DomainError::not_found("Property", "id", property_id));
    }
    Ok(())
}

/// First non-cancelled booking of the property overlapping `[check_in, check_out)`
async fn first_overlap(
    txn: &DatabaseTransaction,
    property_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_id: Option<i32>,
) -> DomainResult<Option<booking::Model>> {
    let mut query = booking::Entity::find()
        .filter(booking::Column::PropertyId.eq(property_id))
        .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
        .filter(booking::Column::CheckIn.lt(check_out))
        .filter(booking::Column::CheckOut.gt(check_in));
    if let Some(id) = exclude_id {
        query = query.filter(booking::Column::Id.ne(id));
    }
    query
        .order_by_asc(booking::Column::CheckIn)
        .one(txn)
        .await
        .map_err(db_err)
}

/// Identifier with the highest sequence already issued for this property in `year`.
async fn latest_issued(
    txn: &DatabaseTransaction,
    property_id: i32,
    pid: u32,
    year: i32,
) -> DomainResult<Option<String>> {
    let prefix = format!("{}{:04}", BOOKING_ID_PREFIX, year);
    let ids: Vec<String> = booking::Entity::find()
        .select_only()
        .column(booking::Column::BookingId)
        .filter(booking::Column::PropertyId.eq(property_id))
        .filter(booking::Column::BookingId.starts_with(&prefix))
        .into_tuple()
        .all(txn)
        .await
        .map_err(db_err)?;

    Ok(ids
        .into_iter()
        .filter_map(|id| parse_sequence(&id, pid).map(|seq| (seq, id)))
        .max_by_key(|(seq, _)| *seq)
        .map(|(_, id)| id))
}

/// Next identifier from the `(property, year)` counter.
///
/// The counter is bumped with a single `UPDATE ... last_value + 1`. A
/// missing counter continues from identifiers already present in
/// `bookings`; a concurrent seed loses on the unique index and surfaces
/// as `Conflict`.
async fn next_identifier(
    txn: &DatabaseTransaction,
    property_id: i32,
    year: i32,
) -> DomainResult<String> {
    let pid = property_number(property_id)?;
    let now = Utc::now();

    let updated = booking_sequence::Entity::update_many()
        .col_expr(
            booking_sequence::Column::LastValue,
            Expr::col(booking_sequence::Column::LastValue).add(1),
        )
        .col_expr(booking_sequence::Column::UpdatedAt, Expr::value(now))
        .filter(booking_sequence::Column::PropertyId.eq(property_id))
        .filter(booking_sequence::Column::Year.eq(year))
        .exec(txn)
        .await
        .map_err(db_err)?;

    if updated.rows_affected > 0 {
        let value = booking_sequence::Entity::find()
            .filter(booking_sequence::Column::PropertyId.eq(property_id))
            .filter(booking_sequence::Column::Year.eq(year))
            .one(txn)
            .await
            .map_err(db_err)?
            .map(|m| m.last_value)
            .ok_or_else(|| DomainError::not_found("BookingSequence", "property_id", property_id))?;
        let sequence = u32::try_from(value).map_err(|_| {
            DomainError::Validation(format!(
                "Booking sequence for property {} is exhausted",
                property_id
            ))
        })?;
        return Ok(format_booking_id(year, pid, sequence));
    }

    let latest = latest_issued(txn, property_id, pid, year).await?;
    let identifier = next_booking_id(year, pid, latest.as_deref())
        .map_err(|e| DomainError::Validation(e.to_string()))?;
    let sequence = parse_sequence(&identifier, pid)
        .ok_or_else(|| DomainError::Validation(format!("Unparseable identifier {}", identifier)))?;

    booking_sequence::ActiveModel {
        property_id: Set(property_id),
        year: Set(year),
        last_value: Set(i64::from(sequence)),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(db_err)?;
    debug!(property_id, year, seed = ?latest, "Booking sequence seeded");

    Ok(identifier)
}

// ── SeaOrmBookingRepository ─────────────────────────────────────

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn reserve(&self, new: NewBooking, year: i32) -> DomainResult<StayOutcome> {
        let txn = self.db.begin().await.map_err(db_err)?;
        lock_property(&txn, new.property_id).await?;

        if let Some(clash) =
            first_overlap(&txn, new.property_id, new.check_in, new.check_out, None).await?
        {
            txn.rollback().await.map_err(db_err)?;
            return Ok(StayOutcome::Overlaps(model_to_domain(clash)));
        }

        let booking_id = next_identifier(&txn, new.property_id, year).await?;
        let now = Utc::now();
        let model = booking::ActiveModel {
            booking_id: Set(booking_id),
            property_id: Set(new.property_id),
            user_id: Set(new.user_id),
            check_in: Set(new.check_in),
            check_out: Set(new.check_out),
            no_of_guests: Set(new.no_of_guests),
            notes: Set(new.notes),
            status: Set(BookingStatus::Confirmed.as_str().to_string()),
            reminder_sent: Set(false),
            cancelled_at: Set(None),
            created_by: Set(new.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        debug!(id = model.id, booking_id = %model.booking_id, "Booking row inserted");
        Ok(StayOutcome::Saved(model_to_domain(model)))
    }

    async fn reschedule(&self, b: Booking) -> DomainResult<StayOutcome> {
        let id = b.id;
        let txn = self.db.begin().await.map_err(db_err)?;
        lock_property(&txn, b.property_id).await?;

        if let Some(clash) =
            first_overlap(&txn, b.property_id, b.check_in, b.check_out, Some(id)).await?
        {
            txn.rollback().await.map_err(db_err)?;
            return Ok(StayOutcome::Overlaps(model_to_domain(clash)));
        }

        let model = domain_to_active(b)
            .update(&txn)
            .await
            .map_err(not_updated(id))?;
        txn.commit().await.map_err(db_err)?;
        Ok(StayOutcome::Saved(model_to_domain(model)))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_booking_id(&self, booking_id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        filter: BookingFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Booking>> {
        let mut condition = Condition::all();
        if let Some(pid) = filter.property_id {
            condition = condition.add(booking::Column::PropertyId.eq(pid));
        }
        if let Some(uid) = filter.user_id {
            condition = condition.add(booking::Column::UserId.eq(uid));
        }
        if let Some(status) = filter.status {
            condition = condition.add(booking::Column::Status.eq(status.as_str()));
        }

        let query = booking::Entity::find().filter(condition);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(booking::Column::CheckIn)
            .order_by_desc(booking::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn update(&self, b: Booking) -> DomainResult<Booking> {
        let id = b.id;
        let model = domain_to_active(b)
            .update(&self.db)
            .await
            .map_err(not_updated(id))?;
        Ok(model_to_domain(model))
    }

    async fn find_due_reminders(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Confirmed.as_str()))
            .filter(booking::Column::ReminderSent.eq(false))
            .filter(booking::Column::CheckIn.gte(from))
            .filter(booking::Column::CheckIn.lte(until))
            .order_by_asc(booking::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn mark_reminder_sent(&self, id: i32) -> DomainResult<()> {
        booking::Entity::update_many()
            .col_expr(booking::Column::ReminderSent, Expr::value(true))
            .col_expr(booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(booking::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
