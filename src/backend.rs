use crate::types::{Booking, BookingPatch, Feedback, NewBooking, NewFeedback};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("slot {0} is already booked")]
    SlotTaken(String),
    #[error("document {0} does not exist")]
    NotFound(Uuid),
}

/// Document operations the scheduling core issues against the booking
/// store. One implementation is the in-memory [`crate::local_bookings`]
/// store, the other is PostgreSQL via [`crate::database_interface`].
pub trait BookingStore: Clone + Send + Sync + 'static {
    /// Slot-keyed bookings whose date lies in `[from, to]` and whose time
    /// label equals `time`. Bookings without a slot key never take part in
    /// conflict detection.
    fn bookings_in_slot(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        time: &str,
    ) -> Result<Vec<Booking>, StoreError>;

    /// All bookings of one user, newest first.
    fn bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError>;

    /// Finalized bookings of everyone but `exclude_user`, newest first,
    /// at most `limit` entries.
    fn latest_finalized(&self, exclude_user: &str, limit: i64) -> Result<Vec<Booking>, StoreError>;

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Plain insert with a store-assigned identifier.
    fn insert_booking(&self, booking: NewBooking) -> Result<Uuid, StoreError>;

    /// Insert keyed on `slot_key`. The store rejects a duplicate key with
    /// [`StoreError::SlotTaken`] in the same write, so two concurrent
    /// inserts for one slot cannot both succeed.
    fn insert_scheduled(&self, slot_key: &str, booking: NewBooking) -> Result<Uuid, StoreError>;

    /// Merge the provided fields into an existing booking.
    /// [`StoreError::NotFound`] if `id` does not exist.
    fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<(), StoreError>;

    fn save_feedback(&self, feedback: NewFeedback) -> Result<Uuid, StoreError>;

    fn feedback_for_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError>;
}
