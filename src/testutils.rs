use crate::backend::{BookingStore, StoreError};
use crate::configuration::Configuration;
use crate::local_bookings::LocalBookings;
use crate::types::{Booking, BookingPatch, Feedback, NewBooking, NewFeedback};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};
use uuid::Uuid;

pub struct MockBookingStoreInner {
    pub success: AtomicBool,
    pub calls_to_bookings_in_slot: AtomicU64,
    pub calls_to_bookings_by_user: AtomicU64,
    pub calls_to_latest_finalized: AtomicU64,
    pub calls_to_booking: AtomicU64,
    pub calls_to_insert_booking: AtomicU64,
    pub calls_to_insert_scheduled: AtomicU64,
    pub calls_to_update_booking: AtomicU64,
    pub calls_to_save_feedback: AtomicU64,
    pub calls_to_feedback_for_interview: AtomicU64,
    pub bookings: LocalBookings,
}

/// Counting wrapper around the in-memory store. With `success` cleared
/// every operation fails as if the store were unreachable.
#[derive(Clone)]
pub struct MockBookingStore(pub Arc<MockBookingStoreInner>);

impl MockBookingStore {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingStoreInner {
            success: AtomicBool::new(true),
            calls_to_bookings_in_slot: AtomicU64::default(),
            calls_to_bookings_by_user: AtomicU64::default(),
            calls_to_latest_finalized: AtomicU64::default(),
            calls_to_booking: AtomicU64::default(),
            calls_to_insert_booking: AtomicU64::default(),
            calls_to_insert_scheduled: AtomicU64::default(),
            calls_to_update_booking: AtomicU64::default(),
            calls_to_save_feedback: AtomicU64::default(),
            calls_to_feedback_for_interview: AtomicU64::default(),
            bookings: LocalBookings::default(),
        }))
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StoreError::Unavailable("supposed to fail".into())),
        }
    }
}

impl BookingStore for MockBookingStore {
    fn bookings_in_slot(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        time: &str,
    ) -> Result<Vec<Booking>, StoreError> {
        self.0
            .calls_to_bookings_in_slot
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.bookings_in_slot(from, to, time)
    }

    fn bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        self.0
            .calls_to_bookings_by_user
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.bookings_by_user(user_id)
    }

    fn latest_finalized(&self, exclude_user: &str, limit: i64) -> Result<Vec<Booking>, StoreError> {
        self.0
            .calls_to_latest_finalized
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.latest_finalized(exclude_user, limit)
    }

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        self.0.calls_to_booking.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.booking(id)
    }

    fn insert_booking(&self, booking: NewBooking) -> Result<Uuid, StoreError> {
        self.0
            .calls_to_insert_booking
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.insert_booking(booking)
    }

    fn insert_scheduled(&self, slot_key: &str, booking: NewBooking) -> Result<Uuid, StoreError> {
        self.0
            .calls_to_insert_scheduled
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.insert_scheduled(slot_key, booking)
    }

    fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<(), StoreError> {
        self.0
            .calls_to_update_booking
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.update_booking(id, patch)
    }

    fn save_feedback(&self, feedback: NewFeedback) -> Result<Uuid, StoreError> {
        self.0.calls_to_save_feedback.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.save_feedback(feedback)
    }

    fn feedback_for_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError> {
        self.0
            .calls_to_feedback_for_interview
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.0.bookings.feedback_for_interview(interview_id, user_id)
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub frontend_path: PathBuf,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            frontend_path: PathBuf::from("../frontend/index.html"),
        }
    }
}

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        "123".into()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn utc_offset_minutes(&self) -> i32 {
        0
    }
}
