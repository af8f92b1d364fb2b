use crate::backend::{BookingStore, StoreError};
use crate::types::{Booking, BookingPatch, Feedback, NewBooking, NewFeedback};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

/// In-memory booking store, used when the server runs without a database.
/// The slot index shares the one mutex with the documents, so a slot-keyed
/// insert is check-and-write in a single critical section.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    bookings: HashMap<Uuid, Booking>,
    slots: HashMap<String, Uuid>,
    feedback: HashMap<Uuid, Feedback>,
}

fn booking_from(id: Uuid, new: NewBooking) -> Booking {
    Booking {
        id,
        user_id: new.user_id,
        user_name: new.user_name,
        title: new.title,
        description: new.description,
        questions: new.questions,
        date: new.date,
        time: new.time,
        duration: new.duration,
        platform: new.platform,
        finalized: new.finalized,
        slot_key: new.slot_key,
        created_at: new.created_at,
        updated_at: new.updated_at,
    }
}

impl BookingStore for LocalBookings {
    fn bookings_in_slot(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        time: &str,
    ) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookings
            .values()
            .filter(|booking| {
                booking.slot_key.is_some()
                    && booking.date >= from
                    && booking.date <= to
                    && booking.time == time
            })
            .cloned()
            .collect())
    }

    fn bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    fn latest_finalized(&self, exclude_user: &str, limit: i64) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|booking| booking.finalized && booking.user_id != exclude_user)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(bookings)
    }

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.bookings.get(&id).cloned())
    }

    fn insert_booking(&self, booking: NewBooking) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = Uuid::new_v4();
        inner.bookings.insert(id, booking_from(id, booking));
        Ok(id)
    }

    fn insert_scheduled(&self, slot_key: &str, booking: NewBooking) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.slots.contains_key(slot_key) {
            return Err(StoreError::SlotTaken(slot_key.to_string()));
        }
        let id = Uuid::new_v4();
        inner.slots.insert(slot_key.to_string(), id);
        inner.bookings.insert(id, booking_from(id, booking));
        Ok(id)
    }

    fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(user_id) = patch.user_id {
            booking.user_id = user_id;
        }
        if let Some(user_name) = patch.user_name {
            booking.user_name = user_name;
        }
        if let Some(title) = patch.title {
            booking.title = title;
        }
        if let Some(description) = patch.description {
            booking.description = Some(description);
        }
        if let Some(questions) = patch.questions {
            booking.questions = Some(questions);
        }
        if let Some(date) = patch.date {
            booking.date = date;
        }
        if let Some(time) = patch.time {
            booking.time = time;
        }
        if let Some(duration) = patch.duration {
            booking.duration = Some(duration);
        }
        if let Some(platform) = patch.platform {
            booking.platform = Some(platform);
        }
        if let Some(finalized) = patch.finalized {
            booking.finalized = finalized;
        }
        if let Some(created_at) = patch.created_at {
            booking.created_at = created_at;
        }
        if let Some(updated_at) = patch.updated_at {
            booking.updated_at = Some(updated_at);
        }
        Ok(())
    }

    fn save_feedback(&self, feedback: NewFeedback) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = Uuid::new_v4();
        inner.feedback.insert(
            id,
            Feedback {
                id,
                interview_id: feedback.interview_id,
                user_id: feedback.user_id,
                total_score: feedback.total_score,
                category_scores: feedback.category_scores,
                strengths: feedback.strengths,
                areas_for_improvement: feedback.areas_for_improvement,
                final_assessment: feedback.final_assessment,
                created_at: feedback.created_at,
            },
        );
        Ok(id)
    }

    fn feedback_for_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .feedback
            .values()
            .find(|feedback| feedback.interview_id == interview_id && feedback.user_id == user_id)
            .cloned())
    }
}
