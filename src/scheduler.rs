use crate::backend::{BookingStore, StoreError};
use crate::types::{
    Booking, BookingPatch, Feedback, FeedbackRequest, InterviewSlot, NewBooking, NewFeedback,
    ScheduleRequest,
};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Bookable time-of-day labels, 24-hour format. Fixed catalog, identical
/// across processes; any label outside it is rejected.
pub const AVAILABLE_TIMES: [&str; 5] = ["09:00", "11:00", "13:00", "15:00", "17:00"];

pub const DEFAULT_DURATION_MINUTES: i32 = 30;
pub const DEFAULT_PLATFORM: &str = "Ireme AI";

const DEFAULT_LATEST_LIMIT: i64 = 20;
const MAX_LATEST_LIMIT: i64 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("invalid time slot: {time}")]
    InvalidSlot { time: String },
    #[error("time slot {slot} is no longer available")]
    SlotConflict { slot: String },
    #[error("booking store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("interview {0} not found")]
    NotFound(Uuid),
}

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(message) => ScheduleError::StoreUnavailable(message),
            StoreError::SlotTaken(slot) => ScheduleError::SlotConflict { slot },
            StoreError::NotFound(id) => ScheduleError::NotFound(id),
        }
    }
}

/// The authoritative scheduling core. Every surface (HTTP today) calls
/// through this one implementation; nothing else talks to the booking
/// store about slots.
///
/// Day bucketing follows a single fixed UTC offset so the write and read
/// paths can never disagree about which calendar day a timestamp lands in.
#[derive(Clone)]
pub struct Scheduler<B: BookingStore> {
    backend: B,
    utc_offset: FixedOffset,
}

impl<B: BookingStore> Scheduler<B> {
    pub fn new(backend: B, utc_offset: FixedOffset) -> Self {
        Self {
            backend,
            utc_offset,
        }
    }

    pub fn slot_labels(&self) -> &'static [&'static str] {
        &AVAILABLE_TIMES
    }

    /// Whether `time` on the calendar day `date` is still free.
    ///
    /// A store failure surfaces as [`ScheduleError::StoreUnavailable`] and
    /// is never reported as "available".
    pub fn is_available(&self, date: NaiveDate, time: &str) -> Result<bool, ScheduleError> {
        if !AVAILABLE_TIMES.contains(&time) {
            return Err(ScheduleError::InvalidSlot {
                time: time.to_string(),
            });
        }
        let (from, to) = self.day_bounds(date);
        let existing = self.backend.bookings_in_slot(from, to, time)?;
        Ok(existing.is_empty())
    }

    /// The full day's slots in catalog order, re-evaluated live on every
    /// call. A failed per-slot check degrades that slot to unavailable
    /// instead of failing the whole enumeration.
    pub fn slots_for_date(&self, date: NaiveDate) -> Vec<InterviewSlot> {
        AVAILABLE_TIMES
            .iter()
            .map(|time| {
                let available = match self.is_available(date, time) {
                    Ok(free) => free,
                    Err(err) => {
                        warn!(%date, time, error = %err, "availability check failed, reporting slot as taken");
                        false
                    }
                };
                InterviewSlot {
                    date,
                    time: (*time).to_string(),
                    available,
                }
            })
            .collect()
    }

    /// Book a slot. Validates the request, re-checks availability right
    /// before the commit and then inserts keyed on the slot, so a
    /// concurrent writer racing past the re-check is still rejected by the
    /// store itself.
    pub fn schedule(&self, request: ScheduleRequest) -> Result<Uuid, ScheduleError> {
        required(&request.user_id, "user_id is required")?;
        required(&request.user_name, "user_name is required")?;
        required(&request.title, "title is required")?;
        required(&request.time, "time is required")?;
        if !AVAILABLE_TIMES.contains(&request.time.as_str()) {
            return Err(ScheduleError::InvalidSlot { time: request.time });
        }

        let day = self.day_of(request.date);
        if !self.is_available(day, &request.time)? {
            return Err(ScheduleError::SlotConflict {
                slot: slot_key(day, &request.time),
            });
        }

        let key = slot_key(day, &request.time);
        let now = Utc::now();
        let booking = NewBooking {
            user_id: request.user_id,
            user_name: request.user_name,
            title: request.title,
            description: request.description,
            questions: request.questions,
            date: request.date,
            time: request.time,
            duration: Some(request.duration.unwrap_or(DEFAULT_DURATION_MINUTES)),
            platform: Some(
                request
                    .platform
                    .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            ),
            finalized: request.finalized.unwrap_or(true),
            slot_key: Some(key.clone()),
            created_at: now,
            updated_at: Some(now),
        };
        let id = self.backend.insert_scheduled(&key, booking)?;
        Ok(id)
    }

    /// The AI-generation creation path. Date and time are session metadata
    /// here, not a bookable resource, so no availability check runs and
    /// the record starts out pending (`finalized = false`) until the voice
    /// session completes.
    pub fn create(&self, request: ScheduleRequest) -> Result<Uuid, ScheduleError> {
        required(&request.user_id, "user_id is required")?;
        required(&request.user_name, "user_name is required")?;
        required(&request.title, "title is required")?;

        let now = Utc::now();
        let booking = NewBooking {
            user_id: request.user_id,
            user_name: request.user_name,
            title: request.title,
            description: request.description,
            questions: request.questions,
            date: request.date,
            time: request.time,
            duration: Some(request.duration.unwrap_or(DEFAULT_DURATION_MINUTES)),
            platform: Some(
                request
                    .platform
                    .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            ),
            finalized: request.finalized.unwrap_or(false),
            slot_key: None,
            created_at: now,
            updated_at: Some(now),
        };
        let id = self.backend.insert_booking(booking)?;
        Ok(id)
    }

    /// Merge `patch` into an existing booking. `user_id` and `created_at`
    /// are stripped unconditionally; `updated_at` is always refreshed.
    pub fn update(&self, id: Uuid, patch: BookingPatch) -> Result<(), ScheduleError> {
        let patch = BookingPatch {
            user_id: None,
            created_at: None,
            updated_at: Some(Utc::now()),
            ..patch
        };
        self.backend.update_booking(id, patch)?;
        Ok(())
    }

    pub fn interview(&self, id: Uuid) -> Result<Option<Booking>, ScheduleError> {
        Ok(self.backend.booking(id)?)
    }

    pub fn interviews_for_user(&self, user_id: &str) -> Result<Vec<Booking>, ScheduleError> {
        required(user_id, "user_id is required")?;
        Ok(self.backend.bookings_by_user(user_id)?)
    }

    /// Finalized interviews of other users, newest first.
    pub fn latest_interviews(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Booking>, ScheduleError> {
        required(user_id, "user_id is required")?;
        let limit = limit.unwrap_or(DEFAULT_LATEST_LIMIT);
        if !(1..=MAX_LATEST_LIMIT).contains(&limit) {
            return Err(ScheduleError::Validation(
                "limit must be between 1 and 100",
            ));
        }
        Ok(self.backend.latest_finalized(user_id, limit)?)
    }

    pub fn save_feedback(&self, request: FeedbackRequest) -> Result<Uuid, ScheduleError> {
        required(&request.user_id, "user_id is required")?;
        if self.backend.booking(request.interview_id)?.is_none() {
            return Err(ScheduleError::NotFound(request.interview_id));
        }
        let feedback = NewFeedback {
            interview_id: request.interview_id,
            user_id: request.user_id,
            total_score: request.total_score,
            category_scores: request.category_scores,
            strengths: request.strengths,
            areas_for_improvement: request.areas_for_improvement,
            final_assessment: request.final_assessment,
            created_at: Utc::now(),
        };
        Ok(self.backend.save_feedback(feedback)?)
    }

    pub fn feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, ScheduleError> {
        required(user_id, "user_id is required")?;
        Ok(self.backend.feedback_for_interview(interview_id, user_id)?)
    }

    fn day_of(&self, date: DateTime<Utc>) -> NaiveDate {
        date.with_timezone(&self.utc_offset).date_naive()
    }

    /// Inclusive UTC bounds of one calendar day in the configured offset,
    /// 00:00:00.000 through 23:59:59.999.
    fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start_local = date.and_time(NaiveTime::MIN);
        let start = DateTime::<Utc>::from_naive_utc_and_offset(
            start_local - Duration::seconds(i64::from(self.utc_offset.local_minus_utc())),
            Utc,
        );
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        (start, end)
    }
}

fn slot_key(day: NaiveDate, time: &str) -> String {
    format!("{day}T{time}")
}

fn required(value: &str, message: &'static str) -> Result<(), ScheduleError> {
    if value.trim().is_empty() {
        return Err(ScheduleError::Validation(message));
    }
    Ok(())
}
