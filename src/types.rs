use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref TIME_FORMAT: Regex = Regex::new("^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// A persisted interview booking. The id is assigned by the store on
/// creation; `slot_key` is present only for bookings created through the
/// scheduling path and is what the store's uniqueness guard keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: Option<Vec<String>>,
    pub date: DateTime<Utc>,
    pub time: String,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub finalized: bool,
    pub slot_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A booking as handed to the store for insertion. Identical to [`Booking`]
/// except that the identifier is still the store's to assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: Option<Vec<String>>,
    pub date: DateTime<Utc>,
    pub time: String,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub finalized: bool,
    pub slot_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One bookable slot of a day, annotated with live availability.
/// Derived on every enumeration, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub date: NaiveDate,
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "user_name is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub questions: Option<Vec<String>>,
    pub date: DateTime<Utc>,
    #[validate(regex(path = *TIME_FORMAT, message = "time must be in HH:MM form"))]
    pub time: String,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub finalized: Option<bool>,
}

/// Partial update for a booking. `user_id` and `created_at` are accepted by
/// the wire format but stripped before the store sees them; `updated_at` is
/// always overwritten by the writer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<String>>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub duration: Option<i32>,
    pub platform: Option<String>,
    pub finalized: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: i32,
    pub feedback: String,
}

/// Stored post-session feedback for one interview and user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub user_id: String,
    pub total_score: i32,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub interview_id: Uuid,
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
    #[validate(range(min = 0, max = 100, message = "total_score must be between 0 and 100"))]
    pub total_score: i32,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

/// A feedback record as handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub interview_id: Uuid,
    pub user_id: String,
    pub total_score: i32,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}
