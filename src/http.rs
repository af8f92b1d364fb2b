use crate::backend::BookingStore;
use crate::configuration::Configuration;
use crate::questions::QuestionGenerator;
use crate::scheduler::ScheduleError;
use crate::types::{BookingPatch, FeedbackRequest, ScheduleRequest};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::{http::StatusCode, Json};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
struct UserQuery {
    user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LatestQuery {
    user_id: String,
    limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct FeedbackQuery {
    interview_id: Uuid,
    user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct GenerateRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
    #[validate(length(min = 1, message = "user_name is required"))]
    user_name: String,
    #[validate(length(min = 1, message = "interview_type is required"))]
    interview_type: String,
    #[validate(length(min = 1, message = "audience is required"))]
    audience: String,
    date: DateTime<Utc>,
    time: String,
    duration: Option<i32>,
    platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InterviewCreated {
    interview_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FeedbackCreated {
    feedback_id: Uuid,
}

pub fn create_app<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    state: AppState<B, G, C>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/frontend", get(get_frontend))
        .route("/slots", get(get_slots))
        .route("/schedule", post(schedule_interview))
        .route("/interviews", get(get_user_interviews))
        .route("/interviews/:id", get(get_interview))
        .route("/latest", get(get_latest_interviews))
        .route("/feedback", get(get_feedback));

    let admin = Router::new()
        .route("/generate", post(generate_interview))
        .route("/interviews/:id/update", post(update_interview))
        .route("/feedback/save", post(save_feedback))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B, G, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let password = state.configuration.password();
    if let Some(auth_header) = request.headers().get("x-admin-password") {
        if auth_header.to_str().unwrap_or("") != password {
            return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
        }
    } else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    }
    Ok(next.run(request).await)
}

/// Keeps the error taxonomy visible at the surface: bad input, lost race,
/// missing document and store outage each map to their own status code.
fn error_response(err: ScheduleError) -> Response {
    let status = match &err {
        ScheduleError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScheduleError::InvalidSlot { .. } => StatusCode::BAD_REQUEST,
        ScheduleError::SlotConflict { .. } => StatusCode::CONFLICT,
        ScheduleError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, err.to_string()).into_response()
}

async fn get_slots<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Query(query): Query<SlotsQuery>,
) -> impl IntoResponse {
    Json(state.scheduler.slots_for_date(query.date))
}

async fn schedule_interview<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Json(request): Json<ScheduleRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()).into_response();
    }
    match state.scheduler.schedule(request) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(InterviewCreated { interview_id: id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn generate_interview<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()).into_response();
    }

    let questions = match state
        .question_generator
        .generate(&request.interview_type, &request.audience)
    {
        Ok(questions) => questions,
        Err(err) => {
            return (
                StatusCode::BAD_GATEWAY,
                format!("question generation failed: {err}"),
            )
                .into_response()
        }
    };

    let create_request = ScheduleRequest {
        user_id: request.user_id,
        user_name: request.user_name,
        title: format!("{} Interview", request.interview_type),
        description: None,
        questions: Some(questions),
        date: request.date,
        time: request.time,
        duration: request.duration,
        platform: request.platform,
        finalized: None,
    };
    match state.scheduler.create(create_request) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(InterviewCreated { interview_id: id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn update_interview<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BookingPatch>,
) -> Response {
    match state.scheduler.update(id, patch) {
        Ok(()) => (StatusCode::OK, "Interview updated successfully".to_string()).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_interview<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.scheduler.interview(id) {
        Ok(Some(booking)) => Json(booking).into_response(),
        Ok(None) => error_response(ScheduleError::NotFound(id)),
        Err(err) => error_response(err),
    }
}

async fn get_user_interviews<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Query(query): Query<UserQuery>,
) -> Response {
    match state.scheduler.interviews_for_user(&query.user_id) {
        Ok(bookings) => Json(bookings).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_latest_interviews<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Query(query): Query<LatestQuery>,
) -> Response {
    match state.scheduler.latest_interviews(&query.user_id, query.limit) {
        Ok(bookings) => Json(bookings).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_feedback<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Query(query): Query<FeedbackQuery>,
) -> Response {
    match state.scheduler.feedback(query.interview_id, &query.user_id) {
        Ok(Some(feedback)) => Json(feedback).into_response(),
        Ok(None) => error_response(ScheduleError::NotFound(query.interview_id)),
        Err(err) => error_response(err),
    }
}

async fn save_feedback<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
    Json(request): Json<FeedbackRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()).into_response();
    }
    match state.scheduler.save_feedback(request) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(FeedbackCreated { feedback_id: id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_frontend<B: BookingStore, G: QuestionGenerator, C: Configuration>(
    State(state): State<AppState<B, G, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.configuration.frontend_path();
    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(err) => {
            let error_message = format!("Failed to read frontend file: {err}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_message))
        }
    }
}
