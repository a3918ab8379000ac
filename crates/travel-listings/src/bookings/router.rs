use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{BookingId, BookingInput, ListingId, ListingInput, ReviewId, ReviewInput};
use super::notifications::JobQueue;
use super::service::{ServiceError, TravelService, UpdateMode};
use super::store::{EntityStore, StoreError};

type SharedService<S, Q> = State<Arc<TravelService<S, Q>>>;

/// Router exposing list/create and retrieve/update/delete for every entity.
pub fn travel_router<S, Q>(service: Arc<TravelService<S, Q>>) -> Router
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    Router::new()
        .route(
            "/listings/",
            get(list_listings::<S, Q>).post(create_listing::<S, Q>),
        )
        .route(
            "/listings/:listing_id/",
            get(get_listing::<S, Q>)
                .put(replace_listing::<S, Q>)
                .patch(patch_listing::<S, Q>)
                .delete(delete_listing::<S, Q>),
        )
        .route(
            "/bookings/",
            get(list_bookings::<S, Q>).post(create_booking::<S, Q>),
        )
        .route(
            "/bookings/:booking_id/",
            get(get_booking::<S, Q>)
                .put(replace_booking::<S, Q>)
                .patch(patch_booking::<S, Q>)
                .delete(delete_booking::<S, Q>),
        )
        .route(
            "/reviews/",
            get(list_reviews::<S, Q>).post(create_review::<S, Q>),
        )
        .route(
            "/reviews/:review_id/",
            get(get_review::<S, Q>)
                .put(replace_review::<S, Q>)
                .patch(patch_review::<S, Q>)
                .delete(delete_review::<S, Q>),
        )
        .with_state(service)
}

/// HTTP projection of service failures and unreadable request bodies.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    Body(JsonRejection),
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => {
                let payload = json!({
                    "errors": { "non_field_errors": [rejection.body_text()] },
                });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            ApiError::Service(ServiceError::Validation(errors)) => {
                let payload = json!({ "errors": errors.by_field() });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            ApiError::Service(ServiceError::Store(StoreError::NotFound)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
            }
            ApiError::Service(ServiceError::Store(StoreError::Conflict)) => {
                let payload = json!({ "detail": "record already exists" });
                (StatusCode::CONFLICT, Json(payload)).into_response()
            }
            ApiError::Service(other) => {
                error!(error = %other, "request failed");
                let payload = json!({ "detail": other.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
            }
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

async fn list_listings<S, Q>(State(service): SharedService<S, Q>) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    Ok(Json(service.list_listings()?).into_response())
}

async fn create_listing<S, Q>(
    State(service): SharedService<S, Q>,
    body: Result<Json<ListingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.create_listing(&input)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn get_listing<S, Q>(
    State(service): SharedService<S, Q>,
    Path(listing_id): Path<String>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let view = service.get_listing(&ListingId(listing_id))?;
    Ok(Json(view).into_response())
}

async fn replace_listing<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<ListingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_listing(state, path, body, UpdateMode::Replace)
}

async fn patch_listing<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<ListingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_listing(state, path, body, UpdateMode::Partial)
}

fn update_listing<S, Q>(
    State(service): SharedService<S, Q>,
    Path(listing_id): Path<String>,
    body: Result<Json<ListingInput>, JsonRejection>,
    mode: UpdateMode,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.update_listing(&ListingId(listing_id), &input, mode)?;
    Ok(Json(view).into_response())
}

async fn delete_listing<S, Q>(
    State(service): SharedService<S, Q>,
    Path(listing_id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    service.delete_listing(&ListingId(listing_id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_bookings<S, Q>(State(service): SharedService<S, Q>) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    Ok(Json(service.list_bookings()?).into_response())
}

async fn create_booking<S, Q>(
    State(service): SharedService<S, Q>,
    body: Result<Json<BookingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.create_booking(&input)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn get_booking<S, Q>(
    State(service): SharedService<S, Q>,
    Path(booking_id): Path<String>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let view = service.get_booking(&BookingId(booking_id))?;
    Ok(Json(view).into_response())
}

async fn replace_booking<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<BookingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_booking(state, path, body, UpdateMode::Replace)
}

async fn patch_booking<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<BookingInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_booking(state, path, body, UpdateMode::Partial)
}

fn update_booking<S, Q>(
    State(service): SharedService<S, Q>,
    Path(booking_id): Path<String>,
    body: Result<Json<BookingInput>, JsonRejection>,
    mode: UpdateMode,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.update_booking(&BookingId(booking_id), &input, mode)?;
    Ok(Json(view).into_response())
}

async fn delete_booking<S, Q>(
    State(service): SharedService<S, Q>,
    Path(booking_id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    service.delete_booking(&BookingId(booking_id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_reviews<S, Q>(State(service): SharedService<S, Q>) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    Ok(Json(service.list_reviews()?).into_response())
}

async fn create_review<S, Q>(
    State(service): SharedService<S, Q>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.create_review(&input)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn get_review<S, Q>(
    State(service): SharedService<S, Q>,
    Path(review_id): Path<String>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let view = service.get_review(&ReviewId(review_id))?;
    Ok(Json(view).into_response())
}

async fn replace_review<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_review(state, path, body, UpdateMode::Replace)
}

async fn patch_review<S, Q>(
    state: SharedService<S, Q>,
    path: Path<String>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    update_review(state, path, body, UpdateMode::Partial)
}

fn update_review<S, Q>(
    State(service): SharedService<S, Q>,
    Path(review_id): Path<String>,
    body: Result<Json<ReviewInput>, JsonRejection>,
    mode: UpdateMode,
) -> ApiResult<Response>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    let Json(input) = body?;
    let view = service.update_review(&ReviewId(review_id), &input, mode)?;
    Ok(Json(view).into_response())
}

async fn delete_review<S, Q>(
    State(service): SharedService<S, Q>,
    Path(review_id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    service.delete_review(&ReviewId(review_id))?;
    Ok(StatusCode::NO_CONTENT)
}
