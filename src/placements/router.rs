use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::directory::UserId;

use super::domain::{ApplicationId, InternshipId, ListingDraft};
use super::repository::{PlacementRepository, RepositoryError};
use super::service::{PlacementError, PlacementService};

/// Entity a staff decision applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTarget {
    Representative,
    Listing,
    Withdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDecision {
    pub target: DecisionTarget,
    pub id: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub internship_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDecisionRequest {
    pub accept: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub criteria: String,
}

/// Router builder exposing representative, student, and staff operations.
pub fn placement_router<R>(service: Arc<PlacementService<R>>) -> Router
where
    R: PlacementRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/representatives/:user_id/account",
            post(open_account_handler::<R>),
        )
        .route(
            "/api/v1/representatives/:user_id/listings",
            post(create_listing_handler::<R>),
        )
        .route(
            "/api/v1/representatives/:user_id/applications/:application_id/decision",
            post(decide_application_handler::<R>),
        )
        .route(
            "/api/v1/students/:user_id/applications",
            post(apply_handler::<R>),
        )
        .route(
            "/api/v1/students/:user_id/applications/:application_id/withdrawal",
            post(withdrawal_handler::<R>),
        )
        .route(
            "/api/v1/staff/:user_id/decisions",
            post(staff_decision_handler::<R>),
        )
        .route(
            "/api/v1/staff/:user_id/reports",
            post(report_handler::<R>),
        )
        .route("/api/v1/listings/:internship_id", get(listing_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<R>),
        )
        .with_state(service)
}

pub(crate) fn error_response(error: PlacementError) -> Response {
    let status = match &error {
        PlacementError::UnknownUser { .. } | PlacementError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        PlacementError::RoleMismatch { .. }
        | PlacementError::NotOwner { .. }
        | PlacementError::RepresentativePending(_) => StatusCode::FORBIDDEN,
        PlacementError::InvalidStatus { .. }
        | PlacementError::DuplicateApplication { .. }
        | PlacementError::ListingQuotaReached { .. }
        | PlacementError::ApplicationQuotaReached { .. }
        | PlacementError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlacementError::InvalidListing(_) | PlacementError::LevelNotPermitted { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PlacementError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlacementError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, PlacementError>) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_account_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.open_representative_account(&user_id),
    )
}

pub(crate) async fn create_listing_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(draft): axum::Json<ListingDraft>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_listing(&user_id, draft))
}

pub(crate) async fn decide_application_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path((user_id, application_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<ApplicationDecisionRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let id = ApplicationId(application_id);
    respond(
        StatusCode::OK,
        service.decide_application(&user_id, &id, request.accept),
    )
}

pub(crate) async fn apply_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<ApplyRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let internship = InternshipId(request.internship_id);
    respond(StatusCode::CREATED, service.apply(&user_id, &internship))
}

pub(crate) async fn withdrawal_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path((user_id, application_id)): Path<(String, String)>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let id = ApplicationId(application_id);
    respond(
        StatusCode::ACCEPTED,
        service.request_withdrawal(&user_id, &id),
    )
}

pub(crate) async fn staff_decision_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(decision): axum::Json<StaffDecision>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let StaffDecision { target, id, verdict } = decision;
    let approve = verdict == Verdict::Approve;

    match target {
        DecisionTarget::Representative => {
            let representative = match UserId::new(id) {
                Ok(representative) => representative,
                Err(error) => {
                    let payload = json!({ "error": error.to_string() });
                    return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload))
                        .into_response();
                }
            };
            let result = if approve {
                service.approve_representative(&user_id, &representative)
            } else {
                service.reject_representative(&user_id, &representative)
            };
            respond(StatusCode::OK, result)
        }
        DecisionTarget::Listing => {
            let listing = InternshipId(id);
            let result = if approve {
                service.approve_listing(&user_id, &listing)
            } else {
                service.reject_listing(&user_id, &listing)
            };
            respond(StatusCode::OK, result)
        }
        DecisionTarget::Withdrawal => {
            let application = ApplicationId(id);
            let result = if approve {
                service.approve_withdrawal(&user_id, &application)
            } else {
                service.reject_withdrawal(&user_id, &application)
            };
            respond(StatusCode::OK, result)
        }
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.generate_report(&user_id, &request.criteria),
    )
}

pub(crate) async fn listing_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.listing(&InternshipId(internship_id)),
    )
}

pub(crate) async fn application_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.application(&ApplicationId(application_id)),
    )
}
