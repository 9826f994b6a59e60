use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

use super::access::ApplicationView;
use super::domain::{AdoptionApplication, ApplicationId, ApplicationStatus, PetId};
use super::draft::ApplicationDraft;
use super::identity::Viewer;
use super::intake::{IntakeStep, IntakeWizard, StepRequirement};
use super::repository::AdoptionRepository;
use super::service::AdoptionService;

/// Router builder exposing intake checks, submission, gated reads, and transitions.
pub fn application_router<R>(service: Arc<AdoptionService<R>>) -> Router
where
    R: AdoptionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/adoption/intake/steps/:step",
            post(step_check_handler),
        )
        .route(
            "/api/v1/adoption/applications",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id",
            get(view_handler::<R>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id/status",
            post(status_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub pet_id: PetId,
    pub draft: ApplicationDraft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCheckResponse {
    pub step: IntakeStep,
    pub can_advance: bool,
    pub missing: Vec<StepRequirement>,
}

pub(crate) async fn step_check_handler(
    Path(step): Path<u8>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    let Some(step) = IntakeStep::from_number(step) else {
        let payload = json!({
            "error": format!("unknown intake step {step}"),
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };

    let wizard = IntakeWizard::with_draft(draft);
    let missing = wizard.missing(step);
    let body = StepCheckResponse {
        step,
        can_advance: missing.is_empty(),
        missing,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AdoptionService<R>>>,
    headers: HeaderMap,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<Response, AppError>
where
    R: AdoptionRepository + 'static,
{
    let viewer = Viewer::from_headers(&headers);
    let wizard = IntakeWizard::with_draft(request.draft);

    let receipt = service
        .submissions()
        .submit(&viewer, &wizard, &request.pet_id)?;

    let payload = json!({
        "application": receipt.application,
        "redirect_to": receipt.redirect_to,
    });
    Ok((StatusCode::CREATED, Json(payload)).into_response())
}

pub(crate) async fn view_handler<R>(
    State(service): State<Arc<AdoptionService<R>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Result<Response, AppError>
where
    R: AdoptionRepository + 'static,
{
    let viewer = Viewer::from_headers(&headers);
    let id = ApplicationId(application_id);

    let view = service.access().load(&viewer, &id)?;
    let status = match &view {
        ApplicationView::Applicant(_) | ApplicationView::Shelter(_) => StatusCode::OK,
        ApplicationView::Denied { .. } => StatusCode::FORBIDDEN,
        ApplicationView::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(view)).into_response())
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AdoptionService<R>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Json<AdoptionApplication>, AppError>
where
    R: AdoptionRepository + 'static,
{
    let viewer = Viewer::from_headers(&headers);
    let id = ApplicationId(application_id);

    let application = service.transitions().update_by_id(
        &viewer,
        &id,
        request.status,
        request.rejection_reason,
    )?;
    Ok(Json(application))
}
