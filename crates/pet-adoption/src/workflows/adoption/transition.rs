use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::access::ViewerRelation;
use super::domain::{AdoptionApplication, ApplicationId, ApplicationStatus};
use super::identity::Viewer;
use super::inflight::SingleFlight;
use super::repository::{AdoptionRepository, RepositoryError, StatusUpdate};

/// Rejection text recorded when the shelter does not supply its own.
pub const DEFAULT_REJECTION_REASON: &str = "Solicitud rechazada por el refugio";

/// Transition control a shelter may be offered on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusAction {
    Approve,
    Reject,
}

impl StatusAction {
    pub const ALL: [StatusAction; 2] = [StatusAction::Approve, StatusAction::Reject];

    pub const fn target_status(self) -> ApplicationStatus {
        match self {
            StatusAction::Approve => ApplicationStatus::Approved,
            StatusAction::Reject => ApplicationStatus::Rejected,
        }
    }

    pub fn for_status(status: ApplicationStatus) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.target_status() == status)
    }
}

/// Performs Approve/Reject on behalf of the owning shelter.
pub struct StatusTransitionHandler<R> {
    repository: Arc<R>,
    flight: SingleFlight<ApplicationId>,
    default_rejection_reason: String,
}

impl<R> StatusTransitionHandler<R>
where
    R: AdoptionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_rejection_reason(repository, DEFAULT_REJECTION_REASON)
    }

    pub fn with_rejection_reason(repository: Arc<R>, reason: impl Into<String>) -> Self {
        Self {
            repository,
            flight: SingleFlight::new(),
            default_rejection_reason: reason.into(),
        }
    }

    /// Whether any status update is currently running.
    pub fn is_updating(&self) -> bool {
        !self.flight.is_idle()
    }

    /// Persist a new status and, once the repository confirms it, copy the result into
    /// `application`. On any error the local record is left untouched.
    pub fn update_status(
        &self,
        viewer: &Viewer,
        application: &mut AdoptionApplication,
        new_status: ApplicationStatus,
        rejection_reason: Option<String>,
    ) -> Result<(), TransitionError> {
        let action = StatusAction::for_status(new_status)
            .ok_or(TransitionError::UnsupportedStatus(new_status))?;

        if !ViewerRelation::between(viewer, application).is_owning_shelter {
            return Err(TransitionError::Forbidden {
                application_id: application.id.clone(),
            });
        }

        if application.status.is_terminal() {
            return Err(TransitionError::NotPending {
                application_id: application.id.clone(),
                status: application.status,
            });
        }

        let rejection_reason = match action {
            StatusAction::Approve => None,
            StatusAction::Reject => Some(
                rejection_reason
                    .map(|reason| reason.trim().to_string())
                    .filter(|reason| !reason.is_empty())
                    .unwrap_or_else(|| self.default_rejection_reason.clone()),
            ),
        };

        let _flight = self
            .flight
            .try_begin(application.id.clone())
            .ok_or_else(|| TransitionError::InFlight(application.id.clone()))?;

        let update = StatusUpdate {
            status: new_status,
            rejection_reason,
        };
        let stored = self
            .repository
            .update_application_status(&application.id, update)
            .map_err(|source| {
                error!(
                    application_id = %application.id,
                    status = new_status.label(),
                    error = %source,
                    "failed to update application status"
                );
                TransitionError::Repository(source)
            })?;

        application.status = stored.status;
        application.rejection_reason = stored.rejection_reason;
        application.updated_at = stored.updated_at;

        info!(
            application_id = %application.id,
            status = application.status.label(),
            "application status updated"
        );
        Ok(())
    }

    /// Load the record, apply the transition, and return the refreshed record.
    pub fn update_by_id(
        &self,
        viewer: &Viewer,
        application_id: &ApplicationId,
        new_status: ApplicationStatus,
        rejection_reason: Option<String>,
    ) -> Result<AdoptionApplication, TransitionError> {
        let mut application = self
            .repository
            .get_application(application_id)?
            .ok_or_else(|| TransitionError::NotFound(application_id.clone()))?;

        self.update_status(viewer, &mut application, new_status, rejection_reason)?;
        Ok(application)
    }
}

/// Error raised by the status transition handler.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("status {} cannot be set by the shelter", .0.label())]
    UnsupportedStatus(ApplicationStatus),
    #[error("only the owning shelter can change application {application_id}")]
    Forbidden { application_id: ApplicationId },
    #[error("application {application_id} is already {}", .status.label())]
    NotPending {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },
    #[error("application {0} was not found")]
    NotFound(ApplicationId),
    #[error("a status update for application {0} is already in progress")]
    InFlight(ApplicationId),
    #[error("could not update the application status: {0}")]
    Repository(#[from] RepositoryError),
}
