use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{AdoptionApplication, ApplicationId, ApplicationStatus};
use super::identity::Viewer;
use super::repository::{AdoptionRepository, RepositoryError};
use super::transition::StatusAction;

/// How the viewer relates to a stored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerRelation {
    pub is_applicant: bool,
    pub is_owning_shelter: bool,
}

impl ViewerRelation {
    pub fn between(viewer: &Viewer, application: &AdoptionApplication) -> Self {
        match viewer {
            Viewer::Applicant { user_id } => Self {
                is_applicant: user_id == application.applicant_id(),
                is_owning_shelter: false,
            },
            Viewer::Shelter {
                user_id,
                shelter_id,
            } => Self {
                is_applicant: user_id == application.applicant_id(),
                is_owning_shelter: shelter_id == application.shelter_id(),
            },
            Viewer::Admin { .. } | Viewer::Anonymous => Self {
                is_applicant: false,
                is_owning_shelter: false,
            },
        }
    }
}

/// Presentation mode chosen for a viewer. Denied and not-found views carry no
/// application fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ApplicationView {
    Applicant(ApplicantView),
    Shelter(ShelterView),
    Denied { application_id: ApplicationId },
    NotFound { application_id: ApplicationId },
}

impl ApplicationView {
    pub fn application(&self) -> Option<&AdoptionApplication> {
        match self {
            ApplicationView::Applicant(view) => Some(&view.application),
            ApplicationView::Shelter(view) => Some(&view.application),
            ApplicationView::Denied { .. } | ApplicationView::NotFound { .. } => None,
        }
    }

    /// Transition controls to render; empty for every view except a pending shelter view.
    pub fn actions(&self) -> &[StatusAction] {
        match self {
            ApplicationView::Shelter(view) => &view.actions,
            ApplicationView::Applicant(_)
            | ApplicationView::Denied { .. }
            | ApplicationView::NotFound { .. } => &[],
        }
    }
}

/// Read-only view for the applicant with a status-dependent message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantView {
    pub application: AdoptionApplication,
    pub message: String,
}

/// Read-only view for the owning shelter plus the transitions it may perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterView {
    pub application: AdoptionApplication,
    pub actions: Vec<StatusAction>,
}

pub fn applicant_message(application: &AdoptionApplication) -> String {
    match application.status {
        ApplicationStatus::Pending => "Your application is under review by the shelter.".to_string(),
        ApplicationStatus::Approved => {
            "Congratulations! Your application has been approved.".to_string()
        }
        ApplicationStatus::Rejected => match application.rejection_reason.as_deref() {
            Some(reason) => format!("Your application was not approved. Reason: {reason}"),
            None => "Your application was not approved.".to_string(),
        },
        ApplicationStatus::Withdrawn => "You withdrew this application.".to_string(),
    }
}

/// Choose the presentation mode for `viewer`. The applicant relation wins when both
/// flags are set so nobody can act on their own application.
pub fn present(viewer: &Viewer, application: AdoptionApplication) -> ApplicationView {
    let relation = ViewerRelation::between(viewer, &application);

    if relation.is_applicant {
        let message = applicant_message(&application);
        return ApplicationView::Applicant(ApplicantView {
            application,
            message,
        });
    }

    if relation.is_owning_shelter {
        let actions = match application.status {
            ApplicationStatus::Pending => StatusAction::ALL.to_vec(),
            ApplicationStatus::Approved
            | ApplicationStatus::Rejected
            | ApplicationStatus::Withdrawn => Vec::new(),
        };
        return ApplicationView::Shelter(ShelterView {
            application,
            actions,
        });
    }

    ApplicationView::Denied {
        application_id: application.id,
    }
}

/// Loads applications and gates them by the viewer's relationship to the record.
pub struct AccessGate<R> {
    repository: Arc<R>,
}

impl<R> AccessGate<R>
where
    R: AdoptionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn load(
        &self,
        viewer: &Viewer,
        application_id: &ApplicationId,
    ) -> Result<ApplicationView, RepositoryError> {
        let Some(application) = self.repository.get_application(application_id)? else {
            return Ok(ApplicationView::NotFound {
                application_id: application_id.clone(),
            });
        };

        let view = present(viewer, application);
        if matches!(view, ApplicationView::Denied { .. }) {
            debug!(
                application_id = %application_id,
                role = viewer.role_label(),
                "application access denied"
            );
        }
        Ok(view)
    }
}
