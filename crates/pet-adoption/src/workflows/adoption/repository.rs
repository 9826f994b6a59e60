use serde::{Deserialize, Serialize};

use super::domain::{
    AdoptionApplication, ApplicationId, ApplicationStatus, NewApplication, PetId, PetRecord,
};

/// Status change sent to the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Storage abstraction so the workflow components can be exercised in isolation.
///
/// Implementations assign identifiers and timestamps: `create_application` stores the
/// record as `Pending`, and `update_application_status` refreshes `updated_at`.
pub trait AdoptionRepository: Send + Sync {
    fn create_application(
        &self,
        payload: NewApplication,
    ) -> Result<AdoptionApplication, RepositoryError>;
    fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<AdoptionApplication>, RepositoryError>;
    fn update_application_status(
        &self,
        id: &ApplicationId,
        update: StatusUpdate,
    ) -> Result<AdoptionApplication, RepositoryError>;
    fn get_pet(&self, id: &PetId) -> Result<Option<PetRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
