//! Adoption application intake, authorization, and status lifecycle.
//!
//! Applicants fill an [`IntakeWizard`] across four steps, the [`SubmissionGateway`]
//! persists the canonical record as `Pending`, the [`AccessGate`] decides what each
//! viewer may see, and the [`StatusTransitionHandler`] lets the owning shelter approve
//! or reject the application exactly once.

pub mod access;
pub mod domain;
pub mod draft;
pub mod identity;
mod inflight;
pub mod intake;
pub mod mapping;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;
pub mod transition;

#[cfg(test)]
mod tests;

pub use access::{AccessGate, ApplicantView, ApplicationView, ShelterView, ViewerRelation};
pub use domain::{
    AdoptionApplication, ApplicantSummary, ApplicationId, ApplicationStatus, HouseOwnership,
    HouseType, NewApplication, OuterSpace, PetExperience, PetId, PetRecord, PetSummary,
    ShelterId, ShelterSummary, UserId,
};
pub use draft::{ApplicationDraft, DraftField};
pub use identity::Viewer;
pub use intake::{IntakeStep, IntakeWizard, StepRequirement};
pub use mapping::{EnumeratedField, Mapping, UnmappedValue};
pub use repository::{AdoptionRepository, RepositoryError, StatusUpdate};
pub use router::application_router;
pub use service::{AdoptionService, WorkflowConfig};
pub use submission::{SubmissionError, SubmissionGateway, SubmissionReceipt};
pub use transition::{
    StatusAction, StatusTransitionHandler, TransitionError, DEFAULT_REJECTION_REASON,
};
