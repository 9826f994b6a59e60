use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::domain::{
    AdoptionApplication, HouseOwnership, HouseType, NewApplication, OuterSpace, PetExperience,
    PetId, ShelterId, UserId,
};
use super::draft::ApplicationDraft;
use super::identity::Viewer;
use super::inflight::SingleFlight;
use super::intake::{IntakeStep, IntakeWizard, StepRequirement};
use super::mapping::{self, EnumeratedField, UnmappedValue};
use super::repository::{AdoptionRepository, RepositoryError};

/// Where the applicant lands after a successful submission.
pub const APPLICANT_DASHBOARD_ROUTE: &str = "/dashboard/adopter";

/// Gateway turning a completed draft into a persisted, canonical application.
pub struct SubmissionGateway<R> {
    repository: Arc<R>,
    flight: SingleFlight<(UserId, PetId)>,
}

/// Successful submission: the stored record plus the post-submission redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub application: AdoptionApplication,
    pub redirect_to: &'static str,
}

impl<R> SubmissionGateway<R>
where
    R: AdoptionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            flight: SingleFlight::new(),
        }
    }

    /// Whether any submission is currently running.
    pub fn is_submitting(&self) -> bool {
        !self.flight.is_idle()
    }

    /// Whether `applicant_id` already has a submission for `pet_id` running.
    pub fn is_submitting_for(&self, applicant_id: &UserId, pet_id: &PetId) -> bool {
        self.flight.is_busy(&(applicant_id.clone(), pet_id.clone()))
    }

    /// Submit the wizard's draft for `pet_id` on behalf of the signed-in applicant.
    ///
    /// The wizard is only borrowed, so the draft stays available for a retry when the
    /// repository call fails.
    pub fn submit(
        &self,
        viewer: &Viewer,
        wizard: &IntakeWizard,
        pet_id: &PetId,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let applicant_id = match viewer {
            Viewer::Applicant { user_id } => user_id.clone(),
            Viewer::Shelter { .. } | Viewer::Admin { .. } | Viewer::Anonymous => {
                return Err(SubmissionError::NotAnApplicant {
                    role: viewer.role_label(),
                })
            }
        };

        if let Some((step, missing)) = wizard.first_incomplete() {
            return Err(SubmissionError::Incomplete { step, missing });
        }

        let draft = wizard.draft();
        let selections = CanonicalSelections::from_draft(draft)?;

        let _flight = self
            .flight
            .try_begin((applicant_id.clone(), pet_id.clone()))
            .ok_or_else(|| SubmissionError::InFlight(pet_id.clone()))?;

        let result = self.persist(applicant_id, draft, selections, pet_id);
        match &result {
            Ok(receipt) => info!(
                application_id = %receipt.application.id.0,
                pet_id = %pet_id.0,
                "adoption application submitted"
            ),
            Err(err) => warn!(pet_id = %pet_id.0, error = %err, "adoption application submission failed"),
        }
        result
    }

    fn persist(
        &self,
        applicant_id: UserId,
        draft: &ApplicationDraft,
        selections: CanonicalSelections,
        pet_id: &PetId,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let pet = self
            .repository
            .get_pet(pet_id)?
            .ok_or_else(|| SubmissionError::PetNotFound(pet_id.clone()))?;

        let payload = canonical_payload(draft, selections, applicant_id, pet.shelter_id, pet.id);
        let application = self.repository.create_application(payload)?;

        Ok(SubmissionReceipt {
            application,
            redirect_to: APPLICANT_DASHBOARD_ROUTE,
        })
    }
}

/// Draft values that must be translated into the canonical vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalSelections {
    pub birth_date: NaiveDate,
    pub previous_pet_experience: PetExperience,
    pub house_type: HouseType,
    pub house_ownership: HouseOwnership,
    pub outer_space: Option<OuterSpace>,
}

impl CanonicalSelections {
    pub fn from_draft(draft: &ApplicationDraft) -> Result<Self, SubmissionError> {
        let birth_date = NaiveDate::parse_from_str(draft.birth_date.trim(), "%Y-%m-%d")
            .map_err(|_| SubmissionError::InvalidBirthDate(draft.birth_date.clone()))?;

        let outer_space = if draft.outer_space.trim().is_empty() {
            None
        } else {
            Some(mapping::outer_space(&draft.outer_space).require(EnumeratedField::OuterSpace)?)
        };

        Ok(Self {
            birth_date,
            previous_pet_experience: mapping::pet_experience(&draft.pet_experience)
                .require(EnumeratedField::PetExperience)?,
            house_type: mapping::house_type(&draft.housing_type)
                .require(EnumeratedField::HousingType)?,
            house_ownership: mapping::house_ownership(&draft.housing_ownership)
                .require(EnumeratedField::HousingOwnership)?,
            outer_space,
        })
    }
}

/// Assemble the creation payload for the resolved pet/shelter pair.
pub fn canonical_payload(
    draft: &ApplicationDraft,
    selections: CanonicalSelections,
    applicant_id: UserId,
    shelter_id: ShelterId,
    pet_id: PetId,
) -> NewApplication {
    let text = |value: &str| value.trim().to_string();
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    NewApplication {
        applicant_id,
        shelter_id,
        pet_id,
        national_id: text(&draft.national_id),
        birth_date: selections.birth_date,
        adoption_reason: text(&draft.adoption_reason),
        expectations: text(&draft.expectations),
        previous_pet_experience: selections.previous_pet_experience,
        house_type: selections.house_type,
        house_ownership: selections.house_ownership,
        outer_space: selections.outer_space,
        living_space: optional(&draft.living_space).unwrap_or_default(),
        work_schedule: text(&draft.work_schedule),
        daily_routine: text(&draft.daily_routine),
        household_members: optional(&draft.household_members).unwrap_or_default(),
        children_ages: optional(&draft.children_ages),
        current_pets: optional(&draft.current_pets),
        exercise_commitment: optional(&draft.exercise_commitment),
        travel_frequency: optional(&draft.travel_frequency),
        pet_history: optional(&draft.pet_history),
        additional_info: optional(&draft.additional_info),
    }
}

/// Error raised by the submission gateway.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("only applicants can submit adoption applications (signed in as {role})")]
    NotAnApplicant { role: &'static str },
    #[error("step {} is incomplete: {}", .step.label(), describe(.missing))]
    Incomplete {
        step: IntakeStep,
        missing: Vec<StepRequirement>,
    },
    #[error("birth date '{0}' must use the YYYY-MM-DD format")]
    InvalidBirthDate(String),
    #[error(transparent)]
    UnmappedValue(#[from] UnmappedValue),
    #[error("pet {0} was not found")]
    PetNotFound(PetId),
    #[error("a submission for pet {0} is already in progress")]
    InFlight(PetId),
    #[error("could not submit the application: {0}")]
    Repository(#[from] RepositoryError),
}

impl SubmissionError {
    /// Validation failures are detected before any repository call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SubmissionError::Incomplete { .. }
                | SubmissionError::InvalidBirthDate(_)
                | SubmissionError::UnmappedValue(_)
        )
    }
}

fn describe(missing: &[StepRequirement]) -> String {
    missing
        .iter()
        .map(StepRequirement::describe)
        .collect::<Vec<_>>()
        .join("; ")
}
