use serde::{Deserialize, Serialize};

pub const ADOPTION_REASON_MIN_CHARS: usize = 50;
pub const EXPECTATIONS_MIN_CHARS: usize = 30;

/// In-progress application held only by the applicant's session until submission.
///
/// Enumerated fields carry the lower-case labels shown by the intake form; they are
/// translated to canonical values by the submission gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationDraft {
    pub national_id: String,
    pub birth_date: String,
    pub adoption_reason: String,
    pub expectations: String,
    pub daily_routine: String,
    pub work_schedule: String,
    pub pet_experience: String,
    pub housing_type: String,
    pub housing_ownership: String,
    pub outer_space: String,
    pub children_ages: Option<String>,
    pub current_pets: Option<String>,
    pub exercise_commitment: Option<String>,
    pub travel_frequency: Option<String>,
    pub pet_history: Option<String>,
    pub additional_info: Option<String>,
    pub household_members: Option<String>,
    pub living_space: Option<String>,
}

/// Addressable draft fields for `IntakeWizard::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    NationalId,
    BirthDate,
    AdoptionReason,
    Expectations,
    DailyRoutine,
    WorkSchedule,
    PetExperience,
    HousingType,
    HousingOwnership,
    OuterSpace,
    ChildrenAges,
    CurrentPets,
    ExerciseCommitment,
    TravelFrequency,
    PetHistory,
    AdditionalInfo,
    HouseholdMembers,
    LivingSpace,
}

impl DraftField {
    pub const fn label(self) -> &'static str {
        match self {
            DraftField::NationalId => "national_id",
            DraftField::BirthDate => "birth_date",
            DraftField::AdoptionReason => "adoption_reason",
            DraftField::Expectations => "expectations",
            DraftField::DailyRoutine => "daily_routine",
            DraftField::WorkSchedule => "work_schedule",
            DraftField::PetExperience => "pet_experience",
            DraftField::HousingType => "housing_type",
            DraftField::HousingOwnership => "housing_ownership",
            DraftField::OuterSpace => "outer_space",
            DraftField::ChildrenAges => "children_ages",
            DraftField::CurrentPets => "current_pets",
            DraftField::ExerciseCommitment => "exercise_commitment",
            DraftField::TravelFrequency => "travel_frequency",
            DraftField::PetHistory => "pet_history",
            DraftField::AdditionalInfo => "additional_info",
            DraftField::HouseholdMembers => "household_members",
            DraftField::LivingSpace => "living_space",
        }
    }
}

impl ApplicationDraft {
    /// Merge a single value into the draft. Blank values clear optional fields.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::NationalId => self.national_id = value,
            DraftField::BirthDate => self.birth_date = value,
            DraftField::AdoptionReason => self.adoption_reason = value,
            DraftField::Expectations => self.expectations = value,
            DraftField::DailyRoutine => self.daily_routine = value,
            DraftField::WorkSchedule => self.work_schedule = value,
            DraftField::PetExperience => self.pet_experience = value,
            DraftField::HousingType => self.housing_type = value,
            DraftField::HousingOwnership => self.housing_ownership = value,
            DraftField::OuterSpace => self.outer_space = value,
            DraftField::ChildrenAges => self.children_ages = optional(value),
            DraftField::CurrentPets => self.current_pets = optional(value),
            DraftField::ExerciseCommitment => self.exercise_commitment = optional(value),
            DraftField::TravelFrequency => self.travel_frequency = optional(value),
            DraftField::PetHistory => self.pet_history = optional(value),
            DraftField::AdditionalInfo => self.additional_info = optional(value),
            DraftField::HouseholdMembers => self.household_members = optional(value),
            DraftField::LivingSpace => self.living_space = optional(value),
        }
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        let value = match field {
            DraftField::NationalId => self.national_id.as_str(),
            DraftField::BirthDate => self.birth_date.as_str(),
            DraftField::AdoptionReason => self.adoption_reason.as_str(),
            DraftField::Expectations => self.expectations.as_str(),
            DraftField::DailyRoutine => self.daily_routine.as_str(),
            DraftField::WorkSchedule => self.work_schedule.as_str(),
            DraftField::PetExperience => self.pet_experience.as_str(),
            DraftField::HousingType => self.housing_type.as_str(),
            DraftField::HousingOwnership => self.housing_ownership.as_str(),
            DraftField::OuterSpace => self.outer_space.as_str(),
            DraftField::ChildrenAges => self.children_ages.as_deref()?,
            DraftField::CurrentPets => self.current_pets.as_deref()?,
            DraftField::ExerciseCommitment => self.exercise_commitment.as_deref()?,
            DraftField::TravelFrequency => self.travel_frequency.as_deref()?,
            DraftField::PetHistory => self.pet_history.as_deref()?,
            DraftField::AdditionalInfo => self.additional_info.as_deref()?,
            DraftField::HouseholdMembers => self.household_members.as_deref()?,
            DraftField::LivingSpace => self.living_space.as_deref()?,
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
