use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted adoption applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Platform user identifier (applicants, shelter staff, administrators).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShelterId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub String);

macro_rules! display_identifier {
    ($($ty:ident),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })+
    };
}

display_identifier!(ApplicationId, UserId, ShelterId, PetId);

/// Prior experience caring for animals, in the vocabulary stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetExperience {
    None,
    Basic,
    Moderate,
    Experienced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseType {
    House,
    Apartment,
    Farm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseOwnership {
    Owned,
    Rented,
}

/// Size of the yard or other outdoor space available to the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OuterSpace {
    None,
    Small,
    Medium,
    Large,
}

/// Status tracked throughout the adoption application lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// No transition is offered once an application leaves `Pending`.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// Canonical creation payload sent to the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub applicant_id: UserId,
    pub shelter_id: ShelterId,
    pub pet_id: PetId,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub adoption_reason: String,
    pub expectations: String,
    pub previous_pet_experience: PetExperience,
    pub house_type: HouseType,
    pub house_ownership: HouseOwnership,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_space: Option<OuterSpace>,
    pub living_space: String,
    pub work_schedule: String,
    pub daily_routine: String,
    pub household_members: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_ages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_commitment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Persisted adoption application, including the read-only joins used for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionApplication {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub details: NewApplication,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelter: Option<ShelterSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantSummary>,
}

impl AdoptionApplication {
    pub fn applicant_id(&self) -> &UserId {
        &self.details.applicant_id
    }

    pub fn shelter_id(&self) -> &ShelterId {
        &self.details.shelter_id
    }

    pub fn pet_id(&self) -> &PetId {
        &self.details.pet_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSummary {
    pub name: String,
    pub breed: String,
    pub species: String,
    pub age: Option<u8>,
    pub gender: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterSummary {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSummary {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Catalog record for a pet; only the owning shelter is needed during intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: PetId,
    pub shelter_id: ShelterId,
    pub summary: PetSummary,
}
