use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::adoption::domain::{
    AdoptionApplication, ApplicationId, ApplicationStatus, HouseOwnership, HouseType,
    NewApplication, PetExperience, PetId, PetRecord, PetSummary, ShelterId, ShelterSummary,
    UserId,
};
use crate::workflows::adoption::draft::{ApplicationDraft, DraftField};
use crate::workflows::adoption::identity::Viewer;
use crate::workflows::adoption::intake::IntakeWizard;
use crate::workflows::adoption::repository::{AdoptionRepository, RepositoryError, StatusUpdate};
use crate::workflows::adoption::{AdoptionService, WorkflowConfig};

pub(super) const APPLICANT: &str = "user-A";
pub(super) const SHELTER: &str = "S1";
pub(super) const PET: &str = "P1";

pub(super) fn applicant() -> Viewer {
    Viewer::applicant(APPLICANT)
}

pub(super) fn owning_shelter() -> Viewer {
    Viewer::shelter("staff-1", SHELTER)
}

pub(super) fn other_shelter() -> Viewer {
    Viewer::shelter("staff-9", "S2")
}

pub(super) fn reason_of(len: usize) -> String {
    "a".repeat(len)
}

/// Draft meeting every step's minimum requirements.
pub(super) fn complete_draft() -> ApplicationDraft {
    ApplicationDraft {
        national_id: "12345678A".to_string(),
        birth_date: "1990-04-12".to_string(),
        adoption_reason: "We have a fenced garden and want a companion for long walks.".to_string(),
        expectations: "A calm dog that enjoys outdoor time.".to_string(),
        daily_routine: "Walks at 7am and 6pm, home office in between".to_string(),
        work_schedule: "Remote, 9 to 5".to_string(),
        pet_experience: "extensive".to_string(),
        housing_type: "house".to_string(),
        housing_ownership: "own".to_string(),
        outer_space: "large".to_string(),
        household_members: Some("Two adults".to_string()),
        living_space: Some("Three bedroom house with garden".to_string()),
        ..ApplicationDraft::default()
    }
}

pub(super) fn complete_wizard() -> IntakeWizard {
    IntakeWizard::with_draft(complete_draft())
}

/// Fill the wizard field by field, the way the form does.
pub(super) fn fill(wizard: &mut IntakeWizard, draft: &ApplicationDraft) {
    let fields = [
        DraftField::NationalId,
        DraftField::BirthDate,
        DraftField::AdoptionReason,
        DraftField::Expectations,
        DraftField::PetExperience,
        DraftField::HousingType,
        DraftField::HousingOwnership,
        DraftField::OuterSpace,
        DraftField::LivingSpace,
        DraftField::WorkSchedule,
        DraftField::DailyRoutine,
        DraftField::HouseholdMembers,
    ];
    for field in fields {
        if let Some(value) = draft.get(field) {
            wizard.update(field, value);
        }
    }
}

pub(super) fn pet_record() -> PetRecord {
    PetRecord {
        id: PetId(PET.to_string()),
        shelter_id: ShelterId(SHELTER.to_string()),
        summary: PetSummary {
            name: "Luna".to_string(),
            breed: "Border Collie".to_string(),
            species: "dog".to_string(),
            age: Some(3),
            gender: "female".to_string(),
            size: "medium".to_string(),
            avatar: None,
        },
    }
}

pub(super) fn stored_application(status: ApplicationStatus) -> AdoptionApplication {
    let created_at = Utc
        .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp");
    AdoptionApplication {
        id: ApplicationId("app-fixed".to_string()),
        details: NewApplication {
            applicant_id: UserId(APPLICANT.to_string()),
            shelter_id: ShelterId(SHELTER.to_string()),
            pet_id: PetId(PET.to_string()),
            national_id: "12345678A".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            adoption_reason: reason_of(60),
            expectations: reason_of(40),
            previous_pet_experience: PetExperience::Basic,
            house_type: HouseType::Apartment,
            house_ownership: HouseOwnership::Rented,
            outer_space: None,
            living_space: "Two bedroom flat".to_string(),
            work_schedule: "Office, 9 to 5".to_string(),
            daily_routine: "Walks twice a day".to_string(),
            household_members: "One adult".to_string(),
            children_ages: None,
            current_pets: None,
            exercise_commitment: None,
            travel_frequency: None,
            pet_history: None,
            additional_info: None,
        },
        status,
        rejection_reason: None,
        created_at,
        updated_at: created_at,
        pet: Some(pet_record().summary),
        shelter: None,
        applicant: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) applications: Mutex<HashMap<ApplicationId, AdoptionApplication>>,
    pub(super) pets: Mutex<HashMap<PetId, PetRecord>>,
    pub(super) created: Mutex<Vec<NewApplication>>,
    pub(super) calls: AtomicUsize,
    sequence: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn with_pet() -> Self {
        let repository = Self::default();
        let pet = pet_record();
        repository
            .pets
            .lock()
            .expect("pets mutex poisoned")
            .insert(pet.id.clone(), pet);
        repository
    }

    pub(super) fn seed(&self, application: AdoptionApplication) {
        self.applications
            .lock()
            .expect("repository mutex poisoned")
            .insert(application.id.clone(), application);
    }

    pub(super) fn stored(&self, id: &ApplicationId) -> AdoptionApplication {
        self.applications
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
            .expect("application stored")
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AdoptionRepository for MemoryRepository {
    fn create_application(
        &self,
        payload: NewApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let pet = self
            .pets
            .lock()
            .expect("pets mutex poisoned")
            .get(&payload.pet_id)
            .map(|pet| pet.summary.clone());
        let application = AdoptionApplication {
            id: ApplicationId(format!("app-{sequence:06}")),
            details: payload.clone(),
            status: ApplicationStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            pet,
            shelter: Some(ShelterSummary {
                name: "Happy Tails".to_string(),
                city: "Valencia".to_string(),
                state: "Valencia".to_string(),
                country: "Spain".to_string(),
            }),
            applicant: None,
        };
        self.created.lock().expect("created mutex poisoned").push(payload);
        self.seed(application.clone());
        Ok(application)
    }

    fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<AdoptionApplication>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .applications
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned())
    }

    fn update_application_status(
        &self,
        id: &ApplicationId,
        update: StatusUpdate,
    ) -> Result<AdoptionApplication, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        let application = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        application.status = update.status;
        application.rejection_reason = update.rejection_reason;
        // Stored fixtures use fixed timestamps, so always move strictly forward.
        application.updated_at = Utc::now().max(application.updated_at + Duration::seconds(1));
        Ok(application.clone())
    }

    fn get_pet(&self, id: &PetId) -> Result<Option<PetRecord>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pets.lock().expect("pets mutex poisoned").get(id).cloned())
    }
}

/// Serves reads but fails every write, like a backend that is partially down.
pub(super) struct ReadOnlyRepository {
    pub(super) inner: MemoryRepository,
}

impl ReadOnlyRepository {
    pub(super) fn new() -> Self {
        Self {
            inner: MemoryRepository::with_pet(),
        }
    }
}

impl AdoptionRepository for ReadOnlyRepository {
    fn create_application(
        &self,
        _payload: NewApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<AdoptionApplication>, RepositoryError> {
        self.inner.get_application(id)
    }

    fn update_application_status(
        &self,
        _id: &ApplicationId,
        _update: StatusUpdate,
    ) -> Result<AdoptionApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get_pet(&self, id: &PetId) -> Result<Option<PetRecord>, RepositoryError> {
        self.inner.get_pet(id)
    }
}

/// Parks writes for one applicant or application until [`HoldingRepository::release`],
/// so a request can be observed while it is still in flight. Everything else goes
/// straight to the wrapped [`MemoryRepository`].
pub(super) struct HoldingRepository {
    pub(super) inner: MemoryRepository,
    held: String,
    entered_tx: Mutex<Sender<()>>,
    entered_rx: Mutex<Receiver<()>>,
    release_tx: Mutex<Sender<()>>,
    release_rx: Mutex<Receiver<()>>,
}

impl HoldingRepository {
    /// Hold creations by applicant `held`, and status updates of application `held`.
    pub(super) fn holding(held: &str) -> Self {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        Self {
            inner: MemoryRepository::with_pet(),
            held: held.to_string(),
            entered_tx: Mutex::new(entered_tx),
            entered_rx: Mutex::new(entered_rx),
            release_tx: Mutex::new(release_tx),
            release_rx: Mutex::new(release_rx),
        }
    }

    /// Block until a held write has reached the repository.
    pub(super) fn wait_until_held(&self) {
        self.entered_rx
            .lock()
            .expect("entered mutex poisoned")
            .recv()
            .expect("held write reported");
    }

    pub(super) fn release(&self) {
        self.release_tx
            .lock()
            .expect("release mutex poisoned")
            .send(())
            .expect("held write waiting");
    }

    fn hold_if_matching(&self, key: &str) {
        if key != self.held {
            return;
        }
        self.entered_tx
            .lock()
            .expect("entered mutex poisoned")
            .send(())
            .expect("test waiting for held write");
        self.release_rx
            .lock()
            .expect("release mutex poisoned")
            .recv()
            .expect("release signal");
    }
}

impl AdoptionRepository for HoldingRepository {
    fn create_application(
        &self,
        payload: NewApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        self.hold_if_matching(&payload.applicant_id.0);
        self.inner.create_application(payload)
    }

    fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<AdoptionApplication>, RepositoryError> {
        self.inner.get_application(id)
    }

    fn update_application_status(
        &self,
        id: &ApplicationId,
        update: StatusUpdate,
    ) -> Result<AdoptionApplication, RepositoryError> {
        self.hold_if_matching(&id.0);
        self.inner.update_application_status(id, update)
    }

    fn get_pet(&self, id: &PetId) -> Result<Option<PetRecord>, RepositoryError> {
        self.inner.get_pet(id)
    }
}

pub(super) fn build_service() -> (Arc<AdoptionService<MemoryRepository>>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with_pet());
    let service = Arc::new(AdoptionService::new(
        repository.clone(),
        WorkflowConfig::default(),
    ));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
