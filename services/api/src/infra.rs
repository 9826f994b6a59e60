use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use pet_adoption::workflows::adoption::{
    AdoptionApplication, AdoptionRepository, ApplicantSummary, ApplicationId, ApplicationStatus,
    NewApplication, PetId, PetRecord, PetSummary, RepositoryError, ShelterId, ShelterSummary,
    StatusUpdate, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store standing in for the hosted adoption backend.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAdoptionRepository {
    applications: Arc<Mutex<HashMap<ApplicationId, AdoptionApplication>>>,
    pets: Arc<Mutex<HashMap<PetId, PetRecord>>>,
    shelters: Arc<Mutex<HashMap<ShelterId, ShelterSummary>>>,
    applicants: Arc<Mutex<HashMap<UserId, ApplicantSummary>>>,
    sequence: Arc<AtomicU64>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

impl InMemoryAdoptionRepository {
    /// Repository preloaded with the demo catalog: two shelters and their pets.
    pub(crate) fn seeded() -> Result<Self, RepositoryError> {
        let repository = Self::default();
        repository.add_shelter(
            ShelterId("S1".to_string()),
            ShelterSummary {
                name: "Refugio Patas Felices".to_string(),
                city: "Valencia".to_string(),
                state: "Valencia".to_string(),
                country: "Spain".to_string(),
            },
        )?;
        repository.add_shelter(
            ShelterId("S2".to_string()),
            ShelterSummary {
                name: "Hogar Animal Norte".to_string(),
                city: "Bilbao".to_string(),
                state: "Bizkaia".to_string(),
                country: "Spain".to_string(),
            },
        )?;
        repository.add_pet(PetRecord {
            id: PetId("P1".to_string()),
            shelter_id: ShelterId("S1".to_string()),
            summary: PetSummary {
                name: "Luna".to_string(),
                breed: "Border Collie".to_string(),
                species: "dog".to_string(),
                age: Some(3),
                gender: "female".to_string(),
                size: "medium".to_string(),
                avatar: None,
            },
        })?;
        repository.add_pet(PetRecord {
            id: PetId("P2".to_string()),
            shelter_id: ShelterId("S2".to_string()),
            summary: PetSummary {
                name: "Miso".to_string(),
                breed: "European Shorthair".to_string(),
                species: "cat".to_string(),
                age: Some(1),
                gender: "male".to_string(),
                size: "small".to_string(),
                avatar: None,
            },
        })?;
        repository.add_applicant(
            UserId("user-A".to_string()),
            ApplicantSummary {
                name: "Alex Romero".to_string(),
                email: "alex@example.org".to_string(),
                phone: None,
                avatar: None,
            },
        )?;
        Ok(repository)
    }

    pub(crate) fn add_pet(&self, pet: PetRecord) -> Result<(), RepositoryError> {
        lock(&self.pets)?.insert(pet.id.clone(), pet);
        Ok(())
    }

    pub(crate) fn add_shelter(
        &self,
        id: ShelterId,
        summary: ShelterSummary,
    ) -> Result<(), RepositoryError> {
        lock(&self.shelters)?.insert(id, summary);
        Ok(())
    }

    pub(crate) fn add_applicant(
        &self,
        id: UserId,
        summary: ApplicantSummary,
    ) -> Result<(), RepositoryError> {
        lock(&self.applicants)?.insert(id, summary);
        Ok(())
    }

    fn next_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        ApplicationId(format!("app-{id:06}"))
    }

    fn with_summaries(
        &self,
        mut application: AdoptionApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        application.pet = lock(&self.pets)?
            .get(application.pet_id())
            .map(|pet| pet.summary.clone());
        application.shelter = lock(&self.shelters)?
            .get(application.shelter_id())
            .cloned();
        application.applicant = lock(&self.applicants)?
            .get(application.applicant_id())
            .cloned();
        Ok(application)
    }
}

impl AdoptionRepository for InMemoryAdoptionRepository {
    fn create_application(
        &self,
        payload: NewApplication,
    ) -> Result<AdoptionApplication, RepositoryError> {
        let now = Utc::now();
        let application = AdoptionApplication {
            id: self.next_id(),
            details: payload,
            status: ApplicationStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            pet: None,
            shelter: None,
            applicant: None,
        };

        let mut guard = lock(&self.applications)?;
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        drop(guard);

        self.with_summaries(application)
    }

    fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<AdoptionApplication>, RepositoryError> {
        let stored = lock(&self.applications)?.get(id).cloned();
        stored
            .map(|application| self.with_summaries(application))
            .transpose()
    }

    fn update_application_status(
        &self,
        id: &ApplicationId,
        update: StatusUpdate,
    ) -> Result<AdoptionApplication, RepositoryError> {
        let mut guard = lock(&self.applications)?;
        let application = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        application.status = update.status;
        application.rejection_reason = update.rejection_reason;
        application.updated_at = Utc::now();
        let updated = application.clone();
        drop(guard);

        self.with_summaries(updated)
    }

    fn get_pet(&self, id: &PetId) -> Result<Option<PetRecord>, RepositoryError> {
        Ok(lock(&self.pets)?.get(id).cloned())
    }
}
