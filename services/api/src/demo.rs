use crate::infra::InMemoryAdoptionRepository;
use clap::Args;
use pet_adoption::config::AppConfig;
use pet_adoption::error::AppError;
use pet_adoption::workflows::adoption::{
    AdoptionService, ApplicationId, ApplicationStatus, ApplicationView, DraftField, IntakeStep,
    IntakeWizard, PetId, Viewer, WorkflowConfig,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pet to apply for. Defaults to the seeded P1 at shelter S1.
    #[arg(long, default_value = "P1")]
    pub(crate) pet_id: String,
    /// Reject the application instead of approving it.
    #[arg(long)]
    pub(crate) reject: bool,
    /// Rejection reason to record; the configured default is used when omitted.
    #[arg(long, requires = "reject")]
    pub(crate) reason: Option<String>,
    /// Attempt the decision as a staff member of another shelter first.
    #[arg(long)]
    pub(crate) show_denied: bool,
}

/// Answers typed into the form, one step at a time.
const STEP_ANSWERS: [(IntakeStep, &[(DraftField, &str)]); 4] = [
    (
        IntakeStep::Motivation,
        &[
            (DraftField::NationalId, "12345678A"),
            (DraftField::BirthDate, "1990-04-12"),
            (
                DraftField::AdoptionReason,
                "We have a fenced garden and want a companion for long walks in the hills.",
            ),
            (DraftField::Expectations, "A calm dog that enjoys outdoor time."),
            (DraftField::PetExperience, "extensive"),
        ],
    ),
    (
        IntakeStep::Housing,
        &[
            (DraftField::HousingType, "house"),
            (DraftField::HousingOwnership, "own"),
            (DraftField::OuterSpace, "large"),
            (DraftField::LivingSpace, "Three bedroom house with garden"),
        ],
    ),
    (
        IntakeStep::Lifestyle,
        &[
            (DraftField::WorkSchedule, "Remote, 9 to 5"),
            (DraftField::DailyRoutine, "Walks at 7am and 6pm"),
            (DraftField::ExerciseCommitment, "Two hours a day"),
        ],
    ),
    (
        IntakeStep::FamilyAndPets,
        &[
            (DraftField::HouseholdMembers, "Two adults"),
            (DraftField::CurrentPets, "None"),
        ],
    ),
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        pet_id,
        reject,
        reason,
        show_denied,
    } = args;

    let workflow = match AppConfig::load() {
        Ok(config) => config.workflow,
        Err(err) => {
            println!("Configuration unavailable ({err}); using workflow defaults");
            WorkflowConfig::default()
        }
    };

    let repository = Arc::new(InMemoryAdoptionRepository::seeded()?);
    let service = AdoptionService::new(repository, workflow);
    let applicant = Viewer::applicant("user-A");
    let shelter = Viewer::shelter("staff-1", "S1");

    println!("Pet adoption demo");
    println!("\nIntake form");
    let mut wizard = IntakeWizard::new();
    for (step, answers) in STEP_ANSWERS {
        let blocked = wizard.missing(step);
        println!(
            "- Step {}/{} {}: {} requirement(s) open",
            step.number(),
            IntakeStep::ALL.len(),
            step.label(),
            blocked.len()
        );
        for (field, value) in answers {
            wizard.update(*field, *value);
        }
        if wizard.can_advance(step) {
            println!("  complete");
        } else {
            for requirement in wizard.missing(step) {
                println!("  still missing: {}", requirement.describe());
            }
        }
        wizard.next();
    }

    println!("\nSubmission");
    let receipt = match service
        .submissions()
        .submit(&applicant, &wizard, &PetId(pet_id))
    {
        Ok(receipt) => receipt,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    let id = receipt.application.id.clone();
    println!(
        "- Created application {} -> status {} (redirect to {})",
        id,
        receipt.application.status.label(),
        receipt.redirect_to
    );
    println!(
        "  Canonical selections: experience={:?} housing={:?}/{:?} outer_space={:?}",
        receipt.application.details.previous_pet_experience,
        receipt.application.details.house_type,
        receipt.application.details.house_ownership,
        receipt.application.details.outer_space
    );

    println!("\nShelter review");
    print_view(&service, &shelter, &id)?;

    if show_denied {
        let outsider = Viewer::shelter("staff-9", "S2");
        print_view(&service, &outsider, &id)?;
        let attempt = service.transitions().update_by_id(
            &outsider,
            &id,
            ApplicationStatus::Approved,
            None,
        );
        if let Err(err) = attempt {
            println!("  Decision by another shelter refused: {err}");
        }
    }

    let (status, reason) = if reject {
        (ApplicationStatus::Rejected, reason)
    } else {
        (ApplicationStatus::Approved, None)
    };
    match service
        .transitions()
        .update_by_id(&shelter, &id, status, reason)
    {
        Ok(updated) => println!(
            "- Shelter set status {} at {}",
            updated.status.label(),
            updated.updated_at.to_rfc3339()
        ),
        Err(err) => {
            println!("  Status update failed: {err}");
            return Ok(());
        }
    }

    println!("\nApplicant dashboard");
    print_view(&service, &applicant, &id)?;
    println!("\nShelter dashboard");
    print_view(&service, &shelter, &id)?;

    Ok(())
}

fn print_view(
    service: &AdoptionService<InMemoryAdoptionRepository>,
    viewer: &Viewer,
    id: &ApplicationId,
) -> Result<(), AppError> {
    let view = service.access().load(viewer, id)?;
    match &view {
        ApplicationView::Applicant(applicant) => {
            println!("- [{}] {}", viewer.role_label(), applicant.message);
        }
        ApplicationView::Shelter(shelter) => {
            let pet = shelter
                .application
                .pet
                .as_ref()
                .map(|pet| pet.name.as_str())
                .unwrap_or("unknown pet");
            println!(
                "- [{}] {} for {} is {}",
                viewer.role_label(),
                shelter.application.id,
                pet,
                shelter.application.status.label()
            );
            if view.actions().is_empty() {
                println!("  No actions available");
            } else {
                let labels: Vec<String> = view
                    .actions()
                    .iter()
                    .map(|action| format!("{action:?}"))
                    .collect();
                println!("  Actions: {}", labels.join(", "));
            }
        }
        ApplicationView::Denied { application_id } => {
            println!("- [{}] access to {} denied", viewer.role_label(), application_id);
        }
        ApplicationView::NotFound { application_id } => {
            println!("- [{}] {} not found", viewer.role_label(), application_id);
        }
    }
    Ok(())
}
