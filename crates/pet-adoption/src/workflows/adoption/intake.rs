//! Multi-step intake form controller.
//!
//! The wizard owns an [`ApplicationDraft`] and walks it through four ordered steps.
//! Forward navigation is gated per step; nothing here touches the persistence layer.

use serde::{Deserialize, Serialize};

use super::draft::{
    ApplicationDraft, DraftField, ADOPTION_REASON_MIN_CHARS, EXPECTATIONS_MIN_CHARS,
};

/// Ordered steps of the adoption intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntakeStep {
    Motivation,
    Housing,
    Lifestyle,
    FamilyAndPets,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 4] = [
        IntakeStep::Motivation,
        IntakeStep::Housing,
        IntakeStep::Lifestyle,
        IntakeStep::FamilyAndPets,
    ];

    /// One-based position used by the progress indicator.
    pub const fn number(self) -> u8 {
        match self {
            IntakeStep::Motivation => 1,
            IntakeStep::Housing => 2,
            IntakeStep::Lifestyle => 3,
            IntakeStep::FamilyAndPets => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|step| step.number() == number)
    }

    pub const fn label(self) -> &'static str {
        match self {
            IntakeStep::Motivation => "motivation",
            IntakeStep::Housing => "housing",
            IntakeStep::Lifestyle => "lifestyle",
            IntakeStep::FamilyAndPets => "family_and_pets",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    fn rules(self) -> &'static [FieldRule] {
        match self {
            IntakeStep::Motivation => MOTIVATION_RULES,
            IntakeStep::Housing => HOUSING_RULES,
            IntakeStep::Lifestyle => LIFESTYLE_RULES,
            IntakeStep::FamilyAndPets => FAMILY_RULES,
        }
    }

    /// Requirements of this step the draft does not yet meet, in form order.
    pub fn unmet(self, draft: &ApplicationDraft) -> Vec<StepRequirement> {
        self.rules()
            .iter()
            .filter_map(|rule| rule.check(draft))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: DraftField,
    min_chars: Option<usize>,
}

impl FieldRule {
    const fn required(field: DraftField) -> Self {
        Self {
            field,
            min_chars: None,
        }
    }

    const fn min_chars(field: DraftField, min: usize) -> Self {
        Self {
            field,
            min_chars: Some(min),
        }
    }

    fn check(&self, draft: &ApplicationDraft) -> Option<StepRequirement> {
        let Some(value) = draft.get(self.field) else {
            return Some(StepRequirement::Missing { field: self.field });
        };

        match self.min_chars {
            Some(min) if value.chars().count() < min => Some(StepRequirement::TooShort {
                field: self.field,
                min_chars: min,
                actual_chars: value.chars().count(),
            }),
            _ => None,
        }
    }
}

const MOTIVATION_RULES: &[FieldRule] = &[
    FieldRule::required(DraftField::NationalId),
    FieldRule::required(DraftField::BirthDate),
    FieldRule::min_chars(DraftField::AdoptionReason, ADOPTION_REASON_MIN_CHARS),
    FieldRule::min_chars(DraftField::Expectations, EXPECTATIONS_MIN_CHARS),
    FieldRule::required(DraftField::PetExperience),
];

const HOUSING_RULES: &[FieldRule] = &[
    FieldRule::required(DraftField::HousingType),
    FieldRule::required(DraftField::HousingOwnership),
    FieldRule::required(DraftField::LivingSpace),
];

const LIFESTYLE_RULES: &[FieldRule] = &[
    FieldRule::required(DraftField::WorkSchedule),
    FieldRule::required(DraftField::DailyRoutine),
];

const FAMILY_RULES: &[FieldRule] = &[FieldRule::required(DraftField::HouseholdMembers)];

/// A single unmet completion criterion, surfaced next to the disabled Next control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepRequirement {
    Missing {
        field: DraftField,
    },
    TooShort {
        field: DraftField,
        min_chars: usize,
        actual_chars: usize,
    },
}

impl StepRequirement {
    pub fn field(&self) -> DraftField {
        match self {
            StepRequirement::Missing { field } | StepRequirement::TooShort { field, .. } => *field,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StepRequirement::Missing { field } => format!("{} is required", field.label()),
            StepRequirement::TooShort {
                field,
                min_chars,
                actual_chars,
            } => format!(
                "{} needs at least {min_chars} characters ({actual_chars} provided)",
                field.label()
            ),
        }
    }
}

/// Form controller holding the draft and the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeWizard {
    draft: ApplicationDraft,
    step: IntakeStep,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::with_draft(ApplicationDraft::default())
    }

    /// Resume a wizard from a previously captured draft, starting at step one.
    pub fn with_draft(draft: ApplicationDraft) -> Self {
        Self {
            draft,
            step: IntakeStep::Motivation,
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn current_step(&self) -> IntakeStep {
        self.step
    }

    pub fn progress(&self) -> (u8, u8) {
        (self.step.number(), IntakeStep::ALL.len() as u8)
    }

    pub fn update(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn can_advance(&self, step: IntakeStep) -> bool {
        step.unmet(&self.draft).is_empty()
    }

    pub fn missing(&self, step: IntakeStep) -> Vec<StepRequirement> {
        step.unmet(&self.draft)
    }

    /// Move forward one step. Returns `false` when blocked or already on the last step.
    pub fn next(&mut self) -> bool {
        if !self.can_advance(self.step) {
            return false;
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        IntakeStep::ALL.iter().all(|step| self.can_advance(*step))
    }

    /// First step that still blocks submission together with its unmet requirements.
    pub fn first_incomplete(&self) -> Option<(IntakeStep, Vec<StepRequirement>)> {
        IntakeStep::ALL.iter().find_map(|step| {
            let unmet = step.unmet(&self.draft);
            if unmet.is_empty() {
                None
            } else {
                Some((*step, unmet))
            }
        })
    }
}
