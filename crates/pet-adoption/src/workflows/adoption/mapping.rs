use std::fmt;

use super::domain::{HouseOwnership, HouseType, OuterSpace, PetExperience};

/// Outcome of translating a UI label into its canonical counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping<T> {
    Mapped(T),
    Unmapped(String),
}

impl<T> Mapping<T> {
    pub fn mapped(self) -> Option<T> {
        match self {
            Mapping::Mapped(value) => Some(value),
            Mapping::Unmapped(_) => None,
        }
    }

    /// Convert into a `Result`, tagging an unknown label with the field it came from.
    pub fn require(self, field: EnumeratedField) -> Result<T, UnmappedValue> {
        match self {
            Mapping::Mapped(value) => Ok(value),
            Mapping::Unmapped(value) => Err(UnmappedValue { field, value }),
        }
    }
}

/// Enumerated draft fields that go through the value table before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratedField {
    PetExperience,
    HousingType,
    HousingOwnership,
    OuterSpace,
}

impl EnumeratedField {
    pub const fn label(self) -> &'static str {
        match self {
            EnumeratedField::PetExperience => "pet_experience",
            EnumeratedField::HousingType => "housing_type",
            EnumeratedField::HousingOwnership => "housing_ownership",
            EnumeratedField::OuterSpace => "outer_space",
        }
    }
}

impl fmt::Display for EnumeratedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A UI value that has no entry in the table for its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{value}' for {field}")]
pub struct UnmappedValue {
    pub field: EnumeratedField,
    pub value: String,
}

const PET_EXPERIENCE: &[(&str, PetExperience)] = &[
    ("none", PetExperience::None),
    ("basic", PetExperience::Basic),
    ("moderate", PetExperience::Moderate),
    ("extensive", PetExperience::Experienced),
];

const HOUSE_TYPE: &[(&str, HouseType)] = &[
    ("house", HouseType::House),
    ("apartment", HouseType::Apartment),
    ("farm", HouseType::Farm),
];

const HOUSE_OWNERSHIP: &[(&str, HouseOwnership)] = &[
    ("own", HouseOwnership::Owned),
    ("rent", HouseOwnership::Rented),
];

const OUTER_SPACE: &[(&str, OuterSpace)] = &[
    ("none", OuterSpace::None),
    ("small", OuterSpace::Small),
    ("medium", OuterSpace::Medium),
    ("large", OuterSpace::Large),
];

fn lookup<T: Copy>(table: &[(&str, T)], label: &str) -> Mapping<T> {
    let key = label.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(ui, _)| *ui == key)
        .map(|(_, canonical)| Mapping::Mapped(*canonical))
        .unwrap_or_else(|| Mapping::Unmapped(label.to_string()))
}

pub fn pet_experience(label: &str) -> Mapping<PetExperience> {
    lookup(PET_EXPERIENCE, label)
}

pub fn house_type(label: &str) -> Mapping<HouseType> {
    lookup(HOUSE_TYPE, label)
}

pub fn house_ownership(label: &str) -> Mapping<HouseOwnership> {
    lookup(HOUSE_OWNERSHIP, label)
}

pub fn outer_space(label: &str) -> Mapping<OuterSpace> {
    lookup(OUTER_SPACE, label)
}
