//! Form fields, radio groups, and which of them each role must fill in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::account::Role;

use super::state::WizardStep;
use super::validate::FieldKind;

/// Text and select inputs on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    BusinessName,
    BusinessSector,
    Institution,
    Specialization,
    Experience,
    Motivation,
    Location,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Password,
        Field::BusinessName,
        Field::BusinessSector,
        Field::Institution,
        Field::Specialization,
        Field::Experience,
        Field::Motivation,
        Field::Location,
    ];

    /// Form name, also the key validation messages are reported under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::BusinessName => "businessName",
            Self::BusinessSector => "businessSector",
            Self::Institution => "institution",
            Self::Specialization => "specialization",
            Self::Experience => "experience",
            Self::Motivation => "motivation",
            Self::Location => "location",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Email => FieldKind::Email,
            Self::Phone => FieldKind::Phone,
            Self::Password => FieldKind::Password,
            Self::Name | Self::BusinessName => FieldKind::NameLike,
            _ => FieldKind::Required,
        }
    }

    /// The role section this field lives in, `None` for shared account fields.
    pub fn section(&self) -> Option<Role> {
        match self {
            Self::Name | Self::Email | Self::Phone | Self::Password => None,
            Self::BusinessName | Self::BusinessSector => Some(Role::Entrepreneur),
            Self::Institution | Self::Specialization | Self::Experience | Self::Motivation => {
                Some(Role::Facilitator)
            }
            Self::Location => Some(Role::Client),
        }
    }

    pub fn step(&self) -> WizardStep {
        match self.section() {
            None => WizardStep::Account,
            Some(_) => WizardStep::Profile,
        }
    }
}

/// Radio button groups on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RadioGroup {
    Role,
    Goal,
    Connectivity,
    DiscoveryMethod,
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
}

impl RadioGroup {
    pub const ALL: [RadioGroup; 9] = [
        RadioGroup::Role,
        RadioGroup::Goal,
        RadioGroup::Connectivity,
        RadioGroup::DiscoveryMethod,
        RadioGroup::Q1,
        RadioGroup::Q2,
        RadioGroup::Q3,
        RadioGroup::Q4,
        RadioGroup::Q5,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Goal => "goal",
            Self::Connectivity => "connectivity",
            Self::DiscoveryMethod => "discoveryMethod",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Q5 => "q5",
        }
    }

    /// Diagnostic questions are only shown to entrepreneurs.
    pub fn section(&self) -> Option<Role> {
        match self {
            Self::Role => None,
            Self::Goal | Self::Connectivity => Some(Role::Entrepreneur),
            Self::DiscoveryMethod => Some(Role::Client),
            Self::Q1 | Self::Q2 | Self::Q3 | Self::Q4 | Self::Q5 => Some(Role::Entrepreneur),
        }
    }

    pub fn step(&self) -> WizardStep {
        match self {
            Self::Role => WizardStep::Role,
            Self::Goal | Self::Connectivity | Self::DiscoveryMethod => WizardStep::Profile,
            Self::Q1 | Self::Q2 | Self::Q3 | Self::Q4 | Self::Q5 => WizardStep::Diagnostic,
        }
    }
}

/// Account fields every role fills in on step 2.
pub const ACCOUNT_FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Password];

/// The fields and radio groups a form must complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFields {
    pub fields: BTreeSet<Field>,
    pub groups: BTreeSet<RadioGroup>,
}

impl RequiredFields {
    /// Everything required for a form with the given role selection:
    /// the shared account fields plus the role's own section.
    pub fn for_form(role: Option<Role>) -> Self {
        let mut required = role.map(required_fields_for).unwrap_or_default();
        required.fields.extend(ACCOUNT_FIELDS);
        required
    }

    pub fn requires_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn requires_group(&self, group: RadioGroup) -> bool {
        self.groups.contains(&group)
    }
}

/// Role-specific required set. Computed fresh on every call, so switching
/// roles never leaves another role's markers behind.
pub fn required_fields_for(role: Role) -> RequiredFields {
    let (fields, groups): (&[Field], &[RadioGroup]) = match role {
        Role::Entrepreneur => (
            &[Field::BusinessName, Field::BusinessSector],
            &[RadioGroup::Goal, RadioGroup::Connectivity],
        ),
        Role::Facilitator => (
            &[Field::Specialization, Field::Experience, Field::Motivation],
            &[],
        ),
        Role::Client => (&[Field::Location], &[RadioGroup::DiscoveryMethod]),
    };
    RequiredFields {
        fields: fields.iter().copied().collect(),
        groups: groups.iter().copied().collect(),
    }
}
