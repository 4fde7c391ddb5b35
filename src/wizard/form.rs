//! Form snapshot: the registration form's current input, as plain data.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::account::Role;

use super::fields::{Field, RadioGroup};

/// Everything the user has entered so far.
///
/// Visibility is not stored: a role section is visible exactly when its role
/// is the one selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub values: BTreeMap<Field, String>,
    /// Raw value of the checked option in each radio group.
    #[serde(default)]
    pub radios: BTreeMap<RadioGroup, String>,
    /// Client interest checkboxes.
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub disabled: BTreeSet<Field>,
}

impl FormSnapshot {
    /// Current value of a field, empty if never entered.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn check(&mut self, group: RadioGroup, value: impl Into<String>) {
        self.radios.insert(group, value.into());
    }

    pub fn checked(&self, group: RadioGroup) -> Option<&str> {
        self.radios.get(&group).map(String::as_str)
    }

    pub fn select_role(&mut self, role: Role) {
        self.check(RadioGroup::Role, role.as_str());
    }

    /// The selected role, if one is checked and recognized.
    pub fn role(&self) -> Option<Role> {
        self.checked(RadioGroup::Role)?.parse().ok()
    }

    pub fn disable(&mut self, field: Field) {
        self.disabled.insert(field);
    }

    pub fn is_disabled(&self, field: Field) -> bool {
        self.disabled.contains(&field)
    }

    fn section_visible(&self, section: Option<Role>) -> bool {
        match section {
            None => true,
            Some(owner) => self.role() == Some(owner),
        }
    }

    pub fn is_field_visible(&self, field: Field) -> bool {
        self.section_visible(field.section())
    }

    pub fn is_group_visible(&self, group: RadioGroup) -> bool {
        self.section_visible(group.section())
    }
}
