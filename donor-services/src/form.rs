//! Registration form state.

use donor_core::config::FormConfig;
use donor_core::constants::DEFAULT_BLOOD_BANK_CHOICES;
use donor_core::error::{DonorError, DonorResult};
use donor_models::BloodGroup;

use crate::registrar::Registration;

/// Field values of the registration form plus the values it resets to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorForm {
    pub name: String,
    pub blood_group: String,
    pub contact: String,
    pub blood_bank: String,
    default_blood_group: BloodGroup,
    blood_bank_choices: Vec<String>,
}

impl DonorForm {
    /// Build an empty form from the configured defaults.
    pub fn from_config(config: &FormConfig) -> DonorResult<Self> {
        let default_blood_group: BloodGroup = config
            .default_blood_group
            .parse()
            .map_err(|_| DonorError::Config(format!(
                "form.default_blood_group \"{}\" is not a blood group",
                config.default_blood_group
            )))?;

        let mut form = Self {
            name: String::new(),
            blood_group: String::new(),
            contact: String::new(),
            blood_bank: String::new(),
            default_blood_group,
            blood_bank_choices: config.blood_bank_choices.clone(),
        };
        form.reset();
        Ok(form)
    }

    /// Clear name and contact and reselect the default blood group and
    /// blood bank.
    pub fn reset(&mut self) {
        self.name.clear();
        self.contact.clear();
        self.blood_group = self.default_blood_group.to_string();
        self.blood_bank = self.blood_bank_choices.first().cloned().unwrap_or_default();
    }

    /// Blood group choices in display order.
    pub fn blood_group_choices(&self) -> [BloodGroup; 8] {
        BloodGroup::ALL
    }

    /// Blood bank names offered by the form.
    pub fn blood_bank_choices(&self) -> &[String] {
        &self.blood_bank_choices
    }

    /// Snapshot the current field values for the registrar.
    pub fn registration(&self) -> Registration {
        Registration::new(&self.name, &self.blood_group, &self.contact, &self.blood_bank)
    }
}

impl Default for DonorForm {
    fn default() -> Self {
        let mut form = Self {
            name: String::new(),
            blood_group: String::new(),
            contact: String::new(),
            blood_bank: String::new(),
            default_blood_group: BloodGroup::default(),
            blood_bank_choices: DEFAULT_BLOOD_BANK_CHOICES.iter().map(|s| s.to_string()).collect(),
        };
        form.reset();
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_values() {
        let form = DonorForm::default();
        assert_eq!(form.blood_group, "A+");
        assert_eq!(form.blood_bank, "Blood Bank 1");
        assert!(form.name.is_empty());
        assert_eq!(form.blood_bank_choices().len(), 3);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let config = FormConfig {
            default_blood_group: "O-".into(),
            blood_bank_choices: vec!["City".into(), "County".into()],
        };
        let mut form = DonorForm::from_config(&config).unwrap();
        form.name = "Alice".into();
        form.contact = "555".into();
        form.blood_group = "B+".into();
        form.blood_bank = "County".into();

        form.reset();
        assert!(form.name.is_empty());
        assert!(form.contact.is_empty());
        assert_eq!(form.blood_group, "O-");
        assert_eq!(form.blood_bank, "City");
    }

    #[test]
    fn test_from_config_rejects_bad_default() {
        let config = FormConfig {
            default_blood_group: "Z".into(),
            blood_bank_choices: Vec::new(),
        };
        assert!(matches!(DonorForm::from_config(&config), Err(DonorError::Config(_))));
    }

    #[test]
    fn test_registration_snapshot() {
        let mut form = DonorForm::default();
        form.name = "Alice".into();
        form.contact = "555-1111".into();
        let reg = form.registration();
        assert_eq!(reg, Registration::new("Alice", "A+", "555-1111", "Blood Bank 1"));
    }
}
