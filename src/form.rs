//! Draft data for the create/edit dialog and its per-field checks.
//!
//! The store only insists on non-blank, unique values. The dialog is stricter
//! and runs [`DriverForm::validate`] before submitting, so the user sees which
//! field needs fixing.
use crate::source::DriverRecord;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_IDENTIFICATION_LEN: usize = 4;

/// Editable fields of a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Identification,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Identification => "Identification",
        }
    }

    /// The other field; used for Tab navigation in the dialog.
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Identification,
            FormField::Identification => FormField::Name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverForm {
    pub name: String,
    pub identification: String,
}

impl DriverForm {
    pub fn from_record(driver: &DriverRecord) -> Self {
        Self {
            name: driver.name.clone(),
            identification: driver.identification.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Identification => &self.identification,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        match field {
            FormField::Name => self.name = value.into(),
            FormField::Identification => self.identification = value.into(),
        }
    }

    /// Field-level checks shown inline in the dialog.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required".to_string());
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.name = Some(format!("Name must be at least {MIN_NAME_LEN} characters"));
        }

        let ident = self.identification.trim();
        if ident.is_empty() {
            errors.identification = Some("Identification is required".to_string());
        } else if ident.chars().count() < MIN_IDENTIFICATION_LEN {
            errors.identification = Some(format!(
                "Identification must be at least {MIN_IDENTIFICATION_LEN} characters"
            ));
        } else if !ident.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.identification = Some("Identification must be alphanumeric".to_string());
        }

        errors
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub identification: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.identification.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::Identification => self.identification.as_deref(),
        }
    }

    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Name => self.name = None,
            FormField::Identification => self.identification = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, ident: &str) -> DriverForm {
        DriverForm {
            name: name.into(),
            identification: ident.into(),
        }
    }

    #[test]
    fn accepts_reasonable_values() {
        assert!(form("Ana Ruiz", "AB1234").validate().is_empty());
        assert!(form("  Li  ", " 0001 ").validate().is_empty());
    }

    #[test]
    fn reports_each_field_independently() {
        let errs = form("", "").validate();
        assert_eq!(errs.name.as_deref(), Some("Name is required"));
        assert_eq!(errs.identification.as_deref(), Some("Identification is required"));

        let errs = form("A", "123").validate();
        assert!(errs.name.unwrap().contains("at least 2"));
        assert!(errs.identification.unwrap().contains("at least 4"));
    }

    #[test]
    fn identification_must_be_ascii_alphanumeric() {
        let errs = form("Ana", "12-34").validate();
        assert_eq!(
            errs.get(FormField::Identification),
            Some("Identification must be alphanumeric")
        );
        assert!(errs.get(FormField::Name).is_none());
        assert!(form("Ana", "12ñ45").validate().identification.is_some());
    }

    #[test]
    fn clear_and_field_navigation() {
        let mut errs = form("", "").validate();
        errs.clear(FormField::Name);
        assert!(errs.name.is_none());
        assert!(!errs.is_empty());
        assert_eq!(FormField::Name.next(), FormField::Identification);
        assert_eq!(FormField::Identification.next(), FormField::Name);
    }

    #[test]
    fn from_record_copies_fields() {
        let d = DriverRecord::new(4, "Luis", "5555");
        let mut f = DriverForm::from_record(&d);
        assert_eq!(f.get(FormField::Name), "Luis");
        assert_eq!(f.get(FormField::Identification), "5555");
        f.set(FormField::Name, "Luis P");
        assert_eq!(f.name, "Luis P");
    }
}
