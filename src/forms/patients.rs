use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::patient::{NewPatient, UpdatePatient};
use crate::domain::types::{Gender, PatientStatus, normalize_email};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for registering or editing a patient.
pub struct PatientForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Optional contact email, blank means none.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    /// Defaults to `ACTIVE` when omitted.
    #[serde(default)]
    pub status: Option<String>,
}

impl PatientForm {
    /// Validates the form and converts it into a [`NewPatient`].
    pub fn to_new_patient(&self) -> Result<NewPatient, FormError> {
        self.validate()?;

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(FormError::InvalidValue("name cannot be blank".to_string()));
        }

        if self.date_of_birth > Utc::now().date_naive() {
            return Err(FormError::InvalidValue(
                "date of birth is in the future".to_string(),
            ));
        }

        let gender: Gender = self.gender.parse()?;
        let status = match self.status.as_deref() {
            Some(status) if !status.trim().is_empty() => status.parse::<PatientStatus>()?,
            _ => PatientStatus::Active,
        };
        let email = match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Some(normalize_email(email)?),
            _ => None,
        };

        let patient = NewPatient::new(
            &self.first_name,
            &self.last_name,
            self.date_of_birth,
            gender,
        );

        Ok(patient.email(email).phone(self.phone.clone()).status(status))
    }

    /// Same checks as [`to_new_patient`](Self::to_new_patient), for edits.
    pub fn to_update_patient(&self) -> Result<UpdatePatient, FormError> {
        self.to_new_patient().map(UpdatePatient::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form() -> PatientForm {
        PatientForm {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: Some(" Grace@Navy.mil ".into()),
            phone: Some("".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1986, 12, 9).unwrap(),
            gender: "female".into(),
            status: None,
        }
    }

    #[test]
    fn converts_valid_form() {
        let new = form().to_new_patient().unwrap();
        assert_eq!(new.email.as_deref(), Some("grace@navy.mil"));
        assert_eq!(new.phone, None);
        assert_eq!(new.gender, Gender::Female);
        assert_eq!(new.status, PatientStatus::Active);
    }

    #[test]
    fn rejects_empty_names() {
        let mut form = form();
        form.first_name = String::new();
        assert!(matches!(form.to_new_patient(), Err(FormError::Validation(_))));

        form.first_name = "   ".into();
        assert!(matches!(form.to_new_patient(), Err(FormError::InvalidValue(_))));
    }

    #[test]
    fn rejects_bad_email_and_enums() {
        let mut bad_email = form();
        bad_email.email = Some("grace at navy".into());
        assert!(matches!(bad_email.to_new_patient(), Err(FormError::InvalidEmail)));

        let mut bad_status = form();
        bad_status.status = Some("all".into());
        assert!(matches!(bad_status.to_new_patient(), Err(FormError::InvalidValue(_))));
    }

    #[test]
    fn deserializes_camel_case_json() {
        let form: PatientForm = serde_json::from_value(json!({
            "firstName": "Alan",
            "lastName": "Turing",
            "dateOfBirth": "1990-06-23",
            "gender": "MALE",
            "status": "INACTIVE"
        }))
        .unwrap();
        let new = form.to_new_patient().unwrap();
        assert_eq!(new.status, PatientStatus::Inactive);
        assert_eq!(new.email, None);
    }
}
