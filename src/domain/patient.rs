use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Gender, PatientId, PatientStatus};
use crate::domain::{Record, SortKey, contains_term};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub status: PatientStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub status: PatientStatus,
}

impl NewPatient {
    /// Builds a new patient, dropping blank contact fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        gender: Gender,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: None,
            phone: None,
            date_of_birth,
            gender,
            status: PatientStatus::Active,
        }
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn status(mut self, status: PatientStatus) -> Self {
        self.status = status;
        self
    }
}

/// Full replacement of the editable patient fields.
#[derive(Clone, Debug)]
pub struct UpdatePatient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub status: PatientStatus,
}

impl From<NewPatient> for UpdatePatient {
    fn from(new: NewPatient) -> Self {
        Self {
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            status: new.status,
        }
    }
}

impl Record for Patient {
    type Id = PatientId;
    type New = NewPatient;
    type Update = UpdatePatient;

    const KIND: &'static str = "patient";

    fn id(&self) -> PatientId {
        self.id
    }

    fn from_new(id: PatientId, new: NewPatient, now: NaiveDateTime) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, update: UpdatePatient, now: NaiveDateTime) {
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.email = update.email;
        self.phone = update.phone;
        self.date_of_birth = update.date_of_birth;
        self.gender = update.gender;
        self.status = update.status;
        self.updated_at = now;
    }

    fn matches_search(&self, term: &str) -> bool {
        let contact = [self.email.as_deref(), self.phone.as_deref()];
        contains_term(&self.full_name(), term)
            || contact.into_iter().flatten().any(|c| contains_term(c, term))
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str().eq_ignore_ascii_case(value.trim()),
            "gender" => self.gender.as_str().eq_ignore_ascii_case(value.trim()),
            _ => true,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Int(self.id.get().into())),
            "name" => Some(SortKey::text(&self.full_name())),
            "lastName" => Some(SortKey::text(&self.last_name)),
            "dateOfBirth" => Some(SortKey::Date(self.date_of_birth)),
            "createdAt" => Some(SortKey::DateTime(self.created_at)),
            _ => None,
        }
    }
}
