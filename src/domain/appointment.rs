use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AppointmentId, AppointmentStatus, DoctorId, PatientId};
use crate::domain::{Record, SortKey, contains_term, id_matches, parse_date_bound};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub department: String,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewAppointment {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub department: String,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl NewAppointment {
    #[must_use]
    pub fn new(
        patient_id: PatientId,
        doctor_id: DoctorId,
        department: impl Into<String>,
        scheduled_at: NaiveDateTime,
    ) -> Self {
        Self {
            patient_id,
            doctor_id,
            department: department.into().trim().to_string(),
            scheduled_at,
            status: AppointmentStatus::Scheduled,
            reason: None,
        }
    }

    #[must_use]
    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }
}

/// Reschedule or change the state of an appointment.
#[derive(Clone, Debug)]
pub struct UpdateAppointment {
    pub doctor_id: DoctorId,
    pub department: String,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl Record for Appointment {
    type Id = AppointmentId;
    type New = NewAppointment;
    type Update = UpdateAppointment;

    const KIND: &'static str = "appointment";

    fn id(&self) -> AppointmentId {
        self.id
    }

    fn from_new(id: AppointmentId, new: NewAppointment, now: NaiveDateTime) -> Self {
        Self {
            id,
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            department: new.department,
            scheduled_at: new.scheduled_at,
            status: new.status,
            reason: new.reason,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, update: UpdateAppointment, now: NaiveDateTime) {
        self.doctor_id = update.doctor_id;
        self.department = update.department;
        self.scheduled_at = update.scheduled_at;
        self.status = update.status;
        self.reason = update.reason;
        self.updated_at = now;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_term(&self.department, term)
            || self
                .reason
                .as_deref()
                .is_some_and(|r| contains_term(r, term))
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        let day = self.scheduled_at.date();
        match key {
            "status" => self.status.as_str().eq_ignore_ascii_case(value.trim()),
            "doctorId" => id_matches(self.doctor_id.get(), value),
            "patientId" => id_matches(self.patient_id.get(), value),
            "department" => self.department.eq_ignore_ascii_case(value.trim()),
            // Inclusive calendar days; a malformed bound does not filter.
            "dateFrom" => parse_date_bound(value).is_none_or(|from| day >= from),
            "dateTo" => parse_date_bound(value).is_none_or(|to| day <= to),
            _ => true,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Int(self.id.get().into())),
            "scheduledAt" => Some(SortKey::DateTime(self.scheduled_at)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "department" => Some(SortKey::text(&self.department)),
            _ => None,
        }
    }
}
