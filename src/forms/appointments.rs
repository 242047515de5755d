use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{NewAppointment, UpdateAppointment};
use crate::domain::types::{AppointmentStatus, DoctorId, PatientId, non_empty};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for booking an appointment.
pub struct BookAppointmentForm {
    pub patient_id: i32,
    pub doctor_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

impl BookAppointmentForm {
    pub fn to_new_appointment(&self) -> Result<NewAppointment, FormError> {
        self.validate()?;

        let patient_id = PatientId::new(self.patient_id).map_err(|_| FormError::InvalidPatientId)?;
        let doctor_id = DoctorId::new(self.doctor_id).map_err(|_| FormError::InvalidDoctorId)?;
        let department = non_empty(self.department.as_str())?;
        let scheduled_at = self.scheduled_at;
        let reason = self.reason.clone();

        Ok(NewAppointment::new(patient_id, doctor_id, department, scheduled_at).reason(reason))
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for rescheduling an appointment or changing its status.
pub struct UpdateAppointmentForm {
    pub doctor_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    pub scheduled_at: NaiveDateTime,
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

impl UpdateAppointmentForm {
    pub fn to_update_appointment(&self) -> Result<UpdateAppointment, FormError> {
        self.validate()?;

        let doctor_id = DoctorId::new(self.doctor_id).map_err(|_| FormError::InvalidDoctorId)?;
        let status: AppointmentStatus = self.status.parse()?;

        Ok(UpdateAppointment {
            doctor_id,
            department: non_empty(self.department.as_str())?,
            scheduled_at: self.scheduled_at,
            status,
            reason: self
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}
