use crate::domain::appointment::Appointment;
use crate::domain::patient::Patient;
use crate::domain::types::AppointmentId;
use crate::forms::appointments::{BookAppointmentForm, UpdateAppointmentForm};
use crate::repository::{RecordReader, RecordWriter};
use crate::services::{ServiceError, ServiceResult};

/// Books an appointment for an existing patient.
pub fn book_appointment<P, A>(
    patients: &P,
    appointments: &A,
    form: &BookAppointmentForm,
) -> ServiceResult<Appointment>
where
    P: RecordReader<Patient> + ?Sized,
    A: RecordWriter<Appointment> + ?Sized,
{
    let new_appointment = form.to_new_appointment().map_err(|err| {
        log::error!("Failed to validate appointment form: {err}");
        ServiceError::from(err)
    })?;

    if patients.get_by_id(new_appointment.patient_id)?.is_none() {
        return Err(ServiceError::Form(format!(
            "patient {} does not exist",
            new_appointment.patient_id
        )));
    }

    let appointment = appointments.create(new_appointment).map_err(|err| {
        log::error!("Failed to book an appointment: {err}");
        ServiceError::from(err)
    })?;

    log::info!(
        "Booked appointment {} for patient {}",
        appointment.id,
        appointment.patient_id
    );
    Ok(appointment)
}

/// Reschedules an appointment or moves it to another status.
pub fn update_appointment<A>(
    appointments: &A,
    id: i32,
    form: &UpdateAppointmentForm,
) -> ServiceResult<Appointment>
where
    A: RecordWriter<Appointment> + ?Sized,
{
    let id = AppointmentId::new(id)?;
    let updates = form.to_update_appointment()?;

    appointments.update(id, updates).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::mock::{MockAppointmentRepository, MockPatientRepository};

    fn form() -> BookAppointmentForm {
        serde_json::from_value(json!({
            "patientId": 3,
            "doctorId": 1,
            "department": "Cardiology",
            "scheduledAt": "2026-11-02T10:30:00"
        }))
        .unwrap()
    }

    #[test]
    fn unknown_patient_is_rejected() {
        let mut patients = MockPatientRepository::new();
        patients.expect_get_by_id().returning(|_| Ok(None));
        let appointments = MockAppointmentRepository::new();

        let result = book_appointment(&patients, &appointments, &form());
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn invalid_status_update_is_a_form_error() {
        let appointments = MockAppointmentRepository::new();
        let form: UpdateAppointmentForm = serde_json::from_value(json!({
            "doctorId": 1,
            "department": "Cardiology",
            "scheduledAt": "2026-11-02T10:30:00",
            "status": "all"
        }))
        .unwrap();

        let result = update_appointment(&appointments, 1, &form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
