use crate::domain::Record;
use crate::domain::patient::Patient;
use crate::domain::types::PatientId;
use crate::forms::patients::PatientForm;
use crate::repository::RecordWriter;
use crate::services::{ServiceError, ServiceResult};

/// Validates the form and registers a new patient.
pub fn create_patient<R>(repo: &R, form: &PatientForm) -> ServiceResult<Patient>
where
    R: RecordWriter<Patient> + ?Sized,
{
    let new_patient = form.to_new_patient().map_err(|err| {
        log::error!("Failed to validate patient form: {err}");
        ServiceError::from(err)
    })?;

    let patient = repo.create(new_patient).map_err(|err| {
        log::error!("Failed to add a patient: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Registered {} {}", Patient::KIND, patient.id);
    Ok(patient)
}

/// Validates the form and replaces the editable fields of a patient.
pub fn update_patient<R>(repo: &R, id: i32, form: &PatientForm) -> ServiceResult<Patient>
where
    R: RecordWriter<Patient> + ?Sized,
{
    let id = PatientId::new(id)?;
    let updates = form.to_update_patient()?;

    repo.update(id, updates).map_err(ServiceError::from)
}
