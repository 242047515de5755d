use crate::domain::medicine::Medicine;
use crate::domain::types::MedicineId;
use crate::forms::medicines::MedicineForm;
use crate::repository::RecordWriter;
use crate::services::{ServiceError, ServiceResult};

/// Adds a medicine to the catalogue.
pub fn create_medicine<R>(repo: &R, form: &MedicineForm) -> ServiceResult<Medicine>
where
    R: RecordWriter<Medicine> + ?Sized,
{
    let new_medicine = form.to_new_medicine().map_err(|err| {
        log::error!("Failed to validate medicine form: {err}");
        ServiceError::from(err)
    })?;

    repo.create(new_medicine).map_err(|err| {
        log::error!("Failed to add a medicine: {err}");
        ServiceError::from(err)
    })
}

pub fn update_medicine<R>(repo: &R, id: i32, form: &MedicineForm) -> ServiceResult<Medicine>
where
    R: RecordWriter<Medicine> + ?Sized,
{
    let id = MedicineId::new(id)?;
    let updates = form.to_update_medicine()?;

    repo.update(id, updates).map_err(ServiceError::from)
}
