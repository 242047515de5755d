//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::appointment::{Appointment, NewAppointment, UpdateAppointment};
use crate::domain::medicine::{Medicine, NewMedicine, UpdateMedicine};
use crate::domain::paginated::PaginatedResult;
use crate::domain::patient::{NewPatient, Patient, UpdatePatient};
use crate::domain::query::QueryState;
use crate::domain::types::{AppointmentId, MedicineId, PatientId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{RecordReader, RecordWriter};

mock! {
    pub PatientRepository {}

    impl RecordReader<Patient> for PatientRepository {
        fn get_by_id(&self, id: PatientId) -> RepositoryResult<Option<Patient>>;
        fn list(&self, query: &QueryState) -> RepositoryResult<PaginatedResult<Patient>>;
    }

    impl RecordWriter<Patient> for PatientRepository {
        fn create(&self, new: NewPatient) -> RepositoryResult<Patient>;
        fn update(&self, id: PatientId, update: UpdatePatient) -> RepositoryResult<Patient>;
        fn delete(&self, id: PatientId) -> RepositoryResult<()>;
    }
}

mock! {
    pub AppointmentRepository {}

    impl RecordReader<Appointment> for AppointmentRepository {
        fn get_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>>;
        fn list(&self, query: &QueryState) -> RepositoryResult<PaginatedResult<Appointment>>;
    }

    impl RecordWriter<Appointment> for AppointmentRepository {
        fn create(&self, new: NewAppointment) -> RepositoryResult<Appointment>;
        fn update(
            &self,
            id: AppointmentId,
            update: UpdateAppointment,
        ) -> RepositoryResult<Appointment>;
        fn delete(&self, id: AppointmentId) -> RepositoryResult<()>;
    }
}

mock! {
    pub MedicineRepository {}

    impl RecordReader<Medicine> for MedicineRepository {
        fn get_by_id(&self, id: MedicineId) -> RepositoryResult<Option<Medicine>>;
        fn list(&self, query: &QueryState) -> RepositoryResult<PaginatedResult<Medicine>>;
    }

    impl RecordWriter<Medicine> for MedicineRepository {
        fn create(&self, new: NewMedicine) -> RepositoryResult<Medicine>;
        fn update(&self, id: MedicineId, update: UpdateMedicine) -> RepositoryResult<Medicine>;
        fn delete(&self, id: MedicineId) -> RepositoryResult<()>;
    }
}
