#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pushkind_hospital::domain::appointment::{Appointment, NewAppointment};
use pushkind_hospital::domain::medicine::{Medicine, NewMedicine};
use pushkind_hospital::domain::patient::{NewPatient, Patient};
use pushkind_hospital::domain::types::{AppointmentStatus, DoctorId, Gender, PatientStatus};
use pushkind_hospital::repository::{InMemoryRepository, RecordWriter};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 0, 0).unwrap()
}

pub fn add_patient(
    repo: &InMemoryRepository,
    first: &str,
    last: &str,
    status: PatientStatus,
) -> Patient {
    RecordWriter::<Patient>::create(
        repo,
        NewPatient::new(first, last, date(1980, 1, 1), Gender::Other)
            .email(Some(format!("{}@example.com", first.to_lowercase())))
            .status(status),
    )
    .unwrap()
}

pub fn add_appointment(
    repo: &InMemoryRepository,
    patient: &Patient,
    doctor: i32,
    department: &str,
    scheduled_at: NaiveDateTime,
    status: AppointmentStatus,
) -> Appointment {
    RecordWriter::<Appointment>::create(
        repo,
        NewAppointment::new(
            patient.id,
            DoctorId::new(doctor).unwrap(),
            department,
            scheduled_at,
        )
        .status(status),
    )
    .unwrap()
}

pub fn add_medicine(repo: &InMemoryRepository, name: &str, category: &str, stock: u32) -> Medicine {
    RecordWriter::<Medicine>::create(repo, NewMedicine::new(name, None, category, 100, stock))
        .unwrap()
}

/// Twelve patients named `Patient01`..`Patient12`, every third one inactive.
pub fn patients_fixture() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    for n in 1..=12 {
        let status = if n % 3 == 0 {
            PatientStatus::Inactive
        } else {
            PatientStatus::Active
        };
        add_patient(&repo, &format!("Patient{n:02}"), "Doe", status);
    }
    repo
}
