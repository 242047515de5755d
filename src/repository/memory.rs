//! In-memory backend standing in for the hospital REST API.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::domain::Record;
use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::medicine::{Medicine, NewMedicine};
use crate::domain::paginated::PaginatedResult;
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::query::{QueryState, SortOrder};
use crate::domain::types::{AppointmentStatus, DoctorId, Gender, PatientStatus};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{RecordReader, RecordWriter};

/// Rows of one record kind, keyed by raw id.
#[derive(Debug)]
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    fn get(&self, id: T::Id) -> Option<T> {
        let key: i32 = id.into();
        self.rows.get(&key).cloned()
    }

    fn list(&self, query: &QueryState) -> PaginatedResult<T> {
        let term = query.search_term().map(str::to_lowercase);

        let mut matched: Vec<&T> = self
            .rows
            .values()
            .filter(|row| term.as_deref().is_none_or(|term| row.matches_search(term)))
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(key, value)| row.matches_filter(key, value))
            })
            .collect();

        if let Some((field, order)) = query.sort() {
            if matched.first().is_some_and(|row| row.sort_key(field).is_none()) {
                log::debug!("Unknown {} sort field `{field}`, keeping id order", T::KIND);
            } else {
                // Stable sort: equal keys stay in id order in both directions.
                matched.sort_by(|a, b| {
                    let ordering = a.sort_key(field).cmp(&b.sort_key(field));
                    match order {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                });
            }
        }

        let total = matched.len();
        let content = matched
            .into_iter()
            .skip(query.offset())
            .take(query.limit)
            .cloned()
            .collect();

        PaginatedResult::new(content, query.page, query.limit, total)
    }

    fn insert(&mut self, new: T::New, now: NaiveDateTime) -> RepositoryResult<T> {
        let raw_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Unexpected(format!("{} ids exhausted", T::KIND)))?;
        let record = T::from_new(T::Id::try_from(raw_id)?, new, now);
        self.last_id = raw_id;
        self.rows.insert(raw_id, record.clone());
        Ok(record)
    }

    fn update(&mut self, id: T::Id, update: T::Update, now: NaiveDateTime) -> RepositoryResult<T> {
        let key: i32 = id.into();
        let row = self.rows.get_mut(&key).ok_or(RepositoryError::NotFound)?;
        row.apply_update(update, now);
        Ok(row.clone())
    }

    fn delete(&mut self, id: T::Id) -> RepositoryResult<()> {
        let key: i32 = id.into();
        self.rows
            .remove(&key)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Thread-safe in-memory store of every record kind.
///
/// Clones share the same tables, so one instance can be handed to each
/// HTTP worker.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    patients: Arc<RwLock<Table<Patient>>>,
    appointments: Arc<RwLock<Table<Appointment>>>,
    medicines: Arc<RwLock<Table<Medicine>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

macro_rules! impl_memory_repository {
    ($record:ty, $table:ident) => {
        impl RecordReader<$record> for InMemoryRepository {
            fn get_by_id(
                &self,
                id: <$record as Record>::Id,
            ) -> RepositoryResult<Option<$record>> {
                Ok(self.$table.read()?.get(id))
            }

            fn list(&self, query: &QueryState) -> RepositoryResult<PaginatedResult<$record>> {
                log::debug!("Listing {} rows: {query:?}", <$record as Record>::KIND);
                Ok(self.$table.read()?.list(query))
            }
        }

        impl RecordWriter<$record> for InMemoryRepository {
            fn create(&self, new: <$record as Record>::New) -> RepositoryResult<$record> {
                self.$table.write()?.insert(new, now())
            }

            fn update(
                &self,
                id: <$record as Record>::Id,
                update: <$record as Record>::Update,
            ) -> RepositoryResult<$record> {
                self.$table.write()?.update(id, update, now())
            }

            fn delete(&self, id: <$record as Record>::Id) -> RepositoryResult<()> {
                self.$table.write()?.delete(id)
            }
        }
    };
}

impl_memory_repository!(Patient, patients);
impl_memory_repository!(Appointment, appointments);
impl_memory_repository!(Medicine, medicines);

/// Doctor ids of the demo data with their department.
const DEMO_DOCTORS: [(i32, &str); 3] = [(1, "Cardiology"), (2, "Neurology"), (3, "Orthopedics")];

fn seed_date(value: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| RepositoryError::Unexpected(format!("bad seed date {value}: {err}")))
}

fn seed_time(value: &str) -> RepositoryResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .map_err(|err| RepositoryError::Unexpected(format!("bad seed time {value}: {err}")))
}

/// Fills the repository with a small demo data set.
pub fn seed_demo_data(repo: &InMemoryRepository) -> RepositoryResult<()> {
    let patients = [
        ("Olivia", "Bennett", "1985-04-12", Gender::Female, true),
        ("Marcus", "Reid", "1972-11-03", Gender::Male, true),
        ("Sofia", "Alvarez", "1999-07-21", Gender::Female, false),
        ("Daniel", "Okafor", "1964-01-30", Gender::Male, true),
        ("Priya", "Nair", "2001-09-08", Gender::Other, true),
    ];
    let mut patient_ids = Vec::new();
    for (first, last, born, gender, active) in patients {
        let status = if active {
            PatientStatus::Active
        } else {
            PatientStatus::Inactive
        };
        let email = format!("{first}.{last}@example.com").to_lowercase();
        let new_patient = NewPatient::new(first, last, seed_date(born)?, gender)
            .email(Some(email))
            .status(status);
        let patient = RecordWriter::<Patient>::create(repo, new_patient)?;
        patient_ids.push(patient.id);
    }

    // (patient, doctor, time, status)
    let slots = [
        (0, 0, "2026-10-19 09:00", AppointmentStatus::Scheduled),
        (1, 1, "2026-10-19 11:00", AppointmentStatus::Confirmed),
        (2, 0, "2026-10-20 14:00", AppointmentStatus::Cancelled),
        (3, 2, "2026-10-21 10:00", AppointmentStatus::Completed),
        (4, 1, "2026-10-22 16:00", AppointmentStatus::NoShow),
    ];
    let reasons = [
        "Annual check-up",
        "Migraine review",
        "ECG",
        "Knee pain",
        "Follow-up",
    ];
    for ((patient, doctor, at, status), reason) in slots.into_iter().zip(reasons) {
        let (doctor, department) = DEMO_DOCTORS[doctor];
        let patient_id = patient_ids[patient];
        let doctor_id = DoctorId::try_from(doctor)?;
        let scheduled_at = seed_time(at)?;
        let new_appointment = NewAppointment::new(patient_id, doctor_id, department, scheduled_at)
            .status(status)
            .reason(Some(reason.to_string()));
        RecordWriter::<Appointment>::create(repo, new_appointment)?;
    }

    let medicines = [
        ("Amoxicillin 500mg", "Sandoz", "Antibiotic", 1250, 120),
        ("Ibuprofen 400mg", "Bayer", "Analgesic", 480, 300),
        ("Metformin 850mg", "Teva", "Antidiabetic", 760, 0),
        ("Atorvastatin 20mg", "Pfizer", "Cardiovascular", 1890, 45),
    ];
    for (name, manufacturer, category, price, stock) in medicines {
        let manufacturer = Some(manufacturer.to_string());
        let new_medicine = NewMedicine::new(name, manufacturer, category, price, stock);
        RecordWriter::<Medicine>::create(repo, new_medicine)?;
    }

    log::info!("Seeded demo data");
    Ok(())
}
