use pushkind_hospital::domain::appointment::{Appointment, UpdateAppointment};
use pushkind_hospital::domain::medicine::Medicine;
use pushkind_hospital::domain::patient::Patient;
use pushkind_hospital::domain::query::{QueryState, SortOrder};
use pushkind_hospital::domain::types::{AppointmentStatus, DoctorId, PatientId, PatientStatus};
use pushkind_hospital::repository::errors::RepositoryError;
use pushkind_hospital::repository::memory::seed_demo_data;
use pushkind_hospital::repository::{InMemoryRepository, RecordReader, RecordWriter};

mod common;

fn list_patients(repo: &InMemoryRepository, query: &QueryState) -> Vec<String> {
    RecordReader::<Patient>::list(repo, query)
        .unwrap()
        .content
        .into_iter()
        .map(|p| p.first_name)
        .collect()
}

#[test]
fn test_patient_repository_crud() {
    let repo = InMemoryRepository::new();
    let alice = common::add_patient(&repo, "Alice", "Moss", PatientStatus::Active);
    let bob = common::add_patient(&repo, "Bob", "Stone", PatientStatus::Active);
    assert_eq!(alice.id.get(), 1);
    assert_eq!(bob.id.get(), 2);

    let found = RecordReader::<Patient>::get_by_id(&repo, bob.id).unwrap();
    assert_eq!(found.map(|p| p.last_name), Some("Stone".to_string()));

    let mut updates = pushkind_hospital::domain::patient::UpdatePatient {
        first_name: "Robert".into(),
        last_name: bob.last_name.clone(),
        email: bob.email.clone(),
        phone: None,
        date_of_birth: bob.date_of_birth,
        gender: bob.gender,
        status: PatientStatus::Inactive,
    };
    let updated = RecordWriter::<Patient>::update(&repo, bob.id, updates.clone()).unwrap();
    assert_eq!(updated.first_name, "Robert");
    assert_eq!(updated.status, PatientStatus::Inactive);
    assert!(updated.updated_at >= updated.created_at);

    RecordWriter::<Patient>::delete(&repo, alice.id).unwrap();
    assert!(RecordReader::<Patient>::get_by_id(&repo, alice.id).unwrap().is_none());
    assert!(matches!(
        RecordWriter::<Patient>::delete(&repo, alice.id),
        Err(RepositoryError::NotFound)
    ));

    updates.first_name = "Ghost".into();
    assert!(matches!(
        RecordWriter::<Patient>::update(&repo, PatientId::new(99).unwrap(), updates),
        Err(RepositoryError::NotFound)
    ));

    let page = RecordReader::<Patient>::list(&repo, &QueryState::new(10)).unwrap();
    assert_eq!(page.total_elements, 1);

    // Ids are never reused after a delete.
    let carol = common::add_patient(&repo, "Carol", "Lane", PatientStatus::Active);
    assert_eq!(carol.id.get(), 3);
}

#[test]
fn test_list_pages_are_one_indexed() {
    let repo = common::patients_fixture();

    let first = RecordReader::<Patient>::list(&repo, &QueryState::new(5)).unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_elements, 12);
    assert_eq!(first.content.first().unwrap().first_name, "Patient01");

    let last = RecordReader::<Patient>::list(&repo, &QueryState::new(5).with_page(3)).unwrap();
    assert_eq!(last.content.len(), 2);
    assert_eq!(last.content[0].first_name, "Patient11");

    let beyond = RecordReader::<Patient>::list(&repo, &QueryState::new(5).with_page(9)).unwrap();
    assert!(beyond.is_empty());
    assert_eq!(beyond.total_elements, 12);
}

#[test]
fn test_search_filter_and_sort_combine() {
    let repo = common::patients_fixture();

    let inactive = QueryState::new(20).with_filter("status", "inactive");
    assert_eq!(
        list_patients(&repo, &inactive),
        vec!["Patient03", "Patient06", "Patient09", "Patient12"]
    );

    let sorted = inactive.clone().with_sort("name", SortOrder::Desc);
    assert_eq!(
        list_patients(&repo, &sorted),
        vec!["Patient12", "Patient09", "Patient06", "Patient03"]
    );

    let searched = QueryState::new(20).with_search("  PATIENT1 ");
    assert_eq!(
        list_patients(&repo, &searched),
        vec!["Patient10", "Patient11", "Patient12"]
    );

    let by_email = QueryState::new(20).with_search("patient07@");
    assert_eq!(list_patients(&repo, &by_email), vec!["Patient07"]);
}

#[test]
fn test_unknown_sort_and_filter_keys_are_ignored() {
    let repo = common::patients_fixture();
    let query = QueryState::new(3)
        .with_sort("bloodType", SortOrder::Desc)
        .with_filter("ward", "B");
    assert_eq!(
        list_patients(&repo, &query),
        vec!["Patient01", "Patient02", "Patient03"]
    );
}

#[test]
fn test_appointment_filters() {
    let repo = InMemoryRepository::new();
    let patient = common::add_patient(&repo, "Ann", "Vale", PatientStatus::Active);
    let first = common::add_appointment(
        &repo,
        &patient,
        1,
        "Cardiology",
        common::at(2026, 10, 19, 9),
        AppointmentStatus::Scheduled,
    );
    common::add_appointment(
        &repo,
        &patient,
        2,
        "Neurology",
        common::at(2026, 10, 20, 9),
        AppointmentStatus::Cancelled,
    );
    common::add_appointment(
        &repo,
        &patient,
        1,
        "Cardiology",
        common::at(2026, 10, 23, 15),
        AppointmentStatus::Scheduled,
    );

    let list = |query: QueryState| -> Vec<i32> {
        RecordReader::<Appointment>::list(&repo, &query)
            .unwrap()
            .content
            .into_iter()
            .map(|a| a.id.get())
            .collect()
    };

    assert_eq!(
        list(QueryState::new(10).with_filter("doctorId", "1")),
        vec![1, 3]
    );
    assert_eq!(
        list(QueryState::new(10).with_filter("status", "CANCELLED")),
        vec![2]
    );
    assert_eq!(
        list(
            QueryState::new(10)
                .with_filter("dateFrom", "2026-10-20")
                .with_filter("dateTo", "2026-10-22")
        ),
        vec![2]
    );
    assert_eq!(
        list(QueryState::new(10).with_sort("scheduledAt", SortOrder::Desc)),
        vec![3, 2, 1]
    );

    let rescheduled = RecordWriter::<Appointment>::update(
        &repo,
        first.id,
        UpdateAppointment {
            doctor_id: DoctorId::new(3).unwrap(),
            department: "Cardiology".into(),
            scheduled_at: common::at(2026, 10, 30, 10),
            status: AppointmentStatus::Confirmed,
            reason: None,
        },
    )
    .unwrap();
    assert_eq!(rescheduled.status, AppointmentStatus::Confirmed);
    assert_eq!(
        list(QueryState::new(10).with_filter("doctorId", "1")),
        vec![3]
    );
}

#[test]
fn test_medicine_stock_filter() {
    let repo = InMemoryRepository::new();
    common::add_medicine(&repo, "Aspirin", "Analgesic", 10);
    common::add_medicine(&repo, "Insulin", "Antidiabetic", 0);

    let out_of_stock =
        RecordReader::<Medicine>::list(&repo, &QueryState::new(10).with_filter("inStock", "false"))
            .unwrap();
    assert_eq!(out_of_stock.content.len(), 1);
    assert_eq!(out_of_stock.content[0].name, "Insulin");
}

#[test]
fn test_demo_seed() {
    let repo = InMemoryRepository::new();
    seed_demo_data(&repo).unwrap();

    let patients = RecordReader::<Patient>::list(&repo, &QueryState::new(10)).unwrap();
    let appointments = RecordReader::<Appointment>::list(&repo, &QueryState::new(10)).unwrap();
    let medicines = RecordReader::<Medicine>::list(&repo, &QueryState::new(10)).unwrap();
    assert_eq!(patients.total_elements, 5);
    assert_eq!(appointments.total_elements, 5);
    assert_eq!(medicines.total_elements, 4);
}
