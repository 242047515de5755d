//! Operations shared by every record kind.

use crate::domain::Record;
use crate::domain::paginated::PaginatedResult;
use crate::domain::query::QueryState;
use crate::repository::{RecordReader, RecordWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the page of records described by `query`.
pub fn list_records<T, R>(repo: &R, query: &QueryState) -> ServiceResult<PaginatedResult<T>>
where
    T: Record,
    R: RecordReader<T> + ?Sized,
{
    repo.list(query).map_err(|err| {
        log::error!("Failed to list {} records: {err}", T::KIND);
        ServiceError::from(err)
    })
}

/// Fetches one record by its raw identifier.
pub fn get_record<T, R>(repo: &R, id: i32) -> ServiceResult<T>
where
    T: Record,
    R: RecordReader<T> + ?Sized,
{
    let id = T::Id::try_from(id)?;
    repo.get_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Deletes one record by its raw identifier.
pub fn delete_record<T, R>(repo: &R, id: i32) -> ServiceResult<()>
where
    T: Record,
    R: RecordWriter<T> + ?Sized,
{
    let id = T::Id::try_from(id)?;
    repo.delete(id).map_err(ServiceError::from)?;
    log::info!("Deleted {} {id}", T::KIND);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::Patient;
    use crate::domain::types::PatientId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockPatientRepository;

    #[test]
    fn list_passes_query_through() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list()
            .withf(|query| query.page == 2 && query.filter("status") == Some("ACTIVE"))
            .returning(|query| Ok(PaginatedResult::new(vec![], query.page, query.limit, 12)));

        let query = QueryState::new(10)
            .with_page(2)
            .with_filter("status", "ACTIVE");
        let page: PaginatedResult<Patient> = list_records(&repo, &query).unwrap();
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut repo = MockPatientRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let result: ServiceResult<Patient> = get_record(&repo, 5);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn non_positive_id_is_rejected_before_the_repository() {
        let repo = MockPatientRepository::new();
        let result: ServiceResult<Patient> = get_record(&repo, 0);
        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn delete_maps_not_found() {
        let mut repo = MockPatientRepository::new();
        repo.expect_delete()
            .withf(|id| *id == PatientId::new(9).unwrap())
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_record::<Patient, _>(&repo, 9);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
