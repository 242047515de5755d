//! JSON API over the in-memory backend.
//!
//! Every resource exposes the same list contract:
//! `GET /api/v1/{resource}?page=..&size=..&search=..&sort=field,order&key=value`
//! answered with a `PaginatedResult`.

use std::fmt::Display;

use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::controller::params::parse_query_string;
use crate::domain::Record;
use crate::domain::appointment::Appointment;
use crate::domain::medicine::Medicine;
use crate::domain::patient::Patient;
use crate::domain::query::QueryState;
use crate::models::config::ServerConfig;
use crate::repository::{InMemoryRepository, RecordReader, RecordWriter};
use crate::services::{ServiceError, records};

pub mod appointments;
pub mod medicines;
pub mod patients;

/// Registers every API resource.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .service(
                web::resource("/patients")
                    .route(web::get().to(list_records::<Patient>))
                    .route(web::post().to(patients::create_patient)),
            )
            .service(
                web::resource("/patients/{id}")
                    .route(web::get().to(get_record::<Patient>))
                    .route(web::put().to(patients::update_patient))
                    .route(web::delete().to(delete_record::<Patient>)),
            )
            .service(
                web::resource("/appointments")
                    .route(web::get().to(list_records::<Appointment>))
                    .route(web::post().to(appointments::book_appointment)),
            )
            .service(
                web::resource("/appointments/{id}")
                    .route(web::get().to(get_record::<Appointment>))
                    .route(web::put().to(appointments::update_appointment))
                    .route(web::delete().to(delete_record::<Appointment>)),
            )
            .service(
                web::resource("/medicines")
                    .route(web::get().to(list_records::<Medicine>))
                    .route(web::post().to(medicines::create_medicine)),
            )
            .service(
                web::resource("/medicines/{id}")
                    .route(web::get().to(get_record::<Medicine>))
                    .route(web::put().to(medicines::update_medicine))
                    .route(web::delete().to(delete_record::<Medicine>)),
            ),
    );
}

fn bad_request(err: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
}

/// Answers unparsable JSON bodies with the same error body as the services.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body: {err}");
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

/// Answers non-numeric `{id}` segments with a JSON 400.
fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected path `{}`: {err}", req.path());
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

/// Maps a service failure onto an HTTP status with a JSON body.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Internal(_) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Reads the list query of a request, capping the page size.
fn list_query(req: &HttpRequest, config: &ServerConfig) -> Result<QueryState, HttpResponse> {
    let mut query = match parse_query_string(req.query_string(), config.default_page_size) {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected list query `{}`: {err}", req.query_string());
            return Err(bad_request(err));
        }
    };

    let max = config.max_page_size;
    if query.limit > max {
        log::warn!("Page size {} capped to {max}", query.limit);
        query.limit = max;
    }

    Ok(query)
}

pub async fn list_records<T>(
    req: HttpRequest,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse
where
    T: Record + Serialize,
    InMemoryRepository: RecordReader<T>,
{
    let query = match list_query(&req, &server_config) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match records::list_records::<T, _>(repo.get_ref(), &query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err),
    }
}

pub async fn get_record<T>(
    path: web::Path<i32>,
    repo: web::Data<InMemoryRepository>,
) -> HttpResponse
where
    T: Record + Serialize,
    InMemoryRepository: RecordReader<T>,
{
    match records::get_record::<T, _>(repo.get_ref(), path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => service_error_response(err),
    }
}

pub async fn delete_record<T>(
    path: web::Path<i32>,
    repo: web::Data<InMemoryRepository>,
) -> HttpResponse
where
    T: Record,
    InMemoryRepository: RecordWriter<T>,
{
    match records::delete_record::<T, _>(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
