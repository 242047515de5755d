use actix_web::{HttpResponse, web};

use crate::forms::patients::PatientForm;
use crate::repository::InMemoryRepository;
use crate::routes::service_error_response;
use crate::services::patients as patient_service;

pub async fn create_patient(
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<PatientForm>,
) -> HttpResponse {
    match patient_service::create_patient(repo.get_ref(), &form) {
        Ok(patient) => HttpResponse::Created().json(patient),
        Err(err) => service_error_response(err),
    }
}

pub async fn update_patient(
    path: web::Path<i32>,
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<PatientForm>,
) -> HttpResponse {
    match patient_service::update_patient(repo.get_ref(), path.into_inner(), &form) {
        Ok(patient) => HttpResponse::Ok().json(patient),
        Err(err) => service_error_response(err),
    }
}
