use actix_web::{HttpResponse, web};

use crate::forms::appointments::{BookAppointmentForm, UpdateAppointmentForm};
use crate::repository::InMemoryRepository;
use crate::routes::service_error_response;
use crate::services::appointments as appointment_service;

pub async fn book_appointment(
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<BookAppointmentForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    match appointment_service::book_appointment(repo, repo, &form) {
        Ok(appointment) => HttpResponse::Created().json(appointment),
        Err(err) => service_error_response(err),
    }
}

pub async fn update_appointment(
    path: web::Path<i32>,
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<UpdateAppointmentForm>,
) -> HttpResponse {
    match appointment_service::update_appointment(repo.get_ref(), path.into_inner(), &form) {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(err) => service_error_response(err),
    }
}
