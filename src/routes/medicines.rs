use actix_web::{HttpResponse, web};

use crate::forms::medicines::MedicineForm;
use crate::repository::InMemoryRepository;
use crate::routes::service_error_response;
use crate::services::medicines as medicine_service;

pub async fn create_medicine(
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<MedicineForm>,
) -> HttpResponse {
    match medicine_service::create_medicine(repo.get_ref(), &form) {
        Ok(medicine) => HttpResponse::Created().json(medicine),
        Err(err) => service_error_response(err),
    }
}

pub async fn update_medicine(
    path: web::Path<i32>,
    repo: web::Data<InMemoryRepository>,
    web::Json(form): web::Json<MedicineForm>,
) -> HttpResponse {
    match medicine_service::update_medicine(repo.get_ref(), path.into_inner(), &form) {
        Ok(medicine) => HttpResponse::Ok().json(medicine),
        Err(err) => service_error_response(err),
    }
}
