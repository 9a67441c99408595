use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::services::timezone_service::REFERENCE_OFFSET_HOURS;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    environment: String,
    version: String,
    reference_offset_hours: i32,
}

pub async fn health_check() -> impl Responder {
    let health = HealthStatus {
        status: "ok".to_string(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reference_offset_hours: REFERENCE_OFFSET_HOURS,
    };

    HttpResponse::Ok().json(health)
}
