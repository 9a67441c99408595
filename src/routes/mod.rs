pub mod health;
pub mod trip;

use actix_web::web;

/// Registers the trip API under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api").service(
            web::scope("/trips")
                .route("/generate", web::post().to(trip::generate))
                .route("/feed", web::get().to(trip::feed)),
        ),
    );
}
