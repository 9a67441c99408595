use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_synth_api::routes;
use trip_synth_api::services::trip_generation_service::{GenerationConfig, TripGenerator};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let config = GenerationConfig::from_env();
    log::info!(
        "Trip generation config: home airport {}, start horizon {} days, max length {} days",
        config.planner.flights.home_airport,
        config.start_horizon_days,
        config.max_trip_length_days
    );
    let generator = web::Data::new(TripGenerator::with_config(config));

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(generator.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
