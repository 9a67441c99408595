use actix_web::{web, HttpResponse};
use chrono::Datelike;
use serde::Deserialize;

use crate::error::TripRequestError;
use crate::models::trip::TripDescriptor;
use crate::services::{timezone_service, trip_generation_service::TripGenerator};

pub const DEFAULT_FEED_COUNT: usize = 10;
pub const MAX_FEED_COUNT: usize = 50;
pub const MAX_FEED_OFFSET: usize = 1_000_000;

#[derive(Debug, Deserialize)]
pub struct GenerateTripRequest {
    #[serde(flatten)]
    pub descriptor: TripDescriptor,
    pub seed: Option<u64>,
}

impl GenerateTripRequest {
    pub fn validate(&self, max_trip_length_days: u32) -> Result<(), TripRequestError> {
        if self.descriptor.destination_city.trim().is_empty() {
            return Err(TripRequestError::EmptyDestination);
        }
        let days = self.descriptor.trip_length_days;
        if days == 0 || days > max_trip_length_days {
            return Err(TripRequestError::TripLengthOutOfRange {
                got: days,
                max: max_trip_length_days,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub count: Option<usize>,
    pub start_offset: Option<usize>,
    pub seed: Option<u64>,
}

/*
    /api/trips/generate
*/
pub async fn generate(
    generator: web::Data<TripGenerator>,
    input: web::Json<GenerateTripRequest>,
) -> Result<HttpResponse, TripRequestError> {
    let request = input.into_inner();
    request.validate(generator.config().max_trip_length_days)?;

    let seed = request.seed.unwrap_or_else(rand::random);
    let envelope = generator.generate_seeded(&request.descriptor, timezone_service::reference_today(), seed);

    Ok(HttpResponse::Ok().json(envelope))
}

/*
    /api/trips/feed
*/
pub async fn feed(
    generator: web::Data<TripGenerator>,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, TripRequestError> {
    let count = query.count.unwrap_or(DEFAULT_FEED_COUNT);
    if count == 0 || count > MAX_FEED_COUNT {
        return Err(TripRequestError::FeedCountOutOfRange {
            got: count,
            max: MAX_FEED_COUNT,
        });
    }

    let today = timezone_service::reference_today();
    // Without an explicit seed the feed stays stable for the whole day.
    let seed = query.seed.unwrap_or(today.num_days_from_ce() as u64);
    let start_offset = query.start_offset.unwrap_or(0);
    if start_offset > MAX_FEED_OFFSET {
        return Err(TripRequestError::FeedOffsetOutOfRange {
            got: start_offset,
            max: MAX_FEED_OFFSET,
        });
    }

    let generator = generator.into_inner();
    let trips = web::block(move || generator.generate_batch(count, start_offset, seed, today)).await;

    match trips {
        Ok(trips) => Ok(HttpResponse::Ok().json(trips)),
        Err(err) => {
            log::error!("Feed generation was cancelled: {}", err);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Failed to generate feed" })))
        }
    }
}
