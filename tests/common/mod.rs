#![allow(dead_code)]

use std::collections::HashSet;

use actix_web::{web, App};
use chrono::NaiveDate;

use trip_synth_api::models::{
    itinerary_item::{ItemDetail, ItemKind, ItineraryItem, Meal},
    trip::{DayPlan, TripEnvelope},
};
use trip_synth_api::routes;
use trip_synth_api::services::{
    timezone_service,
    trip_generation_service::{GenerationConfig, TripGenerator},
};

pub struct TestApp {
    pub generator: web::Data<TripGenerator>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(GenerationConfig::default())
    }

    pub fn with_config(config: GenerationConfig) -> Self {
        Self {
            generator: web::Data::new(TripGenerator::with_config(config)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.generator.clone())
            .configure(routes::configure)
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Generator with both transit probabilities pinned to `probability`.
pub fn generator_with_transit(probability: f64) -> TripGenerator {
    let mut config = GenerationConfig::default();
    config.planner.flights.long_haul_transit_probability = probability;
    config.planner.flights.short_haul_transit_probability = probability;
    TripGenerator::with_config(config)
}

pub fn kinds(plan: &DayPlan) -> Vec<ItemKind> {
    plan.items.iter().map(|item| item.kind()).collect()
}

pub fn assert_day_sorted(plan: &DayPlan) {
    for pair in plan.items.windows(2) {
        assert!(
            pair[0].clock_minutes() <= pair[1].clock_minutes(),
            "day {} not sorted: {} after {}",
            plan.day_index,
            pair[1].name.en,
            pair[0].name.en
        );
        assert!(
            pair[0].instant_ms <= pair[1].instant_ms,
            "day {} instants out of order: {} after {}",
            plan.day_index,
            pair[1].name.en,
            pair[0].name.en
        );
    }
}

/// Activities and restaurant meals never repeat a name within a trip.
/// Breakfast is always taken at the hotel and is exempt.
pub fn assert_unique_venue_names(trip: &TripEnvelope) {
    let mut seen = HashSet::new();
    let venues = trip.items().filter(|item| match &item.detail {
        ItemDetail::Activity(_) => true,
        ItemDetail::Food(food) => food.meal != Meal::Breakfast,
        _ => false,
    });
    for item in venues {
        assert!(seen.insert(item.name.en.clone()), "duplicate venue {}", item.name.en);
    }
}

pub fn assert_instant_round_trip(date: NaiveDate, item: &ItineraryItem) {
    let ItemDetail::Flight(leg) = &item.detail else {
        return;
    };
    let departure =
        timezone_service::absolute_instant(date, item.day_offset, leg.departure_time, leg.origin_tz_offset_hours);
    assert_eq!(departure, item.instant_ms);

    let arrival = timezone_service::absolute_instant(
        date,
        item.day_offset + leg.arrival_day_offset,
        leg.arrival_time,
        leg.destination_tz_offset_hours,
    );
    assert_eq!(arrival, leg.arrival_instant_ms);
}
