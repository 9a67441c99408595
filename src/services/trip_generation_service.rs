//! Trip Envelope Assembler and the feed batch entry point.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::models::trip::{DayRole, Locale, TripDescriptor, TripEnvelope};
use crate::services::{
    activity_selection::UsedNames,
    country_service,
    day_planner_service::{DayPlanner, Destination, PlannerSettings, DAY_START},
    draw_id,
    flight_service::FlightSettings,
    pricing_service::PricingService,
    trip_extras_service,
};

const DEFAULT_START_HORIZON_DAYS: i64 = 30;
const DEFAULT_MAX_TRIP_LENGTH_DAYS: u32 = 30;
const FEED_TRIP_LENGTH_DAYS: (u32, u32) = (3, 7);
const FEED_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Destinations the feed cycles through.
pub const FEATURED_DESTINATIONS: &[(&str, &str)] = &[
    ("Tokyo", "JP"),
    ("Seoul", "KR"),
    ("Bangkok", "TH"),
    ("Paris", "FR"),
    ("Sydney", "AU"),
    ("Osaka", "JP"),
    ("London", "GB"),
    ("Singapore", "SG"),
    ("Dubai", "AE"),
    ("Rome", "IT"),
];

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub start_horizon_days: i64,
    pub max_trip_length_days: u32,
    pub planner: PlannerSettings,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            start_horizon_days: DEFAULT_START_HORIZON_DAYS,
            max_trip_length_days: DEFAULT_MAX_TRIP_LENGTH_DAYS,
            planner: PlannerSettings::default(),
        }
    }
}

impl GenerationConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            start_horizon_days: std::env::var("TRIP_START_HORIZON_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.start_horizon_days),
            max_trip_length_days: std::env::var("TRIP_MAX_LENGTH_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_trip_length_days),
            planner: PlannerSettings {
                flights: FlightSettings {
                    home_airport: std::env::var("TRIP_HOME_AIRPORT")
                        .ok()
                        .filter(|s| !s.trim().is_empty())
                        .map(|s| s.trim().to_ascii_uppercase())
                        .unwrap_or(defaults.planner.flights.home_airport),
                    long_haul_transit_probability: std::env::var("TRIP_LONG_HAUL_TRANSIT_PROBABILITY")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(defaults.planner.flights.long_haul_transit_probability),
                    short_haul_transit_probability: std::env::var("TRIP_SHORT_HAUL_TRANSIT_PROBABILITY")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(defaults.planner.flights.short_haul_transit_probability),
                },
                night_activity_probability: std::env::var("TRIP_NIGHT_ACTIVITY_PROBABILITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.planner.night_activity_probability),
            },
        }
    }
}

pub struct TripGenerator {
    config: GenerationConfig,
}

impl Default for TripGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TripGenerator {
    pub fn new() -> Self {
        Self {
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds one trip starting `start_horizon_days` after `today`.
    ///
    /// Never fails: unknown destinations degrade to generic data and a trip
    /// length of zero is treated as a single day.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        descriptor: &TripDescriptor,
        today: NaiveDate,
        rng: &mut R,
    ) -> TripEnvelope {
        let length = descriptor.trip_length_days.max(1);
        let mut descriptor = TripDescriptor {
            trip_length_days: length,
            ..descriptor.clone()
        };

        let id = draw_id(rng);
        let destination = Destination::resolve(&descriptor, rng);
        descriptor.destination_country_code = destination.country_code.clone();
        let planner = DayPlanner::new(&destination, &self.config.planner);
        let mut used = UsedNames::new();

        let start_date = today + Duration::days(self.config.start_horizon_days);
        let mut days = BTreeMap::new();
        let mut starts_at = DAY_START;
        for day_index in 1..=length {
            let date = start_date + Duration::days(day_index as i64 - 1);
            let role = DayRole::for_day(day_index, length);
            let plan = planner.plan_day(&mut used, date, day_index, role, starts_at, rng);
            starts_at = DayPlanner::next_day_start(&plan);
            days.insert(date, plan);
        }
        let end_date = start_date + Duration::days(length as i64 - 1);

        let estimated_cost = PricingService::calculate_estimated_cost(days.values());
        let envelope = TripEnvelope {
            id,
            title: title(&destination, &descriptor),
            currency: destination.currency.clone(),
            start_date,
            end_date,
            days,
            packing_list: trip_extras_service::packing_list(),
            shopping_list: trip_extras_service::shopping_list(&destination.country_code),
            budget: PricingService::budget_breakdown(estimated_cost, &destination.currency),
            emergency: country_service::emergency_info(&destination.country_code),
            estimated_cost,
            descriptor,
        };

        log::info!(
            "Generated {}-day trip to {} ({} items, {:.0} {})",
            length,
            destination.city.en,
            envelope.items().count(),
            estimated_cost,
            envelope.currency
        );
        envelope
    }

    pub fn generate_seeded(&self, descriptor: &TripDescriptor, today: NaiveDate, seed: u64) -> TripEnvelope {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(descriptor, today, &mut rng)
    }

    /// Feed page of `count` trips for positions `start_offset..start_offset + count`.
    ///
    /// Every position owns its random generator, so pages are reproducible
    /// and independent of how they are split. A page reaching past the last
    /// representable position is empty.
    pub fn generate_batch(&self, count: usize, start_offset: usize, seed: u64, today: NaiveDate) -> Vec<TripEnvelope> {
        let Some(end) = start_offset.checked_add(count) else {
            log::warn!("Feed page of {} from position {} overflows, returning nothing", count, start_offset);
            return Vec::new();
        };
        log::info!("Generating feed page: {} trips from position {}", count, start_offset);

        (start_offset..end)
            .into_par_iter()
            .map(|position| {
                let mut rng = StdRng::seed_from_u64(position_seed(seed, position));
                let descriptor = feed_descriptor(position, &mut rng);
                self.generate(&descriptor, today, &mut rng)
            })
            .collect()
    }
}

fn position_seed(seed: u64, position: usize) -> u64 {
    seed ^ (position as u64).wrapping_add(1).wrapping_mul(FEED_SEED_MIX)
}

/// Descriptor for a feed position: featured destinations in rotation.
pub fn feed_descriptor<R: Rng + ?Sized>(position: usize, rng: &mut R) -> TripDescriptor {
    let (city, country) = FEATURED_DESTINATIONS[position % FEATURED_DESTINATIONS.len()];
    let length = rng.gen_range(FEED_TRIP_LENGTH_DAYS.0..=FEED_TRIP_LENGTH_DAYS.1);
    let locale = if rng.gen_bool(0.5) { Locale::Zh } else { Locale::En };
    TripDescriptor::new(city, country, length, locale)
}

fn title(destination: &Destination, descriptor: &TripDescriptor) -> String {
    let days = descriptor.trip_length_days;
    match descriptor.locale {
        Locale::En if days == 1 => format!("A day in {}", destination.city.en),
        Locale::En => format!("{} days in {}", days, destination.city.en),
        Locale::Zh => format!("{}{}日游", destination.city.zh, days),
    }
}
