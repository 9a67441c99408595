pub mod activity_catalog;
pub mod activity_selection;
pub mod airport_service;
pub mod country_service;
pub mod day_planner_service;
pub mod flight_service;
pub mod pricing_service;
pub mod timezone_service;
pub mod trip_extras_service;
pub mod trip_generation_service;

use chrono::NaiveDate;
use rand::Rng;
use uuid::Uuid;

use crate::models::itinerary_item::{ItemDetail, ItineraryItem, LocalizedText};
use timezone_service::PlanClock;

/// Where an item sits: plan date, local clock, and the zone it is read in.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub date: NaiveDate,
    pub clock: PlanClock,
    pub tz_offset_hours: i32,
}

/// Item ids come from the trip's random source so seeded runs repeat exactly.
pub fn draw_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

pub fn scheduled_item<R: Rng + ?Sized>(
    rng: &mut R,
    slot: Slot,
    name: LocalizedText,
    cost: f64,
    detail: ItemDetail,
) -> ItineraryItem {
    let time = slot.clock.time();
    let day_offset = slot.clock.day_offset();
    ItineraryItem {
        id: draw_id(rng),
        name,
        time,
        day_offset,
        instant_ms: timezone_service::absolute_instant(slot.date, day_offset, time, slot.tz_offset_hours),
        tz_offset_hours: slot.tz_offset_hours,
        cost,
        currency: None,
        detail,
    }
}
