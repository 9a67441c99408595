//! Flight Segment Builder and Transfer Builder.
//!
//! Produces either one direct leg or two legs joined by a transfer at a hub.
//! All clock math runs on [`PlanClock`] minutes and is only expanded back to
//! `HH:MM` when an item is stamped, so rollovers never drift.

use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};

use crate::models::itinerary_item::{FlightLeg, ItemDetail, ItineraryItem, LocalizedText, TransferRecord};
use crate::services::{
    airport_service, country_service, scheduled_item,
    timezone_service::{self, PlanClock},
    Slot,
};

const STEP_MINUTES: i64 = 5;
const TRANSIT_LEG1_MINUTES: (u32, u32) = (7 * 60, 12 * 60);
const TRANSIT_LEG2_MINUTES: (u32, u32) = (5 * 60, 8 * 60);
const LAYOVER_MINUTES: (u32, u32) = (2 * 60, 4 * 60);
const LONG_HAUL_DIRECT_MINUTES: (u32, u32) = (9 * 60, 13 * 60);
const SHORT_HAUL_DIRECT_MINUTES: (u32, u32) = (2 * 60, 5 * 60);
const FARE_BASE_CNY: f64 = 800.0;
const FARE_PER_HOUR_CNY: f64 = 220.0;

#[derive(Debug, Clone)]
pub struct FlightSettings {
    pub home_airport: String,
    pub long_haul_transit_probability: f64,
    pub short_haul_transit_probability: f64,
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            home_airport: "PVG".to_string(),
            long_haul_transit_probability: 0.6,
            short_haul_transit_probability: 0.1,
        }
    }
}

/// Range of plan-clock departure times a flight may be drawn from.
#[derive(Debug, Clone, Copy)]
pub struct DepartureWindow {
    pub earliest: PlanClock,
    pub latest: PlanClock,
}

impl DepartureWindow {
    pub fn outbound() -> Self {
        Self {
            earliest: PlanClock::at(8, 0),
            latest: PlanClock::at(14, 0),
        }
    }

    pub fn return_leg() -> Self {
        Self {
            earliest: PlanClock::at(11, 0),
            latest: PlanClock::at(22, 0),
        }
    }

    pub fn starting_at(earliest: PlanClock, span_minutes: i64) -> Self {
        Self {
            earliest,
            latest: earliest.plus(span_minutes),
        }
    }

    /// The same window, moved so it never opens before `floor`. A window pushed
    /// past its own close stays `span_minutes` wide.
    pub fn not_before(self, floor: PlanClock, span_minutes: i64) -> Self {
        if floor <= self.earliest {
            return self;
        }
        Self {
            earliest: floor,
            latest: std::cmp::max(self.latest, floor.plus(span_minutes)),
        }
    }

    /// Draws on the five-minute grid, never on an exact midnight.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> PlanClock {
        let steps = ((self.latest.minutes() - self.earliest.minutes()) / STEP_MINUTES).max(0);
        let clock = self.earliest.plus(rng.gen_range(0..=steps) * STEP_MINUTES);
        if clock.minute_of_day() == 0 {
            clock.plus(STEP_MINUTES)
        } else {
            clock
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlightRequest<'a> {
    pub is_return_leg: bool,
    pub destination_city: &'a str,
    pub country_code: &'a str,
    pub date: NaiveDate,
    pub window: DepartureWindow,
}

/// Flight items for one direction plus the boundary facts the day planner
/// schedules around.
#[derive(Debug, Clone)]
pub struct FlightPlan {
    pub items: Vec<ItineraryItem>,
    /// First leg departure, in the origin zone.
    pub departure: PlanClock,
    pub departure_airport: String,
    pub departure_terminal: String,
    /// Last leg arrival, in the final zone.
    pub arrival: PlanClock,
    pub arrival_instant_ms: i64,
    pub arrival_airport: String,
    pub arrival_terminal: String,
    pub arrival_tz_offset_hours: i32,
}

struct Endpoint {
    airport: String,
    offset: i32,
}

struct BuiltLeg {
    item: ItineraryItem,
    leg: FlightLeg,
    departure: PlanClock,
    arrival: PlanClock,
}

fn draw_minutes<R: Rng + ?Sized>(range: (u32, u32), rng: &mut R) -> u32 {
    let steps = (range.1 - range.0) / STEP_MINUTES as u32;
    range.0 + rng.gen_range(0..=steps) * STEP_MINUTES as u32
}

fn fare(country_code: &str, duration_minutes: u32) -> f64 {
    country_service::to_local(
        country_code,
        FARE_BASE_CNY + FARE_PER_HOUR_CNY * duration_minutes as f64 / 60.0,
    )
}

struct LegParams<'a> {
    from: &'a Endpoint,
    to: &'a Endpoint,
    departure: PlanClock,
    duration_minutes: u32,
    hub: Option<&'a str>,
    /// Gate the departure gate must differ from (the inbound leg's arrival gate).
    avoid_gate: Option<&'a str>,
}

fn build_leg<R: Rng + ?Sized>(
    params: LegParams<'_>,
    date: NaiveDate,
    country_code: &str,
    rng: &mut R,
) -> BuiltLeg {
    let arrival = params
        .departure
        .plus(params.duration_minutes as i64)
        .in_zone(params.to.offset - params.from.offset);

    let carrier = airport_service::draw_carrier(params.hub, rng);
    let flight_no = airport_service::draw_flight_no(&carrier, rng);
    let departure_terminal = airport_service::draw_terminal(rng);
    let departure_gate = match params.avoid_gate {
        Some(taken) => airport_service::draw_gate_excluding(taken, rng),
        None => airport_service::draw_gate(rng),
    };
    let arrival_terminal = airport_service::draw_terminal(rng);
    let arrival_gate = airport_service::draw_gate(rng);

    let leg = FlightLeg {
        flight_no: flight_no.clone(),
        airline: LocalizedText::new(carrier.en, carrier.zh),
        origin: params.from.airport.clone(),
        destination: params.to.airport.clone(),
        departure_time: params.departure.time(),
        arrival_time: arrival.time(),
        arrival_day_offset: arrival.day_offset() - params.departure.day_offset(),
        arrival_instant_ms: timezone_service::absolute_instant(
            date,
            arrival.day_offset(),
            arrival.time(),
            params.to.offset,
        ),
        duration_minutes: params.duration_minutes,
        departure_terminal,
        departure_gate,
        arrival_terminal,
        arrival_gate,
        origin_tz_offset_hours: params.from.offset,
        destination_tz_offset_hours: params.to.offset,
        tz_delta_label: timezone_service::tz_delta_label(params.from.offset, params.to.offset),
    };

    let name = LocalizedText::new(
        format!("{} {} {} → {}", carrier.en, flight_no, leg.origin, leg.destination),
        format!("{} {} {}→{}", carrier.zh, flight_no, leg.origin, leg.destination),
    );
    let item = scheduled_item(
        rng,
        Slot {
            date,
            clock: params.departure,
            tz_offset_hours: params.from.offset,
        },
        name,
        fare(country_code, params.duration_minutes),
        ItemDetail::Flight(leg.clone()),
    );

    BuiltLeg {
        item,
        leg,
        departure: params.departure,
        arrival,
    }
}

/// Transfer Builder: the layover at `hub` between an inbound and an
/// outbound leg, stamped at the inbound arrival in hub local time.
pub fn build_transfer<R: Rng + ?Sized>(
    inbound: &FlightLeg,
    outbound: &FlightLeg,
    hub_arrival: PlanClock,
    date: NaiveDate,
    rng: &mut R,
) -> ItineraryItem {
    let hub = inbound.destination.clone();
    let layover_minutes = (outbound.departure_time - inbound.arrival_time)
        .num_minutes()
        .rem_euclid(timezone_service::MINUTES_PER_DAY) as u32;
    let record = TransferRecord {
        hub: hub.clone(),
        arrival_terminal: inbound.arrival_terminal.clone(),
        arrival_gate: inbound.arrival_gate.clone(),
        departure_terminal: outbound.departure_terminal.clone(),
        departure_gate: outbound.departure_gate.clone(),
        layover_minutes,
    };

    scheduled_item(
        rng,
        Slot {
            date,
            clock: hub_arrival,
            tz_offset_hours: inbound.destination_tz_offset_hours,
        },
        LocalizedText::new(format!("Transfer at {}", hub), format!("{}转机", hub)),
        0.0,
        ItemDetail::Transfer(record),
    )
}

/// Flight Segment Builder. Never fails: unknown cities fly to a synthetic
/// airport in the reference zone through the default hubs.
pub fn build_flights<R: Rng + ?Sized>(
    request: &FlightRequest<'_>,
    settings: &FlightSettings,
    rng: &mut R,
) -> FlightPlan {
    let home = Endpoint {
        airport: settings.home_airport.clone(),
        offset: timezone_service::airport_offset(&settings.home_airport),
    };
    let destination_airport = airport_service::airport_for_city(request.destination_city);
    let destination = Endpoint {
        offset: timezone_service::city_offset(request.destination_city),
        airport: destination_airport.clone(),
    };
    let (from, to) = if request.is_return_leg {
        (&destination, &home)
    } else {
        (&home, &destination)
    };

    let long_haul = country_service::is_long_haul(request.country_code);
    let transit_probability = if long_haul {
        settings.long_haul_transit_probability
    } else {
        settings.short_haul_transit_probability
    };
    let has_transit = rng.gen_bool(transit_probability.clamp(0.0, 1.0));
    let departure = request.window.draw(rng);

    let legs = if has_transit {
        let hubs = airport_service::hub_candidates(request.country_code, &destination_airport);
        let hub_code = *hubs.choose(rng).unwrap_or(&"HKG");
        let hub = Endpoint {
            airport: hub_code.to_string(),
            offset: timezone_service::airport_offset(hub_code),
        };

        let first = build_leg(
            LegParams {
                from,
                to: &hub,
                departure,
                duration_minutes: draw_minutes(TRANSIT_LEG1_MINUTES, rng),
                hub: Some(hub_code),
                avoid_gate: None,
            },
            request.date,
            request.country_code,
            rng,
        );
        let layover = draw_minutes(LAYOVER_MINUTES, rng);
        let second = build_leg(
            LegParams {
                from: &hub,
                to,
                departure: first.arrival.plus(layover as i64),
                duration_minutes: draw_minutes(TRANSIT_LEG2_MINUTES, rng),
                hub: Some(hub_code),
                avoid_gate: Some(first.leg.arrival_gate.as_str()),
            },
            request.date,
            request.country_code,
            rng,
        );
        log::debug!(
            "Transit via {} ({} -> {}), layover {}m",
            hub_code,
            from.airport,
            to.airport,
            layover
        );
        vec![first, second]
    } else {
        let range = if long_haul {
            LONG_HAUL_DIRECT_MINUTES
        } else {
            SHORT_HAUL_DIRECT_MINUTES
        };
        vec![build_leg(
            LegParams {
                from,
                to,
                departure,
                duration_minutes: draw_minutes(range, rng),
                hub: None,
                avoid_gate: None,
            },
            request.date,
            request.country_code,
            rng,
        )]
    };

    assemble(legs, request.date, to.offset, rng)
}

fn assemble<R: Rng + ?Sized>(legs: Vec<BuiltLeg>, date: NaiveDate, final_offset: i32, rng: &mut R) -> FlightPlan {
    let first_leg = &legs[0].leg;
    let last = &legs[legs.len() - 1];

    let mut plan = FlightPlan {
        items: Vec::with_capacity(3),
        departure: legs[0].departure,
        departure_airport: first_leg.origin.clone(),
        departure_terminal: first_leg.departure_terminal.clone(),
        arrival: last.arrival,
        arrival_instant_ms: last.leg.arrival_instant_ms,
        arrival_airport: last.leg.destination.clone(),
        arrival_terminal: last.leg.arrival_terminal.clone(),
        arrival_tz_offset_hours: final_offset,
    };

    let mut previous: Option<&BuiltLeg> = None;
    for built in &legs {
        if let Some(inbound) = previous {
            plan.items
                .push(build_transfer(&inbound.leg, &built.leg, inbound.arrival, date, rng));
        }
        plan.items.push(built.item.clone());
        previous = Some(built);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itinerary_item::ItemKind;
    use rand::{rngs::StdRng, SeedableRng};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 17).unwrap()
    }

    fn settings(transit: f64) -> FlightSettings {
        FlightSettings {
            home_airport: "PVG".to_string(),
            long_haul_transit_probability: transit,
            short_haul_transit_probability: transit,
        }
    }

    fn request(city: &'static str, country: &'static str, is_return_leg: bool) -> FlightRequest<'static> {
        FlightRequest {
            is_return_leg,
            destination_city: city,
            country_code: country,
            date: date(),
            window: if is_return_leg {
                DepartureWindow::return_leg()
            } else {
                DepartureWindow::outbound()
            },
        }
    }

    fn legs(plan: &FlightPlan) -> Vec<(&ItineraryItem, &FlightLeg)> {
        plan.items
            .iter()
            .filter_map(|item| match &item.detail {
                ItemDetail::Flight(leg) => Some((item, leg)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_direct_flight_single_leg() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = build_flights(&request("Tokyo", "JP", false), &settings(0.0), &mut rng);

        assert_eq!(plan.items.len(), 1);
        let (item, leg) = legs(&plan)[0];
        assert_eq!(leg.origin, "PVG");
        assert_eq!(leg.destination, "NRT");
        assert_eq!(leg.tz_delta_label, "+1h");
        assert!(!leg.flight_no.is_empty());
        assert!(!leg.departure_gate.is_empty());
        assert!(!leg.arrival_terminal.is_empty());
        assert!((120..=300).contains(&leg.duration_minutes));
        assert!(item.cost > 0.0);
        assert_eq!(plan.arrival_airport, "NRT");
    }

    #[test]
    fn test_transit_yields_leg_transfer_leg() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = build_flights(&request("Paris", "FR", false), &settings(1.0), &mut rng);

        let kinds: Vec<ItemKind> = plan.items.iter().map(|i| i.kind()).collect();
        assert_eq!(kinds, vec![ItemKind::Flight, ItemKind::Transfer, ItemKind::Flight]);

        let flights = legs(&plan);
        let (first, second) = (flights[0].1, flights[1].1);
        let ItemDetail::Transfer(transfer) = &plan.items[1].detail else {
            panic!("expected transfer");
        };
        assert_eq!(transfer.hub, first.destination);
        assert_eq!(transfer.hub, second.origin);
        assert_eq!(transfer.arrival_gate, first.arrival_gate);
        assert_eq!(transfer.arrival_terminal, first.arrival_terminal);
        assert_eq!(transfer.departure_gate, second.departure_gate);
        assert_eq!(transfer.departure_terminal, second.departure_terminal);
        assert_ne!(transfer.arrival_gate, transfer.departure_gate);
        assert!((120..=240).contains(&transfer.layover_minutes));
        assert_eq!(second.destination, "CDG");
    }

    #[test]
    fn test_instants_round_trip_through_formula() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = build_flights(&request("London", "GB", seed % 2 == 0), &settings(0.5), &mut rng);
            for (item, leg) in legs(&plan) {
                let departure = timezone_service::absolute_instant(
                    date(),
                    item.day_offset,
                    leg.departure_time,
                    leg.origin_tz_offset_hours,
                );
                assert_eq!(departure, item.instant_ms);

                let arrival = timezone_service::absolute_instant(
                    date(),
                    item.day_offset + leg.arrival_day_offset,
                    leg.arrival_time,
                    leg.destination_tz_offset_hours,
                );
                assert_eq!(arrival, leg.arrival_instant_ms);
                assert_eq!(arrival - departure, leg.duration_minutes as i64 * 60_000);
            }
        }
    }

    #[test]
    fn test_local_clock_and_instants_move_forward() {
        let cities = [
            ("Tokyo", "JP"),
            ("Seoul", "KR"),
            ("Bangkok", "TH"),
            ("Sydney", "AU"),
            ("Dubai", "AE"),
            ("Paris", "FR"),
            ("London", "GB"),
            ("Rome", "IT"),
            ("Atlantis", "ZZ"),
        ];
        for (city, country) in cities {
            for seed in 0..40 {
                for is_return_leg in [false, true] {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let plan = build_flights(&request(city, country, is_return_leg), &settings(0.5), &mut rng);
                    for pair in plan.items.windows(2) {
                        assert!(pair[0].clock_minutes() < pair[1].clock_minutes(), "{} seed {}", city, seed);
                        assert!(pair[0].instant_ms < pair[1].instant_ms);
                    }
                    let last = plan.items.last().unwrap();
                    assert!(plan.arrival_instant_ms > last.instant_ms);
                    assert!(plan.arrival.minutes() > 0);
                    if !is_return_leg {
                        assert!(plan.arrival > plan.departure, "{} seed {}", city, seed);
                    }
                }
            }
        }
    }

    #[test]
    fn test_window_never_draws_midnight() {
        let window = DepartureWindow::starting_at(PlanClock::at(23, 55), 5);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_ne!(window.draw(&mut rng).minute_of_day(), 0);
        }
    }

    #[test]
    fn test_unknown_destination_degrades() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = build_flights(&request("Atlantis", "ZZ", false), &settings(1.0), &mut rng);
        assert_eq!(plan.arrival_airport, "ATL");
        assert_eq!(plan.arrival_tz_offset_hours, 0);
        assert_eq!(plan.items.len(), 3);
    }
}
