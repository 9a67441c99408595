//! Airport directory: hub lists, airport ground transport, carriers, and
//! terminal/gate synthesis.

use rand::{seq::SliceRandom, Rng};

use crate::models::itinerary_item::LocalizedText;
use crate::services::country_service::{self, HubGroup};
use crate::services::timezone_service;

const DEFAULT_HUBS: &[&str] = &["HKG", "SIN", "DXB"];

pub fn hubs_for(group: HubGroup) -> &'static [&'static str] {
    match group {
        HubGroup::Europe => &["DXB", "DOH", "IST"],
        HubGroup::MiddleEast => &["DXB", "DOH", "SIN"],
        HubGroup::Oceania => &["SIN", "HKG"],
        HubGroup::EastAsia => &["ICN", "TPE", "HKG"],
        HubGroup::SoutheastAsia => &["HKG", "SIN"],
        HubGroup::Other => DEFAULT_HUBS,
    }
}

/// Hub candidates for a destination, never the destination airport itself.
pub fn hub_candidates(country_code: &str, destination_airport: &str) -> Vec<&'static str> {
    let group = country_service::hub_group(country_code);
    let usable = |hubs: &'static [&'static str]| -> Vec<&'static str> {
        hubs.iter().copied().filter(|hub| *hub != destination_airport).collect()
    };

    let candidates = usable(hubs_for(group));
    if candidates.is_empty() {
        log::debug!("No hub left for {:?} group, using default hubs", group);
        usable(DEFAULT_HUBS)
    } else {
        candidates
    }
}

/// Airport code of a city, or a synthetic code built from its name.
pub fn airport_for_city(city: &str) -> String {
    if let Some(profile) = timezone_service::lookup_city(city) {
        return profile.airport.to_string();
    }

    let mut code: String = city
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    while code.len() < 3 {
        code.push('X');
    }
    code
}

#[derive(Debug, Clone)]
pub struct GroundTransport {
    pub mode: LocalizedText,
    pub minutes: u32,
    pub cost: f64,
}

struct AirportTransportEntry {
    airport: &'static str,
    mode_en: &'static str,
    mode_zh: &'static str,
    minutes: u32,
    cost: f64,
}

const AIRPORT_TRANSPORT: &[AirportTransportEntry] = &[
    AirportTransportEntry { airport: "NRT", mode_en: "Narita Express", mode_zh: "成田特快", minutes: 60, cost: 3070.0 },
    AirportTransportEntry { airport: "KIX", mode_en: "Haruka Limited Express", mode_zh: "关空特急Haruka", minutes: 75, cost: 2200.0 },
    AirportTransportEntry { airport: "ICN", mode_en: "AREX Express Train", mode_zh: "机场快线AREX", minutes: 50, cost: 9500.0 },
    AirportTransportEntry { airport: "BKK", mode_en: "Airport Rail Link", mode_zh: "机场快线", minutes: 30, cost: 45.0 },
    AirportTransportEntry { airport: "SIN", mode_en: "MRT East-West Line", mode_zh: "地铁东西线", minutes: 45, cost: 3.0 },
    AirportTransportEntry { airport: "HKG", mode_en: "Airport Express", mode_zh: "机场快线", minutes: 24, cost: 115.0 },
    AirportTransportEntry { airport: "SYD", mode_en: "Airport Link Train", mode_zh: "机场线列车", minutes: 15, cost: 20.0 },
    AirportTransportEntry { airport: "DXB", mode_en: "Dubai Metro Red Line", mode_zh: "迪拜地铁红线", minutes: 35, cost: 8.0 },
    AirportTransportEntry { airport: "CDG", mode_en: "RER B Train", mode_zh: "RER B线", minutes: 50, cost: 11.8 },
    AirportTransportEntry { airport: "FCO", mode_en: "Leonardo Express", mode_zh: "列奥纳多快线", minutes: 32, cost: 14.0 },
    AirportTransportEntry { airport: "LHR", mode_en: "Heathrow Express", mode_zh: "希思罗快线", minutes: 20, cost: 25.0 },
];

const TAXI_MINUTES: u32 = 45;
const TAXI_FARE_CNY: f64 = 200.0;

/// Ground transport between an airport and the city's lodging, falling back
/// to a generic taxi priced in the destination currency.
pub fn ground_transport(airport: &str, country_code: &str) -> GroundTransport {
    match AIRPORT_TRANSPORT.iter().find(|entry| entry.airport == airport) {
        Some(entry) => GroundTransport {
            mode: LocalizedText::new(entry.mode_en, entry.mode_zh),
            minutes: entry.minutes,
            cost: entry.cost,
        },
        None => GroundTransport {
            mode: LocalizedText::new("Taxi", "出租车"),
            minutes: TAXI_MINUTES,
            cost: country_service::to_local(country_code, TAXI_FARE_CNY),
        },
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Carrier {
    pub code: &'static str,
    pub en: &'static str,
    pub zh: &'static str,
}

const HOME_CARRIERS: &[Carrier] = &[
    Carrier { code: "MU", en: "China Eastern", zh: "东方航空" },
    Carrier { code: "CA", en: "Air China", zh: "中国国际航空" },
    Carrier { code: "CZ", en: "China Southern", zh: "南方航空" },
];

const HUB_CARRIERS: &[(&str, Carrier)] = &[
    ("DXB", Carrier { code: "EK", en: "Emirates", zh: "阿联酋航空" }),
    ("DOH", Carrier { code: "QR", en: "Qatar Airways", zh: "卡塔尔航空" }),
    ("IST", Carrier { code: "TK", en: "Turkish Airlines", zh: "土耳其航空" }),
    ("SIN", Carrier { code: "SQ", en: "Singapore Airlines", zh: "新加坡航空" }),
    ("HKG", Carrier { code: "CX", en: "Cathay Pacific", zh: "国泰航空" }),
    ("ICN", Carrier { code: "KE", en: "Korean Air", zh: "大韩航空" }),
    ("TPE", Carrier { code: "CI", en: "China Airlines", zh: "中华航空" }),
];

/// The hub's home carrier when the leg touches a hub, otherwise one of the
/// reference-zone carriers.
pub fn draw_carrier<R: Rng + ?Sized>(hub: Option<&str>, rng: &mut R) -> Carrier {
    if let Some((_, carrier)) = hub.and_then(|hub| HUB_CARRIERS.iter().find(|(code, _)| *code == hub)) {
        return *carrier;
    }
    *HOME_CARRIERS.choose(rng).unwrap_or(&HOME_CARRIERS[0])
}

pub fn draw_flight_no<R: Rng + ?Sized>(carrier: &Carrier, rng: &mut R) -> String {
    format!("{}{}", carrier.code, rng.gen_range(100..=999))
}

pub fn draw_terminal<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("T{}", rng.gen_range(1..=3))
}

pub fn draw_gate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letter = *[b'A', b'B', b'C', b'D', b'E'].choose(rng).unwrap_or(&b'A') as char;
    format!("{}{}", letter, rng.gen_range(1..=60))
}

/// A gate distinct from `taken`.
pub fn draw_gate_excluding<R: Rng + ?Sized>(taken: &str, rng: &mut R) -> String {
    let gate = draw_gate(rng);
    if gate != taken {
        return gate;
    }
    // Same letter, shifted number, stays within the gate range.
    let letter = &gate[..1];
    let number: u32 = gate[1..].parse().unwrap_or(1);
    format!("{}{}", letter, number % 60 + 1)
}
