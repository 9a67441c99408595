//! Timezone offset table and plan-clock arithmetic.
//!
//! Every offset is expressed in whole hours relative to one fixed reference
//! zone (UTC+8). The table only has to keep synthetic itineraries ordered
//! relative to each other, so standard time is used throughout.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};

pub const REFERENCE_OFFSET_HOURS: i32 = 8;
pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug)]
pub struct CityProfile {
    pub en: &'static str,
    pub zh: &'static str,
    pub country_code: &'static str,
    pub tz_offset_hours: i32,
    pub airport: &'static str,
}

const CITIES: &[CityProfile] = &[
    CityProfile { en: "Shanghai", zh: "上海", country_code: "CN", tz_offset_hours: 0, airport: "PVG" },
    CityProfile { en: "Beijing", zh: "北京", country_code: "CN", tz_offset_hours: 0, airport: "PEK" },
    CityProfile { en: "Hong Kong", zh: "香港", country_code: "HK", tz_offset_hours: 0, airport: "HKG" },
    CityProfile { en: "Taipei", zh: "台北", country_code: "TW", tz_offset_hours: 0, airport: "TPE" },
    CityProfile { en: "Tokyo", zh: "东京", country_code: "JP", tz_offset_hours: 1, airport: "NRT" },
    CityProfile { en: "Osaka", zh: "大阪", country_code: "JP", tz_offset_hours: 1, airport: "KIX" },
    CityProfile { en: "Seoul", zh: "首尔", country_code: "KR", tz_offset_hours: 1, airport: "ICN" },
    CityProfile { en: "Bangkok", zh: "曼谷", country_code: "TH", tz_offset_hours: -1, airport: "BKK" },
    CityProfile { en: "Singapore", zh: "新加坡", country_code: "SG", tz_offset_hours: 0, airport: "SIN" },
    CityProfile { en: "Sydney", zh: "悉尼", country_code: "AU", tz_offset_hours: 2, airport: "SYD" },
    CityProfile { en: "Dubai", zh: "迪拜", country_code: "AE", tz_offset_hours: -4, airport: "DXB" },
    CityProfile { en: "Doha", zh: "多哈", country_code: "QA", tz_offset_hours: -5, airport: "DOH" },
    CityProfile { en: "Istanbul", zh: "伊斯坦布尔", country_code: "TR", tz_offset_hours: -5, airport: "IST" },
    CityProfile { en: "Rome", zh: "罗马", country_code: "IT", tz_offset_hours: -7, airport: "FCO" },
    CityProfile { en: "Paris", zh: "巴黎", country_code: "FR", tz_offset_hours: -7, airport: "CDG" },
    CityProfile { en: "London", zh: "伦敦", country_code: "GB", tz_offset_hours: -8, airport: "LHR" },
];

/// Finds a city by its English (case-insensitive) or Chinese name.
pub fn lookup_city(name: &str) -> Option<&'static CityProfile> {
    let needle = name.trim();
    CITIES
        .iter()
        .find(|city| city.en.eq_ignore_ascii_case(needle) || city.zh == needle)
}

/// Offset of a city relative to the reference zone; unknown cities sit in it.
pub fn city_offset(name: &str) -> i32 {
    match lookup_city(name) {
        Some(city) => city.tz_offset_hours,
        None => {
            log::debug!("No timezone entry for '{}', using reference zone", name);
            0
        }
    }
}

pub fn airport_offset(code: &str) -> i32 {
    CITIES
        .iter()
        .find(|city| city.airport == code)
        .map(|city| city.tz_offset_hours)
        .unwrap_or(0)
}

/// `epoch = wallClockAt(date) - (reference + offset) hours`, in milliseconds.
pub fn absolute_instant(date: NaiveDate, day_offset: i32, time: NaiveTime, offset_hours: i32) -> i64 {
    let wall = (date + Duration::days(day_offset as i64)).and_time(time).and_utc();
    (wall - Duration::hours((REFERENCE_OFFSET_HOURS + offset_hours) as i64)).timestamp_millis()
}

/// Today's date in the reference zone.
pub fn reference_today() -> NaiveDate {
    (Utc::now() + Duration::hours(REFERENCE_OFFSET_HOURS as i64)).date_naive()
}

/// Label shown next to a flight, e.g. `+1h`, `-7h` or `±0h`.
pub fn tz_delta_label(origin_offset: i32, destination_offset: i32) -> String {
    let delta = destination_offset - origin_offset;
    match delta {
        0 => "±0h".to_string(),
        d if d > 0 => format!("+{}h", d),
        d => format!("{}h", d),
    }
}

/// Minutes since local midnight of a plan date. Values past 24:00 roll into
/// the following calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanClock(i64);

impl PlanClock {
    pub const fn at(hour: u32, minute: u32) -> Self {
        Self((hour * 60 + minute) as i64)
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    pub fn minutes(self) -> i64 {
        self.0
    }

    pub fn plus(self, minutes: i64) -> Self {
        Self(self.0 + minutes)
    }

    pub fn day_offset(self) -> i32 {
        self.0.div_euclid(MINUTES_PER_DAY) as i32
    }

    pub fn minute_of_day(self) -> u32 {
        self.0.rem_euclid(MINUTES_PER_DAY) as u32
    }

    pub fn time(self) -> NaiveTime {
        let minute = self.minute_of_day();
        NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or_default()
    }

    pub fn hour(self) -> u32 {
        self.minute_of_day() / 60
    }

    /// True when the clock falls on the plan date itself, before `hour`.
    pub fn same_day_before(self, hour: u32) -> bool {
        self.day_offset() == 0 && self.hour() < hour
    }

    /// Shifts a clock into another zone, `delta_hours` ahead of this one.
    pub fn in_zone(self, delta_hours: i32) -> Self {
        Self(self.0 + delta_hours as i64 * 60)
    }
}
