use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::activity::ActivityCategory;

/// Display text carried in both supported languages.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub en: String,
    pub zh: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Flight,
    Transfer,
    Immigration,
    Transport,
    Hotel,
    Food,
    Activity,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryItem {
    pub id: Uuid,
    pub name: LocalizedText,
    /// Local wall-clock time in the item's own zone.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// Calendar days after the plan date, in the item's own zone.
    pub day_offset: i32,
    /// Epoch milliseconds.
    pub instant_ms: i64,
    /// Hours relative to the reference zone.
    pub tz_offset_hours: i32,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub detail: ItemDetail,
}

impl ItineraryItem {
    pub fn kind(&self) -> ItemKind {
        self.detail.kind()
    }

    /// Ordering key for the local clock display, minutes since plan-date midnight.
    pub fn clock_minutes(&self) -> i64 {
        use chrono::Timelike;
        self.day_offset as i64 * 1440 + (self.time.hour() * 60 + self.time.minute()) as i64
    }

    pub fn is_flight(&self) -> bool {
        matches!(self.detail, ItemDetail::Flight(_))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetail {
    Flight(FlightLeg),
    Transfer(TransferRecord),
    Immigration(ImmigrationDetail),
    Transport(TransportDetail),
    Hotel(HotelDetail),
    Food(FoodDetail),
    Activity(ActivityDetail),
}

impl ItemDetail {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetail::Flight(_) => ItemKind::Flight,
            ItemDetail::Transfer(_) => ItemKind::Transfer,
            ItemDetail::Immigration(_) => ItemKind::Immigration,
            ItemDetail::Transport(_) => ItemKind::Transport,
            ItemDetail::Hotel(_) => ItemKind::Hotel,
            ItemDetail::Food(_) => ItemKind::Food,
            ItemDetail::Activity(_) => ItemKind::Activity,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlightLeg {
    pub flight_no: String,
    pub airline: LocalizedText,
    pub origin: String,
    pub destination: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    /// Calendar days between local departure and local arrival.
    pub arrival_day_offset: i32,
    pub arrival_instant_ms: i64,
    pub duration_minutes: u32,
    pub departure_terminal: String,
    pub departure_gate: String,
    pub arrival_terminal: String,
    pub arrival_gate: String,
    pub origin_tz_offset_hours: i32,
    pub destination_tz_offset_hours: i32,
    pub tz_delta_label: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransferRecord {
    pub hub: String,
    pub arrival_terminal: String,
    pub arrival_gate: String,
    pub departure_terminal: String,
    pub departure_gate: String,
    pub layover_minutes: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImmigrationDetail {
    pub airport: String,
    pub terminal: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransportDetail {
    pub mode: LocalizedText,
    pub minutes: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HotelAction {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HotelDetail {
    pub action: HotelAction,
    pub hotel: LocalizedText,
    pub nights: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FoodDetail {
    pub meal: Meal,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivityDetail {
    pub category: ActivityCategory,
    pub description: LocalizedText,
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hop: Option<TransportDetail>,
}

/// Serializes `NaiveTime` as `HH:MM` for the rendering layer.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
