use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    extras::{BudgetBreakdown, EmergencyInfo, PackingItem, ShoppingItem},
    itinerary_item::ItineraryItem,
};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TripDescriptor {
    pub destination_city: String,
    pub destination_country_code: String,
    pub trip_length_days: u32,
    #[serde(default)]
    pub locale: Locale,
}

impl TripDescriptor {
    pub fn new(
        destination_city: impl Into<String>,
        destination_country_code: impl Into<String>,
        trip_length_days: u32,
        locale: Locale,
    ) -> Self {
        Self {
            destination_city: destination_city.into(),
            destination_country_code: destination_country_code.into(),
            trip_length_days,
            locale,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayRole {
    Arrival,
    Middle,
    Departure,
    /// Arrival and departure on the same date.
    Single,
}

impl DayRole {
    pub fn for_day(day_index: u32, trip_length_days: u32) -> Self {
        match (day_index == 1, day_index == trip_length_days) {
            (true, true) => DayRole::Single,
            (true, false) => DayRole::Arrival,
            (false, true) => DayRole::Departure,
            (false, false) => DayRole::Middle,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_index: u32,
    pub role: DayRole,
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripEnvelope {
    pub id: Uuid,
    pub descriptor: TripDescriptor,
    pub title: String,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: BTreeMap<NaiveDate, DayPlan>,
    pub packing_list: Vec<PackingItem>,
    pub shopping_list: Vec<ShoppingItem>,
    pub budget: BudgetBreakdown,
    pub emergency: EmergencyInfo,
    pub estimated_cost: f64,
}

impl TripEnvelope {
    /// Day plans in calendar order.
    pub fn day_plans(&self) -> impl Iterator<Item = &DayPlan> {
        self.days.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItineraryItem> {
        self.days.values().flat_map(|plan| plan.items.iter())
    }
}
