use serde::{Deserialize, Serialize};

use crate::models::itinerary_item::LocalizedText;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Nature,
    Culture,
    History,
    Shopping,
    Activity,
    Spot,
    Food,
    Nightlife,
}

/// One entry of a city's activity catalog.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogActivity {
    pub name: LocalizedText,
    pub category: ActivityCategory,
    pub cost: f64,
    pub description: LocalizedText,
    pub duration_minutes: u32,
}

/// A sit-down restaurant from the per-city lookup.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Restaurant {
    pub name: LocalizedText,
}
