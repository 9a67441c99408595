use serde::{Deserialize, Serialize};

use crate::models::itinerary_item::LocalizedText;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackingCategory {
    Essentials,
    Gadgets,
    Clothing,
    Toiletries,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PackingItem {
    pub category: PackingCategory,
    pub name: LocalizedText,
    pub checked: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShoppingItem {
    pub name: LocalizedText,
    pub price: f64,
    pub currency: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Flights,
    Hotels,
    Food,
    Shopping,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BudgetLine {
    pub category: BudgetCategory,
    pub label: LocalizedText,
    pub percent: u32,
    pub amount: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BudgetBreakdown {
    pub total: f64,
    pub currency: String,
    pub lines: Vec<BudgetLine>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmergencyInfo {
    pub country_code: String,
    pub police: String,
    pub ambulance: String,
    pub consular_hotline: String,
    pub visa: LocalizedText,
    pub insurance: LocalizedText,
}
