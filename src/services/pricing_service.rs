use crate::models::{
    extras::{BudgetBreakdown, BudgetCategory, BudgetLine},
    itinerary_item::LocalizedText,
    trip::DayPlan,
};

/// Budget split of a trip's estimated cost, in percent.
const BUDGET_SPLIT: &[(BudgetCategory, &str, &str, u32)] = &[
    (BudgetCategory::Flights, "Flights", "机票", 40),
    (BudgetCategory::Hotels, "Hotels", "酒店", 30),
    (BudgetCategory::Food, "Food", "餐饮", 20),
    (BudgetCategory::Shopping, "Shopping", "购物", 10),
];

pub struct PricingService;

impl PricingService {
    /// Sum of every item cost across the given days
    pub fn calculate_estimated_cost<'a>(days: impl IntoIterator<Item = &'a DayPlan>) -> f64 {
        days.into_iter()
            .flat_map(|day| day.items.iter())
            .map(|item| item.cost)
            .sum()
    }

    /// Splits `total` across the fixed budget categories
    pub fn budget_breakdown(total: f64, currency: &str) -> BudgetBreakdown {
        let lines = BUDGET_SPLIT
            .iter()
            .map(|(category, en, zh, percent)| BudgetLine {
                category: *category,
                label: LocalizedText::new(*en, *zh),
                percent: *percent,
                amount: (total * *percent as f64 / 100.0).round(),
            })
            .collect();

        BudgetBreakdown {
            total,
            currency: currency.to_string(),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itinerary_item::{FoodDetail, ItemDetail, ItineraryItem, Meal};
    use crate::models::trip::DayRole;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn food(cost: f64) -> ItineraryItem {
        ItineraryItem {
            id: Uuid::nil(),
            name: LocalizedText::new("Lunch", "午餐"),
            time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            day_offset: 0,
            instant_ms: 0,
            tz_offset_hours: 0,
            cost,
            currency: None,
            detail: ItemDetail::Food(FoodDetail { meal: Meal::Lunch }),
        }
    }

    fn day(costs: &[f64]) -> DayPlan {
        DayPlan {
            date: NaiveDate::from_ymd_opt(2026, 11, 17).unwrap(),
            day_index: 2,
            role: DayRole::Middle,
            items: costs.iter().map(|cost| food(*cost)).collect(),
        }
    }

    #[test]
    fn test_budget_breakdown_calculation() {
        let budget = PricingService::budget_breakdown(10_000.0, "EUR");

        assert_eq!(budget.lines.len(), 4);
        assert_eq!(budget.lines.iter().map(|line| line.percent).sum::<u32>(), 100);
        assert_eq!(budget.lines[0].amount, 4000.0);
        assert_eq!(budget.lines[3].amount, 1000.0);
        assert_eq!(budget.currency, "EUR");
    }

    #[test]
    fn test_estimated_cost_calculation() {
        let days = vec![day(&[100.0, 50.5]), day(&[0.0, 20.0])];

        assert_eq!(PricingService::calculate_estimated_cost(&days), 170.5);
        assert_eq!(PricingService::calculate_estimated_cost(&Vec::<DayPlan>::new()), 0.0);
    }
}
