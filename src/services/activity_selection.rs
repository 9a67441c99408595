//! Trip-scoped activity selection.
//!
//! Selection runs as ordered resolver chains: each strategy is tried in turn
//! and the first one that yields a candidate wins. Every name handed out is
//! claimed in the trip's [`UsedNames`] before the caller continues, which is
//! what keeps display names unique across the whole trip.

use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::models::{
    activity::{ActivityCategory, CatalogActivity, Restaurant},
    itinerary_item::{LocalizedText, Meal},
};

/// Names already placed in the trip being generated. One instance per
/// generation call.
#[derive(Debug, Default)]
pub struct UsedNames {
    names: HashSet<String>,
}

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns false when the name was already taken.
    pub fn claim(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStrategy {
    /// Unused entries from the day slot's preferred categories.
    PreferredCategories,
    /// Any unused entry.
    AnyUnused,
}

pub const ACTIVITY_CHAIN: &[ActivityStrategy] =
    &[ActivityStrategy::PreferredCategories, ActivityStrategy::AnyUnused];

impl ActivityStrategy {
    fn attempt<'a, R: Rng + ?Sized>(
        self,
        catalog: &'a [CatalogActivity],
        preferred: &[ActivityCategory],
        used: &UsedNames,
        rng: &mut R,
    ) -> Option<&'a CatalogActivity> {
        let pool: Vec<&CatalogActivity> = catalog
            .iter()
            .filter(|activity| !used.contains(&activity.name.en))
            .filter(|activity| match self {
                ActivityStrategy::PreferredCategories => preferred.contains(&activity.category),
                ActivityStrategy::AnyUnused => true,
            })
            .collect();
        pool.choose(rng).copied()
    }
}

/// Picks an activity for a slot, or `None` once the catalog is exhausted.
pub fn select_activity<R: Rng + ?Sized>(
    catalog: &[CatalogActivity],
    preferred: &[ActivityCategory],
    used: &mut UsedNames,
    rng: &mut R,
) -> Option<CatalogActivity> {
    let Some(picked) = ACTIVITY_CHAIN
        .iter()
        .find_map(|strategy| strategy.attempt(catalog, preferred, used, rng))
    else {
        log::debug!("Activity pool exhausted for {:?}, omitting slot", preferred);
        return None;
    };

    used.claim(&picked.name.en);
    Some(picked.clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSource {
    /// An unused food-category catalog entry.
    FoodCatalog,
    /// An unused entry of the city's restaurant table.
    RestaurantTable,
    /// Templated name built from the city; always succeeds.
    Generic,
}

pub const DINNER_CHAIN: &[MealSource] =
    &[MealSource::FoodCatalog, MealSource::RestaurantTable, MealSource::Generic];
pub const RESTAURANT_CHAIN: &[MealSource] = &[MealSource::RestaurantTable, MealSource::Generic];

/// Everything a meal resolver may consult.
pub struct MealContext<'a> {
    pub city: &'a LocalizedText,
    pub catalog: &'a [CatalogActivity],
    pub restaurants: &'a [Restaurant],
}

impl MealSource {
    fn attempt<R: Rng + ?Sized>(
        self,
        meal: Meal,
        ctx: &MealContext<'_>,
        used: &UsedNames,
        rng: &mut R,
    ) -> Option<LocalizedText> {
        match self {
            MealSource::FoodCatalog => {
                let pool: Vec<&CatalogActivity> = ctx
                    .catalog
                    .iter()
                    .filter(|a| a.category == ActivityCategory::Food && !used.contains(&a.name.en))
                    .collect();
                pool.choose(rng).map(|a| a.name.clone())
            }
            MealSource::RestaurantTable => {
                let pool: Vec<&Restaurant> = ctx
                    .restaurants
                    .iter()
                    .filter(|r| !used.contains(&r.name.en))
                    .collect();
                pool.choose(rng).map(|r| r.name.clone())
            }
            MealSource::Generic => Some(generic_meal_name(meal, ctx.city)),
        }
    }
}

fn generic_meal_name(meal: Meal, city: &LocalizedText) -> LocalizedText {
    match meal {
        Meal::Breakfast => LocalizedText::new("Hotel breakfast", "酒店早餐"),
        Meal::Lunch => LocalizedText::new(
            format!("{} local eatery", city.en),
            format!("{}本地小馆", city.zh),
        ),
        Meal::Dinner => LocalizedText::new(
            format!("{} neighbourhood restaurant", city.en),
            format!("{}街坊餐厅", city.zh),
        ),
    }
}

/// Resolves a meal venue through `chain`. Chains ending in
/// [`MealSource::Generic`] always produce a name. Repeated generic lunch and
/// dinner names are numbered; breakfast is always the hotel's.
pub fn resolve_meal<R: Rng + ?Sized>(
    chain: &[MealSource],
    meal: Meal,
    ctx: &MealContext<'_>,
    used: &mut UsedNames,
    rng: &mut R,
) -> LocalizedText {
    let name = chain
        .iter()
        .find_map(|source| source.attempt(meal, ctx, used, rng))
        .unwrap_or_else(|| generic_meal_name(meal, ctx.city));
    if meal == Meal::Breakfast {
        return name;
    }
    claim_numbered(name, used)
}

/// A "scenic walk" filler with a name no other item of the trip carries.
pub fn claim_scenic_walk(city: &LocalizedText, used: &mut UsedNames) -> LocalizedText {
    let base = LocalizedText::new(format!("Scenic walk around {}", city.en), format!("{}风景漫步", city.zh));
    claim_numbered(base, used)
}

/// Claims `base`, or the first free "#2", "#3", ... variant of it.
fn claim_numbered(base: LocalizedText, used: &mut UsedNames) -> LocalizedText {
    if used.claim(&base.en) {
        return base;
    }
    let mut round = 2;
    loop {
        let name = LocalizedText::new(
            format!("{} #{}", base.en, round),
            format!("{} #{}", base.zh, round),
        );
        if used.claim(&name.en) {
            return name;
        }
        round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::activity_catalog;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_select_prefers_categories_then_falls_back() {
        let catalog = activity_catalog::catalog_for("Tokyo", "JP");
        let mut used = UsedNames::new();
        let mut rng = StdRng::seed_from_u64(3);

        let first = select_activity(&catalog, &[ActivityCategory::Nightlife], &mut used, &mut rng).unwrap();
        assert_eq!(first.category, ActivityCategory::Nightlife);

        // Only one nightlife entry in Tokyo: the next pick falls back to any unused entry.
        let second = select_activity(&catalog, &[ActivityCategory::Nightlife], &mut used, &mut rng).unwrap();
        assert_ne!(second.name, first.name);
        assert!(used.contains(&first.name.en));
        assert!(used.contains(&second.name.en));
    }

    #[test]
    fn test_select_omits_when_exhausted() {
        let catalog = activity_catalog::catalog_for("Atlantis", "ZZ");
        let mut used = UsedNames::new();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..catalog.len() {
            assert!(select_activity(&catalog, &[ActivityCategory::Spot], &mut used, &mut rng).is_some());
        }
        assert!(select_activity(&catalog, &[ActivityCategory::Spot], &mut used, &mut rng).is_none());
        assert!(catalog.iter().all(|activity| used.contains(&activity.name.en)));
    }

    #[test]
    fn test_resolve_meal_falls_back_to_generic() {
        let city = LocalizedText::new("Atlantis", "亚特兰蒂斯");
        let ctx = MealContext { city: &city, catalog: &[], restaurants: &[] };
        let mut used = UsedNames::new();
        let mut rng = StdRng::seed_from_u64(5);

        let name = resolve_meal(DINNER_CHAIN, Meal::Dinner, &ctx, &mut used, &mut rng);
        assert_eq!(name.en, "Atlantis neighbourhood restaurant");
        assert_eq!(name.zh, "亚特兰蒂斯街坊餐厅");
    }

    #[test]
    fn test_resolve_meal_uses_restaurants_without_repeats() {
        let city = activity_catalog::city_names("Paris");
        let restaurants = activity_catalog::restaurants_for("Paris");
        let ctx = MealContext { city: &city, catalog: &[], restaurants: &restaurants };
        let mut used = UsedNames::new();
        let mut rng = StdRng::seed_from_u64(9);

        let mut seen = HashSet::new();
        for _ in 0..restaurants.len() {
            let name = resolve_meal(RESTAURANT_CHAIN, Meal::Lunch, &ctx, &mut used, &mut rng);
            assert!(seen.insert(name.en));
        }
        let overflow = resolve_meal(RESTAURANT_CHAIN, Meal::Lunch, &ctx, &mut used, &mut rng);
        assert_eq!(overflow.en, "Paris local eatery");
    }

    #[test]
    fn test_scenic_walk_names_are_unique() {
        let city = LocalizedText::new("Rome", "罗马");
        let mut used = UsedNames::new();
        let first = claim_scenic_walk(&city, &mut used);
        let second = claim_scenic_walk(&city, &mut used);
        assert_eq!(first.en, "Scenic walk around Rome");
        assert_eq!(second.en, "Scenic walk around Rome #2");
    }

    #[test]
    fn test_generic_meals_are_numbered_on_repeat() {
        let city = LocalizedText::new("Singapore", "新加坡");
        let ctx = MealContext { city: &city, catalog: &[], restaurants: &[] };
        let mut used = UsedNames::new();
        let mut rng = StdRng::seed_from_u64(6);

        let lunches: Vec<LocalizedText> = (0..3)
            .map(|_| resolve_meal(RESTAURANT_CHAIN, Meal::Lunch, &ctx, &mut used, &mut rng))
            .collect();
        assert_eq!(lunches[0].en, "Singapore local eatery");
        assert_eq!(lunches[1].en, "Singapore local eatery #2");
        assert_eq!(lunches[2].en, "Singapore local eatery #3");
        assert_eq!(lunches[2].zh, "新加坡本地小馆 #3");

        let dinner = resolve_meal(DINNER_CHAIN, Meal::Dinner, &ctx, &mut used, &mut rng);
        assert_eq!(dinner.en, "Singapore neighbourhood restaurant");

        let breakfast = resolve_meal(&[MealSource::Generic], Meal::Breakfast, &ctx, &mut used, &mut rng);
        let again = resolve_meal(&[MealSource::Generic], Meal::Breakfast, &ctx, &mut used, &mut rng);
        assert_eq!(breakfast.en, "Hotel breakfast");
        assert_eq!(again.en, "Hotel breakfast");
    }
}
