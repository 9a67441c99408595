//! Day Itinerary Assembler.
//!
//! Builds one [`DayPlan`] per call. Boundary days delegate their flights to
//! [`flight_service`]; every day draws activities through the trip-scoped
//! [`UsedNames`] accumulator handed in by the caller.

use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};

use crate::models::{
    activity::{ActivityCategory, CatalogActivity, Restaurant},
    itinerary_item::{
        ActivityDetail, FoodDetail, HotelAction, HotelDetail, ImmigrationDetail, ItemDetail, ItemKind,
        ItineraryItem, LocalizedText, Meal, TransportDetail,
    },
    trip::{DayPlan, DayRole, TripDescriptor},
};
use crate::services::{
    activity_catalog,
    activity_selection::{self, MealContext, MealSource, UsedNames, DINNER_CHAIN, RESTAURANT_CHAIN},
    airport_service::{self, GroundTransport},
    country_service,
    flight_service::{self, DepartureWindow, FlightPlan, FlightRequest, FlightSettings},
    scheduled_item,
    timezone_service::{self, PlanClock, MINUTES_PER_DAY},
    Slot,
};

const IMMIGRATION_DELAY_MINUTES: i64 = 45;
const TRANSPORT_GAP_MINUTES: i64 = 30;
const CHECK_IN_GAP_MINUTES: i64 = 60;
const SETTLE_MINUTES: i64 = 60;
const ARRIVAL_ACTIVITY_CUTOFF_HOUR: u32 = 17;
const ARRIVAL_DINNER_CUTOFF_HOUR: u32 = 19;
const LATE_DEPARTURE_HOUR: u32 = 14;
const AIRPORT_BUFFER_MINUTES: i64 = 180;
const SINGLE_DAY_RETURN_DELAY_MINUTES: i64 = 180;
const SINGLE_DAY_RETURN_SPAN_MINUTES: i64 = 240;
const MIN_DAY_ACTIVITIES: usize = 2;
const SCENIC_WALK_MINUTES: u32 = 60;

const HOTEL_NIGHTLY_CNY: f64 = 650.0;
const LUNCH_CNY: f64 = 80.0;
const DINNER_CNY: f64 = 150.0;

const MORNING_CATEGORIES: &[ActivityCategory] =
    &[ActivityCategory::Nature, ActivityCategory::Culture, ActivityCategory::History];
const AFTERNOON_CATEGORIES: &[ActivityCategory] =
    &[ActivityCategory::Shopping, ActivityCategory::Activity, ActivityCategory::Spot];
const NIGHT_CATEGORIES: &[ActivityCategory] =
    &[ActivityCategory::Nightlife, ActivityCategory::Spot, ActivityCategory::Culture];
const ANY_CATEGORY: &[ActivityCategory] = &[
    ActivityCategory::Spot,
    ActivityCategory::Culture,
    ActivityCategory::Nature,
    ActivityCategory::History,
];

/// Start of an unconstrained day.
pub const DAY_START: PlanClock = PlanClock::at(0, 0);

/// Free slots a scenic-walk filler may take on a middle day.
const FILLER_SLOTS: &[(u32, u32)] = &[(10, 0), (15, 0), (16, 30)];

struct HopMode {
    en: &'static str,
    zh: &'static str,
    minutes: u32,
    cny: f64,
}

const HOP_MODES: &[HopMode] = &[
    HopMode { en: "Metro", zh: "地铁", minutes: 20, cny: 6.0 },
    HopMode { en: "Taxi", zh: "出租车", minutes: 15, cny: 35.0 },
    HopMode { en: "Walk", zh: "步行", minutes: 15, cny: 0.0 },
    HopMode { en: "Bus", zh: "公交", minutes: 25, cny: 3.0 },
];

const HOTEL_TEMPLATES: &[(&str, &str)] = &[
    ("{} Grand Hotel", "{}大酒店"),
    ("{} Central Inn", "{}中心旅馆"),
    ("{} Riverside Hotel", "{}河畔酒店"),
    ("{} Garden Suites", "{}花园套房酒店"),
];

#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub flights: FlightSettings,
    pub night_activity_probability: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            flights: FlightSettings::default(),
            night_activity_probability: 0.5,
        }
    }
}

/// Everything the assembler needs to know about the destination, resolved
/// once per trip.
#[derive(Debug, Clone)]
pub struct Destination {
    pub city: LocalizedText,
    pub country_code: String,
    pub currency: String,
    pub tz_offset_hours: i32,
    pub airport: String,
    pub ground: GroundTransport,
    pub hotel: LocalizedText,
    pub nights: u32,
    pub catalog: Vec<CatalogActivity>,
    pub restaurants: Vec<Restaurant>,
}

impl Destination {
    pub fn resolve<R: Rng + ?Sized>(descriptor: &TripDescriptor, rng: &mut R) -> Self {
        let city = activity_catalog::city_names(&descriptor.destination_city);
        let requested = descriptor.destination_country_code.trim().to_ascii_uppercase();
        // Known cities fix their own country: hubs and haul must match the offset table.
        let country_code = match timezone_service::lookup_city(&descriptor.destination_city) {
            Some(profile) if profile.country_code != requested => {
                log::debug!(
                    "{} is in {}, ignoring country code '{}'",
                    profile.en,
                    profile.country_code,
                    requested
                );
                profile.country_code.to_string()
            }
            _ => requested,
        };
        let airport = airport_service::airport_for_city(&city.en);
        let (hotel_en, hotel_zh) = *HOTEL_TEMPLATES.choose(rng).unwrap_or(&HOTEL_TEMPLATES[0]);

        Self {
            tz_offset_hours: timezone_service::city_offset(&city.en),
            currency: country_service::currency_code(&country_code).to_string(),
            ground: airport_service::ground_transport(&airport, &country_code),
            hotel: LocalizedText::new(hotel_en.replace("{}", &city.en), hotel_zh.replace("{}", &city.zh)),
            nights: descriptor.trip_length_days.saturating_sub(1),
            catalog: activity_catalog::catalog_for(&city.en, &country_code),
            restaurants: activity_catalog::restaurants_for(&city.en),
            airport,
            country_code,
            city,
        }
    }

    fn local(&self, cny: f64) -> f64 {
        country_service::to_local(&self.country_code, cny)
    }
}

/// Local landing clock and hotel check-in clock of an arrival.
struct Landing {
    check_in: PlanClock,
    arrival: PlanClock,
}

pub struct DayPlanner<'a> {
    destination: &'a Destination,
    settings: &'a PlannerSettings,
}

impl<'a> DayPlanner<'a> {
    pub fn new(destination: &'a Destination, settings: &'a PlannerSettings) -> Self {
        Self { destination, settings }
    }

    /// Plans one day. `starts_at` is the earliest clock the traveller is free
    /// at the destination, see [`DayPlanner::next_day_start`]; boundary days
    /// that open with a flight ignore it.
    pub fn plan_day<R: Rng + ?Sized>(
        &self,
        used: &mut UsedNames,
        date: NaiveDate,
        day_index: u32,
        role: DayRole,
        starts_at: PlanClock,
        rng: &mut R,
    ) -> DayPlan {
        let mut items = Vec::new();
        match role {
            DayRole::Arrival => self.arrival_day(&mut items, used, date, rng),
            DayRole::Middle => self.middle_day(&mut items, used, date, starts_at, rng),
            DayRole::Departure => self.departure_day(&mut items, used, date, starts_at, rng),
            DayRole::Single => self.single_day(&mut items, date, rng),
        }

        items.sort_by_key(|item| item.clock_minutes());
        for item in items.iter_mut().filter(|item| item.cost != 0.0) {
            item.currency = Some(self.destination.currency.clone());
        }
        log::debug!(
            "Planned day {} ({:?}) on {} with {} items",
            day_index,
            role,
            date,
            items.len()
        );

        DayPlan {
            date,
            day_index,
            role,
            items,
        }
    }

    /// Where the day after `plan` may start. A check-in that slipped past
    /// midnight holds the next morning until the traveller has settled in.
    pub fn next_day_start(plan: &DayPlan) -> PlanClock {
        plan.items
            .iter()
            .filter(|item| matches!(&item.detail, ItemDetail::Hotel(hotel) if hotel.action == HotelAction::CheckIn))
            .filter(|item| item.day_offset > 0)
            .map(|item| {
                PlanClock::from_minutes(item.clock_minutes() - item.day_offset as i64 * MINUTES_PER_DAY)
                    .plus(SETTLE_MINUTES)
            })
            .max()
            .unwrap_or(DAY_START)
    }

    fn slot(&self, date: NaiveDate, clock: PlanClock) -> Slot {
        Slot {
            date,
            clock,
            tz_offset_hours: self.destination.tz_offset_hours,
        }
    }

    fn meal_context(&self) -> MealContext<'_> {
        MealContext {
            city: &self.destination.city,
            catalog: &self.destination.catalog,
            restaurants: &self.destination.restaurants,
        }
    }

    fn flights<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        is_return_leg: bool,
        window: DepartureWindow,
        rng: &mut R,
    ) -> FlightPlan {
        let request = FlightRequest {
            is_return_leg,
            destination_city: &self.destination.city.en,
            country_code: &self.destination.country_code,
            date,
            window,
        };
        flight_service::build_flights(&request, &self.settings.flights, rng)
    }

    fn draw_hop<R: Rng + ?Sized>(&self, rng: &mut R) -> (TransportDetail, f64) {
        let mode = HOP_MODES.choose(rng).unwrap_or(&HOP_MODES[0]);
        (
            TransportDetail {
                mode: LocalizedText::new(mode.en, mode.zh),
                minutes: mode.minutes,
            },
            self.destination.local(mode.cny),
        )
    }

    fn push_hop<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        date: NaiveDate,
        clock: PlanClock,
        target: &LocalizedText,
        rng: &mut R,
    ) {
        let (hop, cost) = self.draw_hop(rng);
        let name = LocalizedText::new(
            format!("{} to {}", hop.mode.en, target.en),
            format!("乘{}前往{}", hop.mode.zh, target.zh),
        );
        items.push(scheduled_item(rng, self.slot(date, clock), name, cost, ItemDetail::Transport(hop)));
    }

    fn push_return_hop<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        date: NaiveDate,
        clock: PlanClock,
        rng: &mut R,
    ) {
        self.push_hop(items, date, clock, &self.destination.hotel, rng);
    }

    fn activity_item<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        clock: PlanClock,
        activity: CatalogActivity,
        hop: Option<TransportDetail>,
        rng: &mut R,
    ) -> ItineraryItem {
        let detail = ItemDetail::Activity(ActivityDetail {
            category: activity.category,
            description: activity.description,
            duration_minutes: activity.duration_minutes,
            hop,
        });
        scheduled_item(rng, self.slot(date, clock), activity.name, activity.cost, detail)
    }

    fn meal_item<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        clock: PlanClock,
        meal: Meal,
        chain: &[MealSource],
        used: &mut UsedNames,
        rng: &mut R,
    ) -> ItineraryItem {
        let name = activity_selection::resolve_meal(chain, meal, &self.meal_context(), used, rng);
        let cost = match meal {
            Meal::Breakfast => 0.0,
            Meal::Lunch => self.destination.local(LUNCH_CNY),
            Meal::Dinner => self.destination.local(DINNER_CNY),
        };
        scheduled_item(rng, self.slot(date, clock), name, cost, ItemDetail::Food(FoodDetail { meal }))
    }

    fn hotel_item<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        clock: PlanClock,
        action: HotelAction,
        rng: &mut R,
    ) -> ItineraryItem {
        let hotel = &self.destination.hotel;
        let (name, cost) = match action {
            HotelAction::CheckIn => (
                LocalizedText::new(format!("Check in at {}", hotel.en), format!("入住{}", hotel.zh)),
                self.destination.local(HOTEL_NIGHTLY_CNY) * self.destination.nights.max(1) as f64,
            ),
            HotelAction::CheckOut => (
                LocalizedText::new(format!("Check out of {}", hotel.en), format!("退房{}", hotel.zh)),
                0.0,
            ),
        };
        let detail = ItemDetail::Hotel(HotelDetail {
            action,
            hotel: hotel.clone(),
            nights: self.destination.nights,
        });
        scheduled_item(rng, self.slot(date, clock), name, cost, detail)
    }

    fn ground_item<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        clock: PlanClock,
        target: &LocalizedText,
        rng: &mut R,
    ) -> ItineraryItem {
        let ground = &self.destination.ground;
        let name = LocalizedText::new(
            format!("{} to {}", ground.mode.en, target.en),
            format!("乘{}前往{}", ground.mode.zh, target.zh),
        );
        let detail = ItemDetail::Transport(TransportDetail {
            mode: ground.mode.clone(),
            minutes: ground.minutes,
        });
        scheduled_item(rng, self.slot(date, clock), name, ground.cost, detail)
    }

    /// Inbound flights through hotel check-in.
    fn land<R: Rng + ?Sized>(&self, items: &mut Vec<ItineraryItem>, date: NaiveDate, rng: &mut R) -> Landing {
        let plan = self.flights(date, false, DepartureWindow::outbound(), rng);
        let arrival = plan.arrival;
        items.extend(plan.items);

        let immigration_at = arrival.plus(IMMIGRATION_DELAY_MINUTES);
        let immigration = ItemDetail::Immigration(ImmigrationDetail {
            airport: plan.arrival_airport.clone(),
            terminal: plan.arrival_terminal.clone(),
        });
        items.push(scheduled_item(
            rng,
            self.slot(date, immigration_at),
            LocalizedText::new(
                format!("Immigration at {} {}", plan.arrival_airport, plan.arrival_terminal),
                format!("{} {}入境", plan.arrival_airport, plan.arrival_terminal),
            ),
            0.0,
            immigration,
        ));

        let transport_at = immigration_at.plus(TRANSPORT_GAP_MINUTES);
        items.push(self.ground_item(date, transport_at, &self.destination.hotel, rng));

        let check_in = transport_at.plus(CHECK_IN_GAP_MINUTES.max(self.destination.ground.minutes as i64));
        items.push(self.hotel_item(date, check_in, HotelAction::CheckIn, rng));

        Landing { check_in, arrival }
    }

    /// Checkout, airport transport and the return flights for a departure
    /// drawn from `window`.
    fn leave<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        date: NaiveDate,
        window: DepartureWindow,
        checkout: impl FnOnce(PlanClock) -> PlanClock,
        rng: &mut R,
    ) -> PlanClock {
        let plan = self.flights(date, true, window, rng);
        let departure = plan.departure;
        let checkout_at = checkout(departure);

        let transport_at = std::cmp::max(
            checkout_at.plus(15),
            departure.plus(-AIRPORT_BUFFER_MINUTES - self.destination.ground.minutes as i64),
        );
        let airport = LocalizedText::new(
            format!("{} {}", plan.departure_airport, plan.departure_terminal),
            format!("{} {}", plan.departure_airport, plan.departure_terminal),
        );

        items.push(self.hotel_item(date, checkout_at, HotelAction::CheckOut, rng));
        items.push(self.ground_item(date, transport_at, &airport, rng));
        items.extend(plan.items);
        departure
    }

    fn arrival_day<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        used: &mut UsedNames,
        date: NaiveDate,
        rng: &mut R,
    ) {
        let landing = self.land(items, date, rng);
        let mut free_at = landing.check_in.plus(SETTLE_MINUTES);
        let mut outing = false;

        if landing.arrival.same_day_before(ARRIVAL_ACTIVITY_CUTOFF_HOUR) {
            if let Some(activity) =
                activity_selection::select_activity(&self.destination.catalog, ANY_CATEGORY, used, rng)
            {
                let (hop, _) = self.draw_hop(rng);
                let ends = free_at.plus(hop.minutes as i64 + activity.duration_minutes as i64);
                items.push(self.activity_item(date, free_at, activity, Some(hop), rng));
                free_at = ends.plus(TRANSPORT_GAP_MINUTES);
                outing = true;
            }
        }

        if landing.check_in.same_day_before(ARRIVAL_DINNER_CUTOFF_HOUR) {
            let dinner_at = std::cmp::max(PlanClock::at(18, 30), free_at);
            items.push(self.meal_item(date, dinner_at, Meal::Dinner, RESTAURANT_CHAIN, used, rng));
            free_at = dinner_at.plus(90);
            outing = true;
        }

        if outing {
            self.push_return_hop(items, date, free_at, rng);
        }
    }

    fn middle_day<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        used: &mut UsedNames,
        date: NaiveDate,
        starts_at: PlanClock,
        rng: &mut R,
    ) {
        let catalog = &self.destination.catalog;
        let open = |clock: PlanClock| clock >= starts_at;
        let mut outing = false;

        if open(PlanClock::at(8, 30)) {
            items.push(self.meal_item(date, PlanClock::at(8, 30), Meal::Breakfast, &[MealSource::Generic], used, rng));
        }

        if open(PlanClock::at(9, 30)) {
            if let Some(activity) = activity_selection::select_activity(catalog, MORNING_CATEGORIES, used, rng) {
                self.push_hop(items, date, PlanClock::at(9, 30), &activity.name, rng);
                items.push(self.activity_item(date, PlanClock::at(10, 0), activity, None, rng));
                outing = true;
            }
        }

        if open(PlanClock::at(12, 30)) {
            let lunch = self.meal_item(date, PlanClock::at(13, 0), Meal::Lunch, RESTAURANT_CHAIN, used, rng);
            self.push_hop(items, date, PlanClock::at(12, 30), &lunch.name, rng);
            items.push(lunch);
            outing = true;
        }

        if open(PlanClock::at(14, 30)) {
            if let Some(activity) = activity_selection::select_activity(catalog, AFTERNOON_CATEGORIES, used, rng) {
                self.push_hop(items, date, PlanClock::at(14, 30), &activity.name, rng);
                items.push(self.activity_item(date, PlanClock::at(15, 0), activity, None, rng));
                outing = true;
            }
        }

        if open(PlanClock::at(17, 30)) {
            let dinner = self.meal_item(date, PlanClock::at(18, 0), Meal::Dinner, DINNER_CHAIN, used, rng);
            self.push_hop(items, date, PlanClock::at(17, 30), &dinner.name, rng);
            items.push(dinner);
            outing = true;
        }

        let mut return_at = PlanClock::at(19, 30);
        let night_probability = self.settings.night_activity_probability.clamp(0.0, 1.0);
        if open(PlanClock::at(20, 0)) && rng.gen_bool(night_probability) {
            if let Some(activity) = activity_selection::select_activity(catalog, NIGHT_CATEGORIES, used, rng) {
                self.push_hop(items, date, PlanClock::at(20, 0), &activity.name, rng);
                items.push(self.activity_item(date, PlanClock::at(20, 30), activity, None, rng));
                return_at = PlanClock::at(22, 30);
                outing = true;
            }
        }

        if self.fill_scenic_walks(items, used, date, starts_at, rng) > 0 {
            outing = true;
        }
        if outing {
            self.push_return_hop(items, date, return_at, rng);
        }
    }

    /// Tops a day up to the minimum number of activities with uniquely named
    /// scenic walks, using filler slots from `starts_at` on. Returns how many
    /// were added.
    fn fill_scenic_walks<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        used: &mut UsedNames,
        date: NaiveDate,
        starts_at: PlanClock,
        rng: &mut R,
    ) -> usize {
        let activities = items.iter().filter(|item| item.kind() == ItemKind::Activity).count();
        let missing = MIN_DAY_ACTIVITIES.saturating_sub(activities);
        if missing == 0 {
            return 0;
        }
        log::debug!("Only {} activities on {}, adding {} scenic walk(s)", activities, date, missing);

        let free_slots: Vec<PlanClock> = FILLER_SLOTS
            .iter()
            .map(|(hour, minute)| PlanClock::at(*hour, *minute))
            .filter(|clock| *clock >= starts_at)
            .filter(|clock| {
                !items
                    .iter()
                    .any(|item| item.kind() == ItemKind::Activity && item.clock_minutes() == clock.minutes())
            })
            .take(missing)
            .collect();
        if free_slots.len() < missing {
            log::debug!("Day {} starts at {:?}, only {} filler slot(s) left", date, starts_at.time(), free_slots.len());
        }

        let added = free_slots.len();
        for clock in free_slots {
            let name = activity_selection::claim_scenic_walk(&self.destination.city, used);
            let detail = ItemDetail::Activity(ActivityDetail {
                category: ActivityCategory::Spot,
                description: LocalizedText::new(
                    format!("An unhurried stroll through {}.", self.destination.city.en),
                    format!("在{}悠闲散步。", self.destination.city.zh),
                ),
                duration_minutes: SCENIC_WALK_MINUTES,
                hop: None,
            });
            items.push(scheduled_item(rng, self.slot(date, clock), name, 0.0, detail));
        }
        added
    }

    fn departure_day<R: Rng + ?Sized>(
        &self,
        items: &mut Vec<ItineraryItem>,
        used: &mut UsedNames,
        date: NaiveDate,
        starts_at: PlanClock,
        rng: &mut R,
    ) {
        let window = DepartureWindow::return_leg()
            .not_before(starts_at.plus(AIRPORT_BUFFER_MINUTES), SINGLE_DAY_RETURN_SPAN_MINUTES);
        let departure = self.leave(
            items,
            date,
            window,
            |departure| {
                let checkout = if departure.hour() > LATE_DEPARTURE_HOUR {
                    PlanClock::at(12, 0)
                } else {
                    PlanClock::at(8, 0)
                };
                std::cmp::max(checkout, starts_at)
            },
            rng,
        );

        let morning = PlanClock::at(9, 30);
        if departure.hour() > LATE_DEPARTURE_HOUR && morning >= starts_at {
            if let Some(activity) =
                activity_selection::select_activity(&self.destination.catalog, ANY_CATEGORY, used, rng)
            {
                let (hop, _) = self.draw_hop(rng);
                items.push(self.activity_item(date, morning, activity, Some(hop), rng));
            }
        }
    }

    fn single_day<R: Rng + ?Sized>(&self, items: &mut Vec<ItineraryItem>, date: NaiveDate, rng: &mut R) {
        let landing = self.land(items, date, rng);
        let window = DepartureWindow::starting_at(
            landing.check_in.plus(SINGLE_DAY_RETURN_DELAY_MINUTES),
            SINGLE_DAY_RETURN_SPAN_MINUTES,
        );
        let check_in = landing.check_in;
        self.leave(items, date, window, |_| check_in.plus(SETTLE_MINUTES), rng);
    }
}
