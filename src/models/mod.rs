pub mod activity;
pub mod extras;
pub mod itinerary_item;
pub mod trip;
