//! Domain types for Forkful.
//!
//! - [`MealRecord`]: a full meal exactly as the upstream API sends it
//! - [`PartialMeal`]: the id/name/thumbnail projection filter endpoints return
//! - [`Meal`]: a cleaned-up full meal with extracted ingredients
//! - [`MealSummary`]: the card-sized projection handed to consumers
//! - [`FilterRequest`]: search text plus selected categories and areas

mod filter;
mod meal;

pub use filter::*;
pub use meal::*;
