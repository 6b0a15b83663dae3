//! HTTP client for TheMealDB.
//!
//! Implements [`forkful_core::RecipeSource`] over the public JSON API and
//! maps transport, status and decode failures onto `ForkfulError`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod mealdb;

pub use mealdb::{MealDbClient, MealDbConfig};
