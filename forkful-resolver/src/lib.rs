//! # Forkful Resolver
//!
//! Turns a search string and/or selected categories and areas into one
//! deduplicated list of meal summaries.
//!
//! The upstream API filters by a single axis per call, so the resolver picks
//! one axis for the fetch (search, else categories, else areas) and applies
//! the rest client-side. Every upstream call and every whole resolution is
//! memoized in the shared [`TtlCache`](forkful_cache::TtlCache).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod resolver;

pub use config::{ResolverConfig, TtlPolicy};
pub use resolver::MealResolver;
