//! # Forkful Core
//!
//! Core types, errors, and traits shared by every Forkful crate.
//!
//! - **Types**: meal records as the upstream API sends them, the projections
//!   handed to consumers, and the filter request value object
//! - **Errors**: the structured error taxonomy for upstream failures
//! - **Constants**: TTL tiers, sweep interval, upstream defaults
//! - **Traits**: the [`RecipeSource`] fetch contract
//!
//! ## Example
//!
//! ```rust
//! use forkful_core::FilterRequest;
//!
//! let request = FilterRequest::new()
//!     .with_categories(["Chicken", "Beef"])
//!     .with_areas(["Italian"]);
//! assert!(request.has_filters());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{ForkfulError, Result};
pub use traits::*;
pub use types::*;
