//! Constants for Forkful.
//!
//! TTL tiers follow the volatility of the data they guard: search results
//! change fastest, filter listings slower, reference data almost never.

// ═══════════════════════════════════════════════════════════════════════════════
// TTL TIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// TTL for name-search results, in seconds (5 minutes).
pub const SHORT_TTL_SECONDS: u64 = 5 * 60;

/// TTL for category/area filter listings and combined resolutions (30 minutes).
pub const MEDIUM_TTL_SECONDS: u64 = 30 * 60;

/// TTL for reference data: category list, area list, meals by id (24 hours).
pub const LONG_TTL_SECONDS: u64 = 24 * 60 * 60;

/// TTL used by `set` when the caller does not pass one (1 hour).
pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE MAINTENANCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Interval between background sweeps of expired entries (10 minutes).
pub const SWEEP_INTERVAL_SECONDS: u64 = 10 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM (TheMealDB)
// ═══════════════════════════════════════════════════════════════════════════════

/// Public TheMealDB JSON API root, without the key segment.
pub const MEALDB_API_ROOT: &str = "https://www.themealdb.com/api/json/v1";

/// Free developer key accepted by TheMealDB.
pub const MEALDB_TEST_API_KEY: &str = "1";

/// Default upstream request timeout.
pub const MEALDB_TIMEOUT_SECONDS: u64 = 10;

/// Number of ingredient/measure slot pairs in a full meal record.
pub const INGREDIENT_SLOTS: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// PAGINATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Default page size for meal listings.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;
