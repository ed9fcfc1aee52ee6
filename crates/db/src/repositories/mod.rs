//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod commercial_repo;
pub mod population_repo;

pub use commercial_repo::CommercialRepo;
pub use population_repo::PopulationRepo;

/// Row cap for the "latest rows" listings.
pub const LATEST_ROWS_LIMIT: i64 = 10;
