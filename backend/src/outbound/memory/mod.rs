//! In-memory adapters for tests and database-less development.
//!
//! Each store keeps its rows behind a `tokio::sync::RwLock` and applies the
//! same uniqueness rules as the PostgreSQL schema while holding the write
//! lock, so concurrent writers observe the constraints atomically.

mod listings;
mod property_requests;
mod users;

pub use listings::InMemoryListingRepository;
pub use property_requests::InMemoryPropertyRequestRepository;
pub use users::InMemoryUserRepository;
