//! Storage layer for the membership tracker.
//!
//! The domain services depend only on the traits defined here; the CSV
//! implementation is the one storage backend this deployment ships with.

pub mod csv;
pub mod traits;

pub use traits::MemberStorage;
