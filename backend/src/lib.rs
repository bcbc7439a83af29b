//! # Membership Tracker Backend
//!
//! Backend for a community foundation's membership administration
//! dashboard. Members, their spouses, and their children are persisted in
//! CSV files; the domain layer computes upcoming birthdays and wedding
//! anniversaries, family insights, and membership analytics; the IO layer
//! exposes everything over an axum REST API.

pub mod domain;
pub mod io;
pub mod storage;
