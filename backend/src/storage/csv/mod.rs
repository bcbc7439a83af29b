//! # CSV Storage Module
//!
//! File-based storage implementation for the membership tracker. Member,
//! spouse, and child records live in three CSV files under one data
//! directory and are joined on read:
//!
//! ```csv
//! id,full_name,date_of_birth,email,...          (members.csv)
//! member_id,full_name,date_of_birth,...         (spouses.csv)
//! member_id,full_name,date_of_birth,child_order (children.csv)
//! ```
//!
//! All writes are atomic (temp file + rename). Blank date fields mean
//! "never recorded"; a field that fails to parse is logged and treated the
//! same way, so one bad row never poisons the rest of the data set.

pub mod connection;
pub mod member_repository;

pub use connection::CsvConnection;
pub use member_repository::MemberRepository;
