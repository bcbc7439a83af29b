//! Domain model types.

pub mod event;
pub mod member;
