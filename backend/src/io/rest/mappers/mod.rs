//! Conversions between domain models and the shared DTO types.

pub mod member_mapper;

pub use member_mapper::MemberMapper;
