//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use crate::domain::models::member::Member;

/// Trait defining the interface for member storage operations
///
/// The member aggregate (member plus joined spouse and children records) is
/// stored and retrieved as a whole; the domain layer never sees a partially
/// joined member.
pub trait MemberStorage: Send + Sync {
    /// Store a new member
    fn store_member(&self, member: &Member) -> Result<()>;

    /// Retrieve a specific member by ID, with spouse and children joined
    fn get_member(&self, member_id: &str) -> Result<Option<Member>>;

    /// List all members ordered by name
    fn list_members(&self) -> Result<Vec<Member>>;

    /// Update an existing member (replaces spouse and children records)
    fn update_member(&self, member: &Member) -> Result<()>;

    /// Delete a member and their family records by ID
    fn delete_member(&self, member_id: &str) -> Result<()>;
}
