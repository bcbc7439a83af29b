//! Shared DTO types for the membership tracker.
//!
//! These types define the public API surface between the backend and any
//! frontend (dashboard cards, member table, notification modals). All dates
//! cross this boundary as `YYYY-MM-DD` strings; parsing into proper date
//! types happens in the backend's mapper layer.

use serde::{Deserialize, Serialize};

/// Relationship status of a member, driving spouse lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Default for RelationshipStatus {
    fn default() -> Self {
        RelationshipStatus::Single
    }
}

/// A registered member of the foundation's associate program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub full_name: String,
    /// Birth date as `YYYY-MM-DD`, absent when never recorded
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub relationship_status: RelationshipStatus,
    pub currently_employed: bool,
    pub completed_tertiary: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
    pub spouse: Option<Spouse>,
    /// Ordered by `child_order`
    pub children: Vec<Child>,
}

/// Spouse record, one per married member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spouse {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub marriage_anniversary_date: Option<String>,
}

/// Child record belonging to a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    /// Position within the member's children list (1-based)
    pub child_order: u32,
}

/// Kind of life-cycle event shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SelfBirthday,
    SpouseBirthday,
    Anniversary,
    ChildBirthday,
}

/// A computed upcoming event (birthday or anniversary) within the lookahead
/// horizon. Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub kind: EventKind,
    pub display_name: String,
    /// Next occurrence date as `YYYY-MM-DD`
    pub occurs_on: String,
    pub days_until: i64,
    /// Age the celebrant is turning, or years married for anniversaries
    pub years: i32,
    pub member_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Bucketed upcoming events for the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEventsResponse {
    pub horizon_days: i64,
    /// Full filtered list, ascending by days_until
    pub events: Vec<UpcomingEvent>,
    /// Events with days_until == 0
    pub today: Vec<UpcomingEvent>,
    /// Events with 0 < days_until <= 7
    pub this_week: Vec<UpcomingEvent>,
    /// Events with 7 < days_until <= 30
    pub this_month: Vec<UpcomingEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub relationship_status: Option<RelationshipStatus>,
    pub currently_employed: Option<bool>,
    pub completed_tertiary: Option<bool>,
}

/// Partial update of a member's profile. `date_of_birth` is only accepted
/// when the member has no birth date on record yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub relationship_status: Option<RelationshipStatus>,
    pub currently_employed: Option<bool>,
    pub completed_tertiary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub member: Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMemberResponse {
    pub success_message: String,
}

/// Attach or replace a member's spouse record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSpouseRequest {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub marriage_anniversary_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddChildRequest {
    pub full_name: String,
    pub date_of_birth: Option<String>,
}

/// Family-focused statistics for the secondary insights view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyInsightsResponse {
    pub married_members: usize,
    pub members_with_children: usize,
    pub total_children: usize,
    /// Histogram of children-per-member for members who have children
    pub family_sizes: Vec<FamilySizeCount>,
    /// Anniversaries and child birthdays in the next 60 days
    pub upcoming_events: Vec<UpcomingEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySizeCount {
    pub children: usize,
    pub families: usize,
}

/// Aggregate statistics for the analytics view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipAnalyticsResponse {
    pub total_members: usize,
    pub age_groups: Vec<AgeGroupCount>,
    /// Counts for Jan..Dec, always 12 entries
    pub birth_months: Vec<MonthCount>,
    pub relationship_breakdown: Vec<RelationshipCount>,
    /// Top 5 nationalities by member count, descending
    pub top_nationalities: Vec<NationalityCount>,
    pub employment_education: EmploymentEducationCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupCount {
    pub group: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipCount {
    pub status: RelationshipStatus,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalityCount {
    pub nationality: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentEducationCounts {
    pub employed_with_degree: usize,
    pub employed_no_degree: usize,
    pub unemployed_with_degree: usize,
    pub unemployed_no_degree: usize,
}
