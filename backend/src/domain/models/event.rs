//! Domain model for computed upcoming events.
//!
//! These are derived projections produced by the event scheduler, never
//! persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    SelfBirthday,
    SpouseBirthday,
    Anniversary,
    ChildBirthday,
}

/// An upcoming birthday or anniversary within the lookahead horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub kind: EventKind,
    /// Composed per event kind, e.g. `"Ama Mensah (Kofi Mensah's spouse)"`
    pub display_name: String,
    /// Next occurrence of the recurring date, never in the past
    pub occurs_on: NaiveDate,
    pub days_until: i64,
    /// Age the celebrant is turning, or years married for anniversaries.
    /// Always `current year - stored year`, even when the occurrence has
    /// rolled into next year.
    pub years: i32,
    /// Back-reference to the originating member
    pub member_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Mutually exclusive time-proximity buckets over a filtered event list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBuckets {
    /// days_until == 0
    pub today: Vec<UpcomingEvent>,
    /// 0 < days_until <= 7
    pub this_week: Vec<UpcomingEvent>,
    /// 7 < days_until <= 30
    pub this_month: Vec<UpcomingEvent>,
}
