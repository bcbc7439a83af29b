//! Upcoming event scheduling for the membership dashboard.
//!
//! This module computes the life-cycle events (member birthdays, spouse
//! birthdays, marriage anniversaries, children's birthdays) that fall within
//! a lookahead window, annotated with days-until and partitioned into
//! today / this week / this month buckets for display and for driving the
//! notification actions (email, call, wish, reminder).
//!
//! The computation is a pure transform: the reference date is an explicit
//! parameter, the input member list is not mutated, and the same inputs
//! always produce the same output. Callers refreshing a dashboard should
//! capture "today" once per pass so the buckets stay consistent.

use chrono::{Datelike, NaiveDate};

use crate::domain::models::event::{EventBuckets, EventKind, UpcomingEvent};
use crate::domain::models::member::Member;

/// Lookahead window for the primary dashboard view
pub const DASHBOARD_HORIZON_DAYS: i64 = 30;

/// Lookahead window for the family insights view
pub const FAMILY_INSIGHTS_HORIZON_DAYS: i64 = 60;

/// Stateless scheduler that projects member records into upcoming events.
#[derive(Clone, Default)]
pub struct EventScheduler;

impl EventScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Compute all events within `horizon_days` of `today`, sorted ascending
    /// by days-until. Ties keep emission order: self birthday, spouse
    /// birthday, anniversary, children in list order, members in input order.
    ///
    /// A record with no date contributes no event of that type; nothing is
    /// raised and the remaining members and event types are unaffected.
    pub fn upcoming_events(
        &self,
        members: &[Member],
        today: NaiveDate,
        horizon_days: i64,
    ) -> Vec<UpcomingEvent> {
        let mut events = Vec::new();

        for member in members {
            if let Some(born) = member.date_of_birth {
                self.push_if_within(
                    &mut events,
                    member,
                    EventKind::SelfBirthday,
                    member.full_name.clone(),
                    born,
                    today,
                    horizon_days,
                );
            }

            if let Some(spouse) = &member.spouse {
                if let Some(born) = spouse.date_of_birth {
                    let display_name =
                        format!("{} ({}'s spouse)", spouse.full_name, member.full_name);
                    self.push_if_within(
                        &mut events,
                        member,
                        EventKind::SpouseBirthday,
                        display_name,
                        born,
                        today,
                        horizon_days,
                    );
                }

                if let Some(married_on) = spouse.marriage_anniversary_date {
                    let display_name = format!("{} & {}", member.full_name, spouse.full_name);
                    self.push_if_within(
                        &mut events,
                        member,
                        EventKind::Anniversary,
                        display_name,
                        married_on,
                        today,
                        horizon_days,
                    );
                }
            }

            for child in &member.children {
                if let Some(born) = child.date_of_birth {
                    let display_name =
                        format!("{} ({}'s child)", child.full_name, member.full_name);
                    self.push_if_within(
                        &mut events,
                        member,
                        EventKind::ChildBirthday,
                        display_name,
                        born,
                        today,
                        horizon_days,
                    );
                }
            }
        }

        // sort_by_key is stable, so equal days keep emission order
        events.sort_by_key(|event| event.days_until);
        events
    }

    fn push_if_within(
        &self,
        events: &mut Vec<UpcomingEvent>,
        member: &Member,
        kind: EventKind,
        display_name: String,
        stored: NaiveDate,
        today: NaiveDate,
        horizon_days: i64,
    ) {
        let (occurs_on, days_until) = match self.next_occurrence(stored, today) {
            Some(occurrence) => occurrence,
            None => return,
        };

        if days_until > horizon_days {
            return;
        }

        events.push(UpcomingEvent {
            kind,
            display_name,
            occurs_on,
            days_until,
            // Reported as current year minus stored year even when the
            // occurrence rolled into next year, matching the dashboard cards.
            years: today.year() - stored.year(),
            member_id: member.id.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
        });
    }

    /// Next calendar instance of a recurring annual date, on or after
    /// `today`, together with the number of whole days until it.
    pub fn next_occurrence(&self, stored: NaiveDate, today: NaiveDate) -> Option<(NaiveDate, i64)> {
        let mut occurrence = Self::occurrence_in_year(today.year(), stored)?;
        if occurrence < today {
            occurrence = Self::occurrence_in_year(today.year() + 1, stored)?;
        }
        Some((occurrence, (occurrence - today).num_days()))
    }

    /// Place a recurring month/day in a concrete year. Feb 29 lands on
    /// Mar 1 in common years.
    fn occurrence_in_year(year: i32, stored: NaiveDate) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, stored.month(), stored.day()).or_else(|| {
            if stored.month() == 2 && stored.day() == 29 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }

    /// Partition a sorted event list into mutually exclusive display buckets.
    pub fn bucket_events(&self, events: &[UpcomingEvent]) -> EventBuckets {
        EventBuckets {
            today: events
                .iter()
                .filter(|e| e.days_until == 0)
                .cloned()
                .collect(),
            this_week: events
                .iter()
                .filter(|e| e.days_until > 0 && e.days_until <= 7)
                .cloned()
                .collect(),
            this_month: events
                .iter()
                .filter(|e| e.days_until > 7 && e.days_until <= 30)
                .cloned()
                .collect(),
        }
    }
}
