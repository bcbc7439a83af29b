//! Family and membership statistics for the insights views.
//!
//! Aggregates member records into the numbers the dashboard charts show:
//! marriage and children counts, family-size distribution, age groups,
//! birth-month distribution, relationship breakdown, nationality ranking,
//! and the 60-day family event lookahead. All computations are pure over
//! the member snapshot passed in.

use chrono::{Datelike, NaiveDate};
use log::info;
use shared::{
    AgeGroupCount, EmploymentEducationCounts, FamilyInsightsResponse, FamilySizeCount,
    MembershipAnalyticsResponse, MonthCount, NationalityCount, RelationshipCount,
};
use std::collections::HashMap;

use crate::domain::event_scheduler::{EventScheduler, FAMILY_INSIGHTS_HORIZON_DAYS};
use crate::domain::models::event::EventKind;
use crate::domain::models::member::{Member, RelationshipStatus};
use crate::io::rest::mappers::member_mapper::MemberMapper;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Service computing the family insights and analytics projections.
#[derive(Clone, Default)]
pub struct InsightsService {
    event_scheduler: EventScheduler,
}

impl InsightsService {
    pub fn new() -> Self {
        Self {
            event_scheduler: EventScheduler::new(),
        }
    }

    /// Family-focused view: marriage/children counts plus anniversaries and
    /// children's birthdays within the next 60 days.
    pub fn family_insights(&self, members: &[Member], today: NaiveDate) -> FamilyInsightsResponse {
        info!("Computing family insights for {} members", members.len());

        let married_members = members
            .iter()
            .filter(|m| m.relationship_status == RelationshipStatus::Married)
            .count();
        let members_with_children = members.iter().filter(|m| !m.children.is_empty()).count();
        let total_children = members.iter().map(|m| m.children.len()).sum();

        let mut size_counts: HashMap<usize, usize> = HashMap::new();
        for member in members.iter().filter(|m| !m.children.is_empty()) {
            *size_counts.entry(member.children.len()).or_insert(0) += 1;
        }
        let mut family_sizes: Vec<FamilySizeCount> = size_counts
            .into_iter()
            .map(|(children, families)| FamilySizeCount { children, families })
            .collect();
        family_sizes.sort_by_key(|entry| entry.children);

        let upcoming_events = self
            .event_scheduler
            .upcoming_events(members, today, FAMILY_INSIGHTS_HORIZON_DAYS)
            .into_iter()
            .filter(|event| {
                matches!(event.kind, EventKind::Anniversary | EventKind::ChildBirthday)
            })
            .map(MemberMapper::event_to_dto)
            .collect();

        FamilyInsightsResponse {
            married_members,
            members_with_children,
            total_children,
            family_sizes,
            upcoming_events,
        }
    }

    /// Aggregate statistics for the analytics view
    pub fn membership_analytics(
        &self,
        members: &[Member],
        today: NaiveDate,
    ) -> MembershipAnalyticsResponse {
        info!("Computing membership analytics for {} members", members.len());

        MembershipAnalyticsResponse {
            total_members: members.len(),
            age_groups: Self::age_groups(members, today),
            birth_months: Self::birth_months(members),
            relationship_breakdown: Self::relationship_breakdown(members),
            top_nationalities: Self::top_nationalities(members),
            employment_education: Self::employment_education(members),
        }
    }

    fn age_groups(members: &[Member], today: NaiveDate) -> Vec<AgeGroupCount> {
        let groups = ["18-24", "25-29", "30-34", "35-39", "40+"];
        let mut counts = [0usize; 5];

        for member in members {
            let born = match member.date_of_birth {
                Some(date) => date,
                None => continue,
            };
            // Same year arithmetic as the event scheduler's age figure
            let age = today.year() - born.year();
            let index = if age < 25 {
                0
            } else if age < 30 {
                1
            } else if age < 35 {
                2
            } else if age < 40 {
                3
            } else {
                4
            };
            counts[index] += 1;
        }

        groups
            .iter()
            .zip(counts)
            .map(|(group, count)| AgeGroupCount {
                group: group.to_string(),
                count,
            })
            .collect()
    }

    fn birth_months(members: &[Member]) -> Vec<MonthCount> {
        let mut counts = [0usize; 12];
        for member in members {
            if let Some(born) = member.date_of_birth {
                counts[born.month0() as usize] += 1;
            }
        }

        MONTH_NAMES
            .iter()
            .zip(counts)
            .map(|(month, count)| MonthCount {
                month: month.to_string(),
                count,
            })
            .collect()
    }

    fn relationship_breakdown(members: &[Member]) -> Vec<RelationshipCount> {
        let statuses = [
            RelationshipStatus::Single,
            RelationshipStatus::Married,
            RelationshipStatus::Divorced,
            RelationshipStatus::Widowed,
        ];

        statuses
            .into_iter()
            .filter_map(|status| {
                let count = members
                    .iter()
                    .filter(|m| m.relationship_status == status)
                    .count();
                if count == 0 {
                    return None;
                }
                let percentage =
                    ((count as f64 / members.len() as f64) * 100.0).round() as u32;
                Some(RelationshipCount {
                    status: MemberMapper::status_to_dto(status),
                    count,
                    percentage,
                })
            })
            .collect()
    }

    fn top_nationalities(members: &[Member]) -> Vec<NationalityCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for member in members {
            if let Some(ref nationality) = member.nationality {
                *counts.entry(nationality.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<NationalityCount> = counts
            .into_iter()
            .map(|(nationality, count)| NationalityCount {
                nationality: nationality.to_string(),
                count,
            })
            .collect();
        // Descending by count, name as tiebreaker for a stable ranking
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.nationality.cmp(&b.nationality))
        });
        ranked.truncate(5);
        ranked
    }

    fn employment_education(members: &[Member]) -> EmploymentEducationCounts {
        EmploymentEducationCounts {
            employed_with_degree: members
                .iter()
                .filter(|m| m.currently_employed && m.completed_tertiary)
                .count(),
            employed_no_degree: members
                .iter()
                .filter(|m| m.currently_employed && !m.completed_tertiary)
                .count(),
            unemployed_with_degree: members
                .iter()
                .filter(|m| !m.currently_employed && m.completed_tertiary)
                .count(),
            unemployed_no_degree: members
                .iter()
                .filter(|m| !m.currently_employed && !m.completed_tertiary)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::member::{Child, Spouse};
    use chrono::Utc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn member(name: &str, born: Option<NaiveDate>) -> Member {
        let now = Utc::now();
        Member {
            id: format!("member::{}", name),
            full_name: name.to_string(),
            date_of_birth: born,
            email: None,
            phone: None,
            nationality: Some("Ghanaian".to_string()),
            relationship_status: RelationshipStatus::Single,
            currently_employed: false,
            completed_tertiary: false,
            created_at: now,
            updated_at: now,
            spouse: None,
            children: Vec::new(),
        }
    }

    fn married_with_children(name: &str, anniversary: NaiveDate, child_count: u32) -> Member {
        let mut m = member(name, None);
        m.relationship_status = RelationshipStatus::Married;
        m.spouse = Some(Spouse {
            full_name: format!("{} Spouse", name),
            date_of_birth: None,
            marriage_anniversary_date: Some(anniversary),
        });
        for order in 1..=child_count {
            m.children.push(Child {
                full_name: format!("{} Child {}", name, order),
                date_of_birth: Some(date(2015, 7, order)),
                child_order: order,
            });
        }
        m
    }

    #[test]
    fn test_family_insights_counts() {
        let service = InsightsService::new();
        let members = vec![
            married_with_children("A", date(2010, 1, 15), 2),
            married_with_children("B", date(2012, 3, 20), 2),
            member("C", Some(date(1995, 5, 5))),
        ];

        let insights = service.family_insights(&members, date(2024, 6, 1));

        assert_eq!(insights.married_members, 2);
        assert_eq!(insights.members_with_children, 2);
        assert_eq!(insights.total_children, 4);
        assert_eq!(insights.family_sizes.len(), 1);
        assert_eq!(insights.family_sizes[0].children, 2);
        assert_eq!(insights.family_sizes[0].families, 2);
    }

    #[test]
    fn test_family_events_cover_sixty_days_and_exclude_member_birthdays() {
        let service = InsightsService::new();
        // Member birthday and anniversary both within 60 days; only the
        // anniversary belongs in the family view
        let mut m = married_with_children("A", date(2010, 7, 20), 1);
        m.date_of_birth = Some(date(1990, 7, 10));
        let today = date(2024, 6, 1);

        let insights = service.family_insights(&[m], today);

        assert_eq!(insights.upcoming_events.len(), 2);
        assert!(insights
            .upcoming_events
            .iter()
            .all(|e| matches!(
                e.kind,
                shared::EventKind::Anniversary | shared::EventKind::ChildBirthday
            )));
    }

    #[test]
    fn test_age_groups_and_birth_months() {
        let service = InsightsService::new();
        let members = vec![
            member("A", Some(date(2002, 1, 10))), // 22
            member("B", Some(date(1997, 2, 10))), // 27
            member("C", Some(date(1980, 2, 10))), // 44
            member("D", None),
        ];

        let analytics = service.membership_analytics(&members, date(2024, 6, 1));

        assert_eq!(analytics.total_members, 4);
        let by_group: HashMap<&str, usize> = analytics
            .age_groups
            .iter()
            .map(|g| (g.group.as_str(), g.count))
            .collect();
        assert_eq!(by_group["18-24"], 1);
        assert_eq!(by_group["25-29"], 1);
        assert_eq!(by_group["40+"], 1);

        assert_eq!(analytics.birth_months.len(), 12);
        assert_eq!(analytics.birth_months[0].month, "Jan");
        assert_eq!(analytics.birth_months[0].count, 1);
        assert_eq!(analytics.birth_months[1].count, 2);
    }

    #[test]
    fn test_relationship_breakdown_percentages() {
        let service = InsightsService::new();
        let mut married = member("A", None);
        married.relationship_status = RelationshipStatus::Married;
        let members = vec![married, member("B", None), member("C", None), member("D", None)];

        let analytics = service.membership_analytics(&members, date(2024, 6, 1));

        // Only statuses that occur are reported
        assert_eq!(analytics.relationship_breakdown.len(), 2);
        let single = analytics
            .relationship_breakdown
            .iter()
            .find(|r| r.status == shared::RelationshipStatus::Single)
            .unwrap();
        assert_eq!(single.count, 3);
        assert_eq!(single.percentage, 75);
    }

    #[test]
    fn test_top_nationalities_ranked() {
        let service = InsightsService::new();
        let mut members = vec![
            member("A", None),
            member("B", None),
            member("C", None),
        ];
        members[2].nationality = Some("Nigerian".to_string());
        members.push({
            let mut m = member("D", None);
            m.nationality = None;
            m
        });

        let analytics = service.membership_analytics(&members, date(2024, 6, 1));

        assert_eq!(analytics.top_nationalities.len(), 2);
        assert_eq!(analytics.top_nationalities[0].nationality, "Ghanaian");
        assert_eq!(analytics.top_nationalities[0].count, 2);
        assert_eq!(analytics.top_nationalities[1].nationality, "Nigerian");
    }

    #[test]
    fn test_employment_education_quadrants() {
        let service = InsightsService::new();
        let mut a = member("A", None);
        a.currently_employed = true;
        a.completed_tertiary = true;
        let mut b = member("B", None);
        b.currently_employed = true;
        let c = member("C", None);

        let analytics = service.membership_analytics(&[a, b, c], date(2024, 6, 1));

        assert_eq!(analytics.employment_education.employed_with_degree, 1);
        assert_eq!(analytics.employment_education.employed_no_degree, 1);
        assert_eq!(analytics.employment_education.unemployed_no_degree, 1);
        assert_eq!(analytics.employment_education.unemployed_with_degree, 0);
    }
}
