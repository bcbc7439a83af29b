use chrono::NaiveDate;

use crate::domain::models::event::{EventKind, UpcomingEvent};
use crate::domain::models::member::{Child, Member, RelationshipStatus, Spouse};

/// Maps domain member and event types to the shared DTOs.
///
/// Dates leave the backend as `YYYY-MM-DD` strings and timestamps as
/// RFC 3339; the reverse direction (string to date) happens in the domain
/// services where parse failures become validation errors.
pub struct MemberMapper;

impl MemberMapper {
    pub fn member_to_dto(member: &Member) -> shared::Member {
        shared::Member {
            id: member.id.clone(),
            full_name: member.full_name.clone(),
            date_of_birth: member.date_of_birth.map(Self::format_date),
            email: member.email.clone(),
            phone: member.phone.clone(),
            nationality: member.nationality.clone(),
            relationship_status: Self::status_to_dto(member.relationship_status),
            currently_employed: member.currently_employed,
            completed_tertiary: member.completed_tertiary,
            created_at: member.created_at.to_rfc3339(),
            updated_at: member.updated_at.to_rfc3339(),
            spouse: member.spouse.as_ref().map(Self::spouse_to_dto),
            children: member.children.iter().map(Self::child_to_dto).collect(),
        }
    }

    pub fn spouse_to_dto(spouse: &Spouse) -> shared::Spouse {
        shared::Spouse {
            full_name: spouse.full_name.clone(),
            date_of_birth: spouse.date_of_birth.map(Self::format_date),
            marriage_anniversary_date: spouse
                .marriage_anniversary_date
                .map(Self::format_date),
        }
    }

    pub fn child_to_dto(child: &Child) -> shared::Child {
        shared::Child {
            full_name: child.full_name.clone(),
            date_of_birth: child.date_of_birth.map(Self::format_date),
            child_order: child.child_order,
        }
    }

    pub fn event_to_dto(event: UpcomingEvent) -> shared::UpcomingEvent {
        shared::UpcomingEvent {
            kind: Self::kind_to_dto(event.kind),
            display_name: event.display_name,
            occurs_on: Self::format_date(event.occurs_on),
            days_until: event.days_until,
            years: event.years,
            member_id: event.member_id,
            email: event.email,
            phone: event.phone,
        }
    }

    pub fn kind_to_dto(kind: EventKind) -> shared::EventKind {
        match kind {
            EventKind::SelfBirthday => shared::EventKind::SelfBirthday,
            EventKind::SpouseBirthday => shared::EventKind::SpouseBirthday,
            EventKind::Anniversary => shared::EventKind::Anniversary,
            EventKind::ChildBirthday => shared::EventKind::ChildBirthday,
        }
    }

    pub fn status_to_dto(status: RelationshipStatus) -> shared::RelationshipStatus {
        match status {
            RelationshipStatus::Single => shared::RelationshipStatus::Single,
            RelationshipStatus::Married => shared::RelationshipStatus::Married,
            RelationshipStatus::Divorced => shared::RelationshipStatus::Divorced,
            RelationshipStatus::Widowed => shared::RelationshipStatus::Widowed,
        }
    }

    pub fn status_from_dto(status: shared::RelationshipStatus) -> RelationshipStatus {
        match status {
            shared::RelationshipStatus::Single => RelationshipStatus::Single,
            shared::RelationshipStatus::Married => RelationshipStatus::Married,
            shared::RelationshipStatus::Divorced => RelationshipStatus::Divorced,
            shared::RelationshipStatus::Widowed => RelationshipStatus::Widowed,
        }
    }

    fn format_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_member_to_dto_formats_dates() {
        let now = Utc::now();
        let member = Member {
            id: "member::test".to_string(),
            full_name: "Kofi Mensah".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 3, 5),
            email: Some("kofi@example.com".to_string()),
            phone: None,
            nationality: None,
            relationship_status: RelationshipStatus::Married,
            currently_employed: true,
            completed_tertiary: false,
            created_at: now,
            updated_at: now,
            spouse: Some(Spouse {
                full_name: "Ama Mensah".to_string(),
                date_of_birth: None,
                marriage_anniversary_date: NaiveDate::from_ymd_opt(2020, 12, 25),
            }),
            children: vec![Child {
                full_name: "Afia Mensah".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2021, 6, 1),
                child_order: 1,
            }],
        };

        let dto = MemberMapper::member_to_dto(&member);

        assert_eq!(dto.date_of_birth.as_deref(), Some("1995-03-05"));
        assert_eq!(dto.relationship_status, shared::RelationshipStatus::Married);
        let spouse = dto.spouse.unwrap();
        assert_eq!(
            spouse.marriage_anniversary_date.as_deref(),
            Some("2020-12-25")
        );
        assert_eq!(dto.children[0].child_order, 1);
    }

    #[test]
    fn test_event_to_dto() {
        let event = UpcomingEvent {
            kind: EventKind::Anniversary,
            display_name: "Kofi Mensah & Ama Mensah".to_string(),
            occurs_on: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
            days_until: 5,
            years: 4,
            member_id: "member::test".to_string(),
            email: None,
            phone: None,
        };

        let dto = MemberMapper::event_to_dto(event);

        assert_eq!(dto.kind, shared::EventKind::Anniversary);
        assert_eq!(dto.occurs_on, "2024-12-25");
        assert_eq!(dto.days_until, 5);
    }
}
