use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::members::{
    AddChildCommand, ClearSpouseCommand, CreateMemberCommand, CreateMemberResult,
    DeleteMemberCommand, DeleteMemberResult, GetMemberCommand, GetMemberResult,
    ListMembersResult, RemoveChildCommand, SetSpouseCommand, UpdateChildCommand,
    UpdateMemberCommand, UpdateMemberResult,
};
use crate::domain::models::member::{
    Child, Member, MemberValidationError, RelationshipStatus, Spouse,
};
use crate::storage::csv::{CsvConnection, MemberRepository};
use crate::storage::traits::MemberStorage;

/// Service for administering members and their family records.
#[derive(Clone)]
pub struct MemberService {
    member_repository: MemberRepository,
}

impl MemberService {
    /// Create a new MemberService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        let member_repository = MemberRepository::new(csv_conn);
        Self { member_repository }
    }

    /// Register a new member
    pub fn create_member(&self, command: CreateMemberCommand) -> Result<CreateMemberResult> {
        info!("Creating member: name={}", command.full_name);

        self.validate_full_name(&command.full_name)?;
        if let Some(ref email) = command.email {
            self.validate_email(email)?;
        }
        let date_of_birth = self.parse_optional_date(command.date_of_birth.as_deref())?;

        let now = Utc::now();
        let member = Member {
            id: Member::generate_id(),
            full_name: command.full_name.trim().to_string(),
            date_of_birth,
            email: command.email,
            phone: command.phone,
            nationality: command.nationality,
            relationship_status: command.relationship_status.unwrap_or_default(),
            currently_employed: command.currently_employed.unwrap_or(false),
            completed_tertiary: command.completed_tertiary.unwrap_or(false),
            created_at: now,
            updated_at: now,
            spouse: None,
            children: Vec::new(),
        };

        self.member_repository.store_member(&member)?;

        info!("Created member: {} with ID: {}", member.full_name, member.id);

        Ok(CreateMemberResult { member })
    }

    /// Get a member by ID
    pub fn get_member(&self, command: GetMemberCommand) -> Result<GetMemberResult> {
        info!("Getting member: {}", command.member_id);

        let member = self.member_repository.get_member(&command.member_id)?;

        if member.is_none() {
            warn!("Member not found: {}", command.member_id);
        }

        Ok(GetMemberResult { member })
    }

    /// List all members ordered by name
    pub fn list_members(&self) -> Result<ListMembersResult> {
        info!("Listing all members");

        let members = self.member_repository.list_members()?;

        info!("Found {} members", members.len());

        Ok(ListMembersResult { members })
    }

    /// Update a member's profile fields.
    ///
    /// A birth date can be set while none is on record; changing a recorded
    /// one is rejected. Moving the relationship status away from Married
    /// clears the spouse record.
    pub fn update_member(&self, command: UpdateMemberCommand) -> Result<UpdateMemberResult> {
        info!("Updating member: {}", command.member_id);

        let mut member = self.require_member(&command.member_id)?;

        if let Some(ref name) = command.full_name {
            self.validate_full_name(name)?;
            member.full_name = name.trim().to_string();
        }
        if let Some(ref email) = command.email {
            self.validate_email(email)?;
            member.email = Some(email.clone());
        }
        if let Some(ref date_str) = command.date_of_birth {
            if member.date_of_birth.is_some() {
                return Err(MemberValidationError::BirthDateImmutable.into());
            }
            member.date_of_birth = Some(self.parse_date(date_str)?);
        }
        if let Some(phone) = command.phone {
            member.phone = Some(phone);
        }
        if let Some(nationality) = command.nationality {
            member.nationality = Some(nationality);
        }
        if let Some(status) = command.relationship_status {
            if status != RelationshipStatus::Married && member.spouse.is_some() {
                info!(
                    "Relationship status of {} changed to {}, clearing spouse record",
                    member.id,
                    status.as_str()
                );
                member.spouse = None;
            }
            member.relationship_status = status;
        }
        if let Some(employed) = command.currently_employed {
            member.currently_employed = employed;
        }
        if let Some(tertiary) = command.completed_tertiary {
            member.completed_tertiary = tertiary;
        }

        member.updated_at = Utc::now();
        self.member_repository.update_member(&member)?;

        info!("Updated member: {} with ID: {}", member.full_name, member.id);

        Ok(UpdateMemberResult { member })
    }

    /// Delete a member and their family records
    pub fn delete_member(&self, command: DeleteMemberCommand) -> Result<DeleteMemberResult> {
        info!("Deleting member: {}", command.member_id);

        let member = self.require_member(&command.member_id)?;

        self.member_repository.delete_member(&command.member_id)?;

        info!("Deleted member: {} with ID: {}", member.full_name, member.id);

        Ok(DeleteMemberResult {
            success_message: format!("Member '{}' deleted successfully", member.full_name),
        })
    }

    /// Attach or replace the member's spouse record and mark them married
    pub fn set_spouse(&self, command: SetSpouseCommand) -> Result<UpdateMemberResult> {
        info!("Setting spouse for member: {}", command.member_id);

        self.validate_full_name(&command.full_name)?;
        let date_of_birth = self.parse_optional_date(command.date_of_birth.as_deref())?;
        let marriage_anniversary_date =
            self.parse_optional_date(command.marriage_anniversary_date.as_deref())?;

        let mut member = self.require_member(&command.member_id)?;
        member.spouse = Some(Spouse {
            full_name: command.full_name.trim().to_string(),
            date_of_birth,
            marriage_anniversary_date,
        });
        member.relationship_status = RelationshipStatus::Married;
        member.updated_at = Utc::now();

        self.member_repository.update_member(&member)?;

        Ok(UpdateMemberResult { member })
    }

    /// Remove the member's spouse record
    pub fn clear_spouse(&self, command: ClearSpouseCommand) -> Result<UpdateMemberResult> {
        info!("Clearing spouse for member: {}", command.member_id);

        let mut member = self.require_member(&command.member_id)?;
        if member.spouse.is_none() {
            return Err(MemberValidationError::NoSpouse.into());
        }

        member.spouse = None;
        member.updated_at = Utc::now();
        self.member_repository.update_member(&member)?;

        Ok(UpdateMemberResult { member })
    }

    /// Append a child to the member's list
    pub fn add_child(&self, command: AddChildCommand) -> Result<UpdateMemberResult> {
        info!(
            "Adding child {} to member: {}",
            command.full_name, command.member_id
        );

        self.validate_full_name(&command.full_name)?;
        let date_of_birth = self.parse_optional_date(command.date_of_birth.as_deref())?;

        let mut member = self.require_member(&command.member_id)?;
        let child_order = member.children.len() as u32 + 1;
        member.children.push(Child {
            full_name: command.full_name.trim().to_string(),
            date_of_birth,
            child_order,
        });
        member.updated_at = Utc::now();

        self.member_repository.update_member(&member)?;

        Ok(UpdateMemberResult { member })
    }

    /// Update one of the member's children, addressed by its order
    pub fn update_child(&self, command: UpdateChildCommand) -> Result<UpdateMemberResult> {
        info!(
            "Updating child {} of member: {}",
            command.child_order, command.member_id
        );

        if let Some(ref name) = command.full_name {
            self.validate_full_name(name)?;
        }
        let date_of_birth = self.parse_optional_date(command.date_of_birth.as_deref())?;

        let mut member = self.require_member(&command.member_id)?;
        let child = member
            .children
            .iter_mut()
            .find(|c| c.child_order == command.child_order)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Member {} has no child with order {}",
                    command.member_id,
                    command.child_order
                )
            })?;

        if let Some(name) = command.full_name {
            child.full_name = name.trim().to_string();
        }
        if date_of_birth.is_some() {
            child.date_of_birth = date_of_birth;
        }
        member.updated_at = Utc::now();

        self.member_repository.update_member(&member)?;

        Ok(UpdateMemberResult { member })
    }

    /// Remove a child and renumber the remaining ones contiguously
    pub fn remove_child(&self, command: RemoveChildCommand) -> Result<UpdateMemberResult> {
        info!(
            "Removing child {} from member: {}",
            command.child_order, command.member_id
        );

        let mut member = self.require_member(&command.member_id)?;
        let before = member.children.len();
        member
            .children
            .retain(|c| c.child_order != command.child_order);
        if member.children.len() == before {
            return Err(anyhow::anyhow!(
                "Member {} has no child with order {}",
                command.member_id,
                command.child_order
            ));
        }

        for (index, child) in member.children.iter_mut().enumerate() {
            child.child_order = index as u32 + 1;
        }
        member.updated_at = Utc::now();

        self.member_repository.update_member(&member)?;

        Ok(UpdateMemberResult { member })
    }

    fn require_member(&self, member_id: &str) -> Result<Member> {
        self.member_repository
            .get_member(member_id)?
            .ok_or_else(|| anyhow::anyhow!("Member not found: {}", member_id))
    }

    /// Validate a person name
    fn validate_full_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName.into());
        }
        if name.len() > 100 {
            return Err(MemberValidationError::NameTooLong.into());
        }
        Ok(())
    }

    /// Validate an email address (presence of a single '@' with both sides
    /// non-empty is enough for admin data entry)
    fn validate_email(&self, email: &str) -> Result<()> {
        let mut parts = email.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(MemberValidationError::InvalidEmail(email.to_string()).into()),
        }
    }

    /// Validate date format (ISO 8601: YYYY-MM-DD) and parse it
    fn parse_date(&self, date_str: &str) -> Result<NaiveDate> {
        let date_parts: Vec<&str> = date_str.split('-').collect();
        if date_parts.len() != 3 {
            return Err(MemberValidationError::InvalidDateFormat.into());
        }

        let year: u32 = date_parts[0]
            .parse()
            .map_err(|_| MemberValidationError::InvalidDateFormat)?;
        let month: u32 = date_parts[1]
            .parse()
            .map_err(|_| MemberValidationError::InvalidDateFormat)?;
        let day: u32 = date_parts[2]
            .parse()
            .map_err(|_| MemberValidationError::InvalidDateFormat)?;

        if !(1900..=2100).contains(&year) {
            return Err(MemberValidationError::YearOutOfRange.into());
        }
        if !(1..=12).contains(&month) {
            return Err(MemberValidationError::MonthOutOfRange.into());
        }
        if !(1..=31).contains(&day) {
            return Err(MemberValidationError::DayOutOfRange.into());
        }

        NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid calendar date: {}", date_str))
    }

    fn parse_optional_date(&self, date_str: Option<&str>) -> Result<Option<NaiveDate>> {
        match date_str {
            Some(s) => Ok(Some(self.parse_date(s)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> MemberService {
        let temp_dir = tempdir().unwrap().keep();
        let conn = CsvConnection::new(&temp_dir).unwrap();
        MemberService::new(Arc::new(conn))
    }

    fn create_command(name: &str, birthdate: Option<&str>) -> CreateMemberCommand {
        CreateMemberCommand {
            full_name: name.to_string(),
            date_of_birth: birthdate.map(|s| s.to_string()),
            email: None,
            phone: None,
            nationality: None,
            relationship_status: None,
            currently_employed: None,
            completed_tertiary: None,
        }
    }

    #[test]
    fn test_create_member() {
        let service = setup_test();

        let result = service
            .create_member(create_command("  Kofi Mensah ", Some("1995-03-15")))
            .unwrap();

        assert_eq!(result.member.full_name, "Kofi Mensah");
        assert_eq!(
            result.member.date_of_birth.unwrap().to_string(),
            "1995-03-15"
        );
        assert_eq!(
            result.member.relationship_status,
            RelationshipStatus::Single
        );
        assert!(result.member.children.is_empty());
    }

    #[test]
    fn test_create_member_validation() {
        let service = setup_test();

        assert!(service.create_member(create_command("  ", None)).is_err());
        assert!(service
            .create_member(create_command(&"a".repeat(101), None))
            .is_err());
        assert!(service
            .create_member(create_command("Bad Date", Some("1995/03/15")))
            .is_err());
        assert!(service
            .create_member(create_command("Bad Date", Some("1995-13-01")))
            .is_err());
        assert!(service
            .create_member(create_command("Bad Date", Some("1995-02-30")))
            .is_err());

        let mut command = create_command("Bad Email", None);
        command.email = Some("not-an-email".to_string());
        assert!(service.create_member(command).is_err());
    }

    #[test]
    fn test_get_and_list_members() {
        let service = setup_test();
        service
            .create_member(create_command("Kwame Boateng", None))
            .unwrap();
        let created = service
            .create_member(create_command("Afia Owusu", Some("1990-01-01")))
            .unwrap();

        let fetched = service
            .get_member(GetMemberCommand {
                member_id: created.member.id.clone(),
            })
            .unwrap();
        assert_eq!(fetched.member.unwrap().full_name, "Afia Owusu");

        let listed = service.list_members().unwrap();
        assert_eq!(listed.members.len(), 2);
        // Ordered by name
        assert_eq!(listed.members[0].full_name, "Afia Owusu");
        assert_eq!(listed.members[1].full_name, "Kwame Boateng");
    }

    #[test]
    fn test_get_nonexistent_member() {
        let service = setup_test();
        let result = service
            .get_member(GetMemberCommand {
                member_id: "member::missing".to_string(),
            })
            .unwrap();
        assert!(result.member.is_none());
    }

    #[test]
    fn test_update_member_profile() {
        let service = setup_test();
        let created = service
            .create_member(create_command("Old Name", None))
            .unwrap();

        let updated = service
            .update_member(UpdateMemberCommand {
                member_id: created.member.id.clone(),
                full_name: Some("  New Name  ".to_string()),
                email: Some("new@example.com".to_string()),
                currently_employed: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.member.full_name, "New Name");
        assert_eq!(updated.member.email.as_deref(), Some("new@example.com"));
        assert!(updated.member.currently_employed);
        assert!(updated.member.updated_at > created.member.created_at);
    }

    #[test]
    fn test_birth_date_is_immutable_once_set() {
        let service = setup_test();
        let created = service
            .create_member(create_command("No Date Yet", None))
            .unwrap();

        // Can be set while absent
        let updated = service
            .update_member(UpdateMemberCommand {
                member_id: created.member.id.clone(),
                date_of_birth: Some("1992-06-01".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(updated.member.date_of_birth.is_some());

        // But never changed afterwards
        let result = service.update_member(UpdateMemberCommand {
            member_id: created.member.id,
            date_of_birth: Some("1993-06-01".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_set_spouse_marks_member_married() {
        let service = setup_test();
        let created = service
            .create_member(create_command("Kofi Mensah", None))
            .unwrap();

        let updated = service
            .set_spouse(SetSpouseCommand {
                member_id: created.member.id,
                full_name: "Ama Mensah".to_string(),
                date_of_birth: Some("1992-04-12".to_string()),
                marriage_anniversary_date: Some("2018-04-20".to_string()),
            })
            .unwrap();

        assert_eq!(
            updated.member.relationship_status,
            RelationshipStatus::Married
        );
        let spouse = updated.member.spouse.unwrap();
        assert_eq!(spouse.full_name, "Ama Mensah");
        assert_eq!(
            spouse.marriage_anniversary_date.unwrap().to_string(),
            "2018-04-20"
        );
    }

    #[test]
    fn test_status_change_clears_spouse() {
        let service = setup_test();
        let created = service
            .create_member(create_command("Kofi Mensah", None))
            .unwrap();
        service
            .set_spouse(SetSpouseCommand {
                member_id: created.member.id.clone(),
                full_name: "Ama Mensah".to_string(),
                date_of_birth: None,
                marriage_anniversary_date: None,
            })
            .unwrap();

        let updated = service
            .update_member(UpdateMemberCommand {
                member_id: created.member.id,
                relationship_status: Some(RelationshipStatus::Divorced),
                ..Default::default()
            })
            .unwrap();

        assert!(updated.member.spouse.is_none());
        assert_eq!(
            updated.member.relationship_status,
            RelationshipStatus::Divorced
        );
    }

    #[test]
    fn test_clear_spouse_requires_spouse() {
        let service = setup_test();
        let created = service
            .create_member(create_command("Kofi Mensah", None))
            .unwrap();

        let result = service.clear_spouse(ClearSpouseCommand {
            member_id: created.member.id,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_children_are_ordered_and_renumbered() {
        let service = setup_test();
        let created = service
            .create_member(create_command("Kofi Mensah", None))
            .unwrap();
        let member_id = created.member.id;

        service
            .add_child(AddChildCommand {
                member_id: member_id.clone(),
                full_name: "Abena".to_string(),
                date_of_birth: Some("2015-06-10".to_string()),
            })
            .unwrap();
        service
            .add_child(AddChildCommand {
                member_id: member_id.clone(),
                full_name: "Yaw".to_string(),
                date_of_birth: None,
            })
            .unwrap();
        let with_third = service
            .add_child(AddChildCommand {
                member_id: member_id.clone(),
                full_name: "Esi".to_string(),
                date_of_birth: Some("2020-01-05".to_string()),
            })
            .unwrap();

        let orders: Vec<u32> = with_third
            .member
            .children
            .iter()
            .map(|c| c.child_order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let after_removal = service
            .remove_child(RemoveChildCommand {
                member_id: member_id.clone(),
                child_order: 2,
            })
            .unwrap();
        let names: Vec<&str> = after_removal
            .member
            .children
            .iter()
            .map(|c| c.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Abena", "Esi"]);
        let orders: Vec<u32> = after_removal
            .member
            .children
            .iter()
            .map(|c| c.child_order)
            .collect();
        assert_eq!(orders, vec![1, 2]);

        let renamed = service
            .update_child(UpdateChildCommand {
                member_id: member_id.clone(),
                child_order: 1,
                full_name: Some("Abena Mensah".to_string()),
                date_of_birth: None,
            })
            .unwrap();
        assert_eq!(renamed.member.children[0].full_name, "Abena Mensah");
        // Unchanged when not provided
        assert_eq!(
            renamed.member.children[0].date_of_birth.unwrap().to_string(),
            "2015-06-10"
        );

        let result = service.remove_child(RemoveChildCommand {
            member_id,
            child_order: 9,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_member() {
        let service = setup_test();
        let created = service
            .create_member(create_command("To Be Deleted", None))
            .unwrap();

        service
            .delete_member(DeleteMemberCommand {
                member_id: created.member.id.clone(),
            })
            .unwrap();

        let fetched = service
            .get_member(GetMemberCommand {
                member_id: created.member.id,
            })
            .unwrap();
        assert!(fetched.member.is_none());

        let result = service.delete_member(DeleteMemberCommand {
            member_id: "member::missing".to_string(),
        });
        assert!(result.is_err());
    }
}
