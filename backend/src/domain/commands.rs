//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod members {
    use crate::domain::models::member::{Member, RelationshipStatus};

    /// Input for registering a new member. Dates arrive as `YYYY-MM-DD`
    /// strings and are parsed by the service.
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub full_name: String,
        pub date_of_birth: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub nationality: Option<String>,
        pub relationship_status: Option<RelationshipStatus>,
        pub currently_employed: Option<bool>,
        pub completed_tertiary: Option<bool>,
    }

    /// Partial profile update. A birth date is only accepted while the
    /// member has none on record.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMemberCommand {
        pub member_id: String,
        pub full_name: Option<String>,
        pub date_of_birth: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub nationality: Option<String>,
        pub relationship_status: Option<RelationshipStatus>,
        pub currently_employed: Option<bool>,
        pub completed_tertiary: Option<bool>,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberCommand {
        pub member_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMemberCommand {
        pub member_id: String,
    }

    /// Attach or replace the member's spouse record. Marks the member as
    /// married.
    #[derive(Debug, Clone)]
    pub struct SetSpouseCommand {
        pub member_id: String,
        pub full_name: String,
        pub date_of_birth: Option<String>,
        pub marriage_anniversary_date: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ClearSpouseCommand {
        pub member_id: String,
    }

    /// Append a child to the member's list; the service assigns the next
    /// `child_order`.
    #[derive(Debug, Clone)]
    pub struct AddChildCommand {
        pub member_id: String,
        pub full_name: String,
        pub date_of_birth: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateChildCommand {
        pub member_id: String,
        pub child_order: u32,
        pub full_name: Option<String>,
        pub date_of_birth: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct RemoveChildCommand {
        pub member_id: String,
        pub child_order: u32,
    }

    #[derive(Debug, Clone)]
    pub struct CreateMemberResult {
        pub member: Member,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberResult {
        pub member: Option<Member>,
    }

    #[derive(Debug, Clone)]
    pub struct ListMembersResult {
        pub members: Vec<Member>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMemberResult {
        pub member: Member,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMemberResult {
        pub success_message: String,
    }
}
