//! Per-operation access policy.
//!
//! [`Operation::required_roles`] is the single table the request guard
//! consults. [`Capabilities`] evaluates the same table for a set of roles so a
//! client can disable controls ahead of time; it is advisory only.

use std::fmt;

use serde::Serialize;

use crate::roles::{authorize, Role, RoleSet};

/// Every operation the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSession,
    ListProjects,
    GetProject,
    ListTemplates,
    GetTemplate,
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateTemplate,
    UpdateTemplate,
    DeleteTemplate,
}

const PUBLIC: &[Role] = &[];
const WRITERS: &[Role] = &[Role::Admin, Role::Editor];
const ADMINS: &[Role] = &[Role::Admin];

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::GetSession,
        Operation::ListProjects,
        Operation::GetProject,
        Operation::ListTemplates,
        Operation::GetTemplate,
        Operation::CreateProject,
        Operation::UpdateProject,
        Operation::DeleteProject,
        Operation::CreateTemplate,
        Operation::UpdateTemplate,
        Operation::DeleteTemplate,
    ];

    /// Roles of which the caller must claim at least one. Empty means public.
    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Operation::GetSession
            | Operation::ListProjects
            | Operation::GetProject
            | Operation::ListTemplates
            | Operation::GetTemplate => PUBLIC,
            Operation::CreateProject
            | Operation::UpdateProject
            | Operation::CreateTemplate
            | Operation::UpdateTemplate => WRITERS,
            Operation::DeleteProject | Operation::DeleteTemplate => ADMINS,
        }
    }

    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            Operation::GetSession
                | Operation::ListProjects
                | Operation::GetProject
                | Operation::ListTemplates
                | Operation::GetTemplate
        )
    }

    pub fn permits(self, claimed: &RoleSet) -> bool {
        authorize(self.required_roles(), claimed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetSession => "get_session",
            Operation::ListProjects => "list_projects",
            Operation::GetProject => "get_project",
            Operation::ListTemplates => "list_templates",
            Operation::GetTemplate => "get_template",
            Operation::CreateProject => "create_project",
            Operation::UpdateProject => "update_project",
            Operation::DeleteProject => "delete_project",
            Operation::CreateTemplate => "create_template",
            Operation::UpdateTemplate => "update_template",
            Operation::DeleteTemplate => "delete_template",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which mutating controls a client should enable for a given role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_create_project: bool,
    pub can_update_project: bool,
    pub can_delete_project: bool,
    pub can_create_template: bool,
    pub can_update_template: bool,
    pub can_delete_template: bool,
}

impl Capabilities {
    pub fn for_roles(roles: &RoleSet) -> Self {
        Self {
            can_create_project: Operation::CreateProject.permits(roles),
            can_update_project: Operation::UpdateProject.permits(roles),
            can_delete_project: Operation::DeleteProject.permits(roles),
            can_create_template: Operation::CreateTemplate.permits(roles),
            can_update_template: Operation::UpdateTemplate.permits(roles),
            can_delete_template: Operation::DeleteTemplate.permits(roles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::parse_role_claim;

    #[test]
    fn reads_are_public() {
        for op in Operation::ALL.iter().filter(|op| !op.is_mutating()) {
            assert!(op.required_roles().is_empty(), "{op} should be public");
            assert!(op.permits(&RoleSet::new()));
        }
    }

    #[test]
    fn every_mutation_requires_a_role() {
        for op in Operation::ALL.iter().filter(|op| op.is_mutating()) {
            assert!(!op.required_roles().is_empty(), "{op} must be gated");
            assert!(!op.permits(&RoleSet::new()));
        }
    }

    #[test]
    fn policy_table_matches_route_requirements() {
        assert_eq!(
            Operation::CreateProject.required_roles(),
            &[Role::Admin, Role::Editor]
        );
        assert_eq!(
            Operation::UpdateProject.required_roles(),
            &[Role::Admin, Role::Editor]
        );
        assert_eq!(Operation::DeleteProject.required_roles(), &[Role::Admin]);
        assert_eq!(
            Operation::CreateTemplate.required_roles(),
            &[Role::Admin, Role::Editor]
        );
        assert_eq!(
            Operation::UpdateTemplate.required_roles(),
            &[Role::Admin, Role::Editor]
        );
        assert_eq!(Operation::DeleteTemplate.required_roles(), &[Role::Admin]);
    }

    #[test]
    fn analyst_cannot_delete_project() {
        assert!(!Operation::DeleteProject.permits(&parse_role_claim("analyst")));
    }

    #[test]
    fn editor_can_write_but_not_delete() {
        let caps = Capabilities::for_roles(&parse_role_claim("editor"));
        assert!(caps.can_create_project);
        assert!(caps.can_update_template);
        assert!(!caps.can_delete_project);
        assert!(!caps.can_delete_template);
    }

    #[test]
    fn admin_has_every_capability() {
        let caps = Capabilities::for_roles(&parse_role_claim("admin"));
        assert_eq!(
            caps,
            Capabilities {
                can_create_project: true,
                can_update_project: true,
                can_delete_project: true,
                can_create_template: true,
                can_update_template: true,
                can_delete_template: true,
            }
        );
    }

    #[test]
    fn unrecognised_roles_have_no_capabilities() {
        let caps = Capabilities::for_roles(&parse_role_claim("viewer"));
        assert!(!caps.can_create_project);
        assert!(!caps.can_update_project);
        assert!(!caps.can_create_template);
    }

    #[test]
    fn capabilities_serialize_camel_case() {
        let caps = Capabilities::for_roles(&RoleSet::new());
        let json = serde_json::to_value(caps).unwrap();
        assert_eq!(json["canDeleteTemplate"], false);
    }
}
