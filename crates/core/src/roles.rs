//! Role model and the authorization predicate.
//!
//! Roles are flat tags with no hierarchy: `admin` does not imply `editor`.
//! Access is decided by set intersection between the roles an operation
//! requires and the roles a caller claims.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_ANALYST: &str = "analyst";

/// A role a caller may claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Analyst,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Analyst];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Editor => ROLE_EDITOR,
            Role::Analyst => ROLE_ANALYST,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token does not name a role exactly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact, case-sensitive match. `"Admin"` is not `admin`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_ANALYST => Ok(Role::Analyst),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The set of roles carried by one request or session.
pub type RoleSet = BTreeSet<Role>;

/// Decide whether `claimed` satisfies `required`.
///
/// - An empty `required` set is a public operation and always passes.
/// - Otherwise at least one required role must be claimed (any-of).
pub fn authorize(required: &[Role], claimed: &RoleSet) -> bool {
    required.is_empty() || required.iter().any(|role| claimed.contains(role))
}

/// Parse one comma-separated role claim such as `"admin, editor"`.
///
/// Tokens are trimmed and empty tokens dropped. Tokens that do not name a
/// role exactly are ignored since no required-role set can ever contain them.
pub fn parse_role_claim(raw: &str) -> RoleSet {
    parse_role_claims([raw])
}

/// Union of several claim values, e.g. a header sent more than once.
pub fn parse_role_claims<'a>(values: impl IntoIterator<Item = &'a str>) -> RoleSet {
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<Role>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every subset of the known roles, including the empty set.
    fn all_subsets() -> Vec<Vec<Role>> {
        (0u8..(1 << Role::ALL.len()))
            .map(|mask| {
                Role::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role)
                    .collect()
            })
            .collect()
    }

    // -- authorize -----------------------------------------------------------

    #[test]
    fn intersection_law_holds_for_every_pair_of_subsets() {
        for required in all_subsets() {
            for claimed in all_subsets() {
                let claimed: RoleSet = claimed.into_iter().collect();
                let expected =
                    required.is_empty() || required.iter().any(|r| claimed.contains(r));
                assert_eq!(
                    authorize(&required, &claimed),
                    expected,
                    "required={required:?} claimed={claimed:?}"
                );
            }
        }
    }

    #[test]
    fn public_operation_passes_without_claims() {
        assert!(authorize(&[], &RoleSet::new()));
    }

    #[test]
    fn empty_claim_never_satisfies_a_requirement() {
        assert!(!authorize(&[Role::Admin], &RoleSet::new()));
        assert!(!authorize(&[Role::Admin, Role::Editor], &RoleSet::new()));
    }

    #[test]
    fn any_of_not_all_of() {
        let claimed = parse_role_claim("editor");
        assert!(authorize(&[Role::Admin, Role::Editor], &claimed));
    }

    #[test]
    fn admin_does_not_imply_editor() {
        let claimed = parse_role_claim("admin");
        assert!(!authorize(&[Role::Editor], &claimed));
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn claim_tokens_are_trimmed() {
        let claimed = parse_role_claim("  admin ,editor  ");
        assert_eq!(claimed, RoleSet::from([Role::Admin, Role::Editor]));
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let claimed = parse_role_claim(",, analyst,,");
        assert_eq!(claimed, RoleSet::from([Role::Analyst]));
        assert!(parse_role_claim("").is_empty());
        assert!(parse_role_claim(" , ").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(parse_role_claim("Admin,EDITOR").is_empty());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let claimed = parse_role_claim("viewer,superuser,editor");
        assert_eq!(claimed, RoleSet::from([Role::Editor]));
    }

    #[test]
    fn repeated_claims_are_unioned() {
        let claimed = parse_role_claims(["analyst", "editor, admin"]);
        assert_eq!(claimed.len(), 3);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Editor).unwrap();
        assert_eq!(json, "\"editor\"");
    }
}
