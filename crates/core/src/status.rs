//! Lifecycle statuses for projects and templates.
//!
//! Stored as lowercase text in the database and serialized the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    #[default]
    Draft,
    Published,
}

impl TemplateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateStatus::Draft => "draft",
            TemplateStatus::Published => "published",
        }
    }
}

/// A stored status value that is not part of the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status: {value}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(UnknownStatus {
                kind: "project",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for TemplateStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TemplateStatus::Draft),
            "published" => Ok(TemplateStatus::Published),
            other => Err(UnknownStatus {
                kind: "template",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_creation_defaults() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
        assert_eq!(TemplateStatus::default(), TemplateStatus::Draft);
    }

    #[test]
    fn text_form_round_trips_through_from_str() {
        for status in [ProjectStatus::Active, ProjectStatus::Archived] {
            assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
        }
        for status in [TemplateStatus::Draft, TemplateStatus::Published] {
            assert_eq!(status.as_str().parse::<TemplateStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = "deleted".parse::<ProjectStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown project status: deleted");
        assert!("Draft".parse::<TemplateStatus>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&TemplateStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
        let parsed: ProjectStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Archived);
    }
}
