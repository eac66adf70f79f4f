//! Session issuance.
//!
//! No credential is verified here: [`FixtureSessionProvider`] hands out a
//! configured identity with a fresh expiry on every call. Anything that can
//! produce a [`Session`] can replace it behind [`SessionProvider`].

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use newsletter_core::roles::{parse_role_claim, Role, RoleSet};
use newsletter_core::types::Timestamp;

use crate::config::{parse_var, ConfigError};

/// The identity and roles of the current caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub tenant_id: String,
    pub roles: RoleSet,
    pub expires_at: Timestamp,
}

/// Source of sessions.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Session;
}

/// Identity served by [`FixtureSessionProvider`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub tenant_id: String,
    pub roles: RoleSet,
    /// Session lifetime in minutes (default: 60).
    pub ttl_mins: i64,
}

/// Default session lifetime in minutes.
const DEFAULT_TTL_MINS: i64 = 60;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: "user_001".into(),
            name: "Alicia Navarro".into(),
            email: "alicia@example.com".into(),
            tenant_id: "tenant_001".into(),
            roles: RoleSet::from([Role::Admin]),
            ttl_mins: DEFAULT_TTL_MINS,
        }
    }
}

impl SessionConfig {
    /// Load the fixture identity.
    ///
    /// | Env Var             | Default              |
    /// |---------------------|----------------------|
    /// | `SESSION_USER_ID`   | `user_001`           |
    /// | `SESSION_NAME`      | `Alicia Navarro`     |
    /// | `SESSION_EMAIL`     | `alicia@example.com` |
    /// | `SESSION_TENANT_ID` | `tenant_001`         |
    /// | `SESSION_ROLES`     | `admin`              |
    /// | `SESSION_TTL_MINS`  | `60`                 |
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ttl_mins = parse_var(lookup, "SESSION_TTL_MINS", "i64", DEFAULT_TTL_MINS)?;
        if ttl_mins <= 0 || expiry_after(Utc::now(), ttl_mins).is_none() {
            return Err(ConfigError {
                key: "SESSION_TTL_MINS",
                expected: "positive number of minutes within the calendar range",
                value: ttl_mins.to_string(),
            });
        }

        Ok(Self {
            user_id: lookup("SESSION_USER_ID").unwrap_or(defaults.user_id),
            name: lookup("SESSION_NAME").unwrap_or(defaults.name),
            email: lookup("SESSION_EMAIL").unwrap_or(defaults.email),
            tenant_id: lookup("SESSION_TENANT_ID").unwrap_or(defaults.tenant_id),
            roles: lookup("SESSION_ROLES")
                .map(|raw| parse_role_claim(&raw))
                .unwrap_or(defaults.roles),
            ttl_mins,
        })
    }
}

/// `from + ttl_mins`, or `None` when that is not a representable time.
fn expiry_after(from: DateTime<Utc>, ttl_mins: i64) -> Option<DateTime<Utc>> {
    Duration::try_minutes(ttl_mins).and_then(|ttl| from.checked_add_signed(ttl))
}

/// Serves the configured identity, expiring `ttl_mins` after each call.
#[derive(Debug, Clone)]
pub struct FixtureSessionProvider {
    config: SessionConfig,
}

impl FixtureSessionProvider {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

impl SessionProvider for FixtureSessionProvider {
    fn session(&self) -> Session {
        Session {
            user_id: self.config.user_id.clone(),
            name: self.config.name.clone(),
            email: self.config.email.clone(),
            tenant_id: self.config.tenant_id.clone(),
            roles: self.config.roles.clone(),
            expires_at: expiry_after(Utc::now(), self.config.ttl_mins)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}
