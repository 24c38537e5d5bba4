//! Typed role sets
//!
//! The identity provider stores roles in a free-form public-metadata JSON
//! bag. This module is the only place that bag is read: it validates the shape
//! and members once, and the rest of the application works with [`RoleSet`].
//!
//! Two layouts are understood:
//! - version 1 (legacy): `{"role": "admin"}`
//! - version 2: `{"rolesVersion": 2, "roles": ["admin", "editor"]}`
//!
//! Writing always produces the current layout.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Layout version written by [`RoleSet::to_public_metadata`]
pub const CURRENT_ROLES_VERSION: u8 = 2;

const LEGACY_ROLES_VERSION: u8 = 1;

/// Role validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Metadata has the wrong JSON type somewhere
    #[error("Invalid role metadata: {0}")]
    InvalidShape(String),

    /// A role name outside the allowed set
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A layout version this build does not understand
    #[error("Unsupported roles version: {0}")]
    UnsupportedVersion(u64),
}

/// Result type for role operations
pub type Result<T> = std::result::Result<T, RoleError>;

/// Allowed roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management
    Admin,
    /// Manages projects, media and site settings
    Editor,
    /// Read-only access to the admin panel
    Viewer,
}

impl Role {
    /// Get the role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(RoleError::UnknownRole(s.to_string())),
        }
    }
}

/// A validated, versioned set of roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoleSet")]
pub struct RoleSet {
    version: u8,
    roles: BTreeSet<Role>,
}

#[derive(Deserialize)]
struct RawRoleSet {
    version: u8,
    roles: BTreeSet<Role>,
}

impl TryFrom<RawRoleSet> for RoleSet {
    type Error = RoleError;

    fn try_from(raw: RawRoleSet) -> Result<Self> {
        match raw.version {
            LEGACY_ROLES_VERSION | CURRENT_ROLES_VERSION => Ok(Self {
                version: raw.version,
                roles: raw.roles,
            }),
            other => Err(RoleError::UnsupportedVersion(u64::from(other))),
        }
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self {
            version: CURRENT_ROLES_VERSION,
            roles: BTreeSet::new(),
        }
    }
}

impl RoleSet {
    /// Create a current-version set from roles
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            version: CURRENT_ROLES_VERSION,
            roles: roles.into_iter().collect(),
        }
    }

    /// Read and validate the identity provider's public metadata
    ///
    /// Absent metadata (`null`) or a bag without role keys is an empty set.
    pub fn from_public_metadata(metadata: &Value) -> Result<Self> {
        let bag = match metadata {
            Value::Null => return Ok(Self::default()),
            Value::Object(bag) => bag,
            other => {
                return Err(RoleError::InvalidShape(format!(
                    "expected an object, got {}",
                    json_type(other)
                )))
            }
        };

        if let Some(roles) = bag.get("roles") {
            Self::check_version(bag)?;
            return Self::parse_roles(roles);
        }

        match bag.get("role") {
            Some(Value::String(name)) => Ok(Self {
                version: LEGACY_ROLES_VERSION,
                roles: BTreeSet::from([name.parse()?]),
            }),
            Some(Value::Null) | None => Ok(Self::default()),
            Some(other) => Err(RoleError::InvalidShape(format!(
                "`role` must be a string, got {}",
                json_type(other)
            ))),
        }
    }

    fn check_version(bag: &Map<String, Value>) -> Result<()> {
        match bag.get("rolesVersion") {
            None => Ok(()),
            Some(Value::Number(n)) => match n.as_u64() {
                Some(v) if v == u64::from(CURRENT_ROLES_VERSION) => Ok(()),
                Some(v) => Err(RoleError::UnsupportedVersion(v)),
                None => Err(RoleError::InvalidShape(format!("bad rolesVersion: {n}"))),
            },
            Some(other) => Err(RoleError::InvalidShape(format!(
                "`rolesVersion` must be a number, got {}",
                json_type(other)
            ))),
        }
    }

    fn parse_roles(roles: &Value) -> Result<Self> {
        let items = roles.as_array().ok_or_else(|| {
            RoleError::InvalidShape(format!("`roles` must be an array, got {}", json_type(roles)))
        })?;

        let roles = items
            .iter()
            .map(|item| match item {
                Value::String(name) => name.parse(),
                other => Err(RoleError::InvalidShape(format!(
                    "role entries must be strings, got {}",
                    json_type(other)
                ))),
            })
            .collect::<Result<BTreeSet<Role>>>()?;

        Ok(Self {
            version: CURRENT_ROLES_VERSION,
            roles,
        })
    }

    /// Metadata bag in the current layout
    pub fn to_public_metadata(&self) -> Value {
        let roles: Vec<&str> = self.roles.iter().map(Role::as_str).collect();
        json!({
            "rolesVersion": CURRENT_ROLES_VERSION,
            "roles": roles,
        })
    }

    /// Layout version this set was read from
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Check if the set was read from the legacy layout
    pub fn is_legacy(&self) -> bool {
        self.version < CURRENT_ROLES_VERSION
    }

    /// Check for a role
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Add a role
    pub fn insert(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Iterate roles in a stable order
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Check if no roles are held
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Check for admin access
    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin)
    }

    /// Check if the holder may edit projects, media and settings
    pub fn can_manage_content(&self) -> bool {
        self.contains(Role::Admin) || self.contains(Role::Editor)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Editor ".parse::<Role>(), Ok(Role::Editor));
        assert_eq!(
            "owner".parse::<Role>(),
            Err(RoleError::UnknownRole("owner".to_string()))
        );
    }

    #[test]
    fn test_current_layout() {
        let metadata = json!({"rolesVersion": 2, "roles": ["editor", "admin", "editor"]});
        let roles = RoleSet::from_public_metadata(&metadata).unwrap();

        assert_eq!(roles.version(), 2);
        assert_eq!(roles.iter().collect::<Vec<_>>(), vec![Role::Admin, Role::Editor]);
        assert!(roles.is_admin());
        assert!(!roles.is_legacy());
    }

    #[test]
    fn test_roles_without_version() {
        let roles = RoleSet::from_public_metadata(&json!({"roles": ["viewer"]})).unwrap();
        assert_eq!(roles.version(), CURRENT_ROLES_VERSION);
        assert!(roles.contains(Role::Viewer));
        assert!(!roles.can_manage_content());
    }

    #[test]
    fn test_legacy_layout() {
        let roles = RoleSet::from_public_metadata(&json!({"role": "editor"})).unwrap();
        assert!(roles.is_legacy());
        assert!(roles.can_manage_content());
        assert!(!roles.is_admin());
    }

    #[test]
    fn test_empty_metadata() {
        assert!(RoleSet::from_public_metadata(&Value::Null).unwrap().is_empty());
        assert!(RoleSet::from_public_metadata(&json!({})).unwrap().is_empty());
        assert!(RoleSet::from_public_metadata(&json!({"theme": "dark"}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = RoleSet::from_public_metadata(&json!({"roles": ["admin", "superuser"]}));
        assert_eq!(result, Err(RoleError::UnknownRole("superuser".to_string())));
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        for metadata in [
            json!("admin"),
            json!({"roles": "admin"}),
            json!({"roles": [1, 2]}),
            json!({"role": ["admin"]}),
            json!({"rolesVersion": "2", "roles": []}),
        ] {
            let result = RoleSet::from_public_metadata(&metadata);
            assert!(matches!(result, Err(RoleError::InvalidShape(_))), "{metadata}");
        }
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let result = RoleSet::from_public_metadata(&json!({"rolesVersion": 3, "roles": []}));
        assert_eq!(result, Err(RoleError::UnsupportedVersion(3)));
    }

    #[test]
    fn test_to_public_metadata_upgrades_legacy() {
        let roles = RoleSet::from_public_metadata(&json!({"role": "admin"})).unwrap();
        assert_eq!(
            roles.to_public_metadata(),
            json!({"rolesVersion": 2, "roles": ["admin"]})
        );

        let reread = RoleSet::from_public_metadata(&roles.to_public_metadata()).unwrap();
        assert!(!reread.is_legacy());
        assert!(reread.is_admin());
    }

    #[test]
    fn test_insert_and_serialize() {
        let mut roles = RoleSet::new([Role::Viewer]);
        assert!(roles.insert(Role::Editor));
        assert!(!roles.insert(Role::Editor));

        let json = serde_json::to_value(&roles).unwrap();
        assert_eq!(json, json!({"version": 2, "roles": ["editor", "viewer"]}));

        let reread: RoleSet = serde_json::from_value(json).unwrap();
        assert_eq!(reread, roles);
    }

    #[test]
    fn test_deserialize_rejects_unknown_version() {
        let result = serde_json::from_value::<RoleSet>(json!({"version": 9, "roles": ["admin"]}));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Unsupported roles version: 9"), "{err}");

        let legacy: RoleSet =
            serde_json::from_value(json!({"version": 1, "roles": ["editor"]})).unwrap();
        assert!(legacy.is_legacy());

        assert!(serde_json::from_value::<RoleSet>(json!({"version": 2, "roles": ["owner"]})).is_err());
    }
}
