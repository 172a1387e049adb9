//! Account roles and the capability check used by the auth gate.
//!
//! Roles are a closed set; the string forms must match the `CHECK`
//! constraint on `users.role`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Role attached to every account and embedded in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Something a request may need permission to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List, delete, invite and re-role accounts.
    ManageUsers,
    /// Edit the site settings singleton.
    EditSettings,
    /// Upsert or delete page-content sections.
    EditContent,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Whether this role holds `capability`.
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => self == Self::Admin,
            Capability::EditSettings | Capability::EditContent => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Self::User),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_USER}, {ROLE_ADMIN}"
            ))),
        }
    }
}

/// Reject `role` with [`CoreError::Forbidden`] unless it holds `capability`.
pub fn authorize(role: Role, capability: Capability) -> Result<(), CoreError> {
    if role.can(capability) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "User role {role} is not authorized to access this route"
        )))
    }
}
