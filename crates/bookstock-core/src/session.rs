//! Users, roles, and the session capability.
//!
//! Authorization here is a thin role gate, not a security boundary: the
//! presentation layer decides which operations are invocable by asking the
//! session. The inventory engine itself performs no authorization — it
//! trusts its caller, and the [`Session`] is passed explicitly rather than
//! read from any ambient global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Manager,
  User,
}

impl Role {
  /// Whether this role may add, reprice, or remove inventory.
  pub fn can_mutate_inventory(&self) -> bool {
    matches!(self, Self::Admin | Self::Manager)
  }

  /// The lowercase discriminant used on the wire and in displays.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Manager => "manager",
      Self::User => "user",
    }
  }
}

impl std::str::FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "admin" => Ok(Self::Admin),
      "manager" => Ok(Self::Manager),
      "user" => Ok(Self::User),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:       i64,
  pub username: String,
  pub name:     String,
  pub role:     Role,
}

/// Login input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// An established session as returned by a successful login.
/// The token is opaque to everything but the backend that issued it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
  pub user:         User,
  pub token:        String,
  pub logged_in_at: DateTime<Utc>,
}

// ─── Session capability ──────────────────────────────────────────────────────

/// The capability holder the presentation layer consults before exposing
/// mutations. Anonymous sessions can browse but not edit.
#[derive(Debug, Clone, Default)]
pub struct Session {
  user: Option<User>,
}

impl Session {
  pub fn anonymous() -> Self {
    Self { user: None }
  }

  pub fn authenticated(user: User) -> Self {
    Self { user: Some(user) }
  }

  pub fn current_user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.user.is_some()
  }

  /// May this session add, reprice, or remove inventory?
  pub fn can_mutate_inventory(&self) -> bool {
    self
      .user
      .as_ref()
      .is_some_and(|u| u.role.can_mutate_inventory())
  }

  pub fn clear(&mut self) {
    self.user = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(role: Role) -> User {
    User {
      id:       1,
      username: "staff".into(),
      name:     "Staff Member".into(),
      role,
    }
  }

  #[test]
  fn admin_and_manager_may_edit() {
    assert!(Session::authenticated(user(Role::Admin)).can_mutate_inventory());
    assert!(Session::authenticated(user(Role::Manager)).can_mutate_inventory());
    assert!(!Session::authenticated(user(Role::User)).can_mutate_inventory());
    assert!(!Session::anonymous().can_mutate_inventory());
  }
}
