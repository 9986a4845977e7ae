//! User entity.

use super::super::value_objects::{Address, Email, UserRole};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered adopter or shelter administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name, unique per account.
    pub username: String,

    /// User's email address, unique across the system.
    pub email: Email,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Brazilian CPF document number.
    pub cpf: String,

    /// Contact phone number.
    pub phone: String,

    /// Home address with optional geolocation.
    pub address: Address,

    /// User's role.
    pub role: UserRole,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(
        username: String,
        email: Email,
        password_hash: String,
        cpf: String,
        phone: String,
        address: Address,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            cpf,
            phone,
            address,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Checks if the user has the specified role or higher.
    #[must_use]
    pub const fn has_role(&self, required_role: UserRole) -> bool {
        self.role.has_permission(required_role)
    }

    /// Updates the user's password hash.
    pub fn update_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Applies a profile update. `None` fields are left unchanged.
    pub fn apply_update(
        &mut self,
        username: Option<String>,
        email: Option<Email>,
        phone: Option<String>,
        address: Option<Address>,
    ) {
        if let Some(username) = username {
            self.username = username;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(address) = address {
            self.address = address;
        }
        self.updated_at = Utc::now();
    }

    /// Changes the user's role.
    pub fn change_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
