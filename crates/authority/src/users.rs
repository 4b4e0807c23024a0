//! Development user directory
//!
//! Loaded from a JSON array of users, or seeded with demo accounts.
//! Each entry carries either a `password_hash` or a plain `password`
//! that is hashed on load.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::crypto::{hash_password, verify_password};
use crate::error::AuthorityError;

/// A user known to the authority
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    password_hash: String,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    id: Option<String>,
    email: String,
    name: String,
    role: String,
    #[serde(default)]
    password_hash: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

const DEMO_USERS: [(&str, &str, &str, &str); 3] = [
    ("admin@hrportal.local", "System Admin", "ADMIN", "admin123"),
    ("hr@hrportal.local", "HR Manager", "HR_ADMIN", "hr123"),
    ("employee@hrportal.local", "Jane Employee", "EMPLOYEE", "employee123"),
];

/// Users keyed by lower-cased email.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, DirectoryUser>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in accounts for local development.
    pub fn demo() -> Result<Self, AuthorityError> {
        let mut directory = Self::new();
        for (email, name, role, password) in DEMO_USERS {
            directory.add_user(
                Uuid::new_v4().to_string(),
                email,
                name,
                role,
                &hash_password(password)?,
            );
        }
        Ok(directory)
    }

    pub fn from_json(content: &str) -> Result<Self, AuthorityError> {
        let records: Vec<UserRecord> = serde_json::from_str(content)
            .map_err(|e| AuthorityError::Internal(format!("Invalid users file: {}", e)))?;

        let mut directory = Self::new();
        for record in records {
            let password_hash = match (record.password_hash, record.password) {
                (Some(hash), _) => hash,
                (None, Some(password)) => hash_password(&password)?,
                (None, None) => {
                    return Err(AuthorityError::Internal(format!(
                        "User {} has neither password nor password_hash",
                        record.email
                    )))
                }
            };
            let id = record.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            directory.add_user(id, &record.email, &record.name, &record.role, &password_hash);
        }

        Ok(directory)
    }

    pub fn from_file(path: &Path) -> Result<Self, AuthorityError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthorityError::Internal(format!("Cannot read users file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn add_user(&mut self, id: String, email: &str, name: &str, role: &str, password_hash: &str) {
        let user = DirectoryUser {
            id,
            email: email.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            password_hash: password_hash.to_string(),
        };
        self.users.insert(email.trim().to_lowercase(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a user and check the password.
    pub fn verify(&self, email: &str, password: &str) -> Option<&DirectoryUser> {
        self.users
            .get(&email.trim().to_lowercase())
            .filter(|user| verify_password(password, &user.password_hash))
    }
}
