//! In-memory user records for registration tests.
//!
//! Stands in for the application database: tests seed rows, assert on them,
//! and delete them in teardown. Each test run owns its own `UserStore`, so
//! concurrent runs never see each other's rows.

mod fixtures;

pub use fixtures::{load_fixtures, RegistrationFixture};

use std::collections::HashMap;

/// Account status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
        }
    }
}

/// One row, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    pub role: String,
    pub status: UserStatus,
}

#[derive(Debug, Default)]
pub struct UserStore {
    rows: HashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a user with status `ACTIVE`.
    pub fn seed(&mut self, email: &str, password: &str, role: &str) {
        let record = UserRecord {
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            status: UserStatus::Active,
        };
        self.rows.insert(email.to_string(), record);
        tracing::debug!(email, role, "seeded user");
    }

    pub fn exists(&self, email: &str) -> bool {
        self.rows.contains_key(email)
    }

    pub fn status(&self, email: &str) -> Option<UserStatus> {
        self.rows.get(email).map(|r| r.status)
    }

    pub fn get(&self, email: &str) -> Option<&UserRecord> {
        self.rows.get(email)
    }

    /// Remove a user. Unknown emails are ignored; returns whether a row was removed.
    pub fn delete(&mut self, email: &str) -> bool {
        let removed = self.rows.remove(email).is_some();
        if removed {
            tracing::debug!(email, "deleted user");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
