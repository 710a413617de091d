//! Registration scenarios loaded from JSON.
//!
//! The file is a JSON array of camelCase objects:
//!
//! ```json
//! [{ "scenarioName": "basic", "firstName": "Ada", "lastName": "Lovelace",
//!    "password": "pw", "role": "customer", "address1": "1 Main St",
//!    "country": "Canada", "state": "ON", "city": "Toronto",
//!    "zipcode": "M5V", "mobileNumber": "5550100" }]
//! ```

use crate::error::{io_at, Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFixture {
    pub scenario_name: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub mobile_number: String,
}

impl RegistrationFixture {
    /// Per-run email so repeated runs don't collide: `{firstName}{token}@test.com`.
    pub fn unique_email(&self, token: &str) -> String {
        format!("{}{}@test.com", self.first_name, token)
    }
}

pub fn load_fixtures(path: &Path) -> Result<Vec<RegistrationFixture>> {
    let data = fs::read_to_string(path).map_err(io_at("read", path))?;
    let fixtures: Vec<RegistrationFixture> =
        serde_json::from_str(&data).map_err(|source| Error::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = fixtures.len(), "loaded registration fixtures");
    Ok(fixtures)
}
