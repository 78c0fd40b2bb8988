use serde::{Deserialize, Serialize};

/// A household and its street address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub household_id: i64,
    pub street_addr: String,
    pub apt: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Input for registering a new household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHouseholdInput {
    pub street_addr: String,
    #[serde(default)]
    pub apt: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Input for adding a user to an existing household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinHouseholdInput {
    pub uid: i64,
    pub household_id: i64,
}
