use serde::{Deserialize, Serialize};

/// An appliance in the household inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appliance {
    pub id: i64,
    pub room: String,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    /// Free-form service cadence, e.g. "every 6 months" on a furnace filter.
    pub maintenance_period: Option<String>,
}

/// Input for adding an appliance to the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddApplianceInput {
    pub room: String,
    pub name: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub maintenance_period: Option<String>,
}
