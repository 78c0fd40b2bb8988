//! HTTP client for the Upkeep backend API.
//!
//! The app's state layer talks to the backend through this client so that
//! writes go through the network as a cache, not fire-and-forget requests.
//! Configuration is via environment variables:
//! - `UPKEEP_URL` - Base URL (default: `http://localhost:8080/api/v1`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::*;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:8080/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the Upkeep backend API.
#[derive(Debug, Clone)]
pub struct UpkeepClient {
    base_url: String,
    client: Client,
}

impl UpkeepClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("UPKEEP_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    // ============================================================
    // Account operations
    // ============================================================

    /// Register an account.
    pub async fn signup(&self, input: &SignupInput) -> Result<User, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/signup")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Check credentials. The backend answers with the literal strings
    /// `"Success"` or `"Failure"`.
    pub async fn login(&self, input: &LoginInput) -> Result<bool, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/login")
            .json(input)
            .send()
            .await?;
        let verdict: String = self.handle_response(response).await?;
        Ok(verdict == "Success")
    }

    /// Look up the uid registered for an email address.
    pub async fn get_uid(&self, email: &str) -> Result<i64, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/users/uid")
            .query(&[("email", email)])
            .send()
            .await?;
        let body: UidResponse = self.handle_response(response).await?;
        Ok(body.uid)
    }

    /// The household a user belongs to.
    pub async fn household_for_user(&self, uid: i64) -> Result<i64, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/users/{}/household", uid))
            .send()
            .await?;
        let body: HouseholdIdResponse = self.handle_response(response).await?;
        Ok(body.household_id)
    }

    // ============================================================
    // Task operations
    // ============================================================

    /// Persist a task for its household.
    pub async fn create_task(&self, input: &CreateTaskInput) -> Result<TaskRecord, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/tasks")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// All persisted tasks for a household, in due-date order.
    pub async fn tasks_for_household(
        &self,
        household_id: i64,
    ) -> Result<Vec<TaskRecord>, ClientError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/households/{}/tasks", household_id),
            )
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Household operations
    // ============================================================

    /// Register a household.
    pub async fn create_household(
        &self,
        input: &NewHouseholdInput,
    ) -> Result<Household, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/households")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Add a user to a household.
    pub async fn join_household(&self, input: &JoinHouseholdInput) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/households/join")
            .json(input)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Server(format!("{}: {}", status, body)))
        }
    }

    /// The street address on file for a household.
    pub async fn my_address(&self, household_id: i64) -> Result<Household, ClientError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/households/{}/address", household_id),
            )
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Appliance operations
    // ============================================================

    /// Add an appliance to the inventory.
    pub async fn add_appliance(&self, input: &AddApplianceInput) -> Result<Appliance, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/appliances")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }
}

/// Body of the uid lookup response.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UidResponse {
    pub uid: i64,
}

/// Body of the household lookup response.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HouseholdIdResponse {
    pub household_id: i64,
}
