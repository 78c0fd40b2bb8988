use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The password is write-only: it goes in through [`SignupInput`] and never
/// comes back out in a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub name: String,
    pub email: String,
}

/// Input for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub password: String,
    pub email: String,
}

/// Input for checking credentials.
///
/// Login is a one-shot presence check; no session or token is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
