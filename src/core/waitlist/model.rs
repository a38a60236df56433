//! Waitlist request model and validation
//!
//! Shared between the browser form and the server endpoint so both apply the
//! same rules.

use serde::{Deserialize, Serialize};

/// Waitlist error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitlistError {
    #[error("Name and email are required")]
    MissingField,

    #[error("Please provide a valid email address")]
    InvalidEmailFormat,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0} is not defined in environment variables")]
    NotConfigured(&'static str),

    #[error("{0}")]
    UpstreamServiceError(String),
}

impl WaitlistError {
    /// Whether the caller sent bad input (as opposed to a server-side failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WaitlistError::MissingField
                | WaitlistError::InvalidEmailFormat
                | WaitlistError::InvalidBody(_)
        )
    }
}

/// Raw signup payload as posted by the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub owns_meta_quest: Option<bool>,
    #[serde(default)]
    pub owns_vision_pro: Option<bool>,
}

/// Validated waitlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub owns_meta_quest: bool,
    pub owns_vision_pro: bool,
}

impl WaitlistRequest {
    /// Check required fields and email format
    pub fn validate(self) -> Result<WaitlistEntry, WaitlistError> {
        let name = non_blank(self.name).ok_or(WaitlistError::MissingField)?;
        let email = non_blank(self.email).ok_or(WaitlistError::MissingField)?;

        if !is_valid_email(&email) {
            return Err(WaitlistError::InvalidEmailFormat);
        }

        Ok(WaitlistEntry {
            name,
            email,
            phone: non_blank(self.phone),
            owns_meta_quest: self.owns_meta_quest.unwrap_or(false),
            owns_vision_pro: self.owns_vision_pro.unwrap_or(false),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
///
/// The domain needs a dot with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Success body of `POST /api/waitlist`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistResponse {
    pub success: bool,
    pub message: String,
}

/// Error body of `POST /api/waitlist`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: String,
}
