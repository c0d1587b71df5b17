//! Most of the structs in `web` module and their implementations live here.
//! Includes the capture input that needs to be validated, the JSON bodies we send back,
//! and tests for those.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::model::Lead;

/// Leads are stored in a `VARCHAR(120)` column.
pub const LEAD_EMAIL_MAX_CHARS: usize = 120;
const GMAIL_DOMAIN: &str = "@gmail.com";

// ###################################
// ->   REQUEST STRUCTS
// ###################################
/// The body of a capture request, either form-encoded or JSON.
/// The field is optional: an absent or blank `gmail` is a no-op submission.
#[derive(Debug, Default, Deserialize)]
pub struct CaptureForm {
    pub gmail: Option<String>,
}

impl CaptureForm {
    /// Returns `Ok(None)` if there is nothing to store.
    pub fn into_email(self) -> Result<Option<LeadEmail>, DataParsingError> {
        match self.gmail.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(gmail) => LeadEmail::parse(gmail).map(Some),
        }
    }
}

/// Validated Lead Email
/// Trimmed, at most 120 characters and containing "@gmail.com" in any case.
/// The original casing is kept, two emails that differ only in case are different leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEmail(String);

impl AsRef<str> for LeadEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl LeadEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        if value.chars().count() > LEAD_EMAIL_MAX_CHARS {
            return Err(DataParsingError::EmailTooLong);
        }

        if !value.to_lowercase().contains(GMAIL_DOMAIN) {
            return Err(DataParsingError::EmailNotGmail);
        }

        Ok(LeadEmail(value.to_owned()))
    }
}

// ###################################
// ->   RESPONSE STRUCTS
// ###################################
/// The JSON acknowledgment of a capture request.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureAck {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl CaptureAck {
    pub fn captured() -> Self {
        Self {
            success: true,
            message: Some("Lead captured successfully".to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// A lead as listed on `/admin/leads`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadView {
    pub id: i64,
    pub gmail: String,
    /// RFC 3339
    pub timestamp: String,
}

impl From<Lead> for LeadView {
    fn from(lead: Lead) -> Self {
        LeadView {
            id: lead.id,
            gmail: lead.gmail,
            timestamp: lead
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email missing")]
    EmailEmpty,
    #[error("email too long")]
    EmailTooLong,
    #[error("not a gmail address")]
    EmailNotGmail,
}
