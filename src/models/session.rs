//! Wire format for provider verification sessions.

use serde::{Deserialize, Serialize};

/// Fixed session time-to-live requested from the provider.
pub const SESSION_TTL_SECS: u32 = 900;

/// Age threshold applied to every verification method.
pub const AGE_THRESHOLD: u8 = 18;

/// Reference id the provider echoes back in its dashboards.
const REFERENCE_ID: &str = "over_18_example";

/// Result status the provider reports once a session finished
/// successfully.
pub const STATUS_COMPLETE: &str = "COMPLETE";

/// Kind of check a session performs.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionKind {
    /// Prove the subject is over the configured threshold.
    Over,
}

/// How thoroughly a single verification method is checked.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckLevel {
    /// Provider-side passive checking.
    Passive,
    /// No additional checking.
    None,
}

/// Document authenticity handling for document scans.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Authenticity {
    /// Provider decides whether an authenticity check is needed.
    Auto,
}

/// Policy for one verification method within a session.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MethodPolicy {
    /// Whether the user may pick this method.
    pub allowed: bool,
    /// Age threshold the method verifies against.
    pub threshold: u8,
    /// Authenticity handling; only sent for document scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticity: Option<Authenticity>,
    /// Check level for the method.
    pub level: CheckLevel,
}

impl MethodPolicy {
    fn enabled(level: CheckLevel) -> Self {
        Self {
            allowed: true,
            threshold: AGE_THRESHOLD,
            authenticity: None,
            level,
        }
    }

    fn disabled() -> Self {
        Self {
            allowed: false,
            threshold: AGE_THRESHOLD,
            authenticity: None,
            level: CheckLevel::None,
        }
    }
}

/// Where the provider sends the browser once the hosted flow finishes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SessionCallback {
    /// Whether the provider redirects automatically.
    pub auto: bool,
    /// Callback URL the browser returns to.
    pub url: String,
}

/// Payload sent to the provider when opening a new verification session.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SessionRequest {
    /// Kind of check to run.
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Camera-based age estimation.
    pub age_estimation: MethodPolicy,
    /// Reusable digital id.
    pub digital_id: MethodPolicy,
    /// Identity document scan.
    pub doc_scan: MethodPolicy,
    /// Credit-card based check.
    pub credit_card: MethodPolicy,
    /// Mobile-carrier based check.
    pub mobile: MethodPolicy,
    /// Session time-to-live in seconds.
    pub ttl: u32,
    /// Caller-chosen reference id.
    pub reference_id: String,
    /// Browser return trip configuration.
    pub callback: SessionCallback,
    /// Ask the provider to run its checks synchronously.
    pub synchronous_checks: bool,
}

impl SessionRequest {
    /// The fixed over-18 check: age estimation, digital id and document
    /// scan enabled, credit card and mobile disabled.
    pub fn over_18(callback_url: &str) -> Self {
        Self {
            kind: SessionKind::Over,
            age_estimation: MethodPolicy::enabled(CheckLevel::Passive),
            digital_id: MethodPolicy::enabled(CheckLevel::None),
            doc_scan: MethodPolicy {
                authenticity: Some(Authenticity::Auto),
                ..MethodPolicy::enabled(CheckLevel::Passive)
            },
            credit_card: MethodPolicy::disabled(),
            mobile: MethodPolicy::disabled(),
            ttl: SESSION_TTL_SECS,
            reference_id: REFERENCE_ID.to_string(),
            callback: SessionCallback {
                auto: true,
                url: callback_url.to_string(),
            },
            synchronous_checks: true,
        }
    }
}

/// A session the provider has opened for us.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque provider-side session identifier.
    pub id: String,
}

/// Raw provider response to session creation. The `id` is optional
/// because the provider has been observed answering 2xx without one.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionCreated {
    /// Session identifier, when present.
    #[serde(default)]
    pub id: Option<String>,
}

/// Result of a verification session, as reported by the provider.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VerificationResult {
    /// Provider-side session status; `COMPLETE` means verified.
    #[serde(default)]
    pub status: String,
    /// Any additional fields the provider includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VerificationResult {
    /// Whether the session finished successfully.
    pub fn is_complete(&self) -> bool {
        self.status == STATUS_COMPLETE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use testresult::TestResult;

    #[test]
    fn test_over_18_payload_shape() -> TestResult {
        let request = SessionRequest::over_18("https://127.0.0.1:3000/yoti-callback");

        assert_json_eq!(
            serde_json::to_value(&request)?,
            json!({
                "type": "OVER",
                "age_estimation": {
                    "allowed": true,
                    "threshold": 18,
                    "level": "PASSIVE"
                },
                "digital_id": {
                    "allowed": true,
                    "threshold": 18,
                    "level": "NONE"
                },
                "doc_scan": {
                    "allowed": true,
                    "threshold": 18,
                    "authenticity": "AUTO",
                    "level": "PASSIVE"
                },
                "credit_card": {
                    "allowed": false,
                    "threshold": 18,
                    "level": "NONE"
                },
                "mobile": {
                    "allowed": false,
                    "threshold": 18,
                    "level": "NONE"
                },
                "ttl": 900,
                "reference_id": "over_18_example",
                "callback": {
                    "auto": true,
                    "url": "https://127.0.0.1:3000/yoti-callback"
                },
                "synchronous_checks": true
            })
        );

        Ok(())
    }

    #[test]
    fn test_result_status_defaults_to_empty() -> TestResult {
        let result: VerificationResult = serde_json::from_value(json!({ "checks": [] }))?;

        assert!(!result.is_complete());
        assert_eq!(result.status, "");
        assert!(result.extra.contains_key("checks"));

        Ok(())
    }

    #[test]
    fn test_complete_status_parses() -> TestResult {
        let result: VerificationResult =
            serde_json::from_value(json!({ "status": "COMPLETE" }))?;

        assert!(result.is_complete());

        Ok(())
    }
}
