// Lead intake payloads: estimate submissions and contact-form submissions

use super::{AnswerSet, EstimateResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeadValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Loose shape check, enough to reject typos before mail is dispatched
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve a client-supplied `submittedAt`.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DD` date (midnight UTC), a local
/// `YYYY-MM-DDTHH:MM:SS` taken as UTC, or epoch milliseconds. Anything else
/// is stamped with `now`.
pub fn resolve_submitted_at(raw: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    let parsed = match raw {
        None | Some(Value::Null) => return now,
        Some(Value::String(text)) => parse_timestamp(text.trim()),
        Some(Value::Number(millis)) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Some(_) => None,
    };

    parsed.unwrap_or_else(|| {
        log::debug!("Unusable submittedAt {:?}; using receive time", raw);
        now
    })
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Answers and computed estimate as posted by the estimator page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateData {
    #[serde(default)]
    pub answers: AnswerSet,
    pub estimate: EstimateResult,
    /// Kept as sent; only rendered, never interpreted
    #[serde(default)]
    pub submitted_at: Option<Value>,
}

/// Raw body of `POST /api/leads/estimate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSubmission {
    #[serde(default)]
    pub answers: Option<AnswerSet>,
    #[serde(default)]
    pub estimate: Option<EstimateResult>,
    #[serde(default)]
    pub submitted_at: Option<Value>,
    #[serde(default)]
    pub client_email: Option<String>,
}

/// An accepted estimate lead, ready for notification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateLead {
    pub lead_id: Uuid,
    pub answers: AnswerSet,
    pub estimate: EstimateResult,
    pub submitted_at: DateTime<Utc>,
    pub client_email: Option<String>,
}

impl EstimateSubmission {
    /// Check required fields; `now` stamps submissions that arrive without a time
    pub fn validate(self, now: DateTime<Utc>) -> Result<EstimateLead, LeadValidationError> {
        let (answers, estimate) = match (self.answers, self.estimate) {
            (Some(answers), Some(estimate)) => (answers, estimate),
            (answers, estimate) => {
                let mut missing = Vec::new();
                if answers.is_none() {
                    missing.push("answers");
                }
                if estimate.is_none() {
                    missing.push("estimate");
                }
                return Err(LeadValidationError::MissingFields(missing));
            }
        };

        let client_email = present(&self.client_email);
        if let Some(email) = &client_email {
            if !is_valid_email(email) {
                return Err(LeadValidationError::InvalidEmail(email.clone()));
            }
        }

        Ok(EstimateLead {
            lead_id: Uuid::new_v4(),
            answers,
            estimate,
            submitted_at: resolve_submitted_at(self.submitted_at.as_ref(), now),
            client_email,
        })
    }
}

impl EstimateLead {
    /// The estimate part of the lead, as attached to a later contact form
    pub fn data(&self) -> EstimateData {
        EstimateData {
            answers: self.answers.clone(),
            estimate: self.estimate.clone(),
            submitted_at: Some(Value::String(self.submitted_at.to_rfc3339())),
        }
    }
}

/// Raw body of `POST /api/leads/contact`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Any JSON; parsed as `EstimateData` when it has that shape
    #[serde(default)]
    pub estimate_data: Option<Value>,
}

/// An accepted contact-form lead
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLead {
    pub lead_id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub project_type: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
    pub estimate_data: Option<EstimateData>,
    /// Attachment that did not parse as `EstimateData`, forwarded as sent
    pub unrecognized_estimate: Option<Value>,
    pub submitted_at: DateTime<Utc>,
}

impl ContactLead {
    pub fn has_estimate(&self) -> bool {
        self.estimate_data.is_some() || self.unrecognized_estimate.is_some()
    }

    /// Tier named by the attached estimate, whatever its shape
    pub fn attached_tier(&self) -> Option<String> {
        match (&self.estimate_data, &self.unrecognized_estimate) {
            (Some(data), _) => Some(data.estimate.tier.to_string()),
            (None, Some(raw)) => raw
                .pointer("/estimate/tier")
                .and_then(Value::as_str)
                .map(str::to_string),
            (None, None) => None,
        }
    }
}

/// Parse an optional estimate attachment; one that does not fit is kept raw
fn split_attachment(raw: Option<Value>) -> (Option<EstimateData>, Option<Value>) {
    let raw = match raw {
        None | Some(Value::Null) => return (None, None),
        Some(raw) => raw,
    };

    match EstimateData::deserialize(&raw) {
        Ok(data) => (Some(data), None),
        Err(e) => {
            log::warn!(
                "Contact lead estimate attachment does not match the estimate format ({}); forwarding it unparsed",
                e
            );
            (None, Some(raw))
        }
    }
}

impl ContactSubmission {
    pub fn validate(self, now: DateTime<Utc>) -> Result<ContactLead, LeadValidationError> {
        let name = present(&self.name);
        let email = present(&self.email);
        let project_type = present(&self.project_type);
        let message = present(&self.message);

        let (name, email, project_type, message) = match (name, email, project_type, message) {
            (Some(n), Some(e), Some(p), Some(m)) => (n, e, p, m),
            (n, e, p, m) => {
                let missing = [
                    ("name", n.is_none()),
                    ("email", e.is_none()),
                    ("projectType", p.is_none()),
                    ("message", m.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(field, _)| field)
                .collect();
                return Err(LeadValidationError::MissingFields(missing));
            }
        };

        if !is_valid_email(&email) {
            return Err(LeadValidationError::InvalidEmail(email));
        }

        let (estimate_data, unrecognized_estimate) = split_attachment(self.estimate_data);

        Ok(ContactLead {
            lead_id: Uuid::new_v4(),
            name,
            email,
            company: present(&self.company),
            phone: present(&self.phone),
            project_type,
            budget: present(&self.budget),
            timeline: present(&self.timeline),
            message,
            estimate_data,
            unrecognized_estimate,
            submitted_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Span, Tier};
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_estimate() -> EstimateResult {
        EstimateResult {
            tier: Tier::Launchpad,
            tier_description: "A well-rounded MVP".to_string(),
            price_range: Span::new(25000, 50000),
            timeline_weeks: Span::new(8, 14),
            phases: vec!["Discovery & Planning".to_string()],
            key_features: vec![],
            recommendations: vec![],
            fit_score: 85,
            fit_assessment: "Excellent fit!".to_string(),
            next_steps: vec![],
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("  jane@example.co.uk "));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_estimate_submission_requires_answers_and_estimate() {
        let err = EstimateSubmission::default().validate(Utc::now()).unwrap_err();
        assert_eq!(
            err,
            LeadValidationError::MissingFields(vec!["answers", "estimate"])
        );
    }

    #[test]
    fn test_estimate_submission_defaults_submitted_at() {
        let now = Utc::now();
        let lead = EstimateSubmission {
            answers: Some(AnswerSet::new()),
            estimate: Some(sample_estimate()),
            submitted_at: None,
            client_email: Some("   ".to_string()),
        }
        .validate(now)
        .unwrap();

        assert_eq!(lead.submitted_at, now);
        assert_eq!(lead.client_email, None);
    }

    #[test]
    fn test_estimate_submission_rejects_bad_client_email() {
        let result = EstimateSubmission {
            answers: Some(AnswerSet::new()),
            estimate: Some(sample_estimate()),
            submitted_at: None,
            client_email: Some("nope".to_string()),
        }
        .validate(Utc::now());

        assert!(matches!(result, Err(LeadValidationError::InvalidEmail(_))));
    }

    #[test]
    fn test_contact_submission_lists_missing_fields() {
        let submission = ContactSubmission {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            ..Default::default()
        };
        let err = submission.validate(Utc::now()).unwrap_err();
        assert_eq!(
            err,
            LeadValidationError::MissingFields(vec!["projectType", "message"])
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: projectType, message"
        );
    }

    #[test]
    fn test_contact_submission_accepts_complete_form() {
        let submission: ContactSubmission = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "email": "jane@example.com",
                "company": "",
                "projectType": "SaaS Product",
                "message": "We need a portal"
            }"#,
        )
        .unwrap();

        let lead = submission.validate(Utc::now()).unwrap();
        assert_eq!(lead.name, "Jane Doe");
        assert_eq!(lead.company, None);
        assert!(lead.estimate_data.is_none());
    }

    #[test]
    fn test_submitted_at_accepts_loose_formats() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let resolve = |value: Value| resolve_submitted_at(Some(&value), now);

        assert_eq!(
            resolve(json!("2024-05-01")),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            resolve(json!("2024-05-01T09:30:00+02:00")),
            Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap()
        );
        assert_eq!(
            resolve(json!("2024-05-01T09:30:00.250")),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap() + chrono::Duration::milliseconds(250)
        );
        assert_eq!(
            resolve(json!(1_714_521_600_000i64)),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(resolve(json!("last tuesday")), now);
        assert_eq!(resolve(json!({ "at": 1 })), now);
        assert_eq!(resolve_submitted_at(None, now), now);
    }

    #[test]
    fn test_estimate_submission_with_date_only_timestamp() {
        let submission: EstimateSubmission = serde_json::from_value(json!({
            "answers": {},
            "estimate": sample_estimate(),
            "submittedAt": "2024-05-01"
        }))
        .unwrap();

        let lead = submission.validate(Utc::now()).unwrap();
        assert_eq!(
            lead.submitted_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_contact_keeps_partial_estimate_attachment() {
        let submission: ContactSubmission = serde_json::from_value(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "projectType": "SaaS Product",
            "message": "Following up",
            "estimateData": {
                "estimate": { "tier": "Growth", "priceRange": { "min": 75000, "max": 150000 } }
            }
        }))
        .unwrap();

        let lead = submission.validate(Utc::now()).unwrap();
        assert!(lead.estimate_data.is_none());
        assert!(lead.has_estimate());
        assert_eq!(lead.attached_tier().as_deref(), Some("Growth"));
    }

    #[test]
    fn test_contact_parses_full_estimate_attachment() {
        let submission = ContactSubmission {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            project_type: Some("SaaS Product".to_string()),
            message: Some("Hi".to_string()),
            estimate_data: Some(json!({
                "answers": { "project_type": "saas_product" },
                "estimate": sample_estimate(),
                "submittedAt": "yesterday"
            })),
            ..Default::default()
        };

        let lead = submission.validate(Utc::now()).unwrap();
        let data = lead.estimate_data.as_ref().unwrap();
        assert_eq!(data.estimate.tier, Tier::Launchpad);
        assert_eq!(data.submitted_at, Some(json!("yesterday")));
        assert!(lead.unrecognized_estimate.is_none());
        assert_eq!(lead.attached_tier().as_deref(), Some("Launchpad"));
    }

    #[test]
    fn test_null_estimate_attachment_is_absent() {
        let submission = ContactSubmission {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            project_type: Some("SaaS Product".to_string()),
            message: Some("Hi".to_string()),
            estimate_data: Some(Value::Null),
            ..Default::default()
        };

        let lead = submission.validate(Utc::now()).unwrap();
        assert!(!lead.has_estimate());
        assert_eq!(lead.attached_tier(), None);
    }
}
