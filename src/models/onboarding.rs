// Client-portal onboarding answers and the tier suggestion derived from them

use super::Tier;
use serde::{Deserialize, Serialize};

/// Requirements captured by the portal onboarding flow.
/// Only the fields that feed the tier suggestion are modelled; the rest of
/// the onboarding record is ignored on input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    /// One of "1-10", "11-50", "51-200", "200+"
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
    /// One of "ASAP", "1-3-months", "3-6-months", "flexible"
    #[serde(default)]
    pub timeline: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierSuggestion {
    pub tier: Tier,
    pub min: u32,
    pub max: u32,
    pub confidence: Confidence,
    pub factors: Vec<String>,
}
