// Data models matching the estimator and portal frontend types

pub mod answers;
pub mod catalog;
pub mod leads;
pub mod onboarding;

pub use answers::{AnswerSet, AnswerValue};
pub use catalog::{Question, QuestionCategory, QuestionOption, QuestionType, StepInfo, Weight};
pub use leads::{
    ContactLead, ContactSubmission, EstimateData, EstimateLead, EstimateSubmission,
    LeadValidationError,
};
pub use onboarding::{Confidence, OnboardingData, TierSuggestion};

use serde::{Deserialize, Serialize};

/// Service package a lead is bucketed into, ordered from smallest to largest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    #[serde(alias = "starter")]
    Starter,
    #[serde(alias = "launchpad")]
    Launchpad,
    #[serde(alias = "growth")]
    Growth,
    /// Labelled "Scale" on the portal pricing screens
    #[serde(alias = "enterprise", alias = "Scale", alias = "scale")]
    Enterprise,
}

impl Tier {
    /// Returns all tiers in ascending order
    pub fn all() -> &'static [Tier] {
        &[Tier::Starter, Tier::Launchpad, Tier::Growth, Tier::Enterprise]
    }

    /// Returns the display name of this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Starter => "Starter",
            Tier::Launchpad => "Launchpad",
            Tier::Growth => "Growth",
            Tier::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(Tier::Starter),
            "launchpad" => Ok(Tier::Launchpad),
            "growth" => Ok(Tier::Growth),
            "enterprise" | "scale" => Ok(Tier::Enterprise),
            _ => Err(format!(
                "Unknown tier: '{}'. Expected one of: starter, launchpad, growth, enterprise",
                s
            )),
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Starter
    }
}

/// Inclusive integer range used for prices (USD) and timelines (weeks)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Output of the estimate calculator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub tier: Tier,
    pub tier_description: String,
    pub price_range: Span,
    pub timeline_weeks: Span,
    pub phases: Vec<String>,
    pub key_features: Vec<String>,
    pub recommendations: Vec<String>,
    pub fit_score: u8,
    pub fit_assessment: String,
    #[serde(default)]
    pub next_steps: Vec<String>,
}
