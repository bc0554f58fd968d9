//! Client-portal onboarding tier suggestion
//!
//! A coarser point system than the public estimator: company size, feature
//! and integration counts and timeline urgency add up to a score that the
//! `onboarding` profile maps to a tier and price band.

use crate::models::{Confidence, OnboardingData, Tier, TierSuggestion};
use crate::scoring::TierProfile;

/// Points and the human-readable reasons behind them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingScore {
    pub points: i32,
    pub factors: Vec<String>,
}

impl OnboardingScore {
    fn add(&mut self, points: i32, factor: Option<&str>) {
        self.points += points;
        if let Some(factor) = factor {
            self.factors.push(factor.to_string());
        }
    }
}

pub fn score_onboarding(data: &OnboardingData) -> OnboardingScore {
    let mut score = OnboardingScore::default();

    match data.company_size.as_deref() {
        Some("200+") => score.add(3, Some("Enterprise-scale organization")),
        Some("51-200") => score.add(2, Some("Mid-size organization")),
        Some("11-50") => score.add(1, None),
        _ => {}
    }

    match data.key_features.len() {
        n if n > 10 => score.add(3, Some("Complex feature requirements")),
        n if n > 5 => score.add(2, None),
        n if n > 0 => score.add(1, None),
        _ => {}
    }

    match data.integrations.len() {
        n if n > 3 => score.add(2, Some("Multiple system integrations")),
        n if n > 0 => score.add(1, None),
        _ => {}
    }

    if data.timeline.as_deref() == Some("ASAP") {
        score.add(1, Some("Accelerated timeline"));
    }

    score
}

fn confidence_for(tier: Tier) -> Confidence {
    match tier {
        Tier::Starter | Tier::Launchpad => Confidence::High,
        Tier::Growth | Tier::Enterprise => Confidence::Medium,
    }
}

/// Suggest a tier for the onboarding answers using `profile`'s bands
pub fn suggest_tier(data: &OnboardingData, profile: &TierProfile) -> TierSuggestion {
    let score = score_onboarding(data);
    let band = profile.band_for(score.points);

    log::debug!(
        "Onboarding suggestion: {} points -> {} tier",
        score.points,
        band.tier
    );

    TierSuggestion {
        tier: band.tier,
        min: band.price.min,
        max: band.price.max,
        confidence: confidence_for(band.tier),
        factors: score.factors,
    }
}
