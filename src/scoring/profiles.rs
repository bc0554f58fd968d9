// Named band tables for the tier scorer

use super::{TierBand, TierProfile};
use crate::models::{Span, Tier};

pub const LEAD_ESTIMATOR: &str = "lead_estimator";
pub const ONBOARDING: &str = "onboarding";

fn band(
    tier: Tier,
    max_score: Option<i32>,
    description: &str,
    price: Span,
    timeline: Option<Span>,
) -> TierBand {
    TierBand {
        tier,
        max_score,
        description: description.to_string(),
        price,
        timeline,
    }
}

fn lead_estimator_bands() -> (Vec<TierBand>, TierBand) {
    let bounded = vec![
        band(
            Tier::Starter,
            Some(8),
            "A focused solution that solves your core problem without unnecessary complexity.",
            Span::new(5_000, 15_000),
            Some(Span::new(4, 8)),
        ),
        band(
            Tier::Launchpad,
            Some(15),
            "A well-rounded MVP or single-purpose application with room to grow.",
            Span::new(25_000, 50_000),
            Some(Span::new(8, 14)),
        ),
        band(
            Tier::Growth,
            Some(25),
            "A comprehensive platform with multiple features working together seamlessly.",
            Span::new(75_000, 150_000),
            Some(Span::new(14, 24)),
        ),
    ];
    let open = band(
        Tier::Enterprise,
        None,
        "An enterprise-grade solution built for scale, security, and complex requirements.",
        Span::new(150_000, 300_000),
        Some(Span::new(24, 40)),
    );
    (bounded, open)
}

fn onboarding_bands() -> (Vec<TierBand>, TierBand) {
    let bounded = vec![
        band(
            Tier::Starter,
            Some(1),
            "Perfect for simple projects and MVPs",
            Span::new(2_000, 12_000),
            None,
        ),
        band(
            Tier::Launchpad,
            Some(3),
            "Ideal for standard custom builds",
            Span::new(25_000, 50_000),
            None,
        ),
        band(
            Tier::Growth,
            Some(6),
            "Great for complex applications",
            Span::new(75_000, 150_000),
            None,
        ),
    ];
    let open = band(
        Tier::Enterprise,
        None,
        "Enterprise-grade solutions",
        Span::new(150_000, 500_000),
        None,
    );
    (bounded, open)
}

/// Band table of the public estimate calculator
pub fn lead_estimator() -> TierProfile {
    let (bands, open) = lead_estimator_bands();
    TierProfile {
        name: LEAD_ESTIMATOR.to_string(),
        bands,
        open,
    }
}

/// Band table of the client-portal onboarding suggestion
pub fn onboarding() -> TierProfile {
    let (bands, open) = onboarding_bands();
    TierProfile {
        name: ONBOARDING.to_string(),
        bands,
        open,
    }
}

/// Look up a named profile
pub fn by_name(name: &str) -> Option<TierProfile> {
    match name {
        LEAD_ESTIMATOR => Some(lead_estimator()),
        ONBOARDING => Some(onboarding()),
        _ => None,
    }
}
