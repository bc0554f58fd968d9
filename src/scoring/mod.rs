//! Tier scoring
//!
//! Both the public lead estimator and the portal onboarding suggestion map a
//! point total onto the same four tiers. The mapping lives here as data: a
//! `TierProfile` is an ascending list of score bands, each carrying the
//! tier's price and (optionally) timeline. `profiles` holds the two named
//! configurations.

pub mod profiles;

use crate::models::{AnswerSet, QuestionType, Span, Tier, Weight};
use crate::catalog::Catalog;
use serde::Serialize;
use thiserror::Error;

pub use profiles::{lead_estimator, onboarding};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Profile '{0}' has no bands")]
    Empty(String),

    #[error("Profile '{profile}': only the last band may be open-ended")]
    OpenBandNotLast { profile: String },

    #[error("Profile '{profile}': last band must be open-ended")]
    MissingOpenBand { profile: String },

    #[error("Profile '{profile}': band thresholds must strictly increase ({previous} then {next})")]
    UnorderedThreshold {
        profile: String,
        previous: i32,
        next: i32,
    },

    #[error("Profile '{profile}': tiers must strictly increase ({previous} then {next})")]
    UnorderedTier {
        profile: String,
        previous: Tier,
        next: Tier,
    },

    #[error("Profile '{profile}': band for {tier} has no timeline")]
    MissingTimeline { profile: String, tier: Tier },
}

/// One score band of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBand {
    pub tier: Tier,
    /// Highest score (inclusive) that lands in this band; `None` for the top band
    pub max_score: Option<i32>,
    pub description: String,
    pub price: Span,
    pub timeline: Option<Span>,
}

/// Named, validated band table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierProfile {
    name: String,
    bands: Vec<TierBand>,
    open: TierBand,
}

impl TierProfile {
    /// Build a profile from bands in ascending order; the last band must be open-ended
    pub fn new(name: &str, mut bands: Vec<TierBand>) -> Result<Self, ProfileError> {
        let open = bands
            .pop()
            .ok_or_else(|| ProfileError::Empty(name.to_string()))?;
        if open.max_score.is_some() {
            return Err(ProfileError::MissingOpenBand {
                profile: name.to_string(),
            });
        }

        let mut previous: Option<(i32, Tier)> = None;
        for band in &bands {
            let max_score = band.max_score.ok_or_else(|| ProfileError::OpenBandNotLast {
                profile: name.to_string(),
            })?;
            if let Some((prev_score, prev_tier)) = previous {
                if max_score <= prev_score {
                    return Err(ProfileError::UnorderedThreshold {
                        profile: name.to_string(),
                        previous: prev_score,
                        next: max_score,
                    });
                }
                if band.tier <= prev_tier {
                    return Err(ProfileError::UnorderedTier {
                        profile: name.to_string(),
                        previous: prev_tier,
                        next: band.tier,
                    });
                }
            }
            previous = Some((max_score, band.tier));
        }
        if let Some((_, prev_tier)) = previous {
            if open.tier <= prev_tier {
                return Err(ProfileError::UnorderedTier {
                    profile: name.to_string(),
                    previous: prev_tier,
                    next: open.tier,
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            bands,
            open,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All bands, lowest first
    pub fn bands(&self) -> impl Iterator<Item = &TierBand> {
        self.bands.iter().chain(std::iter::once(&self.open))
    }

    /// The band a score falls into
    pub fn band_for(&self, score: i32) -> &TierBand {
        self.bands
            .iter()
            .find(|band| band.max_score.is_some_and(|max| score <= max))
            .unwrap_or(&self.open)
    }

    pub fn band_of(&self, tier: Tier) -> Option<&TierBand> {
        self.bands().find(|band| band.tier == tier)
    }

    /// Fails unless every band has a timeline
    pub fn require_timelines(&self) -> Result<(), ProfileError> {
        match self.bands().find(|band| band.timeline.is_none()) {
            Some(band) => Err(ProfileError::MissingTimeline {
                profile: self.name.clone(),
                tier: band.tier,
            }),
            None => Ok(()),
        }
    }
}

/// Running totals along the three weight axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTotals {
    pub complexity: i32,
    pub timeline: i32,
    pub cost: i32,
}

impl ScoreTotals {
    pub fn add(&mut self, weight: Weight) {
        self.complexity = self.complexity.saturating_add(weight.complexity);
        self.timeline = self.timeline.saturating_add(weight.timeline);
        self.cost = self.cost.saturating_add(weight.cost);
    }

    /// Score used for tier selection; the timeline axis only moves the schedule
    pub fn tier_score(&self) -> i32 {
        self.complexity.saturating_add(self.cost)
    }
}

/// Fold every recorded answer through the catalog's weight table.
///
/// Unanswered questions and unknown option ids add nothing. Multi-select
/// weights are summed per listed id.
pub fn accumulate(answers: &AnswerSet, catalog: &Catalog) -> ScoreTotals {
    let mut totals = ScoreTotals::default();

    for question in catalog.questions() {
        let selected = match question.kind {
            QuestionType::Single => answers.single(&question.id).into_iter().collect(),
            QuestionType::Multiple => answers.selections(&question.id),
        };
        for option_id in selected {
            if let Some(option) = question.option(option_id) {
                totals.add(option.weight());
            }
        }
    }

    totals
}
