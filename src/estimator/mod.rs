//! Estimate calculator
//!
//! Turns a completed answer set into an `EstimateResult`. The computation is
//! a pure function of the answers, the catalog and the rule tables; no I/O,
//! clock or randomness is involved, so identical inputs always give identical
//! output.

pub mod fit;
pub mod rules;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{AnswerSet, EstimateResult, Span};
use crate::scoring::{self, ProfileError};
use std::sync::Arc;
use thiserror::Error;

pub use fit::{BudgetCoverage, FitAssessment, FitRules};
pub use rules::{AnswerCondition, EstimatorRules, PhasePlan, RecommendationRule};

/// Shortest schedule ever quoted, in weeks
pub const MIN_TIMELINE: Span = Span::new(4, 6);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Calculator bound to one catalog and rule set
#[derive(Debug, Clone)]
pub struct Estimator {
    catalog: Arc<Catalog>,
    rules: Arc<EstimatorRules>,
}

impl Estimator {
    /// Bind rules to a catalog, failing if a rule names an id the catalog lacks
    pub fn new(catalog: Arc<Catalog>, rules: Arc<EstimatorRules>) -> Result<Self, RulesError> {
        rules.validate(&catalog)?;
        Ok(Self { catalog, rules })
    }

    /// Compiled-in catalog with the default rules
    pub fn builtin() -> Self {
        Self {
            catalog: Arc::new(Catalog::builtin()),
            rules: Arc::new(EstimatorRules::default()),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn rules(&self) -> &EstimatorRules {
        &self.rules
    }

    pub fn estimate(&self, answers: &AnswerSet) -> EstimateResult {
        compute_estimate(answers, &self.catalog, &self.rules)
    }
}

/// Compute the estimate for one answer set.
///
/// Never fails: unanswered questions and unknown option ids contribute
/// nothing, so an empty answer set yields the smallest tier.
pub fn compute_estimate(
    answers: &AnswerSet,
    catalog: &Catalog,
    rules: &EstimatorRules,
) -> EstimateResult {
    let totals = scoring::accumulate(answers, catalog);
    let score = totals.tier_score();
    let band = rules.profile.band_for(score);

    let base = band.timeline.unwrap_or(MIN_TIMELINE);
    let adjustment = i64::from(totals.timeline).saturating_mul(2);
    let weeks = |base: u32, floor: u32| {
        (i64::from(base) + adjustment).clamp(i64::from(floor), i64::from(u32::MAX)) as u32
    };
    let timeline_weeks = Span::new(
        weeks(base.min, MIN_TIMELINE.min),
        weeks(base.max, MIN_TIMELINE.max),
    );

    let fit_score = rules.fit.score(answers, band.tier);

    log::debug!(
        "Estimate: score {} (complexity {}, cost {}, timeline {}) -> {} tier, fit {}",
        score,
        totals.complexity,
        totals.cost,
        totals.timeline,
        band.tier,
        fit_score
    );

    EstimateResult {
        tier: band.tier,
        tier_description: band.description.clone(),
        price_range: band.price,
        timeline_weeks,
        phases: phases(answers, rules),
        key_features: key_features(answers, rules),
        recommendations: recommendations(answers, rules),
        fit_score,
        fit_assessment: rules.fit.assess(fit_score).to_string(),
        next_steps: rules.next_steps.clone(),
    }
}

fn phases(answers: &AnswerSet, rules: &EstimatorRules) -> Vec<String> {
    let plan = &rules.phases;
    let mut phases = plan.opening.clone();

    let is_platform = answers
        .single(&rules.project_type_question)
        .is_some_and(|t| rules.platform_project_types.iter().any(|p| p == t));
    if is_platform {
        phases.extend(plan.platform.iter().cloned());
    } else {
        phases.extend(plan.standard.iter().cloned());
    }

    if answers.is_selected(&rules.features_question, &plan.integration_feature) {
        phases.extend(plan.integration.iter().cloned());
    }

    phases.extend(plan.closing.iter().cloned());
    phases
}

fn key_features(answers: &AnswerSet, rules: &EstimatorRules) -> Vec<String> {
    let features: Vec<String> = answers
        .selections(&rules.features_question)
        .into_iter()
        .filter_map(|id| rules.feature_description(id))
        .map(str::to_string)
        .collect();

    if features.is_empty() {
        vec![rules.fallback_feature.clone()]
    } else {
        features
    }
}

fn recommendations(answers: &AnswerSet, rules: &EstimatorRules) -> Vec<String> {
    let advice: Vec<String> = rules
        .recommendations
        .iter()
        .filter(|rule| rule.condition.matches(answers))
        .map(|rule| rule.advice.clone())
        .collect();

    if advice.is_empty() {
        vec![rules.fallback_recommendation.clone()]
    } else {
        advice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tier, Weight};

    #[test]
    fn test_empty_answers() {
        let result = Estimator::builtin().estimate(&AnswerSet::new());

        assert_eq!(result.tier, Tier::Starter);
        assert_eq!(result.price_range, Span::new(5_000, 15_000));
        assert_eq!(result.timeline_weeks, Span::new(4, 8));
        assert_eq!(
            result.phases,
            vec![
                "Discovery & Planning",
                "Design & Prototyping",
                "Development",
                "Testing & Quality Assurance",
                "Launch & Training",
            ]
        );
        assert_eq!(result.key_features, vec!["Custom solution tailored to your needs"]);
        assert_eq!(
            result.recommendations,
            vec!["Based on your inputs, you're well-positioned for a successful project."]
        );
        assert_eq!(result.fit_score, 70);
        assert!(result.fit_assessment.starts_with("Good fit!"));
        assert_eq!(result.next_steps.len(), 4);
    }

    #[test]
    fn test_timeline_axis_does_not_move_tier() {
        let estimator = Estimator::builtin();
        let relaxed = estimator.estimate(&AnswerSet::new().with_single("timeline", "relaxed"));
        // relaxed: complexity 0, timeline +1, cost -1
        assert_eq!(relaxed.tier, Tier::Starter);
        assert_eq!(relaxed.timeline_weeks, Span::new(6, 10));
    }

    #[test]
    fn test_timeline_floor() {
        let answers = AnswerSet::new()
            .with_single("current_state", "manual")
            .with_single("pain_severity", "critical")
            .with_single("timeline", "asap");
        let result = Estimator::builtin().estimate(&answers);
        // timeline axis -5 => adjustment -10
        assert_eq!(result.timeline_weeks, Span::new(4, 6));
    }

    #[test]
    fn test_extreme_catalog_weights_saturate() {
        let builtin = Catalog::builtin();
        let mut questions = builtin.questions().to_vec();
        for question in questions.iter_mut() {
            for option in question.options.iter_mut() {
                option.weight = Some(Weight::new(i32::MAX, i32::MAX, i32::MAX));
            }
        }
        let catalog = Catalog::new(builtin.steps().to_vec(), questions).unwrap();
        let estimator =
            Estimator::new(Arc::new(catalog), Arc::new(EstimatorRules::default())).unwrap();

        let answers = AnswerSet::new()
            .with_single("project_type", "saas_product")
            .with_single("timeline", "relaxed")
            .with_multiple("features", &["auth", "payments", "reporting"]);
        let result = estimator.estimate(&answers);

        assert_eq!(result.tier, Tier::Enterprise);
        assert_eq!(result.timeline_weeks.max, u32::MAX);
        assert!(result.timeline_weeks.min <= result.timeline_weeks.max);
    }

    #[test]
    fn test_platform_phases_with_integrations() {
        let answers = AnswerSet::new()
            .with_single("project_type", "customer_portal")
            .with_multiple("features", &["integrations"]);
        let result = Estimator::builtin().estimate(&answers);
        assert_eq!(
            result.phases,
            vec![
                "Discovery & Planning",
                "Design & Prototyping",
                "Core Platform Development",
                "User Experience Polish",
                "Integration & Testing",
                "Testing & Quality Assurance",
                "Launch & Training",
            ]
        );
    }

    #[test]
    fn test_key_features_keep_submission_order_and_drop_unknown() {
        let answers =
            AnswerSet::new().with_multiple("features", &["realtime", "warp_drive", "auth"]);
        let result = Estimator::builtin().estimate(&answers);
        assert_eq!(
            result.key_features,
            vec!["Real-time data updates", "Secure user authentication system"]
        );
    }

    #[test]
    fn test_many_features_recommendation_counts_raw_ids() {
        let answers = AnswerSet::new()
            .with_multiple("features", &["auth", "payments", "roles", "mobile", "x", "y"]);
        let result = Estimator::builtin().estimate(&answers);
        assert_eq!(
            result.recommendations,
            vec!["With multiple features, we recommend prioritizing a core MVP first to get value sooner."]
        );
    }

    #[test]
    fn test_public_users_recommendation() {
        let answers = AnswerSet::new().with_single("user_count", "public");
        let result = Estimator::builtin().estimate(&answers);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].starts_with("Public-facing apps"));
    }

    #[test]
    fn test_new_validates_rules() {
        let catalog = Arc::new(Catalog::builtin());
        let mut rules = EstimatorRules::default();
        rules.platform_project_types.push("spaceship".to_string());

        let err = Estimator::new(catalog.clone(), Arc::new(rules)).unwrap_err();
        assert_eq!(
            err,
            RulesError::Catalog(CatalogError::UnknownOption {
                question: "project_type".to_string(),
                option: "spaceship".to_string(),
            })
        );
        assert!(Estimator::new(catalog, Arc::new(EstimatorRules::default())).is_ok());
    }

    #[test]
    fn test_budget_coverage_raises_fit() {
        let answers = AnswerSet::new().with_single("budget_range", "starter");
        let result = Estimator::builtin().estimate(&answers);
        assert_eq!(result.tier, Tier::Starter);
        assert_eq!(result.fit_score, 85);
        assert!(result.fit_assessment.starts_with("Excellent fit!"));
    }
}
