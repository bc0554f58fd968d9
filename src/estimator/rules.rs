// Rule tables for the estimate calculator: phases, features, advice, fit

use super::fit::{BudgetCoverage, FitAssessment, FitRules};
use super::RulesError;
use crate::catalog::builtin::{
    BUDGET_RANGE, CURRENT_STATE, DECISION_MAKER, FEATURES, PAIN_SEVERITY, PROJECT_TYPE, TIMELINE,
    TIMELINE_DECISION, USER_COUNT,
};
use crate::catalog::{Catalog, CatalogError};
use crate::models::{AnswerSet, QuestionType, Tier};
use crate::scoring::{self, TierProfile};

/// Predicate over an answer set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCondition {
    /// A single-select question was answered with `option`
    Equals { question: String, option: String },
    /// A multi-select question includes `option`
    Includes { question: String, option: String },
    /// More than `count` ids were listed for a multi-select question
    MoreThan { question: String, count: usize },
}

impl AnswerCondition {
    pub fn equals(question: &str, option: &str) -> Self {
        Self::Equals {
            question: question.to_string(),
            option: option.to_string(),
        }
    }

    pub fn includes(question: &str, option: &str) -> Self {
        Self::Includes {
            question: question.to_string(),
            option: option.to_string(),
        }
    }

    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::Equals { question, option } => answers.single(question) == Some(option.as_str()),
            Self::Includes { question, option } => answers.is_selected(question, option),
            // Raw length: unknown ids still count toward scope
            Self::MoreThan { question, count } => answers.selections(question).len() > *count,
        }
    }

    fn validate(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        match self {
            Self::Equals { question, option } => {
                catalog.require_question(question, QuestionType::Single)?;
                catalog.require_option(question, option)
            }
            Self::Includes { question, option } => {
                catalog.require_question(question, QuestionType::Multiple)?;
                catalog.require_option(question, option)
            }
            Self::MoreThan { question, .. } => catalog
                .require_question(question, QuestionType::Multiple)
                .map(|_| ()),
        }
    }
}

/// An advisory line added when its condition holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRule {
    pub condition: AnswerCondition,
    pub advice: String,
}

/// Delivery phases assembled around the project shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePlan {
    pub opening: Vec<String>,
    /// Used when the project type is one of `platform_project_types`
    pub platform: Vec<String>,
    pub standard: Vec<String>,
    /// Feature id that adds `integration`
    pub integration_feature: String,
    pub integration: Vec<String>,
    pub closing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EstimatorRules {
    pub profile: TierProfile,
    pub project_type_question: String,
    pub platform_project_types: Vec<String>,
    pub features_question: String,
    /// Feature id to the line shown under "key features"
    pub feature_descriptions: Vec<(String, String)>,
    pub fallback_feature: String,
    pub phases: PhasePlan,
    pub recommendations: Vec<RecommendationRule>,
    pub fallback_recommendation: String,
    pub fit: FitRules,
    pub next_steps: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for EstimatorRules {
    fn default() -> Self {
        Self {
            profile: scoring::lead_estimator(),
            project_type_question: PROJECT_TYPE.to_string(),
            platform_project_types: strings(&["saas_product", "customer_portal"]),
            features_question: FEATURES.to_string(),
            feature_descriptions: [
                ("auth", "Secure user authentication system"),
                ("payments", "Payment processing integration"),
                ("integrations", "Third-party system integrations"),
                ("reporting", "Custom reporting dashboard"),
                ("notifications", "Automated notification system"),
                ("file_upload", "Document management system"),
                ("roles", "Role-based access control"),
                ("mobile", "Mobile-responsive design"),
                ("realtime", "Real-time data updates"),
            ]
            .into_iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect(),
            fallback_feature: "Custom solution tailored to your needs".to_string(),
            phases: PhasePlan {
                opening: strings(&["Discovery & Planning", "Design & Prototyping"]),
                platform: strings(&["Core Platform Development", "User Experience Polish"]),
                standard: strings(&["Development"]),
                integration_feature: "integrations".to_string(),
                integration: strings(&["Integration & Testing"]),
                closing: strings(&["Testing & Quality Assurance", "Launch & Training"]),
            },
            recommendations: vec![
                RecommendationRule {
                    condition: AnswerCondition::equals(CURRENT_STATE, "manual"),
                    advice: "Start by documenting your current manual processes to ensure nothing is missed in the automation.".to_string(),
                },
                RecommendationRule {
                    condition: AnswerCondition::equals(PAIN_SEVERITY, "critical"),
                    advice: "Consider a phased approach - launch core functionality fast, then iterate based on real usage.".to_string(),
                },
                RecommendationRule {
                    condition: AnswerCondition::MoreThan {
                        question: FEATURES.to_string(),
                        count: 5,
                    },
                    advice: "With multiple features, we recommend prioritizing a core MVP first to get value sooner.".to_string(),
                },
                RecommendationRule {
                    condition: AnswerCondition::equals(TIMELINE, "asap"),
                    advice: "For faster delivery, focus on must-have features first. Nice-to-haves can come in phase 2.".to_string(),
                },
                RecommendationRule {
                    condition: AnswerCondition::equals(USER_COUNT, "public"),
                    advice: "Public-facing apps need extra attention to security, performance, and user experience.".to_string(),
                },
            ],
            fallback_recommendation:
                "Based on your inputs, you're well-positioned for a successful project.".to_string(),
            fit: FitRules {
                base: 70,
                budget_question: BUDGET_RANGE.to_string(),
                exploring_option: "exploring".to_string(),
                exploring_penalty: 10,
                coverage: vec![
                    BudgetCoverage::new(Tier::Starter, &["starter", "growth"]),
                    BudgetCoverage::new(Tier::Launchpad, &["growth", "scale"]),
                    BudgetCoverage::new(Tier::Growth, &["scale", "enterprise"]),
                    BudgetCoverage::new(Tier::Enterprise, &["enterprise"]),
                ],
                coverage_bonus: 15,
                decision_timeline_question: TIMELINE_DECISION.to_string(),
                fast_decision_options: strings(&["immediate", "soon"]),
                fast_decision_bonus: 10,
                decision_maker_question: DECISION_MAKER.to_string(),
                small_group_options: strings(&["solo", "small_team"]),
                small_group_bonus: 5,
                assessments: vec![
                    FitAssessment::new(85, "Excellent fit! Your project aligns well with our expertise and approach."),
                    FitAssessment::new(70, "Good fit! We'd love to discuss your project in more detail."),
                    FitAssessment::new(50, "Potential fit. Let's talk to see if we're the right partner for your needs."),
                ],
                fallback_assessment: "Let's have a conversation to better understand your needs and see how we can help.".to_string(),
            },
            next_steps: strings(&[
                "Schedule a free discovery call to discuss your project",
                "We'll prepare a detailed proposal within 3-5 business days",
                "Review the proposal and ask any questions",
                "If we're a good fit, we'll kick off with a discovery workshop",
            ]),
        }
    }
}

impl EstimatorRules {
    /// Description line for a feature id, if it has one
    pub fn feature_description(&self, feature_id: &str) -> Option<&str> {
        self.feature_descriptions
            .iter()
            .find(|(id, _)| id == feature_id)
            .map(|(_, text)| text.as_str())
    }

    /// Check every question and option id the rules mention against `catalog`
    pub fn validate(&self, catalog: &Catalog) -> Result<(), RulesError> {
        self.profile.require_timelines()?;

        catalog.require_question(&self.project_type_question, QuestionType::Single)?;
        for project_type in &self.platform_project_types {
            catalog.require_option(&self.project_type_question, project_type)?;
        }

        catalog.require_question(&self.features_question, QuestionType::Multiple)?;
        for (feature_id, _) in &self.feature_descriptions {
            catalog.require_option(&self.features_question, feature_id)?;
        }
        catalog.require_option(&self.features_question, &self.phases.integration_feature)?;

        for rule in &self.recommendations {
            rule.condition.validate(catalog)?;
        }

        self.fit.validate(catalog)?;
        Ok(())
    }
}
