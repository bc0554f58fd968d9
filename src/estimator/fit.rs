// Lead fit score: budget coverage and decision readiness

use crate::catalog::{Catalog, CatalogError};
use crate::models::{AnswerSet, QuestionType, Tier};

/// Budget options considered to cover a tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetCoverage {
    pub tier: Tier,
    pub budgets: Vec<String>,
}

impl BudgetCoverage {
    pub fn new(tier: Tier, budgets: &[&str]) -> Self {
        Self {
            tier,
            budgets: budgets.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Assessment text for scores at or above `min_score`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitAssessment {
    pub min_score: u8,
    pub text: String,
}

impl FitAssessment {
    pub fn new(min_score: u8, text: &str) -> Self {
        Self {
            min_score,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitRules {
    pub base: i32,
    pub budget_question: String,
    pub exploring_option: String,
    pub exploring_penalty: i32,
    pub coverage: Vec<BudgetCoverage>,
    pub coverage_bonus: i32,
    pub decision_timeline_question: String,
    pub fast_decision_options: Vec<String>,
    pub fast_decision_bonus: i32,
    pub decision_maker_question: String,
    pub small_group_options: Vec<String>,
    pub small_group_bonus: i32,
    /// Checked in order; the first whose threshold is met wins
    pub assessments: Vec<FitAssessment>,
    pub fallback_assessment: String,
}

fn answered_one_of(answers: &AnswerSet, question: &str, options: &[String]) -> bool {
    answers
        .single(question)
        .is_some_and(|answer| options.iter().any(|o| o == answer))
}

impl FitRules {
    pub fn budget_covers(&self, tier: Tier, budget: &str) -> bool {
        self.coverage
            .iter()
            .any(|c| c.tier == tier && c.budgets.iter().any(|b| b == budget))
    }

    /// Score in 0..=100 for a lead whose project landed in `tier`
    pub fn score(&self, answers: &AnswerSet, tier: Tier) -> u8 {
        let mut score = self.base;

        match answers.single(&self.budget_question) {
            Some(budget) if budget == self.exploring_option => score -= self.exploring_penalty,
            Some(budget) if self.budget_covers(tier, budget) => score += self.coverage_bonus,
            _ => {}
        }

        if answered_one_of(
            answers,
            &self.decision_timeline_question,
            &self.fast_decision_options,
        ) {
            score += self.fast_decision_bonus;
        }

        if answered_one_of(answers, &self.decision_maker_question, &self.small_group_options) {
            score += self.small_group_bonus;
        }

        score.clamp(0, 100) as u8
    }

    pub fn assess(&self, score: u8) -> &str {
        self.assessments
            .iter()
            .find(|a| score >= a.min_score)
            .map(|a| a.text.as_str())
            .unwrap_or(self.fallback_assessment.as_str())
    }

    pub(crate) fn validate(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        catalog.require_question(&self.budget_question, QuestionType::Single)?;
        catalog.require_option(&self.budget_question, &self.exploring_option)?;
        for budget in self.coverage.iter().flat_map(|c| &c.budgets) {
            catalog.require_option(&self.budget_question, budget)?;
        }

        catalog.require_question(&self.decision_timeline_question, QuestionType::Single)?;
        for option in &self.fast_decision_options {
            catalog.require_option(&self.decision_timeline_question, option)?;
        }

        catalog.require_question(&self.decision_maker_question, QuestionType::Single)?;
        for option in &self.small_group_options {
            catalog.require_option(&self.decision_maker_question, option)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::estimator::EstimatorRules;
    use crate::models::{AnswerSet, Tier};

    fn fit() -> super::FitRules {
        EstimatorRules::default().fit
    }

    #[test]
    fn test_base_score_without_answers() {
        assert_eq!(fit().score(&AnswerSet::new(), Tier::Growth), 70);
    }

    #[test]
    fn test_exploring_budget_penalised() {
        let answers = AnswerSet::new().with_single("budget_range", "exploring");
        assert_eq!(fit().score(&answers, Tier::Starter), 60);
    }

    #[test]
    fn test_coverage_matrix() {
        let rules = fit();
        assert!(rules.budget_covers(Tier::Starter, "growth"));
        assert!(rules.budget_covers(Tier::Launchpad, "scale"));
        assert!(!rules.budget_covers(Tier::Launchpad, "enterprise"));
        assert!(rules.budget_covers(Tier::Growth, "enterprise"));
        assert!(!rules.budget_covers(Tier::Enterprise, "scale"));
    }

    #[test]
    fn test_all_bonuses_reach_100() {
        let answers = AnswerSet::new()
            .with_single("budget_range", "enterprise")
            .with_single("timeline_decision", "soon")
            .with_single("decision_maker", "small_team");
        assert_eq!(fit().score(&answers, Tier::Enterprise), 100);
    }

    #[test]
    fn test_slow_committee_gets_no_bonus() {
        let answers = AnswerSet::new()
            .with_single("budget_range", "starter")
            .with_single("timeline_decision", "research")
            .with_single("decision_maker", "board");
        assert_eq!(fit().score(&answers, Tier::Growth), 70);
    }

    #[test]
    fn test_assessment_thresholds() {
        let rules = fit();
        assert!(rules.assess(100).starts_with("Excellent fit!"));
        assert!(rules.assess(85).starts_with("Excellent fit!"));
        assert!(rules.assess(84).starts_with("Good fit!"));
        assert!(rules.assess(70).starts_with("Good fit!"));
        assert!(rules.assess(69).starts_with("Potential fit."));
        assert!(rules.assess(50).starts_with("Potential fit."));
        assert!(rules.assess(49).starts_with("Let's have a conversation"));
        assert!(rules.assess(0).starts_with("Let's have a conversation"));
    }
}
