// Step-by-step answer collection with per-step completeness gating

use crate::catalog::{Catalog, CatalogError};
use crate::models::{AnswerSet, Question, QuestionType};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please complete step {step}")]
    StepIncomplete { step: u8 },

    #[error("Already on the last step ({0})")]
    LastStep(u8),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Whether `question` has a usable answer; multi-select needs at least one id
pub fn is_answered(answers: &AnswerSet, question: &Question) -> bool {
    match question.kind {
        QuestionType::Single => answers.single(&question.id).is_some(),
        QuestionType::Multiple => !answers.selections(&question.id).is_empty(),
    }
}

fn step_complete(answers: &AnswerSet, catalog: &Catalog, step: u8) -> bool {
    catalog
        .questions_for_step(step)
        .filter(|q| q.required)
        .all(|q| is_answered(answers, q))
}

/// Fails with the first step that still has a required question unanswered
pub fn validate_required(answers: &AnswerSet, catalog: &Catalog) -> Result<(), WizardError> {
    match (1..=catalog.step_count()).find(|&step| !step_complete(answers, catalog, step)) {
        Some(step) => Err(WizardError::StepIncomplete { step }),
        None => Ok(()),
    }
}

/// One respondent's progress through the questionnaire
#[derive(Debug, Clone)]
pub struct WizardSession {
    catalog: Arc<Catalog>,
    step: u8,
    answers: AnswerSet,
}

impl WizardSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            step: 1,
            answers: AnswerSet::new(),
        }
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn step_count(&self) -> u8 {
        self.catalog.step_count()
    }

    /// Questions shown on the current page
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.catalog.questions_for_step(self.step)
    }

    /// Record the answer to a single-select question
    pub fn select(&mut self, question_id: &str, option_id: &str) -> Result<(), WizardError> {
        self.catalog
            .require_question(question_id, QuestionType::Single)?;
        self.catalog.require_option(question_id, option_id)?;
        self.answers.set_single(question_id, option_id);
        Ok(())
    }

    /// Flip one option of a multi-select question; returns whether it is now selected
    pub fn toggle(&mut self, question_id: &str, option_id: &str) -> Result<bool, WizardError> {
        self.catalog
            .require_question(question_id, QuestionType::Multiple)?;
        self.catalog.require_option(question_id, option_id)?;

        let mut selected: Vec<String> = self
            .answers
            .selections(question_id)
            .into_iter()
            .map(str::to_string)
            .collect();
        let now_selected = match selected.iter().position(|id| id == option_id) {
            Some(index) => {
                selected.remove(index);
                false
            }
            None => {
                selected.push(option_id.to_string());
                true
            }
        };
        self.answers.set_multiple(question_id, selected);
        Ok(now_selected)
    }

    pub fn can_proceed(&self) -> bool {
        step_complete(&self.answers, &self.catalog, self.step)
    }

    /// Advance one page
    pub fn next(&mut self) -> Result<u8, WizardError> {
        if !self.can_proceed() {
            return Err(WizardError::StepIncomplete { step: self.step });
        }
        if self.step >= self.step_count() {
            return Err(WizardError::LastStep(self.step));
        }
        self.step += 1;
        Ok(self.step)
    }

    /// Go back one page; returns false on the first page
    pub fn back(&mut self) -> bool {
        if self.step > 1 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    /// Every required question on every page is answered
    pub fn is_complete(&self) -> bool {
        validate_required(&self.answers, &self.catalog).is_ok()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }
}
