//! Question catalog
//!
//! The catalog is immutable once built. It is either the compiled-in
//! questionnaire (`Catalog::builtin`) or a YAML/JSON file with the same shape,
//! and it is validated before anything can score against it.

pub mod builtin;

use crate::models::{Question, QuestionType, StepInfo};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Highest wizard page a question may sit on
pub const MAX_STEP: u8 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Duplicate option id '{option}' in question '{question}'")]
    DuplicateOption { question: String, option: String },

    #[error("Question '{question}' has step {step}, expected 1..={max}", max = MAX_STEP)]
    InvalidStep { question: String, step: u8 },

    #[error("Question '{0}' has no options")]
    NoOptions(String),

    #[error("Rule references unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("Rule references unknown option '{option}' of question '{question}'")]
    UnknownOption { question: String, option: String },

    #[error("Rule expects question '{question}' to be {expected}")]
    WrongQuestionType {
        question: String,
        expected: &'static str,
    },
}

/// On-disk shape of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    steps: Vec<StepInfo>,
    questions: Vec<Question>,
}

/// Validated, ordered question set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    steps: Vec<StepInfo>,
    questions: Vec<Question>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::new(file.steps, file.questions)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        CatalogFile {
            steps: catalog.steps,
            questions: catalog.questions,
        }
    }
}

impl Catalog {
    /// Build a catalog, checking ids and steps
    pub fn new(steps: Vec<StepInfo>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
            if question.step == 0 || question.step > MAX_STEP {
                return Err(CatalogError::InvalidStep {
                    question: question.id.clone(),
                    step: question.step,
                });
            }
            if question.options.is_empty() {
                return Err(CatalogError::NoOptions(question.id.clone()));
            }

            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
        }

        Ok(Self { steps, questions })
    }

    /// The compiled-in estimator questionnaire
    pub fn builtin() -> Self {
        Self {
            steps: builtin::steps(),
            questions: builtin::questions(),
        }
    }

    /// Load a catalog from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog: Catalog = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid catalog file {}", path.display()))?;
        log::info!(
            "Loaded catalog from {} ({} questions)",
            path.display(),
            catalog.questions.len()
        );
        Ok(catalog)
    }

    /// Use the file at `path` if given, otherwise the builtin catalog
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("Using builtin question catalog");
                Ok(Self::builtin())
            }
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn steps(&self) -> &[StepInfo] {
        &self.steps
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions on one wizard page, in catalog order
    pub fn questions_for_step(&self, step: u8) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.step == step)
    }

    /// Number of wizard pages spanned by the catalog
    pub fn step_count(&self) -> u8 {
        self.questions.iter().map(|q| q.step).max().unwrap_or(0)
    }

    pub fn step_info(&self, step: u8) -> Option<&StepInfo> {
        self.steps.iter().find(|s| s.step == step)
    }

    /// Display label of an option, falling back to the raw id
    pub fn label_for<'a>(&'a self, question_id: &str, option_id: &'a str) -> &'a str {
        match self.question(question_id) {
            Some(question) => question.label_for(option_id),
            None => option_id,
        }
    }

    /// Ensure `question_id` exists with the given cardinality
    pub fn require_question(
        &self,
        question_id: &str,
        kind: QuestionType,
    ) -> Result<&Question, CatalogError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| CatalogError::UnknownQuestion(question_id.to_string()))?;
        if question.kind != kind {
            return Err(CatalogError::WrongQuestionType {
                question: question_id.to_string(),
                expected: kind.as_str(),
            });
        }
        Ok(question)
    }

    /// Ensure `option_id` exists on `question_id`
    pub fn require_option(&self, question_id: &str, option_id: &str) -> Result<(), CatalogError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| CatalogError::UnknownQuestion(question_id.to_string()))?;
        if !question.has_option(option_id) {
            return Err(CatalogError::UnknownOption {
                question: question_id.to_string(),
                option: option_id.to_string(),
            });
        }
        Ok(())
    }
}
