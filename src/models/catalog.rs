// Question catalog types shared by the estimator wizard and the API

use serde::{Deserialize, Serialize};

/// Answer cardinality of a question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Exactly one option id
    Single,
    /// Any set of option ids
    Multiple,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
        }
    }
}

/// Classification only; not a scoring input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Situation,
    Pain,
    Goals,
    Scope,
    Timeline,
    Readiness,
}

/// Per-option contribution to the three scoring axes.
/// Any axis missing from the source data reads as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Weight {
    pub complexity: i32,
    pub timeline: i32,
    pub cost: i32,
}

impl Weight {
    pub const fn new(complexity: i32, timeline: i32, cost: i32) -> Self {
        Self {
            complexity,
            timeline,
            cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

impl QuestionOption {
    /// Weight of this option, zero on every axis when none is defined
    pub fn weight(&self) -> Weight {
        self.weight.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub step: u8,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub category: QuestionCategory,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    /// Short heading used when the answer is summarised in notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_label: Option<String>,
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    /// Look up an option of this question by id
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option(option_id).is_some()
    }

    /// Display label for an option id, falling back to the raw id
    pub fn label_for<'a>(&'a self, option_id: &'a str) -> &'a str {
        self.option(option_id)
            .map(|o| o.label.as_str())
            .unwrap_or(option_id)
    }

    /// Heading for notification summaries ("project_type" -> "Project Type")
    pub fn heading(&self) -> String {
        if let Some(label) = &self.summary_label {
            return label.clone();
        }
        self.id
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Title and blurb for one wizard page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepInfo {
    pub step: u8,
    pub title: String,
    pub description: String,
}
