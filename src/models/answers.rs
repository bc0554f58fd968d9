// Respondent answers keyed by question id

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded answer as it arrives over the wire.
///
/// Values of any other JSON shape are kept as `Other` and ignored by every
/// reader, so a malformed submission degrades instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
    Other(serde_json::Value),
}

/// Mapping from question id to the respondent's selection(s)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a single-select answer, replacing any previous value
    pub fn set_single(&mut self, question_id: &str, option_id: &str) {
        self.0.insert(
            question_id.to_string(),
            AnswerValue::Single(option_id.to_string()),
        );
    }

    /// Record a multi-select answer, replacing any previous value
    pub fn set_multiple<I, S>(&mut self, question_id: &str, option_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            question_id.to_string(),
            AnswerValue::Multiple(option_ids.into_iter().map(Into::into).collect()),
        );
    }

    /// Builder form of `set_single`
    pub fn with_single(mut self, question_id: &str, option_id: &str) -> Self {
        self.set_single(question_id, option_id);
        self
    }

    /// Builder form of `set_multiple`
    pub fn with_multiple(mut self, question_id: &str, option_ids: &[&str]) -> Self {
        self.set_multiple(question_id, option_ids.iter().copied());
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.0.remove(question_id)
    }

    /// The answer read as one option id.
    ///
    /// A one-element array is coerced to its element; empty strings, longer
    /// arrays and other shapes read as unanswered.
    pub fn single(&self, question_id: &str) -> Option<&str> {
        match self.0.get(question_id)? {
            AnswerValue::Single(id) if !id.is_empty() => Some(id.as_str()),
            AnswerValue::Multiple(ids) if ids.len() == 1 => Some(ids[0].as_str()),
            _ => None,
        }
    }

    /// The answer read as a list of option ids, in submission order.
    ///
    /// A scalar is coerced to a one-element list.
    pub fn selections(&self, question_id: &str) -> Vec<&str> {
        match self.0.get(question_id) {
            Some(AnswerValue::Multiple(ids)) => ids.iter().map(String::as_str).collect(),
            Some(AnswerValue::Single(id)) if !id.is_empty() => vec![id.as_str()],
            _ => Vec::new(),
        }
    }

    /// Whether `option_id` is the single answer or among the multiple answers
    pub fn is_selected(&self, question_id: &str, option_id: &str) -> bool {
        self.selections(question_id).contains(&option_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
