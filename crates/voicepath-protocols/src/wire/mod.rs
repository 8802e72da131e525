//! Wire shapes for the path REST contract and contribution transport.
//!
//! All wire types use camelCase field names.

use serde::{Deserialize, Serialize};

use crate::types::{ActionKind, Path, RecordedStep, Step};

/// Step as exchanged with the path service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStep {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    pub action: ActionKind,
    #[serde(default)]
    pub selectors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub text_labels: Vec<String>,
    #[serde(default)]
    pub is_input: bool,
    #[serde(default)]
    pub should_wait: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_message: Option<String>,
}

impl WireStep {
    pub fn from_step(step: &Step, domain: &str) -> Self {
        Self {
            url: step.url().to_string(),
            domain: domain.to_string(),
            action: step.action(),
            selectors: step.selectors().to_vec(),
            description: step.description().to_string(),
            text_labels: step.text_labels().to_vec(),
            is_input: step.is_input(),
            should_wait: step.should_wait(),
            input_type: step.input_type().map(str::to_string),
            input_placeholder: step.input_placeholder().map(str::to_string),
            wait_message: step.wait_message().map(str::to_string),
        }
    }

    /// Build the in-memory step; the wire shape carries no order, so the
    /// position in the containing list is used.
    pub fn into_step(self, order: u32) -> Step {
        Step::new(order, self.url, self.action, self.selectors)
            .with_description(self.description)
            .with_text_labels(self.text_labels)
            .with_is_input(self.is_input)
            .with_should_wait(self.should_wait)
            .with_input_type(self.input_type)
            .with_input_placeholder(self.input_placeholder)
            .with_wait_message(self.wait_message)
    }
}

/// Path as returned by search (and as stored in replay files).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub task_intent: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub steps: Vec<WireStep>,
}

fn default_weight() -> f64 {
    1.0
}

impl WirePath {
    pub fn from_path(path: &Path) -> Self {
        Self {
            id: None,
            task_intent: path.task_intent().to_string(),
            domain: path.domain().to_string(),
            relevance_score: path.relevance_score(),
            weight: path.weight(),
            steps: path
                .steps()
                .iter()
                .map(|s| WireStep::from_step(s, path.domain()))
                .collect(),
        }
    }

    pub fn into_path(self) -> Path {
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.into_step(i as u32))
            .collect();
        Path::new(self.task_intent, self.domain, steps)
            .with_relevance_score(self.relevance_score)
            .with_weight(self.weight)
    }
}

/// Body of `POST /paths`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePathRequest {
    pub session_id: String,
    pub task_intent: String,
    pub domain: String,
    pub steps: Vec<WireStep>,
}

impl SavePathRequest {
    pub fn from_path(session_id: impl Into<String>, path: &Path) -> Self {
        Self {
            session_id: session_id.into(),
            task_intent: path.task_intent().to_string(),
            domain: path.domain().to_string(),
            steps: path
                .steps()
                .iter()
                .map(|s| WireStep::from_step(s, path.domain()))
                .collect(),
        }
    }
}

/// Response of `POST /paths`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePathResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /paths/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub paths: Vec<WirePath>,
}

impl SearchResponse {
    /// Matched paths, best relevance first.
    pub fn into_paths(self) -> Vec<Path> {
        let mut paths: Vec<Path> = self.paths.into_iter().map(WirePath::into_path).collect();
        paths.sort_by(|a, b| b.relevance_score().total_cmp(&a.relevance_score()));
        paths
    }
}

/// One contribution transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionMessage {
    pub session_id: String,
    pub task: String,
    pub steps: Vec<RecordedStep>,
    pub is_partial: bool,
    pub is_complete: bool,
    pub total_steps: usize,
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
