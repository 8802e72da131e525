//! Interaction records captured while recording a contribution.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActionKind, Step};

/// Key code browsers report for Enter.
const ENTER_KEY_CODE: i64 = 13;

/// One interaction observed in the browser during a recording session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedStep {
    /// Observed action name (`click`, `type`, `navigate`, `submit`, ...).
    pub action: String,

    #[serde(default)]
    pub url: String,

    /// Candidate selectors for the target element, most specific first.
    #[serde(default)]
    pub selectors: Vec<String>,

    /// Visible text of the target element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Current input value for typing events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Raw event and element attributes (`keyCode`, `placeholder`, `type`, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl RecordedStep {
    pub fn new(action: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            url: url.into(),
            selectors: Vec::new(),
            text: None,
            value: None,
            attributes: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Whether this is a keystroke-level typing event.
    pub fn is_typing(&self) -> bool {
        self.action.eq_ignore_ascii_case("type")
    }

    /// Whether the attributes carry an Enter key signal.
    pub fn is_enter_key(&self) -> bool {
        let code_is_enter = |key: &str| {
            self.attributes.get(key).is_some_and(|v| match v {
                serde_json::Value::Number(n) => n.as_i64() == Some(ENTER_KEY_CODE),
                serde_json::Value::String(s) => s.trim() == "13",
                _ => false,
            })
        };
        let name_is_enter = self
            .attributes
            .get("key")
            .and_then(|v| v.as_str())
            .is_some_and(|k| k.eq_ignore_ascii_case("enter"));

        code_is_enter("keyCode") || code_is_enter("which") || name_is_enter
    }

    /// Replay kind this observation maps to.
    pub fn action_kind(&self) -> ActionKind {
        match self.action.to_ascii_lowercase().as_str() {
            "type" | "input" | "change" => ActionKind::Input,
            "navigate" | "load" => ActionKind::Navigate,
            "wait" => ActionKind::Wait,
            _ => ActionKind::Click,
        }
    }

    /// Convert into a replayable step at the given position.
    pub fn to_step(&self, order: u32) -> Step {
        let kind = self.action_kind();
        let attr = |key: &str| {
            self.attributes
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let mut labels: Vec<String> = Vec::new();
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            labels.push(text.to_string());
        }
        for key in ["aria-label", "placeholder", "title", "name"] {
            if let Some(v) = attr(key).filter(|v| !v.trim().is_empty()) {
                labels.push(v);
            }
        }
        let description = match (kind, self.text.as_deref()) {
            (ActionKind::Click, Some(text)) if !text.trim().is_empty() => {
                format!("Click \"{}\"", text.trim())
            }
            (ActionKind::Navigate, _) => format!("Open {}", self.url),
            _ => format!("{} {}", kind, self.selectors.first().map_or("", String::as_str)),
        };

        Step::new(order, self.url.clone(), kind, self.selectors.clone())
            .with_description(description.trim().to_string())
            .with_text_labels(labels)
            .with_input_type(attr("type"))
            .with_input_placeholder(attr("placeholder"))
    }
}

#[cfg(test)]
#[path = "recorded_tests.rs"]
mod tests;
