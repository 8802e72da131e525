//! Replayable step definition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selector used when a click or input step arrives without any candidates.
pub const SENTINEL_SELECTOR: &str = "body";

/// Kind of browser action a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Navigate,
    Click,
    Input,
    Wait,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Click => "click",
            Self::Input => "input",
            Self::Wait => "wait",
        }
    }

    /// Whether steps of this kind act on an element and need selectors.
    pub fn requires_selector(&self) -> bool {
        matches!(self, Self::Click | Self::Input)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "navigate" => Ok(Self::Navigate),
            "click" => Ok(Self::Click),
            "input" => Ok(Self::Input),
            "wait" => Ok(Self::Wait),
            other => Err(format!("unknown action kind: {}", other)),
        }
    }
}

/// One action in a path.
///
/// A step is built once (constructor plus `with_*` calls) and then only read.
/// Fields are private so a step owned by a path or session cannot change
/// underneath an executor that is replaying it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    order: u32,
    url: String,
    action: ActionKind,
    selectors: Vec<String>,
    description: String,
    text_labels: Vec<String>,
    is_input: bool,
    should_wait: bool,
    input_type: Option<String>,
    input_placeholder: Option<String>,
    wait_message: Option<String>,
}

impl Step {
    /// Create a step.
    ///
    /// Blank selectors are dropped. Click and input steps that end up with no
    /// candidates fall back to [`SENTINEL_SELECTOR`].
    pub fn new(
        order: u32,
        url: impl Into<String>,
        action: ActionKind,
        selectors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut selectors: Vec<String> = selectors
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.trim().is_empty())
            .collect();
        if selectors.is_empty() && action.requires_selector() {
            selectors.push(SENTINEL_SELECTOR.to_string());
        }

        Self {
            order,
            url: url.into(),
            action,
            selectors,
            description: String::new(),
            text_labels: Vec::new(),
            is_input: action == ActionKind::Input,
            should_wait: action == ActionKind::Wait,
            input_type: None,
            input_placeholder: None,
            wait_message: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_text_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.text_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_is_input(mut self, is_input: bool) -> Self {
        self.is_input = is_input;
        self
    }

    pub fn with_should_wait(mut self, should_wait: bool) -> Self {
        self.should_wait = should_wait;
        self
    }

    pub fn with_input_type(mut self, input_type: Option<String>) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_input_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.input_placeholder = placeholder;
        self
    }

    pub fn with_wait_message(mut self, message: Option<String>) -> Self {
        self.wait_message = message;
        self
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// Candidate locators, most specific first.
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn text_labels(&self) -> &[String] {
        &self.text_labels
    }

    pub fn is_input(&self) -> bool {
        self.is_input
    }

    pub fn should_wait(&self) -> bool {
        self.should_wait
    }

    pub fn input_type(&self) -> Option<&str> {
        self.input_type.as_deref()
    }

    pub fn input_placeholder(&self) -> Option<&str> {
        self.input_placeholder.as_deref()
    }

    pub fn wait_message(&self) -> Option<&str> {
        self.wait_message.as_deref()
    }

    /// Text labels joined and lower-cased, used for keyword matching.
    pub fn hint_text(&self) -> String {
        self.text_labels.join(" ").to_lowercase()
    }

    /// Description for progress reporting, falling back to the action name.
    pub fn display_label(&self) -> &str {
        if self.description.is_empty() {
            self.action.as_str()
        } else {
            &self.description
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
