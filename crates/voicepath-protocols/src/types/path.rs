//! Path: an ordered sequence of steps.

use super::Step;

/// A replayable sequence of steps.
///
/// Either a server-matched candidate or a freshly recorded contribution.
/// Consumed by the executor and never changed while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    steps: Vec<Step>,
    task_intent: String,
    domain: String,
    relevance_score: f64,
    weight: f64,
}

impl Path {
    pub fn new(
        task_intent: impl Into<String>,
        domain: impl Into<String>,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            steps,
            task_intent: task_intent.into(),
            domain: domain.into(),
            relevance_score: 0.0,
            weight: 1.0,
        }
    }

    /// Set the relevance score, clamped to `0.0..=1.0`.
    pub fn with_relevance_score(mut self, score: f64) -> Self {
        self.relevance_score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn task_intent(&self) -> &str {
        &self.task_intent
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
