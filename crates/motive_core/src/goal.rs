//! Goals and anticipated events.
//!
//! These are external references, not planned internally: a driver tells the
//! model which consumption it expects and how competent it is at bringing
//! it about, and the model reacts to those expectations.

use serde::{Deserialize, Serialize};

/// The leading motive: a need being pursued through a consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub need: String,
    pub consumption: String,
    /// Estimated probability of succeeding, in `[0, 1]`
    pub skill: f64,
    /// Anticipated event this goal was elevated from, if any
    pub event: Option<String>,
}

impl Goal {
    pub fn new(need: impl Into<String>, consumption: impl Into<String>, skill: f64) -> Self {
        Self {
            need: need.into(),
            consumption: consumption.into(),
            skill: skill.clamp(0.0, 1.0),
            event: None,
        }
    }
}

/// An expected (not yet realized) consumption event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnticipatedEvent {
    pub id: String,
    pub consumption: String,
    /// Positive: expected satisfaction; negative: expected frustration
    pub expected_reward: f64,
    /// Confidence that the event will yield the reward
    pub certainty: f64,
    /// Competence at getting the reward or avoiding the frustration
    pub skill: f64,
    /// Seconds until the event is no longer available (< 0: never expires)
    pub expiration: f64,
}

impl AnticipatedEvent {
    pub fn new(
        id: impl Into<String>,
        consumption: impl Into<String>,
        expected_reward: f64,
        certainty: f64,
        skill: f64,
        expiration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            consumption: consumption.into(),
            expected_reward,
            certainty: certainty.clamp(0.0, 1.0),
            skill: skill.clamp(0.0, 1.0),
            expiration,
        }
    }

    pub fn expires(&self) -> bool {
        self.expiration >= 0.0
    }

    /// Count down the expiration. Returns true once the event has run out.
    pub fn tick(&mut self, tick_seconds: f64) -> bool {
        if !self.expires() {
            return false;
        }
        self.expiration = (self.expiration - tick_seconds).max(0.0);
        self.expiration <= 0.0
    }
}
