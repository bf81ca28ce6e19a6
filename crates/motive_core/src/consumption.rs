//! Consumptions: named actions that deliver reward to exactly one need.
//!
//! A trigger does not change the need at once. It queues a delivery whose
//! reward is released over its duration with the skewed signal kernel, and
//! all active deliveries are resolved into one scalar per tick.

use crate::decay::{delivery_ticks, signal_strength};
use crate::error::{invalid, MotiveResult};
use crate::snapshot::ConsumptionSnapshot;
use serde::{Deserialize, Serialize};

/// Hyperbolic discount per second: after one hour an event is worth 2/3.
pub const DEFAULT_ANTICIPATION_DISCOUNT: f64 = 0.5 / 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionKind {
    Appetitive,
    Aversive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionParams {
    pub name: String,
    /// Name of the need this consumption acts on
    pub need: String,
    /// Default reward of a trigger; negative rewards frustrate
    pub reward: f64,
    /// Default delivery duration in seconds
    pub duration: f64,
    /// Largest magnitude resolved in a single tick
    pub max_reward: f64,
    pub anticipation_discount: f64,
}

impl Default for ConsumptionParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            need: String::new(),
            reward: 1.0,
            duration: 3.0,
            max_reward: 1.0,
            anticipation_discount: DEFAULT_ANTICIPATION_DISCOUNT,
        }
    }
}

impl ConsumptionParams {
    pub fn new(
        name: impl Into<String>,
        need: impl Into<String>,
        reward: f64,
        duration: f64,
    ) -> Self {
        Self {
            name: name.into(),
            need: need.into(),
            reward,
            duration,
            ..Default::default()
        }
    }

    pub fn max_reward(mut self, max_reward: f64) -> Self {
        self.max_reward = max_reward;
        self
    }

    pub fn validate(&self) -> MotiveResult<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("consumption name must not be empty"));
        }
        if self.need.trim().is_empty() {
            return Err(invalid(format!("consumption '{}' has no need", self.name)));
        }
        if !self.reward.is_finite() {
            return Err(invalid(format!("consumption '{}': reward is not finite", self.name)));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(invalid(format!(
                "consumption '{}': duration must be positive, got {}",
                self.name, self.duration
            )));
        }
        if !self.max_reward.is_finite() || self.max_reward < 0.0 {
            return Err(invalid(format!(
                "consumption '{}': max_reward must be non-negative, got {}",
                self.name, self.max_reward
            )));
        }
        if !self.anticipation_discount.is_finite() || self.anticipation_discount < 0.0 {
            return Err(invalid(format!(
                "consumption '{}': anticipation_discount must be non-negative",
                self.name
            )));
        }
        Ok(())
    }
}

/// A reward currently being released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Ticks already delivered
    pub elapsed: u32,
    pub reward: f64,
    pub duration: f64,
}

/// Result of anticipating a consumption: imagined change to its need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anticipation {
    Satisfy(f64),
    Frustrate(f64),
    Neutral,
}

#[derive(Debug, Clone)]
pub struct Consumption {
    params: ConsumptionParams,
    deliveries: Vec<Delivery>,
    value: f64,
}

impl Consumption {
    pub fn new(params: ConsumptionParams) -> MotiveResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            deliveries: Vec::new(),
            value: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Name of the need this consumption acts on.
    pub fn need(&self) -> &str {
        &self.params.need
    }

    pub fn params(&self) -> &ConsumptionParams {
        &self.params
    }

    pub fn kind(&self) -> ConsumptionKind {
        if self.params.reward >= 0.0 {
            ConsumptionKind::Appetitive
        } else {
            ConsumptionKind::Aversive
        }
    }

    /// Value resolved during the last tick.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn reset(&mut self) {
        self.deliveries.clear();
        self.value = 0.0;
    }

    /// Queue a delivery. Concurrent deliveries stack.
    ///
    /// A non-finite reward or duration is rejected; a non-positive duration
    /// delivers the whole reward on the next tick.
    pub fn trigger(&mut self, reward: Option<f64>, duration: Option<f64>) -> MotiveResult<()> {
        let reward = reward.unwrap_or(self.params.reward);
        let duration = duration.unwrap_or(self.params.duration);
        if !reward.is_finite() {
            return Err(invalid(format!(
                "consumption '{}': reward must be finite, got {}",
                self.params.name, reward
            )));
        }
        if !duration.is_finite() {
            return Err(invalid(format!(
                "consumption '{}': duration must be finite, got {}",
                self.params.name, duration
            )));
        }
        tracing::debug!(
            "Triggered {}: reward={:.3}, duration={:.1}s",
            self.params.name,
            reward,
            duration
        );
        self.deliveries.push(Delivery {
            elapsed: 0,
            reward,
            duration,
        });
        Ok(())
    }

    /// Resolve all active deliveries into this tick's value and prune the
    /// finished ones. The caller applies the value to the need.
    pub fn update(&mut self, tick_seconds: f64) -> f64 {
        let mut total = 0.0;
        for delivery in &mut self.deliveries {
            total += signal_strength(
                delivery.elapsed,
                delivery.reward,
                delivery.duration,
                tick_seconds,
            );
            delivery.elapsed += 1;
        }
        self.deliveries
            .retain(|d| d.elapsed < delivery_ticks(d.duration, tick_seconds));
        let max = self.params.max_reward;
        self.value = total.clamp(-max, max);
        self.value
    }

    /// Hyperbolically discounted reward of an event `expiration` seconds away.
    /// An event without expiration (< 0) is worth half its reward.
    pub fn discounted(&self, reward: f64, expiration: f64) -> f64 {
        if expiration < 0.0 {
            reward / 2.0
        } else {
            reward / (1.0 + self.params.anticipation_discount * expiration)
        }
    }

    /// Imagined effect of executing this consumption for `reward`.
    pub fn anticipate(
        &self,
        reward: f64,
        certainty: f64,
        skill: f64,
        expiration: f64,
    ) -> Anticipation {
        Self::route(self.discounted(reward, expiration), certainty, skill)
    }

    /// Split an already discounted expectation into the imagined satisfaction
    /// (weighted by the chance of success) or frustration (chance of failure).
    pub fn route(discounted: f64, certainty: f64, skill: f64) -> Anticipation {
        let certainty = certainty.clamp(0.0, 1.0);
        let skill = skill.clamp(0.0, 1.0);
        if discounted > 0.0 {
            Anticipation::Satisfy(discounted * certainty * skill)
        } else if discounted < 0.0 {
            Anticipation::Frustrate(-discounted * certainty * (1.0 - skill))
        } else {
            Anticipation::Neutral
        }
    }

    pub fn snapshot(&self) -> ConsumptionSnapshot {
        ConsumptionSnapshot {
            name: self.params.name.clone(),
            need: self.params.need.clone(),
            kind: self.kind(),
            value: self.value,
        }
    }
}
