//! Needs: the depleting motivational resources of the agent.
//!
//! Each need is normalized between 0 and 1, while its urge and reward signals
//! are scaled by a weight. Gain and loss determine how easily events satisfy
//! or frustrate it.

use crate::decay::{clip, decay, invert, sanitize};
use crate::error::{invalid, MotiveResult};
use crate::snapshot::NeedSnapshot;
use serde::{Deserialize, Serialize};

/// Time horizon (seconds) inside which impending depletion produces urgency.
pub const URGENCY_HORIZON_SECS: f64 = 300.0;

/// Slope of the pain ramp near depletion; pain starts once value < 1/20.
pub const DEPLETION_PAIN_GAIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedCategory {
    #[default]
    Physiological,
    Social,
    Cognitive,
}

/// Static description of a need, as it appears in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedParams {
    pub name: String,
    #[serde(rename = "type")]
    pub category: NeedCategory,
    pub initial_value: f64,
    /// Relative strength of the urge, compared to competing urges
    pub weight: f64,
    /// Time until the resource is fully depleted by itself, in seconds (< 0: no decay)
    pub decay_time: f64,
    pub gain: f64,
    pub loss: f64,
    pub pleasure_sensitivity: f64,
    pub pain_sensitivity: f64,
    /// Time until a maximal pleasure signal disappears, in seconds
    pub pleasure_decay: f64,
    /// Time until a maximal pain signal disappears, in seconds
    pub pain_decay: f64,
    /// How much anticipated events change the resource itself
    pub satisfaction_from_imagination: f64,
    pub frustration_from_imagination: f64,
    /// How much affect anticipated events produce
    pub pleasure_from_imagination: f64,
    pub pain_from_imagination: f64,
    /// Need whose value damps frustration of this one by `(1 - value) / 2`
    pub frustration_damping: Option<String>,
}

impl Default for NeedParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: NeedCategory::default(),
            initial_value: 0.5,
            weight: 1.0,
            decay_time: 3600.0,
            gain: 1.0,
            loss: 1.0,
            pleasure_sensitivity: 1.0,
            pain_sensitivity: 1.0,
            pleasure_decay: 10.0,
            pain_decay: 10.0,
            satisfaction_from_imagination: 0.1,
            frustration_from_imagination: 0.1,
            pleasure_from_imagination: 0.1,
            pain_from_imagination: 0.2,
            frustration_damping: None,
        }
    }
}

impl NeedParams {
    pub fn new(name: impl Into<String>, category: NeedCategory) -> Self {
        Self {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    pub fn initial(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn decay(mut self, seconds: f64) -> Self {
        self.decay_time = seconds;
        self
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn loss(mut self, loss: f64) -> Self {
        self.loss = loss;
        self
    }

    /// Set how strongly anticipation changes the resource (satisfaction, frustration).
    pub fn imagination(mut self, satisfaction: f64, frustration: f64) -> Self {
        self.satisfaction_from_imagination = satisfaction;
        self.frustration_from_imagination = frustration;
        self
    }

    pub fn damped_by(mut self, need: impl Into<String>) -> Self {
        self.frustration_damping = Some(need.into());
        self
    }

    pub fn validate(&self) -> MotiveResult<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("need name must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.initial_value) {
            return Err(invalid(format!(
                "need '{}': initial_value {} outside [0, 1]",
                self.name, self.initial_value
            )));
        }
        let non_negative = [
            ("weight", self.weight),
            ("gain", self.gain),
            ("loss", self.loss),
            ("pleasure_sensitivity", self.pleasure_sensitivity),
            ("pain_sensitivity", self.pain_sensitivity),
            ("satisfaction_from_imagination", self.satisfaction_from_imagination),
            ("frustration_from_imagination", self.frustration_from_imagination),
            ("pleasure_from_imagination", self.pleasure_from_imagination),
            ("pain_from_imagination", self.pain_from_imagination),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "need '{}': {} must be a finite non-negative number, got {}",
                    self.name, field, value
                )));
            }
        }
        for (field, value) in [
            ("decay_time", self.decay_time),
            ("pleasure_decay", self.pleasure_decay),
            ("pain_decay", self.pain_decay),
        ] {
            if value.is_nan() {
                return Err(invalid(format!("need '{}': {} is NaN", self.name, field)));
            }
        }
        if self.frustration_damping.as_deref() == Some(self.name.as_str()) {
            return Err(invalid(format!(
                "need '{}' cannot damp its own frustration",
                self.name
            )));
        }
        Ok(())
    }
}

/// A motivational resource with its derived drive and affect signals.
#[derive(Debug, Clone)]
pub struct Need {
    params: NeedParams,
    value: f64,
    urge: f64,
    urgency: f64,
    pleasure: f64,
    pain: f64,
}

impl Need {
    pub fn new(params: NeedParams) -> MotiveResult<Self> {
        params.validate()?;
        let mut need = Self {
            value: params.initial_value,
            params,
            urge: 0.0,
            urgency: 0.0,
            pleasure: 0.0,
            pain: 0.0,
        };
        need.compute_urge();
        need.compute_urgency();
        Ok(need)
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn category(&self) -> NeedCategory {
        self.params.category
    }

    pub fn params(&self) -> &NeedParams {
        &self.params
    }

    pub fn weight(&self) -> f64 {
        self.params.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn urge(&self) -> f64 {
        self.urge
    }

    pub fn urgency(&self) -> f64 {
        self.urgency
    }

    pub fn pleasure(&self) -> f64 {
        self.pleasure
    }

    pub fn pain(&self) -> f64 {
        self.pain
    }

    pub fn frustration_damping(&self) -> Option<&str> {
        self.params.frustration_damping.as_deref()
    }

    /// Largest urgency this need can produce.
    pub fn max_urgency(&self) -> f64 {
        self.params.weight * URGENCY_HORIZON_SECS / URGENCY_HORIZON_SECS.powi(2)
    }

    /// Urge relative to the weight, in `[0, 1]`.
    pub fn normalized_urge(&self) -> f64 {
        ratio(self.urge, self.params.weight)
    }

    /// Urgency relative to its maximum, in `[0, 1]`.
    pub fn normalized_urgency(&self) -> f64 {
        ratio(self.urgency, self.max_urgency())
    }

    /// Restore the state this need was created with.
    pub fn reset(&mut self) {
        self.value = self.params.initial_value;
        self.pleasure = 0.0;
        self.pain = 0.0;
        self.compute_urge();
        self.compute_urgency();
    }

    /// One tick of decay, then urge, urgency and depletion pain.
    pub fn update(&mut self, tick_seconds: f64) {
        let weight = self.params.weight;
        self.value = sanitize(
            decay(self.value, self.params.decay_time, tick_seconds),
            self.params.initial_value,
        );
        if weight > 0.0 {
            self.pleasure =
                decay(self.pleasure / weight, self.params.pleasure_decay, tick_seconds) * weight;
            self.pain = decay(self.pain / weight, self.params.pain_decay, tick_seconds) * weight;
        } else {
            self.pleasure = 0.0;
            self.pain = 0.0;
        }
        self.pleasure = sanitize(self.pleasure, 0.0);
        self.pain = sanitize(self.pain, 0.0);
        self.compute_urge();
        self.compute_urgency();
        self.compute_depletion_pain();
    }

    /// Response of the urge signal to the lack of the resource.
    fn compute_urge(&mut self) {
        self.urge = self.params.weight * clip(1.0 - self.value).powi(2);
    }

    /// Response of the urgency signal to the time left until depletion.
    fn compute_urgency(&mut self) {
        if self.params.decay_time < 0.0 {
            // a resource that never depletes is never urgent
            self.urgency = 0.0;
            return;
        }
        let time_left = invert(self.value) * self.params.decay_time;
        self.urgency = self.params.weight * (URGENCY_HORIZON_SECS - time_left).max(0.0)
            / URGENCY_HORIZON_SECS.powi(2);
    }

    /// Pain created by depletion of the resource; never lowers existing pain.
    fn compute_depletion_pain(&mut self) {
        let depletion = clip(1.0 - DEPLETION_PAIN_GAIN * self.value).powi(2)
            * self.params.weight
            * self.params.pain_sensitivity;
        self.pain = self.pain.max(depletion);
    }

    fn pleasure_cap(&self) -> f64 {
        self.params.weight * self.params.pleasure_sensitivity
    }

    fn pain_cap(&self) -> f64 {
        self.params.weight * self.params.pain_sensitivity
    }

    /// Increase the resource and raise pleasure. Returns the change in value.
    pub fn satisfy(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let delta = (self.value + amount * self.params.gain).min(1.0) - self.value;
        self.value += delta;
        self.pleasure = raise(self.pleasure, delta * self.pleasure_cap(), self.pleasure_cap());
        self.compute_urge();
        delta
    }

    /// Decrease the resource and raise pain. Returns the change in value (positive).
    pub fn frustrate(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let delta = self.value - (self.value - amount * self.params.loss).max(0.0);
        self.value -= delta;
        self.pain = raise(self.pain, delta * self.pain_cap(), self.pain_cap());
        self.compute_urge();
        delta
    }

    /// Anticipated satisfaction: the resource moves less than for a real
    /// event, but pleasure is still produced.
    pub fn imagine_satisfy(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let anticipated = (amount * self.params.gain).min(1.0 - self.value);
        let delta = (self.value + anticipated * self.params.satisfaction_from_imagination).min(1.0)
            - self.value;
        self.value += delta;
        let cap = self.pleasure_cap();
        self.pleasure = raise(
            self.pleasure,
            anticipated * self.params.pleasure_from_imagination * cap,
            cap,
        );
        self.compute_urge();
        delta
    }

    /// Anticipated frustration, the counterpart of [`Need::imagine_satisfy`].
    pub fn imagine_frustrate(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let anticipated = (amount * self.params.loss).min(self.value);
        let delta = self.value
            - (self.value - anticipated * self.params.frustration_from_imagination).max(0.0);
        self.value -= delta;
        let cap = self.pain_cap();
        self.pain = raise(self.pain, anticipated * self.params.pain_from_imagination * cap, cap);
        self.compute_urge();
        delta
    }

    pub fn snapshot(&self, is_leading_motive: bool) -> NeedSnapshot {
        NeedSnapshot {
            name: self.params.name.clone(),
            category: self.params.category,
            weight: self.params.weight,
            value: self.value,
            urge: self.urge,
            urgency: self.urgency,
            pain: self.pain,
            pleasure: self.pleasure,
            is_leading_motive,
        }
    }
}

#[inline]
fn raise(current: f64, amount: f64, cap: f64) -> f64 {
    (current + amount).min(cap).max(0.0)
}

#[inline]
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        clip(value / max)
    } else {
        0.0
    }
}
