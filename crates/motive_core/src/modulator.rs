//! Modulators: global affective parameters (valence, arousal, dominance, ...).
//!
//! Each modulator has a baseline, an interval `[min, max]` around it, a
//! volatility (how easily it departs from the baseline) and a decay time
//! (how long it takes to get back). Targets are given in `[-1, 1]` and mapped
//! onto the asymmetric halves `[min, baseline]` and `[baseline, max]`.

use crate::decay::{clip_to, decay, sanitize};
use crate::error::{invalid, MotiveResult};
use crate::snapshot::ModulatorSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulatorParams {
    pub name: String,
    pub baseline: f64,
    pub min: f64,
    pub max: f64,
    pub volatility: f64,
    /// Seconds to relax from an extreme back to the baseline
    pub decay_time: f64,
}

impl Default for ModulatorParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            baseline: 0.0,
            min: -1.0,
            max: 1.0,
            volatility: 1.0,
            decay_time: 20.0,
        }
    }
}

impl ModulatorParams {
    pub fn new(name: impl Into<String>, baseline: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            baseline,
            min,
            max,
            ..Default::default()
        }
    }

    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn decay(mut self, seconds: f64) -> Self {
        self.decay_time = seconds;
        self
    }

    pub fn validate(&self) -> MotiveResult<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("modulator name must not be empty"));
        }
        let finite = [self.baseline, self.min, self.max, self.volatility, self.decay_time];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(invalid(format!("modulator '{}': non-finite parameter", self.name)));
        }
        if self.min > self.max {
            return Err(invalid(format!(
                "modulator '{}': min {} > max {}",
                self.name, self.min, self.max
            )));
        }
        if self.baseline < self.min || self.baseline > self.max {
            return Err(invalid(format!(
                "modulator '{}': baseline {} outside [{}, {}]",
                self.name, self.baseline, self.min, self.max
            )));
        }
        if !(0.0..=1.0).contains(&self.volatility) {
            return Err(invalid(format!(
                "modulator '{}': volatility {} outside [0, 1]",
                self.name, self.volatility
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Modulator {
    params: ModulatorParams,
    value: f64,
}

impl Modulator {
    pub fn new(params: ModulatorParams) -> MotiveResult<Self> {
        params.validate()?;
        Ok(Self {
            value: params.baseline,
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn params(&self) -> &ModulatorParams {
        &self.params
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn baseline(&self) -> f64 {
        self.params.baseline
    }

    pub fn reset(&mut self) {
        self.value = self.params.baseline;
    }

    /// Relax toward the baseline; excursions above and below it recover
    /// independently, each measured against its own half-range.
    pub fn update(&mut self, tick_seconds: f64) {
        let ModulatorParams {
            baseline,
            min,
            max,
            decay_time,
            ..
        } = self.params;
        let relaxed = if self.value >= baseline {
            let span = max - baseline;
            if span > 0.0 {
                let excursion = (self.value - baseline) / span;
                decay(excursion, decay_time, tick_seconds) * span + baseline
            } else {
                baseline
            }
        } else {
            let span = baseline - min;
            if span > 0.0 {
                let excursion = (baseline - self.value) / span;
                baseline - decay(excursion, decay_time, tick_seconds) * span
            } else {
                baseline
            }
        };
        self.value = clip_to(sanitize(relaxed, baseline), min, max);
    }

    /// Map a target in `[-1, 1]` onto the modulator range.
    pub fn scale_target(&self, target: f64) -> f64 {
        let ModulatorParams {
            baseline, min, max, ..
        } = self.params;
        let target = clip_to(sanitize(target, 0.0), -1.0, 1.0);
        if target >= 1.0 {
            max
        } else if target <= -1.0 {
            min
        } else if target > 0.0 {
            target * (max - baseline) + baseline
        } else {
            target * (baseline - min) + baseline
        }
    }

    /// Move toward the scaled target by a fraction `volatility` of the gap.
    pub fn approach(&mut self, target: f64) {
        let scaled = self.scale_target(target);
        let next = self.value + (scaled - self.value) * self.params.volatility;
        self.value = clip_to(next, self.params.min, self.params.max);
    }

    /// Current value mapped back to `[-1, 1]` relative to the baseline.
    pub fn normalized_value(&self) -> f64 {
        let ModulatorParams {
            baseline, min, max, ..
        } = self.params;
        if self.value >= baseline {
            let span = max - baseline;
            if span > 0.0 {
                (self.value - baseline) / span
            } else {
                0.0
            }
        } else {
            let span = baseline - min;
            if span > 0.0 {
                -(baseline - self.value) / span
            } else {
                0.0
            }
        }
    }

    pub fn snapshot(&self) -> ModulatorSnapshot {
        ModulatorSnapshot {
            name: self.params.name.clone(),
            value: self.value,
            baseline: self.params.baseline,
            min: self.params.min,
            max: self.params.max,
        }
    }
}
