//! Agent catalog: the fixed set of needs, consumptions and modulators a model
//! is built from, plus the named couplings between them.
//!
//! The default catalog is the reference agent. Consumption rewards describe
//! how much an event of that type affects the agent in its environment, not
//! how sensitive the agent is to it.

use crate::consumption::ConsumptionParams;
use crate::error::{invalid, MotiveResult};
use crate::modulator::ModulatorParams;
use crate::need::{NeedCategory, NeedParams};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Needs and consumptions that the engine reads by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wiring {
    /// Need whose value is the agent's general competence
    pub competence_need: String,
    /// Need whose urge measures perceived uncertainty
    pub uncertainty_need: String,
    /// Need whose value lowers arousal
    pub fatigue_need: String,
    /// Consumption triggered when an expectation is met
    pub confirmation: String,
    /// Consumption triggered when an expectation fails
    pub disconfirmation: String,
}

impl Default for Wiring {
    fn default() -> Self {
        Self {
            competence_need: "competence".to_string(),
            uncertainty_need: "exploration".to_string(),
            fatigue_need: "rest".to_string(),
            confirmation: "confirmation".to_string(),
            disconfirmation: "disconfirmation".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCatalog {
    pub needs: Vec<NeedParams>,
    pub consumptions: Vec<ConsumptionParams>,
    pub modulators: Vec<ModulatorParams>,
    #[serde(default)]
    pub wiring: Wiring,
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self::reference_agent()
    }
}

impl AgentCatalog {
    /// The reference agent: 13 needs, 23 consumptions, 6 modulators.
    pub fn reference_agent() -> Self {
        use NeedCategory::*;

        let needs = [
            ("food", Physiological, 0.6, 84_000.0, 0.5, 0.01),
            ("water", Physiological, 1.0, 9_000.0, 1.0, 0.3),
            ("rest", Physiological, 0.3, 60_000.0, 1.0, 0.5),
            ("health", Physiological, 10.0, 31_536_080.0, 0.05, 0.2),
            ("libido", Physiological, 8.0, 200_000.0, 0.8, 0.2),
            ("affiliation", Social, 2.0, 60_000.0, 0.1, 0.5),
            ("legitimacy", Social, 12.0, 1_000_000.0, 0.1, 0.5),
            ("nurturing", Social, 3.0, 6_400.0, 0.5, 0.7),
            ("dominance", Social, 0.5, 300_000.0, 0.2, 0.4),
            ("affection", Social, 10.0, 10_000_000.0, 0.8, 1.0),
            ("competence", Cognitive, 0.2, 1_000.0, 0.2, 0.2),
            ("exploration", Cognitive, 0.1, 1_000.0, 1.0, 1.0),
            ("aesthetics", Cognitive, 0.2, 6_400.0, 1.0, 1.0),
        ]
        .into_iter()
        .map(|(name, category, weight, decay, gain, loss)| {
            let need = NeedParams::new(name, category)
                .weight(weight)
                .decay(decay)
                .gain(gain)
                .loss(loss);
            // anticipation alone never changes a bodily resource
            let need = match category {
                Physiological => need.imagination(0.0, 0.0),
                _ => need,
            };
            match name {
                "food" => need.initial(1.0),
                "exploration" => need.damped_by("competence"),
                _ => need,
            }
        })
        .collect();

        let consumptions = [
            ("eat", "food", 1.0, 20.0),
            ("drink", "water", 0.5, 5.0),
            ("sweat", "water", -0.1, 30.0),
            ("recover", "rest", 0.3, 10.0),
            ("sprint", "rest", -0.5, 10.0),
            ("bruise", "health", -0.3, 3.0),
            ("mate", "libido", 1.0, 120.0),
            ("acceptance", "affiliation", 0.5, 3.0),
            ("rejection", "affiliation", -0.5, 3.0),
            ("pride", "legitimacy", 1.0, 10.0),
            ("shame", "legitimacy", -1.0, 10.0),
            ("support", "nurturing", 1.0, 3.0),
            ("supplication", "nurturing", -0.5, 3.0),
            ("win", "dominance", 1.0, 3.0),
            ("loss", "dominance", -1.0, 3.0),
            ("connection", "affection", 1.0, 30.0),
            ("abandonment", "affection", -1.0, 30.0),
            ("success", "competence", 1.0, 1.0),
            ("failure", "competence", -1.0, 1.0),
            ("confirmation", "exploration", 1.0, 1.0),
            ("disconfirmation", "exploration", -1.0, 1.0),
            ("admiration", "aesthetics", 1.0, 3.0),
            ("disgust", "aesthetics", -0.2, 3.0),
        ]
        .into_iter()
        .map(|(name, need, reward, duration)| {
            ConsumptionParams::new(name, need, reward, duration)
        })
        .collect();

        let modulators = vec![
            ModulatorParams::new("valence", 0.2, -1.0, 1.0),
            ModulatorParams::new("arousal", 0.3, 0.0, 1.0),
            // approach or retraction
            ModulatorParams::new("dominance", 0.0, -1.0, 1.0),
            // detail in perception and cognition
            ModulatorParams::new("resolution_level", 0.5, 0.0, 1.0),
            // selection threshold, and narrowness of perspective
            ModulatorParams::new("focus", 0.5, 0.0, 1.0),
            // attention outwards or inwards
            ModulatorParams::new("securing_rate", 0.0, -1.0, 1.0),
        ];

        Self {
            needs,
            consumptions,
            modulators,
            wiring: Wiring::default(),
        }
    }

    /// Check entries and every cross-reference between them.
    pub fn validate(&self) -> MotiveResult<()> {
        let mut need_names = HashSet::new();
        for need in &self.needs {
            need.validate()?;
            if !need_names.insert(need.name.as_str()) {
                return Err(invalid(format!("duplicate need '{}'", need.name)));
            }
        }
        for need in &self.needs {
            if let Some(source) = &need.frustration_damping {
                if !need_names.contains(source.as_str()) {
                    return Err(invalid(format!(
                        "need '{}' is damped by unknown need '{}'",
                        need.name, source
                    )));
                }
            }
        }

        let mut consumption_names = HashSet::new();
        for consumption in &self.consumptions {
            consumption.validate()?;
            if !consumption_names.insert(consumption.name.as_str()) {
                return Err(invalid(format!("duplicate consumption '{}'", consumption.name)));
            }
            if !need_names.contains(consumption.need.as_str()) {
                return Err(invalid(format!(
                    "consumption '{}' targets unknown need '{}'",
                    consumption.name, consumption.need
                )));
            }
        }

        let mut modulator_names = HashSet::new();
        for modulator in &self.modulators {
            modulator.validate()?;
            if !modulator_names.insert(modulator.name.as_str()) {
                return Err(invalid(format!("duplicate modulator '{}'", modulator.name)));
            }
        }

        let w = &self.wiring;
        for (role, name) in [
            ("competence_need", &w.competence_need),
            ("uncertainty_need", &w.uncertainty_need),
            ("fatigue_need", &w.fatigue_need),
        ] {
            if !need_names.contains(name.as_str()) {
                return Err(invalid(format!("wiring {} names unknown need '{}'", role, name)));
            }
        }
        for (role, name) in [
            ("confirmation", &w.confirmation),
            ("disconfirmation", &w.disconfirmation),
        ] {
            if !consumption_names.contains(name.as_str()) {
                return Err(invalid(format!(
                    "wiring {} names unknown consumption '{}'",
                    role, name
                )));
            }
        }
        Ok(())
    }
}
