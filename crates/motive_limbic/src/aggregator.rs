//! Aggregator: global pain, pleasure, urge and urgency of the whole agent.
//!
//! Each aggregate is a weighted mean over all needs, compressed with
//! `1 - e^(-k x)`. While a goal is set, the leading need counts more the more
//! focused the agent is, in numerator and denominator alike.

use motive_core::decay::{clip, exponential_scaling};
use motive_core::{EngineTuning, Need};

/// Global scalars recomputed every tick, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    pub pain: f64,
    pub pleasure: f64,
    pub urge: f64,
    pub urgency: f64,
    pub competence: f64,
}

/// The leading motive as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attention {
    /// Index of the leading need
    pub need: usize,
    /// Normalized focus modulator, in `[-1, 1]`
    pub focus: f64,
}

impl Aggregates {
    pub const NAMES: [&'static str; 5] = [
        "combined_pain",
        "combined_pleasure",
        "combined_urge",
        "combined_urgency",
        "general_competence",
    ];

    pub fn compute(
        needs: &[Need],
        attention: Option<Attention>,
        competence: f64,
        tuning: &EngineTuning,
    ) -> Self {
        let mut total_weight = 0.0;
        let (mut pain, mut pleasure, mut urge, mut urgency) = (0.0, 0.0, 0.0, 0.0);

        for (i, need) in needs.iter().enumerate() {
            let multiplier = match attention {
                Some(a) if a.need == i => {
                    1.0 + tuning.leading_motive_amplification * a.focus.max(0.0)
                }
                _ => 1.0,
            };
            let weight = need.weight() * multiplier;
            total_weight += weight;
            pain += need.pain() * multiplier;
            pleasure += need.pleasure() * multiplier;
            urge += need.urge() * multiplier;
            // urgency is tiny in absolute terms; weigh its share of the maximum
            urgency += need.normalized_urgency() * weight;
        }

        let saturate = |sum: f64| {
            if total_weight > 0.0 {
                clip(exponential_scaling(sum / total_weight, tuning.saturation_factor))
            } else {
                0.0
            }
        };

        Self {
            pain: saturate(pain),
            pleasure: saturate(pleasure),
            urge: saturate(urge),
            urgency: saturate(urgency),
            competence: clip(competence),
        }
    }

    /// Name-value pairs in snapshot order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        let [pain, pleasure, urge, urgency, competence] = Self::NAMES;
        [
            (pain, self.pain),
            (pleasure, self.pleasure),
            (urge, self.urge),
            (urgency, self.urgency),
            (competence, self.competence),
        ]
    }
}

/// Competence of the agent: the competence need alone, or its geometric mean
/// with the skill estimate of the current goal.
pub fn general_competence(competence: f64, goal_skill: Option<f64>) -> f64 {
    match goal_skill {
        Some(skill) => (clip(competence) * clip(skill)).sqrt(),
        None => clip(competence),
    }
}
