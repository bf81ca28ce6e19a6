//! Modulator steering: the per-tick target each modulator approaches.
//!
//! Targets are in `[-1, 1]`. Raw combinations of aggregates and need terms
//! are mapped there with [`rescale`] using their theoretical bounds, which
//! differ with and without a leading motive.

use crate::aggregator::Aggregates;
use motive_core::decay::clip_to;

/// The modulators the engine steers, in steering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulatorRole {
    Valence,
    Arousal,
    Dominance,
    ResolutionLevel,
    Focus,
    SecuringRate,
}

impl ModulatorRole {
    pub const ALL: [ModulatorRole; 6] = [
        ModulatorRole::Valence,
        ModulatorRole::Arousal,
        ModulatorRole::Dominance,
        ModulatorRole::ResolutionLevel,
        ModulatorRole::Focus,
        ModulatorRole::SecuringRate,
    ];

    /// Catalog name of the modulator filling this role.
    pub fn name(self) -> &'static str {
        match self {
            ModulatorRole::Valence => "valence",
            ModulatorRole::Arousal => "arousal",
            ModulatorRole::Dominance => "dominance",
            ModulatorRole::ResolutionLevel => "resolution_level",
            ModulatorRole::Focus => "focus",
            ModulatorRole::SecuringRate => "securing_rate",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Leading motive terms, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadingTerms {
    /// Urge of the leading need relative to its weight
    pub urge: f64,
    /// Urgency of the leading need relative to its maximum
    pub urgency: f64,
    /// Skill estimate of the goal
    pub skill: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringInputs {
    pub aggregates: Aggregates,
    pub leading: Option<LeadingTerms>,
    /// Urge of the uncertainty need relative to its weight
    pub uncertainty: f64,
    /// Value of the fatigue need
    pub fatigue: f64,
}

/// Map `raw` from `[lo, hi]` onto `[-1, 1]`. An empty interval maps to 0.
pub fn rescale(raw: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        2.0 * (raw - lo) / (hi - lo) - 1.0
    } else {
        0.0
    }
}

/// Target for `role`, given the normalized arousal after this tick's
/// arousal approach.
pub fn target(role: ModulatorRole, inputs: &SteeringInputs, arousal: f64) -> f64 {
    let agg = &inputs.aggregates;
    let c = agg.competence;
    let nx = inputs.uncertainty;
    let raw = match (role, inputs.leading) {
        (ModulatorRole::Valence, _) => agg.pleasure - agg.pain,
        (ModulatorRole::Arousal, _) => agg.urge + agg.urgency - inputs.fatigue,
        (ModulatorRole::Dominance, _) => 2.0 * c - 1.0,
        (ModulatorRole::ResolutionLevel, Some(l)) => {
            rescale(-arousal + l.urge - l.urgency, -2.0, 2.0)
        }
        (ModulatorRole::ResolutionLevel, None) => -arousal,
        (ModulatorRole::Focus, Some(l)) => {
            rescale(arousal + l.urge + l.urgency - nx + c, -2.0, 4.0)
        }
        (ModulatorRole::Focus, None) => rescale(arousal - nx + c, -2.0, 2.0),
        (ModulatorRole::SecuringRate, Some(l)) => {
            rescale(nx - (l.urge + l.urgency + l.skill), -3.0, 1.0)
        }
        (ModulatorRole::SecuringRate, None) => rescale(nx - c, -1.0, 1.0),
    };
    clip_to(raw, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(leading: Option<LeadingTerms>) -> SteeringInputs {
        SteeringInputs {
            aggregates: Aggregates {
                pain: 0.1,
                pleasure: 0.6,
                urge: 0.4,
                urgency: 0.2,
                competence: 0.75,
            },
            leading,
            uncertainty: 0.5,
            fatigue: 0.5,
        }
    }

    #[test]
    fn test_roles_are_indexed_in_order() {
        for (i, role) in ModulatorRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert_eq!(ModulatorRole::SecuringRate.name(), "securing_rate");
    }

    #[test]
    fn test_rescale_bounds() {
        assert_eq!(rescale(-2.0, -2.0, 4.0), -1.0);
        assert_eq!(rescale(4.0, -2.0, 4.0), 1.0);
        assert_eq!(rescale(1.0, -2.0, 4.0), 0.0);
        assert_eq!(rescale(3.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_affect_targets() {
        let i = inputs(None);
        assert!((target(ModulatorRole::Valence, &i, 0.0) - 0.5).abs() < 1e-12);
        assert!((target(ModulatorRole::Arousal, &i, 0.0) - 0.1).abs() < 1e-12);
        assert!((target(ModulatorRole::Dominance, &i, 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_targets_without_goal() {
        let i = inputs(None);
        assert_eq!(target(ModulatorRole::ResolutionLevel, &i, 0.4), -0.4);
        // (0.4 - 0.5 + 0.75 + 2) / 4 * 2 - 1
        assert!((target(ModulatorRole::Focus, &i, 0.4) - 0.325).abs() < 1e-12);
        assert!((target(ModulatorRole::SecuringRate, &i, 0.4) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_targets_with_goal() {
        let i = inputs(Some(LeadingTerms {
            urge: 1.0,
            urgency: 0.0,
            skill: 0.0,
        }));
        // calm agent with a strong leading urge resolves detail
        assert!((target(ModulatorRole::ResolutionLevel, &i, -1.0) - 1.0).abs() < 1e-12);
        assert!((target(ModulatorRole::SecuringRate, &i, 0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_targets_are_clipped() {
        let mut i = inputs(None);
        i.aggregates.pleasure = 1.0;
        i.aggregates.pain = 0.0;
        i.aggregates.urge = 1.0;
        i.aggregates.urgency = 1.0;
        i.fatigue = 0.0;
        assert_eq!(target(ModulatorRole::Arousal, &i, 0.0), 1.0);
        for role in ModulatorRole::ALL {
            let t = target(role, &i, 1.0);
            assert!((-1.0..=1.0).contains(&t), "{:?} -> {}", role, t);
        }
    }
}
