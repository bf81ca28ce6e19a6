//! Emotions: named scalars read off the modulators and aggregates.
//!
//! An emotion has no state of its own. Each kind has one formula, fixed at
//! compile time, evaluated against an [`Appraisal`] after the modulators have
//! been steered.

use crate::aggregator::Aggregates;
use motive_core::decay::clip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionKind {
    Joy,
    Bliss,
    Anger,
    Disgust,
    Sadness,
    Fear,
    Pride,
    Pity,
    Guilt,
    Shame,
    Pain,
    Startle,
    Anxiety,
}

impl EmotionKind {
    pub const COUNT: usize = 13;

    pub const ALL: [EmotionKind; Self::COUNT] = [
        EmotionKind::Joy,
        EmotionKind::Bliss,
        EmotionKind::Anger,
        EmotionKind::Disgust,
        EmotionKind::Sadness,
        EmotionKind::Fear,
        EmotionKind::Pride,
        EmotionKind::Pity,
        EmotionKind::Guilt,
        EmotionKind::Shame,
        EmotionKind::Pain,
        EmotionKind::Startle,
        EmotionKind::Anxiety,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmotionKind::Joy => "joy",
            EmotionKind::Bliss => "bliss",
            EmotionKind::Anger => "anger",
            EmotionKind::Disgust => "disgust",
            EmotionKind::Sadness => "sadness",
            EmotionKind::Fear => "fear",
            EmotionKind::Pride => "pride",
            EmotionKind::Pity => "pity",
            EmotionKind::Guilt => "guilt",
            EmotionKind::Shame => "shame",
            EmotionKind::Pain => "pain",
            EmotionKind::Startle => "startle",
            EmotionKind::Anxiety => "anxiety",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Inputs of the emotion formulas. Modulators are normalized to `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Appraisal {
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
    pub resolution_level: f64,
    pub focus: f64,
    pub securing_rate: f64,
    pub aggregates: Aggregates,
}

#[inline]
fn pos(x: f64) -> f64 {
    x.max(0.0)
}

#[inline]
fn neg(x: f64) -> f64 {
    (-x).max(0.0)
}

/// `[-1, 1]` to `[0, 1]`.
#[inline]
fn unit(x: f64) -> f64 {
    (x + 1.0) / 2.0
}

impl Appraisal {
    /// Intensity of `kind`, in `[0, 1]`.
    pub fn evaluate(&self, kind: EmotionKind) -> f64 {
        let v = self.valence;
        let d = self.dominance;
        let s = self.securing_rate;
        let a = unit(self.arousal);
        let r = unit(self.resolution_level);
        let f = unit(self.focus);
        let Aggregates {
            pain,
            urge,
            urgency,
            competence,
            ..
        } = self.aggregates;

        let value = match kind {
            EmotionKind::Joy => pos(v) * (0.5 + 0.5 * a),
            EmotionKind::Bliss => pos(v) * (1.0 - a) * (1.0 - urge),
            EmotionKind::Anger => neg(v) * a * pos(d),
            EmotionKind::Disgust => pain * pos(d) * (1.0 - a),
            EmotionKind::Sadness => neg(v) * (1.0 - a) * (0.5 + 0.5 * neg(d)),
            EmotionKind::Fear => neg(v) * a * (0.5 + 0.5 * neg(d)),
            EmotionKind::Pride => pos(v) * pos(d) * competence,
            EmotionKind::Pity => pain * (1.0 - f) * pos(s),
            EmotionKind::Guilt => pain * neg(d) * (1.0 - competence),
            EmotionKind::Shame => neg(v) * neg(d) * (1.0 - competence),
            EmotionKind::Pain => pain,
            EmotionKind::Startle => a * pos(s) * (1.0 - r),
            EmotionKind::Anxiety => urgency * a * (1.0 - competence),
        };
        clip(value)
    }
}
