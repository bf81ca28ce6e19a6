//! Scripted triggers and random perturbations applied between ticks.

use motive_limbic::MotivationSystem;
use rand::rngs::StdRng;
use rand::Rng;

/// A consumption to trigger before the tick with the given step number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTrigger {
    pub consumption: String,
    pub step: u64,
}

/// Parse `NAME@STEP`, or `NAME` for step 0.
pub fn parse_trigger(s: &str) -> Result<ScheduledTrigger, String> {
    let (name, step) = match s.split_once('@') {
        Some((name, step)) => {
            let step = step
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid step in '{}': {}", s, e))?;
            (name, step)
        }
        None => (s, 0),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing consumption name in '{}'", s));
    }
    Ok(ScheduledTrigger {
        consumption: name.to_string(),
        step,
    })
}

/// Parse a probability in `[0, 1]`.
pub fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("probability must be between 0 and 1, got {}", p))
    }
}

/// Parse a finite, non-negative amount.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let x: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if x.is_finite() && x >= 0.0 {
        Ok(x)
    } else {
        Err(format!("amount must be a finite non-negative number, got {}", x))
    }
}

/// Random satisfy/frustrate kicks, so that unattended runs do not just decay.
pub struct Perturbation {
    rng: StdRng,
    probability: f64,
    max_amount: f64,
}

impl Perturbation {
    pub fn new(rng: StdRng, probability: f64, max_amount: f64) -> Self {
        Self {
            rng,
            probability,
            max_amount,
        }
    }

    /// With the configured probability, satisfy or frustrate one random need.
    pub fn apply(&mut self, system: &mut MotivationSystem) -> anyhow::Result<()> {
        if self.probability <= 0.0 || !self.rng.gen_bool(self.probability) {
            return Ok(());
        }
        let needs = system.needs();
        if needs.is_empty() {
            return Ok(());
        }
        let name = needs[self.rng.gen_range(0..needs.len())].name().to_string();
        let amount = self.rng.gen_range(0.0..=self.max_amount);
        let delta = if self.rng.gen_bool(0.5) {
            system.satisfy(&name, amount)?
        } else {
            -system.frustrate(&name, amount)?
        };
        tracing::debug!("Perturbed {} by {:+.4}", name, delta);
        Ok(())
    }
}
