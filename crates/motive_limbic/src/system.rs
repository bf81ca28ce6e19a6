//! Motivation System: the composition root of the model.
//!
//! The system owns every need, consumption and modulator, resolves all names
//! once at construction, and runs the per-tick pipeline:
//!
//! ```text
//! Needs -> Consumptions -> Aggregates -> Modulators -> Emotions -> Events
//! ```
//!
//! Each stage reads what the previous stage computed in the same tick.
//! Entities never look each other up; couplings are resolved to indices here
//! and values are passed in explicitly. Callers may mutate the model only
//! through the entry points below, between ticks.

use crate::aggregator::{general_competence, Aggregates, Attention};
use crate::emotion::{Appraisal, EmotionKind};
use crate::events::{EventBook, EventChange};
use crate::steering::{self, LeadingTerms, ModulatorRole, SteeringInputs};
use anyhow::Context;
use motive_core::{
    AgentCatalog, Anticipation, AnticipatedEvent, Consumption, EngineTuning, Goal, Modulator,
    MotiveConfig, MotiveError, MotiveResult, Need, ScalarSnapshot, Settings, Snapshot,
};
use std::collections::HashMap;
use std::path::Path;

/// A goal with its names resolved.
#[derive(Debug, Clone)]
struct ActiveGoal {
    goal: Goal,
    need: usize,
}

/// Indices of the entities the engine reads by role.
#[derive(Debug, Clone, Copy)]
struct Roles {
    competence: usize,
    uncertainty: usize,
    fatigue: usize,
    confirmation: usize,
    disconfirmation: usize,
    modulators: [usize; 6],
}

pub struct MotivationSystem {
    settings: Settings,
    tuning: EngineTuning,

    needs: Vec<Need>,
    need_index: HashMap<String, usize>,
    /// Need whose value damps frustration of each need
    damping: Vec<Option<usize>>,

    consumptions: Vec<Consumption>,
    consumption_index: HashMap<String, usize>,
    /// Need each consumption acts on
    targets: Vec<usize>,

    modulators: Vec<Modulator>,
    modulator_index: HashMap<String, usize>,

    roles: Roles,
    aggregates: Aggregates,
    emotions: [f64; EmotionKind::COUNT],
    goal: Option<ActiveGoal>,
    events: EventBook,
    step: u64,
}

impl MotivationSystem {
    /// Build a system from a catalog. Every name and coupling is checked here;
    /// nothing is looked up by name during a tick.
    pub fn new(
        catalog: AgentCatalog,
        settings: Settings,
        tuning: EngineTuning,
    ) -> MotiveResult<Self> {
        settings.validate()?;
        tuning.validate()?;
        catalog.validate()?;

        let AgentCatalog {
            needs,
            consumptions,
            modulators,
            wiring,
        } = catalog;

        let needs = needs
            .into_iter()
            .map(Need::new)
            .collect::<MotiveResult<Vec<_>>>()?;
        let need_index = index_by(needs.iter().map(Need::name));
        let damping = needs
            .iter()
            .map(|need| {
                need.frustration_damping()
                    .map(|source| resolve(&need_index, source, MotiveError::UnknownNeed))
                    .transpose()
            })
            .collect::<MotiveResult<Vec<_>>>()?;

        let consumptions = consumptions
            .into_iter()
            .map(Consumption::new)
            .collect::<MotiveResult<Vec<_>>>()?;
        let consumption_index = index_by(consumptions.iter().map(Consumption::name));
        let targets = consumptions
            .iter()
            .map(|c| resolve(&need_index, c.need(), MotiveError::UnknownNeed))
            .collect::<MotiveResult<Vec<_>>>()?;

        let modulators = modulators
            .into_iter()
            .map(Modulator::new)
            .collect::<MotiveResult<Vec<_>>>()?;
        let modulator_index = index_by(modulators.iter().map(Modulator::name));
        let mut role_modulators = [0; 6];
        for (slot, role) in role_modulators.iter_mut().zip(ModulatorRole::ALL) {
            *slot = modulator_index.get(role.name()).copied().ok_or_else(|| {
                MotiveError::InvalidConfig(format!("missing modulator '{}'", role.name()))
            })?;
        }

        let roles = Roles {
            competence: resolve(&need_index, &wiring.competence_need, MotiveError::UnknownNeed)?,
            uncertainty: resolve(&need_index, &wiring.uncertainty_need, MotiveError::UnknownNeed)?,
            fatigue: resolve(&need_index, &wiring.fatigue_need, MotiveError::UnknownNeed)?,
            confirmation: resolve(
                &consumption_index,
                &wiring.confirmation,
                MotiveError::UnknownConsumption,
            )?,
            disconfirmation: resolve(
                &consumption_index,
                &wiring.disconfirmation,
                MotiveError::UnknownConsumption,
            )?,
            modulators: role_modulators,
        };

        tracing::debug!(
            "Motivation system built: {} needs, {} consumptions, {} modulators",
            needs.len(),
            consumptions.len(),
            modulators.len()
        );

        Ok(Self {
            settings,
            tuning,
            needs,
            need_index,
            damping,
            consumptions,
            consumption_index,
            targets,
            modulators,
            modulator_index,
            roles,
            aggregates: Aggregates::default(),
            emotions: [0.0; EmotionKind::COUNT],
            goal: None,
            events: EventBook::new(),
            step: 0,
        })
    }

    /// The reference agent with default settings.
    pub fn with_defaults() -> MotiveResult<Self> {
        Self::new(
            AgentCatalog::reference_agent(),
            Settings::default(),
            EngineTuning::default(),
        )
    }

    pub fn from_config(config: &MotiveConfig) -> MotiveResult<Self> {
        Self::new(config.catalog(), config.settings, config.engine.clone())
    }

    /// Load a TOML config and build a system from it.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config = MotiveConfig::load(path)?;
        Self::from_config(&config).context("Failed to build motivation system from config")
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Return to the starting state: needs at their initial values, no pain,
    /// pleasure or deliveries, modulators at baseline, aggregates and
    /// emotions at 0, no events and no goal.
    pub fn reset(&mut self) {
        self.step = 0;
        self.needs.iter_mut().for_each(Need::reset);
        self.consumptions.iter_mut().for_each(Consumption::reset);
        self.modulators.iter_mut().for_each(Modulator::reset);
        self.aggregates = Aggregates::default();
        self.emotions = [0.0; EmotionKind::COUNT];
        self.events.clear();
        self.goal = None;
        tracing::info!("Motivation system reset");
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.settings.max_ticks
    }

    /// Run one tick of the model.
    pub fn advance(&mut self) -> MotiveResult<()> {
        if self.is_finished() {
            return Err(MotiveError::SimulationFinished(self.step));
        }
        self.step += 1;
        let tick = self.settings.tick_seconds;

        for need in &mut self.needs {
            need.update(tick);
        }
        self.deliver_consumptions();
        self.aggregate();
        self.steer_modulators();
        self.appraise();
        self.expire_events()?;

        tracing::trace!(
            step = self.step,
            pain = self.aggregates.pain,
            pleasure = self.aggregates.pleasure,
            urge = self.aggregates.urge,
            urgency = self.aggregates.urgency,
            "tick"
        );
        Ok(())
    }

    fn deliver_consumptions(&mut self) {
        let tick = self.settings.tick_seconds;
        for i in 0..self.consumptions.len() {
            let value = self.consumptions[i].update(tick);
            let need = self.targets[i];
            if value > 0.0 {
                self.needs[need].satisfy(value);
            } else if value < 0.0 {
                let damped = -value * self.damping_factor(need);
                self.needs[need].frustrate(damped);
            }
        }
    }

    fn aggregate(&mut self) {
        let focus = self.role(ModulatorRole::Focus).normalized_value();
        let attention = self.goal.as_ref().map(|g| Attention { need: g.need, focus });
        let competence = general_competence(
            self.needs[self.roles.competence].value(),
            self.goal.as_ref().map(|g| g.goal.skill),
        );
        self.aggregates = Aggregates::compute(&self.needs, attention, competence, &self.tuning);
    }

    fn steer_modulators(&mut self) {
        let tick = self.settings.tick_seconds;
        let roles = self.roles;
        let inputs = SteeringInputs {
            aggregates: self.aggregates,
            leading: self.goal.as_ref().map(|g| {
                let need = &self.needs[g.need];
                LeadingTerms {
                    urge: need.normalized_urge(),
                    urgency: need.normalized_urgency(),
                    skill: g.goal.skill,
                }
            }),
            uncertainty: self.needs[roles.uncertainty].normalized_urge(),
            fatigue: self.needs[roles.fatigue].value(),
        };

        for role in ModulatorRole::ALL {
            let arousal = self.role(ModulatorRole::Arousal).normalized_value();
            let modulator = &mut self.modulators[roles.modulators[role.index()]];
            modulator.update(tick);
            modulator.approach(steering::target(role, &inputs, arousal));
        }
        for (i, modulator) in self.modulators.iter_mut().enumerate() {
            if !roles.modulators.contains(&i) {
                modulator.update(tick);
            }
        }
    }

    fn appraise(&mut self) {
        let appraisal = Appraisal {
            valence: self.role(ModulatorRole::Valence).normalized_value(),
            arousal: self.role(ModulatorRole::Arousal).normalized_value(),
            dominance: self.role(ModulatorRole::Dominance).normalized_value(),
            resolution_level: self.role(ModulatorRole::ResolutionLevel).normalized_value(),
            focus: self.role(ModulatorRole::Focus).normalized_value(),
            securing_rate: self.role(ModulatorRole::SecuringRate).normalized_value(),
            aggregates: self.aggregates,
        };
        for kind in EmotionKind::ALL {
            self.emotions[kind.index()] = appraisal.evaluate(kind);
        }
    }

    fn expire_events(&mut self) -> MotiveResult<()> {
        for id in self.events.tick(self.settings.tick_seconds) {
            tracing::debug!("Anticipated event '{}' expired", id);
            self.drop_event(&id)?;
        }
        Ok(())
    }

    // ========================================================================
    // Consumptions and direct need changes
    // ========================================================================

    /// Queue a delivery of `name`, with its default reward and duration
    /// unless given.
    pub fn trigger(
        &mut self,
        name: &str,
        reward: Option<f64>,
        duration: Option<f64>,
    ) -> MotiveResult<()> {
        let i = self.consumption_idx(name)?;
        self.consumptions[i].trigger(reward, duration)
    }

    /// An unexpected gain or loss through `name`.
    pub fn consume(&mut self, name: &str, reward: Option<f64>) -> MotiveResult<()> {
        self.trigger(name, reward, None)
    }

    /// Satisfy a need at once, bypassing consumptions. Returns the change in value.
    pub fn satisfy(&mut self, need: &str, amount: f64) -> MotiveResult<f64> {
        let i = self.need_idx(need)?;
        Ok(self.needs[i].satisfy(amount))
    }

    /// Frustrate a need at once, subject to its damping. Returns the change in value.
    pub fn frustrate(&mut self, need: &str, amount: f64) -> MotiveResult<f64> {
        let i = self.need_idx(need)?;
        let damped = amount * self.damping_factor(i);
        Ok(self.needs[i].frustrate(damped))
    }

    fn damping_factor(&self, need: usize) -> f64 {
        self.damping[need].map_or(1.0, |source| (1.0 - self.needs[source].value()) / 2.0)
    }

    /// Apply an imagined change to the need of consumption `i`.
    fn imagine(&mut self, i: usize, anticipation: Anticipation) {
        let need = self.targets[i];
        match anticipation {
            Anticipation::Satisfy(amount) => {
                self.needs[need].imagine_satisfy(amount);
            }
            Anticipation::Frustrate(amount) => {
                let damped = amount * self.damping_factor(need);
                self.needs[need].imagine_frustrate(damped);
            }
            Anticipation::Neutral => {}
        }
    }

    /// Trigger consumption `i` with its default reward scaled by `scale`.
    fn trigger_scaled(&mut self, i: usize, scale: f64) -> MotiveResult<()> {
        let consumption = &mut self.consumptions[i];
        let reward = consumption.params().reward * scale;
        consumption.trigger(Some(reward), None)
    }

    // ========================================================================
    // Anticipated events
    // ========================================================================

    /// Register an expected event and feel its anticipation at once.
    pub fn create_event(&mut self, event: AnticipatedEvent) -> MotiveResult<()> {
        if !event.expected_reward.is_finite() || event.expiration.is_nan() {
            return Err(MotiveError::InvalidConfig(format!(
                "event '{}': expected reward and expiration must be numbers",
                event.id
            )));
        }
        let i = self.consumption_idx(&event.consumption)?;
        let anticipation = self.consumptions[i].anticipate(
            event.expected_reward,
            event.certainty,
            event.skill,
            event.expiration,
        );
        tracing::debug!(
            "Anticipating '{}' via {}: reward={:.3}, certainty={:.2}, skill={:.2}",
            event.id,
            event.consumption,
            event.expected_reward,
            event.certainty,
            event.skill
        );
        self.events.insert(event)?;
        self.imagine(i, anticipation);
        Ok(())
    }

    /// Revise an expectation. Only the difference between the new and the
    /// old discounted expectation is felt.
    pub fn change_event(&mut self, id: &str, change: EventChange) -> MotiveResult<()> {
        if change.expected_reward.is_some_and(|r| !r.is_finite())
            || change.expiration.is_some_and(f64::is_nan)
        {
            return Err(MotiveError::InvalidConfig(format!(
                "event '{}': expected reward and expiration must be numbers",
                id
            )));
        }
        let old = self.events.get(id)?.clone();
        let mut new = old.clone();
        change.apply(&mut new);

        let i = self.consumption_idx(&old.consumption)?;
        let consumption = &self.consumptions[i];
        let difference = consumption.discounted(new.expected_reward, new.expiration)
            - consumption.discounted(old.expected_reward, old.expiration);
        let anticipation = Consumption::route(difference, new.certainty, new.skill);
        tracing::debug!("Changed expectation of '{}' by {:.3}", id, difference);

        if let Some(goal) = self.goal.as_mut() {
            if goal.goal.event.as_deref() == Some(id) {
                goal.goal.skill = new.skill;
            }
        }
        *self.events.get_mut(id)? = new;
        self.imagine(i, anticipation);
        Ok(())
    }

    /// Give up an expectation: the remaining anticipation is reversed and the
    /// failed prediction frustrates the uncertainty need.
    pub fn drop_event(&mut self, id: &str) -> MotiveResult<()> {
        let event = self.events.remove(id)?;
        let i = self.consumption_idx(&event.consumption)?;
        let remaining = self.consumptions[i].discounted(event.expected_reward, event.expiration);
        self.imagine(i, Consumption::route(-remaining, event.certainty, event.skill));
        self.trigger_scaled(self.roles.disconfirmation, event.certainty)?;
        tracing::debug!("Dropped anticipated event '{}'", id);
        self.release_goal(id);
        Ok(())
    }

    /// Forget an expectation without any affect.
    pub fn remove_event(&mut self, id: &str) -> MotiveResult<()> {
        self.events.remove(id)?;
        self.release_goal(id);
        Ok(())
    }

    /// Make an event happen with `reward` (default: the expected reward) and
    /// react to how well it was predicted.
    pub fn execute_event(&mut self, id: &str, reward: Option<f64>) -> MotiveResult<()> {
        let event = self.events.get(id)?;
        let i = self.consumption_idx(&event.consumption)?;
        let reward = reward.unwrap_or(event.expected_reward);
        self.consumptions[i].trigger(Some(reward), None)?;
        let event = self.events.remove(id)?;

        let surprise = (reward - event.expected_reward).abs();
        if surprise <= self.tuning.confirmation_tolerance {
            self.trigger_scaled(self.roles.confirmation, event.certainty)?;
        } else {
            self.trigger_scaled(self.roles.disconfirmation, surprise.min(1.0))?;
        }
        tracing::debug!(
            "Executed '{}': reward={:.3}, expected={:.3}",
            id,
            reward,
            event.expected_reward
        );
        self.release_goal(id);
        Ok(())
    }

    /// Clear the goal if it was elevated from event `id`.
    fn release_goal(&mut self, id: &str) {
        if self.goal.as_ref().and_then(|g| g.goal.event.as_deref()) == Some(id) {
            tracing::debug!("Goal released with event '{}'", id);
            self.goal = None;
        }
    }

    // ========================================================================
    // Goal
    // ========================================================================

    /// Make `goal` the leading motive.
    pub fn set_goal(&mut self, goal: Goal) -> MotiveResult<()> {
        let need = self.need_idx(&goal.need)?;
        let consumption = self.consumption_idx(&goal.consumption)?;
        if self.targets[consumption] != need {
            return Err(MotiveError::InvalidConfig(format!(
                "goal: consumption '{}' does not serve need '{}'",
                goal.consumption, goal.need
            )));
        }
        if let Some(event) = &goal.event {
            self.events.get(event)?;
        }
        tracing::debug!(
            "Leading motive: {} via {} (skill {:.2})",
            goal.need,
            goal.consumption,
            goal.skill
        );
        self.goal = Some(ActiveGoal {
            goal: Goal {
                skill: goal.skill.clamp(0.0, 1.0),
                ..goal
            },
            need,
        });
        Ok(())
    }

    /// Elevate an anticipated event to the leading motive.
    pub fn set_goal_from_event(&mut self, id: &str) -> MotiveResult<()> {
        let event = self.events.get(id)?;
        let i = self.consumption_idx(&event.consumption)?;
        let mut goal = Goal::new(
            self.needs[self.targets[i]].name(),
            event.consumption.clone(),
            event.skill,
        );
        goal.event = Some(id.to_string());
        self.set_goal(goal)
    }

    pub fn clear_goal(&mut self) {
        if self.goal.take().is_some() {
            tracing::debug!("Leading motive cleared");
        }
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref().map(|g| &g.goal)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    fn need_idx(&self, name: &str) -> MotiveResult<usize> {
        resolve(&self.need_index, name, MotiveError::UnknownNeed)
    }

    fn consumption_idx(&self, name: &str) -> MotiveResult<usize> {
        resolve(&self.consumption_index, name, MotiveError::UnknownConsumption)
    }

    fn role(&self, role: ModulatorRole) -> &Modulator {
        &self.modulators[self.roles.modulators[role.index()]]
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    pub fn need(&self, name: &str) -> MotiveResult<&Need> {
        Ok(&self.needs[self.need_idx(name)?])
    }

    pub fn needs(&self) -> &[Need] {
        &self.needs
    }

    pub fn consumption(&self, name: &str) -> MotiveResult<&Consumption> {
        Ok(&self.consumptions[self.consumption_idx(name)?])
    }

    pub fn consumptions(&self) -> &[Consumption] {
        &self.consumptions
    }

    pub fn modulator(&self, name: &str) -> MotiveResult<&Modulator> {
        let i = resolve(&self.modulator_index, name, MotiveError::UnknownModulator)?;
        Ok(&self.modulators[i])
    }

    pub fn modulators(&self) -> &[Modulator] {
        &self.modulators
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    pub fn emotion(&self, kind: EmotionKind) -> f64 {
        self.emotions[kind.index()]
    }

    pub fn emotions(&self) -> impl Iterator<Item = (EmotionKind, f64)> + '_ {
        EmotionKind::ALL.into_iter().map(|kind| (kind, self.emotion(kind)))
    }

    pub fn event(&self, id: &str) -> MotiveResult<&AnticipatedEvent> {
        self.events.get(id)
    }

    pub fn events(&self) -> &EventBook {
        &self.events
    }

    /// Everything a renderer or exporter may observe after a tick.
    pub fn snapshot(&self) -> Snapshot {
        let leading = self.goal.as_ref().map(|g| g.need);
        Snapshot {
            step: self.step,
            needs: self
                .needs
                .iter()
                .enumerate()
                .map(|(i, n)| (n.name().to_string(), n.snapshot(leading == Some(i))))
                .collect(),
            consumptions: self
                .consumptions
                .iter()
                .map(|c| (c.name().to_string(), c.snapshot()))
                .collect(),
            modulators: self
                .modulators
                .iter()
                .map(|m| (m.name().to_string(), m.snapshot()))
                .collect(),
            aggregates: self
                .aggregates
                .entries()
                .into_iter()
                .map(|(name, value)| (name.to_string(), ScalarSnapshot::new(name, value)))
                .collect(),
            emotions: self
                .emotions()
                .map(|(kind, value)| {
                    (kind.name().to_string(), ScalarSnapshot::new(kind.name(), value))
                })
                .collect(),
            events: self.events.to_vec(),
        }
    }
}

fn index_by<'a>(names: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    names.enumerate().map(|(i, name)| (name.to_string(), i)).collect()
}

fn resolve(
    index: &HashMap<String, usize>,
    name: &str,
    unknown: fn(String) -> MotiveError,
) -> MotiveResult<usize> {
    index.get(name).copied().ok_or_else(|| unknown(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use motive_core::{ModulatorParams, NeedCategory, NeedParams};

    fn system() -> MotivationSystem {
        MotivationSystem::with_defaults().unwrap()
    }

    fn run(system: &mut MotivationSystem, ticks: usize) {
        for _ in 0..ticks {
            system.advance().unwrap();
        }
    }

    #[test]
    fn test_builds_reference_agent() {
        let sys = system();
        assert_eq!(sys.needs().len(), 13);
        assert_eq!(sys.consumptions().len(), 23);
        assert_eq!(sys.modulators().len(), 6);
        assert_eq!(sys.step(), 0);
        assert_eq!(sys.modulator("valence").unwrap().value(), 0.2);
    }

    #[test]
    fn test_rejects_catalog_without_steered_modulator() {
        let mut catalog = AgentCatalog::reference_agent();
        catalog.modulators.retain(|m| m.name != "focus");
        let err = MotivationSystem::new(catalog, Settings::default(), EngineTuning::default())
            .err()
            .unwrap();
        assert!(matches!(err, MotiveError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        let mut sys = system();
        assert_eq!(
            sys.trigger("teleport", None, None).unwrap_err(),
            MotiveError::UnknownConsumption("teleport".to_string())
        );
        assert!(matches!(sys.need("air"), Err(MotiveError::UnknownNeed(_))));
        assert!(matches!(sys.modulator("mood"), Err(MotiveError::UnknownModulator(_))));
        assert!(matches!(sys.drop_event("none"), Err(MotiveError::UnknownEvent(_))));
        assert!(matches!(
            sys.set_goal(Goal::new("air", "eat", 0.5)),
            Err(MotiveError::UnknownNeed(_))
        ));
    }

    #[test]
    fn test_advance_counts_steps_until_finished() {
        let settings = Settings {
            max_ticks: 3,
            ..Default::default()
        };
        let catalog = AgentCatalog::reference_agent();
        let mut sys = MotivationSystem::new(catalog, settings, EngineTuning::default()).unwrap();
        run(&mut sys, 3);
        assert!(sys.is_finished());
        assert_eq!(sys.advance().unwrap_err(), MotiveError::SimulationFinished(3));
        assert_eq!(sys.step(), 3);
    }

    #[test]
    fn test_drink_raises_water() {
        let mut sys = system();
        sys.trigger("drink", None, None).unwrap();
        let before = sys.need("water").unwrap().value();
        run(&mut sys, 50);
        let after = sys.need("water").unwrap().value();
        assert!(after > before + 0.4, "water {} -> {}", before, after);
        assert!(sys.need("water").unwrap().pleasure() > 0.0);
    }

    #[test]
    fn test_trigger_rejects_non_finite_input() {
        let mut sys = system();
        for (reward, duration) in [
            (Some(f64::NAN), None),
            (Some(0.5), Some(f64::NAN)),
            (Some(0.5), Some(f64::INFINITY)),
        ] {
            assert!(matches!(
                sys.trigger("drink", reward, duration),
                Err(MotiveError::InvalidConfig(_))
            ));
        }
        assert!(sys.consume("drink", Some(f64::NEG_INFINITY)).is_err());
        assert!(sys.consumption("drink").unwrap().deliveries().is_empty());
    }

    #[test]
    fn test_execute_event_rejects_non_finite_reward() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("tea", "drink", 0.5, 1.0, 1.0, -1.0))
            .unwrap();
        assert!(sys.execute_event("tea", Some(f64::NAN)).is_err());
        assert!(sys.event("tea").is_ok());
        assert!(sys.consumption("drink").unwrap().deliveries().is_empty());
        assert!(sys.consumption("confirmation").unwrap().deliveries().is_empty());
    }

    #[test]
    fn test_exploration_frustration_is_damped() {
        let mut sys = system();
        // competence starts at 0.5: damping factor 0.25
        let delta = sys.frustrate("exploration", 0.4).unwrap();
        assert!((delta - 0.1).abs() < 1e-12);
        let undamped = sys.frustrate("water", 0.4).unwrap();
        assert!((undamped - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_create_event_anticipates() {
        let mut sys = system();
        let before = sys.need("affiliation").unwrap().clone();
        sys.create_event(AnticipatedEvent::new("party", "acceptance", 1.0, 1.0, 1.0, 0.0))
            .unwrap();
        let after = sys.need("affiliation").unwrap();
        assert!(after.value() > before.value());
        assert!(after.pleasure() > 0.0);
        assert_eq!(sys.events().len(), 1);

        let dup =
            sys.create_event(AnticipatedEvent::new("party", "acceptance", 1.0, 1.0, 1.0, 0.0));
        assert_eq!(dup.unwrap_err(), MotiveError::DuplicateEvent("party".to_string()));
    }

    #[test]
    fn test_create_event_checks_consumption() {
        let mut sys = system();
        let err = sys
            .create_event(AnticipatedEvent::new("x", "teleport", 1.0, 1.0, 1.0, -1.0))
            .unwrap_err();
        assert!(matches!(err, MotiveError::UnknownConsumption(_)));
        assert!(sys.events().is_empty());
    }

    #[test]
    fn test_change_event_feels_only_the_difference() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("exam", "success", 0.5, 1.0, 0.0, 0.0))
            .unwrap();
        let pain_before = sys.need("competence").unwrap().pain();
        sys.change_event(
            "exam",
            EventChange {
                expected_reward: Some(-0.5),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(sys.need("competence").unwrap().pain() > pain_before);
        assert_eq!(sys.event("exam").unwrap().expected_reward, -0.5);

        // unchanged expectation: nothing to feel
        let snapshot = sys.need("competence").unwrap().clone();
        sys.change_event("exam", EventChange::default()).unwrap();
        assert_eq!(sys.need("competence").unwrap().value(), snapshot.value());
        assert_eq!(sys.need("competence").unwrap().pain(), snapshot.pain());
    }

    #[test]
    fn test_drop_event_disconfirms() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("date", "connection", 1.0, 0.8, 0.5, -1.0))
            .unwrap();
        sys.drop_event("date").unwrap();
        assert!(sys.events().is_empty());
        let deliveries = sys.consumption("disconfirmation").unwrap().deliveries();
        assert_eq!(deliveries.len(), 1);
        assert!((deliveries[0].reward + 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_remove_event_has_no_consequences() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("date", "connection", 1.0, 0.8, 0.5, -1.0))
            .unwrap();
        let affection = sys.need("affection").unwrap().value();
        sys.remove_event("date").unwrap();
        assert!(sys.events().is_empty());
        assert!(sys.consumption("disconfirmation").unwrap().deliveries().is_empty());
        assert_eq!(sys.need("affection").unwrap().value(), affection);
    }

    #[test]
    fn test_execute_event_as_expected_confirms() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("lunch", "eat", 0.5, 0.6, 1.0, -1.0))
            .unwrap();
        sys.execute_event("lunch", None).unwrap();
        assert_eq!(sys.consumption("eat").unwrap().deliveries()[0].reward, 0.5);
        let confirmation = sys.consumption("confirmation").unwrap().deliveries();
        assert!((confirmation[0].reward - 0.6).abs() < 1e-12);
        assert!(sys.consumption("disconfirmation").unwrap().deliveries().is_empty());
        assert!(sys.events().is_empty());
    }

    #[test]
    fn test_execute_event_surprise_disconfirms() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("lunch", "eat", 0.5, 0.6, 1.0, -1.0))
            .unwrap();
        sys.execute_event("lunch", Some(-0.2)).unwrap();
        let disconfirmation = sys.consumption("disconfirmation").unwrap().deliveries();
        // default reward -1 scaled by a surprise of 0.7
        assert!((disconfirmation[0].reward + 0.7).abs() < 1e-12);
        assert!(sys.consumption("confirmation").unwrap().deliveries().is_empty());
    }

    #[test]
    fn test_events_expire_as_drops() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("bus", "acceptance", 0.5, 1.0, 1.0, 0.25))
            .unwrap();
        run(&mut sys, 2);
        assert_eq!(sys.events().len(), 1);
        run(&mut sys, 1);
        assert!(sys.events().is_empty());
        assert_eq!(sys.consumption("disconfirmation").unwrap().deliveries().len(), 1);
    }

    #[test]
    fn test_goal_from_event_follows_event_lifecycle() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("dinner", "eat", 1.0, 1.0, 0.7, -1.0))
            .unwrap();
        sys.set_goal_from_event("dinner").unwrap();
        let goal = sys.goal().unwrap();
        assert_eq!(goal.need, "food");
        assert_eq!(goal.consumption, "eat");
        assert_eq!(goal.skill, 0.7);
        assert!(sys.snapshot().needs["food"].is_leading_motive);

        sys.change_event(
            "dinner",
            EventChange {
                skill: Some(0.2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(sys.goal().unwrap().skill, 0.2);

        sys.execute_event("dinner", None).unwrap();
        assert!(sys.goal().is_none());
    }

    #[test]
    fn test_goal_consumption_must_serve_its_need() {
        let mut sys = system();
        assert!(matches!(
            sys.set_goal(Goal::new("food", "drink", 0.5)),
            Err(MotiveError::InvalidConfig(_))
        ));
        assert!(sys.goal().is_none());
        sys.set_goal(Goal::new("water", "drink", 0.5)).unwrap();
        assert_eq!(sys.goal().unwrap().need, "water");
    }

    #[test]
    fn test_goal_raises_general_competence_term() {
        let mut sys = system();
        sys.set_goal(Goal::new("water", "drink", 1.0)).unwrap();
        sys.advance().unwrap();
        let with_goal = sys.aggregates().competence;
        let competence = sys.need("competence").unwrap().value();
        assert!((with_goal - competence.sqrt()).abs() < 1e-12);

        sys.clear_goal();
        sys.advance().unwrap();
        let competence = sys.need("competence").unwrap().value();
        assert!((sys.aggregates().competence - competence).abs() < 1e-12);
    }

    #[test]
    fn test_custom_modulator_only_relaxes() {
        let mut catalog = AgentCatalog::reference_agent();
        catalog.modulators.push(ModulatorParams::new("curiosity", 0.0, -1.0, 1.0));
        let mut sys =
            MotivationSystem::new(catalog, Settings::default(), EngineTuning::default()).unwrap();
        run(&mut sys, 100);
        assert_eq!(sys.modulator("curiosity").unwrap().value(), 0.0);
    }

    #[test]
    fn test_snapshot_shape() {
        let mut sys = system();
        sys.create_event(AnticipatedEvent::new("b", "win", 1.0, 1.0, 0.5, -1.0))
            .unwrap();
        sys.create_event(AnticipatedEvent::new("a", "loss", -1.0, 1.0, 0.5, -1.0))
            .unwrap();
        run(&mut sys, 5);
        let snap = sys.snapshot();
        assert_eq!(snap.step, 5);
        assert_eq!(snap.needs.len(), 13);
        assert_eq!(snap.consumptions.len(), 23);
        assert_eq!(snap.modulators.len(), 6);
        assert_eq!(snap.aggregates.len(), 5);
        assert_eq!(snap.emotions.len(), EmotionKind::COUNT);
        assert!(snap.aggregates.contains_key("combined_urgency"));
        assert_eq!(snap.events[0].id, "a");
        assert_eq!(snap.events[1].id, "b");

        let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(json["step"], 5);
        assert_eq!(json["needs"]["food"]["type"], "physiological");
        assert_eq!(json["consumptions"]["loss"]["type"], "aversive");
        assert_eq!(json["modulators"]["arousal"]["baseline"], 0.3);
        assert!(json["emotions"]["anxiety"]["value"].is_number());
        assert_eq!(json["events"][1]["consumption"], "win");
    }

    #[test]
    fn test_reset_restores_start() {
        let mut sys = system();
        sys.trigger("sprint", None, None).unwrap();
        sys.create_event(AnticipatedEvent::new("x", "win", 1.0, 1.0, 0.5, -1.0))
            .unwrap();
        sys.set_goal(Goal::new("dominance", "win", 0.5)).unwrap();
        run(&mut sys, 300);
        sys.reset();

        let fresh = system();
        assert_eq!(sys.step(), 0);
        assert!(sys.goal().is_none());
        assert!(sys.events().is_empty());
        for (a, b) in sys.needs().iter().zip(fresh.needs()) {
            assert_eq!(a.value().to_bits(), b.value().to_bits(), "{}", a.name());
            assert_eq!(a.pain(), 0.0);
        }
        for (a, b) in sys.modulators().iter().zip(fresh.modulators()) {
            assert_eq!(a.value().to_bits(), b.value().to_bits(), "{}", a.name());
        }
        assert_eq!(sys.aggregates(), Aggregates::default());
        assert!(sys.consumptions().iter().all(|c| c.deliveries().is_empty()));
    }

    #[test]
    fn test_small_custom_catalog() {
        let mut catalog = AgentCatalog::reference_agent();
        catalog.needs.push(NeedParams::new("warmth", NeedCategory::Physiological).decay(-1.0));
        let mut sys =
            MotivationSystem::new(catalog, Settings::default(), EngineTuning::default()).unwrap();
        run(&mut sys, 10);
        assert_eq!(sys.need("warmth").unwrap().value(), 0.5);
    }
}
