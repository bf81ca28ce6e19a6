//! Event book: the anticipated events the agent currently holds.
//!
//! The book only stores and counts down events. What creating, changing,
//! dropping or executing an event does to the needs is the engine's business.

use motive_core::{AnticipatedEvent, MotiveError, MotiveResult};
use std::collections::BTreeMap;

/// Partial update of an anticipated event. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventChange {
    pub expected_reward: Option<f64>,
    pub certainty: Option<f64>,
    pub skill: Option<f64>,
    pub expiration: Option<f64>,
}

impl EventChange {
    pub fn apply(&self, event: &mut AnticipatedEvent) {
        if let Some(reward) = self.expected_reward {
            event.expected_reward = reward;
        }
        if let Some(certainty) = self.certainty {
            event.certainty = certainty.clamp(0.0, 1.0);
        }
        if let Some(skill) = self.skill {
            event.skill = skill.clamp(0.0, 1.0);
        }
        if let Some(expiration) = self.expiration {
            event.expiration = expiration;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBook {
    events: BTreeMap<String, AnticipatedEvent>,
}

impl EventBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.events.contains_key(id)
    }

    pub fn insert(&mut self, event: AnticipatedEvent) -> MotiveResult<()> {
        if self.events.contains_key(&event.id) {
            return Err(MotiveError::DuplicateEvent(event.id));
        }
        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    pub fn get(&self, id: &str) -> MotiveResult<&AnticipatedEvent> {
        self.events
            .get(id)
            .ok_or_else(|| MotiveError::UnknownEvent(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> MotiveResult<&mut AnticipatedEvent> {
        self.events
            .get_mut(id)
            .ok_or_else(|| MotiveError::UnknownEvent(id.to_string()))
    }

    pub fn remove(&mut self, id: &str) -> MotiveResult<AnticipatedEvent> {
        self.events
            .remove(id)
            .ok_or_else(|| MotiveError::UnknownEvent(id.to_string()))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AnticipatedEvent> {
        self.events.values()
    }

    pub fn to_vec(&self) -> Vec<AnticipatedEvent> {
        self.events.values().cloned().collect()
    }

    /// Count down every expiring event by one tick. Returns the ids of the
    /// events that ran out, in id order; they stay in the book.
    pub fn tick(&mut self, tick_seconds: f64) -> Vec<String> {
        self.events
            .values_mut()
            .filter_map(|event| event.tick(tick_seconds).then(|| event.id.clone()))
            .collect()
    }
}
