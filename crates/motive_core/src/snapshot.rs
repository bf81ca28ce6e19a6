//! Per-tick snapshot consumed by renderers and exporters.
//!
//! Every category is a name-keyed map; `BTreeMap` keeps the JSON output
//! stable from tick to tick.

use crate::consumption::ConsumptionKind;
use crate::goal::AnticipatedEvent;
use crate::need::NeedCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub category: NeedCategory,
    pub weight: f64,
    pub value: f64,
    pub urge: f64,
    pub urgency: f64,
    pub pain: f64,
    pub pleasure: f64,
    pub is_leading_motive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionSnapshot {
    pub name: String,
    pub need: String,
    #[serde(rename = "type")]
    pub kind: ConsumptionKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulatorSnapshot {
    pub name: String,
    pub value: f64,
    pub baseline: f64,
    pub min: f64,
    pub max: f64,
}

/// A named scalar: used for aggregates and emotions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSnapshot {
    pub name: String,
    pub value: f64,
}

impl ScalarSnapshot {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Everything a collaborator may observe after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: u64,
    pub needs: BTreeMap<String, NeedSnapshot>,
    pub consumptions: BTreeMap<String, ConsumptionSnapshot>,
    pub modulators: BTreeMap<String, ModulatorSnapshot>,
    pub aggregates: BTreeMap<String, ScalarSnapshot>,
    pub emotions: BTreeMap<String, ScalarSnapshot>,
    /// Anticipated events, sorted by id
    pub events: Vec<AnticipatedEvent>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
