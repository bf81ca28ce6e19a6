//! # Motive Core
//!
//! The numeric building blocks of the motivation model:
//!
//! - **Decay Engine**: logistic depletion curve and skewed reward kernel
//! - **Need**: a depleting resource with urge, urgency, pain and pleasure
//! - **Consumption**: an action delivering reward to one need over time
//! - **Modulator**: a bounded affect parameter relaxing toward a baseline
//!
//! Entities never look each other up. The engine in `motive_limbic` owns
//! them, resolves names, and passes values between them explicitly.

pub mod catalog;
pub mod config;
pub mod consumption;
pub mod decay;
pub mod error;
pub mod goal;
pub mod modulator;
pub mod need;
pub mod snapshot;

pub use catalog::{AgentCatalog, Wiring};
pub use config::{EngineTuning, MotiveConfig, Settings};
pub use consumption::{Anticipation, Consumption, ConsumptionKind, ConsumptionParams, Delivery};
pub use error::{MotiveError, MotiveResult};
pub use goal::{AnticipatedEvent, Goal};
pub use modulator::{Modulator, ModulatorParams};
pub use need::{Need, NeedCategory, NeedParams};
pub use snapshot::{ConsumptionSnapshot, ModulatorSnapshot, NeedSnapshot, ScalarSnapshot, Snapshot};
