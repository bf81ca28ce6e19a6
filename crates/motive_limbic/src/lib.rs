//! # Motive Limbic
//!
//! The motivation engine built on `motive_core`. A [`MotivationSystem`]
//! owns one agent and advances it in discrete ticks:
//!
//! 1. Needs decay and compute urge, urgency and depletion pain
//! 2. Consumptions release their queued rewards into their needs
//! 3. The aggregator combines all needs into global scalars
//! 4. Modulators relax toward baseline and approach their targets
//! 5. Emotions are read off the modulators and aggregates
//! 6. Anticipated events count down and expire
//!
//! Goals and anticipated events are supplied by the driver; the engine only
//! reacts to them.

pub mod aggregator;
pub mod emotion;
pub mod events;
pub mod steering;
mod system;

pub use aggregator::{Aggregates, Attention};
pub use emotion::{Appraisal, EmotionKind};
pub use events::{EventBook, EventChange};
pub use steering::ModulatorRole;
pub use system::MotivationSystem;
