//! motive_bench: trajectory simulation tests for the motivation engine.
//!
//! Validates emergent behavior over long simulated time spans:
//! - Hours of silent depletion (water runs dry on schedule)
//! - Reward delivery (one meal releases its whole reward)
//! - Deprivation (depletion pain turns the mood)
//! - Reset after long runs (bit-for-bit return to the start)

use motive_core::MotiveResult;
use motive_limbic::MotivationSystem;

/// Simulate `total_secs` of model time, calling `observe` after every tick.
pub fn simulate<F>(
    system: &mut MotivationSystem,
    total_secs: f64,
    mut observe: F,
) -> MotiveResult<()>
where
    F: FnMut(&MotivationSystem),
{
    let ticks = system.settings().ticks_for(total_secs);
    for _ in 0..ticks {
        system.advance()?;
        observe(system);
    }
    Ok(())
}
