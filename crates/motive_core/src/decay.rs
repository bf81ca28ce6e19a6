//! Decay Engine: the scalar response curves shared by needs and modulators.
//!
//! Resources deplete along an approximate logistic curve from 1 toward 0:
//!
//! ```text
//! y = 1 - 1 / (1 + e^(-12 (x - 1/2)))
//! ```
//!
//! where `x` runs from 0 to 1 over one time constant. A tick of decay inverts
//! the current value to its position on the curve, advances that position by
//! `tick / time_constant` and reads the curve again, so decay only depends on
//! the current value and never drifts.
//!
//! Rewards are not delivered as step functions. A consumption releases its
//! reward with a right-skewed chi(2) impulse `f(t) = t e^(-t²/2)`, which
//! rises quickly, peaks at t = 1 and has released 99.78% of its mass by
//! t = 3.5. That span is stretched over the delivery duration.

/// Steepness of the logistic decay curve.
pub const DECAY_STEEPNESS: f64 = 12.0;

/// Kernel time at which a delivery is considered complete.
pub const SIGNAL_SPAN: f64 = 3.5;

/// Limit a value to `[0, 1]`. NaN collapses to 0.
#[inline]
pub fn clip(value: f64) -> f64 {
    clip_to(value, 0.0, 1.0)
}

/// Limit a value to `[min, max]`. NaN collapses to `min`.
#[inline]
pub fn clip_to(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Guard against NaN and Infinity in model state.
#[inline]
pub fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("NaN/Inf detected in model state, resetting to fallback {}", fallback);
        fallback
    }
}

/// The canonical decay curve, evaluated at position `x`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 - 1.0 / (1.0 + (-DECAY_STEEPNESS * (x - 0.5)).exp())
}

/// Position on the decay curve at which it takes the value `y`.
pub fn invert(y: f64) -> f64 {
    if y >= 1.0 {
        return 0.0;
    }
    if y <= 0.0 {
        return 1.0;
    }
    clip(((1.0 - y) / y).ln() / DECAY_STEEPNESS + 0.5)
}

/// Advance `value` by one tick along the decay curve.
///
/// A negative `time_constant` disables decay; a zero one depletes at once.
pub fn decay(value: f64, time_constant: f64, tick_seconds: f64) -> f64 {
    if time_constant < 0.0 {
        return value;
    }
    if time_constant == 0.0 {
        return 0.0;
    }
    let x = invert(value) + tick_seconds / time_constant;
    if x >= 1.0 {
        return 0.0;
    }
    sigmoid(x)
}

/// Compress a value in `[0, ∞)` into `[0, 1)`.
#[inline]
pub fn exponential_scaling(x: f64, factor: f64) -> f64 {
    1.0 - (-x.max(0.0) * factor).exp()
}

/// Number of ticks over which a delivery of `duration` seconds is spread.
pub fn delivery_ticks(duration: f64, tick_seconds: f64) -> u32 {
    if duration <= 0.0 || tick_seconds <= 0.0 {
        return 1;
    }
    // tolerate float noise so that 20s / 0.1s is 200 ticks, not 201
    ((duration / tick_seconds) - 1e-9).ceil().max(1.0) as u32
}

/// Amount of a reward released during tick `step` of its delivery.
///
/// The share is the integral of the chi(2) kernel over the tick, normalized
/// by the kernel mass on `[0, SIGNAL_SPAN]`, so the shares of all ticks in
/// `0..delivery_ticks(duration, tick_seconds)` sum to `total_amount`.
pub fn signal_strength(step: u32, total_amount: f64, duration: f64, tick_seconds: f64) -> f64 {
    let ticks = delivery_ticks(duration, tick_seconds);
    if step >= ticks {
        return 0.0;
    }
    if duration <= 0.0 {
        return total_amount;
    }
    let unit = tick_seconds * SIGNAL_SPAN / duration;
    let t1 = (step as f64 * unit).min(SIGNAL_SPAN);
    let t2 = if step + 1 == ticks {
        SIGNAL_SPAN
    } else {
        ((step + 1) as f64 * unit).min(SIGNAL_SPAN)
    };
    let mass = 1.0 - (-SIGNAL_SPAN * SIGNAL_SPAN / 2.0).exp();
    let share = ((-t1 * t1 / 2.0).exp() - (-t2 * t2 / 2.0).exp()) / mass;
    share * total_amount
}
