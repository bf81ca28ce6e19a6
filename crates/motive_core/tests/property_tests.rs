//! Property-based tests for motive_core.
//!
//! Uses proptest to verify invariants that must hold for ALL possible inputs,
//! not just hand-picked examples.

use motive_core::decay::{decay, delivery_ticks, invert, sigmoid, signal_strength};
use motive_core::{
    Consumption, ConsumptionParams, Modulator, ModulatorParams, Need, NeedCategory, NeedParams,
};
use proptest::prelude::*;

const TICK: f64 = 0.1;

// ============================================================================
// Strategies
// ============================================================================

/// Parameters of an arbitrary but valid need.
fn arb_need() -> impl Strategy<Value = Need> {
    (
        0.0f64..=1.0,
        0.0f64..=12.0,
        prop_oneof![Just(-1.0), 1.0f64..1e6],
        0.0f64..=2.0,
        0.0f64..=2.0,
        0.0f64..=3.0,
        0.0f64..=3.0,
    )
        .prop_map(|(initial, weight, decay_time, gain, loss, pleasure_s, pain_s)| {
            let mut params = NeedParams::new("need", NeedCategory::Social)
                .initial(initial)
                .weight(weight)
                .decay(decay_time)
                .gain(gain)
                .loss(loss);
            params.pleasure_sensitivity = pleasure_s;
            params.pain_sensitivity = pain_s;
            Need::new(params).unwrap()
        })
}

#[derive(Debug, Clone)]
enum NeedOp {
    Update,
    Satisfy(f64),
    Frustrate(f64),
    ImagineSatisfy(f64),
    ImagineFrustrate(f64),
}

fn arb_need_op() -> impl Strategy<Value = NeedOp> {
    prop_oneof![
        Just(NeedOp::Update),
        (-1.0f64..5.0).prop_map(NeedOp::Satisfy),
        (-1.0f64..5.0).prop_map(NeedOp::Frustrate),
        (-1.0f64..5.0).prop_map(NeedOp::ImagineSatisfy),
        (-1.0f64..5.0).prop_map(NeedOp::ImagineFrustrate),
    ]
}

/// An arbitrary modulator with baseline inside its range.
fn arb_modulator() -> impl Strategy<Value = Modulator> {
    (-5.0f64..5.0, 0.0f64..5.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.5f64..100.0).prop_map(
        |(min, span, baseline_at, volatility, decay_time)| {
            let max = min + span;
            let baseline = min + span * baseline_at;
            Modulator::new(
                ModulatorParams::new("m", baseline, min, max)
                    .volatility(volatility)
                    .decay(decay_time),
            )
            .unwrap()
        },
    )
}

// ============================================================================
// Decay Engine
// ============================================================================

proptest! {
    /// The curve and its inverse must agree wherever the curve is defined,
    /// or decay would drift.
    #[test]
    fn sigmoid_invert_round_trip(x in 0.0f64..=1.0) {
        let y = sigmoid(x);
        prop_assert!((sigmoid(invert(y)) - y).abs() < 1e-9, "x={} y={}", x, y);
    }

    #[test]
    fn decay_never_increases(value in 0.0f64..=1.0, time_constant in 0.001f64..1e7) {
        let next = decay(value, time_constant, TICK);
        prop_assert!(next <= value + 1e-12, "{} -> {}", value, next);
        prop_assert!(next >= 0.0);
    }

    #[test]
    fn negative_time_constant_never_decays(value in 0.0f64..=1.0, time_constant in -1e6f64..-1e-9) {
        prop_assert_eq!(decay(value, time_constant, TICK), value);
    }

    #[test]
    fn signal_kernel_conserves_total(total in -5.0f64..5.0, duration in 0.05f64..500.0) {
        let ticks = delivery_ticks(duration, TICK);
        let sum: f64 = (0..ticks).map(|s| signal_strength(s, total, duration, TICK)).sum();
        prop_assert!((sum - total).abs() < 1e-9, "sum {} total {}", sum, total);
    }
}

// ============================================================================
// Need
// ============================================================================

proptest! {
    /// **Core invariant**: no sequence of calls moves a need out of range.
    #[test]
    fn need_stays_bounded(
        need in arb_need(),
        ops in proptest::collection::vec(arb_need_op(), 0..200),
    ) {
        let mut need = need;
        let pleasure_cap = need.weight() * need.params().pleasure_sensitivity;
        let pain_cap = need.weight() * need.params().pain_sensitivity;
        for op in ops {
            match op {
                NeedOp::Update => need.update(TICK),
                NeedOp::Satisfy(x) => { need.satisfy(x); }
                NeedOp::Frustrate(x) => { need.frustrate(x); }
                NeedOp::ImagineSatisfy(x) => { need.imagine_satisfy(x); }
                NeedOp::ImagineFrustrate(x) => { need.imagine_frustrate(x); }
            }
            prop_assert!(need.value() >= 0.0 && need.value() <= 1.0, "value {}", need.value());
            prop_assert!(
                need.pleasure() >= 0.0 && need.pleasure() <= pleasure_cap + 1e-9,
                "pleasure {}",
                need.pleasure()
            );
            prop_assert!(
                need.pain() >= 0.0 && need.pain() <= pain_cap + 1e-9,
                "pain {}",
                need.pain()
            );
            prop_assert!(need.urge() >= 0.0 && need.urge() <= need.weight() + 1e-12);
            prop_assert!(need.urgency() >= 0.0 && need.urgency() <= need.max_urgency() + 1e-12);
        }
    }

    #[test]
    fn reset_is_exact(need in arb_need(), ops in proptest::collection::vec(arb_need_op(), 0..50)) {
        let mut need = need;
        let initial = need.value();
        for op in ops {
            match op {
                NeedOp::Update => need.update(TICK),
                NeedOp::Satisfy(x) => { need.satisfy(x); }
                NeedOp::Frustrate(x) => { need.frustrate(x); }
                NeedOp::ImagineSatisfy(x) => { need.imagine_satisfy(x); }
                NeedOp::ImagineFrustrate(x) => { need.imagine_frustrate(x); }
            }
        }
        need.reset();
        prop_assert_eq!(need.value().to_bits(), initial.to_bits());
        prop_assert_eq!(need.pain(), 0.0);
        prop_assert_eq!(need.pleasure(), 0.0);
    }
}

// ============================================================================
// Consumption
// ============================================================================

proptest! {
    /// An undisturbed delivery resolves to its full reward over its lifetime.
    #[test]
    fn delivery_conserves_reward(reward in -1.0f64..1.0, duration in 0.5f64..200.0) {
        let params = ConsumptionParams::new("c", "n", reward, duration);
        let mut consumption = Consumption::new(params).unwrap();
        consumption.trigger(None, None).unwrap();
        let mut total = 0.0;
        let mut ticks = 0;
        while !consumption.deliveries().is_empty() {
            total += consumption.update(TICK);
            ticks += 1;
            prop_assert!(ticks <= delivery_ticks(duration, TICK));
        }
        prop_assert!((total - reward).abs() < 1e-9, "total {} reward {}", total, reward);
    }

    #[test]
    fn resolved_value_never_exceeds_max_reward(
        max_reward in 0.0f64..2.0,
        triggers in proptest::collection::vec((-10.0f64..10.0, 0.05f64..30.0), 1..8),
    ) {
        let mut consumption = Consumption::new(
            ConsumptionParams::new("c", "n", 1.0, 3.0).max_reward(max_reward),
        ).unwrap();
        for (reward, duration) in triggers {
            consumption.trigger(Some(reward), Some(duration)).unwrap();
        }
        for _ in 0..400 {
            let v = consumption.update(TICK);
            prop_assert!(v.abs() <= max_reward);
        }
    }
}

// ============================================================================
// Modulator
// ============================================================================

proptest! {
    #[test]
    fn modulator_stays_in_range(
        modulator in arb_modulator(),
        targets in proptest::collection::vec(-1.0f64..=1.0, 0..100),
    ) {
        let mut m = modulator;
        let (min, max) = (m.params().min, m.params().max);
        for target in targets {
            m.approach(target);
            prop_assert!(
                m.value() >= min && m.value() <= max,
                "value {} outside [{}, {}]",
                m.value(),
                min,
                max
            );
            m.update(TICK);
            prop_assert!(m.value() >= min && m.value() <= max);
            let n = m.normalized_value();
            prop_assert!((-1.0..=1.0).contains(&n), "normalized {}", n);
        }
    }

    /// Out-of-range targets are clamped rather than pushing past the bounds.
    #[test]
    fn modulator_clamps_wild_targets(modulator in arb_modulator(), target in -100.0f64..100.0) {
        let mut m = modulator;
        m.approach(target);
        prop_assert!(m.value() >= m.params().min && m.value() <= m.params().max);
    }
}
