//! Clamp invariants over arbitrary control sequences

use pizza_delivery::sim::{ControlSignals, FlightConfig, FlightStage};
use pizza_delivery::upgrades::SpeedTrack;
use pizza_delivery::{AppliedStats, Tuning, UpgradeState};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn signals() -> impl Strategy<Value = ControlSignals> {
    (any::<[bool; 6]>()).prop_map(|b| ControlSignals {
        move_up: b[0],
        move_down: b[1],
        move_left: b[2],
        move_right: b[3],
        boost: b[4],
        shoot: b[5],
    })
}

proptest! {
    #[test]
    fn fuel_stays_in_range(
        inputs in prop::collection::vec(signals(), 1..400),
        seed in any::<u64>(),
        dt in 1.0f32..200.0,
    ) {
        let mut stage = FlightStage::new(
            FlightConfig::new(0),
            &Tuning::default(),
            AppliedStats::default(),
            Pcg32::seed_from_u64(seed),
        );
        for input in &inputs {
            stage.tick(input, dt);
            prop_assert!((0.0..=100.0).contains(&stage.fuel), "fuel {}", stage.fuel);
        }
    }

    #[test]
    fn speed_never_exceeds_boosted_cap(
        inputs in prop::collection::vec(signals(), 1..400),
        rocket_tier in 0usize..4,
        level in 0usize..10,
    ) {
        let mut upgrades = UpgradeState::default();
        upgrades.add_points(1_000_000);
        for tier in 1..=rocket_tier {
            upgrades.purchase_tier(SpeedTrack::Rocket, tier);
        }
        let stats = AppliedStats::derive(&upgrades);
        let tuning = Tuning::default();
        let cap = tuning.flight.max_speed
            * tuning.flight.boost_multiplier
            * stats.rocket_speed_multiplier;

        let mut stage = FlightStage::new(
            FlightConfig::new(level),
            &tuning,
            stats,
            Pcg32::seed_from_u64(level as u64),
        );
        for input in &inputs {
            stage.tick(input, 16.0);
            prop_assert!(stage.player.vel.length() <= cap + 1e-3);
        }
    }
}
