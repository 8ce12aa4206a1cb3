// Property tests for scoring and spawning.

use clean_water_catch::model::{CLEAN_POINTS, Mode, POLLUTED_PENALTY, RoundState};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Easy), Just(Mode::Normal), Just(Mode::Hard)]
}

proptest! {
    #[test]
    fn score_is_ten_per_clean_minus_fifteen_per_polluted(
        mode in mode_strategy(),
        catches in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let mut rs = RoundState::new(mode);
        rs.start();
        for polluted in &catches {
            let roll = if *polluted { 0.999 } else { 0.0 };
            let id = rs.spawn(roll, 0.5, 0.5).unwrap();
            let before = rs.score;
            let outcome = rs.click(id, 0.0, 0.0).unwrap();
            let expected = if *polluted { -POLLUTED_PENALTY } else { CLEAN_POINTS };
            prop_assert_eq!(outcome.delta, expected);
            prop_assert_eq!(rs.score - before, expected);
        }
        let clean = catches.iter().filter(|p| !**p).count() as i32;
        let polluted = catches.len() as i32 - clean;
        prop_assert_eq!(rs.score, clean * CLEAN_POINTS - polluted * POLLUTED_PENALTY);
        prop_assert!(rs.shown_milestones.len() <= 4);
    }

    #[test]
    fn spawned_speed_stays_in_profile_range(
        mode in mode_strategy(),
        speed_roll in 0.0f64..1.0,
        x_roll in 0.0f64..1.0,
    ) {
        let mut rs = RoundState::new(mode);
        rs.start();
        rs.spawn(0.5, speed_roll, x_roll).unwrap();
        let cfg = mode.profile();
        let d = &rs.drops[0];
        prop_assert!(d.speed >= cfg.min_speed && d.speed <= cfg.max_speed);
        prop_assert!((0.0..=1.0).contains(&d.x_frac));
    }

    #[test]
    fn polluted_fraction_tracks_the_profile(mode in mode_strategy(), seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut roll = move || rng.random::<f64>();
        let mut rs = RoundState::new(mode);
        rs.start();
        let n = 4000;
        for _ in 0..n {
            rs.spawn(roll(), roll(), roll());
        }
        let polluted = rs.drops.iter().filter(|d| d.polluted).count() as f64 / n as f64;
        prop_assert!((polluted - mode.profile().polluted_fraction).abs() < 0.05);
    }
}
