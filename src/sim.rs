//! Random environment simulation.

use rand::Rng;

use crate::core::gate::Environment;

/// RNG-driven environment with the classic site odds: a weather roll in
/// `0..10` is bad above five (40% bad, 60% good), and a break comes up
/// three times out of ten.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomEnvironment;

impl Environment for RandomEnvironment {
    fn weather_turns_bad(&self) -> bool {
        rand::rng().random_range(0..10) > 5
    }

    fn break_comes_up(&self) -> bool {
        rand::rng().random_range(0..10) < 3
    }
}
