//! Random draws behind every humanized movement
//!
//! All randomness the engine uses flows through [`Humanizer`], so a seeded
//! or fixed-sequence generator makes movement fully reproducible.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Reaction latency range after a humanized step, in microseconds
const MIN_REACTION_MICROS: u64 = 50;
const MAX_REACTION_MICROS: u64 = 100;

/// Settle time after a synthetic event, in microseconds
const MIN_SETTLE_MICROS: u64 = 100;
const MAX_SETTLE_MICROS: u64 = 200;

/// Humanizer for generating jitter, deviations and timing
pub struct Humanizer {
    rng: Box<dyn RngCore + Send>,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Humanizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Humanizer").finish_non_exhaustive()
    }
}

impl Humanizer {
    /// Create a humanizer seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a reproducible humanizer
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Wrap any random source, e.g. a fixed-sequence test double
    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Perturb a value by at most `jitter_amount`, never by more than
    /// half its magnitude plus one
    pub fn jitter(&mut self, value: i32, jitter_amount: u8) -> i32 {
        if jitter_amount == 0 {
            return value;
        }

        let proportional = value.unsigned_abs() / 2 + 1;
        let bound = (jitter_amount as u32).min(proportional) as i32;
        let offset = self.rng.gen_range(-bound..=bound);

        value.saturating_add(offset)
    }

    /// Single-pixel wobble in {-1, 0, 1}
    pub fn axis_jitter(&mut self) -> i32 {
        self.rng.gen_range(-1..=1)
    }

    /// Uniform offset in `[-max, max]`
    pub fn deviation(&mut self, max: i64) -> i64 {
        if max <= 0 {
            return 0;
        }
        self.rng.gen_range(-max..=max)
    }

    /// True with probability `level / 10`
    pub fn chance_in_ten(&mut self, level: u8) -> bool {
        self.rng.gen_range(0..10u8) < level
    }

    /// Fair coin
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_range(0..2u8) == 0
    }

    /// Pick one item uniformly
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.rng.gen_range(0..items.len())])
    }

    /// Delay between queued movements
    ///
    /// The base delay plus, when humanizing, a random extra in
    /// `[0, base * level / 5)`.
    pub fn inter_movement_delay(&mut self, base_micros: u32, level: u8) -> Duration {
        let base = base_micros as u64;
        let extra_bound = base * level as u64 / 5;
        let extra = if extra_bound > 0 {
            self.rng.gen_range(0..extra_bound)
        } else {
            0
        };

        Duration::from_micros(base + extra)
    }

    /// Delay between two points of a curved path, in `[base, 2 * base)`
    pub fn segment_delay(&mut self, base_micros: u32) -> Duration {
        let base = base_micros as u64;
        if base == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.rng.gen_range(base..base * 2))
    }

    /// Reaction latency after a humanized step
    pub fn reaction_delay(&mut self) -> Duration {
        Duration::from_micros(
            self.rng
                .gen_range(MIN_REACTION_MICROS..MAX_REACTION_MICROS),
        )
    }

    /// Settle time after a synthetic input event
    pub fn settle_delay(&mut self) -> Duration {
        Duration::from_micros(self.rng.gen_range(MIN_SETTLE_MICROS..MAX_SETTLE_MICROS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_zero_jitter_is_identity() {
        let mut humanizer = Humanizer::new();

        for value in [-500, -3, -1, 0, 1, 2, 77, i32::MAX, i32::MIN] {
            assert_eq!(humanizer.jitter(value, 0), value);
        }
    }

    #[test]
    fn test_jitter_bounded_by_amount_and_magnitude() {
        let mut humanizer = Humanizer::seeded(7);

        for _ in 0..1000 {
            // Small value: bound is |v|/2 + 1 = 2
            let jittered = humanizer.jitter(2, 10);
            assert!((0..=4).contains(&jittered));

            // Large value: bound is the jitter amount
            let jittered = humanizer.jitter(100, 3);
            assert!((97..=103).contains(&jittered));
        }
    }

    #[test]
    fn test_jitter_zero_value_moves_at_most_one() {
        let mut humanizer = Humanizer::seeded(11);

        for _ in 0..200 {
            assert!((-1..=1).contains(&humanizer.jitter(0, 10)));
        }
    }

    #[test]
    fn test_fixed_sequence_takes_lower_bounds() {
        // A zero source always samples the bottom of each range
        let mut humanizer = Humanizer::from_rng(StepRng::new(0, 0));

        assert_eq!(humanizer.jitter(10, 5), 5);
        assert_eq!(humanizer.axis_jitter(), -1);
        assert_eq!(humanizer.deviation(30), -30);
        assert!(humanizer.chance_in_ten(1));
        assert!(humanizer.coin_flip());
        assert_eq!(humanizer.pick(&['a', 'b', 'c']), Some('a'));
        assert_eq!(humanizer.reaction_delay(), Duration::from_micros(50));
        assert_eq!(humanizer.segment_delay(40), Duration::from_micros(40));
    }

    #[test]
    fn test_chance_in_ten_extremes() {
        let mut humanizer = Humanizer::seeded(3);

        for _ in 0..200 {
            assert!(!humanizer.chance_in_ten(0));
            assert!(humanizer.chance_in_ten(10));
        }
    }

    #[test]
    fn test_inter_movement_delay_range() {
        let mut humanizer = Humanizer::seeded(5);

        for _ in 0..500 {
            let delay = humanizer.inter_movement_delay(100, 5);
            assert!(delay >= Duration::from_micros(100));
            assert!(delay < Duration::from_micros(200));
        }

        assert_eq!(humanizer.inter_movement_delay(0, 10), Duration::ZERO);
        assert_eq!(
            humanizer.inter_movement_delay(250, 0),
            Duration::from_micros(250)
        );
        // Extra bound rounds down to zero: no extra drawn
        assert_eq!(humanizer.inter_movement_delay(1, 1), Duration::from_micros(1));
    }

    #[test]
    fn test_segment_and_reaction_ranges() {
        let mut humanizer = Humanizer::seeded(9);

        for _ in 0..500 {
            let segment = humanizer.segment_delay(300);
            assert!(segment >= Duration::from_micros(300));
            assert!(segment < Duration::from_micros(600));

            let reaction = humanizer.reaction_delay();
            assert!(reaction >= Duration::from_micros(50));
            assert!(reaction < Duration::from_micros(100));

            let settle = humanizer.settle_delay();
            assert!(settle >= Duration::from_micros(100));
            assert!(settle < Duration::from_micros(200));
        }
        assert_eq!(humanizer.segment_delay(0), Duration::ZERO);
    }

    #[test]
    fn test_seeded_humanizers_agree() {
        let mut a = Humanizer::seeded(42);
        let mut b = Humanizer::seeded(42);

        for _ in 0..50 {
            assert_eq!(a.jitter(40, 6), b.jitter(40, 6));
            assert_eq!(a.deviation(100), b.deviation(100));
        }
    }

    #[test]
    fn test_pick_empty() {
        let mut humanizer = Humanizer::seeded(1);
        assert_eq!(humanizer.pick::<u8>(&[]), None);
    }
}
