//! Rotation maths for the wheel transform.
//!
//! The indicator is fixed and the wheel turns beneath it. Slot 0 starts at
//! the indicator when `rotation mod 360 == 0`, slots run clockwise, and the
//! cumulative rotation only ever grows.

use rand::Rng;

use crate::config::WheelConfig;
use crate::numbers::{floor_f64_to_usize, usize_to_f64};

pub const FULL_TURN_DEG: f64 = 360.0;

/// Normalize any angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if normalized >= FULL_TURN_DEG {
        normalized - FULL_TURN_DEG
    } else {
        normalized
    }
}

/// Angular width of one slot, or `None` for an empty wheel.
#[must_use]
pub fn segment_angle(slot_count: usize) -> Option<f64> {
    (slot_count > 0).then(|| FULL_TURN_DEG / usize_to_f64(slot_count))
}

/// Centre angle of a slot on the unrotated wheel.
#[must_use]
pub fn segment_center(slot_index: usize, slot_count: usize) -> Option<f64> {
    if slot_index >= slot_count {
        return None;
    }
    let segment = segment_angle(slot_count)?;
    Some(usize_to_f64(slot_index).mul_add(segment, segment / 2.0))
}

/// Slot sitting under the indicator for a given cumulative rotation.
#[must_use]
pub fn slot_under_pointer(rotation: f64, slot_count: usize) -> Option<usize> {
    let segment = segment_angle(slot_count)?;
    let wheel_angle = normalize_degrees(-rotation);
    let slot = floor_f64_to_usize(wheel_angle / segment)?;
    Some(slot.min(slot_count - 1))
}

/// Turns a winning slot into the next cumulative rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCalculator {
    min_turns: u32,
    jitter_ratio: f64,
}

impl RotationCalculator {
    #[must_use]
    pub const fn new(min_turns: u32, jitter_ratio: f64) -> Self {
        Self {
            min_turns,
            jitter_ratio,
        }
    }

    #[must_use]
    pub const fn from_config(cfg: &WheelConfig) -> Self {
        Self::new(cfg.min_turns, cfg.jitter_ratio)
    }

    #[must_use]
    pub const fn jitter_ratio(&self) -> f64 {
        self.jitter_ratio
    }

    /// Degrees added to every spin before the landing offset.
    #[must_use]
    pub fn min_spin_distance(&self) -> f64 {
        f64::from(self.min_turns) * FULL_TURN_DEG
    }

    /// New cumulative rotation landing on `slot_index` with a random offset.
    ///
    /// Returns `None` when the slot does not exist on a wheel of `slot_count`.
    pub fn compute_rotation<R: Rng + ?Sized>(
        &self,
        current: f64,
        slot_index: usize,
        slot_count: usize,
        rng: &mut R,
    ) -> Option<f64> {
        let jitter_unit = rng.gen_range(-1.0..1.0);
        self.rotation_for_jitter(current, slot_index, slot_count, jitter_unit)
    }

    /// Deterministic core of [`Self::compute_rotation`]. `jitter_unit` is
    /// clamped to `[-1, 1]` and scaled by the jitter ratio.
    #[must_use]
    pub fn rotation_for_jitter(
        &self,
        current: f64,
        slot_index: usize,
        slot_count: usize,
        jitter_unit: f64,
    ) -> Option<f64> {
        let segment = segment_angle(slot_count)?;
        let center = segment_center(slot_index, slot_count)?;
        let jitter = jitter_unit.clamp(-1.0, 1.0) * self.jitter_ratio * segment;
        let target = normalize_degrees(-(center + jitter));
        let mut delta = target - normalize_degrees(current);
        if delta < 0.0 {
            delta += FULL_TURN_DEG;
        }
        Some(current + self.min_spin_distance() + delta)
    }
}

impl Default for RotationCalculator {
    fn default() -> Self {
        Self::new(
            WheelConfig::default_min_turns(),
            WheelConfig::default_jitter_ratio(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn normalize_wraps_into_range() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < EPS);
        assert!((normalize_degrees(720.5) - 0.5).abs() < EPS);
        assert!(normalize_degrees(-1e-20) < FULL_TURN_DEG);
    }

    #[test]
    fn centred_landing_from_rest() {
        let calc = RotationCalculator::default();
        // 4 slots of 90 degrees; slot 1 centre sits at 135.
        let next = calc.rotation_for_jitter(0.0, 1, 4, 0.0).expect("valid slot");
        assert!((next - (2160.0 + 225.0)).abs() < EPS);
        assert_eq!(slot_under_pointer(next, 4), Some(1));
    }

    #[test]
    fn always_spins_at_least_the_minimum_distance() {
        let calc = RotationCalculator::default();
        let current = 2160.0 + 225.0;
        let again = calc.rotation_for_jitter(current, 1, 4, 0.0).expect("valid slot");
        assert!((again - current - 2160.0).abs() < EPS);
    }

    #[test]
    fn invalid_slots_yield_nothing() {
        let calc = RotationCalculator::default();
        assert!(calc.rotation_for_jitter(0.0, 0, 0, 0.0).is_none());
        assert!(calc.rotation_for_jitter(0.0, 4, 4, 0.0).is_none());
        assert_eq!(slot_under_pointer(10.0, 0), None);
    }

    #[test]
    fn monotonic_and_lands_inside_claimed_slot() {
        let calc = RotationCalculator::default();
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut rotation = 0.0;
        for step in 0..2_000usize {
            let slot_count = step % 17 + 1;
            let slot = (step * 7) % slot_count;
            let next = calc
                .compute_rotation(rotation, slot, slot_count, &mut rng)
                .expect("valid slot");
            assert!(next > rotation);
            assert!(next - rotation >= calc.min_spin_distance());
            assert!(next - rotation < calc.min_spin_distance() + FULL_TURN_DEG);

            let segment = segment_angle(slot_count).expect("non-empty");
            let center = segment_center(slot, slot_count).expect("valid slot");
            let landed = normalize_degrees(-next);
            let mut offset = (landed - center).abs();
            offset = offset.min(FULL_TURN_DEG - offset);
            assert!(offset <= 0.3 * segment + 1e-6, "offset {offset} exceeds jitter");
            assert_eq!(slot_under_pointer(next, slot_count), Some(slot));
            rotation = next;
        }
    }

    #[test]
    fn jitter_extremes_stay_off_the_boundary() {
        let calc = RotationCalculator::default();
        for unit in [-1.0, 1.0, -5.0, 5.0] {
            let next = calc.rotation_for_jitter(0.0, 2, 6, unit).expect("valid slot");
            assert_eq!(slot_under_pointer(next, 6), Some(2));
        }
    }
}
