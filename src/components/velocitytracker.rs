//! Bounded position/velocity history used to estimate throw velocity.
//!
//! Hand motion right before a release is noisy: the hand usually slows down
//! in the last frame or two. Picking the fastest of the last few samples
//! gives throws that feel like the swing the player made.

use arrayvec::ArrayVec;
use raylib::math::Vector3;

/// Number of frames kept in the history.
pub const HISTORY_CAPACITY: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    pub position: Vector3,
    pub velocity: Vector3,
    pub dt: f32,
}

/// Fixed-capacity ring of recent samples, oldest first.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: ArrayVec<VelocitySample, HISTORY_CAPACITY>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: VelocitySample) {
        if self.samples.is_full() {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[VelocitySample] {
        &self.samples
    }

    /// Velocity of the fastest sample, or `fallback` with no history.
    ///
    /// Ties keep the earliest sample.
    pub fn peak_velocity(&self, fallback: Vector3) -> Vector3 {
        let mut best: Option<&VelocitySample> = None;
        for sample in &self.samples {
            match best {
                Some(b) if sample.velocity.length() <= b.velocity.length() => {}
                _ => best = Some(sample),
            }
        }
        best.map(|s| s.velocity).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_speed(speed: f32) -> VelocitySample {
        VelocitySample {
            position: Vector3::zero(),
            velocity: Vector3::new(speed, 0.0, 0.0),
            dt: 1.0 / 60.0,
        }
    }

    #[test]
    fn peak_picks_fastest_sample() {
        let mut t = VelocityTracker::new();
        for s in [1.0, 4.0, 2.0, 5.0, 3.0, 1.0] {
            t.push(sample_with_speed(s));
        }
        assert_eq!(t.peak_velocity(Vector3::zero()).length(), 5.0);
    }

    #[test]
    fn peak_compares_magnitude_not_components() {
        let mut t = VelocityTracker::new();
        t.push(VelocitySample {
            position: Vector3::zero(),
            velocity: Vector3::new(0.0, -7.0, 0.0),
            dt: 0.016,
        });
        t.push(sample_with_speed(6.0));
        assert_eq!(t.peak_velocity(Vector3::zero()), Vector3::new(0.0, -7.0, 0.0));
    }

    #[test]
    fn ties_keep_first_maximum() {
        let mut t = VelocityTracker::new();
        t.push(VelocitySample {
            position: Vector3::zero(),
            velocity: Vector3::new(0.0, 0.0, 3.0),
            dt: 0.016,
        });
        t.push(sample_with_speed(3.0));
        assert_eq!(t.peak_velocity(Vector3::zero()), Vector3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn empty_history_falls_back() {
        let t = VelocityTracker::new();
        let fallback = Vector3::new(0.5, 0.5, 0.0);
        assert_eq!(t.peak_velocity(fallback), fallback);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut t = VelocityTracker::new();
        t.push(sample_with_speed(100.0));
        for _ in 0..HISTORY_CAPACITY {
            t.push(sample_with_speed(1.0));
        }
        assert_eq!(t.len(), HISTORY_CAPACITY);
        assert_eq!(t.peak_velocity(Vector3::zero()).length(), 1.0);
    }

    #[test]
    fn clear_empties_history() {
        let mut t = VelocityTracker::new();
        t.push(sample_with_speed(2.0));
        t.clear();
        assert!(t.is_empty());
    }
}
