//! Distance tracking and the difficulty tier it drives

use super::difficulty::DifficultyTier;

/// Result of one progress update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressUpdate {
    /// Distance changed this tick (a sample boundary was crossed)
    pub distance_changed: bool,
    /// New tier, if it was raised this tick
    pub tier_raised: Option<DifficultyTier>,
}

/// Accumulates distance from the corridor scroll speed
///
/// Distance is stored as a non-positive depth (the runner heads toward -Z);
/// [`ProgressTracker::traveled`] gives the magnitude everything else uses.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    distance: f32,
    pending_time: f32,
    sample_interval: f32,
    tier: DifficultyTier,
}

impl ProgressTracker {
    pub fn new(sample_interval: f32) -> Self {
        Self {
            distance: 0.0,
            pending_time: 0.0,
            sample_interval,
            tier: DifficultyTier::One,
        }
    }

    /// Raw (non-positive) distance
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Distance traveled as a magnitude
    pub fn traveled(&self) -> f32 {
        self.distance.abs()
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    /// Whole units traveled, the run score
    pub fn score(&self) -> u32 {
        self.traveled().floor() as u32
    }

    /// Fold elapsed time in, one whole sample interval at a time
    pub fn advance(&mut self, dt: f32, environment_speed: f32) -> ProgressUpdate {
        self.pending_time += dt;
        let mut samples = 0u32;
        while self.pending_time >= self.sample_interval {
            self.pending_time -= self.sample_interval;
            samples += 1;
        }
        if samples == 0 {
            return ProgressUpdate::default();
        }
        let delta = environment_speed * self.sample_interval * samples as f32;
        ProgressUpdate {
            distance_changed: delta > 0.0,
            tier_raised: self.add_distance(delta),
        }
    }

    /// Move forward by `delta` units and re-derive the tier
    ///
    /// The tier never drops within a run, whatever the input.
    pub fn add_distance(&mut self, delta: f32) -> Option<DifficultyTier> {
        self.distance -= delta.abs();
        let tier = DifficultyTier::for_distance(self.traveled()).max(self.tier);
        if tier != self.tier {
            self.tier = tier;
            Some(tier)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.distance = 0.0;
        self.pending_time = 0.0;
        self.tier = DifficultyTier::One;
    }
}
