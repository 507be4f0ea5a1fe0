//! Frame timing utilities

use std::time::Instant;

/// Longest frame step the simulation will integrate, in seconds.
///
/// Larger steps let the ball travel far enough in one tick to tunnel through
/// thin geometry.
pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.1;

/// Clamp a raw frame delta to `[0, max_frame_time]`
pub fn clamp_delta(delta_time: f32, max_frame_time: f32) -> f32 {
    if delta_time.is_nan() {
        return 0.0;
    }
    delta_time.clamp(0.0, max_frame_time)
}

/// Frame clock producing clamped per-frame deltas
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_frame_time: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_TIME)
    }
}

impl FrameClock {
    /// Create a new clock with the given delta clamp
    pub fn new(max_frame_time: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_frame_time,
        }
    }

    /// Advance the clock (once per frame) and return the clamped delta
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance the clock by an externally measured delta.
    ///
    /// Used by fixed-step drivers that do not read the wall clock.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        self.delta_time = clamp_delta(raw_delta, self.max_frame_time);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Clamped time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all clamped deltas
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Upper bound applied to every delta
    pub fn max_frame_time(&self) -> f32 {
        self.max_frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(0.5, 0.1), 0.1);
        assert_eq!(clamp_delta(0.016, 0.1), 0.016);
        assert_eq!(clamp_delta(-1.0, 0.1), 0.0);
        assert_eq!(clamp_delta(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_advance_accumulates_clamped_time() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(0.05), 0.05);
        assert_eq!(clock.advance(2.0), 0.1);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.total_time() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_tick_never_exceeds_clamp() {
        let mut clock = FrameClock::default();
        let dt = clock.tick();
        assert!(dt <= clock.max_frame_time());
        assert_eq!(clock.delta_time(), dt);
    }
}
