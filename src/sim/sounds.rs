use glam::DVec2;
use smallvec::SmallVec;

use crate::defs::Sound;

/// One playback request. Fire-and-forget: the engine never waits on
/// completion and never retries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundEvent {
    pub sound: Sound,
    pub volume: f64,
}

/// Per-frame queue the sim systems push into; the frame driver drains
/// it into the sink. Stays on the stack for typical frames.
pub type SoundQueue = SmallVec<[SoundEvent; 8]>;

/// Host audio surface. Implementations restart the effect from the
/// beginning if it is already playing.
pub trait AudioSink {
    fn play(&mut self, sound: Sound, volume: f64);
}

/// Sink that swallows everything. Handy for headless runs and tests.
#[derive(Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: Sound, _volume: f64) {}
}

/// Loudness falls off with the reciprocal of distance, clamped to the
/// unit range. A source on top of the listener saturates to 1.
#[inline]
pub fn distance_volume(listener: DVec2, source: DVec2) -> f64 {
    (1.0 / listener.distance(source)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn volume_clamps_at_point_blank() {
        let p = dvec2(1.0, 1.0);
        assert_eq!(distance_volume(p, p), 1.0);
        assert_eq!(distance_volume(p, dvec2(1.0, 1.5)), 1.0);
    }

    #[test]
    fn volume_falls_off_with_distance() {
        let p = dvec2(0.0, 0.0);
        let v = distance_volume(p, dvec2(4.0, 0.0));
        assert!((v - 0.25).abs() < 1e-12);
    }
}
