use super::Easing;

/// Seconds the outline takes to draw itself in.
pub const DRAW_IN_SECS: f64 = 1.5;
/// Seconds for the highlight to traverse the whole outline once.
pub const SWEEP_PERIOD_SECS: f64 = 6.0;
/// Length of the highlight as a fraction of the outline.
pub const SWEEP_FRACTION: f64 = 0.1;

const DRAW_IN_EASING: Easing = Easing::EaseInOut;

/// One sampled state of the track map animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFrame {
    pub generation: u64,
    /// Fraction of the outline drawn so far, eased.
    pub drawn: f64,
    pub base_opacity: f64,
    /// `(from, to)` fractions of the sweeping highlight. `to` is clipped at
    /// the end of the outline.
    pub sweep: Option<(f64, f64)>,
}

/// Draw-in then endless sweep, restarted on every track change.
///
/// The animator is a pure function of the host clock: `restart` only records
/// a start time and bumps the generation, so a superseded run can never
/// produce another frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackAnimator {
    generation: u64,
    started_at: f64,
    reduced_motion: bool,
}

impl TrackAnimator {
    pub fn new(now: f64) -> Self {
        Self {
            generation: 0,
            started_at: now,
            reduced_motion: false,
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Discard the running sequence and start a new one at `now`.
    pub fn restart(&mut self, now: f64) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.started_at = now;
        tracing::trace!(generation = self.generation, now, "track animation restarted");
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frame(&self, now: f64) -> TrackFrame {
        if self.reduced_motion {
            return TrackFrame {
                generation: self.generation,
                drawn: 1.0,
                base_opacity: 1.0,
                sweep: None,
            };
        }
        let elapsed = (now - self.started_at).max(0.0);
        if elapsed < DRAW_IN_SECS {
            let drawn = DRAW_IN_EASING.apply(elapsed / DRAW_IN_SECS);
            return TrackFrame {
                generation: self.generation,
                drawn,
                base_opacity: drawn,
                sweep: None,
            };
        }
        let head = ((elapsed - DRAW_IN_SECS) % SWEEP_PERIOD_SECS) / SWEEP_PERIOD_SECS;
        TrackFrame {
            generation: self.generation,
            drawn: 1.0,
            base_opacity: 1.0,
            sweep: Some((head, (head + SWEEP_FRACTION).min(1.0))),
        }
    }

    /// Like [`frame`](Self::frame), but `None` once `generation` has been
    /// superseded by a restart.
    pub fn frame_for(&self, generation: u64, now: f64) -> Option<TrackFrame> {
        (generation == self.generation).then(|| self.frame(now))
    }

    /// The sweep loops forever, so only reduced motion ever settles.
    pub fn is_animating(&self, _now: f64) -> bool {
        !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_in_then_sweep() {
        let a = TrackAnimator::new(0.0);
        let start = a.frame(0.0);
        assert_eq!(start.drawn, 0.0);
        assert_eq!(start.sweep, None);

        let mid = a.frame(0.75);
        assert!((mid.drawn - 0.5).abs() < 1e-6);
        assert_eq!(mid.base_opacity, mid.drawn);

        let looping = a.frame(DRAW_IN_SECS + 3.0);
        assert_eq!(looping.drawn, 1.0);
        let (from, to) = looping.sweep.unwrap_or_default();
        assert!((from - 0.5).abs() < 1e-9);
        assert!((to - 0.6).abs() < 1e-9);
    }

    #[test]
    fn sweep_clips_at_the_end_and_loops() {
        let a = TrackAnimator::new(0.0);
        let near_end = a.frame(DRAW_IN_SECS + 5.7).sweep.unwrap_or_default();
        assert!((near_end.0 - 0.95).abs() < 1e-9);
        assert_eq!(near_end.1, 1.0);

        let second_lap = a.frame(DRAW_IN_SECS + 6.6).sweep.unwrap_or_default();
        assert!((second_lap.0 - 0.1).abs() < 1e-9);
    }

    #[test]
    fn restart_replays_draw_in_from_zero() {
        let mut a = TrackAnimator::new(0.0);
        let before = a.generation();
        assert!(a.frame(20.0).sweep.is_some());
        let generation = a.restart(20.0);
        assert_ne!(generation, before);
        let f = a.frame(20.0);
        assert_eq!(f.drawn, 0.0);
        assert_eq!(f.sweep, None);
        assert_eq!(f.generation, generation);
    }

    #[test]
    fn stale_generation_yields_nothing() {
        let mut a = TrackAnimator::new(0.0);
        let old = a.generation();
        a.restart(1.0);
        a.restart(1.1);
        assert!(a.frame_for(old, 2.0).is_none());
        assert!(a.frame_for(a.generation(), 2.0).is_some());
    }

    #[test]
    fn reduced_motion_shows_the_final_outline() {
        let mut a = TrackAnimator::new(0.0);
        a.set_reduced_motion(true);
        let f = a.frame(0.0);
        assert_eq!(f.drawn, 1.0);
        assert_eq!(f.sweep, None);
        assert!(!a.is_animating(0.0));
    }
}
