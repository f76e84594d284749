use super::{Easing, Tween};

/// Staggered entrance of a fixed number of children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub start: f64,
    /// Delay before the first child starts.
    pub delay: f64,
    /// Offset between consecutive children.
    pub gap: f64,
    pub duration: f64,
    pub easing: Easing,
    pub count: usize,
}

impl Stagger {
    /// Hero banner entrance.
    pub fn hero(start: f64, count: usize) -> Self {
        Self {
            start,
            delay: 0.2,
            gap: 0.3,
            duration: 0.8,
            easing: Easing::EaseOut,
            count,
        }
    }

    pub fn child(&self, index: usize) -> Tween {
        Tween::new(
            self.start + self.delay + self.gap * index as f64,
            self.duration,
            self.easing,
        )
    }

    /// Eased progress of child `index` at `now`.
    pub fn progress(&self, index: usize, now: f64) -> f64 {
        self.child(index).progress(now)
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.count == 0 || self.child(self.count - 1).is_done(now)
    }

    /// Jump to the settled state.
    pub fn finish(&mut self) {
        self.start = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_start_in_order() {
        let s = Stagger::hero(0.0, 2);
        assert_eq!(s.progress(0, 0.2), 0.0);
        assert!(s.progress(0, 0.5) > 0.0);
        assert_eq!(s.progress(1, 0.5), 0.0);
        assert!(s.progress(1, 0.6) > 0.0);
        assert!(!s.is_done(1.2));
        assert!(s.is_done(1.31));
        assert_eq!(s.progress(1, 1.4), 1.0);
    }

    #[test]
    fn finished_stagger_is_settled() {
        let mut s = Stagger::hero(100.0, 3);
        s.finish();
        assert!(s.is_done(0.0));
        assert_eq!(s.progress(2, 0.0), 1.0);
    }
}
