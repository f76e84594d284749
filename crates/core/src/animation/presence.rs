use super::{Easing, Tween};

/// How an outgoing and an incoming key share the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceMode {
    /// The incoming key is not shown until the outgoing one has left.
    Wait,
    /// Exit and enter run at the same time.
    Sync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Present,
    Exiting,
}

/// What to draw for one key at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceFrame<K> {
    pub key: K,
    pub phase: Phase,
    /// Eased progress through the current phase.
    pub progress: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone)]
struct Leaving<K> {
    key: K,
    tween: Tween,
    /// Opacity at the moment the exit began.
    from: f64,
}

/// Enter/exit bookkeeping for a keyed panel, modal or accordion body.
#[derive(Debug, Clone)]
pub struct Presence<K> {
    mode: PresenceMode,
    duration: f64,
    easing: Easing,
    current: Option<(K, Tween)>,
    leaving: Option<Leaving<K>>,
}

impl<K: Clone + PartialEq> Presence<K> {
    pub fn new(mode: PresenceMode, duration: f64, easing: Easing) -> Self {
        Self {
            mode,
            duration,
            easing,
            current: None,
            leaving: None,
        }
    }

    /// Show `key` (or nothing) from `now` on. Setting the key that is
    /// already current does nothing.
    pub fn set(&mut self, key: Option<K>, now: f64) {
        if self.current.as_ref().map(|(k, _)| k) == key.as_ref() {
            return;
        }
        // A key still waiting for its turn has never been shown, so whatever
        // is already leaving keeps leaving.
        if let Some((old, tween)) = self.current.take().filter(|(_, t)| t.start <= now) {
            let from = self.entering_opacity(&tween, now);
            self.leaving = Some(Leaving {
                key: old,
                tween: Tween::new(now, self.duration, self.easing),
                from,
            });
        }
        self.current = key.map(|k| {
            let start = match (&self.leaving, self.mode) {
                (Some(l), PresenceMode::Wait) => l.tween.end().max(now),
                _ => now,
            };
            (k, Tween::new(start, self.duration, self.easing))
        });
    }

    /// Show `key` immediately with no transition.
    pub fn show_now(&mut self, key: Option<K>) {
        self.leaving = None;
        self.current = key.map(|k| (k, Tween::new(f64::NEG_INFINITY, 0.0, self.easing)));
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref().map(|(k, _)| k)
    }

    /// When the current key starts (or started) entering. In wait mode this
    /// is after the outgoing key has finished leaving.
    pub fn enter_start(&self) -> Option<f64> {
        self.current.as_ref().map(|(_, t)| t.start)
    }

    fn entering_opacity(&self, tween: &Tween, now: f64) -> f64 {
        tween.progress(now)
    }

    /// Every key that should be drawn at `now`, outgoing first.
    pub fn frames(&self, now: f64) -> Vec<PresenceFrame<K>> {
        let mut frames = Vec::with_capacity(2);
        if let Some(l) = &self.leaving
            && !l.tween.is_done(now)
        {
            let progress = l.tween.progress(now);
            frames.push(PresenceFrame {
                key: l.key.clone(),
                phase: Phase::Exiting,
                progress,
                opacity: l.from * (1.0 - progress),
            });
        }
        if let Some((key, tween)) = &self.current
            && now >= tween.start
        {
            let progress = tween.progress(now);
            frames.push(PresenceFrame {
                key: key.clone(),
                phase: if tween.is_done(now) {
                    Phase::Present
                } else {
                    Phase::Entering
                },
                progress,
                opacity: progress,
            });
        }
        frames
    }

    /// The frame for `key`, if it is on stage at `now`.
    pub fn frame_of(&self, key: &K, now: f64) -> Option<PresenceFrame<K>> {
        self.frames(now).into_iter().rev().find(|f| &f.key == key)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        let leaving = self.leaving.as_ref().is_some_and(|l| !l.tween.is_done(now));
        let entering = self.current.as_ref().is_some_and(|(_, t)| !t.is_done(now));
        leaving || entering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait() -> Presence<&'static str> {
        Presence::new(PresenceMode::Wait, 0.4, Easing::Linear)
    }

    fn phases(p: &Presence<&'static str>, now: f64) -> Vec<(&'static str, Phase)> {
        p.frames(now).into_iter().map(|f| (f.key, f.phase)).collect()
    }

    #[test]
    fn enters_then_settles() {
        let mut p = wait();
        p.set(Some("ferrari"), 0.0);
        assert_eq!(phases(&p, 0.2), vec![("ferrari", Phase::Entering)]);
        assert_eq!(p.frames(0.2)[0].opacity, 0.5);
        assert_eq!(phases(&p, 0.4), vec![("ferrari", Phase::Present)]);
        assert!(p.is_animating(0.3));
        assert!(!p.is_animating(0.5));
    }

    #[test]
    fn wait_mode_sequences_exit_before_enter() {
        let mut p = wait();
        p.show_now(Some("ferrari"));
        p.set(Some("redbull"), 10.0);
        assert_eq!(phases(&p, 10.2), vec![("ferrari", Phase::Exiting)]);
        assert_eq!(phases(&p, 10.5), vec![("redbull", Phase::Entering)]);
        assert_eq!(phases(&p, 11.0), vec![("redbull", Phase::Present)]);
    }

    #[test]
    fn sync_mode_overlaps() {
        let mut p = Presence::new(PresenceMode::Sync, 0.3, Easing::EaseInOut);
        p.show_now(Some("qualifying"));
        p.set(Some("flags"), 1.0);
        assert_eq!(
            phases(&p, 1.1),
            vec![("qualifying", Phase::Exiting), ("flags", Phase::Entering)]
        );
    }

    #[test]
    fn same_key_is_a_noop() {
        let mut p = wait();
        p.show_now(Some("monaco"));
        p.set(Some("monaco"), 3.0);
        assert!(!p.is_animating(3.0));
        assert_eq!(phases(&p, 3.0), vec![("monaco", Phase::Present)]);
    }

    #[test]
    fn clearing_exits_and_empties() {
        let mut p = wait();
        p.show_now(Some("verstappen"));
        p.set(None, 2.0);
        assert_eq!(p.current_key(), None);
        assert_eq!(phases(&p, 2.1), vec![("verstappen", Phase::Exiting)]);
        assert!(p.frames(2.5).is_empty());
    }

    #[test]
    fn interrupted_enter_exits_from_its_opacity() {
        let mut p = wait();
        p.set(Some("a"), 0.0);
        p.set(Some("b"), 0.2);
        let f = &p.frames(0.2)[0];
        assert_eq!(f.key, "a");
        assert_eq!(f.opacity, 0.5);
        assert!(p.frame_of(&"b", 0.3).is_none());
        assert!(p.enter_start().is_some_and(|t| (t - 0.6).abs() < 1e-9));
        assert!(p.frame_of(&"b", 0.7).is_some());
    }

    #[test]
    fn switching_while_waiting_keeps_the_exit() {
        let mut p = wait();
        p.show_now(Some("a"));
        p.set(Some("b"), 10.0);
        p.set(Some("c"), 10.1);

        let frames = p.frames(10.2);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].key, "a");
        assert_eq!(frames[0].phase, Phase::Exiting);
        assert!(p.frame_of(&"b", 10.5).is_none());
        assert!(p.enter_start().is_some_and(|t| (t - 10.4).abs() < 1e-9));
        assert_eq!(p.current_key(), Some(&"c"));
    }
}
