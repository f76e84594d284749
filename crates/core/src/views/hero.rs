use paddock_protocol::{Rect, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, Painter, Rendered, content_column, line_height, text_width, wrap_text,
};
use crate::animation::Stagger;
use crate::data::basics::HERO;

/// Title line, then subtitle.
const CHILDREN: usize = 2;
const HERO_TITLE_SIZE: f64 = 56.0;
const SUBTITLE_SIZE: f64 = 20.0;
/// How far each child rises while fading in.
const RISE: f64 = 30.0;
const MIN_HEIGHT: f64 = 360.0;

#[derive(Debug, Clone)]
pub struct HeroState {
    entrance: Stagger,
}

impl HeroState {
    pub fn new(now: f64) -> Self {
        Self {
            entrance: Stagger::hero(now, CHILDREN),
        }
    }

    /// Replay the entrance from `now`.
    pub fn reset(&mut self, now: f64) {
        self.entrance = Stagger::hero(now, CHILDREN);
    }

    pub fn skip_entrance(&mut self) {
        self.entrance.finish();
    }

    pub fn is_animating(&self, now: f64) -> bool {
        !self.entrance.is_done(now)
    }
}

/// Full-viewport banner: background video, dark overlay, staggered title
/// and subtitle.
pub fn render_hero(state: &HeroState, viewport: &Viewport, now: f64) -> Rendered {
    let height = viewport.height.max(MIN_HEIGHT);
    let full = Rect::new(0.0, 0.0, viewport.width, height);
    let (x, width) = content_column(viewport.width, 900.0);

    let title = format!("{} ", HERO.title.to_uppercase());
    let highlight = HERO.highlight.to_uppercase();
    let subtitle = wrap_text(HERO.subtitle, width, SUBTITLE_SIZE);

    let title_h = line_height(HERO_TITLE_SIZE);
    let block_h = title_h + 16.0 + subtitle.len() as f64 * line_height(SUBTITLE_SIZE);
    let top = (height - block_h) / 2.0;

    let mut p = Painter::new();
    p.begin_group("hero", "F1 for Dummies");
    p.image(full, HERO.background, "Formula 1 cars racing");
    p.rect(full, ThemeToken::Backdrop, None);

    let rise = |i: usize| {
        let t = state.entrance.progress(i, now);
        (t, RISE * (1.0 - t))
    };

    let (alpha, dy) = rise(0);
    p.faded(alpha, |p| {
        p.shifted(0.0, dy, |p| {
            let title_w = text_width(&title, HERO_TITLE_SIZE);
            let total = title_w + text_width(&highlight, HERO_TITLE_SIZE);
            let start = x + (width - total) / 2.0;
            p.text(start, top, title, ThemeToken::TextPrimary, HERO_TITLE_SIZE, TextAlign::Left);
            p.text(
                start + title_w,
                top,
                highlight,
                ThemeToken::Accent,
                HERO_TITLE_SIZE,
                TextAlign::Left,
            );
        });
    });

    let (alpha, dy) = rise(1);
    p.faded(alpha, |p| {
        p.shifted(0.0, dy, |p| {
            let mut y = top + title_h + 16.0;
            for line in subtitle {
                p.text(
                    x + width / 2.0,
                    y,
                    line,
                    ThemeToken::TextSecondary,
                    SUBTITLE_SIZE,
                    TextAlign::Center,
                );
                y += line_height(SUBTITLE_SIZE);
            }
        });
    });

    p.text(
        viewport.width / 2.0,
        height - 2.0 * line_height(BODY_SIZE),
        "scroll",
        ThemeToken::TextMuted,
        BODY_SIZE,
        TextAlign::Center,
    );
    p.end_group();
    p.finish(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_protocol::RenderCommand;

    fn texts(r: &Rendered) -> Vec<String> {
        r.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fills_the_viewport() {
        let state = HeroState::new(0.0);
        let r = render_hero(&state, &Viewport::new(1280.0, 720.0), 10.0);
        assert_eq!(r.height, 720.0);
        let t = texts(&r);
        assert!(t.contains(&"F1 FOR ".to_string()));
        assert!(t.contains(&"DUMMIES".to_string()));
    }

    #[test]
    fn entrance_starts_hidden_and_settles() {
        let state = HeroState::new(0.0);
        let vp = Viewport::new(1280.0, 720.0);
        let early = render_hero(&state, &vp, 0.0);
        assert!(early
            .commands
            .contains(&RenderCommand::PushOpacity { alpha: 0.0 }));
        assert!(state.is_animating(1.0));
        assert!(!state.is_animating(2.0));

        let settled = render_hero(&state, &vp, 2.0);
        assert!(!settled
            .commands
            .iter()
            .any(|c| matches!(c, RenderCommand::PushOpacity { .. })));
    }

    #[test]
    fn skipped_entrance_renders_final_state() {
        let mut state = HeroState::new(0.0);
        state.skip_entrance();
        assert!(!state.is_animating(0.0));
    }
}
