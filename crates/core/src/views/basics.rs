use paddock_protocol::{HitTarget, Point, Rect, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, GAP, HEADING_SIZE, PAD, Painter, Rendered, SMALL_SIZE, WIDE, bar_heading, columns,
    content_column, line_height, paragraph_height, section_heading,
};
use crate::animation::{Easing, Presence, PresenceMode};
use crate::data::basics::{BASICS_BACKGROUND, ESSENTIALS, INTRO, WEEKEND};
use crate::model::Essential;
use crate::selection::{Selection, SelectionPolicy};

const CARD_HEIGHT: f64 = 200.0;
const REVEAL_SECS: f64 = 0.3;
/// How far the info overlay slides up while it fades in.
const REVEAL_RISE: f64 = 20.0;

/// Hover state of the essentials cards.
#[derive(Debug, Clone)]
pub struct BasicsState {
    essentials: Selection<Essential>,
    reveal: Presence<&'static str>,
}

impl Default for BasicsState {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicsState {
    pub fn new() -> Self {
        Self {
            essentials: Selection::new(&ESSENTIALS, SelectionPolicy::OPTIONAL),
            reveal: Presence::new(PresenceMode::Sync, REVEAL_SECS, Easing::EaseOut),
        }
    }

    pub fn essentials(&self) -> &Selection<Essential> {
        &self.essentials
    }

    /// Reveal the info overlay of card `id`.
    pub fn reveal(&mut self, id: &str, now: f64) -> bool {
        let changed = self.essentials.select(id);
        if changed {
            self.reveal.set(self.essentials.current_key(), now);
        }
        changed
    }

    /// Hide card `id`. Leaving a card that isn't revealed does nothing.
    pub fn conceal(&mut self, id: &str, now: f64) -> bool {
        if !self.essentials.is_selected(id) {
            return false;
        }
        self.essentials.clear();
        self.reveal.set(None, now);
        true
    }

    pub fn reset(&mut self) {
        self.essentials.reset();
        self.reveal.show_now(None);
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.reveal.is_animating(now)
    }
}

/// "What is Formula 1?": intro, race-weekend timeline and hover cards.
pub fn render_basics(state: &BasicsState, viewport: &Viewport, now: f64) -> Rendered {
    let (x, width) = content_column(viewport.width, 1000.0);
    let n = if width >= WIDE { 3 } else { 1 };

    let mut p = Painter::new();
    p.begin_group("basics", "What is Formula 1?");
    // Background photo is drawn after layout, once the height is known.
    let mut y = PAD * 3.0;
    y = section_heading(
        &mut p,
        x,
        y,
        width,
        "What is",
        "Formula 1?",
        Some(INTRO),
        TextAlign::Center,
    );

    y = bar_heading(&mut p, x, y, "The Race Weekend");
    let cols = columns(x, width, n);
    let inner = |w: f64| w - 2.0 * GAP;
    let weekend_h = WEEKEND
        .iter()
        .zip(cols.iter().cycle())
        .map(|(s, &(_, w))| weekend_card_height(s.description, inner(w)))
        .fold(0.0, f64::max);
    let mut row_y = y;
    for (i, session) in WEEKEND.iter().enumerate() {
        let (cx, cw) = cols[i % n];
        if i > 0 && i % n == 0 {
            row_y += weekend_h + GAP;
        }
        let card = Rect::new(cx, row_y, cw, weekend_h);
        p.rect(card, ThemeToken::Surface, Some(ThemeToken::Border));
        p.circle(
            Point::new(cx + GAP + 20.0, row_y + GAP + 20.0),
            20.0,
            ThemeToken::Background,
            Some(session.color),
            None,
        );
        let mut ty = row_y + GAP + 48.0;
        p.text(cx + GAP, ty, session.day, ThemeToken::Accent, HEADING_SIZE, TextAlign::Left);
        ty += line_height(HEADING_SIZE);
        p.text(cx + GAP, ty, session.title, ThemeToken::TextPrimary, BODY_SIZE + 2.0, TextAlign::Left);
        ty += line_height(BODY_SIZE + 2.0) + 4.0;
        p.paragraph(
            cx + GAP,
            ty,
            inner(cw),
            session.description,
            ThemeToken::TextSecondary,
            SMALL_SIZE,
            TextAlign::Left,
        );
    }
    y = row_y + weekend_h + 3.0 * GAP;

    y = bar_heading(&mut p, x, y, "Essential Knowledge");
    let mut row_y = y;
    for (i, essential) in ESSENTIALS.iter().enumerate() {
        let (cx, cw) = cols[i % n];
        if i > 0 && i % n == 0 {
            row_y += CARD_HEIGHT + GAP;
        }
        render_essential(&mut p, state, essential, Rect::new(cx, row_y, cw, CARD_HEIGHT), now);
    }
    let height = row_y + CARD_HEIGHT + PAD * 3.0;
    p.end_group();

    let mut out = Painter::new();
    let full = Rect::new(0.0, 0.0, viewport.width, height);
    out.rect(full, ThemeToken::Background, None);
    out.faded(0.2, |p| p.image(full, BASICS_BACKGROUND, "F1 track background"));
    out.extend(p.finish(height).commands);
    out.finish(height)
}

fn weekend_card_height(description: &str, width: f64) -> f64 {
    GAP + 48.0
        + line_height(HEADING_SIZE)
        + line_height(BODY_SIZE + 2.0)
        + 4.0
        + paragraph_height(description, width, SMALL_SIZE)
        + GAP
}

fn render_essential(p: &mut Painter, state: &BasicsState, e: &Essential, card: Rect, now: f64) {
    p.target(
        card,
        ThemeToken::Surface,
        Some(ThemeToken::Border),
        Some(e.title.into()),
        HitTarget::Essential(e.id.into()),
    );
    let overlay = state.reveal.frame_of(&e.id, now);
    let front_alpha = 1.0 - 0.9 * overlay.as_ref().map_or(0.0, |f| f.opacity);
    let cx = card.x + card.w / 2.0;
    let mid = card.y + card.h / 2.0;
    p.faded(front_alpha, |p| {
        p.text(
            cx,
            mid - line_height(HEADING_SIZE),
            e.title.to_uppercase(),
            ThemeToken::TextPrimary,
            HEADING_SIZE,
            TextAlign::Center,
        );
        p.text(cx, mid + 4.0, "Hover to learn", ThemeToken::TextMuted, SMALL_SIZE, TextAlign::Center);
    });

    let Some(frame) = overlay else {
        return;
    };
    p.faded(frame.opacity, |p| {
        p.shifted(0.0, REVEAL_RISE * (1.0 - frame.opacity), |p| {
            p.rect(card, ThemeToken::Accent, None);
            let inner = card.inset(GAP);
            let body_h = paragraph_height(e.info, inner.w, BODY_SIZE);
            let top = card.y + (card.h - body_h - line_height(BODY_SIZE + 4.0) - 8.0) / 2.0;
            p.text(cx, top, e.title, ThemeToken::TextPrimary, BODY_SIZE + 4.0, TextAlign::Center);
            p.paragraph(
                inner.x,
                top + line_height(BODY_SIZE + 4.0) + 8.0,
                inner.w,
                e.info,
                ThemeToken::TextPrimary,
                BODY_SIZE,
                TextAlign::Center,
            );
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_protocol::RenderCommand;

    fn has_text(cmds: &[RenderCommand], needle: &str) -> bool {
        cmds.iter().any(|c| matches!(c, RenderCommand::DrawText { text, .. } if text.contains(needle)))
    }

    #[test]
    fn nothing_revealed_by_default() {
        let state = BasicsState::new();
        assert_eq!(state.essentials().current_key(), None);
        let r = render_basics(&state, &Viewport::new(1280.0, 800.0), 0.0);
        assert!(has_text(&r.commands, "Hover to learn"));
        assert!(!has_text(&r.commands, "20 mechanics"));
    }

    #[test]
    fn hover_reveals_and_leave_hides() {
        let mut state = BasicsState::new();
        assert!(state.reveal("pit-stop", 0.0));
        let vp = Viewport::new(1280.0, 800.0);
        let r = render_basics(&state, &vp, 1.0);
        assert!(has_text(&r.commands, "20 mechanics"));

        assert!(!state.conceal("race-flags", 1.0));
        assert!(state.conceal("pit-stop", 1.0));
        let r = render_basics(&state, &vp, 2.0);
        assert!(!has_text(&r.commands, "20 mechanics"));
    }

    #[test]
    fn every_card_is_a_hover_target() {
        let r = render_basics(&BasicsState::new(), &Viewport::new(1280.0, 800.0), 0.0);
        let targets: Vec<_> = r.commands.iter().filter_map(RenderCommand::hit).collect();
        for e in &ESSENTIALS {
            assert!(targets.contains(&&HitTarget::Essential(e.id.into())));
        }
    }

    #[test]
    fn narrow_viewport_stacks_cards() {
        let state = BasicsState::new();
        let wide = render_basics(&state, &Viewport::new(1280.0, 800.0), 0.0);
        let narrow = render_basics(&state, &Viewport::new(400.0, 800.0), 0.0);
        assert!(narrow.height > wide.height);
    }
}
