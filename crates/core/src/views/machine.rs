use paddock_protocol::{HitTarget, Point, Rect, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, GAP, HEADING_SIZE, PAD, Painter, Rendered, SMALL_SIZE, WIDE, columns,
    content_column, line_height, paragraph_height, section_heading,
};
use crate::animation::{Easing, Presence, PresenceMode};
use crate::data::car::{AERO, CAR_IMAGE, CAR_PARTS, TYRES};
use crate::model::{CarPart, TyreCompound};
use crate::selection::{Selection, SelectionPolicy};

const MODAL_SECS: f64 = 0.3;
const HOTSPOT_RADIUS: f64 = 16.0;
const TYRE_RADIUS: f64 = 26.0;
const PANEL_HEIGHT: f64 = 210.0;

/// Car-anatomy hotspot selection and the tyre picker.
#[derive(Debug, Clone)]
pub struct MachineState {
    part: Selection<CarPart>,
    part_modal: Presence<&'static str>,
    tyre: Selection<TyreCompound>,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineState {
    pub fn new() -> Self {
        Self {
            part: Selection::new(&CAR_PARTS, SelectionPolicy::OPTIONAL),
            part_modal: Presence::new(PresenceMode::Wait, MODAL_SECS, Easing::EaseOut),
            tyre: Selection::new(&TYRES, SelectionPolicy::ALWAYS_ONE),
        }
    }

    pub fn part(&self) -> &Selection<CarPart> {
        &self.part
    }

    pub fn tyre(&self) -> &Selection<TyreCompound> {
        &self.tyre
    }

    /// Open the detail card for hotspot `id`.
    pub fn open_part(&mut self, id: &str, now: f64) -> bool {
        let changed = self.part.select(id);
        if changed {
            self.part_modal.set(self.part.current_key(), now);
        }
        changed
    }

    pub fn close_part(&mut self, now: f64) -> bool {
        let changed = self.part.clear();
        if changed {
            self.part_modal.set(None, now);
        }
        changed
    }

    pub fn select_tyre(&mut self, name: &str) -> bool {
        self.tyre.select(name)
    }

    pub fn reset(&mut self) {
        self.part.reset();
        self.part_modal.show_now(None);
        self.tyre.reset();
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.part_modal.is_animating(now)
    }
}

/// "The Machine": anatomy image with hotspots, tyre picker and aero notes.
pub fn render_machine(state: &MachineState, viewport: &Viewport, now: f64) -> Rendered {
    let (x, width) = content_column(viewport.width, 1000.0);
    let wide = width >= WIDE;

    let mut p = Painter::new();
    p.begin_group("machine", "The Machine");
    let mut y = PAD * 3.0;
    y = section_heading(
        &mut p,
        x,
        y,
        width,
        "The",
        "Machine",
        Some("Engineering excellence."),
        TextAlign::Center,
    );

    // Anatomy panel
    let aspect = if wide { 0.5 } else { 9.0 / 16.0 };
    let title_h = line_height(HEADING_SIZE) + GAP;
    let image = Rect::new(x + GAP, y + GAP + title_h, width - 2.0 * GAP, (width - 2.0 * GAP) * aspect);
    let panel = Rect::new(x, y, width, image.bottom() - y + GAP);
    p.rect(panel, ThemeToken::Surface, Some(ThemeToken::Border));
    p.text(
        x + GAP,
        y + GAP,
        "Interactive Anatomy",
        ThemeToken::TextPrimary,
        HEADING_SIZE,
        TextAlign::Left,
    );
    p.rect(image, ThemeToken::Background, None);
    p.faded(0.8, |p| p.image(image, CAR_IMAGE, "F1 car anatomy"));
    for part in &CAR_PARTS {
        let center = Point::new(
            image.x + image.w * part.x / 100.0,
            image.y + image.h * part.y / 100.0,
        );
        p.circle(center, HOTSPOT_RADIUS + 6.0, ThemeToken::HotspotRing, None, None);
        p.circle(
            center,
            HOTSPOT_RADIUS,
            ThemeToken::Hotspot,
            Some(ThemeToken::TextPrimary),
            Some(HitTarget::CarPart(part.id.into())),
        );
        p.text(center.x, center.y - line_height(SMALL_SIZE) / 2.0, "+", ThemeToken::TextPrimary, SMALL_SIZE, TextAlign::Center);
    }
    render_part_modal(&mut p, state, image, now);
    y = panel.bottom() + 8.0;
    p.text(
        x + width / 2.0,
        y,
        "Tap markers to explore.",
        ThemeToken::TextMuted,
        SMALL_SIZE,
        TextAlign::Center,
    );
    y += line_height(SMALL_SIZE) + 3.0 * GAP;

    // Tyres and aero, side by side when there's room.
    let cols = columns(x, width, if wide { 2 } else { 1 });
    let (tx, tw) = cols[0];
    let tyres_bottom = render_tyres(&mut p, state, tx, y, tw);
    let (ax, aw, ay) = match cols.get(1) {
        Some(&(ax, aw)) => (ax, aw, y),
        None => (tx, tw, tyres_bottom + 2.0 * GAP),
    };
    let aero_bottom = render_aero(&mut p, ax, ay, aw);

    let height = tyres_bottom.max(aero_bottom) + PAD * 3.0;
    p.end_group();
    let mut out = Painter::new();
    out.rect(Rect::new(0.0, 0.0, viewport.width, height), ThemeToken::Background, None);
    out.extend(p.finish(height).commands);
    out.finish(height)
}

fn render_part_modal(p: &mut Painter, state: &MachineState, image: Rect, now: f64) {
    for frame in state.part_modal.frames(now) {
        let Some(part) = CAR_PARTS.iter().find(|c| c.id == frame.key) else {
            continue;
        };
        p.faded(frame.opacity, |p| {
            p.target(image, ThemeToken::Backdrop, None, None, HitTarget::PartBackdrop);
            let card_w = (image.w - 2.0 * GAP).min(420.0);
            let text_w = card_w - 2.0 * PAD;
            let card_h = PAD * 2.0
                + line_height(HEADING_SIZE)
                + 8.0
                + paragraph_height(part.description, text_w, BODY_SIZE);
            let card = Rect::new(
                image.x + (image.w - card_w) / 2.0,
                image.y + (image.h - card_h) / 2.0,
                card_w,
                card_h,
            );
            p.target(card, ThemeToken::SurfaceRaised, Some(ThemeToken::Border), None, HitTarget::ModalSurface);
            let close = Rect::new(card.right() - PAD - 16.0, card.y + 12.0, 28.0, 28.0);
            p.target(close, ThemeToken::SurfaceRaised, None, Some("Close".into()), HitTarget::PartClose);
            p.text(close.x + 14.0, close.y + 2.0, "×", ThemeToken::TextSecondary, HEADING_SIZE - 4.0, TextAlign::Center);
            p.text(card.x + PAD, card.y + PAD, part.label, ThemeToken::Accent, HEADING_SIZE, TextAlign::Left);
            p.paragraph(
                card.x + PAD,
                card.y + PAD + line_height(HEADING_SIZE) + 8.0,
                text_w,
                part.description,
                ThemeToken::TextSecondary,
                BODY_SIZE,
                TextAlign::Left,
            );
        });
    }
}

fn render_tyres(p: &mut Painter, state: &MachineState, x: f64, y: f64, w: f64) -> f64 {
    p.circle(Point::new(x + 10.0, y + line_height(HEADING_SIZE) / 2.0), 8.0, ThemeToken::TyreSoft, None, None);
    p.text(x + 28.0, y, "Tyres", ThemeToken::TextPrimary, HEADING_SIZE, TextAlign::Left);
    let panel = Rect::new(x, y + line_height(HEADING_SIZE) + GAP, w, PANEL_HEIGHT);
    p.rect(panel, ThemeToken::Surface, Some(ThemeToken::Border));

    let tray = Rect::new(panel.x + PAD, panel.y + PAD, panel.w - 2.0 * PAD, TYRE_RADIUS * 2.0 + GAP);
    p.rect(tray, ThemeToken::Background, None);
    let spacing = TYRE_RADIUS * 2.0 + GAP;
    let first = tray.x + tray.w / 2.0 - spacing * (TYRES.len() as f64 - 1.0) / 2.0;
    for (i, tyre) in TYRES.iter().enumerate() {
        let active = state.tyre.is_selected(tyre.name);
        let center = Point::new(first + i as f64 * spacing, tray.y + tray.h / 2.0);
        let radius = if active { TYRE_RADIUS * 1.1 } else { TYRE_RADIUS };
        p.faded(if active { 1.0 } else { 0.5 }, |p| {
            p.circle(
                center,
                radius,
                ThemeToken::SurfaceRaised,
                Some(tyre.color),
                Some(HitTarget::Tyre(tyre.name.into())),
            );
        });
    }

    if let Some(tyre) = state.tyre.current() {
        let cx = panel.x + panel.w / 2.0;
        let ty = tray.bottom() + 2.0 * GAP;
        p.text(cx, ty, tyre.name, tyre.color, HEADING_SIZE + 2.0, TextAlign::Center);
        p.paragraph(
            panel.x + PAD,
            ty + line_height(HEADING_SIZE + 2.0) + 4.0,
            panel.w - 2.0 * PAD,
            tyre.usage_note,
            ThemeToken::TextSecondary,
            BODY_SIZE,
            TextAlign::Center,
        );
    }
    panel.bottom()
}

fn render_aero(p: &mut Painter, x: f64, y: f64, w: f64) -> f64 {
    p.text(x, y, "Aero", ThemeToken::TextPrimary, HEADING_SIZE, TextAlign::Left);
    let mut cy = y + line_height(HEADING_SIZE) + GAP;
    for concept in &AERO {
        let h = GAP * 2.0
            + line_height(BODY_SIZE)
            + paragraph_height(concept.note, w - 2.0 * GAP - 4.0, SMALL_SIZE);
        let card = Rect::new(x, cy, w, h);
        p.rect(card, ThemeToken::Surface, None);
        p.rect(Rect::new(x, cy, 4.0, h), concept.color, None);
        p.text(x + GAP + 4.0, cy + GAP, concept.title, ThemeToken::TextPrimary, BODY_SIZE, TextAlign::Left);
        p.paragraph(
            x + GAP + 4.0,
            cy + GAP + line_height(BODY_SIZE),
            w - 2.0 * GAP - 4.0,
            concept.note,
            ThemeToken::TextSecondary,
            SMALL_SIZE,
            TextAlign::Left,
        );
        cy += h + GAP;
    }
    cy
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_protocol::RenderCommand;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn targets(r: &Rendered) -> Vec<HitTarget> {
        r.commands.iter().filter_map(RenderCommand::hit).cloned().collect()
    }

    #[test]
    fn defaults() {
        let state = MachineState::new();
        assert_eq!(state.part().current_key(), None);
        assert_eq!(state.tyre().current_key(), Some("Soft"));
    }

    #[test]
    fn hotspots_and_tyres_are_targets() {
        let t = targets(&render_machine(&MachineState::new(), &vp(), 0.0));
        assert!(t.contains(&HitTarget::CarPart("front-wing".into())));
        assert!(t.contains(&HitTarget::Tyre("Hard".into())));
        assert!(!t.contains(&HitTarget::PartBackdrop));
    }

    #[test]
    fn modal_opens_and_closes() {
        let mut state = MachineState::new();
        assert!(state.open_part("halo", 0.0));
        let open = render_machine(&state, &vp(), 1.0);
        let t = targets(&open);
        assert!(t.contains(&HitTarget::PartBackdrop));
        assert!(t.contains(&HitTarget::PartClose));
        assert!(open.commands.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text == "Titanium bar protecting the head."
        )));

        assert!(state.close_part(1.0));
        assert!(!state.close_part(1.0));
        let closed = render_machine(&state, &vp(), 2.0);
        assert!(!targets(&closed).contains(&HitTarget::PartBackdrop));
    }

    #[test]
    fn unknown_part_is_ignored() {
        let mut state = MachineState::new();
        assert!(!state.open_part("engine", 0.0));
        assert_eq!(state.part().current_key(), None);
    }

    #[test]
    fn tyre_never_goes_empty() {
        let mut state = MachineState::new();
        assert!(state.select_tyre("Medium"));
        assert!(!state.select_tyre("Intermediate"));
        assert_eq!(state.tyre().current_key(), Some("Medium"));
        state.reset();
        assert_eq!(state.tyre().current_key(), Some("Soft"));
    }
}
