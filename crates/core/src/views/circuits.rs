use paddock_protocol::{HitTarget, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, GAP, HEADING_SIZE, PAD, Painter, Rendered, SMALL_SIZE, WIDE, bar_heading, columns,
    content_column, line_height, paragraph_height, section_heading,
};
use crate::animation::{Easing, Phase, Presence, PresenceMode, TrackAnimator, TrackFrame};
use crate::data::tracks::{self, TRACKS};
use crate::geometry::TrackShape;
use crate::model::Track;
use crate::selection::{Selection, SelectionPolicy};

const PANEL_SECS: f64 = 0.3;
const PANEL_SLIDE: f64 = 20.0;
const ITEM_HEIGHT: f64 = 72.0;
const MAP_MIN_HEIGHT: f64 = 300.0;
const STAT_HEIGHT: f64 = 72.0;

const BASE_WIDTH: f64 = 8.0;
const OUTLINE_WIDTH: f64 = 2.0;
const SWEEP_WIDTH: f64 = 4.0;

/// Track list selection and the map animation it drives.
#[derive(Debug, Clone)]
pub struct CircuitsState {
    track: Selection<Track>,
    panel: Presence<&'static str>,
    animator: TrackAnimator,
}

impl CircuitsState {
    pub fn new(now: f64) -> Self {
        let track = Selection::new(&TRACKS, SelectionPolicy::ALWAYS_ONE);
        let mut panel = Presence::new(PresenceMode::Wait, PANEL_SECS, Easing::EaseInOut);
        panel.set(track.current_key(), now);
        Self {
            track,
            panel,
            animator: TrackAnimator::new(now),
        }
    }

    pub fn track(&self) -> &Selection<Track> {
        &self.track
    }

    pub fn animator(&self) -> &TrackAnimator {
        &self.animator
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.animator.set_reduced_motion(reduced);
    }

    /// Select track `id`. The map animation restarts only when the
    /// selection actually changes, timed to when the new panel appears.
    pub fn select_track(&mut self, id: &str, now: f64) -> bool {
        if !self.track.select(id) {
            return false;
        }
        self.panel.set(self.track.current_key(), now);
        let start = self.panel.enter_start().unwrap_or(now);
        self.animator.restart(start);
        true
    }

    pub fn reset(&mut self, now: f64) {
        self.track.reset();
        self.panel.show_now(self.track.current_key());
        self.animator.restart(now);
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.panel.is_animating(now) || self.animator.is_animating(now)
    }
}

/// "Iconic Circuits": track list beside the selected track's details and
/// animated map.
pub fn render_circuits(state: &CircuitsState, viewport: &Viewport, now: f64) -> Rendered {
    let (x, width) = content_column(viewport.width, 1200.0);
    let wide = width >= WIDE;

    let mut p = Painter::new();
    p.begin_group("circuits", "Iconic Circuits");
    let mut y = PAD * 3.0;
    y = section_heading(
        &mut p,
        x,
        y,
        width,
        "Iconic",
        "Circuits",
        Some("Where history is made, one lap at a time."),
        TextAlign::Left,
    );

    let (list, detail) = if wide {
        let list_w = (width - 2.0 * GAP) / 3.0;
        ((x, list_w), (x + list_w + 2.0 * GAP, width - list_w - 2.0 * GAP))
    } else {
        ((x, width), (x, width))
    };
    let list_bottom = render_list(&mut p, state, list.0, y, list.1);
    let detail_y = if wide { y } else { list_bottom + 2.0 * GAP };
    let panel_h = TRACKS
        .iter()
        .map(|t| detail_height(t, detail.1))
        .fold(0.0, f64::max);

    for frame in state.panel.frames(now) {
        let Some(track) = TRACKS.iter().find(|t| t.id == frame.key) else {
            continue;
        };
        let (dy, map) = match frame.phase {
            Phase::Exiting => (-PANEL_SLIDE * frame.progress, None),
            _ => (
                PANEL_SLIDE * (1.0 - frame.progress),
                Some(state.animator.frame(now)),
            ),
        };
        let panel = Rect::new(detail.0, detail_y, detail.1, panel_h);
        p.faded(frame.opacity, |p| {
            p.shifted(0.0, dy, |p| render_detail(p, track, panel, map));
        });
    }

    let height = (detail_y + panel_h).max(list_bottom) + PAD * 3.0;
    p.end_group();
    let mut out = Painter::new();
    out.rect(Rect::new(0.0, 0.0, viewport.width, height), ThemeToken::Background, None);
    out.extend(p.finish(height).commands);
    out.finish(height)
}

fn render_list(p: &mut Painter, state: &CircuitsState, x: f64, y: f64, w: f64) -> f64 {
    let mut iy = y;
    for track in &TRACKS {
        let active = state.track.is_selected(track.id);
        // Selected entry is nudged right.
        let nudge = if active { 8.0 } else { 0.0 };
        let rect = Rect::new(x + nudge, iy, w - nudge, ITEM_HEIGHT);
        let (fill, border, name, sub) = if active {
            (ThemeToken::Accent, ThemeToken::Accent, ThemeToken::TextPrimary, ThemeToken::TextPrimary)
        } else {
            (ThemeToken::Surface, ThemeToken::Border, ThemeToken::TextSecondary, ThemeToken::TextMuted)
        };
        p.target(rect, fill, Some(border), Some(track.name.into()), HitTarget::TrackItem(track.id.into()));
        p.text(rect.x + PAD, rect.y + 14.0, track.name, name, BODY_SIZE + 2.0, TextAlign::Left);
        p.text(rect.x + PAD, rect.y + 14.0 + line_height(BODY_SIZE + 2.0), track.location, sub, SMALL_SIZE, TextAlign::Left);
        if active {
            p.text(rect.right() - PAD, rect.y + 14.0, "→", name, BODY_SIZE + 2.0, TextAlign::Right);
        }
        iy += ITEM_HEIGHT + 8.0;
    }
    iy - 8.0
}

fn header_height() -> f64 {
    line_height(HEADING_SIZE + 8.0) + line_height(BODY_SIZE) + 2.0 * GAP
}

fn body_columns(panel_inner_w: f64) -> usize {
    if panel_inner_w >= 560.0 { 2 } else { 1 }
}

fn text_block_height(track: &Track, w: f64) -> f64 {
    let corners: f64 = track
        .corners
        .iter()
        .map(|c| line_height(BODY_SIZE) + paragraph_height(c.info, w, SMALL_SIZE) + 8.0)
        .sum();
    paragraph_height(track.description, w, BODY_SIZE)
        + GAP
        + line_height(HEADING_SIZE)
        + GAP
        + corners
}

fn detail_height(track: &Track, w: f64) -> f64 {
    let inner_w = w - 2.0 * PAD;
    let body = match body_columns(inner_w) {
        1 => MAP_MIN_HEIGHT + 2.0 * GAP + text_block_height(track, inner_w),
        _ => {
            let col_w = (inner_w - GAP) / 2.0;
            MAP_MIN_HEIGHT.max(text_block_height(track, col_w))
        }
    };
    2.0 * PAD + header_height() + STAT_HEIGHT + 2.0 * GAP + body
}

fn render_detail(p: &mut Painter, track: &'static Track, panel: Rect, map: Option<TrackFrame>) {
    p.rect(panel, ThemeToken::Surface, Some(ThemeToken::Border));
    let inner = panel.inset(PAD);
    let mut y = inner.y;
    p.text(inner.x, y, track.name.to_uppercase(), ThemeToken::TextPrimary, HEADING_SIZE + 8.0, TextAlign::Left);
    y += line_height(HEADING_SIZE + 8.0);
    p.text(inner.x, y, track.location, ThemeToken::Accent, BODY_SIZE, TextAlign::Left);
    y += line_height(BODY_SIZE) + GAP;
    p.line(Point::new(inner.x, y), Point::new(inner.right(), y), ThemeToken::Border, 1.0);
    y += GAP;

    let stats = [
        (track.length_label(), "Length", ThemeToken::InfoBlue),
        (track.turn_count.to_string(), "Turns", ThemeToken::FlagYellow),
        (track.lap_record.to_string(), "Record", ThemeToken::Success),
    ];
    for ((value, label, color), (sx, sw)) in stats.into_iter().zip(columns(inner.x, inner.w, 3)) {
        let cell = Rect::new(sx, y, sw, STAT_HEIGHT);
        p.rect(cell, ThemeToken::Background, Some(ThemeToken::Border));
        p.rect(Rect::new(cell.x, cell.y, cell.w, 3.0), color, None);
        p.text(cell.x + cell.w / 2.0, cell.y + 14.0, value, ThemeToken::TextPrimary, BODY_SIZE + 2.0, TextAlign::Center);
        p.text(
            cell.x + cell.w / 2.0,
            cell.y + 14.0 + line_height(BODY_SIZE + 2.0),
            label.to_uppercase(),
            ThemeToken::TextMuted,
            SMALL_SIZE,
            TextAlign::Center,
        );
    }
    y += STAT_HEIGHT + 2.0 * GAP;

    let (map_rect, text_x, text_y, text_w) = if body_columns(inner.w) == 2 {
        let cols = columns(inner.x, inner.w, 2);
        let (mx, mw) = cols[0];
        let (tx, tw) = cols[1];
        let map_h = (inner.bottom() - y).max(MAP_MIN_HEIGHT);
        (Rect::new(mx, y, mw, map_h), tx, y, tw)
    } else {
        (
            Rect::new(inner.x, y, inner.w, MAP_MIN_HEIGHT),
            inner.x,
            y + MAP_MIN_HEIGHT + 2.0 * GAP,
            inner.w,
        )
    };
    p.rect(map_rect, ThemeToken::Background, Some(ThemeToken::Border));
    render_map(p, track, map_rect.inset(GAP), map);

    let mut ty = text_y;
    ty += p.paragraph(text_x, ty, text_w, track.description, ThemeToken::TextSecondary, BODY_SIZE, TextAlign::Left);
    ty += GAP;
    ty = bar_heading(p, text_x, ty, "Famous Corners");
    for corner in track.corners {
        p.text(text_x, ty, corner.name, ThemeToken::Accent, BODY_SIZE, TextAlign::Left);
        ty += line_height(BODY_SIZE);
        ty += p.paragraph(text_x, ty, text_w, corner.info, ThemeToken::TextMuted, SMALL_SIZE, TextAlign::Left);
        ty += 8.0;
    }
}

/// Draw the outline into `area`. `frame` is `None` for a panel on its way
/// out, which keeps its fully drawn outline and drops the sweep.
pub fn render_map(p: &mut Painter, track: &Track, area: Rect, frame: Option<TrackFrame>) {
    match tracks::shape(track.id) {
        Some(Ok(shape)) => p.extend(track_map_commands(shape, area, frame)),
        _ => {
            p.text(
                area.x + area.w / 2.0,
                area.y + area.h / 2.0,
                "Track map unavailable",
                ThemeToken::TextMuted,
                SMALL_SIZE,
                TextAlign::Center,
            );
        }
    }
}

/// Polylines for one sampled animation frame of `shape` fitted to `area`.
pub fn track_map_commands(shape: &TrackShape, area: Rect, frame: Option<TrackFrame>) -> Vec<RenderCommand> {
    let fit = shape.fit(area);
    let (drawn, base_opacity, sweep) = match frame {
        Some(f) => (f.drawn, f.base_opacity, f.sweep),
        None => (1.0, 1.0, None),
    };
    let mut cmds = Vec::with_capacity(6);
    let visible = if drawn >= 1.0 {
        shape.points().to_vec()
    } else {
        shape.slice(0.0, drawn)
    };
    let closed = drawn >= 1.0 && shape.is_closed();
    if visible.len() >= 2 {
        let points = fit.apply_all(&visible);
        cmds.push(RenderCommand::PushOpacity { alpha: base_opacity });
        cmds.push(RenderCommand::DrawPolyline {
            points: points.clone(),
            color: ThemeToken::TrackBase,
            width: BASE_WIDTH * fit.scale,
            closed,
        });
        cmds.push(RenderCommand::PopOpacity);
        cmds.push(RenderCommand::DrawPolyline {
            points,
            color: ThemeToken::TrackOutline,
            width: OUTLINE_WIDTH * fit.scale,
            closed,
        });
    }
    if let Some((from, to)) = sweep {
        let segment = shape.slice(from, to);
        if segment.len() >= 2 {
            cmds.push(RenderCommand::DrawPolyline {
                points: fit.apply_all(&segment),
                color: ThemeToken::TrackSweep,
                width: SWEEP_WIDTH * fit.scale,
                closed: false,
            });
        }
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn polylines(r: &Rendered) -> Vec<(ThemeToken, usize)> {
        r.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawPolyline { color, points, .. } => Some((*color, points.len())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn monaco_is_selected_first() {
        let state = CircuitsState::new(0.0);
        assert_eq!(state.track().current_key(), Some("monaco"));
        let r = render_circuits(&state, &vp(), 0.5);
        assert!(r.commands.iter().filter_map(RenderCommand::hit).count() >= TRACKS.len());
    }

    #[test]
    fn map_draws_in_then_sweeps() {
        let state = CircuitsState::new(0.0);
        let drawing = polylines(&render_circuits(&state, &vp(), 0.75));
        assert!(drawing.iter().any(|(c, _)| *c == ThemeToken::TrackBase));
        assert!(!drawing.iter().any(|(c, _)| *c == ThemeToken::TrackSweep));

        let sweeping = polylines(&render_circuits(&state, &vp(), 4.0));
        assert!(sweeping.iter().any(|(c, _)| *c == ThemeToken::TrackSweep));
    }

    #[test]
    fn reselecting_the_same_track_keeps_the_animation() {
        let mut state = CircuitsState::new(0.0);
        let generation = state.animator().generation();
        assert!(!state.select_track("monaco", 5.0));
        assert_eq!(state.animator().generation(), generation);
    }

    #[test]
    fn switching_track_restarts_without_old_sweep() {
        let mut state = CircuitsState::new(0.0);
        assert!(state.select_track("monza", 20.0));
        // Old panel is leaving: full outline, no sweep.
        let leaving = polylines(&render_circuits(&state, &vp(), 20.1));
        assert!(!leaving.iter().any(|(c, _)| *c == ThemeToken::TrackSweep));
        // New panel draws in from the moment it appears.
        let f = state.animator().frame(20.3);
        assert_eq!(f.drawn, 0.0);
        assert!(state.animator().frame(20.3 + 1.5 + 0.1).sweep.is_some());
    }

    #[test]
    fn reduced_motion_draws_final_outline() {
        let mut state = CircuitsState::new(0.0);
        state.set_reduced_motion(true);
        let lines = polylines(&render_circuits(&state, &vp(), 0.5));
        assert!(!lines.iter().any(|(c, _)| *c == ThemeToken::TrackSweep));
        let full = tracks::shape("monaco")
            .and_then(|s| s.as_ref().ok())
            .map(|s| s.points().len());
        assert!(lines.iter().any(|&(c, n)| c == ThemeToken::TrackOutline && Some(n) == full));
    }

    #[test]
    fn narrow_layout_stacks_list_above_detail() {
        let state = CircuitsState::new(0.0);
        let wide = render_circuits(&state, &vp(), 0.0);
        let narrow = render_circuits(&state, &Viewport::new(420.0, 800.0), 0.0);
        assert!(narrow.height > wide.height);
    }
}
