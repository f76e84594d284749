use paddock_protocol::{HitTarget, Point, Rect, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, GAP, HEADING_SIZE, PAD, Painter, Rendered, SMALL_SIZE, WIDE, columns,
    content_column, line_height, paragraph_height, section_heading,
};
use crate::animation::{Easing, Presence, PresenceMode};
use crate::data::rules::{FASTEST_LAP_NOTE, QUALIFYING_INTRO, RULES};
use crate::model::{FlagSignal, Penalty, PointsTable, QualifyingStage, RuleBody, RuleSection};
use crate::selection::{Selection, SelectionPolicy};

const BODY_SECS: f64 = 0.3;
const HEADER_HEIGHT: f64 = 76.0;
const STAGE_HEIGHT: f64 = 64.0;
const ARROW_HEIGHT: f64 = 20.0;
const TABLE_ROW: f64 = 32.0;
/// Rows shown individually before the rest of the scoring places are
/// collapsed into one.
const POINTS_ROWS: usize = 5;

/// Single-open accordion.
#[derive(Debug, Clone)]
pub struct RulesState {
    open: Selection<RuleSection>,
    bodies: Presence<&'static str>,
}

impl RulesState {
    pub fn new(now: f64) -> Self {
        let open = Selection::new(&RULES, SelectionPolicy::FIRST_OPEN);
        let mut bodies = Presence::new(PresenceMode::Sync, BODY_SECS, Easing::EaseInOut);
        bodies.set(open.current_key(), now);
        Self { open, bodies }
    }

    pub fn open(&self) -> &Selection<RuleSection> {
        &self.open
    }

    /// Open `id`, or close it if it is the open entry.
    pub fn toggle(&mut self, id: &str, now: f64) -> bool {
        let changed = self.open.toggle(id);
        if changed {
            self.bodies.set(self.open.current_key(), now);
        }
        changed
    }

    pub fn reset(&mut self) {
        self.open.reset();
        self.bodies.show_now(self.open.current_key());
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.bodies.is_animating(now)
    }
}

/// "Rules Explained": one header per rule, the open one followed by its
/// body. Bodies grow and shrink with their presence frame.
pub fn render_rules(state: &RulesState, viewport: &Viewport, now: f64) -> Rendered {
    let (x, width) = content_column(viewport.width, 860.0);

    let mut p = Painter::new();
    p.begin_group("rules", "Rules Explained");
    let mut y = PAD * 3.0;
    y = section_heading(
        &mut p,
        x,
        y,
        width,
        "Rules",
        "Explained",
        Some("The essential regulation handbook, simplified."),
        TextAlign::Center,
    );

    for rule in &RULES {
        let open = state.open.is_selected(rule.id);
        let body_w = width - 2.0 * PAD;
        let full_body = body_height(&rule.body, body_w) + 2.0 * PAD;
        let frame = state.bodies.frame_of(&rule.id, now);
        let reveal = frame.as_ref().map_or(0.0, |f| f.opacity);
        let body_h = full_body * reveal;

        let card = Rect::new(x, y, width, HEADER_HEIGHT + body_h);
        p.rect(card, ThemeToken::Surface, Some(ThemeToken::Border));
        let header = Rect::new(x, y, width, HEADER_HEIGHT);
        p.target(header, ThemeToken::Surface, None, Some(rule.title.into()), HitTarget::RuleHeader(rule.id.into()));
        let icon = Rect::new(x + PAD, y + (HEADER_HEIGHT - 40.0) / 2.0, 40.0, 40.0);
        p.rect(icon, ThemeToken::Background, Some(ThemeToken::Border));
        p.circle(Point::new(icon.x + 20.0, icon.y + 20.0), 8.0, rule.color, None, None);
        p.text(
            icon.right() + GAP,
            y + (HEADER_HEIGHT - line_height(HEADING_SIZE - 2.0)) / 2.0,
            rule.title.to_uppercase(),
            ThemeToken::TextPrimary,
            HEADING_SIZE - 2.0,
            TextAlign::Left,
        );
        p.text(
            header.right() - PAD,
            y + (HEADER_HEIGHT - line_height(HEADING_SIZE)) / 2.0,
            if open { "▴" } else { "▾" },
            ThemeToken::TextMuted,
            HEADING_SIZE,
            TextAlign::Right,
        );

        if let Some(frame) = frame {
            let body = Rect::new(x, y + HEADER_HEIGHT, width, body_h);
            p.line(
                Point::new(body.x, body.y),
                Point::new(body.right(), body.y),
                ThemeToken::Border,
                1.0,
            );
            p.clipped(body, |p| {
                p.faded(frame.opacity, |p| {
                    render_body(p, &rule.body, x + PAD, body.y + PAD, body_w);
                });
            });
        }
        y += card.h + GAP;
    }

    let height = y - GAP + PAD * 3.0;
    p.end_group();
    let mut out = Painter::new();
    out.rect(Rect::new(0.0, 0.0, viewport.width, height), ThemeToken::Background, None);
    out.extend(p.finish(height).commands);
    out.finish(height)
}

fn flag_columns(w: f64) -> usize {
    if w >= WIDE - 2.0 * PAD { 2 } else { 1 }
}

fn flag_card_height(flag: &FlagSignal, w: f64) -> f64 {
    GAP + line_height(BODY_SIZE) + paragraph_height(flag.meaning, w - 3.0 * GAP - 32.0, SMALL_SIZE) + GAP
}

fn penalty_height(penalty: &Penalty, w: f64) -> f64 {
    GAP + line_height(BODY_SIZE) + paragraph_height(penalty.detail, w - 2.0 * GAP, SMALL_SIZE) + GAP
}

fn points_rows(table: &PointsTable) -> usize {
    table.scoring_places().min(POINTS_ROWS) + usize::from(table.scoring_places() > POINTS_ROWS)
}

/// Height of a rule body laid out `w` wide, without padding.
pub fn body_height(body: &RuleBody, w: f64) -> f64 {
    match body {
        RuleBody::Qualifying(stages) => {
            paragraph_height(QUALIFYING_INTRO, w, BODY_SIZE)
                + GAP
                + stages.len() as f64 * STAGE_HEIGHT
                + stages.len().saturating_sub(1) as f64 * ARROW_HEIGHT
        }
        RuleBody::Flags(flags) => {
            let n = flag_columns(w);
            let cols = columns(0.0, w, n);
            flags
                .chunks(n)
                .map(|row| {
                    row.iter()
                        .zip(&cols)
                        .map(|(f, &(_, cw))| flag_card_height(f, cw))
                        .fold(0.0, f64::max)
                })
                .map(|h| h + GAP)
                .sum::<f64>()
                - GAP
        }
        RuleBody::Points(table) => {
            (points_rows(table) + 1) as f64 * TABLE_ROW + line_height(SMALL_SIZE) + GAP
        }
        RuleBody::Penalties(penalties) => {
            penalties.iter().map(|pen| penalty_height(pen, w) + 8.0).sum::<f64>() - 8.0
        }
    }
}

fn render_body(p: &mut Painter, body: &RuleBody, x: f64, y: f64, w: f64) {
    match body {
        RuleBody::Qualifying(stages) => render_qualifying(p, stages, x, y, w),
        RuleBody::Flags(flags) => render_flags(p, flags, x, y, w),
        RuleBody::Points(table) => render_points(p, table, x, y, w),
        RuleBody::Penalties(penalties) => render_penalties(p, penalties, x, y, w),
    }
}

fn render_qualifying(p: &mut Painter, stages: &[QualifyingStage], x: f64, y: f64, w: f64) {
    let mut y = y + p.paragraph(x, y, w, QUALIFYING_INTRO, ThemeToken::TextSecondary, BODY_SIZE, TextAlign::Left);
    y += GAP;
    for (i, stage) in stages.iter().enumerate() {
        if i > 0 {
            p.text(x + w / 2.0, y, "▾", ThemeToken::TextMuted, SMALL_SIZE, TextAlign::Center);
            y += ARROW_HEIGHT;
        }
        let row = Rect::new(x, y, w, STAGE_HEIGHT);
        if stage.decisive {
            p.rect(row, ThemeToken::SurfaceRaised, None);
            p.rect(Rect::new(x, y, 4.0, STAGE_HEIGHT), ThemeToken::Accent, None);
        } else {
            p.rect(row, ThemeToken::Surface, Some(ThemeToken::Border));
        }
        p.text(x + GAP, y + 10.0, stage.name, ThemeToken::TextPrimary, HEADING_SIZE - 2.0, TextAlign::Left);
        p.text(
            x + GAP,
            y + 10.0 + line_height(HEADING_SIZE - 2.0),
            format!("{} Minutes", stage.minutes),
            ThemeToken::TextMuted,
            SMALL_SIZE - 1.0,
            TextAlign::Left,
        );
        p.text(row.right() - GAP, y + 12.0, stage.headline, ThemeToken::TextPrimary, BODY_SIZE, TextAlign::Right);
        let outcome = if stage.decisive { ThemeToken::Success } else { ThemeToken::Accent };
        p.text(
            row.right() - GAP,
            y + 12.0 + line_height(BODY_SIZE),
            stage.outcome,
            outcome,
            SMALL_SIZE,
            TextAlign::Right,
        );
        y += STAGE_HEIGHT;
    }
}

fn render_flags(p: &mut Painter, flags: &[FlagSignal], x: f64, y: f64, w: f64) {
    let n = flag_columns(w);
    let cols = columns(x, w, n);
    let mut row_y = y;
    for row in flags.chunks(n) {
        let row_h = row
            .iter()
            .zip(&cols)
            .map(|(f, &(_, cw))| flag_card_height(f, cw))
            .fold(0.0, f64::max);
        for (flag, &(cx, cw)) in row.iter().zip(&cols) {
            p.rect(Rect::new(cx, row_y, cw, row_h), ThemeToken::Surface, Some(ThemeToken::Border));
            let swatch_w = if flag.badge.is_some() { 32.0 } else { 16.0 };
            let swatch = Rect::new(cx + GAP, row_y + GAP + 2.0, swatch_w, 16.0);
            let border = (flag.color == ThemeToken::FlagBlack).then_some(ThemeToken::Border);
            p.rect(swatch, flag.color, border);
            if let Some(badge) = flag.badge {
                p.text(swatch.x + swatch.w / 2.0, swatch.y, badge, ThemeToken::Background, 10.0, TextAlign::Center);
            }
            let tx = cx + 2.0 * GAP + 32.0;
            p.text(tx, row_y + GAP, flag.name, ThemeToken::TextPrimary, BODY_SIZE, TextAlign::Left);
            p.paragraph(
                tx,
                row_y + GAP + line_height(BODY_SIZE),
                cw - 3.0 * GAP - 32.0,
                flag.meaning,
                ThemeToken::TextSecondary,
                SMALL_SIZE,
                TextAlign::Left,
            );
        }
        row_y += row_h + GAP;
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Rows of the points table as `(position, points)` labels.
pub fn points_table_rows(table: &PointsTable) -> Vec<(String, String)> {
    let places = table.scoring_places();
    let mut rows: Vec<(String, String)> = (1..=places.min(POINTS_ROWS))
        .map(|pos| {
            let label = if pos == 1 {
                format!("{} (Winner)", ordinal(pos))
            } else {
                ordinal(pos)
            };
            (label, format!("{} Pts", table.points_for(pos)))
        })
        .collect();
    if places > POINTS_ROWS {
        let rest: Vec<String> = (POINTS_ROWS + 1..=places)
            .map(|pos| table.points_for(pos).to_string())
            .collect();
        rows.push((
            format!("{} - {}", ordinal(POINTS_ROWS + 1), ordinal(places)),
            rest.join(", "),
        ));
    }
    rows
}

fn render_points(p: &mut Painter, table: &PointsTable, x: f64, y: f64, w: f64) {
    let half = w / 2.0;
    p.rect(Rect::new(x, y, w, TABLE_ROW), ThemeToken::SurfaceRaised, None);
    let cell_y = |row_y: f64| row_y + (TABLE_ROW - line_height(SMALL_SIZE)) / 2.0;
    p.text(x + GAP, cell_y(y), "POSITION", ThemeToken::TextPrimary, SMALL_SIZE, TextAlign::Left);
    p.text(x + half + GAP, cell_y(y), "POINTS", ThemeToken::TextPrimary, SMALL_SIZE, TextAlign::Left);
    let mut row_y = y + TABLE_ROW;
    for (i, (position, points)) in points_table_rows(table).into_iter().enumerate() {
        let (fill, color) = if i == 0 {
            (ThemeToken::SurfaceRaised, ThemeToken::Gold)
        } else {
            (ThemeToken::Surface, ThemeToken::TextSecondary)
        };
        p.rect(Rect::new(x, row_y, w, TABLE_ROW), fill, Some(ThemeToken::Border));
        p.text(x + GAP, cell_y(row_y), position, color, BODY_SIZE - 1.0, TextAlign::Left);
        p.text(x + half + GAP, cell_y(row_y), points, color, BODY_SIZE - 1.0, TextAlign::Left);
        row_y += TABLE_ROW;
    }
    p.circle(
        Point::new(x + GAP, row_y + GAP / 2.0 + line_height(SMALL_SIZE) / 2.0),
        5.0,
        ThemeToken::Success,
        None,
        None,
    );
    p.text(x + 2.0 * GAP, row_y + GAP / 2.0, FASTEST_LAP_NOTE, ThemeToken::TextSecondary, SMALL_SIZE, TextAlign::Left);
}

fn render_penalties(p: &mut Painter, penalties: &[Penalty], x: f64, y: f64, w: f64) {
    let mut y = y;
    for penalty in penalties {
        let h = penalty_height(penalty, w);
        p.rect(Rect::new(x, y, w, h), ThemeToken::Surface, None);
        p.rect(Rect::new(x, y, 2.0, h), penalty.color, None);
        p.text(x + GAP, y + GAP, penalty.name, ThemeToken::TextPrimary, BODY_SIZE, TextAlign::Left);
        p.paragraph(
            x + GAP,
            y + GAP + line_height(BODY_SIZE),
            w - 2.0 * GAP,
            penalty.detail,
            ThemeToken::TextSecondary,
            SMALL_SIZE,
            TextAlign::Left,
        );
        y += h + 8.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rules::POINTS;
    use paddock_protocol::RenderCommand;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn has_text(r: &Rendered, needle: &str) -> bool {
        r.commands
            .iter()
            .any(|c| matches!(c, RenderCommand::DrawText { text, .. } if text.contains(needle)))
    }

    #[test]
    fn first_rule_open_by_default() {
        let state = RulesState::new(0.0);
        assert_eq!(state.open().current_key(), Some("qualifying"));
        let r = render_rules(&state, &vp(), 1.0);
        assert!(has_text(&r, "Top 10 Shootout"));
        assert!(!has_text(&r, "Drive-Through"));
    }

    #[test]
    fn toggle_is_single_open() {
        let mut state = RulesState::new(0.0);
        assert!(state.toggle("penalties", 1.0));
        assert_eq!(state.open().current_key(), Some("penalties"));
        let r = render_rules(&state, &vp(), 2.0);
        assert!(has_text(&r, "Drive-Through"));
        assert!(!has_text(&r, "Top 10 Shootout"));

        assert!(state.toggle("penalties", 2.0));
        assert_eq!(state.open().current_key(), None);
    }

    #[test]
    fn sync_bodies_animate_together() {
        let mut state = RulesState::new(0.0);
        state.toggle("flags", 5.0);
        let r = render_rules(&state, &vp(), 5.1);
        assert!(has_text(&r, "Top 10 Shootout"));
        assert!(has_text(&r, "Yellow Flag"));
        assert!(state.is_animating(5.1));
    }

    #[test]
    fn closed_accordion_is_shorter() {
        let mut state = RulesState::new(0.0);
        let open = render_rules(&state, &vp(), 1.0).height;
        let first = state.open().current_key().unwrap_or_default();
        assert!(state.toggle(first, 1.0));
        assert_eq!(state.open().current_key(), None);
        let closed = render_rules(&state, &vp(), 2.0).height;
        assert!(closed < open);
        let headers = 4.0 * HEADER_HEIGHT + 3.0 * GAP;
        assert!(closed >= headers);
    }

    #[test]
    fn every_header_is_a_target() {
        let r = render_rules(&RulesState::new(0.0), &vp(), 0.0);
        let targets: Vec<_> = r.commands.iter().filter_map(RenderCommand::hit).collect();
        assert_eq!(targets.len(), RULES.len());
    }

    #[test]
    fn points_rows_match_the_table() {
        let rows = points_table_rows(&POINTS);
        assert_eq!(rows[0], ("1st (Winner)".to_string(), "25 Pts".to_string()));
        assert_eq!(rows[2].1, "15 Pts");
        assert_eq!(
            rows.last(),
            Some(&("6th - 10th".to_string(), "8, 6, 4, 2, 1".to_string()))
        );
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }
}
