use paddock_protocol::{HitTarget, Point, Rect, TextAlign, ThemeToken, Viewport};

use super::common::{
    BODY_SIZE, GAP, HEADING_SIZE, PAD, Painter, Rendered, SMALL_SIZE, TITLE_SIZE, WIDE, columns,
    content_column, line_height, section_heading, text_width, wrap_text,
};
use crate::animation::{Easing, Phase, Presence, PresenceMode};
use crate::data::teams::{STATS_AS_OF, TEAMS};
use crate::model::{Driver, Team};
use crate::selection::{Selection, SelectionPolicy};

const TEAM_PANEL_SECS: f64 = 0.4;
const MODAL_SECS: f64 = 0.3;
/// Horizontal slide of the team panel: enters from the right, exits left.
const PANEL_SLIDE: f64 = 20.0;
const TAB_HEIGHT: f64 = 44.0;
const DRIVER_CARD_HEIGHT: f64 = 240.0;
const BIO_LINES: usize = 3;

/// Team tabs plus the driver stats modal.
///
/// The modal's item list is always the active team's drivers; switching
/// teams rebinds it, which closes the modal unless the driver is shared.
#[derive(Debug, Clone)]
pub struct GridState {
    team: Selection<Team>,
    team_panel: Presence<&'static str>,
    driver: Selection<Driver>,
    driver_modal: Presence<&'static str>,
}

impl GridState {
    pub fn new(now: f64) -> Self {
        let team = Selection::new(&TEAMS, SelectionPolicy::ALWAYS_ONE);
        let drivers = team.current().map_or(&[][..], |t| t.drivers);
        let mut team_panel = Presence::new(PresenceMode::Wait, TEAM_PANEL_SECS, Easing::EaseInOut);
        team_panel.set(team.current_key(), now);
        Self {
            team,
            team_panel,
            driver: Selection::new(drivers, SelectionPolicy::OPTIONAL),
            driver_modal: Presence::new(PresenceMode::Wait, MODAL_SECS, Easing::EaseOut),
        }
    }

    pub fn team(&self) -> &Selection<Team> {
        &self.team
    }

    pub fn driver(&self) -> &Selection<Driver> {
        &self.driver
    }

    pub fn select_team(&mut self, id: &str, now: f64) -> bool {
        if !self.team.select(id) {
            return false;
        }
        let drivers = self.team.current().map_or(&[][..], |t| t.drivers);
        self.driver.rebind(drivers);
        self.team_panel.set(self.team.current_key(), now);
        self.driver_modal.set(self.driver.current_key(), now);
        tracing::debug!(team = id, "team selected");
        true
    }

    pub fn open_driver(&mut self, id: &str, now: f64) -> bool {
        let changed = self.driver.select(id);
        if changed {
            self.driver_modal.set(self.driver.current_key(), now);
        }
        changed
    }

    pub fn close_driver(&mut self, now: f64) -> bool {
        let changed = self.driver.clear();
        if changed {
            self.driver_modal.set(None, now);
        }
        changed
    }

    pub fn reset(&mut self) {
        self.team.reset();
        let drivers = self.team.current().map_or(&[][..], |t| t.drivers);
        self.driver.rebind(drivers);
        self.driver.reset();
        self.team_panel.show_now(self.team.current_key());
        self.driver_modal.show_now(None);
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.team_panel.is_animating(now) || self.driver_modal.is_animating(now)
    }
}

fn team_by_id(id: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.id == id)
}

/// "The Grid": team tabs, the active team's panel, driver stats modal.
pub fn render_grid(state: &GridState, viewport: &Viewport, now: f64) -> Rendered {
    let (x, width) = content_column(viewport.width, 1100.0);
    let wide = width >= WIDE;

    let mut p = Painter::new();
    p.begin_group("grid", "The Grid");
    let mut y = PAD * 3.0;
    y = section_heading(
        &mut p,
        x,
        y,
        width,
        "The",
        "Grid",
        Some("Ten teams, twenty drivers. The best in the world fighting for tenths of a second."),
        TextAlign::Center,
    );

    y = render_tabs(&mut p, state, x, y, width) + 2.0 * GAP;

    let panel_h = team_panel_height(wide);
    for frame in state.team_panel.frames(now) {
        let Some(team) = team_by_id(frame.key) else {
            continue;
        };
        let dx = match frame.phase {
            Phase::Exiting => -PANEL_SLIDE * frame.progress,
            _ => PANEL_SLIDE * (1.0 - frame.progress),
        };
        p.faded(frame.opacity, |p| {
            p.shifted(dx, 0.0, |p| render_team_panel(p, team, Rect::new(x, y, width, panel_h), wide));
        });
    }
    let height = y + panel_h + PAD * 3.0;
    let section = Rect::new(0.0, 0.0, viewport.width, height);
    render_driver_modal(&mut p, state, section, now);
    p.end_group();

    let mut out = Painter::new();
    out.rect(section, ThemeToken::Background, None);
    out.extend(p.finish(height).commands);
    out.finish(height)
}

fn render_tabs(p: &mut Painter, state: &GridState, x: f64, y: f64, width: f64) -> f64 {
    let widths: Vec<f64> = TEAMS
        .iter()
        .map(|t| text_width(t.name, BODY_SIZE) + 2.0 * PAD)
        .collect();
    // Lay tabs out in centred rows, wrapping like a flex row.
    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let mut row_w = 0.0;
    for (i, &w) in widths.iter().enumerate() {
        let needed = if row_w > 0.0 { row_w + GAP + w } else { w };
        if needed > width && row_w > 0.0 {
            rows.push(Vec::new());
            row_w = w;
        } else {
            row_w = needed;
        }
        if let Some(row) = rows.last_mut() {
            row.push(i);
        }
    }

    let mut ty = y;
    for row in rows {
        let total: f64 = row.iter().map(|&i| widths[i]).sum::<f64>() + GAP * (row.len().max(1) - 1) as f64;
        let mut tx = x + (width - total) / 2.0;
        for i in row {
            let team = &TEAMS[i];
            let active = state.team.is_selected(team.id);
            let rect = Rect::new(tx, ty, widths[i], TAB_HEIGHT);
            let (fill, border, text) = if active {
                (team.color, None, ThemeToken::TextPrimary)
            } else {
                (ThemeToken::TabIdle, Some(ThemeToken::Border), ThemeToken::TextSecondary)
            };
            p.target(rect, fill, border, Some(team.name.into()), HitTarget::TeamTab(team.id.into()));
            p.text(
                rect.x + rect.w / 2.0,
                rect.y + (TAB_HEIGHT - line_height(BODY_SIZE)) / 2.0,
                team.name,
                text,
                BODY_SIZE,
                TextAlign::Center,
            );
            tx += widths[i] + GAP;
        }
        ty += TAB_HEIGHT + GAP;
    }
    ty - GAP
}

fn team_header_height() -> f64 {
    line_height(TITLE_SIZE) + 8.0 + line_height(SMALL_SIZE) + 2.0 * GAP
}

fn team_panel_height(wide: bool) -> f64 {
    let rows = if wide { 1.0 } else { 2.0 };
    2.0 * PAD + team_header_height() + rows * DRIVER_CARD_HEIGHT + (rows - 1.0) * GAP
}

fn render_team_panel(p: &mut Painter, team: &'static Team, panel: Rect, wide: bool) {
    p.rect(panel, ThemeToken::Surface, Some(ThemeToken::Border));
    let inner = panel.inset(PAD);
    p.text(
        inner.x,
        inner.y,
        team.name.to_uppercase(),
        team.color,
        TITLE_SIZE,
        TextAlign::Left,
    );
    p.text(
        inner.x,
        inner.y + line_height(TITLE_SIZE) + 8.0,
        format!("Base: {}    Boss: {}", team.base, team.principal),
        ThemeToken::TextSecondary,
        SMALL_SIZE,
        TextAlign::Left,
    );
    let logo = Rect::new(inner.right() - 120.0, inner.y + 8.0, 120.0, 40.0);
    p.rect(logo, ThemeToken::SurfaceRaised, Some(ThemeToken::Border));
    p.image(logo, team.logo, "Team Logo");

    let divider_y = inner.y + team_header_height() - GAP;
    p.line(
        Point::new(inner.x, divider_y),
        Point::new(inner.right(), divider_y),
        ThemeToken::Border,
        1.0,
    );

    let cards_y = inner.y + team_header_height();
    let cols = columns(inner.x, inner.w, if wide { 2 } else { 1 });
    for (i, driver) in team.drivers.iter().enumerate() {
        let (cx, cw) = cols[i % cols.len()];
        let cy = cards_y + (i / cols.len()) as f64 * (DRIVER_CARD_HEIGHT + GAP);
        render_driver_card(p, team, driver, Rect::new(cx, cy, cw, DRIVER_CARD_HEIGHT));
    }
}

fn render_driver_card(p: &mut Painter, team: &Team, driver: &'static Driver, card: Rect) {
    p.target(
        card,
        ThemeToken::Background,
        Some(ThemeToken::Border),
        Some(driver.name.into()),
        HitTarget::DriverCard(driver.id.into()),
    );
    let photo = Rect::new(card.x, card.y, card.w / 2.0, card.h);
    p.faded(0.5, |p| p.image(photo, driver.portrait, driver.name));
    p.faded(0.1, |p| {
        p.text(
            photo.x + GAP,
            photo.y + GAP,
            driver.number.to_string(),
            ThemeToken::TextPrimary,
            TITLE_SIZE * 1.5,
            TextAlign::Left,
        );
    });

    let info_x = photo.right() + GAP;
    let info_w = card.right() - info_x - GAP;
    let mut y = card.y + PAD;
    p.text(info_x, y, driver.country, ThemeToken::TextMuted, SMALL_SIZE, TextAlign::Left);
    y += line_height(SMALL_SIZE) + 4.0;
    p.text(info_x, y, driver.name, ThemeToken::TextPrimary, HEADING_SIZE, TextAlign::Left);
    y += line_height(HEADING_SIZE) + 4.0;
    let mut bio = wrap_text(driver.bio, info_w, SMALL_SIZE);
    if bio.len() > BIO_LINES {
        bio.truncate(BIO_LINES);
        if let Some(last) = bio.last_mut() {
            last.push('…');
        }
    }
    for line in bio {
        p.text(info_x, y, line, ThemeToken::TextSecondary, SMALL_SIZE, TextAlign::Left);
        y += line_height(SMALL_SIZE);
    }
    p.text(info_x, y + GAP, "View Stats ›", team.color, BODY_SIZE, TextAlign::Left);
}

fn render_driver_modal(p: &mut Painter, state: &GridState, section: Rect, now: f64) {
    let Some(team) = state.team.current() else {
        return;
    };
    for frame in state.driver_modal.frames(now) {
        let Some(driver) = team.driver(frame.key) else {
            continue;
        };
        p.faded(frame.opacity, |p| {
            p.begin_group("driver-modal", driver.name);
            p.target(section, ThemeToken::Backdrop, None, None, HitTarget::DriverBackdrop);

            let card_w = (section.w - 2.0 * PAD).min(520.0);
            let header_h = 128.0;
            let stat_h = 96.0;
            let card_h = header_h + 2.0 * PAD + stat_h + 2.0 * GAP + line_height(SMALL_SIZE);
            // Scale 0.9 -> 1 and rise from 50px below while fading in.
            let t = frame.opacity;
            let scale = 0.9 + 0.1 * t;
            let (w, h) = (card_w * scale, card_h * scale);
            let card = Rect::new(
                section.x + (section.w - w) / 2.0,
                section.y + (section.h - h) / 2.0 + 50.0 * (1.0 - t),
                w,
                h,
            );
            p.target(card, ThemeToken::SurfaceRaised, Some(ThemeToken::Border), None, HitTarget::ModalSurface);
            let header = Rect::new(card.x, card.y, card.w, header_h * scale);
            p.faded(0.2, |p| p.rect(header, team.color, None));
            p.faded(0.05, |p| {
                p.text(
                    header.right() - PAD,
                    header.y,
                    driver.number.to_string(),
                    ThemeToken::TextPrimary,
                    TITLE_SIZE * 2.5,
                    TextAlign::Right,
                );
            });
            p.text(
                header.x + PAD,
                header.bottom() - PAD - line_height(TITLE_SIZE - 6.0),
                driver.name,
                ThemeToken::TextPrimary,
                TITLE_SIZE - 6.0,
                TextAlign::Left,
            );
            let close = Rect::new(header.right() - 48.0, header.y + GAP, 32.0, 32.0);
            p.target(close, ThemeToken::Backdrop, None, Some("Close".into()), HitTarget::DriverClose);
            p.text(close.x + 16.0, close.y + 4.0, "×", ThemeToken::TextPrimary, HEADING_SIZE - 4.0, TextAlign::Center);

            let stats = [
                (driver.stats.wins, "Wins", ThemeToken::Gold),
                (driver.stats.podiums, "Podiums", ThemeToken::InfoBlue),
                (driver.stats.championships, "Titles", ThemeToken::Accent),
            ];
            let body_y = header.bottom() + PAD;
            let cols = columns(card.x + PAD, card.w - 2.0 * PAD, stats.len());
            for ((value, label, color), (sx, sw)) in stats.into_iter().zip(cols) {
                let cell = Rect::new(sx, body_y, sw, stat_h * scale);
                p.rect(cell, ThemeToken::Background, Some(ThemeToken::Border));
                p.rect(Rect::new(cell.x, cell.y, cell.w, 3.0), color, None);
                p.text(cell.x + cell.w / 2.0, cell.y + GAP, value.to_string(), ThemeToken::TextPrimary, HEADING_SIZE + 2.0, TextAlign::Center);
                p.text(
                    cell.x + cell.w / 2.0,
                    cell.y + GAP + line_height(HEADING_SIZE + 2.0),
                    label.to_uppercase(),
                    ThemeToken::TextMuted,
                    SMALL_SIZE,
                    TextAlign::Center,
                );
            }
            p.text(
                card.x + card.w / 2.0,
                body_y + stat_h * scale + 2.0 * GAP,
                STATS_AS_OF,
                ThemeToken::TextSecondary,
                SMALL_SIZE,
                TextAlign::Center,
            );
            p.end_group();
        });
    }
}
