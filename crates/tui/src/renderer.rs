//! Rasterizes render commands into terminal cells.
//!
//! One cell covers `CELL_W x CELL_H` logical pixels. Colors are resolved
//! from the active palette and alpha-blended over whatever the cell
//! already shows, so fades and backdrops read the same as on the web.

use paddock_protocol::{
    HitTarget, Point, Rect as PageRect, RenderCommand, Rgba, TextAlign, ThemeMode, ThemeToken,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

/// Below this effective alpha nothing is drawn.
const INVISIBLE: f64 = 0.02;

/// A clickable area in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

/// The topmost target under `(col, row)`. Later regions were painted on
/// top, so the last match wins.
pub fn hit_test(regions: &[HitRegion], col: u16, row: u16) -> Option<&HitTarget> {
    regions
        .iter()
        .rev()
        .find(|r| {
            col >= r.area.x
                && col < r.area.x + r.area.width
                && row >= r.area.y
                && row < r.area.y + r.area.height
        })
        .map(|r| &r.target)
}

pub fn theme_to_color(token: ThemeToken, mode: ThemeMode) -> Color {
    rgb(token.resolve(mode))
}

fn rgb(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn blend(under: Color, over: Rgba, alpha: f64) -> Color {
    let Color::Rgb(r, g, b) = under else {
        return rgb(over);
    };
    let mix = |u: u8, o: u8| {
        let v = f64::from(o) * alpha + f64::from(u) * (1.0 - alpha);
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(mix(r, over.r), mix(g, over.g), mix(b, over.b))
}

#[derive(Debug, Clone, Copy)]
struct Affine {
    translate: Point,
    scale: Point,
}

impl Affine {
    const IDENTITY: Self = Self {
        translate: Point { x: 0.0, y: 0.0 },
        scale: Point { x: 1.0, y: 1.0 },
    };

    fn apply(&self, p: Point) -> Point {
        Point::new(
            self.translate.x + self.scale.x * p.x,
            self.translate.y + self.scale.y * p.y,
        )
    }

    fn apply_rect(&self, r: PageRect) -> PageRect {
        let a = self.apply(Point::new(r.x, r.y));
        PageRect::new(a.x, a.y, r.w * self.scale.x, r.h * self.scale.y)
    }

    fn then(&self, translate: Point, scale: Point) -> Self {
        Self {
            translate: self.apply(translate),
            scale: Point::new(self.scale.x * scale.x, self.scale.y * scale.y),
        }
    }
}

/// Draws one frame of commands into `buf`, scrolled down by `scroll`
/// logical pixels.
pub struct Rasterizer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    scroll: f64,
    mode: ThemeMode,
    transforms: Vec<Affine>,
    alphas: Vec<f64>,
    clip: Rect,
    hits: Vec<HitRegion>,
}

impl<'a> Rasterizer<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, scroll: f64, mode: ThemeMode) -> Self {
        Self {
            buf,
            area,
            scroll,
            mode,
            transforms: vec![Affine::IDENTITY],
            alphas: vec![1.0],
            clip: area,
            hits: Vec::new(),
        }
    }

    /// Paint the background, then every command. Returns the hit regions
    /// in paint order.
    pub fn draw(mut self, commands: &[RenderCommand]) -> Vec<HitRegion> {
        let bg = theme_to_color(ThemeToken::Background, self.mode);
        let fg = theme_to_color(ThemeToken::TextPrimary, self.mode);
        self.buf.set_style(self.area, Style::default().bg(bg).fg(fg));
        for cmd in commands {
            self.command(cmd);
        }
        self.hits
    }

    fn affine(&self) -> Affine {
        self.transforms.last().copied().unwrap_or(Affine::IDENTITY)
    }

    fn alpha(&self) -> f64 {
        self.alphas.last().copied().unwrap_or(1.0)
    }

    fn command(&mut self, cmd: &RenderCommand) {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                hit,
                ..
            } => {
                let Some(cells) = self.cells(*rect) else {
                    return;
                };
                self.fill(cells, *color);
                if let Some(border) = border_color {
                    self.border(cells, *border);
                }
                if let Some(target) = hit {
                    self.hit(cells, target);
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                hit,
                ..
            } => {
                let bounds = PageRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
                let Some(cells) = self.cells(bounds) else {
                    return;
                };
                self.disc(*center, *radius, *color);
                if let Some(target) = hit {
                    self.hit(cells, target);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => self.text(*position, text, *color, *align),
            RenderCommand::DrawLine { from, to, color, .. } => self.segment(*from, *to, *color),
            RenderCommand::DrawPolyline {
                points,
                color,
                closed,
                ..
            } => {
                for pair in points.windows(2) {
                    self.segment(pair[0], pair[1], *color);
                }
                if *closed
                    && let (Some(first), Some(last)) = (points.first(), points.last())
                {
                    self.segment(*last, *first, *color);
                }
            }
            RenderCommand::DrawImage { rect, alt, .. } => {
                let Some(cells) = self.cells(*rect) else {
                    return;
                };
                if self.fill(cells, ThemeToken::SurfaceRaised) {
                    self.border(cells, ThemeToken::Border);
                    let center = Point::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
                    self.text(center, alt, ThemeToken::TextMuted, TextAlign::Center);
                }
            }
            RenderCommand::SetClip { rect } => {
                self.clip = self.project(*rect).map_or(Rect::default(), |r| r.intersection(self.area));
            }
            RenderCommand::ClearClip => self.clip = self.area,
            RenderCommand::PushTransform { translate, scale } => {
                let next = self.affine().then(*translate, *scale);
                self.transforms.push(next);
            }
            RenderCommand::PopTransform => {
                if self.transforms.len() > 1 {
                    self.transforms.pop();
                }
            }
            RenderCommand::PushOpacity { alpha } => {
                let next = self.alpha() * alpha.clamp(0.0, 1.0);
                self.alphas.push(next);
            }
            RenderCommand::PopOpacity => {
                if self.alphas.len() > 1 {
                    self.alphas.pop();
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    /// Page rect to cell rect, before clipping. `None` when it rounds to
    /// nothing.
    fn project(&self, rect: PageRect) -> Option<Rect> {
        let r = self.affine().apply_rect(rect);
        let c0 = (r.x / CELL_W).round();
        let c1 = (r.right() / CELL_W).round();
        let r0 = ((r.y - self.scroll) / CELL_H).round();
        let r1 = ((r.bottom() - self.scroll) / CELL_H).round();
        let max = f64::from(u16::MAX);
        let x0 = (f64::from(self.area.x) + c0).clamp(0.0, max);
        let x1 = (f64::from(self.area.x) + c1).clamp(0.0, max);
        let y0 = (f64::from(self.area.y) + r0).clamp(0.0, max);
        let y1 = (f64::from(self.area.y) + r1).clamp(0.0, max);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }

    /// Visible cells of a page rect.
    fn cells(&self, rect: PageRect) -> Option<Rect> {
        let cells = self.project(rect)?.intersection(self.clip);
        (!cells.is_empty()).then_some(cells)
    }

    fn point_cell(&self, p: Point) -> Option<(u16, u16)> {
        let p = self.affine().apply(p);
        let col = f64::from(self.area.x) + (p.x / CELL_W).floor();
        let row = f64::from(self.area.y) + ((p.y - self.scroll) / CELL_H).floor();
        if col < 0.0 || row < 0.0 || col > f64::from(u16::MAX) || row > f64::from(u16::MAX) {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        self.visible(col, row).then_some((col, row))
    }

    fn visible(&self, col: u16, row: u16) -> bool {
        col >= self.clip.x
            && col < self.clip.x + self.clip.width
            && row >= self.clip.y
            && row < self.clip.y + self.clip.height
    }

    /// Effective color and alpha of `token` at the current opacity, or
    /// `None` when it would be invisible.
    fn paint(&self, token: ThemeToken) -> Option<(Rgba, f64)> {
        let color = token.resolve(self.mode);
        let alpha = color.alpha() * self.alpha();
        (alpha >= INVISIBLE).then_some((color, alpha))
    }

    fn fill(&mut self, cells: Rect, token: ThemeToken) -> bool {
        let Some((color, alpha)) = self.paint(token) else {
            return false;
        };
        let opaque = alpha >= 0.99;
        for row in cells.top()..cells.bottom() {
            for col in cells.left()..cells.right() {
                let cell = &mut self.buf[(col, row)];
                let bg = blend(cell.bg, color, alpha);
                if opaque {
                    cell.set_symbol(" ");
                } else {
                    let fg = blend(cell.fg, color, alpha);
                    cell.set_fg(fg);
                }
                cell.set_bg(bg);
            }
        }
        true
    }

    fn border(&mut self, cells: Rect, token: ThemeToken) {
        if cells.width < 2 || cells.height < 2 {
            return;
        }
        let Some((color, alpha)) = self.paint(token) else {
            return;
        };
        let (l, r, t, b) = (cells.left(), cells.right() - 1, cells.top(), cells.bottom() - 1);
        let mut put = |col: u16, row: u16, symbol: &str| {
            let cell = &mut self.buf[(col, row)];
            let fg = blend(cell.bg, color, alpha);
            cell.set_symbol(symbol).set_fg(fg);
        };
        for col in l + 1..r {
            put(col, t, "─");
            put(col, b, "─");
        }
        for row in t + 1..b {
            put(l, row, "│");
            put(r, row, "│");
        }
        put(l, t, "┌");
        put(r, t, "┐");
        put(l, b, "└");
        put(r, b, "┘");
    }

    fn disc(&mut self, center: Point, radius: f64, token: ThemeToken) {
        let Some((color, alpha)) = self.paint(token) else {
            return;
        };
        let a = self.affine();
        let c = a.apply(center);
        let (rx, ry) = (radius * a.scale.x.abs(), radius * a.scale.y.abs());
        if rx < CELL_W || ry < CELL_H / 2.0 {
            // Too small to fill: one glyph.
            if let Some((col, row)) = self.point_cell(center) {
                let cell = &mut self.buf[(col, row)];
                let fg = blend(cell.bg, color, alpha);
                cell.set_symbol("●").set_fg(fg);
            }
            return;
        }
        let bounds = PageRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        let Some(cells) = self.cells(bounds) else {
            return;
        };
        for row in cells.top()..cells.bottom() {
            for col in cells.left()..cells.right() {
                let px = (f64::from(col - self.area.x) + 0.5) * CELL_W;
                let py = (f64::from(row - self.area.y) + 0.5) * CELL_H + self.scroll;
                let (dx, dy) = ((px - c.x) / rx, (py - c.y) / ry);
                if dx * dx + dy * dy <= 1.0 {
                    let cell = &mut self.buf[(col, row)];
                    let bg = blend(cell.bg, color, alpha);
                    cell.set_symbol(" ").set_bg(bg);
                }
            }
        }
    }

    fn text(&mut self, position: Point, text: &str, token: ThemeToken, align: TextAlign) {
        let Some((color, alpha)) = self.paint(token) else {
            return;
        };
        let width = text.chars().count() as f64 * CELL_W;
        let x = match align {
            TextAlign::Left => position.x,
            TextAlign::Center => position.x - width / 2.0 / self.affine().scale.x,
            TextAlign::Right => position.x - width / self.affine().scale.x,
        };
        let start = Point::new(x, position.y);
        let Some(origin) = self.cell_unclipped(start) else {
            return;
        };
        let (col0, row) = origin;
        for (i, ch) in text.chars().enumerate() {
            let Some(col) = col0.checked_add(i as i64) else {
                continue;
            };
            if col < 0 || col > i64::from(u16::MAX) {
                continue;
            }
            let col = col as u16;
            if !self.visible(col, row) {
                continue;
            }
            let cell = &mut self.buf[(col, row)];
            let fg = blend(cell.bg, color, alpha);
            cell.set_char(ch).set_fg(fg);
        }
    }

    /// Column (possibly off-screen to the left) and row of a point; the
    /// row must be on screen.
    fn cell_unclipped(&self, p: Point) -> Option<(i64, u16)> {
        let p = self.affine().apply(p);
        let col = i64::from(self.area.x) + (p.x / CELL_W).round() as i64;
        let row = f64::from(self.area.y) + ((p.y - self.scroll) / CELL_H).floor();
        if row < 0.0 || row > f64::from(u16::MAX) {
            return None;
        }
        Some((col, row as u16))
    }

    fn segment(&mut self, from: Point, to: Point, token: ThemeToken) {
        let Some((color, alpha)) = self.paint(token) else {
            return;
        };
        let a = self.affine();
        let (p, q) = (a.apply(from), a.apply(to));
        let dc = (q.x - p.x) / CELL_W;
        let dr = (q.y - p.y) / CELL_H;
        let symbol = if dr.abs() < 0.5 {
            "─"
        } else if dc.abs() < 0.5 {
            "│"
        } else {
            "•"
        };
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let at = from.lerp(&to, t);
            if let Some((col, row)) = self.point_cell(at) {
                let cell = &mut self.buf[(col, row)];
                let fg = blend(cell.bg, color, alpha);
                cell.set_symbol(symbol).set_fg(fg);
            }
        }
    }

    /// Register a target. Transparent fills still catch clicks; faded-out
    /// layers don't.
    fn hit(&mut self, cells: Rect, target: &HitTarget) {
        if self.alpha() < INVISIBLE {
            return;
        }
        self.hits.push(HitRegion {
            area: cells,
            target: target.clone(),
        });
    }
}

/// Mark the focused region so keyboard users can see it.
pub fn highlight(buf: &mut Buffer, area: Rect) {
    buf.set_style(area, Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_protocol::SharedStr;

    fn screen(cols: u16, rows: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, cols, rows))
    }

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width).map(|c| buf[(c, row)].symbol().to_string()).collect()
    }

    fn target(id: &str, rect: PageRect) -> RenderCommand {
        RenderCommand::DrawRect {
            rect,
            color: ThemeToken::Surface,
            border_color: None,
            label: None,
            hit: Some(HitTarget::TrackItem(SharedStr::from(id))),
        }
    }

    #[test]
    fn text_lands_on_its_row_and_column() {
        let mut buf = screen(20, 4);
        let area = buf.area;
        let cmds = [RenderCommand::DrawText {
            position: Point::new(16.0, 24.0),
            text: "Monza".into(),
            color: ThemeToken::TextPrimary,
            font_size: 14.0,
            align: TextAlign::Left,
        }];
        Rasterizer::new(&mut buf, area, 0.0, ThemeMode::Dark).draw(&cmds);
        assert_eq!(row_text(&buf, 1).trim(), "Monza");
        assert_eq!(buf[(2, 1)].symbol(), "M");
    }

    #[test]
    fn scrolling_and_transforms_move_content() {
        let mut buf = screen(20, 4);
        let area = buf.area;
        let cmds = [
            RenderCommand::PushTransform {
                translate: Point::new(0.0, 64.0),
                scale: Point::new(1.0, 1.0),
            },
            RenderCommand::DrawText {
                position: Point::new(80.0, 8.0),
                text: "SC".into(),
                color: ThemeToken::TextPrimary,
                font_size: 14.0,
                align: TextAlign::Center,
            },
            RenderCommand::PopTransform,
        ];
        Rasterizer::new(&mut buf, area, 32.0, ThemeMode::Dark).draw(&cmds);
        // (64 + 8 - 32) / 16 = row 2; centred on column 10.
        assert_eq!(buf[(9, 2)].symbol(), "S");
        assert_eq!(buf[(10, 2)].symbol(), "C");
    }

    #[test]
    fn last_painted_target_wins() {
        let mut buf = screen(30, 12);
        let area = buf.area;
        let cmds = [
            target("monaco", PageRect::new(0.0, 0.0, 160.0, 160.0)),
            target("monza", PageRect::new(40.0, 32.0, 40.0, 32.0)),
        ];
        let hits = Rasterizer::new(&mut buf, area, 0.0, ThemeMode::Dark).draw(&cmds);
        assert_eq!(hits.len(), 2);
        assert_eq!(hit_test(&hits, 6, 2), Some(&HitTarget::TrackItem("monza".into())));
        assert_eq!(hit_test(&hits, 1, 1), Some(&HitTarget::TrackItem("monaco".into())));
        assert_eq!(hit_test(&hits, 25, 11), None);
    }

    #[test]
    fn transparent_layers_are_not_clickable() {
        let mut buf = screen(20, 10);
        let area = buf.area;
        let cmds = [
            RenderCommand::PushOpacity { alpha: 0.0 },
            target("monaco", PageRect::new(0.0, 0.0, 160.0, 160.0)),
            RenderCommand::PopOpacity,
        ];
        let hits = Rasterizer::new(&mut buf, area, 0.0, ThemeMode::Dark).draw(&cmds);
        assert!(hits.is_empty());
    }

    #[test]
    fn clip_limits_drawing() {
        let mut buf = screen(20, 4);
        let area = buf.area;
        let cmds = [
            RenderCommand::SetClip {
                rect: PageRect::new(0.0, 0.0, 24.0, 64.0),
            },
            RenderCommand::DrawText {
                position: Point::new(0.0, 8.0),
                text: "Parabolica".into(),
                color: ThemeToken::TextPrimary,
                font_size: 14.0,
                align: TextAlign::Left,
            },
            RenderCommand::ClearClip,
        ];
        Rasterizer::new(&mut buf, area, 0.0, ThemeMode::Dark).draw(&cmds);
        assert_eq!(row_text(&buf, 0).trim(), "Par");
    }

    #[test]
    fn blending_mixes_channels() {
        let under = Color::Rgb(0, 0, 0);
        let over = Rgba::rgb(200, 100, 0);
        assert_eq!(blend(under, over, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(blend(Color::Reset, over, 0.5), Color::Rgb(200, 100, 0));
    }
}
