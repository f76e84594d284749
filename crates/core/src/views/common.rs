//! Layout helpers shared by the section views.
//!
//! Text measurement is an estimate: every glyph is assumed to be
//! `font_size * CHAR_WIDTH` wide. Renderers draw the real glyphs, so lines
//! may come out a little shorter than the box they were wrapped for.

use paddock_protocol::{
    HitTarget, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken,
};
use serde::Serialize;

pub const PAD: f64 = 24.0;
pub const GAP: f64 = 16.0;
pub const MAX_CONTENT_WIDTH: f64 = 1100.0;
/// Content width at which multi-column rows kick in.
pub const WIDE: f64 = 720.0;

pub const TITLE_SIZE: f64 = 36.0;
pub const HEADING_SIZE: f64 = 22.0;
pub const BODY_SIZE: f64 = 14.0;
pub const SMALL_SIZE: f64 = 12.0;

const CHAR_WIDTH: f64 = 0.55;
const LINE_HEIGHT: f64 = 1.4;

/// Output of one section view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub commands: Vec<RenderCommand>,
    /// Vertical space the section occupies, for stacking.
    pub height: f64,
}

/// Horizontal extent of the centred content column: `(x, width)`.
pub fn content_column(page_width: f64, max: f64) -> (f64, f64) {
    let w = (page_width - 2.0 * PAD).clamp(0.0, max);
    ((page_width - w) / 2.0, w)
}

/// Split `width` into `n` equal columns separated by [`GAP`].
pub fn columns(x: f64, width: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(1);
    let col_w = ((width - GAP * (n - 1) as f64) / n as f64).max(0.0);
    (0..n)
        .map(|i| (x + i as f64 * (col_w + GAP), col_w))
        .collect()
}

pub fn line_height(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT
}

pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH
}

/// Greedy word wrap. Explicit `\n` always breaks; words longer than a whole
/// line are split mid-word.
pub fn wrap_text(text: &str, width: f64, font_size: f64) -> Vec<String> {
    let max_chars = ((width / (font_size * CHAR_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;
        for word in raw.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max_chars && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

pub fn paragraph_height(text: &str, width: f64, font_size: f64) -> f64 {
    wrap_text(text, width, font_size).len() as f64 * line_height(font_size)
}

/// Accumulates render commands for one view.
#[derive(Debug, Default)]
pub struct Painter {
    commands: Vec<RenderCommand>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self, height: f64) -> Rendered {
        Rendered {
            commands: self.commands,
            height,
        }
    }

    pub fn push(&mut self, cmd: RenderCommand) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = RenderCommand>) {
        self.commands.extend(cmds);
    }

    pub fn rect(&mut self, rect: Rect, color: ThemeToken, border: Option<ThemeToken>) {
        self.push(RenderCommand::DrawRect {
            rect,
            color,
            border_color: border,
            label: None,
            hit: None,
        });
    }

    /// A clickable rect. Later targets shadow earlier ones where they overlap.
    pub fn target(
        &mut self,
        rect: Rect,
        color: ThemeToken,
        border: Option<ThemeToken>,
        label: Option<SharedStr>,
        hit: HitTarget,
    ) {
        self.push(RenderCommand::DrawRect {
            rect,
            color,
            border_color: border,
            label,
            hit: Some(hit),
        });
    }

    pub fn circle(
        &mut self,
        center: Point,
        radius: f64,
        color: ThemeToken,
        border: Option<ThemeToken>,
        hit: Option<HitTarget>,
    ) {
        self.push(RenderCommand::DrawCircle {
            center,
            radius,
            color,
            border_color: border,
            hit,
        });
    }

    /// One line of text whose top edge sits at `y`.
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        text: impl Into<SharedStr>,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) {
        self.push(RenderCommand::DrawText {
            position: Point::new(x, y + line_height(font_size) / 2.0),
            text: text.into(),
            color,
            font_size,
            align,
        });
    }

    /// Wrapped text inside `[x, x + width]`. Returns the height used.
    #[allow(clippy::too_many_arguments)]
    pub fn paragraph(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        text: &str,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) -> f64 {
        let anchor = match align {
            TextAlign::Left => x,
            TextAlign::Center => x + width / 2.0,
            TextAlign::Right => x + width,
        };
        let lh = line_height(font_size);
        let lines = wrap_text(text, width, font_size);
        for (i, line) in lines.iter().enumerate() {
            self.text(anchor, y + i as f64 * lh, line.clone(), color, font_size, align);
        }
        lines.len() as f64 * lh
    }

    pub fn line(&mut self, from: Point, to: Point, color: ThemeToken, width: f64) {
        self.push(RenderCommand::DrawLine {
            from,
            to,
            color,
            width,
        });
    }

    pub fn image(&mut self, rect: Rect, asset: &'static str, alt: impl Into<SharedStr>) {
        self.push(RenderCommand::DrawImage {
            rect,
            asset: asset.into(),
            alt: alt.into(),
        });
    }

    pub fn begin_group(&mut self, id: &'static str, label: &'static str) {
        self.push(RenderCommand::BeginGroup {
            id: id.into(),
            label: Some(label.into()),
        });
    }

    pub fn end_group(&mut self) {
        self.push(RenderCommand::EndGroup);
    }

    /// Run `f` with subsequent drawing faded to `alpha`. Fully opaque
    /// content is emitted without an opacity layer.
    pub fn faded(&mut self, alpha: f64, f: impl FnOnce(&mut Self)) {
        if alpha >= 1.0 {
            f(self);
            return;
        }
        self.push(RenderCommand::PushOpacity { alpha });
        f(self);
        self.push(RenderCommand::PopOpacity);
    }

    /// Run `f` with subsequent drawing shifted by `(dx, dy)`.
    pub fn shifted(&mut self, dx: f64, dy: f64, f: impl FnOnce(&mut Self)) {
        if dx == 0.0 && dy == 0.0 {
            f(self);
            return;
        }
        self.push(RenderCommand::PushTransform {
            translate: Point::new(dx, dy),
            scale: Point::new(1.0, 1.0),
        });
        f(self);
        self.push(RenderCommand::PopTransform);
    }

    /// Run `f` clipped to `rect`.
    pub fn clipped(&mut self, rect: Rect, f: impl FnOnce(&mut Self)) {
        self.push(RenderCommand::SetClip { rect });
        f(self);
        self.push(RenderCommand::ClearClip);
    }
}

/// Section title in two parts, the second in the accent color, plus an
/// optional subtitle. Returns the y coordinate below the block.
#[allow(clippy::too_many_arguments)]
pub fn section_heading(
    p: &mut Painter,
    x: f64,
    y: f64,
    width: f64,
    lead: &str,
    highlight: &str,
    subtitle: Option<&str>,
    align: TextAlign,
) -> f64 {
    let lead = lead.to_uppercase();
    let highlight = highlight.to_uppercase();
    let lead_w = text_width(&format!("{lead} "), TITLE_SIZE);
    let total = lead_w + text_width(&highlight, TITLE_SIZE);
    let start = match align {
        TextAlign::Left => x,
        TextAlign::Center => x + (width - total) / 2.0,
        TextAlign::Right => x + width - total,
    };
    p.text(start, y, lead, ThemeToken::TextPrimary, TITLE_SIZE, TextAlign::Left);
    p.text(
        start + lead_w,
        y,
        highlight,
        ThemeToken::Accent,
        TITLE_SIZE,
        TextAlign::Left,
    );
    let mut y = y + line_height(TITLE_SIZE) + 8.0;
    if let Some(sub) = subtitle {
        y += p.paragraph(x, y, width, sub, ThemeToken::TextSecondary, BODY_SIZE, align);
    }
    y + 2.0 * GAP
}

/// Sub-heading with an accent bar on its left edge. Returns the y below it.
pub fn bar_heading(p: &mut Painter, x: f64, y: f64, text: &str) -> f64 {
    let h = line_height(HEADING_SIZE);
    p.rect(Rect::new(x, y, 4.0, h), ThemeToken::Accent, None);
    p.text(x + 14.0, y, text.to_string(), ThemeToken::TextPrimary, HEADING_SIZE, TextAlign::Left);
    y + h + GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        // 14px * 0.55 = 7.7px per char, so 80px holds 10 chars.
        let lines = wrap_text("Pit stops are mandatory", 80.0, 14.0);
        assert_eq!(lines, vec!["Pit stops", "are", "mandatory"]);
    }

    #[test]
    fn explicit_newlines_break() {
        let lines = wrap_text("Yellow: slow\nRed: stop", 1000.0, 14.0);
        assert_eq!(lines, vec!["Yellow: slow", "Red: stop"]);
    }

    #[test]
    fn long_words_are_split() {
        let lines = wrap_text("Antonelli", 33.0, 14.0);
        assert_eq!(lines, vec!["Anto", "nell", "i"]);
    }

    #[test]
    fn columns_share_width() {
        let cols = columns(0.0, 332.0, 3);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0], (0.0, 100.0));
        assert_eq!(cols[2], (232.0, 100.0));
    }

    #[test]
    fn content_column_is_centred_and_capped() {
        assert_eq!(content_column(2000.0, 1100.0), (450.0, 1100.0));
        assert_eq!(content_column(400.0, 1100.0), (24.0, 352.0));
    }

    #[test]
    fn faded_skips_opaque_layers() {
        let mut p = Painter::new();
        p.faded(1.0, |p| p.rect(Rect::new(0.0, 0.0, 1.0, 1.0), ThemeToken::Surface, None));
        p.faded(0.5, |p| p.rect(Rect::new(0.0, 0.0, 1.0, 1.0), ThemeToken::Surface, None));
        let out = p.finish(0.0).commands;
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], RenderCommand::PushOpacity { alpha: 0.5 });
        assert_eq!(out[3], RenderCommand::PopOpacity);
    }
}
