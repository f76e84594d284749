use paddock_protocol::{Rgba, ThemeMode, ThemeToken};

pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    to_color32(token.resolve(mode))
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

// ── egui visual presets ────────────────────────────────────────────────────

/// Widget chrome (toolbar, status bar) built from the page palette so the
/// panels around the canvas match it.
pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    let mut v = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    let c = |token: ThemeToken| resolve(token, mode);
    v.panel_fill = c(ThemeToken::Surface);
    v.window_fill = c(ThemeToken::SurfaceRaised);
    v.extreme_bg_color = c(ThemeToken::Background);
    v.faint_bg_color = c(ThemeToken::Surface);
    v.widgets.noninteractive.bg_fill = c(ThemeToken::SurfaceRaised);
    v.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, c(ThemeToken::TextSecondary));
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, c(ThemeToken::Border));
    v.widgets.inactive.bg_fill = c(ThemeToken::SurfaceRaised);
    v.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, c(ThemeToken::TextSecondary));
    v.widgets.hovered.bg_fill = c(ThemeToken::Border);
    v.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, c(ThemeToken::TextPrimary));
    v.widgets.active.bg_fill = c(ThemeToken::Accent);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = c(ThemeToken::Accent).gamma_multiply(0.3);
    v.selection.stroke = egui::Stroke::new(1.0, c(ThemeToken::Accent));
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.menu_corner_radius = egui::CornerRadius::same(6);
    v.widgets.noninteractive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v.hyperlink_color = c(ThemeToken::InfoBlue);
    v.warn_fg_color = c(ThemeToken::WarnOrange);
    v.error_fg_color = c(ThemeToken::FlagRed);
    v
}

/// Apply the typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
