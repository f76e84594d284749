use eframe::egui;
use paddock_core::{Page, SectionId};
use paddock_protocol::{HitTarget, Interaction, ThemeMode, ThemeToken, Viewport};

use crate::renderer::{self, HitRegion};
use crate::theme;

/// Pixels scrolled per arrow-key press.
const KEY_SCROLL: f32 = 48.0;

/// Main application state.
pub struct PaddockApp {
    page: Page,
    theme_mode: ThemeMode,
    /// Vertical scroll offset in pixels.
    scroll_y: f32,
    /// Height of the last rendered page.
    page_height: f32,
    /// Viewport of the last frame, for section jumps.
    viewport: Viewport,
    /// Hit regions of the last frame.
    hits: Vec<HitRegion>,
    hovered: Option<HitTarget>,
}

impl PaddockApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme::visuals(theme_mode));
        theme::apply_typography(&cc.egui_ctx);

        let now = cc.egui_ctx.input(|i| i.time);
        Self {
            page: Page::new(now).with_reduced_motion(prefers_reduced_motion()),
            theme_mode,
            scroll_y: 0.0,
            page_height: 0.0,
            viewport: Viewport::new(0.0, 0.0),
            hits: Vec::new(),
            hovered: None,
        }
    }

    fn dispatch(&mut self, interaction: Interaction, now: f64) {
        if self.page.dispatch(&interaction, now) {
            tracing::debug!(?interaction, "state changed");
        }
    }

    /// Emit leave/enter pairs as the pointer moves between targets.
    fn set_hover(&mut self, target: Option<HitTarget>, now: f64) {
        if self.hovered == target {
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.dispatch(Interaction::HoverLeave(old), now);
        }
        if let Some(new) = &target {
            self.dispatch(Interaction::HoverEnter(new.clone()), now);
        }
        self.hovered = target;
    }

    fn jump_to(&mut self, section: SectionId, now: f64) {
        if let Some(slot) = self
            .page
            .layout(&self.viewport, now)
            .into_iter()
            .find(|s| s.id == section)
        {
            self.scroll_y = slot.top as f32;
            self.clamp_scroll();
        }
    }

    fn clamp_scroll(&mut self) {
        let max = (self.page_height - self.viewport.height as f32).max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, max);
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme_mode = match self.theme_mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        ctx.set_visuals(theme::visuals(self.theme_mode));
    }

    fn toolbar(&mut self, ctx: &egui::Context, now: f64) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("F1 for Dummies");
                ui.separator();

                for section in SectionId::ALL {
                    if ui.button(section_title(section)).clicked() {
                        self.jump_to(section, now);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.theme_mode {
                        ThemeMode::Dark => "Light",
                        ThemeMode::Light => "Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.toggle_theme(ctx);
                    }
                    let mut reduced = self.page.reduced_motion();
                    if ui.checkbox(&mut reduced, "Reduce motion").changed() {
                        self.page.set_reduced_motion(reduced);
                    }
                });
            });
        });
    }
}

fn section_title(section: SectionId) -> &'static str {
    match section {
        SectionId::Hero => "Top",
        SectionId::Basics => "Basics",
        SectionId::Machine => "The Car",
        SectionId::Grid => "Teams",
        SectionId::Circuits => "Circuits",
        SectionId::Rules => "Rules",
    }
}

#[cfg(target_arch = "wasm32")]
fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|q| q.matches())
}

#[cfg(not(target_arch = "wasm32"))]
fn prefers_reduced_motion() -> bool {
    false
}

impl eframe::App for PaddockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.toolbar(ctx, now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(available, egui::Sense::click());
                self.viewport = Viewport::new(f64::from(available.width()), f64::from(available.height()));

                let (scroll, escape, down, up) = ui.input(|i| {
                    (
                        i.smooth_scroll_delta.y,
                        i.key_pressed(egui::Key::Escape),
                        i.key_pressed(egui::Key::ArrowDown),
                        i.key_pressed(egui::Key::ArrowUp),
                    )
                });
                self.scroll_y -= scroll;
                if down {
                    self.scroll_y += KEY_SCROLL;
                }
                if up {
                    self.scroll_y -= KEY_SCROLL;
                }
                if escape {
                    self.dispatch(Interaction::Click(HitTarget::DriverClose), now);
                    self.dispatch(Interaction::Click(HitTarget::PartClose), now);
                }

                let rendered = self.page.render(&self.viewport, now);
                self.page_height = rendered.height as f32;
                self.clamp_scroll();

                let mut painter = ui.painter_at(available);
                painter.rect_filled(
                    available,
                    egui::CornerRadius::ZERO,
                    theme::resolve(ThemeToken::Background, self.theme_mode),
                );
                let origin = egui::pos2(available.left(), available.top() - self.scroll_y);
                let result =
                    renderer::render_commands(&mut painter, &rendered.commands, origin, self.theme_mode);
                self.hits = result.hit_regions;

                let pointer = ui.input(|i| i.pointer.hover_pos()).filter(|p| available.contains(*p));
                let under = pointer.and_then(|p| renderer::hit_test(&self.hits, p).cloned());
                if under.is_some() {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                self.set_hover(under, now);

                if response.clicked() {
                    let target = response
                        .interact_pointer_pos()
                        .and_then(|p| renderer::hit_test(&self.hits, p).cloned());
                    if let Some(target) = target {
                        self.dispatch(Interaction::Click(target), now);
                    }
                }
            });

        if self.page.is_animating(now) {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_a_toolbar_title() {
        let titles: Vec<_> = SectionId::ALL.into_iter().map(section_title).collect();
        assert_eq!(titles.len(), 6);
        assert!(titles.iter().all(|t| !t.is_empty()));
    }
}
