use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, StrokeKind};
use paddock_protocol::{HitTarget, RenderCommand, TextAlign, ThemeMode, ThemeToken};

use crate::theme;

/// Below this layer opacity nothing is drawn or clickable.
const INVISIBLE: f32 = 0.02;

/// Transform state for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }

    fn apply_x(&self, x: f64) -> f32 {
        (x * self.sx + self.tx) as f32
    }

    fn apply_y(&self, y: f64) -> f32 {
        (y * self.sy + self.ty) as f32
    }

    fn scale_w(&self, w: f64) -> f32 {
        (w * self.sx) as f32
    }

    fn scale_h(&self, h: f64) -> f32 {
        (h * self.sy) as f32
    }

    fn point(&self, p: paddock_protocol::Point, offset: Pos2) -> Pos2 {
        Pos2::new(self.apply_x(p.x) + offset.x, self.apply_y(p.y) + offset.y)
    }

    fn rect(&self, r: paddock_protocol::Rect, offset: Pos2) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.apply_x(r.x) + offset.x, self.apply_y(r.y) + offset.y),
            egui::vec2(self.scale_w(r.w), self.scale_h(r.h)),
        )
    }
}

/// A clickable area in screen space.
#[derive(Debug, Clone)]
pub struct HitRegion {
    pub rect: Rect,
    pub target: HitTarget,
}

/// Result of rendering a command list: includes hit regions for interaction.
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

/// The target under `pos`. Later regions were painted on top, so they win.
pub fn hit_test(regions: &[HitRegion], pos: Pos2) -> Option<&HitTarget> {
    regions
        .iter()
        .rev()
        .find(|r| r.rect.contains(pos))
        .map(|r| &r.target)
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the page, scroll included.
/// Returns hit regions for click/hover interaction.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut opacity_stack: Vec<f32> = vec![1.0];
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut hit_regions: Vec<HitRegion> = Vec::new();

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        let alpha = opacity_stack.last().copied().unwrap_or(1.0);
        let color = |token: ThemeToken| -> Color32 { theme::resolve(token, mode).gamma_multiply(alpha) };

        match cmd {
            RenderCommand::DrawRect {
                rect,
                color: fill,
                border_color,
                label,
                hit,
            } => {
                let egui_rect = tf.rect(*rect, offset);
                if alpha < INVISIBLE || egui_rect.width() < 0.5 || egui_rect.height() < 0.5 {
                    continue;
                }
                // Cull off-screen
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                painter.rect_filled(egui_rect, CornerRadius::same(4), color(*fill));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::same(4),
                        Stroke::new(1.0, color(*bc)),
                        StrokeKind::Inside,
                    );
                }

                if let Some(label_text) = label {
                    let label_str: &str = label_text;
                    let h = egui_rect.height();
                    if !label_str.is_empty() && egui_rect.width() > 6.0 && h > 8.0 {
                        let font_size = (h - 4.0).clamp(6.0, theme::FONT_BODY);
                        let text_color = color(ThemeToken::TextPrimary);
                        let galley = painter.layout_no_wrap(
                            label_str.to_string(),
                            FontId::proportional(font_size),
                            text_color,
                        );
                        // Only draw if the label fits
                        if galley.size().x <= egui_rect.width() - 4.0 {
                            let pos = egui_rect.center() - galley.size() / 2.0;
                            painter.galley(pos, galley, text_color);
                        }
                    }
                }

                if let Some(target) = hit {
                    push_hit(&mut hit_regions, painter.clip_rect(), egui_rect, target);
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                color: fill,
                border_color,
                hit,
            } => {
                if alpha < INVISIBLE {
                    continue;
                }
                let c = tf.point(*center, offset);
                let r = tf.scale_w(*radius);
                painter.circle_filled(c, r, color(*fill));
                if let Some(bc) = border_color {
                    painter.circle_stroke(c, r, Stroke::new(1.5, color(*bc)));
                }
                if let Some(target) = hit {
                    let bounds = Rect::from_center_size(c, egui::vec2(r * 2.0, r * 2.0));
                    push_hit(&mut hit_regions, painter.clip_rect(), bounds, target);
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color: fill,
                font_size,
                align,
            } => {
                let size = tf.scale_h(*font_size);
                if size < 1.0 || alpha < INVISIBLE {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    tf.point(*position, offset),
                    anchor,
                    text.as_str(),
                    FontId::proportional(size),
                    color(*fill),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color: stroke,
                width,
            } => {
                painter.line_segment(
                    [tf.point(*from, offset), tf.point(*to, offset)],
                    Stroke::new(tf.scale_w(*width), color(*stroke)),
                );
            }

            RenderCommand::DrawPolyline {
                points,
                color: stroke,
                width,
                closed,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let pts: Vec<Pos2> = points.iter().map(|p| tf.point(*p, offset)).collect();
                let stroke = Stroke::new(tf.scale_w(*width), color(*stroke));
                if *closed {
                    painter.add(Shape::closed_line(pts, stroke));
                } else {
                    painter.add(Shape::line(pts, stroke));
                }
            }

            RenderCommand::DrawImage { rect, alt, .. } => {
                let egui_rect = tf.rect(*rect, offset);
                painter.rect_filled(egui_rect, CornerRadius::same(6), color(ThemeToken::SurfaceRaised));
                painter.rect_stroke(
                    egui_rect,
                    CornerRadius::same(6),
                    Stroke::new(1.0, color(ThemeToken::Border)),
                    StrokeKind::Inside,
                );
                painter.text(
                    egui_rect.center(),
                    Align2::CENTER_CENTER,
                    alt.as_str(),
                    FontId::proportional(theme::FONT_CAPTION),
                    color(ThemeToken::TextMuted),
                );
            }

            RenderCommand::SetClip { rect } => {
                let clip_rect = tf.rect(*rect, offset);
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, scale } => {
                let parent = tf;
                transform_stack.push(Transform {
                    tx: parent.tx + translate.x * parent.sx,
                    ty: parent.ty + translate.y * parent.sy,
                    sx: parent.sx * scale.x,
                    sy: parent.sy * scale.y,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::PushOpacity { alpha: layer } => {
                opacity_stack.push(alpha * (*layer as f32).clamp(0.0, 1.0));
            }

            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Semantic only.
            }
        }
    }

    RenderResult { hit_regions }
}

/// Register a hit area, trimmed to what is visible through the clip.
fn push_hit(regions: &mut Vec<HitRegion>, clip: Rect, area: Rect, target: &HitTarget) {
    let visible = clip.intersect(area);
    if visible.is_positive() {
        regions.push(HitRegion {
            rect: visible,
            target: target.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f32, y: f32, w: f32, h: f32, target: HitTarget) -> HitRegion {
        HitRegion {
            rect: Rect::from_min_size(Pos2::new(x, y), egui::vec2(w, h)),
            target,
        }
    }

    #[test]
    fn topmost_region_wins() {
        let regions = vec![
            region(0.0, 0.0, 400.0, 300.0, HitTarget::DriverBackdrop),
            region(100.0, 50.0, 200.0, 200.0, HitTarget::ModalSurface),
            region(270.0, 60.0, 20.0, 20.0, HitTarget::DriverClose),
        ];
        assert_eq!(hit_test(&regions, Pos2::new(280.0, 70.0)), Some(&HitTarget::DriverClose));
        assert_eq!(hit_test(&regions, Pos2::new(150.0, 150.0)), Some(&HitTarget::ModalSurface));
        assert_eq!(hit_test(&regions, Pos2::new(10.0, 10.0)), Some(&HitTarget::DriverBackdrop));
        assert_eq!(hit_test(&regions, Pos2::new(500.0, 10.0)), None);
    }

    #[test]
    fn hits_are_trimmed_to_the_clip() {
        let clip = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let mut regions = Vec::new();
        let tab = HitTarget::TeamTab("ferrari".into());
        push_hit(&mut regions, clip, Rect::from_min_size(Pos2::new(80.0, 0.0), egui::vec2(50.0, 20.0)), &tab);
        push_hit(&mut regions, clip, Rect::from_min_size(Pos2::new(120.0, 0.0), egui::vec2(50.0, 20.0)), &tab);
        assert_eq!(regions.len(), 1);
        assert!((regions[0].rect.width() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn nested_transforms_compose() {
        let parent = Transform {
            tx: 10.0,
            ty: 100.0,
            sx: 2.0,
            sy: 2.0,
        };
        let p = parent.point(paddock_protocol::Point::new(5.0, 5.0), Pos2::new(1.0, 1.0));
        assert_eq!(p, Pos2::new(21.0, 111.0));
        let r = parent.rect(paddock_protocol::Rect::new(0.0, 0.0, 10.0, 4.0), Pos2::ZERO);
        assert_eq!(r.size(), egui::vec2(20.0, 8.0));
    }
}
