//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.
//!
//! Images are drawn as labelled placeholders; the asset path is kept in a
//! `data-asset` attribute so a post-processing step can swap real files in.

use paddock_protocol::{RenderCommand, Rgba, TextAlign, ThemeMode, ThemeToken};

/// What an open `<g>` was opened for, so pops close the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Transform,
    Opacity,
    Clip,
    Group,
}

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, mode: ThemeMode) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}"{}/>"#,
        fill(ThemeToken::Background.resolve(mode)),
    ));

    let mut open: Vec<Open> = Vec::new();
    let mut clip_ids = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    fill(color.resolve(mode)),
                    border(*border_color, mode),
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                border_color,
                ..
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}"{}{}/>"#,
                    center.x,
                    center.y,
                    fill(color.resolve(mode)),
                    border(*border_color, mode),
                ));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="central"{}>{}</text>"#,
                    position.x,
                    position.y,
                    fill(color.resolve(mode)),
                    escape_xml(text),
                ));
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{line_width}"{}/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke(color.resolve(mode)),
                ));
            }
            RenderCommand::DrawPolyline {
                points,
                color,
                width: line_width,
                closed,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                let element = if *closed { "polygon" } else { "polyline" };
                svg.push_str(&format!(
                    r#"<{element} points="{}" fill="none" stroke-width="{line_width}" stroke-linecap="round" stroke-linejoin="round"{}/>"#,
                    coords.join(" "),
                    stroke(color.resolve(mode)),
                ));
            }
            RenderCommand::DrawImage { rect, asset, alt } => {
                svg.push_str(&format!(
                    r#"<g data-asset="{}"><rect x="{}" y="{}" width="{}" height="{}"{}{} stroke-dasharray="6 4"/>"#,
                    escape_xml(asset),
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    fill(ThemeToken::SurfaceRaised.resolve(mode)),
                    border(Some(ThemeToken::Border), mode),
                ));
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="12" text-anchor="middle" dominant-baseline="central"{}>{}</text></g>"#,
                    rect.x + rect.w / 2.0,
                    rect.y + rect.h / 2.0,
                    fill(ThemeToken::TextMuted.resolve(mode)),
                    escape_xml(alt),
                ));
            }
            RenderCommand::SetClip { rect } => {
                clip_ids += 1;
                svg.push_str(&format!(
                    r#"<clipPath id="clip{clip_ids}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_ids})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                open.push(Open::Clip);
            }
            RenderCommand::PushTransform { translate, scale } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {}) scale({} {})">"#,
                    translate.x, translate.y, scale.x, scale.y,
                ));
                open.push(Open::Transform);
            }
            RenderCommand::PushOpacity { alpha } => {
                svg.push_str(&format!(r#"<g opacity="{}">"#, alpha.clamp(0.0, 1.0)));
                open.push(Open::Opacity);
            }
            RenderCommand::BeginGroup { id, label } => {
                svg.push_str(&format!(r#"<g data-group="{}">"#, escape_xml(id)));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                open.push(Open::Group);
            }
            RenderCommand::ClearClip => close(&mut svg, &mut open, Open::Clip),
            RenderCommand::PopTransform => close(&mut svg, &mut open, Open::Transform),
            RenderCommand::PopOpacity => close(&mut svg, &mut open, Open::Opacity),
            RenderCommand::EndGroup => close(&mut svg, &mut open, Open::Group),
        }
    }

    for _ in open.drain(..) {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

/// Close the innermost open `<g>` of `kind`, and anything opened inside it
/// that was never popped. An unmatched pop is dropped.
fn close(svg: &mut String, open: &mut Vec<Open>, kind: Open) {
    let Some(pos) = open.iter().rposition(|o| *o == kind) else {
        tracing::trace!(?kind, "unmatched pop in svg export");
        return;
    };
    for _ in pos..open.len() {
        svg.push_str("</g>");
    }
    open.truncate(pos);
}

fn fill(color: Rgba) -> String {
    paint("fill", color)
}

fn stroke(color: Rgba) -> String {
    paint("stroke", color)
}

fn border(token: Option<ThemeToken>, mode: ThemeMode) -> String {
    token.map_or_else(String::new, |t| {
        format!(r#"{} stroke-width="1""#, stroke(t.resolve(mode)))
    })
}

fn paint(attr: &str, color: Rgba) -> String {
    if color.a == 255 {
        format!(r#" {attr}="{}""#, color.hex())
    } else {
        format!(
            r#" {attr}="{}" {attr}-opacity="{:.3}""#,
            color.hex(),
            color.alpha()
        )
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_protocol::{HitTarget, Point, Rect};

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 18.0),
            color: ThemeToken::TeamFerrari,
            border_color: None,
            label: Some("Scuderia Ferrari".into()),
            hit: Some(HitTarget::TeamTab("ferrari".into())),
        }];
        let svg = render_svg(&commands, 800.0, 400.0, ThemeMode::Dark);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<title>Scuderia Ferrari</title>"));
        assert!(svg.contains("#dc2626"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "Maggots & Becketts <fast>".into(),
            color: ThemeToken::TextPrimary,
            font_size: 14.0,
            align: TextAlign::Left,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, ThemeMode::Light);
        assert!(svg.contains("Maggots &amp; Becketts &lt;fast&gt;"));
    }

    #[test]
    fn translucent_colors_get_an_opacity_attribute() {
        let commands = vec![RenderCommand::DrawPolyline {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)],
            color: ThemeToken::TrackOutline,
            width: 2.0,
            closed: false,
        }];
        let svg = render_svg(&commands, 100.0, 100.0, ThemeMode::Dark);
        assert!(svg.contains(r#"<polyline points="0,0 10,5""#));
        assert!(svg.contains(r#"stroke-opacity="0.200""#));
    }

    #[test]
    fn unbalanced_stacks_still_close() {
        let commands = vec![
            RenderCommand::PushTransform {
                translate: Point::new(5.0, 5.0),
                scale: Point::new(1.0, 1.0),
            },
            RenderCommand::PushOpacity { alpha: 0.5 },
            RenderCommand::SetClip {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            },
            // Pops the transform with the opacity and clip still open.
            RenderCommand::PopTransform,
            RenderCommand::PopOpacity,
            RenderCommand::BeginGroup {
                id: "hero".into(),
                label: None,
            },
        ];
        let svg = render_svg(&commands, 100.0, 100.0, ThemeMode::Dark);
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        assert!(svg.contains(r#"clip-path="url(#clip1)""#));
    }
}
