use serde::{Deserialize, Serialize};

use crate::interaction::HitTarget;
use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Section views emit a `Vec<RenderCommand>` per frame. Renderers consume
/// the list sequentially; each command carries all the data it needs.
/// Later commands paint over earlier ones, so hit-testing must prefer the
/// last matching region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally labelled and optionally clickable.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<SharedStr>,
        hit: Option<HitTarget>,
    },

    /// Draw a filled circle (hotspot markers, tyre swatches).
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        hit: Option<HitTarget>,
    },

    /// Draw a single line of text. The position is the vertical centre of
    /// the line; `align` picks the horizontal anchor.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Stroke an open or closed polyline. Curves are flattened by the core,
    /// so renderers only ever see straight segments.
    DrawPolyline {
        points: Vec<Point>,
        color: ThemeToken,
        width: f64,
        closed: bool,
    },

    /// Placeholder for a bundled image or video asset. Renderers that can't
    /// decode the asset draw the rect with the alt text instead.
    DrawImage {
        rect: Rect,
        asset: SharedStr,
        alt: SharedStr,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push an affine transform (applied to all subsequent commands until
    /// the matching `PopTransform`).
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Multiply the alpha of subsequent commands until the matching
    /// `PopOpacity`. Nested opacities compose multiplicatively.
    PushOpacity { alpha: f64 },

    /// Pop the most recent opacity.
    PopOpacity,

    /// Begin a logical group (a page section, a modal). Renderers may use
    /// this for layering or accessibility.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl RenderCommand {
    /// The hit target carried by this command, if it is clickable.
    pub fn hit(&self) -> Option<&HitTarget> {
        match self {
            Self::DrawRect { hit, .. } | Self::DrawCircle { hit, .. } => hit.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_only_on_shapes() {
        let rect = RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: ThemeToken::Surface,
            border_color: None,
            label: None,
            hit: Some(HitTarget::TeamTab("ferrari".into())),
        };
        assert_eq!(rect.hit(), Some(&HitTarget::TeamTab("ferrari".into())));

        let text = RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "Monaco".into(),
            color: ThemeToken::TextPrimary,
            font_size: 12.0,
            align: TextAlign::Left,
        };
        assert!(text.hit().is_none());
    }

    #[test]
    fn serializes_as_externally_tagged() {
        let cmd = RenderCommand::PushOpacity { alpha: 0.5 };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert_eq!(json, r#"{"PushOpacity":{"alpha":0.5}}"#);
    }
}
