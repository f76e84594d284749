use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    SurfaceRaised,
    Border,
    Backdrop,

    TextPrimary,
    TextSecondary,
    TextMuted,
    /// Signature red used for highlights and headings.
    Accent,

    // Tabs and lists
    TabActive,
    TabIdle,

    // Team liveries
    TeamFerrari,
    TeamRedBull,
    TeamMcLaren,
    TeamMercedes,

    // Tyre compounds
    TyreSoft,
    TyreMedium,
    TyreHard,

    // Flags and signals
    FlagYellow,
    FlagGreen,
    FlagRed,
    FlagBlue,
    FlagBlack,
    SafetyCar,

    // Track map
    TrackBase,
    TrackOutline,
    TrackSweep,

    // Car anatomy
    Hotspot,
    HotspotRing,

    // Rule callouts
    InfoBlue,
    WarnOrange,
    Success,
    Gold,
}

/// Light or dark palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// A resolved, non-premultiplied RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl ThemeToken {
    pub fn resolve(self, mode: ThemeMode) -> Rgba {
        match mode {
            ThemeMode::Dark => resolve_dark(self),
            ThemeMode::Light => resolve_light(self),
        }
    }
}

// Tailwind zinc/red, the site's own palette.
fn resolve_dark(token: ThemeToken) -> Rgba {
    use ThemeToken::*;
    match token {
        Background => Rgba::rgb(0x09, 0x09, 0x0b), // zinc-950
        Surface => Rgba::rgb(0x18, 0x18, 0x1b),    // zinc-900
        SurfaceRaised => Rgba::rgb(0x27, 0x27, 0x2a), // zinc-800
        Border => Rgba::rgb(0x3f, 0x3f, 0x46),     // zinc-700
        Backdrop => Rgba::rgba(0, 0, 0, 160),

        TextPrimary => Rgba::rgb(0xff, 0xff, 0xff),
        TextSecondary => Rgba::rgb(0xd1, 0xd5, 0xdb), // gray-300
        TextMuted => Rgba::rgb(0x6b, 0x72, 0x80),     // gray-500
        Accent => Rgba::rgb(0xdc, 0x26, 0x26),        // red-600

        TabActive => Rgba::rgb(0xdc, 0x26, 0x26),
        TabIdle => Rgba::rgba(0x09, 0x09, 0x0b, 0),

        TeamFerrari => Rgba::rgb(0xdc, 0x26, 0x26),  // red-600
        TeamRedBull => Rgba::rgb(0x1e, 0x3a, 0x8a),  // blue-900
        TeamMcLaren => Rgba::rgb(0xf9, 0x73, 0x16),  // orange-500
        TeamMercedes => Rgba::rgb(0x14, 0xb8, 0xa6), // teal-500

        TyreSoft => Rgba::rgb(0xdc, 0x26, 0x26),
        TyreMedium => Rgba::rgb(0xfa, 0xcc, 0x15), // yellow-400
        TyreHard => Rgba::rgb(0xff, 0xff, 0xff),

        FlagYellow => Rgba::rgb(0xfa, 0xcc, 0x15),
        FlagGreen => Rgba::rgb(0x22, 0xc5, 0x5e),
        FlagRed => Rgba::rgb(0xdc, 0x26, 0x26),
        FlagBlue => Rgba::rgb(0x3b, 0x82, 0xf6),
        FlagBlack => Rgba::rgb(0, 0, 0),
        SafetyCar => Rgba::rgb(0xff, 0xff, 0xff),

        TrackBase => Rgba::rgb(0x33, 0x33, 0x33),
        TrackOutline => Rgba::rgba(0xff, 0xff, 0xff, 51),
        TrackSweep => Rgba::rgb(0xdc, 0x26, 0x26),

        Hotspot => Rgba::rgb(0xdc, 0x26, 0x26),
        HotspotRing => Rgba::rgba(0xef, 0x44, 0x44, 190), // red-500

        InfoBlue => Rgba::rgb(0x60, 0xa5, 0xfa), // blue-400
        WarnOrange => Rgba::rgb(0xf9, 0x73, 0x16),
        Success => Rgba::rgb(0x22, 0xc5, 0x5e),
        Gold => Rgba::rgb(0xea, 0xb3, 0x08), // yellow-500
    }
}

fn resolve_light(token: ThemeToken) -> Rgba {
    use ThemeToken::*;
    match token {
        Background => Rgba::rgb(0xfa, 0xfa, 0xfa), // zinc-50
        Surface => Rgba::rgb(0xf4, 0xf4, 0xf5),    // zinc-100
        SurfaceRaised => Rgba::rgb(0xe4, 0xe4, 0xe7), // zinc-200
        Border => Rgba::rgb(0xd4, 0xd4, 0xd8),     // zinc-300
        Backdrop => Rgba::rgba(0x18, 0x18, 0x1b, 120),

        TextPrimary => Rgba::rgb(0x18, 0x18, 0x1b),
        TextSecondary => Rgba::rgb(0x3f, 0x3f, 0x46),
        TextMuted => Rgba::rgb(0x71, 0x71, 0x7a),
        Accent => Rgba::rgb(0xdc, 0x26, 0x26),

        TabActive => Rgba::rgb(0xdc, 0x26, 0x26),
        TabIdle => Rgba::rgba(0xfa, 0xfa, 0xfa, 0),

        TyreHard | SafetyCar => Rgba::rgb(0x52, 0x52, 0x5b),
        TrackBase => Rgba::rgb(0xa1, 0xa1, 0xaa),
        TrackOutline => Rgba::rgba(0x18, 0x18, 0x1b, 60),

        // Saturated colors read the same on both backgrounds.
        other => resolve_dark(other),
    }
}
