use paddock_protocol::ThemeToken;
use serde::Serialize;

use crate::selection::Keyed;

/// Copy and background asset for the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroCopy {
    pub title: &'static str,
    /// Word drawn in the accent color after the title.
    pub highlight: &'static str,
    pub subtitle: &'static str,
    pub background: &'static str,
}

/// A session of the race weekend timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekendSession {
    pub day: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub color: ThemeToken,
}

/// A hover-to-reveal "essential knowledge" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Essential {
    pub id: &'static str,
    pub title: &'static str,
    /// Revealed text; may contain line breaks.
    pub info: &'static str,
}

impl Keyed for Essential {
    fn key(&self) -> &'static str {
        self.id
    }
}
