use paddock_protocol::ThemeToken;
use serde::Serialize;

use crate::selection::Keyed;

/// An interactive marker on the car-anatomy image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarPart {
    pub id: &'static str,
    pub label: &'static str,
    /// Horizontal position, percent of the image width.
    pub x: f64,
    /// Vertical position, percent of the image height.
    pub y: f64,
    pub description: &'static str,
}

impl Keyed for CarPart {
    fn key(&self) -> &'static str {
        self.id
    }
}

/// A dry-weather tyre compound. Keyed by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TyreCompound {
    pub name: &'static str,
    pub usage_note: &'static str,
    pub color: ThemeToken,
}

impl Keyed for TyreCompound {
    fn key(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AeroConcept {
    pub title: &'static str,
    pub note: &'static str,
    pub color: ThemeToken,
}
