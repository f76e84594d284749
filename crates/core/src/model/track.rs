use std::fmt;

use serde::Serialize;

use crate::geometry::{GeometryError, TrackShape};
use crate::selection::Keyed;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Track {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub length_km: f64,
    pub turn_count: u32,
    pub lap_record: LapRecord,
    pub description: &'static str,
    pub geometry: TrackGeometry,
    pub corners: &'static [Corner],
}

impl Track {
    /// Parse and flatten this track's outline.
    ///
    /// Views go through [`crate::data::tracks::shape`], which caches the
    /// result for the bundled circuits.
    pub fn parse_shape(&self) -> Result<TrackShape, GeometryError> {
        TrackShape::parse(self.geometry.path, self.geometry.view_box)
    }

    pub fn length_label(&self) -> String {
        format!("{} km", self.length_km)
    }
}

impl Keyed for Track {
    fn key(&self) -> &'static str {
        self.id
    }
}

/// Raw SVG geometry of a circuit outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackGeometry {
    /// `"min-x min-y width height"`.
    pub view_box: &'static str,
    /// Path data using absolute `M`, `L`, `C` and `Z` commands.
    pub path: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LapRecord {
    pub time: &'static str,
    pub driver: &'static str,
    pub year: u16,
}

impl fmt::Display for LapRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.time, self.driver, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Corner {
    pub name: &'static str,
    pub info: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_record_display() {
        let record = LapRecord {
            time: "1:10.166",
            driver: "L. Hamilton",
            year: 2019,
        };
        assert_eq!(record.to_string(), "1:10.166 (L. Hamilton, 2019)");
    }
}
