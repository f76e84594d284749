use paddock_protocol::ThemeToken;
use serde::Serialize;

use crate::selection::Keyed;

/// One entry of the rules accordion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleSection {
    pub id: &'static str,
    pub title: &'static str,
    /// Tint of the header icon.
    pub color: ThemeToken,
    pub body: RuleBody,
}

impl Keyed for RuleSection {
    fn key(&self) -> &'static str {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum RuleBody {
    Qualifying(&'static [QualifyingStage]),
    Flags(&'static [FlagSignal]),
    Points(PointsTable),
    Penalties(&'static [Penalty]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualifyingStage {
    pub name: &'static str,
    pub minutes: u32,
    pub headline: &'static str,
    pub outcome: &'static str,
    /// The final shootout; drawn with the accent border.
    pub decisive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagSignal {
    pub name: &'static str,
    pub meaning: &'static str,
    pub color: ThemeToken,
    /// Text drawn on the swatch instead of a plain color ("SC").
    pub badge: Option<&'static str>,
}

/// Championship points awarded per finishing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointsTable {
    /// Points by position, index 0 is the winner.
    pub awards: &'static [u32],
    pub fastest_lap_bonus: u32,
}

impl PointsTable {
    /// Points for finishing in `position` (1-based). Zero outside the
    /// scoring places.
    pub fn points_for(&self, position: usize) -> u32 {
        position
            .checked_sub(1)
            .and_then(|i| self.awards.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// The fastest-lap bonus only counts for drivers finishing in the
    /// scoring places.
    pub fn fastest_lap_bonus(&self, position: usize) -> u32 {
        if (1..=self.awards.len()).contains(&position) {
            self.fastest_lap_bonus
        } else {
            0
        }
    }

    pub fn scoring_places(&self) -> usize {
        self.awards.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Penalty {
    pub name: &'static str,
    pub detail: &'static str,
    pub color: ThemeToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: PointsTable = PointsTable {
        awards: &[25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        fastest_lap_bonus: 1,
    };

    #[test]
    fn points_by_position() {
        assert_eq!(TABLE.points_for(1), 25);
        assert_eq!(TABLE.points_for(2), 18);
        assert_eq!(TABLE.points_for(10), 1);
        assert_eq!(TABLE.points_for(11), 0);
        assert_eq!(TABLE.points_for(0), 0);
    }

    #[test]
    fn fastest_lap_needs_top_ten() {
        assert_eq!(TABLE.fastest_lap_bonus(1), 1);
        assert_eq!(TABLE.fastest_lap_bonus(10), 1);
        assert_eq!(TABLE.fastest_lap_bonus(11), 0);
    }

    #[test]
    fn body_serializes_with_kind_tag() {
        let body = RuleBody::Points(TABLE);
        let json = serde_json::to_value(body).unwrap_or_default();
        assert_eq!(json["kind"], "points");
        assert_eq!(json["items"]["fastest_lap_bonus"], 1);
    }
}
