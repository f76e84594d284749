//! Bundled site content.
//!
//! Everything here is a `static` built at compile time and never mutated.
//! Sections hold indices into these slices, never copies.

pub mod basics;
pub mod car;
pub mod rules;
pub mod teams;
pub mod tracks;

use serde_json::Value;

use crate::error::Error;

/// Names accepted by [`dataset_json`].
pub const DATASET_NAMES: [&str; 8] = [
    "hero", "weekend", "essentials", "car", "tyres", "teams", "tracks", "rules",
];

/// Serialize one bundled dataset by name, for the CLI `dump` command and
/// the WASM bridge.
pub fn dataset_json(name: &str) -> Result<Value, Error> {
    let value = match name {
        "hero" => serde_json::to_value(&basics::HERO)?,
        "weekend" => serde_json::to_value(&basics::WEEKEND)?,
        "essentials" => serde_json::to_value(&basics::ESSENTIALS)?,
        "car" => serde_json::json!({
            "image": car::CAR_IMAGE,
            "parts": car::CAR_PARTS,
            "aero": car::AERO,
        }),
        "tyres" => serde_json::to_value(&car::TYRES)?,
        "teams" => serde_json::to_value(&teams::TEAMS)?,
        "tracks" => serde_json::to_value(&tracks::TRACKS)?,
        "rules" => serde_json::to_value(&rules::RULES)?,
        other => return Err(Error::UnknownDataset(other.to_string())),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleBody;
    use std::collections::HashSet;

    #[test]
    fn every_dataset_name_serializes() {
        for name in DATASET_NAMES {
            assert!(dataset_json(name).is_ok(), "{name} failed to serialize");
        }
    }

    #[test]
    fn unknown_dataset_is_an_error() {
        assert!(matches!(
            dataset_json("pitlane"),
            Err(Error::UnknownDataset(name)) if name == "pitlane"
        ));
    }

    #[test]
    fn teams_json_nests_drivers() {
        let teams = dataset_json("teams").unwrap_or_default();
        assert_eq!(teams[1]["name"], "Red Bull Racing");
        assert_eq!(teams[1]["drivers"][0]["stats"]["wins"], 62);
    }

    #[test]
    fn dataset_sizes() {
        assert_eq!(teams::TEAMS.len(), 4);
        assert!(teams::TEAMS.iter().all(|t| t.drivers.len() == 2));
        assert_eq!(tracks::TRACKS.len(), 5);
        assert!((3..=5).contains(&car::TYRES.len()));
        assert!((4..=5).contains(&rules::RULES.len()));
    }

    #[test]
    fn ids_are_unique_within_each_dataset() {
        fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
            let mut seen = HashSet::new();
            ids.into_iter().all(|id| seen.insert(id))
        }
        assert!(unique(teams::TEAMS.iter().map(|t| t.id)));
        assert!(unique(
            teams::TEAMS.iter().flat_map(|t| t.drivers).map(|d| d.id)
        ));
        assert!(unique(tracks::TRACKS.iter().map(|t| t.id)));
        assert!(unique(car::CAR_PARTS.iter().map(|p| p.id)));
        assert!(unique(car::TYRES.iter().map(|t| t.name)));
        assert!(unique(rules::RULES.iter().map(|r| r.id)));
        assert!(unique(basics::ESSENTIALS.iter().map(|e| e.id)));
    }

    #[test]
    fn hotspots_sit_inside_the_image() {
        for part in &car::CAR_PARTS {
            assert!((0.0..=100.0).contains(&part.x), "{}", part.id);
            assert!((0.0..=100.0).contains(&part.y), "{}", part.id);
        }
    }

    #[test]
    fn every_bundled_track_outline_parses() {
        for track in &tracks::TRACKS {
            let shape = tracks::shape(track.id);
            assert!(
                matches!(shape, Some(Ok(s)) if s.length() > 0.0),
                "{} outline did not parse",
                track.id
            );
        }
        assert!(tracks::shape("imola").is_none());
    }

    #[test]
    fn points_rule_uses_the_shared_table() {
        let points = rules::RULES.iter().find(|r| r.id == "points");
        assert!(matches!(
            points.map(|r| r.body),
            Some(RuleBody::Points(table)) if table.points_for(1) == 25
        ));
    }
}
