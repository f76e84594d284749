use std::collections::HashMap;
use std::sync::OnceLock;

use crate::geometry::{GeometryError, TrackShape};
use crate::model::{Corner, LapRecord, Track, TrackGeometry};

/// Every outline is normalized to the same box so the map panel never
/// rescales between circuits.
const VIEW_BOX: &str = "0 0 200 150";

pub static TRACKS: [Track; 5] = [
    Track {
        id: "monaco",
        name: "Circuit de Monaco",
        location: "Monte Carlo, Monaco",
        length_km: 3.337,
        turn_count: 19,
        lap_record: LapRecord {
            time: "1:10.166",
            driver: "L. Hamilton",
            year: 2019,
        },
        description: "The jewel in the crown. A tight, twisting street circuit where barriers punish the smallest error. Overtaking is nearly impossible, making Qualifying crucial.",
        geometry: TrackGeometry {
            view_box: VIEW_BOX,
            path: "M 40 120 L 40 100 C 40 80 50 60 70 50 L 90 45 C 100 40 100 30 90 25 L 70 20 L 60 30 L 50 25 L 60 10 L 100 10 L 120 20 L 130 50 L 140 60 L 160 60 L 160 80 L 140 85 L 120 80 L 100 85 L 90 110 L 110 120 L 130 115 L 140 125 L 130 135 L 70 135 Z",
        },
        corners: &[
            Corner {
                name: "Sainte Dévote",
                info: "Turn 1. A tight right-hander after the start.",
            },
            Corner {
                name: "The Hairpin",
                info: "The slowest corner in F1 (approx 45km/h).",
            },
            Corner {
                name: "Tunnel",
                info: "Fast, loud, and the transition from dark to light blinds drivers.",
            },
        ],
    },
    Track {
        id: "silverstone",
        name: "Silverstone Circuit",
        location: "Silverstone, UK",
        length_km: 5.891,
        turn_count: 18,
        lap_record: LapRecord {
            time: "1:24.303",
            driver: "L. Hamilton",
            year: 2020,
        },
        description: "The home of British motor racing. High-speed, flowing corners that test the car's aerodynamic limits and tyre durability.",
        geometry: TrackGeometry {
            view_box: VIEW_BOX,
            path: "M 80 130 L 120 130 L 140 110 L 160 115 L 180 100 L 170 70 L 150 60 L 160 40 L 140 20 L 100 20 L 80 40 L 60 30 L 40 40 L 30 70 L 40 90 L 30 110 L 50 125 Z",
        },
        corners: &[
            Corner {
                name: "Maggots & Becketts",
                info: "A legendary high-speed S-bend sequence taken at 280km/h.",
            },
            Corner {
                name: "Stowe",
                info: "A fast right-hander at the end of the Hangar Straight.",
            },
            Corner {
                name: "Copse",
                info: "A terrifyingly fast corner, often taken flat-out.",
            },
        ],
    },
    Track {
        id: "monza",
        name: "Autodromo Nazionale Monza",
        location: "Monza, Italy",
        length_km: 5.793,
        turn_count: 11,
        lap_record: LapRecord {
            time: "1:18.887",
            driver: "L. Hamilton",
            year: 2020,
        },
        description: "The Temple of Speed. F1 cars reach their highest velocities here (350km/h+). Low downforce wings and heavy braking zones define this track.",
        geometry: TrackGeometry {
            view_box: VIEW_BOX,
            path: "M 40 110 L 150 110 C 170 110 180 100 180 80 L 175 40 C 170 20 150 20 140 30 L 60 40 C 40 45 30 60 30 80 L 40 110 Z",
        },
        corners: &[
            Corner {
                name: "Parabolica",
                info: "A long, accelerating right-hander leading to the main straight.",
            },
            Corner {
                name: "Variante Ascari",
                info: "A tricky chicane that requires perfect kerb usage.",
            },
            Corner {
                name: "Curva Grande",
                info: "A long sweeping curve taken at full throttle.",
            },
        ],
    },
    Track {
        id: "suzuka",
        name: "Suzuka Circuit",
        location: "Suzuka, Japan",
        length_km: 5.807,
        turn_count: 18,
        lap_record: LapRecord {
            time: "1:27.064",
            driver: "S. Vettel",
            year: 2019,
        },
        description: "A driver's favorite. The only Figure-8 track on the calendar. It demands incredible precision and flow.",
        geometry: TrackGeometry {
            view_box: VIEW_BOX,
            // Stylized as a single open loop; the real layout crosses over itself.
            path: "M 50 120 L 100 120 L 120 100 L 100 80 L 80 80 L 60 60 L 70 40 L 100 30 L 130 40 L 140 60 L 130 80 L 150 80 L 170 70 L 180 80 L 160 110 L 140 110 L 120 100",
        },
        corners: &[
            Corner {
                name: "The S Curves",
                info: "A rhythmic uphill snake. Miss one apex, and you ruin the whole sector.",
            },
            Corner {
                name: "130R",
                info: "A fearsome left-hander taken flat out at 310km/h.",
            },
            Corner {
                name: "Degner 1 & 2",
                info: "Two difficult right-handers that punish mistakes heavily.",
            },
        ],
    },
    Track {
        id: "singapore",
        name: "Marina Bay Street Circuit",
        location: "Marina Bay, Singapore",
        length_km: 4.94,
        turn_count: 19,
        lap_record: LapRecord {
            time: "1:35.867",
            driver: "L. Hamilton",
            year: 2023,
        },
        description: "The original Night Race. Hot, humid, and bumpy. It is the most physically demanding race of the year for drivers.",
        geometry: TrackGeometry {
            view_box: VIEW_BOX,
            path: "M 30 100 L 30 50 L 50 40 L 150 40 L 170 50 L 170 100 L 150 120 L 120 110 L 110 130 L 90 130 L 80 110 L 50 120 Z",
        },
        corners: &[
            Corner {
                name: "Singapore Sling",
                info: "Historically a chicane, now a fast left hander.",
            },
            Corner {
                name: "Sheares",
                info: "A sharp turn taking drivers under the highway bridge.",
            },
            Corner {
                name: "Turn 1-2-3",
                info: "A complex braking zone immediately after the start.",
            },
        ],
    },
];

static SHAPES: OnceLock<HashMap<&'static str, Result<TrackShape, GeometryError>>> = OnceLock::new();

/// Parsed outline of a bundled circuit, built once per process.
///
/// Returns `None` for ids that aren't in [`TRACKS`].
pub fn shape(track_id: &str) -> Option<&'static Result<TrackShape, GeometryError>> {
    SHAPES
        .get_or_init(|| {
            TRACKS
                .iter()
                .map(|track| {
                    let parsed = track.parse_shape();
                    if let Err(e) = &parsed {
                        tracing::warn!(track = track.id, error = %e, "track outline failed to parse");
                    }
                    (track.id, parsed)
                })
                .collect()
        })
        .get(track_id)
}
