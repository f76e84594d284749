pub mod basics;
pub mod car;
pub mod rules;
pub mod team;
pub mod track;

pub use basics::{Essential, HeroCopy, WeekendSession};
pub use car::{AeroConcept, CarPart, TyreCompound};
pub use rules::{FlagSignal, Penalty, PointsTable, QualifyingStage, RuleBody, RuleSection};
pub use team::{Driver, DriverStats, Team};
pub use track::{Corner, LapRecord, Track, TrackGeometry};
