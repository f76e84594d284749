use paddock_protocol::ThemeToken;
use serde::Serialize;

use crate::selection::Keyed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: &'static str,
    pub name: &'static str,
    pub principal: &'static str,
    pub base: &'static str,
    pub color: ThemeToken,
    /// Bundled logo asset path.
    pub logo: &'static str,
    pub drivers: &'static [Driver],
}

impl Team {
    pub fn driver(&self, id: &str) -> Option<&'static Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }
}

impl Keyed for Team {
    fn key(&self) -> &'static str {
        self.id
    }
}

/// A race driver. Belongs to exactly one [`Team`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Driver {
    pub id: &'static str,
    pub name: &'static str,
    pub number: u8,
    pub country: &'static str,
    /// Bundled portrait asset path.
    pub portrait: &'static str,
    pub bio: &'static str,
    pub stats: DriverStats,
}

impl Keyed for Driver {
    fn key(&self) -> &'static str {
        self.id
    }
}

/// Career numbers as of the start of the 2025 season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriverStats {
    pub wins: u32,
    pub podiums: u32,
    pub championships: u32,
}
