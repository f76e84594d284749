use paddock_protocol::ThemeToken;

use crate::model::{Driver, DriverStats, Team};

pub static TEAMS: [Team; 4] = [
    Team {
        id: "ferrari",
        name: "Scuderia Ferrari",
        principal: "Fred Vasseur",
        base: "Maranello, Italy",
        color: ThemeToken::TeamFerrari,
        logo: "/logos/ferrari.png",
        drivers: &[
            Driver {
                id: "leclerc",
                name: "Charles Leclerc",
                number: 16,
                country: "Monaco",
                portrait: "/drivers/leclerc.png",
                bio: "The Monegasque prodigy. Known for his blistering qualifying speed and deep connection to Ferrari.",
                stats: DriverStats {
                    wins: 8,
                    podiums: 41,
                    championships: 0,
                },
            },
            Driver {
                id: "hamilton",
                name: "Lewis Hamilton",
                number: 44,
                country: "UK",
                portrait: "/drivers/hamilton.png",
                bio: "The statistician's greatest. After a historic run with Mercedes, he joins Ferrari to chase a record 8th title.",
                stats: DriverStats {
                    wins: 105,
                    podiums: 201,
                    championships: 7,
                },
            },
        ],
    },
    Team {
        id: "redbull",
        name: "Red Bull Racing",
        principal: "Christian Horner",
        base: "Milton Keynes, UK",
        color: ThemeToken::TeamRedBull,
        logo: "/logos/redbull.png",
        drivers: &[
            Driver {
                id: "verstappen",
                name: "Max Verstappen",
                number: 1,
                country: "Netherlands",
                portrait: "/drivers/verstappen.png",
                bio: "The relentless force. Known for his aggressive style and unmatched consistency in the ground-effect era.",
                stats: DriverStats {
                    wins: 62,
                    podiums: 110,
                    championships: 4,
                },
            },
            Driver {
                id: "perez",
                name: "Sergio Perez",
                number: 11,
                country: "Mexico",
                portrait: "/drivers/perez.png",
                bio: "The Minister of Defence. A street circuit specialist known for his tyre management.",
                stats: DriverStats {
                    wins: 6,
                    podiums: 39,
                    championships: 0,
                },
            },
        ],
    },
    Team {
        id: "mclaren",
        name: "McLaren",
        principal: "Andrea Stella",
        base: "Woking, UK",
        color: ThemeToken::TeamMcLaren,
        logo: "/logos/mclaren.png",
        drivers: &[
            Driver {
                id: "norris",
                name: "Lando Norris",
                number: 4,
                country: "UK",
                portrait: "/drivers/norris.png",
                bio: "McLaren's golden boy. Rapid, popular, and a consistent podium challenger hunting for the title.",
                stats: DriverStats {
                    wins: 3,
                    podiums: 24,
                    championships: 0,
                },
            },
            Driver {
                id: "piastri",
                name: "Oscar Piastri",
                number: 81,
                country: "Australia",
                portrait: "/drivers/piastri.png",
                bio: "The ice-cold rookie sensation. Calm under pressure and devastatingly fast.",
                stats: DriverStats {
                    wins: 2,
                    podiums: 9,
                    championships: 0,
                },
            },
        ],
    },
    Team {
        id: "mercedes",
        name: "Mercedes-AMG",
        principal: "Toto Wolff",
        base: "Brackley, UK",
        color: ThemeToken::TeamMercedes,
        logo: "/logos/mercedes.png",
        drivers: &[
            Driver {
                id: "russell",
                name: "George Russell",
                number: 63,
                country: "UK",
                portrait: "/drivers/russell.png",
                bio: "Mr. Saturday. A precision driver who extracts the maximum from the car.",
                stats: DriverStats {
                    wins: 2,
                    podiums: 14,
                    championships: 0,
                },
            },
            Driver {
                id: "antonelli",
                name: "Kimi Antonelli",
                number: 12,
                country: "Italy",
                portrait: "/drivers/antonelli.png",
                bio: "The rookie prodigy. Stepping into huge shoes at Mercedes with immense hype surrounding his talent.",
                stats: DriverStats {
                    wins: 0,
                    podiums: 0,
                    championships: 0,
                },
            },
        ],
    },
];

/// Footnote shown under the driver stats.
pub const STATS_AS_OF: &str = "Stats correct as of Start of 2025 Season.";
