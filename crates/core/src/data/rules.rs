use paddock_protocol::ThemeToken;

use crate::model::{FlagSignal, Penalty, PointsTable, QualifyingStage, RuleBody, RuleSection};

pub const QUALIFYING_INTRO: &str = "Qualifying determines the starting order for the race. It is a knockout session split into three parts.";

pub const FASTEST_LAP_NOTE: &str = "+1 Bonus Point for Fastest Lap (if in Top 10)";

pub const POINTS: PointsTable = PointsTable {
    awards: &[25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
    fastest_lap_bonus: 1,
};

pub static RULES: [RuleSection; 4] = [
    RuleSection {
        id: "qualifying",
        title: "Qualifying Format (Saturday)",
        color: ThemeToken::InfoBlue,
        body: RuleBody::Qualifying(&[
            QualifyingStage {
                name: "Q1",
                minutes: 18,
                headline: "20 Drivers Start",
                outcome: "Bottom 5 Eliminated (P16-P20)",
                decisive: false,
            },
            QualifyingStage {
                name: "Q2",
                minutes: 15,
                headline: "15 Drivers Left",
                outcome: "Bottom 5 Eliminated (P11-P15)",
                decisive: false,
            },
            QualifyingStage {
                name: "Q3",
                minutes: 12,
                headline: "Top 10 Shootout",
                outcome: "Winner takes Pole Position",
                decisive: true,
            },
        ]),
    },
    RuleSection {
        id: "flags",
        title: "Flags & Signals",
        color: ThemeToken::FlagYellow,
        body: RuleBody::Flags(&[
            FlagSignal {
                name: "Yellow Flag",
                meaning: "Hazard ahead. Slow down, no overtaking.",
                color: ThemeToken::FlagYellow,
                badge: None,
            },
            FlagSignal {
                name: "Green Flag",
                meaning: "Clear track. Racing resumes.",
                color: ThemeToken::FlagGreen,
                badge: None,
            },
            FlagSignal {
                name: "Red Flag",
                meaning: "Session stopped immediately. Return to pits.",
                color: ThemeToken::FlagRed,
                badge: None,
            },
            FlagSignal {
                name: "Blue Flag",
                meaning: "Faster car approaching. Let them pass.",
                color: ThemeToken::FlagBlue,
                badge: None,
            },
            FlagSignal {
                name: "Black Flag",
                meaning: "Disqualification. Return to garage immediately.",
                color: ThemeToken::FlagBlack,
                badge: None,
            },
            FlagSignal {
                name: "Safety Car (SC)",
                meaning: "Hold position, follow the Safety Car, reduced speed.",
                color: ThemeToken::SafetyCar,
                badge: Some("SC"),
            },
        ]),
    },
    RuleSection {
        id: "points",
        title: "Points System",
        color: ThemeToken::Gold,
        body: RuleBody::Points(POINTS),
    },
    RuleSection {
        id: "penalties",
        title: "Penalties & Offences",
        color: ThemeToken::Accent,
        body: RuleBody::Penalties(&[
            Penalty {
                name: "5 or 10 Second Penalty",
                detail: "Added to total race time. Usually for causing a minor collision or track limits.",
                color: ThemeToken::WarnOrange,
            },
            Penalty {
                name: "Drive-Through",
                detail: "Drive through the pit lane without stopping. Costs ~20 seconds.",
                color: ThemeToken::Accent,
            },
            Penalty {
                name: "Grid Penalty",
                detail: "Start lower than you qualified. Applied for changing engine parts over the limit.",
                color: ThemeToken::TextMuted,
            },
        ]),
    },
];
