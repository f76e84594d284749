use paddock_protocol::ThemeToken;

use crate::model::{Essential, HeroCopy, WeekendSession};

pub static HERO: HeroCopy = HeroCopy {
    title: "F1 for",
    highlight: "Dummies",
    subtitle: "Everything you need to know about Formula 1 — from the cars and drivers to the tracks and rules.",
    background: "/F1-hero.mp4",
};

pub const BASICS_BACKGROUND: &str = "/side-F1.png";

pub const INTRO: &str = "Formula 1 is the highest class of international racing for open-wheel single-seater formula racing cars sanctioned by the FIA. It represents the pinnacle of automotive technology, speed, and driver skill.";

pub static WEEKEND: [WeekendSession; 3] = [
    WeekendSession {
        day: "FRIDAY",
        title: "Practice (FP1, FP2, FP3)",
        description: "Teams test car setups, gather tyre data, and drivers learn the track limits. No points awarded, purely preparation.",
        color: ThemeToken::FlagYellow,
    },
    WeekendSession {
        day: "SATURDAY",
        title: "Qualifying",
        description: "A knockout session (Q1, Q2, Q3) to determine the starting grid order. The fastest single lap takes 'Pole Position'.",
        color: ThemeToken::InfoBlue,
    },
    WeekendSession {
        day: "SUNDAY",
        title: "The Grand Prix",
        description: "The main event. Drivers race approx. 300km. Pit stops are mandatory. Top 10 finishers score points.",
        color: ThemeToken::Accent,
    },
];

pub static ESSENTIALS: [Essential; 3] = [
    Essential {
        id: "pit-stop",
        title: "The Pit Stop",
        info: "A team of 20 mechanics changes all 4 tyres in ~2.5 seconds. Speed and precision are vital.",
    },
    Essential {
        id: "points-system",
        title: "Points System",
        info: "Winner gets 25 pts. 2nd: 18, 3rd: 15. Points go down to 10th place (1 pt). Fastest lap gets +1 bonus point.",
    },
    Essential {
        id: "race-flags",
        title: "Race Flags",
        info: "Yellow: Danger, slow down.\nRed: Session stopped.\nBlue: Let faster car pass.\nGreen: Racing resumes.",
    },
];
