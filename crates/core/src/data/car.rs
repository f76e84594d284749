use paddock_protocol::ThemeToken;

use crate::model::{AeroConcept, CarPart, TyreCompound};

/// Asset the anatomy hotspots are overlaid on.
pub const CAR_IMAGE: &str = "/F1-cars.png";

pub static CAR_PARTS: [CarPart; 5] = [
    CarPart {
        id: "front-wing",
        label: "Front Wing",
        x: 85.0,
        y: 75.0,
        description: "Directs airflow over the car.",
    },
    CarPart {
        id: "halo",
        label: "Halo",
        x: 48.0,
        y: 35.0,
        description: "Titanium bar protecting the head.",
    },
    CarPart {
        id: "rear-wing",
        label: "Rear Wing",
        x: 10.0,
        y: 25.0,
        description: "Generates downforce and Drag Reduction.",
    },
    CarPart {
        id: "sidepod",
        label: "Sidepods",
        x: 55.0,
        y: 60.0,
        description: "Cooling intakes and air shaping.",
    },
    CarPart {
        id: "floor",
        label: "Floor",
        x: 30.0,
        y: 85.0,
        description: "Generates ground effect suction.",
    },
];

pub static TYRES: [TyreCompound; 3] = [
    TyreCompound {
        name: "Soft",
        usage_note: "Fastest, low durability.",
        color: ThemeToken::TyreSoft,
    },
    TyreCompound {
        name: "Medium",
        usage_note: "Balanced speed/life.",
        color: ThemeToken::TyreMedium,
    },
    TyreCompound {
        name: "Hard",
        usage_note: "Slowest, high durability.",
        color: ThemeToken::TyreHard,
    },
];

pub static AERO: [AeroConcept; 2] = [
    AeroConcept {
        title: "Downforce",
        note: "Pushes car down for grip.",
        color: ThemeToken::InfoBlue,
    },
    AeroConcept {
        title: "Drag",
        note: "Air resistance slowing the car.",
        color: ThemeToken::Accent,
    },
];
