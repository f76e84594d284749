//! The single page: six sections in a fixed vertical order.

use std::fmt;
use std::str::FromStr;

use paddock_protocol::{HitTarget, Interaction, Point, RenderCommand, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::views::{
    BasicsState, CircuitsState, GridState, HeroState, MachineState, Rendered, RulesState,
    render_basics, render_circuits, render_grid, render_hero, render_machine, render_rules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Hero,
    Basics,
    Machine,
    Grid,
    Circuits,
    Rules,
}

impl SectionId {
    /// Page order, top to bottom.
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Basics,
        SectionId::Machine,
        SectionId::Grid,
        SectionId::Circuits,
        SectionId::Rules,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Basics => "basics",
            Self::Machine => "machine",
            Self::Grid => "grid",
            Self::Circuits => "circuits",
            Self::Rules => "rules",
        }
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a section landed in the stacked page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionSlot {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

/// All section state. Sections never see each other; `dispatch` is the
/// only router.
#[derive(Debug, Clone)]
pub struct Page {
    hero: HeroState,
    basics: BasicsState,
    machine: MachineState,
    grid: GridState,
    circuits: CircuitsState,
    rules: RulesState,
    reduced_motion: bool,
}

impl Page {
    pub fn new(now: f64) -> Self {
        Self {
            hero: HeroState::new(now),
            basics: BasicsState::new(),
            machine: MachineState::new(),
            grid: GridState::new(now),
            circuits: CircuitsState::new(now),
            rules: RulesState::new(now),
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.set_reduced_motion(reduced);
        self
    }

    /// Skip the hero entrance and freeze the track map in its drawn state.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            self.hero.skip_entrance();
        }
        self.circuits.set_reduced_motion(reduced);
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn hero(&self) -> &HeroState {
        &self.hero
    }

    pub fn basics(&self) -> &BasicsState {
        &self.basics
    }

    pub fn machine(&self) -> &MachineState {
        &self.machine
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn circuits(&self) -> &CircuitsState {
        &self.circuits
    }

    pub fn rules(&self) -> &RulesState {
        &self.rules
    }

    /// Route an interaction to the section that owns its target. Returns
    /// whether any state changed.
    pub fn dispatch(&mut self, interaction: &Interaction, now: f64) -> bool {
        use HitTarget as T;
        use Interaction::{Click, HoverEnter, HoverLeave};

        let changed = match interaction {
            Click(T::CarPart(id)) => self.machine.open_part(id, now),
            Click(T::PartBackdrop | T::PartClose) => self.machine.close_part(now),
            Click(T::Tyre(name)) | HoverEnter(T::Tyre(name)) => self.machine.select_tyre(name),
            Click(T::TeamTab(id)) => self.grid.select_team(id, now),
            Click(T::DriverCard(id)) => self.grid.open_driver(id, now),
            Click(T::DriverBackdrop | T::DriverClose) => self.grid.close_driver(now),
            Click(T::TrackItem(id)) => self.circuits.select_track(id, now),
            Click(T::RuleHeader(id)) => self.rules.toggle(id, now),
            Click(T::Essential(id)) | HoverEnter(T::Essential(id)) => {
                self.basics.reveal(id, now)
            }
            HoverLeave(T::Essential(id)) => self.basics.conceal(id, now),
            _ => false,
        };
        if changed {
            tracing::debug!(?interaction, "interaction handled");
        }
        changed
    }

    /// Reset a section to its defaults, as if it had been remounted.
    pub fn unmount(&mut self, section: SectionId, now: f64) {
        match section {
            SectionId::Hero => {
                self.hero.reset(now);
                if self.reduced_motion {
                    self.hero.skip_entrance();
                }
            }
            SectionId::Basics => self.basics.reset(),
            SectionId::Machine => self.machine.reset(),
            SectionId::Grid => self.grid.reset(),
            SectionId::Circuits => self.circuits.reset(now),
            SectionId::Rules => self.rules.reset(),
        }
        tracing::debug!(%section, "section reset");
    }

    /// Render one section laid out from `y = 0`.
    pub fn render_section(&self, section: SectionId, viewport: &Viewport, now: f64) -> Rendered {
        match section {
            SectionId::Hero => render_hero(&self.hero, viewport, now),
            SectionId::Basics => render_basics(&self.basics, viewport, now),
            SectionId::Machine => render_machine(&self.machine, viewport, now),
            SectionId::Grid => render_grid(&self.grid, viewport, now),
            SectionId::Circuits => render_circuits(&self.circuits, viewport, now),
            SectionId::Rules => render_rules(&self.rules, viewport, now),
        }
    }

    /// Top offset and height of every section, in page order.
    pub fn layout(&self, viewport: &Viewport, now: f64) -> Vec<SectionSlot> {
        let mut top = 0.0;
        SectionId::ALL
            .into_iter()
            .map(|id| {
                let height = self.render_section(id, viewport, now).height;
                let slot = SectionSlot { id, top, height };
                top += height;
                slot
            })
            .collect()
    }

    /// The whole page, each section translated below the previous one.
    pub fn render(&self, viewport: &Viewport, now: f64) -> Rendered {
        let mut commands = Vec::new();
        let mut top = 0.0;
        for id in SectionId::ALL {
            let section = self.render_section(id, viewport, now);
            commands.push(RenderCommand::PushTransform {
                translate: Point::new(viewport.x, viewport.y + top),
                scale: Point::new(1.0, 1.0),
            });
            commands.extend(section.commands);
            commands.push(RenderCommand::PopTransform);
            top += section.height;
        }
        Rendered {
            commands,
            height: top,
        }
    }

    /// Whether any section is mid-transition and hosts should keep
    /// repainting.
    pub fn is_animating(&self, now: f64) -> bool {
        self.hero.is_animating(now)
            || self.basics.is_animating(now)
            || self.machine.is_animating(now)
            || self.grid.is_animating(now)
            || self.circuits.is_animating(now)
            || self.rules.is_animating(now)
    }
}
